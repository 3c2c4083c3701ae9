//! Partial-failure bookkeeping shared by the pipelines.
//!
//! A batch request resolves many independent identifiers. Each identifier (or
//! each row within one) either yields records or an [`ItemError`]; neither
//! outcome stops the rest of the batch. [`BatchAccumulator`] is the value the
//! batch loops thread through to collect both lists.

use serde::{Deserialize, Serialize};

/// One failed unit of work inside an otherwise successful batch.
///
/// `context` names the ticker or series the failure belongs to. Whole-request
/// failures carry no context.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemError {
    #[serde(default)]
    pub context: Option<String>,
    pub message: String,
}

impl ItemError {
    /// An error attributed to one identifier.
    pub fn for_item(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            context: Some(context.into()),
            message: message.into(),
        }
    }

    /// An error about the request as a whole.
    pub fn request(message: impl Into<String>) -> Self {
        Self {
            context: None,
            message: message.into(),
        }
    }
}

/// Records and errors collected while walking a batch, in encounter order.
#[derive(Debug)]
pub struct BatchAccumulator<T> {
    records: Vec<T>,
    errors: Vec<ItemError>,
}

impl<T> Default for BatchAccumulator<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            errors: Vec::new(),
        }
    }
}

impl<T> BatchAccumulator<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_record(&mut self, record: T) {
        self.records.push(record);
    }

    pub fn extend_records(&mut self, records: impl IntoIterator<Item = T>) {
        self.records.extend(records);
    }

    /// Record a failure against `context` and keep going.
    pub fn push_error(&mut self, context: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ItemError::for_item(context, message));
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn errors(&self) -> &[ItemError] {
        &self.errors
    }

    /// Consume the accumulator, yielding `(records, errors)`.
    pub fn into_parts(self) -> (Vec<T>, Vec<ItemError>) {
        (self.records, self.errors)
    }
}
