/// Validation error returned for an empty or malformed ticker list
pub const TICKERS_REQUIRED_MESSAGE: &str = "Tickers must be a non-empty list of strings";

/// Recorded against a ticker that is missing from the batch result
pub const NO_DATA_FOR_TICKER_MESSAGE: &str = "No data found for ticker";

/// Prefix of the whole-response error for a failed batch download
pub const DOWNLOAD_FAILED_PREFIX: &str = "Download failed";

/// Prefix of the whole-response error for a batch without any rows
pub const NO_DATA_RETURNED_PREFIX: &str = "No data returned for tickers";

/// Prefix of the per-row normalization error
pub const ROW_PARSE_FAILED_PREFIX: &str = "Row parse failed";
