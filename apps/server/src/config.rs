use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::Context;
use chumpstreet_market_data::provider::fred::DEFAULT_BASE_URL;

/// Shape of the log lines written to stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> anyhow::Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("CS_LOG_FORMAT must be 'text' or 'json', got '{}'", other),
        }
    }
}

pub struct Config {
    pub listen_addr: SocketAddr,
    pub fred_api_key: Option<String>,
    pub fred_base_url: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            fred_api_key: None,
            fred_base_url: DEFAULT_BASE_URL.to_string(),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(30000),
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("CS_LISTEN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8000".to_string())
            .parse()
            .context("Invalid CS_LISTEN_ADDR")?;
        let fred_api_key = std::env::var("FRED_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let fred_base_url =
            std::env::var("CS_FRED_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let cors_allow = std::env::var("CS_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("CS_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let log_format = match std::env::var("CS_LOG_FORMAT") {
            Ok(value) => value.parse()?,
            Err(_) => LogFormat::default(),
        };
        Ok(Self {
            listen_addr,
            fred_api_key,
            fred_base_url,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            log_format,
        })
    }
}
