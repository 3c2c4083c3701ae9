use std::sync::Arc;

use crate::config::{Config, LogFormat};
use chumpstreet_core::{
    macro_data::{MacroDataService, MacroDataServiceTrait},
    market_data::{MarketDataService, MarketDataServiceTrait},
};
use chumpstreet_market_data::{
    FredProvider, MacroSeriesProvider, PriceHistoryProvider, YahooProvider,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub const SERVER_NAME: &str = "ChumpStreet";

pub struct AppState {
    pub market_data_service: Arc<dyn MarketDataServiceTrait>,
    pub macro_data_service: Arc<dyn MacroDataServiceTrait>,
}

/// Install the global subscriber. `RUST_LOG` overrides the default `info` level.
pub fn init_tracing(format: LogFormat) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let json = (format == LogFormat::Json).then(|| {
        fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text = (format == LogFormat::Text).then(|| {
        fmt::layer()
            .compact()
            .with_target(true)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(text)
        .try_init()?;
    Ok(())
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let price_provider = Arc::new(YahooProvider::new()?);
    if config.fred_api_key.is_none() {
        tracing::warn!("FRED_API_KEY is not set; get_macro_data calls will fail");
    }
    let series_provider = Arc::new(FredProvider::with_base_url(
        config.fred_api_key.clone(),
        config.fred_base_url.clone(),
    ));
    tracing::info!(
        "Providers ready: prices={}, macro series={}",
        price_provider.id(),
        series_provider.id()
    );

    Ok(build_state_with(price_provider, series_provider))
}

/// Wire the services around already-built providers.
pub fn build_state_with(
    price_provider: Arc<dyn PriceHistoryProvider>,
    series_provider: Arc<dyn MacroSeriesProvider>,
) -> Arc<AppState> {
    let market_data_service = Arc::new(MarketDataService::new(price_provider));
    let macro_data_service = Arc::new(MacroDataService::new(series_provider));

    Arc::new(AppState {
        market_data_service,
        macro_data_service,
    })
}
