//! API server entry point.

use marketlens::config::Config;
use marketlens::core::http::{start_server, AppState};
use marketlens::logging::init_logging;
use marketlens::metrics::Metrics;
use marketlens::services::ai::provider_from_config;
use marketlens::services::market_data::{MarketDataProvider, MarketService};
use marketlens::services::providers::{AlphaVantageProvider, SyntheticProvider, TwelveDataProvider};
use marketlens::services::symbol_cache::SymbolCache;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = Config::from_env();

    let stock_provider: Arc<dyn MarketDataProvider> = match &config.alpha_vantage_api_key {
        Some(key) => {
            let cache = Arc::new(SymbolCache::new(
                config.symbol_cache_capacity,
                Duration::from_secs(config.symbol_cache_ttl_secs),
            ));
            Arc::new(AlphaVantageProvider::new(key.clone(), cache))
        }
        None => {
            info!("no Alpha Vantage key configured, serving synthetic stock candles");
            Arc::new(SyntheticProvider)
        }
    };

    let gold_provider: Arc<dyn MarketDataProvider> = match &config.twelve_data_api_key {
        Some(key) => Arc::new(TwelveDataProvider::new(key.clone())),
        None => {
            info!("no Twelve Data key configured, serving synthetic gold candles");
            Arc::new(SyntheticProvider)
        }
    };

    let ai = provider_from_config(&config);
    info!(provider = ai.name(), "AI commentary provider selected");

    let state = AppState {
        market: Arc::new(MarketService::new(stock_provider, gold_provider)),
        ai,
        metrics: Arc::new(Metrics::new()?),
        start_time: Arc::new(Instant::now()),
    };

    start_server(state, config.port).await
}
