//! Market data provider seam and the service that orchestrates the
//! fetch → aggregate → indicators → rules pipeline.

use crate::aggregate::aggregate;
use crate::error::ApiError;
use crate::indicators::compute_indicators;
use crate::models::candle::{AssetClass, Candle, Interval};
use crate::models::indicators::IndicatorBundle;
use crate::models::rules::{MultiIntervalRules, RuleResult};
use crate::rules::{evaluate_interval_rules, evaluate_multi_interval_rules};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

#[derive(Debug)]
pub enum ProviderError {
    /// Transport-level failure talking to the vendor.
    Http(String),
    /// The vendor answered with something we cannot interpret.
    BadPayload(String),
    /// The vendor rejected the request (rate limit, bad key, error status).
    Vendor(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(msg) => write!(f, "http: {msg}"),
            Self::BadPayload(msg) => write!(f, "bad payload: {msg}"),
            Self::Vendor(msg) => write!(f, "vendor: {msg}"),
        }
    }
}

impl std::error::Error for ProviderError {}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.to_string())
    }
}

/// Source of raw candles for one vendor.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch candles for `symbol` at `interval`, ascending by time.
    async fn fetch_candles(
        &self,
        symbol: &str,
        interval: Interval,
    ) -> Result<Vec<Candle>, ProviderError>;

    /// Whether the vendor serves this interval directly. When it does not,
    /// the service fetches hourly candles and aggregates them itself.
    fn supports_native(&self, _interval: Interval) -> bool {
        true
    }
}

/// Everything the HTTP layer needs to answer one market request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    pub symbol: String,
    pub asset_class: AssetClass,
    pub interval: Interval,
    pub timezone: &'static str,
    pub currency: &'static str,
    pub candles: Vec<Candle>,
    pub indicators: IndicatorBundle,
    pub rules: RuleResult,
}

pub struct MarketService {
    stock_provider: Arc<dyn MarketDataProvider>,
    gold_provider: Arc<dyn MarketDataProvider>,
}

impl MarketService {
    pub fn new(
        stock_provider: Arc<dyn MarketDataProvider>,
        gold_provider: Arc<dyn MarketDataProvider>,
    ) -> Self {
        Self {
            stock_provider,
            gold_provider,
        }
    }

    fn provider_for(&self, asset_class: AssetClass) -> &Arc<dyn MarketDataProvider> {
        match asset_class {
            AssetClass::Stock => &self.stock_provider,
            AssetClass::Gold => &self.gold_provider,
        }
    }

    /// Fetch candles at the requested interval, aggregating hourly data
    /// when the vendor has no native series for it.
    async fn candles_at(
        &self,
        symbol: &str,
        asset_class: AssetClass,
        interval: Interval,
    ) -> Result<Vec<Candle>, ApiError> {
        let provider = self.provider_for(asset_class);

        if provider.supports_native(interval) {
            let candles = provider
                .fetch_candles(symbol, interval)
                .await
                .map_err(|e| ApiError::Upstream(e.to_string()))?;
            // Identity pass still validates vendor data before it reaches
            // the indicator engine.
            Ok(aggregate(&candles, interval, interval)?)
        } else {
            let base = provider
                .fetch_candles(symbol, Interval::H1)
                .await
                .map_err(|e| ApiError::Upstream(e.to_string()))?;
            Ok(aggregate(&base, Interval::H1, interval)?)
        }
    }

    /// Auxiliary daily series backing pdh/pdl. Optional: a failure here
    /// degrades the key levels to absent rather than failing the request.
    async fn daily_levels(&self, symbol: &str, asset_class: AssetClass) -> Option<Vec<Candle>> {
        match self.candles_at(symbol, asset_class, Interval::D1).await {
            Ok(daily) => Some(daily),
            Err(e) => {
                warn!(symbol, error = %e, "daily series unavailable, skipping key levels");
                None
            }
        }
    }

    /// Compute the indicator bundle for one interval.
    pub async fn indicator_bundle(
        &self,
        symbol: &str,
        asset_class: AssetClass,
        interval: Interval,
    ) -> Result<(Vec<Candle>, IndicatorBundle), ApiError> {
        let candles = self.candles_at(symbol, asset_class, interval).await?;
        let daily = if interval == Interval::D1 {
            None
        } else {
            self.daily_levels(symbol, asset_class).await
        };
        let bundle = compute_indicators(&candles, daily.as_deref());
        Ok((candles, bundle))
    }

    /// Full pipeline for one symbol/interval.
    pub async fn snapshot(
        &self,
        symbol: &str,
        asset_class: AssetClass,
        interval: Interval,
    ) -> Result<MarketSnapshot, ApiError> {
        let (candles, indicators) = self.indicator_bundle(symbol, asset_class, interval).await?;
        let rules = evaluate_interval_rules(&indicators, asset_class);

        Ok(MarketSnapshot {
            symbol: symbol.to_string(),
            asset_class,
            interval,
            timezone: "UTC",
            currency: "USD",
            candles,
            indicators,
            rules,
        })
    }

    /// Evaluate several intervals and summarize their trend agreement.
    pub async fn multi_interval_rules(
        &self,
        symbol: &str,
        asset_class: AssetClass,
        intervals: &[Interval],
    ) -> Result<MultiIntervalRules, ApiError> {
        let mut bundles = BTreeMap::new();
        for interval in intervals {
            let (_, bundle) = self.indicator_bundle(symbol, asset_class, *interval).await?;
            bundles.insert(*interval, bundle);
        }
        Ok(evaluate_multi_interval_rules(&bundles, asset_class))
    }
}
