//! Alpha Vantage candle provider for stocks.

use crate::models::candle::{Candle, Interval};
use crate::services::market_data::{MarketDataProvider, ProviderError};
use crate::services::symbol_cache::SymbolCache;
use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

pub struct AlphaVantageProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    symbol_cache: Arc<SymbolCache>,
}

/// One OHLCV row as Alpha Vantage serializes it (numbers as strings).
#[derive(Debug, Deserialize)]
struct TimeSeriesRow {
    #[serde(rename = "1. open")]
    open: String,
    #[serde(rename = "2. high")]
    high: String,
    #[serde(rename = "3. low")]
    low: String,
    #[serde(rename = "4. close")]
    close: String,
    #[serde(rename = "5. volume", default)]
    volume: Option<String>,
}

impl AlphaVantageProvider {
    pub fn new(api_key: String, symbol_cache: Arc<SymbolCache>) -> Self {
        Self::with_base_url(api_key, symbol_cache, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(
        api_key: String,
        symbol_cache: Arc<SymbolCache>,
        base_url: String,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
            symbol_cache,
        }
    }

    async fn get_json(&self, params: &[(&str, &str)]) -> Result<Value, ProviderError> {
        let request = || async {
            let response = self
                .client
                .get(&self.base_url)
                .query(params)
                .send()
                .await?
                .error_for_status()?;
            Ok::<Value, ProviderError>(response.json().await?)
        };
        let data = request
            .retry(ExponentialBuilder::default().with_max_times(2))
            .await?;

        if let Some(note) = data.get("Note").and_then(Value::as_str) {
            return Err(ProviderError::Vendor(note.to_string()));
        }
        if let Some(msg) = data.get("Error Message").and_then(Value::as_str) {
            return Err(ProviderError::Vendor(msg.to_string()));
        }
        Ok(data)
    }

    /// Resolve a user-facing symbol to the vendor's canonical one, going
    /// through the injected cache to avoid repeated SYMBOL_SEARCH calls.
    async fn resolve_symbol(&self, symbol: &str) -> Result<String, ProviderError> {
        if let Some(resolved) = self.symbol_cache.get(symbol) {
            return Ok(resolved);
        }

        let data = self
            .get_json(&[
                ("function", "SYMBOL_SEARCH"),
                ("keywords", symbol),
                ("apikey", &self.api_key),
            ])
            .await?;

        let resolved = data
            .get("bestMatches")
            .and_then(Value::as_array)
            .and_then(|matches| matches.first())
            .and_then(|m| m.get("1. symbol"))
            .and_then(Value::as_str)
            .unwrap_or(symbol)
            .to_string();

        debug!(symbol, resolved, "symbol resolved");
        self.symbol_cache.insert(symbol.to_string(), resolved.clone());
        Ok(resolved)
    }

    fn map_series(series: &Value) -> Result<Vec<Candle>, ProviderError> {
        let rows: BTreeMap<String, TimeSeriesRow> = serde_json::from_value(series.clone())
            .map_err(|e| ProviderError::BadPayload(e.to_string()))?;

        // BTreeMap keys are already sorted ascending by timestamp string.
        rows.iter()
            .map(|(stamp, row)| {
                Ok(Candle {
                    time: parse_timestamp(stamp)?,
                    open: parse_price(&row.open, stamp)?,
                    high: parse_price(&row.high, stamp)?,
                    low: parse_price(&row.low, stamp)?,
                    close: parse_price(&row.close, stamp)?,
                    volume: match &row.volume {
                        Some(v) => parse_price(v, stamp)?,
                        None => 0.0,
                    },
                })
            })
            .collect()
    }
}

fn parse_timestamp(stamp: &str) -> Result<chrono::DateTime<chrono::Utc>, ProviderError> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.and_utc());
    }
    NaiveDate::parse_from_str(stamp, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| ProviderError::BadPayload(format!("unparseable timestamp: {stamp}")))
}

fn parse_price(raw: &str, stamp: &str) -> Result<f64, ProviderError> {
    raw.parse()
        .map_err(|_| ProviderError::BadPayload(format!("non-numeric field at {stamp}: {raw}")))
}

#[async_trait]
impl MarketDataProvider for AlphaVantageProvider {
    async fn fetch_candles(
        &self,
        symbol: &str,
        interval: Interval,
    ) -> Result<Vec<Candle>, ProviderError> {
        let resolved = self.resolve_symbol(symbol).await?;

        let data = match interval {
            Interval::D1 => {
                self.get_json(&[
                    ("function", "TIME_SERIES_DAILY"),
                    ("symbol", &resolved),
                    ("apikey", &self.api_key),
                ])
                .await?
            }
            _ => {
                self.get_json(&[
                    ("function", "TIME_SERIES_INTRADAY"),
                    ("symbol", &resolved),
                    ("interval", "60min"),
                    ("apikey", &self.api_key),
                ])
                .await?
            }
        };

        let key = match interval {
            Interval::D1 => "Time Series (Daily)",
            _ => "Time Series (60min)",
        };
        let series = data
            .get(key)
            .ok_or_else(|| ProviderError::BadPayload(format!("missing '{key}' in response")))?;

        Self::map_series(series)
    }

    /// 4h candles are built from the 60min series by the caller.
    fn supports_native(&self, interval: Interval) -> bool {
        interval != Interval::H4
    }
}
