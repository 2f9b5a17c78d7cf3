//! Twelve Data candle provider for gold (XAU/USD).

use crate::models::candle::{Candle, Interval};
use crate::services::market_data::{MarketDataProvider, ProviderError};
use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://api.twelvedata.com";
const GOLD_SYMBOL: &str = "XAU/USD";
const OUTPUT_SIZE: &str = "300";

pub struct TwelveDataProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct TimeSeriesResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    values: Vec<TimeSeriesValue>,
}

#[derive(Debug, Deserialize)]
struct TimeSeriesValue {
    datetime: String,
    open: String,
    high: String,
    low: String,
    close: String,
    #[serde(default)]
    volume: Option<String>,
}

impl TwelveDataProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    fn vendor_interval(interval: Interval) -> &'static str {
        match interval {
            Interval::H1 => "1h",
            Interval::H4 => "4h",
            Interval::D1 => "1day",
        }
    }
}

fn parse_value(value: &TimeSeriesValue) -> Result<Candle, ProviderError> {
    let time = NaiveDateTime::parse_from_str(&value.datetime, "%Y-%m-%d %H:%M:%S")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(&value.datetime, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|dt| dt.and_utc())
        .ok_or_else(|| {
            ProviderError::BadPayload(format!("unparseable datetime: {}", value.datetime))
        })?;

    let number = |raw: &str| {
        raw.parse::<f64>().map_err(|_| {
            ProviderError::BadPayload(format!("non-numeric field at {}: {raw}", value.datetime))
        })
    };

    Ok(Candle {
        time,
        open: number(&value.open)?,
        high: number(&value.high)?,
        low: number(&value.low)?,
        close: number(&value.close)?,
        volume: match &value.volume {
            Some(v) => number(v)?,
            None => 0.0,
        },
    })
}

#[async_trait]
impl MarketDataProvider for TwelveDataProvider {
    async fn fetch_candles(
        &self,
        _symbol: &str,
        interval: Interval,
    ) -> Result<Vec<Candle>, ProviderError> {
        let url = format!("{}/time_series", self.base_url);
        let vendor_interval = Self::vendor_interval(interval);

        let request = || async {
            let response = self
                .client
                .get(&url)
                .query(&[
                    ("symbol", GOLD_SYMBOL),
                    ("interval", vendor_interval),
                    ("outputsize", OUTPUT_SIZE),
                    ("apikey", &self.api_key),
                ])
                .send()
                .await?
                .error_for_status()?;
            Ok::<TimeSeriesResponse, ProviderError>(response.json().await?)
        };
        let data = request
            .retry(ExponentialBuilder::default().with_max_times(2))
            .await?;

        if data.status.as_deref() == Some("error") {
            return Err(ProviderError::Vendor(
                data.message.unwrap_or_else(|| "twelvedata error".to_string()),
            ));
        }

        let mut candles = data
            .values
            .iter()
            .map(parse_value)
            .collect::<Result<Vec<_>, _>>()?;
        // The vendor returns newest first.
        candles.sort_by_key(|c| c.time);
        Ok(candles)
    }
}
