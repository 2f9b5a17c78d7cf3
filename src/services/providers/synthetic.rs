//! Deterministic synthetic candle provider.
//!
//! Serves when no vendor API key is configured (local development, tests).
//! Output depends only on the symbol and interval, so repeated requests
//! and test runs see identical series.

use crate::models::candle::{Candle, Interval};
use crate::services::market_data::{MarketDataProvider, ProviderError};
use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};

const SERIES_LEN: usize = 300;

pub struct SyntheticProvider;

/// Minimal LCG; quality does not matter, stability across runs does.
struct Lcg(u64);

impl Lcg {
    fn next_unit(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn seed_for(symbol: &str, interval: Interval) -> u64 {
    let mut seed: u64 = 0xcbf29ce484222325;
    for byte in symbol.bytes().chain(interval.as_str().bytes()) {
        seed ^= byte as u64;
        seed = seed.wrapping_mul(0x100000001b3);
    }
    seed
}

#[async_trait]
impl MarketDataProvider for SyntheticProvider {
    async fn fetch_candles(
        &self,
        symbol: &str,
        interval: Interval,
    ) -> Result<Vec<Candle>, ProviderError> {
        let mut rng = Lcg(seed_for(symbol, interval));
        let start = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .ok_or_else(|| ProviderError::BadPayload("invalid epoch".to_string()))?;
        let step = Duration::hours(interval.hours() as i64);

        let mut candles = Vec::with_capacity(SERIES_LEN);
        let mut close = 100.0 + rng.next_unit() * 50.0;

        for i in 0..SERIES_LEN {
            let open = close;
            let drift = (rng.next_unit() - 0.48) * 2.0;
            close = (open + drift).max(1.0);
            let wick_up = rng.next_unit() * 0.8;
            let wick_down = rng.next_unit() * 0.8;
            let volume = (500.0 + rng.next_unit() * 1000.0).round();

            candles.push(Candle {
                time: start + step * i as i32,
                open,
                high: open.max(close) + wick_up,
                low: (open.min(close) - wick_down).max(0.5),
                close,
                volume,
            });
        }

        Ok(candles)
    }
}
