//! Indicator engine: turns a candle series into a full [`IndicatorBundle`].
//!
//! The engine never fails. Short series degrade to `None`/`Unknown`/`0`
//! per sub-algorithm instead of raising, and the bundle is a pure function
//! of its input candles.

use crate::common::math;
use crate::indicators::momentum::rsi::rsi_series;
use crate::indicators::structure::candle_strength::candle_strength;
use crate::indicators::structure::divergence::detect_divergence;
use crate::indicators::structure::key_levels::key_levels;
use crate::indicators::trend::sma::sma_series;
use crate::indicators::volatility::atr::atr_series;
use crate::models::candle::Candle;
use crate::models::indicators::{
    IndicatorBundle, LatestSnapshot, MaAlignment, MaDistances, TrendDirection, VolumeTrend,
};

pub const RSI_PERIOD: usize = 14;
pub const ATR_PERIOD: usize = 14;
pub const VOL_MA_PERIOD: usize = 24;
const VOLUME_WINDOW: usize = 7;

/// Compute the full indicator bundle for `candles`.
///
/// `daily` is an optional coarser series used only for the previous
/// completed period's high/low; when absent, pdh/pdl stay `None`.
pub fn compute_indicators(candles: &[Candle], daily: Option<&[Candle]>) -> IndicatorBundle {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let volumes: Vec<f64> = candles.iter().map(|c| c.volume).collect();

    let ma7 = sma_series(&closes, 7);
    let ma25 = sma_series(&closes, 25);
    let ma60 = sma_series(&closes, 60);
    let rsi = rsi_series(&closes, RSI_PERIOD);
    let atr = atr_series(candles, ATR_PERIOD);
    let vol_ma24 = sma_series(&volumes, VOL_MA_PERIOD);

    let (pdh, pdl) = daily.map_or((None, None), key_levels);
    let divergence = detect_divergence(candles, &rsi);
    let strength = candle_strength(candles);

    let last = candles.len().checked_sub(1);
    let latest = match last {
        None => LatestSnapshot::default(),
        Some(i) => {
            let close = closes[i];
            LatestSnapshot {
                close: Some(close),
                high: Some(candles[i].high),
                trend_direction: trend_direction(ma7[i], ma25[i]),
                ma_alignment: ma_alignment(ma7[i], ma25[i], ma60[i]),
                price_distance_pct: MaDistances {
                    ma7: pct_distance(close, ma7[i]),
                    ma25: pct_distance(close, ma25[i]),
                    ma60: pct_distance(close, ma60[i]),
                },
                volume_trend: volume_trend(&volumes),
                rsi: rsi[i],
                atr: atr[i],
                vol_ma: vol_ma24[i],
                volume: Some(volumes[i]),
                divergence,
                candle_strength: strength,
            }
        }
    };

    IndicatorBundle {
        ma7,
        ma25,
        ma60,
        rsi,
        atr,
        volume: volumes,
        vol_ma24,
        pdh,
        pdl,
        divergence,
        candle_strength: strength,
        latest,
    }
}

/// Signed percent distance from `price` to `ma`, rounded to 4 decimals.
pub fn pct_distance(price: f64, ma: Option<f64>) -> Option<f64> {
    match ma {
        Some(ma) if ma != 0.0 => Some(math::round_dp((price - ma) / ma * 100.0, 4)),
        _ => None,
    }
}

fn trend_direction(ma7: Option<f64>, ma25: Option<f64>) -> TrendDirection {
    match (ma7, ma25) {
        (Some(a), Some(b)) if a > b => TrendDirection::Up,
        (Some(a), Some(b)) if a < b => TrendDirection::Down,
        (Some(_), Some(_)) => TrendDirection::Flat,
        _ => TrendDirection::Unknown,
    }
}

fn ma_alignment(ma7: Option<f64>, ma25: Option<f64>, ma60: Option<f64>) -> MaAlignment {
    match (ma7, ma25, ma60) {
        (Some(a), Some(b), Some(c)) if a > b && b > c => MaAlignment::Bullish,
        (Some(a), Some(b), Some(c)) if a < b && b < c => MaAlignment::Bearish,
        (Some(_), Some(_), Some(_)) => MaAlignment::Mixed,
        _ => MaAlignment::Unknown,
    }
}

fn volume_trend(volumes: &[f64]) -> VolumeTrend {
    if volumes.is_empty() || volumes.iter().all(|v| *v == 0.0) {
        return VolumeTrend::Unknown;
    }
    if volumes.len() < 2 * VOLUME_WINDOW {
        return VolumeTrend::Unknown;
    }

    let recent = &volumes[volumes.len() - VOLUME_WINDOW..];
    let prev = &volumes[volumes.len() - 2 * VOLUME_WINDOW..volumes.len() - VOLUME_WINDOW];
    // Both windows are full here, so the means always exist.
    let recent_avg = math::mean(recent).unwrap_or(0.0);
    let prev_avg = math::mean(prev).unwrap_or(0.0);

    if recent_avg > prev_avg * 1.1 {
        VolumeTrend::Increasing
    } else if recent_avg < prev_avg * 0.9 {
        VolumeTrend::Decreasing
    } else {
        VolumeTrend::Flat
    }
}
