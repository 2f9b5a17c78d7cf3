//! Regular price/RSI divergence over a trailing lookback window.

use crate::models::candle::Candle;
use crate::models::indicators::Divergence;

const LOOKBACK: usize = 20;
// Prior pivot is searched 5 to 15 bars before the current bar.
const PIVOT_NEAR: usize = 5;
const PIVOT_FAR: usize = 15;

/// Classify divergence at the latest bar.
///
/// Bearish: price makes a higher high than the prior peak while RSI makes a
/// lower high, with RSI still above 50. Bullish is the symmetric lows
/// check: lower low in price, higher low in RSI, RSI below 50. Bearish is
/// checked first. Returns `None` when fewer than `LOOKBACK` candles or RSI
/// values exist, or when RSI is missing at a compared index.
pub fn detect_divergence(candles: &[Candle], rsi: &[Option<f64>]) -> Option<Divergence> {
    if candles.len() < LOOKBACK || rsi.len() < LOOKBACK {
        return None;
    }

    let window = &candles[candles.len() - LOOKBACK..];
    let rsis = &rsi[rsi.len() - LOOKBACK..];

    let current = LOOKBACK - 1;
    let current_rsi = rsis[current]?;

    // Ties favor the most recent bar, hence the reverse scan.
    let pivot_range = || (current - PIVOT_FAR..=current - PIVOT_NEAR).rev();

    let mut peak_idx = None;
    let mut peak_high = f64::NEG_INFINITY;
    for i in pivot_range() {
        if window[i].high > peak_high {
            peak_high = window[i].high;
            peak_idx = Some(i);
        }
    }
    if let Some(idx) = peak_idx {
        if let Some(peak_rsi) = rsis[idx] {
            if window[current].high > peak_high && current_rsi < peak_rsi && current_rsi > 50.0 {
                return Some(Divergence::Bearish);
            }
        }
    }

    let mut trough_idx = None;
    let mut trough_low = f64::INFINITY;
    for i in pivot_range() {
        if window[i].low < trough_low {
            trough_low = window[i].low;
            trough_idx = Some(i);
        }
    }
    if let Some(idx) = trough_idx {
        if let Some(trough_rsi) = rsis[idx] {
            if window[current].low < trough_low && current_rsi > trough_rsi && current_rsi < 50.0 {
                return Some(Divergence::Bullish);
            }
        }
    }

    None
}
