//! Body-size impulse measure, used for assets without reliable volume.

use crate::common::math;
use crate::models::candle::Candle;

const TRAILING: usize = 24;

/// Latest candle body relative to the average body of the preceding 24
/// candles, rounded to 2 decimal places. 0 when fewer than 25 candles are
/// available or the trailing average body is zero.
pub fn candle_strength(candles: &[Candle]) -> f64 {
    if candles.len() < TRAILING + 1 {
        return 0.0;
    }

    let current = candles[candles.len() - 1].body();
    let trailing = &candles[candles.len() - TRAILING - 1..candles.len() - 1];
    let avg = trailing.iter().map(Candle::body).sum::<f64>() / TRAILING as f64;

    if avg == 0.0 {
        0.0
    } else {
        math::round_dp(current / avg, 2)
    }
}
