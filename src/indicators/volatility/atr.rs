//! ATR (Average True Range) with Wilder smoothing.

use crate::common::math;
use crate::models::candle::Candle;

/// ATR series aligned to the candles: `out[i]` belongs to candle `i`, the
/// first value appears at index `period` (the simple average of the first
/// `period` true ranges), and everything before it is `None`. Fewer than
/// `period + 1` candles yields an all-`None` series.
pub fn atr_series(candles: &[Candle], period: usize) -> Vec<Option<f64>> {
    if candles.len() < period + 1 {
        return vec![None; candles.len()];
    }

    let mut trs = Vec::with_capacity(candles.len() - 1);
    for i in 1..candles.len() {
        trs.push(math::true_range(
            candles[i].high,
            candles[i].low,
            candles[i - 1].close,
        ));
    }

    let mut atr: f64 = trs[..period].iter().sum::<f64>() / period as f64;
    let mut out = vec![None; period];
    out.push(Some(atr));

    for tr in &trs[period..] {
        atr = (atr * (period - 1) as f64 + tr) / period as f64;
        out.push(Some(atr));
    }

    out
}
