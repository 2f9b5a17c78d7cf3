//! Simple moving average over a trailing window.

use crate::common::math;

/// SMA series aligned to the input: `out[i]` is the mean of the trailing
/// `period` values ending at `i`, rounded to 6 decimal places, or `None`
/// while the window is still filling.
///
/// The window sum is recomputed per index rather than kept as a running
/// total, so results are bit-identical regardless of series length.
pub fn sma_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());

    for i in 0..values.len() {
        if i + 1 < period {
            out.push(None);
            continue;
        }
        let window = &values[i + 1 - period..=i];
        let sum: f64 = window.iter().sum();
        out.push(Some(math::round_dp(sum / period as f64, 6)));
    }

    out
}
