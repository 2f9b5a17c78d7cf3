//! RSI (Relative Strength Index) with Wilder smoothing.

/// RSI series aligned to the candle closes: `out[i]` belongs to close `i`,
/// the first value appears at index `period`, and everything before it is
/// `None`. Fewer than `period + 1` closes yields an all-`None` series.
///
/// The value at index `period` uses the simple average of the first
/// `period` gains/losses; later values use Wilder smoothing
/// `avg = (avg * (period - 1) + sample) / period`. RSI saturates to 100
/// while the average loss is zero.
pub fn rsi_series(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    if closes.len() < period + 1 {
        return vec![None; closes.len()];
    }

    let mut gains = Vec::with_capacity(closes.len() - 1);
    let mut losses = Vec::with_capacity(closes.len() - 1);
    for i in 1..closes.len() {
        let diff = closes[i] - closes[i - 1];
        gains.push(if diff > 0.0 { diff } else { 0.0 });
        losses.push(if diff < 0.0 { diff.abs() } else { 0.0 });
    }

    let mut avg_gain: f64 = gains[..period].iter().sum::<f64>() / period as f64;
    let mut avg_loss: f64 = losses[..period].iter().sum::<f64>() / period as f64;

    let mut out = vec![None; period];
    out.push(Some(rsi_value(avg_gain, avg_loss)));

    for i in period..gains.len() {
        avg_gain = (avg_gain * (period - 1) as f64 + gains[i]) / period as f64;
        avg_loss = (avg_loss * (period - 1) as f64 + losses[i]) / period as f64;
        out.push(Some(rsi_value(avg_gain, avg_loss)));
    }

    out
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}
