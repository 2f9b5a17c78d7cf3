//! Previous-period high/low reference levels.

use crate::models::candle::Candle;

/// Take pdh/pdl from the second-to-last candle of a coarser series, which
/// is the most recent *completed* period. Fewer than 2 candles means no
/// completed prior period exists.
pub fn key_levels(daily: &[Candle]) -> (Option<f64>, Option<f64>) {
    if daily.len() < 2 {
        return (None, None);
    }
    let prev = &daily[daily.len() - 2];
    (Some(prev.high), Some(prev.low))
}
