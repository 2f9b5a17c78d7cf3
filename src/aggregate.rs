//! Candle downsampling.
//!
//! Buckets a fine-grained series into coarser fixed-size chunks using OHLC
//! compounding: first open, last close, max high, min low, summed volume,
//! first timestamp. Chunk size comes from the ratio of target to source
//! granularity, not from calendar alignment.

use crate::models::candle::{Candle, Interval};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    /// A candle carries a non-finite or negative-volume field.
    MalformedCandle { index: usize },
    /// Timestamps are not strictly ascending.
    OutOfOrder { index: usize },
    /// The requested target is finer than the source granularity.
    InvalidTarget { source: Interval, target: Interval },
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedCandle { index } => {
                write!(f, "malformed candle at index {index}")
            }
            Self::OutOfOrder { index } => {
                write!(f, "candle timestamps out of order at index {index}")
            }
            Self::InvalidTarget { source, target } => {
                write!(f, "cannot aggregate {source} candles into {target}")
            }
        }
    }
}

impl std::error::Error for AggregateError {}

/// Reject malformed or out-of-order input before any arithmetic runs.
fn validate(candles: &[Candle]) -> Result<(), AggregateError> {
    for (index, candle) in candles.iter().enumerate() {
        if !candle.is_well_formed() {
            return Err(AggregateError::MalformedCandle { index });
        }
        if index > 0 && candle.time <= candles[index - 1].time {
            return Err(AggregateError::OutOfOrder { index });
        }
    }
    Ok(())
}

/// Downsample `candles` from `source` granularity to `target`.
///
/// Identity when `source == target`. A trailing partial bucket is emitted
/// with the same compounding rule over the remaining candles.
pub fn aggregate(
    candles: &[Candle],
    source: Interval,
    target: Interval,
) -> Result<Vec<Candle>, AggregateError> {
    validate(candles)?;

    if source == target {
        return Ok(candles.to_vec());
    }
    if target.hours() < source.hours() || target.hours() % source.hours() != 0 {
        return Err(AggregateError::InvalidTarget { source, target });
    }

    let size = (target.hours() / source.hours()) as usize;
    let mut out = Vec::with_capacity(candles.len().div_ceil(size));

    for chunk in candles.chunks(size) {
        let first = &chunk[0];
        let last = &chunk[chunk.len() - 1];
        out.push(Candle {
            time: first.time,
            open: first.open,
            high: chunk.iter().map(|c| c.high).fold(f64::MIN, f64::max),
            low: chunk.iter().map(|c| c.low).fold(f64::MAX, f64::min),
            close: last.close,
            volume: chunk.iter().map(|c| c.volume).sum(),
        });
    }

    Ok(out)
}
