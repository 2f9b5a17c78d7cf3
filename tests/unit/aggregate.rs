//! Unit tests for candle aggregation

use chrono::{Duration, TimeZone, Utc};
use marketlens::aggregate::{aggregate, AggregateError};
use marketlens::models::candle::{Candle, Interval};

fn hourly_candles(count: usize) -> Vec<Candle> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let base = 100.0 + i as f64;
            Candle::new(
                start + Duration::hours(i as i64),
                base,
                base + 2.0,
                base - 1.0,
                base + 1.0,
                1000.0,
            )
        })
        .collect()
}

#[test]
fn test_identity_when_intervals_match() {
    let candles = hourly_candles(10);
    let out = aggregate(&candles, Interval::H1, Interval::H1).unwrap();
    assert_eq!(out, candles);

    let daily = hourly_candles(3); // granularity is the caller's claim here
    let out = aggregate(&daily, Interval::D1, Interval::D1).unwrap();
    assert_eq!(out, daily);
}

#[test]
fn test_empty_input_gives_empty_output() {
    let out = aggregate(&[], Interval::H1, Interval::H4).unwrap();
    assert!(out.is_empty());
}

#[test]
fn test_hourly_to_four_hour_buckets() {
    let candles = hourly_candles(8);
    let out = aggregate(&candles, Interval::H1, Interval::H4).unwrap();
    assert_eq!(out.len(), 2);

    let first = &out[0];
    assert_eq!(first.time, candles[0].time);
    assert_eq!(first.open, candles[0].open);
    assert_eq!(first.close, candles[3].close);
    assert_eq!(first.high, candles[3].high); // highs increase within the bucket
    assert_eq!(first.low, candles[0].low);
    assert_eq!(first.volume, 4000.0);

    let second = &out[1];
    assert_eq!(second.time, candles[4].time);
    assert_eq!(second.open, candles[4].open);
    assert_eq!(second.close, candles[7].close);
}

#[test]
fn test_trailing_partial_bucket_is_emitted() {
    let candles = hourly_candles(10);
    let out = aggregate(&candles, Interval::H1, Interval::H4).unwrap();
    assert_eq!(out.len(), 3);

    let partial = &out[2];
    assert_eq!(partial.time, candles[8].time);
    assert_eq!(partial.open, candles[8].open);
    assert_eq!(partial.close, candles[9].close);
    assert_eq!(partial.volume, 2000.0);
}

#[test]
fn test_hourly_to_daily_buckets() {
    let candles = hourly_candles(48);
    let out = aggregate(&candles, Interval::H1, Interval::D1).unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].volume, 24_000.0);
    assert_eq!(out[1].open, candles[24].open);
}

#[test]
fn test_aggregation_preserves_extremes_and_total_volume() {
    let candles = hourly_candles(40);
    let out = aggregate(&candles, Interval::H1, Interval::H4).unwrap();
    assert_eq!(out.len(), 10);

    let src_high = candles.iter().map(|c| c.high).fold(f64::MIN, f64::max);
    let agg_high = out.iter().map(|c| c.high).fold(f64::MIN, f64::max);
    assert_eq!(src_high, agg_high);

    let src_low = candles.iter().map(|c| c.low).fold(f64::MAX, f64::min);
    let agg_low = out.iter().map(|c| c.low).fold(f64::MAX, f64::min);
    assert_eq!(src_low, agg_low);

    let src_volume: f64 = candles.iter().map(|c| c.volume).sum();
    let agg_volume: f64 = out.iter().map(|c| c.volume).sum();
    assert_eq!(src_volume, agg_volume);

    assert_eq!(out[0].open, candles[0].open);
    assert_eq!(out[9].close, candles[39].close);
}

#[test]
fn test_malformed_candle_is_rejected() {
    let mut candles = hourly_candles(5);
    candles[2].close = f64::NAN;
    let err = aggregate(&candles, Interval::H1, Interval::H4).unwrap_err();
    assert_eq!(err, AggregateError::MalformedCandle { index: 2 });
}

#[test]
fn test_out_of_order_timestamps_are_rejected() {
    let mut candles = hourly_candles(5);
    candles[3].time = candles[1].time;
    let err = aggregate(&candles, Interval::H1, Interval::H4).unwrap_err();
    assert_eq!(err, AggregateError::OutOfOrder { index: 3 });
}

#[test]
fn test_finer_target_is_rejected() {
    let candles = hourly_candles(5);
    let err = aggregate(&candles, Interval::D1, Interval::H4).unwrap_err();
    assert_eq!(
        err,
        AggregateError::InvalidTarget {
            source: Interval::D1,
            target: Interval::H4,
        }
    );
}
