//! Unit tests for divergence detection

use chrono::{Duration, TimeZone, Utc};
use marketlens::indicators::structure::divergence::detect_divergence;
use marketlens::models::candle::Candle;
use marketlens::models::indicators::Divergence;

fn flat_candles(count: usize) -> Vec<Candle> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            Candle::new(
                start + Duration::hours(i as i64),
                100.0,
                101.0,
                99.0,
                100.0,
                1000.0,
            )
        })
        .collect()
}

fn flat_rsi(count: usize) -> Vec<Option<f64>> {
    vec![Some(55.0); count]
}

// The last 20 candles form the window; the prior pivot is searched 5 to 15
// bars before the final bar, which for a 40-candle series is global
// indices 24..=34.

#[test]
fn test_bearish_higher_high_with_weaker_rsi() {
    let mut candles = flat_candles(40);
    let mut rsi = flat_rsi(40);

    candles[30].high = 110.0; // prior peak
    candles[39].high = 111.0; // higher high now
    rsi[30] = Some(70.0);
    rsi[39] = Some(60.0); // weaker momentum, still above 50

    assert_eq!(
        detect_divergence(&candles, &rsi),
        Some(Divergence::Bearish)
    );
}

#[test]
fn test_bearish_requires_rsi_above_50() {
    let mut candles = flat_candles(40);
    let mut rsi = flat_rsi(40);

    candles[30].high = 110.0;
    candles[39].high = 111.0;
    rsi[30] = Some(70.0);
    rsi[39] = Some(45.0); // below the midline gate

    assert_eq!(detect_divergence(&candles, &rsi), None);
}

#[test]
fn test_no_divergence_when_rsi_confirms_the_high() {
    let mut candles = flat_candles(40);
    let mut rsi = flat_rsi(40);

    candles[30].high = 110.0;
    candles[39].high = 111.0;
    rsi[30] = Some(60.0);
    rsi[39] = Some(72.0); // momentum confirms

    assert_eq!(detect_divergence(&candles, &rsi), None);
}

#[test]
fn test_bullish_lower_low_with_stronger_rsi() {
    let mut candles = flat_candles(40);
    let mut rsi = flat_rsi(40);

    candles[30].low = 90.0; // prior trough
    candles[39].low = 89.0; // lower low now
    rsi[30] = Some(30.0);
    rsi[39] = Some(40.0); // momentum holding up, still below 50

    assert_eq!(
        detect_divergence(&candles, &rsi),
        Some(Divergence::Bullish)
    );
}

#[test]
fn test_bullish_requires_rsi_below_50() {
    let mut candles = flat_candles(40);
    let mut rsi = flat_rsi(40);

    candles[30].low = 90.0;
    candles[39].low = 89.0;
    rsi[30] = Some(30.0);
    rsi[39] = Some(55.0);

    assert_eq!(detect_divergence(&candles, &rsi), None);
}

#[test]
fn test_short_series_yields_none() {
    let candles = flat_candles(19);
    let rsi = flat_rsi(19);
    assert_eq!(detect_divergence(&candles, &rsi), None);
}

#[test]
fn test_missing_rsi_at_pivot_yields_none() {
    let mut candles = flat_candles(40);
    let mut rsi = flat_rsi(40);

    candles[30].high = 110.0;
    candles[39].high = 111.0;
    rsi[30] = None;
    rsi[39] = Some(60.0);

    assert_eq!(detect_divergence(&candles, &rsi), None);
}
