//! Unit tests for the RSI series

use marketlens::indicators::momentum::rsi::rsi_series;

#[test]
fn test_short_series_is_all_none() {
    let closes: Vec<f64> = (0..14).map(|i| 100.0 + i as f64).collect();
    let out = rsi_series(&closes, 14);
    assert_eq!(out.len(), closes.len());
    assert!(out.iter().all(Option::is_none));
}

#[test]
fn test_alignment_first_value_at_period_index() {
    let closes: Vec<f64> = (0..30).map(|i| 100.0 + (i % 5) as f64).collect();
    let out = rsi_series(&closes, 14);
    assert_eq!(out.len(), closes.len());
    assert!(out[..14].iter().all(Option::is_none));
    assert!(out[14..].iter().all(Option::is_some));
}

#[test]
fn test_monotonic_increase_saturates_at_100() {
    let closes: Vec<f64> = (0..50).map(|i| 100.0 + i as f64).collect();
    let out = rsi_series(&closes, 14);
    for value in out[14..].iter() {
        assert_eq!(*value, Some(100.0));
    }
}

#[test]
fn test_monotonic_decrease_pins_at_0() {
    let closes: Vec<f64> = (0..50).map(|i| 100.0 - i as f64).collect();
    let out = rsi_series(&closes, 14);
    for value in out[14..].iter() {
        assert_eq!(*value, Some(0.0));
    }
}

#[test]
fn test_values_stay_bounded() {
    let closes: Vec<f64> = (0..100)
        .map(|i| 100.0 + ((i * 7) % 13) as f64 - 6.0)
        .collect();
    let out = rsi_series(&closes, 14);
    for value in out.iter().flatten() {
        assert!((0.0..=100.0).contains(value));
    }
}

#[test]
fn test_deterministic() {
    let closes: Vec<f64> = (0..60).map(|i| 100.0 + ((i * 3) % 11) as f64).collect();
    assert_eq!(rsi_series(&closes, 14), rsi_series(&closes, 14));
}
