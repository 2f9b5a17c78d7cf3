//! Unit tests for the SMA series

use marketlens::indicators::trend::sma::sma_series;

#[test]
fn test_leading_entries_are_none_until_window_fills() {
    let values = [1.0, 2.0, 3.0, 4.0, 5.0];
    let out = sma_series(&values, 3);
    assert_eq!(out.len(), values.len());
    assert_eq!(out[0], None);
    assert_eq!(out[1], None);
    assert_eq!(out[2], Some(2.0));
    assert_eq!(out[3], Some(3.0));
    assert_eq!(out[4], Some(4.0));
}

#[test]
fn test_values_match_trailing_window_mean() {
    let values: Vec<f64> = (1..=30).map(|i| i as f64).collect();
    let out = sma_series(&values, 7);
    for i in 6..values.len() {
        let expected: f64 = values[i - 6..=i].iter().sum::<f64>() / 7.0;
        assert_eq!(out[i], Some((expected * 1e6).round() / 1e6));
    }
}

#[test]
fn test_rounds_to_six_decimal_places() {
    let values = [1.0, 2.0, 2.0000001];
    let out = sma_series(&values, 3);
    // (5.0000001 / 3) = 1.66666670; six decimals
    assert_eq!(out[2], Some(1.666667));
}

#[test]
fn test_period_longer_than_series_is_all_none() {
    let values = [1.0, 2.0, 3.0];
    let out = sma_series(&values, 5);
    assert_eq!(out, vec![None, None, None]);
}

#[test]
fn test_empty_input() {
    assert!(sma_series(&[], 7).is_empty());
}
