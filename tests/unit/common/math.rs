//! Unit tests for shared math helpers

use marketlens::common::math::{mean, round_dp, true_range};

#[test]
fn test_round_dp() {
    assert_eq!(round_dp(1.23456789, 6), 1.234568);
    assert_eq!(round_dp(1.23454, 4), 1.2345);
    assert_eq!(round_dp(-2.5, 0), -3.0);
    assert_eq!(round_dp(100.0, 6), 100.0);
}

#[test]
fn test_mean() {
    assert_eq!(mean(&[]), None);
    assert_eq!(mean(&[4.0]), Some(4.0));
    assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
}

#[test]
fn test_true_range_uses_largest_span() {
    // Plain high-low range
    assert_eq!(true_range(12.0, 10.0, 11.0), 2.0);
    // Gap up: distance from previous close dominates
    assert_eq!(true_range(15.0, 14.0, 10.0), 5.0);
    // Gap down
    assert_eq!(true_range(9.0, 8.0, 12.0), 4.0);
}
