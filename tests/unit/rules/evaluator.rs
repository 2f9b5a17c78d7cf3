//! Unit tests for the rule evaluator and volume policies

use marketlens::models::candle::AssetClass;
use marketlens::models::indicators::{
    Divergence, IndicatorBundle, LatestSnapshot, MaAlignment, MaDistances, TrendDirection,
    VolumeTrend,
};
use marketlens::models::rules::{
    ActionHint, DistanceBucket, RiskLevel, VolatilityState,
};
use marketlens::rules::evaluator::{assess_distance, evaluate_interval_rules};
use marketlens::rules::policy::policy_for;

fn empty_bundle() -> IndicatorBundle {
    IndicatorBundle {
        ma7: Vec::new(),
        ma25: Vec::new(),
        ma60: Vec::new(),
        rsi: Vec::new(),
        atr: Vec::new(),
        volume: Vec::new(),
        vol_ma24: Vec::new(),
        pdh: None,
        pdl: None,
        divergence: None,
        candle_strength: 0.0,
        latest: LatestSnapshot::default(),
    }
}

fn healthy_bundle() -> IndicatorBundle {
    let mut bundle = empty_bundle();
    bundle.latest = LatestSnapshot {
        close: Some(100.0),
        high: Some(100.5),
        trend_direction: TrendDirection::Up,
        ma_alignment: MaAlignment::Bullish,
        price_distance_pct: MaDistances {
            ma7: Some(0.5),
            ma25: Some(1.5),
            ma60: Some(2.0),
        },
        volume_trend: VolumeTrend::Flat,
        rsi: Some(55.0),
        atr: Some(1.0),
        vol_ma: Some(1000.0),
        volume: Some(1000.0),
        divergence: None,
        candle_strength: 1.0,
    };
    bundle
}

#[test]
fn test_unknown_inputs_force_high_risk() {
    let bundle = empty_bundle();
    let result = evaluate_interval_rules(&bundle, AssetClass::Stock);
    assert_eq!(result.trend, TrendDirection::Unknown);
    assert_eq!(result.risk_level, RiskLevel::High);
    assert_eq!(result.action_hint, ActionHint::Wait);
}

#[test]
fn test_high_volatility_forces_high_risk() {
    let mut bundle = healthy_bundle();
    bundle.ma60 = vec![Some(100.0)];
    bundle.latest.close = Some(110.0); // 10 points off ma60 against 1.0 ATR
    let result = evaluate_interval_rules(&bundle, AssetClass::Stock);
    assert_eq!(result.volatility, VolatilityState::HighVolatility);
    assert_eq!(result.risk_level, RiskLevel::High);
}

#[test]
fn test_bearish_divergence_in_uptrend_is_high_risk() {
    let mut bundle = healthy_bundle();
    bundle.latest.divergence = Some(Divergence::Bearish);
    let result = evaluate_interval_rules(&bundle, AssetClass::Stock);
    assert_eq!(result.risk_level, RiskLevel::High);
}

#[test]
fn test_bearish_divergence_in_downtrend_does_not_escalate() {
    let mut bundle = healthy_bundle();
    bundle.latest.divergence = Some(Divergence::Bearish);
    bundle.latest.trend_direction = TrendDirection::Down;
    bundle.latest.ma_alignment = MaAlignment::Bearish;
    let result = evaluate_interval_rules(&bundle, AssetClass::Stock);
    assert_eq!(result.risk_level, RiskLevel::Low);
}

#[test]
fn test_rejection_at_previous_high_is_medium_risk() {
    let mut bundle = healthy_bundle();
    bundle.pdh = Some(100.2);
    // high poked above the level, close fell back under it
    let result = evaluate_interval_rules(&bundle, AssetClass::Stock);
    assert_eq!(result.risk_level, RiskLevel::Medium);
    assert_eq!(result.action_hint, ActionHint::Cautious);
    assert_eq!(result.key_levels.pdh, Some(100.2));
}

#[test]
fn test_mixed_alignment_is_medium_risk() {
    let mut bundle = healthy_bundle();
    bundle.latest.ma_alignment = MaAlignment::Mixed;
    let result = evaluate_interval_rules(&bundle, AssetClass::Stock);
    assert_eq!(result.risk_level, RiskLevel::Medium);
}

#[test]
fn test_overextended_price_is_medium_risk() {
    let mut bundle = healthy_bundle();
    bundle.latest.price_distance_pct.ma7 = Some(4.2);
    let result = evaluate_interval_rules(&bundle, AssetClass::Stock);
    assert_eq!(result.price_distance.ma7, DistanceBucket::Far);
    assert_eq!(result.risk_level, RiskLevel::Medium);
}

#[test]
fn test_quiet_healthy_market_is_low_risk() {
    let bundle = healthy_bundle();
    let result = evaluate_interval_rules(&bundle, AssetClass::Stock);
    assert_eq!(result.risk_level, RiskLevel::Low);
    assert_eq!(result.action_hint, ActionHint::Watch);
    assert_eq!(result.volatility, VolatilityState::Normal);
}

#[test]
fn test_evaluation_is_idempotent() {
    let bundle = healthy_bundle();
    let a = evaluate_interval_rules(&bundle, AssetClass::Stock);
    let b = evaluate_interval_rules(&bundle, AssetClass::Stock);
    assert_eq!(a, b);
}

#[test]
fn test_distance_buckets() {
    assert_eq!(assess_distance(None), DistanceBucket::Unknown);
    assert_eq!(assess_distance(Some(0.0)), DistanceBucket::Near);
    assert_eq!(assess_distance(Some(-1.0)), DistanceBucket::Near);
    assert_eq!(assess_distance(Some(2.0)), DistanceBucket::Normal);
    assert_eq!(assess_distance(Some(3.0)), DistanceBucket::Far);
    assert_eq!(assess_distance(Some(-5.5)), DistanceBucket::Far);
}

#[test]
fn test_stock_policy_confirms_on_increasing_volume() {
    let mut latest = healthy_bundle().latest;
    latest.volume_trend = VolumeTrend::Increasing;
    assert!(policy_for(AssetClass::Stock).confirm(&latest));
}

#[test]
fn test_stock_policy_confirms_on_volume_spike() {
    let mut latest = healthy_bundle().latest;
    latest.volume = Some(1600.0); // above 1.5x the 1000.0 average
    assert!(policy_for(AssetClass::Stock).confirm(&latest));

    latest.volume = Some(1400.0);
    assert!(!policy_for(AssetClass::Stock).confirm(&latest));
}

#[test]
fn test_stock_policy_without_volume_average_does_not_confirm() {
    let mut latest = healthy_bundle().latest;
    latest.vol_ma = None;
    latest.volume = Some(10_000.0);
    assert!(!policy_for(AssetClass::Stock).confirm(&latest));
}

#[test]
fn test_gold_policy_reads_candle_impulse() {
    let mut latest = healthy_bundle().latest;
    latest.candle_strength = 2.0;
    assert!(policy_for(AssetClass::Gold).confirm(&latest));

    latest.candle_strength = 1.0;
    latest.rsi = Some(65.0);
    assert!(policy_for(AssetClass::Gold).confirm(&latest));

    latest.rsi = Some(55.0);
    assert!(!policy_for(AssetClass::Gold).confirm(&latest));
}
