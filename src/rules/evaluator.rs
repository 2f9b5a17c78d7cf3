//! Deterministic rule table mapping an indicator bundle to categorical
//! judgments. Total function: missing inputs fall back to conservative
//! defaults instead of failing.

use crate::models::candle::AssetClass;
use crate::models::indicators::{Divergence, IndicatorBundle, MaAlignment, TrendDirection};
use crate::models::rules::{
    ActionHint, DistanceBucket, DistanceBuckets, KeyLevels, RiskLevel, RuleResult, VolatilityState,
};
use crate::rules::policy::policy_for;

/// Evaluate the rule table for one interval's indicator bundle.
pub fn evaluate_interval_rules(bundle: &IndicatorBundle, asset_class: AssetClass) -> RuleResult {
    let latest = &bundle.latest;

    let distance = DistanceBuckets {
        ma7: assess_distance(latest.price_distance_pct.ma7),
        ma25: assess_distance(latest.price_distance_pct.ma25),
        ma60: assess_distance(latest.price_distance_pct.ma60),
    };

    let trend = latest.trend_direction;
    let ma_structure = latest.ma_alignment;
    let volume_confirm = policy_for(asset_class).confirm(latest);
    let volatility = volatility_state(bundle);
    let risk_level = risk_level(bundle, trend, ma_structure, volatility, &distance);

    RuleResult {
        trend,
        ma_structure,
        price_distance: distance,
        volume_confirm,
        volatility,
        divergence: latest.divergence,
        key_levels: KeyLevels {
            pdh: bundle.pdh,
            pdl: bundle.pdl,
        },
        risk_level,
        action_hint: action_hint(risk_level),
    }
}

/// |pct| <= 1 is near, >= 3 is far, in between is normal.
pub fn assess_distance(pct: Option<f64>) -> DistanceBucket {
    match pct {
        None => DistanceBucket::Unknown,
        Some(pct) => {
            let abs = pct.abs();
            if abs <= 1.0 {
                DistanceBucket::Near
            } else if abs >= 3.0 {
                DistanceBucket::Far
            } else {
                DistanceBucket::Normal
            }
        }
    }
}

/// Deviation of the close from ma60 beyond 2x ATR flags high volatility.
/// Missing ATR, close or ma60 defaults to normal.
fn volatility_state(bundle: &IndicatorBundle) -> VolatilityState {
    let latest = &bundle.latest;
    let ma60 = bundle.ma60.last().copied().flatten();
    match (latest.atr, latest.close, ma60) {
        (Some(atr), Some(close), Some(ma)) if (close - ma).abs() > 2.0 * atr => {
            VolatilityState::HighVolatility
        }
        _ => VolatilityState::Normal,
    }
}

/// Severity ladder: the first matching condition wins.
fn risk_level(
    bundle: &IndicatorBundle,
    trend: TrendDirection,
    ma_structure: MaAlignment,
    volatility: VolatilityState,
    distance: &DistanceBuckets,
) -> RiskLevel {
    let latest = &bundle.latest;

    if trend == TrendDirection::Unknown || ma_structure == MaAlignment::Unknown {
        return RiskLevel::High;
    }
    if volatility == VolatilityState::HighVolatility {
        return RiskLevel::High;
    }
    if latest.divergence == Some(Divergence::Bearish) && trend == TrendDirection::Up {
        return RiskLevel::High;
    }
    // Rejection at the previous period's high: price poked above it but
    // closed back below.
    if let (Some(pdh), Some(close), Some(high)) = (bundle.pdh, latest.close, latest.high) {
        if close < pdh && high > pdh {
            return RiskLevel::Medium;
        }
    }
    if ma_structure == MaAlignment::Mixed {
        return RiskLevel::Medium;
    }
    if distance.ma7 == DistanceBucket::Far || distance.ma25 == DistanceBucket::Far {
        return RiskLevel::Medium;
    }
    RiskLevel::Low
}

fn action_hint(risk: RiskLevel) -> ActionHint {
    match risk {
        RiskLevel::High => ActionHint::Wait,
        RiskLevel::Medium => ActionHint::Cautious,
        RiskLevel::Low => ActionHint::Watch,
    }
}
