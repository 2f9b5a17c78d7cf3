//! Multi-interval rule evaluation and timeframe agreement.

use crate::models::candle::{AssetClass, Interval};
use crate::models::indicators::{IndicatorBundle, TrendDirection};
use crate::models::rules::{MultiIntervalRules, RuleResult, TimeframeSync};
use crate::rules::evaluator::evaluate_interval_rules;
use std::collections::BTreeMap;

/// Evaluate each interval's bundle and summarize trend agreement.
pub fn evaluate_multi_interval_rules(
    bundles: &BTreeMap<Interval, IndicatorBundle>,
    asset_class: AssetClass,
) -> MultiIntervalRules {
    let by_interval: BTreeMap<Interval, RuleResult> = bundles
        .iter()
        .map(|(interval, bundle)| (*interval, evaluate_interval_rules(bundle, asset_class)))
        .collect();

    let timeframe_sync = evaluate_timeframe_sync(&by_interval);

    MultiIntervalRules {
        by_interval,
        timeframe_sync,
    }
}

/// Trend agreement across intervals. Unknown and flat trends are discarded
/// before comparison; `full` requires every interval to have contributed.
pub fn evaluate_timeframe_sync(results: &BTreeMap<Interval, RuleResult>) -> TimeframeSync {
    if results.is_empty() {
        return TimeframeSync::Unknown;
    }

    let valid: Vec<TrendDirection> = results
        .values()
        .map(|r| r.trend)
        .filter(|t| !matches!(t, TrendDirection::Unknown | TrendDirection::Flat))
        .collect();

    if valid.is_empty() {
        return TimeframeSync::Unknown;
    }

    let all_same = valid.iter().all(|t| *t == valid[0]);
    if all_same && valid.len() == results.len() {
        TimeframeSync::Full
    } else if all_same {
        TimeframeSync::Partial
    } else {
        TimeframeSync::None
    }
}
