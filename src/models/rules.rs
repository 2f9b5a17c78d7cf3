//! Rule evaluation result types.

use crate::models::candle::Interval;
use crate::models::indicators::{Divergence, MaAlignment, TrendDirection};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Categorized price distance to a moving average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceBucket {
    Near,
    Normal,
    Far,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceBuckets {
    pub ma7: DistanceBucket,
    pub ma25: DistanceBucket,
    pub ma60: DistanceBucket,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolatilityState {
    Normal,
    HighVolatility,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Coarse observation hint derived from risk level; not a trading signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionHint {
    Watch,
    Cautious,
    Wait,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyLevels {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdh: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdl: Option<f64>,
}

/// Complete rule table output for one interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleResult {
    pub trend: TrendDirection,
    pub ma_structure: MaAlignment,
    pub price_distance: DistanceBuckets,
    pub volume_confirm: bool,
    pub volatility: VolatilityState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divergence: Option<Divergence>,
    pub key_levels: KeyLevels,
    pub risk_level: RiskLevel,
    pub action_hint: ActionHint,
}

/// Agreement of trend direction across intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeframeSync {
    Full,
    Partial,
    None,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiIntervalRules {
    pub by_interval: BTreeMap<Interval, RuleResult>,
    pub timeframe_sync: TimeframeSync,
}
