//! Shared data models spanning the engine layers.

pub mod candle;
pub mod indicators;
pub mod rules;

pub use candle::{AssetClass, Candle, Interval};
pub use indicators::{
    Divergence, IndicatorBundle, LatestSnapshot, MaAlignment, MaDistances, TrendDirection,
    VolumeTrend,
};
pub use rules::{
    ActionHint, DistanceBucket, DistanceBuckets, KeyLevels, MultiIntervalRules, RiskLevel,
    RuleResult, TimeframeSync, VolatilityState,
};
