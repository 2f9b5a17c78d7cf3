//! Derived indicator types produced by the indicator engine.

use serde::{Deserialize, Serialize};

/// Trend read from the latest ma7 vs ma25 relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
    Unknown,
}

/// Ordering of the three moving averages at the latest index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaAlignment {
    Bullish,
    Bearish,
    Mixed,
    Unknown,
}

/// Recent-vs-previous 7-sample volume comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeTrend {
    Increasing,
    Decreasing,
    Flat,
    Unknown,
}

/// Price/RSI divergence classification over the lookback window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Divergence {
    Bearish,
    Bullish,
}

/// Signed percent distance from the latest close to each moving average.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MaDistances {
    pub ma7: Option<f64>,
    pub ma25: Option<f64>,
    pub ma60: Option<f64>,
}

/// Snapshot of every indicator at the final candle index. Wire field
/// names stay camelCase for the chart frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    pub trend_direction: TrendDirection,
    pub ma_alignment: MaAlignment,
    pub price_distance_pct: MaDistances,
    pub volume_trend: VolumeTrend,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atr: Option<f64>,
    #[serde(rename = "volMA", skip_serializing_if = "Option::is_none")]
    pub vol_ma: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divergence: Option<Divergence>,
    pub candle_strength: f64,
}

impl Default for LatestSnapshot {
    fn default() -> Self {
        Self {
            close: None,
            high: None,
            trend_direction: TrendDirection::Unknown,
            ma_alignment: MaAlignment::Unknown,
            price_distance_pct: MaDistances::default(),
            volume_trend: VolumeTrend::Unknown,
            rsi: None,
            atr: None,
            vol_ma: None,
            volume: None,
            divergence: None,
            candle_strength: 0.0,
        }
    }
}

/// Full indicator bundle for one candle series.
///
/// Every per-index sequence has the same length as the input candles, with
/// leading `None`s while the window fills. The bundle is a pure function of
/// its input and is never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorBundle {
    pub ma7: Vec<Option<f64>>,
    pub ma25: Vec<Option<f64>>,
    pub ma60: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
    pub atr: Vec<Option<f64>>,
    pub volume: Vec<f64>,
    #[serde(rename = "volMA24")]
    pub vol_ma24: Vec<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdh: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdl: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divergence: Option<Divergence>,
    pub candle_strength: f64,
    pub latest: LatestSnapshot,
}
