//! Volume confirmation policies per asset class.
//!
//! Keeps the rule evaluator closed to modification when new asset classes
//! arrive: each class plugs in its own confirmation check instead of
//! branching inside the evaluator.

use crate::models::candle::AssetClass;
use crate::models::indicators::{LatestSnapshot, VolumeTrend};

pub trait VolumeConfirmPolicy {
    fn confirm(&self, latest: &LatestSnapshot) -> bool;
}

/// Default policy for volume-bearing assets: an increasing volume trend or
/// a latest volume spike above 1.5x the volume moving average.
pub struct VolumeSpikePolicy;

impl VolumeConfirmPolicy for VolumeSpikePolicy {
    fn confirm(&self, latest: &LatestSnapshot) -> bool {
        if latest.volume_trend == VolumeTrend::Increasing {
            return true;
        }
        match (latest.vol_ma, latest.volume) {
            (Some(vol_ma), Some(volume)) if vol_ma > 0.0 => volume > 1.5 * vol_ma,
            _ => false,
        }
    }
}

/// Gold trades without dependable exchange volume, so impulse is read from
/// candle body strength and RSI instead.
pub struct CandleImpulsePolicy;

impl VolumeConfirmPolicy for CandleImpulsePolicy {
    fn confirm(&self, latest: &LatestSnapshot) -> bool {
        let strong_candle = latest.candle_strength > 1.5;
        let rsi_impulse = latest.rsi.unwrap_or(50.0) > 60.0;
        strong_candle || rsi_impulse
    }
}

/// Select the confirmation policy for an asset class.
pub fn policy_for(asset_class: AssetClass) -> &'static dyn VolumeConfirmPolicy {
    match asset_class {
        AssetClass::Gold => &CandleImpulsePolicy,
        AssetClass::Stock => &VolumeSpikePolicy,
    }
}
