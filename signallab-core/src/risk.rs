//! Risk assessment attached to every analysis: ATR-based volatility, an
//! overall risk tier and a recommended stop-loss level.

use crate::config::RiskConfig;
use serde::{Deserialize, Serialize};

/// Volatility percentage above which volatility is high.
pub const HIGH_VOLATILITY_PCT: f64 = 5.0;
/// Volatility percentage above which volatility is medium.
pub const MEDIUM_VOLATILITY_PCT: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Low only when both the signal and the regime are convincing.
    pub overall: Level,
    pub volatility: Level,
    /// ATR as a percentage of the last close.
    pub volatility_pct: f64,
    pub regime_confidence: Level,
    pub stop_loss_price: f64,
    /// Stop distance as a percentage of the last close.
    pub stop_loss_pct: f64,
}

/// Assess risk from the weighted score, regime confidence, latest ATR and close.
///
/// Only a positive score places the stop below the close (long side); a zero
/// or negative score places it above.
pub fn assess(
    weighted_score: f64,
    regime_confidence: f64,
    atr: Option<f64>,
    close: f64,
    config: &RiskConfig,
) -> RiskAssessment {
    let magnitude = weighted_score.abs();
    let overall = if magnitude > 0.7 && regime_confidence > 0.7 {
        Level::Low
    } else if magnitude > 0.5 && regime_confidence > 0.5 {
        Level::Medium
    } else {
        Level::High
    };

    let atr = atr.filter(|a| *a > 0.0 && close > 0.0);
    let (volatility_pct, stop_distance) = match atr {
        Some(atr) => (atr / close * 100.0, atr * config.stop_atr_multiple),
        None => (config.fallback_volatility_pct, close * config.default_stop_pct),
    };

    let volatility = if volatility_pct > HIGH_VOLATILITY_PCT {
        Level::High
    } else if volatility_pct > MEDIUM_VOLATILITY_PCT {
        Level::Medium
    } else {
        Level::Low
    };

    let regime_level = if regime_confidence > 0.7 {
        Level::High
    } else if regime_confidence > 0.4 {
        Level::Medium
    } else {
        Level::Low
    };

    let stop_loss_price = if weighted_score > 0.0 {
        close - stop_distance
    } else {
        close + stop_distance
    };
    let stop_loss_pct = if close > 0.0 {
        stop_distance / close * 100.0
    } else {
        0.0
    };

    RiskAssessment {
        overall,
        volatility,
        volatility_pct,
        regime_confidence: regime_level,
        stop_loss_price,
        stop_loss_pct,
    }
}
