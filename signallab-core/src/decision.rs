//! Final trading decision from the weighted score and regime confidence.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Weighted score at or beyond which the engine acts (BUY above, SELL below).
pub const ACTION_THRESHOLD: f64 = 0.3;
/// |score| at or above which the full position size is taken.
pub const FULL_POSITION_THRESHOLD: f64 = 0.6;
/// |score| at or above which half the position size is taken.
pub const HALF_POSITION_THRESHOLD: f64 = 0.3;

const SCORE_CONFIDENCE_WEIGHT: f64 = 0.7;
const REGIME_CONFIDENCE_WEIGHT: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Action::Buy => "BUY",
            Action::Sell => "SELL",
            Action::Hold => "HOLD",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionSize {
    Full,
    Half,
    Hold,
}

impl PositionSize {
    pub fn from_score(weighted_score: f64) -> Self {
        let magnitude = weighted_score.abs();
        if magnitude >= FULL_POSITION_THRESHOLD {
            PositionSize::Full
        } else if magnitude >= HALF_POSITION_THRESHOLD {
            PositionSize::Half
        } else {
            PositionSize::Hold
        }
    }

    /// Share of the maximum position, in percent.
    pub fn percentage(&self) -> f64 {
        match self {
            PositionSize::Full => 100.0,
            PositionSize::Half => 50.0,
            PositionSize::Hold => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub action: Action,
    pub weighted_score: f64,
    pub position_size: PositionSize,
    pub position_percentage: f64,
    pub confidence: f64,
}

impl Signal {
    pub fn decide(weighted_score: f64, regime_confidence: f64) -> Self {
        let weighted_score = weighted_score.clamp(-1.0, 1.0);
        let action = if weighted_score >= ACTION_THRESHOLD {
            Action::Buy
        } else if weighted_score <= -ACTION_THRESHOLD {
            Action::Sell
        } else {
            Action::Hold
        };
        let position_size = PositionSize::from_score(weighted_score);
        let confidence = (SCORE_CONFIDENCE_WEIGHT * weighted_score.abs().min(1.0)
            + REGIME_CONFIDENCE_WEIGHT * regime_confidence)
            .clamp(0.0, 1.0);

        Self {
            action,
            weighted_score,
            position_size,
            position_percentage: position_size.percentage(),
            confidence,
        }
    }
}
