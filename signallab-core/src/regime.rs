//! Market regime detection from the latest ADX.
//!
//! Each call re-classifies from scratch; nothing carries over between calls.
//!
//! - ADX >= high → trend, confidence min(1, (ADX - high) / 20)
//! - ADX <= low  → range, confidence min(1, (low - ADX) / 10)
//! - otherwise   → transition, confidence 0.5
//! - undefined   → unknown, confidence 0
//!
//! The comparisons include the thresholds, so a reading exactly on a threshold
//! belongs to that regime with zero confidence.

use serde::{Deserialize, Serialize};
use std::fmt;

/// ADX above which a trend is labelled strong.
pub const STRONG_TREND_ADX: f64 = 40.0;
/// ADX below which a range is labelled strong.
pub const STRONG_RANGE_ADX: f64 = 15.0;
/// ADX distance above the high threshold at which trend confidence saturates.
const TREND_CONFIDENCE_SPAN: f64 = 20.0;
/// ADX distance below the low threshold at which range confidence saturates.
const RANGE_CONFIDENCE_SPAN: f64 = 10.0;
const TRANSITION_CONFIDENCE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    Trend,
    Range,
    Transition,
    Unknown,
}

impl Regime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Regime::Trend => "trend",
            Regime::Range => "range",
            Regime::Transition => "transition",
            Regime::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegimeStrength {
    Strong,
    Moderate,
}

/// Regime classification with its diagnostic detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeInfo {
    pub regime: Regime,
    pub confidence: f64,
    pub adx: Option<f64>,
    pub high_threshold: f64,
    pub low_threshold: f64,
    /// Set for trend and range; transition and unknown carry no label.
    pub strength: Option<RegimeStrength>,
}

/// Classify the regime from the latest ADX reading.
pub fn detect(adx: Option<f64>, high_threshold: f64, low_threshold: f64) -> RegimeInfo {
    let (regime, confidence, strength) = match adx {
        None => (Regime::Unknown, 0.0, None),
        Some(adx) if adx >= high_threshold => {
            let strength = if adx > STRONG_TREND_ADX {
                RegimeStrength::Strong
            } else {
                RegimeStrength::Moderate
            };
            let confidence = ((adx - high_threshold) / TREND_CONFIDENCE_SPAN).min(1.0);
            (Regime::Trend, confidence, Some(strength))
        }
        Some(adx) if adx <= low_threshold => {
            let strength = if adx < STRONG_RANGE_ADX {
                RegimeStrength::Strong
            } else {
                RegimeStrength::Moderate
            };
            let confidence = ((low_threshold - adx) / RANGE_CONFIDENCE_SPAN).min(1.0);
            (Regime::Range, confidence, Some(strength))
        }
        Some(_) => (Regime::Transition, TRANSITION_CONFIDENCE, None),
    };

    RegimeInfo {
        regime,
        confidence,
        adx,
        high_threshold,
        low_threshold,
        strength,
    }
}
