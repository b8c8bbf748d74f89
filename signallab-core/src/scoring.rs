//! Category scores: each indicator category maps its latest values to a score
//! in [-1, +1] through fixed threshold rules.
//!
//! Positive scores favor buying, negative scores favor selling. Oscillators
//! (RSI, %B) are read contrarian: oversold is bullish, overbought bearish.
//! Undefined inputs score 0.0.

use crate::config::ScoringConfig;
use crate::indicator::IndicatorSet;
use crate::indicators::keys;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Cumulative return at which the momentum return-score saturates.
pub const MOMENTUM_RETURN_THRESHOLD: f64 = 0.10;
/// Weight of the return component in the momentum score (the rest is Sharpe).
pub const MOMENTUM_RETURN_WEIGHT: f64 = 0.7;

/// Indicator category scored and weighted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Momentum,
    Rsi,
    Bollinger,
    Macd,
    Volume,
    ReturnVolatility,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Momentum,
        Category::Rsi,
        Category::Bollinger,
        Category::Macd,
        Category::Volume,
        Category::ReturnVolatility,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Momentum => "momentum",
            Category::Rsi => "rsi",
            Category::Bollinger => "bollinger",
            Category::Macd => "macd",
            Category::Volume => "volume",
            Category::ReturnVolatility => "return_volatility",
        }
    }

    /// Score this category from the latest indicator values, clipped to [-1, 1].
    pub fn score(&self, indicators: &IndicatorSet, config: &ScoringConfig) -> f64 {
        let raw = match self {
            Category::Momentum => momentum_score(
                indicators.latest(keys::MOMENTUM_CUMRET),
                indicators.latest(keys::MOMENTUM_SHARPE),
            ),
            Category::Rsi => rsi_score(indicators.latest(keys::RSI)),
            Category::Bollinger => bollinger_score(
                indicators.latest(keys::BB_PCT_B),
                indicators.latest(keys::BB_BANDWIDTH),
                config,
            ),
            Category::Macd => macd_score(
                indicators.latest(keys::MACD),
                indicators.latest(keys::MACD_SIGNAL),
                indicators.latest(keys::MACD_HISTOGRAM),
            ),
            Category::Volume => tiered_score(indicators.latest(keys::VOLUME_Z)),
            Category::ReturnVolatility => {
                tiered_score(indicators.latest(keys::RETURN_VOLATILITY))
            }
        };
        if raw.is_nan() {
            return 0.0;
        }
        raw.clamp(-1.0, 1.0)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Category → score, every value in [-1, 1].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreVector(BTreeMap<Category, f64>);

impl ScoreVector {
    /// Score every category from one indicator set.
    pub fn compute(indicators: &IndicatorSet, config: &ScoringConfig) -> Self {
        Self(
            Category::ALL
                .iter()
                .map(|c| (*c, c.score(indicators, config)))
                .collect(),
        )
    }

    /// Build from explicit scores, clipping each to [-1, 1].
    pub fn from_scores(scores: impl IntoIterator<Item = (Category, f64)>) -> Self {
        Self(
            scores
                .into_iter()
                .map(|(c, s)| (c, s.clamp(-1.0, 1.0)))
                .collect(),
        )
    }

    pub fn get(&self, category: Category) -> Option<f64> {
        self.0.get(&category).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        self.0.iter().map(|(c, s)| (*c, *s))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// `0.7 * return_score + 0.3 * clip(sharpe_like)`; 0 unless both are defined.
pub fn momentum_score(cumret: Option<f64>, sharpe_like: Option<f64>) -> f64 {
    let (Some(cumret), Some(sharpe)) = (cumret, sharpe_like) else {
        return 0.0;
    };
    let ret_score = if cumret >= MOMENTUM_RETURN_THRESHOLD {
        1.0
    } else if cumret <= -MOMENTUM_RETURN_THRESHOLD {
        -1.0
    } else {
        cumret / MOMENTUM_RETURN_THRESHOLD
    };
    let sharpe_score = sharpe.clamp(-1.0, 1.0);
    MOMENTUM_RETURN_WEIGHT * ret_score + (1.0 - MOMENTUM_RETURN_WEIGHT) * sharpe_score
}

/// Contrarian RSI score: oversold → positive, overbought → negative, linear
/// between 30 and 70 around the 50 midpoint.
pub fn rsi_score(rsi: Option<f64>) -> f64 {
    let Some(rsi) = rsi else {
        return 0.0;
    };
    if rsi <= 20.0 {
        1.0
    } else if rsi >= 80.0 {
        -1.0
    } else if rsi <= 30.0 {
        0.5
    } else if rsi >= 70.0 {
        -0.5
    } else if rsi < 50.0 {
        0.5 * (50.0 - rsi) / 20.0
    } else {
        -0.5 * (rsi - 50.0) / 20.0
    }
}

/// %B position score scaled by a bandwidth confidence multiplier.
pub fn bollinger_score(pct_b: Option<f64>, bandwidth: Option<f64>, config: &ScoringConfig) -> f64 {
    let Some(pct_b) = pct_b else {
        return 0.0;
    };
    let base = if pct_b <= 0.05 {
        1.0
    } else if pct_b >= 0.95 {
        -1.0
    } else if pct_b <= 0.1 {
        0.5
    } else if pct_b >= 0.9 {
        -0.5
    } else {
        0.0
    };
    match bandwidth {
        Some(bw) => base * bandwidth_multiplier(bw, config),
        None => base,
    }
}

/// Wider bands carry more conviction: `clip(bandwidth * scale, min, max)`.
pub fn bandwidth_multiplier(bandwidth: f64, config: &ScoringConfig) -> f64 {
    (bandwidth * config.bandwidth_scale)
        .clamp(config.bandwidth_multiplier_min, config.bandwidth_multiplier_max)
}

/// State-based MACD score.
///
/// Line above signal with a positive histogram is the golden-cross state:
/// 1.0 above the zero line, 0.5 below it. Line below signal with a negative
/// histogram is the dead-cross state: -1.0 below zero, -0.5 above it.
pub fn macd_score(line: Option<f64>, signal: Option<f64>, histogram: Option<f64>) -> f64 {
    let (Some(line), Some(signal)) = (line, signal) else {
        return 0.0;
    };
    let histogram = histogram.unwrap_or(0.0);
    if line > signal && histogram > 0.0 {
        if line > 0.0 {
            1.0
        } else {
            0.5
        }
    } else if line < signal && histogram < 0.0 {
        if line < 0.0 {
            -1.0
        } else {
            -0.5
        }
    } else {
        0.0
    }
}

/// Four-tier threshold at ±1 and ±2, used for volume Z-score and the
/// return/volatility ratio.
pub fn tiered_score(value: Option<f64>) -> f64 {
    let Some(v) = value else {
        return 0.0;
    };
    if v >= 2.0 {
        1.0
    } else if v <= -2.0 {
        -1.0
    } else if v >= 1.0 {
        0.5
    } else if v <= -1.0 {
        -0.5
    } else {
        0.0
    }
}
