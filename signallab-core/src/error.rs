//! Error types for the analysis engine.
//!
//! Configuration errors fail fast before any computation. Short series are only
//! fatal below the absolute floor; above it, indicators that need more history
//! degrade to undefined values instead of erroring.

use crate::domain::SeriesError;
use thiserror::Error;

/// Top-level error returned by [`crate::engine::analyze`].
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("candle series is empty")]
    EmptySeries,

    #[error("insufficient data: need at least {required} candles, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    #[error("invalid candle series: {0}")]
    InvalidSeries(#[from] SeriesError),
}

/// Configuration validation and loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("period '{name}' must be >= 1")]
    NonPositivePeriod { name: String },

    #[error("period '{name}' is {value}, above the maximum of {max}")]
    PeriodTooLarge { name: String, value: usize, max: usize },

    #[error("MACD fast period ({fast}) must be shorter than slow period ({slow})")]
    MacdPeriodOrder { fast: usize, slow: usize },

    #[error("regime high threshold ({high}) must be greater than low threshold ({low})")]
    ThresholdOrder { high: f64, low: f64 },

    #[error("'{name}' must be a finite positive number, got {value}")]
    InvalidMultiplier { name: String, value: f64 },

    #[error("weight table for regime '{regime}' has no weight for category '{category}'")]
    MissingWeight { regime: String, category: String },

    #[error("weight for '{category}' in regime '{regime}' is negative or not finite: {weight}")]
    NegativeWeight {
        regime: String,
        category: String,
        weight: f64,
    },

    #[error("weights for regime '{regime}' sum to {sum}, expected 1.0")]
    WeightSumDrift { regime: String, sum: f64 },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}
