//! SignalLab Core: indicator and signal engine.
//!
//! This crate turns an OHLCV candle series into an analysis:
//! - Domain types (candles, validated series, price frames, content hashes)
//! - Smoothing primitives and the technical indicator library
//! - Market regime detection from ADX
//! - Per-category scores, regime-weighted aggregation and the final signal
//! - Rule vote and risk assessment alongside the signal
//!
//! Everything is pure and synchronous. `engine::analyze` is the entry point.

pub mod calculator;
pub mod config;
pub mod decision;
pub mod domain;
pub mod engine;
pub mod error;
pub mod indicator;
pub mod indicators;
pub mod regime;
pub mod risk;
pub mod rules;
pub mod scoring;
pub mod smoothing;
pub mod synthetic;
pub mod weighting;

pub use config::IndicatorConfig;
pub use domain::{Candle, CandleSeries};
pub use engine::{analyze, analyze_many, Analysis, MIN_CANDLES};
pub use error::{ConfigError, EngineError};
