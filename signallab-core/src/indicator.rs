//! Indicator trait and the computed indicator set.
//!
//! Indicators are pure functions: price frame in, one value per bar out.
//! Undefined values (warm-up, missing history) are `None`, never `0` or `NaN`.

use crate::domain::PriceFrame;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Trait for indicators.
///
/// # Look-ahead contamination guard
/// No indicator value at bar t may depend on price data from bar t+1 or later.
/// Every indicator must pass the truncated-vs-full series test.
pub trait Indicator: Send + Sync {
    /// Series name in the [`IndicatorSet`] (e.g., "ema_20", "rsi").
    fn name(&self) -> &str;

    /// Number of leading bars that are always undefined.
    ///
    /// A frame with `lookback()` bars or fewer yields an all-`None` series.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire frame.
    ///
    /// Returns one value per bar; the first `lookback()` values are `None`.
    fn compute(&self, frame: &PriceFrame) -> Vec<Option<f64>>;
}

/// One indicator's values, one entry per candle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorSeries(Vec<Option<f64>>);

impl IndicatorSeries {
    pub fn new(values: Vec<Option<f64>>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.0
    }

    /// Value at a bar index; `None` if undefined or out of bounds.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied().flatten()
    }

    /// Value at the last bar.
    pub fn latest(&self) -> Option<f64> {
        self.0.last().copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn defined_count(&self) -> usize {
        self.0.iter().filter(|v| v.is_some()).count()
    }
}

/// Named indicator series produced once per series and configuration.
///
/// Keys are sorted so serialized output is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorSet {
    series: BTreeMap<String, IndicatorSeries>,
}

impl IndicatorSet {
    pub(crate) fn insert(&mut self, name: impl Into<String>, values: Vec<Option<f64>>) {
        self.series.insert(name.into(), IndicatorSeries::new(values));
    }

    /// Get the full series for a named indicator.
    pub fn get(&self, name: &str) -> Option<&IndicatorSeries> {
        self.series.get(name)
    }

    /// Get the indicator value at a specific bar index.
    pub fn value_at(&self, name: &str, index: usize) -> Option<f64> {
        self.series.get(name).and_then(|s| s.get(index))
    }

    /// Value of a named indicator at the last bar.
    pub fn latest(&self, name: &str) -> Option<f64> {
        self.series.get(name).and_then(IndicatorSeries::latest)
    }

    /// Last-bar value of every indicator, for persistence and display.
    pub fn latest_snapshot(&self) -> BTreeMap<String, Option<f64>> {
        self.series
            .iter()
            .map(|(name, s)| (name.clone(), s.latest()))
            .collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Number of indicator series stored.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
