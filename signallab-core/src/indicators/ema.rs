//! Exponential Moving Average (EMA).
//!
//! alpha = 2 / (period + 1), seeded with the first close.
//! The recursion starts at bar 0 but values before `period - 1` are reported
//! as undefined: an EMA that has seen fewer than `period` closes is not yet
//! meaningful.
//! Lookback: period - 1.

use crate::domain::PriceFrame;
use crate::indicator::Indicator;
use crate::smoothing::{self, EPSILON};

/// EMA of the close, masked until `period` closes have been seen.
pub(crate) fn masked_ema(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let mut out = smoothing::ema(values, period);
    let first = values.iter().position(Option::is_some).unwrap_or(values.len());
    let warmup = (first + period.saturating_sub(1)).min(out.len());
    out[..warmup].iter_mut().for_each(|v| *v = None);
    out
}

#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    name: String,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "EMA period must be >= 1");
        Self {
            period,
            name: format!("ema_{period}"),
        }
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, frame: &PriceFrame) -> Vec<Option<f64>> {
        masked_ema(&smoothing::defined(&frame.close), self.period)
    }
}

/// Relative distance of the close from its EMA: `(close - ema) / ema`.
///
/// Computed against the longest configured EMA as a long-term trend anchor.
#[derive(Debug, Clone)]
pub struct PriceVsEma {
    period: usize,
    name: String,
}

impl PriceVsEma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "EMA period must be >= 1");
        Self {
            period,
            name: format!("price_vs_ema_{period}"),
        }
    }
}

impl Indicator for PriceVsEma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, frame: &PriceFrame) -> Vec<Option<f64>> {
        let close = smoothing::defined(&frame.close);
        let ema = masked_ema(&close, self.period);
        smoothing::combine(&close, &ema, |c, e| (c - e) / (e + EPSILON))
    }
}
