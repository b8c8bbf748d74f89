//! Stochastic oscillator (slow %K / %D).
//!
//! raw %K = 100 * (close - lowest_low(k)) / (highest_high(k) - lowest_low(k))
//! %K = SMA(raw %K, smooth)
//! %D = SMA(%K, d)
//!
//! Lookback: k + smooth - 2 for %K, k + smooth + d - 3 for %D.

use crate::domain::PriceFrame;
use crate::indicator::Indicator;
use crate::indicators::keys;
use crate::smoothing::{self, EPSILON};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StochasticLine {
    K,
    D,
}

#[derive(Debug, Clone)]
pub struct Stochastic {
    k_period: usize,
    smooth: usize,
    d_period: usize,
    line: StochasticLine,
}

impl Stochastic {
    pub fn k(k_period: usize, smooth: usize, d_period: usize) -> Self {
        Self::with_line(k_period, smooth, d_period, StochasticLine::K)
    }

    pub fn d(k_period: usize, smooth: usize, d_period: usize) -> Self {
        Self::with_line(k_period, smooth, d_period, StochasticLine::D)
    }

    fn with_line(k_period: usize, smooth: usize, d_period: usize, line: StochasticLine) -> Self {
        assert!(
            k_period >= 1 && smooth >= 1 && d_period >= 1,
            "Stochastic periods must be >= 1"
        );
        Self {
            k_period,
            smooth,
            d_period,
            line,
        }
    }
}

impl Indicator for Stochastic {
    fn name(&self) -> &str {
        match self.line {
            StochasticLine::K => keys::STOCH_K,
            StochasticLine::D => keys::STOCH_D,
        }
    }

    fn lookback(&self) -> usize {
        match self.line {
            StochasticLine::K => self.k_period.saturating_add(self.smooth) - 2,
            StochasticLine::D => {
                self.k_period
                    .saturating_add(self.smooth)
                    .saturating_add(self.d_period)
                    - 3
            }
        }
    }

    fn compute(&self, frame: &PriceFrame) -> Vec<Option<f64>> {
        let lowest = smoothing::rolling_min(&smoothing::defined(&frame.low), self.k_period);
        let highest = smoothing::rolling_max(&smoothing::defined(&frame.high), self.k_period);
        let raw: Vec<Option<f64>> = frame
            .close
            .iter()
            .zip(lowest.iter().zip(&highest))
            .map(|(c, (ll, hh))| match (ll, hh) {
                (Some(ll), Some(hh)) => Some(100.0 * (c - ll) / (hh - ll + EPSILON)),
                _ => None,
            })
            .collect();
        let k = smoothing::sma(&raw, self.smooth);
        match self.line {
            StochasticLine::K => k,
            StochasticLine::D => smoothing::sma(&k, self.d_period),
        }
    }
}
