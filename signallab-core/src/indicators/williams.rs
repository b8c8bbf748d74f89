//! Williams %R.
//!
//! %R = -100 * (highest_high - close) / (highest_high - lowest_low), in [-100, 0].
//! Lookback: period - 1.

use crate::domain::PriceFrame;
use crate::indicator::Indicator;
use crate::indicators::keys;
use crate::smoothing::{self, EPSILON};

#[derive(Debug, Clone)]
pub struct WilliamsR {
    period: usize,
}

impl WilliamsR {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "Williams %R period must be >= 1");
        Self { period }
    }
}

impl Indicator for WilliamsR {
    fn name(&self) -> &str {
        keys::WILLIAMS_R
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, frame: &PriceFrame) -> Vec<Option<f64>> {
        let lowest = smoothing::rolling_min(&smoothing::defined(&frame.low), self.period);
        let highest = smoothing::rolling_max(&smoothing::defined(&frame.high), self.period);
        frame
            .close
            .iter()
            .zip(lowest.iter().zip(&highest))
            .map(|(c, (ll, hh))| match (ll, hh) {
                (Some(ll), Some(hh)) => Some(-100.0 * (hh - c) / (hh - ll + EPSILON)),
                _ => None,
            })
            .collect()
    }
}
