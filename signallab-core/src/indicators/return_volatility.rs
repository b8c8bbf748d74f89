//! Return / volatility ratio: mean of simple returns over a window divided by
//! their sample standard deviation.
//! Lookback: window (returns start at bar 1).

use crate::domain::PriceFrame;
use crate::indicator::Indicator;
use crate::indicators::keys;
use crate::smoothing::{self, StdKind, EPSILON};

#[derive(Debug, Clone)]
pub struct ReturnVolatility {
    window: usize,
}

impl ReturnVolatility {
    pub fn new(window: usize) -> Self {
        assert!(window >= 1, "Return/volatility window must be >= 1");
        Self { window }
    }
}

impl Indicator for ReturnVolatility {
    fn name(&self) -> &str {
        keys::RETURN_VOLATILITY
    }

    fn lookback(&self) -> usize {
        self.window
    }

    fn compute(&self, frame: &PriceFrame) -> Vec<Option<f64>> {
        let returns = frame.returns();
        let mean = smoothing::sma(&returns, self.window);
        let vol = smoothing::rolling_std(&returns, self.window, StdKind::Sample);
        smoothing::combine(&mean, &vol, |m, s| m / (s + EPSILON))
    }
}
