//! Relative Strength Index (RSI), Wilder's definition.
//!
//! Gains and losses come from close-to-close deltas (undefined at bar 0) and
//! are Wilder-smoothed separately.
//!
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss), with two special cases:
//! - avg_loss == 0 and avg_gain > 0 → 100
//! - avg_loss == 0 and avg_gain == 0 → 50 (no movement in the window)
//!
//! Lookback: period.

use crate::domain::PriceFrame;
use crate::indicator::Indicator;
use crate::indicators::keys;
use crate::smoothing;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self { period }
    }
}

/// RSI from smoothed average gain and loss.
pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        if avg_gain == 0.0 {
            50.0
        } else {
            100.0
        }
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

/// Smoothed average gain and loss series.
pub fn average_gain_loss(frame: &PriceFrame, period: usize) -> (Vec<Option<f64>>, Vec<Option<f64>>) {
    let n = frame.len();
    let mut gains = vec![None; n];
    let mut losses = vec![None; n];
    for i in 1..n {
        let delta = frame.close[i] - frame.close[i - 1];
        gains[i] = Some(delta.max(0.0));
        losses[i] = Some((-delta).max(0.0));
    }
    (
        smoothing::wilder(&gains, period),
        smoothing::wilder(&losses, period),
    )
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        keys::RSI
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, frame: &PriceFrame) -> Vec<Option<f64>> {
        let (avg_gain, avg_loss) = average_gain_loss(frame, self.period);
        smoothing::combine(&avg_gain, &avg_loss, rsi_from_averages)
    }
}
