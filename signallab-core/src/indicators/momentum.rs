//! Momentum: cumulative return and Sharpe-like ratio over a trailing window.
//!
//! cumret[t]      = close[t] / close[t - window] - 1
//! sharpe_like[t] = cumret[t] / sample_std(returns[t-window+1..=t])
//!
//! returns[t] = close[t] / close[t-1] - 1, undefined at bar 0.
//! Lookback: window.

use crate::domain::PriceFrame;
use crate::indicator::Indicator;
use crate::indicators::keys;
use crate::smoothing::{self, StdKind, EPSILON};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MomentumLine {
    CumulativeReturn,
    SharpeLike,
}

#[derive(Debug, Clone)]
pub struct Momentum {
    window: usize,
    line: MomentumLine,
}

impl Momentum {
    pub fn cumulative_return(window: usize) -> Self {
        Self::with_line(window, MomentumLine::CumulativeReturn)
    }

    pub fn sharpe_like(window: usize) -> Self {
        Self::with_line(window, MomentumLine::SharpeLike)
    }

    fn with_line(window: usize, line: MomentumLine) -> Self {
        assert!(window >= 1, "Momentum window must be >= 1");
        Self { window, line }
    }
}

/// `close[t] / close[t - window] - 1`; undefined for `t < window` and when the
/// base close is zero.
pub fn cumulative_return(frame: &PriceFrame, window: usize) -> Vec<Option<f64>> {
    let n = frame.len();
    let mut out = vec![None; n];
    for i in window..n {
        let base = frame.close[i - window];
        if base.abs() > EPSILON {
            out[i] = Some(frame.close[i] / base - 1.0);
        }
    }
    out
}

impl Indicator for Momentum {
    fn name(&self) -> &str {
        match self.line {
            MomentumLine::CumulativeReturn => keys::MOMENTUM_CUMRET,
            MomentumLine::SharpeLike => keys::MOMENTUM_SHARPE,
        }
    }

    fn lookback(&self) -> usize {
        self.window
    }

    fn compute(&self, frame: &PriceFrame) -> Vec<Option<f64>> {
        let cumret = cumulative_return(frame, self.window);
        match self.line {
            MomentumLine::CumulativeReturn => cumret,
            MomentumLine::SharpeLike => {
                let vol = smoothing::rolling_std(&frame.returns(), self.window, StdKind::Sample);
                smoothing::combine(&cumret, &vol, |r, s| r / (s + EPSILON))
            }
        }
    }
}
