//! MACD: Moving Average Convergence Divergence.
//!
//! - line      = EMA(close, fast) - EMA(close, slow)
//! - signal    = EMA(line, signal_period)
//! - histogram = line - signal
//! - cross     = +1 when line - signal moves from <= 0 to > 0 (bullish),
//!               -1 when it moves from >= 0 to < 0 (bearish), 0 otherwise
//!
//! Every EMA recursion is seeded from bar 0, so the signal line runs over the
//! raw MACD line including its warm-up bars. Warm-up values are masked only
//! on output.
//!
//! Lookback: slow - 1 for the line, slow + signal - 2 for signal/histogram,
//! slow + signal - 1 for the cross (it compares two defined bars).

use crate::domain::PriceFrame;
use crate::indicator::Indicator;
use crate::indicators::keys;
use crate::smoothing;

/// Which output line of the MACD to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdLine {
    Line,
    Signal,
    Histogram,
    Cross,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
    line: MacdLine,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize, line: MacdLine) -> Self {
        assert!(fast >= 1 && slow >= 1 && signal >= 1, "MACD periods must be >= 1");
        assert!(fast < slow, "MACD fast period must be shorter than slow period");
        Self {
            fast,
            slow,
            signal,
            line,
        }
    }

    fn line_warmup(&self) -> usize {
        self.slow - 1
    }

    fn signal_warmup(&self) -> usize {
        self.slow.saturating_add(self.signal) - 2
    }

    /// The MACD line, signal line and histogram.
    pub fn lines(&self, frame: &PriceFrame) -> (Vec<Option<f64>>, Vec<Option<f64>>, Vec<Option<f64>>) {
        let close = smoothing::defined(&frame.close);
        let fast = smoothing::ema(&close, self.fast);
        let slow = smoothing::ema(&close, self.slow);
        let mut line = smoothing::combine(&fast, &slow, |f, s| f - s);
        let mut signal = smoothing::ema(&line, self.signal);
        let mut histogram = smoothing::combine(&line, &signal, |l, s| l - s);

        mask_warmup(&mut line, self.line_warmup());
        mask_warmup(&mut signal, self.signal_warmup());
        mask_warmup(&mut histogram, self.signal_warmup());
        (line, signal, histogram)
    }
}

fn mask_warmup(series: &mut [Option<f64>], warmup: usize) {
    let end = warmup.min(series.len());
    series[..end].iter_mut().for_each(|v| *v = None);
}

/// Cross direction of `line` against `signal` at each bar.
///
/// Defined only where both bars of the comparison are defined; bar 0 never
/// has a cross.
pub fn detect_crosses(line: &[Option<f64>], signal: &[Option<f64>]) -> Vec<Option<f64>> {
    let spread = smoothing::combine(line, signal, |l, s| l - s);
    let mut cross = vec![None; spread.len()];
    for i in 1..spread.len() {
        if let (Some(prev), Some(curr)) = (spread[i - 1], spread[i]) {
            cross[i] = Some(if prev <= 0.0 && curr > 0.0 {
                1.0
            } else if prev >= 0.0 && curr < 0.0 {
                -1.0
            } else {
                0.0
            });
        }
    }
    cross
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        match self.line {
            MacdLine::Line => keys::MACD,
            MacdLine::Signal => keys::MACD_SIGNAL,
            MacdLine::Histogram => keys::MACD_HISTOGRAM,
            MacdLine::Cross => keys::MACD_CROSS,
        }
    }

    fn lookback(&self) -> usize {
        match self.line {
            MacdLine::Line => self.line_warmup(),
            MacdLine::Signal | MacdLine::Histogram => self.signal_warmup(),
            MacdLine::Cross => self.signal_warmup().saturating_add(1),
        }
    }

    fn compute(&self, frame: &PriceFrame) -> Vec<Option<f64>> {
        let (line, signal, histogram) = self.lines(frame);
        match self.line {
            MacdLine::Line => line,
            MacdLine::Signal => signal,
            MacdLine::Histogram => histogram,
            MacdLine::Cross => detect_crosses(&line, &signal),
        }
    }
}
