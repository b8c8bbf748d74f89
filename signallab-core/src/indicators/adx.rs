//! ADX: Average Directional Index (Wilder).
//!
//! Steps:
//! 1. Compute +DM and -DM from consecutive bars (undefined at bar 0)
//! 2. Smooth +DM, -DM, and TR using Wilder smoothing (alpha = 1/period)
//! 3. +DI = 100 * smoothed(+DM) / smoothed(TR)
//! 4. -DI = 100 * smoothed(-DM) / smoothed(TR)
//! 5. DX = 100 * |+DI - -DI| / (+DI + -DI)
//! 6. ADX = Wilder-smoothed DX
//!
//! Lookback: period for the DI lines, 2 * period - 1 for ADX (DX starts at
//! bar `period`, and its own smoothing needs `period` values).

use crate::domain::PriceFrame;
use crate::indicator::Indicator;
use crate::indicators::atr::true_range;
use crate::indicators::keys;
use crate::smoothing::{self, EPSILON};

/// Which output line of the directional movement system to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdxLine {
    Adx,
    PlusDi,
    MinusDi,
}

#[derive(Debug, Clone)]
pub struct Adx {
    period: usize,
    line: AdxLine,
}

impl Adx {
    pub fn new(period: usize) -> Self {
        Self::with_line(period, AdxLine::Adx)
    }

    pub fn plus_di(period: usize) -> Self {
        Self::with_line(period, AdxLine::PlusDi)
    }

    pub fn minus_di(period: usize) -> Self {
        Self::with_line(period, AdxLine::MinusDi)
    }

    fn with_line(period: usize, line: AdxLine) -> Self {
        assert!(period >= 1, "ADX period must be >= 1");
        Self { period, line }
    }
}

/// +DM and -DM series. Only the larger positive move counts; ties count as zero.
pub fn directional_movement(frame: &PriceFrame) -> (Vec<Option<f64>>, Vec<Option<f64>>) {
    let n = frame.len();
    let mut plus_dm = vec![None; n];
    let mut minus_dm = vec![None; n];
    for i in 1..n {
        let up = frame.high[i] - frame.high[i - 1];
        let down = frame.low[i - 1] - frame.low[i];
        plus_dm[i] = Some(if up > down && up > 0.0 { up } else { 0.0 });
        minus_dm[i] = Some(if down > up && down > 0.0 { down } else { 0.0 });
    }
    (plus_dm, minus_dm)
}

/// +DI and -DI series.
pub fn directional_indicators(
    frame: &PriceFrame,
    period: usize,
) -> (Vec<Option<f64>>, Vec<Option<f64>>) {
    let (plus_dm, minus_dm) = directional_movement(frame);
    let smooth_tr = smoothing::wilder(&true_range(frame), period);
    let di = |dm: &[Option<f64>]| {
        smoothing::combine(&smoothing::wilder(dm, period), &smooth_tr, |dm, tr| {
            100.0 * dm / (tr + EPSILON)
        })
    };
    (di(&plus_dm), di(&minus_dm))
}

impl Indicator for Adx {
    fn name(&self) -> &str {
        match self.line {
            AdxLine::Adx => keys::ADX,
            AdxLine::PlusDi => keys::PLUS_DI,
            AdxLine::MinusDi => keys::MINUS_DI,
        }
    }

    fn lookback(&self) -> usize {
        match self.line {
            AdxLine::Adx => self.period.saturating_mul(2) - 1,
            AdxLine::PlusDi | AdxLine::MinusDi => self.period,
        }
    }

    fn compute(&self, frame: &PriceFrame) -> Vec<Option<f64>> {
        let (plus_di, minus_di) = directional_indicators(frame, self.period);
        match self.line {
            AdxLine::PlusDi => plus_di,
            AdxLine::MinusDi => minus_di,
            AdxLine::Adx => {
                let dx = smoothing::combine(&plus_di, &minus_di, |p, m| {
                    100.0 * (p - m).abs() / (p + m + EPSILON)
                });
                smoothing::wilder(&dx, self.period)
            }
        }
    }
}
