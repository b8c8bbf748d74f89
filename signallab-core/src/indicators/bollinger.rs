//! Bollinger Bands: moving average +/- standard deviation multiplier.
//!
//! Five lines (separate Indicator instances):
//! - Middle: SMA(close, period)
//! - Upper: middle + mult * stddev(close, period)
//! - Lower: middle - mult * stddev(close, period)
//! - PercentB: (close - lower) / (upper - lower)
//! - Bandwidth: (upper - lower) / middle
//!
//! Uses population stddev (divide by N).
//! A collapsed band (upper - lower <= epsilon) reports %B = 0.5: the close sits
//! on the middle of a zero-width band.
//! Lookback: period - 1.

use crate::domain::PriceFrame;
use crate::indicator::Indicator;
use crate::indicators::keys;
use crate::smoothing::{self, StdKind, EPSILON};

/// Which line of the Bollinger Bands to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BollingerBand {
    Upper,
    Middle,
    Lower,
    PercentB,
    Bandwidth,
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    period: usize,
    multiplier: f64,
    band: BollingerBand,
}

impl Bollinger {
    pub fn new(period: usize, multiplier: f64, band: BollingerBand) -> Self {
        assert!(period >= 1, "Bollinger period must be >= 1");
        Self {
            period,
            multiplier,
            band,
        }
    }

    pub fn upper(period: usize, multiplier: f64) -> Self {
        Self::new(period, multiplier, BollingerBand::Upper)
    }

    pub fn middle(period: usize, multiplier: f64) -> Self {
        Self::new(period, multiplier, BollingerBand::Middle)
    }

    pub fn lower(period: usize, multiplier: f64) -> Self {
        Self::new(period, multiplier, BollingerBand::Lower)
    }
}

impl Indicator for Bollinger {
    fn name(&self) -> &str {
        match self.band {
            BollingerBand::Upper => keys::BB_UPPER,
            BollingerBand::Middle => keys::BB_MIDDLE,
            BollingerBand::Lower => keys::BB_LOWER,
            BollingerBand::PercentB => keys::BB_PCT_B,
            BollingerBand::Bandwidth => keys::BB_BANDWIDTH,
        }
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, frame: &PriceFrame) -> Vec<Option<f64>> {
        let close = smoothing::defined(&frame.close);
        let middle = smoothing::sma(&close, self.period);
        if self.band == BollingerBand::Middle {
            return middle;
        }

        let std = smoothing::rolling_std(&close, self.period, StdKind::Population);
        let upper = smoothing::combine(&middle, &std, |m, s| m + self.multiplier * s);
        let lower = smoothing::combine(&middle, &std, |m, s| m - self.multiplier * s);

        match self.band {
            BollingerBand::Upper => upper,
            BollingerBand::Lower => lower,
            BollingerBand::Middle => middle,
            BollingerBand::PercentB => {
                let width = smoothing::combine(&upper, &lower, |u, l| u - l);
                let above_lower = smoothing::combine(&close, &lower, |c, l| c - l);
                smoothing::combine(&above_lower, &width, |num, w| {
                    if w <= EPSILON {
                        0.5
                    } else {
                        num / w
                    }
                })
            }
            BollingerBand::Bandwidth => {
                let width = smoothing::combine(&upper, &lower, |u, l| u - l);
                smoothing::combine(&width, &middle, |w, m| w / (m + EPSILON))
            }
        }
    }
}
