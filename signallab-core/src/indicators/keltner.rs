//! Keltner Channels: EMA center line +/- ATR multiplier.
//!
//! Three bands (separate Indicator instances):
//! - Middle: EMA(close, period)
//! - Upper: middle + mult * ATR(period)
//! - Lower: middle - mult * ATR(period)
//!
//! Lookback: period - 1 for the middle band, period for the outer bands (ATR).

use crate::domain::PriceFrame;
use crate::indicator::Indicator;
use crate::indicators::atr::Atr;
use crate::indicators::ema::masked_ema;
use crate::indicators::keys;
use crate::smoothing;

/// Which band of the Keltner Channel to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeltnerBand {
    Upper,
    Middle,
    Lower,
}

#[derive(Debug, Clone)]
pub struct Keltner {
    period: usize,
    multiplier: f64,
    band: KeltnerBand,
}

impl Keltner {
    pub fn upper(period: usize, multiplier: f64) -> Self {
        Self::new(period, multiplier, KeltnerBand::Upper)
    }

    pub fn middle(period: usize, multiplier: f64) -> Self {
        Self::new(period, multiplier, KeltnerBand::Middle)
    }

    pub fn lower(period: usize, multiplier: f64) -> Self {
        Self::new(period, multiplier, KeltnerBand::Lower)
    }

    fn new(period: usize, multiplier: f64, band: KeltnerBand) -> Self {
        assert!(period >= 1, "Keltner period must be >= 1");
        Self {
            period,
            multiplier,
            band,
        }
    }
}

impl Indicator for Keltner {
    fn name(&self) -> &str {
        match self.band {
            KeltnerBand::Upper => keys::KELTNER_UPPER,
            KeltnerBand::Middle => keys::KELTNER_MIDDLE,
            KeltnerBand::Lower => keys::KELTNER_LOWER,
        }
    }

    fn lookback(&self) -> usize {
        match self.band {
            KeltnerBand::Middle => self.period - 1,
            KeltnerBand::Upper | KeltnerBand::Lower => self.period,
        }
    }

    fn compute(&self, frame: &PriceFrame) -> Vec<Option<f64>> {
        let middle = masked_ema(&smoothing::defined(&frame.close), self.period);
        if self.band == KeltnerBand::Middle {
            return middle;
        }

        let atr = Atr::new(self.period).compute(frame);
        let sign = if self.band == KeltnerBand::Upper { 1.0 } else { -1.0 };
        smoothing::combine(&middle, &atr, |m, a| m + sign * self.multiplier * a)
    }
}
