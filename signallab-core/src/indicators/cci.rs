//! Commodity Channel Index (CCI).
//!
//! CCI = (tp - SMA(tp)) / (0.015 * mean_deviation), tp = (high + low + close) / 3.
//! The mean deviation is measured against the SMA of the same window.
//! Lookback: period - 1.

use crate::domain::PriceFrame;
use crate::indicator::Indicator;
use crate::indicators::keys;
use crate::smoothing::{self, EPSILON};

/// Lambert's constant, scaling roughly 70-80% of values into [-100, 100].
const CCI_SCALE: f64 = 0.015;

#[derive(Debug, Clone)]
pub struct Cci {
    period: usize,
}

impl Cci {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "CCI period must be >= 1");
        Self { period }
    }
}

impl Indicator for Cci {
    fn name(&self) -> &str {
        keys::CCI
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, frame: &PriceFrame) -> Vec<Option<f64>> {
        let tp = smoothing::defined(&frame.typical_price());
        smoothing::rolling(&tp, self.period, |window| {
            let n = window.len() as f64;
            let mean = window.iter().sum::<f64>() / n;
            let mean_dev = window.iter().map(|v| (v - mean).abs()).sum::<f64>() / n;
            let last = window[window.len() - 1];
            Some((last - mean) / (CCI_SCALE * mean_dev + EPSILON))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_ohlcv_frame};

    #[test]
    fn cci_hand_computed() {
        // Typical prices 1, 2, 3 (high = low = close): mean 2, mean deviation 2/3
        // CCI = (3 - 2) / (0.015 * 2/3) = 100
        let frame = make_ohlcv_frame(&[
            (1.0, 1.0, 1.0, 1.0, 1.0),
            (2.0, 2.0, 2.0, 2.0, 1.0),
            (3.0, 3.0, 3.0, 3.0, 1.0),
        ]);
        let out = Cci::new(3).compute(&frame);
        assert_eq!(out[1], None);
        assert_approx(out[2].unwrap(), 100.0, 1e-6);
    }

    #[test]
    fn cci_flat_is_zero() {
        let data: Vec<_> = (0..20).map(|_| (10.0, 11.0, 9.0, 10.0, 1.0)).collect();
        let out = Cci::new(14).compute(&make_ohlcv_frame(&data));
        assert_approx(out[19].unwrap(), 0.0, 1e-9);
    }
}
