//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|), undefined at
//! bar 0 where there is no previous close.
//! ATR is the Wilder-smoothed TR (alpha = 1/period), seeded with the mean of
//! TR[1..=period].
//! Lookback: period.

use crate::domain::PriceFrame;
use crate::indicator::Indicator;
use crate::indicators::keys;
use crate::smoothing;

/// Compute the True Range series from a frame.
/// TR[0] is undefined (no previous close).
/// TR[t] = max(high[t]-low[t], |high[t]-close[t-1]|, |low[t]-close[t-1]|).
pub fn true_range(frame: &PriceFrame) -> Vec<Option<f64>> {
    let n = frame.len();
    let mut tr = vec![None; n];
    for i in 1..n {
        let h = frame.high[i];
        let l = frame.low[i];
        let pc = frame.close[i - 1];
        tr[i] = Some((h - l).max((h - pc).abs()).max((l - pc).abs()));
    }
    tr
}

#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
}

impl Atr {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ATR period must be >= 1");
        Self { period }
    }
}

impl Indicator for Atr {
    fn name(&self) -> &str {
        keys::ATR
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, frame: &PriceFrame) -> Vec<Option<f64>> {
        smoothing::wilder(&true_range(frame), self.period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_ohlcv_frame, DEFAULT_EPSILON};

    #[test]
    fn true_range_uses_previous_close() {
        let frame = make_ohlcv_frame(&[
            (10.0, 12.0, 9.0, 11.0, 1.0),
            // gap up: |high - prev_close| = 16 - 11 = 5 beats high - low = 2
            (15.0, 16.0, 14.0, 15.0, 1.0),
            // gap down: |low - prev_close| = 15 - 10 = 5
            (11.0, 12.0, 10.0, 11.0, 1.0),
        ]);
        let tr = true_range(&frame);
        assert_eq!(tr[0], None);
        assert_approx(tr[1].unwrap(), 5.0, DEFAULT_EPSILON);
        assert_approx(tr[2].unwrap(), 5.0, DEFAULT_EPSILON);
    }

    #[test]
    fn atr_constant_range() {
        // Every bar: high - low = 2, close unchanged, so TR = 2 everywhere defined.
        let data: Vec<_> = (0..10).map(|_| (100.0, 101.0, 99.0, 100.0, 1.0)).collect();
        let result = Atr::new(3).compute(&make_ohlcv_frame(&data));
        assert!(result[..3].iter().all(Option::is_none));
        for v in &result[3..] {
            assert_approx(v.unwrap(), 2.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn atr_wilder_step() {
        // TR = [-, 2, 4, 6, 8]; seed(3) at bar 3 = 4; bar 4 = 4 + (8-4)/3
        let frame = make_ohlcv_frame(&[
            (10.0, 11.0, 9.0, 10.0, 1.0),
            (10.0, 11.0, 9.0, 10.0, 1.0),
            (10.0, 12.0, 8.0, 10.0, 1.0),
            (10.0, 13.0, 7.0, 10.0, 1.0),
            (10.0, 14.0, 6.0, 10.0, 1.0),
        ]);
        let result = Atr::new(3).compute(&frame);
        assert_approx(result[3].unwrap(), 4.0, DEFAULT_EPSILON);
        assert_approx(result[4].unwrap(), 4.0 + 4.0 / 3.0, DEFAULT_EPSILON);
    }

    #[test]
    fn atr_lookback() {
        assert_eq!(Atr::new(14).lookback(), 14);
    }
}
