//! Column-oriented f64 view of a candle series.
//!
//! Decimal prices are converted exactly once per analysis. Every indicator reads
//! from the same frame, so no indicator repeats the conversion.

use super::CandleSeries;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceFrame {
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub volume: Vec<f64>,
}

fn to_f64(d: Decimal) -> f64 {
    // Every Decimal fits in f64 range; the fallback is unreachable in practice.
    d.to_f64().unwrap_or(f64::NAN)
}

impl PriceFrame {
    pub fn from_series(series: &CandleSeries) -> Self {
        let n = series.len();
        let mut frame = Self {
            open: Vec::with_capacity(n),
            high: Vec::with_capacity(n),
            low: Vec::with_capacity(n),
            close: Vec::with_capacity(n),
            volume: Vec::with_capacity(n),
        };
        for c in series.candles() {
            frame.open.push(to_f64(c.open));
            frame.high.push(to_f64(c.high));
            frame.low.push(to_f64(c.low));
            frame.close.push(to_f64(c.close));
            frame.volume.push(to_f64(c.volume));
        }
        frame
    }

    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    /// Typical price `(high + low + close) / 3` per bar.
    pub fn typical_price(&self) -> Vec<f64> {
        self.high
            .iter()
            .zip(&self.low)
            .zip(&self.close)
            .map(|((h, l), c)| (h + l + c) / 3.0)
            .collect()
    }

    /// Close-location value `((c - l) - (h - c)) / (h - l)`, in [-1, 1].
    pub fn close_location(&self) -> Vec<f64> {
        self.high
            .iter()
            .zip(&self.low)
            .zip(&self.close)
            .map(|((h, l), c)| ((c - l) - (h - c)) / (h - l + crate::smoothing::EPSILON))
            .collect()
    }

    /// Simple returns `close[t] / close[t-1] - 1`; undefined at bar 0 and after a
    /// zero close.
    pub fn returns(&self) -> Vec<Option<f64>> {
        let mut out = vec![None; self.len()];
        for i in 1..self.len() {
            let prev = self.close[i - 1];
            if prev.abs() > crate::smoothing::EPSILON {
                out[i] = Some(self.close[i] / prev - 1.0);
            }
        }
        out
    }
}
