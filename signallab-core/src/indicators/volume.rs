//! Volume indicators.
//!
//! - OBV: obv[0] = volume[0]; then +volume on an up close, -volume on a down
//!   close, unchanged on a flat close. Lookback 0.
//! - A/D: cumulative sum of clv * volume, clv = ((c - l) - (h - c)) / (h - l).
//!   Lookback 0.
//! - CMF(n): sum(clv * volume, n) / sum(volume, n). Lookback n - 1.
//! - Volume Z-score(n): (volume - mean(volume, n)) / sample_std(volume, n).
//!   Lookback n - 1.
//! - VWAP: cumulative typical_price * volume / cumulative volume, undefined
//!   while no volume has traded. Lookback 0.

use crate::domain::PriceFrame;
use crate::indicator::Indicator;
use crate::indicators::keys;
use crate::smoothing::{self, StdKind, EPSILON};

#[derive(Debug, Clone, Default)]
pub struct OnBalanceVolume;

impl Indicator for OnBalanceVolume {
    fn name(&self) -> &str {
        keys::OBV
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, frame: &PriceFrame) -> Vec<Option<f64>> {
        let mut obv = 0.0;
        frame
            .close
            .iter()
            .zip(&frame.volume)
            .enumerate()
            .map(|(i, (&close, &volume))| {
                if i == 0 {
                    obv = volume;
                } else if close > frame.close[i - 1] {
                    obv += volume;
                } else if close < frame.close[i - 1] {
                    obv -= volume;
                }
                Some(obv)
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AccumulationDistribution;

impl Indicator for AccumulationDistribution {
    fn name(&self) -> &str {
        keys::AD
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, frame: &PriceFrame) -> Vec<Option<f64>> {
        frame
            .close_location()
            .iter()
            .zip(&frame.volume)
            .scan(0.0, |ad, (clv, volume)| {
                *ad += clv * volume;
                Some(Some(*ad))
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct ChaikinMoneyFlow {
    period: usize,
}

impl ChaikinMoneyFlow {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "CMF period must be >= 1");
        Self { period }
    }
}

impl Indicator for ChaikinMoneyFlow {
    fn name(&self) -> &str {
        keys::CMF
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, frame: &PriceFrame) -> Vec<Option<f64>> {
        let money_flow: Vec<Option<f64>> = frame
            .close_location()
            .iter()
            .zip(&frame.volume)
            .map(|(clv, volume)| Some(clv * volume))
            .collect();
        let flow_sum = smoothing::rolling_sum(&money_flow, self.period);
        let volume_sum = smoothing::rolling_sum(&smoothing::defined(&frame.volume), self.period);
        smoothing::combine(&flow_sum, &volume_sum, |f, v| f / (v + EPSILON))
    }
}

#[derive(Debug, Clone)]
pub struct VolumeZScore {
    period: usize,
}

impl VolumeZScore {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "Volume Z-score period must be >= 1");
        Self { period }
    }
}

impl Indicator for VolumeZScore {
    fn name(&self) -> &str {
        keys::VOLUME_Z
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, frame: &PriceFrame) -> Vec<Option<f64>> {
        let volume = smoothing::defined(&frame.volume);
        let mean = smoothing::sma(&volume, self.period);
        let std = smoothing::rolling_std(&volume, self.period, StdKind::Sample);
        let deviation = smoothing::combine(&volume, &mean, |v, m| v - m);
        smoothing::combine(&deviation, &std, |d, s| d / (s + EPSILON))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Vwap;

impl Indicator for Vwap {
    fn name(&self) -> &str {
        keys::VWAP
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, frame: &PriceFrame) -> Vec<Option<f64>> {
        let mut cum_pv = 0.0;
        let mut cum_volume = 0.0;
        frame
            .typical_price()
            .iter()
            .zip(&frame.volume)
            .map(|(tp, volume)| {
                cum_pv += tp * volume;
                cum_volume += volume;
                (cum_volume > 0.0).then(|| cum_pv / cum_volume)
            })
            .collect()
    }
}
