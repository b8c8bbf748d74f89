//! Indicator calculation orchestration.
//!
//! The calculator turns an [`IndicatorConfig`] into the full list of
//! indicator instances once, then computes every series for a price frame
//! in a single pass. Multi-line indicators appear once per output line.

use crate::config::IndicatorConfig;
use crate::domain::{CandleSeries, PriceFrame};
use crate::indicator::{Indicator, IndicatorSet};
use crate::indicators::{
    AccumulationDistribution, Adx, Atr, Bollinger, BollingerBand, Cci, ChaikinMoneyFlow, Ema,
    Keltner, Macd, MacdLine, Momentum, OnBalanceVolume, PriceVsEma, ReturnVolatility, Rsi,
    Stochastic, VolumeZScore, Vwap, WilliamsR,
};

pub struct IndicatorCalculator {
    indicators: Vec<Box<dyn Indicator>>,
}

impl IndicatorCalculator {
    /// Build every indicator the configuration names.
    ///
    /// The configuration must already be validated; zero periods panic in the
    /// indicator constructors.
    pub fn from_config(config: &IndicatorConfig) -> Self {
        let (fast, slow, signal) = (config.macd_fast, config.macd_slow, config.macd_signal);
        let (k, smooth, d) = (config.stoch_k, config.stoch_smooth, config.stoch_d);

        let mut indicators: Vec<Box<dyn Indicator>> = vec![
            // Trend
            Box::new(Adx::new(config.adx_period)),
            Box::new(Adx::plus_di(config.adx_period)),
            Box::new(Adx::minus_di(config.adx_period)),
        ];
        for period in config.ema_periods {
            indicators.push(Box::new(Ema::new(period)));
        }
        indicators.push(Box::new(PriceVsEma::new(config.longest_ema())));
        for line in [MacdLine::Line, MacdLine::Signal, MacdLine::Histogram, MacdLine::Cross] {
            indicators.push(Box::new(Macd::new(fast, slow, signal, line)));
        }

        // Momentum
        indicators.push(Box::new(Rsi::new(config.rsi_period)));
        indicators.push(Box::new(Stochastic::k(k, smooth, d)));
        indicators.push(Box::new(Stochastic::d(k, smooth, d)));
        indicators.push(Box::new(WilliamsR::new(config.williams_period)));
        indicators.push(Box::new(Cci::new(config.cci_period)));
        indicators.push(Box::new(Momentum::cumulative_return(config.momentum_period)));
        indicators.push(Box::new(Momentum::sharpe_like(config.momentum_period)));

        // Volatility
        for band in [
            BollingerBand::Upper,
            BollingerBand::Middle,
            BollingerBand::Lower,
            BollingerBand::PercentB,
            BollingerBand::Bandwidth,
        ] {
            indicators.push(Box::new(Bollinger::new(config.bb_period, config.bb_std, band)));
        }
        indicators.push(Box::new(Atr::new(config.atr_period)));
        let (kp, km) = (config.keltner_period, config.keltner_multiplier);
        indicators.push(Box::new(Keltner::upper(kp, km)));
        indicators.push(Box::new(Keltner::middle(kp, km)));
        indicators.push(Box::new(Keltner::lower(kp, km)));

        // Volume
        indicators.push(Box::new(OnBalanceVolume));
        indicators.push(Box::new(AccumulationDistribution));
        indicators.push(Box::new(ChaikinMoneyFlow::new(config.cmf_period)));
        indicators.push(Box::new(VolumeZScore::new(config.volume_period)));
        indicators.push(Box::new(Vwap));

        indicators.push(Box::new(ReturnVolatility::new(config.return_volatility_period)));

        Self { indicators }
    }

    pub fn indicators(&self) -> &[Box<dyn Indicator>] {
        &self.indicators
    }

    /// Bars before every indicator is defined: the maximum lookback.
    pub fn warmup(&self) -> usize {
        self.indicators.iter().map(|i| i.lookback()).max().unwrap_or(0)
    }

    pub fn compute(&self, series: &CandleSeries) -> IndicatorSet {
        self.compute_frame(&PriceFrame::from_series(series))
    }

    /// Compute every indicator over the frame.
    pub fn compute_frame(&self, frame: &PriceFrame) -> IndicatorSet {
        let mut set = IndicatorSet::default();
        for indicator in &self.indicators {
            let series = indicator.compute(frame);
            debug_assert_eq!(
                series.len(),
                frame.len(),
                "indicator '{}' produced {} values for {} bars",
                indicator.name(),
                series.len(),
                frame.len(),
            );
            set.insert(indicator.name(), series);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{keys, make_frame};

    fn trending_closes(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + i as f64 + (i as f64 * 0.7).sin()).collect()
    }

    #[test]
    fn default_config_produces_every_key() {
        let calc = IndicatorCalculator::from_config(&IndicatorConfig::default());
        let set = calc.compute_frame(&make_frame(&trending_closes(60)));
        for key in [
            keys::ADX,
            keys::PLUS_DI,
            keys::MINUS_DI,
            keys::MACD,
            keys::MACD_SIGNAL,
            keys::MACD_HISTOGRAM,
            keys::MACD_CROSS,
            keys::RSI,
            keys::STOCH_K,
            keys::STOCH_D,
            keys::WILLIAMS_R,
            keys::CCI,
            keys::MOMENTUM_CUMRET,
            keys::MOMENTUM_SHARPE,
            keys::BB_UPPER,
            keys::BB_MIDDLE,
            keys::BB_LOWER,
            keys::BB_PCT_B,
            keys::BB_BANDWIDTH,
            keys::ATR,
            keys::KELTNER_UPPER,
            keys::KELTNER_MIDDLE,
            keys::KELTNER_LOWER,
            keys::OBV,
            keys::AD,
            keys::CMF,
            keys::VOLUME_Z,
            keys::VWAP,
            keys::RETURN_VOLATILITY,
            "ema_20",
            "ema_50",
            "ema_200",
            "price_vs_ema_200",
        ] {
            assert!(set.get(key).is_some(), "missing {key}");
            assert_eq!(set.get(key).unwrap().len(), 60, "{key}");
        }
        assert_eq!(set.len(), calc.indicators().len());
    }

    #[test]
    fn warmup_is_longest_lookback() {
        let calc = IndicatorCalculator::from_config(&IndicatorConfig::default());
        // ema_200 has lookback 199
        assert_eq!(calc.warmup(), 199);
    }

    #[test]
    fn short_frame_leaves_long_indicators_undefined() {
        let calc = IndicatorCalculator::from_config(&IndicatorConfig::default());
        let set = calc.compute_frame(&make_frame(&trending_closes(60)));
        assert_eq!(set.get("ema_200").unwrap().defined_count(), 0);
        assert_eq!(set.latest("price_vs_ema_200"), None);
        assert!(set.latest("ema_20").is_some());
        assert!(set.latest(keys::RSI).is_some());
        assert!(set.latest(keys::ADX).is_some());
    }

    #[test]
    fn configured_periods_rename_series() {
        let config = IndicatorConfig {
            ema_periods: [5, 10, 30],
            ..Default::default()
        };
        let calc = IndicatorCalculator::from_config(&config);
        let set = calc.compute_frame(&make_frame(&trending_closes(40)));
        assert!(set.get("ema_5").is_some());
        assert!(set.latest("price_vs_ema_30").is_some());
        assert!(set.get("ema_20").is_none());
    }

    #[test]
    fn empty_frame_yields_empty_series() {
        let calc = IndicatorCalculator::from_config(&IndicatorConfig::default());
        let set = calc.compute_frame(&PriceFrame::default());
        assert!(set.names().all(|n| set.get(n).unwrap().is_empty()));
    }
}
