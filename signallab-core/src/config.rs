//! Serializable engine configuration.
//!
//! `IndicatorConfig` is an immutable value passed into every analysis. It
//! carries indicator periods, regime thresholds, scoring tunables, risk
//! parameters and the regime weight tables. Every field has a default, so a
//! TOML file only needs to list what it overrides.

use crate::domain::ConfigHash;
use crate::error::ConfigError;
use crate::regime::Regime;
use crate::scoring::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Allowed drift of a regime's weights from 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Largest accepted indicator period.
pub const MAX_PERIOD: usize = 100_000;

/// Complete configuration for one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndicatorConfig {
    // ── Trend ──
    pub adx_period: usize,
    pub ema_periods: [usize; 3],
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,

    // ── Momentum ──
    pub rsi_period: usize,
    pub stoch_k: usize,
    pub stoch_d: usize,
    /// SMA applied to raw %K before %D is taken.
    pub stoch_smooth: usize,
    pub williams_period: usize,
    pub cci_period: usize,
    pub momentum_period: usize,

    // ── Volatility ──
    pub bb_period: usize,
    pub bb_std: f64,
    pub atr_period: usize,
    pub keltner_period: usize,
    pub keltner_multiplier: f64,

    // ── Volume ──
    pub volume_period: usize,
    pub cmf_period: usize,

    pub return_volatility_period: usize,

    // ── Regime ──
    pub regime_high_threshold: f64,
    pub regime_low_threshold: f64,

    pub scoring: ScoringConfig,
    pub risk: RiskConfig,
    pub weight_table: WeightTable,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            adx_period: 14,
            ema_periods: [20, 50, 200],
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            rsi_period: 14,
            stoch_k: 14,
            stoch_d: 3,
            stoch_smooth: 3,
            williams_period: 14,
            cci_period: 14,
            momentum_period: 20,
            bb_period: 20,
            bb_std: 2.0,
            atr_period: 14,
            keltner_period: 20,
            keltner_multiplier: 2.0,
            volume_period: 20,
            cmf_period: 20,
            return_volatility_period: 20,
            regime_high_threshold: 25.0,
            regime_low_threshold: 20.0,
            scoring: ScoringConfig::default(),
            risk: RiskConfig::default(),
            weight_table: WeightTable::default(),
        }
    }
}

impl IndicatorConfig {
    /// Parse a TOML document and validate it.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Check every invariant the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let periods = [
            ("adx_period", self.adx_period),
            ("ema_periods[0]", self.ema_periods[0]),
            ("ema_periods[1]", self.ema_periods[1]),
            ("ema_periods[2]", self.ema_periods[2]),
            ("macd_fast", self.macd_fast),
            ("macd_slow", self.macd_slow),
            ("macd_signal", self.macd_signal),
            ("rsi_period", self.rsi_period),
            ("stoch_k", self.stoch_k),
            ("stoch_d", self.stoch_d),
            ("stoch_smooth", self.stoch_smooth),
            ("williams_period", self.williams_period),
            ("cci_period", self.cci_period),
            ("momentum_period", self.momentum_period),
            ("bb_period", self.bb_period),
            ("atr_period", self.atr_period),
            ("keltner_period", self.keltner_period),
            ("volume_period", self.volume_period),
            ("cmf_period", self.cmf_period),
            ("return_volatility_period", self.return_volatility_period),
        ];
        if let Some((name, _)) = periods.iter().find(|(_, p)| *p == 0) {
            return Err(ConfigError::NonPositivePeriod {
                name: name.to_string(),
            });
        }

        if let Some((name, value)) = periods.iter().find(|(_, p)| *p > MAX_PERIOD) {
            return Err(ConfigError::PeriodTooLarge {
                name: name.to_string(),
                value: *value,
                max: MAX_PERIOD,
            });
        }

        if self.macd_fast >= self.macd_slow {
            return Err(ConfigError::MacdPeriodOrder {
                fast: self.macd_fast,
                slow: self.macd_slow,
            });
        }

        let (high, low) = (self.regime_high_threshold, self.regime_low_threshold);
        if !high.is_finite() || !low.is_finite() || high <= low {
            return Err(ConfigError::ThresholdOrder { high, low });
        }

        let positive = [
            ("bb_std", self.bb_std),
            ("keltner_multiplier", self.keltner_multiplier),
            ("scoring.bandwidth_scale", self.scoring.bandwidth_scale),
            ("scoring.bandwidth_multiplier_min", self.scoring.bandwidth_multiplier_min),
            ("scoring.bandwidth_multiplier_max", self.scoring.bandwidth_multiplier_max),
            ("scoring.strong_bandwidth", self.scoring.strong_bandwidth),
            ("risk.stop_atr_multiple", self.risk.stop_atr_multiple),
            ("risk.default_stop_pct", self.risk.default_stop_pct),
            ("risk.fallback_volatility_pct", self.risk.fallback_volatility_pct),
        ];
        if let Some((name, value)) = positive.iter().find(|(_, v)| !(v.is_finite() && *v > 0.0)) {
            return Err(ConfigError::InvalidMultiplier {
                name: name.to_string(),
                value: *value,
            });
        }
        if self.scoring.bandwidth_multiplier_min > self.scoring.bandwidth_multiplier_max {
            return Err(ConfigError::InvalidMultiplier {
                name: "scoring.bandwidth_multiplier_min".to_string(),
                value: self.scoring.bandwidth_multiplier_min,
            });
        }

        self.weight_table.validate()
    }

    /// Deterministic hash of the full configuration.
    pub fn fingerprint(&self) -> ConfigHash {
        // BTreeMap fields and fixed struct order make the JSON canonical.
        match serde_json::to_vec(self) {
            Ok(bytes) => ConfigHash::from_bytes(&bytes),
            Err(_) => ConfigHash::from_bytes(format!("{self:?}").as_bytes()),
        }
    }

    /// Longest EMA period, used as the long-term trend anchor.
    pub fn longest_ema(&self) -> usize {
        self.ema_periods.iter().copied().max().unwrap_or(1)
    }
}

/// Tunables of the Bollinger score and the rule vote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    /// Bandwidth is multiplied by this before clipping into the multiplier range.
    pub bandwidth_scale: f64,
    pub bandwidth_multiplier_min: f64,
    pub bandwidth_multiplier_max: f64,
    /// Bandwidth above which a Bollinger rule vote counts as strong.
    pub strong_bandwidth: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            bandwidth_scale: 10.0,
            bandwidth_multiplier_min: 0.5,
            bandwidth_multiplier_max: 2.0,
            strong_bandwidth: 0.06,
        }
    }
}

/// Stop-loss and volatility parameters of the risk assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RiskConfig {
    /// Stop distance in ATRs.
    pub stop_atr_multiple: f64,
    /// Stop distance as a fraction of price when ATR is unavailable.
    pub default_stop_pct: f64,
    /// Volatility percentage assumed when ATR is unavailable.
    pub fallback_volatility_pct: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            stop_atr_multiple: 1.5,
            default_stop_pct: 0.03,
            fallback_volatility_pct: 2.0,
        }
    }
}

/// Regime → category → weight.
///
/// The unknown regime has no table of its own and uses the trend weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeightTable {
    pub trend: BTreeMap<Category, f64>,
    pub range: BTreeMap<Category, f64>,
    pub transition: BTreeMap<Category, f64>,
}

impl Default for WeightTable {
    fn default() -> Self {
        use Category::*;
        Self {
            trend: BTreeMap::from([
                (Momentum, 0.40),
                (Macd, 0.20),
                (ReturnVolatility, 0.15),
                (Volume, 0.15),
                (Rsi, 0.05),
                (Bollinger, 0.05),
            ]),
            range: BTreeMap::from([
                (Rsi, 0.25),
                (Bollinger, 0.25),
                (Volume, 0.20),
                (Momentum, 0.15),
                (Macd, 0.10),
                (ReturnVolatility, 0.05),
            ]),
            transition: BTreeMap::from([
                (Momentum, 0.25),
                (Rsi, 0.20),
                (Bollinger, 0.20),
                (Macd, 0.15),
                (Volume, 0.10),
                (ReturnVolatility, 0.10),
            ]),
        }
    }
}

impl WeightTable {
    /// Weights for a regime; unknown falls back to trend.
    pub fn for_regime(&self, regime: Regime) -> &BTreeMap<Category, f64> {
        match regime {
            Regime::Trend | Regime::Unknown => &self.trend,
            Regime::Range => &self.range,
            Regime::Transition => &self.transition,
        }
    }

    fn tables(&self) -> [(Regime, &BTreeMap<Category, f64>); 3] {
        [
            (Regime::Trend, &self.trend),
            (Regime::Range, &self.range),
            (Regime::Transition, &self.transition),
        ]
    }

    /// Every regime covers every category with a non-negative weight, and the
    /// weights sum to 1 within [`WEIGHT_SUM_TOLERANCE`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (regime, table) in self.tables() {
            for category in Category::ALL {
                let weight = *table.get(&category).ok_or_else(|| ConfigError::MissingWeight {
                    regime: regime.to_string(),
                    category: category.to_string(),
                })?;
                if !weight.is_finite() || weight < 0.0 {
                    return Err(ConfigError::NegativeWeight {
                        regime: regime.to_string(),
                        category: category.to_string(),
                        weight,
                    });
                }
            }
            let sum: f64 = table.values().sum();
            if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
                return Err(ConfigError::WeightSumDrift {
                    regime: regime.to_string(),
                    sum,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        IndicatorConfig::default().validate().unwrap();
    }

    #[test]
    fn builtin_weights_sum_to_one() {
        let table = WeightTable::default();
        for regime in [Regime::Trend, Regime::Range, Regime::Transition] {
            let sum: f64 = table.for_regime(regime).values().sum();
            assert!((sum - 1.0).abs() <= 1e-6, "{regime}: {sum}");
            assert_eq!(table.for_regime(regime).len(), Category::ALL.len());
        }
    }

    #[test]
    fn unknown_regime_uses_trend_weights() {
        let table = WeightTable::default();
        assert_eq!(table.for_regime(Regime::Unknown), table.for_regime(Regime::Trend));
    }

    #[test]
    fn zero_period_rejected() {
        let config = IndicatorConfig {
            rsi_period: 0,
            ..Default::default()
        };
        match config.validate() {
            Err(ConfigError::NonPositivePeriod { name }) => assert_eq!(name, "rsi_period"),
            other => panic!("expected NonPositivePeriod, got {other:?}"),
        }
    }

    #[test]
    fn huge_period_rejected() {
        let config = IndicatorConfig {
            macd_signal: usize::MAX,
            ..Default::default()
        };
        match config.validate() {
            Err(ConfigError::PeriodTooLarge { name, max, .. }) => {
                assert_eq!(name, "macd_signal");
                assert_eq!(max, MAX_PERIOD);
            }
            other => panic!("expected PeriodTooLarge, got {other:?}"),
        }

        let at_limit = IndicatorConfig {
            adx_period: MAX_PERIOD,
            ..Default::default()
        };
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn macd_order_rejected() {
        let config = IndicatorConfig {
            macd_fast: 26,
            macd_slow: 12,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::MacdPeriodOrder { .. })));
    }

    #[test]
    fn inverted_thresholds_rejected() {
        let config = IndicatorConfig {
            regime_high_threshold: 20.0,
            regime_low_threshold: 25.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ThresholdOrder { .. })));
    }

    #[test]
    fn missing_category_rejected() {
        let mut config = IndicatorConfig::default();
        config.weight_table.range.remove(&Category::Volume);
        match config.validate() {
            Err(ConfigError::MissingWeight { regime, category }) => {
                assert_eq!(regime, "range");
                assert_eq!(category, "volume");
            }
            other => panic!("expected MissingWeight, got {other:?}"),
        }
    }

    #[test]
    fn weight_drift_rejected() {
        let mut config = IndicatorConfig::default();
        config.weight_table.trend.insert(Category::Momentum, 0.5);
        assert!(matches!(config.validate(), Err(ConfigError::WeightSumDrift { .. })));
    }

    #[test]
    fn negative_weight_rejected() {
        let mut config = IndicatorConfig::default();
        config.weight_table.transition.insert(Category::Rsi, -0.2);
        config.weight_table.transition.insert(Category::Momentum, 0.65);
        assert!(matches!(config.validate(), Err(ConfigError::NegativeWeight { .. })));
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let config = IndicatorConfig::from_toml_str(
            r#"
            rsi_period = 7
            ema_periods = [10, 30, 100]

            [scoring]
            strong_bandwidth = 0.08
            "#,
        )
        .unwrap();
        assert_eq!(config.rsi_period, 7);
        assert_eq!(config.ema_periods, [10, 30, 100]);
        assert_eq!(config.scoring.strong_bandwidth, 0.08);
        assert_eq!(config.scoring.bandwidth_scale, 10.0);
        assert_eq!(config.adx_period, 14);
    }

    #[test]
    fn toml_weight_table_override() {
        let config = IndicatorConfig::from_toml_str(
            r#"
            [weight_table.trend]
            momentum = 0.5
            macd = 0.1
            return_volatility = 0.1
            volume = 0.1
            rsi = 0.1
            bollinger = 0.1

            [weight_table.range]
            momentum = 0.1
            macd = 0.1
            return_volatility = 0.1
            volume = 0.1
            rsi = 0.3
            bollinger = 0.3

            [weight_table.transition]
            momentum = 0.2
            macd = 0.2
            return_volatility = 0.15
            volume = 0.15
            rsi = 0.15
            bollinger = 0.15
            "#,
        )
        .unwrap();
        assert_eq!(config.weight_table.trend[&Category::Momentum], 0.5);
    }

    #[test]
    fn unknown_field_rejected() {
        let err = IndicatorConfig::from_toml_str("rsi_perod = 7").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn toml_roundtrip() {
        let config = IndicatorConfig::default();
        let text = config.to_toml_string().unwrap();
        let back = IndicatorConfig::from_toml_str(&text).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn fingerprint_tracks_content() {
        let a = IndicatorConfig::default();
        let b = IndicatorConfig::default();
        let c = IndicatorConfig {
            bb_std: 2.5,
            ..Default::default()
        };
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
    }
}
