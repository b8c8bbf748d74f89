//! Concrete indicator implementations.
//!
//! Every indicator implements the [`Indicator`](crate::indicator::Indicator)
//! trait and is evaluated once per analysis by the
//! [`IndicatorCalculator`](crate::calculator::IndicatorCalculator).
//!
//! Multi-line indicators (ADX, MACD, Stochastic, Bollinger, Keltner, momentum)
//! are exposed as separate named instances per line, keeping the single-series
//! `Indicator` trait unchanged.

pub mod adx;
pub mod atr;
pub mod bollinger;
pub mod cci;
pub mod ema;
pub mod keltner;
pub mod macd;
pub mod momentum;
pub mod return_volatility;
pub mod rsi;
pub mod stochastic;
pub mod volume;
pub mod williams;

pub use adx::{Adx, AdxLine};
pub use atr::Atr;
pub use bollinger::{Bollinger, BollingerBand};
pub use cci::Cci;
pub use ema::{Ema, PriceVsEma};
pub use keltner::{Keltner, KeltnerBand};
pub use macd::{detect_crosses, Macd, MacdLine};
pub use momentum::{Momentum, MomentumLine};
pub use return_volatility::ReturnVolatility;
pub use rsi::Rsi;
pub use stochastic::{Stochastic, StochasticLine};
pub use volume::{AccumulationDistribution, ChaikinMoneyFlow, OnBalanceVolume, VolumeZScore, Vwap};
pub use williams::WilliamsR;

/// Names of the series in an [`IndicatorSet`](crate::indicator::IndicatorSet)
/// that scoring, regime detection and risk read back.
///
/// EMA series are named `ema_{period}` and are not listed here.
pub mod keys {
    pub const ADX: &str = "adx";
    pub const PLUS_DI: &str = "plus_di";
    pub const MINUS_DI: &str = "minus_di";
    pub const MACD: &str = "macd";
    pub const MACD_SIGNAL: &str = "macd_signal";
    pub const MACD_HISTOGRAM: &str = "macd_histogram";
    pub const MACD_CROSS: &str = "macd_cross";
    pub const RSI: &str = "rsi";
    pub const STOCH_K: &str = "stoch_k";
    pub const STOCH_D: &str = "stoch_d";
    pub const WILLIAMS_R: &str = "williams_r";
    pub const CCI: &str = "cci";
    pub const MOMENTUM_CUMRET: &str = "momentum_cumret";
    pub const MOMENTUM_SHARPE: &str = "momentum_sharpe_like";
    pub const BB_UPPER: &str = "bb_upper";
    pub const BB_MIDDLE: &str = "bb_middle";
    pub const BB_LOWER: &str = "bb_lower";
    pub const BB_PCT_B: &str = "bb_pct_b";
    pub const BB_BANDWIDTH: &str = "bb_bandwidth";
    pub const ATR: &str = "atr";
    pub const KELTNER_UPPER: &str = "keltner_upper";
    pub const KELTNER_MIDDLE: &str = "keltner_middle";
    pub const KELTNER_LOWER: &str = "keltner_lower";
    pub const OBV: &str = "obv";
    pub const AD: &str = "ad";
    pub const CMF: &str = "cmf";
    pub const VOLUME_Z: &str = "volume_z_score";
    pub const VWAP: &str = "vwap";
    pub const RETURN_VOLATILITY: &str = "return_volatility_ratio";
}

/// Create a synthetic frame from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_frame(closes: &[f64]) -> crate::domain::PriceFrame {
    let bars: Vec<(f64, f64, f64, f64, f64)> = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            (open, open.max(close) + 1.0, open.min(close) - 1.0, close, 1000.0)
        })
        .collect();
    make_ohlcv_frame(&bars)
}

/// Create a frame from explicit (open, high, low, close, volume) tuples.
#[cfg(test)]
pub fn make_ohlcv_frame(data: &[(f64, f64, f64, f64, f64)]) -> crate::domain::PriceFrame {
    crate::domain::PriceFrame {
        open: data.iter().map(|b| b.0).collect(),
        high: data.iter().map(|b| b.1).collect(),
        low: data.iter().map(|b| b.2).collect(),
        close: data.iter().map(|b| b.3).collect(),
        volume: data.iter().map(|b| b.4).collect(),
    }
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Assert two series agree on definedness and approximately on values.
#[cfg(test)]
pub fn assert_series_approx(actual: &[Option<f64>], expected: &[Option<f64>], epsilon: f64) {
    assert_eq!(actual.len(), expected.len(), "series length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        match (a, e) {
            (Some(a), Some(e)) => assert!(
                (a - e).abs() < epsilon,
                "bar {i}: actual={a}, expected={e}, epsilon={epsilon}"
            ),
            (None, None) => {}
            _ => panic!("bar {i}: definedness mismatch, actual={a:?}, expected={e:?}"),
        }
    }
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
