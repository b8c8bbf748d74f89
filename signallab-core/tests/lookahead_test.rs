//! Look-ahead contamination tests for every indicator.
//!
//! Invariant: no indicator value at bar t may depend on price data from bar
//! t+1 or later.
//!
//! Method: compute on a truncated frame (bars 0..100) and the full frame
//! (bars 0..200). Bars 0..100 must be identical between both runs. Any
//! difference means the indicator is leaking future data into past values.

use signallab_core::calculator::IndicatorCalculator;
use signallab_core::config::IndicatorConfig;
use signallab_core::domain::PriceFrame;
use signallab_core::engine::analyze;
use signallab_core::indicator::Indicator;
use signallab_core::indicators::*;
use signallab_core::synthetic::{generate, SyntheticParams};

/// Generate N bars of OHLCV data with realistic variation.
fn make_test_frame(n: usize) -> PriceFrame {
    let mut frame = PriceFrame::default();
    let mut price = 100.0;

    for i in 0..n {
        // Deterministic pseudo-random walk using a simple LCG
        let seed = (i as u64).wrapping_mul(6364136223846793005).wrapping_add(1);
        let change = ((seed % 200) as f64 - 100.0) * 0.05; // -5.0 to +5.0
        price = f64::max(price + change, 10.0);

        let open = price - 0.5;
        let close = price + 0.3;
        frame.open.push(open);
        frame.high.push(open.max(close) + 2.0);
        frame.low.push(open.min(close) - 2.0);
        frame.close.push(close);
        frame.volume.push(1000.0 + ((i * 37) % 11) as f64 * 100.0);
    }

    frame
}

fn truncate(frame: &PriceFrame, len: usize) -> PriceFrame {
    PriceFrame {
        open: frame.open[..len].to_vec(),
        high: frame.high[..len].to_vec(),
        low: frame.low[..len].to_vec(),
        close: frame.close[..len].to_vec(),
        volume: frame.volume[..len].to_vec(),
    }
}

/// Assert that the indicator produces identical values for bars 0..truncated_len
/// whether computed on a truncated or full frame.
fn assert_no_lookahead(indicator: &dyn Indicator, full: &PriceFrame, truncated_len: usize) {
    let full_result = indicator.compute(full);
    let truncated_result = indicator.compute(&truncate(full, truncated_len));

    assert_eq!(
        truncated_result.len(),
        truncated_len,
        "{}: truncated result length mismatch",
        indicator.name()
    );
    assert_eq!(
        full_result.len(),
        full.len(),
        "{}: full result length mismatch",
        indicator.name()
    );

    for i in 0..truncated_len {
        match (truncated_result[i], full_result[i]) {
            (None, None) => {}
            (Some(t), Some(f)) => assert!(
                (t - f).abs() < 1e-10,
                "{}: look-ahead contamination at bar {i}: truncated={t}, full={f}, diff={}",
                indicator.name(),
                (t - f).abs()
            ),
            (t, f) => panic!(
                "{}: definedness mismatch at bar {i} (truncated={t:?}, full={f:?})",
                indicator.name()
            ),
        }
    }
}

#[test]
fn lookahead_ema() {
    let frame = make_test_frame(200);
    assert_no_lookahead(&Ema::new(10), &frame, 100);
    assert_no_lookahead(&Ema::new(50), &frame, 100);
    assert_no_lookahead(&PriceVsEma::new(50), &frame, 100);
}

#[test]
fn lookahead_adx() {
    let frame = make_test_frame(200);
    assert_no_lookahead(&Adx::new(14), &frame, 100);
    assert_no_lookahead(&Adx::plus_di(14), &frame, 100);
    assert_no_lookahead(&Adx::minus_di(7), &frame, 100);
}

#[test]
fn lookahead_macd() {
    let frame = make_test_frame(200);
    for line in [MacdLine::Line, MacdLine::Signal, MacdLine::Histogram, MacdLine::Cross] {
        assert_no_lookahead(&Macd::new(12, 26, 9, line), &frame, 100);
    }
}

#[test]
fn lookahead_oscillators() {
    let frame = make_test_frame(200);
    assert_no_lookahead(&Rsi::new(14), &frame, 100);
    assert_no_lookahead(&Stochastic::k(14, 3, 3), &frame, 100);
    assert_no_lookahead(&Stochastic::d(14, 3, 3), &frame, 100);
    assert_no_lookahead(&WilliamsR::new(14), &frame, 100);
    assert_no_lookahead(&Cci::new(14), &frame, 100);
}

#[test]
fn lookahead_momentum() {
    let frame = make_test_frame(200);
    assert_no_lookahead(&Momentum::cumulative_return(20), &frame, 100);
    assert_no_lookahead(&Momentum::sharpe_like(20), &frame, 100);
    assert_no_lookahead(&ReturnVolatility::new(20), &frame, 100);
}

#[test]
fn lookahead_bands() {
    let frame = make_test_frame(200);
    for band in [
        BollingerBand::Upper,
        BollingerBand::Middle,
        BollingerBand::Lower,
        BollingerBand::PercentB,
        BollingerBand::Bandwidth,
    ] {
        assert_no_lookahead(&Bollinger::new(20, 2.0, band), &frame, 100);
    }
    assert_no_lookahead(&Atr::new(14), &frame, 100);
    assert_no_lookahead(&Keltner::upper(20, 2.0), &frame, 100);
    assert_no_lookahead(&Keltner::middle(20, 2.0), &frame, 100);
    assert_no_lookahead(&Keltner::lower(20, 2.0), &frame, 100);
}

#[test]
fn lookahead_volume() {
    let frame = make_test_frame(200);
    assert_no_lookahead(&OnBalanceVolume, &frame, 100);
    assert_no_lookahead(&AccumulationDistribution, &frame, 100);
    assert_no_lookahead(&ChaikinMoneyFlow::new(20), &frame, 100);
    assert_no_lookahead(&VolumeZScore::new(20), &frame, 100);
    assert_no_lookahead(&Vwap, &frame, 100);
}

#[test]
fn lookahead_full_calculator() {
    let frame = make_test_frame(200);
    let calc = IndicatorCalculator::from_config(&IndicatorConfig::default());
    for indicator in calc.indicators() {
        assert_no_lookahead(indicator.as_ref(), &frame, 120);
    }
}

#[test]
fn truncated_analysis_matches_full_indicators() {
    let series = generate(&SyntheticParams {
        bars: 250,
        ..Default::default()
    });
    let config = IndicatorConfig::default();
    let full = analyze(&series, &config).unwrap();

    for len in [60, 120, 210] {
        let partial = analyze(&series.truncated(len), &config).unwrap();
        for (name, value) in &partial.latest {
            let expected = full.indicators.value_at(name, len - 1);
            match (value, expected) {
                (None, None) => {}
                (Some(a), Some(b)) => assert!((a - b).abs() < 1e-9, "{name} at {len}: {a} vs {b}"),
                (a, b) => panic!("{name} at {len}: {a:?} vs {b:?}"),
            }
        }
    }
}
