//! Analysis pipeline: candles in, indicators, regime, scores and a decision out.
//!
//! `analyze` is a pure function of its inputs. Running it twice on the same
//! series and configuration yields byte-identical JSON.

use crate::calculator::IndicatorCalculator;
use crate::config::IndicatorConfig;
use crate::decision::Signal;
use crate::domain::{CandleSeries, ConfigHash, DatasetHash, PriceFrame};
use crate::error::EngineError;
use crate::indicator::IndicatorSet;
use crate::indicators::keys;
use crate::regime::{self, RegimeInfo};
use crate::risk::{self, RiskAssessment};
use crate::rules::RuleVote;
use crate::scoring::ScoreVector;
use crate::weighting;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Shortest series `analyze` accepts.
pub const MIN_CANDLES: usize = 50;

/// Everything one analysis produces for one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub symbol: String,
    pub timeframe: String,
    /// Number of candles analyzed.
    pub bars: usize,
    pub indicators: IndicatorSet,
    /// Last-bar value of every indicator.
    pub latest: BTreeMap<String, Option<f64>>,
    pub regime: RegimeInfo,
    pub scores: ScoreVector,
    pub weighted_score: f64,
    pub signal: Signal,
    pub rule_vote: RuleVote,
    pub risk: RiskAssessment,
    pub config_fingerprint: ConfigHash,
    pub dataset_hash: DatasetHash,
}

/// Run the full pipeline over one candle series.
pub fn analyze(series: &CandleSeries, config: &IndicatorConfig) -> Result<Analysis, EngineError> {
    config.validate()?;

    if series.is_empty() {
        return Err(EngineError::EmptySeries);
    }
    if series.len() < MIN_CANDLES {
        return Err(EngineError::InsufficientData {
            required: MIN_CANDLES,
            actual: series.len(),
        });
    }

    let frame = PriceFrame::from_series(series);
    let calculator = IndicatorCalculator::from_config(config);
    let indicators = calculator.compute_frame(&frame);
    tracing::debug!(
        symbol = series.symbol(),
        bars = frame.len(),
        indicators = indicators.len(),
        warmup = calculator.warmup(),
        "indicators computed"
    );

    let regime = regime::detect(
        indicators.latest(keys::ADX),
        config.regime_high_threshold,
        config.regime_low_threshold,
    );
    let scores = ScoreVector::compute(&indicators, &config.scoring);
    let weighted_score = weighting::weighted_score(&scores, &config.weight_table, regime.regime);
    let signal = Signal::decide(weighted_score, regime.confidence);
    let rule_vote = RuleVote::evaluate(&indicators, &config.scoring);

    let close = frame.close.last().copied().unwrap_or_default();
    let risk = risk::assess(
        weighted_score,
        regime.confidence,
        indicators.latest(keys::ATR),
        close,
        &config.risk,
    );

    tracing::debug!(
        symbol = series.symbol(),
        regime = %regime.regime,
        adx = ?regime.adx,
        weighted_score,
        action = %signal.action,
        rule_vote = %rule_vote.overall,
        "analysis complete"
    );

    Ok(Analysis {
        symbol: series.symbol().to_string(),
        timeframe: series.timeframe().to_string(),
        bars: series.len(),
        latest: indicators.latest_snapshot(),
        indicators,
        regime,
        scores,
        weighted_score,
        signal,
        rule_vote,
        risk,
        config_fingerprint: config.fingerprint(),
        dataset_hash: series.dataset_hash(),
    })
}

/// Analyze many series in parallel. Results keep the input order and are
/// keyed by symbol; one failing series does not affect the others.
pub fn analyze_many(
    series: &[CandleSeries],
    config: &IndicatorConfig,
) -> Vec<(String, Result<Analysis, EngineError>)> {
    let results: Vec<_> = series
        .par_iter()
        .map(|s| (s.symbol().to_string(), analyze(s, config)))
        .collect();

    let failed = results.iter().filter(|(_, r)| r.is_err()).count();
    tracing::info!(
        series = results.len(),
        failed,
        "batch analysis complete"
    );
    results
}
