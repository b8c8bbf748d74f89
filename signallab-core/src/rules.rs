//! Rule vote: six independent threshold rules over the latest indicator
//! values, tallied into a BUY/SELL/HOLD majority.
//!
//! The vote runs alongside the weighted score and never feeds into it. It
//! gives a simple, explainable cross-check of the weighted decision.

use crate::config::ScoringConfig;
use crate::decision::Action;
use crate::indicator::IndicatorSet;
use crate::indicators::keys;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Net votes needed for the overall vote to leave HOLD.
pub const VOTE_MARGIN: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    Momentum,
    Volume,
    ReturnVolatility,
    Rsi,
    Bollinger,
    MacdCross,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vote {
    Buy,
    BuyStrong,
    Sell,
    SellStrong,
    Neutral,
}

impl Vote {
    pub fn is_buy(&self) -> bool {
        matches!(self, Vote::Buy | Vote::BuyStrong)
    }

    pub fn is_sell(&self) -> bool {
        matches!(self, Vote::Sell | Vote::SellStrong)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleVote {
    pub votes: BTreeMap<Rule, Vote>,
    pub buys: usize,
    pub sells: usize,
    pub overall: Action,
}

impl RuleVote {
    pub fn evaluate(indicators: &IndicatorSet, config: &ScoringConfig) -> Self {
        let latest = |key| indicators.latest(key);

        let momentum = match (latest(keys::MOMENTUM_CUMRET), latest(keys::MOMENTUM_SHARPE)) {
            (Some(cumret), Some(sharpe)) if cumret >= 0.10 && sharpe > 0.0 => Vote::Buy,
            _ => Vote::Neutral,
        };

        let volume = match latest(keys::VOLUME_Z) {
            Some(z) if z >= 1.0 => Vote::Buy,
            _ => Vote::Neutral,
        };

        let return_volatility = match latest(keys::RETURN_VOLATILITY) {
            Some(rv) if rv >= 1.0 => Vote::Buy,
            Some(rv) if rv <= -1.0 => Vote::Sell,
            _ => Vote::Neutral,
        };

        let rsi = match latest(keys::RSI) {
            Some(r) if r < 30.0 => Vote::Buy,
            Some(r) if r > 70.0 => Vote::Sell,
            _ => Vote::Neutral,
        };

        let bollinger = match (latest(keys::BB_PCT_B), latest(keys::BB_BANDWIDTH)) {
            (Some(b), Some(bw)) => {
                let strong = bw > config.strong_bandwidth;
                if b < 0.1 {
                    if strong {
                        Vote::BuyStrong
                    } else {
                        Vote::Buy
                    }
                } else if b > 0.9 {
                    if strong {
                        Vote::SellStrong
                    } else {
                        Vote::Sell
                    }
                } else {
                    Vote::Neutral
                }
            }
            _ => Vote::Neutral,
        };

        let macd_cross = match latest(keys::MACD_CROSS) {
            Some(c) if c > 0.0 => Vote::Buy,
            Some(c) if c < 0.0 => Vote::Sell,
            _ => Vote::Neutral,
        };

        Self::tally(BTreeMap::from([
            (Rule::Momentum, momentum),
            (Rule::Volume, volume),
            (Rule::ReturnVolatility, return_volatility),
            (Rule::Rsi, rsi),
            (Rule::Bollinger, bollinger),
            (Rule::MacdCross, macd_cross),
        ]))
    }

    pub fn tally(votes: BTreeMap<Rule, Vote>) -> Self {
        let buys = votes.values().filter(|v| v.is_buy()).count();
        let sells = votes.values().filter(|v| v.is_sell()).count();
        let net = buys as i32 - sells as i32;
        let overall = if net >= VOTE_MARGIN {
            Action::Buy
        } else if -net >= VOTE_MARGIN {
            Action::Sell
        } else {
            Action::Hold
        };
        Self {
            votes,
            buys,
            sells,
            overall,
        }
    }
}
