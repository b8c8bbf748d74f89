//! Candle, the fundamental market data unit, and the validated series of them.

use super::ids::DatasetHash;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// OHLCV candle for a single symbol and timeframe.
///
/// Prices and volume are exact decimals; indicator math converts them to `f64`
/// once, at the [`super::PriceFrame`] boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candle {
    pub open_time: DateTime<Utc>,
    #[serde(with = "rust_decimal::serde::str")]
    pub open: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub high: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub low: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub close: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub volume: Decimal,
}

impl Candle {
    pub fn new(
        open_time: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: Decimal,
    ) -> Self {
        Self {
            open_time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Basic OHLCV sanity check: high >= low, high >= open/close, low <= open/close,
    /// positive prices and non-negative volume.
    pub fn is_sane(&self) -> bool {
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > Decimal::ZERO
            && self.close > Decimal::ZERO
            && self.volume >= Decimal::ZERO
    }
}

/// Ordering violations detected by [`CandleSeries::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeriesError {
    #[error("candle {index} opens before its predecessor")]
    OutOfOrder { index: usize },

    #[error("candle {index} duplicates the open time of its predecessor")]
    Duplicate { index: usize },
}

/// Ordered, deduplicated candles for one symbol and timeframe.
///
/// Invariant: `open_time` is strictly ascending. Gaps are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandleSeries {
    symbol: String,
    timeframe: String,
    candles: Vec<Candle>,
}

impl CandleSeries {
    /// Build a series from candles that are already in order.
    ///
    /// Rejects out-of-order or duplicate open times rather than repairing them.
    pub fn new(
        symbol: impl Into<String>,
        timeframe: impl Into<String>,
        candles: Vec<Candle>,
    ) -> Result<Self, SeriesError> {
        for (i, pair) in candles.windows(2).enumerate() {
            if pair[1].open_time == pair[0].open_time {
                return Err(SeriesError::Duplicate { index: i + 1 });
            }
            if pair[1].open_time < pair[0].open_time {
                return Err(SeriesError::OutOfOrder { index: i + 1 });
            }
        }
        Ok(Self {
            symbol: symbol.into(),
            timeframe: timeframe.into(),
            candles,
        })
    }

    /// Build a series from raw provider output: sort by open time, then drop
    /// duplicate timestamps keeping the first occurrence.
    pub fn canonicalize(
        symbol: impl Into<String>,
        timeframe: impl Into<String>,
        mut candles: Vec<Candle>,
    ) -> Self {
        // Stable sort keeps the provider's first occurrence ahead of later duplicates.
        candles.sort_by_key(|c| c.open_time);
        candles.dedup_by_key(|c| c.open_time);
        Self {
            symbol: symbol.into(),
            timeframe: timeframe.into(),
            candles,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn timeframe(&self) -> &str {
        &self.timeframe
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    /// A prefix of this series, used to check that no value depends on later bars.
    pub fn truncated(&self, len: usize) -> Self {
        Self {
            symbol: self.symbol.clone(),
            timeframe: self.timeframe.clone(),
            candles: self.candles[..len.min(self.candles.len())].to_vec(),
        }
    }

    /// Content hash of the series (symbol, timeframe and every candle field).
    pub fn dataset_hash(&self) -> DatasetHash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.symbol.as_bytes());
        hasher.update(b"\0");
        hasher.update(self.timeframe.as_bytes());
        for c in &self.candles {
            hasher.update(b"\n");
            hasher.update(&c.open_time.timestamp_millis().to_le_bytes());
            for field in [c.open, c.high, c.low, c.close, c.volume] {
                hasher.update(b",");
                hasher.update(field.normalize().to_string().as_bytes());
            }
        }
        DatasetHash::from_hash(hasher.finalize().to_hex().as_str())
    }
}
