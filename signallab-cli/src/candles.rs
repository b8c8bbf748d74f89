//! Candle CSV files.
//!
//! Format: header `open_time,open,high,low,close,volume`, RFC 3339 open times,
//! decimal strings for prices and volume.

use anyhow::{Context, Result};
use signallab_core::{Candle, CandleSeries};
use std::path::{Path, PathBuf};

pub fn read_candles(path: &Path) -> Result<Vec<Candle>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open candle CSV {}", path.display()))?;
    let mut candles = Vec::new();
    for (i, row) in reader.deserialize().enumerate() {
        let candle: Candle =
            row.with_context(|| format!("Bad candle row {} in {}", i + 1, path.display()))?;
        candles.push(candle);
    }
    Ok(candles)
}

/// Load a file as a series, sorting and dropping duplicate open times.
pub fn load_series(path: &Path, symbol: &str, timeframe: &str) -> Result<CandleSeries> {
    let candles = read_candles(path)?;
    let raw_len = candles.len();
    let series = CandleSeries::canonicalize(symbol, timeframe, candles);
    if series.len() != raw_len {
        tracing::warn!(
            path = %path.display(),
            dropped = raw_len - series.len(),
            "duplicate open times dropped"
        );
    }
    let insane = series.candles().iter().filter(|c| !c.is_sane()).count();
    if insane > 0 {
        tracing::warn!(path = %path.display(), insane, "candles fail OHLC sanity checks");
    }
    Ok(series)
}

pub fn write_candles(path: &Path, series: &CandleSeries) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create candle CSV {}", path.display()))?;
    for candle in series.candles() {
        writer.serialize(candle)?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write candle CSV {}", path.display()))?;
    Ok(())
}

/// Symbol implied by a file name: `BTC-USD.csv` → `BTC-USD`.
pub fn symbol_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "UNKNOWN".to_string())
}

/// Every `*.csv` file directly inside `dir`, sorted by name.
pub fn csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|e| e.eq_ignore_ascii_case("csv")) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
