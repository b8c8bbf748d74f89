//! SignalLab CLI: analyze candle files, batch runs and synthetic data.
//!
//! Commands:
//! - `analyze`: run the engine on one candle CSV and emit the analysis JSON
//! - `batch`: analyze every CSV in a directory in parallel
//! - `synthetic`: write a deterministic random-walk candle CSV
//! - `config`: print the default engine configuration as TOML

mod candles;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use signallab_core::synthetic::{generate, SyntheticParams};
use signallab_core::{analyze, analyze_many, Analysis, CandleSeries, IndicatorConfig};
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "signallab",
    about = "SignalLab CLI: technical indicators, market regime and trading signals"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one candle CSV file.
    Analyze {
        /// Candle CSV (open_time,open,high,low,close,volume).
        #[arg(long)]
        candles: PathBuf,

        /// Symbol. Defaults to the file name without extension.
        #[arg(long)]
        symbol: Option<String>,

        /// Candle timeframe label (e.g., 1h, 4h, 1d).
        #[arg(long, default_value = "1d")]
        timeframe: String,

        /// Engine configuration TOML. Defaults to the built-in configuration.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the analysis JSON here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON.
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
    /// Analyze every *.csv file in a directory in parallel.
    Batch {
        /// Directory of candle CSV files, one symbol per file.
        #[arg(long)]
        dir: PathBuf,

        /// Candle timeframe label shared by every file.
        #[arg(long, default_value = "1d")]
        timeframe: String,

        /// Engine configuration TOML.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory for one <symbol>.json per analysis.
        #[arg(long, default_value = "analyses")]
        output_dir: PathBuf,
    },
    /// Generate deterministic synthetic candles.
    Synthetic {
        /// Number of candles.
        #[arg(long, default_value_t = 200)]
        bars: usize,

        /// RNG seed.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Symbol; also seeds the RNG together with --seed.
        #[arg(long, default_value = "SYNTH")]
        symbol: String,

        /// Mean per-bar return.
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        drift: f64,

        /// Half-width of the per-bar return distribution.
        #[arg(long, default_value_t = 0.02)]
        volatility: f64,

        /// Output CSV path.
        #[arg(long)]
        output: PathBuf,
    },
    /// Print the default configuration as TOML.
    Config,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            candles,
            symbol,
            timeframe,
            config,
            output,
            pretty,
        } => run_analyze(&candles, symbol, &timeframe, config.as_deref(), output.as_deref(), pretty),
        Commands::Batch {
            dir,
            timeframe,
            config,
            output_dir,
        } => run_batch(&dir, &timeframe, config.as_deref(), &output_dir),
        Commands::Synthetic {
            bars,
            seed,
            symbol,
            drift,
            volatility,
            output,
        } => run_synthetic(bars, seed, symbol, drift, volatility, &output),
        Commands::Config => {
            print!("{}", IndicatorConfig::default().to_toml_string()?);
            Ok(())
        }
    }
}

/// Human-readable logs on stderr, filtered by `RUST_LOG` (default `info`).
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn load_config(path: Option<&Path>) -> Result<IndicatorConfig> {
    match path {
        Some(path) => IndicatorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(IndicatorConfig::default()),
    }
}

fn to_json(analysis: &Analysis, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(analysis)
    } else {
        serde_json::to_string(analysis)
    };
    json.context("Failed to serialize analysis")
}

fn run_analyze(
    candles_path: &Path,
    symbol: Option<String>,
    timeframe: &str,
    config_path: Option<&Path>,
    output: Option<&Path>,
    pretty: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let symbol = symbol.unwrap_or_else(|| candles::symbol_from_path(candles_path));
    let series = candles::load_series(candles_path, &symbol, timeframe)?;

    let analysis = analyze(&series, &config)
        .with_context(|| format!("Analysis failed for {symbol}"))?;
    let json = to_json(&analysis, pretty)?;

    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write analysis {}", path.display()))?;
            print_summary(&analysis);
            println!("Analysis saved to: {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn run_batch(
    dir: &Path,
    timeframe: &str,
    config_path: Option<&Path>,
    output_dir: &Path,
) -> Result<()> {
    let config = load_config(config_path)?;
    let files = candles::csv_files(dir)?;
    if files.is_empty() {
        bail!("no *.csv files found in {}", dir.display());
    }

    let loaded: Vec<(PathBuf, Result<CandleSeries>)> = files
        .into_par_iter()
        .map(|path| {
            let symbol = candles::symbol_from_path(&path);
            let series = candles::load_series(&path, &symbol, timeframe);
            (path, series)
        })
        .collect();

    let mut all = Vec::with_capacity(loaded.len());
    let mut failed = 0usize;
    for (path, series) in loaded {
        match series {
            Ok(series) => all.push(series),
            Err(err) => {
                failed += 1;
                tracing::error!(path = %path.display(), "{err:#}");
            }
        }
    }

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output dir {}", output_dir.display()))?;

    println!();
    println!("{:<12} {:<11} {:>9} {:<6} {:>10}", "Symbol", "Regime", "Score", "Action", "Rule vote");
    println!("{}", "-".repeat(52));
    for (symbol, result) in analyze_many(&all, &config) {
        match result {
            Ok(analysis) => {
                let path = output_dir.join(format!("{symbol}.json"));
                std::fs::write(&path, to_json(&analysis, true)?)
                    .with_context(|| format!("Failed to write analysis {}", path.display()))?;
                println!(
                    "{:<12} {:<11} {:>9.4} {:<6} {:>10}",
                    symbol,
                    analysis.regime.regime,
                    analysis.weighted_score,
                    analysis.signal.action,
                    analysis.rule_vote.overall
                );
            }
            Err(err) => {
                failed += 1;
                println!("{symbol:<12} ERROR: {err}");
            }
        }
    }
    println!();
    println!("Analyses saved to: {}", output_dir.display());

    if failed > 0 {
        bail!("{failed} series failed");
    }
    Ok(())
}

fn run_synthetic(
    bars: usize,
    seed: u64,
    symbol: String,
    drift: f64,
    volatility: f64,
    output: &Path,
) -> Result<()> {
    if !(volatility.is_finite() && volatility >= 0.0) {
        bail!("--volatility must be a finite non-negative number, got {volatility}");
    }
    let series = generate(&SyntheticParams {
        symbol,
        bars,
        seed,
        drift,
        volatility,
        ..Default::default()
    });
    candles::write_candles(output, &series)?;
    tracing::info!(
        symbol = series.symbol(),
        bars = series.len(),
        dataset_hash = %series.dataset_hash(),
        "synthetic candles written"
    );
    println!("Wrote {} candles to {}", series.len(), output.display());
    Ok(())
}

fn print_summary(analysis: &Analysis) {
    println!();
    println!("=== Analysis ===");
    println!("Symbol:         {} ({})", analysis.symbol, analysis.timeframe);
    println!("Bars:           {}", analysis.bars);
    match analysis.regime.adx {
        Some(adx) => println!(
            "Regime:         {} (ADX {:.1}, confidence {:.2})",
            analysis.regime.regime, adx, analysis.regime.confidence
        ),
        None => println!("Regime:         {}", analysis.regime.regime),
    }
    println!();
    println!("--- Scores ---");
    for (category, score) in analysis.scores.iter() {
        println!("{:<18} {:>7.3}", category, score);
    }
    println!();
    println!("--- Signal ---");
    println!("Weighted score: {:.4}", analysis.weighted_score);
    println!(
        "Action:         {} ({:.0}% position)",
        analysis.signal.action, analysis.signal.position_percentage
    );
    println!("Confidence:     {:.2}", analysis.signal.confidence);
    println!(
        "Rule vote:      {} ({} buy / {} sell)",
        analysis.rule_vote.overall, analysis.rule_vote.buys, analysis.rule_vote.sells
    );
    println!(
        "Stop loss:      {:.4} ({:.2}%)",
        analysis.risk.stop_loss_price, analysis.risk.stop_loss_pct
    );
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_synthetic(dir: &Path, symbol: &str, bars: usize) -> PathBuf {
        let path = dir.join(format!("{symbol}.csv"));
        run_synthetic(bars, 7, symbol.to_string(), 0.001, 0.02, &path).unwrap();
        path
    }

    #[test]
    fn cli_parses_analyze() {
        let cli = Cli::try_parse_from([
            "signallab",
            "analyze",
            "--candles",
            "BTC.csv",
            "--timeframe",
            "4h",
            "--pretty",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze {
                candles,
                symbol,
                timeframe,
                pretty,
                ..
            } => {
                assert_eq!(candles, PathBuf::from("BTC.csv"));
                assert_eq!(symbol, None);
                assert_eq!(timeframe, "4h");
                assert!(pretty);
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn cli_accepts_negative_drift() {
        let cli = Cli::try_parse_from([
            "signallab", "synthetic", "--drift", "-0.01", "--output", "x.csv",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Synthetic { drift, .. } if drift == -0.01));
    }

    #[test]
    fn analyze_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let candles = write_synthetic(dir.path(), "ETH", 120);
        let output = dir.path().join("eth.json");

        run_analyze(&candles, None, "1h", None, Some(&output), false).unwrap();

        let analysis: Analysis =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(analysis.symbol, "ETH");
        assert_eq!(analysis.timeframe, "1h");
        assert_eq!(analysis.bars, 120);
    }

    #[test]
    fn analyze_uses_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let candles = write_synthetic(dir.path(), "ETH", 120);
        let config_path = dir.path().join("engine.toml");
        std::fs::write(&config_path, "rsi_period = 7\nema_periods = [5, 10, 30]\n").unwrap();
        let output = dir.path().join("eth.json");

        run_analyze(&candles, Some("ETH-USD".into()), "1h", Some(&config_path), Some(&output), true)
            .unwrap();

        let analysis: Analysis =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(analysis.symbol, "ETH-USD");
        assert!(analysis.latest.contains_key("ema_5"));
        let expected = IndicatorConfig::load(&config_path).unwrap().fingerprint();
        assert_eq!(analysis.config_fingerprint, expected);
    }

    #[test]
    fn analyze_rejects_short_file() {
        let dir = tempfile::tempdir().unwrap();
        let candles = write_synthetic(dir.path(), "TINY", 20);
        let err = run_analyze(&candles, None, "1h", None, None, false).unwrap_err();
        assert!(format!("{err:#}").contains("insufficient data"), "{err:#}");
    }

    #[test]
    fn invalid_config_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("bad.toml");
        std::fs::write(&config_path, "macd_fast = 30\n").unwrap();
        let err = load_config(Some(&config_path)).unwrap_err();
        assert!(format!("{err:#}").contains("MACD"), "{err:#}");
    }

    #[test]
    fn batch_writes_one_json_per_symbol() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("candles");
        std::fs::create_dir(&input).unwrap();
        for symbol in ["AAA", "BBB", "CCC"] {
            write_synthetic(&input, symbol, 80);
        }
        let output = dir.path().join("out");

        run_batch(&input, "1h", None, &output).unwrap();

        for symbol in ["AAA", "BBB", "CCC"] {
            let text = std::fs::read_to_string(output.join(format!("{symbol}.json"))).unwrap();
            let analysis: Analysis = serde_json::from_str(&text).unwrap();
            assert_eq!(analysis.symbol, symbol);
        }
    }

    #[test]
    fn batch_fails_when_a_series_fails() {
        let dir = tempfile::tempdir().unwrap();
        write_synthetic(dir.path(), "LONG", 80);
        write_synthetic(dir.path(), "SHORT", 10);
        let output = dir.path().join("out");

        let err = run_batch(dir.path(), "1h", None, &output).unwrap_err();
        assert!(err.to_string().contains("1 series failed"));
        assert!(output.join("LONG.json").exists());
    }

    #[test]
    fn synthetic_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");
        run_synthetic(50, 3, "X".into(), 0.0, 0.02, &a).unwrap();
        run_synthetic(50, 3, "X".into(), 0.0, 0.02, &b).unwrap();
        assert_eq!(std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());
        assert!(run_synthetic(50, 3, "X".into(), 0.0, -1.0, &a).is_err());
    }
}
