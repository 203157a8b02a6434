//! CLI definition and dispatch.

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::analysis::{run_analysis, AnalysisReport};
use crate::domain::classifier::DEFAULT_SIGNIFICANCE_LEVEL;
use crate::domain::config_validation::{
    validate_analysis_config, validate_config, validate_demo_config,
};
use crate::domain::error::AcfTraderError;
use crate::domain::observation::ordered_values;
use crate::domain::returns::{to_returns, SeriesKind};
use crate::domain::strategy::{StrategyKind, WindowRule, DEFAULT_HOLDING, DEFAULT_LOOKBACK};
use crate::domain::synthetic::{generate_seeded, SyntheticConfig};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(
    name = "acftrader",
    about = "Lag-1 autocorrelation classifier and window-rule backtester"
)]
pub struct Cli {
    /// Log progress (info level)
    #[arg(short, long, global = true)]
    pub verbose: bool,
    /// Log everything (debug level)
    #[arg(long, global = true)]
    pub debug: bool,
    #[command(subcommand)]
    pub command: Command,
}

/// Window-rule overrides shared by `analyze` and `demo`.
#[derive(Args, Debug, Clone, Default)]
pub struct RuleArgs {
    /// momentum or mean_reversion
    #[arg(long)]
    pub strategy: Option<String>,
    #[arg(long)]
    pub lookback: Option<usize>,
    #[arg(long)]
    pub holding: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Classify and backtest a series loaded from CSV
    Analyze {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        series: Option<String>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// returns or prices
        #[arg(long)]
        kind: Option<String>,
        #[command(flatten)]
        rule: RuleArgs,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Classify and backtest a seeded synthetic Gaussian series
    Demo {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        length: Option<usize>,
        #[command(flatten)]
        rule: RuleArgs,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List series available in a data directory
    ListSeries {
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

pub fn init_logging(verbose: bool, debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Analyze {
            config,
            series,
            data_dir,
            kind,
            rule,
            output,
        } => run_analyze(
            config.as_deref(),
            series.as_deref(),
            data_dir.as_deref(),
            kind.as_deref(),
            &rule,
            output,
        ),
        Command::Demo {
            config,
            seed,
            length,
            rule,
            output,
        } => run_demo(config.as_deref(), seed, length, &rule, output),
        Command::Validate { config } => run_validate(&config),
        Command::ListSeries { data_dir, config } => {
            run_list_series(data_dir.as_deref(), config.as_deref())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: Option<&Path>) -> Result<FileConfigAdapter, AcfTraderError> {
    match path {
        Some(path) => {
            tracing::info!("Loading config from {}", path.display());
            FileConfigAdapter::from_file(path)
        }
        None => Ok(FileConfigAdapter::empty()),
    }
}

fn report_adapter(output: Option<PathBuf>) -> TextReportAdapter {
    match output {
        Some(path) => TextReportAdapter::to_file(path),
        None => TextReportAdapter::stdout(),
    }
}

fn window_from_config(config: &dyn ConfigPort, key: &str, default: usize) -> Result<usize, AcfTraderError> {
    let value = config.get_int("backtest", key, default as i64);
    usize::try_from(value)
        .ok()
        .filter(|&v| v >= 1)
        .ok_or_else(|| AcfTraderError::ConfigInvalid {
            section: "backtest".into(),
            key: key.into(),
            reason: format!("{key} must be at least 1"),
        })
}

/// Strategy and windows: CLI override, then config, then defaults.
pub fn build_window_rule(
    config: &dyn ConfigPort,
    overrides: &RuleArgs,
) -> Result<WindowRule, AcfTraderError> {
    let kind = match overrides
        .strategy
        .clone()
        .or_else(|| config.get_string("backtest", "strategy"))
    {
        Some(name) => name.parse::<StrategyKind>()?,
        None => StrategyKind::default(),
    };

    let lookback = match overrides.lookback {
        Some(v) => v,
        None => window_from_config(config, "lookback", DEFAULT_LOOKBACK)?,
    };
    let holding = match overrides.holding {
        Some(v) => v,
        None => window_from_config(config, "holding", DEFAULT_HOLDING)?,
    };

    WindowRule::new(kind, lookback, holding)
}

pub fn significance_level(config: &dyn ConfigPort) -> f64 {
    config.get_double("analysis", "significance_level", DEFAULT_SIGNIFICANCE_LEVEL)
}

pub fn build_synthetic_config(
    config: &dyn ConfigPort,
    seed: Option<u64>,
    length: Option<usize>,
) -> Result<SyntheticConfig, AcfTraderError> {
    let defaults = SyntheticConfig::default();

    let seed = match seed {
        Some(s) => s,
        None => {
            let raw = config.get_int("demo", "seed", defaults.seed as i64);
            u64::try_from(raw).map_err(|_| AcfTraderError::ConfigInvalid {
                section: "demo".into(),
                key: "seed".into(),
                reason: "seed must be non-negative".into(),
            })?
        }
    };
    let length = match length {
        Some(l) => l,
        None => {
            let raw = config.get_int("demo", "length", defaults.length as i64);
            usize::try_from(raw).map_err(|_| AcfTraderError::ConfigInvalid {
                section: "demo".into(),
                key: "length".into(),
                reason: "length must be at least 1".into(),
            })?
        }
    };

    Ok(SyntheticConfig {
        seed,
        length,
        mean: config.get_double("demo", "mean", defaults.mean),
        std_dev: config.get_double("demo", "std_dev", defaults.std_dev),
    })
}

pub fn resolve_series(series_override: Option<&str>, config: &dyn ConfigPort) -> Option<String> {
    series_override
        .map(str::to_string)
        .or_else(|| config.get_string("data", "series"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub fn resolve_data_dir(dir_override: Option<&Path>, config: &dyn ConfigPort) -> PathBuf {
    dir_override
        .map(Path::to_path_buf)
        .or_else(|| config.get_string("data", "directory").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn resolve_kind(
    kind_override: Option<&str>,
    config: &dyn ConfigPort,
) -> Result<SeriesKind, AcfTraderError> {
    match kind_override
        .map(str::to_string)
        .or_else(|| config.get_string("data", "kind"))
    {
        Some(kind) => kind.parse(),
        None => Ok(SeriesKind::default()),
    }
}

/// Load a series, convert it to returns, analyze it and publish the report.
pub fn run_analysis_pipeline(
    data_port: &dyn DataPort,
    report_port: &dyn ReportPort,
    series: &str,
    kind: SeriesKind,
    rule: &WindowRule,
    significance_level: f64,
) -> Result<AnalysisReport, AcfTraderError> {
    let observations = data_port.fetch_series(series)?;
    let values = ordered_values(&observations)?;
    let returns = to_returns(kind, &values)?;
    tracing::info!(
        series,
        %kind,
        observations = observations.len(),
        returns = returns.len(),
        "series prepared"
    );

    let report = run_analysis(series, &returns, rule, significance_level)?;
    log_report(&report);
    report_port.write(&report)?;
    Ok(report)
}

fn log_report(report: &AnalysisReport) {
    tracing::info!(
        acf1 = report.test.acf1,
        p_value = report.test.p_value,
        recommendation = %report.test.recommendation,
        "{}",
        report.test.recommendation.message()
    );
    tracing::debug!(
        rule = %report.backtest.rule,
        invested = report.backtest.periods_invested(),
        strategy_return = report.backtest.strategy_return,
        buy_and_hold_return = report.backtest.buy_and_hold_return,
        "backtest complete"
    );
}

fn run_analyze(
    config_path: Option<&Path>,
    series_override: Option<&str>,
    dir_override: Option<&Path>,
    kind_override: Option<&str>,
    rule_args: &RuleArgs,
    output: Option<PathBuf>,
) -> Result<(), AcfTraderError> {
    let config = load_config(config_path)?;
    validate_analysis_config(&config)?;

    let series = resolve_series(series_override, &config).ok_or_else(|| {
        AcfTraderError::ConfigMissing {
            section: "data".into(),
            key: "series".into(),
        }
    })?;
    let data_dir = resolve_data_dir(dir_override, &config);
    let kind = resolve_kind(kind_override, &config)?;
    let rule = build_window_rule(&config, rule_args)?;
    let level = significance_level(&config);

    tracing::info!("Analyzing {} from {} with {}", series, data_dir.display(), rule);

    let data_port = CsvAdapter::new(data_dir);
    run_analysis_pipeline(
        &data_port,
        &report_adapter(output),
        &series,
        kind,
        &rule,
        level,
    )?;
    Ok(())
}

pub fn run_demo_analysis(
    config: &dyn ConfigPort,
    seed: Option<u64>,
    length: Option<usize>,
    rule_args: &RuleArgs,
) -> Result<AnalysisReport, AcfTraderError> {
    let synthetic = build_synthetic_config(config, seed, length)?;
    let rule = build_window_rule(config, rule_args)?;
    let level = significance_level(config);

    tracing::info!(
        seed = synthetic.seed,
        length = synthetic.length,
        "generating synthetic returns"
    );
    let returns = generate_seeded(&synthetic)?;

    let name = format!("synthetic(seed={})", synthetic.seed);
    let report = run_analysis(&name, &returns, &rule, level)?;
    log_report(&report);
    Ok(report)
}

fn run_demo(
    config_path: Option<&Path>,
    seed: Option<u64>,
    length: Option<usize>,
    rule_args: &RuleArgs,
    output: Option<PathBuf>,
) -> Result<(), AcfTraderError> {
    let config = load_config(config_path)?;
    validate_demo_config(&config)?;

    let report = run_demo_analysis(&config, seed, length, rule_args)?;
    report_adapter(output).write(&report)
}

fn run_validate(config_path: &Path) -> Result<(), AcfTraderError> {
    eprintln!("Validating config: {}", config_path.display());
    let config = load_config(Some(config_path))?;
    validate_config(&config)?;

    let rule = build_window_rule(&config, &RuleArgs::default())?;
    let kind = resolve_kind(None, &config)?;
    let synthetic = build_synthetic_config(&config, None, None)?;

    eprintln!("\nData:");
    eprintln!("  directory: {}", resolve_data_dir(None, &config).display());
    eprintln!(
        "  series:    {}",
        resolve_series(None, &config).unwrap_or_else(|| "(not set)".into())
    );
    eprintln!("  kind:      {}", kind);
    eprintln!("\nAnalysis:");
    eprintln!("  significance level: {}", significance_level(&config));
    eprintln!("\nBacktest:");
    eprintln!("  rule: {}", rule);
    eprintln!("\nDemo:");
    eprintln!(
        "  seed {}, length {}, N({}, {})",
        synthetic.seed, synthetic.length, synthetic.mean, synthetic.std_dev
    );

    eprintln!("\nConfiguration is valid.");
    Ok(())
}

fn run_list_series(
    dir_override: Option<&Path>,
    config_path: Option<&Path>,
) -> Result<(), AcfTraderError> {
    let config = load_config(config_path)?;
    let data_dir = resolve_data_dir(dir_override, &config);
    let adapter = CsvAdapter::new(data_dir.clone());

    let names = adapter.list_series()?;
    if names.is_empty() {
        eprintln!("No series found in {}", data_dir.display());
    } else {
        for name in &names {
            println!("{}", name);
        }
        eprintln!("{} series found", names.len());
    }
    Ok(())
}
