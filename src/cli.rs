//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

use crate::adapters::console_report::ConsoleReport;
use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::memory_store::CachedDataPort;
use crate::domain::backtest::{BacktestConfig, run_backtest};
use crate::domain::compare::{compare_strategies, default_lineup};
use crate::domain::config_validation::{
    BACKTEST_SECTION, parse_date, read_backtest_config, read_strategy_params, validate_date_range,
};
use crate::domain::error::QuantsimError;
use crate::domain::ohlcv::PriceSeries;
use crate::domain::strategy::{Strategy, StrategyInput, StrategyKind};
use crate::logging::init_logging;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Parser, Debug)]
#[command(name = "quantsim", about = "Backtest signal-driven trading strategies")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
    /// Debug-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one strategy and print its metrics and fills
    Backtest {
        #[command(flatten)]
        run: RunArgs,
        #[arg(short, long, value_enum, default_value_t = StrategyArg::TrendFollowing)]
        strategy: StrategyArg,
    },
    /// Run every strategy over the same data and print one row each
    Compare {
        #[command(flatten)]
        run: RunArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[arg(short, long)]
    pub ticker: String,
    /// Second leg for pairs trading
    #[arg(long)]
    pub pair_ticker: Option<String>,
    /// YYYY-MM-DD; falls back to [backtest] start_date
    #[arg(long)]
    pub start: Option<NaiveDate>,
    /// YYYY-MM-DD; falls back to [backtest] end_date
    #[arg(long)]
    pub end: Option<NaiveDate>,
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Directory of <TICKER>.csv files
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
    #[arg(long)]
    pub initial_cash: Option<f64>,
    #[arg(long)]
    pub cost_rate: Option<f64>,
    #[command(flatten)]
    pub params: StrategyParams,
}

/// Strategy parameters from the command line. Each one set here wins over
/// the strategy's config section.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct StrategyParams {
    #[arg(long)]
    pub short_window: Option<usize>,
    #[arg(long)]
    pub long_window: Option<usize>,
    #[arg(long)]
    pub rsi_period: Option<usize>,
    /// RSI buy threshold
    #[arg(long)]
    pub rsi_lower: Option<f64>,
    /// RSI sell threshold
    #[arg(long)]
    pub rsi_upper: Option<f64>,
    #[arg(long)]
    pub bollinger_window: Option<usize>,
    /// Band width in standard deviations
    #[arg(long)]
    pub bollinger_std: Option<f64>,
}

impl StrategyParams {
    pub fn apply(&self, strategy: Strategy) -> Strategy {
        match strategy {
            Strategy::TrendFollowing {
                short_window,
                long_window,
            } => Strategy::TrendFollowing {
                short_window: self.short_window.unwrap_or(short_window),
                long_window: self.long_window.unwrap_or(long_window),
            },
            Strategy::Rsi {
                period,
                lower,
                upper,
            } => Strategy::Rsi {
                period: self.rsi_period.unwrap_or(period),
                lower: self.rsi_lower.unwrap_or(lower),
                upper: self.rsi_upper.unwrap_or(upper),
            },
            Strategy::Bollinger { window, num_std } => Strategy::Bollinger {
                window: self.bollinger_window.unwrap_or(window),
                num_std: self.bollinger_std.unwrap_or(num_std),
            },
            other => other,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyArg {
    TrendFollowing,
    BuyAndHold,
    Rsi,
    Bollinger,
    Pairs,
}

impl From<StrategyArg> for StrategyKind {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::TrendFollowing => StrategyKind::TrendFollowing,
            StrategyArg::BuyAndHold => StrategyKind::BuyAndHold,
            StrategyArg::Rsi => StrategyKind::Rsi,
            StrategyArg::Bollinger => StrategyKind::Bollinger,
            StrategyArg::Pairs => StrategyKind::Pairs,
        }
    }
}

pub fn run(cli: Cli) -> ExitCode {
    init_logging(cli.verbose);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = match &cli.command {
        Command::Backtest {
            run: args,
            strategy,
        } => run_with_csv(args, |port, config| {
            execute_backtest(port, config, args, (*strategy).into(), &mut out)
        }),
        Command::Compare { run: args } => run_with_csv(args, |port, config| {
            execute_compare(port, config, args, &mut out)
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(&err)
        }
    }
}

fn run_with_csv<F>(args: &RunArgs, body: F) -> Result<(), QuantsimError>
where
    F: FnOnce(&dyn DataPort, &dyn ConfigPort) -> Result<(), QuantsimError>,
{
    let config = load_config(args.config.as_deref())?;
    let dir = resolve_data_dir(&config, args.data_dir.as_deref());
    info!(data_dir = %dir.display(), "reading price data");
    let port = CachedDataPort::new(CsvAdapter::new(dir));
    let port: &dyn DataPort = &port;
    body(port, &config)
}

pub fn load_config(path: Option<&Path>) -> Result<FileConfigAdapter, QuantsimError> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            FileConfigAdapter::from_file(path)
        }
        None => Ok(FileConfigAdapter::empty()),
    }
}

/// `--data-dir`, then `[backtest] data_dir`, then `data`.
pub fn resolve_data_dir(config: &dyn ConfigPort, flag: Option<&Path>) -> PathBuf {
    flag.map(Path::to_path_buf)
        .or_else(|| {
            config
                .get_string(BACKTEST_SECTION, "data_dir")
                .filter(|d| !d.trim().is_empty())
                .map(PathBuf::from)
        })
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

/// File values with `--initial-cash` / `--cost-rate` applied on top.
pub fn build_backtest_config(
    config: &dyn ConfigPort,
    args: &RunArgs,
) -> Result<BacktestConfig, QuantsimError> {
    let mut backtest = read_backtest_config(config)?;
    if let Some(cash) = args.initial_cash {
        backtest.initial_cash = cash;
    }
    if let Some(rate) = args.cost_rate {
        backtest.cost_rate = rate;
    }
    backtest.validate()?;
    Ok(backtest)
}

/// Config section values with the command-line parameters applied on top.
pub fn build_strategy(
    kind: StrategyKind,
    config: &dyn ConfigPort,
    params: &StrategyParams,
) -> Result<Strategy, QuantsimError> {
    let strategy = params.apply(read_strategy_params(config, kind)?);
    strategy.validate()?;
    Ok(strategy)
}

pub fn resolve_dates(
    config: &dyn ConfigPort,
    args: &RunArgs,
) -> Result<(NaiveDate, NaiveDate), QuantsimError> {
    let date = |flag: Option<NaiveDate>, key: &str| -> Result<NaiveDate, QuantsimError> {
        if let Some(d) = flag {
            return Ok(d);
        }
        match config.get_string(BACKTEST_SECTION, key) {
            Some(raw) => parse_date(&raw, key),
            None => Err(QuantsimError::ConfigMissing {
                section: BACKTEST_SECTION.to_string(),
                key: key.to_string(),
            }),
        }
    };
    let start = date(args.start, "start_date")?;
    let end = date(args.end, "end_date")?;
    validate_date_range(start, end)?;
    Ok((start, end))
}

/// `--pair-ticker` is only fetched when `with_pair` is set.
pub fn fetch_inputs(
    port: &dyn DataPort,
    config: &dyn ConfigPort,
    args: &RunArgs,
    with_pair: bool,
) -> Result<(PriceSeries, Option<PriceSeries>), QuantsimError> {
    let (start, end) = resolve_dates(config, args)?;
    let prices = port.fetch_series(&args.ticker, start, end)?;
    let pair = args
        .pair_ticker
        .as_deref()
        .filter(|_| with_pair)
        .map(|ticker| port.fetch_series(ticker, start, end))
        .transpose()?;
    info!(ticker = %args.ticker, bars = prices.len(), "loaded price series");
    Ok((prices, pair))
}

pub fn execute_backtest(
    port: &dyn DataPort,
    config: &dyn ConfigPort,
    args: &RunArgs,
    kind: StrategyKind,
    out: &mut dyn Write,
) -> Result<(), QuantsimError> {
    let backtest = build_backtest_config(config, args)?;
    let strategy = build_strategy(kind, config, &args.params)?;
    let (prices, pair) = fetch_inputs(port, config, args, strategy.requires_pair())?;

    let input = match &pair {
        Some(other) => StrategyInput::Pair(&prices, other),
        None => StrategyInput::Single(&prices),
    };
    let result = run_backtest(input, &strategy, &backtest)?;
    ConsoleReport::default().write_backtest(&result, out)
}

pub fn execute_compare(
    port: &dyn DataPort,
    config: &dyn ConfigPort,
    args: &RunArgs,
    out: &mut dyn Write,
) -> Result<(), QuantsimError> {
    let backtest = build_backtest_config(config, args)?;
    let (prices, pair) = fetch_inputs(port, config, args, true)?;

    let strategies = default_lineup(pair.is_some())
        .iter()
        .map(|s| build_strategy(s.kind(), config, &args.params))
        .collect::<Result<Vec<_>, _>>()?;
    let entries = compare_strategies(&prices, pair.as_ref(), &strategies, &backtest);
    ConsoleReport::default().write_comparison(&entries, out)
}
