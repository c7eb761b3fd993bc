//! Configuration reading and validation.
//!
//! Keys that are absent fall back to defaults. Keys that are present but
//! unparsable are `ConfigInvalid`. Range and cross-field rules belong to the
//! domain types and surface as `InvalidParameter`.

use crate::domain::backtest::BacktestConfig;
use crate::domain::error::QuantsimError;
use crate::domain::execution::{DEFAULT_COST_RATE, DEFAULT_INITIAL_CASH};
use crate::domain::metrics::DEFAULT_RISK_FREE_RATE;
use crate::domain::strategy::{Strategy, StrategyKind};
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub const BACKTEST_SECTION: &str = "backtest";

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> QuantsimError {
    QuantsimError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn present(config: &dyn ConfigPort, section: &str, key: &str) -> Option<String> {
    config
        .get_string(section, key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn read_f64(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: f64,
) -> Result<f64, QuantsimError> {
    match present(config, section, key) {
        None => Ok(default),
        Some(raw) => match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(invalid(section, key, format!("expected a number, got {raw:?}"))),
        },
    }
}

pub fn read_usize(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: usize,
) -> Result<usize, QuantsimError> {
    match present(config, section, key) {
        None => Ok(default),
        Some(raw) => raw.parse::<usize>().map_err(|_| {
            invalid(
                section,
                key,
                format!("expected a non-negative integer, got {raw:?}"),
            )
        }),
    }
}

/// `[backtest]` initial_cash, cost_rate, risk_free_rate.
pub fn read_backtest_config(config: &dyn ConfigPort) -> Result<BacktestConfig, QuantsimError> {
    let backtest = BacktestConfig {
        initial_cash: read_f64(config, BACKTEST_SECTION, "initial_cash", DEFAULT_INITIAL_CASH)?,
        cost_rate: read_f64(config, BACKTEST_SECTION, "cost_rate", DEFAULT_COST_RATE)?,
        risk_free_rate: read_f64(
            config,
            BACKTEST_SECTION,
            "risk_free_rate",
            DEFAULT_RISK_FREE_RATE,
        )?,
    };
    backtest.validate()?;
    Ok(backtest)
}

/// Strategy of `kind`, parameters from its section over the defaults.
/// Cross-field rules are left to [`Strategy::validate`] so that callers can
/// layer further overrides first.
pub fn read_strategy_params(
    config: &dyn ConfigPort,
    kind: StrategyKind,
) -> Result<Strategy, QuantsimError> {
    let section = kind.section();
    let strategy = match Strategy::default_for(kind) {
        Strategy::TrendFollowing {
            short_window,
            long_window,
        } => Strategy::TrendFollowing {
            short_window: read_usize(config, section, "short_window", short_window)?,
            long_window: read_usize(config, section, "long_window", long_window)?,
        },
        Strategy::BuyAndHold => Strategy::BuyAndHold,
        Strategy::Rsi {
            period,
            lower,
            upper,
        } => Strategy::Rsi {
            period: read_usize(config, section, "period", period)?,
            lower: read_f64(config, section, "lower", lower)?,
            upper: read_f64(config, section, "upper", upper)?,
        },
        Strategy::Bollinger { window, num_std } => Strategy::Bollinger {
            window: read_usize(config, section, "window", window)?,
            num_std: read_f64(config, section, "num_std", num_std)?,
        },
        Strategy::Pairs {
            lookback,
            entry_z,
            exit_z,
        } => Strategy::Pairs {
            lookback: read_usize(config, section, "lookback", lookback)?,
            entry_z: read_f64(config, section, "entry_z", entry_z)?,
            exit_z: read_f64(config, section, "exit_z", exit_z)?,
        },
    };
    Ok(strategy)
}

pub fn parse_date(value: &str, field: &str) -> Result<NaiveDate, QuantsimError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        invalid(
            BACKTEST_SECTION,
            field,
            format!("invalid {field} format, expected YYYY-MM-DD"),
        )
    })
}

pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), QuantsimError> {
    if start >= end {
        return Err(invalid(
            BACKTEST_SECTION,
            "start_date",
            "start_date must be before end_date",
        ));
    }
    Ok(())
}
