//! Performance metrics over a portfolio-value curve.

use std::fmt;

use super::error::QuantsimError;
use super::indicator::stddev::sample_stddev;
use super::portfolio::{PortfolioRecord, Simulation};

pub const DEFAULT_RISK_FREE_RATE: f64 = 0.0;
const MIN_RECORDS: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    /// V_last / V_first - 1, as a fraction.
    pub total_return: f64,
    /// Most negative V_t / running_max - 1; zero when the curve never dips.
    pub max_drawdown: f64,
    /// `None` when return variance is zero or undefined.
    pub sharpe: Option<f64>,
    /// Number of return observations.
    pub trading_days: usize,
    pub trades: usize,
}

impl Metrics {
    /// `risk_free_rate` is per period, matching the return frequency.
    pub fn compute(records: &[PortfolioRecord], risk_free_rate: f64) -> Result<Self, QuantsimError> {
        if !risk_free_rate.is_finite() {
            return Err(QuantsimError::invalid("risk_free_rate", "must be finite"));
        }
        if records.len() < MIN_RECORDS {
            return Err(QuantsimError::InsufficientData {
                bars: records.len(),
                minimum: MIN_RECORDS,
            });
        }

        let values: Vec<f64> = records.iter().map(|r| r.portfolio_value).collect();
        let first = values[0];
        let last = values[values.len() - 1];
        let total_return = last / first - 1.0;

        let returns = simple_returns(&values);
        let sharpe = if first == 0.0 {
            None
        } else {
            sharpe_ratio(&returns, risk_free_rate)
        };

        Ok(Metrics {
            total_return,
            max_drawdown: max_drawdown(&values),
            sharpe,
            trading_days: returns.len(),
            trades: 0,
        })
    }

    pub fn from_simulation(simulation: &Simulation, risk_free_rate: f64) -> Result<Self, QuantsimError> {
        let mut metrics = Self::compute(&simulation.records, risk_free_rate)?;
        metrics.trades = simulation.fills.len();
        Ok(metrics)
    }

    pub fn record(&self) -> MetricsRecord {
        MetricsRecord {
            total_return_pct: round2(self.total_return * 100.0),
            max_drawdown_pct: round2(self.max_drawdown * 100.0),
            sharpe_ratio: match self.sharpe {
                Some(s) => SharpeRatio::Value(round2(s)),
                None => SharpeRatio::NotApplicable,
            },
        }
    }
}

/// r_t = V_t / V_{t-1} - 1 for t >= 1.
pub fn simple_returns(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] / w[0] - 1.0).collect()
}

pub fn max_drawdown(values: &[f64]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut worst = 0.0_f64;
    for &value in values {
        peak = peak.max(value);
        if peak > 0.0 {
            worst = worst.min(value / peak - 1.0);
        }
    }
    worst
}

/// (mean - rf) / sample_std * sqrt(N).
pub fn sharpe_ratio(returns: &[f64], risk_free_rate: f64) -> Option<f64> {
    if returns.len() < 2 {
        return None;
    }
    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let std = sample_stddev(returns);

    if std == 0.0 || !std.is_finite() {
        return None;
    }
    let sharpe = (mean - risk_free_rate) / std * n.sqrt();
    sharpe.is_finite().then_some(sharpe)
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SharpeRatio {
    Value(f64),
    NotApplicable,
}

impl fmt::Display for SharpeRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SharpeRatio::Value(v) => write!(f, "{v:.2}"),
            SharpeRatio::NotApplicable => f.write_str("N/A"),
        }
    }
}

/// Reporting view, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsRecord {
    pub total_return_pct: f64,
    pub max_drawdown_pct: f64,
    pub sharpe_ratio: SharpeRatio,
}
