//! Backtest pipeline: strategy -> simulation -> metrics.

use tracing::info;

use super::error::QuantsimError;
use super::execution::{self, DEFAULT_COST_RATE, DEFAULT_INITIAL_CASH, ExecutionConfig};
use super::metrics::{DEFAULT_RISK_FREE_RATE, Metrics};
use super::portfolio::Simulation;
use super::series::SignaledSeries;
use super::strategy::{Strategy, StrategyInput};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BacktestConfig {
    pub initial_cash: f64,
    pub cost_rate: f64,
    pub risk_free_rate: f64,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        BacktestConfig {
            initial_cash: DEFAULT_INITIAL_CASH,
            cost_rate: DEFAULT_COST_RATE,
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
        }
    }
}

impl BacktestConfig {
    pub fn execution(&self) -> ExecutionConfig {
        ExecutionConfig {
            initial_cash: self.initial_cash,
            cost_rate: self.cost_rate,
        }
    }

    pub fn validate(&self) -> Result<(), QuantsimError> {
        self.execution().validate()?;
        if !self.risk_free_rate.is_finite() {
            return Err(QuantsimError::invalid("risk_free_rate", "must be finite"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub strategy: Strategy,
    pub series: SignaledSeries,
    pub simulation: Simulation,
    pub metrics: Metrics,
}

pub fn run_backtest(
    input: StrategyInput<'_>,
    strategy: &Strategy,
    config: &BacktestConfig,
) -> Result<BacktestResult, QuantsimError> {
    config.validate()?;

    let series = strategy.generate(input)?;
    info!(strategy = %strategy, label = %series.label, bars = series.len(), "running backtest");

    let simulation = execution::simulate(&series, &config.execution())?;
    let metrics = Metrics::from_simulation(&simulation, config.risk_free_rate)?;

    info!(
        strategy = %strategy,
        total_return = metrics.total_return,
        max_drawdown = metrics.max_drawdown,
        trades = metrics.trades,
        "backtest complete"
    );

    Ok(BacktestResult {
        strategy: strategy.clone(),
        series,
        simulation,
        metrics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ohlcv::PriceSeries;
    use crate::domain::strategy::StrategyKind;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn prices(closes: &[f64]) -> PriceSeries {
        PriceSeries::from_closes("TEST", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), closes)
            .unwrap()
    }

    #[test]
    fn defaults() {
        let c = BacktestConfig::default();
        assert_eq!(c.initial_cash, 10_000.0);
        assert_eq!(c.cost_rate, 0.0);
        assert_eq!(c.risk_free_rate, 0.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn invalid_cash_rejected() {
        let c = BacktestConfig {
            initial_cash: -1.0,
            ..BacktestConfig::default()
        };
        assert!(matches!(
            c.validate().unwrap_err(),
            QuantsimError::InvalidParameter { parameter: "initial_cash", .. }
        ));
    }

    #[test]
    fn buy_and_hold_tracks_price() {
        let p = prices(&[100.0, 110.0, 121.0]);
        let result = run_backtest(
            StrategyInput::Single(&p),
            &Strategy::BuyAndHold,
            &BacktestConfig::default(),
        )
        .unwrap();
        assert_relative_eq!(result.metrics.total_return, 0.21, epsilon = 1e-12);
        assert_eq!(result.metrics.trades, 1);
        assert_eq!(result.metrics.max_drawdown, 0.0);
        assert_eq!(result.series.len(), 3);
    }

    #[test]
    fn single_bar_is_insufficient() {
        let p = prices(&[100.0]);
        let err = run_backtest(
            StrategyInput::Single(&p),
            &Strategy::BuyAndHold,
            &BacktestConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, QuantsimError::InsufficientData { bars: 1, .. }));
    }

    #[test]
    fn strategy_errors_propagate() {
        let p = prices(&[1.0, 2.0, 3.0]);
        let result = run_backtest(
            StrategyInput::Single(&p),
            &Strategy::default_for(StrategyKind::Pairs),
            &BacktestConfig::default(),
        );
        assert!(result.is_err());
    }
}
