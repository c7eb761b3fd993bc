//! Run several strategies over the same input, each independently.

use tracing::warn;

use super::backtest::{BacktestConfig, BacktestResult, run_backtest};
use super::error::QuantsimError;
use super::ohlcv::PriceSeries;
use super::strategy::{Strategy, StrategyInput, StrategyKind};

#[derive(Debug)]
pub struct ComparisonEntry {
    pub name: String,
    pub outcome: Result<BacktestResult, QuantsimError>,
}

/// Default parameters for every strategy; pairs only when a pair is given.
pub fn default_lineup(with_pair: bool) -> Vec<Strategy> {
    StrategyKind::ALL
        .iter()
        .filter(|kind| with_pair || **kind != StrategyKind::Pairs)
        .map(|&kind| Strategy::default_for(kind))
        .collect()
}

/// Entries come back in input order. Pairs strategies are skipped when
/// `pair` is `None`; a failing run is recorded and the batch continues.
pub fn compare_strategies(
    prices: &PriceSeries,
    pair: Option<&PriceSeries>,
    strategies: &[Strategy],
    config: &BacktestConfig,
) -> Vec<ComparisonEntry> {
    strategies
        .iter()
        .filter_map(|strategy| {
            let input = match (strategy.requires_pair(), pair) {
                (true, Some(other)) => StrategyInput::Pair(prices, other),
                (true, None) => return None,
                (false, _) => StrategyInput::Single(prices),
            };
            let outcome = run_backtest(input, strategy, config);
            if let Err(err) = &outcome {
                warn!(strategy = %strategy, error = %err, "strategy run failed");
            }
            Some(ComparisonEntry {
                name: strategy.to_string(),
                outcome,
            })
        })
        .collect()
}
