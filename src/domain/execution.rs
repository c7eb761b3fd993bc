//! Bar-by-bar replay of a signaled series (long-only, all-in or all-out).
//!
//! The position is a two-state automaton:
//!
//! | state | signal | transition                                        |
//! |-------|--------|---------------------------------------------------|
//! | Flat  | +1     | buy: cost = cash * rate, units = (cash - cost) / p |
//! | Long  | -1     | sell: cash = units * p * (1 - rate)               |
//! | any   | other  | no change                                         |
//!
//! Every bar records `cash + units * close` whether or not a trade happened.
//! A spread column may go negative, in which case `units` is negative too and
//! the arithmetic is unchanged.

use tracing::debug;

use super::error::QuantsimError;
use super::portfolio::{Fill, PortfolioRecord, Side, Simulation};
use super::series::{PriceColumn, SignaledBar, SignaledSeries};
use super::signal::Signal;

pub const DEFAULT_INITIAL_CASH: f64 = 10_000.0;
pub const DEFAULT_COST_RATE: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExecutionConfig {
    pub initial_cash: f64,
    /// Fraction of each leg's notional paid as cost, e.g. 0.001 for 10 bps.
    pub cost_rate: f64,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        ExecutionConfig {
            initial_cash: DEFAULT_INITIAL_CASH,
            cost_rate: DEFAULT_COST_RATE,
        }
    }
}

impl ExecutionConfig {
    pub fn validate(&self) -> Result<(), QuantsimError> {
        if !(self.initial_cash.is_finite() && self.initial_cash > 0.0) {
            return Err(QuantsimError::invalid("initial_cash", "must be positive"));
        }
        if !(0.0..1.0).contains(&self.cost_rate) {
            return Err(QuantsimError::invalid(
                "cost_rate",
                "must be a fraction in [0, 1)",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PositionState {
    Flat { cash: f64 },
    Long { units: f64 },
}

impl PositionState {
    pub fn value(&self, price: f64) -> f64 {
        match *self {
            PositionState::Flat { cash } => cash,
            PositionState::Long { units } => units * price,
        }
    }

    /// Apply one bar's signal. Returns the next state and the fill, if any.
    pub fn step(
        self,
        bar: &SignaledBar,
        price: PriceColumn,
        cost_rate: f64,
    ) -> Result<(PositionState, Option<Fill>), QuantsimError> {
        match (self, bar.signal) {
            (PositionState::Flat { cash }, Signal::Long) => {
                if !price.accepts_entry(bar.close) {
                    return Err(QuantsimError::InvalidPrice {
                        date: bar.date,
                        price: bar.close,
                    });
                }
                let cost = cash * cost_rate;
                let units = (cash - cost) / bar.close;
                let fill = Fill {
                    date: bar.date,
                    side: Side::Buy,
                    price: bar.close,
                    units,
                    cost,
                    cash_after: 0.0,
                };
                Ok((PositionState::Long { units }, Some(fill)))
            }
            (PositionState::Long { units }, Signal::Short) => {
                let notional = units * bar.close;
                let cost = notional * cost_rate;
                let cash = notional - cost;
                let fill = Fill {
                    date: bar.date,
                    side: Side::Sell,
                    price: bar.close,
                    units,
                    cost,
                    cash_after: cash,
                };
                Ok((PositionState::Flat { cash }, Some(fill)))
            }
            (state, _) => Ok((state, None)),
        }
    }
}

pub fn simulate(
    series: &SignaledSeries,
    config: &ExecutionConfig,
) -> Result<Simulation, QuantsimError> {
    config.validate()?;

    let mut state = PositionState::Flat {
        cash: config.initial_cash,
    };
    let mut simulation = Simulation {
        records: Vec::with_capacity(series.len()),
        fills: Vec::new(),
    };

    for bar in &series.bars {
        let (next, fill) = state.step(bar, series.price, config.cost_rate)?;
        if let Some(fill) = fill {
            debug!(
                label = %series.label,
                date = %fill.date,
                side = %fill.side,
                price = fill.price,
                units = fill.units,
                cost = fill.cost,
                "fill"
            );
            simulation.fills.push(fill);
        }
        state = next;
        simulation.records.push(PortfolioRecord {
            date: bar.date,
            portfolio_value: state.value(bar.close),
        });
    }

    Ok(simulation)
}
