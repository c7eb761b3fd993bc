//! Simulation output: the portfolio-value curve and the ledger of fills.

use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortfolioRecord {
    pub date: NaiveDate,
    pub portfolio_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => f.write_str("BUY"),
            Side::Sell => f.write_str("SELL"),
        }
    }
}

/// One executed leg. `cash_after` is zero after a buy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill {
    pub date: NaiveDate,
    pub side: Side,
    pub price: f64,
    pub units: f64,
    pub cost: f64,
    pub cash_after: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Simulation {
    pub records: Vec<PortfolioRecord>,
    pub fills: Vec<Fill>,
}

impl Simulation {
    pub fn values(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.portfolio_value).collect()
    }

    pub fn final_value(&self) -> Option<f64> {
        self.records.last().map(|r| r.portfolio_value)
    }

    pub fn total_costs(&self) -> f64 {
        self.fills.iter().map(|f| f.cost).sum()
    }
}
