#![allow(dead_code)]

use chrono::NaiveDate;
use quantsim::domain::error::QuantsimError;
pub use quantsim::domain::ohlcv::{OhlcvBar, PriceSeries};
use quantsim::domain::backtest::BacktestConfig;
use quantsim::ports::data_port::DataPort;
use std::cell::Cell;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<OhlcvBar>>,
    pub errors: HashMap<String, String>,
    pub calls: Cell<usize>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            calls: Cell::new(0),
        }
    }

    pub fn with_bars(mut self, ticker: &str, bars: Vec<OhlcvBar>) -> Self {
        self.data.insert(ticker.to_string(), bars);
        self
    }

    pub fn with_closes(self, ticker: &str, start: &str, closes: &[f64]) -> Self {
        let bars = date_str(start)
            .iter_days()
            .zip(closes)
            .map(|(d, &c)| OhlcvBar::from_close(d, c))
            .collect();
        self.with_bars(ticker, bars)
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_series(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PriceSeries, QuantsimError> {
        self.calls.set(self.calls.get() + 1);
        if let Some(reason) = self.errors.get(ticker) {
            return Err(QuantsimError::Data {
                reason: reason.clone(),
            });
        }
        let bars: Vec<OhlcvBar> = self
            .data
            .get(ticker)
            .ok_or_else(|| QuantsimError::NoData {
                ticker: ticker.to_string(),
            })?
            .iter()
            .filter(|b| b.date >= start_date && b.date <= end_date)
            .cloned()
            .collect();
        PriceSeries::new(ticker, bars)
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn date_str(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Consecutive calendar days from 2024-01-01.
pub fn series(ticker: &str, closes: &[f64]) -> PriceSeries {
    PriceSeries::from_closes(ticker, date(2024, 1, 1), closes).unwrap()
}

pub fn config(initial_cash: f64, cost_rate: f64) -> BacktestConfig {
    BacktestConfig {
        initial_cash,
        cost_rate,
        risk_free_rate: 0.0,
    }
}

pub const TREND_PRICES: [f64; 8] = [100.0, 102.0, 104.0, 103.0, 105.0, 107.0, 106.0, 108.0];

pub const TREND_PORTFOLIO: [f64; 8] = [
    10_000.0,
    10_000.0,
    10_000.0,
    10_000.0,
    10_194.174757281555,
    10_388.349514563108,
    10_291.26213592233,
    10_485.436893203885,
];
