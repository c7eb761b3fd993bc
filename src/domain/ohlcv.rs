//! OHLCV bars and validated per-ticker price series.

use chrono::NaiveDate;

use super::error::QuantsimError;

#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl OhlcvBar {
    /// Bar with every price field set to `close`.
    pub fn from_close(date: NaiveDate, close: f64) -> Self {
        OhlcvBar {
            date,
            open: close,
            high: close,
            low: close,
            close,
            volume: 0,
        }
    }
}

/// Daily bars for one ticker in strictly ascending date order, every close finite.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    ticker: String,
    bars: Vec<OhlcvBar>,
}

impl PriceSeries {
    pub fn new(ticker: impl Into<String>, bars: Vec<OhlcvBar>) -> Result<Self, QuantsimError> {
        let ticker = ticker.into();

        if let Some(bar) = bars.iter().find(|b| !b.close.is_finite()) {
            return Err(QuantsimError::MalformedSeries {
                ticker,
                reason: format!("non-finite close on {}", bar.date),
            });
        }

        if let Some(pair) = bars.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(QuantsimError::MalformedSeries {
                ticker,
                reason: format!(
                    "dates not strictly ascending at {} -> {}",
                    pair[0].date, pair[1].date
                ),
            });
        }

        Ok(PriceSeries { ticker, bars })
    }

    /// Convenience constructor for close-only data starting at `start`, one bar per day.
    pub fn from_closes(
        ticker: impl Into<String>,
        start: NaiveDate,
        closes: &[f64],
    ) -> Result<Self, QuantsimError> {
        let bars = closes
            .iter()
            .zip(start.iter_days())
            .map(|(&close, date)| OhlcvBar::from_close(date, close))
            .collect();
        PriceSeries::new(ticker, bars)
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn bars(&self) -> &[OhlcvBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }
}
