//! Strategy output: per-bar execution price, indicator columns and signal.

use chrono::NaiveDate;

use super::signal::Signal;

/// Indicator columns attached to one bar, shaped per strategy.
/// `None` marks a warm-up bar.
#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorValues {
    None,
    Trend {
        sma_short: Option<f64>,
        sma_long: Option<f64>,
    },
    Rsi {
        rsi: Option<f64>,
    },
    Bollinger {
        middle_band: Option<f64>,
        upper_band: Option<f64>,
        lower_band: Option<f64>,
    },
    Pairs {
        price_a: f64,
        price_b: f64,
        spread: f64,
        mean: Option<f64>,
        std: Option<f64>,
        zscore: Option<f64>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignaledBar {
    pub date: NaiveDate,
    /// Price the simulator trades at: the close, or the spread for pairs.
    pub close: f64,
    pub signal: Signal,
    pub indicators: IndicatorValues,
}

/// What the `close` column of a signaled series holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceColumn {
    /// A traded asset's close. Entries need a strictly positive price.
    #[default]
    Close,
    /// A synthetic spread, which may be zero or negative. Entries only need a non-zero value.
    Spread,
}

impl PriceColumn {
    pub fn accepts_entry(self, price: f64) -> bool {
        if !price.is_finite() {
            return false;
        }
        match self {
            PriceColumn::Close => price > 0.0,
            PriceColumn::Spread => price != 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignaledSeries {
    pub label: String,
    pub price: PriceColumn,
    pub bars: Vec<SignaledBar>,
}

impl SignaledSeries {
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn signals(&self) -> Vec<Signal> {
        self.bars.iter().map(|b| b.signal).collect()
    }

    /// Signals as -1 / 0 / 1.
    pub fn signal_values(&self) -> Vec<i8> {
        self.bars.iter().map(|b| b.signal.value()).collect()
    }
}
