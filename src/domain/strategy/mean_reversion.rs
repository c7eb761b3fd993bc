//! Mean-reversion strategies: RSI thresholds and Bollinger band breaks.
//!
//! Both recompute the signal from the current bar alone; a bar between the
//! thresholds is flat even if the previous bar was long or short.

use crate::domain::indicator::bollinger::calculate_bollinger;
use crate::domain::indicator::rsi::calculate_rsi;
use crate::domain::ohlcv::PriceSeries;
use crate::domain::series::{IndicatorValues, PriceColumn, SignaledBar, SignaledSeries};
use crate::domain::signal::{Signal, SignalDecision, SignalPolicy};

/// Long when RSI < lower, short when RSI > upper. NaN RSI stays flat.
pub fn rsi_strategy(prices: &PriceSeries, period: usize, lower: f64, upper: f64) -> SignaledSeries {
    let closes = prices.closes();
    let rsi = calculate_rsi(&closes, period);

    let decisions: Vec<SignalDecision> = rsi
        .iter()
        .map(|value| match value {
            Some(v) if *v > upper => SignalDecision::Set(Signal::Short),
            Some(v) if *v < lower => SignalDecision::Set(Signal::Long),
            _ => SignalDecision::NoChange,
        })
        .collect();
    let signals = SignalPolicy::Recompute.apply(&decisions);

    let bars = prices
        .bars()
        .iter()
        .enumerate()
        .map(|(i, bar)| SignaledBar {
            date: bar.date,
            close: bar.close,
            signal: signals[i],
            indicators: IndicatorValues::Rsi { rsi: rsi[i] },
        })
        .collect();

    SignaledSeries {
        label: prices.ticker().to_string(),
        price: PriceColumn::Close,
        bars,
    }
}

/// Long when close < lower band, short when close > upper band.
pub fn bollinger_band_strategy(prices: &PriceSeries, window: usize, num_std: f64) -> SignaledSeries {
    let closes = prices.closes();
    let bands = calculate_bollinger(&closes, window, num_std);

    let decisions: Vec<SignalDecision> = closes
        .iter()
        .zip(&bands)
        .map(|(close, band)| match band {
            Some(b) if *close > b.upper => SignalDecision::Set(Signal::Short),
            Some(b) if *close < b.lower => SignalDecision::Set(Signal::Long),
            _ => SignalDecision::NoChange,
        })
        .collect();
    let signals = SignalPolicy::Recompute.apply(&decisions);

    let bars = prices
        .bars()
        .iter()
        .enumerate()
        .map(|(i, bar)| SignaledBar {
            date: bar.date,
            close: bar.close,
            signal: signals[i],
            indicators: IndicatorValues::Bollinger {
                middle_band: bands[i].map(|b| b.middle),
                upper_band: bands[i].map(|b| b.upper),
                lower_band: bands[i].map(|b| b.lower),
            },
        })
        .collect();

    SignaledSeries {
        label: prices.ticker().to_string(),
        price: PriceColumn::Close,
        bars,
    }
}
