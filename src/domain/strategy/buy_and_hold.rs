//! Buy and hold: long on every bar, no indicators.

use crate::domain::ohlcv::PriceSeries;
use crate::domain::series::{IndicatorValues, PriceColumn, SignaledBar, SignaledSeries};
use crate::domain::signal::Signal;

pub fn buy_and_hold(prices: &PriceSeries) -> SignaledSeries {
    let bars = prices
        .bars()
        .iter()
        .map(|bar| SignaledBar {
            date: bar.date,
            close: bar.close,
            signal: Signal::Long,
            indicators: IndicatorValues::None,
        })
        .collect();

    SignaledSeries {
        label: prices.ticker().to_string(),
        price: PriceColumn::Close,
        bars,
    }
}
