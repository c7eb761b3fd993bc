//! Moving-average crossover trend following.
//!
//! Long while SMA(short) > SMA(long), short otherwise. Bars without both
//! averages stay flat. No hysteresis.

use crate::domain::indicator::sma::calculate_sma;
use crate::domain::ohlcv::PriceSeries;
use crate::domain::series::{IndicatorValues, PriceColumn, SignaledBar, SignaledSeries};
use crate::domain::signal::{Signal, SignalDecision, SignalPolicy};

pub fn moving_average_trend_following(
    prices: &PriceSeries,
    short_window: usize,
    long_window: usize,
) -> SignaledSeries {
    let closes = prices.closes();
    let sma_short = calculate_sma(&closes, short_window);
    let sma_long = calculate_sma(&closes, long_window);

    let decisions: Vec<SignalDecision> = sma_short
        .iter()
        .zip(&sma_long)
        .map(|pair| match pair {
            (Some(short), Some(long)) if short > long => SignalDecision::Set(Signal::Long),
            (Some(_), Some(_)) => SignalDecision::Set(Signal::Short),
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
            indicators: IndicatorValues::Trend {
                sma_short: sma_short[i],
                sma_long: sma_long[i],
            },
        })
        .collect();

    SignaledSeries {
        label: prices.ticker().to_string(),
        price: PriceColumn::Close,
        bars,
    }
}
