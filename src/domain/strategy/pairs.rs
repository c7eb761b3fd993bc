//! Pairs trading on the spread between two aligned price series.
//!
//! spread = close_A - close_B, z = (spread - SMA(n)) / STDDEV(n).
//! - |z| < exit_z: flatten
//! - z > entry_z: short the spread
//! - z < -entry_z: long the spread
//! - otherwise: keep the previous signal
//!
//! The spread is the price column handed to the simulator.

use chrono::NaiveDate;

use crate::domain::error::QuantsimError;
use crate::domain::indicator::zscore::calculate_zscore;
use crate::domain::ohlcv::PriceSeries;
use crate::domain::series::{IndicatorValues, PriceColumn, SignaledBar, SignaledSeries};
use crate::domain::signal::{Signal, SignalDecision, SignalPolicy};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignedPair {
    pub date: NaiveDate,
    pub price_a: f64,
    pub price_b: f64,
}

/// Inner join on date. Both inputs are ascending, so a merge walk suffices.
pub fn align_pair(a: &PriceSeries, b: &PriceSeries) -> Result<Vec<AlignedPair>, QuantsimError> {
    let (bars_a, bars_b) = (a.bars(), b.bars());
    let mut aligned = Vec::with_capacity(bars_a.len().min(bars_b.len()));
    let (mut i, mut j) = (0, 0);

    while i < bars_a.len() && j < bars_b.len() {
        let (bar_a, bar_b) = (&bars_a[i], &bars_b[j]);
        match bar_a.date.cmp(&bar_b.date) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                aligned.push(AlignedPair {
                    date: bar_a.date,
                    price_a: bar_a.close,
                    price_b: bar_b.close,
                });
                i += 1;
                j += 1;
            }
        }
    }

    if aligned.is_empty() {
        return Err(QuantsimError::PairMisaligned {
            ticker_a: a.ticker().to_string(),
            ticker_b: b.ticker().to_string(),
        });
    }
    Ok(aligned)
}

fn decide(zscore: Option<f64>, entry_z: f64, exit_z: f64) -> SignalDecision {
    match zscore {
        Some(z) if z.abs() < exit_z => SignalDecision::Set(Signal::Flat),
        Some(z) if z > entry_z => SignalDecision::Set(Signal::Short),
        Some(z) if z < -entry_z => SignalDecision::Set(Signal::Long),
        _ => SignalDecision::NoChange,
    }
}

pub fn pairs_trading(
    a: &PriceSeries,
    b: &PriceSeries,
    lookback: usize,
    entry_z: f64,
    exit_z: f64,
) -> Result<SignaledSeries, QuantsimError> {
    let aligned = align_pair(a, b)?;
    let spread: Vec<f64> = aligned.iter().map(|p| p.price_a - p.price_b).collect();
    let zscores = calculate_zscore(&spread, lookback);

    let decisions: Vec<SignalDecision> = zscores
        .iter()
        .map(|point| decide(point.map(|p| p.zscore), entry_z, exit_z))
        .collect();
    let signals = SignalPolicy::HoldUntilReset.apply(&decisions);

    let bars = aligned
        .iter()
        .enumerate()
        .map(|(i, pair)| SignaledBar {
            date: pair.date,
            close: spread[i],
            signal: signals[i],
            indicators: IndicatorValues::Pairs {
                price_a: pair.price_a,
                price_b: pair.price_b,
                spread: spread[i],
                mean: zscores[i].map(|p| p.mean),
                std: zscores[i].map(|p| p.std),
                zscore: zscores[i].map(|p| p.zscore),
            },
        })
        .collect();

    Ok(SignaledSeries {
        label: format!("{}/{}", a.ticker(), b.ticker()),
        price: PriceColumn::Spread,
        bars,
    })
}
