//! Core domain types and logic: strategies, simulation, metrics.

pub mod ohlcv;
pub mod signal;
pub mod indicator;
pub mod series;
pub mod strategy;
pub mod portfolio;
pub mod execution;
pub mod metrics;
pub mod backtest;
pub mod compare;
pub mod config_validation;
pub mod error;
