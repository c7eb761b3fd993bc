//! Rolling-window technical indicators.
//!
//! Every indicator maps an input column to an output column of the same
//! length:
//! - `None` marks a warm-up bar where the window has not filled yet.
//! - `Some(x)` is a defined value. `x` may be NaN when the arithmetic is
//!   degenerate (e.g. 0/0), and callers treat NaN comparisons as false.
//!
//! Standard deviations use the sample (N-1) denominator throughout.

pub mod bollinger;
pub mod rsi;
pub mod sma;
pub mod stddev;
pub mod zscore;

/// Apply `f` to every full trailing window of `values`.
pub(crate) fn rolling<F>(values: &[f64], period: usize, f: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> f64,
{
    if period == 0 {
        return vec![None; values.len()];
    }
    (0..values.len())
        .map(|i| {
            if i + 1 < period {
                None
            } else {
                Some(f(&values[i + 1 - period..=i]))
            }
        })
        .collect()
}
