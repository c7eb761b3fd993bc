//! Rolling z-score: (x - SMA(n)) / STDDEV(n) with the sample stddev.

use super::sma::calculate_sma;
use super::stddev::calculate_stddev;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZScorePoint {
    pub mean: f64,
    pub std: f64,
    pub zscore: f64,
}

/// A zero standard deviation leaves a NaN (or infinite) z-score in place.
pub fn calculate_zscore(values: &[f64], period: usize) -> Vec<Option<ZScorePoint>> {
    let means = calculate_sma(values, period);
    let stds = calculate_stddev(values, period);

    values
        .iter()
        .zip(means.into_iter().zip(stds))
        .map(|(value, (mean, std))| {
            let (mean, std) = (mean?, std?);
            Some(ZScorePoint {
                mean,
                std,
                zscore: (value - mean) / std,
            })
        })
        .collect()
}
