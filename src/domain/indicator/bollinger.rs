//! Bollinger Bands.
//!
//! - Middle: SMA over n periods
//! - Upper: Middle + (multiplier × StdDev)
//! - Lower: Middle - (multiplier × StdDev)
//!
//! StdDev is the sample standard deviation (divides by N-1).
//! Warmup: first (period-1) bars are undefined.

use super::sma::calculate_sma;
use super::stddev::calculate_stddev;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

pub fn calculate_bollinger(closes: &[f64], period: usize, num_std: f64) -> Vec<Option<Bands>> {
    let middle = calculate_sma(closes, period);
    let stddev = calculate_stddev(closes, period);

    middle
        .into_iter()
        .zip(stddev)
        .map(|(middle, sd)| {
            let (middle, sd) = (middle?, sd?);
            Some(Bands {
                upper: middle + num_std * sd,
                middle,
                lower: middle - num_std * sd,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn bollinger_warmup() {
        let bands = calculate_bollinger(&[10.0, 20.0, 30.0, 40.0, 50.0], 3, 2.0);
        assert!(bands[0].is_none());
        assert!(bands[1].is_none());
        assert!(bands[2].is_some());
        assert!(bands[4].is_some());
    }

    #[test]
    fn bollinger_basic_calculation() {
        // mean 20, sample stddev 10
        let bands = calculate_bollinger(&[10.0, 20.0, 30.0], 3, 2.0);
        let b = bands[2].unwrap();
        assert_relative_eq!(b.middle, 20.0);
        assert_relative_eq!(b.upper, 40.0);
        assert_relative_eq!(b.lower, 0.0);
    }

    #[test]
    fn bollinger_multiplier_variations() {
        let bands = calculate_bollinger(&[10.0, 20.0, 30.0], 3, 1.5);
        let b = bands[2].unwrap();
        assert_relative_eq!(b.upper, 35.0);
        assert_relative_eq!(b.lower, 5.0);
    }

    #[test]
    fn bollinger_constant_values_collapse() {
        let bands = calculate_bollinger(&[100.0; 4], 3, 2.0);
        let b = bands[3].unwrap();
        assert_eq!(b.upper, 100.0);
        assert_eq!(b.middle, 100.0);
        assert_eq!(b.lower, 100.0);
    }

    #[test]
    fn bollinger_symmetry() {
        let bands = calculate_bollinger(&[3.0, 9.0, 4.0, 12.0], 4, 2.0);
        let b = bands[3].unwrap();
        assert_relative_eq!(b.upper - b.middle, b.middle - b.lower, epsilon = 1e-12);
    }

    #[test]
    fn bollinger_short_input() {
        let bands = calculate_bollinger(&[1.0, 2.0], 20, 2.0);
        assert_eq!(bands, vec![None, None]);
    }
}
