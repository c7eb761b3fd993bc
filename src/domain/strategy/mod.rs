//! Strategy configuration and signal generation.
//!
//! Each variant is a pure function from price history to a
//! [`SignaledSeries`]. Inputs are borrowed and never modified.

pub mod buy_and_hold;
pub mod mean_reversion;
pub mod pairs;
pub mod trend;

use std::fmt;

use super::error::QuantsimError;
use super::ohlcv::PriceSeries;
use super::series::SignaledSeries;
use super::signal::SignalPolicy;

pub const DEFAULT_SHORT_WINDOW: usize = 10;
pub const DEFAULT_LONG_WINDOW: usize = 30;
pub const DEFAULT_RSI_PERIOD: usize = 14;
pub const DEFAULT_RSI_LOWER: f64 = 30.0;
pub const DEFAULT_RSI_UPPER: f64 = 70.0;
pub const DEFAULT_BOLLINGER_WINDOW: usize = 20;
pub const DEFAULT_BOLLINGER_STD: f64 = 2.0;
pub const DEFAULT_PAIRS_LOOKBACK: usize = 30;
pub const DEFAULT_PAIRS_ENTRY_Z: f64 = 1.0;
pub const DEFAULT_PAIRS_EXIT_Z: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    TrendFollowing,
    BuyAndHold,
    Rsi,
    Bollinger,
    Pairs,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 5] = [
        StrategyKind::TrendFollowing,
        StrategyKind::BuyAndHold,
        StrategyKind::Rsi,
        StrategyKind::Bollinger,
        StrategyKind::Pairs,
    ];

    /// Config section holding this strategy's parameters.
    pub fn section(self) -> &'static str {
        match self {
            StrategyKind::TrendFollowing => "trend_following",
            StrategyKind::BuyAndHold => "buy_and_hold",
            StrategyKind::Rsi => "rsi",
            StrategyKind::Bollinger => "bollinger",
            StrategyKind::Pairs => "pairs",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrategyKind::TrendFollowing => "Moving Average Trend Following",
            StrategyKind::BuyAndHold => "Buy and Hold",
            StrategyKind::Rsi => "RSI Strategy",
            StrategyKind::Bollinger => "Bollinger Bands",
            StrategyKind::Pairs => "Pairs Trading",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    TrendFollowing {
        short_window: usize,
        long_window: usize,
    },
    BuyAndHold,
    Rsi {
        period: usize,
        lower: f64,
        upper: f64,
    },
    Bollinger {
        window: usize,
        num_std: f64,
    },
    Pairs {
        lookback: usize,
        entry_z: f64,
        exit_z: f64,
    },
}

/// Price history handed to a strategy.
#[derive(Debug, Clone, Copy)]
pub enum StrategyInput<'a> {
    Single(&'a PriceSeries),
    Pair(&'a PriceSeries, &'a PriceSeries),
}

impl Strategy {
    /// Strategy of the given kind with default parameters.
    pub fn default_for(kind: StrategyKind) -> Self {
        match kind {
            StrategyKind::TrendFollowing => Strategy::TrendFollowing {
                short_window: DEFAULT_SHORT_WINDOW,
                long_window: DEFAULT_LONG_WINDOW,
            },
            StrategyKind::BuyAndHold => Strategy::BuyAndHold,
            StrategyKind::Rsi => Strategy::Rsi {
                period: DEFAULT_RSI_PERIOD,
                lower: DEFAULT_RSI_LOWER,
                upper: DEFAULT_RSI_UPPER,
            },
            StrategyKind::Bollinger => Strategy::Bollinger {
                window: DEFAULT_BOLLINGER_WINDOW,
                num_std: DEFAULT_BOLLINGER_STD,
            },
            StrategyKind::Pairs => Strategy::Pairs {
                lookback: DEFAULT_PAIRS_LOOKBACK,
                entry_z: DEFAULT_PAIRS_ENTRY_Z,
                exit_z: DEFAULT_PAIRS_EXIT_Z,
            },
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::TrendFollowing { .. } => StrategyKind::TrendFollowing,
            Strategy::BuyAndHold => StrategyKind::BuyAndHold,
            Strategy::Rsi { .. } => StrategyKind::Rsi,
            Strategy::Bollinger { .. } => StrategyKind::Bollinger,
            Strategy::Pairs { .. } => StrategyKind::Pairs,
        }
    }

    pub fn requires_pair(&self) -> bool {
        matches!(self, Strategy::Pairs { .. })
    }

    pub fn signal_policy(&self) -> SignalPolicy {
        match self {
            Strategy::Pairs { .. } => SignalPolicy::HoldUntilReset,
            _ => SignalPolicy::Recompute,
        }
    }

    pub fn validate(&self) -> Result<(), QuantsimError> {
        match *self {
            Strategy::TrendFollowing {
                short_window,
                long_window,
            } => {
                if short_window == 0 {
                    return Err(QuantsimError::invalid("short_window", "must be positive"));
                }
                if long_window == 0 {
                    return Err(QuantsimError::invalid("long_window", "must be positive"));
                }
                if short_window >= long_window {
                    return Err(QuantsimError::invalid(
                        "short_window",
                        format!("({short_window}) must be less than long_window ({long_window})"),
                    ));
                }
            }
            Strategy::BuyAndHold => {}
            Strategy::Rsi {
                period,
                lower,
                upper,
            } => {
                if period == 0 {
                    return Err(QuantsimError::invalid("period", "must be positive"));
                }
                if !(0.0..=100.0).contains(&lower) {
                    return Err(QuantsimError::invalid("lower", "must be between 0 and 100"));
                }
                if !(0.0..=100.0).contains(&upper) {
                    return Err(QuantsimError::invalid("upper", "must be between 0 and 100"));
                }
                if lower >= upper {
                    return Err(QuantsimError::invalid(
                        "lower",
                        format!("({lower}) must be less than upper ({upper})"),
                    ));
                }
            }
            Strategy::Bollinger { window, num_std } => {
                if window < 2 {
                    return Err(QuantsimError::invalid("window", "must be at least 2"));
                }
                if !(num_std.is_finite() && num_std > 0.0) {
                    return Err(QuantsimError::invalid("num_std", "must be positive"));
                }
            }
            Strategy::Pairs {
                lookback,
                entry_z,
                exit_z,
            } => {
                if lookback < 2 {
                    return Err(QuantsimError::invalid("lookback", "must be at least 2"));
                }
                if !(entry_z.is_finite() && entry_z > 0.0) {
                    return Err(QuantsimError::invalid("entry_z", "must be positive"));
                }
                if !(exit_z.is_finite() && exit_z >= 0.0) {
                    return Err(QuantsimError::invalid("exit_z", "must be non-negative"));
                }
            }
        }
        Ok(())
    }

    /// Validate the parameters, then compute indicators and signals.
    pub fn generate(&self, input: StrategyInput<'_>) -> Result<SignaledSeries, QuantsimError> {
        self.validate()?;

        match (self, input) {
            (Strategy::Pairs { .. }, StrategyInput::Single(_)) => Err(QuantsimError::invalid(
                "pair_ticker",
                "pairs trading needs a second price series",
            )),
            (
                Strategy::Pairs {
                    lookback,
                    entry_z,
                    exit_z,
                },
                StrategyInput::Pair(a, b),
            ) => pairs::pairs_trading(a, b, *lookback, *entry_z, *exit_z),
            (_, StrategyInput::Pair(..)) => Err(QuantsimError::invalid(
                "pair_ticker",
                format!("{} trades a single price series", self.kind()),
            )),
            (
                Strategy::TrendFollowing {
                    short_window,
                    long_window,
                },
                StrategyInput::Single(prices),
            ) => Ok(trend::moving_average_trend_following(
                prices,
                *short_window,
                *long_window,
            )),
            (Strategy::BuyAndHold, StrategyInput::Single(prices)) => {
                Ok(buy_and_hold::buy_and_hold(prices))
            }
            (
                Strategy::Rsi {
                    period,
                    lower,
                    upper,
                },
                StrategyInput::Single(prices),
            ) => Ok(mean_reversion::rsi_strategy(prices, *period, *lower, *upper)),
            (Strategy::Bollinger { window, num_std }, StrategyInput::Single(prices)) => Ok(
                mean_reversion::bollinger_band_strategy(prices, *window, *num_std),
            ),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::TrendFollowing {
                short_window,
                long_window,
            } => write!(f, "{} ({}/{})", self.kind(), short_window, long_window),
            Strategy::BuyAndHold => write!(f, "{}", self.kind()),
            Strategy::Rsi {
                period,
                lower,
                upper,
            } => write!(f, "{} ({}, {}-{})", self.kind(), period, lower, upper),
            Strategy::Bollinger { window, num_std } => {
                write!(f, "{} ({}, {})", self.kind(), window, num_std)
            }
            Strategy::Pairs {
                lookback,
                entry_z,
                exit_z,
            } => write!(f, "{} ({}, {}/{})", self.kind(), lookback, entry_z, exit_z),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn prices(closes: &[f64]) -> PriceSeries {
        PriceSeries::from_closes("TEST", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), closes)
            .unwrap()
    }

    #[test]
    fn defaults_validate() {
        for kind in StrategyKind::ALL {
            let strategy = Strategy::default_for(kind);
            assert_eq!(strategy.kind(), kind);
            assert!(strategy.validate().is_ok(), "{kind} defaults should be valid");
        }
    }

    #[test]
    fn policy_per_strategy() {
        assert_eq!(
            Strategy::default_for(StrategyKind::Pairs).signal_policy(),
            SignalPolicy::HoldUntilReset
        );
        assert_eq!(
            Strategy::default_for(StrategyKind::Rsi).signal_policy(),
            SignalPolicy::Recompute
        );
        assert_eq!(
            Strategy::default_for(StrategyKind::Bollinger).signal_policy(),
            SignalPolicy::Recompute
        );
    }

    #[test]
    fn trend_short_must_be_below_long() {
        let strategy = Strategy::TrendFollowing {
            short_window: 30,
            long_window: 30,
        };
        let err = strategy.validate().unwrap_err();
        assert!(matches!(
            err,
            QuantsimError::InvalidParameter { parameter: "short_window", .. }
        ));
    }

    #[test]
    fn trend_zero_window_rejected() {
        let strategy = Strategy::TrendFollowing {
            short_window: 0,
            long_window: 5,
        };
        assert!(strategy.validate().is_err());
    }

    #[test]
    fn rsi_thresholds_validated() {
        let inverted = Strategy::Rsi {
            period: 14,
            lower: 70.0,
            upper: 30.0,
        };
        assert!(matches!(
            inverted.validate().unwrap_err(),
            QuantsimError::InvalidParameter { parameter: "lower", .. }
        ));

        let out_of_range = Strategy::Rsi {
            period: 14,
            lower: 30.0,
            upper: 120.0,
        };
        assert!(matches!(
            out_of_range.validate().unwrap_err(),
            QuantsimError::InvalidParameter { parameter: "upper", .. }
        ));
    }

    #[test]
    fn bollinger_and_pairs_need_two_bar_windows() {
        let bollinger = Strategy::Bollinger {
            window: 1,
            num_std: 2.0,
        };
        assert!(bollinger.validate().is_err());

        let pairs = Strategy::Pairs {
            lookback: 1,
            entry_z: 1.0,
            exit_z: 0.0,
        };
        assert!(pairs.validate().is_err());
    }

    #[test]
    fn pairs_z_thresholds_validated() {
        let no_entry = Strategy::Pairs {
            lookback: 10,
            entry_z: 0.0,
            exit_z: 0.0,
        };
        assert!(no_entry.validate().is_err());

        let negative_exit = Strategy::Pairs {
            lookback: 10,
            entry_z: 1.0,
            exit_z: -0.5,
        };
        assert!(negative_exit.validate().is_err());
    }

    #[test]
    fn generate_rejects_invalid_config() {
        let p = prices(&[1.0, 2.0, 3.0]);
        let strategy = Strategy::TrendFollowing {
            short_window: 5,
            long_window: 2,
        };
        assert!(strategy.generate(StrategyInput::Single(&p)).is_err());
    }

    #[test]
    fn pairs_needs_pair_input() {
        let p = prices(&[1.0, 2.0, 3.0]);
        let err = Strategy::default_for(StrategyKind::Pairs)
            .generate(StrategyInput::Single(&p))
            .unwrap_err();
        assert!(matches!(
            err,
            QuantsimError::InvalidParameter { parameter: "pair_ticker", .. }
        ));
    }

    #[test]
    fn single_strategy_rejects_pair_input() {
        let p = prices(&[1.0, 2.0, 3.0]);
        let result = Strategy::BuyAndHold.generate(StrategyInput::Pair(&p, &p));
        assert!(result.is_err());
    }

    #[test]
    fn display_includes_parameters() {
        let strategy = Strategy::TrendFollowing {
            short_window: 10,
            long_window: 30,
        };
        assert_eq!(strategy.to_string(), "Moving Average Trend Following (10/30)");
        assert_eq!(StrategyKind::Pairs.section(), "pairs");
    }
}
