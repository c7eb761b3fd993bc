//! Discrete position signals and the per-bar assignment policies.
//!
//! Strategies produce one [`SignalDecision`] per bar. A [`SignalPolicy`]
//! turns the decisions into the final signal column:
//! - `Recompute`: bars without a decision are flat.
//! - `HoldUntilReset`: bars without a decision repeat the previous signal.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Signal {
    Short,
    #[default]
    Flat,
    Long,
}

impl Signal {
    pub fn value(self) -> i8 {
        match self {
            Signal::Short => -1,
            Signal::Flat => 0,
            Signal::Long => 1,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Outcome of a strategy's conditions on a single bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalDecision {
    Set(Signal),
    NoChange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalPolicy {
    Recompute,
    HoldUntilReset,
}

impl SignalPolicy {
    pub fn apply(self, decisions: &[SignalDecision]) -> Vec<Signal> {
        let mut held = Signal::Flat;
        decisions
            .iter()
            .map(|decision| match (self, decision) {
                (_, SignalDecision::Set(signal)) => {
                    held = *signal;
                    *signal
                }
                (SignalPolicy::Recompute, SignalDecision::NoChange) => Signal::Flat,
                (SignalPolicy::HoldUntilReset, SignalDecision::NoChange) => held,
            })
            .collect()
    }
}
