//! Report generation port trait.

use std::io::Write;

use crate::domain::backtest::BacktestResult;
use crate::domain::compare::ComparisonEntry;
use crate::domain::error::QuantsimError;

/// Port for rendering backtest outcomes.
pub trait ReportPort {
    fn write_backtest(
        &self,
        result: &BacktestResult,
        out: &mut dyn Write,
    ) -> Result<(), QuantsimError>;

    fn write_comparison(
        &self,
        entries: &[ComparisonEntry],
        out: &mut dyn Write,
    ) -> Result<(), QuantsimError>;
}
