//! Plain-text reports for the terminal.

use std::io::Write;

use crate::domain::backtest::BacktestResult;
use crate::domain::compare::ComparisonEntry;
use crate::domain::error::QuantsimError;
use crate::ports::report_port::ReportPort;

#[derive(Debug, Clone, Copy)]
pub struct ConsoleReport {
    /// Fills listed per backtest; the rest are summarised as a count.
    pub max_fills: usize,
}

impl Default for ConsoleReport {
    fn default() -> Self {
        ConsoleReport { max_fills: 20 }
    }
}

impl ReportPort for ConsoleReport {
    fn write_backtest(
        &self,
        result: &BacktestResult,
        out: &mut dyn Write,
    ) -> Result<(), QuantsimError> {
        let record = result.metrics.record();
        let first = result.series.bars.first().map(|b| b.date);
        let last = result.series.bars.last().map(|b| b.date);

        writeln!(out, "=== {} on {} ===", result.strategy, result.series.label)?;
        if let (Some(first), Some(last)) = (first, last) {
            writeln!(out, "Period:           {first} to {last}")?;
        }
        writeln!(out, "Bars:             {}", result.series.len())?;
        writeln!(out, "Total Return:     {:.2}%", record.total_return_pct)?;
        writeln!(out, "Max Drawdown:     {:.2}%", record.max_drawdown_pct)?;
        writeln!(out, "Sharpe Ratio:     {}", record.sharpe_ratio)?;
        if let Some(value) = result.simulation.final_value() {
            writeln!(out, "Final Value:      {value:.2}")?;
        }
        writeln!(out, "Trades:           {}", result.metrics.trades)?;
        writeln!(out, "Total Costs:      {:.2}", result.simulation.total_costs())?;

        let fills = &result.simulation.fills;
        if !fills.is_empty() {
            writeln!(out)?;
            writeln!(out, "{:<12} {:<5} {:>12} {:>14} {:>10}", "Date", "Side", "Price", "Units", "Cost")?;
            for fill in fills.iter().take(self.max_fills) {
                writeln!(
                    out,
                    "{:<12} {:<5} {:>12.4} {:>14.4} {:>10.2}",
                    fill.date.to_string(),
                    fill.side.to_string(),
                    fill.price,
                    fill.units,
                    fill.cost
                )?;
            }
            if fills.len() > self.max_fills {
                writeln!(out, "... {} more fills", fills.len() - self.max_fills)?;
            }
        }
        Ok(())
    }

    fn write_comparison(
        &self,
        entries: &[ComparisonEntry],
        out: &mut dyn Write,
    ) -> Result<(), QuantsimError> {
        let width = entries
            .iter()
            .map(|e| e.name.len())
            .max()
            .unwrap_or(0)
            .max("Strategy".len());

        writeln!(
            out,
            "{:<width$}  {:>12}  {:>12}  {:>8}  {:>6}",
            "Strategy", "Return %", "Drawdown %", "Sharpe", "Trades"
        )?;
        for entry in entries {
            match &entry.outcome {
                Ok(result) => {
                    let record = result.metrics.record();
                    writeln!(
                        out,
                        "{:<width$}  {:>12.2}  {:>12.2}  {:>8}  {:>6}",
                        entry.name,
                        record.total_return_pct,
                        record.max_drawdown_pct,
                        record.sharpe_ratio.to_string(),
                        result.metrics.trades
                    )?;
                }
                Err(err) => writeln!(out, "{:<width$}  error: {err}", entry.name)?,
            }
        }
        Ok(())
    }
}
