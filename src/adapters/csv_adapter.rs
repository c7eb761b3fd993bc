//! CSV file data adapter: one `<TICKER>.csv` per instrument.

use crate::domain::error::QuantsimError;
use crate::domain::ohlcv::{OhlcvBar, PriceSeries};
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct CsvAdapter {
    base_path: PathBuf,
}

/// Positions of the required columns in the header row.
#[derive(Debug, Clone, Copy)]
struct Columns {
    date: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    volume: usize,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord, path: &Path) -> Result<Self, QuantsimError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| QuantsimError::Data {
                    reason: format!("{}: missing {} column", path.display(), name),
                })
        };
        Ok(Columns {
            date: find("date")?,
            open: find("open")?,
            high: find("high")?,
            low: find("low")?,
            close: find("close")?,
            volume: find("volume")?,
        })
    }
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{ticker}.csv"))
    }
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time component.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| raw.get(..10).and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()))
}

fn parse_price(raw: Option<&str>) -> Option<f64> {
    raw?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_volume(raw: Option<&str>) -> Option<u64> {
    let value = raw?.trim().parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0).then(|| value.trunc() as u64)
}

fn parse_row(record: &csv::StringRecord, cols: Columns) -> Option<OhlcvBar> {
    Some(OhlcvBar {
        date: parse_date(record.get(cols.date)?)?,
        open: parse_price(record.get(cols.open))?,
        high: parse_price(record.get(cols.high))?,
        low: parse_price(record.get(cols.low))?,
        close: parse_price(record.get(cols.close))?,
        volume: parse_volume(record.get(cols.volume))?,
    })
}

impl DataPort for CsvAdapter {
    fn fetch_series(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PriceSeries, QuantsimError> {
        let path = self.csv_path(ticker);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(QuantsimError::NoData {
                    ticker: ticker.to_string(),
                });
            }
            Err(e) => return Err(QuantsimError::Io(e)),
        };

        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(content.as_bytes());
        let headers = rdr.headers().map_err(|e| QuantsimError::Data {
            reason: format!("{}: CSV header error: {}", path.display(), e),
        })?;
        let cols = Columns::from_headers(headers, &path)?;

        let mut bars = Vec::new();
        let mut dropped = 0usize;
        for result in rdr.records() {
            let record = result.map_err(|e| QuantsimError::Data {
                reason: format!("{}: CSV parse error: {}", path.display(), e),
            })?;
            match parse_row(&record, cols) {
                Some(bar) if bar.date >= start_date && bar.date <= end_date => bars.push(bar),
                Some(_) => {}
                None => dropped += 1,
            }
        }
        if dropped > 0 {
            debug!(ticker, dropped, "dropped unparsable rows");
        }

        // stable sort, so dedup keeps the first row for a date
        bars.sort_by_key(|b| b.date);
        bars.dedup_by_key(|b| b.date);

        if bars.is_empty() {
            return Err(QuantsimError::NoData {
                ticker: ticker.to_string(),
            });
        }
        PriceSeries::new(ticker, bars)
    }
}
