//! In-memory series cache in front of any [`DataPort`].

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::error::QuantsimError;
use crate::domain::ohlcv::PriceSeries;
use crate::ports::data_port::DataPort;

type CacheKey = (String, NaiveDate, NaiveDate);

/// Caches series by (ticker, start, end). Errors are not cached.
pub struct CachedDataPort<P> {
    inner: P,
    cache: Mutex<HashMap<CacheKey, PriceSeries>>,
}

impl<P: DataPort> CachedDataPort<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn cached_len(&self) -> usize {
        self.cache.lock().map(|c| c.len()).unwrap_or_default()
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: DataPort> DataPort for CachedDataPort<P> {
    fn fetch_series(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PriceSeries, QuantsimError> {
        let key = (ticker.to_string(), start_date, end_date);
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(series) = cache.get(&key) {
            debug!(ticker, %start_date, %end_date, "series cache hit");
            return Ok(series.clone());
        }

        let series = self.inner.fetch_series(ticker, start_date, end_date)?;
        cache.insert(key, series.clone());
        Ok(series)
    }
}
