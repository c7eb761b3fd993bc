//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for quantsim.
#[derive(Debug, thiserror::Error)]
pub enum QuantsimError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid configuration: {parameter} {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },

    #[error("malformed price series for {ticker}: {reason}")]
    MalformedSeries { ticker: String, reason: String },

    #[error("no overlapping dates between {ticker_a} and {ticker_b}")]
    PairMisaligned { ticker_a: String, ticker_b: String },

    #[error("cannot enter a position at price {price} on {date}")]
    InvalidPrice { date: NaiveDate, price: f64 },

    #[error("no data for {ticker}")]
    NoData { ticker: String },

    #[error("insufficient data: have {bars} portfolio records, need {minimum}")]
    InsufficientData { bars: usize, minimum: usize },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl QuantsimError {
    pub(crate) fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        QuantsimError::InvalidParameter {
            parameter,
            reason: reason.into(),
        }
    }
}

impl From<&QuantsimError> for std::process::ExitCode {
    fn from(err: &QuantsimError) -> Self {
        let code: u8 = match err {
            QuantsimError::Io(_) => 1,
            QuantsimError::ConfigParse { .. }
            | QuantsimError::ConfigMissing { .. }
            | QuantsimError::ConfigInvalid { .. }
            | QuantsimError::InvalidParameter { .. } => 2,
            QuantsimError::NoData { .. }
            | QuantsimError::Data { .. }
            | QuantsimError::PairMisaligned { .. } => 3,
            QuantsimError::MalformedSeries { .. } | QuantsimError::InvalidPrice { .. } => 4,
            QuantsimError::InsufficientData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
