//! Error types for data operations.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur during data operations.
#[derive(Debug, Error)]
pub enum DataError {
    /// Yahoo Finance API error
    #[error("Yahoo Finance API error: {0}")]
    YahooApi(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Data parsing error
    #[error("Data parsing error: {0}")]
    Parse(String),

    /// Invalid date range
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date of the range
        start: String,
        /// End date of the range
        end: String,
    },

    /// The provider returned nothing usable.
    #[error("Data unavailable for {subject}: {reason}")]
    DataUnavailable {
        /// Symbol or dataset that was queried
        subject: String,
        /// Reason the data is unavailable
        reason: String,
    },

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// Time conversion error
    #[error("Time conversion error: {0}")]
    TimeConversion(String),

    /// Invalid symbol
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Length mismatch between index and values
    #[error("Length mismatch: {index} index entries, {values} values")]
    LengthMismatch {
        /// Number of index entries
        index: usize,
        /// Number of values
        values: usize,
    },

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Zip archive error
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DataError {
    /// Shorthand for [`DataError::DataUnavailable`].
    pub fn unavailable(subject: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            subject: subject.into(),
            reason: reason.into(),
        }
    }
}

impl From<yahoo_finance_api::YahooError> for DataError {
    fn from(err: yahoo_finance_api::YahooError) -> Self {
        Self::YahooApi(err.to_string())
    }
}
