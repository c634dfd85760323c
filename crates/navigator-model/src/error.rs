//! Error types for alignment and regression.

use thiserror::Error;

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors that can occur while aligning data or fitting the regression.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Too few observations to fit
    #[error("Insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Required number of observations
        required: usize,
        /// Actual number of observations
        actual: usize,
    },

    /// Predictors are perfectly collinear (or constant)
    #[error("Singular design matrix: predictors are collinear or constant")]
    Singular,

    /// NaN or infinite input
    #[error("Non-finite value in column {0}")]
    NonFinite(String),

    /// Dimension mismatch
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual dimension
        actual: usize,
    },

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// Data error
    #[error(transparent)]
    Data(#[from] navigator_data::DataError),
}
