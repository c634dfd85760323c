//! Error type aggregating the workspace crates.

use thiserror::Error;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, NavigatorError>;

/// Any failure of an analysis run.
#[derive(Debug, Error)]
pub enum NavigatorError {
    /// Fetching or parsing input data failed
    #[error(transparent)]
    Data(#[from] navigator_data::DataError),

    /// Alignment or regression failed
    #[error(transparent)]
    Model(#[from] navigator_model::ModelError),

    /// Text generation failed
    #[error(transparent)]
    Narrative(#[from] navigator_narrative::NarrativeError),

    /// Writing exports failed
    #[error(transparent)]
    Export(#[from] navigator_output::ExportError),

    /// Building the report failed
    #[error(transparent)]
    Report(#[from] navigator_output::ReportError),

    /// The request has no asset ticker
    #[error("No ticker given")]
    EmptyTicker,
}
