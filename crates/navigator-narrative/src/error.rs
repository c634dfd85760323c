//! Error types for narrative generation.

use thiserror::Error;

/// Result type for narrative operations.
pub type Result<T> = std::result::Result<T, NarrativeError>;

/// Failures of the remote text-generation service.
#[derive(Debug, Error)]
pub enum NarrativeError {
    /// Transport failure or undecodable body
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// The service answered without any choices
    #[error("Text generation returned no choices")]
    EmptyResponse,

    /// No API key configured
    #[error("Missing API key: set OPENAI_API_KEY")]
    MissingApiKey,
}
