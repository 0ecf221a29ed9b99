//! Error types for Mobility Flux

use thiserror::Error;

/// Errors that can occur during computation
///
/// Missing or degenerate data is never an error: indicators report it as `None`.
#[derive(Debug, Error)]
pub enum ComputeError {
    #[error(
        "{0} is not a correct value of interaction, only None, 'call', 'text', and 'call_duration' are accepted"
    )]
    InvalidInteraction(String),

    #[error("Unknown summary mode: {0}")]
    InvalidSummary(String),

    #[error("Indicator not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Encoding error: {0}")]
    EncodingError(String),
}
