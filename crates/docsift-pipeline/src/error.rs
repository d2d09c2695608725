//! Error types for the pipeline

use thiserror::Error;

/// Errors that end an analysis request
///
/// Normalization problems never appear here; they are reported to the
/// observer and resolved with schema defaults.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// A required request field is absent or empty
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// The request body could not be understood
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The analyzer kept failing; carries the last failure's message
    #[error("{message}")]
    ExhaustedRetries {
        /// Total analyzer invocations made
        attempts: u32,
        /// Message of the final failure
        message: String,
    },
}

impl PipelineError {
    /// Whether the caller is at fault (as opposed to the pipeline or its dependencies)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PipelineError::MissingField(_) | PipelineError::InvalidRequest(_)
        )
    }
}
