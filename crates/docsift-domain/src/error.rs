//! Error types crossing the domain seams

use thiserror::Error;

/// Errors an [`Analyzer`](crate::traits::Analyzer) may return
///
/// Every variant is treated as transient by the retry layer; there is no
/// per-variant retry policy.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyzerError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// The service answered but the payload could not be used
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The request did not complete in time
    #[error("Analysis timed out after {0} seconds")]
    Timeout(u64),

    /// Generic error
    #[error("Analyzer error: {0}")]
    Other(String),
}

/// Errors a [`RecordSink`](crate::traits::RecordSink) may return
#[derive(Error, Debug)]
pub enum SinkError {
    /// Underlying write failed
    #[error("Sink I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Record could not be serialized
    #[error("Sink serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The destination refused the write (remote store down, quota exceeded)
    #[error("Sink unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyzer_error_display() {
        let err = AnalyzerError::Communication("HTTP 503".to_string());
        assert_eq!(err.to_string(), "Communication error: HTTP 503");

        let err = AnalyzerError::Timeout(30);
        assert_eq!(err.to_string(), "Analysis timed out after 30 seconds");
    }

    #[test]
    fn test_sink_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err: SinkError = io.into();
        assert!(matches!(err, SinkError::Io(_)));
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_sink_unavailable_display() {
        let err = SinkError::Unavailable("quota exceeded".to_string());
        assert_eq!(err.to_string(), "Sink unavailable: quota exceeded");
    }
}
