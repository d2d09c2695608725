//! Observer that forwards pipeline events to `tracing`

use docsift_domain::traits::AnalysisObserver;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Default observer used by the server
///
/// Event levels: requests and completions at `info`, retried failures and
/// field mismatches at `warn`, terminal failures at `error`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl AnalysisObserver for TracingObserver {
    fn request_received(&self, id: Option<&str>, content_len: usize) {
        info!(
            "Received analysis request {} ({} chars)",
            id.unwrap_or("<generated>"),
            content_len
        );
    }

    fn attempt_failed(&self, attempt: u32, delay: Duration, error: &str) {
        warn!(
            "Analysis attempt {} failed: {}; retrying in {} ms",
            attempt,
            error,
            delay.as_millis()
        );
    }

    fn retries_exhausted(&self, attempts: u32, error: &str) {
        error!("Analysis failed after {} attempts: {}", attempts, error);
    }

    fn field_mismatch(&self, field: &str, reason: &str) {
        warn!("Field '{}' ignored: {}", field, reason);
    }

    fn request_completed(&self, id: &str, elapsed: Duration) {
        info!("Completed analysis {} in {} ms", id, elapsed.as_millis());
    }

    fn request_failed(&self, error: &str) {
        debug!("Request rejected: {}", error);
    }
}
