//! HTTP request handlers for the analysis service.
//!
//! Implements document analysis and health check endpoints using axum.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use docsift_domain::traits::RecordSink;
use docsift_domain::{AnalysisRequest, FlatRecord};
use docsift_pipeline::{Orchestrator, PipelineError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, warn};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Runs each request through the analysis pipeline
    pub orchestrator: Arc<Orchestrator>,
    /// Receives every successfully built record
    pub sink: Arc<dyn RecordSink>,
}

/// Successful analysis response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    /// Always "success"
    pub status: String,
    /// Record identifier
    pub id: String,
    /// Flattened analysis
    pub analysis_result: FlatRecord,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Overall health status
    pub status: String,
    /// Name of the configured analyzer
    pub analyzer: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub struct AppError(PipelineError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            warn!("Rejected request: {}", self.0);
            StatusCode::BAD_REQUEST
        } else {
            error!("Analysis failed: {}", self.0);
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<PipelineError> for AppError {
    fn from(e: PipelineError) -> Self {
        AppError(e)
    }
}

/// POST /api/analyze - Analyze a document
///
/// The body is parsed here rather than through the `Json` extractor so that
/// malformed input gets the same `{error}` envelope as every other failure.
async fn analyze_document(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let request: AnalysisRequest = serde_json::from_slice(&body)
        .map_err(|e| PipelineError::InvalidRequest(e.to_string()))?;

    let record = state.orchestrator.process(request).await?;

    if let Err(e) = state.sink.store(&record).await {
        error!("Failed to store record {}: {}", record.id, e);
    }

    Ok(Json(AnalyzeResponse {
        status: "success".to_string(),
        id: record.id,
        analysis_result: record.analysis_result,
    }))
}

/// GET /health - Liveness check
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        analyzer: state.orchestrator.analyzer_name().to_string(),
    })
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/api/analyze", post(analyze_document))
        .route("/health", get(health_check))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use docsift_llm::MockAnalyzer;
    use docsift_pipeline::{MemorySink, PipelineConfig};
    use tower::ServiceExt; // for oneshot

    fn create_test_state() -> AppState {
        AppState {
            orchestrator: Arc::new(Orchestrator::new(
                Arc::new(MockAnalyzer::new()),
                PipelineConfig::default(),
            )),
            sink: Arc::new(MemorySink::new()),
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = create_router(create_test_state());

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_analyze_document() {
        let app = create_router(create_test_state());
        let body = r#"{"documentContent": "Quarterly profit rose."}"#;

        let request = Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_error_status_mapping() {
        let missing = PipelineError::MissingField("documentContent".into());
        let response = AppError(missing).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError(PipelineError::ExhaustedRetries {
            attempts: 4,
            message: "HTTP 503".into(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
