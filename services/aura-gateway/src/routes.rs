//! Route definitions for the Aura gateway.

use aura_common::logging::generate_trace_id;
use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::Instrument;

use crate::analysis::SentimentAnalyzer;
use crate::error::RequestValidationError;
use crate::sentiment::AnalysisRequest;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: SentimentAnalyzer,
}

/// Root identity response.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub service: String,
}

/// Build the application routes (without access headers).
///
/// `/process_text` accepts bodies of any size.
pub fn build_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route(
            "/process_text",
            post(process_text_handler).layer(DefaultBodyLimit::disable()),
        )
        .with_state(state)
        .merge(health_routes())
}

/// Build health check routes.
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_handler))
}

async fn root_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Sentiment Aura Backend Running!".into(),
    })
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        service: "aura-gateway".into(),
    })
}

/// Analyze submitted text.
///
/// Body problems are answered with 422 before analysis starts; analysis
/// failures become 500 with the failure message as `detail`.
async fn process_text_handler(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "Rejected request body");
            return RequestValidationError::from(rejection).into_response();
        }
    };

    let trace_id = generate_trace_id();
    let span = tracing::info_span!("process_text", trace_id = %trace_id);

    async move {
        tracing::info!(chars = request.text.chars().count(), "Received text");
        tracing::debug!(text = %request.text, "Received text content");

        match state.analyzer.analyze(&request.text).await {
            Ok(result) => {
                tracing::info!(
                    sentiment = result.sentiment,
                    emotion = %result.emotion,
                    keywords = ?result.keywords,
                    "Analysis complete"
                );
                Json(result).into_response()
            }
            Err(e) => {
                tracing::error!(kind = e.kind(), error = %e, "Analysis failed");
                e.into_response()
            }
        }
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_root_message() {
        let Json(body) = root_handler().await;
        assert_eq!(body.message, "Sentiment Aura Backend Running!");
    }

    #[tokio::test]
    async fn test_health() {
        let Json(body) = health_handler().await;
        assert_eq!(body.status, "healthy");
        assert_eq!(body.service, "aura-gateway");
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
    }
}
