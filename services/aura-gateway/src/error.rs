//! Analysis failure kinds and their HTTP representation.
//!
//! Every failure inside the analysis pipeline becomes a `500` carrying the
//! message as `detail`; `kind` names the failure class.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

use crate::provider::ProviderError;

/// Classified failure of a single analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A required setting or secret is missing
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The completion provider failed
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The completion provider did not answer in time
    #[error("Provider call timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    /// The completion is not parseable JSON
    #[error("Could not parse completion as JSON: {0}")]
    Extraction(#[source] serde_json::Error),

    /// The parsed JSON violates the sentiment schema
    #[error("Completion failed validation: {0}")]
    Validation(String),
}

impl AnalysisError {
    /// Stable machine-readable name of the failure class.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::Provider(_) => "provider",
            Self::Timeout(_) => "timeout",
            Self::Extraction(_) => "extraction",
            Self::Validation(_) => "validation",
        }
    }
}

impl From<aura_common::Error> for AnalysisError {
    fn from(err: aura_common::Error) -> Self {
        Self::Configuration(err.to_string())
    }
}

/// Failure response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
    pub kind: String,
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                detail: self.to_string(),
                kind: self.kind().into(),
            }),
        )
            .into_response()
    }
}

/// Request body rejected before analysis started.
#[derive(Debug)]
pub struct RequestValidationError(pub JsonRejection);

impl From<JsonRejection> for RequestValidationError {
    fn from(rejection: JsonRejection) -> Self {
        Self(rejection)
    }
}

impl IntoResponse for RequestValidationError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                detail: self.0.body_text(),
                kind: "request_validation".into(),
            }),
        )
            .into_response()
    }
}
