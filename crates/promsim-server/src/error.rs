//! HTTP-facing errors.
//!
//! `DemoError` lives in core and cannot implement axum traits there, so the
//! server wraps it. The two deliberate error paths (unknown scenario, the
//! simulated failure) have fixed bodies.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use promsim_core::{DemoError, Scenario};

#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub DemoError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            DemoError::UnknownScenario(name) => {
                tracing::debug!(scenario = %name, "unknown scenario");
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "message": "Unknown scenario",
                        "availableScenarios": Scenario::names(),
                    })),
                )
                    .into_response()
            }
            DemoError::Simulated => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "message": "Simulated error",
                    "scenario": Scenario::Error,
                    "error": "Internal Server Error",
                })),
            )
                .into_response(),
            other => {
                let code = other.client_code();
                tracing::warn!(error = %other, code = code.as_str(), "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "message": other.to_string(),
                        "code": code.as_str(),
                    })),
                )
                    .into_response()
            }
        }
    }
}
