//! Operational HTTP endpoints.
//!
//! - `/health`  : liveness with uptime and memory snapshot
//! - `/metrics` : Prometheus text format

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::app_state::AppState;
use crate::process::{self, MemorySnapshot};

/// Content type of the text exposition format.
pub const METRICS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub uptime: f64,
    pub timestamp: String,
    pub memory: MemorySnapshot,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "healthy",
        uptime: process::uptime(state.started_at()),
        timestamp: crate::api::timestamp(),
        memory: process::memory_snapshot(),
    })
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let body = state.metrics().render();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, METRICS_CONTENT_TYPE)],
        body,
    )
        .into_response()
}
