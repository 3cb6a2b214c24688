//! Application endpoints: service descriptor, alert webhook, scenarios.

pub mod simulate;

use axum::{body::Bytes, http::StatusCode, Json};
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};

/// RFC 3339 UTC timestamp with millisecond precision.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// GET /
pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "DevOps Monitoring Application",
        "status": "running",
        "timestamp": timestamp(),
        "endpoints": {
            "metrics": "/metrics",
            "health": "/health",
            "simulate": "/simulate/:scenario",
            "webhook": "/webhook",
        },
    }))
}

/// POST /webhook
///
/// Accepts any body (typically an Alertmanager notification) and logs it.
/// An empty body is treated as `{}`; a body that is not JSON is logged as
/// text. The reply is always 200.
pub async fn webhook(body: Bytes) -> (StatusCode, Json<Value>) {
    match parse_webhook_body(&body) {
        Some(doc) => {
            let alerts = doc
                .get("alerts")
                .and_then(Value::as_array)
                .map(|a| a.len());
            let pretty = serde_json::to_string_pretty(&doc).unwrap_or_else(|_| doc.to_string());
            match alerts {
                Some(n) => tracing::info!(alerts = n, "alert webhook received:\n{pretty}"),
                None => tracing::info!("alert webhook received:\n{pretty}"),
            }
        }
        None => {
            let raw = String::from_utf8_lossy(&body);
            tracing::info!(bytes = body.len(), "alert webhook received non-JSON body:\n{raw}");
        }
    }

    (StatusCode::OK, Json(json!({ "status": "received" })))
}

/// Empty (or whitespace-only) bodies become `{}`; invalid JSON is `None`.
pub fn parse_webhook_body(body: &[u8]) -> Option<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Some(json!({}));
    }
    serde_json::from_slice(body).ok()
}
