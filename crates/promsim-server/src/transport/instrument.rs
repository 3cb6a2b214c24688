//! Request instrumentation middleware.
//!
//! Times each request and, once the response exists, records
//! `http_requests_total{method,route,status}` and
//! `http_request_duration_seconds{method,route}`. The route label is the raw
//! request path. A request dropped before a response is produced records
//! nothing.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tokio::time::Instant;

use crate::app_state::AppState;

pub async fn track_requests(
    State(app): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let route = req.uri().path().to_owned();

    let resp = next.run(req).await;

    let elapsed = start.elapsed();
    let status = resp.status().as_u16();
    app.metrics().observe_request(&method, &route, status, elapsed);
    tracing::debug!(
        %method,
        %route,
        status,
        elapsed_ms = elapsed.as_millis() as u64,
        "request served"
    );

    resp
}
