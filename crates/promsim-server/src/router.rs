//! Axum router wiring.
//!
//! Every route, `/metrics` included, runs behind the instrumentation
//! middleware.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{api, app_state::AppState, ops, transport};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::index))
        .route("/health", get(ops::health))
        .route("/metrics", get(ops::metrics))
        .route("/webhook", post(api::webhook))
        .route("/simulate/:scenario", get(api::simulate::simulate))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            transport::instrument::track_requests,
        ))
        .with_state(state)
}
