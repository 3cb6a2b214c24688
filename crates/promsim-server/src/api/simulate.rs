//! GET /simulate/:scenario

use std::ops::Range;

use axum::{
    extract::{Path, State},
    Json,
};
use rand::Rng;
use serde_json::{json, Value};

use promsim_core::{DemoError, Scenario};

use crate::app_state::AppState;
use crate::error::ApiError;
use crate::process;

/// Active-user range written by the `success` scenario.
pub const SUCCESS_USERS: Range<u32> = 50..150;
/// Active-user range written by the `users` scenario.
pub const SPIKE_USERS: Range<u32> = 100..300;

pub async fn simulate(
    State(app): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let scenario = Scenario::parse(&name)?;
    let metrics = app.metrics();

    let body = match scenario {
        Scenario::Success => {
            let users = random_users(SUCCESS_USERS);
            metrics.active_users.set(f64::from(users));
            json!({ "message": "Operation succeeded", "scenario": scenario })
        }
        Scenario::Slow => {
            let delay = app.cfg().simulate.slow_delay();
            tokio::time::sleep(delay).await;
            json!({
                "message": "Slow operation",
                "scenario": scenario,
                "delay": format_delay(delay.as_millis()),
            })
        }
        Scenario::Error => {
            metrics.errors.inc(&[("type", "simulated")]);
            return Err(DemoError::Simulated.into());
        }
        Scenario::Memory => {
            let used = process::memory_snapshot().heap_used;
            metrics.memory_usage.set(used as f64);
            json!({
                "message": "Memory usage recorded",
                "scenario": scenario,
                "memoryUsed": process::format_megabytes(used),
            })
        }
        Scenario::Users => {
            let users = random_users(SPIKE_USERS);
            metrics.active_users.set(f64::from(users));
            json!({
                "message": "Active users updated",
                "scenario": scenario,
                "activeUsers": users,
            })
        }
    };

    Ok(Json(body))
}

fn random_users(range: Range<u32>) -> u32 {
    rand::rng().random_range(range)
}

/// `2000` -> `"2s"`, `1500` -> `"1500ms"`.
fn format_delay(ms: u128) -> String {
    if ms % 1000 == 0 {
        format!("{}s", ms / 1000)
    } else {
        format!("{ms}ms")
    }
}
