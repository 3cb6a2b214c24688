//! End-to-end tests against the real router on an ephemeral port.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::{Duration, Instant};

use serde_json::{json, Value};

use promsim_server::{app_state::AppState, config::ServerConfig, router};

async fn spawn_app() -> (String, AppState) {
    let state = AppState::new(ServerConfig::default());
    let app = router::build_router(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), state)
}

async fn get_json(base: &str, path: &str) -> (u16, Value) {
    let resp = reqwest::get(format!("{base}{path}")).await.unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

fn requests(state: &AppState, method: &str, route: &str, status: &str) -> u64 {
    state
        .metrics()
        .http_requests
        .get(&[("method", method), ("route", route), ("status", status)])
}

#[tokio::test]
async fn index_describes_service() {
    let (base, _) = spawn_app().await;
    let (status, body) = get_json(&base, "/").await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "running");
    assert_eq!(body["endpoints"]["metrics"], "/metrics");
    assert_eq!(body["endpoints"]["health"], "/health");
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn health_reports_healthy_and_uptime() {
    let (base, _) = spawn_app().await;
    let (status, body) = get_json(&base, "/health").await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime"].as_f64().unwrap() >= 0.0);
    assert!(body["memory"]["rss"].is_u64());
    assert!(body["memory"]["heapUsed"].is_u64());
}

#[tokio::test]
async fn request_counter_matches_request_count() {
    let (base, state) = spawn_app().await;
    for _ in 0..7 {
        let (status, _) = get_json(&base, "/health").await;
        assert_eq!(status, 200);
    }
    assert_eq!(requests(&state, "GET", "/health", "200"), 7);
    assert_eq!(
        state
            .metrics()
            .http_request_duration
            .count(&[("method", "GET"), ("route", "/health")]),
        7
    );
}

#[tokio::test]
async fn metrics_endpoint_serves_exposition_text() {
    let (base, _) = spawn_app().await;
    get_json(&base, "/simulate/error").await;

    let resp = reqwest::get(format!("{base}/metrics")).await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let ctype = resp.headers()["content-type"].to_str().unwrap().to_owned();
    assert!(ctype.starts_with("text/plain; version=0.0.4"));
    let text = resp.text().await.unwrap();

    for name in [
        "http_requests_total",
        "http_request_duration_seconds",
        "app_memory_usage_bytes",
        "app_errors_total",
        "app_active_users",
    ] {
        assert!(text.contains(&format!("# TYPE {name} ")), "missing {name}");
    }

    // Every sample line is `<name>[{labels}] <number>`.
    for line in text.lines().filter(|l| !l.is_empty() && !l.starts_with('#')) {
        let (series, value) = line.rsplit_once(' ').unwrap();
        assert!(value.parse::<f64>().is_ok(), "bad value in {line:?}");
        let name = series.split('{').next().unwrap();
        assert!(
            name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'),
            "bad name in {line:?}"
        );
    }
    assert!(text.contains(
        "http_requests_total{method=\"GET\",route=\"/simulate/error\",status=\"500\"} 1"
    ));
}

#[tokio::test]
async fn webhook_accepts_any_json() {
    let (base, state) = spawn_app().await;
    let client = reqwest::Client::new();
    let payload = json!({
        "status": "firing",
        "alerts": [{ "labels": { "alertname": "HighErrorRate" } }],
    });

    let resp = client
        .post(format!("{base}/webhook"))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "status": "received" }));

    let resp = client
        .post(format!("{base}/webhook"))
        .json(&json!([1, 2, 3]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(requests(&state, "POST", "/webhook", "200"), 2);
}

#[tokio::test]
async fn simulate_success_sets_active_users() {
    let (base, state) = spawn_app().await;
    let (status, body) = get_json(&base, "/simulate/success").await;
    assert_eq!(status, 200);
    assert_eq!(body["scenario"], "success");
    let users = state.metrics().active_users.get();
    assert!((50.0..150.0).contains(&users), "users={users}");
}

#[tokio::test]
async fn simulate_slow_waits_two_seconds() {
    let (base, _) = spawn_app().await;
    let started = Instant::now();
    let (status, body) = get_json(&base, "/simulate/slow").await;
    assert!(started.elapsed() >= Duration::from_secs(2));
    assert_eq!(status, 200);
    assert_eq!(body["scenario"], "slow");
    assert_eq!(body["delay"], "2s");
}

#[tokio::test]
async fn simulate_error_counts_exactly_once_per_call() {
    let (base, state) = spawn_app().await;
    let simulated = || state.metrics().errors.get(&[("type", "simulated")]);
    assert_eq!(simulated(), 0);

    for i in 1..=3 {
        let (status, body) = get_json(&base, "/simulate/error").await;
        assert_eq!(status, 500);
        assert_eq!(body["scenario"], "error");
        assert_eq!(body["error"], "Internal Server Error");
        assert_eq!(simulated(), i);
    }
    assert_eq!(requests(&state, "GET", "/simulate/error", "500"), 3);
}

#[tokio::test]
async fn simulate_memory_records_heap() {
    let (base, _) = spawn_app().await;
    let (status, body) = get_json(&base, "/simulate/memory").await;
    assert_eq!(status, 200);
    assert_eq!(body["scenario"], "memory");
    assert!(body["memoryUsed"].as_str().unwrap().ends_with(" MB"));
}

#[tokio::test]
async fn simulate_users_spikes_active_users() {
    let (base, state) = spawn_app().await;
    let (status, body) = get_json(&base, "/simulate/users").await;
    assert_eq!(status, 200);
    let users = body["activeUsers"].as_u64().unwrap();
    assert!((100..300).contains(&users), "users={users}");
    assert_eq!(state.metrics().active_users.get(), users as f64);
}

#[tokio::test]
async fn unknown_scenario_lists_valid_options() {
    let (base, state) = spawn_app().await;
    for name in ["explode", "SUCCESS", "slowly"] {
        let (status, body) = get_json(&base, &format!("/simulate/{name}")).await;
        assert_eq!(status, 400);
        assert_eq!(
            body["availableScenarios"],
            json!(["success", "slow", "error", "memory", "users"])
        );
    }
    assert_eq!(requests(&state, "GET", "/simulate/explode", "400"), 1);
    assert_eq!(state.metrics().errors.get(&[("type", "simulated")]), 0);
}

#[tokio::test]
async fn webhook_accepts_empty_and_non_json_bodies() {
    let (base, state) = spawn_app().await;
    let client = reqwest::Client::new();
    let url = format!("{base}/webhook");

    let requests_to_send = [
        client.post(&url),
        client
            .post(&url)
            .header("content-type", "application/json")
            .body(""),
        client
            .post(&url)
            .header("content-type", "text/plain")
            .body("disk almost full"),
        client
            .post(&url)
            .header("content-type", "application/json")
            .body("{not json"),
    ];
    let sent = requests_to_send.len() as u64;

    for req in requests_to_send {
        let resp = req.send().await.unwrap();
        assert_eq!(resp.status().as_u16(), 200);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body, json!({ "status": "received" }));
    }
    assert_eq!(requests(&state, "POST", "/webhook", "200"), sent);
}

#[tokio::test]
async fn unmatched_routes_and_methods_are_counted() {
    let (base, state) = spawn_app().await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/nope")).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 404);

    let resp = client.post(format!("{base}/health")).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 405);

    assert_eq!(requests(&state, "GET", "/nope", "404"), 1);
    assert_eq!(requests(&state, "POST", "/health", "405"), 1);
    assert_eq!(
        state
            .metrics()
            .http_request_duration
            .count(&[("method", "POST"), ("route", "/health")]),
        1
    );
}
