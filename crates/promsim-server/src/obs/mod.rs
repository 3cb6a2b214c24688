//! In-process metrics rendered in the Prometheus text exposition format.
//!
//! Metrics are stored as atomics (sharded by label set in `DashMap`) and
//! rendered by the `/metrics` handler. The registry lives in `AppState` and is
//! created once at startup.

pub mod metrics;

pub use metrics::{AppMetrics, CounterVec, Gauge, HistogramVec};
