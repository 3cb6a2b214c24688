//! Metrics registry for the demo service.
//!
//! Counter and histogram vectors use dynamic labels backed by `DashMap`.
//! Labels are flattened into sorted key vectors so call-site order does not
//! matter. Histogram observations are accumulated in integer microseconds and
//! rendered in seconds.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Upper bounds (seconds) of `http_request_duration_seconds`.
pub const DURATION_BUCKETS_SECS: [f64; 5] = [0.1, 0.5, 1.0, 2.0, 5.0];

type LabelKey = Vec<(String, String)>;

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

fn label_str(key: &LabelKey) -> String {
    key.iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

fn header(out: &mut String, name: &str, help: &str, kind: &str) {
    let _ = writeln!(out, "# HELP {} {}", name, help);
    let _ = writeln!(out, "# TYPE {} {}", name, kind);
}

fn series(out: &mut String, name: &str, labels: &str, value: impl std::fmt::Display) {
    if labels.is_empty() {
        let _ = writeln!(out, "{} {}", name, value);
    } else {
        let _ = writeln!(out, "{}{{{}}} {}", name, labels, value);
    }
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value for a label set (0 if never incremented).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Render in Prometheus text exposition format.
    fn render(&self, name: &str, help: &str, out: &mut String) {
        header(out, name, help, "counter");
        let mut rows: Vec<(LabelKey, u64)> = self
            .map
            .iter()
            .map(|r| (r.key().clone(), r.value().load(Ordering::Relaxed)))
            .collect();
        rows.sort();
        for (key, val) in rows {
            series(out, name, &label_str(&key), val);
        }
    }
}

/// Unlabeled gauge holding the last value set.
#[derive(Default)]
pub struct Gauge {
    bits: AtomicU64,
}

impl Gauge {
    pub fn set(&self, v: f64) {
        self.bits.store(v.to_bits(), Ordering::Relaxed);
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        header(out, name, help, "gauge");
        series(out, name, "", self.get());
    }
}

struct AtomicHistogram {
    count: AtomicU64,
    sum_micros: AtomicU64,
    buckets: Vec<AtomicU64>,
}

impl AtomicHistogram {
    fn new(n: usize) -> Self {
        Self {
            count: AtomicU64::new(0),
            sum_micros: AtomicU64::new(0),
            buckets: (0..n).map(|_| AtomicU64::new(0)).collect(),
        }
    }
}

pub struct HistogramVec {
    bounds_secs: Vec<f64>,
    bounds_micros: Vec<u64>,
    map: DashMap<LabelKey, AtomicHistogram>,
}

impl HistogramVec {
    /// `bounds_secs` must be ascending.
    pub fn new(bounds_secs: &[f64]) -> Self {
        Self {
            bounds_secs: bounds_secs.to_vec(),
            bounds_micros: bounds_secs
                .iter()
                .map(|s| (s * 1_000_000.0).round() as u64)
                .collect(),
            map: DashMap::new(),
        }
    }

    /// Observe a duration and increment cumulative buckets.
    pub fn observe(&self, labels: &[(&str, &str)], duration: Duration) {
        let n = self.bounds_micros.len();
        let hist = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicHistogram::new(n));
        let micros = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);

        hist.count.fetch_add(1, Ordering::Relaxed);
        hist.sum_micros.fetch_add(micros, Ordering::Relaxed);

        // Cumulative: every bucket whose bound covers the value.
        for (i, &b) in self.bounds_micros.iter().enumerate() {
            if micros <= b {
                hist.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Number of observations for a label set.
    pub fn count(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|h| h.count.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Render in Prometheus text exposition format (unit: seconds).
    fn render(&self, name: &str, help: &str, out: &mut String) {
        header(out, name, help, "histogram");
        let mut keys: Vec<LabelKey> = self.map.iter().map(|r| r.key().clone()).collect();
        keys.sort();

        for key in keys {
            let Some(hist) = self.map.get(&key) else {
                continue;
            };
            let labels = label_str(&key);
            let prefix = if labels.is_empty() {
                String::new()
            } else {
                format!("{},", labels)
            };

            for (i, le) in self.bounds_secs.iter().enumerate() {
                let count = hist.buckets[i].load(Ordering::Relaxed);
                let _ = writeln!(out, "{}_bucket{{{}le=\"{}\"}} {}", name, prefix, le, count);
            }
            let count = hist.count.load(Ordering::Relaxed);
            let _ = writeln!(out, "{}_bucket{{{}le=\"+Inf\"}} {}", name, prefix, count);

            let sum = hist.sum_micros.load(Ordering::Relaxed) as f64 / 1_000_000.0;
            series(out, &format!("{}_sum", name), &labels, sum);
            series(out, &format!("{}_count", name), &labels, count);
        }
    }
}

/// The five metric families exported by the service.
pub struct AppMetrics {
    pub http_requests: CounterVec,
    pub http_request_duration: HistogramVec,
    pub memory_usage: Gauge,
    pub errors: CounterVec,
    pub active_users: Gauge,
}

impl Default for AppMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl AppMetrics {
    pub fn new() -> Self {
        Self {
            http_requests: CounterVec::default(),
            http_request_duration: HistogramVec::new(&DURATION_BUCKETS_SECS),
            memory_usage: Gauge::default(),
            errors: CounterVec::default(),
            active_users: Gauge::default(),
        }
    }

    /// Record one finished HTTP request.
    pub fn observe_request(&self, method: &str, route: &str, status: u16, elapsed: Duration) {
        let status = status.to_string();
        self.http_requests
            .inc(&[("method", method), ("route", route), ("status", &status)]);
        self.http_request_duration
            .observe(&[("method", method), ("route", route)], elapsed);
    }

    /// Render every family. Families without samples still get HELP/TYPE lines.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.http_requests.render(
            "http_requests_total",
            "Total HTTP requests received",
            &mut out,
        );
        self.http_request_duration.render(
            "http_request_duration_seconds",
            "HTTP request duration in seconds",
            &mut out,
        );
        self.memory_usage.render(
            "app_memory_usage_bytes",
            "Application memory usage in bytes",
            &mut out,
        );
        self.errors
            .render("app_errors_total", "Total application errors", &mut out);
        self.active_users.render(
            "app_active_users",
            "Number of active users in the system",
            &mut out,
        );
        out
    }
}
