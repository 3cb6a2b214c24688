//! Shared application state for the promsim server.
//!
//! Holds the validated config, the process-wide metrics registry and the boot
//! instant used for uptime. Cloning is cheap (`Arc` inside).

use std::sync::Arc;
use std::time::Instant;

use crate::config::ServerConfig;
use crate::obs::AppMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    metrics: Arc<AppMetrics>,
}

struct AppStateInner {
    cfg: ServerConfig,
    started_at: Instant,
}

impl AppState {
    pub fn new(cfg: ServerConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                started_at: Instant::now(),
            }),
            metrics: Arc::new(AppMetrics::new()),
        }
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn metrics(&self) -> Arc<AppMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn started_at(&self) -> Instant {
        self.inner.started_at
    }
}
