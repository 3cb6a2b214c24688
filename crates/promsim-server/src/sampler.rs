//! Periodic gauge sampler.
//!
//! Overwrites the memory and active-user gauges on a fixed interval,
//! independent of request traffic. Runs for the life of the process.

use std::ops::Range;
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::obs::AppMetrics;
use crate::process;

/// Active-user range written on every tick.
pub const SAMPLED_USERS: Range<u32> = 20..70;

/// One sampler tick.
pub fn sample_once(metrics: &AppMetrics) {
    let heap = process::memory_snapshot().heap_used;
    let users = rand::rng().random_range(SAMPLED_USERS);

    metrics.memory_usage.set(heap as f64);
    metrics.active_users.set(f64::from(users));
    tracing::trace!(heap, users, "sampler tick");
}

/// Spawn the sampler loop. The first tick fires one `period` after start.
pub fn spawn(metrics: Arc<AppMetrics>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            sample_once(&metrics);
        }
    })
}
