//! Process introspection: uptime and memory.
//!
//! Memory figures come from `/proc/self/status` on Linux. Elsewhere (or when
//! the file cannot be read) every field is 0.

use std::time::Instant;

use serde::Serialize;

/// Memory snapshot in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemorySnapshot {
    /// Resident set size (`VmRSS`).
    pub rss: u64,
    /// Virtual memory size (`VmSize`).
    pub virtual_size: u64,
    /// Data segment, i.e. heap plus anonymous mappings (`VmData`).
    pub heap_used: u64,
}

/// Seconds since `started_at`.
pub fn uptime(started_at: Instant) -> f64 {
    started_at.elapsed().as_secs_f64()
}

#[cfg(target_os = "linux")]
pub fn memory_snapshot() -> MemorySnapshot {
    match std::fs::read_to_string("/proc/self/status") {
        Ok(s) => parse_proc_status(&s),
        Err(e) => {
            tracing::debug!(error = %e, "reading /proc/self/status failed");
            MemorySnapshot::default()
        }
    }
}

#[cfg(not(target_os = "linux"))]
pub fn memory_snapshot() -> MemorySnapshot {
    MemorySnapshot::default()
}

/// Parse the `Vm*` lines of a `/proc/<pid>/status` document.
pub fn parse_proc_status(s: &str) -> MemorySnapshot {
    let mut snap = MemorySnapshot::default();
    for line in s.lines() {
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        let slot = match key {
            "VmRSS" => &mut snap.rss,
            "VmSize" => &mut snap.virtual_size,
            "VmData" => &mut snap.heap_used,
            _ => continue,
        };
        // "   1234 kB"
        if let Some(kb) = rest.split_whitespace().next().and_then(|v| v.parse::<u64>().ok()) {
            *slot = kb.saturating_mul(1024);
        }
    }
    snap
}

/// `"x.xx MB"` with 1 MB = 1024 * 1024 bytes.
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}
