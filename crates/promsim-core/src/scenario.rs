//! Scenario lookup table for `/simulate/:scenario`.
//!
//! Each scenario is a fixed behavior; there is no state carried between calls.
//! Matching is exact and case-sensitive.

use serde::Serialize;

use crate::error::{DemoError, Result};

/// A named simulation behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    /// Normal operation; refreshes the active-user gauge.
    Success,
    /// Delayed response.
    Slow,
    /// HTTP 500 plus one `app_errors_total{type="simulated"}`.
    Error,
    /// Records current heap usage into the memory gauge.
    Memory,
    /// Simulated active-user spike.
    Users,
}

impl Scenario {
    /// Every scenario, in the order advertised to clients.
    pub const ALL: [Scenario; 5] = [
        Scenario::Success,
        Scenario::Slow,
        Scenario::Error,
        Scenario::Memory,
        Scenario::Users,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Scenario::Success => "success",
            Scenario::Slow => "slow",
            Scenario::Error => "error",
            Scenario::Memory => "memory",
            Scenario::Users => "users",
        }
    }

    /// Names of all scenarios, for the 400 guidance body.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|s| s.as_str()).collect()
    }

    /// Resolve a path segment. Unknown names are `DemoError::UnknownScenario`.
    pub fn parse(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == name)
            .ok_or_else(|| DemoError::UnknownScenario(name.to_string()))
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Scenario {
    type Err = DemoError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
