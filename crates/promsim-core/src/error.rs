//! Shared error type across promsim crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Scenario name is not in the lookup table.
    UnknownScenario,
    /// Deliberate failure produced by the `error` scenario.
    Simulated,
    /// Invalid or unreadable configuration.
    Config,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::UnknownScenario => "UNKNOWN_SCENARIO",
            ClientCode::Simulated => "SIMULATED",
            ClientCode::Config => "CONFIG",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, DemoError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error("unknown scenario: {0}")]
    UnknownScenario(String),
    #[error("simulated failure")]
    Simulated,
    #[error("config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl DemoError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            DemoError::UnknownScenario(_) => ClientCode::UnknownScenario,
            DemoError::Simulated => ClientCode::Simulated,
            DemoError::Config(_) => ClientCode::Config,
            DemoError::Internal(_) => ClientCode::Internal,
        }
    }
}
