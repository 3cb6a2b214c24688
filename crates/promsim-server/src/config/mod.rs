//! Service config loader (strict parsing).

pub mod schema;

use std::fs;
use std::io::ErrorKind;

use promsim_core::error::{DemoError, Result};

pub use schema::{SamplerSection, ServerConfig, ServerSection, SimulateSection};

/// Default config file, resolved against the working directory.
pub const DEFAULT_PATH: &str = "promsim.yaml";

pub fn load_from_file(path: &str) -> Result<ServerConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| DemoError::Config(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

/// Like `load_from_file`, but a missing file yields the built-in defaults.
pub fn load_or_default(path: &str) -> Result<ServerConfig> {
    match fs::read_to_string(path) {
        Ok(s) => load_from_str(&s),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!(path, "config file not found, using defaults");
            Ok(ServerConfig::default())
        }
        Err(e) => Err(DemoError::Config(format!("read config failed ({path}): {e}"))),
    }
}

pub fn load_from_str(s: &str) -> Result<ServerConfig> {
    // An empty document deserializes to unit, not a mapping.
    if s.trim().is_empty() {
        return Ok(ServerConfig::default());
    }
    let cfg: ServerConfig = serde_yaml::from_str(s)
        .map_err(|e| DemoError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
