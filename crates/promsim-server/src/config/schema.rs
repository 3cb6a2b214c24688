use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;
use promsim_core::error::{DemoError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub simulate: SimulateSection,

    #[serde(default)]
    pub sampler: SamplerSection,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            server: ServerSection::default(),
            simulate: SimulateSection::default(),
            sampler: SamplerSection::default(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(DemoError::Config(format!(
                "unsupported config version: {}",
                self.version
            )));
        }
        self.server.validate()?;
        self.simulate.validate()?;
        self.sampler.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            DemoError::Config(format!(
                "server.listen must be a valid socket address ({}): {e}",
                self.listen
            ))
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulateSection {
    #[serde(default = "default_slow_delay_ms")]
    pub slow_delay_ms: u64,
}

impl Default for SimulateSection {
    fn default() -> Self {
        Self {
            slow_delay_ms: default_slow_delay_ms(),
        }
    }
}

impl SimulateSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=60_000).contains(&self.slow_delay_ms) {
            return Err(DemoError::Config(
                "simulate.slow_delay_ms must be between 1 and 60000".into(),
            ));
        }
        Ok(())
    }

    pub fn slow_delay(&self) -> Duration {
        Duration::from_millis(self.slow_delay_ms)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SamplerSection {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl Default for SamplerSection {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}

impl SamplerSection {
    pub fn validate(&self) -> Result<()> {
        if !(1_000..=3_600_000).contains(&self.interval_ms) {
            return Err(DemoError::Config(
                "sampler.interval_ms must be between 1000 and 3600000".into(),
            ));
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

fn default_version() -> u32 {
    1
}
fn default_listen() -> String {
    "0.0.0.0:3000".into()
}
fn default_slow_delay_ms() -> u64 {
    2000
}
fn default_interval_ms() -> u64 {
    10_000
}
