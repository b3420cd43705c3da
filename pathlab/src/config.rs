//! Runtime configuration, loaded from TOML and overridden by CLI flags.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{LabError, Result};

/// Smallest grid that can hold distinct start and end cells.
pub const MIN_SIZE: i32 = 2;
/// Largest grid accepted.
pub const MAX_SIZE: i32 = 200;

fn default_size() -> i32 {
    pathlab_core::DEFAULT_SIZE
}

fn default_step_delay_ms() -> u64 {
    20
}

/// Lab configuration.
///
/// ```toml
/// size = 25
/// step_delay_ms = 20
/// seed = 42        # optional, for reproducible mazes
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LabConfig {
    /// Grid side length N.
    #[serde(default = "default_size")]
    pub size: i32,

    /// Delay between animation steps, in milliseconds.
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u64,

    /// Maze RNG seed. Unseeded runs draw from the thread RNG.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            step_delay_ms: default_step_delay_ms(),
            seed: None,
        }
    }
}

impl LabConfig {
    /// Read and parse a TOML file. Missing keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&text)?;
        log::debug!("loaded config from {}: {config:?}", path.as_ref().display());
        Ok(config)
    }

    /// Reject values the lab cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.size) {
            return Err(LabError::Config(format!(
                "size must be between {MIN_SIZE} and {MAX_SIZE}, got {}",
                self.size
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }
}
