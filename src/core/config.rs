//! Host configuration loaded from TOML
//!
//! Everything here concerns the outer loop: frame pacing, the input queue,
//! where boss tuning lives. Gameplay constants stay in `combat::constants`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::combat::constants::FRAME_MS;
use crate::core::error::{Result, RingError};

/// Configuration for the tick loop and its collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Target tick period in milliseconds
    ///
    /// The loop redraws once per period and sleeps in between.
    pub frame_ms: u64,

    /// Capacity of the bounded input queue between the key reader and the tick loop
    pub input_queue_capacity: usize,

    /// Fixed seed for the enemy AI; entropy when absent
    pub seed: Option<u64>,

    /// Boss tuning file; the built-in table when absent
    pub catalog_path: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            frame_ms: FRAME_MS,
            input_queue_capacity: 8,
            seed: None,
            catalog_path: None,
        }
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from a TOML file; missing keys take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: GameConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.frame_ms == 0 {
            return Err(RingError::InvalidConfig("frame_ms must be positive".into()));
        }

        if self.input_queue_capacity == 0 {
            return Err(RingError::InvalidConfig(
                "input_queue_capacity must be positive".into(),
            ));
        }

        Ok(())
    }
}
