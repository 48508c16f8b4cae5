// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Engine configuration, loadable from and savable to JSON.

use crate::time::TimeUnit;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Failures while loading, saving or validating an [`EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read or written.
    #[error("configuration file error")]
    Io(#[from] std::io::Error),
    /// The configuration is not valid JSON for this schema.
    #[error("malformed configuration")]
    Parse(#[from] serde_json::Error),
    /// A value is outside its allowed range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Window creation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Title shown by the window system.
    pub title: String,
    /// Initial width in physical pixels.
    pub width: u32,
    /// Initial height in physical pixels.
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Pulse Engine".to_string(),
            width: 800,
            height: 600,
        }
    }
}

/// How the loop advances simulated time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopMode {
    /// Fixed-size updates from a lag accumulator, with interpolated rendering.
    #[default]
    Fixed,
    /// One update per iteration with the raw elapsed time.
    Variable,
}

/// Settings for the game loop and its window.
///
/// Missing JSON fields take their default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fixed updates per second.
    pub target_ups: u32,
    /// Maximum fixed updates run in one iteration before rendering.
    pub max_frame_skips: u32,
    /// The unit the loop samples its clock in.
    pub time_unit: TimeUnit,
    /// When the skip bound is hit, keep only the fractional part of the lag
    /// instead of carrying it all into the next iteration.
    pub drop_excess_lag: bool,
    /// Fixed or variable timestep. `target_ups`, `max_frame_skips` and
    /// `drop_excess_lag` only apply to [`LoopMode::Fixed`].
    pub loop_mode: LoopMode,
    /// Window settings.
    pub window: WindowConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            target_ups: 60,
            max_frame_skips: 10,
            time_unit: TimeUnit::Seconds,
            drop_excess_lag: false,
            loop_mode: LoopMode::Fixed,
            window: WindowConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parses a configuration from a JSON string and validates it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Saves the configuration as pretty-printed JSON.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Checks that every value is usable by the loop.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_ups == 0 {
            return Err(ConfigError::Invalid("target_ups must be positive".into()));
        }
        if self.max_frame_skips == 0 {
            return Err(ConfigError::Invalid(
                "max_frame_skips must be positive".into(),
            ));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size {}x{} must be non-zero",
                self.window.width, self.window.height
            )));
        }
        Ok(())
    }
}
