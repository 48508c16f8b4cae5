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

//! The logging capability handed to the game loop.
//!
//! Library code logs through the `log` facade directly. Engine lifecycle
//! milestones and fatal errors additionally go through an injected
//! [`Logger`], so embedders can capture them without installing a global
//! logger.

pub use log::Level;
use std::sync::{Arc, Mutex};

/// A sink for engine lifecycle messages.
pub trait Logger: Send + Sync {
    /// Records `message` at `level`.
    fn log(&self, level: Level, message: &str);

    /// Records an informational message.
    fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    /// Records a warning.
    fn warn(&self, message: &str) {
        self.log(Level::Warn, message);
    }

    /// Records an error.
    fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }
}

/// Forwards to the `log` facade under a fixed target.
#[derive(Debug, Clone)]
pub struct LogFacadeLogger {
    target: String,
}

impl LogFacadeLogger {
    /// Creates a logger that emits records under `target`.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    /// The target records are emitted under.
    pub fn target(&self) -> &str {
        &self.target
    }
}

impl Default for LogFacadeLogger {
    fn default() -> Self {
        Self::new("pulse")
    }
}

impl Logger for LogFacadeLogger {
    fn log(&self, level: Level, message: &str) {
        log::log!(target: self.target.as_str(), level, "{message}");
    }
}

/// Keeps every message in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryLogger {
    entries: Arc<Mutex<Vec<(Level, String)>>>,
}

impl MemoryLogger {
    /// Creates an empty logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot of the recorded messages.
    pub fn entries(&self) -> Vec<(Level, String)> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Returns `true` if a message at `level` contains `needle`.
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.entries()
            .iter()
            .any(|(l, message)| *l == level && message.contains(needle))
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: Level, message: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push((level, message.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helpers_dispatch_to_levels() {
        let logger = MemoryLogger::new();
        logger.info("started");
        logger.warn("slow frame");
        logger.error("boom");

        assert_eq!(
            logger.entries(),
            vec![
                (Level::Info, "started".to_string()),
                (Level::Warn, "slow frame".to_string()),
                (Level::Error, "boom".to_string()),
            ]
        );
        assert!(logger.contains(Level::Warn, "slow"));
        assert!(!logger.contains(Level::Info, "boom"));
    }

    #[test]
    fn test_clones_share_entries() {
        let logger = MemoryLogger::new();
        let shared: Arc<dyn Logger> = Arc::new(logger.clone());
        shared.info("through the handle");
        assert_eq!(logger.entries().len(), 1);
    }

    #[test]
    fn test_facade_logger_keeps_target() {
        let logger = LogFacadeLogger::new("sandbox");
        assert_eq!(logger.target(), "sandbox");
        // No global logger is installed; this must simply not panic.
        logger.info("hello");
    }
}
