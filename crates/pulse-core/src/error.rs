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

//! The engine-level error type.

use crate::config::ConfigError;
use crate::renderer::BatchError;
use std::fmt;
use thiserror::Error;

/// The per-frame phase a subsystem was in when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePhase {
    /// `begin_frame`.
    Begin,
    /// `end_frame`.
    End,
    /// `resize`.
    Resize,
}

impl fmt::Display for FramePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FramePhase::Begin => write!(f, "begin_frame"),
            FramePhase::End => write!(f, "end_frame"),
            FramePhase::Resize => write!(f, "resize"),
        }
    }
}

/// Every failure the engine can surface to its entry point.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A subsystem failed while initializing. Startup is aborted.
    #[error("subsystem '{subsystem}' failed to initialize")]
    SubsystemInit {
        /// Name of the failing subsystem.
        subsystem: String,
        /// The underlying failure.
        #[source]
        source: anyhow::Error,
    },

    /// A subsystem failed during a per-frame call.
    #[error("subsystem '{subsystem}' failed during {phase}")]
    SubsystemFrame {
        /// Name of the failing subsystem.
        subsystem: String,
        /// The call that failed.
        phase: FramePhase,
        /// The underlying failure.
        #[source]
        source: anyhow::Error,
    },

    /// A subsystem failed to release its resources.
    #[error("subsystem '{subsystem}' failed to dispose")]
    SubsystemDispose {
        /// Name of the failing subsystem.
        subsystem: String,
        /// The underlying failure.
        #[source]
        source: anyhow::Error,
    },

    /// An operation was called in a lifecycle state that does not allow it.
    #[error("lifecycle violation: {0}")]
    Lifecycle(String),

    /// A game or game-state hook returned an error.
    #[error("game hook '{hook}' failed")]
    Hook {
        /// Name of the hook, e.g. `"update"`.
        hook: &'static str,
        /// The underlying failure.
        #[source]
        source: anyhow::Error,
    },

    /// The display could not be created or updated.
    #[error("display failure")]
    Display(#[source] anyhow::Error),

    /// The engine configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The batcher was misused or failed.
    #[error("render failure: {0}")]
    Render(#[from] BatchError),
}

impl EngineError {
    /// Wraps a hook failure with the hook's name.
    pub fn hook(hook: &'static str, source: anyhow::Error) -> Self {
        EngineError::Hook { hook, source }
    }

    /// Returns `true` for errors raised before the loop started running.
    pub fn is_startup(&self) -> bool {
        matches!(
            self,
            EngineError::SubsystemInit { .. }
                | EngineError::Config(_)
                | EngineError::Hook { hook: "init", .. }
        )
    }
}

/// A specialized `Result` for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_subsystem_frame_display_names_phase() {
        let err = EngineError::SubsystemFrame {
            subsystem: "audio".to_string(),
            phase: FramePhase::End,
            source: anyhow::anyhow!("device lost"),
        };
        assert_eq!(err.to_string(), "subsystem 'audio' failed during end_frame");
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("device lost"));
    }

    #[test]
    fn test_hook_errors_keep_their_chain() {
        let err = EngineError::hook("update", anyhow::anyhow!("out of bullets"));
        assert_eq!(err.to_string(), "game hook 'update' failed");
        assert!(err.source().is_some());
        assert!(!err.is_startup());
        assert!(EngineError::hook("init", anyhow::anyhow!("x")).is_startup());
    }
}
