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

//! # Pulse Core
//!
//! Foundational crate containing traits, core types, and interface contracts
//! that define the engine's architecture: the time source, the subsystem
//! lifecycle, collision predicates, and the collaborator contracts the game
//! loop drives.

#![warn(missing_docs)]

pub mod collision;
pub mod config;
pub mod error;
pub mod event;
pub mod logging;
pub mod math;
pub mod platform;
pub mod renderer;
pub mod subsystem;
pub mod time;
pub mod timer;

pub use config::{ConfigError, EngineConfig, LoopMode, WindowConfig};
pub use error::{EngineError, EngineResult, FramePhase};
pub use logging::{Level, LogFacadeLogger, Logger, MemoryLogger};
pub use subsystem::{Subsystem, SubsystemSet, SubsystemState};
pub use time::{ManualClock, SystemClock, TimeSource, TimeUnit};
pub use timer::{TimerId, TimerMode, TimerRegistry};
