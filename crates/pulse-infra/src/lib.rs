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

//! # Pulse Infra
//!
//! Concrete collaborators for the engine core: the graphics, audio,
//! collision and input subsystems, and the `winit` display backend.

#![warn(missing_docs)]

pub mod platform;
pub mod subsystems;

pub use platform::WinitDisplay;
pub use subsystems::{AudioSubsystem, CollisionSubsystem, GraphicsSubsystem, InputSubsystem};

use pulse_core::{EngineResult, SubsystemSet};

/// Builds the standard subsystem set in its reference order: graphics,
/// audio, collision, input.
pub fn standard_subsystems(
    width: u32,
    height: u32,
    input: InputSubsystem,
) -> EngineResult<SubsystemSet> {
    let mut set = SubsystemSet::new();
    set.register(GraphicsSubsystem::new(width, height))?;
    set.register(AudioSubsystem::new())?;
    set.register(CollisionSubsystem::new())?;
    set.register(input)?;
    Ok(set)
}
