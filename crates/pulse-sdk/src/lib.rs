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

//! The public-facing SDK of the Pulse engine.
//!
//! Implement [`Game`] (and optionally [`GameState`]s), then hand it to
//! [`Engine::run`]. The engine drives fixed-step updates and interpolated
//! rendering through a [`GameLoop`] that owns every engine resource.

#![warn(missing_docs)]

mod context;
mod engine;
mod game;
pub mod game_loop;
mod state;

pub use context::{EngineContext, LoopStats};
pub use engine::{Engine, EngineBuilder};
pub use game::Game;
pub use game_loop::{GameLoop, LoopPhase};
pub use state::{GameState, GameStateSlot};

/// Re-exports the types a typical game needs.
pub mod prelude {
    pub use crate::{Engine, EngineBuilder, EngineContext, Game, GameLoop, GameState, LoopPhase};
    pub use pulse_core::collision::{self, Circle, Contact, Polygon, Polyhedron, Sphere};
    pub use pulse_core::math::{Aabb, Rect, Vec2, Vec3, Vec4};
    pub use pulse_core::platform::{HeadlessDisplay, InputEvent, MouseButton};
    pub use pulse_core::renderer::{Batcher, Camera, Primitive, Vertex};
    pub use pulse_core::time::convert;
    pub use pulse_core::{
        EngineConfig, EngineError, EngineResult, LoopMode, ManualClock, TimeUnit, TimerMode,
    };
    pub use pulse_infra::subsystems::{
        AudioSubsystem, CollisionSubsystem, GraphicsSubsystem, InputSubsystem, SoundId,
    };
}
