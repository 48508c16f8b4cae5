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

//! Game states and the slot holding the active one.

use crate::context::EngineContext;
use pulse_core::renderer::Batcher;
use pulse_core::{EngineError, EngineResult};

/// One screen or mode of a game (menu, level, pause...).
///
/// The loop forwards `update`, `render` and `resize` to the active state
/// right after the matching [`Game`](crate::Game) hook.
pub trait GameState {
    /// Called when the state becomes active.
    fn on_enter(&mut self, _ctx: &mut EngineContext) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called when the state stops being active, before the next one enters.
    fn on_leave(&mut self, _ctx: &mut EngineContext) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called once per fixed step while active.
    fn update(&mut self, _ctx: &mut EngineContext, _delta: f64) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called once per iteration while active.
    fn render(
        &mut self,
        _ctx: &mut EngineContext,
        _alpha: f64,
        _batcher: &mut Batcher,
    ) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called after the display changed size while active.
    fn resize(&mut self, _ctx: &mut EngineContext) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Holds at most one active [`GameState`].
#[derive(Default)]
pub struct GameStateSlot {
    active: Option<Box<dyn GameState>>,
}

impl GameStateSlot {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the active state.
    ///
    /// The current state's `on_leave` runs first; the new state is then
    /// installed and its `on_enter` runs. The previous state is dropped as
    /// soon as it has left. If `on_leave` fails the swap does not happen.
    /// If `on_enter` fails the new state stays installed.
    pub fn set_state(
        &mut self,
        ctx: &mut EngineContext,
        next: Option<Box<dyn GameState>>,
    ) -> EngineResult<()> {
        if let Some(current) = self.active.as_mut() {
            current
                .on_leave(ctx)
                .map_err(|e| EngineError::hook("on_leave", e))?;
        }
        drop(std::mem::replace(&mut self.active, next));

        match self.active.as_mut() {
            Some(state) => state
                .on_enter(ctx)
                .map_err(|e| EngineError::hook("on_enter", e)),
            None => Ok(()),
        }
    }

    /// The active state, if any.
    pub fn active(&self) -> Option<&dyn GameState> {
        self.active.as_deref()
    }

    /// The active state, mutably.
    pub fn active_mut(&mut self) -> Option<&mut (dyn GameState + 'static)> {
        self.active.as_deref_mut()
    }

    /// Returns `true` if no state is active.
    pub fn is_empty(&self) -> bool {
        self.active.is_none()
    }
}

impl std::fmt::Debug for GameStateSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameStateSlot")
            .field("active", &self.active.is_some())
            .finish()
    }
}
