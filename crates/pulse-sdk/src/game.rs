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

//! The hooks a game implements.

use crate::context::EngineContext;
use pulse_core::renderer::Batcher;

/// A game driven by the engine loop.
///
/// Every hook receives the [`EngineContext`] and may fail; a failure stops
/// the loop and is returned from [`Engine::run`](crate::Engine::run) with the
/// hook's name attached. All hooks default to doing nothing, so a game that
/// lives entirely in [`GameState`](crate::GameState)s only needs `init`.
pub trait Game {
    /// Called once after the subsystems are initialized.
    fn init(&mut self, _ctx: &mut EngineContext) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called once per fixed step. `delta` is the frame time in the
    /// configured clock unit.
    fn update(&mut self, _ctx: &mut EngineContext, _delta: f64) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called once per iteration. `alpha` is how far the simulation has
    /// progressed towards the next fixed step, for interpolation.
    fn render(
        &mut self,
        _ctx: &mut EngineContext,
        _alpha: f64,
        _batcher: &mut Batcher,
    ) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called after the display changed size.
    fn resize(&mut self, _ctx: &mut EngineContext) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called once on orderly shutdown, before the subsystems are disposed.
    fn dispose(&mut self, _ctx: &mut EngineContext) -> anyhow::Result<()> {
        Ok(())
    }
}
