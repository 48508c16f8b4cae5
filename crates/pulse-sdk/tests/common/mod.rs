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

//! Deterministic doubles shared by the SDK integration tests.

#![allow(dead_code)]

use pulse_core::platform::HeadlessDisplay;
use pulse_core::renderer::Batcher;
use pulse_core::{EngineConfig, ManualClock, MemoryLogger, Subsystem};
use pulse_sdk::{Engine, EngineContext, Game, GameLoop, GameState};
use std::any::Any;
use std::sync::{Arc, Mutex};

pub const FRAME: f64 = 1.0 / 60.0;

/// A call log shared between games, states and subsystems.
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }

    pub fn count(&self, entry: &str) -> usize {
        self.0.lock().unwrap().iter().filter(|e| *e == entry).count()
    }
}

/// A loop over a headless display, a manual clock and a memory logger.
pub struct Harness {
    pub game_loop: GameLoop,
    pub clock: ManualClock,
    pub logger: MemoryLogger,
}

pub fn harness(config: EngineConfig, display: HeadlessDisplay) -> Harness {
    let clock = ManualClock::new();
    let logger = MemoryLogger::new();
    let game_loop = Engine::builder(config)
        .with_display(display)
        .with_clock(clock.clone())
        .with_logger(logger.clone())
        .build()
        .expect("headless loop should build");
    Harness {
        game_loop,
        clock,
        logger,
    }
}

/// A game that records its hooks and can be told to misbehave.
#[derive(Default)]
pub struct ScriptedGame {
    pub journal: Journal,
    pub updates: u32,
    pub renders: u32,
    pub alphas: Vec<f64>,
    pub deltas: Vec<f64>,
    pub end_after_updates: Option<u32>,
    pub fail_update_at: Option<u32>,
}

impl ScriptedGame {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            ..Self::default()
        }
    }
}

impl Game for ScriptedGame {
    fn init(&mut self, _ctx: &mut EngineContext) -> anyhow::Result<()> {
        self.journal.push("game.init");
        Ok(())
    }

    fn update(&mut self, ctx: &mut EngineContext, delta: f64) -> anyhow::Result<()> {
        self.updates += 1;
        self.deltas.push(delta);
        self.journal.push("game.update");
        if self.fail_update_at == Some(self.updates) {
            anyhow::bail!("update {} exploded", self.updates);
        }
        if self.end_after_updates == Some(self.updates) {
            ctx.end();
        }
        Ok(())
    }

    fn render(
        &mut self,
        _ctx: &mut EngineContext,
        alpha: f64,
        _batcher: &mut Batcher,
    ) -> anyhow::Result<()> {
        self.renders += 1;
        self.alphas.push(alpha);
        self.journal.push("game.render");
        Ok(())
    }

    fn resize(&mut self, ctx: &mut EngineContext) -> anyhow::Result<()> {
        let display = ctx.display();
        self.journal
            .push(format!("game.resize {}x{}", display.width(), display.height()));
        Ok(())
    }

    fn dispose(&mut self, _ctx: &mut EngineContext) -> anyhow::Result<()> {
        self.journal.push("game.dispose");
        Ok(())
    }
}

/// A state that records its hooks under a name.
pub struct NamedState {
    pub name: &'static str,
    pub journal: Journal,
}

impl NamedState {
    pub fn boxed(name: &'static str, journal: &Journal) -> Box<dyn GameState> {
        Box::new(Self {
            name,
            journal: journal.clone(),
        })
    }
}

impl GameState for NamedState {
    fn on_enter(&mut self, _ctx: &mut EngineContext) -> anyhow::Result<()> {
        self.journal.push(format!("{}.enter", self.name));
        Ok(())
    }

    fn on_leave(&mut self, _ctx: &mut EngineContext) -> anyhow::Result<()> {
        self.journal.push(format!("{}.leave", self.name));
        Ok(())
    }

    fn update(&mut self, _ctx: &mut EngineContext, _delta: f64) -> anyhow::Result<()> {
        self.journal.push(format!("{}.update", self.name));
        Ok(())
    }

    fn render(
        &mut self,
        _ctx: &mut EngineContext,
        _alpha: f64,
        _batcher: &mut Batcher,
    ) -> anyhow::Result<()> {
        self.journal.push(format!("{}.render", self.name));
        Ok(())
    }
}

impl Drop for NamedState {
    fn drop(&mut self) {
        self.journal.push(format!("{}.drop", self.name));
    }
}

/// A subsystem that records its lifecycle calls.
pub struct Tracked {
    pub name: &'static str,
    pub journal: Journal,
    pub fail_init: bool,
}

impl Tracked {
    pub fn new(name: &'static str, journal: &Journal) -> Self {
        Self {
            name,
            journal: journal.clone(),
            fail_init: false,
        }
    }
}

impl Subsystem for Tracked {
    fn name(&self) -> &str {
        self.name
    }

    fn init(&mut self) -> anyhow::Result<()> {
        self.journal.push(format!("{}.init", self.name));
        if self.fail_init {
            anyhow::bail!("{} has no device", self.name);
        }
        Ok(())
    }

    fn begin_frame(&mut self) -> anyhow::Result<()> {
        self.journal.push(format!("{}.begin", self.name));
        Ok(())
    }

    fn end_frame(&mut self) -> anyhow::Result<()> {
        self.journal.push(format!("{}.end", self.name));
        Ok(())
    }

    fn dispose(&mut self) -> anyhow::Result<()> {
        self.journal.push(format!("{}.dispose", self.name));
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
