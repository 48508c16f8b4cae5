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

//! The explicit context every hook receives.

use crate::state::GameState;
use pulse_core::config::ConfigError;
use pulse_core::platform::Display;
use pulse_core::renderer::Camera;
use pulse_core::time::{convert, TimeSource, TimeUnit};
use pulse_core::{
    EngineConfig, EngineError, EngineResult, Logger, Subsystem, SubsystemSet, TimerRegistry,
};
use std::sync::Arc;

/// Counters the loop maintains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    /// Updates during the last complete one-second window.
    pub ups: u32,
    /// Frames during the last complete one-second window.
    pub fps: u32,
    /// Updates since the loop started.
    pub total_updates: u64,
    /// Frames since the loop started.
    pub total_frames: u64,
    /// Updates run during the last iteration.
    pub last_iteration_updates: u32,
}

/// Everything the engine shares with a running game.
///
/// Owned by the [`GameLoop`](crate::GameLoop); there is no global engine
/// state.
pub struct EngineContext {
    config: EngineConfig,
    subsystems: SubsystemSet,
    display: Box<dyn Display>,
    clock: Box<dyn TimeSource>,
    logger: Arc<dyn Logger>,
    camera: Camera,
    timers: TimerRegistry,
    running: bool,
    target_ups: u32,
    stats: LoopStats,
    pending_state: Option<Option<Box<dyn GameState>>>,
}

impl EngineContext {
    pub(crate) fn new(
        config: EngineConfig,
        subsystems: SubsystemSet,
        display: Box<dyn Display>,
        clock: Box<dyn TimeSource>,
        logger: Arc<dyn Logger>,
        camera: Camera,
    ) -> Self {
        Self {
            target_ups: config.target_ups,
            config,
            subsystems,
            display,
            clock,
            logger,
            camera,
            timers: TimerRegistry::new(),
            running: false,
            stats: LoopStats::default(),
            pending_state: None,
        }
    }

    /// Asks the loop to stop. Teardown happens at the start of the next
    /// iteration, never in the middle of one.
    pub fn end(&mut self) {
        if self.running {
            self.logger.info("Game requested exit.");
        }
        self.running = false;
    }

    /// Returns `true` while the loop keeps iterating.
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub(crate) fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Updates per second over the last measured second.
    pub fn ups(&self) -> u32 {
        self.stats.ups
    }

    /// Frames per second over the last measured second.
    pub fn fps(&self) -> u32 {
        self.stats.fps
    }

    /// All loop counters.
    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    pub(crate) fn stats_mut(&mut self) -> &mut LoopStats {
        &mut self.stats
    }

    /// Fixed updates per second the loop aims for.
    pub fn target_ups(&self) -> u32 {
        self.target_ups
    }

    /// Changes the fixed update rate from the next iteration on.
    pub fn set_target_ups(&mut self, ups: u32) -> EngineResult<()> {
        if ups == 0 {
            return Err(EngineError::Config(ConfigError::Invalid(
                "target_ups must be positive".into(),
            )));
        }
        self.target_ups = ups;
        Ok(())
    }

    /// The duration of one fixed step, in the clock unit.
    pub fn frame_time(&self) -> f64 {
        convert(
            1.0 / f64::from(self.target_ups),
            TimeUnit::Seconds,
            self.config.time_unit,
        )
    }

    /// The unit the loop samples its clock in.
    pub fn time_unit(&self) -> TimeUnit {
        self.config.time_unit
    }

    /// The current clock reading, in [`time_unit`](Self::time_unit).
    pub fn now(&self) -> f64 {
        self.clock.now(self.config.time_unit)
    }

    pub(crate) fn clock_mut(&mut self) -> &mut dyn TimeSource {
        self.clock.as_mut()
    }

    /// The configuration the engine was started with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Requests a switch to `next` (or to no state). Applied right after the
    /// current hook returns. A later request in the same hook wins.
    pub fn switch_state(&mut self, next: Option<Box<dyn GameState>>) {
        self.pending_state = Some(next);
    }

    /// Requests a switch to `state`.
    pub fn set_state<S: GameState + 'static>(&mut self, state: S) {
        self.switch_state(Some(Box::new(state)));
    }

    pub(crate) fn take_pending_state(&mut self) -> Option<Option<Box<dyn GameState>>> {
        self.pending_state.take()
    }

    /// The subsystem set.
    pub fn subsystems(&self) -> &SubsystemSet {
        &self.subsystems
    }

    /// The subsystem set, mutably.
    pub fn subsystems_mut(&mut self) -> &mut SubsystemSet {
        &mut self.subsystems
    }

    /// The first subsystem of type `T`.
    pub fn subsystem<T: Subsystem + 'static>(&self) -> Option<&T> {
        self.subsystems.get::<T>()
    }

    /// The first subsystem of type `T`, mutably.
    pub fn subsystem_mut<T: Subsystem + 'static>(&mut self) -> Option<&mut T> {
        self.subsystems.get_mut::<T>()
    }

    /// The display.
    pub fn display(&self) -> &dyn Display {
        self.display.as_ref()
    }

    /// The display, mutably.
    pub fn display_mut(&mut self) -> &mut dyn Display {
        self.display.as_mut()
    }

    /// The camera kept in sync with the display size.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The camera, mutably.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// The game timers, advanced once per fixed step.
    pub fn timers(&self) -> &TimerRegistry {
        &self.timers
    }

    /// The game timers, mutably.
    pub fn timers_mut(&mut self) -> &mut TimerRegistry {
        &mut self.timers
    }

    /// The engine logger.
    pub fn logger(&self) -> &dyn Logger {
        self.logger.as_ref()
    }
}

impl std::fmt::Debug for EngineContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineContext")
            .field("running", &self.running)
            .field("target_ups", &self.target_ups)
            .field("stats", &self.stats)
            .field("subsystems", &self.subsystems.names())
            .field("camera", &self.camera)
            .finish_non_exhaustive()
    }
}
