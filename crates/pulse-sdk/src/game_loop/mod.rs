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

//! The game loop driver, stepping time in fixed or variable increments.

mod rate;
mod stepper;

pub use self::rate::RateCounter;
pub use self::stepper::FixedStepper;

use crate::context::EngineContext;
use crate::game::Game;
use crate::state::{GameState, GameStateSlot};
use pulse_core::renderer::Batcher;
use pulse_core::time::{convert, TimeUnit};
use pulse_core::{EngineError, EngineResult, LoopMode};
use std::error::Error as StdError;

/// Where the loop is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    /// Built, `start`/`begin` not called yet.
    NotStarted,
    /// Iterating.
    Running,
    /// An exit was observed; only `shutdown` remains.
    Stopping,
    /// Everything has been disposed.
    Terminated,
}

/// Drives a [`Game`] with fixed-step updates and interpolated rendering, or
/// with one variable-length update per frame.
pub struct GameLoop {
    ctx: EngineContext,
    states: GameStateSlot,
    batcher: Batcher,
    mode: LoopMode,
    stepper: FixedStepper,
    ups_counter: RateCounter,
    fps_counter: RateCounter,
    previous_time: f64,
    phase: LoopPhase,
}

impl GameLoop {
    pub(crate) fn new(ctx: EngineContext) -> Self {
        let config = ctx.config();
        let mode = config.loop_mode;
        let stepper = FixedStepper::new(config.max_frame_skips, config.drop_excess_lag);
        Self {
            ctx,
            states: GameStateSlot::new(),
            batcher: Batcher::new(),
            mode,
            stepper,
            ups_counter: RateCounter::new(0.0, 1.0),
            fps_counter: RateCounter::new(0.0, 1.0),
            previous_time: 0.0,
            phase: LoopPhase::NotStarted,
        }
    }

    /// Runs the game to completion: startup, iterations until exit, shutdown.
    ///
    /// Returns `Ok(())` on an orderly exit. Any failure stops the loop,
    /// disposes what was created and is returned.
    pub fn start(&mut self, game: &mut dyn Game) -> EngineResult<()> {
        self.begin(game)?;
        while self.phase == LoopPhase::Running {
            self.iterate(game)?;
        }
        self.shutdown(game)
    }

    /// Initializes the subsystems and the game, then enters `Running`.
    pub fn begin(&mut self, game: &mut dyn Game) -> EngineResult<()> {
        if self.phase != LoopPhase::NotStarted {
            return Err(EngineError::Lifecycle(format!(
                "cannot start a loop in phase {:?}",
                self.phase
            )));
        }

        if let Err(e) = self.ctx.subsystems_mut().init_all() {
            return Err(self.fail(e));
        }
        self.ctx.clock_mut().enable_precise();

        let (width, height) = (self.ctx.display().width(), self.ctx.display().height());
        self.ctx.camera_mut().init_projection(width, height);

        if let Err(e) = game.init(&mut self.ctx) {
            return Err(self.fail(EngineError::hook("init", e)));
        }
        self.guard(|this| this.apply_pending_state())?;
        self.ctx.logger().info("Game initialized.");

        let now = self.ctx.now();
        let second = convert(1.0, TimeUnit::Seconds, self.ctx.time_unit());
        self.previous_time = now;
        self.ups_counter = RateCounter::new(now, second);
        self.fps_counter = RateCounter::new(now, second);
        self.ctx.set_running(true);
        self.phase = LoopPhase::Running;
        Ok(())
    }

    /// Runs one loop iteration.
    ///
    /// Observing a close request or a cleared `running` flag moves the loop
    /// to [`LoopPhase::Stopping`] without updating or rendering.
    pub fn iterate(&mut self, game: &mut dyn Game) -> EngineResult<()> {
        if self.phase != LoopPhase::Running {
            return Err(EngineError::Lifecycle(format!(
                "cannot iterate a loop in phase {:?}",
                self.phase
            )));
        }
        self.guard(|this| this.step(game))
    }

    fn step(&mut self, game: &mut dyn Game) -> EngineResult<()> {
        self.ctx.subsystems_mut().begin_frame()?;

        if self.ctx.display().is_close_requested() || !self.ctx.is_running() {
            if self.ctx.display().is_close_requested() {
                self.ctx.logger().info("Display requested close.");
            }
            self.ctx.set_running(false);
            self.phase = LoopPhase::Stopping;
            return Ok(());
        }

        if self.ctx.display().was_resized() {
            self.handle_resize(game)?;
        }

        let now = self.ctx.now();
        let mut elapsed = now - self.previous_time;
        self.previous_time = now;
        if elapsed < 0.0 {
            self.ctx.logger().warn(&format!(
                "Clock went backwards by {:.6}{}; treating as no time passed.",
                -elapsed,
                self.ctx.time_unit()
            ));
            elapsed = 0.0;
        }
        let steps = match self.mode {
            LoopMode::Fixed => self.fixed_updates(game, now, elapsed)?,
            LoopMode::Variable => {
                self.update_once(game, now, elapsed)?;
                1
            }
        };

        // Variable mode never accumulates, so its offset is always zero.
        let alpha = self.stepper.lag_offset(self.ctx.frame_time());
        self.batcher.new_frame();
        game.render(&mut self.ctx, alpha, &mut self.batcher)
            .map_err(|e| EngineError::hook("render", e))?;
        self.apply_pending_state()?;
        if let Some(state) = self.states.active_mut() {
            state
                .render(&mut self.ctx, alpha, &mut self.batcher)
                .map_err(|e| EngineError::hook("state render", e))?;
        }
        self.apply_pending_state()?;

        let stats = self.ctx.stats_mut();
        stats.total_frames += 1;
        stats.last_iteration_updates = steps;
        if let Some(fps) = self.fps_counter.tick(now) {
            self.ctx.stats_mut().fps = fps;
        }

        self.ctx.subsystems_mut().end_frame()?;
        self.ctx
            .display_mut()
            .update()
            .map_err(EngineError::Display)?;
        Ok(())
    }

    /// Runs as many whole fixed steps as the accumulated lag allows, up to
    /// the configured bound. Returns the number of steps run.
    fn fixed_updates(
        &mut self,
        game: &mut dyn Game,
        now: f64,
        elapsed: f64,
    ) -> EngineResult<u32> {
        self.stepper.accumulate(elapsed);

        let frame_time = self.ctx.frame_time();
        let mut steps = 0;
        while self.stepper.should_step(frame_time, steps) {
            self.update_once(game, now, frame_time)?;
            self.stepper.consume(frame_time);
            steps += 1;
        }
        if self.stepper.settle(frame_time, steps) {
            log::debug!(
                "Hit the limit of {steps} updates in one iteration; lag is now {:.6}{}.",
                self.stepper.lag(),
                self.ctx.time_unit()
            );
        }
        Ok(steps)
    }

    /// One update of the game, the active state and the timers by `delta`.
    fn update_once(&mut self, game: &mut dyn Game, now: f64, delta: f64) -> EngineResult<()> {
        game.update(&mut self.ctx, delta)
            .map_err(|e| EngineError::hook("update", e))?;
        self.apply_pending_state()?;
        if let Some(state) = self.states.active_mut() {
            state
                .update(&mut self.ctx, delta)
                .map_err(|e| EngineError::hook("state update", e))?;
        }
        self.apply_pending_state()?;
        self.ctx.timers_mut().advance_all(delta);

        self.ctx.stats_mut().total_updates += 1;
        if let Some(ups) = self.ups_counter.tick(now) {
            self.ctx.stats_mut().ups = ups;
        }
        Ok(())
    }

    fn handle_resize(&mut self, game: &mut dyn Game) -> EngineResult<()> {
        let (width, height) = (self.ctx.display().width(), self.ctx.display().height());
        log::debug!("Display resized to {width}x{height}.");
        self.ctx.subsystems_mut().resize(width, height)?;
        self.ctx.camera_mut().init_projection(width, height);
        game.resize(&mut self.ctx)
            .map_err(|e| EngineError::hook("resize", e))?;
        self.apply_pending_state()?;
        if let Some(state) = self.states.active_mut() {
            state
                .resize(&mut self.ctx)
                .map_err(|e| EngineError::hook("state resize", e))?;
        }
        self.apply_pending_state()
    }

    /// Tears everything down: leaves the active state, disposes the batcher,
    /// calls the game's `dispose`, then disposes the subsystems.
    ///
    /// Idempotent once the loop is terminated.
    pub fn shutdown(&mut self, game: &mut dyn Game) -> EngineResult<()> {
        if self.phase == LoopPhase::Terminated {
            return Ok(());
        }
        self.ctx.set_running(false);
        self.phase = LoopPhase::Stopping;

        let mut first_error = self.states.set_state(&mut self.ctx, None).err();
        self.batcher.dispose();
        if let Err(e) = game.dispose(&mut self.ctx) {
            first_error.get_or_insert(EngineError::hook("dispose", e));
        }
        if let Err(e) = self.ctx.subsystems_mut().dispose_all() {
            first_error.get_or_insert(e);
        }
        self.phase = LoopPhase::Terminated;

        match first_error {
            None => {
                self.ctx.logger().info("Engine terminated successfully.");
                Ok(())
            }
            Some(e) => {
                self.ctx
                    .logger()
                    .error(&format!("Shutdown failed: {}", error_chain(&e)));
                Err(e)
            }
        }
    }

    /// Replaces the active state immediately, outside of any hook.
    pub fn set_state(&mut self, next: Option<Box<dyn GameState>>) -> EngineResult<()> {
        self.states.set_state(&mut self.ctx, next)?;
        self.apply_pending_state()
    }

    fn apply_pending_state(&mut self) -> EngineResult<()> {
        while let Some(next) = self.ctx.take_pending_state() {
            self.states.set_state(&mut self.ctx, next)?;
        }
        Ok(())
    }

    /// Runs `f`; on failure, tears down and terminates before returning the error.
    fn guard<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> EngineResult<T>,
    ) -> EngineResult<T> {
        f(self).map_err(|e| self.fail(e))
    }

    fn fail(&mut self, error: EngineError) -> EngineError {
        self.ctx
            .logger()
            .error(&format!("Engine stopped: {}", error_chain(&error)));
        self.ctx.set_running(false);
        self.batcher.dispose();
        if let Err(e) = self.ctx.subsystems_mut().dispose_all() {
            self.ctx
                .logger()
                .error(&format!("Cleanup after failure: {}", error_chain(&e)));
        }
        self.phase = LoopPhase::Terminated;
        error
    }

    /// The loop's lifecycle phase.
    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    /// The timestep mode this loop was built with.
    pub fn mode(&self) -> LoopMode {
        self.mode
    }

    /// Accumulated, not yet simulated time. Always zero in variable mode.
    pub fn lag(&self) -> f64 {
        self.stepper.lag()
    }

    /// The engine context.
    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    /// The engine context, mutably.
    pub fn context_mut(&mut self) -> &mut EngineContext {
        &mut self.ctx
    }

    /// The state slot.
    pub fn states(&self) -> &GameStateSlot {
        &self.states
    }

    /// The batcher handed to render hooks.
    pub fn batcher(&self) -> &Batcher {
        &self.batcher
    }
}

impl Drop for GameLoop {
    fn drop(&mut self) {
        if matches!(self.phase, LoopPhase::Running | LoopPhase::Stopping) {
            log::warn!("GameLoop dropped without shutdown; disposing subsystems.");
            self.batcher.dispose();
            if let Err(e) = self.ctx.subsystems_mut().dispose_all() {
                log::error!("Dispose during drop failed: {}", error_chain(&e));
            }
        }
    }
}

/// Formats an error and its sources as `outer: inner: root`.
fn error_chain(error: &dyn StdError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
