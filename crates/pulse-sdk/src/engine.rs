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

//! The engine entry point.

use crate::context::EngineContext;
use crate::game::Game;
use crate::game_loop::GameLoop;
use pulse_core::platform::{Display, HeadlessDisplay};
use pulse_core::renderer::Camera;
use pulse_core::{
    EngineConfig, EngineError, EngineResult, LogFacadeLogger, Logger, SubsystemSet, SystemClock,
    TimeSource,
};
use pulse_infra::{standard_subsystems, InputSubsystem, WinitDisplay};
use std::sync::Arc;

/// The public entry point.
pub struct Engine;

impl Engine {
    /// Runs `game` in a window until it exits.
    ///
    /// Blocks the calling thread. Returns `Ok(())` after an orderly shutdown
    /// and the first fatal error otherwise.
    pub fn run<G: Game>(mut game: G, config: EngineConfig) -> EngineResult<()> {
        Self::builder(config).run(&mut game)
    }

    /// Starts configuring an engine with custom collaborators.
    pub fn builder(config: EngineConfig) -> EngineBuilder {
        EngineBuilder::new(config)
    }
}

/// Assembles a [`GameLoop`] from a configuration and optional collaborators.
///
/// Anything not provided gets a default: a `winit` window (or a headless
/// display), the standard subsystems, the system clock and a logger
/// forwarding to the `log` facade.
pub struct EngineBuilder {
    config: EngineConfig,
    display: Option<Box<dyn Display>>,
    clock: Option<Box<dyn TimeSource>>,
    logger: Option<Arc<dyn Logger>>,
    subsystems: Option<SubsystemSet>,
    camera: Camera,
    headless: bool,
}

impl EngineBuilder {
    /// Creates a builder with every collaborator defaulted.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            display: None,
            clock: None,
            logger: None,
            subsystems: None,
            camera: Camera::Null,
            headless: false,
        }
    }

    /// Uses a headless display instead of opening a window.
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Uses the given display.
    ///
    /// The standard input subsystem is fed by the display the builder
    /// creates. A display passed here is not connected to it, so unless
    /// [`with_subsystems`](Self::with_subsystems) is also used, keyboard and
    /// mouse queries will never see an event. `build` logs a warning in
    /// that case.
    pub fn with_display<D: Display + 'static>(mut self, display: D) -> Self {
        self.display = Some(Box::new(display));
        self
    }

    /// Uses the given clock.
    pub fn with_clock<C: TimeSource + 'static>(mut self, clock: C) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Uses the given logger.
    pub fn with_logger<L: Logger + 'static>(mut self, logger: L) -> Self {
        self.logger = Some(Arc::new(logger));
        self
    }

    /// Uses the given subsystems instead of the standard set.
    pub fn with_subsystems(mut self, subsystems: SubsystemSet) -> Self {
        self.subsystems = Some(subsystems);
        self
    }

    /// Uses the given camera.
    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = camera;
        self
    }

    /// Validates the configuration and creates the display and subsystems.
    ///
    /// # Errors
    /// Fails on an invalid configuration or if the window cannot be created.
    pub fn build(self) -> EngineResult<GameLoop> {
        self.config.validate()?;
        let logger = self
            .logger
            .unwrap_or_else(|| Arc::new(LogFacadeLogger::default()));
        logger.info("Pulse engine starting...");

        if self.display.is_some() && self.subsystems.is_none() {
            logger.warn(
                "A custom display was given with the standard subsystems; \
                 its input will not reach the input subsystem.",
            );
        }

        let window = &self.config.window;
        let input = InputSubsystem::new();
        let display: Box<dyn Display> = match self.display {
            Some(display) => display,
            None if self.headless => Box::new(
                HeadlessDisplay::new(window.width, window.height)
                    .with_input_sender(input.sender()),
            ),
            None => {
                let display = WinitDisplay::new(window).map_err(|e| {
                    logger.error(&format!("Failed to open the window: {e:#}"));
                    EngineError::Display(e)
                })?;
                Box::new(display.with_input_sender(input.sender()))
            }
        };

        let subsystems = match self.subsystems {
            Some(subsystems) => subsystems,
            None => standard_subsystems(display.width(), display.height(), input)?,
        };
        let clock = self
            .clock
            .unwrap_or_else(|| Box::new(SystemClock::new()));

        let ctx = EngineContext::new(
            self.config,
            subsystems,
            display,
            clock,
            logger,
            self.camera,
        );
        Ok(GameLoop::new(ctx))
    }

    /// Builds the loop and runs `game` to completion.
    pub fn run(self, game: &mut dyn Game) -> EngineResult<()> {
        self.build()?.start(game)
    }
}
