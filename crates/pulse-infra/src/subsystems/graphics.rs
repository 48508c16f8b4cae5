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

//! The graphics subsystem: viewport state and frame timing.

use pulse_core::math::Vec4;
use pulse_core::Subsystem;
use std::any::Any;
use std::time::{Duration, Instant};

/// Per-frame statistics collected by the [`GraphicsSubsystem`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    /// Frames completed since init.
    pub frames: u64,
    /// Wall time between the last `begin_frame` and `end_frame`.
    pub last_frame_time: Duration,
    /// Longest frame observed since init.
    pub worst_frame_time: Duration,
}

/// Owns the viewport and brackets each frame.
///
/// GPU work is out of scope; this subsystem keeps the state a renderer
/// backend would read (viewport, clear color) and measures frames.
#[derive(Debug)]
pub struct GraphicsSubsystem {
    viewport: (u32, u32),
    clear_color: Vec4,
    initialized: bool,
    frame_started: Option<Instant>,
    stats: FrameStats,
}

impl GraphicsSubsystem {
    /// Creates the subsystem for an initial viewport size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: (width, height),
            clear_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            initialized: false,
            frame_started: None,
            stats: FrameStats::default(),
        }
    }

    /// Current viewport size.
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// The color frames are cleared to.
    pub fn clear_color(&self) -> Vec4 {
        self.clear_color
    }

    /// Sets the clear color.
    pub fn set_clear_color(&mut self, color: Vec4) {
        self.clear_color = color;
    }

    /// Frame statistics so far.
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Returns `true` between init and dispose.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl Subsystem for GraphicsSubsystem {
    fn name(&self) -> &str {
        "graphics"
    }

    fn init(&mut self) -> anyhow::Result<()> {
        let (width, height) = self.viewport;
        log::info!("Graphics ready with a {width}x{height} viewport.");
        self.initialized = true;
        Ok(())
    }

    fn begin_frame(&mut self) -> anyhow::Result<()> {
        if self.frame_started.is_some() {
            anyhow::bail!("begin_frame called twice without end_frame");
        }
        self.frame_started = Some(Instant::now());
        Ok(())
    }

    fn end_frame(&mut self) -> anyhow::Result<()> {
        let Some(started) = self.frame_started.take() else {
            anyhow::bail!("end_frame called without begin_frame");
        };
        let elapsed = started.elapsed();
        self.stats.frames += 1;
        self.stats.last_frame_time = elapsed;
        self.stats.worst_frame_time = self.stats.worst_frame_time.max(elapsed);
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) -> anyhow::Result<()> {
        log::debug!("Graphics viewport set to {width}x{height}.");
        self.viewport = (width, height);
        Ok(())
    }

    fn dispose(&mut self) -> anyhow::Result<()> {
        log::info!(
            "Graphics disposed after {} frames (worst frame {:?}).",
            self.stats.frames,
            self.stats.worst_frame_time
        );
        self.initialized = false;
        self.frame_started = None;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
