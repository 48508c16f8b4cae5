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

//! A [`Display`] backed by a `winit` window.
//!
//! The game loop owns the frame cadence, so instead of handing control to
//! `EventLoop::run_app` the display pumps pending events without blocking
//! on every [`Display::update`].

use super::input::translate_winit_input;
use anyhow::anyhow;
use pulse_core::config::WindowConfig;
use pulse_core::platform::{Display, InputEvent};
use std::time::Duration;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::error::OsError;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

/// Window state updated by the `winit` callbacks.
struct WindowState {
    settings: WindowConfig,
    window: Option<Window>,
    creation_error: Option<OsError>,
    width: u32,
    height: u32,
    resized: bool,
    close_requested: bool,
    input_sender: Option<flume::Sender<InputEvent>>,
}

impl ApplicationHandler for WindowState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attributes = Window::default_attributes()
            .with_title(self.settings.title.clone())
            .with_inner_size(LogicalSize::new(self.settings.width, self.settings.height))
            .with_visible(true);

        match event_loop.create_window(attributes) {
            Ok(window) => {
                let size = window.inner_size();
                self.width = size.width;
                self.height = size.height;
                log::info!(
                    "Window '{}' created ({}x{}, id: {:?}).",
                    self.settings.title,
                    size.width,
                    size.height,
                    window.id()
                );
                self.window = Some(window);
            }
            Err(e) => {
                log::error!("Failed to create window: {e}");
                self.creation_error = Some(e);
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        if self.window.as_ref().map(Window::id) != Some(id) {
            return;
        }
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested by the window system.");
                self.close_requested = true;
            }
            WindowEvent::Resized(size) => {
                if (size.width, size.height) != (self.width, self.height) {
                    log::debug!("Window resized to {}x{}.", size.width, size.height);
                    self.width = size.width;
                    self.height = size.height;
                    self.resized = true;
                }
            }
            other => {
                if let (Some(input), Some(sender)) =
                    (translate_winit_input(&other), self.input_sender.as_ref())
                {
                    log::trace!("Input event: {input:?}");
                    if sender.send(input).is_err() {
                        log::warn!("Input receiver disconnected; dropping input.");
                        self.input_sender = None;
                    }
                }
            }
        }
    }
}

/// A desktop window driven by pumping the `winit` event loop.
pub struct WinitDisplay {
    event_loop: EventLoop<()>,
    state: WindowState,
}

impl WinitDisplay {
    /// Opens a window with the given settings.
    ///
    /// # Errors
    /// Fails if the event loop cannot be created or the window system
    /// refuses to create the window.
    pub fn new(settings: &WindowConfig) -> anyhow::Result<Self> {
        let event_loop = EventLoop::new()
            .map_err(|e| anyhow!("failed to create the winit event loop: {e}"))?;
        let mut display = Self {
            event_loop,
            state: WindowState {
                settings: settings.clone(),
                window: None,
                creation_error: None,
                width: settings.width,
                height: settings.height,
                resized: false,
                close_requested: false,
                input_sender: None,
            },
        };

        // The window is created from the first `resumed` callback.
        display.pump()?;
        if display.state.window.is_none() {
            return Err(anyhow!("the window system did not resume the application"));
        }
        display.state.resized = false;
        Ok(display)
    }

    /// Forwards translated input events to `sender`.
    pub fn with_input_sender(mut self, sender: flume::Sender<InputEvent>) -> Self {
        self.state.input_sender = Some(sender);
        self
    }

    fn pump(&mut self) -> anyhow::Result<()> {
        if let PumpStatus::Exit(code) = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.state)
        {
            log::info!("winit event loop exited with code {code}.");
            self.state.close_requested = true;
        }
        match self.state.creation_error.take() {
            Some(e) => Err(anyhow!("window creation failed: {e}")),
            None => Ok(()),
        }
    }
}

impl Display for WinitDisplay {
    fn is_close_requested(&self) -> bool {
        self.state.close_requested
    }

    fn was_resized(&self) -> bool {
        self.state.resized
    }

    fn width(&self) -> u32 {
        self.state.width
    }

    fn height(&self) -> u32 {
        self.state.height
    }

    fn update(&mut self) -> anyhow::Result<()> {
        self.state.resized = false;
        if let Some(window) = &self.state.window {
            window.request_redraw();
        }
        self.pump()
    }

    fn set_title(&mut self, title: &str) {
        if let Some(window) = &self.state.window {
            window.set_title(title);
        }
        self.state.settings.title = title.to_string();
    }
}
