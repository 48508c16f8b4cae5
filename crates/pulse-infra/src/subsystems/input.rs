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

//! The input subsystem: turns queued input events into per-frame state.

use pulse_core::event::EventBus;
use pulse_core::math::Vec2;
use pulse_core::platform::{InputEvent, MouseButton};
use pulse_core::Subsystem;
use std::any::Any;
use std::collections::HashSet;

/// Latches keyboard and mouse state once per frame.
///
/// Displays publish [`InputEvent`]s through [`sender`](Self::sender) as
/// they poll the platform; `begin_frame` drains the queue so that game code
/// sees a stable snapshot for the whole iteration.
#[derive(Debug)]
pub struct InputSubsystem {
    bus: EventBus<InputEvent>,
    keys_down: HashSet<String>,
    keys_pressed: HashSet<String>,
    keys_released: HashSet<String>,
    buttons_down: HashSet<MouseButton>,
    buttons_pressed: HashSet<MouseButton>,
    buttons_released: HashSet<MouseButton>,
    mouse_position: Vec2,
    scroll: Vec2,
    frame_events: Vec<InputEvent>,
}

impl InputSubsystem {
    /// Creates the subsystem with its own event queue.
    pub fn new() -> Self {
        Self {
            bus: EventBus::new(),
            keys_down: HashSet::new(),
            keys_pressed: HashSet::new(),
            keys_released: HashSet::new(),
            buttons_down: HashSet::new(),
            buttons_pressed: HashSet::new(),
            buttons_released: HashSet::new(),
            mouse_position: Vec2::ZERO,
            scroll: Vec2::ZERO,
            frame_events: Vec::new(),
        }
    }

    /// A producer handle for displays and other event sources.
    pub fn sender(&self) -> flume::Sender<InputEvent> {
        self.bus.sender()
    }

    /// Returns `true` while `key` is held.
    pub fn is_key_down(&self, key: &str) -> bool {
        self.keys_down.contains(key)
    }

    /// Returns `true` if `key` went down since the previous frame.
    pub fn is_key_pressed(&self, key: &str) -> bool {
        self.keys_pressed.contains(key)
    }

    /// Returns `true` if `key` went up since the previous frame.
    pub fn is_key_released(&self, key: &str) -> bool {
        self.keys_released.contains(key)
    }

    /// Returns `true` while `button` is held.
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    /// Returns `true` if `button` went down since the previous frame.
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    /// Returns `true` if `button` went up since the previous frame.
    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.buttons_released.contains(&button)
    }

    /// Last known cursor position.
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Scroll accumulated since the previous frame.
    pub fn scroll(&self) -> Vec2 {
        self.scroll
    }

    /// Raw events received since the previous frame, oldest first.
    pub fn events(&self) -> &[InputEvent] {
        &self.frame_events
    }

    fn apply(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyPressed { key_code } => {
                if self.keys_down.insert(key_code.clone()) {
                    self.keys_pressed.insert(key_code.clone());
                }
            }
            InputEvent::KeyReleased { key_code } => {
                if self.keys_down.remove(key_code) {
                    self.keys_released.insert(key_code.clone());
                }
            }
            InputEvent::MouseButtonPressed { button } => {
                if self.buttons_down.insert(*button) {
                    self.buttons_pressed.insert(*button);
                }
            }
            InputEvent::MouseButtonReleased { button } => {
                if self.buttons_down.remove(button) {
                    self.buttons_released.insert(*button);
                }
            }
            InputEvent::MouseMoved { x, y } => self.mouse_position = Vec2::new(*x, *y),
            InputEvent::MouseWheelScrolled { delta_x, delta_y } => {
                self.scroll = self.scroll + Vec2::new(*delta_x, *delta_y);
            }
        }
    }

    fn clear_edges(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.scroll = Vec2::ZERO;
        self.frame_events.clear();
    }
}

impl Default for InputSubsystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Subsystem for InputSubsystem {
    fn name(&self) -> &str {
        "input"
    }

    fn init(&mut self) -> anyhow::Result<()> {
        log::info!("Input ready.");
        Ok(())
    }

    fn begin_frame(&mut self) -> anyhow::Result<()> {
        self.clear_edges();
        let events = self.bus.drain();
        for event in &events {
            self.apply(event);
        }
        self.frame_events = events;
        Ok(())
    }

    fn end_frame(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    fn dispose(&mut self) -> anyhow::Result<()> {
        let dropped = self.bus.drain().len();
        if dropped > 0 {
            log::debug!("Input disposed with {dropped} unprocessed events.");
        }
        self.clear_edges();
        self.keys_down.clear();
        self.buttons_down.clear();
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
