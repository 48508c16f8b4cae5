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

//! Backend-agnostic input events.

/// A user input event, independent of the windowing backend that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key went down. Auto-repeat is not reported.
    KeyPressed {
        /// Name of the physical key, e.g. `"KeyW"` or `"Escape"`.
        key_code: String,
    },
    /// A key went up.
    KeyReleased {
        /// Name of the physical key.
        key_code: String,
    },
    /// A mouse button went down.
    MouseButtonPressed {
        /// The button.
        button: MouseButton,
    },
    /// A mouse button went up.
    MouseButtonReleased {
        /// The button.
        button: MouseButton,
    },
    /// The cursor moved, in physical pixels from the top-left corner.
    MouseMoved {
        /// Horizontal position.
        x: f32,
        /// Vertical position.
        y: f32,
    },
    /// The wheel scrolled.
    MouseWheelScrolled {
        /// Horizontal delta.
        delta_x: f32,
        /// Vertical delta.
        delta_y: f32,
    },
}

impl InputEvent {
    /// Shorthand for a [`InputEvent::KeyPressed`] event.
    pub fn key_pressed(key_code: impl Into<String>) -> Self {
        InputEvent::KeyPressed {
            key_code: key_code.into(),
        }
    }

    /// Shorthand for a [`InputEvent::KeyReleased`] event.
    pub fn key_released(key_code: impl Into<String>) -> Self {
        InputEvent::KeyReleased {
            key_code: key_code.into(),
        }
    }
}

/// A mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
    /// Wheel button.
    Middle,
    /// Side "back" button.
    Back,
    /// Side "forward" button.
    Forward,
    /// Any other button, by backend code.
    Other(u16),
}
