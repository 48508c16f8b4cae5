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

//! The display contract the game loop polls, plus a headless implementation.

mod headless;
mod input;

pub use self::headless::HeadlessDisplay;
pub use self::input::{InputEvent, MouseButton};

/// The surface the game loop presents to and polls for window events.
///
/// Displays are owned by the loop thread and are not required to be `Send`.
pub trait Display {
    /// Returns `true` once the user or the platform asked to close.
    fn is_close_requested(&self) -> bool;

    /// Returns `true` if the size changed during the last [`update`](Self::update).
    fn was_resized(&self) -> bool;

    /// Current width in physical pixels.
    fn width(&self) -> u32;

    /// Current height in physical pixels.
    fn height(&self) -> u32;

    /// Presents the frame and polls pending window events.
    fn update(&mut self) -> anyhow::Result<()>;

    /// Changes the window title, where the backend has one.
    fn set_title(&mut self, _title: &str) {}

    /// Width divided by height.
    fn aspect_ratio(&self) -> f32 {
        self.width() as f32 / self.height().max(1) as f32
    }
}
