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

use super::{Display, InputEvent};
use std::collections::VecDeque;

/// A display with no window behind it.
///
/// Closing, resizing and input are scripted against the number of
/// [`update`](Display::update) calls, which makes loop behavior
/// reproducible in tests and headless runs.
#[derive(Debug)]
pub struct HeadlessDisplay {
    width: u32,
    height: u32,
    updates: u64,
    close_after: Option<u64>,
    fail_after: Option<u64>,
    close_requested: bool,
    resized: bool,
    resizes: VecDeque<(u64, u32, u32)>,
    inputs: VecDeque<(u64, InputEvent)>,
    input_sender: Option<flume::Sender<InputEvent>>,
    title: String,
}

impl HeadlessDisplay {
    /// Creates a display of the given size that never closes on its own.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            updates: 0,
            close_after: None,
            fail_after: None,
            close_requested: false,
            resized: false,
            resizes: VecDeque::new(),
            inputs: VecDeque::new(),
            input_sender: None,
            title: String::new(),
        }
    }

    /// Requests close once `updates` updates have happened.
    pub fn close_after(mut self, updates: u64) -> Self {
        self.close_after = Some(updates);
        self.close_requested = updates == 0;
        self
    }

    /// Makes the `updates`-th update return an error.
    pub fn fail_after(mut self, updates: u64) -> Self {
        self.fail_after = Some(updates);
        self
    }

    /// Schedules a resize to happen during the `update`-th update.
    pub fn resize_after(mut self, update: u64, width: u32, height: u32) -> Self {
        self.resizes.push_back((update, width, height));
        self.resizes.make_contiguous().sort_by_key(|entry| entry.0);
        self
    }

    /// Schedules an input event to be published during the `update`-th update.
    pub fn input_after(mut self, update: u64, event: InputEvent) -> Self {
        self.inputs.push_back((update, event));
        self.inputs.make_contiguous().sort_by_key(|entry| entry.0);
        self
    }

    /// Sets where scripted input events are published.
    pub fn with_input_sender(mut self, sender: flume::Sender<InputEvent>) -> Self {
        self.input_sender = Some(sender);
        self
    }

    /// Requests close immediately.
    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    /// Number of completed updates.
    pub fn updates(&self) -> u64 {
        self.updates
    }

    /// The last title set through [`Display::set_title`].
    pub fn title(&self) -> &str {
        &self.title
    }
}

impl Display for HeadlessDisplay {
    fn is_close_requested(&self) -> bool {
        self.close_requested
    }

    fn was_resized(&self) -> bool {
        self.resized
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn update(&mut self) -> anyhow::Result<()> {
        self.updates += 1;
        self.resized = false;

        if self.fail_after == Some(self.updates) {
            anyhow::bail!("headless display failed on update {}", self.updates);
        }

        while let Some(&(at, width, height)) = self.resizes.front() {
            if at > self.updates {
                break;
            }
            self.resizes.pop_front();
            if (width, height) != (self.width, self.height) {
                self.width = width;
                self.height = height;
                self.resized = true;
            }
        }

        while self.inputs.front().is_some_and(|(at, _)| *at <= self.updates) {
            if let Some((_, event)) = self.inputs.pop_front() {
                if let Some(sender) = &self.input_sender {
                    if sender.send(event).is_err() {
                        log::warn!("Headless input receiver is gone; dropping event.");
                    }
                }
            }
        }

        if self.close_after.is_some_and(|limit| self.updates >= limit) {
            self.close_requested = true;
        }
        Ok(())
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_after_counts_updates() {
        let mut display = HeadlessDisplay::new(320, 240).close_after(2);
        assert!(!display.is_close_requested());
        display.update().unwrap();
        assert!(!display.is_close_requested());
        display.update().unwrap();
        assert!(display.is_close_requested());
    }

    #[test]
    fn test_resize_flag_lasts_one_update() {
        let mut display = HeadlessDisplay::new(320, 240).resize_after(1, 640, 480);
        display.update().unwrap();
        assert!(display.was_resized());
        assert_eq!((display.width(), display.height()), (640, 480));
        display.update().unwrap();
        assert!(!display.was_resized());
    }

    #[test]
    fn test_scripted_input_is_published() {
        let (sender, receiver) = flume::unbounded();
        let mut display = HeadlessDisplay::new(1, 1)
            .input_after(2, InputEvent::key_pressed("Space"))
            .with_input_sender(sender);

        display.update().unwrap();
        assert!(receiver.is_empty());
        display.update().unwrap();
        assert_eq!(receiver.try_recv().ok(), Some(InputEvent::key_pressed("Space")));
    }

    #[test]
    fn test_fail_after_reports_error() {
        let mut display = HeadlessDisplay::new(1, 1).fail_after(1);
        assert!(display.update().is_err());
    }

    #[test]
    fn test_aspect_ratio_guards_zero_height() {
        let display = HeadlessDisplay::new(800, 400);
        assert_eq!(display.aspect_ratio(), 2.0);
    }
}
