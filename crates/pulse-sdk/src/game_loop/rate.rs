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

/// Counts events and publishes the count once per window.
#[derive(Debug, Clone)]
pub struct RateCounter {
    window: f64,
    window_start: f64,
    count: u32,
    current: u32,
}

impl RateCounter {
    /// Creates a counter whose first window starts at `now`. `window` is in
    /// the same unit as the readings passed to [`tick`](Self::tick).
    pub fn new(now: f64, window: f64) -> Self {
        Self {
            window,
            window_start: now,
            count: 0,
            current: 0,
        }
    }

    /// Records one event at `now`. Returns the completed window's count
    /// when a full window has elapsed since the last snapshot.
    pub fn tick(&mut self, now: f64) -> Option<u32> {
        self.count += 1;
        if now - self.window_start >= self.window {
            self.current = self.count;
            self.count = 0;
            self.window_start = now;
            Some(self.current)
        } else {
            None
        }
    }

    /// The last published count.
    pub fn current(&self) -> u32 {
        self.current
    }
}
