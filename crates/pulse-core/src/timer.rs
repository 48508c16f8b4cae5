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

//! Game timers advanced by the fixed-update step.
//!
//! Durations are plain `f64` values in whatever unit the caller advances
//! the registry with. The game loop advances it by its frame time, in the
//! configured clock unit.

use std::collections::BTreeMap;
use std::fmt;

/// Identifies a timer inside a [`TimerRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// Whether a timer fires once or keeps firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    /// Fires once, then stops.
    Once,
    /// Fires every time its duration elapses.
    Repeating,
}

type Callback = Box<dyn FnMut()>;

struct GameTimer {
    duration: f64,
    elapsed: f64,
    mode: TimerMode,
    active: bool,
    callback: Callback,
}

/// Owns every game timer and advances the active ones.
#[derive(Default)]
pub struct TimerRegistry {
    timers: BTreeMap<TimerId, GameTimer>,
    next_id: u64,
}

impl TimerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a stopped timer. Call [`start`](Self::start) to arm it.
    pub fn add<F>(&mut self, duration: f64, mode: TimerMode, callback: F) -> TimerId
    where
        F: FnMut() + 'static,
    {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.insert(
            id,
            GameTimer {
                duration,
                elapsed: 0.0,
                mode,
                active: false,
                callback: Box::new(callback),
            },
        );
        id
    }

    /// Arms a timer from zero. Returns `false` for an unknown id.
    pub fn start(&mut self, id: TimerId) -> bool {
        match self.timers.get_mut(&id) {
            Some(timer) => {
                timer.elapsed = 0.0;
                timer.active = true;
                true
            }
            None => false,
        }
    }

    /// Disarms a timer, keeping it registered. Returns `false` for an unknown id.
    pub fn stop(&mut self, id: TimerId) -> bool {
        match self.timers.get_mut(&id) {
            Some(timer) => {
                timer.active = false;
                true
            }
            None => false,
        }
    }

    /// Unregisters a timer. Returns `false` for an unknown id.
    pub fn remove(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    /// Returns `true` if the timer exists and is armed.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.get(&id).is_some_and(|t| t.active)
    }

    /// Time left before an armed timer fires next.
    pub fn remaining(&self, id: TimerId) -> Option<f64> {
        self.timers
            .get(&id)
            .filter(|t| t.active)
            .map(|t| (t.duration - t.elapsed).max(0.0))
    }

    /// Number of registered timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Returns `true` if no timer is registered.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Advances every armed timer by `delta`, firing the ones that elapse.
    ///
    /// A repeating timer fires once per whole duration contained in the
    /// accumulated time. Returns the ids that fired, in id order, one entry
    /// per firing.
    pub fn advance_all(&mut self, delta: f64) -> Vec<TimerId> {
        let mut fired = Vec::new();
        for (id, timer) in self.timers.iter_mut().filter(|(_, t)| t.active) {
            timer.elapsed += delta;
            while timer.active && timer.elapsed >= timer.duration {
                (timer.callback)();
                fired.push(*id);
                match timer.mode {
                    TimerMode::Once => {
                        timer.active = false;
                        timer.elapsed = 0.0;
                    }
                    TimerMode::Repeating if timer.duration > 0.0 => {
                        timer.elapsed -= timer.duration;
                    }
                    TimerMode::Repeating => {
                        timer.elapsed = 0.0;
                        break;
                    }
                }
            }
        }
        fired
    }
}

impl fmt::Debug for TimerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerRegistry")
            .field("timers", &self.timers.len())
            .field(
                "active",
                &self.timers.values().filter(|t| t.active).count(),
            )
            .finish()
    }
}
