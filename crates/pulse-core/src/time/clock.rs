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

use super::{convert, TimeSource, TimeUnit};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Instant, SystemTime};

/// Stores an `f64` in an `AtomicU64` through its bit pattern.
#[derive(Debug)]
struct AtomicSeconds(AtomicU64);

impl AtomicSeconds {
    fn new(value: f64) -> Self {
        Self(AtomicU64::new(value.to_bits()))
    }

    fn load(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Acquire))
    }

    fn store(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Release);
    }
}

/// The wall-clock backed time source used by the engine.
///
/// Until [`enable_precise`](TimeSource::enable_precise) is called it reports
/// a coarse, millisecond-resolution reading derived from [`SystemTime`]. After
/// that, readings come from a monotonic [`Instant`] offset so that they
/// continue from the last coarse value.
#[derive(Debug)]
pub struct SystemClock {
    origin: SystemTime,
    precise: Option<(Instant, f64)>,
    last_coarse: AtomicSeconds,
}

impl SystemClock {
    /// Creates a clock whose origin is the current wall-clock time.
    pub fn new() -> Self {
        Self {
            origin: SystemTime::now(),
            precise: None,
            last_coarse: AtomicSeconds::new(0.0),
        }
    }

    /// Returns `true` once the monotonic source is active.
    pub fn is_precise(&self) -> bool {
        self.precise.is_some()
    }

    fn coarse_seconds(&self) -> f64 {
        let last = self.last_coarse.load();
        let reading = match SystemTime::now().duration_since(self.origin) {
            Ok(elapsed) => elapsed.as_millis() as f64 / 1000.0,
            Err(_) => {
                log::trace!("Wall clock moved behind its origin; reusing last reading.");
                last
            }
        };
        let reading = reading.max(last);
        self.last_coarse.store(reading);
        reading
    }

    fn seconds(&self) -> f64 {
        match self.precise {
            Some((start, offset)) => offset + start.elapsed().as_secs_f64(),
            None => self.coarse_seconds(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemClock {
    fn now(&self, unit: TimeUnit) -> f64 {
        convert(self.seconds(), TimeUnit::Seconds, unit)
    }

    fn enable_precise(&mut self) {
        if self.precise.is_none() {
            let offset = self.coarse_seconds();
            self.precise = Some((Instant::now(), offset));
            log::debug!("SystemClock switched to the monotonic source at {offset:.3}s.");
        }
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same reading, so a test can keep one handle and give
/// another to the engine.
#[derive(Debug, Clone)]
pub struct ManualClock {
    seconds: Arc<AtomicSeconds>,
}

impl ManualClock {
    /// Creates a clock reading zero seconds.
    pub fn new() -> Self {
        Self::starting_at(0.0)
    }

    /// Creates a clock reading `seconds`.
    pub fn starting_at(seconds: f64) -> Self {
        Self {
            seconds: Arc::new(AtomicSeconds::new(seconds)),
        }
    }

    /// The current reading, in seconds.
    pub fn seconds(&self) -> f64 {
        self.seconds.load()
    }

    /// Sets the reading, in seconds. Moving backwards is allowed.
    pub fn set(&self, seconds: f64) {
        self.seconds.store(seconds);
    }

    /// Advances the reading by `seconds`.
    pub fn advance(&self, seconds: f64) {
        self.set(self.seconds() + seconds);
    }

    /// Advances the reading by `value` expressed in `unit`.
    pub fn advance_by(&self, value: f64, unit: TimeUnit) {
        self.advance(convert(value, unit, TimeUnit::Seconds));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for ManualClock {
    fn now(&self, unit: TimeUnit) -> f64 {
        convert(self.seconds(), TimeUnit::Seconds, unit)
    }
}
