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

//! Time units, conversions and the clock abstraction the game loop samples.

mod clock;

pub use clock::{ManualClock, SystemClock};

use serde::{Deserialize, Serialize};
use std::fmt;

/// The unit a clock reading is expressed in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    /// Nanoseconds.
    Nanos,
    /// Microseconds.
    Micros,
    /// Milliseconds.
    Millis,
    /// Seconds.
    #[default]
    Seconds,
}

impl TimeUnit {
    /// How many of this unit make up one second.
    #[inline]
    pub const fn per_second(self) -> f64 {
        match self {
            TimeUnit::Nanos => 1e9,
            TimeUnit::Micros => 1e6,
            TimeUnit::Millis => 1e3,
            TimeUnit::Seconds => 1.0,
        }
    }

    /// The conventional short suffix for the unit.
    pub const fn suffix(self) -> &'static str {
        match self {
            TimeUnit::Nanos => "ns",
            TimeUnit::Micros => "us",
            TimeUnit::Millis => "ms",
            TimeUnit::Seconds => "s",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Converts `value` from one time unit into another.
///
/// Every factor is an exact power of ten, applied with a single multiply or
/// divide. Converting into the same unit returns `value` unchanged.
///
/// # Examples
///
/// ```
/// use pulse_core::time::{convert, TimeUnit};
/// assert_eq!(convert(1.5, TimeUnit::Seconds, TimeUnit::Millis), 1500.0);
/// assert_eq!(convert(250.0, TimeUnit::Micros, TimeUnit::Micros), 250.0);
/// ```
#[inline]
pub fn convert(value: f64, from: TimeUnit, to: TimeUnit) -> f64 {
    if from == to {
        return value;
    }
    let (from, to) = (from.per_second(), to.per_second());
    if to > from {
        value * (to / from)
    } else {
        value / (from / to)
    }
}

/// A source of time readings.
///
/// Readings are relative to an arbitrary origin; only differences between
/// two readings of the same source are meaningful.
pub trait TimeSource: Send + Sync {
    /// The current reading, expressed in `unit`.
    fn now(&self, unit: TimeUnit) -> f64;

    /// Switches the source to its high-resolution mode, if it has one.
    ///
    /// The engine calls this once the subsystems are initialized.
    fn enable_precise(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const UNITS: [TimeUnit; 4] = [
        TimeUnit::Nanos,
        TimeUnit::Micros,
        TimeUnit::Millis,
        TimeUnit::Seconds,
    ];

    #[test]
    fn test_default_unit_is_seconds() {
        assert_eq!(TimeUnit::default(), TimeUnit::Seconds);
    }

    #[test]
    fn test_factor_table() {
        assert_eq!(convert(1.0, TimeUnit::Seconds, TimeUnit::Nanos), 1e9);
        assert_eq!(convert(1.0, TimeUnit::Seconds, TimeUnit::Micros), 1e6);
        assert_eq!(convert(2.0, TimeUnit::Millis, TimeUnit::Micros), 2000.0);
        assert_eq!(convert(3000.0, TimeUnit::Nanos, TimeUnit::Micros), 3.0);
        assert_eq!(convert(5.0, TimeUnit::Millis, TimeUnit::Nanos), 5e6);
        assert_eq!(convert(1500.0, TimeUnit::Millis, TimeUnit::Seconds), 1.5);
    }

    #[test]
    fn test_same_unit_is_exact_noop() {
        for unit in UNITS {
            let value = 0.1 + 0.2;
            assert_eq!(convert(value, unit, unit).to_bits(), value.to_bits());
        }
    }

    #[test]
    fn test_round_trip_between_every_pair() {
        for from in UNITS {
            for to in UNITS {
                let x = 1.0 / 60.0;
                let back = convert(convert(x, from, to), to, from);
                assert_relative_eq!(back, x, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn test_time_unit_serializes_lowercase() {
        let json = serde_json::to_string(&TimeUnit::Millis).unwrap();
        assert_eq!(json, "\"millis\"");
        let unit: TimeUnit = serde_json::from_str("\"nanos\"").unwrap();
        assert_eq!(unit, TimeUnit::Nanos);
    }
}
