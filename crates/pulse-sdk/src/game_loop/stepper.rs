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

/// Relative slack when comparing the lag against the frame time, so that
/// an elapsed time of exactly `k` frames yields `k` steps despite rounding.
const STEP_TOLERANCE: f64 = 1e-9;

/// The lag accumulator behind the fixed-step update.
///
/// Elapsed time is added to the lag; each fixed step consumes one frame
/// time. At most `max_steps` steps run per iteration.
#[derive(Debug, Clone)]
pub struct FixedStepper {
    lag: f64,
    max_steps: u32,
    drop_excess_lag: bool,
}

impl FixedStepper {
    /// Creates an empty accumulator.
    pub fn new(max_steps: u32, drop_excess_lag: bool) -> Self {
        Self {
            lag: 0.0,
            max_steps,
            drop_excess_lag,
        }
    }

    /// Time accumulated but not yet consumed by fixed steps.
    pub fn lag(&self) -> f64 {
        self.lag
    }

    /// Adds elapsed time. Negative values are ignored.
    pub fn accumulate(&mut self, elapsed: f64) {
        if elapsed > 0.0 {
            self.lag += elapsed;
        }
    }

    /// Returns `true` if another step should run, given the steps already
    /// run this iteration.
    pub fn should_step(&self, frame_time: f64, steps_taken: u32) -> bool {
        steps_taken < self.max_steps && self.lag + frame_time * STEP_TOLERANCE >= frame_time
    }

    /// Consumes one frame time from the lag.
    pub fn consume(&mut self, frame_time: f64) {
        self.lag = (self.lag - frame_time).max(0.0);
    }

    /// Ends the iteration's stepping. Returns `true` if the step bound cut
    /// it short, in which case the excess lag is either carried or reduced
    /// to its fractional part.
    pub fn settle(&mut self, frame_time: f64, steps_taken: u32) -> bool {
        let bounded = steps_taken >= self.max_steps && self.should_step(frame_time, 0);
        if bounded && self.drop_excess_lag {
            self.lag = self.lag.rem_euclid(frame_time);
        }
        bounded
    }

    /// The interpolation factor `lag / frame_time`.
    pub fn lag_offset(&self, frame_time: f64) -> f64 {
        self.lag / frame_time
    }
}
