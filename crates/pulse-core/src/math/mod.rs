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

//! The few math primitives the engine exchanges: vectors for positions and
//! colors, boxes for collision and a matrix for camera values. Games that
//! need more bring their own math library and convert at the boundary.

pub mod geometry;
pub mod matrix;
pub mod vector;

pub use self::geometry::{Aabb, Rect};
pub use self::matrix::Mat4;
pub use self::vector::{Vec2, Vec3, Vec4};
pub use std::f32::consts::FRAC_PI_4;

/// Tolerance for float comparisons and degenerate-length checks.
pub const EPSILON: f32 = 1e-5;

/// Returns `true` if `a` and `b` differ by less than [`EPSILON`].
///
/// ```
/// use pulse_core::math::approx_eq;
/// assert!(approx_eq(0.1 + 0.2, 0.3));
/// ```
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}
