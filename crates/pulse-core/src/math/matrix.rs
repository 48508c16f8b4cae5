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

//! Provides a column-major 4x4 matrix for camera projection and view values.

use super::{Vec3, Vec4, EPSILON};
use std::ops::Mul;

/// A 4x4 column-major matrix.
///
/// Used for camera view and projection matrices. The memory layout is
/// column-major, which is what graphics APIs expect when the matrix is uploaded.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat4 {
    /// The columns of the matrix. `cols[0]` is the first column, and so on.
    pub cols: [Vec4; 4],
}

impl Mat4 {
    /// The 4x4 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [
            Vec4::new(1.0, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 1.0, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        ],
    };

    /// Creates a new matrix from four column vectors.
    #[inline]
    pub fn from_cols(c0: Vec4, c1: Vec4, c2: Vec4, c3: Vec4) -> Self {
        Self {
            cols: [c0, c1, c2, c3],
        }
    }

    /// Builds a matrix from its four rows.
    #[inline]
    fn from_rows(r0: Vec4, r1: Vec4, r2: Vec4, r3: Vec4) -> Self {
        Self::from_cols(
            Vec4::new(r0.x, r1.x, r2.x, r3.x),
            Vec4::new(r0.y, r1.y, r2.y, r3.y),
            Vec4::new(r0.z, r1.z, r2.z, r3.z),
            Vec4::new(r0.w, r1.w, r2.w, r3.w),
        )
    }

    /// A translation by `offset`.
    #[inline]
    pub fn from_translation(offset: Vec3) -> Self {
        let mut m = Self::IDENTITY;
        m.cols[3] = Vec4::point(offset);
        m
    }

    /// Pixel-space projection for a `width` x `height` viewport.
    ///
    /// The origin is the top-left corner with y growing downwards. Depth
    /// `-z_near` maps to 0 and `-z_far` to 1.
    pub fn screen_ortho(width: f32, height: f32, z_near: f32, z_far: f32) -> Self {
        let depth = z_far - z_near;
        Self::from_rows(
            Vec4::new(2.0 / width, 0.0, 0.0, -1.0),
            Vec4::new(0.0, -2.0 / height, 0.0, 1.0),
            Vec4::new(0.0, 0.0, -1.0 / depth, -z_near / depth),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        )
    }

    /// Perspective projection looking down `-z`, with depth in `[0, 1]`.
    ///
    /// `fov_y` is the vertical field of view in radians. Requires
    /// `0 < z_near < z_far`.
    pub fn perspective(fov_y: f32, aspect: f32, z_near: f32, z_far: f32) -> Self {
        debug_assert!(z_near > 0.0 && z_far > z_near);
        let focal = 1.0 / (0.5 * fov_y).tan();
        let depth_scale = z_far / (z_near - z_far);
        Self::from_rows(
            Vec4::new(focal / aspect, 0.0, 0.0, 0.0),
            Vec4::new(0.0, focal, 0.0, 0.0),
            Vec4::new(0.0, 0.0, depth_scale, z_near * depth_scale),
            Vec4::new(0.0, 0.0, -1.0, 0.0),
        )
    }

    /// View matrix of a camera at `eye` facing `target`.
    ///
    /// Its rows are the camera's right, up and backward axes, each followed
    /// by the eye's offset along that axis. `None` when `eye` and `target`
    /// coincide or `up` is parallel to the line of sight.
    pub fn view_towards(eye: Vec3, target: Vec3, up: Vec3) -> Option<Self> {
        let back = eye - target;
        if back.length_squared() < EPSILON * EPSILON {
            return None;
        }
        let back = back.normalize();
        let right = up.cross(back);
        if right.length_squared() < EPSILON * EPSILON {
            return None;
        }
        let right = right.normalize();
        let up = back.cross(right);

        let row = |axis: Vec3| Vec4::new(axis.x, axis.y, axis.z, -axis.dot(eye));
        Some(Self::from_rows(
            row(right),
            row(up),
            row(back),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        ))
    }
}

impl Default for Mat4 {
    /// Returns the 4x4 identity matrix.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;
    /// Transforms a `Vec4` as a sum of scaled columns.
    #[inline]
    fn mul(self, rhs: Vec4) -> Vec4 {
        let [c0, c1, c2, c3] = self.cols;
        c0 * rhs.x + c1 * rhs.y + c2 * rhs.z + c3 * rhs.w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_screen_ortho_maps_corners_to_ndc() {
        let proj = Mat4::screen_ortho(800.0, 600.0, -1.0, 1.0);

        let top_left = proj * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!(approx_eq(top_left.x, -1.0));
        assert!(approx_eq(top_left.y, 1.0));

        let bottom_right = proj * Vec4::new(800.0, 600.0, 0.0, 1.0);
        assert!(approx_eq(bottom_right.x, 1.0));
        assert!(approx_eq(bottom_right.y, -1.0));
    }

    #[test]
    fn test_perspective_maps_near_and_far_planes() {
        let proj = Mat4::perspective(FRAC_PI_2, 1.0, 1.0, 10.0);

        let near = proj * Vec4::new(1.0, 1.0, -1.0, 1.0);
        assert!(approx_eq(near.z / near.w, 0.0));
        assert!(approx_eq(near.x / near.w, 1.0));
        assert!(approx_eq(near.y / near.w, 1.0));

        let far = proj * Vec4::new(0.0, 0.0, -10.0, 1.0);
        assert!(approx_eq(far.z / far.w, 1.0));
    }

    #[test]
    fn test_view_towards_degenerate_returns_none() {
        assert!(Mat4::view_towards(Vec3::ZERO, Vec3::ZERO, Vec3::Y).is_none());
        assert!(Mat4::view_towards(Vec3::ZERO, Vec3::Y, Vec3::Y).is_none());
    }

    #[test]
    fn test_view_towards_puts_target_ahead_of_eye() {
        let eye = Vec3::new(0.0, 0.0, 5.0);
        let view = Mat4::view_towards(eye, Vec3::ZERO, Vec3::Y).unwrap();

        let at_eye = view * Vec4::point(eye);
        assert!(approx_eq(at_eye.x, 0.0));
        assert!(approx_eq(at_eye.y, 0.0));
        assert!(approx_eq(at_eye.z, 0.0));

        let at_target = view * Vec4::point(Vec3::ZERO);
        assert!(approx_eq(at_target.z, -5.0));
    }
}
