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

use crate::math::{Mat4, Vec3, FRAC_PI_4};

/// A 2D camera with its origin at the top-left of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthographicCamera {
    /// Viewport width in world units.
    pub width: f32,
    /// Viewport height in world units.
    pub height: f32,
    /// Near clipping plane.
    pub z_near: f32,
    /// Far clipping plane.
    pub z_far: f32,
    /// World position of the camera.
    pub position: Vec3,
}

/// A 3D camera with a vertical field of view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width divided by height.
    pub aspect_ratio: f32,
    /// Near clipping plane.
    pub z_near: f32,
    /// Far clipping plane.
    pub z_far: f32,
    /// Eye position.
    pub eye: Vec3,
    /// Point looked at.
    pub target: Vec3,
    /// Up direction.
    pub up: Vec3,
}

/// The camera the loop keeps in sync with the display size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Camera {
    /// Identity projection and view.
    #[default]
    Null,
    /// Orthographic projection.
    Orthographic(OrthographicCamera),
    /// Perspective projection.
    Perspective(PerspectiveCamera),
}

impl Camera {
    /// An orthographic camera covering `width` x `height` units.
    pub fn orthographic(width: f32, height: f32) -> Self {
        Camera::Orthographic(OrthographicCamera {
            width,
            height,
            z_near: -1.0,
            z_far: 1.0,
            position: Vec3::ZERO,
        })
    }

    /// A perspective camera at `(0, 0, 1)` looking at the origin.
    pub fn perspective(fov_y: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Camera::Perspective(PerspectiveCamera {
            fov_y,
            aspect_ratio,
            z_near,
            z_far,
            eye: Vec3::Z,
            target: Vec3::ZERO,
            up: Vec3::Y,
        })
    }

    /// A 45 degree perspective camera for the given viewport.
    pub fn perspective_for(width: u32, height: u32) -> Self {
        Self::perspective(FRAC_PI_4, aspect(width, height), 0.1, 100.0)
    }

    /// Adapts the projection to a new viewport size.
    pub fn init_projection(&mut self, width: u32, height: u32) {
        match self {
            Camera::Null => {}
            Camera::Orthographic(ortho) => {
                ortho.width = width as f32;
                ortho.height = height as f32;
            }
            Camera::Perspective(persp) => persp.aspect_ratio = aspect(width, height),
        }
    }

    /// The projection matrix.
    pub fn projection(&self) -> Mat4 {
        match self {
            Camera::Null => Mat4::IDENTITY,
            Camera::Orthographic(o) => {
                Mat4::screen_ortho(o.width, o.height, o.z_near, o.z_far)
            }
            Camera::Perspective(p) => {
                Mat4::perspective(p.fov_y, p.aspect_ratio, p.z_near, p.z_far)
            }
        }
    }

    /// The view matrix. Falls back to identity for a degenerate look-at.
    pub fn view(&self) -> Mat4 {
        match self {
            Camera::Null => Mat4::IDENTITY,
            Camera::Orthographic(o) => Mat4::from_translation(-o.position),
            Camera::Perspective(p) => {
                Mat4::view_towards(p.eye, p.target, p.up).unwrap_or(Mat4::IDENTITY)
            }
        }
    }
}

fn aspect(width: u32, height: u32) -> f32 {
    width as f32 / height.max(1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::math::Vec4;

    #[test]
    fn test_null_camera_is_identity() {
        let mut camera = Camera::Null;
        camera.init_projection(1024, 768);
        assert_eq!(camera.projection(), Mat4::IDENTITY);
        assert_eq!(camera.view(), Mat4::IDENTITY);
    }

    #[test]
    fn test_orthographic_maps_viewport_corners() {
        let mut camera = Camera::orthographic(10.0, 10.0);
        camera.init_projection(800, 600);

        let projection = camera.projection();
        let top_left = projection * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let bottom_right = projection * Vec4::new(800.0, 600.0, 0.0, 1.0);

        assert_relative_eq!(top_left.x, -1.0);
        assert_relative_eq!(top_left.y, 1.0);
        assert_relative_eq!(bottom_right.x, 1.0);
        assert_relative_eq!(bottom_right.y, -1.0);
    }

    #[test]
    fn test_perspective_tracks_aspect_ratio() {
        let mut camera = Camera::perspective_for(800, 600);
        camera.init_projection(1920, 1080);
        match camera {
            Camera::Perspective(p) => assert_relative_eq!(p.aspect_ratio, 1920.0 / 1080.0),
            other => panic!("unexpected camera {other:?}"),
        }
    }

    #[test]
    fn test_orthographic_view_translates_by_negated_position() {
        let camera = Camera::Orthographic(OrthographicCamera {
            width: 1.0,
            height: 1.0,
            z_near: -1.0,
            z_far: 1.0,
            position: Vec3::new(5.0, 2.0, 0.0),
        });
        let moved = camera.view() * Vec4::new(5.0, 2.0, 0.0, 1.0);
        assert_relative_eq!(moved.x, 0.0);
        assert_relative_eq!(moved.y, 0.0);
    }
}
