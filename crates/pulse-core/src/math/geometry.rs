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

//! Provides the axis-aligned bounding volumes used by the broad phase.
//!
//! Both volumes are stored as a position (the minimum corner) plus extents,
//! which is the canonical form the collision predicates operate on.

use super::{Vec2, Vec3};
use crate::collision;

/// A 2D axis-aligned rectangle, stored as its minimum corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// The x coordinate of the minimum corner.
    pub x: f32,
    /// The y coordinate of the minimum corner.
    pub y: f32,
    /// The extent along the x axis.
    pub width: f32,
    /// The extent along the y axis.
    pub height: f32,
}

impl Rect {
    /// Creates a new `Rect` from its minimum corner and size.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a `Rect` spanning two corner points.
    ///
    /// The corners are ordered component-wise, so callers may pass them in any order.
    #[inline]
    pub fn from_min_max(a: Vec2, b: Vec2) -> Self {
        let min = Vec2::new(a.x.min(b.x), a.y.min(b.y));
        let max = Vec2::new(a.x.max(b.x), a.y.max(b.y));
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// Returns the minimum corner.
    #[inline]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Returns the maximum corner.
    #[inline]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    /// Returns the center point.
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Checks whether this rectangle overlaps another.
    ///
    /// Rectangles that only touch along an edge are considered overlapping.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        collision::test_rect_rect(self, other)
    }
}

/// Represents an Axis-Aligned Bounding Box (AABB).
///
/// An AABB is a rectangular prism aligned with the coordinate axes. It is a
/// simple but highly efficient volume for broad-phase collision detection.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    /// The corner of the box with the smallest coordinates on all axes.
    pub position: Vec3,
    /// Width, height and thickness of the box.
    pub extents: Vec3,
}

impl Aabb {
    /// Creates a new `Aabb` from its minimum corner and extents.
    #[inline]
    pub const fn new(position: Vec3, extents: Vec3) -> Self {
        Self { position, extents }
    }

    /// Creates a new `Aabb` from two corner points.
    ///
    /// This constructor ensures that the stored position is the component-wise
    /// minimum, regardless of the order the points are passed in.
    #[inline]
    pub fn from_min_max(a: Vec3, b: Vec3) -> Self {
        let min = Vec3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z));
        let max = Vec3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z));
        Self::new(min, max - min)
    }

    /// Creates a new `Aabb` from a center point and its half-extents.
    ///
    /// The provided `half_extents` will be made non-negative.
    #[inline]
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        let half = Vec3::new(
            half_extents.x.abs(),
            half_extents.y.abs(),
            half_extents.z.abs(),
        );
        Self::new(center - half, half * 2.0)
    }

    /// Returns the minimum corner.
    #[inline]
    pub fn min(&self) -> Vec3 {
        self.position
    }

    /// Returns the maximum corner.
    #[inline]
    pub fn max(&self) -> Vec3 {
        self.position + self.extents
    }

    /// Calculates the center point of the `Aabb`.
    #[inline]
    pub fn center(&self) -> Vec3 {
        self.position + self.extents * 0.5
    }

    /// Checks if a point is contained within or on the boundary of the `Aabb`.
    #[inline]
    pub fn contains_point(&self, point: Vec3) -> bool {
        let max = self.max();
        point.x >= self.position.x
            && point.x <= max.x
            && point.y >= self.position.y
            && point.y <= max.y
            && point.z >= self.position.z
            && point.z <= max.z
    }

    /// Checks if this `Aabb` intersects with another `Aabb`.
    ///
    /// Boxes that only touch at the boundary are considered to be intersecting.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        collision::test_aabb_aabb(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;

    #[test]
    fn test_rect_from_min_max_orders_corners() {
        let rect = Rect::from_min_max(Vec2::new(4.0, 1.0), Vec2::new(1.0, 3.0));
        assert_eq!(rect, Rect::new(1.0, 1.0, 3.0, 2.0));
        assert_eq!(rect.max(), Vec2::new(4.0, 3.0));
        assert_eq!(rect.center(), Vec2::new(2.5, 2.0));
    }

    #[test]
    fn test_aabb_from_center_half_extents() {
        let aabb = Aabb::from_center_half_extents(Vec3::ONE, Vec3::new(-1.0, 2.0, 0.5));
        assert_eq!(aabb.min(), Vec3::new(0.0, -1.0, 0.5));
        assert_eq!(aabb.max(), Vec3::new(2.0, 3.0, 1.5));
        let center = aabb.center();
        assert!(approx_eq(center.x, 1.0) && approx_eq(center.y, 1.0) && approx_eq(center.z, 1.0));
    }

    #[test]
    fn test_aabb_contains_point_on_boundary() {
        let aabb = Aabb::from_min_max(Vec3::ZERO, Vec3::ONE);
        assert!(aabb.contains_point(Vec3::ONE));
        assert!(!aabb.contains_point(Vec3::new(1.1, 0.5, 0.5)));
    }

    #[test]
    fn test_intersects_methods_follow_predicates() {
        let a = Aabb::from_min_max(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::from_min_max(Vec3::ONE, Vec3::new(2.0, 2.0, 2.0));
        assert!(a.intersects(&b));

        let r1 = Rect::new(0.0, 0.0, 1.0, 1.0);
        let r2 = Rect::new(1.5, 0.0, 1.0, 1.0);
        assert!(!r1.intersects(&r2));
    }
}
