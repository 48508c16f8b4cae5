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

//! Stateless broad-phase collision predicates and the narrow-phase contract.
//!
//! Every predicate has one canonical scalar form. The vector and volume
//! overloads are thin conversions into that form so the boundary conventions
//! cannot drift between variants:
//!
//! * Box tests use strict `>` / `<` separation checks, so boxes that share
//!   an edge or face **are** reported as overlapping.
//! * Circle and sphere tests compare squared distances inclusively, so
//!   tangent shapes **are** reported as overlapping.
//!
//! Polygon and polyhedron tests are delegated to a [`NarrowPhase`]
//! implementation; [`SeparatingAxis`] is the default one.

mod narrow;
mod shapes;

pub use narrow::{NarrowPhase, SeparatingAxis};
pub use shapes::{Circle, Contact, Polygon, Polyhedron, Sphere};

use crate::math::{Aabb, Rect, Vec2, Vec3};

// --- Axis-aligned boxes, 2D ---

/// Tests two 2D boxes given as minimum corner plus width and height.
#[allow(clippy::too_many_arguments)]
#[inline]
pub fn test_aabb_aabb_2d(
    x1: f32,
    y1: f32,
    w1: f32,
    h1: f32,
    x2: f32,
    y2: f32,
    w2: f32,
    h2: f32,
) -> bool {
    !(x1 > x2 + w2 || x1 + w1 < x2) && !(y1 > y2 + h2 || y1 + h1 < y2)
}

/// Tests two 2D boxes given as a position vector plus width and height.
#[inline]
pub fn test_aabb_aabb_2d_at(p1: Vec2, w1: f32, h1: f32, p2: Vec2, w2: f32, h2: f32) -> bool {
    test_aabb_aabb_2d(p1.x, p1.y, w1, h1, p2.x, p2.y, w2, h2)
}

/// Tests two 2D boxes given as minimum and maximum corners.
#[inline]
pub fn test_aabb_aabb_2d_min_max(p1_min: Vec2, p1_max: Vec2, p2_min: Vec2, p2_max: Vec2) -> bool {
    test_aabb_aabb_2d(
        p1_min.x,
        p1_min.y,
        p1_max.x - p1_min.x,
        p1_max.y - p1_min.y,
        p2_min.x,
        p2_min.y,
        p2_max.x - p2_min.x,
        p2_max.y - p2_min.y,
    )
}

/// Tests two [`Rect`] values.
#[inline]
pub fn test_rect_rect(a: &Rect, b: &Rect) -> bool {
    test_aabb_aabb_2d(a.x, a.y, a.width, a.height, b.x, b.y, b.width, b.height)
}

// --- Axis-aligned boxes, 3D ---

/// Tests two 3D boxes given as minimum corner plus width, height and thickness.
#[allow(clippy::too_many_arguments)]
#[inline]
pub fn test_aabb_aabb_3d(
    x1: f32,
    y1: f32,
    z1: f32,
    w1: f32,
    h1: f32,
    t1: f32,
    x2: f32,
    y2: f32,
    z2: f32,
    w2: f32,
    h2: f32,
    t2: f32,
) -> bool {
    !(x1 > x2 + w2 || x1 + w1 < x2)
        && !(y1 > y2 + h2 || y1 + h1 < y2)
        && !(z1 > z2 + t2 || z1 + t1 < z2)
}

/// Tests two 3D boxes given as a position vector plus extents.
#[allow(clippy::too_many_arguments)]
#[inline]
pub fn test_aabb_aabb_3d_at(
    p1: Vec3,
    w1: f32,
    h1: f32,
    t1: f32,
    p2: Vec3,
    w2: f32,
    h2: f32,
    t2: f32,
) -> bool {
    test_aabb_aabb_3d(p1.x, p1.y, p1.z, w1, h1, t1, p2.x, p2.y, p2.z, w2, h2, t2)
}

/// Tests two 3D boxes given as minimum and maximum corners.
#[inline]
pub fn test_aabb_aabb_3d_min_max(p1_min: Vec3, p1_max: Vec3, p2_min: Vec3, p2_max: Vec3) -> bool {
    let e1 = p1_max - p1_min;
    let e2 = p2_max - p2_min;
    test_aabb_aabb_3d_at(p1_min, e1.x, e1.y, e1.z, p2_min, e2.x, e2.y, e2.z)
}

/// Tests two [`Aabb`] values.
#[inline]
pub fn test_aabb_aabb(a: &Aabb, b: &Aabb) -> bool {
    test_aabb_aabb_3d_at(
        a.position,
        a.extents.x,
        a.extents.y,
        a.extents.z,
        b.position,
        b.extents.x,
        b.extents.y,
        b.extents.z,
    )
}

// --- Circles and spheres ---

/// Tests two circles given as center coordinates and radius.
#[inline]
pub fn test_circle_circle(x1: f32, y1: f32, r1: f32, x2: f32, y2: f32, r2: f32) -> bool {
    let distance_sq = (x2 - x1) * (x2 - x1) + (y2 - y1) * (y2 - y1);
    let radius_sum_sq = (r1 + r2) * (r1 + r2);

    distance_sq <= radius_sum_sq
}

/// Tests two circles given as center vectors and radius.
#[inline]
pub fn test_circle_circle_at(c1: Vec2, r1: f32, c2: Vec2, r2: f32) -> bool {
    test_circle_circle(c1.x, c1.y, r1, c2.x, c2.y, r2)
}

/// Tests two [`Circle`] values.
#[inline]
pub fn test_circles(a: &Circle, b: &Circle) -> bool {
    test_circle_circle_at(a.center, a.radius, b.center, b.radius)
}

/// Tests two spheres given as center coordinates and radius.
#[allow(clippy::too_many_arguments)]
#[inline]
pub fn test_sphere_sphere(
    x1: f32,
    y1: f32,
    z1: f32,
    r1: f32,
    x2: f32,
    y2: f32,
    z2: f32,
    r2: f32,
) -> bool {
    let distance_sq = (x2 - x1) * (x2 - x1) + (y2 - y1) * (y2 - y1) + (z2 - z1) * (z2 - z1);
    let radius_sum_sq = (r1 + r2) * (r1 + r2);

    distance_sq <= radius_sum_sq
}

/// Tests two spheres given as center vectors and radius.
#[inline]
pub fn test_sphere_sphere_at(c1: Vec3, r1: f32, c2: Vec3, r2: f32) -> bool {
    test_sphere_sphere(c1.x, c1.y, c1.z, r1, c2.x, c2.y, c2.z, r2)
}

/// Tests two [`Sphere`] values.
#[inline]
pub fn test_spheres(a: &Sphere, b: &Sphere) -> bool {
    test_sphere_sphere_at(a.center, a.radius, b.center, b.radius)
}

// --- Narrow phase delegation ---

/// Tests two convex polygons with the given narrow-phase routine.
#[inline]
pub fn test_polygon_polygon(narrow: &dyn NarrowPhase, a: &Polygon, b: &Polygon) -> bool {
    narrow.test_polygons(a, b, None)
}

/// Tests two convex polygons and fills `contact` with the minimum translation
/// needed to separate them when they overlap.
#[inline]
pub fn test_polygon_polygon_contact(
    narrow: &dyn NarrowPhase,
    a: &Polygon,
    b: &Polygon,
    contact: &mut Contact,
) -> bool {
    narrow.test_polygons(a, b, Some(contact))
}

/// Tests two convex polyhedra with the given narrow-phase routine.
#[inline]
pub fn test_polyhedron_polyhedron(narrow: &dyn NarrowPhase, a: &Polyhedron, b: &Polyhedron) -> bool {
    narrow.test_polyhedra(a, b)
}
