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

use super::shapes::{Contact, Polygon, Polyhedron};
use crate::math::{Vec2, Vec3, EPSILON};

/// A narrow-phase routine for convex shapes.
///
/// Implementations must agree with the broad-phase conventions: shapes that
/// merely touch are reported as colliding.
pub trait NarrowPhase: Send + Sync {
    /// Tests two convex polygons.
    ///
    /// When `contact` is provided and the polygons overlap, it receives the
    /// minimum translation axis (pointing from `a` to `b`) and depth.
    fn test_polygons(&self, a: &Polygon, b: &Polygon, contact: Option<&mut Contact>) -> bool;

    /// Tests two convex polyhedra.
    fn test_polyhedra(&self, a: &Polyhedron, b: &Polyhedron) -> bool;
}

/// Separating axis test for convex polygons and polyhedra.
#[derive(Debug, Default, Clone, Copy)]
pub struct SeparatingAxis;

impl SeparatingAxis {
    /// Creates a new `SeparatingAxis` routine.
    pub fn new() -> Self {
        Self
    }
}

fn project_2d(vertices: &[Vec2], axis: Vec2) -> (f32, f32) {
    vertices
        .iter()
        .map(|v| v.dot(axis))
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), p| {
            (min.min(p), max.max(p))
        })
}

fn project_3d(vertices: &[Vec3], axis: Vec3) -> (f32, f32) {
    vertices
        .iter()
        .map(|v| v.dot(axis))
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), p| {
            (min.min(p), max.max(p))
        })
}

fn edge_normals(vertices: &[Vec2]) -> impl Iterator<Item = Vec2> + '_ {
    (0..vertices.len()).filter_map(move |i| {
        let edge = vertices[(i + 1) % vertices.len()] - vertices[i];
        let normal = edge.perp().normalize();
        (normal != Vec2::ZERO).then_some(normal)
    })
}

impl NarrowPhase for SeparatingAxis {
    fn test_polygons(&self, a: &Polygon, b: &Polygon, contact: Option<&mut Contact>) -> bool {
        if a.vertices().len() < 3 || b.vertices().len() < 3 {
            return false;
        }

        let verts_a: Vec<Vec2> = a.world_vertices().collect();
        let verts_b: Vec<Vec2> = b.world_vertices().collect();

        let mut best_axis = Vec2::ZERO;
        let mut best_depth = f32::INFINITY;

        for axis in edge_normals(&verts_a).chain(edge_normals(&verts_b)) {
            let (min_a, max_a) = project_2d(&verts_a, axis);
            let (min_b, max_b) = project_2d(&verts_b, axis);
            if max_a < min_b || max_b < min_a {
                return false;
            }
            let depth = (max_a - min_b).min(max_b - min_a);
            if depth < best_depth {
                best_depth = depth;
                best_axis = axis;
            }
        }

        if best_axis == Vec2::ZERO {
            // Every edge was degenerate.
            return false;
        }

        if let Some(contact) = contact {
            let direction = b.centroid() - a.centroid();
            if best_axis.dot(direction) < 0.0 {
                best_axis = -best_axis;
            }
            contact.normal = best_axis;
            contact.depth = best_depth;
        }
        true
    }

    fn test_polyhedra(&self, a: &Polyhedron, b: &Polyhedron) -> bool {
        if a.faces().is_empty() || b.faces().is_empty() {
            return false;
        }

        let verts_a: Vec<Vec3> = a.world_vertices().collect();
        let verts_b: Vec<Vec3> = b.world_vertices().collect();

        let separated_on = |axis: Vec3| {
            let (min_a, max_a) = project_3d(&verts_a, axis);
            let (min_b, max_b) = project_3d(&verts_b, axis);
            max_a < min_b || max_b < min_a
        };

        let usable = |axis: &Vec3| axis.length_squared() > EPSILON * EPSILON;

        if a
            .face_normals()
            .chain(b.face_normals())
            .map(|n| n.normalize())
            .filter(usable)
            .any(separated_on)
        {
            return false;
        }

        let edges_b: Vec<Vec3> = b.edges().collect();
        !a.edges().any(|edge_a| {
            edges_b
                .iter()
                .map(|edge_b| edge_a.cross(*edge_b).normalize())
                .filter(usable)
                .any(separated_on)
        })
    }
}
