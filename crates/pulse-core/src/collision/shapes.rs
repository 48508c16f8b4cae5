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

use crate::math::{Vec2, Vec3};

/// A circle, described by its center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    /// Center of the circle.
    pub center: Vec2,
    /// Radius of the circle.
    pub radius: f32,
}

impl Circle {
    /// Creates a new circle.
    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// A sphere, described by its center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    /// Center of the sphere.
    pub center: Vec3,
    /// Radius of the sphere.
    pub radius: f32,
}

impl Sphere {
    /// Creates a new sphere.
    pub const fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Penetration details reported by a narrow-phase polygon test.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Contact {
    /// Unit axis along which the first shape must move (negated) to separate.
    /// Points from the first shape towards the second.
    pub normal: Vec2,
    /// Penetration depth along `normal`.
    pub depth: f32,
}

/// A convex polygon: vertices relative to a world position.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// World-space position the vertices are relative to.
    pub position: Vec2,
    vertices: Vec<Vec2>,
}

impl Polygon {
    /// Creates a polygon at the origin from its local vertices, in winding order.
    pub fn new(vertices: Vec<Vec2>) -> Self {
        Self {
            position: Vec2::ZERO,
            vertices,
        }
    }

    /// Creates an axis-aligned rectangle polygon with its minimum corner at the local origin.
    pub fn rectangle(width: f32, height: f32) -> Self {
        Self::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(width, 0.0),
            Vec2::new(width, height),
            Vec2::new(0.0, height),
        ])
    }

    /// Returns this polygon moved to `position`.
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    /// The local vertices of the polygon.
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Iterates over the vertices in world space.
    pub fn world_vertices(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.vertices.iter().map(move |v| *v + self.position)
    }

    /// The average of the world-space vertices.
    pub fn centroid(&self) -> Vec2 {
        if self.vertices.is_empty() {
            return self.position;
        }
        let sum = self
            .world_vertices()
            .fold(Vec2::ZERO, |acc, vertex| acc + vertex);
        sum / self.vertices.len() as f32
    }
}

/// A convex polyhedron: vertices relative to a world position plus triangular faces.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyhedron {
    /// World-space position the vertices are relative to.
    pub position: Vec3,
    vertices: Vec<Vec3>,
    faces: Vec<[usize; 3]>,
}

impl Polyhedron {
    /// Creates a polyhedron at the origin.
    ///
    /// Face indices that fall outside `vertices` are discarded.
    pub fn new(vertices: Vec<Vec3>, faces: Vec<[usize; 3]>) -> Self {
        let count = vertices.len();
        let faces = faces
            .into_iter()
            .filter(|face| face.iter().all(|&index| index < count))
            .collect();
        Self {
            position: Vec3::ZERO,
            vertices,
            faces,
        }
    }

    /// Creates an axis-aligned cuboid with its minimum corner at the local origin.
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let vertices = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(width, 0.0, 0.0),
            Vec3::new(width, height, 0.0),
            Vec3::new(0.0, height, 0.0),
            Vec3::new(0.0, 0.0, depth),
            Vec3::new(width, 0.0, depth),
            Vec3::new(width, height, depth),
            Vec3::new(0.0, height, depth),
        ];
        let faces = vec![
            [0, 1, 2],
            [0, 2, 3],
            [4, 5, 6],
            [4, 6, 7],
            [0, 1, 5],
            [0, 5, 4],
            [3, 2, 6],
            [3, 6, 7],
            [0, 3, 7],
            [0, 7, 4],
            [1, 2, 6],
            [1, 6, 5],
        ];
        Self::new(vertices, faces)
    }

    /// Returns this polyhedron moved to `position`.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// The local vertices of the polyhedron.
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// The triangular faces, as indices into [`vertices`](Self::vertices).
    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    /// Iterates over the vertices in world space.
    pub fn world_vertices(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices.iter().map(move |v| *v + self.position)
    }

    /// Iterates over every face edge as a direction vector.
    pub fn edges(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.faces.iter().flat_map(move |&[a, b, c]| {
            let (va, vb, vc) = (self.vertices[a], self.vertices[b], self.vertices[c]);
            [vb - va, vc - vb, va - vc]
        })
    }

    /// Iterates over the (unnormalized) face normals.
    pub fn face_normals(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.faces.iter().map(move |&[a, b, c]| {
            let (va, vb, vc) = (self.vertices[a], self.vertices[b], self.vertices[c]);
            (vb - va).cross(vc - va)
        })
    }
}
