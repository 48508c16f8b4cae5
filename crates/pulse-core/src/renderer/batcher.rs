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

use crate::math::{Vec2, Vec3, Vec4};
use thiserror::Error;

/// Misuse of a [`Batcher`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    /// `begin` was called while a batch was already open.
    #[error("a batch is already active")]
    AlreadyActive,
    /// `vertex` or `end` was called without an open batch.
    #[error("no batch is active")]
    NotActive,
    /// The batcher was used after `dispose`.
    #[error("the batcher has been disposed")]
    Disposed,
}

/// How a batch's vertices are assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Primitive {
    /// Independent points.
    Points,
    /// Pairs of vertices.
    Lines,
    /// Triples of vertices.
    #[default]
    Triangles,
}

/// A single batched vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in world space.
    pub position: Vec3,
    /// RGBA color.
    pub color: Vec4,
    /// Texture coordinates.
    pub tex_coords: Vec2,
}

impl Vertex {
    /// A white vertex at `position`.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            tex_coords: Vec2::ZERO,
        }
    }

    /// Returns the vertex with `color`.
    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = color;
        self
    }

    /// Returns the vertex with texture coordinates.
    pub fn with_tex_coords(mut self, tex_coords: Vec2) -> Self {
        self.tex_coords = tex_coords;
        self
    }
}

/// One flushed batch.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// Assembly mode of the batch.
    pub primitive: Primitive,
    /// The flushed vertices.
    pub vertices: Vec<Vertex>,
}

/// Collects vertices between `begin` and `end` and flushes them as draw calls.
///
/// A batch that grows past the capacity is flushed early and continues in
/// a new draw call.
#[derive(Debug)]
pub struct Batcher {
    capacity: usize,
    primitive: Primitive,
    pending: Vec<Vertex>,
    active: bool,
    disposed: bool,
    frame_calls: Vec<DrawCall>,
    total_draw_calls: u64,
    total_vertices: u64,
}

impl Batcher {
    /// Default vertex capacity per draw call.
    pub const DEFAULT_CAPACITY: usize = 4096;

    /// Creates a batcher with [`DEFAULT_CAPACITY`](Self::DEFAULT_CAPACITY).
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a batcher flushing every `capacity` vertices (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            primitive: Primitive::default(),
            pending: Vec::with_capacity(capacity),
            active: false,
            disposed: false,
            frame_calls: Vec::new(),
            total_draw_calls: 0,
            total_vertices: 0,
        }
    }

    /// Opens a batch.
    pub fn begin(&mut self, primitive: Primitive) -> Result<(), BatchError> {
        self.ensure_alive()?;
        if self.active {
            return Err(BatchError::AlreadyActive);
        }
        self.primitive = primitive;
        self.active = true;
        Ok(())
    }

    /// Adds a vertex to the open batch.
    pub fn vertex(&mut self, vertex: Vertex) -> Result<(), BatchError> {
        self.ensure_alive()?;
        if !self.active {
            return Err(BatchError::NotActive);
        }
        if self.pending.len() == self.capacity {
            self.flush();
        }
        self.pending.push(vertex);
        Ok(())
    }

    /// Closes the open batch and flushes what it holds.
    pub fn end(&mut self) -> Result<(), BatchError> {
        self.ensure_alive()?;
        if !self.active {
            return Err(BatchError::NotActive);
        }
        self.flush();
        self.active = false;
        Ok(())
    }

    fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let vertices = std::mem::replace(&mut self.pending, Vec::with_capacity(self.capacity));
        self.total_draw_calls += 1;
        self.total_vertices += vertices.len() as u64;
        log::trace!(
            "Flushed {} vertices as {:?}.",
            vertices.len(),
            self.primitive
        );
        self.frame_calls.push(DrawCall {
            primitive: self.primitive,
            vertices,
        });
    }

    fn ensure_alive(&self) -> Result<(), BatchError> {
        if self.disposed {
            Err(BatchError::Disposed)
        } else {
            Ok(())
        }
    }

    /// Clears the per-frame draw call list. The loop calls this before rendering.
    pub fn new_frame(&mut self) {
        self.frame_calls.clear();
    }

    /// Draw calls flushed since the last [`new_frame`](Self::new_frame).
    pub fn draw_calls(&self) -> &[DrawCall] {
        &self.frame_calls
    }

    /// Draw calls flushed over the batcher's lifetime.
    pub fn total_draw_calls(&self) -> u64 {
        self.total_draw_calls
    }

    /// Vertices flushed over the batcher's lifetime.
    pub fn total_vertices(&self) -> u64 {
        self.total_vertices
    }

    /// Returns `true` between `begin` and `end`.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns `true` once disposed.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Releases the batcher. An open batch is discarded. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        if self.active {
            log::warn!(
                "Batcher disposed with an open batch; discarding {} vertices.",
                self.pending.len()
            );
        }
        self.pending = Vec::new();
        self.frame_calls = Vec::new();
        self.active = false;
        self.disposed = true;
        log::debug!(
            "Batcher disposed after {} draw calls.",
            self.total_draw_calls
        );
    }
}

impl Default for Batcher {
    fn default() -> Self {
        Self::new()
    }
}
