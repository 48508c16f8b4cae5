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

//! The collision subsystem: the predicates plus the narrow-phase routine
//! they delegate to, with per-frame test counts.

use pulse_core::collision::{
    self, Circle, Contact, NarrowPhase, Polygon, Polyhedron, SeparatingAxis, Sphere,
};
use pulse_core::math::{Aabb, Rect};
use pulse_core::Subsystem;
use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};

/// Runs collision tests on behalf of game code.
pub struct CollisionSubsystem {
    narrow: Box<dyn NarrowPhase>,
    tests_this_frame: AtomicU64,
    tests_last_frame: u64,
}

impl CollisionSubsystem {
    /// Creates the subsystem with the [`SeparatingAxis`] narrow phase.
    pub fn new() -> Self {
        Self::with_narrow_phase(Box::new(SeparatingAxis::new()))
    }

    /// Creates the subsystem with a custom narrow-phase routine.
    pub fn with_narrow_phase(narrow: Box<dyn NarrowPhase>) -> Self {
        Self {
            narrow,
            tests_this_frame: AtomicU64::new(0),
            tests_last_frame: 0,
        }
    }

    /// The narrow-phase routine polygon tests delegate to.
    pub fn narrow_phase(&self) -> &dyn NarrowPhase {
        self.narrow.as_ref()
    }

    fn count(&self) {
        self.tests_this_frame.fetch_add(1, Ordering::Relaxed);
    }

    /// Tests two 2D boxes.
    pub fn test_rects(&self, a: &Rect, b: &Rect) -> bool {
        self.count();
        collision::test_rect_rect(a, b)
    }

    /// Tests two 3D boxes.
    pub fn test_aabbs(&self, a: &Aabb, b: &Aabb) -> bool {
        self.count();
        collision::test_aabb_aabb(a, b)
    }

    /// Tests two circles.
    pub fn test_circles(&self, a: &Circle, b: &Circle) -> bool {
        self.count();
        collision::test_circles(a, b)
    }

    /// Tests two spheres.
    pub fn test_spheres(&self, a: &Sphere, b: &Sphere) -> bool {
        self.count();
        collision::test_spheres(a, b)
    }

    /// Tests two convex polygons.
    pub fn test_polygons(&self, a: &Polygon, b: &Polygon) -> bool {
        self.count();
        collision::test_polygon_polygon(self.narrow.as_ref(), a, b)
    }

    /// Tests two convex polygons and reports the separating translation.
    pub fn test_polygons_contact(&self, a: &Polygon, b: &Polygon) -> Option<Contact> {
        self.count();
        let mut contact = Contact::default();
        collision::test_polygon_polygon_contact(self.narrow.as_ref(), a, b, &mut contact)
            .then_some(contact)
    }

    /// Tests two convex polyhedra.
    pub fn test_polyhedra(&self, a: &Polyhedron, b: &Polyhedron) -> bool {
        self.count();
        collision::test_polyhedron_polyhedron(self.narrow.as_ref(), a, b)
    }

    /// Tests run during the last completed frame.
    pub fn tests_last_frame(&self) -> u64 {
        self.tests_last_frame
    }

    /// Tests run so far in the current frame.
    pub fn tests_this_frame(&self) -> u64 {
        self.tests_this_frame.load(Ordering::Relaxed)
    }
}

impl Default for CollisionSubsystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Subsystem for CollisionSubsystem {
    fn name(&self) -> &str {
        "collision"
    }

    fn init(&mut self) -> anyhow::Result<()> {
        log::info!("Collision ready.");
        Ok(())
    }

    fn begin_frame(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    fn end_frame(&mut self) -> anyhow::Result<()> {
        self.tests_last_frame = self.tests_this_frame.swap(0, Ordering::Relaxed);
        log::trace!("{} collision tests this frame.", self.tests_last_frame);
        Ok(())
    }

    fn dispose(&mut self) -> anyhow::Result<()> {
        log::info!("Collision disposed.");
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::math::{Vec2, Vec3};

    struct AlwaysHit;

    impl NarrowPhase for AlwaysHit {
        fn test_polygons(&self, _: &Polygon, _: &Polygon, contact: Option<&mut Contact>) -> bool {
            if let Some(contact) = contact {
                contact.depth = 42.0;
            }
            true
        }
        fn test_polyhedra(&self, _: &Polyhedron, _: &Polyhedron) -> bool {
            true
        }
    }

    #[test]
    fn test_predicates_match_core_functions() {
        let collision = CollisionSubsystem::new();
        let a = Rect::new(0.0, 0.0, 1.0, 1.0);
        let b = Rect::new(1.0, 0.0, 1.0, 1.0);
        assert!(collision.test_rects(&a, &b));
        assert!(collision.test_circles(
            &Circle::new(Vec2::ZERO, 1.0),
            &Circle::new(Vec2::new(2.0, 0.0), 1.0)
        ));
        assert!(!collision.test_spheres(
            &Sphere::new(Vec3::ZERO, 1.0),
            &Sphere::new(Vec3::new(3.0, 0.0, 0.0), 1.0)
        ));
        assert!(collision.test_aabbs(
            &Aabb::new(Vec3::ZERO, Vec3::ONE),
            &Aabb::new(Vec3::ONE, Vec3::ONE)
        ));
    }

    #[test]
    fn test_polygon_tests_use_the_owned_narrow_phase() {
        let collision = CollisionSubsystem::with_narrow_phase(Box::new(AlwaysHit));
        let far = Polygon::rectangle(1.0, 1.0).with_position(Vec2::new(100.0, 0.0));
        let contact = collision.test_polygons_contact(&Polygon::rectangle(1.0, 1.0), &far);
        assert_eq!(contact.map(|c| c.depth), Some(42.0));
        assert!(collision.test_polyhedra(
            &Polyhedron::cuboid(1.0, 1.0, 1.0),
            &Polyhedron::cuboid(1.0, 1.0, 1.0).with_position(Vec3::new(9.0, 9.0, 9.0))
        ));
    }

    #[test]
    fn test_counts_roll_over_at_end_frame() {
        let mut collision = CollisionSubsystem::new();
        let square = Polygon::rectangle(1.0, 1.0);
        collision.begin_frame().unwrap();
        collision.test_polygons(&square, &square);
        collision.test_polygons(&square, &square);
        assert_eq!(collision.tests_this_frame(), 2);
        collision.end_frame().unwrap();

        assert_eq!(collision.tests_last_frame(), 2);
        assert_eq!(collision.tests_this_frame(), 0);
    }
}
