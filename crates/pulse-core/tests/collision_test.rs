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

use pulse_core::collision::{
    self, Circle, Contact, NarrowPhase, Polygon, Polyhedron, SeparatingAxis, Sphere,
};
use pulse_core::math::{Aabb, Rect, Vec2, Vec3};

/// Pairs of boxes as `(x, y, w, h)` with the expected overlap.
const BOX_CASES: &[((f32, f32, f32, f32), (f32, f32, f32, f32), bool)] = &[
    ((0.0, 0.0, 10.0, 10.0), (5.0, 5.0, 10.0, 10.0), true),
    ((0.0, 0.0, 10.0, 10.0), (10.0, 0.0, 10.0, 10.0), true),
    ((0.0, 0.0, 10.0, 10.0), (10.0, 10.0, 5.0, 5.0), true),
    ((0.0, 0.0, 10.0, 10.0), (10.5, 0.0, 10.0, 10.0), false),
    ((0.0, 0.0, 10.0, 10.0), (2.0, 2.0, 1.0, 1.0), true),
    ((0.0, 0.0, 10.0, 10.0), (0.0, -20.0, 10.0, 5.0), false),
];

#[test]
fn test_box_predicates_are_symmetric_and_agree() {
    for &((x1, y1, w1, h1), (x2, y2, w2, h2), expected) in BOX_CASES {
        // ARRANGE
        let a = Rect::new(x1, y1, w1, h1);
        let b = Rect::new(x2, y2, w2, h2);

        // ACT
        let forward = collision::test_rect_rect(&a, &b);
        let backward = collision::test_rect_rect(&b, &a);
        let by_corners = collision::test_aabb_aabb_2d_min_max(a.min(), a.max(), b.min(), b.max());

        // ASSERT
        assert_eq!(forward, expected, "{a:?} vs {b:?}");
        assert_eq!(backward, expected, "{b:?} vs {a:?}");
        assert_eq!(by_corners, expected, "corners of {a:?} vs {b:?}");
    }
}

#[test]
fn test_3d_boxes_sharing_a_face_overlap() {
    // ARRANGE
    let a = Aabb::from_min_max(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0));
    let touching = Aabb::from_min_max(Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 1.0, 2.0));
    let apart = Aabb::from_min_max(Vec3::new(0.0, 0.0, 1.1), Vec3::new(1.0, 1.0, 2.0));

    // ACT / ASSERT
    assert!(collision::test_aabb_aabb(&a, &touching));
    assert!(collision::test_aabb_aabb(&touching, &a));
    assert!(!collision::test_aabb_aabb(&a, &apart));
    assert!(!collision::test_aabb_aabb(&apart, &a));
}

#[test]
fn test_round_shapes_touching_counts_as_overlap() {
    // ARRANGE
    let a = Circle::new(Vec2::ZERO, 1.0);
    let tangent = Circle::new(Vec2::new(3.0, 0.0), 2.0);
    let apart = Circle::new(Vec2::new(3.01, 0.0), 2.0);
    let s = Sphere::new(Vec3::ZERO, 1.0);
    let tangent_sphere = Sphere::new(Vec3::new(0.0, 0.0, 2.0), 1.0);

    // ACT / ASSERT
    assert!(collision::test_circles(&a, &tangent));
    assert!(collision::test_circles(&tangent, &a));
    assert!(!collision::test_circles(&a, &apart));
    assert!(collision::test_spheres(&s, &tangent_sphere));
    let diagonal = Vec3::new(2.0, 2.0, 2.0);
    assert!(!collision::test_sphere_sphere_at(Vec3::ZERO, 1.0, diagonal, 1.0));
}

#[test]
fn test_polygon_contact_points_from_first_to_second() {
    // ARRANGE
    let sat = SeparatingAxis::new();
    let floor = Polygon::rectangle(100.0, 10.0).with_position(Vec2::new(0.0, 50.0));
    let crate_box = Polygon::rectangle(10.0, 10.0).with_position(Vec2::new(20.0, 42.0));
    let mut down = Contact::default();
    let mut up = Contact::default();

    // ACT
    let hit_down = sat.test_polygons(&crate_box, &floor, Some(&mut down));
    let hit_up = sat.test_polygons(&floor, &crate_box, Some(&mut up));

    // ASSERT
    assert!(hit_down && hit_up);
    assert!((down.depth - 2.0).abs() < 1e-5);
    assert!((down.normal.y - 1.0).abs() < 1e-5);
    assert!((up.normal.y + 1.0).abs() < 1e-5);
    assert!((up.depth - down.depth).abs() < 1e-5);
}

#[test]
fn test_triangle_against_square() {
    // ARRANGE
    let sat = SeparatingAxis::new();
    let square = Polygon::rectangle(2.0, 2.0);
    let near = Polygon::new(vec![
        Vec2::new(1.5, 1.5),
        Vec2::new(4.0, 1.5),
        Vec2::new(1.5, 4.0),
    ]);
    let beyond_diagonal = Polygon::new(vec![
        Vec2::new(3.5, 1.0),
        Vec2::new(4.0, 4.0),
        Vec2::new(1.0, 3.5),
    ]);

    // ACT / ASSERT
    assert!(sat.test_polygons(&square, &near, None));
    assert!(sat.test_polygons(&near, &square, None));
    assert!(!sat.test_polygons(&square, &beyond_diagonal, None));
    assert!(!sat.test_polygons(&beyond_diagonal, &square, None));
}

#[test]
fn test_polyhedra_are_symmetric() {
    // ARRANGE
    let sat = SeparatingAxis::new();
    let a = Polyhedron::cuboid(2.0, 2.0, 2.0);
    let overlapping = Polyhedron::cuboid(2.0, 2.0, 2.0).with_position(Vec3::new(1.5, 1.0, 0.5));
    let far = Polyhedron::cuboid(2.0, 2.0, 2.0).with_position(Vec3::new(0.0, 0.0, 5.0));

    // ACT / ASSERT
    assert!(sat.test_polyhedra(&a, &overlapping));
    assert!(sat.test_polyhedra(&overlapping, &a));
    assert!(!sat.test_polyhedra(&a, &far));
    assert!(!sat.test_polyhedra(&far, &a));
}
