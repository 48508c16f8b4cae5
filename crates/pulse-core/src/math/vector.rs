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

//! 2D, 3D and 4D `f32` vectors.

use super::EPSILON;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Component-wise arithmetic shared by every vector type.
macro_rules! impl_vector_ops {
    ($ty:ident { $($field:ident),+ }) => {
        impl $ty {
            /// The dot product.
            #[inline]
            pub fn dot(&self, rhs: Self) -> f32 {
                0.0 $(+ self.$field * rhs.$field)+
            }

            /// The squared length.
            #[inline]
            pub fn length_squared(&self) -> f32 {
                self.dot(*self)
            }

            /// The length.
            #[inline]
            pub fn length(&self) -> f32 {
                self.length_squared().sqrt()
            }

            /// The unit vector in the same direction, or zero for a
            /// near-zero vector.
            #[inline]
            pub fn normalize(&self) -> Self {
                let len = self.length();
                if len > EPSILON {
                    *self / len
                } else {
                    Self::ZERO
                }
            }
        }

        impl Add for $ty {
            type Output = Self;
            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self { $($field: self.$field + rhs.$field),+ }
            }
        }

        impl Sub for $ty {
            type Output = Self;
            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self { $($field: self.$field - rhs.$field),+ }
            }
        }

        impl Mul<f32> for $ty {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: f32) -> Self {
                Self { $($field: self.$field * rhs),+ }
            }
        }

        impl Div<f32> for $ty {
            type Output = Self;
            #[inline]
            fn div(self, rhs: f32) -> Self {
                self * rhs.recip()
            }
        }

        impl Neg for $ty {
            type Output = Self;
            #[inline]
            fn neg(self) -> Self {
                Self { $($field: -self.$field),+ }
            }
        }
    };
}

/// A 2D vector.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[repr(C)]
pub struct Vec2 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
}

impl Vec2 {
    /// All zeros.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a vector.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The vector rotated a quarter turn counter-clockwise. Polygon edge
    /// normals are built from it.
    #[inline]
    pub fn perp(&self) -> Self {
        Self::new(-self.y, self.x)
    }
}

impl_vector_ops!(Vec2 { x, y });

/// A 3D vector.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[repr(C)]
pub struct Vec3 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
}

impl Vec3 {
    /// All zeros.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// All ones.
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    /// Up.
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    /// Towards the viewer in a right-handed frame.
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates a vector.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// The cross product.
    #[inline]
    pub fn cross(&self, rhs: Self) -> Self {
        Self::new(
            self.y * rhs.z - self.z * rhs.y,
            self.z * rhs.x - self.x * rhs.z,
            self.x * rhs.y - self.y * rhs.x,
        )
    }
}

impl_vector_ops!(Vec3 { x, y, z });

/// A 4D vector: a homogeneous point, an RGBA color or a matrix column.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[repr(C)]
pub struct Vec4 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
    /// W component.
    pub w: f32,
}

impl Vec4 {
    /// All zeros.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a vector.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Extends a 3D point with `w = 1`.
    #[inline]
    pub const fn point(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z, 1.0)
    }
}

impl_vector_ops!(Vec4 { x, y, z, w });

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;

    #[test]
    fn test_perp_is_orthogonal() {
        let v = Vec2::new(3.0, 4.0);
        assert_eq!(v.perp(), Vec2::new(-4.0, 3.0));
        assert!(approx_eq(v.dot(v.perp()), 0.0));
    }

    #[test]
    fn test_normalize_handles_zero() {
        assert_eq!(Vec2::ZERO.normalize(), Vec2::ZERO);
        assert!(approx_eq(Vec3::new(0.0, 3.0, 4.0).normalize().length(), 1.0));
    }

    #[test]
    fn test_cross_follows_right_hand_rule() {
        assert_eq!(Vec3::new(1.0, 0.0, 0.0).cross(Vec3::Y), Vec3::Z);
    }

    #[test]
    fn test_operators_are_component_wise() {
        let a = Vec4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(a + a, a * 2.0);
        assert_eq!(a - a, Vec4::ZERO);
        assert_eq!(-a / 2.0, Vec4::new(-0.5, -1.0, -1.5, -2.0));
    }
}
