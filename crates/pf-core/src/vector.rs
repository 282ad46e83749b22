//! 2D point and vector types.
//!
//! Points are positions in the x-y plane. Vectors carry directions and
//! velocities; a velocity stores the horizontal component `u` in `x` and the
//! vertical component `w` in `y`.

use crate::numeric::{Real, finite_or_zero};

pub type Point = nalgebra::Point2<Real>;
pub type Vec2 = nalgebra::Vector2<Real>;

#[inline]
pub fn point(x: Real, y: Real) -> Point {
    Point::new(x, y)
}

#[inline]
pub fn vec2(x: Real, y: Real) -> Vec2 {
    Vec2::new(x, y)
}

/// Component-wise [`finite_or_zero`].
#[inline]
pub fn finite_or_zero_vec(v: Vec2) -> Vec2 {
    Vec2::new(finite_or_zero(v.x), finite_or_zero(v.y))
}

/// Rotate a vector by +90 degrees.
#[inline]
pub fn perp(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}
