//! 2D vector arithmetic
//!
//! `Vector` is glam's double-precision vector; add, subtract, negate, scale
//! and dot come from its operators. The helpers here cover the operations the
//! engine names explicitly.

use glam::DVec2;

/// A 2D vector in world coordinates
pub type Vector = DVec2;

/// The zero vector
pub const VEC_ZERO: Vector = DVec2::ZERO;

/// Scale a vector by a scalar
#[inline]
pub fn scale(scalar: f64, v: Vector) -> Vector {
    v * scalar
}

/// Scalar cross product: `v1.x * v2.y - v1.y * v2.x`
#[inline]
pub fn cross(v1: Vector, v2: Vector) -> f64 {
    v1.x * v2.y - v1.y * v2.x
}

/// Rotate a vector about the origin by `angle` radians (counter-clockwise)
#[inline]
pub fn rotate(v: Vector, angle: f64) -> Vector {
    let (sin, cos) = angle.sin_cos();
    Vector::new(cos * v.x - sin * v.y, sin * v.x + cos * v.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn approx_eq(a: Vector, b: Vector) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn test_arithmetic() {
        let a = Vector::new(1.0, 2.0);
        let b = Vector::new(-3.0, 5.0);
        assert_eq!(a + b, Vector::new(-2.0, 7.0));
        assert_eq!(a - b, Vector::new(4.0, -3.0));
        assert_eq!(-a, Vector::new(-1.0, -2.0));
        assert_eq!(scale(2.0, b), Vector::new(-6.0, 10.0));
        assert_eq!(a.dot(b), 7.0);
    }

    #[test]
    fn test_cross() {
        assert_eq!(cross(Vector::X, Vector::Y), 1.0);
        assert_eq!(cross(Vector::Y, Vector::X), -1.0);
        assert_eq!(cross(Vector::new(2.0, 4.0), Vector::new(1.0, 2.0)), 0.0);
    }

    #[test]
    fn test_rotate() {
        assert!(approx_eq(rotate(Vector::X, PI / 2.0), Vector::Y));
        assert!(approx_eq(rotate(Vector::new(1.0, 1.0), PI), Vector::new(-1.0, -1.0)));
        assert!(approx_eq(rotate(VEC_ZERO, 1.3), VEC_ZERO));
    }
}
