//! Polygon geometry
//!
//! A polygon is an ordered, implicitly closed vertex sequence in world space.
//! Bodies own one and move it by mutating the vertices in place.

use std::f64::consts::{FRAC_PI_2, TAU};

use super::list::List;
use super::vector::{self, Vector, cross};

/// An ordered, closed sequence of world-space vertices
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: List<Vector>,
}

impl Polygon {
    pub fn new(vertices: impl IntoIterator<Item = Vector>) -> Self {
        Self {
            vertices: vertices.into_iter().collect(),
        }
    }

    /// Axis-aligned rectangle centered on `center`, counter-clockwise
    pub fn rectangle(center: Vector, width: f64, height: f64) -> Self {
        let hw = width / 2.0;
        let hh = height / 2.0;
        Self::new([
            center + Vector::new(hw, hh),
            center + Vector::new(-hw, hh),
            center + Vector::new(-hw, -hh),
            center + Vector::new(hw, -hh),
        ])
    }

    /// Regular polygon with `sides` vertices on a circle (used as a ball shape)
    pub fn regular(center: Vector, radius: f64, sides: usize) -> Self {
        let step = TAU / sides as f64;
        Self::new((0..sides).map(|i| {
            let theta = i as f64 * step;
            center + Vector::new(theta.cos(), theta.sin()) * radius
        }))
    }

    /// Star with `points` tips, alternating inner and outer radius
    ///
    /// The first tip points straight up. Stars are concave, so they are for
    /// display; SAT only answers correctly for convex shapes.
    pub fn star(center: Vector, inner_radius: f64, outer_radius: f64, points: usize) -> Self {
        let step = TAU / points as f64;
        let mut vertices = List::with_capacity(points * 2);
        for i in 0..points {
            let outer_theta = FRAC_PI_2 + i as f64 * step;
            let inner_theta = outer_theta - 0.5 * step;
            vertices.push(center + Vector::new(inner_theta.cos(), inner_theta.sin()) * inner_radius);
            vertices.push(center + Vector::new(outer_theta.cos(), outer_theta.sin()) * outer_radius);
        }
        Self { vertices }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertices in order
    #[inline]
    pub fn vertices(&self) -> &[Vector] {
        self.vertices.as_slice()
    }

    /// Consecutive vertex pairs, including the closing edge
    pub fn edges(&self) -> impl Iterator<Item = (Vector, Vector)> + '_ {
        let verts = self.vertices();
        let n = verts.len();
        (0..n).map(move |i| (verts[i], verts[(i + 1) % n]))
    }

    /// Unsigned area via the shoelace formula
    pub fn area(&self) -> f64 {
        if self.len() < 2 {
            return 0.0;
        }
        let double_area: f64 = self.edges().map(|(a, b)| cross(a, b)).sum();
        double_area.abs() / 2.0
    }

    /// Area-weighted centroid
    ///
    /// Normalizes by the unsigned area, so the result is exact for
    /// counter-clockwise winding. Zero-area shapes fall back to the vertex mean.
    pub fn centroid(&self) -> Vector {
        let area = self.area();
        if area == 0.0 {
            if self.is_empty() {
                return vector::VEC_ZERO;
            }
            let sum: Vector = self.vertices().iter().copied().sum();
            return sum / self.len() as f64;
        }

        let moment: Vector = self.edges().map(|(a, b)| (a + b) * cross(a, b)).sum();
        moment / (6.0 * area)
    }

    /// Shift every vertex by `offset`
    pub fn translate(&mut self, offset: Vector) {
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    /// Rotate every vertex by `angle` radians about `pivot`
    pub fn rotate(&mut self, angle: f64, pivot: Vector) {
        for v in &mut self.vertices {
            *v = vector::rotate(*v - pivot, angle) + pivot;
        }
    }

    /// Scale vertex heights about `pivot_y`, leaving x untouched
    pub fn scale_y(&mut self, scalar: f64, pivot_y: f64) {
        for v in &mut self.vertices {
            v.y = scalar * (v.y - pivot_y) + pivot_y;
        }
    }
}

impl From<Vec<Vector>> for Polygon {
    fn from(vertices: Vec<Vector>) -> Self {
        Self {
            vertices: vertices.into(),
        }
    }
}
