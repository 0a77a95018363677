//! Collision detection between convex polygons
//!
//! Separating Axis Theorem: the candidate axes are the unit edge normals of
//! both shapes. One axis with disjoint projections proves separation; when
//! every axis overlaps, the axis with the smallest overlap is reported.

use super::polygon::Polygon;
use super::vector::{VEC_ZERO, Vector};

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionInfo {
    /// Whether the shapes overlap
    pub collided: bool,
    /// Unit axis of least overlap (unsigned; zero on a miss)
    pub axis: Vector,
    /// Overlap distance along `axis`
    pub overlap: f64,
}

impl CollisionInfo {
    pub fn miss() -> Self {
        Self {
            collided: false,
            axis: VEC_ZERO,
            overlap: 0.0,
        }
    }
}

/// Projection interval of a shape on an axis
#[derive(Debug, Clone, Copy)]
struct Projection {
    min: f64,
    max: f64,
}

fn project(shape: &Polygon, axis: Vector) -> Projection {
    shape.vertices().iter().fold(
        Projection {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        },
        |p, v| {
            let d = axis.dot(*v);
            Projection {
                min: p.min.min(d),
                max: p.max.max(d),
            }
        },
    )
}

/// Overlap distance of two intervals, `None` when they are disjoint
///
/// Touching intervals overlap with distance zero.
fn overlap(p1: Projection, p2: Projection) -> Option<f64> {
    if p1.max < p2.min || p2.max < p1.min {
        return None;
    }
    if p2.min > p1.min {
        Some((p1.max - p2.min).abs())
    } else {
        Some((p2.max - p1.min).abs())
    }
}

/// Unit normals of every non-degenerate edge
fn axes(shape: &Polygon) -> impl Iterator<Item = Vector> + '_ {
    shape.edges().filter_map(|(a, b)| {
        let edge = (a - b).try_normalize()?;
        Some(Vector::new(-edge.y, edge.x))
    })
}

/// Check two convex polygons for overlap
pub fn find_collision(shape1: &Polygon, shape2: &Polygon) -> CollisionInfo {
    if shape1.is_empty() || shape2.is_empty() {
        return CollisionInfo::miss();
    }

    let mut best = CollisionInfo {
        collided: true,
        axis: VEC_ZERO,
        overlap: f64::INFINITY,
    };

    for axis in axes(shape1).chain(axes(shape2)) {
        let Some(distance) = overlap(project(shape1, axis), project(shape2, axis)) else {
            return CollisionInfo::miss();
        };
        if distance < best.overlap {
            best.overlap = distance;
            best.axis = axis;
        }
    }

    if best.axis == VEC_ZERO {
        // Every edge was degenerate; there is no axis to report along
        return CollisionInfo::miss();
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn square(cx: f64, cy: f64) -> Polygon {
        Polygon::rectangle(Vector::new(cx, cy), 2.0, 2.0)
    }

    #[test]
    fn test_separated_squares_miss() {
        let result = find_collision(&square(0.0, 0.0), &square(3.0, 0.0));
        assert!(!result.collided);
        assert_eq!(result.axis, VEC_ZERO);
    }

    #[test]
    fn test_overlapping_squares_hit() {
        let result = find_collision(&square(0.0, 0.0), &square(1.0, 0.0));
        assert!(result.collided);
        // Least overlap is along x
        assert!((result.axis.x.abs() - 1.0).abs() < 1e-12);
        assert!(result.axis.y.abs() < 1e-12);
        assert!((result.overlap - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_diagonal_gap_is_found_on_second_shape_axes() {
        // A diamond off the square's corner: both x and y ranges overlap, only
        // the diamond's diagonal edge normals separate them
        let diamond = Polygon::new([
            Vector::new(3.3, 2.1),
            Vector::new(2.1, 3.3),
            Vector::new(0.9, 2.1),
            Vector::new(2.1, 0.9),
        ]);
        let result = find_collision(&square(0.0, 0.0), &diamond);
        assert!(!result.collided);
    }

    #[test]
    fn test_ball_resting_on_paddle() {
        let paddle = Polygon::rectangle(Vector::new(500.0, 28.25), 120.0, 40.0);
        let ball = Polygon::regular(Vector::new(500.0, 60.0), 15.0, 20);
        let result = find_collision(&paddle, &ball);
        assert!(result.collided);
        assert!(result.axis.y.abs() > 0.95);
    }

    #[test]
    fn test_empty_shape_misses() {
        let empty = Polygon::new(Vec::<Vector>::new());
        assert!(!find_collision(&empty, &square(0.0, 0.0)).collided);
    }

    proptest! {
        #[test]
        fn prop_collision_is_symmetric(
            x1 in -10.0..10.0f64, y1 in -10.0..10.0f64,
            x2 in -10.0..10.0f64, y2 in -10.0..10.0f64,
            w1 in 0.5..8.0f64, h1 in 0.5..8.0f64,
            w2 in 0.5..8.0f64, h2 in 0.5..8.0f64,
        ) {
            let a = Polygon::rectangle(Vector::new(x1, y1), w1, h1);
            let b = Polygon::rectangle(Vector::new(x2, y2), w2, h2);
            let ab = find_collision(&a, &b);
            let ba = find_collision(&b, &a);
            prop_assert_eq!(ab.collided, ba.collided);
            if ab.collided {
                prop_assert!((ab.overlap - ba.overlap).abs() < 1e-9);
                prop_assert!((ab.axis.length() - 1.0).abs() < 1e-9);
            }
        }

        #[test]
        fn prop_gap_means_no_collision(
            x in -100.0..100.0f64, y in -100.0..100.0f64,
            w in 0.5..20.0f64, h in 0.5..20.0f64, gap in 0.01..50.0f64,
        ) {
            let a = Polygon::rectangle(Vector::new(x, y), w, h);
            let b = Polygon::rectangle(Vector::new(x + w + gap, y), w, h);
            prop_assert!(!find_collision(&a, &b).collided);
        }
    }
}
