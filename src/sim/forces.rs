//! Force and collision creators
//!
//! Each `create_*` function registers a force creator on the scene that
//! depends on the bodies it touches, so it is swept together with them.

use super::body::{BodyId, RigidBody};
use super::collision::find_collision;
use super::scene::{Bodies, Scene};
use super::vector::{Vector, scale};

/// Attract `a` and `b` with Newtonian gravity of strength `g`
///
/// No force is applied while the centroids are within the scene's
/// `gravity_min_distance`, which keeps close passes from blowing up.
pub fn create_newtonian_gravity(scene: &mut Scene, g: f64, a: BodyId, b: BodyId) {
    let min_distance = scene.settings().gravity_min_distance;
    scene.add_bodies_force_creator([a, b], move |bodies| {
        let Some((body1, body2)) = bodies.pair_mut(a, b) else {
            return;
        };
        let delta = body2.centroid() - body1.centroid();
        let distance = delta.length();
        if distance <= min_distance {
            return;
        }

        let magnitude = -g * body1.mass() * body2.mass() / (distance * distance);
        let force = scale(magnitude / distance, delta);
        body2.add_force(force);
        body1.add_force(-force);
    });
}

/// Connect `a` and `b` with a zero-length spring of constant `k`
pub fn create_spring(scene: &mut Scene, k: f64, a: BodyId, b: BodyId) {
    scene.add_bodies_force_creator([a, b], move |bodies| {
        let Some((body1, body2)) = bodies.pair_mut(a, b) else {
            return;
        };
        let force = scale(k, body2.centroid() - body1.centroid());
        body1.add_force(force);
        body2.add_force(-force);
    });
}

/// Linear drag `-gamma * v` on one body
pub fn create_drag(scene: &mut Scene, gamma: f64, body: BodyId) {
    scene.add_bodies_force_creator([body], move |bodies| {
        if let Some(body) = bodies.get_mut(body) {
            let force = scale(-gamma, body.velocity());
            body.add_force(force);
        }
    });
}

/// Call `handler` each time `a` and `b` start overlapping
///
/// The handler sees the whole registry, so it can reach bodies other than the
/// colliding pair. It fires once per contact: it is re-armed only after a
/// tick in which the shapes are apart.
pub fn create_bodies_collision(
    scene: &mut Scene,
    a: BodyId,
    b: BodyId,
    mut handler: impl FnMut(&mut Bodies, BodyId, BodyId, Vector) + 'static,
) {
    let mut colliding = false;
    scene.add_bodies_force_creator([a, b], move |bodies| {
        let info = match (bodies.get(a), bodies.get(b)) {
            (Some(body1), Some(body2)) => find_collision(body1.polygon(), body2.polygon()),
            _ => return,
        };
        if info.collided && !colliding {
            log::trace!("Contact between {} and {} along {}", a, b, info.axis);
            handler(bodies, a, b, info.axis);
        }
        colliding = info.collided;
    });
}

/// Call `handler` with both bodies each time `a` and `b` start overlapping
pub fn create_collision(
    scene: &mut Scene,
    a: BodyId,
    b: BodyId,
    mut handler: impl FnMut(&mut RigidBody, &mut RigidBody, Vector) + 'static,
) {
    create_bodies_collision(scene, a, b, move |bodies, a, b, axis| {
        if let Some((body1, body2)) = bodies.pair_mut(a, b) {
            handler(body1, body2, axis);
        }
    });
}

/// Remove both bodies on any tick where they overlap
pub fn create_destructive_collision(scene: &mut Scene, a: BodyId, b: BodyId) {
    scene.add_bodies_force_creator([a, b], move |bodies| {
        let Some((body1, body2)) = bodies.pair_mut(a, b) else {
            return;
        };
        if find_collision(body1.polygon(), body2.polygon()).collided {
            body1.remove();
            body2.remove();
        }
    });
}

/// Bounce `a` and `b` off each other with coefficient of restitution `elasticity`
pub fn create_physics_collision(scene: &mut Scene, elasticity: f64, a: BodyId, b: BodyId) {
    create_collision(scene, a, b, move |body1, body2, axis| {
        let impulse = elastic_impulse(body1, body2, axis, elasticity);
        body1.add_impulse(impulse);
        body2.add_impulse(-impulse);
    });
}

/// Like `create_physics_collision`, but `b`'s spin feeds into the bounce
pub fn create_angular_collision(scene: &mut Scene, elasticity: f64, a: BodyId, b: BodyId) {
    create_collision(scene, a, b, move |body1, body2, axis| {
        let impulse = angular_impulse(body1, body2, axis, elasticity);
        body1.add_impulse(impulse);
        body2.add_impulse(-impulse);
    });
}

/// Reduced mass of a colliding pair
///
/// An infinite mass on one side leaves the finite one. Two infinite masses
/// give zero, so neither body receives an impulse.
pub fn reduced_mass(m1: f64, m2: f64) -> f64 {
    match (m1.is_infinite(), m2.is_infinite()) {
        (true, true) => 0.0,
        (true, false) => m2,
        (false, true) => m1,
        (false, false) => m1 * m2 / (m1 + m2),
    }
}

/// Impulse on `body1` for an elastic bounce along `axis`; `body2` gets the negation
pub fn elastic_impulse(body1: &RigidBody, body2: &RigidBody, axis: Vector, elasticity: f64) -> Vector {
    let u1 = body1.velocity().dot(axis);
    let u2 = body2.velocity().dot(axis);
    bounce(body1, body2, axis, elasticity, u1, u2)
}

/// Impulse on `body1` when `body2`'s angular velocity stands in for its speed
///
/// The centroid offset is sign-folded before use: x is forced non-positive,
/// then flipped again when the y offset is positive.
pub fn angular_impulse(body1: &RigidBody, body2: &RigidBody, axis: Vector, elasticity: f64) -> Vector {
    let offset = body2.centroid() - body1.centroid();
    let mut dx = offset.x;
    if dx > 0.0 {
        dx = -dx;
    }
    if offset.y > 0.0 {
        dx = -dx;
    }

    let omega = body2.angular_velocity();
    let u1 = body1.velocity().dot(axis);
    let u2 = dx * omega * axis.x + offset.y * omega * axis.y;
    bounce(body1, body2, axis, elasticity, u1, u2)
}

fn bounce(body1: &RigidBody, body2: &RigidBody, axis: Vector, elasticity: f64, u1: f64, u2: f64) -> Vector {
    let mu = reduced_mass(body1.mass(), body2.mass());
    scale(mu * (1.0 + elasticity) * (u2 - u1), axis)
}
