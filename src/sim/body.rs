//! Rigid bodies
//!
//! A body owns its polygon and an optional payload. Its position is always
//! the polygon centroid; moving a body translates the vertices.

use std::any::Any;
use std::f64::consts::TAU;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::polygon::Polygon;
use super::vector::{VEC_ZERO, Vector};
use crate::color::Color;
use crate::consts::{DEFAULT_MAX_ROTATION, DEFAULT_MAX_VELOCITY};

/// Stable handle to a body owned by a scene
///
/// Unlike body indices, ids survive sweeps; they are never reused within a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u64);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body#{}", self.0)
    }
}

/// A simulated polygon with mass and motion state
pub struct RigidBody {
    shape: Polygon,
    /// Positive, or infinite for immovable bodies
    mass: f64,
    color: Color,
    /// Net rotation applied so far (radians)
    rotation: f64,
    max_rotation: f64,
    velocity: Vector,
    /// Per-axis cap on |vx| and |vy|
    max_velocity: f64,
    angular_velocity: f64,
    /// Accumulated this tick, cleared by `integrate`
    force: Vector,
    impulse: Vector,
    removed: bool,
    /// Caller payload, dropped together with the body
    info: Option<Box<dyn Any>>,
}

impl RigidBody {
    /// Create a body with no payload
    ///
    /// Panics if `mass` is not positive (infinity is allowed).
    pub fn new(shape: Polygon, mass: f64, color: Color) -> Self {
        assert!(mass > 0.0, "body mass must be positive, got {mass}");
        Self {
            shape,
            mass,
            color,
            rotation: 0.0,
            max_rotation: DEFAULT_MAX_ROTATION,
            velocity: VEC_ZERO,
            max_velocity: DEFAULT_MAX_VELOCITY,
            angular_velocity: 0.0,
            force: VEC_ZERO,
            impulse: VEC_ZERO,
            removed: false,
            info: None,
        }
    }

    /// Create a body carrying a caller payload
    pub fn with_info<T: Any>(shape: Polygon, mass: f64, color: Color, info: T) -> Self {
        let mut body = Self::new(shape, mass, color);
        body.info = Some(Box::new(info));
        body
    }

    /// Copy of the current world-space shape
    pub fn shape(&self) -> Polygon {
        self.shape.clone()
    }

    /// Borrow the shape for read-only queries
    pub(crate) fn polygon(&self) -> &Polygon {
        &self.shape
    }

    pub fn centroid(&self) -> Vector {
        self.shape.centroid()
    }

    /// Move the body so its centroid sits at `target`
    pub fn set_centroid(&mut self, target: Vector) {
        let offset = target - self.shape.centroid();
        self.shape.translate(offset);
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// True for infinite-mass bodies, which forces and impulses never move
    #[inline]
    pub fn is_static(&self) -> bool {
        self.mass.is_infinite()
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    #[inline]
    pub fn velocity(&self) -> Vector {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vector) {
        self.velocity = velocity;
    }

    /// Cap each velocity component to `±max_velocity` on future integrations
    pub fn set_max_velocity(&mut self, max_velocity: f64) {
        self.max_velocity = max_velocity;
    }

    #[inline]
    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    pub fn set_angular_velocity(&mut self, angular_velocity: f64) {
        self.angular_velocity = angular_velocity;
    }

    #[inline]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn set_max_rotation(&mut self, max_rotation: f64) {
        self.max_rotation = max_rotation;
    }

    /// Rotate the shape about its centroid by `angle`
    ///
    /// If the net rotation would exceed `max_rotation` the shape is left alone
    /// and angular velocity is zeroed instead. Net rotation past a full turn
    /// is wrapped back by one turn.
    pub fn rotate(&mut self, angle: f64) {
        if (self.rotation + angle).abs() <= self.max_rotation {
            let pivot = self.shape.centroid();
            self.shape.rotate(angle, pivot);
            self.rotation += angle;
        } else {
            self.angular_velocity = 0.0;
        }
        if self.rotation.abs() > TAU {
            self.rotation -= TAU.copysign(self.rotation);
        }
    }

    /// Rotate to an absolute net rotation, subject to the same bound as `rotate`
    pub fn set_rotation(&mut self, rotation: f64) {
        self.rotate(rotation - self.rotation);
    }

    /// Undo the net rotation
    pub fn reset_rotation(&mut self) {
        self.rotate(-self.rotation);
    }

    /// Stretch the shape vertically about its centroid
    pub fn scale_y(&mut self, scalar: f64) {
        let pivot_y = self.shape.centroid().y;
        self.shape.scale_y(scalar, pivot_y);
    }

    #[inline]
    pub fn force(&self) -> Vector {
        self.force
    }

    pub fn add_force(&mut self, force: Vector) {
        self.force += force;
    }

    pub fn set_force(&mut self, force: Vector) {
        self.force = force;
    }

    #[inline]
    pub fn impulse(&self) -> Vector {
        self.impulse
    }

    pub fn add_impulse(&mut self, impulse: Vector) {
        self.impulse += impulse;
    }

    pub fn set_impulse(&mut self, impulse: Vector) {
        self.impulse = impulse;
    }

    fn clamp_velocity(&self, mut v: Vector) -> Vector {
        if v.x.abs() > self.max_velocity {
            v.x = self.max_velocity.copysign(v.x);
        }
        if v.y.abs() > self.max_velocity {
            v.y = self.max_velocity.copysign(v.y);
        }
        v
    }

    /// Advance the body by `dt` seconds
    ///
    /// Velocity changes by `(force * dt + impulse) / mass` and the centroid
    /// moves by the average of old and new velocity. Infinite-mass bodies
    /// ignore force and impulse but still follow a velocity set on them.
    pub fn integrate(&mut self, dt: f64) {
        let new_velocity = if self.is_static() {
            self.clamp_velocity(self.velocity)
        } else {
            let dv = (self.force * dt + self.impulse) / self.mass;
            self.clamp_velocity(self.velocity + dv)
        };

        let displacement = (self.velocity + new_velocity) * 0.5 * dt;
        if displacement != VEC_ZERO {
            self.shape.translate(displacement);
        }
        if self.angular_velocity != 0.0 {
            self.rotate(self.angular_velocity * dt);
        }

        self.velocity = new_velocity;
        self.force = VEC_ZERO;
        self.impulse = VEC_ZERO;
    }

    /// Flag the body for removal at the next sweep (idempotent)
    pub fn remove(&mut self) {
        if !self.removed {
            self.removed = true;
        }
    }

    #[inline]
    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Payload downcast to `T`, if present and of that type
    pub fn info<T: Any>(&self) -> Option<&T> {
        self.info.as_deref()?.downcast_ref()
    }

    pub fn info_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.info.as_deref_mut()?.downcast_mut()
    }
}

impl fmt::Debug for RigidBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RigidBody")
            .field("centroid", &self.centroid())
            .field("mass", &self.mass)
            .field("velocity", &self.velocity)
            .field("angular_velocity", &self.angular_velocity)
            .field("rotation", &self.rotation)
            .field("removed", &self.removed)
            .field("has_info", &self.info.is_some())
            .finish()
    }
}
