//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (bodies by insertion, creators by registration)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod forces;
pub mod list;
pub mod polygon;
pub mod scene;
pub mod tick;
pub mod vector;

pub use body::{BodyId, RigidBody};
pub use collision::{CollisionInfo, find_collision};
pub use forces::{
    angular_impulse, create_angular_collision, create_bodies_collision, create_collision,
    create_destructive_collision, create_drag, create_newtonian_gravity, create_physics_collision,
    create_spring, elastic_impulse, reduced_mass,
};
pub use list::List;
pub use polygon::Polygon;
pub use scene::{Bodies, ForceFn, Scene};
pub use tick::FixedStepper;
pub use vector::{VEC_ZERO, Vector};
