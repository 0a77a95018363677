//! Scene registries
//!
//! The scene owns every body and every force creator. Bodies are addressed
//! by stable `BodyId`s; positional indices are a per-tick view only, because
//! the sweep compacts the registry.

use super::body::{BodyId, RigidBody};
use super::list::List;
use super::polygon::Polygon;
use crate::color::Color;
use crate::settings::Settings;

struct BodySlot {
    id: BodyId,
    body: RigidBody,
}

/// The body registry, in insertion order
///
/// Force creators receive this during the apply phase so they can look up
/// their dependency bodies.
pub struct Bodies {
    slots: List<BodySlot>,
    next_id: u64,
}

impl Bodies {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: List::with_capacity(capacity),
            next_id: 1,
        }
    }

    fn insert(&mut self, body: RigidBody) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.slots.push(BodySlot { id, body });
        id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Current position of `id` in insertion order
    pub fn index_of(&self, id: BodyId) -> Option<usize> {
        self.slots.iter().position(|slot| slot.id == id)
    }

    pub fn get(&self, id: BodyId) -> Option<&RigidBody> {
        self.slots.iter().find(|slot| slot.id == id).map(|slot| &slot.body)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut RigidBody> {
        self.slots
            .iter_mut()
            .find(|slot| slot.id == id)
            .map(|slot| &mut slot.body)
    }

    /// Mutable access to two distinct bodies at once
    ///
    /// Returns `None` if either id is unknown or both ids are the same body.
    pub fn pair_mut(&mut self, a: BodyId, b: BodyId) -> Option<(&mut RigidBody, &mut RigidBody)> {
        let ia = self.index_of(a)?;
        let ib = self.index_of(b)?;
        if ia == ib {
            return None;
        }

        let slots = self.slots.as_mut_slice();
        if ia < ib {
            let (lo, hi) = slots.split_at_mut(ib);
            Some((&mut lo[ia].body, &mut hi[0].body))
        } else {
            let (lo, hi) = slots.split_at_mut(ia);
            Some((&mut hi[0].body, &mut lo[ib].body))
        }
    }

    /// Bodies with their ids, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &RigidBody)> {
        self.slots.iter().map(|slot| (slot.id, &slot.body))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BodyId, &mut RigidBody)> {
        self.slots.iter_mut().map(|slot| (slot.id, &mut slot.body))
    }

    /// Drop every body flagged removed, keeping the rest in order
    pub(crate) fn sweep(&mut self) -> usize {
        let before = self.slots.len();
        self.slots.retain(|slot| {
            if slot.body.is_removed() {
                log::debug!("Sweeping {}", slot.id);
                false
            } else {
                true
            }
        });
        before - self.slots.len()
    }
}

/// Per-tick force callback; captured state is dropped with the creator
pub type ForceFn = Box<dyn FnMut(&mut Bodies)>;

/// A registered force callback and the bodies it depends on
pub(crate) struct ForceCreator {
    pub(crate) apply: ForceFn,
    pub(crate) dependencies: List<BodyId>,
}

impl ForceCreator {
    /// True if any dependency is flagged removed or already gone
    pub(crate) fn is_orphaned(&self, bodies: &Bodies) -> bool {
        self.dependencies
            .iter()
            .any(|id| bodies.get(*id).is_none_or(RigidBody::is_removed))
    }
}

/// All simulated state: bodies, force creators and the tick counter
pub struct Scene {
    pub(crate) bodies: Bodies,
    pub(crate) creators: List<ForceCreator>,
    settings: Settings,
    /// Ticks run so far
    pub(crate) time_ticks: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene with default settings
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        log::info!(
            "Scene created (body capacity {}, creator capacity {})",
            settings.initial_body_capacity,
            settings.initial_creator_capacity
        );
        Self {
            bodies: Bodies::with_capacity(settings.initial_body_capacity),
            creators: List::with_capacity(settings.initial_creator_capacity),
            settings,
            time_ticks: 0,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Build a body carrying this scene's default rotation and velocity limits
    pub fn make_body(&self, shape: Polygon, mass: f64, color: Color) -> RigidBody {
        let mut body = RigidBody::new(shape, mass, color);
        body.set_max_rotation(self.settings.default_max_rotation);
        body.set_max_velocity(self.settings.default_max_velocity);
        body
    }

    /// Take ownership of a body, returning its stable id
    pub fn add_body(&mut self, body: RigidBody) -> BodyId {
        let id = self.bodies.insert(body);
        log::debug!("Added {} (index {})", id, self.bodies.len() - 1);
        id
    }

    #[inline]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Body at `index`; indices shift after every sweep
    #[track_caller]
    pub fn body(&self, index: usize) -> &RigidBody {
        &self.bodies.slots.get(index).body
    }

    #[track_caller]
    pub fn body_mut(&mut self, index: usize) -> &mut RigidBody {
        &mut self.bodies.slots.get_mut(index).body
    }

    /// Stable id of the body at `index`
    #[track_caller]
    pub fn body_id(&self, index: usize) -> BodyId {
        self.bodies.slots.get(index).id
    }

    pub fn body_by_id(&self, id: BodyId) -> Option<&RigidBody> {
        self.bodies.get(id)
    }

    pub fn body_by_id_mut(&mut self, id: BodyId) -> Option<&mut RigidBody> {
        self.bodies.get_mut(id)
    }

    pub fn index_of(&self, id: BodyId) -> Option<usize> {
        self.bodies.index_of(id)
    }

    pub fn bodies(&self) -> &Bodies {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut Bodies {
        &mut self.bodies
    }

    /// Flag the body at `index` for removal at the next sweep
    #[track_caller]
    pub fn remove_body(&mut self, index: usize) {
        self.body_mut(index).remove();
    }

    /// Register a force creator with no dependencies; it is never swept
    pub fn add_force_creator(&mut self, apply: impl FnMut(&mut Bodies) + 'static) {
        self.add_bodies_force_creator(std::iter::empty(), apply);
    }

    /// Register a force creator that is swept once any of `dependencies` is removed
    pub fn add_bodies_force_creator(
        &mut self,
        dependencies: impl IntoIterator<Item = BodyId>,
        apply: impl FnMut(&mut Bodies) + 'static,
    ) {
        let dependencies: List<BodyId> = dependencies.into_iter().collect();
        log::debug!(
            "Added force creator #{} depending on {:?}",
            self.creators.len(),
            dependencies.as_slice()
        );
        self.creators.push(ForceCreator {
            apply: Box::new(apply),
            dependencies,
        });
    }

    #[inline]
    pub fn force_creator_count(&self) -> usize {
        self.creators.len()
    }

    /// Ticks run since the scene was created
    #[inline]
    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }
}
