//! Fixed timestep simulation tick
//!
//! One `Scene::tick` runs three phases in order:
//! 1. Apply: every force creator, in registration order
//! 2. Integrate: every body, in insertion order
//! 3. Sweep: drop creators with a removed dependency, then removed bodies
//!
//! Removal flags set during a tick only take effect in that tick's sweep.

use super::scene::Scene;
use crate::consts::MAX_FRAME_DT;
use crate::settings::Settings;

impl Scene {
    /// Advance the scene by `dt` seconds
    pub fn tick(&mut self, dt: f64) {
        self.apply_forces();
        self.integrate(dt);
        self.sweep();
        self.time_ticks += 1;
    }

    fn apply_forces(&mut self) {
        for creator in self.creators.iter_mut() {
            (creator.apply)(&mut self.bodies);
        }
    }

    fn integrate(&mut self, dt: f64) {
        for (_, body) in self.bodies.iter_mut() {
            body.integrate(dt);
        }
    }

    fn sweep(&mut self) {
        let bodies = &self.bodies;
        let creators_before = self.creators.len();
        self.creators.retain(|creator| !creator.is_orphaned(bodies));
        let creators_swept = creators_before - self.creators.len();

        let bodies_swept = self.bodies.sweep();

        if creators_swept > 0 || bodies_swept > 0 {
            log::debug!(
                "Tick {}: swept {} bodies and {} force creators ({} bodies remain)",
                self.time_ticks,
                bodies_swept,
                creators_swept,
                self.bodies.len()
            );
        }
        log::trace!(
            "Tick {}: {} bodies, {} force creators",
            self.time_ticks,
            self.bodies.len(),
            self.creators.len()
        );
    }
}

/// Accumulator that turns variable frame times into fixed scene ticks
#[derive(Debug, Clone)]
pub struct FixedStepper {
    dt: f64,
    max_substeps: u32,
    accumulator: f64,
}

impl FixedStepper {
    pub fn new(dt: f64, max_substeps: u32) -> Self {
        assert!(dt > 0.0, "fixed timestep must be positive, got {dt}");
        Self {
            dt,
            max_substeps,
            accumulator: 0.0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.sim_dt, settings.max_substeps)
    }

    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Run as many fixed ticks as `frame_dt` covers, returning how many ran
    ///
    /// Frame times are clamped to `MAX_FRAME_DT`; non-finite ones are ignored.
    /// Time left over after the substep cap is dropped.
    pub fn advance(&mut self, scene: &mut Scene, frame_dt: f64) -> u32 {
        if !frame_dt.is_finite() {
            log::warn!("Ignoring non-finite frame time {}", frame_dt);
            return 0;
        }
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= self.dt && substeps < self.max_substeps {
            scene.tick(self.dt);
            self.accumulator -= self.dt;
            substeps += 1;
        }

        if self.accumulator >= self.dt {
            log::trace!(
                "Dropping {:.4}s of simulation time after {} substeps",
                self.accumulator,
                substeps
            );
            self.accumulator %= self.dt;
        }
        substeps
    }

    /// Fraction of a tick left in the accumulator, for render interpolation
    pub fn alpha(&self) -> f64 {
        self.accumulator / self.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::sim::body::RigidBody;
    use crate::sim::polygon::Polygon;
    use crate::sim::vector::Vector;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn square(x: f64, y: f64) -> RigidBody {
        RigidBody::new(Polygon::rectangle(Vector::new(x, y), 2.0, 2.0), 1.0, Color::WHITE)
    }

    #[test]
    fn test_phases_run_in_order() {
        let mut scene = Scene::new();
        let id = scene.add_body(square(0.0, 0.0));
        let seen = Rc::new(RefCell::new(Vec::new()));

        let log = seen.clone();
        scene.add_bodies_force_creator([id], move |bodies| {
            // Apply sees the body before integration moved it
            let body = bodies.get_mut(id).unwrap();
            log.borrow_mut().push(body.centroid().x);
            body.add_force(Vector::new(2.0, 0.0));
        });

        scene.tick(1.0);
        scene.tick(1.0);

        // v: 0 -> 2 -> 4; x: 0 -> 1 -> 4
        assert_eq!(seen.borrow().as_slice(), &[0.0, 1.0]);
        assert!((scene.body(0).centroid().x - 4.0).abs() < 1e-9);
        assert_eq!(scene.time_ticks(), 2);
    }

    #[test]
    fn test_creators_apply_in_registration_order() {
        let mut scene = Scene::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for i in 0..3 {
            let order = order.clone();
            scene.add_force_creator(move |_| order.borrow_mut().push(i));
        }
        scene.tick(0.1);
        assert_eq!(order.borrow().as_slice(), &[0, 1, 2]);
    }

    #[test]
    fn test_removed_body_lives_until_sweep() {
        let mut scene = Scene::new();
        let a = scene.add_body(square(0.0, 0.0));
        let hits = Rc::new(Cell::new(0));

        // First creator removes the body, second still sees and moves it
        scene.add_bodies_force_creator([a], move |bodies| {
            bodies.get_mut(a).unwrap().remove();
        });
        let counter = hits.clone();
        scene.add_force_creator(move |bodies| {
            if let Some(body) = bodies.get_mut(a) {
                body.add_impulse(Vector::new(1.0, 0.0));
                counter.set(counter.get() + 1);
            }
        });

        scene.tick(0.1);
        assert_eq!(hits.get(), 1);
        assert_eq!(scene.body_count(), 0);
        assert_eq!(scene.force_creator_count(), 1);

        scene.tick(0.1);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_sweep_drops_creator_state() {
        struct Aux(Rc<Cell<bool>>);
        impl Drop for Aux {
            fn drop(&mut self) {
                self.0.set(true);
            }
        }

        let mut scene = Scene::new();
        let a = scene.add_body(square(0.0, 0.0));
        let b = scene.add_body(square(5.0, 0.0));
        let dropped = Rc::new(Cell::new(false));
        let aux = Aux(dropped.clone());
        scene.add_bodies_force_creator([a, b], move |_| {
            let _held = &aux;
        });

        scene.tick(0.1);
        assert!(!dropped.get());

        scene.body_by_id_mut(b).unwrap().remove();
        assert!(!dropped.get());
        scene.tick(0.1);
        assert!(dropped.get());
        assert_eq!(scene.force_creator_count(), 0);
        assert_eq!(scene.body_count(), 1);
        assert_eq!(scene.body_id(0), a);
    }

    #[test]
    fn test_creator_with_unknown_dependency_is_swept() {
        let mut scene = Scene::new();
        let a = scene.add_body(square(0.0, 0.0));
        scene.remove_body(0);
        scene.tick(0.1);

        scene.add_bodies_force_creator([a], |_| {});
        scene.tick(0.1);
        assert_eq!(scene.force_creator_count(), 0);
    }

    #[test]
    fn test_stepper_runs_fixed_ticks() {
        let mut scene = Scene::new();
        let mut stepper = FixedStepper::new(0.03125, 8);

        assert_eq!(stepper.advance(&mut scene, 0.078125), 2);
        assert!((stepper.alpha() - 0.5).abs() < 1e-9);
        assert_eq!(stepper.advance(&mut scene, 0.015625), 1);
        assert_eq!(scene.time_ticks(), 3);
    }

    #[test]
    fn test_stepper_caps_substeps() {
        let mut scene = Scene::new();
        let mut stepper = FixedStepper::from_settings(&Settings {
            sim_dt: 0.001,
            max_substeps: 4,
            ..Settings::default()
        });

        // Large frame deltas clamp and excess time is dropped
        assert_eq!(stepper.advance(&mut scene, 5.0), 4);
        assert!(stepper.alpha() < 1.0);
        assert_eq!(stepper.advance(&mut scene, 0.0), 0);
    }

    #[test]
    fn test_stepper_ignores_non_finite_frames() {
        let mut scene = Scene::new();
        let mut stepper = FixedStepper::new(0.03125, 8);

        assert_eq!(stepper.advance(&mut scene, f64::NAN), 0);
        assert_eq!(stepper.advance(&mut scene, f64::INFINITY), 0);
        assert_eq!(stepper.alpha(), 0.0);

        // Still ticking afterwards
        assert_eq!(stepper.advance(&mut scene, 0.0625), 2);
        assert_eq!(scene.time_ticks(), 2);
    }
}
