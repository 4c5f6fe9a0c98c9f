//! The simulation space.

use glam::DVec2;

use crate::body::{Body, BodyHandle};
use crate::types::{BodyKind, DEFAULT_GRAVITY};

/// Owns every body and advances them with [`World::step`].
#[derive(Debug)]
pub struct World {
    gravity: DVec2,
    /// Fraction of velocity kept per second.
    damping: f64,
    bodies: Vec<Option<Body>>,
    steps: u64,
}

impl Default for World {
    fn default() -> Self {
        Self::new(DVec2::new(DEFAULT_GRAVITY.0, DEFAULT_GRAVITY.1))
    }
}

impl World {
    pub fn new(gravity: DVec2) -> Self {
        Self {
            gravity,
            damping: 1.0,
            bodies: Vec::new(),
            steps: 0,
        }
    }

    pub fn gravity(&self) -> DVec2 {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: DVec2) {
        self.gravity = gravity;
    }

    pub fn damping(&self) -> f64 {
        self.damping
    }

    pub fn set_damping(&mut self, damping: f64) {
        self.damping = damping.clamp(0.0, 1.0);
    }

    pub fn add_body(&mut self, kind: BodyKind, position: DVec2) -> BodyHandle {
        let handle = BodyHandle(self.bodies.len());
        self.bodies.push(Some(Body::new(kind, position)));
        handle
    }

    pub fn remove_body(&mut self, handle: BodyHandle) -> Option<Body> {
        self.bodies.get_mut(handle.0).and_then(Option::take)
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.get(handle.0).and_then(Option::as_ref)
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.bodies.get_mut(handle.0).and_then(Option::as_mut)
    }

    /// Live bodies with their handles, in creation order.
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &Body)> {
        self.bodies
            .iter()
            .enumerate()
            .filter_map(|(i, b)| b.as_ref().map(|b| (BodyHandle(i), b)))
    }

    pub fn body_count(&self) -> usize {
        self.bodies.iter().filter(|b| b.is_some()).count()
    }

    /// Number of completed calls to [`World::step`].
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Advance the simulation by `dt` seconds.
    pub fn step(&mut self, dt: f64) {
        log::trace!("physics step dt={dt}");
        let (gravity, damping) = (self.gravity, self.damping);
        for body in self.bodies.iter_mut().flatten() {
            body.integrate(gravity, damping, dt);
        }
        self.steps += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::limit_velocity;
    use crate::shape::Shape;

    #[test]
    fn test_default_world_uses_terminal_gravity() {
        let world = World::default();
        assert_eq!(world.gravity(), DVec2::new(0.0, 98.1));
        assert_eq!(world.body_count(), 0);
    }

    #[test]
    fn test_dynamic_body_falls() {
        let mut world = World::new(DVec2::new(0.0, 10.0));
        let h = world.add_body(BodyKind::Dynamic, DVec2::ZERO);
        world.step(1.0);
        let body = world.body(h).unwrap();
        assert_eq!(body.velocity(), DVec2::new(0.0, 10.0));
        assert_eq!(body.position(), DVec2::new(0.0, 10.0));
        assert_eq!(world.steps(), 1);
    }

    #[test]
    fn test_velocity_hook_runs_every_step() {
        let mut world = World::new(DVec2::new(0.0, 100.0));
        let h = world.add_body(BodyKind::Dynamic, DVec2::ZERO);
        world.body_mut(h).unwrap().set_velocity_hook(limit_velocity(2.0));
        for _ in 0..10 {
            world.step(0.1);
            let speed = world.body(h).unwrap().velocity().length();
            assert!(speed <= 2.0 + 1e-9, "speed {speed} exceeds cap");
        }
    }

    #[test]
    fn test_forces_are_cleared_after_step() {
        let mut world = World::new(DVec2::ZERO);
        let h = world.add_body(BodyKind::Dynamic, DVec2::ZERO);
        let body = world.body_mut(h).unwrap();
        body.attach_shape(Shape::circle(1.0).with_mass(1.0));
        body.apply_force(DVec2::new(1.0, 0.0));
        world.step(1.0);
        world.step(1.0);
        assert_eq!(world.body(h).unwrap().velocity(), DVec2::new(1.0, 0.0));
    }

    #[test]
    fn test_removed_handles_do_not_alias() {
        let mut world = World::default();
        let a = world.add_body(BodyKind::Static, DVec2::ZERO);
        assert!(world.remove_body(a).is_some());
        let b = world.add_body(BodyKind::Static, DVec2::ONE);
        assert_ne!(a, b);
        assert!(world.body(a).is_none());
        assert_eq!(world.body_count(), 1);
        assert_eq!(world.bodies().count(), 1);
    }
}
