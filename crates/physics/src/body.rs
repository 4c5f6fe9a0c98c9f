//! Rigid bodies and velocity hooks.

use std::fmt;

use glam::DVec2;

use crate::shape::Shape;
use crate::types::BodyKind;

/// Stable handle to a body inside a [`crate::World`].
///
/// Handles are never reused, so a handle to a removed body stays dangling
/// rather than aliasing a newer body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub(crate) usize);

impl BodyHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Post-integration velocity policy, invoked once per body per step.
///
/// Receives the freshly integrated velocity and returns the velocity to keep.
pub type VelocityHook = Box<dyn Fn(DVec2) -> DVec2>;

/// Velocity hook that rescales any velocity faster than `max_speed` down to
/// exactly `max_speed`, preserving direction.
pub fn limit_velocity(max_speed: f64) -> VelocityHook {
    Box::new(move |velocity: DVec2| {
        let speed = velocity.length();
        if speed > max_speed {
            velocity * (max_speed / speed)
        } else {
            velocity
        }
    })
}

pub struct Body {
    kind: BodyKind,
    position: DVec2,
    velocity: DVec2,
    force: DVec2,
    shapes: Vec<Shape>,
    velocity_hook: Option<VelocityHook>,
}

impl Body {
    pub(crate) fn new(kind: BodyKind, position: DVec2) -> Self {
        Self {
            kind,
            position,
            velocity: DVec2::ZERO,
            force: DVec2::ZERO,
            shapes: Vec::new(),
            velocity_hook: None,
        }
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn set_position(&mut self, position: DVec2) {
        self.position = position;
    }

    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: DVec2) {
        self.velocity = velocity;
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn attach_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Sum of attached shape masses.
    pub fn mass(&self) -> f64 {
        self.shapes.iter().map(|s| s.mass).sum()
    }

    fn inverse_mass(&self) -> f64 {
        let mass = self.mass();
        if mass > 0.0 {
            1.0 / mass
        } else {
            0.0
        }
    }

    /// Instantaneous change of momentum. Ignored by static and massless bodies.
    pub fn apply_impulse(&mut self, impulse: DVec2) {
        if self.kind == BodyKind::Dynamic {
            self.velocity += impulse * self.inverse_mass();
        }
    }

    /// Force accumulated until the next step, then cleared.
    pub fn apply_force(&mut self, force: DVec2) {
        self.force += force;
    }

    pub fn set_velocity_hook(&mut self, hook: VelocityHook) {
        self.velocity_hook = Some(hook);
    }

    pub fn has_velocity_hook(&self) -> bool {
        self.velocity_hook.is_some()
    }

    pub(crate) fn integrate(&mut self, gravity: DVec2, damping: f64, dt: f64) {
        if self.kind == BodyKind::Static {
            self.force = DVec2::ZERO;
            return;
        }

        let acceleration = gravity + self.force * self.inverse_mass();
        let mut velocity = self.velocity * damping.powf(dt) + acceleration * dt;
        if let Some(hook) = &self.velocity_hook {
            velocity = hook(velocity);
        }
        self.velocity = velocity;
        self.position += velocity * dt;
        self.force = DVec2::ZERO;
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Body")
            .field("kind", &self.kind)
            .field("position", &self.position)
            .field("velocity", &self.velocity)
            .field("shapes", &self.shapes.len())
            .field("velocity_hook", &self.velocity_hook.is_some())
            .finish()
    }
}
