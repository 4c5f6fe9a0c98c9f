//! Physics binding adapter: keeps an entity's cell position in step with its
//! rigid body.
//!
//! Per physics sub-step, for every physics entity, [`sync_entity`] runs
//! before the user's `on_fixed_update`:
//!
//! 0. warn when the entity's body is missing from the world and stop there
//! 1. warn when the body has no shapes (a configuration hazard, not an error)
//! 2. round the body position into the entity's integer position, skipping the
//!    sync when the position is NaN or infinite
//! 3. clamp the entity so its whole footprint stays on screen

use glam::DVec2;

use crate::context::{Context, Diagnostic};
use crate::entity::{Entity, EntityKind};
use crate::physics::{limit_velocity, BodyHandle, Shape, World};
use crate::types::BodyKind;

/// Link between an entity and its rigid body.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsBinding {
    kind: BodyKind,
    max_velocity: Option<f64>,
    handle: Option<BodyHandle>,
}

impl PhysicsBinding {
    pub fn new(kind: BodyKind) -> Self {
        Self {
            kind,
            max_velocity: None,
            handle: None,
        }
    }

    pub fn with_max_velocity(mut self, max_velocity: f64) -> Self {
        self.max_velocity = Some(max_velocity);
        self
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    pub fn max_velocity(&self) -> Option<f64> {
        self.max_velocity
    }

    pub fn handle(&self) -> Option<BodyHandle> {
        self.handle
    }

    /// Create the body at `(x, y)` and install the speed cap, once.
    pub fn attach(&mut self, world: &mut World, x: i32, y: i32) -> BodyHandle {
        if let Some(handle) = self.handle {
            return handle;
        }
        let handle = world.add_body(self.kind, DVec2::new(x as f64, y as f64));
        if let (Some(max), Some(body)) = (self.max_velocity, world.body_mut(handle)) {
            body.set_velocity_hook(limit_velocity(max));
        }
        self.handle = Some(handle);
        handle
    }

    /// Forget the body handle, e.g. when the world it points into is replaced.
    pub(crate) fn detach(&mut self) {
        self.handle = None;
    }
}

/// Give `entity` a body in `world`.
///
/// Plain entities are wrapped into a static body with a bounding-box shape
/// sized from their first frame, which is reported as
/// [`Diagnostic::ConvertedToStatic`].
pub fn attach_entity(entity: &mut Entity, world: &mut World) -> Option<Diagnostic> {
    let (x, y) = (entity.x, entity.y);
    if let EntityKind::Physics(binding) = entity.kind_mut() {
        binding.attach(world, x, y);
        return None;
    }

    let (w, h) = entity
        .frames()
        .first()
        .map_or((0, 0), |f| (f.width(), f.height()));
    let mut binding = PhysicsBinding::new(BodyKind::Static);
    let handle = binding.attach(world, x, y);
    if let Some(body) = world.body_mut(handle) {
        body.attach_shape(Shape::bounding_box(w as f64, h as f64));
    }
    *entity.kind_mut() = EntityKind::Physics(binding);

    log::info!(
        "{:?} is not a physics entity -> static body with bounding-box shape",
        entity.name()
    );
    Some(Diagnostic::ConvertedToStatic {
        name: entity.name().to_string(),
    })
}

/// Give `entity` a body in a freshly installed `world`, dropping any handle
/// into a previous one. Bodies are recreated at the entity's cell position;
/// velocities and shapes of the old bodies are not carried over.
pub fn rebind_entity(entity: &mut Entity, world: &mut World) -> Option<Diagnostic> {
    if let EntityKind::Physics(binding) = entity.kind_mut() {
        binding.detach();
    }
    attach_entity(entity, world)
}

/// Round a continuous body position to cells (half to even).
///
/// Returns `None` when either coordinate is NaN or infinite.
pub fn cell_position(position: DVec2) -> Option<(i32, i32)> {
    if !position.is_finite() {
        return None;
    }
    Some((
        position.x.round_ties_even() as i32,
        position.y.round_ties_even() as i32,
    ))
}

/// Keep an `w x h` footprint at `(x, y)` inside a `screen_w x screen_h` screen.
///
/// The lower bound is applied first, so a footprint wider than the screen ends
/// up at `screen_w - w` (negative).
pub fn clamp_to_screen(x: i32, y: i32, w: u16, h: u16, screen_w: u16, screen_h: u16) -> (i32, i32) {
    let max_x = screen_w as i32 - w as i32;
    let max_y = screen_h as i32 - h as i32;
    (x.max(0).min(max_x), y.max(0).min(max_y))
}

/// Engine-internal fixed-update step for one physics entity.
pub fn sync_entity(entity: &mut Entity, ctx: &mut Context) {
    let body = entity
        .body_handle()
        .and_then(|handle| ctx.physics().and_then(|w| w.body(handle)));
    let Some(body) = body else {
        log::warn!(
            "{:?} has no rigid body in the physics world; position is not synced",
            entity.name()
        );
        ctx.report(Diagnostic::MissingBody {
            name: entity.name().to_string(),
        });
        return;
    };
    let no_shapes = body.shapes().is_empty();
    let position = body.position();

    if no_shapes {
        log::warn!(
            "{:?} has no shapes attached to its rigid body; this may result in unexpected behavior",
            entity.name()
        );
        ctx.report(Diagnostic::NoShapes {
            name: entity.name().to_string(),
        });
    }

    match cell_position(position) {
        Some((x, y)) => {
            entity.x = x;
            entity.y = y;
        }
        None => {
            log::debug!(
                "{:?} body position {position} is not finite; keeping ({}, {})",
                entity.name(),
                entity.x,
                entity.y
            );
            ctx.report(Diagnostic::NonFinitePosition {
                name: entity.name().to_string(),
            });
        }
    }

    let (x, y) = clamp_to_screen(
        entity.x,
        entity.y,
        entity.width(),
        entity.height(),
        ctx.width(),
        ctx.height(),
    );
    entity.x = x;
    entity.y = y;
}
