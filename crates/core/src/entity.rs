//! Scene entities and the behavior trait.
//!
//! Every callback is two-stage: the engine-internal step (animation advance,
//! physics sync) always runs first, then the user's [`EntityBehavior`] is
//! called with the entity and the [`Context`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::animation::AnimationSequence;
use crate::binding::{self, PhysicsBinding};
use crate::context::{Context, StateMap};
use crate::physics::BodyHandle;
use crate::pixel::PixelBuffer;
use crate::types::BodyKind;

/// Registration-order identity, assigned by the scene registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

/// User hooks for an entity. Every method defaults to a no-op.
///
/// ```
/// use termgame_core::{Context, Entity, EntityBehavior};
///
/// struct Drift;
///
/// impl EntityBehavior for Drift {
///     fn on_update(&mut self, entity: &mut Entity, _frame: u64, _ctx: &mut Context) {
///         entity.x += 1;
///     }
/// }
///
/// let mut ctx = Context::new(10, 10, 10);
/// let mut entity = Entity::new("drifter").with_behavior(Drift);
/// entity.start(&mut ctx);
/// entity.update(0, &mut ctx);
/// assert_eq!(entity.x, 1);
/// ```
#[allow(unused_variables)]
pub trait EntityBehavior {
    /// Called once when the entity is started by the engine.
    fn on_start(&mut self, entity: &mut Entity, ctx: &mut Context) {}

    /// Called once per frame, after the animation has advanced.
    fn on_update(&mut self, entity: &mut Entity, frame: u64, ctx: &mut Context) {}

    /// Called once per physics sub-step, after the position sync.
    fn on_fixed_update(&mut self, entity: &mut Entity, frame: u64, ctx: &mut Context) {}
}

struct Inert;

impl EntityBehavior for Inert {}

/// Whether the scheduler runs the physics-sync step for an entity.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    Static,
    Physics(PhysicsBinding),
}

/// A positioned, depth-ordered visual object.
pub struct Entity {
    id: Option<EntityId>,
    name: String,
    /// Column of the top-left corner, in cells.
    pub x: i32,
    /// Row of the top-left corner, in cells.
    pub y: i32,
    depth: i32,
    /// Update dispatch key: lower runs first.
    pub priority: i32,
    animation: AnimationSequence,
    /// Per-entity user state.
    pub state: StateMap,
    kind: EntityKind,
    behavior: Box<dyn EntityBehavior>,
    started: bool,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            x: 0,
            y: 0,
            depth: 0,
            priority: 0,
            animation: AnimationSequence::default(),
            state: StateMap::new(),
            kind: EntityKind::Static,
            behavior: Box::new(Inert),
            started: false,
        }
    }

    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Paint order: lower paints first (further back).
    pub fn with_depth(mut self, depth: i32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_frames(mut self, frames: Vec<PixelBuffer>) -> Self {
        self.animation = AnimationSequence::new(frames);
        self
    }

    pub fn with_behavior(mut self, behavior: impl EntityBehavior + 'static) -> Self {
        self.behavior = Box::new(behavior);
        self
    }

    /// Request a rigid body of `kind`, created when the entity joins a
    /// physics-enabled engine.
    pub fn with_physics(mut self, kind: BodyKind) -> Self {
        let max_velocity = self.binding().and_then(PhysicsBinding::max_velocity);
        let mut binding = PhysicsBinding::new(kind);
        if let Some(max) = max_velocity {
            binding = binding.with_max_velocity(max);
        }
        self.kind = EntityKind::Physics(binding);
        self
    }

    /// Cap the body's speed. Implies a dynamic body if none was requested.
    pub fn with_max_velocity(mut self, max_velocity: f64) -> Self {
        let binding = match self.kind {
            EntityKind::Physics(b) => b.with_max_velocity(max_velocity),
            EntityKind::Static => {
                PhysicsBinding::new(BodyKind::Dynamic).with_max_velocity(max_velocity)
            }
        };
        self.kind = EntityKind::Physics(binding);
        self
    }

    pub fn id(&self) -> Option<EntityId> {
        self.id
    }

    pub(crate) fn assign_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub(crate) fn set_depth(&mut self, depth: i32) {
        self.depth = depth;
    }

    /// Width of the active frame, 0 when none is active.
    ///
    /// Changes as the animation advances; never cache it across ticks.
    pub fn width(&self) -> u16 {
        self.animation.active_frame().map_or(0, PixelBuffer::width)
    }

    /// Height of the active frame, 0 when none is active.
    pub fn height(&self) -> u16 {
        self.animation.active_frame().map_or(0, PixelBuffer::height)
    }

    pub fn animation(&self) -> &AnimationSequence {
        &self.animation
    }

    pub fn active_frame(&self) -> Option<&PixelBuffer> {
        self.animation.active_frame()
    }

    pub fn frames(&self) -> &[PixelBuffer] {
        self.animation.frames()
    }

    /// Replace the frame list and restart it at frame 0.
    pub fn set_frames(&mut self, frames: Vec<PixelBuffer>) {
        self.animation.replace(frames);
    }

    pub fn kind(&self) -> &EntityKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut EntityKind {
        &mut self.kind
    }

    pub fn binding(&self) -> Option<&PhysicsBinding> {
        match &self.kind {
            EntityKind::Physics(b) => Some(b),
            EntityKind::Static => None,
        }
    }

    pub fn has_physics(&self) -> bool {
        matches!(self.kind, EntityKind::Physics(_))
    }

    /// Handle of the attached rigid body, once the engine created it.
    pub fn body_handle(&self) -> Option<BodyHandle> {
        self.binding().and_then(PhysicsBinding::handle)
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Start the animation at frame 0, then call `on_start`.
    pub fn start(&mut self, ctx: &mut Context) {
        self.animation.start();
        self.started = true;
        self.dispatch(|behavior, entity| behavior.on_start(entity, ctx));
    }

    /// Advance the animation for `frame`, then call `on_update`.
    pub fn update(&mut self, frame: u64, ctx: &mut Context) {
        self.animation.advance(frame);
        self.dispatch(|behavior, entity| behavior.on_update(entity, frame, ctx));
    }

    /// Sync from the rigid body (physics entities only), then call
    /// `on_fixed_update`.
    pub fn fixed_update(&mut self, frame: u64, ctx: &mut Context) {
        if self.has_physics() {
            binding::sync_entity(self, ctx);
        }
        self.dispatch(|behavior, entity| behavior.on_fixed_update(entity, frame, ctx));
    }

    fn dispatch(&mut self, f: impl FnOnce(&mut dyn EntityBehavior, &mut Entity)) {
        let mut behavior = std::mem::replace(&mut self.behavior, Box::new(Inert));
        f(behavior.as_mut(), self);
        self.behavior = behavior;
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("x", &self.x)
            .field("y", &self.y)
            .field("depth", &self.depth)
            .field("priority", &self.priority)
            .field("frames", &self.animation.len())
            .field("active", &self.animation.active_index())
            .field("kind", &self.kind)
            .field("started", &self.started)
            .finish()
    }
}
