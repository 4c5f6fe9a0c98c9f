//! Engine context handed to every entity callback.
//!
//! There is no global engine singleton: the scheduler owns one [`Context`]
//! and passes it by `&mut` into `on_start`, `on_update` and
//! `on_fixed_update`. Only one callback runs at a time, so callbacks may read
//! and mutate it freely.

use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use arrayvec::ArrayVec;

use crate::binding;
use crate::physics::World;
use crate::registry::SceneRegistry;
use crate::types::Key;

/// String-keyed bag of dynamic values for user extension.
pub type StateMap = HashMap<String, serde_json::Value>;

/// Maximum number of simultaneously held keys tracked per frame.
pub const MAX_PRESSED_KEYS: usize = 16;

/// Cooperative stop signal, consulted at the top of every tick.
///
/// Clones share the same flag, so it can be handed to input sources, signal
/// handlers or other threads.
#[derive(Debug, Clone, Default)]
pub struct StopToken {
    flag: Arc<AtomicBool>,
}

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_stop(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Keys held during the current frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PressedKeys {
    keys: ArrayVec<Key, MAX_PRESSED_KEYS>,
}

impl PressedKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a key as held. Extra keys beyond capacity are ignored.
    pub fn press(&mut self, key: Key) {
        if !self.keys.contains(&key) {
            let _ = self.keys.try_push(key);
        }
    }

    pub fn release(&mut self, key: Key) {
        self.keys.retain(|k| *k != key);
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn contains(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    /// Query by key name, e.g. `"left"`, `"space"`, `"a"`. Unknown names are
    /// never pressed.
    pub fn is_pressed(&self, name: &str) -> bool {
        Key::from_name(name).is_some_and(|k| self.contains(k))
    }

    pub fn iter(&self) -> impl Iterator<Item = Key> + '_ {
        self.keys.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Keyboard collaborator polled by the scheduler once per tick.
pub trait InputSource {
    /// Refresh `keys` with the keys held this frame. May request a stop.
    fn poll(&mut self, keys: &mut PressedKeys, stop: &StopToken) -> io::Result<()>;

    /// Block until any key is pressed (used by wait-for-start).
    fn wait_for_key(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Non-fatal events the engine reports instead of failing.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A plain entity was added to a physics scene and wrapped into a static
    /// body with a bounding-box shape.
    ConvertedToStatic { name: String },
    /// A physics entity's body has no collision shapes.
    NoShapes { name: String },
    /// The body position was NaN or infinite; the position sync was skipped.
    NonFinitePosition { name: String },
    /// An entity asked for physics but the engine has no physics world.
    PhysicsUnavailable { name: String },
    /// A physics entity's body handle does not resolve in the current world;
    /// the position sync was skipped.
    MissingBody { name: String },
}

/// Explicit engine state shared with callbacks.
#[derive(Debug)]
pub struct Context {
    width: u16,
    height: u16,
    frame: u64,
    fps: u32,
    started_at: Option<Instant>,
    physics: Option<World>,
    stop: StopToken,
    diagnostics: Vec<Diagnostic>,
    /// Engine-wide state shared between entities.
    pub state: StateMap,
    /// Keys held this frame.
    pub keys: PressedKeys,
}

impl Context {
    pub fn new(width: u16, height: u16, fps: u32) -> Self {
        Self {
            width,
            height,
            frame: 0,
            fps,
            started_at: None,
            physics: None,
            stop: StopToken::new(),
            diagnostics: Vec::new(),
            state: StateMap::new(),
            keys: PressedKeys::new(),
        }
    }

    /// Install (or replace) the physics world and give every entity in
    /// `registry` a body in it.
    ///
    /// Handles into a previous world are dropped and plain entities are
    /// converted to static bodies, exactly as if they were added now.
    pub fn install_physics(&mut self, mut world: World, registry: &mut SceneRegistry) {
        for entity in registry.all_mut() {
            if let Some(diagnostic) = binding::rebind_entity(entity, &mut world) {
                self.report(diagnostic);
            }
        }
        self.physics = Some(world);
    }

    /// Display width in cells.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Display height in cells.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Current frame number (0 on the first tick).
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Time since the engine started, zero before.
    pub fn elapsed(&self) -> Duration {
        self.started_at.map(|t| t.elapsed()).unwrap_or_default()
    }

    pub fn physics(&self) -> Option<&World> {
        self.physics.as_ref()
    }

    pub fn physics_mut(&mut self) -> Option<&mut World> {
        self.physics.as_mut()
    }

    pub fn has_physics(&self) -> bool {
        self.physics.is_some()
    }

    pub fn is_pressed(&self, key_name: &str) -> bool {
        self.keys.is_pressed(key_name)
    }

    pub fn stop_token(&self) -> StopToken {
        self.stop.clone()
    }

    pub fn request_stop(&self) {
        self.stop.request_stop();
    }

    pub fn is_stop_requested(&self) -> bool {
        self.stop.is_stop_requested()
    }

    /// Diagnostics raised since the current tick began.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Record the engine start time.
    pub fn mark_started(&mut self) {
        self.started_at = Some(Instant::now());
    }

    /// Enter frame `frame`: sets the counter and drops last tick's diagnostics.
    pub fn begin_frame(&mut self, frame: u64) {
        self.frame = frame;
        self.diagnostics.clear();
    }
}
