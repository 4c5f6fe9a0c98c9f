//! Scene model for the terminal game engine - pure and headless
//!
//! Everything here is independent of the terminal: pixel buffers, animations,
//! entities and their ordering, the physics binding, and the [`Context`]
//! handed to entity callbacks. The `termgame-term` crate draws what this
//! crate describes; `termgame-engine` drives it frame by frame.
//!
//! # Module Structure
//!
//! - [`pixel`]: cell grid with clipping composition, scrolling and flipping
//! - [`raster`]: raster image loading into pixel buffers
//! - [`animation`]: frame lists and the frame-number driven cursor
//! - [`entity`]: entities and the [`EntityBehavior`] hooks
//! - [`binding`]: keeps physics entities in sync with their rigid bodies
//! - [`registry`]: render (depth) and update (priority) ordering
//! - [`context`]: engine state shared with callbacks, keys, stop token
//! - [`snapshot`]: serializable scene summaries
//! - [`rng`]: deterministic LCG for demos and tests
//!
//! # Example
//!
//! ```
//! use termgame_core::{Cell, Entity, PixelBuffer, SceneRegistry};
//! use termgame_core::types::Color;
//!
//! let mut scene = SceneRegistry::new();
//! scene.add(Entity::new("sky").with_depth(-1).with_frames(vec![PixelBuffer::filled(4, 2, Color::new(0, 0, 80))]));
//! scene.add(Entity::new("sun").with_frames(vec![PixelBuffer::filled(1, 1, Color::new(255, 200, 0))]));
//!
//! let names: Vec<&str> = scene.all().iter().map(|e| e.name()).collect();
//! assert_eq!(names, ["sky", "sun"]);
//!
//! let mut display = PixelBuffer::new(4, 2);
//! display.compose_over(&PixelBuffer::filled(1, 1, Color::WHITE), 3, 1);
//! assert_eq!(display.get(3, 1).unwrap(), Cell::opaque(Color::WHITE));
//! ```

pub mod animation;
pub mod binding;
pub mod context;
pub mod entity;
pub mod pixel;
pub mod raster;
pub mod registry;
pub mod rng;
pub mod snapshot;

pub use termgame_physics as physics;
pub use termgame_types as types;

pub use animation::{flip_animation, stretch_animation, AnimationSequence};
pub use binding::PhysicsBinding;
pub use context::{Context, Diagnostic, InputSource, PressedKeys, StateMap, StopToken};
pub use entity::{Entity, EntityBehavior, EntityId, EntityKind};
pub use pixel::{Cell, PixelBuffer};
pub use raster::{Channels, ImageLoadError, ImageSource, RawImage};
pub use registry::SceneRegistry;
pub use rng::SimpleRng;
pub use snapshot::{EntitySnapshot, SceneSnapshot};
