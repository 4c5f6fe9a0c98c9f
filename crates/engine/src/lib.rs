//! Frame scheduler and runtime plumbing.
//!
//! [`Engine`] owns the scene registry, the [`Context`](termgame_core::Context)
//! handed to callbacks, the compositor and the terminal renderer, and drives
//! them at a fixed frame rate. [`EngineConfig`] is read once at startup,
//! usually from `TERMGAME_*` environment variables, and [`init_logging`]
//! installs the `env_logger` backend.
//!
//! ```
//! use termgame_engine::{Engine, EngineConfig};
//! use termgame_engine::core::Entity;
//!
//! let config = EngineConfig::default().with_headless(true);
//! let mut engine = Engine::new(20, 10, config).unwrap();
//! engine.add(Entity::new("player").with_position(3, 4));
//! engine.tick().unwrap();
//! assert_eq!(engine.frame(), 1);
//! ```

pub mod config;
pub mod engine;
pub mod logging;
pub mod pacing;

pub use termgame_core as core;
pub use termgame_input as input;
pub use termgame_physics as physics;
pub use termgame_term as term;
pub use termgame_types as types;

pub use config::{EngineConfig, PacingMode};
pub use engine::{Engine, Phase};
pub use logging::init_logging;
pub use pacing::FramePacer;
