//! Keyboard collaborator over crossterm.
//!
//! Update callbacks ask "is this key held right now?" via
//! [`Context::is_pressed`](termgame_core::Context::is_pressed). Terminals
//! mostly report presses and auto-repeats, not releases, so held state is
//! reconstructed by [`KeyTracker`] with a release timeout.

pub mod handler;
pub mod map;
pub mod source;

pub use termgame_core as core;
pub use termgame_types as types;

pub use handler::KeyTracker;
pub use map::{key_from_event, should_quit};
pub use source::TerminalInput;
