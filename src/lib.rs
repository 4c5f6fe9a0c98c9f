//! termgame (workspace facade crate).
//!
//! Re-exports the member crates under short names so games and tests can
//! depend on one package: `termgame::{core, engine, input, physics, term, types}`.

pub use termgame_core as core;
pub use termgame_engine as engine;
pub use termgame_input as input;
pub use termgame_physics as physics;
pub use termgame_term as term;
pub use termgame_types as types;
