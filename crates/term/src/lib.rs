//! Terminal output for the scene.
//!
//! Rendering is split in two:
//!
//! - [`Compositor`] is pure: it paints every entity that has an active frame
//!   onto a display-sized [`PixelBuffer`](termgame_core::PixelBuffer) in depth
//!   order.
//! - [`TerminalRenderer`] encodes that buffer as colored glyph rows with
//!   crossterm commands and writes it to a character stream, moving the
//!   cursor back up before the next frame so each frame redraws in place.
//!
//! The encoders write into a `Vec<u8>` and never touch stdout, so the exact
//! byte stream can be asserted in tests.

pub mod compositor;
pub mod renderer;

pub use termgame_core as core;
pub use termgame_types as types;

pub use compositor::Compositor;
pub use renderer::{encode_frame_into, encode_rewind_into, TerminalRenderer};
