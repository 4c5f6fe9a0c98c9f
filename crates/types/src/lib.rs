//! Core types module - shared data structures, constants and errors
//!
//! This module defines the fundamental types used throughout the engine.
//! Everything here is plain data with no I/O, usable from the pixel layer,
//! the physics collaborator, the terminal backend and user game code alike.
//!
//! # Engine Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_FPS` | 10 | Target frames per second |
//! | `DEFAULT_PHYSICS_PER_FRAME` | 5 | Physics sub-steps per rendered frame |
//! | `DEFAULT_GRAVITY` | (0, 98.1) | Gravity in cells/s² (y grows downwards) |
//! | `DEFAULT_CELL_WIDTH` | 2 | Terminal columns printed per pixel cell |
//! | `DEFAULT_GLYPH` | `' '` | Glyph drawn in every cell |
//!
//! # Errors
//!
//! Two error families are shared by every crate:
//!
//! - [`ConfigError`]: invalid arguments detected at construction/call time
//!   (color channel out of range, unknown axis, image too large, bad config).
//! - [`BoundsError`]: a direct cell access outside a buffer.
//!
//! # Examples
//!
//! ```
//! use termgame_types::{Axis, Color, Key};
//!
//! let red = Color::new(255, 0, 0);
//! assert_eq!(Color::try_from_channels(255, 0, 0).unwrap(), red);
//! assert!(Color::try_from_channels(256, 0, 0).is_err());
//!
//! let axis: Axis = "x".parse().unwrap();
//! assert_eq!(axis, Axis::X);
//!
//! assert_eq!(Key::from_name("Left"), Some(Key::Left));
//! assert_eq!(Key::Char('a').name(), "a");
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Target frame rate used when none is configured.
pub const DEFAULT_FPS: u32 = 10;

/// Physics sub-steps per rendered frame.
pub const DEFAULT_PHYSICS_PER_FRAME: u32 = 5;

/// Gravity for the physics world, in cells per second squared.
///
/// Terminal cells are large, so this is ten times earth gravity in "cells".
pub const DEFAULT_GRAVITY: (f64, f64) = (0.0, 98.1);

/// Terminal columns used to print one pixel cell (compensates glyph aspect ratio).
pub const DEFAULT_CELL_WIDTH: u16 = 2;

/// Glyph printed for a cell when none is given.
pub const DEFAULT_GLYPH: char = ' ';

/// 24-bit RGB color.
///
/// Channels are `u8`, so a constructed `Color` is always valid. Use
/// [`Color::try_from_channels`] when values come from wider integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from unchecked integer channels.
    ///
    /// Fails with [`ConfigError::InvalidChannel`] naming the first channel
    /// outside `0..=255`.
    pub fn try_from_channels(r: i64, g: i64, b: i64) -> Result<Self, ConfigError> {
        Ok(Self {
            r: channel('r', r)?,
            g: channel('g', g)?,
            b: channel('b', b)?,
        })
    }
}

fn channel(name: char, value: i64) -> Result<u8, ConfigError> {
    u8::try_from(value).map_err(|_| ConfigError::InvalidChannel {
        channel: name,
        value,
    })
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

/// Mirror axis for buffer flips.
///
/// `X` mirrors left-right (columns are reversed), `Y` mirrors top-bottom
/// (rows are reversed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
        }
    }
}

impl FromStr for Axis {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "x" | "horizontal" => Ok(Axis::X),
            "y" | "vertical" => Ok(Axis::Y),
            _ => Err(ConfigError::InvalidAxis(s.to_string())),
        }
    }
}

/// Rigid body kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BodyKind {
    /// Never moved by the integrator.
    Static,
    /// Integrated every physics step.
    #[default]
    Dynamic,
}

/// Keyboard key, addressed by name from game code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    Enter,
    Esc,
    Tab,
    Backspace,
    /// Printable character, stored lowercase.
    Char(char),
}

impl Key {
    /// Parse a key name (case-insensitive).
    ///
    /// Named keys use their lowercase names (`"left"`, `"space"`, ...); any
    /// single character names itself.
    pub fn from_name(s: &str) -> Option<Self> {
        let lower = s.to_lowercase();
        match lower.as_str() {
            "left" => Some(Key::Left),
            "right" => Some(Key::Right),
            "up" => Some(Key::Up),
            "down" => Some(Key::Down),
            "space" | " " => Some(Key::Space),
            "enter" | "return" => Some(Key::Enter),
            "esc" | "escape" => Some(Key::Esc),
            "tab" => Some(Key::Tab),
            "backspace" => Some(Key::Backspace),
            _ => {
                let mut chars = lower.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Key::Char(c)),
                    _ => None,
                }
            }
        }
    }

    /// Build a character key, normalising case.
    pub fn char(c: char) -> Self {
        if c == ' ' {
            return Key::Space;
        }
        Key::Char(c.to_lowercase().next().unwrap_or(c))
    }

    pub fn name(&self) -> String {
        match self {
            Key::Left => "left".to_string(),
            Key::Right => "right".to_string(),
            Key::Up => "up".to_string(),
            Key::Down => "down".to_string(),
            Key::Space => "space".to_string(),
            Key::Enter => "enter".to_string(),
            Key::Esc => "esc".to_string(),
            Key::Tab => "tab".to_string(),
            Key::Backspace => "backspace".to_string(),
            Key::Char(c) => c.to_string(),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Invalid argument detected at construction or call time. Never retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid value {value} for channel {channel}: must be between 0-255, inclusive")]
    InvalidChannel { channel: char, value: i64 },

    #[error("invalid axis {0:?}: must be either x or y")]
    InvalidAxis(String),

    #[error(
        "image of size ({image_width}, {image_height}) does not fit at ({x}, {y}) \
         in a buffer of size ({width}, {height})"
    )]
    ImageTooLarge {
        image_width: u32,
        image_height: u32,
        x: i32,
        y: i32,
        width: u16,
        height: u16,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A cell access outside `0 <= x < width`, `0 <= y < height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("coordinate ({x}, {y}) is outside a {width}x{height} buffer")]
pub struct BoundsError {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_channels_are_validated() {
        assert_eq!(
            Color::try_from_channels(0, 128, 255),
            Ok(Color::new(0, 128, 255))
        );
        assert_eq!(
            Color::try_from_channels(0, -1, 0),
            Err(ConfigError::InvalidChannel {
                channel: 'g',
                value: -1
            })
        );
        assert!(Color::try_from_channels(0, 0, 256).is_err());
    }

    #[test]
    fn test_color_equality_is_componentwise() {
        assert_eq!(Color::new(1, 2, 3), Color::from((1, 2, 3)));
        assert_ne!(Color::new(1, 2, 3), Color::new(1, 2, 4));
    }

    #[test]
    fn test_axis_parse() {
        assert_eq!("X".parse::<Axis>(), Ok(Axis::X));
        assert_eq!("y".parse::<Axis>(), Ok(Axis::Y));
        assert_eq!(
            "z".parse::<Axis>(),
            Err(ConfigError::InvalidAxis("z".to_string()))
        );
    }

    #[test]
    fn test_key_names_round_trip() {
        for key in [
            Key::Left,
            Key::Right,
            Key::Up,
            Key::Down,
            Key::Space,
            Key::Enter,
            Key::Esc,
            Key::Tab,
            Key::Backspace,
            Key::Char('q'),
        ] {
            assert_eq!(Key::from_name(&key.name()), Some(key));
        }
        assert_eq!(Key::from_name("A"), Some(Key::Char('a')));
        assert_eq!(Key::char('A'), Key::Char('a'));
        assert_eq!(Key::from_name("nope"), None);
    }

    #[test]
    fn test_engine_defaults() {
        assert_eq!(DEFAULT_FPS, 10);
        assert_eq!(DEFAULT_PHYSICS_PER_FRAME, 5);
        assert_eq!(DEFAULT_GRAVITY, (0.0, 98.1));
        assert_eq!(DEFAULT_CELL_WIDTH, 2);
    }
}
