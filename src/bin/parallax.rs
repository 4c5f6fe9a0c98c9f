//! Parallax demo: two background layers scrolling at different speeds and a
//! walking sprite steered with the arrow keys.
//!
//! An optional image path replaces the far layer:
//!
//! ```text
//! cargo run --bin parallax -- assets/background.png
//! ```

use std::path::PathBuf;

use anyhow::Result;

use termgame::core::{
    flip_animation, stretch_animation, Cell, Context, Entity, EntityBehavior, ImageSource,
    PixelBuffer,
};
use termgame::engine::{init_logging, Engine, EngineConfig};
use termgame::input::TerminalInput;
use termgame::types::{Axis, Color, DEFAULT_CELL_WIDTH};

const WALKER_SIZE: (u16, u16) = (5, 4);

fn main() -> Result<()> {
    let config = EngineConfig::from_env();
    init_logging(&config)?;

    let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
    let width = (cols / DEFAULT_CELL_WIDTH).clamp(16, 120);
    let height = rows.saturating_sub(1).clamp(10, 50);

    let far = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => PixelBuffer::load_from_image(
            ImageSource::Path(path.as_path()),
            Some((width as u32, height as u32)),
            false,
        )?,
        None => sky(width, height),
    };

    let headless = config.headless;
    let mut engine = Engine::new(width, height, config)?;
    if !headless {
        engine = engine.with_input(TerminalInput::new()?);
    }

    engine.add(
        Entity::new("Far")
            .with_depth(-2)
            .with_frames(vec![far])
            .with_behavior(Scroll { every: 6, dx: -1 }),
    );
    engine.add(
        Entity::new("Near")
            .with_depth(-1)
            .with_frames(vec![hills(width, height)])
            .with_behavior(Scroll { every: 2, dx: -1 }),
    );

    let right = stretch_animation(&walk_cycle(), 3);
    let left = flip_animation(&right, Axis::X);
    engine.add(
        Entity::new("Walker")
            .with_position(2, height as i32 - WALKER_SIZE.1 as i32 - 1)
            .with_frames(right.clone())
            .with_behavior(Walker {
                right,
                left,
                facing_left: false,
            }),
    );

    engine.run()
}

fn sky(width: u16, height: u16) -> PixelBuffer {
    let mut buf = PixelBuffer::filled(width, height, Color::new(25, 25, 80));
    // sparse stars, repeating every 7 columns so the wrap-around is seamless
    for y in (1..height as i32).step_by(3) {
        for x in ((y * 5) % 7..width as i32).step_by(7) {
            let _ = buf.set(x, y, Cell::opaque(Color::new(25, 25, 80)).with_glyph('.'));
        }
    }
    buf
}

fn hills(width: u16, height: u16) -> PixelBuffer {
    let mut buf = PixelBuffer::new(width, height);
    let green = Color::new(40, 120, 50);
    for x in 0..width as i32 {
        let bump = ((x as f64 / 4.0).sin() * 2.0 + 3.0).round() as i32;
        for y in (height as i32 - bump)..height as i32 {
            let _ = buf.set_color(x, y, green);
        }
    }
    buf
}

/// Three frames of a tiny walking figure, facing right.
fn walk_cycle() -> Vec<PixelBuffer> {
    let body = Color::new(240, 200, 80);
    let legs = [[(1, 3), (3, 3)], [(2, 3), (2, 3)], [(0, 3), (4, 3)]];
    legs.iter()
        .map(|pair| {
            let (w, h) = WALKER_SIZE;
            let mut frame = PixelBuffer::new(w, h);
            for (x, y) in [(2, 0), (3, 0), (1, 1), (2, 1), (3, 1), (4, 1), (2, 2)] {
                let _ = frame.set_color(x, y, body);
            }
            for &(x, y) in pair {
                let _ = frame.set_color(x, y, body);
            }
            frame
        })
        .collect()
}

/// Circularly scrolls the only frame horizontally.
struct Scroll {
    every: u64,
    dx: i32,
}

impl EntityBehavior for Scroll {
    fn on_update(&mut self, entity: &mut Entity, frame: u64, _ctx: &mut Context) {
        if frame % self.every != 0 {
            return;
        }
        if let Some(current) = entity.active_frame() {
            let next = current.scroll(self.dx, 0);
            entity.set_frames(vec![next]);
        }
    }
}

struct Walker {
    right: Vec<PixelBuffer>,
    left: Vec<PixelBuffer>,
    facing_left: bool,
}

impl EntityBehavior for Walker {
    fn on_update(&mut self, entity: &mut Entity, _frame: u64, ctx: &mut Context) {
        let wants_left = ctx.is_pressed("left");
        let wants_right = ctx.is_pressed("right");

        if wants_left && !self.facing_left {
            self.facing_left = true;
            entity.set_frames(self.left.clone());
        } else if wants_right && self.facing_left {
            self.facing_left = false;
            entity.set_frames(self.right.clone());
        }

        let max_x = ctx.width() as i32 - entity.width() as i32;
        if wants_left {
            entity.x = (entity.x - 1).max(0);
        } else if wants_right {
            entity.x = (entity.x + 1).min(max_x);
        }
    }
}
