//! Physics particles demo (default binary).
//!
//! Colored particles fall under gravity inside a walled box; every few seconds
//! a wave manager kicks all of them with random impulses. The background
//! slowly scrolls. Press `q` to quit.
//!
//! Configuration comes from `TERMGAME_*` environment variables. With
//! `TERMGAME_HEADLESS=1` the demo runs the number of frames given as the
//! first argument (default 100) and prints a JSON scene snapshot.

use anyhow::Result;
use glam::DVec2;

use termgame::core::{Context, Entity, EntityBehavior, PixelBuffer, SimpleRng};
use termgame::engine::{init_logging, Engine, EngineConfig};
use termgame::input::TerminalInput;
use termgame::physics::{Shape, World};
use termgame::types::{BodyKind, Color, DEFAULT_CELL_WIDTH};

const PARTICLES: usize = 12;
const WAVE_EVERY: u64 = 40;
const WAVE_STATE_KEY: &str = "wave_frame";
const WALL: u16 = 1;

fn main() -> Result<()> {
    let config = EngineConfig::from_env();
    init_logging(&config)?;

    let (width, height) = if config.headless {
        (40, 20)
    } else {
        display_size()
    };
    let headless = config.headless;
    let max_frames: u64 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(100);

    let mut engine = Engine::new(width, height, config)?.with_physics(World::default());
    if !headless {
        engine = engine.with_input(TerminalInput::new()?);
    }

    engine.add(
        Entity::new("Background")
            .with_depth(-1)
            .with_frames(vec![gradient(width, height)])
            .with_behavior(Scroller),
    );
    for wall in walls(width, height) {
        engine.add(wall);
    }

    let mut rng = SimpleRng::from_time();
    for i in 0..PARTICLES {
        let x = rng.range_i32(WALL as i32 + 1, width as i32 - 3);
        let y = rng.range_i32(WALL as i32 + 1, height as i32 / 2);
        engine.add(particle(i, x, y, &mut rng));
    }
    engine.add(
        Entity::new("WaveManager")
            .with_priority(-1)
            .with_behavior(WaveManager { stop_after: headless.then_some(max_frames) }),
    );

    engine.run()?;

    if headless {
        println!("{}", engine.snapshot().to_json()?);
    }
    Ok(())
}

/// Display size in cells that fits the current terminal.
fn display_size() -> (u16, u16) {
    let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
    ((cols / DEFAULT_CELL_WIDTH).max(8), rows.saturating_sub(1).max(8))
}

fn gradient(width: u16, height: u16) -> PixelBuffer {
    let mut buf = PixelBuffer::new(width, height);
    for y in 0..height as i32 {
        let shade = (20 + y * 120 / height.max(1) as i32) as u8;
        for x in 0..width as i32 {
            let _ = buf.set_color(x, y, Color::new(0, shade / 3, shade));
        }
    }
    buf
}

fn walls(width: u16, height: u16) -> Vec<Entity> {
    let gray = Color::new(128, 128, 128);
    let specs = [
        ("Wall", 0, 0, width, WALL),
        ("Wall", 0, height as i32 - WALL as i32, width, WALL),
        ("Wall", 0, 0, WALL, height),
        ("Wall", width as i32 - WALL as i32, 0, WALL, height),
    ];
    specs
        .into_iter()
        .map(|(name, x, y, w, h)| {
            Entity::new(name)
                .with_position(x, y)
                .with_frames(vec![PixelBuffer::filled(w, h, gray)])
                .with_physics(BodyKind::Static)
                .with_behavior(Solid { elasticity: 0.9 })
        })
        .collect()
}

fn particle(i: usize, x: i32, y: i32, rng: &mut SimpleRng) -> Entity {
    let palette = [
        Color::new(230, 57, 70),
        Color::new(241, 250, 238),
        Color::new(168, 218, 220),
        Color::new(255, 183, 3),
        Color::new(131, 56, 236),
    ];
    let color = rng.choose(&palette).copied().unwrap_or(Color::WHITE);
    Entity::new(format!("Particle {i}"))
        .with_position(x, y)
        .with_frames(vec![PixelBuffer::filled(1, 1, color)])
        .with_max_velocity(40.0)
        .with_behavior(Particle {
            rng: SimpleRng::new(rng.next_u32()),
            last_wave: None,
        })
}

/// Scrolls its only frame up by one row every 10 frames.
struct Scroller;

impl EntityBehavior for Scroller {
    fn on_update(&mut self, entity: &mut Entity, frame: u64, _ctx: &mut Context) {
        if frame % 10 == 0 {
            if let Some(current) = entity.active_frame() {
                let scrolled = current.scroll(0, -1);
                entity.set_frames(vec![scrolled]);
            }
        }
    }
}

/// Gives a static body its bounding-box shape.
struct Solid {
    elasticity: f64,
}

impl EntityBehavior for Solid {
    fn on_start(&mut self, entity: &mut Entity, ctx: &mut Context) {
        let (w, h) = (entity.width() as f64, entity.height() as f64);
        if let (Some(handle), Some(world)) = (entity.body_handle(), ctx.physics_mut()) {
            if let Some(body) = world.body_mut(handle) {
                body.attach_shape(Shape::bounding_box(w, h).with_elasticity(self.elasticity));
            }
        }
    }
}

/// Publishes the frame of each impulse wave in the shared state.
struct WaveManager {
    stop_after: Option<u64>,
}

impl EntityBehavior for WaveManager {
    fn on_update(&mut self, _entity: &mut Entity, frame: u64, ctx: &mut Context) {
        if frame % WAVE_EVERY == 0 {
            log::info!("impulse wave at frame {frame}");
            ctx.state.insert(WAVE_STATE_KEY.to_string(), (frame + 1).into());
        }
        if self.stop_after.is_some_and(|n| frame + 1 >= n) {
            ctx.request_stop();
        }
    }
}

struct Particle {
    rng: SimpleRng,
    last_wave: Option<u64>,
}

impl EntityBehavior for Particle {
    fn on_start(&mut self, entity: &mut Entity, ctx: &mut Context) {
        let Some(handle) = entity.body_handle() else {
            return;
        };
        if let Some(body) = ctx.physics_mut().and_then(|w| w.body_mut(handle)) {
            body.attach_shape(Shape::bounding_box(1.0, 1.0).with_mass(1.0).with_elasticity(0.9));
        }
    }

    fn on_fixed_update(&mut self, entity: &mut Entity, frame: u64, ctx: &mut Context) {
        let wave = ctx.state.get(WAVE_STATE_KEY).and_then(|v| v.as_u64());
        let kick = wave == Some(frame) && self.last_wave != wave;
        if kick {
            self.last_wave = wave;
        }

        let (max_x, max_y) = (
            (ctx.width() - WALL - 1) as f64,
            (ctx.height() - WALL - 1) as f64,
        );
        let min = WALL as f64;
        let impulse = DVec2::new(self.rng.range_f64(-30.0, 30.0), self.rng.range_f64(-60.0, -20.0));

        let Some(handle) = entity.body_handle() else {
            return;
        };
        let Some(body) = ctx.physics_mut().and_then(|w| w.body_mut(handle)) else {
            return;
        };
        if kick {
            body.apply_impulse(impulse);
        }

        // Bounce off the walls.
        let mut position = body.position();
        let mut velocity = body.velocity();
        if position.x < min || position.x > max_x {
            velocity.x = -velocity.x * 0.9;
            position.x = position.x.clamp(min, max_x);
        }
        if position.y < min || position.y > max_y {
            velocity.y = -velocity.y * 0.9;
            position.y = position.y.clamp(min, max_y);
        }
        body.set_position(position);
        body.set_velocity(velocity);
    }
}
