//! The frame scheduler.
//!
//! One call to [`Engine::tick`] is one frame:
//!
//! 1. poll input (may request a stop)
//! 2. with physics: `physics_per_frame` sub-steps, each stepping the world by
//!    `1 / (fps * physics_per_frame)` seconds and then running every entity's
//!    fixed update in priority order
//! 3. every entity's update in priority order
//! 4. unless headless: compose in depth order and present
//!
//! [`Engine::run`] repeats ticks with pacing until a stop is requested.

use std::fmt;

use anyhow::Result;

use crate::config::EngineConfig;
use crate::core::binding;
use crate::core::{
    Context, Diagnostic, Entity, EntityId, InputSource, PixelBuffer, SceneRegistry, SceneSnapshot,
    StopToken,
};
use crate::pacing::FramePacer;
use crate::physics::World;
use crate::term::{Compositor, TerminalRenderer};
use crate::types::ConfigError;

/// Lifecycle of an [`Engine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed, entities not started yet.
    Ready,
    /// Entities started, ticking.
    Running,
    /// Stopped; further ticks do nothing.
    Terminated,
}

pub struct Engine {
    config: EngineConfig,
    registry: SceneRegistry,
    ctx: Context,
    compositor: Compositor,
    renderer: Option<TerminalRenderer>,
    input: Option<Box<dyn InputSource>>,
    pacer: FramePacer,
    phase: Phase,
    frame: u64,
    /// Reused priority-order scratch.
    order: Vec<usize>,
}

impl Engine {
    /// An engine with a `width x height` cell display.
    ///
    /// Non-headless engines draw to stdout unless another renderer is set
    /// with [`Engine::with_renderer`].
    pub fn new(width: u16, height: u16, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let renderer = (!config.headless).then(TerminalRenderer::new);
        Ok(Self {
            registry: SceneRegistry::new(),
            ctx: Context::new(width, height, config.fps),
            compositor: Compositor::new(width, height),
            renderer,
            input: None,
            pacer: FramePacer::new(config.pacing, config.fps),
            phase: Phase::Ready,
            frame: 0,
            order: Vec::new(),
            config,
        })
    }

    /// Enable (or replace) physics. Every entity, registered now or later,
    /// gets a rigid body in `world`; plain entities are converted to static
    /// bodies.
    pub fn with_physics(mut self, world: World) -> Self {
        self.ctx.install_physics(world, &mut self.registry);
        self
    }

    pub fn with_input(mut self, input: impl InputSource + 'static) -> Self {
        self.input = Some(Box::new(input));
        self
    }

    pub fn with_renderer(mut self, renderer: TerminalRenderer) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of the next frame to run.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.ctx
    }

    pub fn stop_token(&self) -> StopToken {
        self.ctx.stop_token()
    }

    pub fn entities(&self) -> &SceneRegistry {
        &self.registry
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.registry.get(id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.registry.get_mut(id)
    }

    /// Entities by name in render order; an empty query returns all.
    pub fn lookup(&self, names: &[&str]) -> Vec<&Entity> {
        self.registry.lookup(names)
    }

    /// The display as of the last rendered frame.
    pub fn display(&self) -> &PixelBuffer {
        self.compositor.display()
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot::capture(self.frame, &self.registry)
    }

    /// Register an entity. Call between ticks.
    ///
    /// With physics enabled the entity's body is created now. Once the engine
    /// is running the entity is started immediately.
    pub fn add(&mut self, mut entity: Entity) -> EntityId {
        if let Some(world) = self.ctx.physics_mut() {
            if let Some(diagnostic) = binding::attach_entity(&mut entity, world) {
                self.ctx.report(diagnostic);
            }
        } else if entity.has_physics() {
            log::warn!(
                "{:?} asks for a rigid body but physics is not enabled; it will not move",
                entity.name()
            );
            self.ctx.report(Diagnostic::PhysicsUnavailable {
                name: entity.name().to_string(),
            });
        }

        let id = self.registry.add(entity);
        if self.phase == Phase::Running {
            if let Some(entity) = self.registry.get_mut(id) {
                entity.start(&mut self.ctx);
            }
        }
        id
    }

    /// Remove an entity and its rigid body. Call between ticks.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let entity = self.registry.remove(id)?;
        if let (Some(handle), Some(world)) = (entity.body_handle(), self.ctx.physics_mut()) {
            world.remove_body(handle);
        }
        log::debug!("removed {:?}", entity.name());
        Some(entity)
    }

    /// Move an entity to another depth. Call between ticks.
    pub fn set_depth(&mut self, id: EntityId, depth: i32) -> bool {
        self.registry.set_depth(id, depth)
    }

    /// Start every entity, in render order. Does nothing unless [`Phase::Ready`].
    pub fn start(&mut self) {
        if self.phase != Phase::Ready {
            return;
        }
        log::info!(
            "starting {} entities at {} fps (physics: {}, headless: {})",
            self.registry.len(),
            self.config.fps,
            self.ctx.has_physics(),
            self.config.headless
        );
        self.ctx.mark_started();
        for entity in self.registry.all_mut() {
            entity.start(&mut self.ctx);
        }
        self.phase = Phase::Running;
    }

    /// Run one frame. Starts the engine first if needed.
    ///
    /// A stop requested before the tick moves the engine to
    /// [`Phase::Terminated`] without running the frame.
    pub fn tick(&mut self) -> Result<()> {
        if self.phase == Phase::Ready {
            self.start();
        }
        if self.phase == Phase::Terminated {
            return Ok(());
        }
        if self.ctx.is_stop_requested() {
            log::info!("stop requested at frame {}", self.frame);
            self.phase = Phase::Terminated;
            return Ok(());
        }

        let frame = self.frame;
        self.ctx.begin_frame(frame);

        if let Some(input) = self.input.as_mut() {
            let stop = self.ctx.stop_token();
            input.poll(&mut self.ctx.keys, &stop)?;
        }

        if self.ctx.has_physics() {
            self.physics_substeps(frame);
        }

        self.registry.priority_order_into(&mut self.order);
        for &i in &self.order {
            if let Some(entity) = self.registry.at_mut(i) {
                entity.update(frame, &mut self.ctx);
            }
        }

        if self.config.headless {
            log::debug!("frame {frame}");
        } else {
            self.render()?;
        }

        self.frame += 1;
        Ok(())
    }

    fn physics_substeps(&mut self, frame: u64) {
        let dt = self.config.physics_dt();
        for _ in 0..self.config.physics_per_frame {
            if let Some(world) = self.ctx.physics_mut() {
                world.step(dt);
            }
            // Fixed updates may change priorities; re-sort every sub-step.
            self.registry.priority_order_into(&mut self.order);
            for &i in &self.order {
                if let Some(entity) = self.registry.at_mut(i) {
                    entity.fixed_update(frame, &mut self.ctx);
                }
            }
        }
    }

    fn render(&mut self) -> Result<()> {
        let display = self.compositor.compose(self.registry.all());
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.present(display)?;
        }
        Ok(())
    }

    /// Run until a stop is requested, then restore the terminal.
    pub fn run(&mut self) -> Result<()> {
        if let Some(size) = self.config.font_size {
            log::info!("recommended font size: {size}pt");
        }

        if let Some(renderer) = self.renderer.as_mut() {
            renderer.enter()?;
            renderer.clear_screen()?;
        }

        let result = self.run_inner();

        self.phase = Phase::Terminated;
        if let Some(renderer) = self.renderer.as_mut() {
            if let Err(err) = renderer.exit() {
                log::warn!("failed to restore terminal: {err:#}");
            }
        }
        log::info!("engine stopped after {} frames", self.frame);
        result
    }

    fn run_inner(&mut self) -> Result<()> {
        if self.config.wait_for_start {
            self.wait_for_start()?;
        }
        self.start();

        while self.phase == Phase::Running {
            self.tick()?;
            if self.phase == Phase::Running {
                self.pacer.pace();
            }
        }
        Ok(())
    }

    fn wait_for_start(&mut self) -> Result<()> {
        let mut prompt = format!("Press any key to start the game at {} fps.", self.config.fps);
        if let Some(size) = self.config.font_size {
            prompt.push_str(&format!(" Recommended font size is {size}pt..."));
        }
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.message(&prompt)?;
        }
        if let Some(input) = self.input.as_mut() {
            input.wait_for_key()?;
        }
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.clear_screen()?;
        }
        Ok(())
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("phase", &self.phase)
            .field("frame", &self.frame)
            .field("entities", &self.registry.len())
            .field("physics", &self.ctx.has_physics())
            .field("headless", &self.config.headless)
            .finish()
    }
}
