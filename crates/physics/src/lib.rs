//! Rigid-body collaborator for the engine.
//!
//! The engine treats physics as an opaque library: it creates bodies, attaches
//! shapes, installs a velocity hook, calls [`World::step`] and reads positions
//! back. This crate provides that surface with a small integrator:
//!
//! - **Bodies** are static or dynamic, with a continuous position and velocity.
//! - **Shapes** (convex polygons and circles) carry mass and elasticity. A
//!   body's mass is the sum of its shapes' masses.
//! - **Stepping** integrates gravity, accumulated forces and damping with
//!   semi-implicit Euler, then runs the body's velocity hook, then moves it.
//!
//! Collision detection and response are not performed.
//!
//! # Example
//!
//! ```
//! use glam::DVec2;
//! use termgame_physics::{Shape, World};
//! use termgame_types::BodyKind;
//!
//! let mut world = World::new(DVec2::new(0.0, 10.0));
//! let ball = world.add_body(BodyKind::Dynamic, DVec2::ZERO);
//! world.body_mut(ball).unwrap().attach_shape(Shape::circle(1.0).with_mass(1.0));
//!
//! world.step(0.5);
//! let body = world.body(ball).unwrap();
//! assert!(body.position().y > 0.0);
//! ```

pub mod body;
pub mod shape;
pub mod world;

pub use termgame_types as types;

pub use body::{limit_velocity, Body, BodyHandle, VelocityHook};
pub use shape::{Geometry, Shape};
pub use world::World;
