//! Physics entities inside a running engine: sync, clamping, hazards.

use glam::DVec2;

use termgame::core::{Diagnostic, Entity, EntityId, PixelBuffer};
use termgame::engine::{Engine, EngineConfig};
use termgame::physics::{Shape, World};
use termgame::types::{BodyKind, Color};

fn engine(width: u16, height: u16) -> Engine {
    let config = EngineConfig::default()
        .with_headless(true)
        .with_physics_per_frame(1);
    Engine::new(width, height, config)
        .unwrap()
        .with_physics(World::new(DVec2::ZERO))
}

fn sprite(w: u16, h: u16) -> Vec<PixelBuffer> {
    vec![PixelBuffer::filled(w, h, Color::WHITE)]
}

fn place_body(engine: &mut Engine, id: EntityId, position: DVec2) {
    let handle = engine.entity(id).unwrap().body_handle().unwrap();
    let body = engine
        .context_mut()
        .physics_mut()
        .unwrap()
        .body_mut(handle)
        .unwrap();
    body.set_position(position);
    body.attach_shape(Shape::bounding_box(1.0, 1.0).with_mass(1.0));
}

#[test]
fn test_body_position_is_rounded_into_cells() {
    let mut engine = engine(40, 40);
    let id = engine.add(
        Entity::new("ball")
            .with_frames(sprite(1, 1))
            .with_physics(BodyKind::Dynamic),
    );
    place_body(&mut engine, id, DVec2::new(5.6, 9.4));
    engine.tick().unwrap();
    let ball = engine.entity(id).unwrap();
    assert_eq!((ball.x, ball.y), (6, 9));
}

#[test]
fn test_non_finite_position_keeps_last_cell() {
    let mut engine = engine(40, 40);
    let id = engine.add(
        Entity::new("ball")
            .with_position(3, 4)
            .with_frames(sprite(1, 1))
            .with_physics(BodyKind::Dynamic),
    );
    place_body(&mut engine, id, DVec2::new(7.0, 8.0));
    engine.tick().unwrap();
    assert_eq!(engine.entity(id).map(|e| (e.x, e.y)), Some((7, 8)));

    place_body(&mut engine, id, DVec2::new(f64::NAN, 2.0));
    engine.tick().unwrap();
    assert_eq!(engine.entity(id).map(|e| (e.x, e.y)), Some((7, 8)));
    assert!(engine
        .context()
        .diagnostics()
        .contains(&Diagnostic::NonFinitePosition {
            name: "ball".to_string()
        }));
}

#[test]
fn test_footprint_is_clamped_to_screen() {
    let mut engine = engine(20, 20);
    let id = engine.add(
        Entity::new("plank")
            .with_frames(sprite(10, 1))
            .with_physics(BodyKind::Dynamic),
    );
    place_body(&mut engine, id, DVec2::new(15.0, 25.0));
    engine.tick().unwrap();
    let plank = engine.entity(id).unwrap();
    assert_eq!((plank.x, plank.y), (10, 19));

    place_body(&mut engine, id, DVec2::new(-4.0, -1.0));
    engine.tick().unwrap();
    let plank = engine.entity(id).unwrap();
    assert_eq!((plank.x, plank.y), (0, 0));
}

#[test]
fn test_plain_entity_is_converted_to_static_body() {
    let mut engine = engine(20, 20);
    let id = engine.add(
        Entity::new("crate")
            .with_position(4, 5)
            .with_frames(sprite(3, 2)),
    );
    assert_eq!(
        engine.context().diagnostics(),
        [Diagnostic::ConvertedToStatic {
            name: "crate".to_string()
        }]
    );

    let handle = engine.entity(id).unwrap().body_handle().unwrap();
    let body = engine.context().physics().unwrap().body(handle).unwrap();
    assert_eq!(body.kind(), BodyKind::Static);
    assert_eq!(body.position(), DVec2::new(4.0, 5.0));
    assert_eq!(body.shapes()[0].bounds(), (DVec2::ZERO, DVec2::new(3.0, 2.0)));

    engine.tick().unwrap();
    let converted = engine.entity(id).unwrap();
    assert_eq!((converted.x, converted.y), (4, 5));
}

#[test]
fn test_missing_shapes_are_a_warning_not_an_error() {
    let mut engine = engine(20, 20);
    engine.add(
        Entity::new("bare")
            .with_frames(sprite(1, 1))
            .with_physics(BodyKind::Dynamic),
    );
    engine.tick().unwrap();
    assert!(engine
        .context()
        .diagnostics()
        .contains(&Diagnostic::NoShapes {
            name: "bare".to_string()
        }));
    assert_eq!(engine.frame(), 1);
}

#[test]
fn test_velocity_cap_preserves_direction() {
    let config = EngineConfig::default()
        .with_headless(true)
        .with_fps(10)
        .with_physics_per_frame(5);
    let mut engine = Engine::new(200, 200, config)
        .unwrap()
        .with_physics(World::new(DVec2::ZERO));
    let id = engine.add(
        Entity::new("rocket")
            .with_position(100, 100)
            .with_frames(sprite(1, 1))
            .with_max_velocity(5.0),
    );
    let handle = engine.entity(id).unwrap().body_handle().unwrap();
    {
        let body = engine
            .context_mut()
            .physics_mut()
            .unwrap()
            .body_mut(handle)
            .unwrap();
        body.attach_shape(Shape::circle(0.5).with_mass(1.0));
        body.set_velocity(DVec2::new(30.0, 40.0));
    }
    engine.tick().unwrap();

    let body = engine.context().physics().unwrap().body(handle).unwrap();
    let v = body.velocity();
    assert!((v.length() - 5.0).abs() < 1e-9);
    assert!((v.x / v.y - 0.75).abs() < 1e-9);
    // one frame at 5 cells/s is half a cell
    assert!((body.position() - DVec2::new(100.3, 100.4)).length() < 1e-9);
}

#[test]
fn test_replacing_the_world_rebinds_existing_bodies() {
    let mut engine = engine(40, 40);
    let id = engine.add(
        Entity::new("ball")
            .with_frames(sprite(1, 1))
            .with_physics(BodyKind::Dynamic),
    );

    let mut engine = engine.with_physics(World::new(DVec2::new(0.0, 100.0)));
    let handle = engine.entity(id).unwrap().body_handle().unwrap();
    let world = engine.context().physics().unwrap();
    assert_eq!(world.body_count(), 1);
    assert_eq!(world.body(handle).unwrap().kind(), BodyKind::Dynamic);

    // dt = 0.1: velocity 10 then 20, position 1 then 3
    engine.tick().unwrap();
    engine.tick().unwrap();
    assert_eq!((engine.entity(id).unwrap().x, engine.entity(id).unwrap().y), (0, 3));
}

#[test]
fn test_enabling_physics_converts_entities_added_before() {
    let config = EngineConfig::default().with_headless(true);
    let mut engine = Engine::new(20, 20, config).unwrap();
    let id = engine.add(Entity::new("wall").with_position(4, 5).with_frames(sprite(3, 2)));
    assert!(!engine.entity(id).unwrap().has_physics());

    let engine = engine.with_physics(World::new(DVec2::ZERO));
    let wall = engine.entity(id).unwrap();
    assert!(wall.has_physics());
    let body = engine
        .context()
        .physics()
        .unwrap()
        .body(wall.body_handle().unwrap())
        .unwrap();
    assert_eq!(body.kind(), BodyKind::Static);
    assert_eq!(body.position(), DVec2::new(4.0, 5.0));
    assert_eq!(body.shapes().len(), 1);
    assert!(engine
        .context()
        .diagnostics()
        .contains(&Diagnostic::ConvertedToStatic {
            name: "wall".to_string()
        }));
}

#[test]
fn test_missing_body_is_reported() {
    let mut engine = engine(20, 20);
    let id = engine.add(
        Entity::new("ghost")
            .with_position(6, 7)
            .with_frames(sprite(1, 1))
            .with_physics(BodyKind::Dynamic),
    );
    let handle = engine.entity(id).unwrap().body_handle().unwrap();
    engine
        .context_mut()
        .physics_mut()
        .unwrap()
        .remove_body(handle);

    engine.tick().unwrap();
    assert!(engine
        .context()
        .diagnostics()
        .contains(&Diagnostic::MissingBody {
            name: "ghost".to_string()
        }));
    let ghost = engine.entity(id).unwrap();
    assert_eq!((ghost.x, ghost.y), (6, 7));
}
