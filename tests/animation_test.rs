//! Animation sequences as seen through entity lifecycle calls.

use termgame::core::{flip_animation, stretch_animation, Context, Entity, PixelBuffer};
use termgame::types::{Axis, Color};

fn frame(tag: u8) -> PixelBuffer {
    PixelBuffer::filled(1, 1, Color::new(tag, 0, 0))
}

fn tag(entity: &Entity) -> Option<u8> {
    entity
        .active_frame()
        .map(|f| f.get(0, 0).unwrap().color.r)
}

#[test]
fn test_two_frames_alternate_with_frame_number() {
    let mut ctx = Context::new(10, 10, 10);
    let mut e = Entity::new("blinker").with_frames(vec![frame(b'A'), frame(b'B')]);

    assert_eq!(tag(&e), None);
    e.start(&mut ctx);

    let mut seen = Vec::new();
    for n in 0..4 {
        e.update(n, &mut ctx);
        seen.push(tag(&e).unwrap());
    }
    assert_eq!(seen, vec![b'A', b'B', b'A', b'B']);
}

#[test]
fn test_empty_animation_never_has_active_frame() {
    let mut ctx = Context::new(10, 10, 10);
    let mut e = Entity::new("ghost");
    e.start(&mut ctx);
    e.update(7, &mut ctx);
    assert!(e.active_frame().is_none());
    assert_eq!((e.width(), e.height()), (0, 0));
}

#[test]
fn test_replace_restarts_at_first_frame() {
    let mut ctx = Context::new(10, 10, 10);
    let mut e = Entity::new("bg").with_frames(vec![frame(1), frame(2), frame(3)]);
    e.start(&mut ctx);
    e.update(2, &mut ctx);
    assert_eq!(tag(&e), Some(3));

    e.set_frames(vec![frame(9), frame(8)]);
    assert_eq!(tag(&e), Some(9));
    assert_eq!(e.animation().active_index(), Some(0));
}

#[test]
fn test_stretch_and_flip_helpers() {
    let frames = vec![frame(1), frame(2)];
    let slow = stretch_animation(&frames, 3);
    let tags: Vec<u8> = slow.iter().map(|f| f.get(0, 0).unwrap().color.r).collect();
    assert_eq!(tags, vec![1, 1, 1, 2, 2, 2]);

    let mut wide = PixelBuffer::new(2, 1);
    wide.set_color(0, 0, Color::WHITE).unwrap();
    let flipped = flip_animation(&[wide], Axis::X);
    assert!(flipped[0].get(0, 0).unwrap().transparent);
    assert!(!flipped[0].get(1, 0).unwrap().transparent);
}
