//! Pixel buffer contracts: bounds, compositing, scroll and flip.

use termgame::core::{Cell, PixelBuffer};
use termgame::types::{Axis, BoundsError, Color};

fn gradient(width: u16, height: u16) -> PixelBuffer {
    let mut buf = PixelBuffer::new(width, height);
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            buf.set_color(x, y, Color::new(x as u8 * 10, y as u8 * 10, 7))
                .unwrap();
        }
    }
    buf
}

#[test]
fn test_new_buffer_is_transparent() {
    let buf = PixelBuffer::new(3, 2);
    assert_eq!(buf.cells().len(), 6);
    assert!(buf.cells().iter().all(|c| c.transparent));
}

#[test]
fn test_out_of_bounds_access_fails() {
    let mut buf = PixelBuffer::new(3, 2);
    let err = buf.set(3, 0, Cell::opaque(Color::WHITE)).unwrap_err();
    assert_eq!(
        err,
        BoundsError {
            x: 3,
            y: 0,
            width: 3,
            height: 2
        }
    );
    assert!(buf.set(-1, 0, Cell::opaque(Color::WHITE)).is_err());
    assert!(buf.get(0, 2).is_err());
    assert!(buf.set_color(0, 5, Color::WHITE).is_err());
    // no partial write happened
    assert!(buf.cells().iter().all(|c| c.transparent));
}

#[test]
fn test_fill_clears_transparency() {
    let mut buf = PixelBuffer::new(2, 2);
    buf.fill(Color::new(1, 2, 3));
    assert!(buf
        .cells()
        .iter()
        .all(|c| !c.transparent && c.color == Color::new(1, 2, 3)));
}

#[test]
fn test_compose_single_opaque_cell() {
    let mut dest = PixelBuffer::filled(4, 4, Color::BLACK);
    let before = dest.clone();
    let src = PixelBuffer::filled(1, 1, Color::WHITE);
    let src_before = src.clone();

    dest.compose_over(&src, 2, 1);

    assert_eq!(src, src_before);
    let changed: Vec<(i32, i32)> = (0..4)
        .flat_map(|y| (0..4).map(move |x| (x, y)))
        .filter(|&(x, y)| dest.get(x, y).unwrap() != before.get(x, y).unwrap())
        .collect();
    assert_eq!(changed, vec![(2, 1)]);
}

#[test]
fn test_compose_skips_transparent_cells() {
    let mut dest = PixelBuffer::filled(2, 1, Color::BLACK);
    let mut src = PixelBuffer::new(2, 1);
    src.set(1, 0, Cell::opaque(Color::WHITE)).unwrap();

    dest.compose_over(&src, 0, 0);
    assert_eq!(dest.get(0, 0).unwrap(), Cell::opaque(Color::BLACK));
    assert_eq!(dest.get(1, 0).unwrap(), Cell::opaque(Color::WHITE));
}

#[test]
fn test_compose_clips_silently() {
    let mut dest = PixelBuffer::new(3, 3);
    let src = PixelBuffer::filled(2, 2, Color::WHITE);

    dest.compose_over(&src, 2, 2);
    dest.compose_over(&src, -1, -1);
    dest.compose_over(&src, 100, -100);

    let opaque: Vec<(i32, i32)> = (0..3)
        .flat_map(|y| (0..3).map(move |x| (x, y)))
        .filter(|&(x, y)| !dest.get(x, y).unwrap().transparent)
        .collect();
    assert_eq!(opaque, vec![(0, 0), (2, 2)]);
}

#[test]
fn test_scroll_wraps_around() {
    let buf = gradient(4, 3);
    let scrolled = buf.scroll(1, 0);
    // column 0 now holds what was the last column
    assert_eq!(scrolled.get(0, 0).unwrap(), buf.get(3, 0).unwrap());
    assert_eq!(scrolled.get(1, 2).unwrap(), buf.get(0, 2).unwrap());

    let up = buf.scroll(0, -1);
    assert_eq!(up.get(0, 0).unwrap(), buf.get(0, 1).unwrap());
    assert_eq!(up.get(0, 2).unwrap(), buf.get(0, 0).unwrap());
}

#[test]
fn test_scroll_is_invertible() {
    let buf = gradient(5, 4);
    for (dx, dy) in [(0, 0), (1, 0), (-2, 3), (7, -9), (5, 4)] {
        assert_eq!(buf.scroll(dx, dy).scroll(-dx, -dy), buf, "dx={dx} dy={dy}");
    }
}

#[test]
fn test_flip_axes() {
    let buf = gradient(3, 2);
    let fx = buf.flip(Axis::X);
    assert_eq!(fx.get(0, 0).unwrap(), buf.get(2, 0).unwrap());
    assert_eq!(fx.get(2, 1).unwrap(), buf.get(0, 1).unwrap());

    let fy = buf.flip(Axis::Y);
    assert_eq!(fy.get(1, 0).unwrap(), buf.get(1, 1).unwrap());

    assert_eq!(fx.flip(Axis::X), buf);
    assert_eq!(fy.flip(Axis::Y), buf);
}

#[test]
fn test_axis_parsing() {
    assert_eq!("x".parse::<Axis>().unwrap(), Axis::X);
    assert_eq!("vertical".parse::<Axis>().unwrap(), Axis::Y);
    assert!("z".parse::<Axis>().is_err());
}
