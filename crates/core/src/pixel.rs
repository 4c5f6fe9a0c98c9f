//! Pixel buffers: 2D grids of colored, optionally transparent cells.
//!
//! Row-major, origin top-left. Direct access ([`PixelBuffer::get`],
//! [`PixelBuffer::set`]) is bounds-checked and fails with [`BoundsError`];
//! compositing ([`PixelBuffer::compose_over`]) clips silently instead. Scroll
//! backgrounds rely on the clipping, so the two contracts stay different.

use crate::types::{Axis, BoundsError, Color, DEFAULT_GLYPH};

/// A single pixel cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub color: Color,
    pub glyph: char,
    /// Transparent cells are skipped when composing.
    pub transparent: bool,
}

impl Cell {
    pub const TRANSPARENT: Cell = Cell {
        color: Color::BLACK,
        glyph: DEFAULT_GLYPH,
        transparent: true,
    };

    pub const fn opaque(color: Color) -> Self {
        Self {
            color,
            glyph: DEFAULT_GLYPH,
            transparent: false,
        }
    }

    pub const fn with_glyph(mut self, glyph: char) -> Self {
        self.glyph = glyph;
        self
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

/// Width x height grid of [`Cell`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl PixelBuffer {
    /// A fully transparent buffer.
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::TRANSPARENT; len],
        }
    }

    /// A fully opaque buffer of one color.
    pub fn filled(width: u16, height: u16, color: Color) -> Self {
        let mut buf = Self::new(width, height);
        buf.fill(color);
        buf
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells of row `y`, or `None` past the last row.
    pub fn row(&self, y: u16) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        let start = (y as usize) * (self.width as usize);
        Some(&self.cells[start..start + self.width as usize])
    }

    #[inline(always)]
    fn idx(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    fn bounds_error(&self, x: i32, y: i32) -> BoundsError {
        BoundsError {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Result<Cell, BoundsError> {
        self.idx(x as i64, y as i64)
            .map(|i| self.cells[i])
            .ok_or_else(|| self.bounds_error(x, y))
    }

    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> Result<(), BoundsError> {
        let i = self
            .idx(x as i64, y as i64)
            .ok_or_else(|| self.bounds_error(x, y))?;
        self.cells[i] = cell;
        Ok(())
    }

    /// Replace the color of a cell, keeping its glyph. The cell becomes opaque.
    pub fn set_color(&mut self, x: i32, y: i32, color: Color) -> Result<(), BoundsError> {
        let current = self.get(x, y)?;
        self.set(x, y, Cell::opaque(color).with_glyph(current.glyph))
    }

    /// Set every cell to an opaque cell of `color`.
    pub fn fill(&mut self, color: Color) {
        self.cells.fill(Cell::opaque(color));
    }

    /// Make every cell transparent again.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::TRANSPARENT);
    }

    /// Copy every non-transparent cell of `src` into `self` at the offset.
    ///
    /// Writes that land outside `self` are dropped; `src` is never modified.
    pub fn compose_over(&mut self, src: &PixelBuffer, offset_x: i32, offset_y: i32) {
        let (ox, oy) = (offset_x as i64, offset_y as i64);
        for sy in 0..src.height as i64 {
            let dy = sy + oy;
            if dy < 0 || dy >= self.height as i64 {
                continue;
            }
            for sx in 0..src.width as i64 {
                let cell = src.cells[(sy as usize) * (src.width as usize) + sx as usize];
                if cell.transparent {
                    continue;
                }
                if let Some(i) = self.idx(sx + ox, dy) {
                    self.cells[i] = cell;
                }
            }
        }
    }

    /// Circular shift by `dx` columns and `dy` rows.
    ///
    /// Cells pushed past one edge wrap around to the other, so
    /// `b.scroll(dx, dy).scroll(-dx, -dy) == b`.
    pub fn scroll(&self, dx: i32, dy: i32) -> PixelBuffer {
        if self.is_empty() {
            return self.clone();
        }
        let (w, h) = (self.width as i64, self.height as i64);
        let mut out = PixelBuffer::new(self.width, self.height);
        for y in 0..h {
            let sy = (y - dy as i64).rem_euclid(h);
            for x in 0..w {
                let sx = (x - dx as i64).rem_euclid(w);
                out.cells[(y * w + x) as usize] = self.cells[(sy * w + sx) as usize];
            }
        }
        out
    }

    /// Mirror along an axis: `X` reverses columns, `Y` reverses rows.
    pub fn flip(&self, axis: Axis) -> PixelBuffer {
        let mut out = self.clone();
        let w = self.width as usize;
        match axis {
            Axis::X => {
                for row in out.cells.chunks_mut(w.max(1)) {
                    row.reverse();
                }
            }
            Axis::Y => {
                for (y, row) in self.cells.chunks(w.max(1)).rev().enumerate() {
                    out.cells[y * w..(y + 1) * w].copy_from_slice(row);
                }
            }
        }
        out
    }
}
