//! Render compositor: entities in depth order onto one display buffer.

use crate::core::{Entity, PixelBuffer};

#[derive(Debug, Clone)]
pub struct Compositor {
    display: PixelBuffer,
}

impl Compositor {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            display: PixelBuffer::new(width, height),
        }
    }

    pub fn display(&self) -> &PixelBuffer {
        &self.display
    }

    /// Repaint the display from scratch.
    ///
    /// `entities` must already be in render order; later entities paint over
    /// earlier ones. Entities without an active frame are skipped, and frames
    /// hanging off the display are clipped.
    pub fn compose<'a>(&mut self, entities: impl IntoIterator<Item = &'a Entity>) -> &PixelBuffer {
        self.display.clear();
        for entity in entities {
            if let Some(frame) = entity.active_frame() {
                self.display.compose_over(frame, entity.x, entity.y);
            }
        }
        &self.display
    }
}
