//! Animation sequences driven by the global frame counter.

use crate::pixel::PixelBuffer;
use crate::types::Axis;

/// Ordered frames plus the index of the active one.
///
/// The active index is derived from the global frame number modulo the frame
/// count, so animations loop and stay in lockstep with the engine clock. An
/// empty sequence never has an active frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimationSequence {
    frames: Vec<PixelBuffer>,
    active: Option<usize>,
}

impl AnimationSequence {
    pub fn new(frames: Vec<PixelBuffer>) -> Self {
        Self {
            frames,
            active: None,
        }
    }

    /// Select frame 0 (no-op when empty).
    pub fn start(&mut self) {
        if !self.frames.is_empty() {
            self.active = Some(0);
        }
    }

    /// Select `frame_number % len` (no-op when empty).
    pub fn advance(&mut self, frame_number: u64) {
        let len = self.frames.len() as u64;
        if len > 0 {
            self.active = Some((frame_number % len) as usize);
        }
    }

    /// Swap in a new frame list and restart at frame 0.
    pub fn replace(&mut self, frames: Vec<PixelBuffer>) {
        self.frames = frames;
        self.active = None;
        self.start();
    }

    pub fn active_frame(&self) -> Option<&PixelBuffer> {
        self.active.and_then(|i| self.frames.get(i))
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn frames(&self) -> &[PixelBuffer] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Repeat every frame `stretch` times, slowing the animation down.
pub fn stretch_animation(frames: &[PixelBuffer], stretch: usize) -> Vec<PixelBuffer> {
    frames
        .iter()
        .flat_map(|f| std::iter::repeat(f).take(stretch))
        .cloned()
        .collect()
}

/// Mirror every frame along `axis`.
pub fn flip_animation(frames: &[PixelBuffer], axis: Axis) -> Vec<PixelBuffer> {
    frames.iter().map(|f| f.flip(axis)).collect()
}
