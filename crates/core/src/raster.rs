//! Raster image loading into pixel buffers.
//!
//! Decoding and resizing go through the `image` crate. Alpha is binary here:
//! an alpha of 0 marks the cell transparent, anything else is fully opaque and
//! keeps the original RGB.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage, RgbaImage};
use thiserror::Error;

use crate::pixel::{Cell, PixelBuffer};
use crate::types::{BoundsError, Color, ConfigError};

#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("raw image data has {actual} bytes, expected {expected}")]
    DataLength { expected: usize, actual: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bounds(#[from] BoundsError),
}

/// Where to read an encoded image from.
#[derive(Debug, Clone, Copy)]
pub enum ImageSource<'a> {
    Path(&'a Path),
    Bytes(&'a [u8]),
}

impl<'a> From<&'a Path> for ImageSource<'a> {
    fn from(path: &'a Path) -> Self {
        ImageSource::Path(path)
    }
}

impl<'a> From<&'a [u8]> for ImageSource<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        ImageSource::Bytes(bytes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channels {
    Rgb,
    Rgba,
}

impl Channels {
    pub fn count(&self) -> usize {
        match self {
            Channels::Rgb => 3,
            Channels::Rgba => 4,
        }
    }
}

/// Decoded pixel array, row-major, 3 or 4 bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImage {
    width: u32,
    height: u32,
    channels: Channels,
    data: Vec<u8>,
}

impl RawImage {
    pub fn new(
        width: u32,
        height: u32,
        channels: Channels,
        data: Vec<u8>,
    ) -> Result<Self, ImageLoadError> {
        let expected = (width as usize) * (height as usize) * channels.count();
        if data.len() != expected {
            return Err(ImageLoadError::DataLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Decode an image, keeping the alpha channel only when `has_alpha`.
    pub fn load<'a>(
        source: impl Into<ImageSource<'a>>,
        has_alpha: bool,
    ) -> Result<Self, ImageLoadError> {
        let decoded = match source.into() {
            ImageSource::Path(path) => image::open(path)?,
            ImageSource::Bytes(bytes) => image::load_from_memory(bytes)?,
        };
        Ok(Self::from_dynamic(decoded, has_alpha))
    }

    fn from_dynamic(img: DynamicImage, has_alpha: bool) -> Self {
        if has_alpha {
            let rgba = img.to_rgba8();
            let (width, height) = rgba.dimensions();
            Self {
                width,
                height,
                channels: Channels::Rgba,
                data: rgba.into_raw(),
            }
        } else {
            let rgb = img.to_rgb8();
            let (width, height) = rgb.dimensions();
            Self {
                width,
                height,
                channels: Channels::Rgb,
                data: rgb.into_raw(),
            }
        }
    }

    /// Nearest-neighbour resize. Alpha values are never blended.
    pub fn resize(&self, width: u32, height: u32) -> Self {
        let dynamic = match self.channels {
            Channels::Rgb => RgbImage::from_raw(self.width, self.height, self.data.clone())
                .map(DynamicImage::ImageRgb8),
            Channels::Rgba => RgbaImage::from_raw(self.width, self.height, self.data.clone())
                .map(DynamicImage::ImageRgba8),
        };
        match dynamic {
            Some(img) => {
                let resized = DynamicImage::from(imageops::resize(
                    &img,
                    width,
                    height,
                    FilterType::Nearest,
                ));
                Self::from_dynamic(resized, self.channels == Channels::Rgba)
            }
            // Unreachable: `new`/`load` guarantee the data length.
            None => self.clone(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> Channels {
        self.channels
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Channel bytes of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let n = self.channels.count();
        let start = ((y as usize) * (self.width as usize) + x as usize) * n;
        Some(&self.data[start..start + n])
    }

    fn cell_at(&self, x: u32, y: u32) -> Cell {
        match self.pixel(x, y) {
            Some(px) => {
                let transparent = self.channels == Channels::Rgba && px[3] == 0;
                Cell {
                    transparent,
                    ..Cell::opaque(Color::new(px[0], px[1], px[2]))
                }
            }
            None => Cell::TRANSPARENT,
        }
    }
}

impl PixelBuffer {
    /// Paint raw image data at `(x, y)`, overwriting every covered cell.
    ///
    /// Fails with [`ConfigError::ImageTooLarge`] when the image does not fit.
    pub fn paint_image(&mut self, image: &RawImage, x: i32, y: i32) -> Result<(), ConfigError> {
        let fits = x >= 0
            && y >= 0
            && x as i64 + image.width as i64 <= self.width() as i64
            && y as i64 + image.height as i64 <= self.height() as i64;
        if !fits {
            return Err(ConfigError::ImageTooLarge {
                image_width: image.width,
                image_height: image.height,
                x,
                y,
                width: self.width(),
                height: self.height(),
            });
        }

        for iy in 0..image.height {
            for ix in 0..image.width {
                let cell = image.cell_at(ix, iy);
                // In range: checked by `fits` above.
                let _ = self.set(x + ix as i32, y + iy as i32, cell);
            }
        }
        Ok(())
    }

    /// A buffer exactly the size of `image`.
    pub fn from_raw(image: &RawImage) -> Result<Self, ImageLoadError> {
        let (width, height) = match (u16::try_from(image.width), u16::try_from(image.height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => {
                return Err(ConfigError::ImageTooLarge {
                    image_width: image.width,
                    image_height: image.height,
                    x: 0,
                    y: 0,
                    width: u16::MAX,
                    height: u16::MAX,
                }
                .into())
            }
        };
        let mut buf = PixelBuffer::new(width, height);
        buf.paint_image(image, 0, 0)?;
        Ok(buf)
    }

    /// Decode an image (optionally resized to `target_size`) into a new buffer.
    pub fn load_from_image<'a>(
        source: impl Into<ImageSource<'a>>,
        target_size: Option<(u32, u32)>,
        has_alpha: bool,
    ) -> Result<Self, ImageLoadError> {
        let mut image = RawImage::load(source, has_alpha)?;
        if let Some((w, h)) = target_size {
            image = image.resize(w, h);
        }
        log::debug!(
            "loaded image {}x{} (alpha: {})",
            image.width(),
            image.height(),
            has_alpha
        );
        Self::from_raw(&image)
    }
}
