//! RGB output image
//!
//! Destination buffer for rendered region maps.

use crate::error::{Error, Result};
use crate::palette::Rgb;
use crate::raster::flat_index;

/// Owned RGB image, one [`Rgb`] per pixel in row-major order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    width: u32,
    height: u32,
    data: Vec<Rgb>,
}

impl RgbImage {
    /// Create a new black image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            data: vec![Rgb::default(); width as usize * height as usize],
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the color at (x, y), or `None` if out of bounds.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[flat_index(x, y, self.width)])
    }

    /// Get the color at a flat row-major index.
    pub fn get_index(&self, index: usize) -> Option<Rgb> {
        self.data.get(index).copied()
    }

    /// Set the color at a flat row-major index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index` is past the end.
    pub fn set_index(&mut self, index: usize, color: Rgb) -> Result<()> {
        let len = self.data.len();
        let slot = self
            .data
            .get_mut(index)
            .ok_or(Error::IndexOutOfBounds { index, len })?;
        *slot = color;
        Ok(())
    }

    /// Set the color at (x, y).
    pub fn set_rgb(&mut self, x: u32, y: u32, color: Rgb) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: flat_index(x, y, self.width),
                len: self.data.len(),
            });
        }
        self.set_index(flat_index(x, y, self.width), color)
    }

    /// Pixel colors in row-major order.
    pub fn pixels(&self) -> &[Rgb] {
        &self.data
    }

    /// Interleaved RGBA bytes with full opacity.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.data
            .iter()
            .flat_map(|c| [c.red, c.green, c.blue, 255])
            .collect()
    }
}
