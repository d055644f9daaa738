//! Raster access - single-channel intensity images
//!
//! The region engine reads pixels only through the [`Raster`] trait, so any
//! buffer that can report its dimensions and an 8-bit intensity per pixel can
//! be segmented. [`GrayImage`] is the owned implementation used by the rest
//! of the workspace.
//!
//! # Pixel layout
//!
//! - Pixels are addressed by a flat, row-major index: `index = x + y * width`
//! - Each pixel is one `u8` intensity in `[0, 255]`

use crate::error::{Error, Result};

/// Rec. 709 luma weights used when collapsing RGB to a single channel.
pub const LUMA_RED: f32 = 0.2126;
pub const LUMA_GREEN: f32 = 0.7152;
pub const LUMA_BLUE: f32 = 0.0722;

/// Read interface over a flat, single-channel raster.
pub trait Raster {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Intensity of the pixel at a flat row-major index.
    ///
    /// # Panics
    ///
    /// Implementations may panic if `index >= pixel_count()`.
    fn intensity(&self, index: usize) -> u8;

    /// Total number of pixels (`width * height`).
    fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }
}

/// Convert one RGB triple to its luma value.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    quantize(LUMA_RED * r as f32 + LUMA_GREEN * g as f32 + LUMA_BLUE * b as f32)
}

/// Clamp to `[0, 255]` and round half to even, as a clamped byte array does.
#[inline]
fn quantize(value: f32) -> u8 {
    value.clamp(0.0, 255.0).round_ties_even() as u8
}

/// Flat row-major index of `(x, y)`, computed in `usize`.
#[inline]
pub(crate) fn flat_index(x: u32, y: u32, width: u32) -> usize {
    x as usize + y as usize * width as usize
}

/// Owned 8-bit grayscale image
///
/// # Examples
///
/// ```
/// use segmerge_core::{GrayImage, Raster};
///
/// let mut img = GrayImage::new(4, 3).unwrap();
/// img.set_pixel(1, 2, 200).unwrap();
/// assert_eq!(img.intensity(1 + 2 * 4), 200);
/// assert_eq!(img.pixel_count(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl GrayImage {
    /// Create a new image filled with zeros.
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
            data: vec![0; width as usize * height as usize],
        })
    }

    /// Wrap an existing row-major buffer.
    ///
    /// Only the buffer length is validated; a 0x0 image is accepted so that
    /// downstream consumers can decide how to treat it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataLengthMismatch`] if `data.len() != width * height`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::DataLengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a grayscale image from interleaved RGBA bytes.
    ///
    /// Alpha is ignored.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<Self> {
        Self::from_interleaved(width, height, rgba, 4)
    }

    /// Build a grayscale image from interleaved RGB bytes.
    pub fn from_rgb(width: u32, height: u32, rgb: &[u8]) -> Result<Self> {
        Self::from_interleaved(width, height, rgb, 3)
    }

    fn from_interleaved(width: u32, height: u32, bytes: &[u8], channels: usize) -> Result<Self> {
        let expected = width as usize * height as usize * channels;
        if bytes.len() != expected {
            return Err(Error::DataLengthMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        let data = bytes
            .chunks_exact(channels)
            .map(|px| luma(px[0], px[1], px[2]))
            .collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[flat_index(x, y, self.width)])
    }

    /// Set a pixel value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, value: u8) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: flat_index(x, y, self.width),
                len: self.data.len(),
            });
        }
        self.data[flat_index(x, y, self.width)] = value;
        Ok(())
    }

    /// Raw row-major pixel data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl Raster for GrayImage {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn intensity(&self, index: usize) -> u8 {
        self.data[index]
    }
}
