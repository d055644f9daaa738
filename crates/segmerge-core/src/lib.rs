//! segmerge-core - Basic data structures for region segmentation
//!
//! This crate provides the containers shared across the segmerge workspace:
//!
//! - [`Raster`] - Read interface over a single-channel intensity buffer
//! - [`GrayImage`] - Owned 8-bit grayscale raster
//! - [`Rgb`] / [`Palette`] - Display colors for rendered region maps
//! - [`RgbImage`] - Owned RGB output buffer

pub mod error;
pub mod palette;
pub mod raster;
pub mod rgb_image;

pub use error::{Error, Result};
pub use palette::{Palette, Rgb};
pub use raster::{GrayImage, LUMA_BLUE, LUMA_GREEN, LUMA_RED, Raster, luma};
pub use rgb_image::RgbImage;
