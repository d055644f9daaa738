//! segmerge-test - Regression test framework for segmerge
//!
//! Provides [`RegParams`], a small bookkeeping helper that numbers each
//! comparison and reports all failures at the end of a test, plus a set of
//! synthetic rasters with known structure.
//!
//! # Usage
//!
//! ```ignore
//! use segmerge_test::{RegParams, two_tone};
//!
//! let mut rp = RegParams::new("grow");
//! rp.compare_values(2.0, regions.len() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" (default) or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use segmerge_core::GrayImage;

/// Build a raster from a row-major list of intensities.
pub fn raster_from_rows(width: u32, height: u32, values: &[u8]) -> TestResult<GrayImage> {
    Ok(GrayImage::from_raw(width, height, values.to_vec())?)
}

/// Raster split vertically at `split_x` into a `left` and a `right` tone.
pub fn two_tone(
    width: u32,
    height: u32,
    split_x: u32,
    left: u8,
    right: u8,
) -> TestResult<GrayImage> {
    if split_x > width {
        return Err(TestError::Fixture {
            name: "two_tone".to_string(),
            message: format!("split {} beyond width {}", split_x, width),
        });
    }
    let mut img = GrayImage::new(width, height)?;
    for y in 0..height {
        for x in 0..width {
            img.set_pixel(x, y, if x < split_x { left } else { right })?;
        }
    }
    Ok(img)
}

/// Checkerboard of `cell`-sized squares alternating `dark` and `light`.
pub fn checkerboard(
    width: u32,
    height: u32,
    cell: u32,
    dark: u8,
    light: u8,
) -> TestResult<GrayImage> {
    if cell == 0 {
        return Err(TestError::Fixture {
            name: "checkerboard".to_string(),
            message: "cell size must be positive".to_string(),
        });
    }
    let mut img = GrayImage::new(width, height)?;
    for y in 0..height {
        for x in 0..width {
            let dark_cell = ((x / cell) + (y / cell)) % 2 == 0;
            img.set_pixel(x, y, if dark_cell { dark } else { light })?;
        }
    }
    Ok(img)
}

/// Horizontal ramp rising by `step` per column, saturating at 255.
pub fn horizontal_ramp(width: u32, height: u32, step: u8) -> TestResult<GrayImage> {
    let mut img = GrayImage::new(width, height)?;
    for y in 0..height {
        for x in 0..width {
            let value = (x as u64 * step as u64).min(255) as u8;
            img.set_pixel(x, y, value)?;
        }
    }
    Ok(img)
}

/// Uniform random noise, reproducible from `seed`.
pub fn noise(width: u32, height: u32, seed: u64) -> TestResult<GrayImage> {
    let mut rng = StdRng::seed_from_u64(seed);
    let data = (0..width as usize * height as usize)
        .map(|_| rng.random_range(0..=255u8))
        .collect();
    Ok(GrayImage::from_raw(width, height, data)?)
}

/// Random blocky image: `block`-sized tiles, each with a random base tone
/// plus small per-pixel jitter.
pub fn noisy_blocks(
    width: u32,
    height: u32,
    block: u32,
    jitter: u8,
    seed: u64,
) -> TestResult<GrayImage> {
    if block == 0 {
        return Err(TestError::Fixture {
            name: "noisy_blocks".to_string(),
            message: "block size must be positive".to_string(),
        });
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let bx = width.div_ceil(block) as usize;
    let by = height.div_ceil(block) as usize;
    let bases: Vec<u8> = (0..bx * by).map(|_| rng.random_range(0..=255u8)).collect();

    let mut img = GrayImage::new(width, height)?;
    for y in 0..height {
        for x in 0..width {
            let base = bases[(x / block) as usize + (y / block) as usize * bx] as i32;
            let delta = rng.random_range(-(jitter as i32)..=jitter as i32);
            img.set_pixel(x, y, (base + delta).clamp(0, 255) as u8)?;
        }
    }
    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;
    use segmerge_core::Raster;

    #[test]
    fn test_two_tone_layout() {
        let img = two_tone(4, 2, 1, 0, 9).unwrap();
        assert_eq!(img.data(), &[0, 9, 9, 9, 0, 9, 9, 9]);
        assert!(two_tone(4, 2, 5, 0, 9).is_err());
    }

    #[test]
    fn test_checkerboard_alternates() {
        let img = checkerboard(4, 4, 2, 10, 240).unwrap();
        assert_eq!(img.get_pixel(0, 0), Some(10));
        assert_eq!(img.get_pixel(2, 0), Some(240));
        assert_eq!(img.get_pixel(2, 2), Some(10));
    }

    #[test]
    fn test_noise_is_reproducible() {
        let a = noise(8, 8, 7).unwrap();
        let b = noise(8, 8, 7).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.pixel_count(), 64);
    }

    #[test]
    fn test_ramp_saturates() {
        let img = horizontal_ramp(4, 1, 100).unwrap();
        assert_eq!(img.data(), &[0, 100, 200, 255]);
    }
}
