//! Render a colored region map to an RGB image

use crate::coloring::GraphColoring;
use crate::error::{RegionError, RegionResult};
use crate::store::RegionSet;
use segmerge_core::{Palette, RgbImage};

/// Paint every pixel with the palette color of its region.
///
/// # Arguments
///
/// * `set` - Complete region set (every pixel assigned)
/// * `coloring` - Coloring of `set`'s adjacency graph
/// * `palette` - Display colors, at least `coloring.color_count()` long
/// * `width`, `height` - Output dimensions, matching `set.pixel_count()`
///
/// # Errors
///
/// - [`RegionError::InsufficientPalette`] if the palette is too short
/// - [`RegionError::InvalidInput`] if the dimensions do not match the set
/// - [`RegionError::UnassignedPixel`] / [`RegionError::MissingRegion`] if the
///   set or coloring is incomplete
pub fn render_regions(
    set: &RegionSet,
    coloring: &GraphColoring,
    palette: &Palette,
    width: u32,
    height: u32,
) -> RegionResult<RgbImage> {
    coloring.ensure_palette(palette)?;

    let expected = width as usize * height as usize;
    if expected != set.pixel_count() {
        return Err(RegionError::InvalidInput(format!(
            "{}x{} output does not match region set of {} pixels",
            width,
            height,
            set.pixel_count()
        )));
    }

    let mut image = RgbImage::new(width, height)?;
    for pixel in 0..expected {
        let color_index = coloring.color_of(set.region_of(pixel)?)?;
        let color = palette
            .get(color_index)
            .ok_or(RegionError::InsufficientPalette {
                required: color_index + 1,
                available: palette.len(),
            })?;
        image.set_index(pixel, color)?;
    }
    Ok(image)
}
