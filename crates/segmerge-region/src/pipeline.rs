//! Full segmentation pipeline - grow, merge until stable, color

use crate::coloring::{GraphColoring, color_graph};
use crate::converge::merge_until_stable_with;
use crate::error::RegionResult;
use crate::grow::grow_regions_with;
use crate::options::SegmentOptions;
use crate::render::render_regions;
use crate::store::RegionSet;
use log::debug;
use segmerge_core::{Palette, Raster, RgbImage};

/// Result of [`segment`]
#[derive(Debug, Clone)]
pub struct Segmentation {
    /// Number of regions produced by growth, before any merging
    pub grown_region_count: usize,
    /// Final region set
    pub regions: RegionSet,
    /// Region count after each merge pass
    pub region_count_history: Vec<usize>,
    /// Coloring of the final adjacency graph
    pub coloring: GraphColoring,
    width: u32,
    height: u32,
}

impl Segmentation {
    /// Width of the segmented raster
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the segmented raster
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Paint the final regions with `palette`.
    pub fn render(&self, palette: &Palette) -> RegionResult<RgbImage> {
        render_regions(
            &self.regions,
            &self.coloring,
            palette,
            self.width,
            self.height,
        )
    }
}

/// Segment a raster into homogeneous, colored regions.
///
/// # Examples
///
/// ```
/// use segmerge_core::{GrayImage, Palette};
/// use segmerge_region::{SegmentOptions, segment};
///
/// let img = GrayImage::from_raw(4, 1, vec![10, 12, 200, 205]).unwrap();
/// let result = segment(&img, &SegmentOptions::default()).unwrap();
/// assert_eq!(result.regions.len(), 2);
/// assert_eq!(result.coloring.color_count(), 2);
/// let rendered = result.render(&Palette::region_default()).unwrap();
/// assert_eq!(rendered.width(), 4);
/// ```
pub fn segment<R: Raster + ?Sized>(
    raster: &R,
    options: &SegmentOptions,
) -> RegionResult<Segmentation> {
    let grown = grow_regions_with(raster, options)?;
    let grown_region_count = grown.len();

    let outcome = merge_until_stable_with(&grown, options)?;
    let coloring = color_graph(outcome.regions.adjacency())?;

    debug!(
        "segmented {}x{}: {} grown, {} final, {} colors",
        raster.width(),
        raster.height(),
        grown_region_count,
        outcome.regions.len(),
        coloring.color_count()
    );

    Ok(Segmentation {
        grown_region_count,
        regions: outcome.regions,
        region_count_history: outcome.region_count_history,
        coloring,
        width: raster.width(),
        height: raster.height(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegionError;
    use segmerge_core::{GrayImage, Rgb};

    #[test]
    fn test_segment_two_tone_strip() {
        let img = GrayImage::from_raw(4, 1, vec![10, 12, 200, 205]).unwrap();
        let result = segment(&img, &SegmentOptions::default()).unwrap();
        assert_eq!(result.grown_region_count, 2);
        assert_eq!(result.region_count_history, vec![2]);
        assert_eq!(result.regions.region(0).unwrap().sum, 22);
        assert_eq!(result.regions.region(1).unwrap().sum, 405);

        let palette = Palette::from_colors(vec![Rgb::new(1, 2, 3), Rgb::new(4, 5, 6)]);
        let image = result.render(&palette).unwrap();
        assert_eq!(image.get_rgb(1, 0), Some(Rgb::new(1, 2, 3)));
        assert_eq!(image.get_rgb(2, 0), Some(Rgb::new(4, 5, 6)));
    }

    #[test]
    fn test_segment_empty_raster() {
        let img = GrayImage::from_raw(0, 0, Vec::new()).unwrap();
        assert!(matches!(
            segment(&img, &SegmentOptions::default()),
            Err(RegionError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_segment_merges_grown_fragments() {
        // A zero growth threshold leaves one region per pixel; merging then
        // needs two passes to join them.
        let img = GrayImage::from_raw(4, 1, vec![40, 20, 46, 26]).unwrap();
        let opts = SegmentOptions::new().with_grow_threshold(0.0);
        let result = segment(&img, &opts).unwrap();
        assert_eq!(result.grown_region_count, 4);
        assert_eq!(result.regions.len(), 1);
        assert_eq!(result.coloring.color_count(), 1);
    }
}
