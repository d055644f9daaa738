//! segmerge - Region segmentation for grayscale rasters
//!
//! Splits an image into homogeneous regions by region growing, fuses
//! neighboring regions with similar mean intensity, and colors the result
//! so that no two touching regions share a color.
//!
//! # Overview
//!
//! - [`region::grow_regions`] partitions a [`Raster`] into 4-connected regions
//! - [`region::merge_until_stable`] repeats merge passes until the count settles
//! - [`region::color_graph`] colors the region adjacency graph
//! - [`region::segment`] runs all three and can render the map with a [`Palette`]
//!
//! # Example
//!
//! ```
//! use segmerge::{GrayImage, Palette};
//! use segmerge::region::{SegmentOptions, segment};
//!
//! let img = GrayImage::from_raw(4, 1, vec![10, 12, 200, 205]).unwrap();
//! let result = segment(&img, &SegmentOptions::default()).unwrap();
//! assert_eq!(result.regions.len(), 2);
//!
//! let rendered = result.render(&Palette::region_default()).unwrap();
//! assert_eq!(rendered.to_rgba_bytes().len(), 16);
//! ```

// Re-export core types (raster and color containers used everywhere)
pub use segmerge_core::*;

// Re-export the engine as a module to keep its names grouped
pub use segmerge_region as region;
