//! segmerge-region - Region growing and merging for segmerge
//!
//! This crate provides the segmentation engine:
//!
//! - **Region growing** - Partition a raster into 4-connected homogeneous regions
//! - **Region merging** - Fuse neighboring regions with similar means until stable
//! - **Graph coloring** - Assign display colors so no neighbors share one
//! - **Consistency checks** - Validate the region set invariants
//!
//! # Examples
//!
//! ## Growing and merging
//!
//! ```
//! use segmerge_core::GrayImage;
//! use segmerge_region::{grow_regions, merge_until_stable};
//!
//! let img = GrayImage::from_raw(4, 1, vec![10, 12, 200, 205]).unwrap();
//! let grown = grow_regions(&img).unwrap();
//! assert_eq!(grown.len(), 2);
//!
//! let outcome = merge_until_stable(&grown).unwrap();
//! assert_eq!(outcome.regions.len(), 2);
//! ```
//!
//! ## Coloring the adjacency graph
//!
//! ```
//! use segmerge_core::GrayImage;
//! use segmerge_region::{color_graph, grow_regions};
//!
//! let img = GrayImage::from_raw(3, 1, vec![0, 200, 0]).unwrap();
//! let regions = grow_regions(&img).unwrap();
//! let coloring = color_graph(regions.adjacency()).unwrap();
//! assert_eq!(coloring.color_count(), 2);
//! ```
//!
//! ## Full pipeline
//!
//! ```
//! use segmerge_core::{GrayImage, Palette};
//! use segmerge_region::{SegmentOptions, segment};
//!
//! let img = GrayImage::new(8, 8).unwrap();
//! let result = segment(&img, &SegmentOptions::default()).unwrap();
//! let rendered = result.render(&Palette::region_default()).unwrap();
//! assert_eq!(rendered.height(), 8);
//! ```

pub mod coloring;
pub mod converge;
pub mod error;
pub mod grow;
pub mod merge;
pub mod options;
pub mod pipeline;
pub mod region;
pub mod render;
pub mod sanity;
pub mod store;

// Re-export core types
pub use segmerge_core;

// Re-export error types
pub use error::{RegionError, RegionResult};

// Re-export region store types
pub use region::{PixelIndex, Region, RegionId};
pub use store::{Adjacency, RegionSet};

// Re-export options
pub use options::{DEFAULT_THRESHOLD, SegmentOptions};

// Re-export growing, merging and coloring functions
pub use coloring::{GraphColoring, color_graph};
pub use converge::{MergeOutcome, merge_until_stable, merge_until_stable_with};
pub use grow::{grow_regions, grow_regions_with, is_member};
pub use merge::{perform_merge_pass, perform_merge_pass_with, regions_compatible};

// Re-export pipeline, rendering and diagnostics
pub use pipeline::{Segmentation, segment};
pub use render::render_regions;
pub use sanity::{regions_sanity_check, regions_sanity_check_with_raster};
