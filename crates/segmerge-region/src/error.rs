//! Error types for segmerge-region

use crate::region::{PixelIndex, RegionId};
use thiserror::Error;

/// Errors that can occur during region processing operations
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] segmerge_core::Error),

    /// Input rejected before processing (empty raster, bad parameters)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A region id was referenced that is not present in the region set.
    ///
    /// This is always an internal consistency defect.
    #[error("missing region: {0}")]
    MissingRegion(RegionId),

    /// A pixel has no owning region in a set that should be complete
    #[error("pixel {0} is not assigned to any region")]
    UnassignedPixel(PixelIndex),

    /// The coloring needs more colors than the palette provides
    #[error("insufficient palette: {required} colors required, {available} available")]
    InsufficientPalette { required: usize, available: usize },
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
