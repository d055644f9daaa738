//! Segmentation options

use crate::error::{RegionError, RegionResult};

/// Default homogeneity threshold on the 0-255 intensity scale (about 10%).
pub const DEFAULT_THRESHOLD: f64 = 25.0;

/// Options for region growing and merging
///
/// Growth accepts a pixel when `|value - mean| <= grow_threshold`; merging
/// fuses two regions when `|mean_a - mean_b| < merge_threshold`. The
/// comparison operators differ on purpose and are not configurable.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentOptions {
    /// Maximum distance between a pixel and the region mean during growth
    pub grow_threshold: f64,
    /// Exclusive upper bound on the mean difference of mergeable regions
    pub merge_threshold: f64,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            grow_threshold: DEFAULT_THRESHOLD,
            merge_threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl SegmentOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the growth threshold
    pub fn with_grow_threshold(mut self, threshold: f64) -> Self {
        self.grow_threshold = threshold;
        self
    }

    /// Set the merge threshold
    pub fn with_merge_threshold(mut self, threshold: f64) -> Self {
        self.merge_threshold = threshold;
        self
    }

    /// Reject negative or non-finite thresholds.
    pub fn validate(&self) -> RegionResult<()> {
        for (name, value) in [
            ("grow_threshold", self.grow_threshold),
            ("merge_threshold", self.merge_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RegionError::InvalidInput(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
