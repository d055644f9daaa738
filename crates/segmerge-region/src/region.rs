//! Region - a connected set of pixels with a running intensity sum

use std::collections::BTreeSet;

/// Identifier of a region within a [`RegionSet`](crate::RegionSet)
pub type RegionId = u32;

/// Flat row-major pixel index (`x + y * width`)
pub type PixelIndex = usize;

/// A set of raster pixels treated as one homogeneous unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Unique id of this region
    pub id: RegionId,
    /// Indices of member pixels
    pub pixels: BTreeSet<PixelIndex>,
    /// Sum of member intensities
    pub sum: u64,
}

impl Region {
    /// Create an empty region
    pub fn new(id: RegionId) -> Self {
        Self {
            id,
            pixels: BTreeSet::new(),
            sum: 0,
        }
    }

    /// Create a region from explicit members and intensity sum
    pub fn with_pixels(
        id: RegionId,
        pixels: impl IntoIterator<Item = PixelIndex>,
        sum: u64,
    ) -> Self {
        Self {
            id,
            pixels: pixels.into_iter().collect(),
            sum,
        }
    }

    /// Number of member pixels
    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Check if the region has no pixels
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Mean intensity, or `None` for an empty region
    pub fn mean(&self) -> Option<f64> {
        if self.pixels.is_empty() {
            None
        } else {
            Some(self.sum as f64 / self.pixels.len() as f64)
        }
    }

    /// Add a pixel with the given intensity.
    ///
    /// Returns `false` (and leaves the sum untouched) if the pixel was
    /// already a member.
    pub fn add_pixel(&mut self, pixel: PixelIndex, intensity: u8) -> bool {
        if self.pixels.insert(pixel) {
            self.sum += intensity as u64;
            true
        } else {
            false
        }
    }

    /// Move every pixel of `other` into this region.
    pub fn absorb(&mut self, other: Region) {
        self.sum += other.sum;
        self.pixels.extend(other.pixels);
    }
}
