//! Region growing
//!
//! Partitions a raster into 4-connected regions under a running-mean
//! homogeneity predicate, discovering the adjacency graph along the way.
//!
//! # Traversal order
//!
//! Region shapes depend on the order in which pixels are visited, because
//! every accepted pixel shifts the region mean. The order is fixed:
//!
//! 1. Seeds are taken in ascending pixel index order (the smallest pixel
//!    that has no region yet).
//! 2. Each region is grown depth-first from an explicit stack.
//! 3. Neighbors of an accepted pixel are pushed up, left, right, down, so
//!    the pixel below is popped first.
//!
//! A pixel may be pushed more than once before it is popped; only the first
//! acceptance counts.

use crate::error::{RegionError, RegionResult};
use crate::options::SegmentOptions;
use crate::region::{PixelIndex, Region};
use crate::store::RegionSet;
use log::{debug, trace};
use segmerge_core::Raster;

/// Neighbor offsets in push order: up, left, right, down.
const NEIGHBOR_DELTAS: [(i64, i64); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

/// Homogeneity predicate used while growing.
///
/// An empty region accepts any pixel; otherwise the pixel must lie within
/// `threshold` (inclusive) of the current region mean.
pub fn is_member(region: &Region, intensity: u8, threshold: f64) -> bool {
    match region.mean() {
        None => true,
        Some(mean) => (intensity as f64 - mean).abs() <= threshold,
    }
}

/// In-bounds 4-connected neighbors of `index`, in push order.
fn neighbors(index: PixelIndex, width: u32, height: u32) -> impl Iterator<Item = PixelIndex> {
    let x = (index % width as usize) as i64;
    let y = (index / width as usize) as i64;
    NEIGHBOR_DELTAS.iter().filter_map(move |&(dx, dy)| {
        let nx = x + dx;
        let ny = y + dy;
        if nx >= 0 && nx < width as i64 && ny >= 0 && ny < height as i64 {
            Some((nx + ny * width as i64) as PixelIndex)
        } else {
            None
        }
    })
}

/// Grow regions over a raster using default options.
///
/// See [`grow_regions_with`].
pub fn grow_regions<R: Raster + ?Sized>(raster: &R) -> RegionResult<RegionSet> {
    grow_regions_with(raster, &SegmentOptions::default())
}

/// Grow regions over a raster.
///
/// # Arguments
///
/// * `raster` - Single-channel input
/// * `options` - Only `grow_threshold` is used
///
/// # Returns
///
/// A [`RegionSet`] in which every pixel belongs to exactly one region and
/// every pair of regions sharing a 4-connected boundary is adjacent.
///
/// # Errors
///
/// Returns [`RegionError::InvalidInput`] for a raster with zero pixels or
/// invalid options.
///
/// # Examples
///
/// ```
/// use segmerge_core::GrayImage;
/// use segmerge_region::grow_regions;
///
/// let img = GrayImage::from_raw(4, 1, vec![10, 12, 200, 205]).unwrap();
/// let regions = grow_regions(&img).unwrap();
/// assert_eq!(regions.len(), 2);
/// ```
pub fn grow_regions_with<R: Raster + ?Sized>(
    raster: &R,
    options: &SegmentOptions,
) -> RegionResult<RegionSet> {
    options.validate()?;

    let width = raster.width();
    let height = raster.height();
    let pixel_count = raster.pixel_count();
    if pixel_count == 0 {
        return Err(RegionError::InvalidInput(format!(
            "raster has no pixels ({}x{})",
            width, height
        )));
    }

    let mut set = RegionSet::new(pixel_count);
    let mut stack: Vec<PixelIndex> = Vec::new();
    let mut next_seed = 0;

    loop {
        while next_seed < pixel_count && set.pixel_to_region()[next_seed].is_some() {
            next_seed += 1;
        }
        if next_seed == pixel_count {
            break;
        }

        let id = set.create_region()?;
        stack.push(next_seed);

        while let Some(current) = stack.pop() {
            if set.pixel_to_region()[current].is_some() {
                continue;
            }
            let intensity = raster.intensity(current);
            if !is_member(set.region(id)?, intensity, options.grow_threshold) {
                continue;
            }
            set.assign_pixel(id, current, intensity)?;

            for neighbor in neighbors(current, width, height) {
                let owner = set.pixel_to_region()[neighbor];
                match owner {
                    None => stack.push(neighbor),
                    Some(other) if other != id => set.add_edge(id, other)?,
                    Some(_) => {}
                }
            }
        }

        trace!("region {} grown to {} pixels", id, set.region(id)?.len());
    }

    debug!(
        "grew {} regions over {}x{} raster",
        set.len(),
        width,
        height
    );
    Ok(set)
}
