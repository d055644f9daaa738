//! Convergence driver - repeat merge passes until the region count settles

use crate::error::RegionResult;
use crate::merge::perform_merge_pass_with;
use crate::options::SegmentOptions;
use crate::store::RegionSet;
use log::debug;

/// Result of [`merge_until_stable`]
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// Region set after the last pass
    pub regions: RegionSet,
    /// Region count after each pass, in order
    pub region_count_history: Vec<usize>,
}

impl MergeOutcome {
    /// Number of merge passes executed
    pub fn passes(&self) -> usize {
        self.region_count_history.len()
    }
}

/// Merge until stable with default options.
///
/// See [`merge_until_stable_with`].
pub fn merge_until_stable(set: &RegionSet) -> RegionResult<MergeOutcome> {
    merge_until_stable_with(set, &SegmentOptions::default())
}

/// Repeatedly run merge passes until one leaves the region count unchanged.
///
/// At least one pass always runs. A pass can only merge, so the count never
/// increases and the loop ends after at most `set.len()` passes.
///
/// # Examples
///
/// ```
/// use segmerge_core::GrayImage;
/// use segmerge_region::{grow_regions, merge_until_stable};
///
/// let img = GrayImage::from_raw(4, 1, vec![10, 12, 200, 205]).unwrap();
/// let outcome = merge_until_stable(&grow_regions(&img).unwrap()).unwrap();
/// assert_eq!(outcome.region_count_history, vec![2]);
/// ```
pub fn merge_until_stable_with(
    set: &RegionSet,
    options: &SegmentOptions,
) -> RegionResult<MergeOutcome> {
    let mut current = perform_merge_pass_with(set, options)?;
    let mut history = vec![current.len()];
    let mut previous_count = set.len();

    while current.len() != previous_count {
        previous_count = current.len();
        current = perform_merge_pass_with(&current, options)?;
        history.push(current.len());
    }

    debug!(
        "merge converged after {} passes: {} -> {} regions",
        history.len(),
        set.len(),
        current.len()
    );
    Ok(MergeOutcome {
        regions: current,
        region_count_history: history,
    })
}
