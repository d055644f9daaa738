//! Merge pass - fuse compatible neighboring regions
//!
//! A single pass visits every adjacency edge once and decides, from the
//! region means at the start of the pass, which neighbors are compatible.
//! Compatible pairs are combined with a union-resolution map so that a
//! chain A-B-C collapses into one region even when A and C never touch.
//! Only after every edge has been visited are the merges applied, one
//! batch per surviving representative.

use crate::error::{RegionError, RegionResult};
use crate::options::SegmentOptions;
use crate::region::{Region, RegionId};
use crate::store::RegionSet;
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// Merge predicate.
///
/// Two regions are compatible when either is empty or their means differ by
/// strictly less than `threshold`. Note that growth uses an inclusive bound
/// at the same threshold.
pub fn regions_compatible(a: &Region, b: &Region, threshold: f64) -> bool {
    match (a.mean(), b.mean()) {
        (Some(mean_a), Some(mean_b)) => (mean_a - mean_b).abs() < threshold,
        _ => true,
    }
}

/// Tracks which representative each region will be merged into.
///
/// Every entry points directly at a current representative, so lookups never
/// need to follow chains.
struct MergePlan {
    representative: BTreeMap<RegionId, RegionId>,
    groups: BTreeMap<RegionId, BTreeSet<RegionId>>,
}

impl MergePlan {
    fn new(ids: impl Iterator<Item = RegionId>) -> Self {
        Self {
            representative: ids.map(|id| (id, id)).collect(),
            groups: BTreeMap::new(),
        }
    }

    fn resolve(&self, id: RegionId) -> RegionResult<RegionId> {
        self.representative
            .get(&id)
            .copied()
            .ok_or(RegionError::MissingRegion(id))
    }

    /// Join the groups of `a` and `b`. Returns `false` if they already share
    /// a representative.
    fn union(&mut self, a: RegionId, b: RegionId) -> RegionResult<bool> {
        let resolved_a = self.resolve(a)?;
        let resolved_b = self.resolve(b)?;
        if resolved_a == resolved_b {
            return Ok(false);
        }
        let lo = resolved_a.min(resolved_b);
        let hi = resolved_a.max(resolved_b);

        let absorbed = self.groups.remove(&hi).unwrap_or_default();
        for &id in &absorbed {
            self.representative.insert(id, lo);
        }
        self.representative.insert(hi, lo);

        let group = self.groups.entry(lo).or_default();
        group.insert(hi);
        group.extend(absorbed);
        Ok(true)
    }
}

/// Run one merge pass with default options.
///
/// See [`perform_merge_pass_with`].
pub fn perform_merge_pass(set: &RegionSet) -> RegionResult<RegionSet> {
    perform_merge_pass_with(set, &SegmentOptions::default())
}

/// Run one merge pass.
///
/// The input is not modified; the result is an independent snapshot.
/// Within each connected group of compatible regions, the region with the
/// lowest id survives and absorbs the rest.
///
/// # Errors
///
/// Returns [`RegionError::MissingRegion`] if the adjacency graph references
/// a region that does not exist.
pub fn perform_merge_pass_with(
    set: &RegionSet,
    options: &SegmentOptions,
) -> RegionResult<RegionSet> {
    options.validate()?;

    let mut snapshot = set.clone();
    let mut plan = MergePlan::new(snapshot.region_ids());

    for (a, b) in snapshot.edges() {
        let region_a = snapshot.region(a)?;
        let region_b = snapshot.region(b)?;
        if regions_compatible(region_a, region_b, options.merge_threshold) {
            plan.union(a, b)?;
        }
    }

    let groups = plan.groups.len();
    for (destination, sources) in plan.groups {
        snapshot.merge_multiple_in_place(destination, &sources)?;
    }

    debug!(
        "merge pass: {} -> {} regions in {} groups",
        set.len(),
        snapshot.len(),
        groups
    );
    Ok(snapshot)
}
