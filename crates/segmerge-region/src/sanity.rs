//! Consistency checks for region sets
//!
//! These routines validate the [`RegionSet`] invariants and describe every
//! violation in a human-readable line. An empty list means the set is
//! consistent. They are meant for tests and debugging; the engine itself
//! never calls them on its hot paths.

use crate::region::RegionId;
use crate::store::RegionSet;
use segmerge_core::Raster;
use std::collections::BTreeSet;

/// Check the structural invariants of a region set.
///
/// Reports:
/// - region keys that disagree with `Region::id`
/// - pixel map entries pointing at missing regions
/// - adjacency keys or entries pointing at missing regions
/// - regions without an adjacency entry
/// - self-loops and one-directional edges
/// - pixels owned by several regions, or by none
/// - pixel map entries that disagree with the region pixel sets
pub fn regions_sanity_check(set: &RegionSet) -> Vec<String> {
    let mut errors = Vec::new();
    let available: BTreeSet<RegionId> = set.region_ids().collect();
    let pixel_count = set.pixel_count();

    for id in &available {
        if let Ok(region) = set.region(*id) {
            if region.id != *id {
                errors.push(format!("id mismatch: regions[{}].id == {}", id, region.id));
            }
        }
        if !set.adjacency().contains_key(id) {
            errors.push(format!("region {} has no adjacency entry", id));
        }
    }

    for (pixel, owner) in set.pixel_to_region().iter().enumerate() {
        if let Some(id) = owner {
            if !available.contains(id) {
                errors.push(format!("dangling id at pixel_to_region[{}] = {}", pixel, id));
            }
        }
    }

    for (&id, neighbors) in set.adjacency() {
        if !available.contains(&id) {
            errors.push(format!("dangling adjacency list for region {}", id));
            continue;
        }
        for &neighbor in neighbors {
            if neighbor == id {
                errors.push(format!("region {} lists itself as a neighbor", id));
            } else if !available.contains(&neighbor) {
                errors.push(format!("dangling id at adjacency[{}] -> {}", id, neighbor));
            } else if !set
                .adjacency()
                .get(&neighbor)
                .is_some_and(|back| back.contains(&id))
            {
                errors.push(format!(
                    "asymmetric edge: {} -> {} without {} -> {}",
                    id, neighbor, neighbor, id
                ));
            }
        }
    }

    let mut owners: Vec<Vec<RegionId>> = vec![Vec::new(); pixel_count];
    for region in set.regions() {
        for &pixel in &region.pixels {
            match owners.get_mut(pixel) {
                Some(slot) => slot.push(region.id),
                None => errors.push(format!(
                    "region {} contains pixel {} outside 0..{}",
                    region.id, pixel, pixel_count
                )),
            }
        }
    }
    for (pixel, ids) in owners.iter().enumerate() {
        match ids.as_slice() {
            [] => errors.push(format!("pixel {} belongs to no region", pixel)),
            [id] => {
                if set.pixel_to_region()[pixel] != Some(*id) {
                    errors.push(format!(
                        "pixel_to_region[{}] = {:?} but region {} contains it",
                        pixel,
                        set.pixel_to_region()[pixel],
                        id
                    ));
                }
            }
            many => errors.push(format!("pixel {} belongs to regions {:?}", pixel, many)),
        }
    }

    errors
}

/// Check structural invariants plus the intensity sums against `raster`.
pub fn regions_sanity_check_with_raster<R: Raster + ?Sized>(
    set: &RegionSet,
    raster: &R,
) -> Vec<String> {
    let mut errors = regions_sanity_check(set);

    let pixel_count = raster.pixel_count();
    if pixel_count != set.pixel_count() {
        errors.push(format!(
            "raster has {} pixels but region set covers {}",
            pixel_count,
            set.pixel_count()
        ));
        return errors;
    }

    for region in set.regions() {
        let expected: u64 = region
            .pixels
            .iter()
            .filter(|&&p| p < pixel_count)
            .map(|&p| raster.intensity(p) as u64)
            .sum();
        if expected != region.sum {
            errors.push(format!(
                "region {} sum is {} but its pixels add up to {}",
                region.id, region.sum, expected
            ));
        }
    }

    errors
}
