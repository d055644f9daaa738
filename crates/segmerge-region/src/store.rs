//! Region store - regions, pixel ownership and the adjacency graph
//!
//! [`RegionSet`] is the shared state produced by region growing and
//! consumed by merging and coloring. After every completed operation it
//! holds these invariants:
//!
//! 1. Every id referenced by the adjacency graph or the pixel map is a key
//!    of `regions`.
//! 2. The adjacency graph is symmetric and irreflexive.
//! 3. Region pixel sets are pairwise disjoint and cover every pixel.
//! 4. `Region::sum` equals the intensity sum of the region's pixels.
//!
//! All id lookups are total: an absent id is reported as
//! [`RegionError::MissingRegion`] and never replaced with a default.
//!
//! # Ownership
//!
//! `RegionSet: Clone` is a deep copy. Functional operations such as
//! [`RegionSet::merge_regions`] take `&self` and return a new set; the only
//! in-place mutator, [`RegionSet::merge_multiple_in_place`], is meant for a
//! snapshot the caller owns exclusively.

use crate::error::{RegionError, RegionResult};
use crate::region::{PixelIndex, Region, RegionId};
use std::collections::{BTreeMap, BTreeSet};

/// Region adjacency graph, stored as adjacency sets keyed by region id
pub type Adjacency = BTreeMap<RegionId, BTreeSet<RegionId>>;

/// Regions of one raster together with pixel ownership and adjacency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSet {
    regions: BTreeMap<RegionId, Region>,
    pixel_to_region: Vec<Option<RegionId>>,
    adjacency: Adjacency,
    /// Next id handed out by `create_region`; `None` once the id space is used up
    next_id: Option<RegionId>,
}

impl RegionSet {
    /// Create an empty set covering `pixel_count` unassigned pixels.
    pub fn new(pixel_count: usize) -> Self {
        Self {
            regions: BTreeMap::new(),
            pixel_to_region: vec![None; pixel_count],
            adjacency: Adjacency::new(),
            next_id: Some(0),
        }
    }

    /// Assemble a set from raw parts without validating them.
    ///
    /// Useful for diagnostics; run
    /// [`regions_sanity_check`](crate::regions_sanity_check) on the result
    /// before relying on any invariant.
    pub fn from_parts(
        regions: BTreeMap<RegionId, Region>,
        pixel_to_region: Vec<Option<RegionId>>,
        adjacency: Adjacency,
    ) -> Self {
        let next_id = match regions.keys().chain(adjacency.keys()).max() {
            Some(max) => max.checked_add(1),
            None => Some(0),
        };
        Self {
            regions,
            pixel_to_region,
            adjacency,
            next_id,
        }
    }

    /// Number of regions
    #[inline]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Check if there are no regions
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Number of pixel slots covered by this set
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixel_to_region.len()
    }

    /// All regions in ascending id order
    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.values()
    }

    /// All region ids in ascending order
    pub fn region_ids(&self) -> impl Iterator<Item = RegionId> + '_ {
        self.regions.keys().copied()
    }

    /// Check whether a region id is present
    pub fn contains(&self, id: RegionId) -> bool {
        self.regions.contains_key(&id)
    }

    /// The adjacency graph
    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    /// Pixel ownership map, one slot per pixel
    pub fn pixel_to_region(&self) -> &[Option<RegionId>] {
        &self.pixel_to_region
    }

    /// Look up a region by id.
    pub fn region(&self, id: RegionId) -> RegionResult<&Region> {
        self.regions.get(&id).ok_or(RegionError::MissingRegion(id))
    }

    fn region_mut(&mut self, id: RegionId) -> RegionResult<&mut Region> {
        self.regions
            .get_mut(&id)
            .ok_or(RegionError::MissingRegion(id))
    }

    /// Neighbor set of a region.
    pub fn neighbors(&self, id: RegionId) -> RegionResult<&BTreeSet<RegionId>> {
        self.adjacency.get(&id).ok_or(RegionError::MissingRegion(id))
    }

    fn neighbors_mut(&mut self, id: RegionId) -> RegionResult<&mut BTreeSet<RegionId>> {
        self.adjacency
            .get_mut(&id)
            .ok_or(RegionError::MissingRegion(id))
    }

    /// Id of the region owning `pixel`.
    ///
    /// # Errors
    ///
    /// - [`RegionError::InvalidInput`] if `pixel` is out of range
    /// - [`RegionError::UnassignedPixel`] if no region owns it yet
    pub fn region_of(&self, pixel: PixelIndex) -> RegionResult<RegionId> {
        match self.pixel_to_region.get(pixel) {
            Some(Some(id)) => Ok(*id),
            Some(None) => Err(RegionError::UnassignedPixel(pixel)),
            None => Err(RegionError::InvalidInput(format!(
                "pixel {} out of range 0..{}",
                pixel,
                self.pixel_to_region.len()
            ))),
        }
    }

    /// Every undirected edge exactly once, as `(a, b)` with `a < b`, in
    /// ascending order.
    pub fn edges(&self) -> Vec<(RegionId, RegionId)> {
        self.adjacency
            .iter()
            .flat_map(|(&a, neighbors)| {
                neighbors
                    .range((std::ops::Bound::Excluded(a), std::ops::Bound::Unbounded))
                    .map(move |&b| (a, b))
            })
            .collect()
    }

    /// Create a new empty region with a fresh id and an empty neighbor set.
    ///
    /// # Errors
    ///
    /// - [`RegionError::InvalidInput`] if every id up to `RegionId::MAX` is
    ///   already taken
    pub fn create_region(&mut self) -> RegionResult<RegionId> {
        let id = self.next_id.ok_or_else(|| {
            RegionError::InvalidInput("region id space exhausted".to_string())
        })?;
        self.next_id = id.checked_add(1);
        self.regions.insert(id, Region::new(id));
        self.adjacency.insert(id, BTreeSet::new());
        Ok(id)
    }

    /// Insert a fully formed region, claiming its pixels.
    ///
    /// # Errors
    ///
    /// - [`RegionError::InvalidInput`] if the id is taken, or a pixel is out
    ///   of range or already owned by another region
    pub fn insert_region(&mut self, region: Region) -> RegionResult<()> {
        if self.regions.contains_key(&region.id) {
            return Err(RegionError::InvalidInput(format!(
                "region {} already exists",
                region.id
            )));
        }
        for &pixel in &region.pixels {
            match self.pixel_to_region.get(pixel) {
                Some(None) => {}
                Some(Some(owner)) => {
                    return Err(RegionError::InvalidInput(format!(
                        "pixel {} already belongs to region {}",
                        pixel, owner
                    )));
                }
                None => {
                    return Err(RegionError::InvalidInput(format!(
                        "pixel {} out of range 0..{}",
                        pixel,
                        self.pixel_to_region.len()
                    )));
                }
            }
        }

        for &pixel in &region.pixels {
            self.pixel_to_region[pixel] = Some(region.id);
        }
        self.next_id = match (self.next_id, region.id.checked_add(1)) {
            (Some(next), Some(after)) => Some(next.max(after)),
            _ => None,
        };
        self.adjacency.entry(region.id).or_default();
        self.regions.insert(region.id, region);
        Ok(())
    }

    /// Add `pixel` with `intensity` to region `id` and record ownership.
    ///
    /// # Errors
    ///
    /// - [`RegionError::MissingRegion`] if `id` is absent
    /// - [`RegionError::InvalidInput`] if the pixel is out of range or
    ///   already owned
    pub fn assign_pixel(
        &mut self,
        id: RegionId,
        pixel: PixelIndex,
        intensity: u8,
    ) -> RegionResult<()> {
        let len = self.pixel_to_region.len();
        match self.pixel_to_region.get(pixel) {
            Some(None) => {}
            Some(Some(owner)) => {
                return Err(RegionError::InvalidInput(format!(
                    "pixel {} already belongs to region {}",
                    pixel, owner
                )));
            }
            None => {
                return Err(RegionError::InvalidInput(format!(
                    "pixel {} out of range 0..{}",
                    pixel, len
                )));
            }
        }
        self.region_mut(id)?.add_pixel(pixel, intensity);
        self.pixel_to_region[pixel] = Some(id);
        Ok(())
    }

    /// Record a bidirectional adjacency edge.
    ///
    /// # Errors
    ///
    /// - [`RegionError::MissingRegion`] if either id is absent
    /// - [`RegionError::InvalidInput`] if `a == b`
    pub fn add_edge(&mut self, a: RegionId, b: RegionId) -> RegionResult<()> {
        if a == b {
            return Err(RegionError::InvalidInput(format!(
                "region {} cannot neighbor itself",
                a
            )));
        }
        self.region(a)?;
        self.region(b)?;
        self.neighbors_mut(a)?.insert(b);
        self.neighbors_mut(b)?.insert(a);
        Ok(())
    }

    /// Return a new set in which `source` has been absorbed into
    /// `destination`.
    ///
    /// The destination keeps its id and gains the source's pixels, sum and
    /// neighbors; every region that neighbored the source now neighbors the
    /// destination instead. `self` is left unchanged.
    ///
    /// # Errors
    ///
    /// - [`RegionError::MissingRegion`] if either id is absent
    /// - [`RegionError::InvalidInput`] if `destination == source`
    pub fn merge_regions(
        &self,
        destination: RegionId,
        source: RegionId,
    ) -> RegionResult<RegionSet> {
        let mut merged = self.clone();
        merged.merge_multiple_in_place(destination, &BTreeSet::from([source]))?;
        Ok(merged)
    }

    /// Absorb every region in `sources` into `destination`, in place.
    ///
    /// All ids are validated before anything is modified, so on error the
    /// set is unchanged.
    ///
    /// # Errors
    ///
    /// - [`RegionError::MissingRegion`] if the destination or any source is
    ///   absent, or a source lists a neighbor that is absent
    /// - [`RegionError::InvalidInput`] if `destination` is among `sources`
    pub fn merge_multiple_in_place(
        &mut self,
        destination: RegionId,
        sources: &BTreeSet<RegionId>,
    ) -> RegionResult<()> {
        if sources.contains(&destination) {
            return Err(RegionError::InvalidInput(format!(
                "region {} cannot be merged into itself",
                destination
            )));
        }
        self.region(destination)?;
        self.neighbors(destination)?;

        // Regions outside the batch whose neighbor sets must be repointed
        let mut affected = BTreeSet::new();
        let pixel_count = self.pixel_to_region.len();
        for &source in sources {
            if let Some(&pixel) = self.region(source)?.pixels.range(pixel_count..).next() {
                return Err(RegionError::InvalidInput(format!(
                    "region {} contains pixel {} outside 0..{}",
                    source, pixel, pixel_count
                )));
            }
            for &neighbor in self.neighbors(source)? {
                if neighbor != destination && !sources.contains(&neighbor) {
                    self.neighbors(neighbor)?;
                    affected.insert(neighbor);
                }
            }
        }

        let mut inherited = BTreeSet::new();
        for &source in sources {
            let region = self
                .regions
                .remove(&source)
                .ok_or(RegionError::MissingRegion(source))?;
            for &pixel in &region.pixels {
                self.pixel_to_region[pixel] = Some(destination);
            }
            self.region_mut(destination)?.absorb(region);

            let neighbors = self
                .adjacency
                .remove(&source)
                .ok_or(RegionError::MissingRegion(source))?;
            inherited.extend(neighbors);
        }

        let destination_neighbors = self.neighbors_mut(destination)?;
        destination_neighbors.extend(inherited);
        destination_neighbors.remove(&destination);
        destination_neighbors.retain(|id| !sources.contains(id));

        for neighbor in affected {
            let set = self.neighbors_mut(neighbor)?;
            set.retain(|id| !sources.contains(id));
            set.insert(destination);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A {0,1} sum 33 and B {2,3} sum 66, adjacent.
    fn two_regions() -> RegionSet {
        let mut set = RegionSet::new(4);
        set.insert_region(Region::with_pixels(10, [0, 1], 33)).unwrap();
        set.insert_region(Region::with_pixels(20, [2, 3], 66)).unwrap();
        set.add_edge(10, 20).unwrap();
        set
    }

    #[test]
    fn test_merge_regions_pair() {
        let set = two_regions();
        let merged = set.merge_regions(10, 20).unwrap();

        assert_eq!(merged.len(), 1);
        let region = merged.region(10).unwrap();
        assert_eq!(region.pixels, BTreeSet::from([0, 1, 2, 3]));
        assert_eq!(region.sum, 99);
        for pixel in 0..4 {
            assert_eq!(merged.region_of(pixel).unwrap(), 10);
        }
        assert!(merged.neighbors(10).unwrap().is_empty());
        assert_eq!(merged.adjacency().len(), 1);

        // Input untouched
        assert_eq!(set.len(), 2);
        assert_eq!(set.region_of(3).unwrap(), 20);
    }

    #[test]
    fn test_merge_repoints_third_party_neighbors() {
        // 0 - 1 - 2 in a row, merge 1 into 0: region 2 must now neighbor 0
        let mut set = RegionSet::new(3);
        for p in 0..3 {
            set.insert_region(Region::with_pixels(p as RegionId, [p], 10)).unwrap();
        }
        set.add_edge(0, 1).unwrap();
        set.add_edge(1, 2).unwrap();

        let merged = set.merge_regions(0, 1).unwrap();
        assert_eq!(merged.neighbors(0).unwrap(), &BTreeSet::from([2]));
        assert_eq!(merged.neighbors(2).unwrap(), &BTreeSet::from([0]));
        assert!(merged.neighbors(1).is_err());
    }

    #[test]
    fn test_merge_multiple_chain() {
        // A - B - C linear, merge {B, C} into A
        let mut set = RegionSet::new(6);
        set.insert_region(Region::with_pixels(0, [0, 1], 20)).unwrap();
        set.insert_region(Region::with_pixels(1, [2, 3], 24)).unwrap();
        set.insert_region(Region::with_pixels(2, [4, 5], 28)).unwrap();
        set.add_edge(0, 1).unwrap();
        set.add_edge(1, 2).unwrap();

        set.merge_multiple_in_place(0, &BTreeSet::from([1, 2])).unwrap();

        assert_eq!(set.len(), 1);
        let region = set.region(0).unwrap();
        assert_eq!(region.pixels, (0..6).collect::<BTreeSet<_>>());
        assert_eq!(region.sum, 72);
        assert!(set.neighbors(0).unwrap().is_empty());
        assert!(set.pixel_to_region().iter().all(|id| *id == Some(0)));
    }

    #[test]
    fn test_merge_missing_region_is_error() {
        let set = two_regions();
        assert!(matches!(
            set.merge_regions(10, 99),
            Err(RegionError::MissingRegion(99))
        ));
        assert!(matches!(
            set.merge_regions(98, 20),
            Err(RegionError::MissingRegion(98))
        ));
    }

    #[test]
    fn test_merge_failure_leaves_set_untouched() {
        let mut set = two_regions();
        let before = set.clone();
        let result = set.merge_multiple_in_place(10, &BTreeSet::from([20, 99]));
        assert!(matches!(result, Err(RegionError::MissingRegion(99))));
        assert_eq!(set, before);
    }

    #[test]
    fn test_merge_into_self_is_rejected() {
        let set = two_regions();
        assert!(matches!(
            set.merge_regions(10, 10),
            Err(RegionError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_create_region_ids_increase() {
        let mut set = RegionSet::new(2);
        set.insert_region(Region::with_pixels(5, [0], 1)).unwrap();
        let id = set.create_region().unwrap();
        assert_eq!(id, 6);
        assert_eq!(set.create_region().unwrap(), 7);
        assert!(set.neighbors(6).unwrap().is_empty());
    }

    #[test]
    fn test_max_region_id() {
        let mut set = RegionSet::new(2);
        set.insert_region(Region::with_pixels(RegionId::MAX, [0], 5))
            .unwrap();
        assert_eq!(set.region(RegionId::MAX).unwrap().sum, 5);
        assert!(matches!(
            set.create_region(),
            Err(RegionError::InvalidInput(_))
        ));

        let mut regions = BTreeMap::new();
        regions.insert(RegionId::MAX, Region::with_pixels(RegionId::MAX, [0], 5));
        let mut adjacency = Adjacency::new();
        adjacency.insert(RegionId::MAX, BTreeSet::new());
        let mut set = RegionSet::from_parts(regions, vec![Some(RegionId::MAX)], adjacency);
        assert!(set.create_region().is_err());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_merge_rejects_out_of_range_pixels() {
        let mut regions = BTreeMap::new();
        regions.insert(0, Region::with_pixels(0, [0], 5));
        regions.insert(1, Region::with_pixels(1, [1, 9], 10));
        let mut adjacency = Adjacency::new();
        adjacency.insert(0, BTreeSet::from([1]));
        adjacency.insert(1, BTreeSet::from([0]));
        let mut set = RegionSet::from_parts(regions, vec![Some(0), Some(1)], adjacency);
        let before = set.clone();

        assert!(matches!(
            set.merge_multiple_in_place(0, &BTreeSet::from([1])),
            Err(RegionError::InvalidInput(_))
        ));
        assert_eq!(set, before);
    }

    #[test]
    fn test_assign_pixel_rejects_double_ownership() {
        let mut set = RegionSet::new(2);
        let a = set.create_region().unwrap();
        let b = set.create_region().unwrap();
        set.assign_pixel(a, 0, 40).unwrap();
        assert!(set.assign_pixel(b, 0, 40).is_err());
        assert!(set.assign_pixel(b, 2, 40).is_err());
        assert!(matches!(
            set.assign_pixel(9, 1, 40),
            Err(RegionError::MissingRegion(9))
        ));
        assert_eq!(set.region(a).unwrap().sum, 40);
    }

    #[test]
    fn test_add_edge_checks() {
        let mut set = two_regions();
        assert!(set.add_edge(10, 10).is_err());
        assert!(matches!(
            set.add_edge(10, 30),
            Err(RegionError::MissingRegion(30))
        ));
    }

    #[test]
    fn test_edges_are_canonical() {
        let mut set = RegionSet::new(3);
        for p in 0..3 {
            set.insert_region(Region::with_pixels(p as RegionId, [p], 0)).unwrap();
        }
        set.add_edge(2, 0).unwrap();
        set.add_edge(1, 0).unwrap();
        set.add_edge(2, 1).unwrap();
        assert_eq!(set.edges(), vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_region_of_errors() {
        let set = RegionSet::new(2);
        assert!(matches!(
            set.region_of(0),
            Err(RegionError::UnassignedPixel(0))
        ));
        assert!(matches!(set.region_of(5), Err(RegionError::InvalidInput(_))));
    }
}
