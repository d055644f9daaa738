//! Greedy graph coloring for region maps
//!
//! Assigns small color indices to the vertices of an adjacency graph so that
//! no two neighbors share a color. The result is not guaranteed to use the
//! minimum number of colors.

use crate::error::{RegionError, RegionResult};
use crate::region::RegionId;
use crate::store::Adjacency;
use log::warn;
use segmerge_core::Palette;
use std::collections::{BTreeMap, BTreeSet};

/// Color assignment produced by [`color_graph`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GraphColoring {
    color_of: BTreeMap<RegionId, usize>,
    color_count: usize,
}

impl GraphColoring {
    /// Number of distinct colors used
    #[inline]
    pub fn color_count(&self) -> usize {
        self.color_count
    }

    /// Color index of a region.
    pub fn color_of(&self, id: RegionId) -> RegionResult<usize> {
        self.color_of
            .get(&id)
            .copied()
            .ok_or(RegionError::MissingRegion(id))
    }

    /// Full assignment in ascending region id order
    pub fn colors(&self) -> &BTreeMap<RegionId, usize> {
        &self.color_of
    }

    /// Check that `palette` has an entry for every color index.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InsufficientPalette`] if the palette is too
    /// short.
    pub fn ensure_palette(&self, palette: &Palette) -> RegionResult<()> {
        if palette.len() < self.color_count {
            warn!(
                "coloring uses {} colors but palette has {}",
                self.color_count,
                palette.len()
            );
            return Err(RegionError::InsufficientPalette {
                required: self.color_count,
                available: palette.len(),
            });
        }
        Ok(())
    }
}

/// Greedily color an adjacency graph.
///
/// Vertices are visited in ascending id order. Each vertex takes the
/// smallest color not already used by a colored neighbor, or a new color if
/// all existing ones are taken.
///
/// # Errors
///
/// Returns [`RegionError::MissingRegion`] if a neighbor id is not itself a
/// vertex of the graph.
///
/// # Examples
///
/// ```
/// use segmerge_region::{color_graph, Adjacency};
/// use std::collections::BTreeSet;
///
/// let mut graph = Adjacency::new();
/// graph.insert(0, BTreeSet::from([1]));
/// graph.insert(1, BTreeSet::from([0]));
/// let coloring = color_graph(&graph).unwrap();
/// assert_eq!(coloring.color_count(), 2);
/// ```
pub fn color_graph(adjacency: &Adjacency) -> RegionResult<GraphColoring> {
    let mut color_of = BTreeMap::new();
    let mut color_count = 0;

    for (&vertex, neighbors) in adjacency {
        let mut taken = BTreeSet::new();
        for neighbor in neighbors {
            if !adjacency.contains_key(neighbor) {
                return Err(RegionError::MissingRegion(*neighbor));
            }
            if let Some(&color) = color_of.get(neighbor) {
                taken.insert(color);
            }
        }

        let color = match (0..color_count).find(|c| !taken.contains(c)) {
            Some(free) => free,
            None => {
                color_count += 1;
                color_count - 1
            }
        };
        color_of.insert(vertex, color);
    }

    Ok(GraphColoring {
        color_of,
        color_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use segmerge_core::Rgb;

    fn graph(edges: &[(RegionId, RegionId)], vertices: &[RegionId]) -> Adjacency {
        let mut adjacency: Adjacency = vertices.iter().map(|&v| (v, BTreeSet::new())).collect();
        for &(a, b) in edges {
            adjacency.entry(a).or_default().insert(b);
            adjacency.entry(b).or_default().insert(a);
        }
        adjacency
    }

    fn assert_valid(adjacency: &Adjacency, coloring: &GraphColoring) {
        for (&v, neighbors) in adjacency {
            for &n in neighbors {
                assert_ne!(coloring.color_of(v).unwrap(), coloring.color_of(n).unwrap());
            }
        }
    }

    #[test]
    fn test_isolated_vertices_share_color() {
        let adjacency = graph(&[], &[0, 1, 2]);
        let coloring = color_graph(&adjacency).unwrap();
        assert_eq!(coloring.color_count(), 1);
        assert!(coloring.colors().values().all(|&c| c == 0));
    }

    #[test]
    fn test_triangle_needs_three() {
        let adjacency = graph(&[(0, 1), (1, 2), (0, 2)], &[]);
        let coloring = color_graph(&adjacency).unwrap();
        assert_eq!(coloring.color_count(), 3);
        assert_valid(&adjacency, &coloring);
    }

    #[test]
    fn test_path_reuses_colors() {
        let adjacency = graph(&[(0, 1), (1, 2), (2, 3)], &[]);
        let coloring = color_graph(&adjacency).unwrap();
        assert_eq!(coloring.color_count(), 2);
        assert_eq!(coloring.color_of(0).unwrap(), 0);
        assert_eq!(coloring.color_of(1).unwrap(), 1);
        assert_eq!(coloring.color_of(2).unwrap(), 0);
        assert_eq!(coloring.color_of(3).unwrap(), 1);
    }

    #[test]
    fn test_smallest_free_color_is_reused() {
        // 0-1, 0-2, 1-3 (not 2-3): 3 can reuse color 0 after 0 took it
        let adjacency = graph(&[(0, 1), (0, 2), (1, 3)], &[]);
        let coloring = color_graph(&adjacency).unwrap();
        assert_eq!(coloring.color_of(2).unwrap(), 1);
        assert_eq!(coloring.color_of(3).unwrap(), 0);
        assert_valid(&adjacency, &coloring);
    }

    #[test]
    fn test_empty_graph() {
        let coloring = color_graph(&Adjacency::new()).unwrap();
        assert_eq!(coloring.color_count(), 0);
    }

    #[test]
    fn test_dangling_neighbor_is_error() {
        let mut adjacency = Adjacency::new();
        adjacency.insert(0, BTreeSet::from([4]));
        assert!(matches!(
            color_graph(&adjacency),
            Err(RegionError::MissingRegion(4))
        ));
    }

    #[test]
    fn test_ensure_palette() {
        let adjacency = graph(&[(0, 1), (1, 2), (0, 2)], &[]);
        let coloring = color_graph(&adjacency).unwrap();
        let short = Palette::from_colors(vec![Rgb::gray(0), Rgb::gray(255)]);
        assert!(matches!(
            coloring.ensure_palette(&short),
            Err(RegionError::InsufficientPalette {
                required: 3,
                available: 2
            })
        ));
        assert!(coloring.ensure_palette(&Palette::region_default()).is_ok());
    }
}
