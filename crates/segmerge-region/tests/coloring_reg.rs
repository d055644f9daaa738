//! Graph coloring regression test
//!
//! Colors the adjacency graphs of grown and merged region sets and checks
//! that the assignment is proper and stays within the greedy bound.
//!
//! Run with:
//! ```
//! cargo test -p segmerge-region --test coloring_reg
//! ```

use segmerge_core::GrayImage;
use segmerge_region::{Adjacency, RegionSet, color_graph, grow_regions, merge_until_stable};
use segmerge_test::{RegParams, checkerboard, noise, noisy_blocks, two_tone};

/// Proper coloring with every vertex colored and at most `max_degree + 1`
/// colors.
fn check_coloring(rp: &mut RegParams, adjacency: &Adjacency) -> usize {
    let coloring = color_graph(adjacency).unwrap();

    rp.compare_values(adjacency.len() as f64, coloring.colors().len() as f64, 0.0);

    let mut conflicts = Vec::new();
    for (&v, neighbors) in adjacency {
        for &n in neighbors {
            if coloring.color_of(v).ok() == coloring.color_of(n).ok() {
                conflicts.push(format!("regions {} and {} share a color", v, n));
            }
        }
    }
    rp.check_clean(&conflicts);

    let max_degree = adjacency.values().map(|n| n.len()).max().unwrap_or(0);
    let bound = if adjacency.is_empty() { 0 } else { max_degree + 1 };
    rp.compare_values(1.0, (coloring.color_count() <= bound) as u8 as f64, 0.0);

    let highest = coloring.colors().values().max().map_or(0, |&c| c + 1);
    rp.compare_values(coloring.color_count() as f64, highest as f64, 0.0);

    coloring.color_count()
}

fn grown_and_merged(img: &GrayImage) -> (RegionSet, RegionSet) {
    let grown = grow_regions(img).unwrap();
    let merged = merge_until_stable(&grown).unwrap().regions;
    (grown, merged)
}

#[test]
fn coloring_reg_known_graphs() {
    let mut rp = RegParams::new("coloring_known");

    // Uniform raster: a single isolated region
    let (grown, _) = grown_and_merged(&GrayImage::new(6, 6).unwrap());
    let n = check_coloring(&mut rp, grown.adjacency());
    rp.compare_values(1.0, n as f64, 0.0);

    // Two halves
    let (grown, merged) = grown_and_merged(&two_tone(10, 4, 5, 0, 200).unwrap());
    let n = check_coloring(&mut rp, grown.adjacency());
    rp.compare_values(2.0, n as f64, 0.0);
    let n = check_coloring(&mut rp, merged.adjacency());
    rp.compare_values(2.0, n as f64, 0.0);

    // A grid of cells is bipartite and ascending ids color it with two
    let (grown, merged) = grown_and_merged(&checkerboard(12, 12, 3, 10, 240).unwrap());
    rp.compare_values(16.0, grown.len() as f64, 0.0);
    let n = check_coloring(&mut rp, grown.adjacency());
    rp.compare_values(2.0, n as f64, 0.0);
    let n = check_coloring(&mut rp, merged.adjacency());
    rp.compare_values(2.0, n as f64, 0.0);

    assert!(rp.cleanup());
}

#[test]
fn coloring_reg_random() {
    let mut rp = RegParams::new("coloring_random");

    for seed in [2u64, 11, 73] {
        let (grown, merged) = grown_and_merged(&noise(20, 20, seed).unwrap());
        check_coloring(&mut rp, grown.adjacency());
        check_coloring(&mut rp, merged.adjacency());
    }

    // Merged ids are sparse; coloring must not assume 0..n
    let (grown, merged) = grown_and_merged(&noisy_blocks(36, 36, 6, 2, 8).unwrap());
    check_coloring(&mut rp, grown.adjacency());
    let colors = check_coloring(&mut rp, merged.adjacency());
    if rp.display() {
        eprintln!("{} merged regions, {} colors", merged.len(), colors);
    }

    assert!(rp.cleanup());
}
