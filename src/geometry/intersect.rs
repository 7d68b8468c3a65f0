use geo::BooleanOps;

use super::{Bounds, Ring};

/// Overlap regions between every unordered pair of distinct rings.
///
/// Pairs that do not overlap contribute nothing; an empty result is a valid
/// outcome, not a failure. The pairing is O(n^2) in ring count, which is the
/// accepted tradeoff at the tens-of-parcels scale this tool targets; the
/// only shortcut is a bounding-box reject before the actual clipping.
pub fn pairwise_intersections(rings: &[Ring]) -> Vec<Ring> {
    let mut regions = Vec::new();

    for (i, a) in rings.iter().enumerate() {
        if a.is_degenerate() {
            continue;
        }
        let Some(a_bounds) = Bounds::of_ring(a) else {
            continue;
        };

        for b in &rings[i + 1..] {
            if b.is_degenerate() {
                continue;
            }
            let Some(b_bounds) = Bounds::of_ring(b) else {
                continue;
            };
            if !a_bounds.overlaps(&b_bounds) {
                continue;
            }

            let clipped = a.to_geo_polygon().intersection(&b.to_geo_polygon());
            for polygon in &clipped {
                let region = Ring::from_geo_polygon(polygon);
                if !region.is_degenerate() {
                    regions.push(region);
                }
            }
        }
    }

    regions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::ring_area_hectares;
    use bevy::math::DVec2;

    fn ring_of(coords: &[(f64, f64)]) -> Ring {
        Ring::new(coords.iter().map(|&(x, y)| DVec2::new(x, y)).collect())
    }

    #[test]
    fn test_disjoint_boxes_yield_nothing() {
        let a = ring_of(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0)]);
        let b = ring_of(&[(5.0, 5.0), (5.0, 6.0), (6.0, 6.0), (6.0, 5.0), (5.0, 5.0)]);
        assert!(pairwise_intersections(&[a, b]).is_empty());
    }

    #[test]
    fn test_single_ring_yields_nothing() {
        let a = ring_of(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0)]);
        assert!(pairwise_intersections(&[a]).is_empty());
        assert!(pairwise_intersections(&[]).is_empty());
    }

    #[test]
    fn test_overlapping_squares_produce_the_overlap_square() {
        let a = ring_of(&[(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0), (0.0, 0.0)]);
        let b = ring_of(&[(1.0, 1.0), (1.0, 3.0), (3.0, 3.0), (3.0, 1.0), (1.0, 1.0)]);
        let regions = pairwise_intersections(&[a, b]);
        assert_eq!(regions.len(), 1);

        // The overlap is the unit square [1,1]..[2,2]; compare areas rather
        // than vertex order, which the clipper does not guarantee.
        let expected = ring_of(&[(1.0, 1.0), (1.0, 2.0), (2.0, 2.0), (2.0, 1.0), (1.0, 1.0)]);
        let got = ring_area_hectares(&regions[0]);
        let want = ring_area_hectares(&expected);
        assert!((got - want).abs() < 0.01, "got {got}, want {want}");
    }

    #[test]
    fn test_three_rings_pair_count() {
        // Three mutually overlapping squares give three pairwise regions
        let a = ring_of(&[(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0), (0.0, 0.0)]);
        let b = ring_of(&[(1.0, 0.0), (1.0, 2.0), (3.0, 2.0), (3.0, 0.0), (1.0, 0.0)]);
        let c = ring_of(&[(0.5, 0.5), (0.5, 1.5), (2.5, 1.5), (2.5, 0.5), (0.5, 0.5)]);
        assert_eq!(pairwise_intersections(&[a, b, c]).len(), 3);
    }

    #[test]
    fn test_degenerate_rings_are_skipped() {
        let a = ring_of(&[(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0), (0.0, 0.0)]);
        let broken = ring_of(&[(1.0, 1.0), (1.5, 1.5)]);
        assert!(pairwise_intersections(&[a, broken]).is_empty());
    }
}
