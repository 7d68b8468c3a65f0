use geo::ChamberlainDuquetteArea;

use super::Ring;
use crate::constants::SQUARE_METERS_PER_HECTARE;

/// Surface area of a ring in hectares, rounded to two decimal places.
///
/// Uses the Chamberlain-Duquette spherical excess approximation on the WGS84
/// sphere, the same algorithm the common web mapping toolkits use, so values
/// match what users see elsewhere. Degenerate or self-intersecting rings get
/// a best-effort value rather than an error.
pub fn ring_area_hectares(ring: &Ring) -> f64 {
    let square_meters = ring.to_geo_polygon().chamberlain_duquette_unsigned_area();
    round2(square_meters / SQUARE_METERS_PER_HECTARE)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::DVec2;

    fn ring_of(coords: &[(f64, f64)]) -> Ring {
        Ring::new(coords.iter().map(|&(x, y)| DVec2::new(x, y)).collect())
    }

    #[test]
    fn test_area_is_non_negative() {
        let square = ring_of(&[(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0), (0.0, 0.0)]);
        assert!(ring_area_hectares(&square) > 0.0);

        let degenerate = ring_of(&[(0.0, 0.0), (1.0, 1.0)]);
        assert!(ring_area_hectares(&degenerate) >= 0.0);
    }

    #[test]
    fn test_area_invariant_under_reversal() {
        let square = ring_of(&[(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0), (0.0, 0.0)]);
        let mut reversed = square.clone();
        reversed.points.reverse();
        assert_eq!(ring_area_hectares(&square), ring_area_hectares(&reversed));
    }

    #[test]
    fn test_area_scales_with_ring_size() {
        let small = ring_of(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0)]);
        let large = ring_of(&[(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0), (0.0, 0.0)]);
        assert!(ring_area_hectares(&large) > ring_area_hectares(&small));
    }

    #[test]
    fn test_area_is_deterministic() {
        let square = ring_of(&[(10.0, 50.0), (10.0, 51.0), (11.0, 51.0), (11.0, 50.0), (10.0, 50.0)]);
        assert_eq!(ring_area_hectares(&square), ring_area_hectares(&square.clone()));
    }

    #[test]
    fn test_rounding_to_two_decimals() {
        assert_eq!(round2(1.005_001), 1.01);
        assert_eq!(round2(2.994_999), 2.99);
        assert_eq!(round2(0.0), 0.0);
    }
}
