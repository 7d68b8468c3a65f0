use bevy::math::DVec2;
use geo::Intersects;

use super::Ring;

/// Containment test used by the hover reactor.
///
/// Boundary policy: a point exactly on an edge or vertex counts as inside.
/// `Intersects` gives the closed-region semantics (unlike `Contains`, which
/// excludes the boundary), so hovering a shared parcel border still shows a
/// label instead of flickering between none and one.
pub fn ring_contains(ring: &Ring, point: DVec2) -> bool {
    if ring.is_degenerate() {
        return false;
    }
    ring.to_geo_polygon()
        .intersects(&geo::Point::new(point.x, point.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Ring {
        Ring::new(vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(0.0, 2.0),
            DVec2::new(2.0, 2.0),
            DVec2::new(2.0, 0.0),
            DVec2::new(0.0, 0.0),
        ])
    }

    #[test]
    fn test_point_inside_square() {
        assert!(ring_contains(&square(), DVec2::new(1.0, 1.0)));
    }

    #[test]
    fn test_point_outside_square() {
        assert!(!ring_contains(&square(), DVec2::new(5.0, 5.0)));
    }

    #[test]
    fn test_boundary_point_is_inside() {
        // Documented policy: edges and vertices are part of the region
        assert!(ring_contains(&square(), DVec2::new(0.0, 1.0)));
        assert!(ring_contains(&square(), DVec2::new(2.0, 2.0)));
    }

    #[test]
    fn test_degenerate_ring_contains_nothing() {
        let line = Ring::new(vec![DVec2::new(0.0, 0.0), DVec2::new(2.0, 2.0)]);
        assert!(!ring_contains(&line, DVec2::new(1.0, 1.0)));
    }
}
