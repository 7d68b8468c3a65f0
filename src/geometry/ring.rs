use bevy::math::DVec2;
use geo::{LineString, Polygon};

use crate::constants::MIN_RING_POINTS;

/// A closed polygon boundary: ordered `[longitude, latitude]` pairs where
/// the first point equals the last.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ring {
    pub points: Vec<DVec2>,
}

impl Ring {
    pub fn new(points: Vec<DVec2>) -> Self {
        Self { points }
    }

    /// Build a closed ring from an open vertex sequence by repeating the
    /// first point at the end.
    pub fn close_from_open(mut points: Vec<DVec2>) -> Self {
        if let Some(&first) = points.first() {
            points.push(first);
        }
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => first == last,
            _ => false,
        }
    }

    /// A ring with fewer than four points cannot describe a closed triangle.
    /// Degenerate rings are skipped by containment and overlap computations.
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < MIN_RING_POINTS
    }

    pub(crate) fn to_geo_polygon(&self) -> Polygon<f64> {
        let coords: Vec<(f64, f64)> = self.points.iter().map(|p| (p.x, p.y)).collect();
        Polygon::new(LineString::from(coords), vec![])
    }

    pub(crate) fn from_geo_polygon(polygon: &Polygon<f64>) -> Self {
        let points = polygon
            .exterior()
            .coords()
            .map(|c| DVec2::new(c.x, c.y))
            .collect();
        Self { points }
    }
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
    fn test_square_is_closed() {
        assert!(square().is_closed());
        assert!(!square().is_degenerate());
    }

    #[test]
    fn test_close_from_open_repeats_first_point() {
        let ring = Ring::close_from_open(vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(0.0, 1.0),
            DVec2::new(1.0, 0.0),
        ]);
        assert_eq!(ring.len(), 4);
        assert!(ring.is_closed());
        assert!(!ring.is_degenerate());
    }

    #[test]
    fn test_short_ring_is_degenerate() {
        let ring = Ring::new(vec![DVec2::new(0.0, 0.0), DVec2::new(1.0, 1.0)]);
        assert!(ring.is_degenerate());
        assert!(Ring::default().is_degenerate());
    }

    #[test]
    fn test_geo_polygon_roundtrip() {
        let ring = square();
        let restored = Ring::from_geo_polygon(&ring.to_geo_polygon());
        assert_eq!(ring, restored);
    }
}
