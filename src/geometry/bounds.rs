use bevy::math::DVec2;

use super::Ring;

/// Axis-aligned bounding box in lon/lat degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl Bounds {
    pub fn from_point(p: DVec2) -> Self {
        Self {
            min_lon: p.x,
            min_lat: p.y,
            max_lon: p.x,
            max_lat: p.y,
        }
    }

    pub fn extend(&mut self, p: DVec2) {
        self.min_lon = self.min_lon.min(p.x);
        self.min_lat = self.min_lat.min(p.y);
        self.max_lon = self.max_lon.max(p.x);
        self.max_lat = self.max_lat.max(p.y);
    }

    /// Fold over all points of a ring. `None` for an empty ring.
    pub fn of_ring(ring: &Ring) -> Option<Self> {
        let mut points = ring.points.iter();
        let mut bounds = Self::from_point(*points.next()?);
        for &p in points {
            bounds.extend(p);
        }
        Some(bounds)
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }

    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn overlaps(&self, other: &Self) -> bool {
        self.min_lon <= other.max_lon
            && self.max_lon >= other.min_lon
            && self.min_lat <= other.max_lat
            && self.max_lat >= other.min_lat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring_of(coords: &[(f64, f64)]) -> Ring {
        Ring::new(coords.iter().map(|&(x, y)| DVec2::new(x, y)).collect())
    }

    #[test]
    fn test_bounds_of_square() {
        let square = ring_of(&[(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0), (0.0, 0.0)]);
        let bounds = Bounds::of_ring(&square).unwrap();
        assert_eq!(bounds.min_lon, 0.0);
        assert_eq!(bounds.min_lat, 0.0);
        assert_eq!(bounds.max_lon, 2.0);
        assert_eq!(bounds.max_lat, 2.0);
        assert_eq!(bounds.center(), DVec2::new(1.0, 1.0));
        assert_eq!(bounds.width(), 2.0);
        assert_eq!(bounds.height(), 2.0);
    }

    #[test]
    fn test_bounds_of_empty_ring() {
        assert!(Bounds::of_ring(&Ring::default()).is_none());
    }

    #[test]
    fn test_overlapping_boxes() {
        let a = Bounds::of_ring(&ring_of(&[(0.0, 0.0), (2.0, 2.0)])).unwrap();
        let b = Bounds::of_ring(&ring_of(&[(1.0, 1.0), (3.0, 3.0)])).unwrap();
        let c = Bounds::of_ring(&ring_of(&[(5.0, 5.0), (6.0, 6.0)])).unwrap();
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_touching_boxes_overlap() {
        // Shared edge counts as overlapping (clipping decides emptiness)
        let a = Bounds::of_ring(&ring_of(&[(0.0, 0.0), (1.0, 1.0)])).unwrap();
        let b = Bounds::of_ring(&ring_of(&[(1.0, 0.0), (2.0, 1.0)])).unwrap();
        assert!(a.overlaps(&b));
    }
}
