//! Axis-aligned bounding box over rendered geometry

use gcodesplit_core::Point;
use serde::{Deserialize, Serialize};

/// Min/max tracker per axis
///
/// Starts inverted (min = MAX, max = MIN) so the first update defines it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new()
    }
}

impl Bounds {
    pub fn new() -> Self {
        Self {
            min_x: f64::MAX,
            max_x: f64::MIN,
            min_y: f64::MAX,
            max_y: f64::MIN,
            min_z: f64::MAX,
            max_z: f64::MIN,
        }
    }

    pub fn update(&mut self, x: f64, y: f64, z: f64) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
        self.min_z = self.min_z.min(z);
        self.max_z = self.max_z.max(z);
    }

    pub fn include(&mut self, point: Point) {
        self.update(point.x, point.y, point.z);
    }

    /// Grow to cover `other` as well
    pub fn merge(&mut self, other: &Bounds) {
        if other.is_valid() {
            self.update(other.min_x, other.min_y, other.min_z);
            self.update(other.max_x, other.max_y, other.max_z);
        }
    }

    pub fn is_valid(&self) -> bool {
        self.min_x.is_finite()
            && self.max_x.is_finite()
            && self.min_y.is_finite()
            && self.max_y.is_finite()
            && self.min_z.is_finite()
            && self.max_z.is_finite()
            && self.min_x <= self.max_x
            && self.min_y <= self.max_y
            // Z might be single plane (min_z == max_z) which is valid
            && self.min_z <= self.max_z
    }

    pub fn width(&self) -> f64 {
        if self.is_valid() {
            self.max_x - self.min_x
        } else {
            0.0
        }
    }

    pub fn height(&self) -> f64 {
        if self.is_valid() {
            self.max_y - self.min_y
        } else {
            0.0
        }
    }

    pub fn center(&self) -> Option<Point> {
        self.is_valid().then(|| {
            Point::new(
                (self.min_x + self.max_x) / 2.0,
                (self.min_y + self.max_y) / 2.0,
                (self.min_z + self.max_z) / 2.0,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bounds_invalid() {
        let bounds = Bounds::new();
        assert!(!bounds.is_valid());
        assert_eq!(bounds.width(), 0.0);
        assert_eq!(bounds.center(), None);
    }

    #[test]
    fn test_update_and_merge() {
        let mut a = Bounds::new();
        a.update(1.0, 2.0, 0.0);
        a.update(3.0, -1.0, 0.0);
        assert!(a.is_valid());
        assert_eq!(a.width(), 2.0);
        assert_eq!(a.height(), 3.0);

        let mut b = Bounds::new();
        b.include(Point::new(-4.0, 0.0, -1.0));
        a.merge(&b);
        assert_eq!(a.min_x, -4.0);
        assert_eq!(a.min_z, -1.0);
        a.merge(&Bounds::new());
        assert_eq!(a.min_x, -4.0);
    }
}
