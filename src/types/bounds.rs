//! Axis-aligned bounding rectangle in logical coordinates.

use crate::types::PointG;

/// A min/max rectangle accumulated from a set of points.
///
/// A freshly created rectangle is empty: the minima start at `i32::MAX`
/// and the maxima at `i32::MIN`, so the first merged point initializes
/// both corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingRect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Default for BoundingRect {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundingRect {
    /// Create an empty rectangle.
    pub fn new() -> Self {
        Self {
            min_x: i32::MAX,
            min_y: i32::MAX,
            max_x: i32::MIN,
            max_y: i32::MIN,
        }
    }

    /// Create a rectangle from two opposite corners, in any order.
    pub fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            min_x: x1.min(x2),
            min_y: y1.min(y2),
            max_x: x1.max(x2),
            max_y: y1.max(y2),
        }
    }

    /// True if no point has been merged yet.
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Expand the rectangle to contain `(x, y)`.
    pub fn merge_xy(&mut self, x: i32, y: i32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Expand the rectangle to contain a point.
    pub fn merge_point(&mut self, p: PointG) {
        self.merge_xy(p.x, p.y);
    }

    /// Expand the rectangle to contain another rectangle.
    pub fn merge(&mut self, other: &BoundingRect) {
        if !other.is_empty() {
            self.merge_xy(other.min_x, other.min_y);
            self.merge_xy(other.max_x, other.max_y);
        }
    }

    /// Width of the rectangle, zero when empty.
    pub fn width(&self) -> i32 {
        if self.is_empty() {
            0
        } else {
            self.max_x - self.min_x
        }
    }

    /// Height of the rectangle, zero when empty.
    pub fn height(&self) -> i32 {
        if self.is_empty() {
            0
        } else {
            self.max_y - self.min_y
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let b = BoundingRect::new();
        assert!(b.is_empty());
        assert_eq!(b.width(), 0);
        assert_eq!(b.height(), 0);
    }

    #[test]
    fn test_merge_points() {
        let mut b = BoundingRect::new();
        b.merge_xy(10, 20);
        b.merge_xy(-5, 40);
        assert_eq!(b.min_x, -5);
        assert_eq!(b.max_x, 10);
        assert_eq!(b.width(), 15);
        assert_eq!(b.height(), 20);
    }

    #[test]
    fn test_from_corners_any_order() {
        let b = BoundingRect::from_corners(30, 5, 10, 25);
        assert_eq!(b.min_x, 10);
        assert_eq!(b.max_y, 25);
    }

    #[test]
    fn test_merge_rects() {
        let mut a = BoundingRect::from_corners(0, 0, 10, 10);
        let b = BoundingRect::from_corners(5, -5, 20, 8);
        a.merge(&b);
        assert_eq!(a, BoundingRect::from_corners(0, -5, 20, 10));

        // Merging an empty rectangle changes nothing.
        a.merge(&BoundingRect::new());
        assert_eq!(a, BoundingRect::from_corners(0, -5, 20, 10));
    }
}
