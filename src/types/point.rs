//! Integer point in logical coordinates.

use std::fmt;

/// A point expressed in logical units (one logical unit is 127 um, or
/// 5 mil).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PointG {
    pub x: i32,
    pub y: i32,
}

impl PointG {
    /// Create a new point.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate the point in place.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Mirror the point horizontally around the vertical axis `x = xpos`.
    pub fn mirror_x(&mut self, xpos: i32) {
        self.x = 2 * xpos - self.x;
    }

    /// Rotate the point by a quarter turn clockwise around `(px, py)`.
    pub fn rotate_quarter(&mut self, px: i32, py: i32) {
        let (x, y) = (self.x, self.y);
        self.x = px - (y - py);
        self.y = py + (x - px);
    }
}

impl fmt::Display for PointG {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
