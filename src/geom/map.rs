//! Mapping between logical coordinates and output coordinates.
//!
//! A `MapCoordinates` carries the zoom, the translation, the
//! orientation and the mirroring to be applied while drawing or
//! exporting. Macro bodies are drawn through a nested mapping whose
//! origin sits at `(100, 100)` in the macro's own logical space.

/// Smallest accepted magnitude.
pub const MIN_MAGNITUDE: f64 = 0.25;
/// Largest accepted magnitude.
pub const MAX_MAGNITUDE: f64 = 100.0;

/// Default grid step in logical units.
const DEFAULT_GRID_STEP: i32 = 5;

/// The coordinate mapping state.
#[derive(Debug, Clone)]
pub struct MapCoordinates {
    x_center: f64,
    y_center: f64,
    x_magnitude: f64,
    y_magnitude: f64,
    orientation: i32,
    pub mirror: bool,
    pub is_macro: bool,
    x_min: i32,
    x_max: i32,
    y_min: i32,
    y_max: i32,
    x_grid_step: i32,
    y_grid_step: i32,
}

impl Default for MapCoordinates {
    fn default() -> Self {
        Self::new()
    }
}

impl MapCoordinates {
    /// Create an identity mapping with unit magnitude.
    pub fn new() -> Self {
        Self {
            x_center: 0.0,
            y_center: 0.0,
            x_magnitude: 1.0,
            y_magnitude: 1.0,
            orientation: 0,
            mirror: false,
            is_macro: false,
            x_min: i32::MAX,
            x_max: i32::MIN,
            y_min: i32::MAX,
            y_max: i32::MIN,
            x_grid_step: DEFAULT_GRID_STEP,
            y_grid_step: DEFAULT_GRID_STEP,
        }
    }

    /// Set the X magnitude, clamped to the accepted range.
    pub fn set_x_magnitude(&mut self, m: f64) {
        self.x_magnitude = m.clamp(MIN_MAGNITUDE, MAX_MAGNITUDE);
    }

    /// Set the Y magnitude, clamped to the accepted range.
    pub fn set_y_magnitude(&mut self, m: f64) {
        self.y_magnitude = m.clamp(MIN_MAGNITUDE, MAX_MAGNITUDE);
    }

    /// Set both magnitudes, clamped to the accepted range.
    pub fn set_magnitudes(&mut self, xm: f64, ym: f64) {
        self.set_x_magnitude(xm);
        self.set_y_magnitude(ym);
    }

    /// Set both magnitudes without range checking.
    pub fn set_magnitudes_no_check(&mut self, xm: f64, ym: f64) {
        self.x_magnitude = xm;
        self.y_magnitude = ym;
    }

    pub fn x_magnitude(&self) -> f64 {
        self.x_magnitude
    }

    pub fn y_magnitude(&self) -> f64 {
        self.y_magnitude
    }

    pub fn set_x_center(&mut self, c: f64) {
        self.x_center = c;
    }

    pub fn set_y_center(&mut self, c: f64) {
        self.y_center = c;
    }

    pub fn x_center(&self) -> f64 {
        self.x_center
    }

    pub fn y_center(&self) -> f64 {
        self.y_center
    }

    /// Set the orientation in quarter turns. Values outside `0..=3`
    /// fall back to zero.
    pub fn set_orientation(&mut self, o: i32) {
        self.orientation = if (0..=3).contains(&o) { o } else { 0 };
    }

    pub fn orientation(&self) -> i32 {
        self.orientation
    }

    /// Grid step along X, always positive.
    pub fn x_grid_step(&self) -> i32 {
        self.x_grid_step
    }

    pub fn y_grid_step(&self) -> i32 {
        self.y_grid_step
    }

    /// Set the grid steps. Non-positive values are ignored.
    pub fn set_grid_steps(&mut self, xs: i32, ys: i32) {
        if xs > 0 {
            self.x_grid_step = xs;
        }
        if ys > 0 {
            self.y_grid_step = ys;
        }
    }

    /// Map a logical X coordinate to output units, without rounding
    /// and without extreme-point tracking.
    pub fn map_xr(&self, x: i32, y: i32) -> f64 {
        let mut xc = x as f64;
        let mut yc = y as f64;
        if self.is_macro {
            xc -= 100.0;
            yc -= 100.0;
        }
        let vv = if self.mirror {
            match self.orientation {
                1 => yc * self.y_magnitude,
                2 => xc * self.x_magnitude,
                3 => -yc * self.y_magnitude,
                _ => -xc * self.x_magnitude,
            }
        } else {
            match self.orientation {
                1 => -yc * self.y_magnitude,
                2 => -xc * self.x_magnitude,
                3 => yc * self.y_magnitude,
                _ => xc * self.x_magnitude,
            }
        };
        vv + self.x_center
    }

    /// Map a logical Y coordinate to output units, without rounding
    /// and without extreme-point tracking. Mirroring is around a
    /// vertical axis, so it does not affect Y.
    pub fn map_yr(&self, x: i32, y: i32) -> f64 {
        let mut xc = x as f64;
        let mut yc = y as f64;
        if self.is_macro {
            xc -= 100.0;
            yc -= 100.0;
        }
        let vv = match self.orientation {
            1 => xc * self.x_magnitude,
            2 => -yc * self.y_magnitude,
            3 => -xc * self.x_magnitude,
            _ => yc * self.y_magnitude,
        };
        vv + self.y_center
    }

    /// Map a logical X coordinate to rounded output units, tracking
    /// the extreme points seen so far.
    pub fn map_x(&mut self, x: i32, y: i32) -> i32 {
        let v = self.map_xr(x, y).round() as i32;
        self.x_min = self.x_min.min(v);
        self.x_max = self.x_max.max(v);
        v
    }

    /// Map a logical Y coordinate to rounded output units, tracking
    /// the extreme points seen so far.
    pub fn map_y(&mut self, x: i32, y: i32) -> i32 {
        let v = self.map_yr(x, y).round() as i32;
        self.y_min = self.y_min.min(v);
        self.y_max = self.y_max.max(v);
        v
    }

    /// Inverse mapping of an output X coordinate, without grid snap.
    pub fn unmap_x_nosnap(&self, x: i32) -> i32 {
        ((x as f64 - self.x_center) / self.x_magnitude).round() as i32
    }

    /// Inverse mapping of an output Y coordinate, without grid snap.
    pub fn unmap_y_nosnap(&self, y: i32) -> i32 {
        ((y as f64 - self.y_center) / self.y_magnitude).round() as i32
    }

    /// Forget the extreme points tracked so far.
    pub fn reset_min_max(&mut self) {
        self.x_min = i32::MAX;
        self.x_max = i32::MIN;
        self.y_min = i32::MAX;
        self.y_max = i32::MIN;
    }

    /// Manually track an output point as seen.
    pub fn track_point(&mut self, x: i32, y: i32) {
        self.x_min = self.x_min.min(x);
        self.x_max = self.x_max.max(x);
        self.y_min = self.y_min.min(y);
        self.y_max = self.y_max.max(y);
    }

    pub fn x_min(&self) -> i32 {
        self.x_min
    }

    pub fn x_max(&self) -> i32 {
        self.x_max
    }

    pub fn y_min(&self) -> i32 {
        self.y_min
    }

    pub fn y_max(&self) -> i32 {
        self.y_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_mapping() {
        let mut m = MapCoordinates::new();
        assert_eq!(m.map_x(10, 20), 10);
        assert_eq!(m.map_y(10, 20), 20);
    }

    #[test]
    fn test_magnitude_clamping() {
        let mut m = MapCoordinates::new();
        m.set_magnitudes(0.0, 1000.0);
        assert_eq!(m.x_magnitude(), MIN_MAGNITUDE);
        assert_eq!(m.y_magnitude(), MAX_MAGNITUDE);
        m.set_magnitudes_no_check(0.1, 0.1);
        assert_eq!(m.x_magnitude(), 0.1);
    }

    #[test]
    fn test_orientation_quarter_turn() {
        let mut m = MapCoordinates::new();
        m.set_orientation(1);
        // One quarter turn: x comes from -y, y comes from x.
        assert_eq!(m.map_x(10, 20), -20);
        assert_eq!(m.map_y(10, 20), 10);
    }

    #[test]
    fn test_mirror() {
        let mut m = MapCoordinates::new();
        m.mirror = true;
        assert_eq!(m.map_x(10, 20), -10);
        assert_eq!(m.map_y(10, 20), 20);
    }

    #[test]
    fn test_macro_origin_shift() {
        let mut m = MapCoordinates::new();
        m.is_macro = true;
        assert_eq!(m.map_x(100, 100), 0);
        assert_eq!(m.map_y(100, 100), 0);
    }

    #[test]
    fn test_extreme_tracking() {
        let mut m = MapCoordinates::new();
        m.map_x(10, 0);
        m.map_x(-30, 0);
        m.map_y(0, 45);
        assert_eq!(m.x_min(), -30);
        assert_eq!(m.x_max(), 10);
        assert_eq!(m.y_max(), 45);
        m.reset_min_max();
        assert_eq!(m.x_min(), i32::MAX);
    }

    #[test]
    fn test_unmap_round_trip() {
        let mut m = MapCoordinates::new();
        m.set_magnitudes(2.0, 2.0);
        m.set_x_center(10.0);
        let v = m.map_x(25, 0);
        assert_eq!(m.unmap_x_nosnap(v), 25);
    }

    #[test]
    fn test_invalid_orientation_resets() {
        let mut m = MapCoordinates::new();
        m.set_orientation(7);
        assert_eq!(m.orientation(), 0);
    }
}
