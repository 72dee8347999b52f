//! Distances between a point and simple geometric shapes.
//!
//! These routines are used for picking elements, so accuracy far from
//! the target does not matter: whenever a result is known to exceed
//! [`MIN_DISTANCE`] a shortcut is taken and `MIN_DISTANCE` itself is
//! returned.

/// Distances greater than or equal to this value are never reported
/// precisely.
pub const MIN_DISTANCE: i32 = 100;

/// Number of linear segments used to approximate a Bezier curve when
/// hit-testing it.
pub const MAX_BEZIER_SEGMENTS: usize = 10;

/// Approximate euclidean distance between two points.
pub fn point_to_point(xa: i32, ya: i32, xb: i32, yb: i32) -> i32 {
    if (xa - xb).abs() < MIN_DISTANCE || (ya - yb).abs() < MIN_DISTANCE {
        let dx = (xa - xb) as f64;
        let dy = (ya - yb) as f64;
        (dx * dx + dy * dy).sqrt() as i32
    } else {
        MIN_DISTANCE
    }
}

/// Approximate distance between a point and a segment. Fixed-point
/// integer arithmetic with three implied decimals.
pub fn point_to_segment(xa: i32, ya: i32, xb: i32, yb: i32, x: i32, y: i32) -> i32 {
    let (xmin, xmax) = if xa > xb { (xb, xa) } else { (xa, xb) };
    if x < xmin - MIN_DISTANCE || x > xmax + MIN_DISTANCE {
        return MIN_DISTANCE;
    }
    let (ymin, ymax) = if ya > yb { (yb, ya) } else { (ya, yb) };
    if y < ymin - MIN_DISTANCE || y > ymax + MIN_DISTANCE {
        return MIN_DISTANCE;
    }

    if xa == xb && ya == yb {
        let dx = (x - xa) as f64;
        let dy = (y - yb) as f64;
        return (dx * dx + dy * dy).sqrt() as i32;
    }

    let mut dx = (xb - xa) as i64;
    let mut dy = (yb - ya) as i64;

    let t = 1000 * ((x - xa) as i64 * dx + (y - ya) as i64 * dy) / (dx * dx + dy * dy);
    if t < 0 {
        dx = (x - xa) as i64;
        dy = (y - ya) as i64;
    } else if t > 1000 {
        dx = (x - xb) as i64;
        dy = (y - yb) as i64;
    } else {
        dx = x as i64 - (xa as i64 + t * dx / 1000);
        dy = y as i64 - (ya as i64 + t * dy / 1000);
    }
    ((dx * dx + dy * dy) as f64).sqrt() as i32
}

/// Whether a point lies inside a polygon, by the alternance rule.
pub fn point_in_polygon(xp: &[i32], yp: &[i32], x: f64, y: f64) -> bool {
    let npol = xp.len().min(yp.len());
    let mut c = false;
    let mut j = npol.wrapping_sub(1);
    for i in 0..npol {
        let yi = yp[i] as f64;
        let yj = yp[j] as f64;
        if ((yi <= y && y < yj) || (yj <= y && y < yi))
            && x < (xp[j] - xp[i]) as f64 * (y - yi) / (yj - yi) + xp[i] as f64
        {
            c = !c;
        }
        j = i;
    }
    c
}

/// Whether a point lies inside the ellipse inscribed in the rectangle
/// with top-left corner `(ex, ey)` and the given size.
pub fn point_in_ellipse(ex: f64, ey: f64, w: f64, h: f64, px: f64, py: f64) -> bool {
    let dx = (px - (ex + w / 2.0)).abs();
    let dy = (py - (ey + h / 2.0)).abs();

    if dx > w / 2.0 || dy > h / 2.0 {
        return false;
    }

    // The principal axes are half of the width and height, hence the
    // factor of four.
    4.0 * dx * dx / w / w + 4.0 * dy * dy / h / h < 1.0
}

/// Distance between a point and the contour of an ellipse.
pub fn point_to_ellipse(ex: i32, ey: i32, w: i32, h: i32, px: i32, py: i32) -> i32 {
    let (ex, ey, w, h, px, py) = (
        ex as f64, ey as f64, w as f64, h as f64, px as f64, py as f64,
    );
    let dx = (px - (ex + w / 2.0)).abs();
    let dy = (py - (ey + h / 2.0)).abs();

    // Degenerate ellipses collapse to segments; this avoids a division
    // by zero.
    if w == 0.0 {
        return point_to_segment(
            ex as i32, ey as i32, ex as i32, (ey + h) as i32, px as i32, py as i32,
        );
    }
    if h == 0.0 {
        return point_to_segment(
            ex as i32, ey as i32, (ex + w) as i32, ey as i32, px as i32, py as i32,
        );
    }

    let l = (dx * dx / w / w + dy * dy / h / h) * 4.0;
    ((l - 1.0).abs() * w.min(h) / 4.0).round() as i32
}

/// Whether a point lies inside a rectangle.
pub fn point_in_rectangle(ex: i32, ey: i32, w: i32, h: i32, px: i32, py: i32) -> bool {
    !(ex > px || px > ex + w || ey > py || py > ey + h)
}

/// Distance between a point and the closest border of a rectangle.
pub fn point_to_rectangle(ex: i32, ey: i32, w: i32, h: i32, px: i32, py: i32) -> i32 {
    let d1 = point_to_segment(ex, ey, ex + w, ey, px, py);
    let d2 = point_to_segment(ex + w, ey, ex + w, ey + h, px, py);
    let d3 = point_to_segment(ex + w, ey + h, ex, ey + h, px, py);
    let d4 = point_to_segment(ex, ey + h, ex, ey, px, py);
    d1.min(d2).min(d3.min(d4))
}

/// Approximate distance between a point and a cubic Bezier curve. The
/// curve is broken into [`MAX_BEZIER_SEGMENTS`] chords and the minimum
/// chord distance is reported.
#[allow(clippy::too_many_arguments)]
pub fn point_to_bezier(
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    x3: i32,
    y3: i32,
    x4: i32,
    y4: i32,
    px: i32,
    py: i32,
) -> i32 {
    let mut xs = [0i32; MAX_BEZIER_SEGMENTS + 1];
    let mut ys = [0i32; MAX_BEZIER_SEGMENTS + 1];

    for i in 0..=MAX_BEZIER_SEGMENTS {
        let u = i as f64 / MAX_BEZIER_SEGMENTS as f64;
        let umu = 1.0 - u;
        let b03 = umu * umu * umu;
        let b13 = 3.0 * u * umu * umu;
        let b23 = 3.0 * u * u * umu;
        let b33 = u * u * u;

        xs[i] = (x1 as f64 * b03 + x2 as f64 * b13 + x3 as f64 * b23 + x4 as f64 * b33) as i32;
        ys[i] = (y1 as f64 * b03 + y2 as f64 * b13 + y3 as f64 * b23 + y4 as f64 * b33) as i32;
    }

    let mut distance = i32::MAX;
    for j in 0..MAX_BEZIER_SEGMENTS {
        distance = distance.min(point_to_segment(
            xs[j],
            ys[j],
            xs[j + 1],
            ys[j + 1],
            px,
            py,
        ));
    }
    distance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_to_point() {
        assert_eq!(point_to_point(0, 0, 3, 4), 5);
        // Far away points short-circuit.
        assert_eq!(point_to_point(0, 0, 500, 500), MIN_DISTANCE);
    }

    #[test]
    fn test_point_to_segment() {
        // Point right above the middle of a horizontal segment.
        assert_eq!(point_to_segment(0, 0, 100, 0, 50, 10), 10);
        // Beyond one end the distance goes to the endpoint.
        assert_eq!(point_to_segment(0, 0, 10, 0, 13, 4), 5);
        // Degenerate segment.
        assert_eq!(point_to_segment(5, 5, 5, 5, 8, 9), 5);
    }

    #[test]
    fn test_point_in_polygon() {
        let xs = [0, 100, 100, 0];
        let ys = [0, 0, 100, 100];
        assert!(point_in_polygon(&xs, &ys, 50.0, 50.0));
        assert!(!point_in_polygon(&xs, &ys, 150.0, 50.0));
    }

    #[test]
    fn test_point_in_ellipse() {
        assert!(point_in_ellipse(0.0, 0.0, 100.0, 50.0, 50.0, 25.0));
        assert!(!point_in_ellipse(0.0, 0.0, 100.0, 50.0, 2.0, 2.0));
    }

    #[test]
    fn test_point_to_ellipse_degenerate() {
        // Width zero: the ellipse is a vertical segment.
        assert_eq!(point_to_ellipse(10, 0, 0, 100, 15, 50), 5);
    }

    #[test]
    fn test_point_to_rectangle() {
        assert_eq!(point_to_rectangle(0, 0, 100, 100, 50, 90), 10);
        assert!(point_in_rectangle(0, 0, 100, 100, 50, 90));
        assert!(!point_in_rectangle(0, 0, 100, 100, 150, 90));
    }

    #[test]
    fn test_point_to_bezier_on_straight_chord() {
        // A Bezier with collinear control points degenerates to a
        // segment.
        let d = point_to_bezier(0, 0, 30, 0, 60, 0, 90, 0, 45, 20);
        assert!((d - 20).abs() <= 1);
    }
}
