//! Natural cubic spline interpolation for complex curves.
//!
//! The spline code follows the classic tridiagonal solution: the
//! derivatives at the knots are obtained by row reduction and back
//! substitution, then each span is expressed as a cubic polynomial in
//! the local parameter `u`.

use nalgebra::Point2;

/// Number of chords used to flatten each spline span.
pub const STEPS: usize = 24;

/// One cubic span, `a + b u + c u^2 + d u^3` for `0 <= u <= 1`.
#[derive(Debug, Clone, Copy)]
pub struct Cubic {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    /// Derivative at the start knot.
    pub d1: f64,
    /// Derivative at the end knot.
    pub d2: f64,
}

impl Cubic {
    fn new(a: f64, b: f64, c: f64, d: f64, d1: f64, d2: f64) -> Self {
        Self { a, b, c, d, d1, d2 }
    }

    /// Evaluate the polynomial at `u`.
    pub fn eval(&self, u: f64) -> f64 {
        ((self.d * u + self.c) * u + self.b) * u + self.a
    }
}

/// Natural cubic spline through `x[0] .. x[n]` with free ends.
/// Returns `n` spans, or none when fewer than two knots are given.
pub fn calc_natural_cubic(x: &[f64]) -> Vec<Cubic> {
    let n = x.len().wrapping_sub(1);
    if x.len() < 2 {
        return Vec::new();
    }

    let mut gamma = vec![0.0; n + 1];
    let mut delta = vec![0.0; n + 1];
    let mut dd = vec![0.0; n + 1];

    gamma[0] = 0.5;
    for i in 1..n {
        gamma[i] = 1.0 / (4.0 - gamma[i - 1]);
    }
    gamma[n] = 1.0 / (2.0 - gamma[n - 1]);

    delta[0] = 3.0 * (x[1] - x[0]) * gamma[0];
    for i in 1..n {
        delta[i] = (3.0 * (x[i + 1] - x[i - 1]) - delta[i - 1]) * gamma[i];
    }
    delta[n] = (3.0 * (x[n] - x[n - 1]) - delta[n - 1]) * gamma[n];

    dd[n] = delta[n];
    for i in (0..n).rev() {
        dd[i] = delta[i] - gamma[i] * dd[i + 1];
    }

    (0..n)
        .map(|i| {
            Cubic::new(
                x[i],
                dd[i],
                3.0 * (x[i + 1] - x[i]) - 2.0 * dd[i] - dd[i + 1],
                2.0 * (x[i] - x[i + 1]) + dd[i] + dd[i + 1],
                dd[i],
                dd[i + 1],
            )
        })
        .collect()
}

/// Closed natural cubic spline through `x[0] .. x[n]`, wrapping back to
/// the first knot. Returns `n + 1` spans.
pub fn calc_natural_cubic_closed(x: &[f64]) -> Vec<Cubic> {
    let n = x.len().wrapping_sub(1);
    if x.len() < 2 {
        return Vec::new();
    }

    let mut w = vec![0.0; n + 1];
    let mut v = vec![0.0; n + 1];
    let mut y = vec![0.0; n + 1];
    let mut dd = vec![0.0; n + 1];

    let mut z = 0.25;
    w[1] = z;
    v[1] = z;
    y[0] = z * 3.0 * (x[1] - x[n]);
    let mut hh = 4.0;
    let mut ff = 3.0 * (x[0] - x[n - 1]);
    let mut gg = 1.0;
    for k in 1..n {
        z = 1.0 / (4.0 - v[k]);
        v[k + 1] = z;
        w[k + 1] = -z * w[k];
        y[k] = z * (3.0 * (x[k + 1] - x[k - 1]) - y[k - 1]);
        hh -= gg * w[k];
        ff -= gg * y[k - 1];
        gg = -v[k] * gg;
    }
    hh -= (gg + 1.0) * (v[n] + w[n]);
    y[n] = ff - (gg + 1.0) * y[n - 1];

    dd[n] = y[n] / hh;
    dd[n - 1] = y[n - 1] - (v[n] + w[n]) * dd[n];
    for k in (0..n.saturating_sub(1)).rev() {
        dd[k] = y[k] - v[k + 1] * dd[k + 1] - w[k + 1] * dd[n];
    }

    let mut cc = Vec::with_capacity(n + 1);
    for k in 0..n {
        cc.push(Cubic::new(
            x[k],
            dd[k],
            3.0 * (x[k + 1] - x[k]) - 2.0 * dd[k] - dd[k + 1],
            2.0 * (x[k] - x[k + 1]) + dd[k] + dd[k + 1],
            dd[k],
            dd[k + 1],
        ));
    }
    cc.push(Cubic::new(
        x[n],
        dd[n],
        3.0 * (x[0] - x[n]) - 2.0 * dd[n] - dd[0],
        2.0 * (x[n] - x[0]) + dd[n] + dd[0],
        dd[n],
        dd[0],
    ));
    cc
}

/// Flatten a spline through the given knots into a polyline. Each span
/// contributes [`STEPS`] chords; the first returned point is the first
/// knot itself.
pub fn sample_spline(xs: &[f64], ys: &[f64], closed: bool) -> Vec<Point2<f64>> {
    let (xx, yy) = if closed {
        (calc_natural_cubic_closed(xs), calc_natural_cubic_closed(ys))
    } else {
        (calc_natural_cubic(xs), calc_natural_cubic(ys))
    };
    if xx.is_empty() || yy.is_empty() {
        return Vec::new();
    }

    let mut pp = Vec::with_capacity(xx.len() * STEPS + 1);
    pp.push(Point2::new(xx[0].eval(0.0), yy[0].eval(0.0)));
    for (cx, cy) in xx.iter().zip(yy.iter()) {
        for j in 1..=STEPS {
            let u = j as f64 / STEPS as f64;
            pp.push(Point2::new(cx.eval(u), cy.eval(u)));
        }
    }
    pp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spline_interpolates_knots() {
        let xs = [0.0, 10.0, 20.0, 30.0];
        let cc = calc_natural_cubic(&xs);
        assert_eq!(cc.len(), 3);
        for (i, c) in cc.iter().enumerate() {
            assert!((c.eval(0.0) - xs[i]).abs() < 1e-9);
            assert!((c.eval(1.0) - xs[i + 1]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_closed_spline_wraps() {
        let xs = [0.0, 10.0, 5.0];
        let cc = calc_natural_cubic_closed(&xs);
        assert_eq!(cc.len(), 3);
        // The last span ends back at the first knot.
        assert!((cc[2].eval(1.0) - xs[0]).abs() < 1e-9);
    }

    #[test]
    fn test_too_few_knots() {
        assert!(calc_natural_cubic(&[1.0]).is_empty());
        assert!(calc_natural_cubic_closed(&[1.0]).is_empty());
    }

    #[test]
    fn test_sample_spline_size() {
        let xs = [0.0, 10.0, 20.0];
        let ys = [0.0, 5.0, 0.0];
        let pp = sample_spline(&xs, &ys, false);
        assert_eq!(pp.len(), 2 * STEPS + 1);
        assert!((pp[0].x - 0.0).abs() < 1e-9);
        assert!((pp.last().map(|p| p.x).unwrap_or(-1.0) - 20.0).abs() < 1e-9);
    }
}
