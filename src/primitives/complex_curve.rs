//! The complex curve primitive (`CV` outline, `CP` filled): a natural
//! cubic spline through an arbitrary number of knots, open or closed.

use nalgebra::Point2;

use crate::error::Result;
use crate::export::{ArrowParams, ExportContext, Exporter};
use crate::geom::curves::{calc_natural_cubic, calc_natural_cubic_closed, sample_spline, STEPS};
use crate::geom::distances::{point_in_polygon, point_to_segment};
use crate::geom::{Arrow, MapCoordinates};
use crate::types::{BoundingRect, PointG};

use super::{check_dash_style, parse_layer, Primitive, PrimitiveCommon, MAX_POLY_POINTS};

/// A spline through a list of knots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplexCurve {
    pub points: Vec<PointG>,
    pub closed: bool,
    pub filled: bool,
    pub arrow: Arrow,
    pub dash: i32,
    pub common: PrimitiveCommon,
}

impl ComplexCurve {
    pub fn new(closed: bool, filled: bool, layer: usize) -> Self {
        let mut c = ComplexCurve {
            closed,
            filled,
            ..Default::default()
        };
        c.common.layer = layer;
        c
    }

    /// Append a knot and move the default text anchors next to it.
    pub fn add_point(&mut self, x: i32, y: i32) {
        self.points.push(PointG::new(x, y));
        self.common.reset_text_positions(x, y);
    }

    /// Flatten the spline into a polyline, in logical units.
    fn sampled(&self) -> Vec<Point2<f64>> {
        let xs: Vec<f64> = self.points.iter().map(|p| p.x as f64).collect();
        let ys: Vec<f64> = self.points.iter().map(|p| p.y as f64).collect();
        sample_spline(&xs, &ys, self.closed)
    }
}

impl Primitive for ComplexCurve {
    fn common(&self) -> &PrimitiveCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut PrimitiveCommon {
        &mut self.common
    }

    fn command(&self) -> &'static str {
        if self.filled {
            "CP"
        } else {
            "CV"
        }
    }

    fn parse_tokens(&mut self, tokens: &[String]) -> Result<()> {
        let nn = tokens.len();
        if nn < 6 {
            return Err("bad arguments on CP/CV".into());
        }
        self.filled = tokens[0] == "CP";
        self.closed = tokens[1] == "1";
        self.points.clear();
        let mut j = 2;
        while j < nn - 1 {
            if j + 1 < nn - 1 && tokens[j + 1] == "FCJ" {
                break;
            }
            let x: i32 = tokens[j].parse()?;
            j += 1;
            if j >= nn - 1 {
                return Err("bad arguments on CP/CV".into());
            }
            let y: i32 = tokens[j].parse()?;
            j += 1;
            self.add_point(x, y);
        }
        if self.points.len() > MAX_POLY_POINTS {
            return Err("too many points on CP/CV".into());
        }
        if nn > j {
            self.common.layer = parse_layer(&tokens[j]);
            j += 1;
            if nn > j {
                if tokens[j] == "FCJ" {
                    j += 1;
                    j = self.arrow.parse_tokens(tokens, j)?;
                    let dash = tokens.get(j).ok_or("bad arguments on CP/CV")?;
                    self.dash = check_dash_style(dash.parse()?);
                }
            }
        }
        Ok(())
    }

    fn to_text(&self, extensions: bool) -> String {
        // A single knot without text carries no information.
        if self.points.len() < 2 && !self.common.has_text() {
            return String::new();
        }
        let mut s = format!("{} {}", self.command(), if self.closed { 1 } else { 0 });
        for p in &self.points {
            s.push_str(&format!(" {} {}", p.x, p.y));
        }
        s.push_str(&format!(" {}\n", self.common.layer));
        if extensions && (self.arrow.at_least_one() || self.dash > 0 || self.common.has_text()) {
            let textflag = if self.common.has_text() { "1" } else { "0" };
            s.push_str(&format!(
                "FCJ {} {} {}\n",
                self.arrow.save_tokens(),
                self.dash,
                textflag
            ));
        }
        s.push_str(&self.common.save_text(false));
        s
    }

    fn distance_to_point(&self, x: i32, y: i32) -> i32 {
        let pp = self.sampled();
        if pp.len() < 2 {
            return i32::MAX;
        }
        let xs: Vec<i32> = pp.iter().map(|p| p.x.round() as i32).collect();
        let ys: Vec<i32> = pp.iter().map(|p| p.y.round() as i32).collect();
        if self.filled && point_in_polygon(&xs, &ys, x as f64, y as f64) {
            return 0;
        }
        let mut d = i32::MAX;
        for i in 1..xs.len() {
            d = d.min(point_to_segment(
                xs[i - 1],
                ys[i - 1],
                xs[i],
                ys[i],
                x,
                y,
            ));
        }
        d
    }

    fn bounding_box(&self) -> BoundingRect {
        let mut b = BoundingRect::new();
        for p in self.sampled() {
            b.merge_xy(p.x.floor() as i32, p.y.floor() as i32);
            b.merge_xy(p.x.ceil() as i32, p.y.ceil() as i32);
        }
        b
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        for p in &mut self.points {
            p.translate(dx, dy);
        }
        self.common.translate(dx, dy);
    }

    fn mirror(&mut self, xpos: i32) {
        for p in &mut self.points {
            p.mirror_x(xpos);
        }
        self.common.mirror(xpos);
    }

    fn rotate(&mut self, px: i32, py: i32) {
        for p in &mut self.points {
            p.rotate_quarter(px, py);
        }
        self.common.rotate(px, py);
    }

    fn export(
        &self,
        exp: &mut dyn Exporter,
        cs: &mut MapCoordinates,
        ctx: &mut ExportContext,
    ) -> Result<()> {
        let n = self.points.len();
        if n < 2 {
            return self.common.export_text(exp, cs, -1);
        }

        let mut xp: Vec<f64> = Vec::with_capacity(n);
        let mut yp: Vec<f64> = Vec::with_capacity(n);
        let mut control: Vec<Point2<f64>> = Vec::with_capacity(n);
        for p in &self.points {
            let x = cs.map_xr(p.x, p.y);
            let y = cs.map_yr(p.x, p.y);
            cs.track_point(x.round() as i32, y.round() as i32);
            xp.push(x);
            yp.push(y);
            control.push(Point2::new(x, y));
        }

        let arrow_params = ArrowParams::new(&self.arrow, cs.x_magnitude());
        let stroke = ctx.config.line_width * cs.x_magnitude();

        let handled = exp.export_curve(
            &control,
            self.filled,
            self.closed,
            self.common.layer,
            &arrow_params,
            self.dash,
            stroke,
        )?;
        if !handled {
            self.export_as_polyline(exp, cs, &mut xp, &mut yp, stroke)?;
        }
        self.common.export_text(exp, cs, -1)
    }
}

impl ComplexCurve {
    /// Fallback used with exporters that have no native spline: the
    /// curve is flattened into short chords. Open curves are drawn as a
    /// run of lines with an accumulated dash phase so that the dashes
    /// flow along the whole curve.
    fn export_as_polyline(
        &self,
        exp: &mut dyn Exporter,
        cs: &mut MapCoordinates,
        xp: &mut [f64],
        yp: &mut [f64],
        stroke: f64,
    ) -> Result<()> {
        let n = xp.len();
        let mag = cs.x_magnitude();
        let arrow_len = self.arrow.length as f64 * mag;
        let arrow_hw = self.arrow.half_width as f64 * mag;

        if !self.closed && self.arrow.at_least_one() && arrow_len > 0.0 {
            // Shorten the curve at the decorated ends so that the line
            // stops at the base of each head, then recompute the
            // spline.
            let xx = calc_natural_cubic(xp);
            let yy = calc_natural_cubic(yp);
            if let (Some(first_x), Some(first_y)) = (xx.first(), yy.first()) {
                if self.arrow.start {
                    let head = crate::geom::arrow::head_geometry(
                        first_x.eval(0.0),
                        first_y.eval(0.0),
                        first_x.eval(0.05),
                        first_y.eval(0.05),
                        arrow_len,
                        arrow_hw,
                        self.arrow.style,
                    );
                    xp[0] = head.base.0;
                    yp[0] = head.base.1;
                }
            }
            if let (Some(last_x), Some(last_y)) = (xx.last(), yy.last()) {
                if self.arrow.end {
                    let head = crate::geom::arrow::head_geometry(
                        last_x.eval(1.0),
                        last_y.eval(1.0),
                        last_x.eval(0.95),
                        last_y.eval(0.95),
                        arrow_len,
                        arrow_hw,
                        self.arrow.style,
                    );
                    xp[n - 1] = head.base.0;
                    yp[n - 1] = head.base.1;
                }
            }
        }

        let (xx, yy) = if self.closed {
            (calc_natural_cubic_closed(xp), calc_natural_cubic_closed(yp))
        } else {
            (calc_natural_cubic(xp), calc_natural_cubic(yp))
        };
        if xx.is_empty() || yy.is_empty() {
            return Ok(());
        }

        let mut vertices = Vec::with_capacity(xx.len() * STEPS + 1);
        vertices.push(Point2::new(xx[0].eval(0.0), yy[0].eval(0.0)));
        for (cx, cy) in xx.iter().zip(yy.iter()) {
            for j in 1..=STEPS {
                let u = j as f64 / STEPS as f64;
                vertices.push(Point2::new(cx.eval(u), cy.eval(u)));
            }
        }

        if self.closed {
            exp.export_polygon(&vertices, self.filled, self.common.layer, self.dash, stroke)?;
        } else {
            let mut phase = 0.0f32;
            for i in 1..vertices.len() {
                exp.set_dash_phase(phase);
                exp.export_line(
                    vertices[i - 1].x,
                    vertices[i - 1].y,
                    vertices[i].x,
                    vertices[i].y,
                    self.common.layer,
                    &ArrowParams::none(),
                    self.dash,
                    stroke,
                )?;
                let dx = vertices[i - 1].x - vertices[i].x;
                let dy = vertices[i - 1].y - vertices[i].y;
                phase += ((dx * dx + dy * dy).sqrt()) as f32;
            }
            exp.set_dash_phase(0.0);

            if vertices.len() > 2 {
                if self.arrow.start {
                    let x = cs.map_x(self.points[0].x, self.points[0].y);
                    let y = cs.map_y(self.points[0].x, self.points[0].y);
                    exp.export_arrow(
                        x as f64,
                        y as f64,
                        vertices[1].x,
                        vertices[1].y,
                        arrow_len,
                        arrow_hw,
                        self.arrow.style,
                    )?;
                }
                if self.arrow.end {
                    let l = self.points.len() - 1;
                    let x = cs.map_x(self.points[l].x, self.points[l].y);
                    let y = cs.map_y(self.points[l].x, self.points[l].y);
                    exp.export_arrow(
                        x as f64,
                        y as f64,
                        vertices[vertices.len() - 2].x,
                        vertices[vertices.len() - 2].y,
                        arrow_len,
                        arrow_hw,
                        self.arrow.style,
                    )?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_parse_open_curve() {
        let mut c = ComplexCurve::default();
        c.parse_tokens(&tokens("CV 0 0 0 30 10 60 0 2")).ok().unwrap();
        assert!(!c.closed);
        assert!(!c.filled);
        assert_eq!(c.points.len(), 3);
        assert_eq!(c.common.layer, 2);
        assert_eq!(c.to_text(true), "CV 0 0 0 30 10 60 0 2\n");
    }

    #[test]
    fn test_parse_closed_with_fcj() {
        let mut c = ComplexCurve::default();
        c.parse_tokens(&tokens("CP 1 0 0 40 0 20 30 0 FCJ 0 0 3 1 2 0"))
            .ok()
            .unwrap();
        assert!(c.closed && c.filled);
        assert_eq!(c.dash, 2);
        assert_eq!(
            c.to_text(true),
            "CP 1 0 0 40 0 20 30 0\nFCJ 0 0 3 1 2 0\n"
        );
    }

    #[test]
    fn test_parse_odd_coordinates() {
        let mut c = ComplexCurve::default();
        assert!(c.parse_tokens(&tokens("CV 0 0 0 30 10 60 ")).is_ok());
        assert!(c
            .parse_tokens(&tokens("CV 0 10 20 30 40 50 60 70 80"))
            .is_err());
    }

    #[test]
    fn test_knot_cap() {
        let mut line = String::from("CV 0");
        for i in 0..=MAX_POLY_POINTS {
            line.push_str(&format!(" {} {}", i, i));
        }
        line.push_str(" 0");
        let mut c = ComplexCurve::default();
        assert!(c.parse_tokens(&tokens(&line)).is_err());
    }

    #[test]
    fn test_single_point_serializes_empty() {
        let mut c = ComplexCurve::new(false, false, 0);
        c.add_point(10, 10);
        assert!(c.to_text(true).is_empty());
    }

    #[test]
    fn test_distance_near_knot() {
        let mut c = ComplexCurve::new(false, false, 0);
        c.add_point(0, 0);
        c.add_point(50, 20);
        c.add_point(100, 0);
        assert!(c.distance_to_point(50, 20) <= 1);
        assert!(c.distance_to_point(50, 120) > 50);
    }
}
