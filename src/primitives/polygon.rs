//! The polygon primitive (`PV` outline, `PP` filled).

use nalgebra::Point2;

use crate::error::Result;
use crate::export::{ExportContext, Exporter};
use crate::geom::distances::{point_in_polygon, point_to_segment};
use crate::geom::MapCoordinates;
use crate::types::{BoundingRect, PointG};

use super::{check_dash_style, parse_layer, Primitive, PrimitiveCommon, MAX_POLY_POINTS};

/// A closed polygon through an arbitrary number of vertices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    pub points: Vec<PointG>,
    pub filled: bool,
    pub dash: i32,
    pub common: PrimitiveCommon,
}

impl Polygon {
    pub fn new(filled: bool, layer: usize) -> Self {
        let mut p = Polygon {
            filled,
            ..Default::default()
        };
        p.common.layer = layer;
        p
    }

    /// Append a vertex and move the default text anchors next to it.
    pub fn add_point(&mut self, x: i32, y: i32) {
        self.points.push(PointG::new(x, y));
        self.common.reset_text_positions(x, y);
    }
}

impl Primitive for Polygon {
    fn common(&self) -> &PrimitiveCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut PrimitiveCommon {
        &mut self.common
    }

    fn command(&self) -> &'static str {
        if self.filled {
            "PP"
        } else {
            "PV"
        }
    }

    fn parse_tokens(&mut self, tokens: &[String]) -> Result<()> {
        let nn = tokens.len();
        if nn < 6 {
            return Err("bad arguments on PP/PV".into());
        }
        self.filled = tokens[0] == "PP";
        self.points.clear();
        let mut j = 1;
        while j < nn - 1 {
            if j + 1 < nn - 1 && tokens[j + 1] == "FCJ" {
                break;
            }
            let x: i32 = tokens[j].parse()?;
            j += 1;
            let y: i32 = tokens[j].parse()?;
            j += 1;
            self.add_point(x, y);
        }
        if self.points.len() > MAX_POLY_POINTS {
            return Err("too many points on PP/PV".into());
        }
        if nn > j {
            self.common.layer = parse_layer(&tokens[j]);
            j += 1;
            if j < nn - 1 && tokens[j] == "FCJ" {
                j += 1;
                self.dash = check_dash_style(tokens[j].parse()?);
            }
        }
        Ok(())
    }

    fn to_text(&self, extensions: bool) -> String {
        let mut s = String::from(self.command());
        for p in &self.points {
            s.push_str(&format!(" {} {}", p.x, p.y));
        }
        s.push_str(&format!(" {}\n", self.common.layer));
        if extensions && (self.dash > 0 || self.common.has_text()) {
            let textflag = if self.common.has_text() { "1" } else { "0" };
            s.push_str(&format!("FCJ {} {}\n", self.dash, textflag));
        }
        s.push_str(&self.common.save_text(false));
        s
    }

    fn distance_to_point(&self, x: i32, y: i32) -> i32 {
        let n = self.points.len();
        if n < 2 {
            return i32::MAX;
        }
        let xs: Vec<i32> = self.points.iter().map(|p| p.x).collect();
        let ys: Vec<i32> = self.points.iter().map(|p| p.y).collect();
        if self.filled && point_in_polygon(&xs, &ys, x as f64, y as f64) {
            return 0;
        }
        let mut d = i32::MAX;
        for i in 0..n {
            let j = (i + 1) % n;
            d = d.min(point_to_segment(
                xs[i], ys[i], xs[j], ys[j], x, y,
            ));
        }
        d
    }

    fn bounding_box(&self) -> BoundingRect {
        let mut b = BoundingRect::new();
        for p in &self.points {
            b.merge_xy(p.x, p.y);
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
        self.common.export_text(exp, cs, -1)?;
        let mut vertices = Vec::with_capacity(self.points.len());
        for p in &self.points {
            let x = cs.map_xr(p.x, p.y);
            let y = cs.map_yr(p.x, p.y);
            cs.track_point(x.round() as i32, y.round() as i32);
            vertices.push(Point2::new(x, y));
        }
        exp.export_polygon(
            &vertices,
            self.filled,
            self.common.layer,
            self.dash,
            ctx.config.line_width * cs.x_magnitude(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_parse_triangle() {
        let mut p = Polygon::default();
        p.parse_tokens(&tokens("PP 0 0 40 0 20 30 3")).ok().unwrap();
        assert!(p.filled);
        assert_eq!(p.points.len(), 3);
        assert_eq!(p.points[2], PointG::new(20, 30));
        assert_eq!(p.common.layer, 3);
        // Text anchors follow the last vertex.
        assert_eq!(p.common.name_pos, PointG::new(25, 35));
    }

    #[test]
    fn test_parse_with_fcj() {
        let mut p = Polygon::default();
        p.parse_tokens(&tokens("PV 0 0 40 0 20 30 0 FCJ 2 0"))
            .ok()
            .unwrap();
        assert!(!p.filled);
        assert_eq!(p.points.len(), 3);
        assert_eq!(p.dash, 2);
        assert_eq!(p.to_text(true), "PV 0 0 40 0 20 30 0\nFCJ 2 0\n");
    }

    #[test]
    fn test_serialize_plain() {
        let mut p = Polygon::new(true, 1);
        p.add_point(0, 0);
        p.add_point(10, 0);
        p.add_point(10, 10);
        assert_eq!(p.to_text(true), "PP 0 0 10 0 10 10 1\n");
    }

    #[test]
    fn test_parse_too_short() {
        let mut p = Polygon::default();
        assert!(p.parse_tokens(&tokens("PP 0 0 40 0")).is_err());
    }

    #[test]
    fn test_point_cap() {
        let mut line = String::from("PP");
        for i in 0..=MAX_POLY_POINTS {
            line.push_str(&format!(" {} {}", i, i));
        }
        line.push_str(" 0");
        let mut p = Polygon::default();
        assert!(p.parse_tokens(&tokens(&line)).is_err());
    }

    #[test]
    fn test_distance() {
        let mut p = Polygon::new(true, 0);
        p.add_point(0, 0);
        p.add_point(100, 0);
        p.add_point(100, 100);
        p.add_point(0, 100);
        assert_eq!(p.distance_to_point(50, 50), 0);
        p.filled = false;
        // Distance to the closing edge.
        assert_eq!(p.distance_to_point(10, 50), 10);
    }
}
