//! The cubic Bezier primitive (`BE`).

use crate::error::Result;
use crate::export::{ArrowParams, ExportContext, Exporter};
use crate::geom::distances::point_to_bezier;
use crate::geom::{Arrow, MapCoordinates};
use crate::types::{BoundingRect, PointG};

use super::{check_dash_style, parse_layer, Primitive, PrimitiveCommon};

/// A cubic Bezier arc defined by four control points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bezier {
    pub points: [PointG; 4],
    pub arrow: Arrow,
    pub dash: i32,
    pub common: PrimitiveCommon,
}

impl Bezier {
    pub fn new(points: [PointG; 4], layer: usize) -> Self {
        let mut b = Bezier {
            points,
            ..Default::default()
        };
        b.common.layer = layer;
        b.common.reset_text_positions(points[0].x, points[0].y);
        b
    }
}

impl Primitive for Bezier {
    fn common(&self) -> &PrimitiveCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut PrimitiveCommon {
        &mut self.common
    }

    fn command(&self) -> &'static str {
        "BE"
    }

    fn parse_tokens(&mut self, tokens: &[String]) -> Result<()> {
        let nn = tokens.len();
        if nn < 9 {
            return Err("bad arguments on BE".into());
        }
        for i in 0..4 {
            self.points[i].x = tokens[1 + 2 * i].parse()?;
            self.points[i].y = tokens[2 + 2 * i].parse()?;
        }
        self.common
            .reset_text_positions(self.points[0].x, self.points[0].y);
        if nn > 9 {
            self.common.layer = parse_layer(&tokens[9]);
        }
        if nn > 10 && tokens[10] == "FCJ" {
            let i = self.arrow.parse_tokens(tokens, 11)?;
            let dash = tokens.get(i).ok_or("bad arguments on BE")?;
            self.dash = check_dash_style(dash.parse()?);
        }
        Ok(())
    }

    fn to_text(&self, extensions: bool) -> String {
        let mut s = String::from("BE");
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
        let p = &self.points;
        point_to_bezier(
            p[0].x, p[0].y, p[1].x, p[1].y, p[2].x, p[2].y, p[3].x, p[3].y, x, y,
        )
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
        let mut mapped = [(0i32, 0i32); 4];
        for (i, p) in self.points.iter().enumerate() {
            mapped[i] = (cs.map_x(p.x, p.y), cs.map_y(p.x, p.y));
        }
        exp.export_bezier(
            mapped,
            self.common.layer,
            &ArrowParams::new(&self.arrow, cs.x_magnitude()),
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
    fn test_parse_and_serialize() {
        let mut b = Bezier::default();
        b.parse_tokens(&tokens("BE 0 0 10 0 20 10 30 10 4"))
            .ok()
            .unwrap();
        assert_eq!(b.points[0], PointG::new(0, 0));
        assert_eq!(b.points[3], PointG::new(30, 10));
        assert_eq!(b.common.layer, 4);
        assert_eq!(b.to_text(true), "BE 0 0 10 0 20 10 30 10 4\n");
    }

    #[test]
    fn test_parse_with_arrows() {
        let mut b = Bezier::default();
        b.parse_tokens(&tokens("BE 0 0 10 0 20 10 30 10 0 FCJ 3 0 3 1 2 0"))
            .ok()
            .unwrap();
        assert!(b.arrow.start && b.arrow.end);
        assert_eq!(b.dash, 2);
        assert_eq!(
            b.to_text(true),
            "BE 0 0 10 0 20 10 30 10 0\nFCJ 3 0 3 1 2 0\n"
        );
    }

    #[test]
    fn test_parse_too_short() {
        let mut b = Bezier::default();
        assert!(b.parse_tokens(&tokens("BE 0 0 10 0 20 10 30")).is_err());
    }

    #[test]
    fn test_bounding_box() {
        let b = Bezier::new(
            [
                PointG::new(0, 0),
                PointG::new(10, -5),
                PointG::new(20, 15),
                PointG::new(30, 10),
            ],
            0,
        );
        let r = b.bounding_box();
        assert_eq!((r.min_x, r.min_y, r.max_x, r.max_y), (0, -5, 30, 15));
    }

    #[test]
    fn test_distance_on_endpoint() {
        let b = Bezier::new(
            [
                PointG::new(0, 0),
                PointG::new(10, 0),
                PointG::new(20, 0),
                PointG::new(30, 0),
            ],
            0,
        );
        assert_eq!(b.distance_to_point(0, 0), 0);
        assert!(b.distance_to_point(15, 20) >= 19);
    }
}
