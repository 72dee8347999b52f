//! The line segment primitive (`LI`).

use crate::error::Result;
use crate::export::{ArrowParams, ExportContext, Exporter};
use crate::geom::distances::point_to_segment;
use crate::geom::{Arrow, MapCoordinates};
use crate::types::{BoundingRect, PointG};

use super::{check_dash_style, parse_layer, Primitive, PrimitiveCommon};

/// A straight segment between two points, with optional arrows and a
/// dash style.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    pub p0: PointG,
    pub p1: PointG,
    pub arrow: Arrow,
    pub dash: i32,
    pub common: PrimitiveCommon,
}

impl Line {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32, layer: usize) -> Self {
        let mut line = Line {
            p0: PointG::new(x1, y1),
            p1: PointG::new(x2, y2),
            ..Default::default()
        };
        line.common.layer = layer;
        line.common.reset_text_positions(x1, y1);
        line
    }
}

impl Primitive for Line {
    fn common(&self) -> &PrimitiveCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut PrimitiveCommon {
        &mut self.common
    }

    fn command(&self) -> &'static str {
        "LI"
    }

    fn parse_tokens(&mut self, tokens: &[String]) -> Result<()> {
        let nn = tokens.len();
        if nn < 5 {
            return Err("bad arguments on LI".into());
        }
        self.p0.x = tokens[1].parse()?;
        self.p0.y = tokens[2].parse()?;
        self.p1.x = tokens[3].parse()?;
        self.p1.y = tokens[4].parse()?;
        self.common.reset_text_positions(self.p0.x, self.p0.y);
        if nn > 5 {
            self.common.layer = parse_layer(&tokens[5]);
        }
        if nn > 6 && tokens[6] == "FCJ" {
            let i = self.arrow.parse_tokens(tokens, 7)?;
            let dash = tokens.get(i).ok_or("bad arguments on LI")?;
            self.dash = check_dash_style(dash.parse()?);
        }
        Ok(())
    }

    fn to_text(&self, extensions: bool) -> String {
        // A degenerate segment carrying no text is dropped entirely.
        if self.p0 == self.p1 && !self.common.has_text() {
            return String::new();
        }
        let mut s = format!(
            "LI {} {} {} {} {}\n",
            self.p0.x, self.p0.y, self.p1.x, self.p1.y, self.common.layer
        );
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
        point_to_segment(self.p0.x, self.p0.y, self.p1.x, self.p1.y, x, y)
    }

    fn bounding_box(&self) -> BoundingRect {
        BoundingRect::from_corners(self.p0.x, self.p0.y, self.p1.x, self.p1.y)
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.p0.translate(dx, dy);
        self.p1.translate(dx, dy);
        self.common.translate(dx, dy);
    }

    fn mirror(&mut self, xpos: i32) {
        self.p0.mirror_x(xpos);
        self.p1.mirror_x(xpos);
        self.common.mirror(xpos);
    }

    fn rotate(&mut self, px: i32, py: i32) {
        self.p0.rotate_quarter(px, py);
        self.p1.rotate_quarter(px, py);
        self.common.rotate(px, py);
    }

    fn export(
        &self,
        exp: &mut dyn Exporter,
        cs: &mut MapCoordinates,
        ctx: &mut ExportContext,
    ) -> Result<()> {
        self.common.export_text(exp, cs, -1)?;
        let x1 = cs.map_xr(self.p0.x, self.p0.y);
        let y1 = cs.map_yr(self.p0.x, self.p0.y);
        let x2 = cs.map_xr(self.p1.x, self.p1.y);
        let y2 = cs.map_yr(self.p1.x, self.p1.y);
        cs.track_point(x1.round() as i32, y1.round() as i32);
        cs.track_point(x2.round() as i32, y2.round() as i32);
        exp.export_line(
            x1,
            y1,
            x2,
            y2,
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
    use crate::geom::ArrowStyle;

    fn tokens(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_parse_plain() {
        let mut l = Line::default();
        l.parse_tokens(&tokens("LI 10 20 30 40 3")).ok().unwrap();
        assert_eq!(l.p0, PointG::new(10, 20));
        assert_eq!(l.p1, PointG::new(30, 40));
        assert_eq!(l.common.layer, 3);
        assert!(!l.arrow.at_least_one());
        assert_eq!(l.dash, 0);
    }

    #[test]
    fn test_parse_with_fcj() {
        let mut l = Line::default();
        l.parse_tokens(&tokens("LI 0 0 50 0 2 FCJ 2 1 5 2 3 0"))
            .ok()
            .unwrap();
        assert!(!l.arrow.start);
        assert!(l.arrow.end);
        assert!(l.arrow.style.contains(ArrowStyle::LIMITER));
        assert_eq!(l.arrow.length, 5.0);
        assert_eq!(l.arrow.half_width, 2.0);
        assert_eq!(l.dash, 3);
    }

    #[test]
    fn test_parse_too_short() {
        let mut l = Line::default();
        assert!(l.parse_tokens(&tokens("LI 0 0 50")).is_err());
    }

    #[test]
    fn test_to_text_plain() {
        let l = Line::new(10, 20, 30, 40, 3);
        assert_eq!(l.to_text(true), "LI 10 20 30 40 3\n");
        assert_eq!(l.to_text(false), "LI 10 20 30 40 3\n");
    }

    #[test]
    fn test_to_text_with_extensions() {
        let mut l = Line::new(0, 0, 50, 0, 2);
        l.arrow.end = true;
        l.dash = 3;
        assert_eq!(l.to_text(true), "LI 0 0 50 0 2\nFCJ 2 0 3 1 3 0\n");
        // Without extensions the FCJ line disappears.
        assert_eq!(l.to_text(false), "LI 0 0 50 0 2\n");
    }

    #[test]
    fn test_to_text_with_name() {
        let mut l = Line::new(0, 0, 50, 0, 0);
        l.common.name = "W1".to_string();
        let text = l.to_text(true);
        assert!(text.starts_with("LI 0 0 50 0 0\nFCJ 0 0 3 1 0 1\n"));
        assert!(text.contains("TY 5 5 4 3 0 0 0 * W1"));
    }

    #[test]
    fn test_degenerate_is_dropped() {
        let l = Line::new(10, 10, 10, 10, 0);
        assert!(l.to_text(true).is_empty());
    }

    #[test]
    fn test_distance() {
        let l = Line::new(0, 0, 100, 0, 0);
        assert_eq!(l.distance_to_point(50, 10), 10);
        assert_eq!(l.distance_to_point(-10, 0), 10);
    }

    #[test]
    fn test_rotate() {
        let mut l = Line::new(10, 0, 20, 0, 0);
        l.rotate(0, 0);
        assert_eq!(l.p0, PointG::new(0, 10));
        assert_eq!(l.p1, PointG::new(0, 20));
    }

    #[test]
    fn test_mirror() {
        let mut l = Line::new(10, 5, 20, 5, 0);
        l.mirror(15);
        assert_eq!(l.p0, PointG::new(20, 5));
        assert_eq!(l.p1, PointG::new(10, 5));
    }
}
