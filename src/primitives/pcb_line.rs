//! The PCB track primitive (`PL`): a thick line segment.

use crate::error::Result;
use crate::export::{ExportContext, Exporter};
use crate::geom::arrow::round_intelligently;
use crate::geom::distances::point_to_segment;
use crate::geom::MapCoordinates;
use crate::types::{BoundingRect, PointG};

use super::{parse_layer, Primitive, PrimitiveCommon};

/// A copper track between two points, with a width in logical units.
#[derive(Debug, Clone, PartialEq)]
pub struct PcbLine {
    pub p0: PointG,
    pub p1: PointG,
    pub width: f32,
    pub common: PrimitiveCommon,
}

impl Default for PcbLine {
    fn default() -> Self {
        Self {
            p0: PointG::default(),
            p1: PointG::default(),
            width: 1.0,
            common: PrimitiveCommon::default(),
        }
    }
}

impl PcbLine {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32, width: f32, layer: usize) -> Self {
        let mut t = PcbLine {
            p0: PointG::new(x1, y1),
            p1: PointG::new(x2, y2),
            width,
            ..Default::default()
        };
        t.common.layer = layer;
        t.common.reset_text_positions(x1, y1);
        t
    }
}

impl Primitive for PcbLine {
    fn common(&self) -> &PrimitiveCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut PrimitiveCommon {
        &mut self.common
    }

    fn command(&self) -> &'static str {
        "PL"
    }

    fn parse_tokens(&mut self, tokens: &[String]) -> Result<()> {
        let nn = tokens.len();
        if nn < 6 {
            return Err("bad arguments on PL".into());
        }
        self.p0.x = tokens[1].parse()?;
        self.p0.y = tokens[2].parse()?;
        self.p1.x = tokens[3].parse()?;
        self.p1.y = tokens[4].parse()?;
        self.width = tokens[5].parse()?;
        self.common.reset_text_positions(self.p0.x, self.p0.y);
        if nn > 6 {
            self.common.layer = parse_layer(&tokens[6]);
        }
        Ok(())
    }

    fn to_text(&self, extensions: bool) -> String {
        let mut s = format!(
            "PL {} {} {} {} {} {}\n",
            self.p0.x,
            self.p0.y,
            self.p1.x,
            self.p1.y,
            round_intelligently(self.width as f64),
            self.common.layer
        );
        s.push_str(&self.common.save_text(extensions));
        s
    }

    fn distance_to_point(&self, x: i32, y: i32) -> i32 {
        let d = point_to_segment(self.p0.x, self.p0.y, self.p1.x, self.p1.y, x, y);
        (d - (self.width / 2.0) as i32).max(0)
    }

    fn bounding_box(&self) -> BoundingRect {
        let hw = (self.width / 2.0).ceil() as i32;
        let mut b = BoundingRect::from_corners(self.p0.x, self.p0.y, self.p1.x, self.p1.y);
        b.min_x -= hw;
        b.min_y -= hw;
        b.max_x += hw;
        b.max_y += hw;
        b
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
        _ctx: &mut ExportContext,
    ) -> Result<()> {
        self.common.export_text(exp, cs, -1)?;
        let x1 = cs.map_x(self.p0.x, self.p0.y);
        let y1 = cs.map_y(self.p0.x, self.p0.y);
        let x2 = cs.map_x(self.p1.x, self.p1.y);
        let y2 = cs.map_y(self.p1.x, self.p1.y);
        exp.export_pcb_line(
            x1,
            y1,
            x2,
            y2,
            (self.width as f64 * cs.x_magnitude()) as i32,
            self.common.layer,
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
        let mut t = PcbLine::default();
        t.parse_tokens(&tokens("PL 0 0 50 0 2.5 1")).ok().unwrap();
        assert_eq!(t.width, 2.5);
        assert_eq!(t.common.layer, 1);
        assert_eq!(t.to_text(true), "PL 0 0 50 0 2.5 1\n");
    }

    #[test]
    fn test_integral_width_roundtrip() {
        let t = PcbLine::new(0, 0, 50, 0, 3.0, 2);
        assert_eq!(t.to_text(true), "PL 0 0 50 0 3 2\n");
    }

    #[test]
    fn test_parse_too_short() {
        let mut t = PcbLine::default();
        assert!(t.parse_tokens(&tokens("PL 0 0 50 0")).is_err());
    }

    #[test]
    fn test_distance_accounts_for_width() {
        let t = PcbLine::new(0, 0, 100, 0, 10.0, 0);
        assert_eq!(t.distance_to_point(50, 4), 0);
        assert_eq!(t.distance_to_point(50, 15), 10);
    }

    #[test]
    fn test_text_needs_fcj_marker() {
        let mut t = PcbLine::new(0, 0, 50, 0, 2.0, 0);
        t.common.name = "T1".to_string();
        let text = t.to_text(true);
        assert!(text.contains("FCJ\n"));
        // Without extensions the texts survive but the marker is gone.
        let plain = t.to_text(false);
        assert!(!plain.contains("FCJ"));
        assert!(plain.contains("TY"));
    }
}
