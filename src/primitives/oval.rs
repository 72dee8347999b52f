//! The ellipse primitive (`EV` outline, `EP` filled).

use crate::error::Result;
use crate::export::{ExportContext, Exporter};
use crate::geom::distances::{point_in_ellipse, point_to_ellipse};
use crate::geom::MapCoordinates;
use crate::types::{BoundingRect, PointG};

use super::{check_dash_style, parse_layer, Primitive, PrimitiveCommon};

/// An ellipse inscribed in the rectangle defined by two opposite
/// corners.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Oval {
    pub p0: PointG,
    pub p1: PointG,
    pub filled: bool,
    pub dash: i32,
    pub common: PrimitiveCommon,
}

impl Oval {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32, filled: bool, layer: usize) -> Self {
        let mut o = Oval {
            p0: PointG::new(x1, y1),
            p1: PointG::new(x2, y2),
            filled,
            ..Default::default()
        };
        o.common.layer = layer;
        o.common.reset_text_positions(x1, y1);
        o
    }
}

impl Primitive for Oval {
    fn common(&self) -> &PrimitiveCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut PrimitiveCommon {
        &mut self.common
    }

    fn command(&self) -> &'static str {
        if self.filled {
            "EP"
        } else {
            "EV"
        }
    }

    fn parse_tokens(&mut self, tokens: &[String]) -> Result<()> {
        let nn = tokens.len();
        if nn < 5 {
            return Err("bad arguments on EV/EP".into());
        }
        self.filled = tokens[0] == "EP";
        self.p0.x = tokens[1].parse()?;
        self.p0.y = tokens[2].parse()?;
        self.p1.x = tokens[3].parse()?;
        self.p1.y = tokens[4].parse()?;
        self.common.reset_text_positions(self.p0.x, self.p0.y);
        if nn > 5 {
            self.common.layer = parse_layer(&tokens[5]);
        }
        if nn > 6 && tokens[6] == "FCJ" {
            let dash = tokens.get(7).ok_or("bad arguments on EP/EV")?;
            self.dash = check_dash_style(dash.parse()?);
        }
        Ok(())
    }

    fn to_text(&self, extensions: bool) -> String {
        let mut s = format!(
            "{} {} {} {} {} {}\n",
            self.command(),
            self.p0.x,
            self.p0.y,
            self.p1.x,
            self.p1.y,
            self.common.layer
        );
        if extensions && (self.dash > 0 || self.common.has_text()) {
            let textflag = if self.common.has_text() { "1" } else { "0" };
            s.push_str(&format!("FCJ {} {}\n", self.dash, textflag));
        }
        s.push_str(&self.common.save_text(false));
        s
    }

    fn distance_to_point(&self, x: i32, y: i32) -> i32 {
        let xmin = self.p0.x.min(self.p1.x);
        let ymin = self.p0.y.min(self.p1.y);
        let w = (self.p1.x - self.p0.x).abs();
        let h = (self.p1.y - self.p0.y).abs();
        if self.filled
            && point_in_ellipse(xmin as f64, ymin as f64, w as f64, h as f64, x as f64, y as f64)
        {
            return 0;
        }
        point_to_ellipse(xmin, ymin, w, h, x, y)
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
        let x1 = cs.map_x(self.p0.x, self.p0.y);
        let y1 = cs.map_y(self.p0.x, self.p0.y);
        let x2 = cs.map_x(self.p1.x, self.p1.y);
        let y2 = cs.map_y(self.p1.x, self.p1.y);
        exp.export_oval(
            x1.min(x2),
            y1.min(y2),
            x1.max(x2),
            y1.max(y2),
            self.filled,
            self.common.layer,
            self.dash,
            ctx.config.line_width_circles * cs.x_magnitude(),
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
        let mut o = Oval::default();
        o.parse_tokens(&tokens("EP 0 0 40 20 5")).ok().unwrap();
        assert!(o.filled);
        assert_eq!(o.common.layer, 5);
        assert_eq!(o.to_text(true), "EP 0 0 40 20 5\n");
    }

    #[test]
    fn test_parse_dashed() {
        let mut o = Oval::default();
        o.parse_tokens(&tokens("EV 0 0 40 20 0 FCJ 1 0"))
            .ok()
            .unwrap();
        assert_eq!(o.dash, 1);
        assert_eq!(o.to_text(true), "EV 0 0 40 20 0\nFCJ 1 0\n");
    }

    #[test]
    fn test_distance_center() {
        let filled = Oval::new(0, 0, 40, 40, true, 0);
        assert_eq!(filled.distance_to_point(20, 20), 0);
        let outline = Oval::new(0, 0, 40, 40, false, 0);
        // The center is far from the contour of an outline ellipse.
        assert!(outline.distance_to_point(20, 20) > 0);
        assert_eq!(outline.distance_to_point(40, 20), 0);
    }
}
