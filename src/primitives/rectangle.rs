//! The rectangle primitive (`RV` outline, `RP` filled).

use crate::error::Result;
use crate::export::{ExportContext, Exporter};
use crate::geom::distances::{point_in_rectangle, point_to_rectangle};
use crate::geom::MapCoordinates;
use crate::types::{BoundingRect, PointG};

use super::{check_dash_style, parse_layer, Primitive, PrimitiveCommon};

/// An axis-aligned rectangle between two opposite corners.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rectangle {
    pub p0: PointG,
    pub p1: PointG,
    pub filled: bool,
    pub dash: i32,
    pub common: PrimitiveCommon,
}

impl Rectangle {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32, filled: bool, layer: usize) -> Self {
        let mut r = Rectangle {
            p0: PointG::new(x1, y1),
            p1: PointG::new(x2, y2),
            filled,
            ..Default::default()
        };
        r.common.layer = layer;
        r.common.reset_text_positions(x1, y1);
        r
    }
}

impl Primitive for Rectangle {
    fn common(&self) -> &PrimitiveCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut PrimitiveCommon {
        &mut self.common
    }

    fn command(&self) -> &'static str {
        if self.filled {
            "RP"
        } else {
            "RV"
        }
    }

    fn parse_tokens(&mut self, tokens: &[String]) -> Result<()> {
        let nn = tokens.len();
        if nn < 5 {
            return Err("bad arguments on RV/RP".into());
        }
        self.filled = tokens[0] == "RP";
        self.p0.x = tokens[1].parse()?;
        self.p0.y = tokens[2].parse()?;
        self.p1.x = tokens[3].parse()?;
        self.p1.y = tokens[4].parse()?;
        self.common.reset_text_positions(self.p0.x, self.p0.y);
        if nn > 5 {
            self.common.layer = parse_layer(&tokens[5]);
        }
        if nn > 6 && tokens[6] == "FCJ" {
            let dash = tokens.get(7).ok_or("bad arguments on RP/RV")?;
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
        if self.filled && point_in_rectangle(xmin, ymin, w, h, x, y) {
            return 0;
        }
        point_to_rectangle(xmin, ymin, w, h, x, y)
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
        exp.export_rectangle(
            x1.min(x2),
            y1.min(y2),
            x1.max(x2),
            y1.max(y2),
            self.filled,
            self.common.layer,
            self.dash,
            ctx.config.line_width * cs.x_magnitude(),
        )
    }
}
