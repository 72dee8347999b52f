//! The PCB pad primitive (`PA`): an oval, square or rounded pad with
//! an optional central hole.

use crate::error::Result;
use crate::export::{ExportContext, Exporter};
use crate::geom::distances::point_to_point;
use crate::geom::MapCoordinates;
use crate::types::{BoundingRect, PointG};

use super::{parse_layer, Primitive, PrimitiveCommon};

/// Pad shape codes.
pub const PAD_STYLE_OVAL: i32 = 0;
pub const PAD_STYLE_SQUARE: i32 = 1;
pub const PAD_STYLE_ROUNDED: i32 = 2;

/// A pad centered on a point.
#[derive(Debug, Clone, PartialEq)]
pub struct PcbPad {
    pub center: PointG,
    /// Width of the pad.
    pub rx: i32,
    /// Height of the pad.
    pub ry: i32,
    /// Diameter of the central hole.
    pub ri: i32,
    /// Shape code, one of the `PAD_STYLE_*` constants.
    pub style: i32,
    pub common: PrimitiveCommon,
}

impl Default for PcbPad {
    fn default() -> Self {
        Self {
            center: PointG::default(),
            rx: 5,
            ry: 5,
            ri: 2,
            style: PAD_STYLE_OVAL,
            common: PrimitiveCommon::default(),
        }
    }
}

impl PcbPad {
    pub fn new(x: i32, y: i32, rx: i32, ry: i32, ri: i32, style: i32, layer: usize) -> Self {
        let mut p = PcbPad {
            center: PointG::new(x, y),
            rx,
            ry,
            ri,
            style,
            ..Default::default()
        };
        p.common.layer = layer;
        p.common.reset_text_positions(x, y);
        p
    }
}

impl Primitive for PcbPad {
    fn common(&self) -> &PrimitiveCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut PrimitiveCommon {
        &mut self.common
    }

    fn command(&self) -> &'static str {
        "PA"
    }

    fn parse_tokens(&mut self, tokens: &[String]) -> Result<()> {
        let nn = tokens.len();
        if nn < 7 {
            return Err("bad arguments on PA".into());
        }
        self.center.x = tokens[1].parse()?;
        self.center.y = tokens[2].parse()?;
        self.rx = tokens[3].parse()?;
        self.ry = tokens[4].parse()?;
        self.ri = tokens[5].parse()?;
        self.style = tokens[6].parse()?;
        self.common.reset_text_positions(self.center.x, self.center.y);
        if nn > 7 {
            self.common.layer = parse_layer(&tokens[7]);
        }
        Ok(())
    }

    fn to_text(&self, extensions: bool) -> String {
        let mut s = format!(
            "PA {} {} {} {} {} {} {}\n",
            self.center.x,
            self.center.y,
            self.rx,
            self.ry,
            self.ri,
            self.style,
            self.common.layer
        );
        s.push_str(&self.common.save_text(extensions));
        s
    }

    fn distance_to_point(&self, x: i32, y: i32) -> i32 {
        let d = point_to_point(self.center.x, self.center.y, x, y);
        (d - self.rx.max(self.ry) / 2).max(0)
    }

    fn bounding_box(&self) -> BoundingRect {
        BoundingRect::from_corners(
            self.center.x - self.rx / 2,
            self.center.y - self.ry / 2,
            self.center.x + self.rx / 2,
            self.center.y + self.ry / 2,
        )
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.center.translate(dx, dy);
        self.common.translate(dx, dy);
    }

    fn mirror(&mut self, xpos: i32) {
        self.center.mirror_x(xpos);
        self.common.mirror(xpos);
    }

    fn rotate(&mut self, px: i32, py: i32) {
        self.center.rotate_quarter(px, py);
        std::mem::swap(&mut self.rx, &mut self.ry);
        self.common.rotate(px, py);
    }

    fn export(
        &self,
        exp: &mut dyn Exporter,
        cs: &mut MapCoordinates,
        ctx: &mut ExportContext,
    ) -> Result<()> {
        self.common.export_text(exp, cs, -1)?;
        let x = cs.map_x(self.center.x, self.center.y);
        let y = cs.map_y(self.center.x, self.center.y);
        let six = (cs.map_x(self.center.x + self.rx, self.center.y + self.ry) - x).abs();
        let siy = (cs.map_y(self.center.x + self.rx, self.center.y + self.ry) - y).abs();
        exp.export_pcb_pad(
            x,
            y,
            self.style,
            six,
            siy,
            (self.ri as f64 * cs.x_magnitude()) as i32,
            self.common.layer,
            ctx.only_pads,
        )
    }
}
