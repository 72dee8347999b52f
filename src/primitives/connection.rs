//! The connection dot primitive (`SA`): a filled circle marking an
//! electrical junction.

use crate::error::Result;
use crate::export::{ExportContext, Exporter};
use crate::geom::distances::point_to_point;
use crate::geom::MapCoordinates;
use crate::types::{BoundingRect, PointG};

use super::{parse_layer, Primitive, PrimitiveCommon};

/// A junction dot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Connection {
    pub center: PointG,
    pub common: PrimitiveCommon,
}

impl Connection {
    pub fn new(x: i32, y: i32, layer: usize) -> Self {
        let mut c = Connection {
            center: PointG::new(x, y),
            ..Default::default()
        };
        c.common.layer = layer;
        c.common.reset_text_positions(x, y);
        c
    }
}

impl Primitive for Connection {
    fn common(&self) -> &PrimitiveCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut PrimitiveCommon {
        &mut self.common
    }

    fn command(&self) -> &'static str {
        "SA"
    }

    fn parse_tokens(&mut self, tokens: &[String]) -> Result<()> {
        let nn = tokens.len();
        if nn < 3 {
            return Err("bad arguments on SA".into());
        }
        self.center.x = tokens[1].parse()?;
        self.center.y = tokens[2].parse()?;
        self.common.reset_text_positions(self.center.x, self.center.y);
        if nn > 3 {
            self.common.layer = parse_layer(&tokens[3]);
        }
        Ok(())
    }

    fn to_text(&self, extensions: bool) -> String {
        let mut s = format!(
            "SA {} {} {}\n",
            self.center.x, self.center.y, self.common.layer
        );
        s.push_str(&self.common.save_text(extensions));
        s
    }

    fn distance_to_point(&self, x: i32, y: i32) -> i32 {
        point_to_point(self.center.x, self.center.y, x, y)
    }

    fn bounding_box(&self) -> BoundingRect {
        BoundingRect::from_corners(self.center.x, self.center.y, self.center.x, self.center.y)
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
        exp.export_connection(
            x,
            y,
            self.common.layer,
            ctx.config.connection_size * cs.x_magnitude(),
        )
    }
}
