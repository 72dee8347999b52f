//! The macro instance primitive (`MC`): a reference to a symbol of the
//! macro library, placed with an orientation and an optional mirroring.

use crate::error::{FidoError, Result};
use crate::export::{ExportContext, Exporter, MacroTexts};
use crate::geom::distances::point_to_point;
use crate::geom::MapCoordinates;
use crate::types::{BoundingRect, PointG};

use super::{Primitive, PrimitiveCommon, PrimitiveType};

/// A placed macro. The body is not stored here: it is resolved through
/// the library when the macro is drawn or exported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MacroInstance {
    pub anchor: PointG,
    /// Orientation in quarter turns.
    pub orientation: i32,
    pub mirrored: bool,
    /// Lowercase library key.
    pub key: String,
    pub common: PrimitiveCommon,
}

impl MacroInstance {
    pub fn new(x: i32, y: i32, key: impl Into<String>) -> Self {
        let mut m = MacroInstance {
            anchor: PointG::new(x, y),
            key: key.into().to_lowercase(),
            ..Default::default()
        };
        m.common.name_pos = PointG::new(x + 10, y + 10);
        m.common.value_pos = PointG::new(x + 10, y + 5);
        m
    }
}

impl Primitive for MacroInstance {
    fn common(&self) -> &PrimitiveCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut PrimitiveCommon {
        &mut self.common
    }

    fn command(&self) -> &'static str {
        "MC"
    }

    fn parse_tokens(&mut self, tokens: &[String]) -> Result<()> {
        let nn = tokens.len();
        if nn < 6 {
            return Err("bad arguments on MC".into());
        }
        self.anchor.x = tokens[1].parse()?;
        self.anchor.y = tokens[2].parse()?;
        self.common.name_pos = PointG::new(self.anchor.x + 10, self.anchor.y + 10);
        self.common.value_pos = PointG::new(self.anchor.x + 10, self.anchor.y + 5);
        self.orientation = tokens[3].parse()?;
        self.mirrored = tokens[4] == "1";
        self.key = tokens[5..].join(" ").to_lowercase();
        Ok(())
    }

    fn to_text(&self, extensions: bool) -> String {
        let mut s = format!(
            "MC {} {} {} {} {}\n",
            self.anchor.x,
            self.anchor.y,
            self.orientation,
            if self.mirrored { 1 } else { 0 },
            self.key
        );
        s.push_str(&self.common.save_text(extensions));
        s
    }

    fn distance_to_point(&self, x: i32, y: i32) -> i32 {
        point_to_point(self.anchor.x, self.anchor.y, x, y)
    }

    fn bounding_box(&self) -> BoundingRect {
        BoundingRect::from_corners(self.anchor.x, self.anchor.y, self.anchor.x, self.anchor.y)
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.anchor.translate(dx, dy);
        self.common.translate(dx, dy);
    }

    fn mirror(&mut self, xpos: i32) {
        self.anchor.mirror_x(xpos);
        self.mirrored = !self.mirrored;
        self.common.mirror(xpos);
    }

    fn rotate(&mut self, px: i32, py: i32) {
        self.anchor.rotate_quarter(px, py);
        self.orientation = (self.orientation + 1) % 4;
        self.common.rotate(px, py);
    }

    fn export(
        &self,
        exp: &mut dyn Exporter,
        cs: &mut MapCoordinates,
        ctx: &mut ExportContext,
    ) -> Result<()> {
        let desc = ctx
            .library
            .get(&self.key)
            .ok_or_else(|| FidoError::UnknownMacro(self.key.clone()))?
            .clone();

        let x = cs.map_x(self.anchor.x, self.anchor.y);
        let y = cs.map_y(self.anchor.x, self.anchor.y);
        let texts = MacroTexts {
            name: &self.common.name,
            name_pos: (
                cs.map_x(self.common.name_pos.x, self.common.name_pos.y),
                cs.map_y(self.common.name_pos.x, self.common.name_pos.y),
            ),
            value: &self.common.value,
            value_pos: (
                cs.map_x(self.common.value_pos.x, self.common.value_pos.y),
                cs.map_y(self.common.value_pos.x, self.common.value_pos.y),
            ),
            font: &self.common.font,
            font_size: (self.common.font_size as f64 * cs.x_magnitude()) as i32,
        };
        // Once the exporter has accepted the macro natively, later
        // passes over the same instance must not emit it again.
        if ctx.macro_already_exported(&self.key, x, y) {
            return Ok(());
        }
        // The name and value texts travel with the call, so nothing
        // else has to be emitted when the exporter accepts the macro.
        if exp.export_macro(x, y, self.mirrored, self.orientation * 90, &self.key, &desc, &texts)? {
            ctx.mark_macro_exported(&self.key, x, y);
            return Ok(());
        }

        // No native support in the exporter: expand the body through a
        // nested coordinate mapping centered on the anchor.
        let body: Vec<PrimitiveType> = ctx.body_for(&self.key)?;
        ctx.enter(&self.key)?;

        let mut mc = MapCoordinates::new();
        mc.set_magnitudes_no_check(cs.x_magnitude(), cs.y_magnitude());
        mc.set_x_center(cs.map_xr(self.anchor.x, self.anchor.y));
        mc.set_y_center(cs.map_yr(self.anchor.x, self.anchor.y));
        mc.set_orientation((self.orientation + cs.orientation()) % 4);
        mc.mirror = self.mirrored ^ cs.mirror;
        mc.is_macro = true;

        let result = export_macro_body(&body, exp, &mut mc, ctx);
        ctx.leave(&self.key);
        result?;

        // Fold the extents of the body into the outer mapping.
        if mc.x_min() <= mc.x_max() && mc.y_min() <= mc.y_max() {
            cs.track_point(mc.x_min(), mc.y_min());
            cs.track_point(mc.x_max(), mc.y_max());
        }

        if ctx.only_pads {
            return Ok(());
        }
        self.common.export_text(exp, cs, ctx.draw_only_layer)
    }
}

/// Export the primitives of a macro body, honoring the single-layer and
/// pads-only restrictions of the outer pass.
fn export_macro_body(
    body: &[PrimitiveType],
    exp: &mut dyn Exporter,
    mc: &mut MapCoordinates,
    ctx: &mut ExportContext,
) -> Result<()> {
    for p in body {
        let prim = p.as_primitive();
        if ctx.only_pads {
            if matches!(p, PrimitiveType::PcbPad(_) | PrimitiveType::Macro(_)) {
                prim.export(exp, mc, ctx)?;
            }
        } else if matches!(p, PrimitiveType::Macro(_)) {
            prim.export(exp, mc, ctx)?;
        } else if ctx.draw_only_layer < 0 || prim.layer() as i32 == ctx.draw_only_layer {
            let visible = ctx
                .layers
                .get(prim.layer())
                .map(|l| l.visible)
                .unwrap_or(true);
            if visible || ctx.export_invisible {
                prim.export(exp, mc, ctx)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_parse_and_serialize() {
        let mut m = MacroInstance::default();
        m.parse_tokens(&tokens("MC 50 40 1 0 pcb.SMD0805")).ok().unwrap();
        assert_eq!(m.anchor, PointG::new(50, 40));
        assert_eq!(m.orientation, 1);
        assert!(!m.mirrored);
        // Keys are canonicalized to lowercase.
        assert_eq!(m.key, "pcb.smd0805");
        assert_eq!(m.to_text(true), "MC 50 40 1 0 pcb.smd0805\n");
    }

    #[test]
    fn test_key_with_spaces() {
        let mut m = MacroInstance::default();
        m.parse_tokens(&tokens("MC 0 0 0 1 my lib.part one"))
            .ok()
            .unwrap();
        assert!(m.mirrored);
        assert_eq!(m.key, "my lib.part one");
    }

    #[test]
    fn test_parse_too_short() {
        let mut m = MacroInstance::default();
        assert!(m.parse_tokens(&tokens("MC 0 0 0 1")).is_err());
    }

    #[test]
    fn test_rotate_wraps_orientation() {
        let mut m = MacroInstance::new(10, 0, "a.b");
        for _ in 0..4 {
            m.rotate(0, 0);
        }
        assert_eq!(m.orientation, 0);
        assert_eq!(m.anchor, PointG::new(10, 0));
    }

    #[test]
    fn test_name_value_serialization() {
        let mut m = MacroInstance::new(10, 20, "test.res");
        m.common.name = "R1".to_string();
        m.common.value = "10k".to_string();
        let text = m.to_text(true);
        assert!(text.starts_with("MC 10 20 0 0 test.res\nFCJ\n"));
        assert!(text.contains("TY 20 30 4 3 0 0 0 * R1"));
        assert!(text.contains("TY 20 25 4 3 0 0 0 * 10k"));
    }
}
