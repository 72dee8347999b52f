//! The advanced text primitive (`TY`, legacy `TE`).

use crate::error::Result;
use crate::export::{ExportContext, Exporter};
use crate::geom::distances::{point_in_rectangle, point_to_rectangle};
use crate::geom::MapCoordinates;
use crate::types::{BoundingRect, PointG};

use super::{parse_layer, subst_font, unsubst_font, Primitive, PrimitiveCommon};

/// Bold style bit.
pub const TEXT_BOLD: i32 = 1;
/// Italic style bit.
pub const TEXT_ITALIC: i32 = 2;
/// Mirrored style bit.
pub const TEXT_MIRRORED: i32 = 4;

/// Smallest accepted font dimension.
const MIN_SIZE: i32 = 1;
/// Largest accepted font dimension.
const MAX_SIZE: i32 = 2000;

/// A text element with an independent font, size, orientation and
/// style.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvText {
    pub anchor: PointG,
    /// Horizontal size of a character.
    pub six: i32,
    /// Vertical size of a character.
    pub siy: i32,
    /// Orientation in degrees, counterclockwise.
    pub orientation: i32,
    /// Style bits, a combination of `TEXT_*` constants.
    pub style: i32,
    pub text: String,
    pub common: PrimitiveCommon,
}

impl Default for AdvText {
    fn default() -> Self {
        Self {
            anchor: PointG::default(),
            six: 3,
            siy: 4,
            orientation: 0,
            style: 0,
            text: String::new(),
            common: PrimitiveCommon::default(),
        }
    }
}

impl AdvText {
    pub fn new(x: i32, y: i32, text: impl Into<String>, layer: usize) -> Self {
        let mut t = AdvText {
            anchor: PointG::new(x, y),
            text: text.into(),
            ..Default::default()
        };
        t.common.layer = layer;
        t
    }

    fn check_sizes(&mut self) {
        self.six = self.six.clamp(MIN_SIZE, MAX_SIZE);
        self.siy = self.siy.clamp(MIN_SIZE, MAX_SIZE);
    }

    pub fn is_bold(&self) -> bool {
        self.style & TEXT_BOLD != 0
    }

    pub fn is_italic(&self) -> bool {
        self.style & TEXT_ITALIC != 0
    }

    pub fn is_mirrored(&self) -> bool {
        self.style & TEXT_MIRRORED != 0
    }
}

impl Primitive for AdvText {
    fn common(&self) -> &PrimitiveCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut PrimitiveCommon {
        &mut self.common
    }

    fn command(&self) -> &'static str {
        "TY"
    }

    fn parse_tokens(&mut self, tokens: &[String]) -> Result<()> {
        let nn = tokens.len();
        if tokens[0] == "TY" {
            if nn < 9 {
                return Err("bad arguments on TY".into());
            }
            self.anchor.x = tokens[1].parse()?;
            self.anchor.y = tokens[2].parse()?;
            self.siy = tokens[3].parse::<f64>()?.round() as i32;
            self.six = tokens[4].parse::<f64>()?.round() as i32;
            self.check_sizes();
            self.orientation = tokens[5].parse()?;
            self.style = tokens[6].parse()?;
            self.common.layer = parse_layer(&tokens[7]);
            self.common.font = unsubst_font(&tokens[8]);
            self.text = tokens[9..].join(" ");
        } else {
            // Legacy TE command: fixed size, no style, layer zero.
            if nn < 4 {
                return Err("bad arguments on TE".into());
            }
            self.anchor.x = tokens[1].parse()?;
            self.anchor.y = tokens[2].parse()?;
            self.six = 3;
            self.siy = 4;
            self.orientation = 0;
            self.style = 0;
            self.common.layer = 0;
            self.text = tokens[3..].iter().map(|t| format!("{} ", t)).collect();
        }
        Ok(())
    }

    fn to_text(&self, _extensions: bool) -> String {
        if self.text.is_empty() {
            return String::new();
        }
        format!(
            "TY {} {} {} {} {} {} {} {} {}\n",
            self.anchor.x,
            self.anchor.y,
            self.siy,
            self.six,
            self.orientation,
            self.style,
            self.common.layer,
            subst_font(&self.common.font),
            self.text
        )
    }

    fn distance_to_point(&self, x: i32, y: i32) -> i32 {
        // Crude hit box around the unrotated text.
        let w = self.six * self.text.chars().count() as i32;
        let h = self.siy;
        if point_in_rectangle(self.anchor.x, self.anchor.y, w, h, x, y) {
            return 0;
        }
        point_to_rectangle(self.anchor.x, self.anchor.y, w, h, x, y)
    }

    fn bounding_box(&self) -> BoundingRect {
        let w = self.six * self.text.chars().count() as i32;
        BoundingRect::from_corners(
            self.anchor.x,
            self.anchor.y,
            self.anchor.x + w,
            self.anchor.y + self.siy,
        )
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.anchor.translate(dx, dy);
    }

    fn mirror(&mut self, xpos: i32) {
        self.anchor.mirror_x(xpos);
        self.style ^= TEXT_MIRRORED;
    }

    fn rotate(&mut self, px: i32, py: i32) {
        self.anchor.rotate_quarter(px, py);
        self.orientation = (self.orientation + 90) % 360;
    }

    fn export(
        &self,
        exp: &mut dyn Exporter,
        cs: &mut MapCoordinates,
        _ctx: &mut ExportContext,
    ) -> Result<()> {
        let x = cs.map_x(self.anchor.x, self.anchor.y);
        let y = cs.map_y(self.anchor.x, self.anchor.y);
        let xsize = (cs.map_xr(self.six, self.six) - cs.map_xr(0, 0)).abs() as i32;
        let ysize = (cs.map_yr(self.siy, self.siy) - cs.map_yr(0, 0)).abs() as i32;
        // The mapping orientation rotates the drawing, so the residual
        // text rotation has to compensate for it.
        let resulting_o = self.orientation - cs.orientation() * 90;
        exp.export_adv_text(
            x,
            y,
            xsize,
            ysize,
            &self.common.font,
            self.is_bold(),
            self.is_mirrored(),
            self.is_italic(),
            resulting_o,
            self.common.layer,
            &self.text,
        )
    }
}
