//! Graphic primitives: the drawing elements a document is made of.
//!
//! Each primitive lives in its own module and implements the
//! [`Primitive`] trait. The closed [`PrimitiveType`] enum dispatches to
//! the concrete types without dynamic allocation in the document.

pub mod adv_text;
pub mod bezier;
pub mod complex_curve;
pub mod connection;
pub mod line;
pub mod macro_instance;
pub mod oval;
pub mod pcb_line;
pub mod pcb_pad;
pub mod polygon;
pub mod rectangle;

pub use adv_text::{AdvText, TEXT_BOLD, TEXT_ITALIC, TEXT_MIRRORED};
pub use bezier::Bezier;
pub use complex_curve::ComplexCurve;
pub use connection::Connection;
pub use line::Line;
pub use macro_instance::MacroInstance;
pub use oval::Oval;
pub use pcb_line::PcbLine;
pub use pcb_pad::{PcbPad, PAD_STYLE_OVAL, PAD_STYLE_ROUNDED, PAD_STYLE_SQUARE};
pub use polygon::Polygon;
pub use rectangle::Rectangle;

use crate::error::Result;
use crate::export::{ExportContext, Exporter};
use crate::geom::MapCoordinates;
use crate::types::{BoundingRect, PointG};

/// Number of dash styles.
pub const DASH_NUMBER: usize = 5;

/// Dash patterns, in logical units. Style zero is a solid stroke.
pub const DASH: [&[f32]; DASH_NUMBER] = [
    &[10.0, 0.0],
    &[5.0, 5.0],
    &[2.0, 2.0],
    &[2.0, 5.0],
    &[2.0, 5.0, 5.0, 5.0],
];

/// Largest accepted number of control points on a polygon or a
/// complex curve.
pub const MAX_POLY_POINTS: usize = 256;

/// The font used when a text element does not specify one.
pub const DEFAULT_TEXT_FONT: &str = "Courier New";

/// Default vertical size of the name/value font, in logical units.
pub const DEFAULT_MACRO_FONT_SIZE: i32 = 3;

/// Clamp a dash style index to the valid range.
pub fn check_dash_style(dash: i32) -> i32 {
    dash.clamp(0, DASH_NUMBER as i32 - 1)
}

/// Parse a layer token. Anything unparseable or out of range falls
/// back to layer zero.
pub fn parse_layer(token: &str) -> usize {
    match token.parse::<i32>() {
        Ok(l) if (0..crate::layers::MAX_LAYERS as i32).contains(&l) => l as usize,
        _ => 0,
    }
}

/// Encode a font name for the file format: the default font becomes an
/// asterisk, spaces become `++`.
pub fn subst_font(font: &str) -> String {
    if font == DEFAULT_TEXT_FONT {
        "*".to_string()
    } else {
        font.replace(' ', "++")
    }
}

/// Decode a font token from the file format.
pub fn unsubst_font(token: &str) -> String {
    if token == "*" {
        DEFAULT_TEXT_FONT.to_string()
    } else {
        token.replace("++", " ")
    }
}

/// State shared by every primitive: the layer, the selection flag and
/// the optional name/value text pair with its font.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveCommon {
    pub layer: usize,
    pub selected: bool,
    pub name: String,
    pub value: String,
    pub name_pos: PointG,
    pub value_pos: PointG,
    pub font: String,
    pub font_size: i32,
}

impl Default for PrimitiveCommon {
    fn default() -> Self {
        Self {
            layer: 0,
            selected: false,
            name: String::new(),
            value: String::new(),
            name_pos: PointG::default(),
            value_pos: PointG::default(),
            font: DEFAULT_TEXT_FONT.to_string(),
            font_size: DEFAULT_MACRO_FONT_SIZE,
        }
    }
}

impl PrimitiveCommon {
    /// True when a name or a value is attached.
    pub fn has_text(&self) -> bool {
        !self.name.is_empty() || !self.value.is_empty()
    }

    /// Set the default name/value anchor positions relative to the
    /// reference point of the primitive.
    pub fn reset_text_positions(&mut self, x: i32, y: i32) {
        self.name_pos = PointG::new(x + 5, y + 5);
        self.value_pos = PointG::new(x + 5, y + 10);
    }

    /// Clamp the font size to at least one logical unit.
    pub fn set_font_size(&mut self, size: i32) {
        self.font_size = size.max(1);
    }

    /// Read the name from a `TY` token list: position from tokens one
    /// and two, text from token nine onwards.
    pub fn set_name_tokens(&mut self, tokens: &[String]) -> Result<()> {
        if tokens.len() < 9 {
            return Err("bad arguments on TY".into());
        }
        self.name_pos.x = tokens[1].parse()?;
        self.name_pos.y = tokens[2].parse()?;
        self.name = tokens[9..].join(" ");
        Ok(())
    }

    /// Read the value from a `TY` token list. Besides the position and
    /// the text, the value line also carries the font name and size
    /// shared by both texts.
    pub fn set_value_tokens(&mut self, tokens: &[String]) -> Result<()> {
        if tokens.len() < 9 {
            return Err("bad arguments on TY".into());
        }
        self.value_pos.x = tokens[1].parse()?;
        self.value_pos.y = tokens[2].parse()?;
        self.font = unsubst_font(&tokens[8]);
        self.set_font_size(tokens[4].parse()?);
        self.value = tokens[9..].join(" ");
        Ok(())
    }

    /// Serialize the name/value pair as two `TY` lines. When
    /// `with_fcj` is set, an `FCJ` line announcing the texts is
    /// written first; primitives whose own `FCJ` extension carries a
    /// text flag pass `false` here.
    pub fn save_text(&self, with_fcj: bool) -> String {
        if !self.has_text() {
            return String::new();
        }
        let mut s = String::new();
        if with_fcj {
            s.push_str("FCJ\n");
        }
        let font = subst_font(&self.font);
        s.push_str(&format!(
            "TY {} {} {} {} 0 0 {} {} {}\n",
            self.name_pos.x,
            self.name_pos.y,
            self.font_size * 4 / 3,
            self.font_size,
            self.layer,
            font,
            self.name
        ));
        s.push_str(&format!(
            "TY {} {} {} {} 0 0 {} {} {}\n",
            self.value_pos.x,
            self.value_pos.y,
            self.font_size * 4 / 3,
            self.font_size,
            self.layer,
            font,
            self.value
        ));
        s
    }

    /// Export the name/value pair as plain text elements.
    pub fn export_text(
        &self,
        exp: &mut dyn Exporter,
        cs: &mut MapCoordinates,
        draw_only_layer: i32,
    ) -> Result<()> {
        if draw_only_layer >= 0 && draw_only_layer != self.layer as i32 {
            return Ok(());
        }
        let size = (cs.map_xr(self.font_size, self.font_size) - cs.map_xr(0, 0)).abs();
        if !self.name.is_empty() {
            let x = cs.map_x(self.name_pos.x, self.name_pos.y);
            let y = cs.map_y(self.name_pos.x, self.name_pos.y);
            exp.export_adv_text(
                x,
                y,
                size as i32,
                (size * 12.0 / 7.0 + 0.5) as i32,
                &self.font,
                false,
                false,
                false,
                0,
                self.layer,
                &self.name,
            )?;
        }
        if !self.value.is_empty() {
            let x = cs.map_x(self.value_pos.x, self.value_pos.y);
            let y = cs.map_y(self.value_pos.x, self.value_pos.y);
            exp.export_adv_text(
                x,
                y,
                size as i32,
                (size * 12.0 / 7.0 + 0.5) as i32,
                &self.font,
                false,
                false,
                false,
                0,
                self.layer,
                &self.value,
            )?;
        }
        Ok(())
    }

    /// Translate the text anchors along with the primitive.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.name_pos.translate(dx, dy);
        self.value_pos.translate(dx, dy);
    }

    /// Mirror the text anchors along with the primitive.
    pub fn mirror(&mut self, xpos: i32) {
        self.name_pos.mirror_x(xpos);
        self.value_pos.mirror_x(xpos);
    }

    /// Rotate the text anchors along with the primitive.
    pub fn rotate(&mut self, px: i32, py: i32) {
        self.name_pos.rotate_quarter(px, py);
        self.value_pos.rotate_quarter(px, py);
    }
}

/// Behavior common to every drawing element.
pub trait Primitive {
    /// Shared state.
    fn common(&self) -> &PrimitiveCommon;

    /// Shared state, mutable.
    fn common_mut(&mut self) -> &mut PrimitiveCommon;

    /// The command this primitive serializes to.
    fn command(&self) -> &'static str;

    /// Read the primitive from a tokenized line, including any merged
    /// `FCJ` extension tokens.
    fn parse_tokens(&mut self, tokens: &[String]) -> Result<()>;

    /// Serialize the primitive, each line terminated by a newline.
    /// When `extensions` is false only the plain FidoCAD subset is
    /// written.
    fn to_text(&self, extensions: bool) -> String;

    /// Approximate distance used for picking.
    fn distance_to_point(&self, x: i32, y: i32) -> i32;

    /// Bounding rectangle of the control points, in logical units.
    fn bounding_box(&self) -> BoundingRect;

    /// Translate the primitive.
    fn translate(&mut self, dx: i32, dy: i32);

    /// Mirror the primitive around a vertical axis.
    fn mirror(&mut self, xpos: i32);

    /// Rotate the primitive by one quarter turn clockwise around the
    /// given point.
    fn rotate(&mut self, px: i32, py: i32);

    /// Export the primitive through the given exporter.
    fn export(
        &self,
        exp: &mut dyn Exporter,
        cs: &mut MapCoordinates,
        ctx: &mut ExportContext,
    ) -> Result<()>;

    /// The layer of the primitive.
    fn layer(&self) -> usize {
        self.common().layer
    }

    /// Change the layer of the primitive, clamping to the valid range.
    fn set_layer(&mut self, layer: usize) {
        self.common_mut().layer = layer.min(crate::layers::MAX_LAYERS - 1);
    }
}

/// Closed enumeration of all primitive kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveType {
    Line(Line),
    Bezier(Bezier),
    Rectangle(Rectangle),
    Oval(Oval),
    Polygon(Polygon),
    ComplexCurve(ComplexCurve),
    PcbLine(PcbLine),
    PcbPad(PcbPad),
    Connection(Connection),
    AdvText(AdvText),
    Macro(MacroInstance),
}

impl PrimitiveType {
    /// Create an empty primitive from a command token, or `None` when
    /// the command is unknown.
    pub fn from_command(cmd: &str) -> Option<PrimitiveType> {
        match cmd {
            "LI" => Some(PrimitiveType::Line(Line::default())),
            "BE" => Some(PrimitiveType::Bezier(Bezier::default())),
            "RV" | "RP" => Some(PrimitiveType::Rectangle(Rectangle::default())),
            "EV" | "EP" => Some(PrimitiveType::Oval(Oval::default())),
            "PV" | "PP" => Some(PrimitiveType::Polygon(Polygon::default())),
            "CV" | "CP" => Some(PrimitiveType::ComplexCurve(ComplexCurve::default())),
            "PL" => Some(PrimitiveType::PcbLine(PcbLine::default())),
            "PA" => Some(PrimitiveType::PcbPad(PcbPad::default())),
            "SA" => Some(PrimitiveType::Connection(Connection::default())),
            "TY" | "TE" => Some(PrimitiveType::AdvText(AdvText::default())),
            "MC" => Some(PrimitiveType::Macro(MacroInstance::default())),
            _ => None,
        }
    }

    /// Dispatch to the trait object.
    pub fn as_primitive(&self) -> &dyn Primitive {
        match self {
            PrimitiveType::Line(p) => p,
            PrimitiveType::Bezier(p) => p,
            PrimitiveType::Rectangle(p) => p,
            PrimitiveType::Oval(p) => p,
            PrimitiveType::Polygon(p) => p,
            PrimitiveType::ComplexCurve(p) => p,
            PrimitiveType::PcbLine(p) => p,
            PrimitiveType::PcbPad(p) => p,
            PrimitiveType::Connection(p) => p,
            PrimitiveType::AdvText(p) => p,
            PrimitiveType::Macro(p) => p,
        }
    }

    /// Dispatch to the trait object, mutable.
    pub fn as_primitive_mut(&mut self) -> &mut dyn Primitive {
        match self {
            PrimitiveType::Line(p) => p,
            PrimitiveType::Bezier(p) => p,
            PrimitiveType::Rectangle(p) => p,
            PrimitiveType::Oval(p) => p,
            PrimitiveType::Polygon(p) => p,
            PrimitiveType::ComplexCurve(p) => p,
            PrimitiveType::PcbLine(p) => p,
            PrimitiveType::PcbPad(p) => p,
            PrimitiveType::Connection(p) => p,
            PrimitiveType::AdvText(p) => p,
            PrimitiveType::Macro(p) => p,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_layer_fallback() {
        assert_eq!(parse_layer("3"), 3);
        assert_eq!(parse_layer("15"), 15);
        assert_eq!(parse_layer("16"), 0);
        assert_eq!(parse_layer("-1"), 0);
        assert_eq!(parse_layer("zzz"), 0);
    }

    #[test]
    fn test_check_dash_style() {
        assert_eq!(check_dash_style(-3), 0);
        assert_eq!(check_dash_style(2), 2);
        assert_eq!(check_dash_style(99), 4);
    }

    #[test]
    fn test_font_substitution() {
        assert_eq!(subst_font(DEFAULT_TEXT_FONT), "*");
        assert_eq!(subst_font("DejaVu Sans Mono"), "DejaVu++Sans++Mono");
        assert_eq!(unsubst_font("*"), DEFAULT_TEXT_FONT);
        assert_eq!(unsubst_font("DejaVu++Sans"), "DejaVu Sans");
    }

    #[test]
    fn test_from_command() {
        assert!(matches!(
            PrimitiveType::from_command("LI"),
            Some(PrimitiveType::Line(_))
        ));
        assert!(matches!(
            PrimitiveType::from_command("RP"),
            Some(PrimitiveType::Rectangle(_))
        ));
        assert!(PrimitiveType::from_command("XX").is_none());
    }

    #[test]
    fn test_save_text_roundtrip() {
        let mut c = PrimitiveCommon {
            name: "R1".to_string(),
            value: "10k".to_string(),
            ..Default::default()
        };
        c.reset_text_positions(20, 30);
        let text = c.save_text(true);
        assert!(text.starts_with("FCJ\n"));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "TY 25 35 4 3 0 0 0 * R1");
        assert_eq!(lines[2], "TY 25 40 4 3 0 0 0 * 10k");

        // Parse the two lines back.
        let name_tokens: Vec<String> = lines[1].split_whitespace().map(String::from).collect();
        let value_tokens: Vec<String> = lines[2].split_whitespace().map(String::from).collect();
        let mut c2 = PrimitiveCommon::default();
        c2.set_name_tokens(&name_tokens).ok();
        c2.set_value_tokens(&value_tokens).ok();
        assert_eq!(c2.name, "R1");
        assert_eq!(c2.value, "10k");
        assert_eq!(c2.font, DEFAULT_TEXT_FONT);
        assert_eq!(c2.font_size, 3);
    }

    #[test]
    fn test_no_text_saves_nothing() {
        let c = PrimitiveCommon::default();
        assert!(c.save_text(true).is_empty());
    }
}
