//! The drawing model: an ordered list of primitives together with the
//! layer table, the macro library and the drawing configuration.

use crate::layers::{standard_layers, LayerDesc, MAX_LAYERS};
use crate::library::MacroLibrary;
use crate::notification::NotificationCollection;
use crate::primitives::{PrimitiveType, DEFAULT_TEXT_FONT};
use crate::types::BoundingRect;

/// Stroke widths, junction size and default font of a drawing. These
/// values can be overridden by `FJC` configuration lines in a file.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingConfig {
    /// Diameter of a connection dot, in logical units.
    pub connection_size: f64,
    /// Stroke width used by most primitives.
    pub line_width: f64,
    /// Stroke width used by ovals.
    pub line_width_circles: f64,
    pub default_font: String,
    pub default_font_size: i32,
}

impl DrawingConfig {
    /// Default junction diameter.
    pub const CONNECTION_SIZE: f64 = 2.0;
    /// Default stroke width.
    pub const LINE_WIDTH: f64 = 0.5;
    /// Default stroke width for ovals.
    pub const LINE_WIDTH_CIRCLES: f64 = 0.35;
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            connection_size: Self::CONNECTION_SIZE,
            line_width: Self::LINE_WIDTH,
            line_width_circles: Self::LINE_WIDTH_CIRCLES,
            default_font: DEFAULT_TEXT_FONT.to_string(),
            default_font_size: 3,
        }
    }
}

/// A complete drawing.
#[derive(Debug, Clone, Default)]
pub struct DrawingModel {
    primitives: Vec<PrimitiveType>,
    pub layers: Vec<LayerDesc>,
    pub library: MacroLibrary,
    pub config: DrawingConfig,
    /// Problems found while reading the drawing.
    pub notifications: NotificationCollection,
    /// Set whenever the drawing differs from its last saved state.
    pub changed: bool,
}

impl DrawingModel {
    /// Create an empty drawing with the standard layer table.
    pub fn new() -> Self {
        Self {
            layers: standard_layers(),
            ..Default::default()
        }
    }

    /// Create an empty drawing sharing an already loaded library.
    pub fn with_library(library: MacroLibrary) -> Self {
        Self {
            library,
            ..Self::new()
        }
    }

    pub fn primitives(&self) -> &[PrimitiveType] {
        &self.primitives
    }

    pub fn primitives_mut(&mut self) -> &mut Vec<PrimitiveType> {
        self.changed = true;
        &mut self.primitives
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Append a primitive, keeping the list sorted by layer when
    /// `sort` is requested.
    pub fn add(&mut self, p: PrimitiveType, sort: bool) {
        self.primitives.push(p);
        self.changed = true;
        if sort {
            self.sort_primitive_layers();
        }
    }

    /// Stable sort of the primitives by layer, so that elements on
    /// higher layers are drawn later. Elements on the same layer keep
    /// their relative order.
    pub fn sort_primitive_layers(&mut self) {
        self.primitives
            .sort_by_key(|p| p.as_primitive().layer());
    }

    /// Whether any primitive lies on the given layer. Macros always
    /// count as using every layer, since their bodies may.
    pub fn contains_layer(&self, layer: usize) -> bool {
        self.primitives.iter().any(|p| {
            matches!(p, PrimitiveType::Macro(_)) || p.as_primitive().layer() == layer
        })
    }

    /// Bounding rectangle of the control points of the whole drawing,
    /// in logical units.
    pub fn bounding_box(&self) -> BoundingRect {
        let mut b = BoundingRect::new();
        for p in &self.primitives {
            b.merge(&p.as_primitive().bounding_box());
        }
        b
    }

    /// Index of the layers actually used, for interfaces that only
    /// offer the used subset.
    pub fn used_layers(&self) -> Vec<usize> {
        (0..MAX_LAYERS).filter(|l| self.contains_layer(*l)).collect()
    }

    /// Parse a drawing in text form into this model. Unreadable lines
    /// are recorded in `notifications` and skipped.
    pub fn parse(&mut self, text: &str) {
        crate::io::fcd::reader::parse_into(self, text);
    }

    /// Build a model from a drawing in text form with the standard
    /// layers and an empty library.
    pub fn from_text(text: &str) -> Self {
        let mut model = Self::new();
        model.parse(text);
        model
    }

    /// Serialize the drawing, with or without extensions.
    pub fn to_text(&self, extensions: bool) -> String {
        crate::io::fcd::writer::text_of(self, extensions)
    }
}
