//! Layer descriptions and the standard 16-layer table.

use once_cell::sync::Lazy;

use crate::types::Color;

/// Number of layers in a drawing.
pub const MAX_LAYERS: usize = 16;

/// Description of one layer: color, visibility and transparency.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerDesc {
    pub color: Color,
    pub visible: bool,
    /// Set when the layer differs from the standard table and must be
    /// registered in the file configuration.
    pub modified: bool,
    pub description: String,
    /// Transparency, between 0.0 and 1.0.
    pub alpha: f32,
}

impl LayerDesc {
    /// Create a layer description.
    pub fn new(color: Color, visible: bool, description: impl Into<String>, alpha: f32) -> Self {
        Self {
            color,
            visible,
            modified: false,
            description: description.into(),
            alpha,
        }
    }
}

static STANDARD: Lazy<Vec<LayerDesc>> = Lazy::new(|| {
    vec![
        LayerDesc::new(Color::black(), true, "Circuit", 1.0),
        LayerDesc::new(Color::new(0, 0, 128), true, "Bottom copper", 1.0),
        LayerDesc::new(Color::new(255, 0, 0), true, "Top copper", 1.0),
        LayerDesc::new(Color::new(0, 128, 128), true, "Silkscreen", 1.0),
        LayerDesc::new(Color::new(255, 200, 0), true, "Other 1", 1.0),
        LayerDesc::new(Color::new(127, 255, 0), true, "Other 2", 1.0),
        LayerDesc::new(Color::new(0, 255, 255), true, "Other 3", 1.0),
        LayerDesc::new(Color::new(0, 128, 0), true, "Other 4", 1.0),
        LayerDesc::new(Color::new(154, 205, 50), true, "Other 5", 1.0),
        LayerDesc::new(Color::new(255, 20, 147), true, "Other 6", 1.0),
        LayerDesc::new(Color::new(181, 155, 12), true, "Other 7", 1.0),
        LayerDesc::new(Color::new(1, 128, 255), true, "Other 8", 1.0),
        LayerDesc::new(Color::new(225, 225, 225), true, "Other 9", 0.95),
        LayerDesc::new(Color::new(162, 162, 162), true, "Other 10", 0.9),
        LayerDesc::new(Color::new(95, 95, 95), true, "Other 11", 0.9),
        LayerDesc::new(Color::black(), true, "Other 12", 1.0),
    ]
});

/// The standard layer table used by new drawings.
pub fn standard_layers() -> Vec<LayerDesc> {
    STANDARD.clone()
}

/// Description of a standard layer, used to decide whether a layer
/// name needs to be saved in the file configuration.
pub fn standard_description(index: usize) -> &'static str {
    STANDARD
        .get(index)
        .map(|l| l.description.as_str())
        .unwrap_or("")
}

/// Build a black and white layer table from an existing one,
/// preserving visibility and transparency. Used for monochrome
/// exports.
pub fn monochrome_layers(base: &[LayerDesc]) -> Vec<LayerDesc> {
    (0..MAX_LAYERS)
        .map(|i| {
            let (visible, alpha) = base
                .get(i)
                .map(|l| (l.visible, l.alpha))
                .unwrap_or((true, 1.0));
            LayerDesc::new(Color::black(), visible, "B/W", alpha)
        })
        .collect()
}
