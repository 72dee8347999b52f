//! # fidorust
//!
//! A pure Rust library for reading, writing and exporting CAD drawings
//! in the FidoCadJ text format.
//!
//! This library provides complete support for the `[FIDOCAD]` drawing
//! format, inspired by [FidoCadJ](https://github.com/DarwinNE/FidoCadJ).
//!
//! ## Features
//!
//! - Read and write drawings in the native text format
//! - All graphic primitives (lines, curves, polygons, texts, macros,
//!   PCB lines and pads)
//! - 16-layer table with colors, visibility and transparency
//! - Macro libraries with nested macro expansion
//! - Export to EPS, SVG, PDF and Eagle script
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fidorust::DrawingModel;
//!
//! // Parse a drawing
//! let model = DrawingModel::from_text("[FIDOCAD]\nLI 10 10 100 10 0\n");
//!
//! // Access primitives
//! for p in model.primitives() {
//!     println!("Primitive: {:?}", p);
//! }
//!
//! // Write back to text
//! let text = fidorust::io::fcd::writer::text_of(&model, true);
//! # let _ = text;
//! ```
//!
//! ## Architecture
//!
//! The library uses a trait-based design for maximum flexibility:
//!
//! - `Primitive` - Trait for all graphic primitives
//! - `Exporter` - Trait implemented by every output format
//! - `DrawingModel` - Central document structure
//! - `MacroLibrary` - Ordered collection of macro definitions

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod document;
pub mod error;
pub mod export;
pub mod geom;
pub mod io;
pub mod layers;
pub mod library;
pub mod notification;
pub mod primitives;
pub mod types;

// Re-export commonly used types
pub use error::{FidoError, Result};
pub use types::{BoundingRect, Color, PointG};

// Re-export primitive types
pub use primitives::{
    AdvText, Bezier, ComplexCurve, Connection, Line, MacroInstance, Oval, PcbLine, PcbPad, Polygon,
    Primitive, PrimitiveType, Rectangle,
};

// Re-export the layer table
pub use layers::{standard_layers, LayerDesc, MAX_LAYERS};

// Re-export document and library
pub use document::{DrawingConfig, DrawingModel};
pub use library::{MacroDesc, MacroLibrary};

// Re-export export entry points
pub use export::{export_to_file, export_to_writer, ExportFormat, ExportOptions, Exporter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_drawing_model_creation() {
        let model = DrawingModel::new();
        assert!(model.primitives().is_empty());
        assert_eq!(model.layers.len(), MAX_LAYERS);
    }
}
