//! Serialization of a drawing back to its text form.

use std::io::Write;
use std::path::Path;

use crate::document::{DrawingConfig, DrawingModel};
use crate::error::Result;
use crate::layers::standard_description;

use super::FILE_HEADER;

/// Serialize a whole drawing, header included.
pub fn text_of(model: &DrawingModel, extensions: bool) -> String {
    let mut s = String::from(FILE_HEADER);
    s.push('\n');
    s.push_str(&register_configuration(model, extensions));
    for p in model.primitives() {
        s.push_str(&p.as_primitive().to_text(extensions));
    }
    s
}

/// Write the configuration lines describing everything that differs
/// from the defaults: junction size, modified layers and stroke widths.
/// The original format has no such lines, so nothing is produced
/// without extensions.
pub fn register_configuration(model: &DrawingModel, extensions: bool) -> String {
    if !extensions {
        return String::new();
    }
    let mut s = String::new();

    if (model.config.connection_size - DrawingConfig::CONNECTION_SIZE).abs() > 1e-5 {
        s.push_str(&format!("FJC C {}\n", model.config.connection_size));
    }

    for (i, layer) in model.layers.iter().enumerate() {
        if layer.modified {
            s.push_str(&format!(
                "FJC L {} {} {}\n",
                i,
                layer.color.rgb(),
                layer.alpha
            ));
            if layer.description != standard_description(i) {
                s.push_str(&format!("FJC N {} {}\n", i, layer.description));
            }
        }
    }

    if (model.config.line_width - DrawingConfig::LINE_WIDTH).abs() > 1e-5 {
        s.push_str(&format!("FJC A {}\n", model.config.line_width));
    }
    if (model.config.line_width_circles - DrawingConfig::LINE_WIDTH_CIRCLES).abs() > 1e-5 {
        s.push_str(&format!("FJC B {}\n", model.config.line_width_circles));
    }
    s
}

/// Write a drawing to any writer.
pub fn write_to_writer<W: Write>(model: &DrawingModel, extensions: bool, w: &mut W) -> Result<()> {
    w.write_all(text_of(model, extensions).as_bytes())?;
    Ok(())
}

/// Write a drawing to a file.
pub fn write_to_file<P: AsRef<Path>>(model: &DrawingModel, extensions: bool, path: P) -> Result<()> {
    let mut f = std::fs::File::create(path)?;
    write_to_writer(model, extensions, &mut f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{Line, PrimitiveType};
    use crate::types::Color;

    #[test]
    fn test_header_and_primitives() {
        let mut m = DrawingModel::new();
        m.add(PrimitiveType::Line(Line::new(0, 0, 50, 0, 0)), false);
        assert_eq!(m.to_text(true), "[FIDOCAD]\nLI 0 0 50 0 0\n");
    }

    #[test]
    fn test_default_configuration_is_silent() {
        let m = DrawingModel::new();
        assert_eq!(register_configuration(&m, true), "");
        assert_eq!(register_configuration(&m, false), "");
    }

    #[test]
    fn test_modified_settings_are_registered() {
        let mut m = DrawingModel::new();
        m.config.connection_size = 3.0;
        m.config.line_width = 0.8;
        m.layers[2].color = Color::new(0, 255, 0);
        m.layers[2].description = "Greenish".to_string();
        m.layers[2].modified = true;
        let s = register_configuration(&m, true);
        let lines: Vec<_> = s.lines().collect();
        assert_eq!(lines[0], "FJC C 3");
        assert!(lines[1].starts_with("FJC L 2 "));
        assert_eq!(lines[2], "FJC N 2 Greenish");
        assert_eq!(lines[3], "FJC A 0.8");
        // Nothing is registered without extensions.
        assert!(register_configuration(&m, false).is_empty());
    }

    #[test]
    fn test_standard_name_not_registered() {
        let mut m = DrawingModel::new();
        m.layers[3].color = Color::new(1, 2, 3);
        m.layers[3].modified = true;
        let s = register_configuration(&m, true);
        assert!(s.contains("FJC L 3 "));
        assert!(!s.contains("FJC N"));
    }

    #[test]
    fn test_roundtrip_through_parse() {
        let original = "[FIDOCAD]\nFJC C 3.5\nLI 0 0 50 0 2\nFCJ 2 0 3 1 0 0\nSA 50 0 2\n";
        let m = DrawingModel::from_text(original);
        let out = m.to_text(true);
        let m2 = DrawingModel::from_text(&out);
        assert_eq!(m2.len(), m.len());
        assert_eq!(m2.config.connection_size, 3.5);
        assert_eq!(out, m2.to_text(true));
    }
}
