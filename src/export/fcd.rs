//! Export back to the native drawing format.
//!
//! Used to produce flattened drawings: macros from the standard
//! libraries are kept as `MC` references while every other macro is
//! expanded into its primitives. With `split_standard_macros` set, the
//! standard ones are expanded too.

use std::io::Write;

use nalgebra::Point2;

use crate::error::Result;
use crate::geom::ArrowStyle;
use crate::layers::LayerDesc;
use crate::library::{is_standard_macro, MacroDesc};
use crate::primitives::{
    AdvText, Bezier, Connection, Line, MacroInstance, Oval, PcbLine, PcbPad, Polygon, Primitive,
    Rectangle, TEXT_BOLD, TEXT_ITALIC, TEXT_MIRRORED,
};
use crate::types::PointG;

use super::{ArrowParams, Exporter, MacroTexts};

pub struct FidoCadExporter<'w, W: Write> {
    out: &'w mut W,
    extensions: bool,
    split_standard_macros: bool,
}

impl<'w, W: Write> FidoCadExporter<'w, W> {
    pub fn new(out: &'w mut W, extensions: bool, split_standard_macros: bool) -> Self {
        Self {
            out,
            extensions,
            split_standard_macros,
        }
    }

    fn write_primitive(&mut self, p: &dyn Primitive) -> Result<()> {
        self.out.write_all(p.to_text(self.extensions).as_bytes())?;
        Ok(())
    }
}

fn apply_arrow(target: &mut crate::geom::Arrow, arrow: &ArrowParams) {
    target.start = arrow.start;
    target.end = arrow.end;
    target.style = arrow.style;
    target.length = arrow.length as f32;
    target.half_width = arrow.half_width as f32;
}

impl<W: Write> Exporter for FidoCadExporter<'_, W> {
    fn export_start(
        &mut self,
        _width: i32,
        _height: i32,
        _layers: &[LayerDesc],
        _grid_step: i32,
    ) -> Result<()> {
        self.out.write_all(b"[FIDOCAD]\n")?;
        Ok(())
    }

    fn export_end(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    fn set_dash_unit(&mut self, _unit: f64) {}

    fn set_dash_phase(&mut self, _phase: f32) {}

    fn export_adv_text(
        &mut self,
        x: i32,
        y: i32,
        size_x: i32,
        size_y: i32,
        font: &str,
        is_bold: bool,
        is_mirrored: bool,
        is_italic: bool,
        orientation: i32,
        layer: usize,
        text: &str,
    ) -> Result<()> {
        let mut t = AdvText::new(x, y, text, layer);
        t.six = size_x;
        t.siy = size_y;
        t.orientation = orientation;
        if is_bold {
            t.style |= TEXT_BOLD;
        }
        if is_italic {
            t.style |= TEXT_ITALIC;
        }
        if is_mirrored {
            t.style |= TEXT_MIRRORED;
        }
        t.common.font = font.to_string();
        self.write_primitive(&t)
    }

    fn export_line(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        layer: usize,
        arrow: &ArrowParams,
        dash_style: i32,
        _stroke_width: f64,
    ) -> Result<()> {
        let mut l = Line::new(x1 as i32, y1 as i32, x2 as i32, y2 as i32, layer);
        apply_arrow(&mut l.arrow, arrow);
        l.dash = dash_style;
        self.write_primitive(&l)
    }

    fn export_bezier(
        &mut self,
        points: [(i32, i32); 4],
        layer: usize,
        arrow: &ArrowParams,
        dash_style: i32,
        _stroke_width: f64,
    ) -> Result<()> {
        let pts = [
            PointG::new(points[0].0, points[0].1),
            PointG::new(points[1].0, points[1].1),
            PointG::new(points[2].0, points[2].1),
            PointG::new(points[3].0, points[3].1),
        ];
        let mut b = Bezier::new(pts, layer);
        apply_arrow(&mut b.arrow, arrow);
        b.dash = dash_style;
        self.write_primitive(&b)
    }

    fn export_rectangle(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        filled: bool,
        layer: usize,
        dash_style: i32,
        _stroke_width: f64,
    ) -> Result<()> {
        let mut r = Rectangle::new(x1, y1, x2, y2, filled, layer);
        r.dash = dash_style;
        self.write_primitive(&r)
    }

    fn export_oval(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        filled: bool,
        layer: usize,
        dash_style: i32,
        _stroke_width: f64,
    ) -> Result<()> {
        let mut o = Oval::new(x1, y1, x2, y2, filled, layer);
        o.dash = dash_style;
        self.write_primitive(&o)
    }

    fn export_polygon(
        &mut self,
        vertices: &[Point2<f64>],
        filled: bool,
        layer: usize,
        dash_style: i32,
        _stroke_width: f64,
    ) -> Result<()> {
        let mut p = Polygon::new(filled, layer);
        for v in vertices {
            p.add_point(v.x.round() as i32, v.y.round() as i32);
        }
        p.dash = dash_style;
        self.write_primitive(&p)
    }

    fn export_curve(
        &mut self,
        _vertices: &[Point2<f64>],
        _filled: bool,
        _closed: bool,
        _layer: usize,
        _arrow: &ArrowParams,
        _dash_style: i32,
        _stroke_width: f64,
    ) -> Result<bool> {
        // Flattened through the polygon fallback.
        Ok(false)
    }

    fn export_connection(&mut self, x: i32, y: i32, layer: usize, _size: f64) -> Result<()> {
        let c = Connection::new(x, y, layer);
        self.write_primitive(&c)
    }

    fn export_pcb_line(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        width: i32,
        layer: usize,
    ) -> Result<()> {
        let l = PcbLine::new(x1, y1, x2, y2, width as f32, layer);
        self.write_primitive(&l)
    }

    fn export_pcb_pad(
        &mut self,
        x: i32,
        y: i32,
        style: i32,
        size_x: i32,
        size_y: i32,
        hole_diameter: i32,
        layer: usize,
        only_hole: bool,
    ) -> Result<()> {
        // The hole pass would duplicate the pads in the output.
        if only_hole {
            return Ok(());
        }
        let p = PcbPad::new(x, y, size_x, size_y, hole_diameter, style, layer);
        self.write_primitive(&p)
    }

    fn export_macro(
        &mut self,
        x: i32,
        y: i32,
        is_mirrored: bool,
        orientation: i32,
        key: &str,
        _desc: &MacroDesc,
        texts: &MacroTexts,
    ) -> Result<bool> {
        if self.split_standard_macros || !is_standard_macro(key, self.extensions) {
            // Expanded into primitives.
            return Ok(false);
        }
        let mut m = MacroInstance::new(x, y, key);
        m.orientation = orientation / 90;
        m.mirrored = is_mirrored;
        m.common.name = texts.name.to_string();
        m.common.name_pos = PointG::new(texts.name_pos.0, texts.name_pos.1);
        m.common.value = texts.value.to_string();
        m.common.value_pos = PointG::new(texts.value_pos.0, texts.value_pos.1);
        m.common.font = texts.font.to_string();
        m.common.font_size = texts.font_size;
        self.write_primitive(&m)?;
        Ok(true)
    }

    fn export_arrow(
        &mut self,
        x: f64,
        y: f64,
        _xc: f64,
        _yc: f64,
        _length: f64,
        _half_width: f64,
        _style: ArrowStyle,
    ) -> Result<(f64, f64)> {
        // Arrows are carried by the FCJ line of their primitive.
        Ok((x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DrawingModel;
    use crate::export::{run_export, ExportOptions};
    use crate::library::MacroLibrary;

    fn export_text(model: &DrawingModel, split: bool) -> String {
        let mut buf = Vec::new();
        let opts = ExportOptions {
            shift_to_origin: false,
            ..Default::default()
        };
        {
            let mut exp = FidoCadExporter::new(&mut buf, true, split);
            run_export(model, &opts, &mut exp).ok().unwrap();
        }
        String::from_utf8(buf).unwrap()
    }

    fn library_with_macro(key: &str) -> MacroLibrary {
        let mut lib = MacroLibrary::new();
        lib.insert(MacroDesc::new(
            key,
            "Test part",
            "LI 0 0 20 0 0",
            "cat",
            "lib",
            "file",
        ));
        lib
    }

    #[test]
    fn test_primitives_are_rewritten() {
        let m = DrawingModel::from_text("[FIDOCAD]\nLI 0 0 100 0 2\nSA 50 0 2\n");
        let s = export_text(&m, false);
        assert!(s.starts_with("[FIDOCAD]\n"));
        assert!(s.contains("LI 0 0 100 0 2\n"));
        assert!(s.contains("SA 50 0 2\n"));
    }

    #[test]
    fn test_standard_macro_stays_reference() {
        let mut m = DrawingModel::with_library(library_with_macro("pcb.p1"));
        m.parse("[FIDOCAD]\nMC 50 40 0 0 pcb.p1\n");
        let s = export_text(&m, false);
        assert!(s.contains("MC 50 40 0 0 pcb.p1\n"));
        assert!(!s.contains("LI "));
    }

    #[test]
    fn test_custom_macro_is_expanded() {
        let mut m = DrawingModel::with_library(library_with_macro("mylib.part"));
        m.parse("[FIDOCAD]\nMC 0 0 0 0 mylib.part\n");
        let s = export_text(&m, false);
        assert!(!s.contains("MC "));
        assert!(s.contains("LI "));
    }

    #[test]
    fn test_split_expands_standard_macros_too() {
        let mut m = DrawingModel::with_library(library_with_macro("pcb.p1"));
        m.parse("[FIDOCAD]\nMC 0 0 0 0 pcb.p1\n");
        let s = export_text(&m, true);
        assert!(!s.contains("MC "));
        assert!(s.contains("LI "));
    }
}
