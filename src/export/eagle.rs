//! Export as a script for the Eagle CAD program.
//!
//! Only the subset with an Eagle counterpart is produced: nets, texts,
//! rectangles, circles, junctions and macro placements. Macros are
//! placed as `Add` commands referencing an Eagle library, so they are
//! never expanded.

use std::io::Write;

use nalgebra::Point2;

use crate::error::Result;
use crate::geom::ArrowStyle;
use crate::layers::LayerDesc;
use crate::library::MacroDesc;

use super::{ArrowParams, Exporter, MacroTexts};

/// Conversion between logical units and Eagle units (1/10 inches).
const RES: f64 = 5e-2;
const TEXT_STRETCH: f64 = 0.73;
/// Name of the Eagle library holding the symbols.
const EAGLE_LIBRARY: &str = "FidoCadJLIB";

pub struct EagleExporter<'w, W: Write> {
    out: &'w mut W,
    height: i32,
    old_text_size: i32,
    /// `Add` commands are deferred to the end of the script.
    macro_list: String,
    junction_list: String,
}

/// Format a number with at most four decimals.
fn een(n: f64) -> String {
    let rounded = (n * 10000.0).round() / 10000.0;
    let mut s = format!("{:.4}", rounded);
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

impl<'w, W: Write> EagleExporter<'w, W> {
    pub fn new(out: &'w mut W) -> Self {
        Self {
            out,
            height: 0,
            old_text_size: -1,
            macro_list: String::new(),
            junction_list: String::new(),
        }
    }

    /// Flip the vertical axis, since Eagle has its origin at the
    /// bottom.
    fn ey(&self, y: f64) -> f64 {
        (self.height as f64 - y) * RES
    }
}

impl<W: Write> Exporter for EagleExporter<'_, W> {
    fn export_start(
        &mut self,
        _width: i32,
        height: i32,
        _layers: &[LayerDesc],
        grid_step: i32,
    ) -> Result<()> {
        self.height = height;
        self.old_text_size = -1;
        self.macro_list.clear();
        self.junction_list.clear();

        writeln!(self.out, "# Created by fidorust {}", crate::VERSION)?;
        writeln!(self.out, "Set Wire_Bend 2; ")?;
        writeln!(self.out, "Grid inch {};", een(grid_step as f64 * RES))?;
        writeln!(self.out, "Change font fixed;")?;
        writeln!(self.out, "Set auto_junction off;")?;
        Ok(())
    }

    fn export_end(&mut self) -> Result<()> {
        self.out.write_all(self.macro_list.as_bytes())?;
        self.out.write_all(self.junction_list.as_bytes())?;
        writeln!(self.out, "Window Fit; ")?;
        self.out.flush()?;
        Ok(())
    }

    fn set_dash_unit(&mut self, _unit: f64) {
        // Dashing is not supported by the script format.
    }

    fn set_dash_phase(&mut self, _phase: f32) {}

    fn export_adv_text(
        &mut self,
        x: i32,
        y: i32,
        _size_x: i32,
        size_y: i32,
        _font: &str,
        _is_bold: bool,
        is_mirrored: bool,
        _is_italic: bool,
        orientation: i32,
        _layer: usize,
        text: &str,
    ) -> Result<()> {
        let mirror = if is_mirrored { "M" } else { "" };
        if self.old_text_size != size_y {
            writeln!(
                self.out,
                "Change size {}",
                een(size_y as f64 * RES * TEXT_STRETCH)
            )?;
        }
        self.old_text_size = size_y;
        writeln!(
            self.out,
            "Text {} {}R{} ({} {});",
            text,
            mirror,
            -orientation,
            een(x as f64 * RES),
            een(self.ey(y as f64))
        )?;
        Ok(())
    }

    fn export_line(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        _layer: usize,
        _arrow: &ArrowParams,
        _dash_style: i32,
        _stroke_width: f64,
    ) -> Result<()> {
        writeln!(
            self.out,
            "Net ({} {}) ({} {});",
            een(x1 * RES),
            een(self.ey(y1)),
            een(x2 * RES),
            een(self.ey(y2))
        )?;
        Ok(())
    }

    fn export_bezier(
        &mut self,
        _points: [(i32, i32); 4],
        _layer: usize,
        _arrow: &ArrowParams,
        _dash_style: i32,
        _stroke_width: f64,
    ) -> Result<()> {
        writeln!(self.out, "# Bezier export not implemented yet")?;
        Ok(())
    }

    fn export_rectangle(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        filled: bool,
        _layer: usize,
        _dash_style: i32,
        _stroke_width: f64,
    ) -> Result<()> {
        writeln!(self.out, "Layer 94;")?;
        let ax = een(x1 as f64 * RES);
        let ay = een(self.ey(y1 as f64));
        let bx = een(x2 as f64 * RES);
        let by = een(self.ey(y2 as f64));
        if filled {
            writeln!(self.out, "Rect ({} {}) ({} {});", ax, ay, bx, by)?;
        } else {
            writeln!(self.out, "Set Wire_Bend 0;")?;
            writeln!(self.out, "Wire ({} {}) ({} {});", ax, ay, bx, by)?;
            writeln!(self.out, "Wire ({} {}) ({} {});", bx, by, ax, ay)?;
            writeln!(self.out, "Set Wire_Bend 2;")?;
        }
        writeln!(self.out, "Layer 91;")?;
        Ok(())
    }

    fn export_oval(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        _filled: bool,
        _layer: usize,
        _dash_style: i32,
        _stroke_width: f64,
    ) -> Result<()> {
        writeln!(self.out, "# Circle export not fully implemented")?;
        write!(
            self.out,
            "Circle ({} {}) ({} {});",
            een(x1 as f64 * RES),
            een(self.ey(y1 as f64)),
            een((x2 - x1) as f64 * RES),
            een((y2 - y1) as f64 * RES)
        )?;
        Ok(())
    }

    fn export_polygon(
        &mut self,
        _vertices: &[Point2<f64>],
        _filled: bool,
        _layer: usize,
        _dash_style: i32,
        _stroke_width: f64,
    ) -> Result<()> {
        writeln!(self.out, "# Polygon export not implemented yet")?;
        Ok(())
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
        // Handled through the polygon fallback, which emits a comment.
        Ok(false)
    }

    fn export_connection(&mut self, x: i32, y: i32, _layer: usize, _size: f64) -> Result<()> {
        self.junction_list.push_str(&format!(
            "Junction ({} {});\n",
            een(x as f64 * RES),
            een(self.ey(y as f64))
        ));
        Ok(())
    }

    fn export_pcb_line(
        &mut self,
        _x1: i32,
        _y1: i32,
        _x2: i32,
        _y2: i32,
        _width: i32,
        _layer: usize,
    ) -> Result<()> {
        writeln!(self.out, "# PCBLine export not implemented yet")?;
        Ok(())
    }

    fn export_pcb_pad(
        &mut self,
        _x: i32,
        _y: i32,
        _style: i32,
        _size_x: i32,
        _size_y: i32,
        _hole_diameter: i32,
        _layer: usize,
        _only_hole: bool,
    ) -> Result<()> {
        writeln!(self.out, "# PCBpad export not implemented yet")?;
        Ok(())
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
        let mirror = if is_mirrored { "M" } else { "" };
        // Component names can not contain spaces in a script.
        let name = texts.name.replace(' ', "_");

        self.macro_list.push_str(&format!(
            "Add {}@{} {} {}R{} ({} {});\n",
            key,
            EAGLE_LIBRARY,
            name,
            mirror,
            -orientation,
            een(x as f64 * RES),
            een(self.ey(y as f64))
        ));
        self.macro_list
            .push_str(&format!("Value {} {};\n", name, texts.value));

        // The macro is never expanded.
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
        // Arrows have no counterpart in the script format.
        Ok((x, y))
    }
}
