//! Portable Document Format output.
//!
//! The graphic operators are accumulated in a buffer while the drawing
//! is exported; the single-page document with its cross reference
//! table is assembled in `export_end`, once the length of the content
//! stream is known.

use std::io::Write;

use nalgebra::Point2;

use crate::error::Result;
use crate::geom::{round_intelligently, ArrowStyle};
use crate::layers::LayerDesc;
use crate::library::MacroDesc;
use crate::primitives::{DASH, DASH_NUMBER};
use crate::types::Color;

use super::{ArrowParams, Exporter, MacroTexts};

/// Logical units per inch of the drawing.
const INTERNAL_RESOLUTION: f64 = 200.0;
/// PDF user space units per inch.
const PDF_RESOLUTION: f64 = 72.0;
/// Extra margin added to the media box, in PDF units.
const PAGE_BORDER: i32 = 5;
/// Segments used to approximate an ellipse.
const ELLIPSE_SEGMENTS: usize = 32;

/// The base-14 fonts available as `/F1` to `/F8`.
const BASE_FONTS: [&str; 8] = [
    "Courier",
    "Courier-Bold",
    "Times-Roman",
    "Times-Bold",
    "Helvetica",
    "Helvetica-Bold",
    "Symbol",
    "Symbol",
];

pub struct PdfExporter<'w, W: Write> {
    out: &'w mut W,
    layers: Vec<LayerDesc>,
    content: String,
    page_width: i32,
    page_height: i32,
    current_color: Option<Color>,
    current_width: f64,
    current_dash: i32,
    dash_phase: f32,
    current_phase: f32,
    dash_patterns: [String; DASH_NUMBER],
}

impl<'w, W: Write> PdfExporter<'w, W> {
    pub fn new(out: &'w mut W) -> Self {
        Self {
            out,
            layers: Vec::new(),
            content: String::new(),
            page_width: 0,
            page_height: 0,
            current_color: None,
            current_width: -1.0,
            current_dash: 0,
            dash_phase: 0.0,
            current_phase: -1.0,
            dash_patterns: Default::default(),
        }
    }

    fn layer_color(&self, layer: usize) -> Color {
        self.layers
            .get(layer)
            .map(|l| l.color)
            .unwrap_or_else(Color::black)
    }

    fn check_color_and_width(&mut self, c: Color, width: f64) {
        if self.current_color != Some(c) {
            let r = round_intelligently(c.r as f64 / 255.0);
            let g = round_intelligently(c.g as f64 / 255.0);
            let b = round_intelligently(c.b as f64 / 255.0);
            self.content.push_str(&format!("  {} {} {} rg\n", r, g, b));
            self.content.push_str(&format!("  {} {} {} RG\n", r, g, b));
            self.current_color = Some(c);
        }
        if (width - self.current_width).abs() > f64::EPSILON {
            self.content
                .push_str(&format!("  {} w\n", round_intelligently(width)));
            self.current_width = width;
        }
    }

    fn register_dash(&mut self, dash_style: i32) {
        if self.current_dash != dash_style
            || (self.current_phase - self.dash_phase).abs() > f32::EPSILON
        {
            self.current_dash = dash_style;
            self.current_phase = self.dash_phase;
            if dash_style == 0 {
                self.content.push_str("[] 0 d\n");
            } else {
                self.content.push_str(&format!(
                    "{} {} d\n",
                    self.dash_patterns[dash_style as usize], self.dash_phase
                ));
            }
        }
    }

    /// Approximate an ellipse inscribed in the given box with curve
    /// segments.
    fn ellipse(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, filled: bool) {
        let cx = (x1 + x2) / 2.0;
        let cy = (y1 + y2) / 2.0;
        let rx = (x2 - x1).abs() / 2.0;
        let ry = (y2 - y1).abs() / 2.0;
        let tt = 1.01;

        self.content.push_str(&format!(
            "  {} {} m\n",
            round_intelligently(cx + rx),
            round_intelligently(cy)
        ));
        for i in 0..ELLIPSE_SEGMENTS {
            let step = 2.0 * std::f64::consts::PI / ELLIPSE_SEGMENTS as f64;
            let mut alpha = step * i as f64 + 2.0 * step / 3.0;
            let xc = cx + tt * rx * alpha.cos();
            let yc = cy + tt * ry * alpha.sin();
            alpha += step / 3.0;
            let xd = cx + rx * alpha.cos();
            let yd = cy + ry * alpha.sin();
            self.content.push_str(&format!(
                "{} {} {} {} y\n",
                round_intelligently(xc),
                round_intelligently(yc),
                round_intelligently(xd),
                round_intelligently(yd)
            ));
        }
        self.content
            .push_str(if filled { "  f\n" } else { "  s\n" });
    }

    fn round_rect(&mut self, x1: f64, y1: f64, w: f64, h: f64, r: f64, filled: bool) {
        self.content.push_str(&format!("{} {} m\n", x1 + r, y1));
        self.content.push_str(&format!("{} {} l\n", x1 + w - r, y1));
        self.content
            .push_str(&format!("{} {} {} {} y\n", x1 + w, y1, x1 + w, y1 + r));
        self.content
            .push_str(&format!("{} {} l\n", x1 + w, y1 + h - r));
        self.content.push_str(&format!(
            "{} {} {} {} y\n",
            x1 + w,
            y1 + h,
            x1 + w - r,
            y1 + h
        ));
        self.content.push_str(&format!("{} {} l\n", x1 + r, y1 + h));
        self.content
            .push_str(&format!("{} {} {} {} y\n", x1, y1 + h, x1, y1 + h - r));
        self.content.push_str(&format!("{} {} l\n", x1, y1 + r));
        self.content
            .push_str(&format!("{} {} {} {} y \n", x1, y1, x1 + r, y1));
        self.content
            .push_str(if filled { "  f\n" } else { "  s\n" });
    }

    /// Pick a `/Fn` resource for the requested font name.
    fn font_resource(font: &str, is_bold: bool) -> &'static str {
        match font {
            "Courier" | "Courier New" => {
                if is_bold {
                    "/F2"
                } else {
                    "/F1"
                }
            }
            "Times" | "Times New Roman" | "Times Roman" => {
                if is_bold {
                    "/F4"
                } else {
                    "/F3"
                }
            }
            "Helvetica" | "Arial" => {
                if is_bold {
                    "/F6"
                } else {
                    "/F5"
                }
            }
            "Symbol" => {
                if is_bold {
                    "/F8"
                } else {
                    "/F7"
                }
            }
            _ => "/F1",
        }
    }
}

fn escape_pdf_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('(', "\\(").replace(')', "\\)")
}

impl<W: Write> Exporter for PdfExporter<'_, W> {
    fn export_start(
        &mut self,
        width: i32,
        height: i32,
        layers: &[LayerDesc],
        _grid_step: i32,
    ) -> Result<()> {
        self.layers = layers.to_vec();
        let res_mult = INTERNAL_RESOLUTION / PDF_RESOLUTION;
        self.page_width = (width as f64 / res_mult + 1.0) as i32 + PAGE_BORDER;
        self.page_height = (height as f64 / res_mult + 1.0) as i32 + PAGE_BORDER;

        // The PDF origin is at the bottom left; flip the vertical axis
        // so that it matches the drawing.
        self.content.push_str(&format!(
            "   1 0 0 1 0 {}  cm\n",
            round_intelligently(height as f64 / res_mult + PAGE_BORDER as f64)
        ));
        self.content.push_str(&format!(
            "  {} 0  0 {} 0 0  cm\n",
            1.0 / res_mult,
            -1.0 / res_mult
        ));
        self.content.push_str("1 J\n");
        Ok(())
    }

    fn export_end(&mut self) -> Result<()> {
        let mut objects: Vec<String> = Vec::new();

        objects.push(format!(
            "1 0 obj\n<<\n  /Creator (fidorust {}, PDF export filter)\n  /Producer (fidorust)\n>>\nendobj\n",
            crate::VERSION
        ));
        objects.push("2 0 obj\n<<\n  /Pages 4 0 R\n  /Type /Catalog\n>>\nendobj\n".to_string());
        let mut fonts = String::new();
        for (i, _) in BASE_FONTS.iter().enumerate() {
            fonts.push_str(&format!("  /F{} {} 0 R\n", i + 1, i + 6));
        }
        objects.push(format!(
            "3 0 obj\n<< \n  /Type /Page\n  /Parent 4 0 R\n  /Resources <<\n  /Font <<\n{}>>\n>>\n  /Contents 5 0 R\n>>\nendobj\n",
            fonts
        ));
        objects.push(format!(
            "4 0 obj\n  <</Kids [3 0 R ]\n    /Count 1\n    /Type /Pages\n    /MediaBox [ 0 0  {} {} ]\n  >> endobj\n",
            self.page_width, self.page_height
        ));
        objects.push(format!(
            "5 0 obj\n  <<\n    /Length {}\n  >>\n  stream\n{}endstream\nendobj\n",
            self.content.len(),
            self.content
        ));
        for (i, base) in BASE_FONTS.iter().enumerate() {
            objects.push(format!(
                "{} 0 obj\n  <<   /Type /Font\n    /Subtype /Type1\n    /BaseFont /{}\n    /Encoding /WinAnsiEncoding\n  >> endobj\n",
                i + 6,
                base
            ));
        }

        let head = "%PDF-1.4\n";
        self.out.write_all(head.as_bytes())?;
        let mut offset = head.len();
        let mut offsets = Vec::with_capacity(objects.len());
        for obj in &objects {
            offsets.push(offset);
            self.out.write_all(obj.as_bytes())?;
            offset += obj.len();
        }

        writeln!(self.out, "xref ")?;
        writeln!(self.out, "0 {}", objects.len() + 1)?;
        writeln!(self.out, "0000000000 65535 f ")?;
        for o in &offsets {
            writeln!(self.out, "{:010} 00000 n ", o)?;
        }
        writeln!(self.out, "trailer")?;
        writeln!(self.out, "<<")?;
        writeln!(self.out, "  /Size {}", objects.len() + 1)?;
        writeln!(self.out, "  /Root 2 0 R")?;
        writeln!(self.out, "  /Info 1 0 R")?;
        writeln!(self.out, ">>")?;
        writeln!(self.out, "startxref")?;
        writeln!(self.out, "{}", offset)?;
        write!(self.out, "%%EOF")?;
        self.out.flush()?;
        Ok(())
    }

    fn set_dash_unit(&mut self, unit: f64) {
        self.dash_patterns[0] = String::new();
        for i in 1..DASH_NUMBER {
            let stretched: Vec<String> = DASH[i]
                .iter()
                .map(|d| (*d as f64 * unit / 2.0).to_string())
                .collect();
            self.dash_patterns[i] = format!("[{}]", stretched.join(" "));
        }
    }

    fn set_dash_phase(&mut self, phase: f32) {
        self.dash_phase = phase;
    }

    fn export_adv_text(
        &mut self,
        x: i32,
        y: i32,
        size_x: i32,
        size_y: i32,
        font: &str,
        is_bold: bool,
        is_mirrored: bool,
        _is_italic: bool,
        orientation: i32,
        layer: usize,
        text: &str,
    ) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        let c = self.layer_color(layer);
        self.check_color_and_width(c, 0.33);

        self.content.push_str("BT\n");
        let ys = (size_x as f64 * 12.0 / 7.0 + 0.5) as i32;
        let resource = Self::font_resource(font, is_bold);
        self.content.push_str(&format!("{} {} Tf\n", resource, ys));
        self.content.push_str("q\n");
        self.content
            .push_str(&format!("  1 0 0 1 {} {} cm\n", x, y));
        if orientation != 0 {
            let alpha = (if is_mirrored { orientation } else { -orientation }) as f64
                / 180.0
                * std::f64::consts::PI;
            self.content.push_str(&format!(
                "  {} {} {} {} 0 0 cm\n",
                round_intelligently(alpha.cos()),
                round_intelligently(alpha.sin()),
                round_intelligently(-alpha.sin()),
                round_intelligently(alpha.cos())
            ));
        }
        if is_mirrored {
            self.content.push_str("  -1 0 0 -1 0 0 cm\n");
        } else {
            self.content.push_str("  1 0 0 -1 0 0 cm\n");
        }
        let ratio = if size_x != 0 && size_y / size_x == 10 / 7 {
            1.0
        } else if size_x != 0 {
            size_y as f64 / size_x as f64 * 22.0 / 40.0
        } else {
            1.0
        };
        self.content.push_str(&format!(
            "  1 0 0 {} 0 {} cm\n",
            round_intelligently(ratio),
            round_intelligently(-(ys as f64) * ratio * 0.8)
        ));
        self.content
            .push_str(&format!("  ({}) Tj\n", escape_pdf_string(text)));
        self.content.push_str("Q\nET\n");
        Ok(())
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
        stroke_width: f64,
    ) -> Result<()> {
        let c = self.layer_color(layer);
        self.check_color_and_width(c, stroke_width);
        self.register_dash(dash_style);

        let mut xstart = x1;
        let mut ystart = y1;
        let mut xend = x2;
        let mut yend = y2;

        if arrow.start {
            let (bx, by) = self.export_arrow(
                x1,
                y1,
                x2,
                y2,
                arrow.length as f64,
                arrow.half_width as f64,
                arrow.style,
            )?;
            // A negative length extends the head outside the line, so
            // the segment must not be shortened.
            if arrow.length > 0 {
                xstart = bx;
                ystart = by;
            }
        }
        if arrow.end {
            let (bx, by) = self.export_arrow(
                x2,
                y2,
                x1,
                y1,
                arrow.length as f64,
                arrow.half_width as f64,
                arrow.style,
            )?;
            if arrow.length > 0 {
                xend = bx;
                yend = by;
            }
        }
        self.content.push_str(&format!(
            "  {} {} m {} {} l S\n",
            round_intelligently(xstart),
            round_intelligently(ystart),
            round_intelligently(xend),
            round_intelligently(yend)
        ));
        Ok(())
    }

    fn export_bezier(
        &mut self,
        points: [(i32, i32); 4],
        layer: usize,
        arrow: &ArrowParams,
        dash_style: i32,
        stroke_width: f64,
    ) -> Result<()> {
        let c = self.layer_color(layer);
        self.check_color_and_width(c, stroke_width);
        self.register_dash(dash_style);

        let [(mut x1, mut y1), (x2, y2), (x3, y3), (mut x4, mut y4)] = points;
        if arrow.start {
            let (bx, by) = self.export_arrow(
                x1 as f64,
                y1 as f64,
                x2 as f64,
                y2 as f64,
                arrow.length as f64,
                arrow.half_width as f64,
                arrow.style,
            )?;
            if arrow.length > 0 {
                x1 = bx.round() as i32;
                y1 = by.round() as i32;
            }
        }
        if arrow.end {
            let (bx, by) = self.export_arrow(
                x4 as f64,
                y4 as f64,
                x3 as f64,
                y3 as f64,
                arrow.length as f64,
                arrow.half_width as f64,
                arrow.style,
            )?;
            if arrow.length > 0 {
                x4 = bx.round() as i32;
                y4 = by.round() as i32;
            }
        }
        self.content.push_str(&format!("{} {} m \n", x1, y1));
        self.content.push_str(&format!(
            "{} {} {} {} {} {} c S\n",
            x2, y2, x3, y3, x4, y4
        ));
        Ok(())
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
        stroke_width: f64,
    ) -> Result<()> {
        let c = self.layer_color(layer);
        self.check_color_and_width(c, stroke_width);
        self.register_dash(dash_style);
        self.content.push_str(&format!("  {} {} m\n", x1, y1));
        self.content.push_str(&format!("  {} {} l\n", x2, y1));
        self.content.push_str(&format!("  {} {} l\n", x2, y2));
        self.content.push_str(&format!("  {} {} l\n", x1, y2));
        self.content.push_str(if filled { "f\n" } else { "s\n" });
        Ok(())
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
        stroke_width: f64,
    ) -> Result<()> {
        let c = self.layer_color(layer);
        self.check_color_and_width(c, stroke_width);
        self.register_dash(dash_style);
        self.ellipse(x1 as f64, y1 as f64, x2 as f64, y2 as f64, filled);
        Ok(())
    }

    fn export_polygon(
        &mut self,
        vertices: &[Point2<f64>],
        filled: bool,
        layer: usize,
        dash_style: i32,
        stroke_width: f64,
    ) -> Result<()> {
        if vertices.is_empty() {
            return Ok(());
        }
        let c = self.layer_color(layer);
        self.check_color_and_width(c, stroke_width);
        self.register_dash(dash_style);
        self.content.push_str(&format!(
            "  {} {} m\n",
            round_intelligently(vertices[0].x),
            round_intelligently(vertices[0].y)
        ));
        for v in &vertices[1..] {
            self.content.push_str(&format!(
                "  {} {} l\n",
                round_intelligently(v.x),
                round_intelligently(v.y)
            ));
        }
        self.content
            .push_str(if filled { "  f*\n" } else { "  s\n" });
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
        Ok(false)
    }

    fn export_connection(&mut self, x: i32, y: i32, layer: usize, size: f64) -> Result<()> {
        let c = self.layer_color(layer);
        self.check_color_and_width(c, 0.33);
        self.ellipse(
            x as f64 - size / 2.0,
            y as f64 - size / 2.0,
            x as f64 + size / 2.0,
            y as f64 + size / 2.0,
            true,
        );
        Ok(())
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
        let c = self.layer_color(layer);
        self.check_color_and_width(c, width as f64);
        self.register_dash(0);
        self.content
            .push_str(&format!("  {} {} m {} {} l S\n", x1, y1, x2, y2));
        Ok(())
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
        let c = self.layer_color(layer);
        self.check_color_and_width(c, 0.33);
        if !only_hole {
            match style {
                crate::primitives::PAD_STYLE_ROUNDED => {
                    self.round_rect(
                        x as f64 - size_x as f64 / 2.0,
                        y as f64 - size_y as f64 / 2.0,
                        size_x as f64,
                        size_y as f64,
                        4.0,
                        true,
                    );
                }
                crate::primitives::PAD_STYLE_SQUARE => {
                    let xd = x as f64 - size_x as f64 / 2.0;
                    let yd = y as f64 - size_y as f64 / 2.0;
                    self.content.push_str(&format!("{} {} m\n", xd, yd));
                    self.content
                        .push_str(&format!("{} {} l\n", xd + size_x as f64, yd));
                    self.content.push_str(&format!(
                        "{} {} l\n",
                        xd + size_x as f64,
                        yd + size_y as f64
                    ));
                    self.content
                        .push_str(&format!("{} {} l\n", xd, yd + size_y as f64));
                    self.content.push_str("B\n");
                }
                _ => {
                    self.ellipse(
                        x as f64 - size_x as f64 / 2.0,
                        y as f64 - size_y as f64 / 2.0,
                        x as f64 + size_x as f64 / 2.0,
                        y as f64 + size_y as f64 / 2.0,
                        true,
                    );
                }
            }
        }
        // Drill the hole.
        self.check_color_and_width(Color::white(), 0.33);
        self.ellipse(
            x as f64 - hole_diameter as f64 / 2.0,
            y as f64 - hole_diameter as f64 / 2.0,
            x as f64 + hole_diameter as f64 / 2.0,
            y as f64 + hole_diameter as f64 / 2.0,
            true,
        );
        Ok(())
    }

    fn export_macro(
        &mut self,
        _x: i32,
        _y: i32,
        _is_mirrored: bool,
        _orientation: i32,
        _key: &str,
        _desc: &MacroDesc,
        _texts: &MacroTexts,
    ) -> Result<bool> {
        // Macros are expanded into primitives.
        Ok(false)
    }

    fn export_arrow(
        &mut self,
        x: f64,
        y: f64,
        xc: f64,
        yc: f64,
        length: f64,
        half_width: f64,
        style: ArrowStyle,
    ) -> Result<(f64, f64)> {
        let head = crate::geom::head_geometry(x, y, xc, yc, length, half_width, style);
        self.content.push_str(&format!(
            "  {} {} m\n",
            round_intelligently(head.tip.0),
            round_intelligently(head.tip.1)
        ));
        self.content.push_str(&format!(
            "  {} {} l\n",
            round_intelligently(head.p1.0),
            round_intelligently(head.p1.1)
        ));
        self.content.push_str(&format!(
            "  {} {} l\n",
            round_intelligently(head.p2.0),
            round_intelligently(head.p2.1)
        ));
        self.content
            .push_str(if head.filled { "  f\n" } else { "  s\n" });
        if let Some((l1, l2)) = head.limiter {
            self.content.push_str(&format!(
                "  {} {} m {} {} l S\n",
                round_intelligently(l1.0),
                round_intelligently(l1.1),
                round_intelligently(l2.0),
                round_intelligently(l2.1)
            ));
        }
        Ok(head.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DrawingModel;
    use crate::export::{run_export, ExportOptions};

    fn export_text(model: &DrawingModel) -> String {
        let mut buf = Vec::new();
        let opts = ExportOptions::default();
        {
            let mut exp = PdfExporter::new(&mut buf);
            run_export(model, &opts, &mut exp).ok().unwrap();
        }
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_document_structure() {
        let m = DrawingModel::from_text("[FIDOCAD]\nLI 0 0 100 0 0\n");
        let s = export_text(&m);
        assert!(s.starts_with("%PDF-1.4\n"));
        assert!(s.contains("/Type /Catalog"));
        assert!(s.contains("/MediaBox [ 0 0  "));
        assert!(s.contains("/BaseFont /Courier"));
        assert!(s.ends_with("%%EOF"));
    }

    #[test]
    fn test_xref_offsets_are_correct() {
        let m = DrawingModel::from_text("[FIDOCAD]\nLI 0 0 100 0 0\nRV 0 10 40 40 1\n");
        let s = export_text(&m);
        let xref = s.find("xref ").unwrap();
        for line in s[xref..].lines().skip(2) {
            let Some(off) = line.strip_suffix(" 00000 n ") else {
                break;
            };
            let off: usize = off.parse().unwrap();
            // Each offset must land at the start of the numbered object.
            assert!(s[off..].starts_with(char::is_numeric));
            assert!(s[off..off + 12].contains(" 0 obj"));
        }
    }

    #[test]
    fn test_stream_length_matches() {
        let m = DrawingModel::from_text("[FIDOCAD]\nLI 0 0 100 0 0\n");
        let s = export_text(&m);
        let start = s.find("/Length ").unwrap() + "/Length ".len();
        let end = s[start..].find('\n').unwrap() + start;
        let declared: usize = s[start..end].trim().parse().unwrap();
        let stream_start = s.find("  stream\n").unwrap() + "  stream\n".len();
        let stream_end = s.find("endstream").unwrap();
        assert_eq!(declared, stream_end - stream_start);
    }

    #[test]
    fn test_text_operators() {
        let m = DrawingModel::from_text("[FIDOCAD]\nTY 0 0 4 3 0 0 0 * (hi)\n");
        let s = export_text(&m);
        assert!(s.contains("BT\n"));
        assert!(s.contains("/F1 "));
        assert!(s.contains("(\\(hi\\)) Tj"));
        assert!(s.contains("ET\n"));
    }

    #[test]
    fn test_font_resources() {
        assert_eq!(PdfExporter::<Vec<u8>>::font_resource("Courier New", false), "/F1");
        assert_eq!(PdfExporter::<Vec<u8>>::font_resource("Arial", true), "/F6");
        assert_eq!(PdfExporter::<Vec<u8>>::font_resource("Symbol", false), "/F7");
        assert_eq!(PdfExporter::<Vec<u8>>::font_resource("Comic Sans", false), "/F1");
    }
}
