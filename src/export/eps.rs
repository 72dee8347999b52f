//! Encapsulated Postscript output.

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
/// Postscript points per inch.
const POSTSCRIPT_RESOLUTION: f64 = 72.0;

pub struct EpsExporter<'w, W: Write> {
    out: &'w mut W,
    layers: Vec<LayerDesc>,
    current_color: Option<Color>,
    current_width: f64,
    current_dash: i32,
    dash_phase: f32,
    current_phase: f32,
    dash_patterns: [String; DASH_NUMBER],
}

impl<'w, W: Write> EpsExporter<'w, W> {
    pub fn new(out: &'w mut W) -> Self {
        Self {
            out,
            layers: Vec::new(),
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

    /// Emit `setrgbcolor` and `setlinewidth` only when they change.
    fn check_color_and_width(&mut self, c: Color, width: f64) -> Result<()> {
        if self.current_color != Some(c) {
            writeln!(
                self.out,
                "  {} {} {} setrgbcolor",
                round_intelligently(c.r as f64 / 255.0),
                round_intelligently(c.g as f64 / 255.0),
                round_intelligently(c.b as f64 / 255.0)
            )?;
            self.current_color = Some(c);
        }
        if width > 0.0 && (width - self.current_width).abs() > f64::EPSILON {
            writeln!(self.out, "  {} setlinewidth", round_intelligently(width))?;
            self.current_width = width;
        }
        Ok(())
    }

    fn register_dash(&mut self, dash_style: i32) -> Result<()> {
        if self.current_dash != dash_style
            || (self.current_phase - self.dash_phase).abs() > f32::EPSILON
        {
            self.current_dash = dash_style;
            self.current_phase = self.dash_phase;
            if dash_style == 0 {
                writeln!(self.out, "[] 0 setdash")?;
            } else {
                writeln!(
                    self.out,
                    "{} {} setdash",
                    self.dash_patterns[dash_style as usize], self.dash_phase
                )?;
            }
        }
        Ok(())
    }
}

impl<W: Write> Exporter for EpsExporter<'_, W> {
    fn export_start(
        &mut self,
        width: i32,
        height: i32,
        layers: &[LayerDesc],
        _grid_step: i32,
    ) -> Result<()> {
        self.layers = layers.to_vec();
        let res_mult = INTERNAL_RESOLUTION / POSTSCRIPT_RESOLUTION;

        writeln!(self.out, "%!PS-Adobe-3.0 EPSF-3.0")?;
        writeln!(self.out, "%%Pages: 0")?;
        writeln!(
            self.out,
            "%%BoundingBox: -1 -1 {} {}",
            (width as f64 / res_mult + 1.0) as i32,
            (height as f64 / res_mult + 1.0) as i32
        )?;
        writeln!(
            self.out,
            "%%Creator: fidorust {}, EPS export filter",
            crate::VERSION
        )?;
        writeln!(self.out, "%%EndComments")?;

        // An ellipse operator, based on the classic Blue Book example.
        writeln!(
            self.out,
            "/ellipsedict 8 dict def\n\
             ellipsedict /mtrx matrix put\n\
             /ellipse\n\
             \x20  {{ ellipsedict begin\n\
             \x20    /endangle exch def\n\
             \x20    /startangle exch def\n\
             \x20    /yrad exch def\n\
             \x20    /xrad exch def\n\
             \x20    /y exch def\n\
             \x20    /x exch def\n\
             \x20    /savematrix mtrx currentmatrix def\n\
             \x20    x y translate\n\
             \x20    xrad yrad scale\n\
             \x20    0 0 1 startangle endangle arc\n\
             \x20    savematrix setmatrix\n\
             \x20    end\n\
             \x20  }} def"
        )?;

        // Postscript has the origin at the bottom left. Flip the
        // vertical axis so that it matches the drawing.
        writeln!(self.out, "0 {} translate", height as f64 / res_mult)?;
        writeln!(self.out, "{} {} scale", 1.0 / res_mult, -1.0 / res_mult)?;
        Ok(())
    }

    fn export_end(&mut self) -> Result<()> {
        writeln!(self.out, "%%EOF")?;
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
        is_italic: bool,
        orientation: i32,
        layer: usize,
        text: &str,
    ) -> Result<()> {
        let c = self.layer_color(layer);
        self.check_color_and_width(c, -1.0)?;
        let font_size = (size_x as f64 * 12.0 / 7.0 + 0.5) as i32;

        let mut suffix = String::new();
        if is_bold {
            suffix.push_str("-Bold");
        }
        if is_italic {
            suffix.push_str("-Italic");
        }
        // Postscript font names can not contain spaces.
        let ps_font = font.replace(' ', "-");

        writeln!(
            self.out,
            "/{}{} findfont\n{} scalefont\nsetfont",
            ps_font, suffix, font_size
        )?;
        writeln!(self.out, "newpath")?;
        writeln!(self.out, "{} {} moveto", x, y)?;
        writeln!(self.out, "gsave")?;
        if orientation != 0 {
            let angle = if is_mirrored { orientation } else { -orientation };
            writeln!(self.out, "  {} rotate", angle)?;
        }
        if is_mirrored {
            writeln!(self.out, "  -1 -1 scale")?;
        } else {
            writeln!(self.out, "  1 -1 scale")?;
        }
        // sizex/sizey of 7/12 is the normal aspect ratio.
        let ratio = if size_x != 0 && size_y / size_x == 10 / 7 {
            1.0
        } else if size_x != 0 {
            size_y as f64 / size_x as f64 * 22.0 / 40.0
        } else {
            1.0
        };
        writeln!(self.out, "  1 {} scale", round_intelligently(ratio))?;
        writeln!(
            self.out,
            "  0 {} rmoveto",
            round_intelligently(-(font_size as f64) * 0.8)
        )?;
        self.check_color_and_width(c, 0.33)?;
        let escaped = text.replace('\\', "\\\\").replace('(', "\\050").replace(')', "\\051");
        writeln!(self.out, "  ({}) show", escaped)?;
        writeln!(self.out, "grestore")?;
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
        self.check_color_and_width(c, stroke_width)?;
        self.register_dash(dash_style)?;

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
        writeln!(
            self.out,
            "{} {} moveto {} {} lineto stroke",
            round_intelligently(xstart),
            round_intelligently(ystart),
            round_intelligently(xend),
            round_intelligently(yend)
        )?;
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
        self.check_color_and_width(c, stroke_width)?;
        self.register_dash(dash_style)?;

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
        writeln!(self.out, "{} {} moveto ", x1, y1)?;
        writeln!(
            self.out,
            "{} {} {} {} {} {} curveto stroke",
            x2, y2, x3, y3, x4, y4
        )?;
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
        self.check_color_and_width(c, stroke_width)?;
        self.register_dash(dash_style)?;
        writeln!(self.out, "newpath")?;
        writeln!(self.out, "{} {} moveto", x1, y1)?;
        writeln!(self.out, "{} {} lineto", x2, y1)?;
        writeln!(self.out, "{} {} lineto", x2, y2)?;
        writeln!(self.out, "{} {} lineto", x1, y2)?;
        writeln!(self.out, "closepath")?;
        writeln!(self.out, "{}", if filled { "fill" } else { "stroke" })?;
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
        self.check_color_and_width(c, stroke_width)?;
        self.register_dash(dash_style)?;
        writeln!(self.out, "newpath")?;
        writeln!(
            self.out,
            "{} {} {} {} 0 360 ellipse",
            round_intelligently((x1 + x2) as f64 / 2.0),
            round_intelligently((y1 + y2) as f64 / 2.0),
            round_intelligently((x2 - x1).abs() as f64 / 2.0),
            round_intelligently((y2 - y1).abs() as f64 / 2.0)
        )?;
        writeln!(self.out, "{}", if filled { "fill" } else { "stroke" })?;
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
        self.check_color_and_width(c, stroke_width)?;
        self.register_dash(dash_style)?;
        writeln!(self.out, "newpath")?;
        writeln!(
            self.out,
            "{} {} moveto",
            round_intelligently(vertices[0].x),
            round_intelligently(vertices[0].y)
        )?;
        for v in &vertices[1..] {
            writeln!(
                self.out,
                "{} {} lineto",
                round_intelligently(v.x),
                round_intelligently(v.y)
            )?;
        }
        writeln!(self.out, "closepath")?;
        writeln!(self.out, "{}", if filled { "fill" } else { "stroke" })?;
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
        // Rendered through the flattened polygon fallback.
        Ok(false)
    }

    fn export_connection(&mut self, x: i32, y: i32, layer: usize, size: f64) -> Result<()> {
        let c = self.layer_color(layer);
        self.check_color_and_width(c, 0.33)?;
        writeln!(self.out, "newpath")?;
        writeln!(
            self.out,
            "{} {} {} {} 0 360 ellipse",
            x,
            y,
            round_intelligently(size / 2.0),
            round_intelligently(size / 2.0)
        )?;
        writeln!(self.out, "fill")?;
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
        self.check_color_and_width(c, width as f64)?;
        self.register_dash(0)?;
        writeln!(self.out, "1 setlinecap")?;
        writeln!(self.out, "{} {} moveto {} {} lineto stroke", x1, y1, x2, y2)?;
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
        self.check_color_and_width(c, 0.33)?;
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
                    )?;
                }
                crate::primitives::PAD_STYLE_SQUARE => {
                    let xd = x as f64 - size_x as f64 / 2.0;
                    let yd = y as f64 - size_y as f64 / 2.0;
                    writeln!(self.out, "newpath")?;
                    writeln!(self.out, "{} {} moveto", xd, yd)?;
                    writeln!(self.out, "{} {} lineto", xd + size_x as f64, yd)?;
                    writeln!(
                        self.out,
                        "{} {} lineto",
                        xd + size_x as f64,
                        yd + size_y as f64
                    )?;
                    writeln!(self.out, "{} {} lineto", xd, yd + size_y as f64)?;
                    writeln!(self.out, "closepath")?;
                    writeln!(self.out, "fill")?;
                }
                _ => {
                    writeln!(self.out, "newpath")?;
                    writeln!(
                        self.out,
                        "{} {} {} {} 0 360 ellipse",
                        x,
                        y,
                        size_x as f64 / 2.0,
                        size_y as f64 / 2.0
                    )?;
                    writeln!(self.out, "fill")?;
                }
            }
        }
        // Drill the hole.
        self.check_color_and_width(Color::white(), 0.33)?;
        writeln!(self.out, "newpath")?;
        writeln!(
            self.out,
            "{} {} {} {} 0 360 ellipse",
            x,
            y,
            hole_diameter as f64 / 2.0,
            hole_diameter as f64 / 2.0
        )?;
        writeln!(self.out, "fill")?;
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
        writeln!(self.out, "newpath")?;
        writeln!(
            self.out,
            "{} {} moveto",
            round_intelligently(head.tip.0),
            round_intelligently(head.tip.1)
        )?;
        writeln!(
            self.out,
            "{} {} lineto",
            round_intelligently(head.p1.0),
            round_intelligently(head.p1.1)
        )?;
        writeln!(
            self.out,
            "{} {} lineto",
            round_intelligently(head.p2.0),
            round_intelligently(head.p2.1)
        )?;
        writeln!(self.out, "closepath")?;
        if head.filled {
            writeln!(self.out, "fill ")?;
        } else {
            writeln!(self.out, "stroke ")?;
        }
        if let Some((l1, l2)) = head.limiter {
            writeln!(
                self.out,
                "{} {} moveto\n{} {} lineto\nstroke",
                round_intelligently(l1.0),
                round_intelligently(l1.1),
                round_intelligently(l2.0),
                round_intelligently(l2.1)
            )?;
        }
        Ok(head.base)
    }
}

impl<W: Write> EpsExporter<'_, W> {
    fn round_rect(
        &mut self,
        x1: f64,
        y1: f64,
        w: f64,
        h: f64,
        r: f64,
        filled: bool,
    ) -> Result<()> {
        writeln!(self.out, "{} {} moveto", x1 + r, y1)?;
        writeln!(self.out, "{} {} lineto", x1 + w - r, y1)?;
        writeln!(
            self.out,
            "{} {} {} {} {} {} curveto",
            x1 + w,
            y1,
            x1 + w,
            y1,
            x1 + w,
            y1 + r
        )?;
        writeln!(self.out, "{} {} lineto", x1 + w, y1 + h - r)?;
        writeln!(
            self.out,
            "{} {} {} {} {} {} curveto",
            x1 + w,
            y1 + h,
            x1 + w,
            y1 + h,
            x1 + w - r,
            y1 + h
        )?;
        writeln!(self.out, "{} {} lineto", x1 + r, y1 + h)?;
        writeln!(
            self.out,
            "{} {} {} {} {} {} curveto",
            x1,
            y1 + h,
            x1,
            y1 + h,
            x1,
            y1 + h - r
        )?;
        writeln!(self.out, "{} {} lineto", x1, y1 + r)?;
        writeln!(
            self.out,
            "{} {} {} {} {} {} curveto",
            x1,
            y1,
            x1,
            y1,
            x1 + r,
            y1
        )?;
        writeln!(self.out, "  {}", if filled { "fill" } else { "stroke" })?;
        Ok(())
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
            let mut exp = EpsExporter::new(&mut buf);
            run_export(model, &opts, &mut exp).ok().unwrap();
        }
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_header_and_footer() {
        let m = DrawingModel::from_text("[FIDOCAD]\nLI 0 0 100 0 0\n");
        let s = export_text(&m);
        assert!(s.starts_with("%!PS-Adobe-3.0 EPSF-3.0\n"));
        assert!(s.contains("%%BoundingBox: -1 -1 "));
        assert!(s.ends_with("%%EOF\n"));
    }

    #[test]
    fn test_line_strokes() {
        let m = DrawingModel::from_text("[FIDOCAD]\nLI 0 0 100 0 0\n");
        let s = export_text(&m);
        assert!(s.contains("moveto"));
        assert!(s.contains("lineto stroke"));
        assert!(s.contains("setrgbcolor"));
    }

    #[test]
    fn test_color_emitted_once_per_change() {
        let m = DrawingModel::from_text("[FIDOCAD]\nLI 0 0 100 0 0\nLI 0 10 100 10 0\n");
        let s = export_text(&m);
        assert_eq!(s.matches("setrgbcolor").count(), 1);
    }

    #[test]
    fn test_dash_pattern_registered() {
        let m = DrawingModel::from_text("[FIDOCAD]\nLI 0 0 100 0 0\nFCJ 0 0 3 1 2 0\n");
        let s = export_text(&m);
        assert!(s.contains("setdash"));
    }

    #[test]
    fn test_text_parentheses_escaped() {
        let m = DrawingModel::from_text("[FIDOCAD]\nTY 0 0 4 3 0 0 0 * a(b)\n");
        let s = export_text(&m);
        assert!(s.contains("(a\\050b\\051) show"));
    }
}
