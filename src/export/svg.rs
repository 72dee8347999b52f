//! Scalable Vector Graphics output.

use std::io::Write;

use nalgebra::Point2;

use crate::error::Result;
use crate::geom::{round_intelligently, ArrowStyle};
use crate::layers::LayerDesc;
use crate::library::MacroDesc;
use crate::primitives::{DASH, DASH_NUMBER};
use crate::types::Color;

use super::{ArrowParams, Exporter, MacroTexts};

pub struct SvgExporter<'w, W: Write> {
    out: &'w mut W,
    layers: Vec<LayerDesc>,
    current_color: Color,
    stroke_width: f64,
    dash_phase: f32,
    current_phase: f32,
    dash_patterns: [String; DASH_NUMBER],
}

/// Coordinates are kept to two decimals.
fn cle(v: f64) -> String {
    round_intelligently((v * 100.0).round() / 100.0)
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

impl<'w, W: Write> SvgExporter<'w, W> {
    pub fn new(out: &'w mut W) -> Self {
        Self {
            out,
            layers: Vec::new(),
            current_color: Color::black(),
            stroke_width: 0.33,
            dash_phase: 0.0,
            current_phase: -1.0,
            dash_patterns: Default::default(),
        }
    }

    fn set_layer_color(&mut self, layer: usize) {
        self.current_color = self
            .layers
            .get(layer)
            .map(|l| l.color)
            .unwrap_or_else(Color::black);
    }

    fn fill_pattern(&self, filled: bool) -> String {
        if filled {
            format!("fill=\"#{}\"", self.current_color.to_hex())
        } else {
            "fill=\"none\"".to_string()
        }
    }

    /// Close an element started elsewhere with the stroke style, the
    /// dashing and the fill attribute.
    fn write_style(&mut self, fill_pattern: &str, dash_style: i32) -> Result<()> {
        write!(self.out, "style=\"stroke:#{}", self.current_color.to_hex())?;
        if dash_style > 0 {
            write!(
                self.out,
                ";stroke-dasharray: {}",
                self.dash_patterns[dash_style as usize]
            )?;
        }
        if (self.current_phase - self.dash_phase).abs() > f32::EPSILON {
            self.current_phase = self.dash_phase;
            write!(self.out, ";stroke-dashoffset: {}", self.dash_phase)?;
        }
        writeln!(
            self.out,
            ";stroke-width:{};fill-rule: evenodd;\" {}/>",
            round_intelligently(self.stroke_width),
            fill_pattern
        )?;
        Ok(())
    }
}

impl<W: Write> Exporter for SvgExporter<'_, W> {
    fn export_start(
        &mut self,
        width: i32,
        height: i32,
        layers: &[LayerDesc],
        _grid_step: i32,
    ) -> Result<()> {
        self.layers = layers.to_vec();
        writeln!(
            self.out,
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?> "
        )?;
        writeln!(
            self.out,
            "<!DOCTYPE svg PUBLIC \"-//W3C//Dtd SVG 1.1//EN\" \
             \"http://www.w3.org/Graphics/SVG/1.1/Dtd/svg11.dtd\">"
        )?;
        writeln!(
            self.out,
            "<svg width=\"{}\" height=\"{}\" version=\"1.1\" \
             xmlns=\"http://www.w3.org/2000/svg\" \
             xmlns:xlink=\"http://www.w3.org/1999/xlink\">",
            width, height
        )?;
        writeln!(
            self.out,
            "<!-- Created by fidorust ver. {}, export filter -->",
            crate::VERSION
        )?;
        Ok(())
    }

    fn export_end(&mut self) -> Result<()> {
        write!(self.out, "</svg>")?;
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
            self.dash_patterns[i] = stretched.join(",");
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
        self.set_layer_color(layer);
        write!(self.out, "<g transform=\"translate({},{})", x, y)?;
        let mut xscale = if size_y != 0 {
            size_x as f64 / 22.0 / size_y as f64 * 38.0
        } else {
            1.0
        };
        if orientation != 0 {
            let alpha = if is_mirrored { orientation } else { -orientation };
            write!(self.out, " rotate({}) ", alpha)?;
        }
        if is_mirrored {
            xscale = -xscale;
        }
        write!(self.out, " scale({},1) ", round_intelligently(xscale))?;
        write!(self.out, "\">")?;
        write!(
            self.out,
            "<text x=\"0\" y=\"{}\" font-family=\"{}\" font-size=\"{}\" \
             font-style=\"{}\" font-weight=\"{}\" fill=\"#{}\">",
            size_y,
            escape_xml(font),
            size_y,
            if is_italic { "italic" } else { "" },
            if is_bold { "bold" } else { "" },
            self.current_color.to_hex()
        )?;
        write!(self.out, "{}", escape_xml(text))?;
        writeln!(self.out, "</text>")?;
        writeln!(self.out, "</g>")?;
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
        self.set_layer_color(layer);
        self.stroke_width = stroke_width;

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
        write!(
            self.out,
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" ",
            cle(xstart),
            cle(ystart),
            cle(xend),
            cle(yend)
        )?;
        self.write_style("fill=\"none\"", dash_style)
    }

    fn export_bezier(
        &mut self,
        points: [(i32, i32); 4],
        layer: usize,
        arrow: &ArrowParams,
        dash_style: i32,
        stroke_width: f64,
    ) -> Result<()> {
        self.set_layer_color(layer);
        self.stroke_width = stroke_width;

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
        write!(
            self.out,
            "<path d=\"M {},{} C {},{} {},{} {},{}\" ",
            x1, y1, x2, y2, x3, y3, x4, y4
        )?;
        self.write_style("fill=\"none\"", dash_style)
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
        self.set_layer_color(layer);
        self.stroke_width = stroke_width;
        let fill = self.fill_pattern(filled);
        write!(
            self.out,
            "<rect x=\"{}\" y=\"{}\" rx=\"0\" ry=\"0\" width=\"{}\" height=\"{}\" ",
            x1.min(x2),
            y1.min(y2),
            (x2 - x1).abs(),
            (y2 - y1).abs()
        )?;
        self.write_style(&fill, dash_style)
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
        self.set_layer_color(layer);
        self.stroke_width = stroke_width;
        let fill = self.fill_pattern(filled);
        write!(
            self.out,
            "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\" ",
            cle((x1 + x2) as f64 / 2.0),
            cle((y1 + y2) as f64 / 2.0),
            cle((x2 - x1).abs() as f64 / 2.0),
            cle((y2 - y1).abs() as f64 / 2.0)
        )?;
        self.write_style(&fill, dash_style)
    }

    fn export_polygon(
        &mut self,
        vertices: &[Point2<f64>],
        filled: bool,
        layer: usize,
        dash_style: i32,
        stroke_width: f64,
    ) -> Result<()> {
        self.set_layer_color(layer);
        self.stroke_width = stroke_width;
        let fill = self.fill_pattern(filled);
        write!(self.out, "<polygon points=\"")?;
        for v in vertices {
            write!(self.out, "{},{} ", cle(v.x), cle(v.y))?;
        }
        write!(self.out, "\" ")?;
        self.write_style(&fill, dash_style)
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
        self.set_layer_color(layer);
        self.stroke_width = 0.33;
        writeln!(
            self.out,
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" style=\"stroke:#{};stroke-width:{}\" fill=\"#{}\"/>",
            x,
            y,
            cle(size / 2.0),
            self.current_color.to_hex(),
            round_intelligently(self.stroke_width),
            self.current_color.to_hex()
        )?;
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
        self.set_layer_color(layer);
        writeln!(
            self.out,
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" style=\"stroke:#{};\
             stroke-linejoin:round;stroke-linecap:round;stroke-width:{}\"/>",
            x1,
            y1,
            x2,
            y2,
            self.current_color.to_hex(),
            width
        )?;
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
        self.set_layer_color(layer);
        self.stroke_width = 0.33;
        let hex = self.current_color.to_hex();

        if only_hole {
            writeln!(
                self.out,
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" \
                 style=\"stroke:white;stroke-width:{}\" fill=\"white\"/>",
                x,
                y,
                cle(hole_diameter as f64 / 2.0),
                round_intelligently(self.stroke_width)
            )?;
            return Ok(());
        }
        match style {
            crate::primitives::PAD_STYLE_SQUARE | crate::primitives::PAD_STYLE_ROUNDED => {
                let corner = if style == crate::primitives::PAD_STYLE_ROUNDED {
                    "2.5"
                } else {
                    "0"
                };
                writeln!(
                    self.out,
                    "<rect x=\"{}\" y=\"{}\" rx=\"{}\" ry=\"{}\" width=\"{}\" height=\"{}\" \
                     style=\"stroke:#{};stroke-width:{}\" fill=\"#{}\"/>",
                    cle(x as f64 - size_x as f64 / 2.0),
                    cle(y as f64 - size_y as f64 / 2.0),
                    corner,
                    corner,
                    size_x,
                    size_y,
                    hex,
                    round_intelligently(self.stroke_width),
                    hex
                )?;
            }
            _ => {
                writeln!(
                    self.out,
                    "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\" \
                     style=\"stroke:#{};stroke-width:{}\" fill=\"#{}\"/>",
                    x,
                    y,
                    cle(size_x as f64 / 2.0),
                    cle(size_y as f64 / 2.0),
                    hex,
                    round_intelligently(self.stroke_width),
                    hex
                )?;
            }
        }
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
        write!(
            self.out,
            "<polygon points=\"{},{} {},{} {},{}\" ",
            round_intelligently(head.tip.0),
            round_intelligently(head.tip.1),
            round_intelligently(head.p1.0),
            round_intelligently(head.p1.1),
            round_intelligently(head.p2.0),
            round_intelligently(head.p2.1)
        )?;
        let fill = self.fill_pattern(head.filled);
        self.write_style(&fill, 0)?;
        if let Some((l1, l2)) = head.limiter {
            write!(
                self.out,
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" ",
                cle(l1.0),
                cle(l1.1),
                cle(l2.0),
                cle(l2.1)
            )?;
            self.write_style("fill=\"none\"", 0)?;
        }
        Ok(head.base)
    }
}
