//! Export of a drawing towards graphic and CAD formats.
//!
//! Every output format implements the [`Exporter`] trait; the driver
//! walks the drawing layer by layer and hands each primitive to the
//! exporter in output coordinates. A final pass re-exports the holes of
//! PCB pads so that they stay visible above the copper.

pub mod eagle;
pub mod eps;
pub mod fcd;
pub mod pdf;
pub mod svg;

use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::path::{Path, PathBuf};

use nalgebra::Point2;

use crate::document::{DrawingConfig, DrawingModel};
use crate::error::{FidoError, Result};
use crate::geom::{Arrow, ArrowStyle, MapCoordinates};
use crate::layers::{monochrome_layers, LayerDesc, MAX_LAYERS};
use crate::library::{MacroDesc, MacroLibrary};
use crate::notification::NotificationCollection;
use crate::primitives::PrimitiveType;

/// White border left around the drawing, in logical units.
pub const EXPORT_BORDER: i32 = 6;

/// Arrow description in output units, ready for an exporter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrowParams {
    pub start: bool,
    pub end: bool,
    pub style: ArrowStyle,
    /// Head length in output units.
    pub length: i32,
    /// Head half width in output units.
    pub half_width: i32,
}

impl ArrowParams {
    pub fn new(arrow: &Arrow, magnitude: f64) -> Self {
        Self {
            start: arrow.start,
            end: arrow.end,
            style: arrow.style,
            length: (arrow.length as f64 * magnitude) as i32,
            half_width: (arrow.half_width as f64 * magnitude) as i32,
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn at_least_one(&self) -> bool {
        self.start || self.end
    }
}

/// Name/value decoration of a macro, in output coordinates.
#[derive(Debug, Clone, Copy)]
pub struct MacroTexts<'a> {
    pub name: &'a str,
    pub name_pos: (i32, i32),
    pub value: &'a str,
    pub value_pos: (i32, i32),
    pub font: &'a str,
    pub font_size: i32,
}

/// One output format emitter.
///
/// Coordinates are in output units, already mapped. `export_macro` and
/// `export_curve` return `false` when the format has no native support,
/// in which case the driver falls back to expanding the macro body or
/// flattening the curve.
#[allow(clippy::too_many_arguments)]
pub trait Exporter {
    /// Begin a document of the given size in output units.
    fn export_start(
        &mut self,
        width: i32,
        height: i32,
        layers: &[LayerDesc],
        grid_step: i32,
    ) -> Result<()>;

    /// Finish the document.
    fn export_end(&mut self) -> Result<()>;

    /// Set the output unit used to stretch dash patterns.
    fn set_dash_unit(&mut self, unit: f64);

    /// Set the dash phase for the next strokes.
    fn set_dash_phase(&mut self, phase: f32);

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
    ) -> Result<()>;

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
    ) -> Result<()>;

    fn export_bezier(
        &mut self,
        points: [(i32, i32); 4],
        layer: usize,
        arrow: &ArrowParams,
        dash_style: i32,
        stroke_width: f64,
    ) -> Result<()>;

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
    ) -> Result<()>;

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
    ) -> Result<()>;

    fn export_polygon(
        &mut self,
        vertices: &[Point2<f64>],
        filled: bool,
        layer: usize,
        dash_style: i32,
        stroke_width: f64,
    ) -> Result<()>;

    /// Export a spline natively. Return `false` to let the driver
    /// flatten it instead.
    fn export_curve(
        &mut self,
        vertices: &[Point2<f64>],
        filled: bool,
        closed: bool,
        layer: usize,
        arrow: &ArrowParams,
        dash_style: i32,
        stroke_width: f64,
    ) -> Result<bool>;

    fn export_connection(&mut self, x: i32, y: i32, layer: usize, size: f64) -> Result<()>;

    fn export_pcb_line(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        width: i32,
        layer: usize,
    ) -> Result<()>;

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
    ) -> Result<()>;

    /// Export a macro natively. Return `false` to let the driver expand
    /// the body instead.
    fn export_macro(
        &mut self,
        x: i32,
        y: i32,
        is_mirrored: bool,
        orientation: i32,
        key: &str,
        desc: &MacroDesc,
        texts: &MacroTexts,
    ) -> Result<bool>;

    /// Draw a single arrow head and return the middle of its base.
    fn export_arrow(
        &mut self,
        x: f64,
        y: f64,
        xc: f64,
        yc: f64,
        length: f64,
        half_width: f64,
        style: ArrowStyle,
    ) -> Result<(f64, f64)>;
}

/// Shared state handed to primitives while exporting.
pub struct ExportContext<'a> {
    pub library: &'a MacroLibrary,
    pub layers: &'a [LayerDesc],
    pub config: &'a DrawingConfig,
    /// When non-negative, restrict the output to this layer.
    pub draw_only_layer: i32,
    /// When set, only the holes of PCB pads are drawn.
    pub only_pads: bool,
    /// Draw layers marked as invisible too.
    pub export_invisible: bool,
    /// Diagnostics collected while exporting macro bodies.
    pub notifications: NotificationCollection,
    visited: Vec<String>,
    bodies: HashMap<String, Vec<PrimitiveType>, ahash::RandomState>,
    exported_macros: HashSet<(String, i32, i32), ahash::RandomState>,
}

impl<'a> ExportContext<'a> {
    pub fn new(
        library: &'a MacroLibrary,
        layers: &'a [LayerDesc],
        config: &'a DrawingConfig,
    ) -> Self {
        Self {
            library,
            layers,
            config,
            draw_only_layer: -1,
            only_pads: false,
            export_invisible: false,
            notifications: NotificationCollection::new(),
            visited: Vec::new(),
            bodies: HashMap::default(),
            exported_macros: HashSet::default(),
        }
    }

    /// Whether a macro instance was already emitted natively by the
    /// exporter. Keeps the pads pass from writing it a second time.
    pub fn macro_already_exported(&self, key: &str, x: i32, y: i32) -> bool {
        self.exported_macros.contains(&(key.to_string(), x, y))
    }

    pub fn mark_macro_exported(&mut self, key: &str, x: i32, y: i32) {
        self.exported_macros.insert((key.to_string(), x, y));
    }

    /// The parsed body of a macro, cached per key.
    pub fn body_for(&mut self, key: &str) -> Result<Vec<PrimitiveType>> {
        if let Some(body) = self.bodies.get(key) {
            return Ok(body.clone());
        }
        let desc = self
            .library
            .get(key)
            .ok_or_else(|| FidoError::UnknownMacro(key.to_string()))?;
        let body = crate::io::fcd::reader::parse_primitives(
            &desc.description,
            self.library,
            &mut self.notifications,
        );
        self.bodies.insert(key.to_string(), body.clone());
        Ok(body)
    }

    /// Guard against circular macro definitions.
    pub fn enter(&mut self, key: &str) -> Result<()> {
        if self.visited.iter().any(|k| k == key) {
            return Err(FidoError::Custom(format!(
                "circular reference in macro '{}'",
                key
            )));
        }
        self.visited.push(key.to_string());
        Ok(())
    }

    pub fn leave(&mut self, key: &str) {
        if let Some(pos) = self.visited.iter().rposition(|k| k == key) {
            self.visited.remove(pos);
        }
    }
}

/// The supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Eps,
    Pdf,
    Svg,
    /// Script for the Eagle CAD program.
    EagleScript,
    /// The native drawing format, macros expanded except the standard
    /// ones.
    FidoCad,
    /// The native drawing format with every macro expanded.
    FidoCadSplit,
}

impl ExportFormat {
    /// Resolve a format from its code, as used on command lines.
    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "eps" => Ok(ExportFormat::Eps),
            "pdf" => Ok(ExportFormat::Pdf),
            "svg" => Ok(ExportFormat::Svg),
            "scr" => Ok(ExportFormat::EagleScript),
            "fcd" => Ok(ExportFormat::FidoCad),
            "fcda" => Ok(ExportFormat::FidoCadSplit),
            _ => Err(FidoError::UnsupportedFormat(code.to_string())),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ExportFormat::Eps => "eps",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Svg => "svg",
            ExportFormat::EagleScript => "scr",
            ExportFormat::FidoCad => "fcd",
            ExportFormat::FidoCadSplit => "fcda",
        }
    }

    /// File extension for the format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::EagleScript => "scr",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Eps => "eps",
            ExportFormat::Svg => "svg",
            ExportFormat::FidoCad | ExportFormat::FidoCadSplit => "fcd",
        }
    }
}

/// Tunable export settings.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Output units per logical unit.
    pub magnification: f64,
    /// Replace the layer table with black.
    pub black_white: bool,
    /// Allow extensions in the native format outputs.
    pub extensions: bool,
    /// Export layers marked as invisible too.
    pub export_invisible: bool,
    /// Translate the drawing so that it starts near the origin.
    pub shift_to_origin: bool,
    /// Restrict the output to a single layer.
    pub layer_restriction: Option<usize>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            magnification: 1.0,
            black_white: false,
            extensions: true,
            export_invisible: false,
            shift_to_origin: true,
            layer_restriction: None,
        }
    }
}

/// Export a drawing to any writer.
pub fn export_to_writer<W: Write>(
    model: &DrawingModel,
    format: ExportFormat,
    opts: &ExportOptions,
    w: &mut W,
) -> Result<()> {
    match format {
        ExportFormat::Eps => run_export(model, opts, &mut eps::EpsExporter::new(w)),
        ExportFormat::Pdf => run_export(model, opts, &mut pdf::PdfExporter::new(w)),
        ExportFormat::Svg => run_export(model, opts, &mut svg::SvgExporter::new(w)),
        ExportFormat::EagleScript => run_export(model, opts, &mut eagle::EagleExporter::new(w)),
        ExportFormat::FidoCad => run_export(
            model,
            opts,
            &mut fcd::FidoCadExporter::new(w, opts.extensions, false),
        ),
        ExportFormat::FidoCadSplit => run_export(
            model,
            opts,
            &mut fcd::FidoCadExporter::new(w, opts.extensions, true),
        ),
    }
}

/// Export a drawing to a file.
pub fn export_to_file<P: AsRef<Path>>(
    model: &DrawingModel,
    format: ExportFormat,
    opts: &ExportOptions,
    path: P,
) -> Result<()> {
    let mut f = std::fs::File::create(path)?;
    export_to_writer(model, format, opts, &mut f)
}

/// Export each used layer to its own file. The layer index is inserted
/// in the file name before the extension. Returns the written paths.
pub fn export_split_layers<P: AsRef<Path>>(
    model: &DrawingModel,
    format: ExportFormat,
    opts: &ExportOptions,
    path: P,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for layer in model.used_layers() {
        let target = add_index_in_filename(path.as_ref(), layer);
        let mut f = std::fs::File::create(&target)?;
        let mut single = opts.clone();
        single.layer_restriction = Some(layer);
        export_to_writer(model, format, &single, &mut f)?;
        written.push(target);
    }
    Ok(written)
}

/// `drawing.svg` with index 2 becomes `drawing_2.svg`.
fn add_index_in_filename(path: &Path, index: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("export");
    let name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}_{}.{}", stem, index, ext),
        None => format!("{}_{}", stem, index),
    };
    path.with_file_name(name)
}

/// Run the export through an already constructed exporter.
pub fn run_export(
    model: &DrawingModel,
    opts: &ExportOptions,
    exp: &mut dyn Exporter,
) -> Result<()> {
    let (origin_x, origin_y, width, height) = drawing_extent(model, opts)?;

    let layers = if opts.black_white {
        monochrome_layers(&model.layers)
    } else {
        model.layers.clone()
    };

    let mag = opts.magnification;
    let mut cs = MapCoordinates::new();
    cs.set_magnitudes(mag, mag);
    if opts.shift_to_origin {
        let org_x = origin_x as f64 * cs.x_magnitude() - EXPORT_BORDER as f64 * cs.x_magnitude() / 2.0;
        let org_y = origin_y as f64 * cs.y_magnitude() - EXPORT_BORDER as f64 * cs.y_magnitude() / 2.0;
        cs.set_x_center(-org_x);
        cs.set_y_center(-org_y);
    }
    let total_w = ((width + EXPORT_BORDER) as f64 * cs.x_magnitude()).ceil() as i32;
    let total_h = ((height + EXPORT_BORDER) as f64 * cs.y_magnitude()).ceil() as i32;

    exp.set_dash_unit(cs.x_magnitude());
    exp.export_start(total_w, total_h, &layers, cs.x_grid_step())?;

    let mut ctx = ExportContext::new(&model.library, &layers, &model.config);
    ctx.export_invisible = opts.export_invisible;
    if let Some(layer) = opts.layer_restriction {
        ctx.draw_only_layer = layer as i32;
    }
    export_drawing(model, exp, &mut cs, &mut ctx)?;

    exp.export_end()
}

/// Walk the drawing: one pass per layer, so that the stacking of the
/// output follows the layer order, then a final pass for the pad holes.
fn export_drawing(
    model: &DrawingModel,
    exp: &mut dyn Exporter,
    cs: &mut MapCoordinates,
    ctx: &mut ExportContext,
) -> Result<()> {
    if ctx.draw_only_layer >= 0 && !ctx.only_pads {
        export_layer_pass(model, exp, cs, ctx)?;
        return Ok(());
    }

    for j in 0..MAX_LAYERS {
        ctx.draw_only_layer = j as i32;
        export_layer_pass(model, exp, cs, ctx)?;
    }
    ctx.draw_only_layer = -1;

    ctx.only_pads = true;
    for p in model.primitives() {
        if matches!(p, PrimitiveType::PcbPad(_) | PrimitiveType::Macro(_)) {
            p.as_primitive().export(exp, cs, ctx)?;
        }
    }
    ctx.only_pads = false;
    Ok(())
}

fn export_layer_pass(
    model: &DrawingModel,
    exp: &mut dyn Exporter,
    cs: &mut MapCoordinates,
    ctx: &mut ExportContext,
) -> Result<()> {
    for p in model.primitives() {
        let prim = p.as_primitive();
        if matches!(p, PrimitiveType::Macro(_)) {
            prim.export(exp, cs, ctx)?;
        } else if prim.layer() as i32 == ctx.draw_only_layer {
            let visible = ctx
                .layers
                .get(prim.layer())
                .map(|l| l.visible)
                .unwrap_or(true);
            if visible || ctx.export_invisible {
                prim.export(exp, cs, ctx)?;
            }
        }
    }
    Ok(())
}

/// Measure the drawing by exporting it through a null device with an
/// identity mapping, tracking the extreme output points.
fn drawing_extent(model: &DrawingModel, opts: &ExportOptions) -> Result<(i32, i32, i32, i32)> {
    let mut cs = MapCoordinates::new();
    let mut null = NullExporter;
    let mut ctx = ExportContext::new(&model.library, &model.layers, &model.config);
    ctx.export_invisible = opts.export_invisible;
    export_drawing(model, &mut null, &mut cs, &mut ctx)?;
    if cs.x_min() > cs.x_max() || cs.y_min() > cs.y_max() {
        return Ok((0, 0, 1, 1));
    }
    Ok((
        cs.x_min(),
        cs.y_min(),
        (cs.x_max() - cs.x_min()).max(1),
        (cs.y_max() - cs.y_min()).max(1),
    ))
}

/// An exporter producing no output, used for measuring.
struct NullExporter;

impl Exporter for NullExporter {
    fn export_start(&mut self, _: i32, _: i32, _: &[LayerDesc], _: i32) -> Result<()> {
        Ok(())
    }

    fn export_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn set_dash_unit(&mut self, _: f64) {}

    fn set_dash_phase(&mut self, _: f32) {}

    fn export_adv_text(
        &mut self,
        _: i32,
        _: i32,
        _: i32,
        _: i32,
        _: &str,
        _: bool,
        _: bool,
        _: bool,
        _: i32,
        _: usize,
        _: &str,
    ) -> Result<()> {
        Ok(())
    }

    fn export_line(
        &mut self,
        _: f64,
        _: f64,
        _: f64,
        _: f64,
        _: usize,
        _: &ArrowParams,
        _: i32,
        _: f64,
    ) -> Result<()> {
        Ok(())
    }

    fn export_bezier(
        &mut self,
        _: [(i32, i32); 4],
        _: usize,
        _: &ArrowParams,
        _: i32,
        _: f64,
    ) -> Result<()> {
        Ok(())
    }

    fn export_rectangle(
        &mut self,
        _: i32,
        _: i32,
        _: i32,
        _: i32,
        _: bool,
        _: usize,
        _: i32,
        _: f64,
    ) -> Result<()> {
        Ok(())
    }

    fn export_oval(
        &mut self,
        _: i32,
        _: i32,
        _: i32,
        _: i32,
        _: bool,
        _: usize,
        _: i32,
        _: f64,
    ) -> Result<()> {
        Ok(())
    }

    fn export_polygon(
        &mut self,
        _: &[Point2<f64>],
        _: bool,
        _: usize,
        _: i32,
        _: f64,
    ) -> Result<()> {
        Ok(())
    }

    fn export_curve(
        &mut self,
        _: &[Point2<f64>],
        _: bool,
        _: bool,
        _: usize,
        _: &ArrowParams,
        _: i32,
        _: f64,
    ) -> Result<bool> {
        // Force the flattening so that the spline extents are tracked.
        Ok(false)
    }

    fn export_connection(&mut self, _: i32, _: i32, _: usize, _: f64) -> Result<()> {
        Ok(())
    }

    fn export_pcb_line(&mut self, _: i32, _: i32, _: i32, _: i32, _: i32, _: usize) -> Result<()> {
        Ok(())
    }

    fn export_pcb_pad(
        &mut self,
        _: i32,
        _: i32,
        _: i32,
        _: i32,
        _: i32,
        _: i32,
        _: usize,
        _: bool,
    ) -> Result<()> {
        Ok(())
    }

    fn export_macro(
        &mut self,
        _: i32,
        _: i32,
        _: bool,
        _: i32,
        _: &str,
        _: &MacroDesc,
        _: &MacroTexts,
    ) -> Result<bool> {
        // Expand the body so that its extents are tracked.
        Ok(false)
    }

    fn export_arrow(
        &mut self,
        x: f64,
        y: f64,
        _: f64,
        _: f64,
        _: f64,
        _: f64,
        _: ArrowStyle,
    ) -> Result<(f64, f64)> {
        Ok((x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Line;

    #[test]
    fn test_format_codes() {
        assert_eq!(ExportFormat::from_code("svg").ok(), Some(ExportFormat::Svg));
        assert_eq!(
            ExportFormat::from_code("fcda").ok(),
            Some(ExportFormat::FidoCadSplit)
        );
        assert!(ExportFormat::from_code("bmp").is_err());
        assert_eq!(ExportFormat::EagleScript.extension(), "scr");
        assert_eq!(ExportFormat::FidoCadSplit.extension(), "fcd");
    }

    #[test]
    fn test_add_index_in_filename() {
        let p = add_index_in_filename(Path::new("/tmp/drawing.svg"), 2);
        assert_eq!(p, PathBuf::from("/tmp/drawing_2.svg"));
        let p = add_index_in_filename(Path::new("noext"), 0);
        assert_eq!(p, PathBuf::from("noext_0"));
    }

    #[test]
    fn test_drawing_extent() {
        let mut m = DrawingModel::new();
        m.add(PrimitiveType::Line(Line::new(10, 20, 110, 70, 0)), false);
        let opts = ExportOptions::default();
        let (x, y, w, h) = drawing_extent(&m, &opts).ok().unwrap();
        assert_eq!((x, y, w, h), (10, 20, 100, 50));
    }

    #[test]
    fn test_empty_drawing_extent() {
        let m = DrawingModel::new();
        let opts = ExportOptions::default();
        let (x, y, w, h) = drawing_extent(&m, &opts).ok().unwrap();
        assert_eq!((x, y, w, h), (0, 0, 1, 1));
    }

    #[test]
    fn test_cycle_guard() {
        let lib = MacroLibrary::new();
        let layers = crate::layers::standard_layers();
        let config = DrawingConfig::default();
        let mut ctx = ExportContext::new(&lib, &layers, &config);
        ctx.enter("a.b").ok().unwrap();
        assert!(ctx.enter("a.b").is_err());
        ctx.leave("a.b");
        assert!(ctx.enter("a.b").is_ok());
    }
}
