//! Integration tests for the export filters

use fidorust::export::{export_split_layers, export_to_writer, ExportFormat, ExportOptions};
use fidorust::{DrawingModel, MacroDesc, MacroLibrary};

const SAMPLE: &str = "[FIDOCAD]\n\
LI 10 10 110 10 0\n\
RV 10 30 60 60 2\n\
EP 70 30 120 60 3\n\
SA 110 10 0\n\
TY 10 70 4 3 0 0 0 * label\n";

fn export_string(model: &DrawingModel, format: ExportFormat, opts: &ExportOptions) -> String {
    let mut buf = Vec::new();
    export_to_writer(model, format, opts, &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

/// Test that every format produces its own signature output
#[test]
fn test_all_formats_produce_output() {
    let model = DrawingModel::from_text(SAMPLE);
    let opts = ExportOptions::default();

    let eps = export_string(&model, ExportFormat::Eps, &opts);
    assert!(eps.starts_with("%!PS-Adobe-3.0 EPSF-3.0"));
    assert!(eps.ends_with("%%EOF\n"));

    let svg = export_string(&model, ExportFormat::Svg, &opts);
    assert!(svg.contains("<svg"));
    assert!(svg.contains("</svg>"));

    let pdf = export_string(&model, ExportFormat::Pdf, &opts);
    assert!(pdf.starts_with("%PDF-1.4"));
    assert!(pdf.contains("startxref"));

    let eagle = export_string(&model, ExportFormat::EagleScript, &opts);
    assert!(eagle.contains("Grid inch"));

    let fcd = export_string(&model, ExportFormat::FidoCad, &opts);
    assert!(fcd.starts_with("[FIDOCAD]\n"));
}

/// Test that magnification scales the declared image size
#[test]
fn test_magnification_changes_size() {
    let model = DrawingModel::from_text(SAMPLE);
    let small = export_string(&model, ExportFormat::Svg, &ExportOptions::default());
    let opts = ExportOptions {
        magnification: 2.0,
        ..Default::default()
    };
    let big = export_string(&model, ExportFormat::Svg, &opts);
    assert_ne!(small, big);
}

/// Test that invisible layers are skipped unless requested
#[test]
fn test_invisible_layers() {
    let mut model = DrawingModel::from_text(SAMPLE);
    model.layers[2].visible = false;

    let hidden = export_string(&model, ExportFormat::Svg, &ExportOptions::default());
    assert!(!hidden.contains("<rect"));

    let opts = ExportOptions {
        export_invisible: true,
        ..Default::default()
    };
    let shown = export_string(&model, ExportFormat::Svg, &opts);
    assert!(shown.contains("<rect"));
}

/// Test the black and white rendition
#[test]
fn test_black_white() {
    let model = DrawingModel::from_text(SAMPLE);
    let opts = ExportOptions {
        black_white: true,
        ..Default::default()
    };
    let svg = export_string(&model, ExportFormat::Svg, &opts);
    assert!(!svg.contains("stroke:#ff0000"));
    assert!(svg.contains("stroke:#000000"));
}

/// Test macro expansion through a nested macro
#[test]
fn test_nested_macro_expansion() {
    let mut library = MacroLibrary::new();
    library.insert(MacroDesc::new(
        "test.inner",
        "Inner",
        "LI 0 0 10 0 0",
        "cat",
        "Test",
        "test",
    ));
    library.insert(MacroDesc::new(
        "test.outer",
        "Outer",
        "MC 0 0 0 0 test.inner\nLI 0 5 10 5 0",
        "cat",
        "Test",
        "test",
    ));
    let mut model = DrawingModel::with_library(library);
    model.parse("[FIDOCAD]\nMC 20 20 0 0 test.outer\n");
    assert!(model.notifications.is_empty());

    let svg = export_string(&model, ExportFormat::Svg, &ExportOptions::default());
    assert_eq!(svg.matches("<line").count(), 2);
}

/// Test that a macro referencing itself is reported instead of
/// recursing forever
#[test]
fn test_recursive_macro_fails() {
    let mut library = MacroLibrary::new();
    library.insert(MacroDesc::new(
        "test.loop",
        "Loop",
        "MC 0 0 0 0 test.loop",
        "cat",
        "Test",
        "test",
    ));
    let mut model = DrawingModel::with_library(library);
    model.parse("[FIDOCAD]\nMC 20 20 0 0 test.loop\n");

    let mut buf = Vec::new();
    let result = export_to_writer(
        &model,
        ExportFormat::Svg,
        &ExportOptions::default(),
        &mut buf,
    );
    assert!(result.is_err());
}

/// Test the per-layer split export
#[test]
fn test_split_layers() {
    let model = DrawingModel::from_text("[FIDOCAD]\nLI 0 0 10 0 0\nLI 0 5 10 5 3\n");
    let dir = std::env::temp_dir().join("fidorust_split_test");
    std::fs::create_dir_all(&dir).unwrap();
    let base = dir.join("drawing.svg");

    let written =
        export_split_layers(&model, ExportFormat::Svg, &ExportOptions::default(), &base).unwrap();
    assert_eq!(written.len(), 2);
    assert!(written[0].to_string_lossy().ends_with("drawing_0.svg"));
    assert!(written[1].to_string_lossy().ends_with("drawing_3.svg"));

    let layer0 = std::fs::read_to_string(&written[0]).unwrap();
    assert_eq!(layer0.matches("<line").count(), 1);

    for path in written {
        std::fs::remove_file(path).unwrap();
    }
}

/// Test that the pads pass does not duplicate macros kept as
/// references
#[test]
fn test_macro_reference_written_once() {
    let mut library = MacroLibrary::new();
    library.insert(MacroDesc::new(
        "pcb.p1",
        "Pad",
        "PA 0 0 10 10 4 0 2",
        "pcb",
        "Std",
        "pcb",
    ));
    let mut model = DrawingModel::with_library(library);
    model.parse("[FIDOCAD]\nMC 20 20 0 0 pcb.p1\n");

    let out = export_string(&model, ExportFormat::FidoCad, &ExportOptions::default());
    assert_eq!(out.matches("MC ").count(), 1);
}
