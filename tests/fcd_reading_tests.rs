//! Integration tests for reading drawings in the native text format

use fidorust::{DrawingModel, MacroDesc, MacroLibrary, PrimitiveType};

/// A small but complete schematic exercising most commands.
const SAMPLE: &str = "[FIDOCAD]\n\
FJC C 3\n\
LI 10 10 110 10 0\n\
BE 10 20 40 0 80 40 110 20 0\n\
RV 10 50 60 90 1\n\
EP 70 50 120 90 2\n\
PV 10 100 60 100 35 130 3\n\
SA 110 10 0\n\
PL 10 140 110 140 5 1\n\
PA 60 160 10 10 4 0 2\n\
TY 10 170 4 3 0 0 0 * Sample drawing\n";

/// Test that every primitive in the sample is recognized
#[test]
fn test_read_sample_drawing() {
    let model = DrawingModel::from_text(SAMPLE);
    assert_eq!(model.len(), 9, "all primitives should be read");
    assert!(
        model.notifications.is_empty(),
        "no diagnostics expected: {:?}",
        model.notifications.iter().collect::<Vec<_>>()
    );
    assert_eq!(model.config.connection_size, 3.0);
}

/// Test that the primitives come out sorted by layer
#[test]
fn test_layer_ordering() {
    let model = DrawingModel::from_text(SAMPLE);
    let mut last = 0;
    for p in model.primitives() {
        let layer = p.as_primitive().layer();
        assert!(layer >= last, "primitives must be ordered by layer");
        last = layer;
    }
}

/// Test reading a drawing with Windows line endings
#[test]
fn test_read_crlf() {
    let model = DrawingModel::from_text("[FIDOCAD]\r\nLI 0 0 50 0 0\r\nSA 50 0 0\r\n");
    assert_eq!(model.len(), 2);
    assert!(model.notifications.is_empty());
}

/// Test that a missing header is tolerated
#[test]
fn test_read_headerless_fragment() {
    let model = DrawingModel::from_text("LI 0 0 50 0 0\n");
    assert_eq!(model.len(), 1);
}

/// Test the FCJ extension line attached to a line primitive
#[test]
fn test_line_extensions() {
    let model = DrawingModel::from_text("[FIDOCAD]\nLI 0 0 100 0 0\nFCJ 3 0 3 2 2 0\n");
    assert_eq!(model.len(), 1);
    match &model.primitives()[0] {
        PrimitiveType::Line(l) => {
            assert!(l.arrow.start);
            assert!(l.arrow.end);
            assert_eq!(l.dash, 2);
        }
        other => panic!("expected a line, got {:?}", other),
    }
}

/// Test that macros referencing a loaded library are resolved
#[test]
fn test_macro_resolution() {
    let mut library = MacroLibrary::new();
    library.insert(MacroDesc::new(
        "ey_libraries.pas12",
        "NPN transistor",
        "LI 0 0 10 0 0\nLI 10 -5 10 5 0",
        "Transistors",
        "EY Library",
        "ey_libraries",
    ));
    let mut model = DrawingModel::with_library(library);
    model.parse("[FIDOCAD]\nMC 35 20 0 0 ey_libraries.pas12\n");
    assert_eq!(model.len(), 1);
    assert!(model.notifications.is_empty());
}

/// Test that an unresolved macro produces an error but does not stop
/// the parse
#[test]
fn test_missing_macro_is_reported() {
    let model = DrawingModel::from_text("[FIDOCAD]\nMC 35 20 0 0 nope.nothing\nLI 0 0 10 0 0\n");
    assert_eq!(model.len(), 1);
    assert!(model.notifications.has_errors());
}

/// Test that malformed lines are skipped with a diagnostic carrying
/// the line number
#[test]
fn test_malformed_line_diagnostic() {
    let model = DrawingModel::from_text("[FIDOCAD]\nLI 0 0\nLI 0 0 10 0 0\n");
    assert_eq!(model.len(), 1);
    let note = model.notifications.iter().next().unwrap();
    assert_eq!(note.line, Some(2));
}

/// Test that layer configuration lines change the layer table
#[test]
fn test_layer_configuration() {
    let model = DrawingModel::from_text("[FIDOCAD]\nFJC L 4 255 1.0\nFJC N 4 Notes\n");
    assert_eq!(model.layers[4].color, fidorust::Color::new(0, 0, 255));
    assert_eq!(model.layers[4].description, "Notes");
    assert!(model.layers[4].modified);
}

/// Test that out of range layer indices on primitives are clamped
#[test]
fn test_layer_clamping() {
    let model = DrawingModel::from_text("[FIDOCAD]\nLI 0 0 10 0 99\n");
    assert_eq!(model.len(), 1);
    assert!(model.primitives()[0].as_primitive().layer() < 16);
}

/// Test used_layers against a drawing spanning three layers
#[test]
fn test_used_layers() {
    let model = DrawingModel::from_text("[FIDOCAD]\nLI 0 0 1 1 0\nLI 0 0 1 1 3\nLI 0 0 1 1 3\nLI 0 0 1 1 7\n");
    assert_eq!(model.used_layers(), vec![0, 3, 7]);
}
