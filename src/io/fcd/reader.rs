//! Fault tolerant parser for the native drawing format.
//!
//! The format is line oriented, but several primitives may continue on
//! a following `FCJ` line carrying extensions (arrows, dash styles) and
//! possibly announce a name/value text pair spread over the next two
//! `TY` lines. The parser therefore holds a one line lookahead: a
//! primitive line is committed only once the following line has been
//! seen.

use crate::document::DrawingModel;
use crate::error::{FidoError, Result};
use crate::layers::MAX_LAYERS;
use crate::library::MacroLibrary;
use crate::notification::{NotificationCollection, NotificationType};
use crate::primitives::PrimitiveType;
use crate::types::Color;

/// Parse a drawing in text form into the given model. Broken lines are
/// recorded in `model.notifications` and skipped; the primitives are
/// sorted by layer afterwards.
pub fn parse_into(model: &mut DrawingModel, text: &str) {
    // The library is needed immutably while the rest of the model is
    // filled, so it is moved out for the duration of the parse.
    let library = std::mem::take(&mut model.library);
    let mut parser = Parser::new(&library);
    for (idx, line) in text.lines().enumerate() {
        parser.process_line(line, idx + 1, model);
    }
    parser.finish(model);
    model.library = library;
    model.sort_primitive_layers();
    model.changed = false;
}

/// Parse a drawing fragment, typically a macro body, into a bare list
/// of primitives. Configuration lines are applied to a throwaway model.
pub fn parse_primitives(
    text: &str,
    library: &MacroLibrary,
    notes: &mut NotificationCollection,
) -> Vec<PrimitiveType> {
    let mut model = DrawingModel::new();
    let mut parser = Parser::new(library);
    for (idx, line) in text.lines().enumerate() {
        parser.process_line(line, idx + 1, &mut model);
    }
    parser.finish(&mut model);
    model.sort_primitive_layers();
    notes.extend(std::mem::take(&mut model.notifications));
    model.primitives_mut().drain(..).collect()
}

/// Lookahead state of the line parser.
struct Parser<'a> {
    library: &'a MacroLibrary,
    /// Tokens of the primitive line waiting for a possible `FCJ`.
    old_tokens: Vec<String>,
    /// Line the pending tokens came from, for error reporting.
    old_line: usize,
    has_fcj: bool,
    /// Countdown of the `TY` lines still expected for the held
    /// primitive: two for the name, one for the value.
    macro_counter: u8,
    /// Primitive waiting for its name/value lines.
    held: Option<PrimitiveType>,
    name_tokens: Vec<String>,
}

impl<'a> Parser<'a> {
    fn new(library: &'a MacroLibrary) -> Self {
        Self {
            library,
            old_tokens: Vec::new(),
            old_line: 0,
            has_fcj: false,
            macro_counter: 0,
            held: None,
            name_tokens: Vec::new(),
        }
    }

    fn process_line(&mut self, raw: &str, line_no: usize, model: &mut DrawingModel) {
        let trimmed = raw.trim();
        // Bracketed lines are headers or foreign section markers.
        if trimmed.is_empty() || trimmed.starts_with('[') {
            return;
        }
        let tokens: Vec<String> = trimmed.split_whitespace().map(String::from).collect();

        // Any line but an FCJ continuation resolves the lookahead: the
        // pending primitive had no extensions after all. A failure is
        // charged to the line the tokens came from, so that the current
        // line is still processed.
        if tokens[0] != "FCJ" && self.has_fcj {
            self.flush_pending(model);
        }

        if let Err(e) = self.dispatch(&tokens, line_no, model) {
            model
                .notifications
                .add_at_line(NotificationType::Error, e.to_string(), line_no);
            self.reset();
        }
    }

    fn flush_pending(&mut self, model: &mut DrawingModel) {
        self.has_fcj = false;
        let old = std::mem::take(&mut self.old_tokens);
        match self.parse_primitive(&old) {
            Ok(p) => model.add(p, false),
            Err(e) => model.notifications.add_at_line(
                NotificationType::Error,
                e.to_string(),
                self.old_line,
            ),
        }
    }

    fn reset(&mut self) {
        self.old_tokens.clear();
        self.has_fcj = false;
        self.macro_counter = 0;
        self.held = None;
        self.name_tokens.clear();
    }

    fn dispatch(
        &mut self,
        tokens: &[String],
        line_no: usize,
        model: &mut DrawingModel,
    ) -> Result<()> {
        let cmd = tokens[0].as_str();

        if cmd == "FCJ" {
            if self.has_fcj {
                self.has_fcj = false;
                let old = std::mem::take(&mut self.old_tokens);
                match old[0].as_str() {
                    // The extension line of a macro or of a PCB element
                    // carries no tokens of its own: it only announces
                    // the two TY lines that follow.
                    "MC" | "PL" | "PA" | "SA" => {
                        self.held = Some(self.parse_primitive(&old)?);
                        self.macro_counter = 2;
                    }
                    _ => {
                        let mut merged = old;
                        merged.extend(tokens.iter().cloned());
                        let has_text = merged.last().map(|t| t == "1").unwrap_or(false);
                        let p = self.parse_primitive(&merged)?;
                        if has_text {
                            self.held = Some(p);
                            self.macro_counter = 2;
                        } else {
                            model.add(p, false);
                        }
                    }
                }
            } else {
                model.notifications.warn("stray FCJ line ignored");
            }
            return Ok(());
        }

        match cmd {
            "TY" => match self.macro_counter {
                2 => {
                    self.name_tokens = tokens.to_vec();
                    self.macro_counter = 1;
                }
                1 => {
                    self.macro_counter = 0;
                    let name_tokens = std::mem::take(&mut self.name_tokens);
                    if let Some(mut p) = self.held.take() {
                        let common = p.as_primitive_mut().common_mut();
                        common.set_name_tokens(&name_tokens)?;
                        common.set_value_tokens(tokens)?;
                        model.add(p, false);
                    }
                }
                _ => {
                    let p = self.parse_primitive(tokens)?;
                    model.add(p, false);
                }
            },
            "TE" => {
                self.commit_held(model);
                let p = self.parse_primitive(tokens)?;
                model.add(p, false);
            }
            "FJC" => {
                self.commit_held(model);
                fido_config(tokens, model)?;
            }
            "LI" | "BE" | "RV" | "RP" | "EV" | "EP" | "PV" | "PP" | "CV" | "CP" | "MC" | "PL"
            | "PA" | "SA" => {
                self.commit_held(model);
                self.old_tokens = tokens.to_vec();
                self.old_line = line_no;
                self.has_fcj = true;
            }
            _ => {
                self.commit_held(model);
                model
                    .notifications
                    .warn(format!("unknown command '{}'", cmd));
            }
        }
        Ok(())
    }

    /// A held primitive whose name/value lines never arrived is kept
    /// without texts.
    fn commit_held(&mut self, model: &mut DrawingModel) {
        self.macro_counter = 0;
        self.name_tokens.clear();
        if let Some(p) = self.held.take() {
            model.add(p, false);
        }
    }

    fn parse_primitive(&self, tokens: &[String]) -> Result<PrimitiveType> {
        let mut p = PrimitiveType::from_command(&tokens[0])
            .ok_or_else(|| FidoError::Parse(format!("unknown command '{}'", tokens[0])))?;
        p.as_primitive_mut().parse_tokens(tokens)?;
        if let PrimitiveType::Macro(m) = &p {
            if !self.library.contains(&m.key) {
                return Err(FidoError::UnknownMacro(m.key.clone()));
            }
        }
        Ok(p)
    }

    fn finish(mut self, model: &mut DrawingModel) {
        if self.has_fcj {
            self.flush_pending(model);
        }
        self.commit_held(model);
    }
}

/// Apply one `FJC` configuration line to the model.
fn fido_config(tokens: &[String], model: &mut DrawingModel) -> Result<()> {
    if tokens.len() < 3 {
        return Err("bad arguments on FJC".into());
    }
    match tokens[1].as_str() {
        "C" => {
            let v: f64 = tokens[2].parse()?;
            if v > 0.0 {
                model.config.connection_size = v;
            }
        }
        "L" => {
            if tokens.len() < 4 {
                return Err("bad arguments on FJC L".into());
            }
            let n: i32 = tokens[2].parse()?;
            let packed: i32 = tokens[3].parse()?;
            let alpha: f32 = if tokens.len() > 4 {
                tokens[4].parse()?
            } else {
                1.0
            };
            if (0..MAX_LAYERS as i32).contains(&n) {
                let layer = &mut model.layers[n as usize];
                layer.color = Color::from_rgb(packed);
                layer.alpha = alpha;
                layer.modified = true;
            }
        }
        "N" => {
            if tokens.len() < 4 {
                return Err("bad arguments on FJC N".into());
            }
            let n: i32 = tokens[2].parse()?;
            if (0..MAX_LAYERS as i32).contains(&n) {
                let layer = &mut model.layers[n as usize];
                layer.description = tokens[3..].join(" ");
                layer.modified = true;
            }
        }
        "A" => {
            let v: f64 = tokens[2].parse()?;
            if v > 0.0 {
                model.config.line_width = v;
            }
        }
        "B" => {
            let v: f64 = tokens[2].parse()?;
            if v > 0.0 {
                model.config.line_width_circles = v;
            }
        }
        other => {
            model
                .notifications
                .warn(format!("unknown configuration '{}'", other));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::MacroDesc;

    fn model_with_macro(key: &str, body: &str) -> DrawingModel {
        let mut m = DrawingModel::new();
        m.library
            .insert(MacroDesc::new(key, "Test", body, "cat", "lib", ""));
        m
    }

    #[test]
    fn test_parse_simple_drawing() {
        let mut m = DrawingModel::new();
        m.parse("[FIDOCAD]\nLI 0 0 50 0 0\nSA 50 0 0\n");
        assert_eq!(m.len(), 2);
        assert!(m.notifications.is_empty());
        assert!(!m.changed);
    }

    #[test]
    fn test_line_with_fcj_and_text() {
        let mut m = DrawingModel::new();
        m.parse(
            "LI 0 0 50 0 2\nFCJ 2 0 3 1 0 1\nTY 5 5 4 3 0 0 2 * W1\nTY 5 10 4 3 0 0 2 * coax\n",
        );
        assert_eq!(m.len(), 1);
        if let PrimitiveType::Line(l) = &m.primitives()[0] {
            assert!(l.arrow.end);
            assert_eq!(l.common.name, "W1");
            assert_eq!(l.common.value, "coax");
        } else {
            panic!("expected a line");
        }
    }

    #[test]
    fn test_fcj_without_textflag_commits_immediately() {
        let mut m = DrawingModel::new();
        m.parse("LI 0 0 50 0 2\nFCJ 2 0 3 1 0 0\nLI 10 10 20 20 0\n");
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn test_macro_with_name_value() {
        let mut m = model_with_macro("test.res", "LI 0 0 10 0 0");
        m.parse(
            "MC 50 50 0 0 test.res\nFCJ\nTY 60 60 4 3 0 0 0 * R1\nTY 60 55 4 3 0 0 0 * 10k\n",
        );
        assert_eq!(m.len(), 1);
        if let PrimitiveType::Macro(mc) = &m.primitives()[0] {
            assert_eq!(mc.key, "test.res");
            assert_eq!(mc.common.name, "R1");
            assert_eq!(mc.common.value, "10k");
        } else {
            panic!("expected a macro");
        }
    }

    #[test]
    fn test_unknown_macro_is_reported() {
        let mut m = DrawingModel::new();
        m.parse("MC 50 50 0 0 nosuch.macro\nLI 0 0 10 10 0\n");
        assert_eq!(m.len(), 1);
        assert!(m.notifications.has_errors());
    }

    #[test]
    fn test_standalone_ty() {
        let mut m = DrawingModel::new();
        m.parse("TY 10 20 4 3 0 0 1 * some note\n");
        assert_eq!(m.len(), 1);
        if let PrimitiveType::AdvText(t) = &m.primitives()[0] {
            assert_eq!(t.text, "some note");
            assert_eq!(t.common.layer, 1);
        } else {
            panic!("expected a text");
        }
    }

    #[test]
    fn test_legacy_te() {
        let mut m = DrawingModel::new();
        m.parse("TE 10 20 hello\n");
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn test_broken_line_is_skipped() {
        let mut m = DrawingModel::new();
        m.parse("LI 0 zz 50 0 0\nLI 0 0 10 10 0\n");
        assert_eq!(m.len(), 1);
        assert!(m.notifications.has_errors());
        assert_eq!(m.notifications.iter().next().and_then(|n| n.line), Some(1));
    }

    #[test]
    fn test_truncated_fcj_is_skipped() {
        // The FCJ line ends before the arrow description is complete.
        let mut m = DrawingModel::new();
        m.parse("LI 0 0 10 10 0\nFCJ 2 0\nLI 0 0 5 5 0\n");
        assert_eq!(m.len(), 1);
        assert!(m.notifications.has_errors());

        let mut m = DrawingModel::new();
        m.parse("RV 0 0 10 10 0\nFCJ\nLI 0 0 5 5 0\n");
        assert_eq!(m.len(), 1);
        assert!(m.notifications.has_errors());
    }

    #[test]
    fn test_eof_flushes_pending() {
        // The file ends right after a primitive line: the lookahead
        // must not swallow it.
        let mut m = DrawingModel::new();
        m.parse("LI 0 0 50 0 0");
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn test_eof_flushes_held() {
        // FCJ announced texts, but the file ends before them.
        let mut m = model_with_macro("a.b", "LI 0 0 10 0 0");
        m.parse("MC 0 0 0 0 a.b\nFCJ\n");
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn test_pcb_primitives_with_text() {
        let mut m = DrawingModel::new();
        m.parse("PA 50 50 10 10 4 0 2\nFCJ\nTY 55 55 4 3 0 0 2 * P1\nTY 55 60 4 3 0 0 2 * pad\n");
        assert_eq!(m.len(), 1);
        if let PrimitiveType::PcbPad(p) = &m.primitives()[0] {
            assert_eq!(p.common.name, "P1");
        } else {
            panic!("expected a pad");
        }
    }

    #[test]
    fn test_fjc_configuration() {
        let mut m = DrawingModel::new();
        m.parse("FJC C 3.5\nFJC A 0.8\nFJC B 0.6\nFJC L 2 -65536 0.5\nFJC N 2 Copper top\n");
        assert_eq!(m.config.connection_size, 3.5);
        assert_eq!(m.config.line_width, 0.8);
        assert_eq!(m.config.line_width_circles, 0.6);
        assert_eq!(m.layers[2].color, Color::new(255, 0, 0));
        assert!((m.layers[2].alpha - 0.5).abs() < 1e-6);
        assert!(m.layers[2].modified);
        assert_eq!(m.layers[2].description, "Copper top");
    }

    #[test]
    fn test_primitives_sorted_by_layer() {
        let mut m = DrawingModel::new();
        m.parse("LI 0 0 1 1 5\nLI 2 2 3 3 0\n");
        let layers: Vec<usize> = m
            .primitives()
            .iter()
            .map(|p| p.as_primitive().layer())
            .collect();
        assert_eq!(layers, vec![0, 5]);
    }

    #[test]
    fn test_parse_primitives_fragment() {
        let lib = MacroLibrary::new();
        let mut notes = NotificationCollection::new();
        let prims = parse_primitives("LI 0 0 10 0 0\nSA 10 0 0\n", &lib, &mut notes);
        assert_eq!(prims.len(), 2);
        assert!(notes.is_empty());
    }

    #[test]
    fn test_curve_with_merged_fcj() {
        let mut m = DrawingModel::new();
        m.parse("CV 0 0 0 30 10 60 0 2\nFCJ 1 0 3 1 0 0\n");
        assert_eq!(m.len(), 1);
        if let PrimitiveType::ComplexCurve(c) = &m.primitives()[0] {
            assert!(c.arrow.start);
            assert!(!c.closed);
        } else {
            panic!("expected a curve");
        }
    }
}
