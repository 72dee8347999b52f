//! Parser for macro library files (`.fcl`).
//!
//! A library file is a sequence of category markers `{name}`, macro
//! headers `[KEY long name]` and body lines holding the drawing
//! commands of the current macro. A `[FIDOLIB name]` header gives the
//! library its display name.

use std::path::Path;

use crate::error::{FidoError, Result};
use crate::library::{MacroDesc, MacroLibrary};

/// Name of the standard library file, loaded without a key prefix.
const STANDARD_LIBRARY_STEM: &str = "FCDstdlib";

/// Parse a library in text form. Keys are prefixed with `prefix.`
/// unless the prefix is empty, and lowercased.
pub fn read_library(text: &str, prefix: &str, library: &mut MacroLibrary) -> Result<()> {
    let mut category = String::new();
    let mut library_name = String::new();
    let mut current: Option<MacroDesc> = None;

    for raw in text.lines() {
        let line = raw.trim();
        if line.len() <= 1 {
            continue;
        }

        if let Some(rest) = line.strip_prefix('{') {
            flush(&mut current, library);
            category = rest
                .find('}')
                .map(|end| rest[..end].trim().to_string())
                .ok_or_else(|| {
                    FidoError::LibraryStructure("category not terminated with }".to_string())
                })?;
            continue;
        }

        if let Some(rest) = line.strip_prefix('[') {
            flush(&mut current, library);
            let inner = rest.find(']').map(|end| &rest[..end]).ok_or_else(|| {
                FidoError::LibraryStructure("macro name not terminated with ]".to_string())
            })?;
            let (key, long_name) = match inner.find(' ') {
                Some(sp) => (&inner[..sp], inner[sp..].trim()),
                None => (inner, ""),
            };
            if key == "FIDOLIB" {
                library_name = long_name.to_string();
                continue;
            }
            let full_key = if prefix.is_empty() {
                key.to_lowercase()
            } else {
                format!("{}.{}", prefix, key).to_lowercase()
            };
            current = Some(MacroDesc::new(
                full_key,
                long_name,
                "",
                category.clone(),
                library_name.clone(),
                prefix,
            ));
            continue;
        }

        if let Some(desc) = current.as_mut() {
            if !desc.description.is_empty() {
                desc.description.push('\n');
            }
            desc.description.push_str(line);
        }
    }
    flush(&mut current, library);
    Ok(())
}

fn flush(current: &mut Option<MacroDesc>, library: &mut MacroLibrary) {
    if let Some(desc) = current.take() {
        library.insert(desc);
    }
}

/// Load one library file. The key prefix is derived from the file
/// stem; the standard library gets no prefix.
pub fn load_library_file<P: AsRef<Path>>(path: P, library: &mut MacroLibrary) -> Result<()> {
    let path = path.as_ref();
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let prefix = if stem == STANDARD_LIBRARY_STEM {
        String::new()
    } else {
        stem.to_lowercase()
    };
    let text = std::fs::read_to_string(path)?;
    read_library(&text, &prefix, library)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
[FIDOLIB Test library]
{Passive}
[RES Resistor]
LI 0 0 20 0 0
LI 20 0 25 5 0
[CAP Capacitor]
LI 0 0 10 0 0
{Active}
[NPN Transistor NPN]
EV 0 0 20 20 0
";

    #[test]
    fn test_read_library() {
        let mut lib = MacroLibrary::new();
        read_library(SAMPLE, "test", &mut lib).ok().unwrap();
        assert_eq!(lib.len(), 3);

        let res = lib.get("test.res").unwrap();
        assert_eq!(res.name, "Resistor");
        assert_eq!(res.category, "Passive");
        assert_eq!(res.library, "Test library");
        assert_eq!(res.description, "LI 0 0 20 0 0\nLI 20 0 25 5 0");

        let npn = lib.get("test.npn").unwrap();
        assert_eq!(npn.category, "Active");
        assert_eq!(npn.name, "Transistor NPN");
    }

    #[test]
    fn test_no_prefix() {
        let mut lib = MacroLibrary::new();
        read_library("[075 Original part]\nLI 0 0 5 0 0\n", "", &mut lib)
            .ok()
            .unwrap();
        assert!(lib.contains("075"));
    }

    #[test]
    fn test_keys_are_lowercased() {
        let mut lib = MacroLibrary::new();
        read_library("[ReS Mixed]\nLI 0 0 5 0 0\n", "MyLib", &mut lib)
            .ok()
            .unwrap();
        assert!(lib.get("mylib.res").is_some());
    }

    #[test]
    fn test_unterminated_category() {
        let mut lib = MacroLibrary::new();
        let err = read_library("{Oops\n", "x", &mut lib);
        assert!(matches!(err, Err(FidoError::LibraryStructure(_))));
    }

    #[test]
    fn test_unterminated_macro_header() {
        let mut lib = MacroLibrary::new();
        let err = read_library("[RES Resistor\n", "x", &mut lib);
        assert!(matches!(err, Err(FidoError::LibraryStructure(_))));
    }

    #[test]
    fn test_short_lines_skipped() {
        let mut lib = MacroLibrary::new();
        read_library("[A One]\nLI 0 0 5 0 0\nx\nLI 0 0 9 9 0\n", "p", &mut lib)
            .ok()
            .unwrap();
        let desc = lib.get("p.a").unwrap();
        assert_eq!(desc.description, "LI 0 0 5 0 0\nLI 0 0 9 9 0");
    }
}
