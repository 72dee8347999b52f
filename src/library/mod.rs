//! Macro library: reusable symbols addressed by a lowercase key.

use indexmap::IndexMap;

/// A macro definition. The body is a fragment of drawing text which is
/// parsed on demand when the macro is drawn or exported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroDesc {
    /// Unique lowercase key, usually `prefix.name`.
    pub key: String,
    /// Human readable name shown to the user.
    pub name: String,
    /// Drawing commands composing the macro, one per line.
    pub description: String,
    /// Category inside the library file.
    pub category: String,
    /// Name of the library the macro belongs to.
    pub library: String,
    /// File the macro was loaded from.
    pub filename: String,
}

impl MacroDesc {
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        library: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            description: description.into(),
            category: category.into(),
            library: library.into(),
            filename: filename.into(),
        }
    }
}

/// An ordered collection of macros, keyed by their lowercase key.
/// Insertion order is preserved so that libraries round-trip.
#[derive(Debug, Clone, Default)]
pub struct MacroLibrary {
    macros: IndexMap<String, MacroDesc>,
}

impl MacroLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a macro, replacing any previous definition with the same
    /// key.
    pub fn insert(&mut self, desc: MacroDesc) {
        self.macros.insert(desc.key.clone(), desc);
    }

    /// Look up a macro. Keys are matched case insensitively since they
    /// are stored lowercased.
    pub fn get(&self, key: &str) -> Option<&MacroDesc> {
        self.macros.get(&key.to_lowercase())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.macros.contains_key(&key.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.macros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }

    /// Iterate over the macros in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &MacroDesc> {
        self.macros.values()
    }

    /// Merge another library into this one, replacing duplicates.
    pub fn extend(&mut self, other: MacroLibrary) {
        self.macros.extend(other.macros);
    }
}

/// Whether a macro key belongs to a standard library. Keys without a
/// prefix come from the original FidoCAD library; `pcb`, `ihram` and
/// `elettrotecnica` are the standard FidoCadJ libraries, recognized
/// only when extensions are enabled.
pub fn is_standard_macro(key: &str, extensions: bool) -> bool {
    match key.find('.') {
        None => true,
        Some(dotpos) => {
            let library = &key[..dotpos];
            extensions && matches!(library, "pcb" | "ihram" | "elettrotecnica")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(key: &str) -> MacroDesc {
        MacroDesc::new(key, "Sample", "LI 0 0 10 10 0", "test", "testlib", "")
    }

    #[test]
    fn test_insert_and_get() {
        let mut lib = MacroLibrary::new();
        lib.insert(sample("test.res"));
        assert_eq!(lib.len(), 1);
        assert!(lib.contains("test.res"));
        // Case insensitive lookup.
        assert!(lib.get("TEST.RES").is_some());
        assert!(lib.get("test.cap").is_none());
    }

    #[test]
    fn test_preserves_order() {
        let mut lib = MacroLibrary::new();
        lib.insert(sample("a.one"));
        lib.insert(sample("a.two"));
        lib.insert(sample("a.three"));
        let keys: Vec<_> = lib.iter().map(|m| m.key.as_str()).collect();
        assert_eq!(keys, vec!["a.one", "a.two", "a.three"]);
    }

    #[test]
    fn test_replace_duplicate() {
        let mut lib = MacroLibrary::new();
        lib.insert(sample("x.y"));
        let mut d = sample("x.y");
        d.name = "Replaced".to_string();
        lib.insert(d);
        assert_eq!(lib.len(), 1);
        assert_eq!(lib.get("x.y").map(|m| m.name.as_str()), Some("Replaced"));
    }

    #[test]
    fn test_standard_macro_detection() {
        assert!(is_standard_macro("075", true));
        assert!(is_standard_macro("075", false));
        assert!(is_standard_macro("pcb.smd", true));
        assert!(!is_standard_macro("pcb.smd", false));
        assert!(!is_standard_macro("mylib.part", true));
    }
}
