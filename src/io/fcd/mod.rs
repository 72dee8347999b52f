//! The native text format: drawings and macro libraries.

pub mod library_reader;
pub mod reader;
pub mod writer;

/// The header line opening every drawing file.
pub const FILE_HEADER: &str = "[FIDOCAD]";
