//! Error types used throughout the crate.

use thiserror::Error;

/// Result type alias used by all fallible operations in this crate.
pub type Result<T> = std::result::Result<T, FidoError>;

/// Errors that can occur while reading, writing or exporting a drawing.
#[derive(Error, Debug)]
pub enum FidoError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A line of the drawing could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// A numeric token could not be converted.
    #[error("invalid number: {0}")]
    InvalidNumber(String),

    /// The structure of a library file is broken, for example an
    /// unterminated category or macro header.
    #[error("malformed library: {0}")]
    LibraryStructure(String),

    /// A macro key is not present in the library.
    #[error("unrecognized macro '{0}'")]
    UnknownMacro(String),

    /// The requested export format code is not known.
    #[error("unsupported export format '{0}'")]
    UnsupportedFormat(String),

    /// A generic error described by a message.
    #[error("{0}")]
    Custom(String),
}

impl From<String> for FidoError {
    fn from(msg: String) -> Self {
        FidoError::Custom(msg)
    }
}

impl From<&str> for FidoError {
    fn from(msg: &str) -> Self {
        FidoError::Custom(msg.to_string())
    }
}

impl From<std::num::ParseIntError> for FidoError {
    fn from(err: std::num::ParseIntError) -> Self {
        FidoError::InvalidNumber(err.to_string())
    }
}

impl From<std::num::ParseFloatError> for FidoError {
    fn from(err: std::num::ParseFloatError) -> Self {
        FidoError::InvalidNumber(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FidoError::Parse("bad arguments on LI".to_string());
        assert_eq!(format!("{}", err), "parse error: bad arguments on LI");

        let err = FidoError::UnknownMacro("foo.bar".to_string());
        assert_eq!(format!("{}", err), "unrecognized macro 'foo.bar'");
    }

    #[test]
    fn test_from_string() {
        let err: FidoError = "something went wrong".into();
        assert!(matches!(err, FidoError::Custom(_)));
    }

    #[test]
    fn test_from_parse_int() {
        let parse_err = "abc".parse::<i32>().unwrap_err();
        let err: FidoError = parse_err.into();
        assert!(matches!(err, FidoError::InvalidNumber(_)));
    }

    #[test]
    fn test_result_alias() {
        fn parses(s: &str) -> Result<i32> {
            Ok(s.trim().parse::<i32>()?)
        }
        assert_eq!(parses(" 42 ").ok(), Some(42));
        assert!(parses("x").is_err());
    }
}
