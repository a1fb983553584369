//! Error types for lockfile parsing.

use super::token::TokenKind;

/// Errors that can occur while reading or parsing a lockfile.
///
/// Every variant except `Io` is a grammar violation. A lockfile whose
/// version header is unsupported is not an error; see
/// [`parse_str`](super::yarn_lock::parse_str).
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Failed to read the file from disk.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// A line starts with an odd number of spaces.
    #[error("Invalid indent width of {width} spaces on line {line}")]
    InvalidIndent { line: usize, width: usize },

    /// A double quote was opened but never closed.
    #[error("Unterminated string on line {line}")]
    UnterminatedString { line: usize },

    /// A digit run does not fit in an unsigned 64-bit integer.
    #[error("Invalid number '{literal}' on line {line}")]
    InvalidNumber { line: usize, literal: String },

    /// A token appeared where a new entry was expected.
    #[error("Unexpected {found} on line {line}")]
    UnexpectedToken { line: usize, found: TokenKind },

    /// A comma in a key list was not followed by a string.
    #[error("Expected string after comma on line {line}, found {found}")]
    ExpectedString { line: usize, found: TokenKind },

    /// A key is followed by neither a scalar nor a colon.
    #[error("Invalid value type {found} on line {line}")]
    InvalidValueType { line: usize, found: TokenKind },

    /// A top-level key has no `@` separating name and range.
    #[error("Invalid dependency descriptor: {0}")]
    InvalidDescriptor(String),
}

/// Result type alias for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let io_err = ParseError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));
        assert!(io_err.to_string().contains("Failed to read file"));

        let indent = ParseError::InvalidIndent { line: 4, width: 3 };
        assert_eq!(
            indent.to_string(),
            "Invalid indent width of 3 spaces on line 4"
        );

        let unexpected = ParseError::UnexpectedToken {
            line: 2,
            found: TokenKind::Colon,
        };
        assert_eq!(unexpected.to_string(), "Unexpected colon on line 2");

        let descriptor = ParseError::InvalidDescriptor("lodash".to_string());
        assert!(descriptor.to_string().contains("lodash"));
    }
}
