//! Error types for the tacit-lex scanner

use std::fmt;

use thiserror::Error;

use crate::lexer::Position;

/// Classification of a lexical fault
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexErrorKind {
    /// Character matches no dispatch class
    ///
    /// **Triggered by:** a character that starts no literal, identifier or symbol
    /// **Example:** `` ` `` or `{`
    UnrecognizedCharacter,

    /// Numeric literal that breaks the number grammar
    ///
    /// **Triggered by:** radix prefix with no digit, dangling `.`, exponent or
    /// imaginary marker with nothing after it, a literal running into letters
    /// **Example:** `0x`, `3.`, `1e+`, `2J`, `0b102`
    MalformedNumber,

    /// End of input reached before the closing `"`
    ///
    /// **Example:** `"abc`
    UnterminatedString,

    /// Backslash sequence outside the supported escape set
    ///
    /// **Example:** `"\q"`, `"\u{110000}"`
    InvalidEscape,

    /// Multi-character symbol whose completion is missing and which has no
    /// shorter spelling to fall back on
    IncompleteSymbol,

    /// A configured token or character limit was reached
    LimitExceeded,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LexErrorKind::UnrecognizedCharacter => "Unrecognized character",
            LexErrorKind::MalformedNumber => "Malformed numeric literal",
            LexErrorKind::UnterminatedString => "Unterminated string",
            LexErrorKind::InvalidEscape => "Invalid escape sequence",
            LexErrorKind::IncompleteSymbol => "Incomplete symbol",
            LexErrorKind::LimitExceeded => "Scan limit exceeded",
        };
        f.write_str(name)
    }
}

/// A single lexical fault with the exact source position it refers to
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at line {line}, column {column}: {message}")]
pub struct LexError {
    /// What went wrong
    pub kind: LexErrorKind,
    /// Human-readable description
    pub message: String,
    /// Line of the fault (1-indexed)
    pub line: usize,
    /// Column of the fault (1-indexed, in characters)
    pub column: usize,
    /// Character offset of the fault (0-indexed)
    pub loc: usize,
}

impl LexError {
    /// Create an error of the given kind at `position`
    pub fn new(kind: LexErrorKind, message: impl Into<String>, position: Position) -> Self {
        LexError {
            kind,
            message: message.into(),
            line: position.line,
            column: position.column,
            loc: position.loc,
        }
    }

    /// Source position of the fault
    pub fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
            loc: self.loc,
        }
    }
}

/// Crate-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Lexical fault raised by the scanner
    #[error(transparent)]
    Lex(#[from] LexError),

    /// Worker pool could not be built
    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}

/// Result type for tacit-lex operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_position() {
        let err = LexError::new(
            LexErrorKind::UnterminatedString,
            "missing closing quote",
            Position {
                line: 3,
                column: 7,
                loc: 21,
            },
        );
        assert_eq!(
            err.to_string(),
            "Unterminated string at line 3, column 7: missing closing quote"
        );
        assert_eq!(err.position().loc, 21);
    }

    #[test]
    fn test_lex_error_converts_into_crate_error() {
        let err = LexError::new(
            LexErrorKind::MalformedNumber,
            "no digits after 0x",
            Position::start(),
        );
        let wrapped: Error = err.clone().into();
        assert_eq!(wrapped, Error::Lex(err.clone()));
        assert_eq!(wrapped.to_string(), err.to_string());
    }
}
