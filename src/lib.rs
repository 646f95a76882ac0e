//! # tacit-lex
//!
//! Lexical scanner for a tacit, combinator-oriented array Lisp.
//!
//! The scanner turns source text into an ordered sequence of classified
//! tokens, each tagged with its line, column and character offset. The
//! sequence always ends with a single end-of-input token. Scanning is one
//! forward pass and stops at the first lexical fault with a [`LexError`]
//! pointing at the offending source position.
//!
//! ## Quick Start
//!
//! ```rust
//! use tacit_lex::{tokenize, TokenKind};
//!
//! # fn main() -> Result<(), tacit_lex::LexError> {
//! let tokens = tokenize("(fold + 0 '(1 2.5 3J4))")?;
//!
//! assert_eq!(tokens[0].kind(), TokenKind::LeftParen);
//! assert_eq!(tokens[1].text(), Some("fold"));
//! assert_eq!(tokens[7].kind(), TokenKind::Float);
//! assert_eq!(tokens.last().map(|t| t.kind()), Some(TokenKind::Eof));
//! # Ok(())
//! # }
//! ```
//!
//! ## Lexical Grammar
//!
//! ### Literals
//!
//! - **Integer**: `42`, `-7`, `+3`
//! - **Float**: `3.14`, `1e10`, `-2.5E-3`
//! - **Complex**: `3J4`, `1.5j-2` (real part, `J` marker, imaginary part)
//! - **Hexadecimal**: `0x1F`
//! - **Binary**: `0b1010`
//! - **String**: `"hello\n"`, escapes `\" \\ \n \t \r \0 \u{3bb}`
//! - **Nil**: `nil`
//!
//! Numeric and identifier tokens keep their exact source spelling; string
//! tokens keep the decoded text.
//!
//! ### Combinators and Delimiters
//!
//! | Spelling | Kind |
//! |---|---|
//! | `//` | over |
//! | `/` | slash |
//! | `@` | atop |
//! | `:` | map |
//! | `#` | tack |
//! | `&` | fork |
//! | `$` | bind |
//! | `'` | quote |
//! | `(` `)` `[` `]` | parens and brackets |
//!
//! ### Identifiers
//!
//! Letters plus `_ + - * = < > ~ ! ? % ^ |`, continued by the same, digits
//! and `.`. A sign directly followed by a digit starts a number instead.
//!
//! ### Comments
//!
//! `;` to end of line.
//!
//! ## Error Handling
//!
//! ```rust
//! use tacit_lex::{tokenize, LexErrorKind};
//!
//! let err = tokenize("(print \"abc)").unwrap_err();
//! assert_eq!(err.kind, LexErrorKind::UnterminatedString);
//! assert_eq!((err.line, err.column, err.loc), (1, 8, 7));
//! ```
//!
//! [`recovery::scan_recovering`] keeps going past faults and collects them
//! all, and [`parallel::tokenize_many`] scans independent buffers on a
//! thread pool.

/// Version of the scanner
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod lexer;
pub mod parallel;
pub mod recovery;

// Re-export main types
pub use error::{Error, LexError, LexErrorKind, Result};
pub use lexer::{Payload, PayloadForm, Position, ScanConfig, Scanner, Token, TokenKind};
pub use parallel::{tokenize_many, ParallelConfig};
pub use recovery::{scan_recovering, RecoveredScan};

/// Tokenize `source` in one pass
///
/// Returns every token followed by exactly one [`TokenKind::Eof`], or the
/// first lexical fault.
pub fn tokenize(source: &str) -> std::result::Result<Vec<Token>, LexError> {
    Scanner::new(source).scan_tokens()
}

/// [`tokenize`] with scan limits
pub fn tokenize_with(
    source: &str,
    config: ScanConfig,
) -> std::result::Result<Vec<Token>, LexError> {
    Scanner::from_chars_with_config(source.chars(), config).scan_tokens()
}
