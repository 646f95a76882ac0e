//! Lexical analysis
//!
//! Converts source text into a stream of classified, position-tagged tokens.
//!
//! - `scanner` - cursor, whitespace/comment skipping, dispatch, identifiers and strings
//! - `number` - numeric literal lexing
//! - `symbol` - combinator and bracket symbols
//! - `config` - scan limits
//! - `token` - token data model

mod config;
mod number;
mod scanner;
mod symbol;
mod token;

pub use config::ScanConfig;
pub use scanner::{is_ident_continue, is_ident_start, Scanner, NIL};
pub use symbol::{is_symbol_start, SYMBOLS};
pub use token::{Payload, PayloadForm, Position, Token, TokenKind};
