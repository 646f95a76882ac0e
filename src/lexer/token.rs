use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Location of a lexeme's first character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed, counted in characters)
    pub column: usize,
    /// Absolute character offset (0-indexed)
    pub loc: usize,
}

impl Position {
    /// Position of the first character of any input
    pub fn start() -> Self {
        Position {
            line: 1,
            column: 1,
            loc: 0,
        }
    }
}

/// Representation a token kind stores its literal content in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadForm {
    /// Decoded Unicode text
    Text,
    /// Exact source spelling as UTF-8 bytes
    Bytes,
}

/// Literal content carried by a token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Payload {
    /// Decoded string literal contents (escapes resolved)
    Text(String),
    /// Source spelling of an identifier or numeric literal
    Bytes(Vec<u8>),
}

impl Payload {
    /// Text view of the payload
    pub fn as_str(&self) -> &str {
        match self {
            Payload::Text(text) => text,
            // Byte payloads are always cut from a `str`, so this never fails.
            Payload::Bytes(bytes) => std::str::from_utf8(bytes).unwrap_or_default(),
        }
    }

    /// Which representation this payload uses
    pub fn form(&self) -> PayloadForm {
        match self {
            Payload::Text(_) => PayloadForm::Text,
            Payload::Bytes(_) => PayloadForm::Bytes,
        }
    }
}

/// All token kinds of the language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // Literals
    /// Identifier (function or variable name)
    Identifier,
    /// The reserved `nil` spelling
    Nil,
    /// Complex number literal (`3J4`, `1.5j-2`)
    Complex,
    /// Floating-point literal (`3.14`, `1e10`)
    Float,
    /// Binary integer literal (`0b1010`)
    Binary,
    /// Hexadecimal integer literal (`0x1F`)
    Hex,
    /// Decimal integer literal (`42`, `-7`)
    Integer,
    /// String literal
    String,

    // Delimiters
    /// Left bracket `[`
    LeftBracket,
    /// Right bracket `]`
    RightBracket,

    // Combinators
    /// Over `//`
    Over,
    /// Slash `/`
    Slash,
    /// Atop `@`
    Atop,
    /// Map `:`
    Map,
    /// Tack `#`
    Tack,
    /// Fork `&`
    Fork,
    /// Bind `$`
    Bind,

    /// Left parenthesis `(`
    LeftParen,
    /// Right parenthesis `)`
    RightParen,
    /// Quote `'`
    Quote,

    // Special
    /// End of input marker
    Eof,
}

impl TokenKind {
    /// Payload representation mandated by this kind, `None` if it carries none
    pub fn payload_form(self) -> Option<PayloadForm> {
        match self {
            TokenKind::String => Some(PayloadForm::Text),
            TokenKind::Identifier
            | TokenKind::Complex
            | TokenKind::Float
            | TokenKind::Binary
            | TokenKind::Hex
            | TokenKind::Integer => Some(PayloadForm::Bytes),
            _ => None,
        }
    }

    /// Check if token is a numeric literal
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            TokenKind::Complex
                | TokenKind::Float
                | TokenKind::Binary
                | TokenKind::Hex
                | TokenKind::Integer
        )
    }

    /// Check if token comes from the fixed symbol table
    pub fn is_symbol(self) -> bool {
        matches!(
            self,
            TokenKind::LeftBracket
                | TokenKind::RightBracket
                | TokenKind::Over
                | TokenKind::Slash
                | TokenKind::Atop
                | TokenKind::Map
                | TokenKind::Tack
                | TokenKind::Fork
                | TokenKind::Bind
                | TokenKind::LeftParen
                | TokenKind::RightParen
                | TokenKind::Quote
        )
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Nil => "nil",
            TokenKind::Complex => "complex number",
            TokenKind::Float => "floating-point number",
            TokenKind::Binary => "binary integer",
            TokenKind::Hex => "hexadecimal integer",
            TokenKind::Integer => "integer",
            TokenKind::String => "string",
            TokenKind::LeftBracket => "'['",
            TokenKind::RightBracket => "']'",
            TokenKind::Over => "'//'",
            TokenKind::Slash => "'/'",
            TokenKind::Atop => "'@'",
            TokenKind::Map => "':'",
            TokenKind::Tack => "'#'",
            TokenKind::Fork => "'&'",
            TokenKind::Bind => "'$'",
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::Quote => "'''",
            TokenKind::Eof => "end of input",
        };
        f.write_str(name)
    }
}

/// A single classified lexeme
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
    kind: TokenKind,
    payload: Option<Payload>,
    line: usize,
    column: usize,
    loc: usize,
    len: usize,
}

impl Token {
    /// Creates a token; the payload form is picked from `kind`, and `content`
    /// is dropped for kinds that carry none.
    ///
    /// `len` is the number of source characters the lexeme spans.
    pub fn new(kind: TokenKind, content: &str, position: Position, len: usize) -> Self {
        let payload = kind.payload_form().map(|form| match form {
            PayloadForm::Text => Payload::Text(content.to_string()),
            PayloadForm::Bytes => Payload::Bytes(content.as_bytes().to_vec()),
        });

        Token {
            kind,
            payload,
            line: position.line,
            column: position.column,
            loc: position.loc,
            len,
        }
    }

    /// The end-of-input marker at `position`
    pub fn eof(position: Position) -> Self {
        Token::new(TokenKind::Eof, "", position, 0)
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// Payload as text, `None` for kinds without a payload
    pub fn text(&self) -> Option<&str> {
        self.payload.as_ref().map(Payload::as_str)
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn loc(&self) -> usize {
        self.loc
    }

    pub fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
            loc: self.loc,
        }
    }

    /// Number of source characters covered by the lexeme
    pub fn len(&self) -> usize {
        self.len
    }

    /// True only for the end-of-input marker, which covers no source
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Character range of the lexeme in the input
    pub fn span(&self) -> Range<usize> {
        self.loc..self.loc + self.len
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match (&self.kind, &self.payload) {
            (TokenKind::String, Some(payload)) => write!(f, "{:?}", payload.as_str()),
            (_, Some(payload)) => write!(f, "{}", payload.as_str()),
            (kind, None) => write!(f, "{}", kind),
        }
    }
}
