use super::config::ScanConfig;
use super::symbol::is_symbol_start;
use super::token::{Position, Token, TokenKind};
use crate::error::{LexError, LexErrorKind};

/// Spelling reserved for the nil literal
pub const NIL: &str = "nil";

/// Punctuation allowed anywhere in an identifier
const IDENT_PUNCTUATION: &[char] = &[
    '_', '+', '-', '*', '=', '<', '>', '~', '!', '?', '%', '^', '|',
];

/// Check if `c` can begin an identifier
pub fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || IDENT_PUNCTUATION.contains(&c)
}

/// Check if `c` can continue an identifier
pub fn is_ident_continue(c: char) -> bool {
    is_ident_start(c) || c.is_alphanumeric() || c == '.'
}

/// Single-pass scanner turning source text into tokens
///
/// Each scanner owns its cursor; nothing is shared between instances, so
/// independent inputs can be scanned on separate threads.
#[derive(Debug, Clone)]
pub struct Scanner {
    /// Source code as character vector
    source: Vec<char>,
    /// Current position in source
    current: usize,
    /// Current line number (1-indexed)
    line: usize,
    /// Current column number (1-indexed)
    column: usize,
    /// Position of the first character of the lexeme being scanned
    start: Position,
    config: ScanConfig,
    /// Tokens handed out so far, end-of-input excluded
    produced: usize,
    /// Set once the end-of-input token or an error has been returned
    finished: bool,
}

impl Scanner {
    /// Creates a new scanner from source code
    pub fn new(source: &str) -> Self {
        Self::from_chars(source.chars())
    }

    /// Creates a scanner over any character stream
    pub fn from_chars<I>(chars: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        Self::from_chars_with_config(chars, ScanConfig::default())
    }

    /// Creates a scanner over a character stream under `config`
    ///
    /// With `max_chars` set, at most one character past the limit is pulled
    /// from `chars`, so an endless stream is safe to scan.
    pub fn from_chars_with_config<I>(chars: I, config: ScanConfig) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        Scanner {
            source: chars.into_iter().take(buffer_limit(&config)).collect(),
            current: 0,
            line: 1,
            column: 1,
            start: Position::start(),
            config,
            produced: 0,
            finished: false,
        }
    }

    /// Replaces the scan limits
    pub fn with_config(mut self, config: ScanConfig) -> Self {
        self.source.truncate(buffer_limit(&config));
        self.config = config;
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Current cursor position
    pub fn cursor(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
            loc: self.current,
        }
    }

    /// True once the end-of-input token or an error has been returned
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Scans all tokens from source code and returns them as a vector
    ///
    /// The vector always ends with exactly one [`TokenKind::Eof`] token.
    pub fn scan_tokens(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }

        tracing::trace!(
            tokens = tokens.len(),
            chars = self.source.len(),
            "scan complete"
        );
        Ok(tokens)
    }

    /// Scans the next token
    ///
    /// Returns `Ok(None)` once the end-of-input token has been produced. After
    /// an error the scanner is finished as well.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        if self.finished {
            return Ok(None);
        }

        let result = self.scan_token().map_err(|err| self.char_limit_fault(err));
        match &result {
            Ok(token) if token.kind() == TokenKind::Eof => self.finished = true,
            Err(_) => self.finished = true,
            Ok(_) => {}
        }
        result.map(Some)
    }

    fn scan_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments();
        self.start = self.cursor();

        if self.past_char_limit() {
            return Err(self.char_limit_error());
        }
        if self.is_at_end() {
            return Ok(Token::eof(self.start));
        }

        match self.peek() {
            c if c.is_ascii_digit() => self.scan_number(),
            '+' | '-' if self.peek_next().is_ascii_digit() => self.scan_number(),
            '"' => self.scan_string(),
            c if is_symbol_start(c) => self.scan_symbol(),
            c if is_ident_start(c) => self.scan_identifier(),
            c => Err(self.error_at_start(
                LexErrorKind::UnrecognizedCharacter,
                format!("unexpected character {:?}", c),
            )),
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        while !self.is_at_end() && !self.at_char_limit() {
            match self.peek() {
                c if c.is_whitespace() => {
                    self.advance();
                }
                ';' => self.skip_line_comment(),
                _ => break,
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while !self.is_at_end() && !self.at_char_limit() && self.peek() != '\n' {
            self.advance();
        }
    }

    fn scan_identifier(&mut self) -> Result<Token, LexError> {
        while !self.is_at_end() && is_ident_continue(self.peek()) {
            self.advance();
        }

        let text = self.lexeme();
        let kind = if text == NIL {
            TokenKind::Nil
        } else {
            TokenKind::Identifier
        };
        self.make_token(kind, &text)
    }

    fn scan_string(&mut self) -> Result<Token, LexError> {
        self.advance(); // Opening "
        let mut value = String::new();

        loop {
            if self.is_at_end() {
                return Err(self.unterminated_string());
            }

            match self.peek() {
                '"' => break,
                '\\' => {
                    let escape_start = self.cursor();
                    self.advance();
                    value.push(self.scan_escape(escape_start)?);
                }
                _ => value.push(self.advance()),
            }
        }

        self.advance(); // Closing "
        self.make_token(TokenKind::String, &value)
    }

    fn scan_escape(&mut self, escape_start: Position) -> Result<char, LexError> {
        if self.is_at_end() {
            return Err(self.unterminated_string());
        }

        let escaped = self.advance();
        match escaped {
            'n' => Ok('\n'),
            't' => Ok('\t'),
            'r' => Ok('\r'),
            '0' => Ok('\0'),
            '\\' => Ok('\\'),
            '"' => Ok('"'),
            'u' => self.scan_unicode_escape(escape_start),
            _ => Err(LexError::new(
                LexErrorKind::InvalidEscape,
                format!("unknown escape sequence '\\{}'", escaped),
                escape_start,
            )),
        }
    }

    /// `\u{H..H}` with one to six hex digits; the `\u` is already consumed.
    fn scan_unicode_escape(&mut self, escape_start: Position) -> Result<char, LexError> {
        let invalid =
            |message: String| LexError::new(LexErrorKind::InvalidEscape, message, escape_start);

        if self.is_at_end() {
            return Err(self.unterminated_string());
        }
        if self.peek() != '{' {
            return Err(invalid("expected '{' after '\\u'".to_string()));
        }
        self.advance();

        let mut digits = String::new();
        loop {
            if self.is_at_end() {
                return Err(self.unterminated_string());
            }
            match self.advance() {
                '}' => break,
                c if c.is_ascii_hexdigit() && digits.len() < 6 => digits.push(c),
                c if c.is_ascii_hexdigit() => {
                    return Err(invalid("unicode escape has more than 6 hex digits".to_string()));
                }
                c => return Err(invalid(format!("unexpected {:?} in unicode escape", c))),
            }
        }

        if digits.is_empty() {
            return Err(invalid("unicode escape has no hex digits".to_string()));
        }

        u32::from_str_radix(&digits, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| invalid(format!("'{}' is not a unicode scalar value", digits)))
    }

    /// The string that began at the lexeme start ran out of input
    pub(crate) fn unterminated_string(&self) -> LexError {
        self.char_limit_fault(self.error_at_start(
            LexErrorKind::UnterminatedString,
            "string literal is missing its closing quote",
        ))
    }

    /// Cursor sits on the first character past `max_chars`
    fn at_char_limit(&self) -> bool {
        matches!(self.config.max_chars, Some(max) if self.current >= max)
    }

    /// An unread character lies at or beyond `max_chars`
    fn past_char_limit(&self) -> bool {
        self.at_char_limit() && !self.is_at_end()
    }

    fn char_limit_error(&self) -> LexError {
        let max = self.config.max_chars.unwrap_or_default();
        self.error_at_start(
            LexErrorKind::LimitExceeded,
            format!("input exceeds the limit of {} characters", max),
        )
    }

    /// A lexeme that ran into the cut-off end of the buffer is a limit fault,
    /// whatever else went wrong with it
    fn char_limit_fault(&self, err: LexError) -> LexError {
        match self.config.max_chars {
            Some(max) if self.current > max && err.kind != LexErrorKind::LimitExceeded => {
                self.char_limit_error()
            }
            _ => err,
        }
    }

    /// Finishes the current lexeme, enforcing the configured limits
    pub(super) fn make_token(&mut self, kind: TokenKind, content: &str) -> Result<Token, LexError> {
        if matches!(self.config.max_chars, Some(max) if self.current > max) {
            return Err(self.char_limit_error());
        }
        if let Some(max) = self.config.max_tokens {
            if self.produced >= max {
                return Err(self.error_at_start(
                    LexErrorKind::LimitExceeded,
                    format!("input exceeds the limit of {} tokens", max),
                ));
            }
        }

        self.produced += 1;
        Ok(Token::new(
            kind,
            content,
            self.start,
            self.current - self.start.loc,
        ))
    }

    pub(super) fn error_at_start(&self, kind: LexErrorKind, message: impl Into<String>) -> LexError {
        LexError::new(kind, message, self.start)
    }

    /// Source text of the current lexeme
    pub(super) fn lexeme(&self) -> String {
        self.source[self.start.loc..self.current].iter().collect()
    }

    /// Unconsumed input
    pub(super) fn rest(&self) -> &[char] {
        &self.source[self.current..]
    }

    pub(super) fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    pub(super) fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        c
    }

    pub(super) fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.source[self.current]
        }
    }

    pub(super) fn peek_next(&self) -> char {
        if self.current + 1 >= self.source.len() {
            '\0'
        } else {
            self.source[self.current + 1]
        }
    }

    /// Moves the cursor back to `position` and clears the finished flag
    pub(crate) fn resume_at(&mut self, position: Position) {
        self.current = position.loc.min(self.source.len());
        self.line = position.line;
        self.column = position.column;
        self.finished = false;
    }

    /// Skips at least one character, then up to the next whitespace,
    /// comment, bracket or paren
    pub(crate) fn skip_to_sync_point(&mut self) {
        if self.is_at_end() {
            return;
        }
        self.advance();
        while !self.is_at_end() {
            match self.peek() {
                c if c.is_whitespace() => break,
                ';' | '(' | ')' | '[' | ']' => break,
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Skips past the closing quote of the string the cursor is inside;
    /// false if input ends first
    pub(crate) fn skip_past_string_end(&mut self) -> bool {
        while !self.is_at_end() {
            match self.advance() {
                '\\' if !self.is_at_end() => {
                    self.advance();
                }
                '"' => return true,
                _ => {}
            }
        }
        false
    }

    /// Jumps to the end of input
    pub(crate) fn skip_to_end(&mut self) {
        while !self.is_at_end() {
            self.advance();
        }
    }
}

/// Characters worth buffering under `config`: one past `max_chars` is enough
/// to tell that the input is too long
fn buffer_limit(config: &ScanConfig) -> usize {
    config
        .max_chars
        .map_or(usize::MAX, |max| max.saturating_add(1))
}

impl Iterator for Scanner {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut scanner = Scanner::new(source);
        scanner
            .scan_tokens()
            .unwrap()
            .iter()
            .map(Token::kind)
            .collect()
    }

    #[test]
    fn test_simple_sexpr() {
        let source = "(+ 1 2)";
        let mut scanner = Scanner::new(source);
        let tokens = scanner.scan_tokens().unwrap();

        assert_eq!(tokens.len(), 6); // ( + 1 2 ) EOF
        assert_eq!(tokens[0].kind(), TokenKind::LeftParen);
        assert_eq!(tokens[1].kind(), TokenKind::Identifier);
        assert_eq!(tokens[1].text(), Some("+"));
        assert_eq!(tokens[2].kind(), TokenKind::Integer);
        assert_eq!(tokens[3].kind(), TokenKind::Integer);
        assert_eq!(tokens[4].kind(), TokenKind::RightParen);
        assert_eq!(tokens[5].kind(), TokenKind::Eof);
    }

    #[test]
    fn test_combinators() {
        assert_eq!(
            kinds("$(+ 1) @ : # & / // ' [ ]"),
            vec![
                TokenKind::Bind,
                TokenKind::LeftParen,
                TokenKind::Identifier,
                TokenKind::Integer,
                TokenKind::RightParen,
                TokenKind::Atop,
                TokenKind::Map,
                TokenKind::Tack,
                TokenKind::Fork,
                TokenKind::Slash,
                TokenKind::Over,
                TokenKind::Quote,
                TokenKind::LeftBracket,
                TokenKind::RightBracket,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comment() {
        let source = "; This is a comment\n(+ 1 2) ; trailing";
        let tokens = kinds(source);

        assert_eq!(tokens[0], TokenKind::LeftParen);
        assert_eq!(tokens[1], TokenKind::Identifier);
        assert_eq!(tokens.last(), Some(&TokenKind::Eof));
        assert_eq!(tokens.len(), 6);
    }

    #[test]
    fn test_nil_and_identifiers() {
        let mut scanner = Scanner::new("nil nil? nils λx io.println /=");
        let tokens = scanner.scan_tokens().unwrap();

        assert_eq!(tokens[0].kind(), TokenKind::Nil);
        assert_eq!(tokens[0].payload(), None);
        assert_eq!(tokens[1].text(), Some("nil?"));
        assert_eq!(tokens[2].text(), Some("nils"));
        assert_eq!(tokens[3].text(), Some("λx"));
        assert_eq!(tokens[4].text(), Some("io.println"));
        // `/` is a symbol, so `/=` splits
        assert_eq!(tokens[5].kind(), TokenKind::Slash);
        assert_eq!(tokens[6].text(), Some("="));
    }

    #[test]
    fn test_sign_without_digit_is_identifier() {
        let mut scanner = Scanner::new("(- 5) -x -5");
        let tokens = scanner.scan_tokens().unwrap();

        assert_eq!(tokens[1].kind(), TokenKind::Identifier);
        assert_eq!(tokens[1].text(), Some("-"));
        assert_eq!(tokens[4].kind(), TokenKind::Identifier);
        assert_eq!(tokens[4].text(), Some("-x"));
        assert_eq!(tokens[5].kind(), TokenKind::Integer);
        assert_eq!(tokens[5].text(), Some("-5"));
    }

    #[test]
    fn test_positions_across_lines() {
        let mut scanner = Scanner::new("(foo\n  \"a\nb\" 12)");
        let tokens = scanner.scan_tokens().unwrap();

        assert_eq!((tokens[1].line(), tokens[1].column(), tokens[1].loc()), (1, 2, 1));
        assert_eq!((tokens[2].line(), tokens[2].column(), tokens[2].loc()), (2, 3, 7));
        assert_eq!(tokens[2].len(), 5);
        assert_eq!((tokens[3].line(), tokens[3].column(), tokens[3].loc()), (3, 4, 13));
        assert_eq!(tokens[5].kind(), TokenKind::Eof);
        assert_eq!(tokens[5].loc(), 16);
    }

    #[test]
    fn test_string_escapes() {
        let mut scanner = Scanner::new(r#""a\"b\\c\nd\te\r\0\u{3bb}\u{1F600}""#);
        let tokens = scanner.scan_tokens().unwrap();

        assert_eq!(tokens[0].kind(), TokenKind::String);
        assert_eq!(tokens[0].text(), Some("a\"b\\c\nd\te\r\0λ😀"));
    }

    #[test]
    fn test_invalid_escapes() {
        for source in [r#""\q""#, r#""\u3bb""#, r#""\u{}""#, r#""\u{110000}""#, r#""\u{1234567}""#, r#""\u{12g}""#] {
            let err = Scanner::new(source).scan_tokens().unwrap_err();
            assert_eq!(err.kind, LexErrorKind::InvalidEscape, "{}", source);
            assert_eq!(err.loc, 1, "{}", source);
        }
    }

    #[test]
    fn test_unterminated_string_reports_opening_quote() {
        let err = Scanner::new("(print\n  \"abc\\\"").scan_tokens().unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnterminatedString);
        assert_eq!((err.line, err.column, err.loc), (2, 3, 9));

        let err = Scanner::new("\"\\u{12").scan_tokens().unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnterminatedString);
        assert_eq!(err.loc, 0);
    }

    #[test]
    fn test_unrecognized_character() {
        let err = Scanner::new("(a {b})").scan_tokens().unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnrecognizedCharacter);
        assert_eq!((err.line, err.column, err.loc), (1, 4, 3));
    }

    #[test]
    fn test_iterator_stops_after_eof() {
        let mut scanner = Scanner::new("a");
        assert_eq!(scanner.next().unwrap().unwrap().kind(), TokenKind::Identifier);
        assert_eq!(scanner.next().unwrap().unwrap().kind(), TokenKind::Eof);
        assert!(scanner.next().is_none());
        assert!(scanner.is_finished());
        assert_eq!(scanner.next_token(), Ok(None));
    }

    #[test]
    fn test_iterator_stops_after_error() {
        let results: Vec<_> = Scanner::new("a ` b").collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }

    #[test]
    fn test_from_chars() {
        let tokens = Scanner::from_chars("'(1 2)".chars())
            .scan_tokens()
            .unwrap();
        assert_eq!(tokens[0].kind(), TokenKind::Quote);
        assert_eq!(tokens.len(), 6);
    }

    #[test]
    fn test_token_limit() {
        let config = ScanConfig::default().with_max_tokens(2);
        let err = Scanner::new("a b c")
            .with_config(config)
            .scan_tokens()
            .unwrap_err();
        assert_eq!(err.kind, LexErrorKind::LimitExceeded);
        assert_eq!(err.loc, 4);

        // The end-of-input marker does not count
        let tokens = Scanner::new("a b")
            .with_config(config)
            .scan_tokens()
            .unwrap();
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_char_limit() {
        let config = ScanConfig::default().with_max_chars(5);
        let err = Scanner::new("abc defgh")
            .with_config(config)
            .scan_tokens()
            .unwrap_err();
        assert_eq!(err.kind, LexErrorKind::LimitExceeded);
        assert_eq!(err.loc, 4);

        assert!(Scanner::new("abc d").with_config(config).scan_tokens().is_ok());
    }

    #[test]
    fn test_char_limit_counts_skipped_input() {
        let config = ScanConfig::default().with_max_chars(5);

        let err = Scanner::new("abc d  ").with_config(config).scan_tokens().unwrap_err();
        assert_eq!(err.kind, LexErrorKind::LimitExceeded);
        assert_eq!((err.line, err.column, err.loc), (1, 6, 5));

        let err = Scanner::new("x ; a long comment")
            .with_config(config)
            .scan_tokens()
            .unwrap_err();
        assert_eq!(err.kind, LexErrorKind::LimitExceeded);
        assert_eq!(err.loc, 5);
    }

    #[test]
    fn test_char_limit_wins_over_open_string() {
        let source = format!("\"{}", "a".repeat(100_000));
        let err = Scanner::new(&source)
            .with_config(ScanConfig::default().with_max_chars(5))
            .scan_tokens()
            .unwrap_err();
        assert_eq!(err.kind, LexErrorKind::LimitExceeded);
        assert_eq!(err.loc, 0);

        // Within the limit the string fault itself is reported
        let err = Scanner::new("\"ab")
            .with_config(ScanConfig::default().with_max_chars(5))
            .scan_tokens()
            .unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    }

    #[test]
    fn test_char_limit_on_truncated_number() {
        let err = Scanner::new("0x1")
            .with_config(ScanConfig::default().with_max_chars(1))
            .scan_tokens()
            .unwrap_err();
        assert_eq!(err.kind, LexErrorKind::LimitExceeded);
    }

    #[test]
    fn test_char_limit_bounds_stream() {
        let mut pulled = 0;
        let scanner = Scanner::from_chars_with_config(
            "(a b c d e f)".chars().inspect(|_| pulled += 1),
            ScanConfig::default().with_max_chars(1),
        );
        assert_eq!(pulled, 2);
        assert_eq!(scanner.config().max_chars, Some(1));

        let err = Scanner::from_chars_with_config(
            std::iter::repeat('a'),
            ScanConfig::default().with_max_chars(8),
        )
        .scan_tokens()
        .unwrap_err();
        assert_eq!(err.kind, LexErrorKind::LimitExceeded);
        assert_eq!(err.loc, 0);
    }

    #[test]
    fn test_cursor_tracks_scan() {
        let mut scanner = Scanner::new("ab\n  cd");
        assert_eq!(scanner.cursor(), Position::start());

        scanner.next_token().unwrap();
        assert_eq!(
            scanner.cursor(),
            Position {
                line: 1,
                column: 3,
                loc: 2
            }
        );

        let second = scanner.next_token().unwrap().unwrap();
        assert_eq!((second.line(), second.column(), second.loc()), (2, 3, 5));
        assert_eq!(scanner.cursor().loc, 7);
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
        assert_eq!(kinds("  \n\t ; only a comment"), vec![TokenKind::Eof]);
    }
}
