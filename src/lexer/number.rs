//! Number literal lexing.
//!
//! One forward pass resolves the literal to one of five kinds:
//!
//! - Decimal integer: `42`, `-7`, `+3`
//! - Floating point: `3.14`, `1e10`, `-2.5E-3`
//! - Complex: `3J4`, `1.5j-2.25` (real part, `J` marker, imaginary part)
//! - Hexadecimal: `0x1F`, `0XfF`
//! - Binary: `0b1010`
//!
//! The payload is always the literal's source spelling; converting it to a
//! value is left to the consumer.
//!
//! A literal ends at whitespace, a comment, a quote or a symbol. Running into
//! anything an identifier could continue with (`12abc`, `1+2`, `3J4-5`, `7?`)
//! is a malformed number rather than two tokens.

use super::scanner::{is_ident_continue, Scanner};
use super::token::{Token, TokenKind};
use crate::error::{LexError, LexErrorKind};

impl Scanner {
    pub(super) fn scan_number(&mut self) -> Result<Token, LexError> {
        if self.peek() == '0' && matches!(self.peek_next(), 'x' | 'X' | 'b' | 'B') {
            return self.scan_radix_integer();
        }

        let mut kind = self.scan_real()?;

        if matches!(self.peek(), 'J' | 'j') {
            self.advance();
            let c = self.peek();
            let has_imaginary =
                c.is_ascii_digit() || (matches!(c, '+' | '-') && self.peek_next().is_ascii_digit());
            if !has_imaginary {
                return Err(self.malformed("imaginary marker 'J' must be followed by a number"));
            }
            self.scan_real()?;
            kind = TokenKind::Complex;
        }

        self.reject_continuation(kind)?;
        let text = self.lexeme();
        self.make_token(kind, &text)
    }

    /// `[sign] digits [. digits] [e [sign] digits]`; the caller guarantees a
    /// digit after the optional sign.
    fn scan_real(&mut self) -> Result<TokenKind, LexError> {
        if matches!(self.peek(), '+' | '-') {
            self.advance();
        }
        self.consume_digits(10);

        let mut kind = TokenKind::Integer;

        if self.peek() == '.' {
            if !self.peek_next().is_ascii_digit() {
                return Err(self.malformed("expected a digit after '.'"));
            }
            self.advance(); // consume .
            self.consume_digits(10);
            kind = TokenKind::Float;
        }

        if matches!(self.peek(), 'e' | 'E') {
            self.advance();
            if matches!(self.peek(), '+' | '-') {
                self.advance();
            }
            if self.consume_digits(10) == 0 {
                return Err(self.malformed("no digits in exponent"));
            }
            kind = TokenKind::Float;
        }

        Ok(kind)
    }

    fn scan_radix_integer(&mut self) -> Result<Token, LexError> {
        self.advance(); // 0
        let marker = self.advance();
        let (radix, kind, name) = match marker {
            'x' | 'X' => (16, TokenKind::Hex, "hexadecimal"),
            _ => (2, TokenKind::Binary, "binary"),
        };

        if self.consume_digits(radix) == 0 {
            return Err(self.malformed(format!("expected a {} digit after '0{}'", name, marker)));
        }

        self.reject_continuation(kind)?;
        let text = self.lexeme();
        self.make_token(kind, &text)
    }

    fn consume_digits(&mut self, radix: u32) -> usize {
        let mut count = 0;
        while !self.is_at_end() && self.peek().is_digit(radix) {
            self.advance();
            count += 1;
        }
        count
    }

    /// A literal may not run straight into identifier characters
    fn reject_continuation(&self, kind: TokenKind) -> Result<(), LexError> {
        let c = self.peek();
        if self.is_at_end() || !is_ident_continue(c) {
            return Ok(());
        }

        let message = if kind == TokenKind::Binary && c.is_ascii_digit() {
            format!("digit '{}' is not valid in a binary literal", c)
        } else {
            format!("unexpected '{}' after {} literal", c, kind)
        };
        Err(self.malformed(message))
    }

    fn malformed(&self, message: impl Into<String>) -> LexError {
        self.error_at_start(LexErrorKind::MalformedNumber, message)
    }
}
