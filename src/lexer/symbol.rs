//! Fixed operator and bracket spellings
//!
//! Symbols are resolved by longest match against [`SYMBOLS`]: when one
//! spelling is a prefix of another (`/` and `//`), the longer one wins as long
//! as all of its characters are present.

use super::scanner::Scanner;
use super::token::{Token, TokenKind};
use crate::error::{LexError, LexErrorKind};

/// Every symbol spelling and the kind it produces
pub const SYMBOLS: &[(&str, TokenKind)] = &[
    ("[", TokenKind::LeftBracket),
    ("]", TokenKind::RightBracket),
    ("(", TokenKind::LeftParen),
    (")", TokenKind::RightParen),
    ("'", TokenKind::Quote),
    ("//", TokenKind::Over),
    ("/", TokenKind::Slash),
    ("@", TokenKind::Atop),
    (":", TokenKind::Map),
    ("#", TokenKind::Tack),
    ("&", TokenKind::Fork),
    ("$", TokenKind::Bind),
];

/// Check if `c` begins some symbol spelling
pub fn is_symbol_start(c: char) -> bool {
    SYMBOLS.iter().any(|(spelling, _)| spelling.starts_with(c))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SymbolMatch {
    /// Longest fully present spelling and its length in characters
    Found(TokenKind, usize),
    /// Only a strict prefix of this spelling is present
    Incomplete(&'static str),
    NoMatch,
}

pub(crate) fn longest_match(table: &[(&'static str, TokenKind)], input: &[char]) -> SymbolMatch {
    let mut best: Option<(TokenKind, usize)> = None;
    let mut partial: Option<&'static str> = None;

    for &(spelling, kind) in table {
        let len = spelling.chars().count();
        let matched = spelling
            .chars()
            .zip(input.iter())
            .take_while(|(expected, actual)| expected == *actual)
            .count();

        if matched == len {
            if best.map_or(true, |(_, best_len)| len > best_len) {
                best = Some((kind, len));
            }
        } else if matched > 0 && partial.is_none() {
            partial = Some(spelling);
        }
    }

    match (best, partial) {
        (Some((kind, len)), _) => SymbolMatch::Found(kind, len),
        (None, Some(spelling)) => SymbolMatch::Incomplete(spelling),
        (None, None) => SymbolMatch::NoMatch,
    }
}

impl Scanner {
    pub(super) fn scan_symbol(&mut self) -> Result<Token, LexError> {
        match longest_match(SYMBOLS, self.rest()) {
            SymbolMatch::Found(kind, len) => {
                for _ in 0..len {
                    self.advance();
                }
                self.make_token(kind, "")
            }
            SymbolMatch::Incomplete(spelling) => Err(self.error_at_start(
                LexErrorKind::IncompleteSymbol,
                format!("incomplete symbol, expected '{}'", spelling),
            )),
            SymbolMatch::NoMatch => {
                let c = self.peek();
                Err(self.error_at_start(
                    LexErrorKind::UnrecognizedCharacter,
                    format!("unexpected character '{}'", c),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_longer_spelling_wins() {
        assert_eq!(
            longest_match(SYMBOLS, &chars("//x")),
            SymbolMatch::Found(TokenKind::Over, 2)
        );
        assert_eq!(
            longest_match(SYMBOLS, &chars("/x")),
            SymbolMatch::Found(TokenKind::Slash, 1)
        );
        assert_eq!(
            longest_match(SYMBOLS, &chars("/")),
            SymbolMatch::Found(TokenKind::Slash, 1)
        );
    }

    #[test]
    fn test_every_symbol_resolves_alone() {
        for &(spelling, kind) in SYMBOLS {
            let len = spelling.chars().count();
            assert_eq!(
                longest_match(SYMBOLS, &chars(spelling)),
                SymbolMatch::Found(kind, len),
                "spelling {:?}",
                spelling
            );
        }
    }

    #[test]
    fn test_partial_spelling_without_fallback() {
        const TABLE: &[(&str, TokenKind)] = &[("->", TokenKind::Fork), ("@", TokenKind::Atop)];
        assert_eq!(
            longest_match(TABLE, &chars("-x")),
            SymbolMatch::Incomplete("->")
        );
        assert_eq!(
            longest_match(TABLE, &chars("->")),
            SymbolMatch::Found(TokenKind::Fork, 2)
        );
        assert_eq!(longest_match(TABLE, &chars("x")), SymbolMatch::NoMatch);
    }

    #[test]
    fn test_symbol_start() {
        for c in ['[', ']', '(', ')', '\'', '/', '@', ':', '#', '&', '$'] {
            assert!(is_symbol_start(c), "{:?}", c);
        }
        assert!(!is_symbol_start('a'));
        assert!(!is_symbol_start('"'));
    }
}
