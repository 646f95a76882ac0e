//! Skip-and-resume scanning
//!
//! The scanner itself stops at the first fault. Editors and linters usually
//! want every fault in a buffer, so this layer restarts the scanner past each
//! one and collects the errors alongside the tokens it could still produce.

use crate::error::{LexError, LexErrorKind};
use crate::lexer::{ScanConfig, Scanner, Token};

/// Tokens and errors from a recovering scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveredScan {
    /// Every token produced, always ending with exactly one end-of-input token
    pub tokens: Vec<Token>,
    /// Faults in the order they were found
    pub errors: Vec<LexError>,
}

impl RecoveredScan {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Scans `source`, skipping past every lexical fault instead of stopping
///
/// After an unterminated string or an exceeded limit nothing more can be
/// scanned, so the scan ends there. An invalid escape skips the rest of its
/// string, and if that string never closes an unterminated-string fault
/// follows it. Any other fault skips to the next whitespace, comment, bracket
/// or paren.
pub fn scan_recovering(source: &str, config: ScanConfig) -> RecoveredScan {
    let mut scanner = Scanner::new(source).with_config(config);
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    loop {
        match scanner.next_token() {
            Ok(Some(token)) => tokens.push(token),
            Ok(None) => break,
            Err(err) => {
                tracing::debug!(
                    kind = %err.kind,
                    line = err.line,
                    column = err.column,
                    "recovering from lexical error"
                );

                scanner.resume_at(err.position());
                let kind = err.kind;
                errors.push(err);
                match kind {
                    LexErrorKind::UnterminatedString | LexErrorKind::LimitExceeded => {
                        scanner.skip_to_end();
                    }
                    LexErrorKind::InvalidEscape => {
                        if !scanner.skip_past_string_end() {
                            errors.push(scanner.unterminated_string());
                        }
                    }
                    _ => scanner.skip_to_sync_point(),
                }
            }
        }
    }

    RecoveredScan { tokens, errors }
}
