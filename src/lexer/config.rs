/// Guards applied while scanning
///
/// Both limits are off by default. Callers that lex untrusted input set them
/// before scanning instead of interrupting a scan halfway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanConfig {
    /// Maximum number of tokens, not counting the end-of-input marker
    pub max_tokens: Option<usize>,
    /// Maximum number of input characters, whitespace and comments included
    pub max_chars: Option<usize>,
}

impl ScanConfig {
    /// Config with no limits
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = Some(max_chars);
        self
    }
}
