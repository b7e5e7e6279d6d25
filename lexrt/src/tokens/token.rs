//! Token representation shared by the driver and downstream consumers
//!
//! Token types are plain integers so generated rule tables can use them
//! directly. Negative values are reserved control sentinels that never
//! appear on emitted tokens except end of file.

use crate::utils::Span;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Integer token type, matching generated table vocabularies
pub type TokenType = i32;

/// Placeholder for tokens whose type has not been resolved yet
pub const INVALID_TYPE: TokenType = 0;
/// End of input sentinel, also the type of the final emitted token
pub const EOF: TokenType = -1;
/// Control sentinel: fold the matched text into the next token
pub const MORE: TokenType = -2;
/// Control sentinel: discard the matched text and keep scanning
pub const SKIP: TokenType = -3;
/// Smallest type value grammars may assign to real tokens
pub const MIN_USER_TOKEN_TYPE: TokenType = 1;

/// Channel carrying tokens the parser consumes
pub const DEFAULT_CHANNEL: usize = 0;
/// Channel for whitespace and comments kept out of the parse
pub const HIDDEN_CHANNEL: usize = 1;

/// Identity of the driver/stream pair that produced a token.
///
/// Rebinding a driver to a new input creates a fresh provenance, so tokens
/// from different runs never compare as coming from the same source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenProvenance {
    source_name: Arc<str>,
    generation: u64,
}

impl TokenProvenance {
    pub fn new(source_name: &str, generation: u64) -> Self {
        Self {
            source_name: Arc::from(source_name),
            generation,
        }
    }

    /// Provenance for tokens fabricated outside any driver run
    pub fn detached() -> Self {
        Self::new("<detached>", 0)
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A single lexed token with its type, channel, text, and source span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub token_type: TokenType,
    pub channel: usize,
    pub text: String,
    pub span: Span,
    pub provenance: TokenProvenance,
    /// Position in the emitted token sequence, set once buffered
    pub index: Option<usize>,
}

impl Token {
    pub fn new(
        token_type: TokenType,
        channel: usize,
        text: String,
        span: Span,
        provenance: TokenProvenance,
    ) -> Self {
        Self {
            token_type,
            channel,
            text,
            span,
            provenance,
            index: None,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.token_type == EOF
    }

    pub fn is_on_default_channel(&self) -> bool {
        self.channel == DEFAULT_CHANNEL
    }

    /// Line where the token starts, 1-based
    pub fn line(&self) -> u32 {
        self.span.start().line
    }

    /// Column where the token starts, 0-based
    pub fn column(&self) -> u32 {
        self.span.start().column
    }

    /// First character index covered by the token
    pub fn start_index(&self) -> usize {
        self.span.start().offset
    }

    /// Character index one past the last covered character
    pub fn end_index(&self) -> usize {
        self.span.end().offset
    }

    /// Token text with control characters escaped for diagnostics
    pub fn display_text(&self) -> String {
        if self.is_eof() {
            return "<EOF>".to_string();
        }
        escape_for_display(&self.text)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{},'{}',<{}>,ch{},{}]",
            self.index.map_or(-1i64, |i| i as i64),
            self.display_text(),
            self.token_type,
            self.channel,
            self.span
        )
    }
}

/// Escape newlines, tabs, and carriage returns for single-line diagnostics
pub fn escape_for_display(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Position;

    fn sample_token(token_type: TokenType, text: &str) -> Token {
        let start = Position::new(0, 1, 0);
        let end = start.advance_str(text);
        Token::new(
            token_type,
            DEFAULT_CHANNEL,
            text.to_string(),
            Span::new(start, end),
            TokenProvenance::detached(),
        )
    }

    #[test]
    fn test_sentinel_ordering() {
        assert!(SKIP < MORE);
        assert!(MORE < EOF);
        assert!(EOF < INVALID_TYPE);
        assert!(INVALID_TYPE < MIN_USER_TOKEN_TYPE);
    }

    #[test]
    fn test_token_positions() {
        let token = sample_token(MIN_USER_TOKEN_TYPE, "abc");
        assert_eq!(token.line(), 1);
        assert_eq!(token.column(), 0);
        assert_eq!(token.start_index(), 0);
        assert_eq!(token.end_index(), 3);
    }

    #[test]
    fn test_display_text_escapes_control_characters() {
        let token = sample_token(MIN_USER_TOKEN_TYPE, "a\nb\tc\r");
        assert_eq!(token.display_text(), "a\\nb\\tc\\r");
    }

    #[test]
    fn test_eof_display_text() {
        let token = sample_token(EOF, "");
        assert!(token.is_eof());
        assert_eq!(token.display_text(), "<EOF>");
    }

    #[test]
    fn test_provenance_generations_differ() {
        let first = TokenProvenance::new("input.txt", 1);
        let second = TokenProvenance::new("input.txt", 2);
        assert_ne!(first, second);
        assert_eq!(first.source_name(), second.source_name());
    }
}
