//! Channel-aware navigation over a buffered token sequence
//!
//! The driver fills the buffer; the stream keeps every token (hidden
//! channels included) so spans stay accurate, while navigation walks only
//! the tokens on the channel of interest.

use super::token::{Token, DEFAULT_CHANNEL};
use crate::log_debug;

/// Buffered token sequence with channel-filtered navigation
#[derive(Debug, Clone)]
pub struct TokenStream {
    /// Every emitted token, index field set to its buffer position
    all_tokens: Vec<Token>,
    /// Indices into all_tokens for tokens on the selected channel
    channel_indices: Vec<usize>,
    /// Current position within channel_indices
    position: usize,
    channel: usize,
}

impl TokenStream {
    /// Stream navigating the default channel
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::on_channel(tokens, DEFAULT_CHANNEL)
    }

    /// Stream navigating a specific channel
    pub fn on_channel(tokens: Vec<Token>, channel: usize) -> Self {
        let mut stream = Self {
            all_tokens: tokens,
            channel_indices: Vec::new(),
            position: 0,
            channel,
        };
        stream.rebuild_channel_indices();
        stream
    }

    fn rebuild_channel_indices(&mut self) {
        self.channel_indices.clear();

        for (i, token) in self.all_tokens.iter_mut().enumerate() {
            token.index = Some(i);
            // EOF is always visible regardless of channel
            if token.channel == self.channel || token.is_eof() {
                self.channel_indices.push(i);
            }
        }

        log_debug!("Token stream buffered",
            "total_tokens" => self.all_tokens.len(),
            "channel_tokens" => self.channel_indices.len(),
            "channel" => self.channel
        );

        self.position = 0;
    }

    /// Current token on the selected channel
    pub fn current(&self) -> Option<&Token> {
        self.channel_indices
            .get(self.position)
            .and_then(|&i| self.all_tokens.get(i))
    }

    /// Look ahead by n positions on the selected channel
    pub fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.channel_indices
            .get(self.position + n)
            .and_then(|&i| self.all_tokens.get(i))
    }

    /// Peek at the next token without advancing
    pub fn peek(&self) -> Option<&Token> {
        self.peek_ahead(1)
    }

    /// Advance past the current token and return it
    pub fn advance(&mut self) -> Option<&Token> {
        let token = self
            .channel_indices
            .get(self.position)
            .and_then(|&i| self.all_tokens.get(i));
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Whether navigation has reached the EOF token
    pub fn at_end(&self) -> bool {
        self.current().map_or(true, Token::is_eof)
    }

    /// Every buffered token, hidden channels included
    pub fn all_tokens(&self) -> &[Token] {
        &self.all_tokens
    }

    /// Number of tokens on the selected channel
    pub fn channel_len(&self) -> usize {
        self.channel_indices.len()
    }

    /// Total number of buffered tokens
    pub fn len(&self) -> usize {
        self.all_tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all_tokens.is_empty()
    }

    /// Reset navigation to the first token
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// Hidden-channel tokens between the current token and the previous
    /// one on the selected channel, in source order
    pub fn hidden_tokens_before_current(&self) -> Vec<&Token> {
        let Some(&current_index) = self.channel_indices.get(self.position) else {
            return Vec::new();
        };
        let lower = if self.position == 0 {
            0
        } else {
            self.channel_indices[self.position - 1] + 1
        };
        self.all_tokens[lower..current_index]
            .iter()
            .filter(|t| t.channel != self.channel)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::token::{TokenProvenance, TokenType, EOF, HIDDEN_CHANNEL};
    use crate::utils::Span;

    fn token(token_type: TokenType, channel: usize, text: &str, start: usize) -> Token {
        Token::new(
            token_type,
            channel,
            text.to_string(),
            Span::from_offsets(start, start + text.chars().count()),
            TokenProvenance::detached(),
        )
    }

    fn sample_tokens() -> Vec<Token> {
        vec![
            token(1, DEFAULT_CHANNEL, "let", 0),
            token(2, HIDDEN_CHANNEL, " ", 3),
            token(3, DEFAULT_CHANNEL, "x", 4),
            token(2, HIDDEN_CHANNEL, " ", 5),
            token(EOF, DEFAULT_CHANNEL, "<EOF>", 6),
        ]
    }

    #[test]
    fn test_default_channel_navigation() {
        let mut stream = TokenStream::new(sample_tokens());

        assert_eq!(stream.channel_len(), 3);
        assert_eq!(stream.current().unwrap().text, "let");
        assert_eq!(stream.peek().unwrap().text, "x");

        stream.advance();
        assert_eq!(stream.current().unwrap().text, "x");

        stream.advance();
        assert!(stream.at_end());
    }

    #[test]
    fn test_indices_assigned_on_buffering() {
        let stream = TokenStream::new(sample_tokens());
        for (i, token) in stream.all_tokens().iter().enumerate() {
            assert_eq!(token.index, Some(i));
        }
    }

    #[test]
    fn test_hidden_channel_navigation() {
        let stream = TokenStream::on_channel(sample_tokens(), HIDDEN_CHANNEL);
        // Two hidden tokens plus the always-visible EOF
        assert_eq!(stream.channel_len(), 3);
        assert_eq!(stream.current().unwrap().text, " ");
    }

    #[test]
    fn test_hidden_tokens_before_current() {
        let mut stream = TokenStream::new(sample_tokens());
        stream.advance();
        let hidden = stream.hidden_tokens_before_current();
        assert_eq!(hidden.len(), 1);
        assert_eq!(hidden[0].span.start().offset, 3);
    }

    #[test]
    fn test_rewind() {
        let mut stream = TokenStream::new(sample_tokens());
        stream.advance();
        stream.advance();
        stream.rewind();
        assert_eq!(stream.current().unwrap().text, "let");
    }

    #[test]
    fn test_empty_stream() {
        let stream = TokenStream::new(Vec::new());
        assert!(stream.is_empty());
        assert!(stream.at_end());
        assert!(stream.current().is_none());
    }
}
