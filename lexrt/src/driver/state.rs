//! Pending token state and the mutation surface handed to the engine

use super::mode::ModeStack;
use crate::recognizer::RecognitionError;
use crate::tokens::token::{TokenType, DEFAULT_CHANNEL, INVALID_TYPE, MORE, SKIP};
use crate::tokens::Token;
use crate::utils::Position;

/// Attributes of the token candidate currently being matched.
///
/// Captured at candidate start and mutated by engine actions before the
/// driver resolves the candidate into a token (or a control sentinel).
#[derive(Debug, Clone, PartialEq)]
pub struct TokenState {
    /// Resolved type, or a control sentinel
    pub token_type: TokenType,
    pub channel: usize,
    /// Replacement text set by an action, overriding the matched slice
    pub text_override: Option<String>,
    /// Character index where the candidate started
    pub start_index: usize,
    /// Line and column where the candidate started
    pub start_position: Position,
}

impl TokenState {
    /// Fresh state for a candidate starting at the given stream position
    pub fn begin(start_index: usize, start_position: Position) -> Self {
        Self {
            token_type: INVALID_TYPE,
            channel: DEFAULT_CHANNEL,
            text_override: None,
            start_index,
            start_position,
        }
    }

    pub fn is_skip(&self) -> bool {
        self.token_type == SKIP
    }

    pub fn is_more(&self) -> bool {
        self.token_type == MORE
    }
}

/// Borrowed driver state the recognition engine may act on while matching.
///
/// Engine actions go through this surface instead of holding a reference
/// back to the driver, so a match call borrows exactly what it can change.
pub struct LexerContext<'a> {
    pub state: &'a mut TokenState,
    pub modes: &'a mut ModeStack,
    /// Token emitted directly by an action, short-circuiting the driver's
    /// own emission for this candidate
    pub emitted: &'a mut Option<Token>,
}

impl<'a> LexerContext<'a> {
    pub fn set_type(&mut self, token_type: TokenType) {
        self.state.token_type = token_type;
    }

    pub fn set_channel(&mut self, channel: usize) {
        self.state.channel = channel;
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.state.text_override = Some(text.into());
    }

    /// Discard the candidate and keep scanning
    pub fn skip(&mut self) {
        self.state.token_type = SKIP;
    }

    /// Fold the candidate into the next one
    pub fn more(&mut self) {
        self.state.token_type = MORE;
    }

    pub fn mode(&self) -> usize {
        self.modes.current()
    }

    pub fn set_mode(&mut self, mode: usize) {
        self.modes.set(mode);
    }

    pub fn push_mode(&mut self, mode: usize) {
        self.modes.push(mode);
    }

    pub fn pop_mode(&mut self) -> Result<usize, RecognitionError> {
        self.modes.pop().ok_or(RecognitionError::EmptyModeStack)
    }

    /// Hand a fully built token to the driver for this candidate
    pub fn emit(&mut self, token: Token) {
        *self.emitted = Some(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crate::tokens::token::HIDDEN_CHANNEL;

    #[test]
    fn test_begin_resets_candidate_attributes() {
        let state = TokenState::begin(7, Position::new(7, 2, 3));
        assert_eq!(state.token_type, INVALID_TYPE);
        assert_eq!(state.channel, DEFAULT_CHANNEL);
        assert!(state.text_override.is_none());
        assert_eq!(state.start_index, 7);
    }

    #[test]
    fn test_context_mutations() {
        let mut state = TokenState::begin(0, Position::start());
        let mut modes = ModeStack::new();
        let mut emitted = None;
        let mut ctx = LexerContext {
            state: &mut state,
            modes: &mut modes,
            emitted: &mut emitted,
        };

        ctx.set_type(4);
        ctx.set_channel(HIDDEN_CHANNEL);
        ctx.set_text("folded");
        ctx.push_mode(2);

        assert_eq!(state.token_type, 4);
        assert_eq!(state.channel, HIDDEN_CHANNEL);
        assert_eq!(state.text_override.as_deref(), Some("folded"));
        assert_eq!(modes.current(), 2);
    }

    #[test]
    fn test_pop_mode_on_empty_stack_is_an_error() {
        let mut state = TokenState::begin(0, Position::start());
        let mut modes = ModeStack::new();
        let mut emitted = None;
        let mut ctx = LexerContext {
            state: &mut state,
            modes: &mut modes,
            emitted: &mut emitted,
        };

        assert_matches!(ctx.pop_mode(), Err(RecognitionError::EmptyModeStack));
    }

    #[test]
    fn test_skip_and_more_sentinels() {
        let mut state = TokenState::begin(0, Position::start());
        state.token_type = SKIP;
        assert!(state.is_skip());
        state.token_type = MORE;
        assert!(state.is_more());
    }
}
