//! Recognition engine seam between the driver and a token matcher

pub mod rules;

pub use rules::{ModeChange, Pattern, Rule, RuleAction, TableRecognizer};

use crate::driver::state::LexerContext;
use crate::stream::CharStream;
use crate::tokens::TokenType;
use crate::utils::Position;
use thiserror::Error;

/// Failures raised while matching one token candidate
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecognitionError {
    /// No rule matched at the cursor. The engine may have consumed part
    /// of the failed candidate before returning this.
    #[error("no viable alternative at index {start_index}")]
    NoViableAlternative { start_index: usize },

    /// A rule action or predicate failed mid-match
    #[error("recognition failed: {message}")]
    General { message: String },

    /// A pop was requested with no suspended mode to restore
    #[error("mode stack is empty")]
    EmptyModeStack,
}

/// A token matcher the driver can run one candidate at a time.
///
/// The engine owns line and column tracking for the raw input; the driver
/// reads the position before and after each match to build token spans.
pub trait Recognizer {
    /// Match one token candidate at the input cursor in the given mode.
    ///
    /// On success the matched characters are consumed and the resolved
    /// type is returned; actions may have mutated `ctx` along the way.
    /// At end of input with nothing consumed the engine returns the EOF
    /// type. On [`RecognitionError::NoViableAlternative`] the cursor stays
    /// wherever matching stopped, possibly partway into the candidate.
    fn match_token(
        &mut self,
        input: &mut dyn CharStream,
        mode: usize,
        ctx: &mut LexerContext<'_>,
    ) -> Result<TokenType, RecognitionError>;

    /// Current raw input position (offset, line, column)
    fn position(&self) -> Position;

    fn set_position(&mut self, position: Position);

    /// Consume one raw character, keeping position tracking in step.
    /// Does nothing at end of input.
    fn consume(&mut self, input: &mut dyn CharStream);

    /// Forget all match state and return the position to the origin
    fn reset(&mut self);
}
