//! The token-producing driver loop
//!
//! The driver owns the input cursor, the mode stack, and the pending
//! candidate state, and runs the recognition engine one candidate at a
//! time. Control sentinels returned by the engine (skip, more, end of
//! file) never escape as token types except the end of file latch, which
//! makes the final token and every call after it return an equal token.

use super::listener::ErrorListener;
use super::mode::ModeStack;
use super::state::{LexerContext, TokenState};
use crate::config::constants::compile_time::driver::{
    MAX_LISTENER_COUNT, MAX_TOKEN_COUNT, MAX_TOKEN_TEXT_LENGTH,
};
use crate::config::runtime::DriverPreferences;
use crate::logging::codes;
use crate::recognizer::{RecognitionError, Recognizer};
use crate::stream::{CharStream, StreamError};
use crate::tokens::factory::TokenBlueprint;
use crate::tokens::token::{escape_for_display, INVALID_TYPE, MORE, SKIP};
use crate::tokens::{
    CommonTokenFactory, Token, TokenFactory, TokenProvenance, TokenStream, TokenType,
};
use crate::utils::{Position, Span};
use crate::{log_debug, log_error, log_success, log_warning};
use thiserror::Error;

/// Failures surfaced by driver operations
#[derive(Debug, Error)]
pub enum LexerError {
    /// A pop was requested with no suspended mode to restore
    #[error("mode stack is empty")]
    EmptyModeStack,

    /// Bulk tokenization hit the configured token cap
    #[error("token limit {limit} exceeded while buffering tokens")]
    TokenLimitExceeded { limit: usize },

    #[error(transparent)]
    Stream(#[from] StreamError),
}

impl LexerError {
    /// Stable code for logging and classification
    pub fn error_code(&self) -> codes::Code {
        match self {
            LexerError::EmptyModeStack => codes::driver::MODE_STACK_UNDERFLOW,
            LexerError::TokenLimitExceeded { .. } => codes::driver::TOKEN_LIMIT_EXCEEDED,
            LexerError::Stream(inner) => inner.error_code(),
        }
    }
}

/// Counters describing one tokenization run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverMetrics {
    pub tokens_emitted: usize,
    pub candidates_skipped: usize,
    pub errors_recovered: usize,
    pub max_mode_depth: usize,
}

/// Lexer driver running a recognition engine over a character stream
pub struct Lexer<R: Recognizer> {
    input: Box<dyn CharStream>,
    recognizer: R,
    factory: Box<dyn TokenFactory>,
    modes: ModeStack,
    state: TokenState,
    /// Token built for the current candidate, or the cached final token
    token: Option<Token>,
    hit_eof: bool,
    provenance: TokenProvenance,
    generation: u64,
    listeners: Vec<Box<dyn ErrorListener>>,
    preferences: DriverPreferences,
    metrics: DriverMetrics,
}

impl<R: Recognizer> Lexer<R> {
    pub fn new(input: Box<dyn CharStream>, recognizer: R) -> Self {
        Self::with_factory(input, recognizer, Box::new(CommonTokenFactory::new()))
    }

    pub fn with_factory(
        input: Box<dyn CharStream>,
        recognizer: R,
        factory: Box<dyn TokenFactory>,
    ) -> Self {
        let generation = 1;
        let provenance = TokenProvenance::new(input.source_name(), generation);
        Self {
            input,
            recognizer,
            factory,
            modes: ModeStack::new(),
            state: TokenState::begin(0, Position::start()),
            token: None,
            hit_eof: false,
            provenance,
            generation,
            listeners: Vec::new(),
            preferences: DriverPreferences::default(),
            metrics: DriverMetrics::default(),
        }
    }

    pub fn with_preferences(mut self, preferences: DriverPreferences) -> Self {
        self.preferences = preferences;
        self
    }

    /// Produce the next token, recovering from recognition errors.
    ///
    /// After the end of input is reached every call returns a token equal
    /// to the first end of file token.
    pub fn next_token(&mut self) -> Result<Token, LexerError> {
        // Keep buffered input alive for the whole candidate
        let marker = self.input.mark();
        let result = self.token_loop();
        let released = self.input.release(marker);
        let token = result?;
        released?;
        Ok(token)
    }

    fn token_loop(&mut self) -> Result<Token, LexerError> {
        'outer: loop {
            if self.hit_eof {
                return Ok(self.emit_eof());
            }

            self.token = None;
            let start_index = self.input.index();
            let start_position = self.recognizer.position();
            self.state = TokenState::begin(start_index, start_position);

            loop {
                self.state.token_type = INVALID_TYPE;
                let mode = self.modes.current();

                let match_result = {
                    let mut ctx = LexerContext {
                        state: &mut self.state,
                        modes: &mut self.modes,
                        emitted: &mut self.token,
                    };
                    self.recognizer.match_token(&mut *self.input, mode, &mut ctx)
                };

                let resolved = match match_result {
                    Ok(token_type) => token_type,
                    Err(RecognitionError::NoViableAlternative { .. }) => {
                        self.notify_listeners();
                        self.recover_one_char();
                        SKIP
                    }
                    Err(RecognitionError::General { message }) => {
                        self.recover_raw(&message);
                        SKIP
                    }
                    Err(RecognitionError::EmptyModeStack) => {
                        log_error!(
                            codes::driver::MODE_STACK_UNDERFLOW,
                            "Mode pop with no suspended mode",
                            span = Span::single(self.state.start_position)
                        );
                        return Err(LexerError::EmptyModeStack);
                    }
                };

                if self.input.la(1).is_none() {
                    self.hit_eof = true;
                }
                if self.state.token_type == INVALID_TYPE {
                    self.state.token_type = resolved;
                }
                if self.state.token_type == SKIP {
                    self.metrics.candidates_skipped += 1;
                    continue 'outer;
                }
                if self.state.token_type != MORE {
                    break;
                }
            }

            // An engine-resolved EOF takes the latch path so the final
            // token is always built the same way
            if self.state.token_type == crate::tokens::token::EOF {
                self.hit_eof = true;
                continue 'outer;
            }

            if self.preferences.track_mode_transitions {
                self.metrics.max_mode_depth = self.metrics.max_mode_depth.max(self.modes.depth());
            }

            let token = match self.token.clone() {
                Some(token) => token,
                None => self.emit(),
            };
            self.metrics.tokens_emitted += 1;
            return Ok(token);
        }
    }

    /// Build a token from the pending candidate and park it in the slot
    fn emit(&mut self) -> Token {
        let end_position = self.recognizer.position();
        let span = Span::new(self.state.start_position, end_position);
        let mut source_text = self.input.text(self.state.start_index..self.input.index());

        if source_text.chars().count() > MAX_TOKEN_TEXT_LENGTH {
            log_error!(
                codes::driver::TEXT_TOO_LARGE,
                "Token text exceeds configured maximum",
                span = span,
                "length" => source_text.chars().count(),
                "limit" => MAX_TOKEN_TEXT_LENGTH
            );
            source_text = source_text.chars().take(MAX_TOKEN_TEXT_LENGTH).collect();
        }

        let token = self.factory.create(TokenBlueprint {
            token_type: self.state.token_type,
            channel: self.state.channel,
            span,
            provenance: self.provenance.clone(),
            source_text,
            override_text: self.state.text_override.take(),
        });
        self.token = Some(token.clone());
        token
    }

    /// Build the end of file token.
    ///
    /// Its column continues the previous token when one was just emitted,
    /// and falls back to the engine's raw position after trailing skipped
    /// content. The built token is cached so repeated calls return equal
    /// tokens.
    fn emit_eof(&mut self) -> Token {
        if let Some(cached) = &self.token {
            if cached.is_eof() {
                return cached.clone();
            }
        }

        // The line always tracks the engine; only the column follows the
        // previous token when one exists.
        let raw = self.recognizer.position();
        let column = match &self.token {
            Some(previous) => previous.column() + previous.span.len() as u32,
            None => raw.column,
        };
        let position = Position::new(self.input.index(), raw.line, column);

        // The end of file token covers no characters
        let token = self.factory.create(TokenBlueprint::end_of_file(
            Span::new(position, position),
            self.provenance.clone(),
        ));
        self.token = Some(token.clone());
        token
    }

    /// Tell every listener about the unmatched input at the candidate start
    fn notify_listeners(&mut self) {
        // Covers text folded in by earlier more-candidates as well
        let start_index = self.state.start_index;
        // Inclusive of the character the match failed on
        let end = (self.input.index() + 1)
            .max(start_index + 1)
            .min(self.input.size());
        let offending = self.input.text(start_index..end);
        let message = format!(
            "token recognition error at: '{}'",
            error_display(&offending)
        );

        let span = if self.preferences.include_position_in_errors {
            Span::single(self.state.start_position)
        } else {
            Span::dummy()
        };

        log_error!(
            codes::driver::TOKEN_RECOGNITION_ERROR,
            &message,
            span = span,
            "source" => self.input.source_name()
        );

        let source_name = self.input.source_name().to_string();
        for listener in &mut self.listeners {
            listener.syntax_error(&source_name, span, &message);
        }
    }

    /// Advance one character through the engine so position tracking
    /// stays in step
    fn recover_one_char(&mut self) {
        self.metrics.errors_recovered += 1;
        if self.preferences.log_recovery_events {
            log_debug!("Recovering by consuming one character",
                "index" => self.input.index()
            );
        }
        if self.input.la(1).is_some() {
            self.recognizer.consume(&mut *self.input);
        }
    }

    /// Advance the raw cursor past an engine failure without notifying
    fn recover_raw(&mut self, message: &str) {
        self.metrics.errors_recovered += 1;
        if self.preferences.log_recovery_events {
            log_debug!("Recovering from engine failure",
                "detail" => message,
                "index" => self.input.index()
            );
        }
        if self.input.la(1).is_some() {
            // Position tracking is not advanced on this path
            let _ = self.input.consume();
        }
    }

    /// Tokenize the rest of the input, excluding the end of file token
    pub fn all_tokens(&mut self) -> Result<Vec<Token>, LexerError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            if token.is_eof() {
                break;
            }
            if tokens.len() >= MAX_TOKEN_COUNT {
                log_error!(
                    codes::driver::TOKEN_LIMIT_EXCEEDED,
                    "Tokenization aborted at configured token cap",
                    "limit" => MAX_TOKEN_COUNT
                );
                return Err(LexerError::TokenLimitExceeded {
                    limit: MAX_TOKEN_COUNT,
                });
            }
            tokens.push(token);
        }

        log_success!(
            codes::success::TOKENIZATION_COMPLETE,
            "Input fully tokenized",
            "tokens" => tokens.len(),
            "source" => self.input.source_name()
        );
        Ok(tokens)
    }

    /// Tokenize the rest of the input into a navigable stream, end of
    /// file token included
    pub fn token_stream(&mut self) -> Result<TokenStream, LexerError> {
        let mut tokens = self.all_tokens()?;
        tokens.push(self.next_token()?);
        Ok(TokenStream::new(tokens))
    }

    /// Rewind to the start of the current input and clear all match state
    pub fn reset(&mut self) -> Result<(), LexerError> {
        self.input.seek(0)?;
        self.recognizer.reset();
        self.modes.reset();
        self.state = TokenState::begin(0, Position::start());
        self.token = None;
        self.hit_eof = false;
        self.metrics = DriverMetrics::default();
        Ok(())
    }

    /// Rebind the driver to a new input, recreating token provenance
    pub fn set_input_stream(&mut self, input: Box<dyn CharStream>) -> Result<(), LexerError> {
        self.generation += 1;
        self.provenance = TokenProvenance::new(input.source_name(), self.generation);
        self.input = input;
        self.reset()
    }

    // Mode operations mirror the engine-visible ones for embedding code

    pub fn mode(&self) -> usize {
        self.modes.current()
    }

    pub fn set_mode(&mut self, mode: usize) {
        self.modes.set(mode);
    }

    pub fn push_mode(&mut self, mode: usize) {
        self.modes.push(mode);
    }

    pub fn pop_mode(&mut self) -> Result<usize, LexerError> {
        self.modes.pop().ok_or(LexerError::EmptyModeStack)
    }

    pub fn mode_depth(&self) -> usize {
        self.modes.depth()
    }

    /// Discard the current candidate
    pub fn skip(&mut self) {
        self.state.token_type = SKIP;
    }

    /// Fold the current candidate into the next one
    pub fn more(&mut self) {
        self.state.token_type = MORE;
    }

    pub fn add_listener(&mut self, listener: Box<dyn ErrorListener>) {
        if self.listeners.len() >= MAX_LISTENER_COUNT {
            log_warning!("Listener cap reached, ignoring additional listener",
                "limit" => MAX_LISTENER_COUNT
            );
            return;
        }
        self.listeners.push(listener);
    }

    pub fn remove_listeners(&mut self) {
        self.listeners.clear();
    }

    /// Line at the raw cursor, 1-based
    pub fn line(&self) -> u32 {
        self.recognizer.position().line
    }

    /// Column at the raw cursor, 0-based
    pub fn column(&self) -> u32 {
        self.recognizer.position().column
    }

    /// Override the engine's line tracking
    pub fn set_line(&mut self, line: u32) {
        let position = self.recognizer.position();
        self.recognizer
            .set_position(Position::new(position.offset, line, position.column));
    }

    /// Override the engine's column tracking
    pub fn set_column(&mut self, column: u32) {
        let position = self.recognizer.position();
        self.recognizer
            .set_position(Position::new(position.offset, position.line, column));
    }

    /// Type pending for the current candidate
    pub fn token_type(&self) -> TokenType {
        self.state.token_type
    }

    /// Channel pending for the current candidate
    pub fn channel(&self) -> usize {
        self.state.channel
    }

    /// Character index of the raw cursor
    pub fn char_index(&self) -> usize {
        self.input.index()
    }

    /// Text matched so far by the current candidate
    pub fn current_text(&self) -> String {
        if let Some(text) = &self.state.text_override {
            return text.clone();
        }
        self.input.text(self.state.start_index..self.input.index())
    }

    pub fn source_name(&self) -> &str {
        self.input.source_name()
    }

    pub fn input_stream(&self) -> &dyn CharStream {
        &*self.input
    }

    /// Most recently produced token, if any
    pub fn last_token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub fn metrics(&self) -> DriverMetrics {
        self.metrics
    }

    pub fn token_factory(&self) -> &dyn TokenFactory {
        &*self.factory
    }

    pub fn set_factory(&mut self, factory: Box<dyn TokenFactory>) {
        self.factory = factory;
    }
}

/// Escape unmatched input for a single-line error message
fn error_display(text: &str) -> String {
    if text.is_empty() {
        return "<EOF>".to_string();
    }
    escape_for_display(text)
}
