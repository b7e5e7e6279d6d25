//! Table-driven recognition engine
//!
//! One rule table per mode. Rules are tried in order and the first pattern
//! that matches at the cursor wins, so more specific rules go first. This
//! is the bundled engine for grammars simple enough to express as ordered
//! pattern lists; anything richer plugs in through the [`Recognizer`]
//! trait instead.

use super::{RecognitionError, Recognizer};
use crate::driver::state::LexerContext;
use crate::log_debug;
use crate::stream::CharStream;
use crate::tokens::token::{TokenType, DEFAULT_CHANNEL, EOF};
use crate::utils::Position;

/// Character predicate used by class patterns
pub type CharPredicate = fn(char) -> bool;

/// What a rule matches at the cursor
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Exact character sequence
    Literal(String),
    /// Single character satisfying the predicate
    Char(CharPredicate),
    /// Longest run of one or more characters satisfying the predicate
    OneOrMore(CharPredicate),
}

impl Pattern {
    /// Number of characters matched at the cursor, zero if none
    fn match_len(&self, input: &dyn CharStream) -> usize {
        match self {
            Pattern::Literal(literal) => {
                for (k, expected) in literal.chars().enumerate() {
                    if input.la(k + 1) != Some(expected) {
                        return 0;
                    }
                }
                literal.chars().count()
            }
            Pattern::Char(predicate) => match input.la(1) {
                Some(ch) if predicate(ch) => 1,
                _ => 0,
            },
            Pattern::OneOrMore(predicate) => {
                let mut len = 0;
                while let Some(ch) = input.la(len + 1) {
                    if !predicate(ch) {
                        break;
                    }
                    len += 1;
                }
                len
            }
        }
    }
}

/// What to do with the matched text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleAction {
    /// Resolve to a token of the rule's type
    Emit,
    /// Discard the text and keep scanning
    Skip,
    /// Fold the text into the next candidate
    More,
}

/// Mode transition performed after a rule matches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChange {
    None,
    /// Suspend the current mode and enter this one
    Push(usize),
    /// Restore the most recently suspended mode
    Pop,
    /// Replace the current mode in place
    Set(usize),
}

/// One entry in a mode's rule table
#[derive(Debug, Clone)]
pub struct Rule {
    pub pattern: Pattern,
    pub token_type: TokenType,
    pub channel: usize,
    pub action: RuleAction,
    pub mode_change: ModeChange,
}

impl Rule {
    /// Rule emitting a token of the given type
    pub fn emit(pattern: Pattern, token_type: TokenType) -> Self {
        Self {
            pattern,
            token_type,
            channel: DEFAULT_CHANNEL,
            action: RuleAction::Emit,
            mode_change: ModeChange::None,
        }
    }

    /// Rule discarding its match
    pub fn skipping(pattern: Pattern) -> Self {
        Self {
            pattern,
            token_type: crate::tokens::token::SKIP,
            channel: DEFAULT_CHANNEL,
            action: RuleAction::Skip,
            mode_change: ModeChange::None,
        }
    }

    /// Rule folding its match into the next candidate
    pub fn more(pattern: Pattern) -> Self {
        Self {
            pattern,
            token_type: crate::tokens::token::MORE,
            channel: DEFAULT_CHANNEL,
            action: RuleAction::More,
            mode_change: ModeChange::None,
        }
    }

    pub fn on_channel(mut self, channel: usize) -> Self {
        self.channel = channel;
        self
    }

    pub fn pushing_mode(mut self, mode: usize) -> Self {
        self.mode_change = ModeChange::Push(mode);
        self
    }

    pub fn popping_mode(mut self) -> Self {
        self.mode_change = ModeChange::Pop;
        self
    }

    pub fn setting_mode(mut self, mode: usize) -> Self {
        self.mode_change = ModeChange::Set(mode);
        self
    }
}

/// Ordered-rule engine over per-mode tables
pub struct TableRecognizer {
    /// Rule table per mode, indexed by mode number
    tables: Vec<Vec<Rule>>,
    position: Position,
}

impl TableRecognizer {
    pub fn new(tables: Vec<Vec<Rule>>) -> Self {
        Self {
            tables,
            position: Position::start(),
        }
    }

    pub fn mode_count(&self) -> usize {
        self.tables.len()
    }
}

impl Recognizer for TableRecognizer {
    fn match_token(
        &mut self,
        input: &mut dyn CharStream,
        mode: usize,
        ctx: &mut LexerContext<'_>,
    ) -> Result<TokenType, RecognitionError> {
        if input.la(1).is_none() {
            return Ok(EOF);
        }

        let rules = self.tables.get(mode).ok_or_else(|| RecognitionError::General {
            message: format!("no rule table for mode {}", mode),
        })?;

        let matched = rules
            .iter()
            .map(|rule| (rule, rule.pattern.match_len(input)))
            .find(|&(_, len)| len > 0);

        let Some((rule, len)) = matched else {
            // Nothing consumed yet, so the cursor is still at candidate start
            return Err(RecognitionError::NoViableAlternative {
                start_index: input.index(),
            });
        };
        let rule = rule.clone();

        for _ in 0..len {
            self.consume(input);
        }

        match rule.action {
            RuleAction::Emit => ctx.set_type(rule.token_type),
            RuleAction::Skip => ctx.skip(),
            RuleAction::More => ctx.more(),
        }
        ctx.set_channel(rule.channel);

        match rule.mode_change {
            ModeChange::None => {}
            ModeChange::Push(mode) => {
                log_debug!("Entering pushed mode", "mode" => mode);
                ctx.push_mode(mode);
            }
            ModeChange::Pop => {
                ctx.pop_mode()?;
            }
            ModeChange::Set(mode) => ctx.set_mode(mode),
        }

        Ok(ctx.state.token_type)
    }

    fn position(&self) -> Position {
        self.position
    }

    fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    fn consume(&mut self, input: &mut dyn CharStream) {
        if let Some(ch) = input.la(1) {
            self.position = self.position.advance(ch);
            // la(1) returned a char, so the cursor is in bounds
            let _ = input.consume();
        }
    }

    fn reset(&mut self) {
        self.position = Position::start();
    }
}
