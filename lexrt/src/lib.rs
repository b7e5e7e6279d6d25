//! Lexer runtime driving a pluggable recognition engine
//!
//! The crate splits tokenization into a driver and an engine. The driver
//! ([`Lexer`]) owns the input cursor, the mode stack, and the pending
//! candidate, runs the engine one token at a time, interprets the skip,
//! more, and end of file sentinels, and recovers from recognition errors
//! so it always makes forward progress. Engines implement [`Recognizer`];
//! a table-driven one is bundled for grammars expressible as ordered
//! pattern lists.
//!
//! ```no_run
//! use lexrt::recognizer::{Pattern, Rule, TableRecognizer};
//! use lexrt::{Lexer, StringCharStream};
//!
//! let rules = vec![vec![
//!     Rule::emit(Pattern::OneOrMore(char::is_alphabetic), 1),
//!     Rule::skipping(Pattern::OneOrMore(char::is_whitespace)),
//! ]];
//! let mut lexer = Lexer::new(
//!     Box::new(StringCharStream::new("alpha beta")),
//!     TableRecognizer::new(rules),
//! );
//! let tokens = lexer.all_tokens().unwrap();
//! assert_eq!(tokens.len(), 2);
//! ```

pub mod config;
pub mod driver;
#[macro_use]
pub mod logging;
pub mod recognizer;
pub mod stream;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use driver::{
    CollectingErrorListener, ConsoleErrorListener, ErrorListener, Lexer, LexerContext, LexerError,
};
pub use recognizer::{RecognitionError, Recognizer, TableRecognizer};
pub use stream::{CharStream, StringCharStream};
pub use tokens::{CommonTokenFactory, Token, TokenFactory, TokenStream, TokenType};
pub use utils::{Position, Span};
