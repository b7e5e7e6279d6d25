//! Driver loop, candidate state, modes, and error listeners

pub mod lexer;
pub mod listener;
pub mod mode;
pub mod state;

pub use lexer::{DriverMetrics, Lexer, LexerError};
pub use listener::{
    CollectingErrorListener, ConsoleErrorListener, ErrorListener, SyntaxError, SyntaxErrors,
};
pub use mode::{ModeStack, DEFAULT_MODE};
pub use state::{LexerContext, TokenState};
