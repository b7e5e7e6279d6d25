//! Random access character cursor consumed by the recognition engine

use crate::logging::codes::{self, Code};
use std::ops::Range;
use thiserror::Error;

/// Errors raised by stream cursor operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StreamError {
    #[error("cannot seek to index {requested} past end of stream (size {size})")]
    InvalidSeek { requested: usize, size: usize },

    #[error("release of marker {marker} does not match outstanding marker {expected}")]
    UnbalancedRelease { marker: isize, expected: isize },

    #[error("cannot consume past end of stream at index {index}")]
    ConsumePastEnd { index: usize },
}

impl StreamError {
    /// Stable code for logging and classification
    pub fn error_code(&self) -> Code {
        match self {
            StreamError::InvalidSeek { .. } | StreamError::ConsumePastEnd { .. } => {
                codes::stream::INVALID_SEEK
            }
            StreamError::UnbalancedRelease { .. } => codes::stream::UNBALANCED_RELEASE,
        }
    }
}

/// Random access stream of characters with rewind markers.
///
/// Indices count characters, not bytes. `la(1)` is the character at the
/// cursor, `la(k)` looks ahead without consuming, and `None` means the
/// cursor (or lookahead target) is at or past end of input. Markers taken
/// with `mark` must be released in reverse order of acquisition.
pub trait CharStream {
    /// Current cursor index, in characters
    fn index(&self) -> usize;

    /// Total number of characters in the stream
    fn size(&self) -> usize;

    /// Move the cursor to an absolute character index
    fn seek(&mut self, index: usize) -> Result<(), StreamError>;

    /// Advance the cursor by one character
    fn consume(&mut self) -> Result<(), StreamError>;

    /// Look ahead `k` characters without consuming. `k` must be >= 1.
    fn la(&self, k: usize) -> Option<char>;

    /// Acquire a rewind marker protecting buffered content
    fn mark(&mut self) -> isize;

    /// Release a previously acquired marker
    fn release(&mut self, marker: isize) -> Result<(), StreamError>;

    /// Name of the underlying source, for diagnostics
    fn source_name(&self) -> &str;

    /// Text of a half-open character index range
    fn text(&self, range: Range<usize>) -> String;
}
