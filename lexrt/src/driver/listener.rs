//! Listener seam for token recognition errors

use crate::utils::Span;
use std::sync::{Arc, Mutex};

/// A reported recognition failure
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError {
    pub source_name: String,
    pub span: Span,
    pub message: String,
}

/// Receives one notification per recovered recognition error
pub trait ErrorListener {
    fn syntax_error(&mut self, source_name: &str, span: Span, message: &str);
}

/// Listener printing errors to stderr in `line:column` form
#[derive(Debug, Default)]
pub struct ConsoleErrorListener;

impl ErrorListener for ConsoleErrorListener {
    fn syntax_error(&mut self, _source_name: &str, span: Span, message: &str) {
        eprintln!(
            "line {}:{} {}",
            span.start().line,
            span.start().column,
            message
        );
    }
}

/// Listener accumulating errors behind a shared handle.
///
/// The listener itself is owned by the driver; keep the [`SyntaxErrors`]
/// handle to inspect what was reported.
#[derive(Debug, Default)]
pub struct CollectingErrorListener {
    errors: Arc<Mutex<Vec<SyntaxError>>>,
}

impl CollectingErrorListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared view of the collected errors
    pub fn handle(&self) -> SyntaxErrors {
        SyntaxErrors {
            errors: Arc::clone(&self.errors),
        }
    }
}

impl ErrorListener for CollectingErrorListener {
    fn syntax_error(&mut self, source_name: &str, span: Span, message: &str) {
        self.errors.lock().unwrap().push(SyntaxError {
            source_name: source_name.to_string(),
            span,
            message: message.to_string(),
        });
    }
}

/// Read side of a [`CollectingErrorListener`]
#[derive(Debug, Clone)]
pub struct SyntaxErrors {
    errors: Arc<Mutex<Vec<SyntaxError>>>,
}

impl SyntaxErrors {
    pub fn all(&self) -> Vec<SyntaxError> {
        self.errors.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.errors.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.lock().unwrap().is_empty()
    }
}
