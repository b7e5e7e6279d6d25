//! Lexer mode tracking with a push/pop stack

use crate::config::constants::compile_time::driver::MODE_DEPTH_WARNING;
use crate::log_warning;
use serde::{Deserialize, Serialize};

/// Mode every lexer starts in
pub const DEFAULT_MODE: usize = 0;

/// Current mode plus the stack of suspended modes.
///
/// `push` suspends the current mode and enters a new one; `pop` restores
/// the most recently suspended mode. Popping with nothing suspended is the
/// caller's error to surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeStack {
    current: usize,
    suspended: Vec<usize>,
}

impl ModeStack {
    pub fn new() -> Self {
        Self {
            current: DEFAULT_MODE,
            suspended: Vec::new(),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Replace the current mode without touching the stack
    pub fn set(&mut self, mode: usize) {
        self.current = mode;
    }

    /// Suspend the current mode and enter `mode`
    pub fn push(&mut self, mode: usize) {
        self.suspended.push(self.current);
        self.current = mode;

        if self.suspended.len() >= MODE_DEPTH_WARNING {
            log_warning!("Mode stack unusually deep",
                "depth" => self.suspended.len(),
                "mode" => mode
            );
        }
    }

    /// Restore the most recently suspended mode, returning the restored mode
    pub fn pop(&mut self) -> Option<usize> {
        let restored = self.suspended.pop()?;
        self.current = restored;
        Some(restored)
    }

    pub fn depth(&self) -> usize {
        self.suspended.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suspended.is_empty()
    }

    /// Back to the default mode with nothing suspended
    pub fn reset(&mut self) {
        self.current = DEFAULT_MODE;
        self.suspended.clear();
    }
}

impl Default for ModeStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_restores_previous_mode() {
        let mut modes = ModeStack::new();
        assert_eq!(modes.current(), DEFAULT_MODE);

        modes.push(2);
        assert_eq!(modes.current(), 2);
        assert_eq!(modes.depth(), 1);

        modes.push(5);
        assert_eq!(modes.current(), 5);

        assert_eq!(modes.pop(), Some(2));
        assert_eq!(modes.current(), 2);
        assert_eq!(modes.pop(), Some(DEFAULT_MODE));
        assert_eq!(modes.current(), DEFAULT_MODE);
    }

    #[test]
    fn test_pop_empty_returns_none() {
        let mut modes = ModeStack::new();
        assert_eq!(modes.pop(), None);
        // Current mode is untouched by a failed pop
        assert_eq!(modes.current(), DEFAULT_MODE);
    }

    #[test]
    fn test_set_does_not_grow_stack() {
        let mut modes = ModeStack::new();
        modes.set(3);
        assert_eq!(modes.current(), 3);
        assert!(modes.is_empty());
    }

    #[test]
    fn test_reset() {
        let mut modes = ModeStack::new();
        modes.push(1);
        modes.push(2);
        modes.reset();
        assert_eq!(modes.current(), DEFAULT_MODE);
        assert!(modes.is_empty());
    }
}
