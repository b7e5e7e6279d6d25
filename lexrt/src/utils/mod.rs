//! Shared primitive types for the lexrt runtime
//!
//! Source-location primitives used by the driver, the token types, and the
//! logging layer.

pub mod span;

pub use span::{Position, Span, Spanned};
