//! Character stream abstraction and the in-memory implementation

pub mod char_stream;
pub mod string_stream;

pub use char_stream::{CharStream, StreamError};
pub use string_stream::StringCharStream;
