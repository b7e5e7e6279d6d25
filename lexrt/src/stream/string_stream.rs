//! In-memory character stream backed by a decoded string

use super::char_stream::{CharStream, StreamError};
use std::ops::Range;

const UNKNOWN_SOURCE_NAME: &str = "<unknown>";

/// Character stream over a fully buffered string.
///
/// The whole input is decoded up front, so markers are bookkeeping only.
/// They are still tracked and checked so driver code that must keep
/// mark/release balanced can be exercised against this stream.
pub struct StringCharStream {
    chars: Vec<char>,
    cursor: usize,
    source_name: String,
    /// Outstanding markers, innermost last
    markers: Vec<isize>,
    next_marker: isize,
}

impl StringCharStream {
    pub fn new(input: impl Into<String>) -> Self {
        Self::with_source_name(input, UNKNOWN_SOURCE_NAME)
    }

    pub fn with_source_name(input: impl Into<String>, source_name: impl Into<String>) -> Self {
        Self {
            chars: input.into().chars().collect(),
            cursor: 0,
            source_name: source_name.into(),
            markers: Vec::new(),
            next_marker: 1,
        }
    }

    /// Number of markers currently outstanding
    pub fn outstanding_markers(&self) -> usize {
        self.markers.len()
    }
}

impl CharStream for StringCharStream {
    fn index(&self) -> usize {
        self.cursor
    }

    fn size(&self) -> usize {
        self.chars.len()
    }

    fn seek(&mut self, index: usize) -> Result<(), StreamError> {
        if index > self.chars.len() {
            return Err(StreamError::InvalidSeek {
                requested: index,
                size: self.chars.len(),
            });
        }
        self.cursor = index;
        Ok(())
    }

    fn consume(&mut self) -> Result<(), StreamError> {
        if self.cursor >= self.chars.len() {
            return Err(StreamError::ConsumePastEnd { index: self.cursor });
        }
        self.cursor += 1;
        Ok(())
    }

    fn la(&self, k: usize) -> Option<char> {
        debug_assert!(k >= 1, "lookahead distance must be at least 1");
        self.chars.get(self.cursor + k - 1).copied()
    }

    fn mark(&mut self) -> isize {
        let marker = self.next_marker;
        self.next_marker += 1;
        self.markers.push(marker);
        marker
    }

    fn release(&mut self, marker: isize) -> Result<(), StreamError> {
        match self.markers.last().copied() {
            Some(expected) if expected == marker => {
                self.markers.pop();
                Ok(())
            }
            Some(expected) => Err(StreamError::UnbalancedRelease { marker, expected }),
            None => Err(StreamError::UnbalancedRelease {
                marker,
                expected: 0,
            }),
        }
    }

    fn source_name(&self) -> &str {
        &self.source_name
    }

    fn text(&self, range: Range<usize>) -> String {
        let start = range.start.min(self.chars.len());
        let end = range.end.min(self.chars.len());
        if start >= end {
            return String::new();
        }
        self.chars[start..end].iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_lookahead_and_consume() {
        let mut stream = StringCharStream::new("ab");

        assert_eq!(stream.la(1), Some('a'));
        assert_eq!(stream.la(2), Some('b'));
        assert_eq!(stream.la(3), None);

        stream.consume().unwrap();
        assert_eq!(stream.index(), 1);
        assert_eq!(stream.la(1), Some('b'));

        stream.consume().unwrap();
        assert_eq!(stream.la(1), None);
        assert_matches!(stream.consume(), Err(StreamError::ConsumePastEnd { index: 2 }));
    }

    #[test]
    fn test_multibyte_characters_count_as_one() {
        let mut stream = StringCharStream::new("héλ");

        assert_eq!(stream.size(), 3);
        assert_eq!(stream.la(2), Some('é'));
        stream.consume().unwrap();
        stream.consume().unwrap();
        assert_eq!(stream.la(1), Some('λ'));
        assert_eq!(stream.text(0..3), "héλ");
    }

    #[test]
    fn test_seek_bounds() {
        let mut stream = StringCharStream::new("xyz");

        stream.seek(3).unwrap();
        assert_eq!(stream.la(1), None);
        assert_matches!(
            stream.seek(4),
            Err(StreamError::InvalidSeek { requested: 4, size: 3 })
        );
    }

    #[test]
    fn test_marker_balance() {
        let mut stream = StringCharStream::new("abc");

        let outer = stream.mark();
        let inner = stream.mark();
        assert_eq!(stream.outstanding_markers(), 2);

        // Out of order release is rejected
        assert_matches!(
            stream.release(outer),
            Err(StreamError::UnbalancedRelease { .. })
        );

        stream.release(inner).unwrap();
        stream.release(outer).unwrap();
        assert_eq!(stream.outstanding_markers(), 0);
    }

    #[test]
    fn test_text_clamps_range() {
        let stream = StringCharStream::new("hello");

        assert_eq!(stream.text(1..4), "ell");
        assert_eq!(stream.text(3..99), "lo");
        assert_eq!(stream.text(4..2), "");
    }

    #[test]
    fn test_source_name() {
        let stream = StringCharStream::with_source_name("x", "input.esp");
        assert_eq!(stream.source_name(), "input.esp");

        let anonymous = StringCharStream::new("x");
        assert_eq!(anonymous.source_name(), "<unknown>");
    }
}
