//! Source span tracking for tokens and error reporting.

use serde::{Deserialize, Serialize};

/// Represents a position in the source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed, counted in characters)
    pub column: usize,
    /// Byte offset from the start of the source
    pub offset: usize,
}

impl Position {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

/// Represents a span in the source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start position
    pub start: Position,
    /// End position
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Span covering a whole line whose text starts at `offset`.
    pub fn line(line: usize, offset: usize, text: &str) -> Self {
        Self {
            start: Position::new(line, 1, offset),
            end: Position::new(line, text.chars().count() + 1, offset + text.len()),
        }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        (span.start.offset, span.len()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_span_counts_characters() {
        let span = Span::line(3, 10, "shout \"héllo\"");
        assert_eq!(span.start.line, 3);
        assert_eq!(span.start.column, 1);
        assert_eq!(span.end.column, 14);
        assert_eq!(span.len(), 14);
    }

    #[test]
    fn test_into_source_span() {
        let span = Span::line(1, 4, "foo bar");
        let source_span: miette::SourceSpan = span.into();
        assert_eq!(source_span.offset(), 4);
        assert_eq!(source_span.len(), 7);
    }
}
