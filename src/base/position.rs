//! Position tracking for script diagnostics
//!
//! Converts the byte ranges carried by tokens, AST nodes and parse errors into
//! line/column coordinates so a caller can highlight the offending substring.

use text_size::{TextRange, TextSize};

/// A span representing a range in a script (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// A position in a script (0-indexed, columns counted in chars)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a span from line/column coordinates
    pub fn from_coords(
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    ) -> Self {
        Self {
            start: Position::new(start_line, start_col),
            end: Position::new(end_line, end_col),
        }
    }

    /// Convert a byte range of `text` into a line/column span
    pub fn of_range(text: &str, range: TextRange) -> Self {
        Self {
            start: Position::of_offset(text, range.start()),
            end: Position::of_offset(text, range.end()),
        }
    }

    /// Check if a position falls within this span
    pub fn contains(&self, position: Position) -> bool {
        if position.line < self.start.line || position.line > self.end.line {
            return false;
        }
        if position.line == self.start.line && position.column < self.start.column {
            return false;
        }
        if position.line == self.end.line && position.column > self.end.column {
            return false;
        }
        true
    }
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Locate a byte offset in `text`. Offsets past the end clamp to the end.
    pub fn of_offset(text: &str, offset: TextSize) -> Self {
        let offset = usize::from(offset).min(text.len());
        let mut line = 0;
        let mut line_start = 0;
        for (index, ch) in text.char_indices() {
            if index >= offset {
                break;
            }
            if ch == '\n' {
                line += 1;
                line_start = index + 1;
            }
        }
        let column = text
            .get(line_start..offset)
            .map(|s| s.chars().count())
            .unwrap_or(0);
        Self { line, column }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_on_first_line() {
        assert_eq!(Position::of_offset("R U F", TextSize::new(2)), Position::new(0, 2));
    }

    #[test]
    fn test_offset_after_newline() {
        let text = "R U\nF' D";
        assert_eq!(Position::of_offset(text, TextSize::new(4)), Position::new(1, 0));
        assert_eq!(Position::of_offset(text, TextSize::new(6)), Position::new(1, 2));
    }

    #[test]
    fn test_offset_past_end_clamps() {
        assert_eq!(Position::of_offset("R", TextSize::new(10)), Position::new(0, 1));
    }

    #[test]
    fn test_span_of_range_contains() {
        let text = "R U\n[R,";
        let span = Span::of_range(text, TextRange::new(TextSize::new(4), TextSize::new(7)));
        assert_eq!(span, Span::from_coords(1, 0, 1, 3));
        assert!(span.contains(Position::new(1, 2)));
        assert!(!span.contains(Position::new(0, 2)));
    }
}
