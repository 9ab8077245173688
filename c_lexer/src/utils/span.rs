//! Source location tracking
//!
//! Positions carry a byte offset plus 1-based line and column (columns count
//! characters, not bytes). Tokens, lexical diagnostics and log events all use
//! these types so a location can be printed as `line:column`.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source text with line, column, and byte offset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Byte offset from start of input (0-based)
    pub offset: usize,
    /// Line number (1-based)
    pub line: u32,
    /// Column number (1-based)
    pub column: u32,
}

impl Position {
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Offset 0, line 1, column 1
    pub fn start() -> Self {
        Self::new(0, 1, 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open span of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start position (inclusive)
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(
            start.offset <= end.offset,
            "Span start must not be after end"
        );
        Self { start, end }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// Byte length
    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.offset >= self.start.offset && pos.offset < self.end.offset
    }

    /// The source text covered by this span
    pub fn slice<'a>(&self, input: &'a str) -> &'a str {
        &input[self.start.offset..self.end.offset]
    }

    /// Placeholder span for events with no real location
    pub fn dummy() -> Self {
        Self {
            start: Position::start(),
            end: Position::start(),
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(
                f,
                "{}:{}-{}",
                self.start.line, self.start.column, self.end.column
            )
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Line-start index over a source text for offset to line/column lookup
#[derive(Debug, Clone)]
pub struct SourceMap<'src> {
    source: &'src str,
    line_starts: Vec<usize>,
}

impl<'src> SourceMap<'src> {
    pub fn new(source: &'src str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(offset, _)| offset + 1))
            .collect();
        Self {
            source,
            line_starts,
        }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Line and column for a byte offset. `offset` must lie on a char boundary.
    pub fn position_at(&self, offset: usize) -> Position {
        let line = self
            .line_starts
            .binary_search(&offset)
            .unwrap_or_else(|i| i - 1);

        let line_start = self.line_starts[line];
        let column = self.source[line_start..offset].chars().count();

        Position::new(offset, (line + 1) as u32, (column + 1) as u32)
    }

    /// Span covering the byte range `start..end`
    pub fn span(&self, start: usize, end: usize) -> Span {
        Span::new(self.position_at(start), self.position_at(end))
    }

    /// A line of text by 1-based line number, without its line break
    pub fn get_line(&self, line_num: u32) -> Option<&'src str> {
        let line_idx = (line_num as usize).checked_sub(1)?;
        let start = *self.line_starts.get(line_idx)?;
        let end = self
            .line_starts
            .get(line_idx + 1)
            .map(|next| next - 1)
            .unwrap_or(self.source.len());

        Some(&self.source[start..end])
    }

    pub fn span_text(&self, span: &Span) -> &'src str {
        span.slice(self.source)
    }

    /// Render the line under `span` with a caret underline
    pub fn format_snippet(&self, span: &Span, message: &str) -> String {
        let mut result = format!(
            "{}\n  --> {}:{}\n",
            message, span.start.line, span.start.column
        );

        if let Some(line) = self.get_line(span.start.line) {
            let line_num = span.start.line.to_string();
            let padding = " ".repeat(line_num.len());

            let caret_count = if span.start.line == span.end.line {
                (span.end.column - span.start.column) as usize
            } else {
                line.chars().count() + 1 - span.start.column as usize
            };

            result.push_str(&format!("{} |\n", padding));
            result.push_str(&format!("{} | {}\n", line_num, line));
            result.push_str(&format!(
                "{} | {}{}\n",
                padding,
                " ".repeat(span.start.column as usize - 1),
                "^".repeat(caret_count.max(1))
            ));
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_at_tracks_lines_and_columns() {
        let map = SourceMap::new("int a;\nfloat b;");

        assert_eq!(map.position_at(0), Position::new(0, 1, 1));
        assert_eq!(map.position_at(4), Position::new(4, 1, 5));
        assert_eq!(map.position_at(7), Position::new(7, 2, 1));
        assert_eq!(map.position_at(13), Position::new(13, 2, 7));
        assert_eq!(map.line_count(), 2);
    }

    #[test]
    fn test_columns_count_characters() {
        let map = SourceMap::new("\"é\" x");
        // 'x' sits after a two-byte character
        assert_eq!(map.position_at(5), Position::new(5, 1, 5));
    }

    #[test]
    fn test_span_text_and_display() {
        let source = "int count = 1;";
        let map = SourceMap::new(source);
        let span = map.span(4, 9);

        assert_eq!(map.span_text(&span), "count");
        assert_eq!(span.len(), 5);
        assert_eq!(span.to_string(), "1:5-10");
        assert!(span.contains(Position::new(6, 1, 7)));
        assert!(!span.contains(Position::new(9, 1, 10)));
    }

    #[test]
    fn test_get_line() {
        let map = SourceMap::new("first\nsecond\n");

        assert_eq!(map.get_line(1), Some("first"));
        assert_eq!(map.get_line(2), Some("second"));
        assert_eq!(map.get_line(3), Some(""));
        assert_eq!(map.get_line(0), None);
        assert_eq!(map.get_line(4), None);
    }

    #[test]
    fn test_format_snippet() {
        let map = SourceMap::new("int a;\nx & y;");
        let span = map.span(9, 10);
        let snippet = map.format_snippet(&span, "unmatched input '&'");

        assert!(snippet.contains("--> 2:3"));
        assert!(snippet.contains("2 | x & y;"));
        assert!(snippet.ends_with("  |   ^\n"));
    }
}
