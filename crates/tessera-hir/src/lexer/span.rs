//! Source location tracking for Tessera tokens and HIR nodes

#![allow(clippy::cast_possible_truncation)] // We intentionally use u32 for locations; files > 4GB are unsupported

use serde::Serialize;

use super::Token;

/// A line/column position in source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Location {
    /// 1-indexed line number (0 when not recorded)
    pub line: u32,
    /// 1-indexed column number, in characters
    pub column: u32,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Returns true if this location was never recorded
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        self.line == 0
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A source range given as begin and end line/column.
///
/// Both ends are inclusive: a one-character token at column 4 spans `4..=4`.
/// A zero line means the corresponding end was never recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    pub line_begin: u32,
    pub col_begin: u32,
    pub line_end: u32,
    pub col_end: u32,
}

impl Span {
    /// Create a new span from explicit coordinates
    #[must_use]
    pub const fn new(line_begin: u32, col_begin: u32, line_end: u32, col_end: u32) -> Self {
        Self {
            line_begin,
            col_begin,
            line_end,
            col_end,
        }
    }

    /// A span with nothing recorded
    #[must_use]
    pub const fn unset() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Build a span from its two end points
    #[must_use]
    pub const fn from_locations(begin: Location, end: Location) -> Self {
        Self::new(begin.line, begin.column, end.line, end.column)
    }

    /// The span covered by a single token
    #[must_use]
    pub fn from_token(token: &Token) -> Self {
        token.span
    }

    /// Begin at `first`, end at `last`
    #[must_use]
    pub fn between(first: &Token, last: &Token) -> Self {
        Self::from_locations(first.span.begin(), last.span.end())
    }

    /// Replace the begin location with the begin of `token`
    #[must_use]
    pub fn with_begin(self, token: &Token) -> Self {
        Self::from_locations(token.span.begin(), self.end())
    }

    /// Replace the end location with the end of `token`
    #[must_use]
    pub fn with_end(self, token: &Token) -> Self {
        Self::from_locations(self.begin(), token.span.end())
    }

    /// Begin of `self` through end of `other`
    #[must_use]
    pub const fn to(self, other: Self) -> Self {
        Self::new(self.line_begin, self.col_begin, other.line_end, other.col_end)
    }

    #[must_use]
    pub const fn begin(&self) -> Location {
        Location::new(self.line_begin, self.col_begin)
    }

    #[must_use]
    pub const fn end(&self) -> Location {
        Location::new(self.line_end, self.col_end)
    }

    /// Returns true if neither end was recorded
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        self.line_begin == 0 && self.line_end == 0
    }

    /// Returns true if an end location was recorded
    #[must_use]
    pub const fn has_end(&self) -> bool {
        self.line_end != 0
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.begin(), self.end())
    }
}

/// Maps byte offsets to line/column locations
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offsets where each line starts
    line_starts: Vec<u32>,
    source: String,
}

impl LineIndex {
    /// Build a line index from source code
    #[must_use]
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, c) in source.char_indices() {
            if c == '\n' {
                line_starts.push((i + 1) as u32);
            }
        }
        Self {
            line_starts,
            source: source.to_string(),
        }
    }

    /// Convert a byte offset to a line/column location
    #[must_use]
    pub fn location(&self, offset: u32) -> Location {
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let line_start = self.line_starts[line] as usize;
        let end = (offset as usize).min(self.source.len());
        let column = self
            .source
            .get(line_start..end)
            .map_or(end - line_start, |text| text.chars().count());
        Location {
            line: (line + 1) as u32,
            column: column as u32 + 1,
        }
    }

    /// The inclusive line/column span of the byte range `start..end`. The end
    /// is the first byte of the last character in the range.
    #[must_use]
    pub fn span(&self, start: u32, end: u32) -> Span {
        let last = self
            .source
            .get(start as usize..end as usize)
            .and_then(|text| text.char_indices().last())
            .map_or(start, |(i, _)| start + i as u32);
        Span::from_locations(self.location(start), self.location(last))
    }

    /// Get the byte offset where a line starts (0-indexed line number)
    #[must_use]
    pub fn line_start(&self, line: usize) -> Option<u32> {
        self.line_starts.get(line).copied()
    }

    /// Get the number of lines
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::TokenKind;

    fn token(span: Span) -> Token {
        Token::new(TokenKind::Ident, span, "x")
    }

    #[test]
    fn span_basics() {
        let span = Span::new(1, 5, 2, 3);
        assert_eq!(span.begin(), Location::new(1, 5));
        assert_eq!(span.end(), Location::new(2, 3));
        assert!(span.has_end());
        assert!(!span.is_unset());
        assert_eq!(span.to_string(), "1:5-2:3");
    }

    #[test]
    fn unset_span() {
        let span = Span::unset();
        assert!(span.is_unset());
        assert!(!span.has_end());
        assert_eq!(Span::default(), span);
    }

    #[test]
    fn span_between_tokens() {
        let first = token(Span::new(1, 1, 1, 3));
        let last = token(Span::new(2, 4, 2, 6));
        assert_eq!(Span::between(&first, &last), Span::new(1, 1, 2, 6));
        assert_eq!(Span::from_token(&first), Span::new(1, 1, 1, 3));
    }

    #[test]
    fn span_update_one_end() {
        let span = Span::new(1, 1, 1, 3);
        let end = token(Span::new(3, 1, 3, 3));
        assert_eq!(span.with_end(&end), Span::new(1, 1, 3, 3));
        assert_eq!(span.with_begin(&end), Span::new(3, 1, 1, 3));
        assert_eq!(span.to(Span::new(1, 7, 1, 9)), Span::new(1, 1, 1, 9));
    }

    #[test]
    fn line_index_single_line() {
        let index = LineIndex::new("hello world");
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.location(0), Location::new(1, 1));
        assert_eq!(index.location(6), Location::new(1, 7));
    }

    #[test]
    fn line_index_multiple_lines() {
        let index = LineIndex::new("line1\nline2\nline3");
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.location(5), Location::new(1, 6)); // newline char
        assert_eq!(index.location(6), Location::new(2, 1));
        assert_eq!(index.location(12), Location::new(3, 1));
        assert_eq!(index.line_start(1), Some(6));
    }

    #[test]
    fn line_index_inclusive_span() {
        let index = LineIndex::new("abc + def");
        assert_eq!(index.span(0, 3), Span::new(1, 1, 1, 3));
        assert_eq!(index.span(6, 9), Span::new(1, 7, 1, 9));
    }

    #[test]
    fn inclusive_span_ends_on_a_multibyte_character() {
        // "é" and "ü" are two bytes each
        let index = LineIndex::new("é = aü");
        assert_eq!(index.span(0, 2), Span::new(1, 1, 1, 1));
        assert_eq!(index.span(5, 8), Span::new(1, 5, 1, 6));
        assert_eq!(index.span(8, 8), Span::new(1, 7, 1, 7));
    }
}
