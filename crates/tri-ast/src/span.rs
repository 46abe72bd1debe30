// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Source location tracking.

use std::fmt;

/// A span in the source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The smallest span covering both `self` and `other`.
    pub fn to(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

/// A 1-based line/column location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Precomputed line-start offsets for O(log n) byte-offset → line:col lookup.
///
/// Columns count characters, not bytes.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Byte offset of the start of each line. line_starts[0] is always 0.
    line_starts: Vec<u32>,
    /// Start offset and extra byte count of each multi-byte character.
    multibyte: Vec<(u32, u32)>,
}

impl LineMap {
    /// Build a line map by scanning source for newlines. O(n).
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0u32];
        let mut multibyte = Vec::new();
        for (i, c) in source.char_indices() {
            if c == '\n' {
                line_starts.push((i + 1) as u32);
            }
            let width = c.len_utf8();
            if width > 1 {
                multibyte.push((i as u32, (width - 1) as u32));
            }
        }
        LineMap {
            line_starts,
            multibyte,
        }
    }

    /// Convert byte offset to (line, col), both 1-based. O(log n) plus the
    /// multi-byte characters on the line.
    pub fn offset_to_line_col(&self, offset: usize) -> (u32, u32) {
        let offset = offset as u32;
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let line_start = self.line_starts[line_idx];
        let lo = self.multibyte.partition_point(|&(at, _)| at < line_start);
        let hi = self.multibyte.partition_point(|&(at, _)| at < offset);
        let extra: u32 = self.multibyte[lo..hi].iter().map(|&(_, extra)| extra).sum();

        let line = (line_idx + 1) as u32;
        let col = (offset - line_start).saturating_sub(extra) + 1;
        (line, col)
    }

    /// Convert byte offset to a [`Position`].
    pub fn position(&self, offset: usize) -> Position {
        let (line, column) = self.offset_to_line_col(offset);
        Position::new(line, column)
    }

    /// Get the source text of a 1-based line number. O(1).
    pub fn line_text<'a>(&self, source: &'a str, line: u32) -> Option<&'a str> {
        let idx = (line as usize).checked_sub(1)?;
        let start = *self.line_starts.get(idx)? as usize;
        let end = self
            .line_starts
            .get(idx + 1)
            .map(|&s| (s as usize).saturating_sub(1)) // exclude the \n
            .unwrap_or(source.len());
        source.get(start..end)
    }

    /// Number of lines in the source.
    pub fn line_count(&self) -> u32 {
        self.line_starts.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source() {
        let lm = LineMap::new("");
        assert_eq!(lm.offset_to_line_col(0), (1, 1));
        assert_eq!(lm.line_count(), 1);
    }

    #[test]
    fn multi_line() {
        let src = "let\n  var x Integer\nin pass";
        let lm = LineMap::new(src);
        assert_eq!(lm.line_count(), 3);
        assert_eq!(lm.offset_to_line_col(0), (1, 1));
        assert_eq!(lm.offset_to_line_col(6), (2, 3)); // 'v'
        assert_eq!(lm.position(20), Position::new(3, 1)); // 'i'
        assert_eq!(lm.line_text(src, 2), Some("  var x Integer"));
        assert_eq!(lm.line_text(src, 4), None);
    }

    #[test]
    fn offset_at_newline() {
        let src = "ab\ncd\n";
        let lm = LineMap::new(src);
        // Offset 2 is the '\n' and belongs to line 1
        assert_eq!(lm.offset_to_line_col(2), (1, 3));
        assert_eq!(lm.offset_to_line_col(3), (2, 1));
    }

    #[test]
    fn columns_count_characters() {
        let src = "x = \u{e9}; y = 1\n\u{e9}\u{e9}z";
        let lm = LineMap::new(src);
        let semicolon = src.find(';').unwrap();
        assert_eq!(semicolon, 6);
        assert_eq!(lm.offset_to_line_col(semicolon), (1, 6));
        assert_eq!(lm.offset_to_line_col(semicolon + 2), (1, 8)); // 'y'
        let z = src.find('z').unwrap();
        assert_eq!(lm.position(z), Position::new(2, 3));
    }

    #[test]
    fn span_join() {
        let joined = Span::new(4, 6).to(Span::new(1, 3));
        assert_eq!(joined, Span::new(1, 6));
    }

    #[test]
    fn position_display() {
        assert_eq!(Position::new(3, 14).to_string(), "3:14");
    }
}
