//! Text ranges and line maps.
//!
//! Positions are byte offsets into a file's text. Nodes created by a
//! transform rather than read from a file carry [`TextRange::SYNTHESIZED`],
//! which comment and source-map emission skip.

use std::fmt;
use std::ops::Range;

/// A byte offset into source text.
pub type TextPos = u32;

/// A span defined by a start offset and a length, as used by diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct TextSpan {
    pub start: TextPos,
    pub length: TextPos,
}

impl TextSpan {
    #[inline]
    pub fn new(start: TextPos, length: TextPos) -> Self {
        Self { start, length }
    }

    #[inline]
    pub fn from_bounds(start: TextPos, end: TextPos) -> Self {
        debug_assert!(end >= start);
        Self {
            start,
            length: end - start,
        }
    }

    #[inline]
    pub fn end(&self) -> TextPos {
        self.start + self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    #[inline]
    pub fn contains(&self, pos: TextPos) -> bool {
        pos >= self.start && pos < self.end()
    }
}

impl fmt::Debug for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

/// A `pos..end` range. `pos` includes leading trivia, like the parser reports it.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextRange {
    pub pos: TextPos,
    pub end: TextPos,
}

impl TextRange {
    /// Range of a node that has no position in any file.
    pub const SYNTHESIZED: TextRange = TextRange {
        pos: TextPos::MAX,
        end: TextPos::MAX,
    };

    #[inline]
    pub fn new(pos: TextPos, end: TextPos) -> Self {
        Self { pos, end }
    }

    #[inline]
    pub fn empty(pos: TextPos) -> Self {
        Self { pos, end: pos }
    }

    #[inline]
    pub fn is_synthesized(&self) -> bool {
        self.pos == TextPos::MAX
    }

    #[inline]
    pub fn len(&self) -> TextPos {
        if self.is_synthesized() {
            0
        } else {
            self.end - self.pos
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos == self.end
    }

    #[inline]
    pub fn to_span(&self) -> TextSpan {
        TextSpan::from_bounds(self.pos, self.end)
    }

    #[inline]
    pub fn to_range(&self) -> Range<usize> {
        self.pos as usize..self.end as usize
    }
}

impl fmt::Debug for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_synthesized() {
            f.write_str("<synthesized>")
        } else {
            write!(f, "{}..{}", self.pos, self.end)
        }
    }
}

impl From<TextRange> for TextSpan {
    fn from(range: TextRange) -> Self {
        range.to_span()
    }
}

/// 0-based line and column.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct LineAndColumn {
    pub line: u32,
    pub character: u32,
}

impl LineAndColumn {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Line starts of a file's text.
///
/// `\r\n`, `\r`, `\n`, U+2028 and U+2029 all end a line.
#[derive(Debug, Clone, Default)]
pub struct LineMap {
    line_starts: Vec<TextPos>,
}

impl LineMap {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0u32];
        let mut chars = text.char_indices().peekable();
        while let Some((i, ch)) = chars.next() {
            match ch {
                '\r' => {
                    if let Some(&(_, '\n')) = chars.peek() {
                        chars.next();
                        line_starts.push((i + 2) as u32);
                    } else {
                        line_starts.push((i + 1) as u32);
                    }
                }
                '\n' => line_starts.push((i + 1) as u32),
                '\u{2028}' | '\u{2029}' => line_starts.push((i + ch.len_utf8()) as u32),
                _ => {}
            }
        }
        Self { line_starts }
    }

    pub fn line_of(&self, pos: TextPos) -> u32 {
        match self.line_starts.binary_search(&pos) {
            Ok(line) => line as u32,
            Err(line) => (line - 1) as u32,
        }
    }

    pub fn line_and_column_of(&self, pos: TextPos) -> LineAndColumn {
        let line = self.line_of(pos);
        let line_start = self.line_starts[line as usize];
        LineAndColumn {
            line,
            character: pos - line_start,
        }
    }

    pub fn line_start(&self, line: u32) -> TextPos {
        self.line_starts[line as usize]
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn line_starts(&self) -> &[TextPos] {
        &self.line_starts
    }

    /// Whether two positions sit on the same line.
    pub fn on_same_line(&self, a: TextPos, b: TextPos) -> bool {
        self.line_of(a) == self.line_of(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_map() {
        let map = LineMap::new("line1\nline2\nline3");
        assert_eq!(map.line_count(), 3);
        assert_eq!(map.line_of(0), 0);
        assert_eq!(map.line_of(5), 0);
        assert_eq!(map.line_of(6), 1);
        assert_eq!(map.line_of(12), 2);

        let lc = map.line_and_column_of(8);
        assert_eq!(lc, LineAndColumn::new(1, 2));
    }

    #[test]
    fn test_line_map_crlf_counts_once() {
        let map = LineMap::new("a\r\nb\rc");
        assert_eq!(map.line_starts(), &[0, 3, 5]);
    }

    #[test]
    fn test_synthesized_range() {
        let range = TextRange::SYNTHESIZED;
        assert!(range.is_synthesized());
        assert_eq!(range.len(), 0);
        assert!(!TextRange::new(0, 4).is_synthesized());
    }
}
