//! Whitespace and comment trivia.
//!
//! Leading comments of a position are the comments that start after the
//! first line break preceding it (or every comment, at the start of the
//! file). Trailing comments are the comments on the same line, up to the
//! first line break.

use crate::char_codes::*;
use memchr::{memchr2, memmem};

/// A comment in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentRange {
    pub pos: u32,
    pub end: u32,
    pub is_multi_line: bool,
    /// Whether a line break follows the comment before any other token.
    pub has_trailing_new_line: bool,
}

impl CommentRange {
    pub fn new(pos: u32, end: u32, is_multi_line: bool, has_trailing_new_line: bool) -> Self {
        Self {
            pos,
            end,
            is_multi_line,
            has_trailing_new_line,
        }
    }

    pub fn text<'t>(&self, source: &'t str) -> &'t str {
        source.get(self.pos as usize..self.end as usize).unwrap_or("")
    }
}

#[inline]
fn char_at(text: &str, pos: usize) -> Option<char> {
    text.get(pos..).and_then(|rest| rest.chars().next())
}

/// The `#!...` line at the very start of a file, without its line break.
pub fn get_shebang(text: &str) -> Option<&str> {
    if !text.starts_with("#!") {
        return None;
    }
    let end = memchr2(b'\n', b'\r', text.as_bytes()).unwrap_or(text.len());
    Some(&text[..end])
}

/// End of a single-line comment that starts at `start` (just past the `//`).
fn single_line_comment_end(text: &str, start: usize) -> usize {
    let bytes = &text.as_bytes()[start..];
    let mut end = memchr2(b'\n', b'\r', bytes).map_or(text.len(), |i| start + i);
    // U+2028/U+2029 also end the line.
    if let Some(i) = text[start..end].find([LINE_SEPARATOR, PARAGRAPH_SEPARATOR]) {
        end = start + i;
    }
    end
}

/// End of a multi-line comment that starts at `start` (just past the `/*`).
fn multi_line_comment_end(text: &str, start: usize) -> usize {
    match memmem::find(&text.as_bytes()[start..], b"*/") {
        Some(i) => start + i + 2,
        None => text.len(),
    }
}

/// Skip whitespace, line breaks and comments starting at `pos`.
pub fn skip_trivia(text: &str, pos: u32) -> u32 {
    let mut pos = pos as usize;
    if pos == 0 {
        if let Some(shebang) = get_shebang(text) {
            pos = shebang.len();
        }
    }
    while let Some(ch) = char_at(text, pos) {
        match ch {
            '/' => match char_at(text, pos + 1) {
                Some('/') => pos = single_line_comment_end(text, pos + 2),
                Some('*') => pos = multi_line_comment_end(text, pos + 2),
                _ => break,
            },
            c if is_white_space_like(c) => pos += c.len_utf8(),
            _ => break,
        }
    }
    pos as u32
}

fn iterate_comment_ranges(text: &str, pos: u32, trailing: bool) -> Vec<CommentRange> {
    let mut ranges = Vec::new();
    let mut pos = pos as usize;
    let mut collecting = trailing || pos == 0;
    let mut pending: Option<CommentRange> = None;

    if pos == 0 {
        if text.starts_with(BYTE_ORDER_MARK) {
            pos += BYTE_ORDER_MARK.len_utf8();
        }
        if let Some(shebang) = get_shebang(text) {
            pos = shebang.len();
        }
    }

    while let Some(ch) = char_at(text, pos) {
        match ch {
            '\r' | '\n' => {
                if ch == '\r' && char_at(text, pos + 1) == Some('\n') {
                    pos += 1;
                }
                pos += 1;
                if trailing {
                    break;
                }
                collecting = true;
                if let Some(p) = pending.as_mut() {
                    p.has_trailing_new_line = true;
                }
            }
            '\t' | '\u{000B}' | '\u{000C}' | ' ' => pos += 1,
            '/' => {
                let is_multi_line = match char_at(text, pos + 1) {
                    Some('/') => false,
                    Some('*') => true,
                    _ => break,
                };
                let start = pos;
                let mut has_trailing_new_line = false;
                if is_multi_line {
                    pos = multi_line_comment_end(text, pos + 2);
                } else {
                    pos = single_line_comment_end(text, pos + 2);
                    has_trailing_new_line = pos < text.len();
                }
                if collecting {
                    if let Some(p) = pending.take() {
                        ranges.push(p);
                    }
                    pending = Some(CommentRange::new(
                        start as u32,
                        pos as u32,
                        is_multi_line,
                        has_trailing_new_line,
                    ));
                }
            }
            c if c as u32 > MAX_ASCII_CHARACTER && is_white_space_like(c) => {
                if is_line_break(c) {
                    if let Some(p) = pending.as_mut() {
                        p.has_trailing_new_line = true;
                    }
                }
                pos += c.len_utf8();
            }
            _ => break,
        }
    }

    if let Some(p) = pending {
        ranges.push(p);
    }
    ranges
}

pub fn get_leading_comment_ranges(text: &str, pos: u32) -> Vec<CommentRange> {
    iterate_comment_ranges(text, pos, false)
}

pub fn get_trailing_comment_ranges(text: &str, pos: u32) -> Vec<CommentRange> {
    iterate_comment_ranges(text, pos, true)
}

/// `/*! ... */` comments survive comment removal.
pub fn is_pinned_comment(text: &str, comment: &CommentRange) -> bool {
    comment.is_multi_line && text.as_bytes().get(comment.pos as usize + 2) == Some(&b'!')
}

/// `/// <reference .../>`, `/// <amd-module .../>` and `/// <amd-dependency .../>`.
pub fn is_recognized_triple_slash_comment(text: &str, comment: &CommentRange) -> bool {
    if comment.is_multi_line {
        return false;
    }
    let comment_text = comment.text(text);
    let Some(rest) = comment_text.strip_prefix("///") else {
        return false;
    };
    let Some(tag) = rest.trim_start().strip_prefix('<') else {
        return false;
    };
    if let Some(attrs) = tag.strip_prefix("reference") {
        let attrs = attrs.trim_start();
        return ["path", "types", "lib", "no-default-lib"]
            .iter()
            .any(|name| attrs.starts_with(name));
    }
    tag.starts_with("amd-module") || tag.starts_with("amd-dependency")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_trivia() {
        let text = "  /* a */ // b\n  x";
        assert_eq!(skip_trivia(text, 0), 17);
        assert_eq!(skip_trivia("x", 0), 0);
    }

    #[test]
    fn test_skip_trivia_past_shebang() {
        let text = "#!/usr/bin/env node\nfoo";
        assert_eq!(skip_trivia(text, 0), 20);
    }

    #[test]
    fn test_leading_comments_at_file_start() {
        let text = "// one\n/* two */\nx";
        let ranges = get_leading_comment_ranges(text, 0);
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].text(text), "// one");
        assert!(ranges[0].has_trailing_new_line);
        assert!(ranges[1].is_multi_line);
        assert!(ranges[1].has_trailing_new_line);
    }

    #[test]
    fn test_leading_comments_need_a_line_break() {
        // `/* a */` is on the same line as the previous token, so it trails it.
        let text = "x; /* a */\n// b\ny";
        let ranges = get_leading_comment_ranges(text, 2);
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].text(text), "// b");
    }

    #[test]
    fn test_trailing_comments_stop_at_line_break() {
        let text = "x; /* a */ // b\n// c\n";
        let ranges = get_trailing_comment_ranges(text, 2);
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[1].text(text), "// b");
    }

    #[test]
    fn test_shebang() {
        assert_eq!(get_shebang("#!/bin/node\nx"), Some("#!/bin/node"));
        assert_eq!(get_shebang("x"), None);
    }

    #[test]
    fn test_triple_slash_and_pinned() {
        let text = "/// <reference path=\"a.ts\" />\n/*! keep */";
        let ranges = get_leading_comment_ranges(text, 0);
        assert!(is_recognized_triple_slash_comment(text, &ranges[0]));
        assert!(is_pinned_comment(text, &ranges[1]));
        assert!(!is_pinned_comment(text, &ranges[0]));
    }
}
