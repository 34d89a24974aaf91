//! Escaping of literal text for output.

use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteKind {
    Double,
    Single,
    Backtick,
}

impl QuoteKind {
    pub fn as_char(self) -> char {
        match self {
            QuoteKind::Double => '"',
            QuoteKind::Single => '\'',
            QuoteKind::Backtick => '`',
        }
    }
}

fn needs_escape(ch: char, quote: QuoteKind) -> bool {
    match ch {
        '\\' | '\u{0000}'..='\u{001F}' | '\u{2028}' | '\u{2029}' | '\u{0085}' => true,
        '"' => quote == QuoteKind::Double,
        '\'' => quote == QuoteKind::Single,
        '`' | '$' => quote == QuoteKind::Backtick,
        _ => false,
    }
}

/// Escape `text` for use between the given quotes.
///
/// Non-ASCII characters other than the line terminators are kept as-is.
pub fn escape_string(text: &str, quote: QuoteKind) -> String {
    if !text.chars().any(|c| needs_escape(c, quote)) {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + 8);
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if !needs_escape(ch, quote) {
            out.push(ch);
            continue;
        }
        match ch {
            '\t' => out.push_str("\\t"),
            '\u{000B}' => out.push_str("\\v"),
            '\u{000C}' => out.push_str("\\f"),
            '\u{0008}' => out.push_str("\\b"),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\'' => out.push_str("\\'"),
            '`' => out.push_str("\\`"),
            '$' => {
                // Only `${` would start a substitution.
                if chars.peek() == Some(&'{') {
                    out.push_str("\\$");
                } else {
                    out.push('$');
                }
            }
            '\u{0000}' => {
                // `\0` followed by a digit would read as an octal escape.
                if chars.peek().is_some_and(|c| c.is_ascii_digit()) {
                    out.push_str("\\x00");
                } else {
                    out.push_str("\\0");
                }
            }
            other => {
                let _ = write!(out, "\\u{:04X}", other as u32);
            }
        }
    }
    out
}

/// Like [`escape_string`], but also writes every non-ASCII character as a
/// `\uXXXX` escape (astral characters as a surrogate pair).
pub fn escape_non_ascii_string(text: &str, quote: QuoteKind) -> String {
    let escaped = escape_string(text, quote);
    if escaped.is_ascii() {
        return escaped;
    }
    let mut out = String::with_capacity(escaped.len() + 16);
    for ch in escaped.chars() {
        if ch.is_ascii() {
            out.push(ch);
        } else {
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                let _ = write!(out, "\\u{:04X}", unit);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_quotes() {
        assert_eq!(escape_string("a\"b'c", QuoteKind::Double), "a\\\"b'c");
        assert_eq!(escape_string("a\"b'c", QuoteKind::Single), "a\"b\\'c");
    }

    #[test]
    fn test_escape_control_characters() {
        assert_eq!(escape_string("a\nb\tc", QuoteKind::Double), "a\\nb\\tc");
        assert_eq!(escape_string("\u{0001}", QuoteKind::Double), "\\u0001");
        assert_eq!(escape_string("\u{2028}", QuoteKind::Double), "\\u2028");
    }

    #[test]
    fn test_escape_nul_before_digit() {
        assert_eq!(escape_string("\u{0000}1", QuoteKind::Double), "\\x001");
        assert_eq!(escape_string("\u{0000}a", QuoteKind::Double), "\\0a");
    }

    #[test]
    fn test_escape_template_substitution() {
        assert_eq!(escape_string("${x} $y", QuoteKind::Backtick), "\\${x} $y");
    }

    #[test]
    fn test_escape_non_ascii() {
        assert_eq!(escape_string("héllo", QuoteKind::Double), "héllo");
        assert_eq!(escape_non_ascii_string("héllo", QuoteKind::Double), "h\\u00E9llo");
        assert_eq!(escape_non_ascii_string("😀", QuoteKind::Double), "\\uD83D\\uDE00");
    }
}
