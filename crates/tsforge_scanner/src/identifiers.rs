//! Identifier and literal classification.

use crate::char_codes::{is_digit, is_octal_digit};
use unicode_xid::UnicodeXID;

pub fn is_identifier_start(ch: char) -> bool {
    ch == '_' || ch == '$' || ch.is_ascii_alphabetic() || (!ch.is_ascii() && ch.is_xid_start())
}

pub fn is_identifier_part(ch: char) -> bool {
    ch == '_'
        || ch == '$'
        || ch.is_ascii_alphanumeric()
        || ch == '\u{200C}'
        || ch == '\u{200D}'
        || (!ch.is_ascii() && ch.is_xid_continue())
}

/// Whether `name` can be written as a bare identifier.
pub fn is_identifier_text(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_identifier_start(first) => chars.all(is_identifier_part),
        _ => false,
    }
}

/// Words that are only reserved when the code is in strict mode.
pub fn is_strict_mode_reserved_word(name: &str) -> bool {
    matches!(
        name,
        "implements" | "interface" | "let" | "package" | "private" | "protected" | "public" | "static" | "yield"
    )
}

/// `010`-style numbers, which strict mode rejects.
pub fn is_legacy_octal_literal_text(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() > 1
        && bytes[0] == b'0'
        && text[1..].chars().all(is_digit)
        && text[1..].chars().all(is_octal_digit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_text() {
        assert!(is_identifier_text("foo"));
        assert!(is_identifier_text("$_x1"));
        assert!(is_identifier_text("café"));
        assert!(!is_identifier_text("1abc"));
        assert!(!is_identifier_text("a-b"));
        assert!(!is_identifier_text(""));
    }

    #[test]
    fn test_strict_mode_reserved_words() {
        assert!(is_strict_mode_reserved_word("static"));
        assert!(is_strict_mode_reserved_word("yield"));
        assert!(!is_strict_mode_reserved_word("async"));
    }

    #[test]
    fn test_legacy_octal() {
        assert!(is_legacy_octal_literal_text("010"));
        assert!(!is_legacy_octal_literal_text("0"));
        assert!(!is_legacy_octal_literal_text("0x10"));
        assert!(!is_legacy_octal_literal_text("019"));
        assert!(!is_legacy_octal_literal_text("0.5"));
    }
}
