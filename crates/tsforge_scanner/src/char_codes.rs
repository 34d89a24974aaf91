//! Character classes used when walking trivia.

pub const LINE_FEED: char = '\n';
pub const CARRIAGE_RETURN: char = '\r';
pub const LINE_SEPARATOR: char = '\u{2028}';
pub const PARAGRAPH_SEPARATOR: char = '\u{2029}';
pub const NEXT_LINE: char = '\u{0085}';
pub const BYTE_ORDER_MARK: char = '\u{FEFF}';
pub const MAX_ASCII_CHARACTER: u32 = 0x7F;

#[inline]
pub fn is_line_break(ch: char) -> bool {
    matches!(ch, LINE_FEED | CARRIAGE_RETURN | LINE_SEPARATOR | PARAGRAPH_SEPARATOR)
}

/// Whitespace that does not end a line.
#[inline]
pub fn is_white_space_single_line(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '\t'
            | '\u{000B}'
            | '\u{000C}'
            | '\u{00A0}'
            | NEXT_LINE
            | '\u{1680}'
            | '\u{2000}'..='\u{200B}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | BYTE_ORDER_MARK
    )
}

#[inline]
pub fn is_white_space_like(ch: char) -> bool {
    is_white_space_single_line(ch) || is_line_break(ch)
}

#[inline]
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

#[inline]
pub fn is_octal_digit(ch: char) -> bool {
    matches!(ch, '0'..='7')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_breaks() {
        assert!(is_line_break('\n'));
        assert!(is_line_break('\u{2029}'));
        assert!(!is_line_break(' '));
    }

    #[test]
    fn test_white_space() {
        assert!(is_white_space_single_line('\u{FEFF}'));
        assert!(is_white_space_like('\r'));
        assert!(!is_white_space_single_line('a'));
    }
}
