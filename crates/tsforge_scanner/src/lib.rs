//! tsforge_scanner: Trivia-level scanning over source text.
//!
//! There is no tokenizer here. The binder and printer only need to look at
//! the text around a node: skipping whitespace and comments, collecting the
//! comment ranges attached to a position, recognizing a shebang or a
//! triple-slash directive, and escaping literal text for output.

pub mod char_codes;
mod escape;
mod identifiers;
mod trivia;

pub use escape::{escape_non_ascii_string, escape_string, QuoteKind};
pub use identifiers::{
    is_identifier_part, is_identifier_start, is_identifier_text, is_legacy_octal_literal_text,
    is_strict_mode_reserved_word,
};
pub use trivia::{
    get_leading_comment_ranges, get_shebang, get_trailing_comment_ranges, is_pinned_comment,
    is_recognized_triple_slash_comment, skip_trivia, CommentRange,
};
