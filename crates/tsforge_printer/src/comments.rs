//! Comment emission.
//!
//! Comments are not nodes. They are found again in the source text around
//! each node's range while the node prints. The container positions record
//! the range of the node currently being printed so a child starting or
//! ending at the same position does not print the same comment twice.

use crate::printer::{EmitHint, PipelinePhase, Printer};
use tsforge_ast::*;
use tsforge_scanner::{
    get_leading_comment_ranges, get_trailing_comment_ranges, is_pinned_comment, is_recognized_triple_slash_comment,
    skip_trivia, CommentRange,
};

const INDENT_SIZE: u32 = 4;

/// Comments split from the node that follows them by a blank line.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DetachedCommentInfo {
    pub node_pos: u32,
    pub detached_end: u32,
}

#[derive(Debug, Clone)]
pub(crate) struct CommentState {
    pub disabled: bool,
    remove_comments: bool,
    container_pos: Option<u32>,
    container_end: Option<u32>,
    declaration_list_container_end: Option<u32>,
    has_written_comment: bool,
    pub detached: Vec<DetachedCommentInfo>,
    /// Set once reference directives have been hoisted above the output.
    pub skip_triple_slash: bool,
}

impl CommentState {
    pub fn new(remove_comments: bool) -> Self {
        Self {
            disabled: remove_comments,
            remove_comments,
            container_pos: None,
            container_end: None,
            declaration_list_container_end: None,
            has_written_comment: false,
            detached: Vec::new(),
            skip_triple_slash: false,
        }
    }
}

impl<'a, 'r> Printer<'a, 'r> {
    pub(crate) fn comments_enabled_for(&self, node: NodeRef<'a>) -> bool {
        !self.comments.disabled
            && !matches!(node, NodeRef::SourceFile(_))
            && self.current_source_file.is_some()
            && !self.is_foreign(node.data())
    }

    pub(crate) fn emit_with_comments(&mut self, hint: EmitHint, node: NodeRef<'a>) {
        let data = node.data();
        let flags = data.emit_flags;
        let synthesized = data.is_synthesized();
        let skip_leading = synthesized || flags.contains(EmitFlags::NO_LEADING_COMMENTS);
        let skip_trailing = synthesized || flags.contains(EmitFlags::NO_TRAILING_COMMENTS);
        let is_emitted = data.kind != SyntaxKind::NotEmittedStatement;

        let saved_pos = self.comments.container_pos;
        let saved_end = self.comments.container_end;
        let saved_list_end = self.comments.declaration_list_container_end;

        if !skip_leading {
            self.emit_leading_comments(data.pos(), is_emitted);
        }
        if !synthesized {
            self.comments.container_pos = Some(data.pos());
            self.comments.container_end = Some(data.end());
            if data.kind == SyntaxKind::VariableDeclarationList {
                self.comments.declaration_list_container_end = Some(data.end());
            }
        }

        let nested_disabled = flags.contains(EmitFlags::NO_NESTED_COMMENTS);
        let was_disabled = self.comments.disabled;
        if nested_disabled {
            self.comments.disabled = true;
        }
        self.run_phase(PipelinePhase::SourceMaps, hint, node);
        if nested_disabled {
            self.comments.disabled = was_disabled;
        }

        self.comments.container_pos = saved_pos;
        self.comments.container_end = saved_end;
        self.comments.declaration_list_container_end = saved_list_end;

        if !skip_trailing && is_emitted {
            self.emit_trailing_comments(data.end());
        }
    }

    // ========================================================================
    // Leading and trailing comments
    // ========================================================================

    fn emit_leading_comments(&mut self, pos: u32, is_emitted: bool) {
        self.comments.has_written_comment = false;
        let Some(file) = self.current_source_file else {
            return;
        };
        if self.comments.container_pos == Some(pos) {
            return;
        }
        let from = match self.comments.detached.last() {
            Some(info) if info.node_pos == pos => {
                let end = info.detached_end;
                self.comments.detached.pop();
                end
            }
            _ => pos,
        };
        let skip_triple_slash = pos == 0 && (self.comments.skip_triple_slash || file.is_declaration_file);
        for comment in get_leading_comment_ranges(&file.text, from) {
            let triple_slash = pos == 0 && is_recognized_triple_slash_comment(&file.text, &comment);
            let keep = if is_emitted { !(skip_triple_slash && triple_slash) } else { triple_slash && !skip_triple_slash };
            if keep {
                self.emit_leading_comment(&comment, from);
            }
        }
    }

    fn emit_leading_comment(&mut self, comment: &CommentRange, range_pos: u32) {
        let Some(file) = self.current_source_file else {
            return;
        };
        if !self.comments.has_written_comment {
            if range_pos != comment.pos && !file.line_map.on_same_line(range_pos, comment.pos) {
                self.write_line();
            }
            self.comments.has_written_comment = true;
        }
        self.write_comment_range(file, comment);
        if comment.has_trailing_new_line {
            self.write_line();
        } else if comment.is_multi_line {
            self.write_space();
        }
    }

    fn emit_trailing_comments(&mut self, end: u32) {
        let Some(file) = self.current_source_file else {
            return;
        };
        if self.comments.container_end == Some(end) || self.comments.declaration_list_container_end == Some(end) {
            return;
        }
        for comment in get_trailing_comment_ranges(&file.text, end) {
            self.emit_trailing_comment(file, &comment);
        }
    }

    fn emit_trailing_comment(&mut self, file: &SourceFile<'_>, comment: &CommentRange) {
        if !self.writer.is_at_start_of_line() {
            self.write_space();
        }
        self.write_comment_range(file, comment);
        if comment.has_trailing_new_line {
            self.write_line();
        }
    }

    /// Leading comments at an arbitrary position, such as before a list
    /// delimiter or a closing brace.
    pub(crate) fn emit_leading_comments_of_position(&mut self, pos: u32) {
        if self.comments.disabled || pos == u32::MAX {
            return;
        }
        self.emit_leading_comments(pos, true);
    }

    /// Trailing comments at an arbitrary position. With `prefix_space` the
    /// comments are laid out as trailing comments of a node; otherwise each
    /// is followed by a space or line break.
    pub(crate) fn emit_trailing_comments_of_position(&mut self, pos: u32, prefix_space: bool) {
        if self.comments.disabled || pos == u32::MAX {
            return;
        }
        let Some(file) = self.current_source_file else {
            return;
        };
        for comment in get_trailing_comment_ranges(&file.text, pos) {
            if prefix_space {
                self.emit_trailing_comment(file, &comment);
            } else {
                self.write_comment_range(file, &comment);
                if comment.has_trailing_new_line {
                    self.write_line();
                } else {
                    self.write_space();
                }
            }
        }
    }

    // ========================================================================
    // Tokens
    // ========================================================================

    /// Write a keyword or punctuation token that sits at `pos` in the
    /// source, with the comments around it. Returns the end of the token.
    pub(crate) fn emit_token_with_comment(
        &mut self,
        kind: SyntaxKind,
        pos: u32,
        context: &NodeData,
        indent_leading: bool,
    ) -> u32 {
        let similar = self.in_current_file(context) && pos != u32::MAX;
        let start = pos;
        let mut pos = pos;
        if similar {
            if let Some(file) = self.current_source_file {
                pos = skip_trivia(&file.text, pos);
            }
            if context.pos() != start {
                let needs_indent = indent_leading && !self.on_same_line(start, pos);
                if needs_indent {
                    self.writer.increase_indent();
                }
                self.emit_leading_comments_of_position(start);
                if needs_indent {
                    self.writer.decrease_indent();
                }
            }
            self.emit_token_source_pos(pos);
        }
        let text = kind.token_text().unwrap_or("");
        self.write(text);
        if !similar {
            return pos;
        }
        let end = pos + text.len() as u32;
        if context.end() != end && !self.comments.disabled {
            if let Some(file) = self.current_source_file {
                for comment in get_trailing_comment_ranges(&file.text, end) {
                    self.emit_trailing_comment(file, &comment);
                }
            }
        }
        end
    }

    // ========================================================================
    // Detached comments
    // ========================================================================

    /// Print a body whose leading comments may be split from its first
    /// statement by a blank line. Such comments print before the body and
    /// are not repeated as the first statement's leading comments.
    pub(crate) fn emit_body_with_detached_comments(
        &mut self,
        flags: EmitFlags,
        pos: u32,
        end: u32,
        emit_body: impl FnOnce(&mut Self),
    ) {
        let skip_leading = pos == u32::MAX || flags.contains(EmitFlags::NO_LEADING_COMMENTS);
        let skip_trailing = self.comments.disabled || end == u32::MAX || flags.contains(EmitFlags::NO_TRAILING_COMMENTS);
        if !skip_leading {
            self.emit_detached_comments(pos);
        }
        if flags.contains(EmitFlags::NO_NESTED_COMMENTS) && !self.comments.disabled {
            self.comments.disabled = true;
            emit_body(self);
            self.comments.disabled = false;
        } else {
            emit_body(self);
        }
        if !skip_trailing {
            self.emit_leading_comments(end, true);
            if self.comments.has_written_comment && !self.writer.is_at_start_of_line() {
                self.write_line();
            }
        }
    }

    fn emit_detached_comments(&mut self, pos: u32) {
        let Some(file) = self.current_source_file else {
            return;
        };
        let text = &file.text;
        let comments: Vec<CommentRange> = if self.comments.remove_comments {
            if pos != 0 {
                return;
            }
            get_leading_comment_ranges(text, pos)
                .into_iter()
                .filter(|comment| is_pinned_comment(text, comment))
                .collect()
        } else {
            get_leading_comment_ranges(text, pos)
        };
        let Some(first) = comments.first() else {
            return;
        };

        let line_map = &file.line_map;
        let mut detached: Vec<&CommentRange> = Vec::new();
        for comment in &comments {
            if let Some(last) = detached.last() {
                if line_map.line_of(comment.pos) >= line_map.line_of(last.end) + 2 {
                    break;
                }
            }
            detached.push(comment);
        }
        let Some(last) = detached.last() else {
            return;
        };
        let node_line = line_map.line_of(skip_trivia(text, pos));
        if node_line < line_map.line_of(last.end) + 2 {
            return;
        }

        if pos != first.pos && !line_map.on_same_line(pos, first.pos) {
            self.write_line();
        }
        let mut needs_separator = false;
        for comment in &detached {
            if needs_separator {
                self.write_space();
                needs_separator = false;
            }
            self.write_comment_range(file, comment);
            if comment.has_trailing_new_line {
                self.write_line();
            } else {
                needs_separator = true;
            }
        }
        if needs_separator {
            self.write_space();
        }
        self.comments.detached.push(DetachedCommentInfo {
            node_pos: pos,
            detached_end: last.end,
        });
    }

    // ========================================================================
    // Comment text
    // ========================================================================

    /// Write a comment's text. Continuation lines of a block comment keep
    /// their indentation relative to the first line.
    fn write_comment_range(&mut self, file: &SourceFile<'_>, comment: &CommentRange) {
        let text = file.text.as_str();
        let comment_text = comment.text(text);
        if !comment.is_multi_line {
            self.writer.write_comment(comment_text);
            return;
        }

        let line_map = &file.line_map;
        let first_line = line_map.line_of(comment.pos);
        let first_line_indent = calculate_indent(text, line_map.line_start(first_line), comment.pos);
        let line_count = line_map.line_count() as u32;
        let mut pos = comment.pos;
        let mut line = first_line;
        while pos < comment.end {
            let next_line_start = if line + 1 >= line_count {
                text.len() as u32 + 1
            } else {
                line_map.line_start(line + 1)
            };
            let line_end = comment.end.min(next_line_start.saturating_sub(1));
            let current = text.get(pos as usize..line_end as usize).unwrap_or("").trim();
            if pos == comment.pos {
                if !current.is_empty() {
                    self.writer.write_comment(current);
                }
            } else {
                let writer_indent = self.writer.indent() * INDENT_SIZE;
                let spaces = (writer_indent + calculate_indent(text, pos, next_line_start)).saturating_sub(first_line_indent);
                let mut continuation = " ".repeat(spaces as usize);
                continuation.push_str(current);
                self.writer.raw_write(&continuation);
            }
            if line_end != comment.end {
                if current.is_empty() {
                    self.writer.raw_write(self.options.new_line);
                } else {
                    self.writer.write_line(false);
                }
            }
            pos = next_line_start;
            line += 1;
        }
    }
}

/// Visual width of the whitespace at the start of `text[pos..end]`.
fn calculate_indent(text: &str, pos: u32, end: u32) -> u32 {
    let bytes = text.as_bytes();
    let mut indent = 0;
    let mut i = pos as usize;
    while i < end as usize && i < bytes.len() {
        match bytes[i] {
            b'\t' => indent += INDENT_SIZE - indent % INDENT_SIZE,
            b' ' => indent += 1,
            _ => break,
        }
        i += 1;
    }
    indent
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_indent_counts_tabs_to_stops() {
        assert_eq!(calculate_indent("  \tx", 0, 4), 4);
        assert_eq!(calculate_indent("      x", 0, 7), 6);
        assert_eq!(calculate_indent("x", 0, 1), 0);
    }
}
