//! The output sink the printer writes into.
//!
//! Tracks indentation and the current line and column so the source-map
//! phase can record generated positions. Columns are byte offsets into the
//! current line, matching the original-side columns of `LineMap`.

const INDENT: &str = "    ";

#[derive(Debug, Clone)]
pub struct TextWriter {
    output: String,
    new_line: &'static str,
    indent: u32,
    line_start: bool,
    line_count: u32,
    line_pos: usize,
}

impl TextWriter {
    pub fn new(new_line: &'static str) -> Self {
        Self {
            output: String::new(),
            new_line,
            indent: 0,
            line_start: true,
            line_count: 0,
            line_pos: 0,
        }
    }

    #[inline]
    pub fn new_line(&self) -> &'static str {
        self.new_line
    }

    /// Write `s`, indenting first if this is the start of a line.
    pub fn write(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        if self.line_start {
            for _ in 0..self.indent {
                self.output.push_str(INDENT);
            }
            self.line_start = false;
        }
        self.push_tracked(s);
    }

    /// Write `s` without applying indentation.
    pub fn raw_write(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.push_tracked(s);
        self.line_start = self.output.ends_with('\n') || self.output.ends_with('\r');
    }

    pub fn write_keyword(&mut self, s: &str) {
        self.write(s);
    }

    pub fn write_punctuation(&mut self, s: &str) {
        self.write(s);
    }

    pub fn write_operator(&mut self, s: &str) {
        self.write(s);
    }

    pub fn write_literal(&mut self, s: &str) {
        self.write(s);
    }

    pub fn write_comment(&mut self, s: &str) {
        self.write(s);
    }

    pub fn write_space(&mut self) {
        self.write(" ");
    }

    /// End the current line. Blank lines are never produced unless `force`.
    pub fn write_line(&mut self, force: bool) {
        if !self.line_start || force {
            self.output.push_str(self.new_line);
            self.line_count += 1;
            self.line_pos = self.output.len();
            self.line_start = true;
        }
    }

    pub fn increase_indent(&mut self) {
        self.indent += 1;
    }

    pub fn decrease_indent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    #[inline]
    pub fn indent(&self) -> u32 {
        self.indent
    }

    #[inline]
    pub fn text_pos(&self) -> usize {
        self.output.len()
    }

    /// The position text will start at once a pending line break is written.
    pub fn text_pos_with_write_line(&self) -> usize {
        if self.line_start {
            self.output.len()
        } else {
            self.output.len() + self.new_line.len()
        }
    }

    #[inline]
    pub fn line(&self) -> u32 {
        self.line_count
    }

    pub fn column(&self) -> u32 {
        if self.line_start {
            self.indent * INDENT.len() as u32
        } else {
            (self.output.len() - self.line_pos) as u32
        }
    }

    #[inline]
    pub fn is_at_start_of_line(&self) -> bool {
        self.line_start
    }

    pub fn text(&self) -> &str {
        &self.output
    }

    pub fn into_text(self) -> String {
        self.output
    }

    pub fn clear(&mut self) {
        self.output.clear();
        self.indent = 0;
        self.line_start = true;
        self.line_count = 0;
        self.line_pos = 0;
    }

    fn push_tracked(&mut self, s: &str) {
        let start = self.output.len();
        self.output.push_str(s);
        let bytes = s.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\r' => {
                    if bytes.get(i + 1) == Some(&b'\n') {
                        i += 1;
                    }
                    self.line_count += 1;
                    self.line_pos = start + i + 1;
                }
                b'\n' => {
                    self.line_count += 1;
                    self.line_pos = start + i + 1;
                }
                _ => {}
            }
            i += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation_applies_at_line_start() {
        let mut w = TextWriter::new("\n");
        w.write("{");
        w.write_line(false);
        w.increase_indent();
        w.write("a;");
        w.decrease_indent();
        w.write_line(false);
        w.write("}");
        assert_eq!(w.text(), "{\n    a;\n}");
    }

    #[test]
    fn test_write_line_does_not_stack_blank_lines() {
        let mut w = TextWriter::new("\n");
        w.write("a");
        w.write_line(false);
        w.write_line(false);
        assert_eq!(w.text(), "a\n");
        w.write_line(true);
        assert_eq!(w.text(), "a\n\n");
    }

    #[test]
    fn test_line_and_column_tracking() {
        let mut w = TextWriter::new("\r\n");
        w.write("abc");
        assert_eq!((w.line(), w.column()), (0, 3));
        w.write_line(false);
        assert_eq!((w.line(), w.column()), (1, 0));
        w.increase_indent();
        assert_eq!(w.column(), 4);
        w.write("x");
        assert_eq!(w.column(), 5);
        w.raw_write("/* a\nb */");
        assert_eq!((w.line(), w.column()), (2, 4));
    }

    #[test]
    fn test_text_pos_with_write_line() {
        let mut w = TextWriter::new("\r\n");
        assert_eq!(w.text_pos_with_write_line(), 0);
        w.write("x");
        assert_eq!(w.text_pos_with_write_line(), 3);
    }
}
