//! Indentation-aware text buffer used by every emitter.

/// Number of spaces emitted per indent level.
pub const INDENT_WIDTH: usize = 4;

/// Accumulates generated source while tracking indent depth and column.
///
/// Indentation is applied lazily: the prefix is written only when text lands at
/// column 0, so a sequence of `write` calls builds a single line without
/// re-indenting it. The writer knows nothing about the target language.
#[derive(Debug, Default)]
pub struct CodeWriter {
    buf: String,
    indent: usize,
    column: usize,
}

impl CodeWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current indent depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.indent
    }

    pub fn indent(&mut self) {
        self.indent += 1;
    }

    /// Decrease the indent depth.
    ///
    /// # Panics
    ///
    /// Unindenting at depth 0 is an emitter bug and aborts generation.
    pub fn unindent(&mut self) {
        assert!(self.indent > 0, "CodeWriter::unindent called at depth 0");
        self.indent -= 1;
    }

    /// Append `s` without terminating the line.
    pub fn write(&mut self, s: &str) {
        self.pad();
        self.buf.push_str(s);
        self.column += s.len();
    }

    /// Append `s` followed by a newline.
    pub fn write_line(&mut self, s: &str) {
        // Blank lines carry no trailing whitespace.
        if !s.is_empty() {
            self.pad();
        }
        self.buf.push_str(s);
        self.buf.push('\n');
        self.column = 0;
    }

    /// Terminate the current line (or emit an empty one).
    pub fn new_line(&mut self) {
        self.write_line("");
    }

    /// Write `items` separated by `sep` on the current line.
    pub fn write_joined<I, S>(&mut self, items: I, sep: &str)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.write(sep);
            }
            self.write(item.as_ref());
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    #[must_use]
    pub fn finish(self) -> String {
        self.buf
    }

    fn pad(&mut self) {
        if self.indent > 0 && self.column == 0 {
            let width = self.indent * INDENT_WIDTH;
            self.buf.extend(std::iter::repeat(' ').take(width));
            self.column = width;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_line_indents_at_column_zero() {
        let mut w = CodeWriter::new();
        w.write_line("fn a() {");
        w.indent();
        w.write_line("x();");
        w.unindent();
        w.write_line("}");
        assert_eq!(w.finish(), "fn a() {\n    x();\n}\n");
    }

    #[test]
    fn test_mid_line_write_does_not_reindent() {
        let mut w = CodeWriter::new();
        w.indent();
        w.indent();
        w.write("let a");
        w.write(" = ");
        w.write_line("1;");
        assert_eq!(w.as_str(), "        let a = 1;\n");
    }

    #[test]
    fn test_blank_line_has_no_trailing_whitespace() {
        let mut w = CodeWriter::new();
        w.indent();
        w.write_line("a");
        w.new_line();
        w.write_line("b");
        assert_eq!(w.finish(), "    a\n\n    b\n");
    }

    #[test]
    fn test_write_joined() {
        let mut w = CodeWriter::new();
        w.write_joined(["T0", "T1", "R"], ", ");
        assert_eq!(w.as_str(), "T0, T1, R");

        let mut empty = CodeWriter::new();
        empty.write_joined(Vec::<String>::new(), ", ");
        assert_eq!(empty.as_str(), "");
    }

    #[test]
    fn test_depth_tracking() {
        let mut w = CodeWriter::new();
        assert_eq!(w.depth(), 0);
        w.indent();
        w.indent();
        w.unindent();
        assert_eq!(w.depth(), 1);
    }

    #[test]
    #[should_panic(expected = "depth 0")]
    fn test_unindent_below_zero_panics() {
        let mut w = CodeWriter::new();
        w.unindent();
    }
}
