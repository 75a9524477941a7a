//! Output writer with indentation tracking.

/// Writer that tracks indentation and builds emitted code.
pub struct CodeWriter {
    /// The output buffer
    output: String,
    /// Current indentation level
    indent_level: usize,
    /// Spaces per level
    indent_width: usize,
    /// Whether we're at the start of a line
    at_line_start: bool,
}

impl CodeWriter {
    pub fn new(indent_width: usize) -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            indent_width,
            at_line_start: true,
        }
    }

    pub fn finish(self) -> String {
        self.output
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    pub fn current_indent(&self) -> usize {
        self.indent_level
    }

    fn write_indent(&mut self) {
        if self.at_line_start {
            let width = self.indent_level * self.indent_width;
            self.output.extend(std::iter::repeat_n(' ', width));
            self.at_line_start = false;
        }
    }

    /// Write a string (with auto-indent). Empty strings write nothing, so blank lines carry no indentation.
    pub fn write(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.write_indent();
        self.output.push_str(s);
    }

    pub fn writeln(&mut self, s: &str) {
        self.write(s);
        self.newline();
    }

    pub fn newline(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
    }

    /// Write a multi-line block one extra level deeper than the current indentation.
    pub fn write_block(&mut self, text: &str) {
        self.indent();
        for line in text.lines() {
            self.writeln(line);
        }
        self.dedent();
    }
}
