use std::fmt;

/// Text buffer that tracks nesting depth and starts indented lines on demand.
///
/// Lines are opened rather than closed: [`LineWriter::next_line`] writes the
/// line break followed by the current indentation, so the buffer never ends
/// with trailing whitespace unless a caller writes some.
pub(crate) struct LineWriter {
    out: String,
    unit: String,
    indents: usize,
}

impl LineWriter {
    pub(crate) fn new(unit: &str) -> Self {
        Self {
            out: String::new(),
            unit: unit.to_string(),
            indents: 0,
        }
    }

    pub(crate) fn indents(&self) -> usize {
        self.indents
    }

    pub(crate) fn indent(&mut self) {
        self.indents += 1;
    }

    pub(crate) fn dedent(&mut self) {
        self.indents = self.indents.saturating_sub(1);
    }

    pub(crate) fn next_line(&mut self) {
        self.out.push('\n');
        for _ in 0..self.indents {
            self.out.push_str(&self.unit);
        }
    }

    pub(crate) fn push(&mut self, c: char) {
        self.out.push(c);
    }

    pub(crate) fn push_str(&mut self, s: &str) {
        self.out.push_str(s);
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }
}

impl fmt::Write for LineWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.out.push_str(s);
        Ok(())
    }
}
