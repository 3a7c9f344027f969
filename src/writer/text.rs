use crate::origin::Origin;
use crate::splitter::LineSplitter;
use crate::target::OutputTarget;
use crate::writer::indent::Indent;
use crate::writer::Writer;

/// A writer that only keeps text and indentation; origins are accepted and ignored.
///
/// Line breaks are kept as written. A `\r\n` pair split across two writes stays one
/// break, with the indent after the `\n`.
#[derive(Debug, Clone, Default)]
pub struct TextWriter {
    content: String,
    indent: Indent,
    // offset right after a `\r` that ended the last write, before its indent
    pending_cr: Option<usize>,
}

impl TextWriter {
    /// Creates a writer indenting with a tab.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer whose [indent](Writer::indent) adds `unit`.
    pub fn with_indent(unit: &str) -> Self {
        Self {
            content: String::new(),
            indent: Indent::new(unit),
            pending_cr: None,
        }
    }
}

impl Writer for TextWriter {
    fn write(&mut self, mut text: &str, _origin: Option<Origin<'_>>) {
        if let Some(offset) = self.pending_cr.take() {
            if let Some(rest) = text.strip_prefix('\n') {
                self.content.insert(offset, '\n');
                text = rest;
            }
        }
        if self.indent.is_empty() {
            self.content.push_str(text);
            return;
        }

        for (line, line_break) in LineSplitter::new(text) {
            self.content.push_str(line);
            if let Some(line_break) = line_break {
                self.content.push_str(line_break.as_str());
                self.content.push_str(self.indent.as_str());
            }
        }
        if text.ends_with('\r') {
            self.pending_cr = Some(self.content.len() - self.indent.as_str().len());
        }
    }

    fn indent(&mut self) {
        self.indent.push();
    }

    fn unindent(&mut self) {
        self.indent.pop();
    }

    fn content(&self) -> &str {
        &self.content
    }

    fn finish(self, target: &mut dyn OutputTarget) {
        target.set_text(self.content);
    }
}
