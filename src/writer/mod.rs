mod indent;
mod source_map;
mod text;

pub use source_map::*;
pub use text::*;

use crate::origin::Origin;
use crate::target::OutputTarget;

/// Width of `text` in columns. Columns count UTF-16 code units, as source map consumers do.
#[inline]
pub(crate) fn text_width(text: &str) -> u32 {
    text.chars().map(char::len_utf16).sum::<usize>() as u32
}

/// A text writer bound to one output.
///
/// `write` appends text, `indent` and `unindent` change the prefix inserted after every
/// line break from then on, and `finish` commits the result to the output, consuming the
/// writer.
pub trait Writer {
    /// Appends `text`, generated from `origin` when given.
    fn write(&mut self, text: &str, origin: Option<Origin<'_>>);

    fn indent(&mut self);

    fn unindent(&mut self);

    /// The text written so far.
    fn content(&self) -> &str;

    fn finish(self, target: &mut dyn OutputTarget)
    where
        Self: Sized;
}

/// Options selecting and configuring a [Writer].
///
/// Deserializable from the configuration of the surrounding pipeline:
///
/// ```
/// # use sora_emit::WriterOptions;
/// let options: WriterOptions = serde_json::from_str(r#"{"indent":"  "}"#).unwrap();
/// assert!(options.source_map);
/// ```
#[derive(Debug, Clone, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WriterOptions {
    /// The string one level of indentation adds.
    pub indent: String,
    /// Whether to build a source map along with the text.
    pub source_map: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            indent: "\t".to_owned(),
            source_map: true,
        }
    }
}

impl WriterOptions {
    /// Creates the writer these options describe, for the output identified by `file`.
    pub fn writer(&self, file: Option<&str>) -> AnyWriter {
        if self.source_map {
            AnyWriter::SourceMap(SourceMapWriter::with_indent(file, &self.indent))
        } else {
            AnyWriter::Text(TextWriter::with_indent(&self.indent))
        }
    }
}

/// Either kind of writer, as chosen by [WriterOptions].
#[derive(Debug, Clone)]
pub enum AnyWriter {
    Text(TextWriter),
    SourceMap(SourceMapWriter),
}

impl Writer for AnyWriter {
    fn write(&mut self, text: &str, origin: Option<Origin<'_>>) {
        match self {
            AnyWriter::Text(w) => w.write(text, origin),
            AnyWriter::SourceMap(w) => w.write(text, origin),
        }
    }

    fn indent(&mut self) {
        match self {
            AnyWriter::Text(w) => w.indent(),
            AnyWriter::SourceMap(w) => w.indent(),
        }
    }

    fn unindent(&mut self) {
        match self {
            AnyWriter::Text(w) => w.unindent(),
            AnyWriter::SourceMap(w) => w.unindent(),
        }
    }

    fn content(&self) -> &str {
        match self {
            AnyWriter::Text(w) => w.content(),
            AnyWriter::SourceMap(w) => w.content(),
        }
    }

    fn finish(self, target: &mut dyn OutputTarget) {
        match self {
            AnyWriter::Text(w) => w.finish(target),
            AnyWriter::SourceMap(w) => w.finish(target),
        }
    }
}
