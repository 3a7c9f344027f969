use crate::interner::Interner;
use crate::mapping::{Mapping, Position};
use crate::mappings::{ItemsCount, Mappings};
use crate::origin::{Origin, OriginMap};
use crate::splitter::LineSplitter;
use crate::target::OutputTarget;
use crate::writer::indent::Indent;
use crate::writer::{text_width, Writer};
use crate::SourceMap;
use tracing::{debug, trace};

/// A writer that builds, alongside the text, a source map composed through the maps of
/// the text's origins.
///
/// Every write with an [Origin] maps the start of each of its lines to the origin
/// position of that line. When the origin carries its own map, the entries that map has
/// for the written part of the line are copied too, moved to their new columns and
/// pointed at the sources *they* reference. A chain of stages therefore ends with a map
/// that points at the original sources, whatever happened in between.
///
/// Line breaks (`\r\n`, `\r`, `\n`) are written as `\n`, also when a `\r\n` pair is
/// split across two writes. Columns count UTF-16 code units.
#[derive(Debug, Clone)]
pub struct SourceMapWriter {
    file: Option<String>,
    content: String,
    indent: Indent,
    line: u32,
    column: u32,
    mappings: Mappings,
    sources: Interner,
    names: Interner,
    // the last write ended with `\r`
    pending_cr: bool,
}

impl SourceMapWriter {
    /// Creates a writer for the output identified by `file`, which becomes the `file` of
    /// the resulting map.
    pub fn new(file: Option<&str>) -> Self {
        Self::with_indent(file, "\t")
    }

    /// Creates a writer whose [indent](Writer::indent) adds `unit`.
    pub fn with_indent(file: Option<&str>, unit: &str) -> Self {
        Self {
            file: file.map(str::to_owned),
            content: String::new(),
            indent: Indent::new(unit),
            line: 0,
            column: 0,
            mappings: Mappings::default(),
            sources: Interner::default(),
            names: Interner::default(),
            pending_cr: false,
        }
    }

    /// The current output line.
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// The current output column.
    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }

    /// The current output position, where the next write starts.
    #[inline]
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// The entries written so far. Source ids refer to [Self::source].
    #[inline]
    pub fn mappings(&self) -> &Mappings {
        &self.mappings
    }

    /// The source behind an id of [Self::mappings], if it exists.
    #[inline]
    pub fn source(&self, id: u32) -> Option<&str> {
        self.sources.get(id)
    }

    /// Finalizes the writer into its text and its map.
    ///
    /// Sources and names that no entry references any more are dropped from the map.
    pub fn finalize(mut self) -> (String, SourceMap) {
        let items_count = ItemsCount::new(self.sources.len(), self.names.len());
        let (used_sources, used_names) = self.mappings.usage(items_count);
        if used_sources.contains(&false) || used_names.contains(&false) {
            let sources = self.sources.compact(&used_sources);
            let names = self.names.compact(&used_names);
            self.mappings.remap(&sources, &names);
        }

        debug!(
            file = self.file.as_deref().unwrap_or_default(),
            lines = self.mappings.len(),
            entries = self.mappings.entry_count(),
            sources = self.sources.len(),
            "source map finished"
        );

        let source_map = SourceMap::from_parts(
            self.file,
            self.sources.into_vec(),
            self.names.into_vec(),
            self.mappings,
        );
        (self.content, source_map)
    }

    fn add_mapping(&mut self, mapping: Mapping) {
        if !self.mappings.push(self.line, mapping) {
            trace!(line = self.line, ?mapping, "dropped out-of-order mapping");
        }
    }

    fn new_line(&mut self) {
        self.content.push('\n');
        self.content.push_str(self.indent.as_str());
        self.line += 1;
        self.column = self.indent.width();
    }

    /// Copies the entries `map` has on `origin.line` from `origin.column` on, up to but
    /// not including `end`.
    fn splice(&mut self, map: &dyn OriginMap, origin: Position, end: u32) {
        let entries = map.line(origin.line);
        let start = entries.partition_point(|m| m.column() < origin.column);

        for entry in &entries[start..] {
            if entry.column() >= end {
                break;
            }
            let column = entry.column() - origin.column + self.column;

            // unmapped in the origin, so unmapped here too
            let Some(source_info) = entry.source_info() else {
                self.add_mapping(Mapping::new(column));
                continue;
            };
            let Some(source) = map.source(source_info.id) else {
                trace!(id = source_info.id, "origin map references unknown source");
                continue;
            };

            let source_id = self.sources.intern(source);
            let mut mapping = Mapping::new(column).with_source(
                source_id,
                source_info.position.line,
                source_info.position.column,
            );
            if let Some(name_id) = entry.name_info() {
                match map.name(name_id) {
                    Some(name) => mapping = mapping.with_name(self.names.intern(name)),
                    None => trace!(id = name_id, "origin map references unknown name"),
                }
            }
            self.add_mapping(mapping);
        }
    }
}

impl Writer for SourceMapWriter {
    fn write(&mut self, mut text: &str, origin: Option<Origin<'_>>) {
        let mut origin_pos = origin.map(|origin| origin.position).unwrap_or(Position::min());
        if std::mem::take(&mut self.pending_cr) {
            // completes the `\r\n` the last write started, the line is already broken
            if let Some(rest) = text.strip_prefix('\n') {
                text = rest;
                origin_pos = Position::new(origin_pos.line + 1, 0);
            }
        }
        if text.is_empty() {
            return;
        }
        let source_id = origin.map(|origin| self.sources.intern(origin.path));

        for (line, line_break) in LineSplitter::new(text) {
            let width = text_width(line);

            if let (Some(origin), Some(source_id)) = (origin, source_id) {
                self.add_mapping(Mapping::new(self.column).with_source(
                    source_id,
                    origin_pos.line,
                    origin_pos.column,
                ));
                if let Some(map) = origin.map {
                    // an entry right at the end of a broken line still marks its end
                    let end = origin_pos.column + width + u32::from(line_break.is_some());
                    self.splice(map, origin_pos, end);
                }
            }

            self.content.push_str(line);
            self.column += width;

            if line_break.is_some() {
                self.new_line();
                origin_pos = Position::new(origin_pos.line + 1, 0);
            }
        }
        self.pending_cr = text.ends_with('\r');
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

    fn finish(mut self, target: &mut dyn OutputTarget) {
        if self.file.is_none() {
            self.file = target.path().map(str::to_owned);
        }
        let (content, source_map) = self.finalize();
        target.set_text(content);
        target.set_source_map(source_map);
    }
}
