use crate::mapping::{Mapping, Position};
use crate::SourceMap;
use std::fmt::{Debug, Formatter};

/// A finalized map that text being written was generated from.
///
/// Composition reads it line by line: the entries of one of its generated lines, and the
/// source paths and names those entries reference.
pub trait OriginMap {
    /// Returns the path of the source with the given id.
    fn source(&self, id: u32) -> Option<&str>;

    /// Returns the name with the given id.
    fn name(&self, id: u32) -> Option<&str>;

    /// Returns the entries of the given line, ordered by column.
    fn line(&self, line: u32) -> &[Mapping];
}

impl OriginMap for SourceMap {
    fn source(&self, id: u32) -> Option<&str> {
        SourceMap::source(self, id)
    }

    fn name(&self, id: u32) -> Option<&str> {
        SourceMap::name(self, id)
    }

    fn line(&self, line: u32) -> &[Mapping] {
        self.mappings.line(line)
    }
}

/// Where a piece of written text comes from: a file, a position in it, and optionally
/// the file's own map when the file was itself generated.
#[derive(Clone, Copy)]
pub struct Origin<'a> {
    pub(crate) path: &'a str,
    pub(crate) position: Position,
    pub(crate) map: Option<&'a dyn OriginMap>,
}

impl Debug for Origin<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.path, self.position.line, self.position.column
        )?;
        if self.map.is_some() {
            f.write_str(" (mapped)")?;
        }
        Ok(())
    }
}

impl<'a> Origin<'a> {
    /// An origin in a leaf source, one with no map of its own.
    pub fn new(path: &'a str, line: u32, column: u32) -> Self {
        Self {
            path,
            position: Position::new(line, column),
            map: None,
        }
    }

    /// Attaches the map the origin file was generated with.
    pub fn with_map(self, map: &'a dyn OriginMap) -> Self {
        Self {
            map: Some(map),
            ..self
        }
    }

    #[inline]
    pub fn path(&self) -> &'a str {
        self.path
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    #[inline]
    pub fn map(&self) -> Option<&'a dyn OriginMap> {
        self.map
    }
}
