use crate::origin::Origin;
use crate::SourceMap;

/// What a writer commits its result to when it finishes.
pub trait OutputTarget {
    /// The path identifying the target, used as the `file` of its map.
    fn path(&self) -> Option<&str>;

    fn set_text(&mut self, text: String);

    fn set_bytes(&mut self, bytes: Vec<u8>);

    fn set_source_map(&mut self, source_map: SourceMap);
}

/// An in-memory output file.
///
/// Once a writer has finished into it, the file can be written again by a later stage
/// through [OutputFile::origin], which carries the file's map so the later stage's map
/// points past this file to the original sources.
#[derive(Debug, Clone, Default)]
pub struct OutputFile {
    path: Option<String>,
    text: Option<String>,
    bytes: Option<Vec<u8>>,
    source_map: Option<SourceMap>,
}

impl OutputFile {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    #[inline]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    #[inline]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    #[inline]
    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }

    #[inline]
    pub fn source_map(&self) -> Option<&SourceMap> {
        self.source_map.as_ref()
    }

    /// An origin at the given position of this file, with its map attached when it has one.
    pub fn origin(&self, line: u32, column: u32) -> Origin<'_> {
        let origin = Origin::new(self.path().unwrap_or_default(), line, column);
        match &self.source_map {
            Some(source_map) => origin.with_map(source_map),
            None => origin,
        }
    }
}

impl OutputTarget for OutputFile {
    fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    fn set_text(&mut self, text: String) {
        self.text = Some(text);
    }

    fn set_bytes(&mut self, bytes: Vec<u8>) {
        self.bytes = Some(bytes);
    }

    fn set_source_map(&mut self, source_map: SourceMap) {
        self.source_map = Some(source_map);
    }
}
