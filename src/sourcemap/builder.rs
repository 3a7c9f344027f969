use crate::{Mappings, Result, SourceMap};

impl SourceMap {
    pub fn builder() -> SourceMapBuilder {
        SourceMapBuilder::default()
    }
}

/// Assembles a [SourceMap] by hand, for maps that do not come out of a writer.
#[derive(Debug, Default)]
pub struct SourceMapBuilder {
    pub(crate) file: Option<String>,
    pub(crate) mappings: Option<Mappings>,
    pub(crate) names: Option<Vec<String>>,
    pub(crate) sources: Option<Vec<String>>,
}

impl SourceMapBuilder {
    #[inline(always)]
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    #[inline(always)]
    pub fn with_mappings(mut self, mappings: Mappings) -> Self {
        self.mappings = Some(mappings);
        self
    }

    #[inline(always)]
    pub fn with_names(mut self, names: Vec<String>) -> Self {
        self.names = Some(names);
        self
    }

    #[inline(always)]
    pub fn with_sources(mut self, sources: Vec<String>) -> Self {
        self.sources = Some(sources);
        self
    }

    /// Builds the map, checking that every entry references an existing source and name.
    pub fn build(self) -> Result<SourceMap> {
        let v = self.build_unchecked();
        v.validate()?;
        Ok(v)
    }

    /// Builds the map without validation.
    ///
    /// An invalid map is still safe to use: lookups of unknown sources return `None`, and
    /// composing from it skips the broken entries.
    pub fn build_unchecked(self) -> SourceMap {
        SourceMap::from_parts(
            self.file,
            self.sources.unwrap_or_default(),
            self.names.unwrap_or_default(),
            self.mappings.unwrap_or_default(),
        )
    }
}
