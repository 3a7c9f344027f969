mod raw;

#[cfg(feature = "builder")]
mod builder;
#[cfg(feature = "builder")]
pub use builder::*;

use crate::mapping::{Mapping, Position};
use crate::mappings::{ItemsCount, Mappings};
use crate::sourcemap::raw::RawSourceMap;
use crate::{Error, Result};
use simd_json_derive::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};
use std::io;
use std::io::Write;
use std::str::FromStr;

/// `SourceMap` is a finalized version-3 source map.
///
/// It is what a [SourceMapWriter](crate::SourceMapWriter) produces when it finishes, and
/// what a later stage reads as the [OriginMap](crate::OriginMap) of text it writes again.
/// Nothing mutates a `SourceMap` once it is built.
///
/// # Methods
///
/// ## Parsing
///
/// Maps produced by other tools can be loaded with:
/// - [`SourceMap::from_slice`]
/// - [`str::parse`], through [FromStr]
///
/// Index maps (`sections`) are not supported.
///
/// ## Construction
///
/// When the `builder` feature is enabled, [SourceMapBuilder](crate::SourceMapBuilder) is
/// available to construct a `SourceMap` by hand.
///
/// ## Output
///
/// You can serialize the source map to json using:
/// - [`write`](SourceMap::write)
/// - [`to_vec`](SourceMap::to_vec)
/// - [`to_string`](SourceMap::to_string)
#[derive(Clone, Default, Eq, PartialEq)]
pub struct SourceMap {
    pub(crate) file: Option<String>,
    pub(crate) sources: Vec<String>,
    pub(crate) names: Vec<String>,
    pub(crate) mappings: Mappings,
}

impl Debug for SourceMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("SourceMap\n")?;
        if let Some(file) = &self.file {
            writeln!(f, "  file: {file}")?;
        }
        f.write_str("  sources:\n")?;
        for (idx, source) in self.sources.iter().enumerate() {
            writeln!(f, "    {idx}: {source}")?;
        }
        f.write_str("  names:\n")?;
        for (idx, name) in self.names.iter().enumerate() {
            writeln!(f, "    {idx}: {name}")?;
        }
        f.write_str("  mappings:\n")?;
        for (line, entries) in self.mappings.iter().enumerate() {
            if entries.is_empty() {
                continue;
            }
            write!(f, "    {line}: ")?;
            for (idx, mapping) in entries.iter().enumerate() {
                if idx != 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{mapping:?}")?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

impl SourceMap {
    pub(crate) fn from_parts(
        file: Option<String>,
        sources: Vec<String>,
        names: Vec<String>,
        mappings: Mappings,
    ) -> Self {
        Self {
            file,
            sources,
            names,
            mappings,
        }
    }

    /// Finds the mapping for a given generated position.
    ///
    /// If an exact match is not found, this method returns the closest preceding mapping
    /// on the same generated line.
    /// If there are no preceding mappings, it returns `None`.
    ///
    /// # Example
    /// ```
    /// # use sora_emit::SourceMap;
    /// # let mut buf = r#"{"version":3,"sources":["a.js"],"mappings":"AAAA"}"#.as_bytes().to_vec();
    /// let source_map = SourceMap::from_slice(&mut buf).unwrap();
    /// if let Some(mapping) = source_map.find_mapping((0, 2)) {
    ///     println!("Mapping found: {:?}", mapping);
    /// } else {
    ///     println!("No mapping found for the given generated position.");
    /// }
    /// ```
    pub fn find_mapping<P>(&self, pos: P) -> Option<Mapping>
    where
        P: Into<Position>,
    {
        self.mappings.find_mapping(pos)
    }

    /// Finds the original source path and position for a given generated position.
    pub fn original_position<P>(&self, pos: P) -> Option<(&str, Position)>
    where
        P: Into<Position>,
    {
        let source_info = self.find_mapping(pos)?.source_info()?;
        let source = self.source(source_info.id)?;
        Some((source, source_info.position))
    }

    /// Validates the source map.
    pub fn validate(&self) -> Result<()> {
        self.mappings.validate(self.items_count())
    }

    pub(crate) fn items_count(&self) -> ItemsCount {
        ItemsCount::new(self.sources.len() as u32, self.names.len() as u32)
    }
}

impl SourceMap {
    #[inline]
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    #[inline]
    pub fn mappings(&self) -> &Mappings {
        &self.mappings
    }

    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[inline]
    pub fn name(&self, id: u32) -> Option<&str> {
        self.names.get(id as usize).map(String::as_str)
    }

    #[inline]
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    #[inline]
    pub fn source(&self, id: u32) -> Option<&str> {
        self.sources.get(id as usize).map(String::as_str)
    }
}

impl SourceMap {
    fn from_raw(raw: RawSourceMap<'_>) -> Result<Self> {
        if !matches!(raw.version, Some(3)) {
            return Err(Error::UnsupportedFormat);
        }

        let sources: Vec<String> = match raw.source_root.filter(|sr| !sr.is_empty()) {
            Some(source_root) => {
                let source_root = source_root.trim_end_matches('/');
                raw.sources
                    .unwrap_or_default()
                    .into_iter()
                    .map(|s| match s {
                        None => String::new(),
                        Some(source)
                            if source.starts_with('/')
                                || source.starts_with("http:")
                                || source.starts_with("https:") =>
                        {
                            source.to_owned()
                        }
                        Some(source) => format!("{}/{}", source_root, source),
                    })
                    .collect()
            }
            None => raw
                .sources
                .unwrap_or_default()
                .into_iter()
                .map(|s| s.unwrap_or_default().to_owned())
                .collect(),
        };

        if let Some(sources_content) = &raw.sources_content {
            if sources_content.len() != sources.len() {
                return Err(Error::MismatchSourcesContent {
                    sources_len: sources.len() as u32,
                    sources_content_len: sources_content.len() as u32,
                });
            }
        }

        let names: Vec<String> = raw
            .names
            .unwrap_or_default()
            .into_iter()
            .map(str::to_owned)
            .collect();

        let mappings = Mappings::decode(
            raw.mappings.unwrap_or_default(),
            ItemsCount::new(sources.len() as u32, names.len() as u32),
        )?;

        Ok(Self {
            file: raw.file.map(str::to_owned),
            sources,
            names,
            mappings,
        })
    }

    /// Creates a new `SourceMap` from a JSON buffer slice.
    ///
    /// The slice is mutable because the JSON parser unescapes strings in place.
    #[inline]
    pub fn from_slice(json: &mut [u8]) -> Result<Self> {
        Self::from_raw(RawSourceMap::from_slice(json)?)
    }
}

impl FromStr for SourceMap {
    type Err = Error;

    /// Parses a JSON string, copying it first since parsing happens in place.
    fn from_str(json: &str) -> Result<Self> {
        Self::from_slice(&mut json.as_bytes().to_vec())
    }
}

impl SourceMap {
    /// Writes the source map as version-3 JSON with an encoded `mappings` string.
    pub fn write<W>(&self, w: &mut W) -> io::Result<()>
    where
        W: Write,
    {
        w.write_all(br#"{"version":3"#)?;

        if let Some(file) = self.file.as_deref() {
            w.write_all(br#","file":"#)?;
            file.json_write(w)?;
        }

        w.write_all(br#","sources":"#)?;
        self.sources.json_write(w)?;
        if !self.names.is_empty() {
            w.write_all(br#","names":"#)?;
            self.names.json_write(w)?;
        }

        w.write_all(br#","mappings":""#)?;
        self.mappings.encode(w)?;
        w.write_all(br#""}"#)
    }

    #[inline]
    pub fn to_vec(&self) -> io::Result<Vec<u8>> {
        let mut v = Vec::with_capacity(1024);
        self.write(&mut v)?;
        Ok(v)
    }

    #[inline]
    #[allow(clippy::inherent_to_string)]
    pub fn to_string(&self) -> io::Result<String> {
        String::from_utf8(self.to_vec()?).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}
