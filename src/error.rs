pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while parsing or validating a source map.
///
/// Writing never fails; only maps coming from outside (JSON produced by another tool)
/// or assembled by hand can be rejected.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("unsupported source map format")]
    UnsupportedFormat,
    #[error("source map syntax error: {0}")]
    Syntax(Box<dyn std::error::Error>),
    #[error("a mapping is malformed: \"{0}\"")]
    MappingMalformed(String),
    #[error("mappings are unordered")]
    UnorderedMappings,
    #[error("a mapping references unknown source #{0}")]
    UnknownSourceReference(u32),
    #[error("a mapping references unknown name #{0}")]
    UnknownNameReference(u32),
    #[error(
        "source map has {} sources but {} sourcesContent entries",
        sources_len,
        sources_content_len
    )]
    MismatchSourcesContent {
        sources_len: u32,
        sources_content_len: u32,
    },
}

impl From<simd_json::Error> for Error {
    fn from(value: simd_json::Error) -> Self {
        Self::Syntax(Box::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn test_display() {
        insta::assert_snapshot!(
            Error::UnknownSourceReference(3).to_string(),
            @"a mapping references unknown source #3"
        );
        insta::assert_snapshot!(
            Error::MappingMalformed("A$".to_owned()).to_string(),
            @r###"a mapping is malformed: "A$""###
        );
    }
}
