/// The JSON shape of a version-3 source map, borrowing its strings from the input.
///
/// `sourcesContent` is only checked against `sources`; other fields are skipped.
#[derive(Debug, simd_json_derive::Deserialize)]
#[simd_json(rename_all = "camelCase")]
pub(crate) struct RawSourceMap<'a> {
    pub version: Option<u32>,
    pub file: Option<&'a str>,
    pub sources: Option<Vec<Option<&'a str>>>,
    pub source_root: Option<&'a str>,
    pub sources_content: Option<Vec<Option<&'a str>>>,
    pub names: Option<Vec<&'a str>>,
    pub mappings: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::RawSourceMap;
    use simd_json_derive::Deserialize;

    #[test]
    fn test_parse_success() {
        let mut bytes = br#"{
    "version":3,
    "file":"sum.js",
    "sources":["sum.ts", null],
    "sourcesContent":["export const sum = 1", null],
    "names":[],
    "mappings":";;;AAAO,IAAM"
}"#
        .to_vec();
        let raw = RawSourceMap::from_slice(bytes.as_mut_slice()).unwrap();
        assert_eq!(raw.version, Some(3));
        assert_eq!(raw.file, Some("sum.js"));
        assert_eq!(raw.sources, Some(vec![Some("sum.ts"), None]));
        assert_eq!(raw.mappings, Some(";;;AAAO,IAAM"));
    }

    #[test]
    fn test_parse_error() {
        let mut bytes = br#"{
    "version":3,
    "file":"sum.js",
    "names":[]
    "mappings":";;;AAAO"
}"#
        .to_vec();
        assert!(RawSourceMap::from_slice(bytes.as_mut_slice()).is_err())
    }
}
