#![cfg(feature = "builder")]

use sora_emit::{Error, Mapping, Mappings, Origin, SourceMap, SourceMapWriter, Writer};

#[test]
fn test_sourcemap_builder() {
    let sm = SourceMap::builder()
        .with_file("test.file")
        .with_sources(vec!["a.js".to_owned()])
        .with_mappings(Mappings::new(vec![vec![Mapping::new(0).with_source(0, 1, 2)]]))
        .build()
        .unwrap()
        .to_string()
        .unwrap();
    insta::assert_snapshot!(sm, @r###"{"version":3,"file":"test.file","sources":["a.js"],"mappings":"AACE"}"###);

    let err = SourceMap::builder()
        .with_sources(vec!["a.js".to_owned()])
        .with_mappings(Mappings::new(vec![vec![Mapping::new(0).with_source(1, 0, 0)]]))
        .build();
    assert!(matches!(err, Err(Error::UnknownSourceReference(1))));

    let err = SourceMap::builder()
        .with_sources(vec!["a.js".to_owned()])
        .with_mappings(Mappings::new(vec![vec![
            Mapping::new(0).with_source(0, 0, 0).with_name(0),
        ]]))
        .build();
    assert!(matches!(err, Err(Error::UnknownNameReference(0))));
}

#[test]
fn test_unchecked_map_as_origin() {
    // entry 4 references a source the map does not have
    let broken = SourceMap::builder()
        .with_sources(vec!["a.ts".to_owned()])
        .with_mappings(Mappings::new(vec![vec![
            Mapping::new(0).with_source(0, 0, 0),
            Mapping::new(4).with_source(3, 0, 4),
            Mapping::new(6).with_source(0, 0, 9),
        ]]))
        .build_unchecked();
    assert!(broken.validate().is_err());

    let mut writer = SourceMapWriter::new(None);
    writer.write("abcdefgh", Some(Origin::new("mid.js", 0, 0).with_map(&broken)));

    let (_, sm) = writer.finalize();
    assert_eq!(sm.sources(), &["a.ts"]);
    assert_eq!(
        sm.mappings().line(0),
        &[
            Mapping::new(0).with_source(0, 0, 0),
            Mapping::new(6).with_source(0, 0, 9),
        ]
    );
}
