use crate::mapping::{Mapping, Position};
use crate::splitter::MappingSplitter;
use crate::vlq::{VlqDecoder, VlqEncoder};
use crate::{Error, Result};
use std::io;
use std::io::Write;
use std::ops::Deref;

/// `Mappings` is the mapping table of a source map: for every generated line, the
/// [Mapping] entries on it, ordered by generated column.
///
/// The table is sparse in the sense that lines without entries are empty; it dereferences
/// to the slice of lines, so `mappings[line]` is the entries of that line.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Mappings(pub(crate) Vec<Vec<Mapping>>);

impl Deref for Mappings {
    type Target = [Vec<Mapping>];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(feature = "builder")]
impl Mappings {
    /// Creates a new `Mappings` from the entries of each generated line.
    ///
    /// The entries of every line will be sorted by their generated columns to ensure data valid.
    pub fn new(mut lines: Vec<Vec<Mapping>>) -> Self {
        for line in &mut lines {
            line.sort_by_key(Mapping::column);
        }
        let mut v = Self(lines);
        v.trim();
        v
    }
}

impl Mappings {
    /// Returns the entries of the given generated line, empty if the line has none.
    #[inline]
    pub fn line(&self, line: u32) -> &[Mapping] {
        self.0.get(line as usize).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterates over all entries together with their generated positions.
    pub fn iter_positions(&self) -> impl Iterator<Item = (Position, &Mapping)> {
        self.0.iter().enumerate().flat_map(|(line, entries)| {
            entries
                .iter()
                .map(move |m| (Position::new(line as u32, m.column()), m))
        })
    }

    /// Returns the total number of entries.
    pub fn entry_count(&self) -> usize {
        self.0.iter().map(Vec::len).sum()
    }

    /// Finds the mapping for a given generated position.
    ///
    /// If an exact match is not found, this method returns the closest preceding mapping
    /// on the same line. If there is none, it returns `None`.
    pub fn find_mapping<P>(&self, pos: P) -> Option<Mapping>
    where
        P: Into<Position>,
    {
        let pos = pos.into();
        let entries = self.line(pos.line);
        match entries.partition_point(|m| m.column() <= pos.column) {
            0 => None,
            idx => Some(entries[idx - 1]),
        }
    }
}

impl Mappings {
    /// Appends an entry to a generated line.
    ///
    /// An entry at the same column as the last entry of the line replaces it. An entry
    /// before the last entry would break the order and is dropped; returns `false` then.
    pub(crate) fn push(&mut self, line: u32, mapping: Mapping) -> bool {
        let line = line as usize;
        if self.0.len() <= line {
            self.0.resize_with(line + 1, Vec::new);
        }

        let entries = &mut self.0[line];
        match entries.last_mut() {
            Some(last) if last.column() == mapping.column() => *last = mapping,
            Some(last) if last.column() > mapping.column() => return false,
            _ => entries.push(mapping),
        }
        true
    }

    /// Rewrites source and name ids through the given tables.
    ///
    /// An id missing from its table is dropped: the source (and its name) for a source
    /// id, the name alone for a name id.
    pub(crate) fn remap(&mut self, sources: &[Option<u32>], names: &[Option<u32>]) {
        for mapping in self.0.iter_mut().flatten() {
            let Some(source_info) = mapping.source_info() else {
                continue;
            };
            let mut remapped = Mapping::new(mapping.column());
            if let Some(source_id) = sources.get(source_info.id as usize).copied().flatten() {
                remapped = remapped.with_source(
                    source_id,
                    source_info.position.line,
                    source_info.position.column,
                );
                if let Some(name_id) = mapping
                    .name_info()
                    .and_then(|id| names.get(id as usize).copied().flatten())
                {
                    remapped = remapped.with_name(name_id);
                }
            }
            *mapping = remapped;
        }
    }

    /// Marks the sources and names referenced by at least one entry.
    pub(crate) fn usage(&self, items_count: ItemsCount) -> (Vec<bool>, Vec<bool>) {
        let mut sources = vec![false; items_count.sources as usize];
        let mut names = vec![false; items_count.names as usize];
        for mapping in self.0.iter().flatten() {
            if let Some(source_info) = mapping.source_info() {
                if let Some(used) = sources.get_mut(source_info.id as usize) {
                    *used = true;
                }
                if let Some(used) = mapping.name_info().and_then(|id| names.get_mut(id as usize))
                {
                    *used = true;
                }
            }
        }
        (sources, names)
    }

    // drop trailing lines without entries
    fn trim(&mut self) {
        while self.0.last().is_some_and(Vec::is_empty) {
            self.0.pop();
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub(crate) struct ItemsCount {
    pub(crate) sources: u32,
    pub(crate) names: u32,
}

impl ItemsCount {
    pub fn new(sources: u32, names: u32) -> Self {
        Self { sources, names }
    }
}

impl Mappings {
    pub(crate) fn encode<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: Write,
    {
        let mut prev_source_id = 0;
        let mut prev_source_line = 0;
        let mut prev_source_col = 0;
        let mut prev_name_id = 0;

        for (line_idx, entries) in self.0.iter().enumerate() {
            if line_idx != 0 {
                writer.write_all(b";")?;
            }

            let mut prev_generated_col = 0;
            for (idx, mapping) in entries.iter().enumerate() {
                if idx != 0 {
                    writer.write_all(b",")?;
                }

                let mut encoder = VlqEncoder::new(writer);

                encoder.encode(prev_generated_col, mapping.column())?;
                prev_generated_col = mapping.column();

                if let Some(source_info) = mapping.source_info() {
                    encoder.encode(prev_source_id, source_info.id)?;
                    prev_source_id = source_info.id;

                    encoder.encode(prev_source_line, source_info.position.line)?;
                    prev_source_line = source_info.position.line;

                    encoder.encode(prev_source_col, source_info.position.column)?;
                    prev_source_col = source_info.position.column;

                    if let Some(name_id) = mapping.name_info() {
                        encoder.encode(prev_name_id, name_id)?;
                        prev_name_id = name_id;
                    }
                }
            }
        }

        Ok(())
    }

    pub(crate) fn validate(&self, items_count: ItemsCount) -> Result<()> {
        // 1. generated columns are in order on every line
        // 2. source_id has corresponding source
        // 3. name_id has corresponding name
        for entries in &self.0 {
            let mut last_column = 0;
            for mapping in entries {
                if mapping.column() < last_column {
                    return Err(Error::UnorderedMappings);
                }
                last_column = mapping.column();

                if let Some(source_info) = mapping.source_info() {
                    if source_info.id >= items_count.sources {
                        return Err(Error::UnknownSourceReference(source_info.id));
                    }
                    if let Some(name_id) = mapping.name_info() {
                        if name_id >= items_count.names {
                            return Err(Error::UnknownNameReference(name_id));
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

// applies a relative field to its previous absolute value
fn apply_delta(prev: u32, delta: i64) -> Option<u32> {
    u32::try_from(prev as i64 + delta).ok()
}

impl Mappings {
    pub(crate) fn decode(source: &str, items_count: ItemsCount) -> Result<Self> {
        let mut lines = Vec::new();
        let mut entries = Vec::new();

        let mut generated_col = 0;
        let mut source_id = 0;
        let mut source_line = 0;
        let mut source_col = 0;
        let mut name_id = 0;

        let mut decoder = VlqDecoder::new();

        for (segment, new_line) in MappingSplitter::new(source) {
            if !segment.is_empty() {
                let malformed = || Error::MappingMalformed(segment.to_owned());
                let nums = decoder.decode(segment)?;

                if nums[0] < 0 {
                    return Err(Error::UnorderedMappings);
                }
                generated_col = apply_delta(generated_col, nums[0]).ok_or_else(malformed)?;
                let mut mapping = Mapping::new(generated_col);

                if nums.len() >= 4 {
                    source_id = apply_delta(source_id, nums[1]).ok_or_else(malformed)?;
                    if source_id >= items_count.sources {
                        return Err(Error::UnknownSourceReference(source_id));
                    }
                    source_line = apply_delta(source_line, nums[2]).ok_or_else(malformed)?;
                    source_col = apply_delta(source_col, nums[3]).ok_or_else(malformed)?;
                    mapping = mapping.with_source(source_id, source_line, source_col);

                    if nums.len() == 5 {
                        name_id = apply_delta(name_id, nums[4]).ok_or_else(malformed)?;
                        if name_id >= items_count.names {
                            return Err(Error::UnknownNameReference(name_id));
                        }
                        mapping = mapping.with_name(name_id);
                    }
                }

                entries.push(mapping);
            }

            if new_line {
                lines.push(std::mem::take(&mut entries));
                generated_col = 0;
            }
        }
        lines.push(entries);

        let mut mappings = Self(lines);
        mappings.trim();
        Ok(mappings)
    }
}

#[cfg(test)]
mod tests {
    use super::{ItemsCount, Mappings};
    use crate::{Error, Mapping, Position};

    fn encode_to_string(mappings: &Mappings) -> String {
        let mut buf = Vec::new();
        mappings.encode(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_push_last_write_wins() {
        let mut mappings = Mappings::default();
        assert!(mappings.push(2, Mapping::new(0).with_source(0, 0, 0)));
        assert!(mappings.push(2, Mapping::new(4).with_source(0, 0, 4)));
        assert!(mappings.push(2, Mapping::new(4).with_source(1, 7, 1)));
        assert!(!mappings.push(2, Mapping::new(3).with_source(0, 0, 3)));

        assert_eq!(mappings.len(), 3);
        assert!(mappings.line(0).is_empty());
        assert_eq!(
            mappings.line(2),
            &[
                Mapping::new(0).with_source(0, 0, 0),
                Mapping::new(4).with_source(1, 7, 1)
            ]
        );
    }

    #[test]
    fn test_find_mapping() {
        let mut mappings = Mappings::default();
        mappings.push(0, Mapping::new(2).with_source(0, 0, 0));
        mappings.push(0, Mapping::new(8).with_source(0, 0, 9));

        assert_eq!(mappings.find_mapping((0, 1)), None);
        assert_eq!(
            mappings.find_mapping((0, 5)),
            Some(Mapping::new(2).with_source(0, 0, 0))
        );
        assert_eq!(
            mappings.find_mapping(Position::new(0, 8)),
            Some(Mapping::new(8).with_source(0, 0, 9))
        );
        assert_eq!(mappings.find_mapping((3, 0)), None);
    }

    #[test]
    fn test_encode() {
        let mut mappings = Mappings::default();
        mappings.push(0, Mapping::new(0).with_source(0, 1, 2));
        mappings.push(0, Mapping::new(4).with_source(0, 1, 6).with_name(0));
        mappings.push(2, Mapping::new(2).with_source(1, 0, 0));
        mappings.push(2, Mapping::new(5));
        insta::assert_snapshot!(encode_to_string(&mappings), @"AACE,IAAIA;;ECDN,G");
    }

    #[test]
    fn test_decode() {
        let decoded = Mappings::decode("AACE,IAAIA;;ECDN,G;;", ItemsCount::new(2, 1)).unwrap();
        assert_eq!(decoded.len(), 3);
        assert_eq!(decoded.entry_count(), 4);
        assert_eq!(
            decoded.line(2),
            &[Mapping::new(2).with_source(1, 0, 0), Mapping::new(5)]
        );
        assert_eq!(
            decoded.iter_positions().nth(1),
            Some((
                Position::new(0, 4),
                &Mapping::new(4).with_source(0, 1, 6).with_name(0)
            ))
        );
        assert_eq!(encode_to_string(&decoded), "AACE,IAAIA;;ECDN,G");
    }

    #[test]
    fn test_decode_errors() {
        let count = ItemsCount::new(1, 0);
        assert!(matches!(
            Mappings::decode("IAAA,DAAA", count),
            Err(Error::UnorderedMappings)
        ));
        assert!(matches!(
            Mappings::decode("ACAA", count),
            Err(Error::UnknownSourceReference(1))
        ));
        assert!(matches!(
            Mappings::decode("AAAAA", count),
            Err(Error::UnknownNameReference(0))
        ));
        assert!(matches!(
            Mappings::decode("AADA", count),
            Err(Error::MappingMalformed(..))
        ));
        assert!(matches!(
            Mappings::decode("AA", count),
            Err(Error::MappingMalformed(..))
        ));
    }

    #[test]
    fn test_validate_and_usage() {
        let mut mappings = Mappings::default();
        mappings.push(0, Mapping::new(0).with_source(2, 0, 0).with_name(1));
        assert!(mappings.validate(ItemsCount::new(3, 2)).is_ok());
        assert!(matches!(
            mappings.validate(ItemsCount::new(2, 2)),
            Err(Error::UnknownSourceReference(2))
        ));

        let (sources, names) = mappings.usage(ItemsCount::new(3, 2));
        assert_eq!(sources, vec![false, false, true]);
        assert_eq!(names, vec![false, true]);

        mappings.remap(&[None, None, Some(0)], &[None, Some(0)]);
        assert_eq!(
            mappings.line(0),
            &[Mapping::new(0).with_source(0, 0, 0).with_name(0)]
        );
    }
}
