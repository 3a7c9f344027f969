use indexmap::IndexSet;

/// An ordered, deduplicated list of strings, used for `sources` and `names`.
///
/// The id of a string is its insertion index and never changes until [Self::compact].
#[derive(Debug, Clone, Default)]
pub(crate) struct Interner(IndexSet<String>);

impl Interner {
    /// Returns the id of `value`, inserting it at the end if it is new.
    pub fn intern(&mut self, value: &str) -> u32 {
        match self.0.get_index_of(value) {
            Some(idx) => idx as u32,
            None => self.0.insert_full(value.to_owned()).0 as u32,
        }
    }

    pub fn get(&self, id: u32) -> Option<&str> {
        self.0.get_index(id as usize).map(String::as_str)
    }

    pub fn len(&self) -> u32 {
        self.0.len() as u32
    }

    /// Removes the entries not marked in `used`, keeping the order of the rest.
    ///
    /// Returns, for every old id, its new id (`None` for removed entries).
    pub fn compact(&mut self, used: &[bool]) -> Vec<Option<u32>> {
        let mut remap = Vec::with_capacity(self.0.len());
        let mut next_id = 0;
        for idx in 0..self.0.len() {
            if used.get(idx).copied().unwrap_or(false) {
                remap.push(Some(next_id));
                next_id += 1;
            } else {
                remap.push(None);
            }
        }

        let mut idx = 0;
        self.0.retain(|_| {
            let keep = remap[idx].is_some();
            idx += 1;
            keep
        });

        remap
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0.into_iter().collect()
    }
}
