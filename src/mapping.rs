use std::fmt::{Debug, Formatter};

/// `Position` represents a zero-based line and zero-based column in a file.
///
/// Columns count Unicode scalar values of the text, so a column never points into the
/// middle of a character.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const fn min() -> Self {
        Self { line: 0, column: 0 }
    }

    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl From<(u32, u32)> for Position {
    fn from((line, column): (u32, u32)) -> Self {
        Self::new(line, column)
    }
}

/// Presents a specific position in a specific source file.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SourceInfo {
    pub id: u32,
    pub position: Position,
}

impl SourceInfo {
    pub const fn new(id: u32, position: Position) -> Self {
        Self { id, position }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct OptionNum<const N: usize>([u32; N]);

impl<const N: usize> OptionNum<N> {
    const MISSING: u32 = 0xFFFFFFFF;

    #[inline]
    const fn missing() -> Self {
        Self([Self::MISSING; N])
    }

    #[inline]
    const fn new(v: [u32; N]) -> Self {
        Self(v)
    }

    #[inline]
    const fn get(&self) -> Option<&[u32; N]> {
        if self.is_missing() {
            None
        } else {
            Some(&self.0)
        }
    }

    #[inline]
    const fn is_missing(&self) -> bool {
        self.0[0] == Self::MISSING
    }
}

/// One entry of a generated line: a generated column and, optionally, the original
/// position it came from.
///
/// The generated line is not stored here, it is the index of the line the entry lives
/// on inside [Mappings](crate::Mappings).
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Mapping {
    column: u32,

    // [source_id, source_line, source_col]
    source: OptionNum<3>,

    // [name_id]
    name: OptionNum<1>,
}

impl Debug for Mapping {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column)?;
        if let Some(source_info) = self.source_info() {
            write!(
                f,
                " -> {}:{}:{}",
                source_info.id, source_info.position.line, source_info.position.column,
            )?;
            if let Some(name_id) = self.name_info() {
                write!(f, " ({})", name_id)?;
            }
        }
        Ok(())
    }
}

impl Mapping {
    #[inline(always)]
    pub const fn new(generated_col: u32) -> Self {
        Self {
            column: generated_col,
            source: OptionNum::missing(),
            name: OptionNum::missing(),
        }
    }

    #[inline(always)]
    pub const fn with_source(self, source_id: u32, source_line: u32, source_col: u32) -> Self {
        Self {
            source: OptionNum::new([source_id, source_line, source_col]),
            ..self
        }
    }

    #[inline(always)]
    pub const fn with_name(self, name_id: u32) -> Self {
        Self {
            name: OptionNum::new([name_id]),
            ..self
        }
    }

    /// Returns the same entry moved to another generated column.
    #[inline(always)]
    pub const fn with_column(self, generated_col: u32) -> Self {
        Self {
            column: generated_col,
            ..self
        }
    }

    /// Drops the name information, keeping everything else.
    #[inline(always)]
    pub const fn without_name(self) -> Self {
        Self {
            name: OptionNum::missing(),
            ..self
        }
    }
}

impl Mapping {
    /// Returns the generated column of the mapping.
    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Returns the source information if available.
    #[inline]
    pub fn source_info(&self) -> Option<SourceInfo> {
        self.source
            .get()
            .map(|&[source_id, source_line, source_col]| {
                SourceInfo::new(source_id, Position::new(source_line, source_col))
            })
    }

    /// Checks if the mapping has source information.
    #[inline]
    pub fn has_source(&self) -> bool {
        !self.source.is_missing()
    }

    /// Returns the name information if available.
    ///
    /// Note that in a mapping,
    /// name information will only be available if the source information is present.
    #[inline]
    pub fn name_info(&self) -> Option<u32> {
        self.name.get().map(|&[v]| v)
    }

    /// Checks if the mapping has name information.
    #[inline]
    pub fn has_name(&self) -> bool {
        !self.name.is_missing()
    }
}
