use crate::writer::text_width;

/// The indentation prefix re-inserted after every line break.
#[derive(Debug, Clone)]
pub(crate) struct Indent {
    unit: String,
    unit_width: u32,
    current: String,
    width: u32,
}

impl Indent {
    pub fn new(unit: &str) -> Self {
        Self {
            unit: unit.to_owned(),
            unit_width: text_width(unit),
            current: String::new(),
            width: 0,
        }
    }

    pub fn push(&mut self) {
        self.current.push_str(&self.unit);
        self.width += self.unit_width;
    }

    /// Removes one unit; past zero the indent stays empty.
    pub fn pop(&mut self) {
        match self.current.len().checked_sub(self.unit.len()) {
            Some(len) => {
                self.current.truncate(len);
                self.width -= self.unit_width;
            }
            None => {
                self.current.clear();
                self.width = 0;
            }
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.current
    }

    /// Width of the current indent, in columns.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::new("\t")
    }
}

#[cfg(test)]
mod tests {
    use super::Indent;

    #[test]
    fn test_indent_round_trip() {
        let mut indent = Indent::new("  ");
        indent.push();
        indent.push();
        assert_eq!(indent.as_str(), "    ");
        assert_eq!(indent.width(), 4);

        indent.pop();
        assert_eq!(indent.as_str(), "  ");
        indent.pop();
        assert!(indent.is_empty());

        indent.pop();
        assert!(indent.is_empty());
        assert_eq!(indent.width(), 0);
    }

    #[test]
    fn test_indent_width_utf16() {
        let mut indent = Indent::new("→");
        indent.push();
        assert_eq!(indent.width(), 1);
        indent.pop();
        assert_eq!(indent.width(), 0);

        // outside the BMP, a surrogate pair
        let mut indent = Indent::new("😀");
        indent.push();
        indent.push();
        assert_eq!(indent.width(), 4);
    }
}
