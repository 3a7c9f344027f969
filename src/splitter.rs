use memchr::Memchr2;

/// Splits an encoded `mappings` string into segments.
#[derive(Debug)]
pub(crate) struct MappingSplitter<'a> {
    string: &'a str,
    cur_start: usize,
    memchr: Memchr2<'a>,
}

impl<'a> MappingSplitter<'a> {
    pub fn new(string: &'a str) -> Self {
        Self {
            string,
            memchr: memchr::memchr2_iter(b';', b',', string.as_bytes()),
            cur_start: 0,
        }
    }
}

impl<'a> Iterator for MappingSplitter<'a> {
    // segment, next_new_line
    type Item = (&'a str, bool);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cur_start > self.string.len() {
            return None;
        }
        let (cur_end, new_line) = match self.memchr.next() {
            None => (self.string.len(), false),
            Some(end) => (end, self.string.as_bytes()[end] == b';'),
        };
        let segment = &self.string[self.cur_start..cur_end];
        self.cur_start = cur_end + 1;
        Some((segment, new_line))
    }
}

/// A line break found in written text.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum LineBreak {
    Lf,
    Cr,
    CrLf,
}

impl LineBreak {
    pub fn as_str(self) -> &'static str {
        match self {
            LineBreak::Lf => "\n",
            LineBreak::Cr => "\r",
            LineBreak::CrLf => "\r\n",
        }
    }
}

/// Splits text into lines, recognizing `\r\n`, `\r` and `\n`.
///
/// Yields each line together with the break that ends it. The last line has no break;
/// it is not yielded at all when empty, so text ending with a break (or empty text)
/// produces no trailing item.
#[derive(Debug)]
pub(crate) struct LineSplitter<'a> {
    text: &'a str,
    cur_start: usize,
    memchr: Memchr2<'a>,
}

impl<'a> LineSplitter<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            memchr: memchr::memchr2_iter(b'\r', b'\n', text.as_bytes()),
            cur_start: 0,
        }
    }
}

impl<'a> Iterator for LineSplitter<'a> {
    type Item = (&'a str, Option<LineBreak>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cur_start >= self.text.len() {
            return None;
        }

        let bytes = self.text.as_bytes();
        let Some(end) = self.memchr.next() else {
            let line = &self.text[self.cur_start..];
            self.cur_start = self.text.len();
            return Some((line, None));
        };

        let line_break = match bytes[end] {
            b'\r' if bytes.get(end + 1) == Some(&b'\n') => {
                // the `\n` of the pair is not a break of its own
                self.memchr.next();
                LineBreak::CrLf
            }
            b'\r' => LineBreak::Cr,
            _ => LineBreak::Lf,
        };

        let line = &self.text[self.cur_start..end];
        self.cur_start = end + line_break.as_str().len();
        Some((line, Some(line_break)))
    }
}

#[cfg(test)]
mod tests {
    use super::{LineSplitter, MappingSplitter};

    #[test]
    fn test_mapping_splitter() {
        let text =
      ";;yZCTnK,IAAO5F,gBAAkB,YACzB,IAAOC,YAAcC,UACrB;IAAOC,oBAAsB,YAE7B,EAAQ,QAER,EAAQ;;cAAe";

        let result = MappingSplitter::new(text)
            .map(|(s, n)| format!("[{}:{}]", s, n))
            .collect::<String>();
        insta::assert_snapshot!(result, @"[:true][:true][yZCTnK:false][IAAO5F:false][gBAAkB:false][YACzB:false][IAAOC:false][YAAcC:false][UACrB:true][IAAOC:false][oBAAsB:false][YAE7B:false][EAAQ:false][QAER:false][EAAQ:true][:true][cAAe:false]");
    }

    fn split_lines(text: &str) -> String {
        LineSplitter::new(text)
            .map(|(line, brk)| format!("[{}:{:?}]", line, brk))
            .collect()
    }

    #[test]
    fn test_line_splitter() {
        insta::assert_snapshot!(split_lines("a\r\n\rb\nc"), @"[a:Some(CrLf)][:Some(Cr)][b:Some(Lf)][c:None]");
        insta::assert_snapshot!(split_lines("abc\n"), @"[abc:Some(Lf)]");
        insta::assert_snapshot!(split_lines("\r"), @"[:Some(Cr)]");
        assert_eq!(LineSplitter::new("").count(), 0);
    }
}
