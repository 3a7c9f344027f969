use crate::target::OutputTarget;
use std::io;
use std::ops::{Bound, RangeBounds};
use tracing::trace;

const DEFAULT_CAPACITY: usize = 1024;

/// A byte buffer for binary output that grows geometrically.
///
/// `capacity` is the size of the backing store the buffer asked for. When an append does
/// not fit, the store is grown to `max(required, capacity * 2 - 1)`, so appending is
/// amortized O(1) per byte. The capacity never shrinks.
#[derive(Debug, Clone)]
pub struct GrowableBuffer {
    data: Vec<u8>,
    capacity: usize,
}

impl Default for GrowableBuffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl GrowableBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// The number of bytes written.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The bytes written so far.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Appends `bytes`, growing the buffer first when they do not fit.
    pub fn append(&mut self, bytes: &[u8]) {
        let required = self.data.len() + bytes.len();
        if required > self.capacity {
            self.grow(required);
        }
        self.data.extend_from_slice(bytes);
    }

    fn grow(&mut self, required: usize) {
        let capacity = required.max(self.capacity.saturating_mul(2).saturating_sub(1));
        trace!(from = self.capacity, to = capacity, "growing buffer");
        self.data.reserve_exact(capacity - self.data.len());
        self.capacity = capacity;
    }

    /// Copies out the bytes in `range`, clamped to the written length.
    ///
    /// The copy is independent of the buffer: later appends do not affect it.
    pub fn extract<R>(&self, range: R) -> Vec<u8>
    where
        R: RangeBounds<usize>,
    {
        let len = self.data.len();
        let end = match range.end_bound() {
            Bound::Included(&end) => end.saturating_add(1),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => len,
        }
        .min(len);
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.saturating_add(1),
            Bound::Unbounded => 0,
        }
        .min(end);
        self.data[start..end].to_vec()
    }

    /// Commits every written byte to `target`.
    pub fn finish(self, target: &mut dyn OutputTarget) {
        target.set_bytes(self.data);
    }
}

impl io::Write for GrowableBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf);
        Ok(buf.len())
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.append(buf);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::GrowableBuffer;
    use crate::{OutputFile, SourceMap};

    #[test]
    fn test_growth() {
        let mut buffer = GrowableBuffer::with_capacity(4);
        let chunks: [&[u8]; 4] = [b"abc", b"defgh", b"", b"ijklmnopqrstuvwxyz"];
        let mut expected = Vec::new();
        for chunk in chunks {
            buffer.append(chunk);
            expected.extend_from_slice(chunk);
            assert!(buffer.len() <= buffer.capacity());
        }

        assert_eq!(buffer.len(), 26);
        assert!(buffer.capacity() >= 26);
        assert_eq!(buffer.extract(..), expected);
        assert_eq!(buffer.extract(0..26), expected);
    }

    #[test]
    fn test_growth_factor() {
        let mut buffer = GrowableBuffer::with_capacity(8);
        buffer.append(&[0; 8]);
        assert_eq!(buffer.capacity(), 8);
        buffer.append(&[1]);
        assert_eq!(buffer.capacity(), 15);
        buffer.append(&[2; 40]);
        assert_eq!(buffer.capacity(), 49);
    }

    #[test]
    fn test_extract_is_isolated() {
        let mut buffer = GrowableBuffer::with_capacity(2);
        buffer.append(b"hello");
        let hello = buffer.extract(1..4);
        buffer.append(b" world, and then some more bytes");

        assert_eq!(hello, b"ell");
        assert_eq!(buffer.extract(6..=10), b"world");
        assert_eq!(buffer.extract(33..100), b"ytes");
        assert!(buffer.extract(100..).is_empty());
    }

    #[test]
    fn test_finish_and_io_write() {
        let sm: SourceMap = r#"{"version":3,"sources":["a.js"],"mappings":"AAAA"}"#
            .parse()
            .unwrap();
        let mut buffer = GrowableBuffer::with_capacity(1);
        sm.write(&mut buffer).unwrap();

        let mut file = OutputFile::new("a.js.map");
        buffer.finish(&mut file);
        insta::assert_snapshot!(
            std::str::from_utf8(file.bytes().unwrap()).unwrap(),
            @r###"{"version":3,"sources":["a.js"],"mappings":"AAAA"}"###
        );
    }
}
