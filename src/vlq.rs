//! Base64 VLQ, the number encoding used by the `mappings` field.

use crate::{Error, Result};
use std::io;
use std::io::Write;

const BASE64_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const BASE64_VALUES: [i8; 256] = get_base64_map();

const VLQ_SHIFT: u32 = 5;
const VLQ_MASK: i64 = 0b11111;
const VLQ_CONTINUATION: i64 = 0b100000;

// a segment has 1, 4 or 5 fields
const MAX_FIELDS: usize = 5;

const fn get_base64_map() -> [i8; 256] {
    let mut res = [-1i8; 256];
    // `for in` is not allowed in const fn
    let mut idx = 0;
    while idx < 64 {
        res[BASE64_CHARS[idx] as usize] = idx as i8;
        idx += 1;
    }
    res
}

#[derive(Debug)]
pub(crate) struct VlqDecoder {
    buf: [i64; MAX_FIELDS],
}

impl VlqDecoder {
    pub fn new() -> Self {
        Self {
            buf: [0; MAX_FIELDS],
        }
    }

    /// Decodes one segment into its signed fields.
    pub fn decode(&mut self, segment: &str) -> Result<&[i64]> {
        let malformed = || Error::MappingMalformed(segment.to_owned());

        let mut len = 0;
        let mut cur_value = 0i64;
        let mut shift = 0u32;

        for byte in segment.bytes() {
            let value = BASE64_VALUES[byte as usize];
            if value < 0 {
                return Err(malformed());
            }
            let value = value as i64;

            cur_value += (value & VLQ_MASK)
                .checked_shl(shift)
                .filter(|_| shift < 32)
                .ok_or_else(malformed)?;
            shift += VLQ_SHIFT;

            if value & VLQ_CONTINUATION == 0 {
                if len == MAX_FIELDS {
                    return Err(malformed());
                }
                let magnitude = cur_value >> 1;
                self.buf[len] = if cur_value & 1 == 1 {
                    -magnitude
                } else {
                    magnitude
                };
                len += 1;
                cur_value = 0;
                shift = 0;
            }
        }

        if shift != 0 || !matches!(len, 1 | 4 | 5) {
            return Err(malformed());
        }
        Ok(&self.buf[..len])
    }
}

#[derive(Debug)]
pub(crate) struct VlqEncoder<'a, W>
where
    W: Write,
{
    writer: &'a mut W,
}

impl<'a, W> VlqEncoder<'a, W>
where
    W: Write,
{
    pub fn new(writer: &'a mut W) -> Self {
        Self { writer }
    }

    /// Writes `cur` relative to `prev`.
    pub fn encode(&mut self, prev: u32, cur: u32) -> io::Result<()> {
        let delta = cur as i64 - prev as i64;

        let mut num = if delta < 0 {
            ((-delta) << 1) | 1
        } else {
            delta << 1
        };

        // at most 7 digits for a 33-bit value
        let mut digits = [0u8; 8];
        let mut len = 0;
        loop {
            let mut digit = num & VLQ_MASK;
            num >>= VLQ_SHIFT;
            if num != 0 {
                digit |= VLQ_CONTINUATION;
            }
            digits[len] = BASE64_CHARS[digit as usize];
            len += 1;
            if num == 0 {
                break;
            }
        }

        self.writer.write_all(&digits[..len])
    }
}
