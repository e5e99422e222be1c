//! Incremental UTF-8 validation
//!
//! Validates decompressed bytes before they reach the parser. A multi-byte
//! sequence split across reads is held back until its remaining bytes arrive.

use std::io::{self, Read};

use crate::error;

const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Text decoding stage of the pipeline
///
/// Passes through only bytes that are known to be valid UTF-8 and strips a
/// leading byte-order mark.
pub struct Utf8Stage<R> {
    inner: R,
    buf: Vec<u8>,
    /// `buf[start..valid]` is validated and ready; `buf[valid..end]` is an
    /// incomplete trailing sequence
    start: usize,
    valid: usize,
    end: usize,
    bom_checked: bool,
    /// Bytes validated so far, for error reporting
    offset: u64,
}

impl<R: Read> Utf8Stage<R> {
    pub fn new(inner: R) -> Self {
        Self::with_capacity(64 * 1024, inner)
    }

    pub fn with_capacity(capacity: usize, inner: R) -> Self {
        Self {
            inner,
            buf: vec![0; capacity.max(8)],
            start: 0,
            valid: 0,
            end: 0,
            bom_checked: false,
            offset: 0,
        }
    }

    /// Read and validate the next block into the internal buffer
    ///
    /// Returns `false` at end of input.
    fn fill(&mut self) -> io::Result<bool> {
        let tail = self.end - self.valid;
        self.buf.copy_within(self.valid..self.end, 0);
        self.start = 0;
        self.valid = 0;
        self.end = tail;

        let read = self.inner.read(&mut self.buf[self.end..])?;
        if read == 0 {
            if self.end > 0 {
                return Err(error::decode(format!(
                    "incomplete UTF-8 sequence at end of input (offset {})",
                    self.offset
                ))
                .into_io());
            }
            return Ok(false);
        }
        self.end += read;

        if !self.bom_checked {
            if self.end < BOM.len() && BOM.starts_with(&self.buf[..self.end]) {
                // Not enough bytes to decide; the prefix is also an
                // incomplete sequence and is carried over below.
            } else {
                self.bom_checked = true;
                if self.buf[..self.end].starts_with(BOM) {
                    self.start = BOM.len();
                    self.valid = BOM.len();
                }
            }
        }

        match simdutf8::compat::from_utf8(&self.buf[self.valid..self.end]) {
            Ok(_) => self.valid = self.end,
            Err(err) => match err.error_len() {
                None => self.valid += err.valid_up_to(),
                Some(_) => {
                    return Err(error::decode(format!(
                        "invalid UTF-8 sequence at offset {}",
                        self.offset + (self.valid - self.start + err.valid_up_to()) as u64
                    ))
                    .into_io());
                }
            },
        }
        self.offset += (self.valid - self.start) as u64;
        Ok(true)
    }
}

impl<R: Read> Read for Utf8Stage<R> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if out.is_empty() {
            return Ok(0);
        }
        while self.start == self.valid {
            if !self.fill()? {
                return Ok(0);
            }
        }

        let count = out.len().min(self.valid - self.start);
        out[..count].copy_from_slice(&self.buf[self.start..self.start + count]);
        self.start += count;
        Ok(count)
    }
}
