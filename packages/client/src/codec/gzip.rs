//! Streaming gzip decompression
//!
//! Payer indexes are published as gzip files, sometimes concatenated from
//! several members, so every member is decoded in sequence.

use std::io::{self, Read};

use flate2::read::MultiGzDecoder;

use crate::error::{self, Error};

/// Gzip decoding stage of the pipeline
///
/// Errors raised by earlier stages pass through with their own
/// classification; anything else the decoder reports is a decompression
/// failure.
pub struct GzipStage<R: Read> {
    decoder: MultiGzDecoder<R>,
    bytes_out: u64,
    finished: bool,
}

impl<R: Read> GzipStage<R> {
    pub fn new(inner: R) -> Self {
        Self {
            decoder: MultiGzDecoder::new(inner),
            bytes_out: 0,
            finished: false,
        }
    }

    /// Decompressed bytes produced so far
    #[must_use]
    pub fn bytes_out(&self) -> u64 {
        self.bytes_out
    }

    pub fn get_ref(&self) -> &R {
        self.decoder.get_ref()
    }
}

impl<R: Read> Read for GzipStage<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.decoder.read(buf) {
            Ok(0) if !buf.is_empty() => {
                if !self.finished {
                    self.finished = true;
                    tracing::debug!(
                        target: "mrf_index::codec::gzip",
                        bytes_out = self.bytes_out,
                        "Gzip stream finished"
                    );
                }
                Ok(0)
            }
            Ok(read) => {
                self.bytes_out += read as u64;
                Ok(read)
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => Err(err),
            Err(err) => Err(classify(err, self.bytes_out)),
        }
    }
}

fn classify(err: io::Error, bytes_out: u64) -> io::Error {
    if err.get_ref().is_some_and(|inner| inner.is::<Error>()) {
        return err;
    }
    let message = if err.kind() == io::ErrorKind::UnexpectedEof {
        format!("gzip stream truncated after {bytes_out} decompressed bytes")
    } else {
        format!("corrupt gzip data after {bytes_out} decompressed bytes: {err}")
    };
    error::decompression(message).into_io()
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use flate2::{Compression, write::GzEncoder};

    use super::*;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).expect("write");
        encoder.finish().expect("finish")
    }

    #[test]
    fn decodes_concatenated_members() {
        let mut data = gzip(b"{\"a\":");
        data.extend(gzip(b"[1]}"));

        let mut out = String::new();
        let mut stage = GzipStage::new(Cursor::new(data));
        stage.read_to_string(&mut out).expect("valid gzip");
        assert_eq!(out, "{\"a\":[1]}");
        assert_eq!(stage.bytes_out(), 9);
    }

    #[test]
    fn corrupt_input_is_a_decompression_error() {
        let mut stage = GzipStage::new(Cursor::new(b"definitely not gzip".to_vec()));
        let err = stage.read_to_end(&mut Vec::new()).expect_err("corrupt");
        assert!(Error::from_io(err).is_decompression());
    }

    #[test]
    fn truncated_input_is_a_decompression_error() {
        let data = gzip(&b"0123456789".repeat(1000));
        let truncated = data[..data.len() / 2].to_vec();

        let mut stage = GzipStage::new(Cursor::new(truncated));
        let err = stage.read_to_end(&mut Vec::new()).expect_err("truncated");
        assert!(Error::from_io(err).is_decompression());
    }

    struct ClosedReader;

    impl Read for ClosedReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(error::closed().into_io())
        }
    }

    #[test]
    fn upstream_errors_keep_their_kind() {
        let mut stage = GzipStage::new(ClosedReader);
        let err = stage.read(&mut [0; 16]).expect_err("closed");
        assert!(Error::from_io(err).is_closed());
    }
}
