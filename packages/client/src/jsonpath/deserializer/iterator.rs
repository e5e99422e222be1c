//! Iterator over values matched in a JSON byte stream
//!
//! Pulls fixed-size chunks from a reader, feeds them to the state machine,
//! and deserializes each matched value as soon as it closes. Only the value
//! currently being matched is held in memory.

use std::io::{self, Read};
use std::iter::FusedIterator;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::{
    config::BufferConfig,
    jsonpath::{
        compiler::JsonPathParser,
        error::{JsonPathError, JsonPathResult},
        expression::JsonPathExpression,
        state_machine::{JsonStreamState, ObjectBoundary, StreamStateMachine},
    },
    telemetry::jsonpath::{CapacityStats, StreamStats},
};

/// Streaming iterator yielding every value selected by a path expression
///
/// Values whose JSON is well formed but does not fit `T` are yielded as
/// recoverable `Record` errors and iteration continues. Any other error is
/// yielded once and ends the iteration.
pub struct JsonPathStream<R, T> {
    reader: R,
    machine: StreamStateMachine,
    chunk: Vec<u8>,
    /// Unprocessed bytes are `chunk[start..end]`
    start: usize,
    end: usize,
    stats: StreamStats,
    finished: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<R, T> JsonPathStream<R, T>
where
    R: Read,
    T: DeserializeOwned,
{
    #[must_use]
    pub fn new(reader: R, expression: JsonPathExpression, buffers: &BufferConfig) -> Self {
        Self {
            reader,
            machine: StreamStateMachine::new(
                expression,
                buffers.capture_capacity,
                buffers.capture_retain_limit,
            ),
            chunk: vec![0; buffers.parse_chunk_size.max(1)],
            start: 0,
            end: 0,
            stats: StreamStats::new(),
            finished: false,
            _marker: PhantomData,
        }
    }

    /// Compile `path` and stream the values it selects from `reader`
    ///
    /// # Errors
    ///
    /// Returns an `InvalidPath` error if `path` does not compile.
    pub fn from_path(reader: R, path: &str, buffers: &BufferConfig) -> JsonPathResult<Self> {
        Ok(Self::new(reader, JsonPathParser::compile(path)?, buffers))
    }

    /// Shared counters for this stream
    #[must_use]
    pub fn stats(&self) -> StreamStats {
        self.stats.clone()
    }

    #[must_use]
    pub fn capture_stats(&self) -> CapacityStats {
        self.machine.capture_stats()
    }

    #[must_use]
    pub fn state(&self) -> &JsonStreamState {
        self.machine.state()
    }

    #[must_use]
    pub fn expression(&self) -> &JsonPathExpression {
        self.machine.expression()
    }

    /// Advance to the next matched value
    fn advance(&mut self) -> Option<JsonPathResult<T>> {
        loop {
            if self.finished {
                return None;
            }

            if self.start == self.end {
                match self.reader.read(&mut self.chunk) {
                    Ok(0) => {
                        self.finished = true;
                        return match self.machine.finish() {
                            Ok(Some(boundary)) => Some(self.deserialize_capture(boundary)),
                            Ok(None) => None,
                            Err(err) => Some(Err(err)),
                        };
                    }
                    Ok(read) => {
                        self.start = 0;
                        self.end = read;
                    }
                    Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                    Err(err) => {
                        let err = JsonPathError::io(err, self.machine.offset());
                        self.machine.fail(&err);
                        self.finished = true;
                        return Some(Err(err));
                    }
                }
            }

            match self.machine.process_bytes(&self.chunk[self.start..self.end]) {
                Ok((consumed, boundary)) => {
                    self.start += consumed;
                    self.stats.record_bytes(consumed);
                    if let Some(boundary) = boundary {
                        return Some(self.deserialize_capture(boundary));
                    }
                }
                Err(err) => {
                    self.finished = true;
                    return Some(Err(err));
                }
            }
        }
    }

    fn deserialize_capture(&mut self, boundary: ObjectBoundary) -> JsonPathResult<T> {
        let result = serde_json::from_slice::<T>(self.machine.captured());
        self.machine.release_capture();

        match result {
            Ok(value) => {
                self.stats.record_object();
                Ok(value)
            }
            Err(e) if e.is_data() => {
                self.stats.record_error();
                Err(JsonPathError::record(
                    format!("Matched value does not fit the expected shape: {e}"),
                    boundary.start,
                ))
            }
            Err(e) => {
                let err = JsonPathError::syntax(
                    format!("Matched value could not be deserialized: {e}"),
                    boundary.start,
                );
                self.machine.fail(&err);
                self.finished = true;
                Err(err)
            }
        }
    }
}

impl<R, T> Iterator for JsonPathStream<R, T>
where
    R: Read,
    T: DeserializeOwned,
{
    type Item = JsonPathResult<T>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.advance()
    }
}

impl<R, T> FusedIterator for JsonPathStream<R, T>
where
    R: Read,
    T: DeserializeOwned,
{
}

impl<R, T> std::fmt::Debug for JsonPathStream<R, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonPathStream")
            .field("state", self.machine.state())
            .field("offset", &self.machine.offset())
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use serde::Deserialize;

    use super::*;
    use crate::jsonpath::error::ErrorKind;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        x: u32,
    }

    fn small_buffers() -> BufferConfig {
        BufferConfig::low_memory().with_parse_chunk_size(3)
    }

    #[test]
    fn record_errors_do_not_stop_the_stream() {
        let doc = r#"{"a":[{"x":1},{"x":"bad"},{"x":3}]}"#;
        let mut stream =
            JsonPathStream::<_, Item>::from_path(Cursor::new(doc), "a.item", &small_buffers())
                .expect("valid path");

        assert_eq!(stream.next().map(|r| r.ok()), Some(Some(Item { x: 1 })));
        let err = stream.next().expect("item").expect_err("bad record");
        assert_eq!(err.kind, ErrorKind::Record);
        assert!(err.is_recoverable());
        assert_eq!(stream.next().map(|r| r.ok()), Some(Some(Item { x: 3 })));
        assert!(stream.next().is_none());
        assert!(stream.next().is_none());

        let stats = stream.stats().snapshot();
        assert_eq!(stats.objects_yielded, 2);
        assert_eq!(stats.record_errors, 1);
        assert_eq!(stats.bytes_processed, doc.len() as u64);
        assert_eq!(stream.state(), &JsonStreamState::Complete);
    }

    #[test]
    fn syntax_error_ends_the_stream() {
        let doc = r#"{"a":[{"x":1},{"x":2]]}"#;
        let mut stream =
            JsonPathStream::<_, Item>::from_path(Cursor::new(doc), "a.item", &small_buffers())
                .expect("valid path");

        assert!(matches!(stream.next(), Some(Ok(Item { x: 1 }))));
        let err = stream.next().expect("error").expect_err("syntax");
        assert_eq!(err.kind, ErrorKind::Syntax);
        assert!(stream.next().is_none());
    }

    struct FailingReader {
        data: Cursor<Vec<u8>>,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.data.read(buf)? {
                0 => Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset")),
                n => Ok(n),
            }
        }
    }

    #[test]
    fn reader_failure_is_fatal_after_emitted_values() {
        let reader = FailingReader {
            data: Cursor::new(br#"{"a":[{"x":1},{"x":2"#.to_vec()),
        };
        let mut stream =
            JsonPathStream::<_, Item>::from_path(reader, "a.item", &small_buffers())
                .expect("valid path");

        assert!(matches!(stream.next(), Some(Ok(Item { x: 1 }))));
        let err = stream.next().expect("error").expect_err("io");
        assert_eq!(err.kind, ErrorKind::Io);
        assert!(std::error::Error::source(&err).is_some());
        assert!(stream.next().is_none());
    }

    #[test]
    fn truncated_document_reports_unexpected_eof() {
        let mut stream = JsonPathStream::<_, serde_json::Value>::from_path(
            Cursor::new(r#"{"a":[1,2"#),
            "a.item",
            &small_buffers(),
        )
        .expect("valid path");

        assert_eq!(stream.next().and_then(Result::ok), Some(serde_json::json!(1)));
        let err = stream.next().expect("error").expect_err("eof");
        assert_eq!(err.kind, ErrorKind::UnexpectedEof);
        assert!(stream.next().is_none());
    }
}
