//! State machine core processing engine
//!
//! Drives chunks of decoded bytes through the byte processors, copies the
//! bytes of matched values into the capture buffer, and stops at each match
//! so the caller can consume it before parsing continues.

use super::{
    transitions,
    types::{
        Expect, JsonStreamState, Lexeme, ObjectBoundary, ProcessResult, StreamStateMachine,
    },
};
use crate::{
    jsonpath::{
        buffer::StreamBuffer,
        error::{ErrorKind, JsonPathError, JsonPathResult},
        expression::JsonPathExpression,
    },
    telemetry::jsonpath::CapacityStats,
};

impl StreamStateMachine {
    /// Create new state machine evaluating `expression`
    ///
    /// # Arguments
    ///
    /// * `expression` - Compiled path expression to match
    /// * `capture_capacity` - Initial capacity of the capture buffer
    /// * `retain_limit` - Capture capacity kept between matches
    #[must_use]
    pub fn new(
        expression: JsonPathExpression,
        capture_capacity: usize,
        retain_limit: usize,
    ) -> Self {
        Self {
            state: JsonStreamState::Initial,
            expression,
            stack: Vec::new(),
            expect: Expect::Value,
            lexeme: Lexeme::None,
            key_buffer: Vec::new(),
            key_tracked: false,
            key_escaped: false,
            capture: None,
            buffer: StreamBuffer::with_capacity(capture_capacity, retain_limit),
            offset: 0,
        }
    }

    /// Get current state (for testing and debugging)
    #[inline]
    #[must_use]
    pub fn state(&self) -> &JsonStreamState {
        &self.state
    }

    #[inline]
    #[must_use]
    pub fn expression(&self) -> &JsonPathExpression {
        &self.expression
    }

    /// Absolute offset of the next byte
    #[inline]
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Bytes of the value reported by the last boundary
    #[inline]
    #[must_use]
    pub fn captured(&self) -> &[u8] {
        self.buffer.as_bytes()
    }

    /// Discard the last captured value and free oversized capacity
    pub fn release_capture(&mut self) {
        self.buffer.release();
    }

    #[must_use]
    pub fn capture_stats(&self) -> CapacityStats {
        self.buffer.capacity_stats()
    }

    /// Process a chunk of decoded bytes
    ///
    /// Stops right after the first byte that completes a matched value and
    /// returns how many bytes of `data` were consumed together with the
    /// value's boundary. The value's bytes are available from
    /// [`captured`](Self::captured) until the next call.
    ///
    /// # Errors
    ///
    /// Returns a `Syntax` error for malformed JSON. The machine then moves
    /// to the error state and rejects all further input.
    pub fn process_bytes(&mut self, data: &[u8]) -> JsonPathResult<(usize, Option<ObjectBoundary>)> {
        self.ensure_accepting()?;
        let base = self.offset;

        for (pos, &byte) in data.iter().enumerate() {
            match self.process_byte(byte) {
                Ok(ProcessResult::Continue) => {}
                Ok(ProcessResult::ObjectBoundary { start, end }) => {
                    self.copy_captured(data, base, start, end);
                    return Ok((pos + 1, Some(ObjectBoundary { start, end })));
                }
                Err(err) => {
                    self.fail(&err);
                    return Err(err);
                }
            }
        }

        if let Some(capture) = self.capture {
            self.copy_captured(data, base, capture.start, base + data.len() as u64);
        }
        Ok((data.len(), None))
    }

    /// Signal end of input
    ///
    /// A number at the very end of the document is only complete once the
    /// input ends, so this may still report a boundary.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedEof` if the document is empty or any value is
    /// still open.
    pub fn finish(&mut self) -> JsonPathResult<Option<ObjectBoundary>> {
        match self.state {
            JsonStreamState::Complete => return Ok(None),
            JsonStreamState::Error { .. } => return Err(self.terminal_error()),
            JsonStreamState::Initial | JsonStreamState::Streaming => {}
        }

        let offset = self.offset;
        let mut boundary = None;
        if let Lexeme::Number(phase) = self.lexeme
            && phase.is_complete()
        {
            self.lexeme = Lexeme::None;
            if let ProcessResult::ObjectBoundary { start, end } = self.end_value(offset) {
                boundary = Some(ObjectBoundary { start, end });
            }
        }

        if self.lexeme != Lexeme::None || self.expect != Expect::Done {
            let err = if self.state == JsonStreamState::Initial {
                JsonPathError::new(ErrorKind::UnexpectedEof, "Empty document".into()).at(offset)
            } else {
                JsonPathError::unexpected_end_of_input(offset)
            };
            self.fail(&err);
            return Err(err);
        }

        transitions::transition_to_complete(self);
        Ok(boundary)
    }

    /// Move to the error state after a failure outside the machine
    pub fn fail(&mut self, error: &JsonPathError) {
        transitions::transition_to_error(self, error);
    }

    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == JsonStreamState::Complete
    }

    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        transitions::is_terminal_state(&self.state)
    }

    fn ensure_accepting(&self) -> JsonPathResult<()> {
        match self.state {
            JsonStreamState::Initial | JsonStreamState::Streaming => Ok(()),
            JsonStreamState::Complete => Err(JsonPathError::syntax(
                "Input after end of stream",
                self.offset,
            )),
            JsonStreamState::Error { .. } => Err(self.terminal_error()),
        }
    }

    fn terminal_error(&self) -> JsonPathError {
        match &self.state {
            JsonStreamState::Error { kind, message } => {
                JsonPathError::new(*kind, message.clone()).at(self.offset)
            }
            _ => JsonPathError::syntax("Stream is not in an error state", self.offset),
        }
    }

    /// Copy `start..end` (absolute offsets) of the current chunk into the capture buffer
    #[allow(clippy::cast_possible_truncation)]
    fn copy_captured(&mut self, data: &[u8], base: u64, start: u64, end: u64) {
        let from = start.saturating_sub(base) as usize;
        let to = (end.saturating_sub(base) as usize).min(data.len());
        if from < to {
            self.buffer.extend(&data[from..to]);
        }
    }
}
