//! Byte processors
//!
//! A strict JSON grammar driven one byte at a time. Structural bytes are
//! checked against [`Expect`]; strings, numbers, and literals are scanned by
//! their own processors. Object keys are only decoded while the enclosing
//! frames can still lead to a match.

use super::{
    transitions,
    types::{Capture, Escape, Expect, FrameIdentifier, Lexeme, NumberPhase, ProcessResult, StreamStateMachine},
};
use crate::jsonpath::error::{JsonPathError, JsonPathResult};

#[inline]
fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

impl StreamStateMachine {
    /// Process single byte and update state machine
    #[inline]
    pub(super) fn process_byte(&mut self, byte: u8) -> JsonPathResult<ProcessResult> {
        let offset = self.offset;
        self.offset += 1;

        match self.lexeme {
            Lexeme::None => self.process_structural_byte(byte, offset),
            Lexeme::String { key, escape } => self.process_string_byte(byte, offset, key, escape),
            Lexeme::Number(phase) => self.process_number_byte(byte, offset, phase),
            Lexeme::Literal { expected, position } => {
                self.process_literal_byte(byte, offset, expected, position)
            }
        }
    }

    fn process_structural_byte(&mut self, byte: u8, offset: u64) -> JsonPathResult<ProcessResult> {
        if is_whitespace(byte) {
            return Ok(ProcessResult::Continue);
        }
        transitions::transition_to_streaming(self);

        match (self.expect, byte) {
            (Expect::Value, _) => self.begin_value(byte, offset),
            (Expect::ValueOrArrayEnd, b']') => self.close_container(byte, offset),
            (Expect::ValueOrArrayEnd, _) => self.begin_value(byte, offset),
            (Expect::KeyOrObjectEnd, b'}') => self.close_container(byte, offset),
            (Expect::KeyOrObjectEnd | Expect::Key, b'"') => {
                self.begin_key();
                Ok(ProcessResult::Continue)
            }
            (Expect::Key, b'}') => Err(JsonPathError::syntax(
                "Trailing comma before '}'",
                offset,
            )),
            (Expect::Colon, b':') => {
                self.expect = Expect::Value;
                Ok(ProcessResult::Continue)
            }
            (Expect::CommaOrEnd, b',') => {
                match self.stack.last_mut() {
                    Some(FrameIdentifier::Index(index)) => {
                        *index += 1;
                        self.expect = Expect::Value;
                    }
                    Some(FrameIdentifier::Property(_)) => self.expect = Expect::Key,
                    None => return Err(JsonPathError::unexpected_byte(byte, offset)),
                }
                Ok(ProcessResult::Continue)
            }
            (Expect::CommaOrEnd, b']' | b'}') => self.close_container(byte, offset),
            (Expect::Done, _) => Err(JsonPathError::syntax(
                "Trailing data after document",
                offset,
            )),
            _ => Err(JsonPathError::unexpected_byte(byte, offset)),
        }
    }

    /// Start a value, opening a capture when the path matches here
    fn begin_value(&mut self, byte: u8, offset: u64) -> JsonPathResult<ProcessResult> {
        let lexeme = match byte {
            b'{' | b'[' | b'"' => Lexeme::None,
            b'-' => Lexeme::Number(NumberPhase::Minus),
            b'0' => Lexeme::Number(NumberPhase::Zero),
            b'1'..=b'9' => Lexeme::Number(NumberPhase::Integer),
            b't' => Lexeme::Literal { expected: b"true", position: 1 },
            b'f' => Lexeme::Literal { expected: b"false", position: 1 },
            b'n' => Lexeme::Literal { expected: b"null", position: 1 },
            b']' if matches!(self.stack.last(), Some(FrameIdentifier::Index(_))) => {
                return Err(JsonPathError::syntax("Trailing comma before ']'", offset));
            }
            _ => return Err(JsonPathError::unexpected_byte(byte, offset)),
        };

        if self.capture.is_none()
            && self.stack.len() == self.expression.depth()
            && self.expression.matches(&self.stack)
        {
            self.buffer.clear();
            self.capture = Some(Capture {
                depth: self.stack.len(),
                start: offset,
            });
        }

        match byte {
            b'{' => {
                self.push_frame(FrameIdentifier::Property(None));
                self.expect = Expect::KeyOrObjectEnd;
            }
            b'[' => {
                self.push_frame(FrameIdentifier::Index(0));
                self.expect = Expect::ValueOrArrayEnd;
            }
            b'"' => {
                self.lexeme = Lexeme::String {
                    key: false,
                    escape: Escape::None,
                };
            }
            _ => self.lexeme = lexeme,
        }
        Ok(ProcessResult::Continue)
    }

    fn push_frame(&mut self, frame: FrameIdentifier) {
        self.stack.push(frame);
    }

    fn close_container(&mut self, byte: u8, offset: u64) -> JsonPathResult<ProcessResult> {
        let matches_frame = matches!(
            (byte, self.stack.last()),
            (b'}', Some(FrameIdentifier::Property(_))) | (b']', Some(FrameIdentifier::Index(_)))
        );
        if !matches_frame {
            return Err(JsonPathError::unexpected_byte(byte, offset));
        }
        self.stack.pop();
        Ok(self.end_value(offset + 1))
    }

    /// Finish a value ending before `end`, closing the capture it completes
    pub(super) fn end_value(&mut self, end: u64) -> ProcessResult {
        self.expect = if self.stack.is_empty() {
            Expect::Done
        } else {
            Expect::CommaOrEnd
        };

        match self.capture {
            Some(capture) if capture.depth == self.stack.len() => {
                self.capture = None;
                ProcessResult::ObjectBoundary {
                    start: capture.start,
                    end,
                }
            }
            _ => ProcessResult::Continue,
        }
    }

    fn begin_key(&mut self) {
        self.key_tracked =
            self.capture.is_none() && self.stack.len() <= self.expression.depth();
        self.key_escaped = false;
        self.key_buffer.clear();
        self.lexeme = Lexeme::String {
            key: true,
            escape: Escape::None,
        };
    }

    fn end_key(&mut self, offset: u64) -> JsonPathResult<()> {
        let name = if self.key_tracked {
            Some(self.decode_key(offset)?)
        } else {
            None
        };
        if let Some(frame) = self.stack.last_mut() {
            *frame = FrameIdentifier::Property(name);
        }
        self.expect = Expect::Colon;
        Ok(())
    }

    fn decode_key(&self, offset: u64) -> JsonPathResult<String> {
        if !self.key_escaped {
            return simdutf8::basic::from_utf8(&self.key_buffer)
                .map(str::to_owned)
                .map_err(|_| JsonPathError::syntax("Object key is not valid UTF-8", offset));
        }

        let mut quoted = Vec::with_capacity(self.key_buffer.len() + 2);
        quoted.push(b'"');
        quoted.extend_from_slice(&self.key_buffer);
        quoted.push(b'"');
        serde_json::from_slice::<String>(&quoted)
            .map_err(|e| JsonPathError::syntax(format!("Invalid object key: {e}"), offset))
    }

    fn process_string_byte(
        &mut self,
        byte: u8,
        offset: u64,
        key: bool,
        escape: Escape,
    ) -> JsonPathResult<ProcessResult> {
        let next = match escape {
            Escape::None => match byte {
                b'"' => {
                    self.lexeme = Lexeme::None;
                    if key {
                        self.end_key(offset)?;
                        return Ok(ProcessResult::Continue);
                    }
                    return Ok(self.end_value(offset + 1));
                }
                b'\\' => {
                    self.key_escaped = true;
                    Escape::Backslash
                }
                0x00..=0x1f => {
                    return Err(JsonPathError::syntax(
                        "Control character in string",
                        offset,
                    ));
                }
                _ => Escape::None,
            },
            Escape::Backslash => match byte {
                b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' => Escape::None,
                b'u' => Escape::Unicode(4),
                _ => return Err(JsonPathError::syntax("Invalid escape sequence", offset)),
            },
            Escape::Unicode(remaining) => {
                if !byte.is_ascii_hexdigit() {
                    return Err(JsonPathError::syntax("Invalid unicode escape", offset));
                }
                if remaining == 1 {
                    Escape::None
                } else {
                    Escape::Unicode(remaining - 1)
                }
            }
        };

        if key && self.key_tracked {
            self.key_buffer.push(byte);
        }
        self.lexeme = Lexeme::String { key, escape: next };
        Ok(ProcessResult::Continue)
    }

    fn process_number_byte(
        &mut self,
        byte: u8,
        offset: u64,
        phase: NumberPhase,
    ) -> JsonPathResult<ProcessResult> {
        let next = match (phase, byte) {
            (NumberPhase::Minus, b'0') => Some(NumberPhase::Zero),
            (NumberPhase::Minus, b'1'..=b'9') => Some(NumberPhase::Integer),
            (NumberPhase::Integer, b'0'..=b'9') => Some(NumberPhase::Integer),
            (NumberPhase::Zero | NumberPhase::Integer, b'.') => Some(NumberPhase::Dot),
            (NumberPhase::Dot | NumberPhase::Fraction, b'0'..=b'9') => Some(NumberPhase::Fraction),
            (NumberPhase::Zero | NumberPhase::Integer | NumberPhase::Fraction, b'e' | b'E') => {
                Some(NumberPhase::Exponent)
            }
            (NumberPhase::Exponent, b'+' | b'-') => Some(NumberPhase::ExponentSign),
            (
                NumberPhase::Exponent | NumberPhase::ExponentSign | NumberPhase::ExponentDigits,
                b'0'..=b'9',
            ) => Some(NumberPhase::ExponentDigits),
            _ => None,
        };

        if let Some(next) = next {
            self.lexeme = Lexeme::Number(next);
            return Ok(ProcessResult::Continue);
        }
        if !phase.is_complete() || byte.is_ascii_digit() {
            return Err(JsonPathError::syntax("Malformed number", offset));
        }

        // The delimiter is not part of the number; end the value before it
        // and handle the delimiter as structure.
        self.lexeme = Lexeme::None;
        let ended = self.end_value(offset);
        match self.process_structural_byte(byte, offset)? {
            ProcessResult::Continue => Ok(ended),
            boundary @ ProcessResult::ObjectBoundary { .. } => Ok(boundary),
        }
    }

    fn process_literal_byte(
        &mut self,
        byte: u8,
        offset: u64,
        expected: &'static [u8],
        position: usize,
    ) -> JsonPathResult<ProcessResult> {
        if expected.get(position) != Some(&byte) {
            return Err(JsonPathError::unexpected_byte(byte, offset));
        }
        if position + 1 == expected.len() {
            self.lexeme = Lexeme::None;
            return Ok(self.end_value(offset + 1));
        }
        self.lexeme = Lexeme::Literal {
            expected,
            position: position + 1,
        };
        Ok(ProcessResult::Continue)
    }
}
