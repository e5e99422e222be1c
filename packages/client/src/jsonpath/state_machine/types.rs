//! State machine types and data structures

use crate::jsonpath::{buffer::StreamBuffer, error::ErrorKind, expression::JsonPathExpression};

/// Lifecycle of a streaming parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonStreamState {
    /// No significant byte seen yet
    Initial,
    /// Inside the document
    Streaming,
    /// Root value closed and end of input reached
    Complete,
    /// Unrecoverable failure; the machine rejects further input
    Error {
        kind: ErrorKind,
        message: String,
    },
}

/// Identifier for the child position inside an open container
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameIdentifier {
    /// Object member; the key is recorded only where the path can still match
    Property(Option<String>),
    /// Array element index
    Index(usize),
}

/// Next structural token the grammar accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Expect {
    Value,
    /// Directly after `[`
    ValueOrArrayEnd,
    /// Directly after `{`
    KeyOrObjectEnd,
    /// After a comma inside an object
    Key,
    Colon,
    CommaOrEnd,
    /// Root value closed; only whitespace may follow
    Done,
}

/// Token currently being scanned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Lexeme {
    None,
    String { key: bool, escape: Escape },
    Number(NumberPhase),
    Literal {
        expected: &'static [u8],
        position: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Escape {
    None,
    Backslash,
    /// Hex digits still expected after `\u`
    Unicode(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum NumberPhase {
    Minus,
    Zero,
    Integer,
    Dot,
    Fraction,
    Exponent,
    ExponentSign,
    ExponentDigits,
}

impl NumberPhase {
    /// Whether the digits so far form a complete number
    #[inline]
    pub(super) fn is_complete(self) -> bool {
        matches!(
            self,
            NumberPhase::Zero
                | NumberPhase::Integer
                | NumberPhase::Fraction
                | NumberPhase::ExponentDigits
        )
    }
}

/// Value currently being copied into the capture buffer
#[derive(Debug, Clone, Copy)]
pub(super) struct Capture {
    /// Stack depth at which the value started
    pub(super) depth: usize,
    /// Absolute offset of the first byte
    pub(super) start: u64,
}

/// Streaming JSON state machine with path matching
#[derive(Debug)]
pub struct StreamStateMachine {
    pub(super) state: JsonStreamState,
    pub(super) expression: JsonPathExpression,
    /// One frame per open container, outermost first
    pub(super) stack: Vec<FrameIdentifier>,
    pub(super) expect: Expect,
    pub(super) lexeme: Lexeme,
    /// Raw bytes of the key being read, when it is tracked
    pub(super) key_buffer: Vec<u8>,
    pub(super) key_tracked: bool,
    pub(super) key_escaped: bool,
    pub(super) capture: Option<Capture>,
    pub(super) buffer: StreamBuffer,
    /// Absolute offset of the next byte
    pub(super) offset: u64,
}

/// Result of processing a single byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessResult {
    Continue,
    /// A matched value ended with this byte
    ObjectBoundary { start: u64, end: u64 },
}

/// Byte range of a matched value in the decoded stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectBoundary {
    /// Start byte offset of the value
    pub start: u64,
    /// End byte offset of the value (exclusive)
    pub end: u64,
}
