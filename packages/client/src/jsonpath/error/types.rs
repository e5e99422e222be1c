//! JSON Path Error Types
//!
//! Core error types for path compilation and streaming parse operations.

use std::error::Error;
use std::fmt;
use std::io;

/// JSON Path processing error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid path expression
    InvalidPath,
    /// Malformed JSON syntax
    Syntax,
    /// Input ended inside the document
    UnexpectedEof,
    /// A matched value is well-formed JSON but does not fit the target type
    Record,
    /// The underlying reader failed
    Io,
}

/// Main JSON Path error type
#[derive(Debug)]
pub struct JsonPathError {
    pub kind: ErrorKind,
    pub message: String,
    /// Byte offset in the decoded stream, when known
    pub offset: Option<u64>,
    pub(crate) io: Option<io::Error>,
}

impl fmt::Display for JsonPathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offset {
            Some(offset) => write!(f, "JSON Path Error: {} at offset {offset}", self.message),
            None => write!(f, "JSON Path Error: {}", self.message),
        }
    }
}

impl Error for JsonPathError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.io.as_ref().map(|err| err as &(dyn Error + 'static))
    }
}

/// Result type for JSON Path operations
pub type JsonPathResult<T> = Result<T, JsonPathError>;

impl JsonPathError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: String) -> Self {
        Self {
            kind,
            message,
            offset: None,
            io: None,
        }
    }

    #[must_use]
    pub fn at(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidPath, msg.into())
    }

    pub fn syntax(msg: impl Into<String>, offset: u64) -> Self {
        Self::new(ErrorKind::Syntax, msg.into()).at(offset)
    }

    #[must_use]
    pub fn unexpected_byte(byte: u8, offset: u64) -> Self {
        let shown = if byte.is_ascii_graphic() {
            format!("'{}'", char::from(byte))
        } else {
            format!("0x{byte:02x}")
        };
        Self::syntax(format!("Unexpected byte {shown}"), offset)
    }

    #[must_use]
    pub fn unexpected_end_of_input(offset: u64) -> Self {
        Self::new(ErrorKind::UnexpectedEof, "Unexpected end of input".into()).at(offset)
    }

    pub fn record(msg: impl Into<String>, offset: u64) -> Self {
        Self::new(ErrorKind::Record, msg.into()).at(offset)
    }

    #[must_use]
    pub fn io(err: io::Error, offset: u64) -> Self {
        let mut error = Self::new(ErrorKind::Io, format!("Read failed: {err}")).at(offset);
        error.io = Some(err);
        error
    }

    /// Whether the stream can continue after this error
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        self.kind == ErrorKind::Record
    }
}

impl From<JsonPathError> for crate::Error {
    fn from(mut err: JsonPathError) -> Self {
        match err.kind {
            ErrorKind::Io => match err.io.take() {
                Some(io) => crate::Error::from_io(io),
                None => crate::error::transport(err),
            },
            ErrorKind::Record => crate::error::record(err),
            ErrorKind::InvalidPath => crate::error::config(err),
            ErrorKind::Syntax | ErrorKind::UnexpectedEof => crate::error::parse(err),
        }
    }
}
