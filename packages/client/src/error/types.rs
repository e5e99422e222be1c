use std::error::Error as StdError;
use std::fmt;

use http::StatusCode;

/// A Result alias where the Err case is `mrf_index_client::Error`.
pub type Result<T> = std::result::Result<T, Error>;

pub(crate) type BoxError = Box<dyn StdError + Send + Sync>;

/// Represents errors that can occur while streaming an index file.
pub struct Error {
    pub(crate) inner: Box<Inner>,
}

pub(crate) struct Inner {
    pub(crate) kind: Kind,
    pub(crate) source: Option<BoxError>,
    pub(crate) location: Option<String>,
}

/// Pipeline stage or condition that produced an [`Error`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    /// Connection, TLS, or read failure in the transport source
    Transport,
    /// Server answered with a non-success status
    Status(StatusCode),
    /// Corrupt or truncated gzip data
    Decompression,
    /// Decompressed bytes are not valid UTF-8
    Decode,
    /// Malformed JSON or unexpected end of document
    Parse,
    /// A single record could not be used; the run continues
    Record,
    /// Stream closed through a `CloseHandle`
    Closed,
    /// Invalid configuration
    Config,
    /// Writing results failed
    Output,
}

impl Error {
    pub fn new(kind: Kind) -> Error {
        Error {
            inner: Box::new(Inner {
                kind,
                source: None,
                location: None,
            }),
        }
    }

    #[must_use = "Error builder methods return a new Error and should be used"]
    pub fn with<E: Into<BoxError>>(mut self, source: E) -> Error {
        self.inner.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Error {
        self.inner.location = Some(location.into());
        self
    }

    /// Attach `location` unless a more specific one is already recorded
    #[must_use]
    pub fn or_location(self, location: &str) -> Error {
        if self.inner.location.is_some() {
            self
        } else {
            self.with_location(location)
        }
    }

    #[must_use]
    pub fn kind(&self) -> &Kind {
        &self.inner.kind
    }

    /// Get the source location (URL or path) associated with this error, if any
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.inner.location.as_deref()
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("mrf_index::Error");

        f.field("kind", &self.inner.kind);

        if let Some(ref source) = self.inner.source {
            f.field("source", source);
        }

        if let Some(ref location) = self.inner.location {
            f.field("location", location);
        }

        f.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner.kind {
            Kind::Transport => f.write_str("error reading from transport source")?,
            Kind::Status(code) => {
                let prefix = if code.is_client_error() {
                    "HTTP status client error"
                } else if code.is_server_error() {
                    "HTTP status server error"
                } else {
                    "unexpected HTTP status"
                };
                write!(f, "{prefix} ({code})")?;
            }
            Kind::Decompression => f.write_str("error decompressing gzip stream")?,
            Kind::Decode => f.write_str("error decoding UTF-8 text")?,
            Kind::Parse => f.write_str("error parsing JSON document")?,
            Kind::Record => f.write_str("malformed record")?,
            Kind::Closed => f.write_str("stream closed")?,
            Kind::Config => f.write_str("invalid configuration")?,
            Kind::Output => f.write_str("error writing output")?,
        }

        if let Some(ref location) = self.inner.location {
            write!(f, " for {location}")?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .source
            .as_ref()
            .map(|err| &**err as &(dyn StdError + 'static))
    }
}
