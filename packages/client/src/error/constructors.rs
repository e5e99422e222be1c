use std::io;

use http::StatusCode;

use super::types::{BoxError, Error, Kind};

/// Creates an `Error` for a transport failure.
pub fn transport<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Transport).with(e.into())
}

/// Creates an `Error` for a non-success HTTP status.
pub fn status_code(location: &str, status: StatusCode) -> Error {
    Error::new(Kind::Status(status)).with_location(location)
}

/// Creates an `Error` for corrupt or truncated gzip input.
pub fn decompression<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Decompression).with(e.into())
}

/// Creates an `Error` for invalid UTF-8 text.
pub fn decode<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Decode).with(e.into())
}

/// Creates an `Error` for malformed JSON.
pub fn parse<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Parse).with(e.into())
}

/// Creates an `Error` for a record that was skipped.
pub fn record<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Record).with(e.into())
}

/// Creates an `Error` for a stream closed through its handle.
pub fn closed() -> Error {
    Error::new(Kind::Closed)
}

/// Creates an `Error` for an invalid configuration.
pub fn config<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Config).with(e.into())
}

/// Creates an `Error` for an output write failure.
pub fn output<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Output).with(e.into())
}

impl Error {
    /// Wrap this error so it can cross a `std::io::Read` boundary.
    ///
    /// The pipeline stages are plain readers; an error raised by one stage is
    /// carried as the payload of an `io::Error` and recovered intact by
    /// [`Error::from_io`] further down the chain.
    #[must_use]
    pub fn into_io(self) -> io::Error {
        let kind = match self.inner.kind {
            Kind::Decompression | Kind::Decode | Kind::Parse => io::ErrorKind::InvalidData,
            Kind::Closed => io::ErrorKind::ConnectionAborted,
            _ => io::ErrorKind::Other,
        };
        io::Error::new(kind, self)
    }

    /// Recover an `Error` from an `io::Error`, unwrapping a stage payload when present.
    ///
    /// Plain I/O errors without a payload are classified as transport failures.
    #[must_use]
    pub fn from_io(err: io::Error) -> Error {
        if err.get_ref().is_some_and(|inner| inner.is::<Error>()) {
            if let Some(inner) = err.into_inner() {
                return match inner.downcast::<Error>() {
                    Ok(error) => *error,
                    Err(other) => transport(other),
                };
            }
            return Error::new(Kind::Transport);
        }
        transport(err)
    }
}
