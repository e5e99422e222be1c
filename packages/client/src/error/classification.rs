use super::types::{Error, Kind};

impl Error {
    /// Returns true if the error came from the transport source.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self.inner.kind, Kind::Transport)
    }

    /// Returns true if the server answered with a non-success status.
    #[must_use]
    pub fn is_status(&self) -> bool {
        matches!(self.inner.kind, Kind::Status(_))
    }

    /// Returns the HTTP status carried by a status error.
    #[must_use]
    pub fn status(&self) -> Option<http::StatusCode> {
        match self.inner.kind {
            Kind::Status(code) => Some(code),
            _ => None,
        }
    }

    /// Returns true if the gzip stream was corrupt or truncated.
    #[must_use]
    pub fn is_decompression(&self) -> bool {
        matches!(self.inner.kind, Kind::Decompression)
    }

    /// Returns true if the decompressed text was not valid UTF-8.
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self.inner.kind, Kind::Decode)
    }

    /// Returns true if the JSON document was malformed.
    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(self.inner.kind, Kind::Parse)
    }

    /// Returns true if a connect or TLS handshake timed out.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        self.inner
            .source
            .as_ref()
            .is_some_and(|source| source.is::<super::TimedOut>())
    }

    /// Returns true if the stream was closed through its handle.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self.inner.kind, Kind::Closed)
    }

    /// Returns true if the run can continue past this error.
    ///
    /// Only record-level errors are recoverable; everything else aborts the
    /// pipeline.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self.inner.kind, Kind::Record)
    }
}
