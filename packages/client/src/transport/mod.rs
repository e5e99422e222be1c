//! Transport sources
//!
//! A location beginning with `http://` or `https://` is fetched over the
//! network; anything else is opened as a local file. Either way the result is
//! a plain blocking reader with an optional size hint.

mod close;
mod http;
mod local;
mod progress;

use std::io::{self, Read};

pub use close::CloseHandle;
pub use progress::{ProgressObserver, ProgressReader};

use crate::config::HttpConfig;

/// Ordered byte stream from a local file or HTTP(S) resource
pub struct Source {
    reader: Box<dyn Read + Send>,
    total_size: Option<u64>,
    location: String,
    close: CloseHandle,
}

impl Source {
    /// Size of the source in bytes, when the transport reports it
    #[must_use]
    pub fn total_size(&self) -> Option<u64> {
        self.total_size
    }

    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Handle that closes this source from another thread
    #[must_use]
    pub fn close_handle(&self) -> CloseHandle {
        self.close.clone()
    }
}

impl Read for Source {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl std::fmt::Debug for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Source")
            .field("location", &self.location)
            .field("total_size", &self.total_size)
            .finish_non_exhaustive()
    }
}

/// Whether `location` names a remote resource
#[must_use]
pub fn is_remote(location: &str) -> bool {
    let lower = location.get(..8).unwrap_or(location).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Open `location` for reading
///
/// # Errors
///
/// Fails before any data is read if the file is missing, the connection or
/// TLS handshake fails, or the server answers with a non-2xx status.
pub fn open(location: &str, http: &HttpConfig) -> crate::Result<Source> {
    open_with_handle(location, http, CloseHandle::new())
}

/// Open `location`, closing it through an existing handle
///
/// # Errors
///
/// See [`open`]. Also fails with `Closed` if `close` was already closed.
pub fn open_with_handle(location: &str, http: &HttpConfig, close: CloseHandle) -> crate::Result<Source> {
    if close.is_closed() {
        return Err(crate::error::closed().with_location(location));
    }

    let (reader, total_size): (Box<dyn Read + Send>, _) = if is_remote(location) {
        let (source, total) = http::HttpSource::open(location, http, close.clone())?;
        (Box::new(source), total)
    } else {
        let (source, total) = local::LocalSource::open(location, close.clone())?;
        (Box::new(source), total)
    };

    Ok(Source {
        reader,
        total_size,
        location: location.to_string(),
        close,
    })
}
