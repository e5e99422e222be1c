//! Byte counting between the transport and the decoder

use std::io::{self, Read};

use crate::telemetry::transfer::{TransferSnapshot, TransferStats};

/// Receives transfer progress updates
///
/// Called on the reading thread after every successful read, so
/// implementations should be cheap.
pub trait ProgressObserver: Send {
    fn on_progress(&mut self, bytes_read: u64, total: Option<u64>);

    /// Called once when the source reaches end of input
    fn on_finish(&mut self, _snapshot: &TransferSnapshot) {}
}

impl<F> ProgressObserver for F
where
    F: FnMut(u64, Option<u64>) + Send,
{
    fn on_progress(&mut self, bytes_read: u64, total: Option<u64>) {
        self(bytes_read, total);
    }
}

/// Reader that counts bytes into shared [`TransferStats`]
pub struct ProgressReader<R> {
    inner: R,
    stats: TransferStats,
    observer: Option<Box<dyn ProgressObserver>>,
    finished: bool,
}

impl<R: Read> ProgressReader<R> {
    pub fn new(inner: R, total_size: Option<u64>) -> Self {
        Self {
            inner,
            stats: TransferStats::new(total_size),
            observer: None,
            finished: false,
        }
    }

    #[must_use]
    pub fn with_observer(mut self, observer: Box<dyn ProgressObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Shared counters; clones observe the same transfer
    #[must_use]
    pub fn stats(&self) -> TransferStats {
        self.stats.clone()
    }
}

impl<R: Read> Read for ProgressReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.inner.read(buf)?;
        if read > 0 {
            let bytes_read = self.stats.record(read);
            if let Some(observer) = self.observer.as_mut() {
                observer.on_progress(bytes_read, self.stats.total_bytes());
            }
        } else if !buf.is_empty() && !self.finished {
            self.finished = true;
            if let Some(observer) = self.observer.as_mut() {
                observer.on_finish(&self.stats.snapshot());
            }
        }
        Ok(read)
    }
}

impl<R> std::fmt::Debug for ProgressReader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressReader")
            .field("stats", &self.stats)
            .field("observer", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}
