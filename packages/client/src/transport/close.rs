//! Cross-thread close signal for a transport source

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

#[derive(Debug, Default)]
struct CloseState {
    closed: AtomicBool,
    notify: Notify,
}

/// Handle that closes a [`Source`](super::Source) from any thread
///
/// After [`close`](Self::close), an in-flight read is interrupted where the
/// transport supports it and every later read fails with a `Closed` error.
#[derive(Debug, Clone, Default)]
pub struct CloseHandle {
    inner: Arc<CloseState>,
}

impl CloseHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn close(&self) {
        if !self.inner.closed.swap(true, Ordering::AcqRel) {
            tracing::debug!(target: "mrf_index::transport", "Close requested");
            self.inner.notify.notify_one();
        }
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire)
    }

    /// Resolves once the handle has been closed
    pub(crate) async fn closed(&self) {
        while !self.is_closed() {
            self.inner.notify.notified().await;
        }
    }

    /// Fail with a `Closed` error once the handle has been closed
    pub(crate) fn check(&self) -> std::io::Result<()> {
        if self.is_closed() {
            return Err(crate::error::closed().into_io());
        }
        Ok(())
    }
}
