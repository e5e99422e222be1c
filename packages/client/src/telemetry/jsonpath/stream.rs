use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Counters for a path-matching stream
///
/// Cloning shares the counters, so a clone can be read from another thread
/// while the stream is being consumed.
#[derive(Debug, Clone)]
pub struct StreamStats {
    bytes_processed: Arc<AtomicU64>,
    objects_yielded: Arc<AtomicU64>,
    record_errors: Arc<AtomicU64>,
    started: Instant,
}

/// Point-in-time view of [`StreamStats`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamStatsSnapshot {
    /// Decoded bytes fed through the state machine
    pub bytes_processed: u64,
    /// Matched values deserialized successfully
    pub objects_yielded: u64,
    /// Matched values that failed to deserialize
    pub record_errors: u64,
    pub elapsed: Duration,
    pub throughput_objects_per_sec: f64,
}

impl StreamStats {
    #[must_use]
    pub fn new() -> Self {
        Self {
            bytes_processed: Arc::new(AtomicU64::new(0)),
            objects_yielded: Arc::new(AtomicU64::new(0)),
            record_errors: Arc::new(AtomicU64::new(0)),
            started: Instant::now(),
        }
    }

    #[inline]
    pub(crate) fn record_bytes(&self, count: usize) {
        self.bytes_processed
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_object(&self) {
        self.objects_yielded.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_error(&self) {
        self.record_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current statistics snapshot
    #[must_use]
    // Precision loss acceptable for throughput statistics
    #[allow(clippy::cast_precision_loss)]
    pub fn snapshot(&self) -> StreamStatsSnapshot {
        let elapsed = self.started.elapsed();
        let objects = self.objects_yielded.load(Ordering::Relaxed);
        let seconds = elapsed.as_secs_f64();

        StreamStatsSnapshot {
            bytes_processed: self.bytes_processed.load(Ordering::Relaxed),
            objects_yielded: objects,
            record_errors: self.record_errors.load(Ordering::Relaxed),
            elapsed,
            throughput_objects_per_sec: if seconds > 0.0 {
                objects as f64 / seconds
            } else {
                0.0
            },
        }
    }
}

impl Default for StreamStats {
    fn default() -> Self {
        Self::new()
    }
}
