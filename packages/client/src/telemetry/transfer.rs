//! Transfer statistics shared between a transport reader and its observers

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Sentinel for "total size unknown"
const UNKNOWN_TOTAL: u64 = u64::MAX;

/// Bytes pulled from a transport source
///
/// Counts compressed bytes as they leave the source, before decompression.
/// Clones share the same counters.
#[derive(Debug, Clone)]
pub struct TransferStats {
    bytes_read: Arc<AtomicU64>,
    total_bytes: Arc<AtomicU64>,
    started: Instant,
}

/// Point-in-time view of [`TransferStats`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferSnapshot {
    pub bytes_read: u64,
    /// Source size, when the transport knows it
    pub total_bytes: Option<u64>,
    pub elapsed: Duration,
    pub bytes_per_sec: f64,
}

impl TransferSnapshot {
    /// Completed fraction in `0.0..=1.0`, when the total is known
    #[must_use]
    // Precision loss acceptable for progress display
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> Option<f64> {
        self.total_bytes.filter(|total| *total > 0).map(|total| {
            (self.bytes_read as f64 / total as f64).min(1.0)
        })
    }
}

impl TransferStats {
    #[must_use]
    pub fn new(total_bytes: Option<u64>) -> Self {
        Self {
            bytes_read: Arc::new(AtomicU64::new(0)),
            total_bytes: Arc::new(AtomicU64::new(total_bytes.unwrap_or(UNKNOWN_TOTAL))),
            started: Instant::now(),
        }
    }

    /// Add `count` bytes and return the new running total
    #[inline]
    pub fn record(&self, count: usize) -> u64 {
        self.bytes_read.fetch_add(count as u64, Ordering::Relaxed) + count as u64
    }

    #[must_use]
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn total_bytes(&self) -> Option<u64> {
        match self.total_bytes.load(Ordering::Relaxed) {
            UNKNOWN_TOTAL => None,
            total => Some(total),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> TransferSnapshot {
        let bytes_read = self.bytes_read();
        let elapsed = self.started.elapsed();
        let seconds = elapsed.as_secs_f64();
        TransferSnapshot {
            bytes_read,
            total_bytes: self.total_bytes(),
            elapsed,
            // Precision loss acceptable for throughput statistics
            #[allow(clippy::cast_precision_loss)]
            bytes_per_sec: if seconds > 0.0 {
                bytes_read as f64 / seconds
            } else {
                0.0
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_counters_and_fraction() {
        let stats = TransferStats::new(Some(200));
        let observer = stats.clone();
        assert_eq!(stats.record(50), 50);
        assert_eq!(stats.record(50), 100);

        let snapshot = observer.snapshot();
        assert_eq!(snapshot.bytes_read, 100);
        assert_eq!(snapshot.total_bytes, Some(200));
        assert_eq!(snapshot.fraction(), Some(0.5));
    }

    #[test]
    fn unknown_total_has_no_fraction() {
        let stats = TransferStats::new(None);
        stats.record(10);
        assert_eq!(stats.total_bytes(), None);
        assert_eq!(stats.snapshot().fraction(), None);
    }
}
