//! Core StreamBuffer implementation
//!
//! Holds the raw bytes of the value currently being captured by the state
//! machine. One value is held at a time.

use bytes::BytesMut;

use super::capacity::CapacityManager;

/// Capture buffer for the value currently matched by a path expression
#[derive(Debug)]
pub struct StreamBuffer {
    /// Bytes of the value being captured
    pub(super) buffer: BytesMut,
    /// Total bytes captured since creation (for statistics)
    pub(super) total_processed: u64,
    /// Buffer capacity management
    pub(super) capacity_manager: CapacityManager,
}

impl StreamBuffer {
    /// Create new stream buffer
    ///
    /// # Arguments
    ///
    /// * `capacity` - Initial buffer capacity in bytes
    /// * `retain_limit` - Capacity kept after a value is released; anything
    ///   larger is freed
    #[must_use]
    pub fn with_capacity(capacity: usize, retain_limit: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(capacity),
            total_processed: 0,
            capacity_manager: CapacityManager::new(capacity, retain_limit),
        }
    }

    /// Create buffer with default capacity and retain limit
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(8192, 1024 * 1024)
    }

    /// Append a slice of the value being captured
    pub fn extend(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        self.total_processed += bytes.len() as u64;

        if self.buffer.capacity() - self.buffer.len() < bytes.len() {
            self.capacity_manager
                .ensure_capacity(&mut self.buffer, bytes.len());
        }

        self.buffer.extend_from_slice(bytes);
    }

    /// Drop the buffered bytes, keeping the allocation
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Drop the buffered bytes and free oversized capacity
    ///
    /// Called once the captured value has been consumed so that a single
    /// large element does not pin its allocation for the rest of the stream.
    pub fn release(&mut self) {
        self.buffer.clear();
        self.capacity_manager.maybe_shrink(&mut self.buffer);
    }
}
