//! Capture buffer for streaming path matches
//!
//! The state machine copies the bytes of each matched value into a
//! [`StreamBuffer`]; the deserializer reads them out and releases the buffer
//! before the next match begins.

mod capacity;
mod core;

pub use self::core::StreamBuffer;

use crate::telemetry::jsonpath::CapacityStats;

impl StreamBuffer {
    /// Get current buffer size in bytes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if buffer is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Get current buffer capacity in bytes
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Get current buffer contents as bytes slice
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer[..]
    }

    /// Get total bytes captured since creation
    #[inline]
    #[must_use]
    pub fn total_bytes_processed(&self) -> u64 {
        self.total_processed
    }

    /// Get capacity management statistics
    #[must_use]
    pub fn capacity_stats(&self) -> CapacityStats {
        CapacityStats {
            initial_capacity: self.capacity_manager.initial_capacity,
            retain_limit: self.capacity_manager.retain_limit,
            current_capacity: self.buffer.capacity(),
            peak_capacity: self.capacity_manager.peak_capacity,
            growth_operations: self.capacity_manager.growth_operations,
            shrink_operations: self.capacity_manager.shrink_operations,
            last_shrink_size: self.capacity_manager.last_shrink_size,
        }
    }
}

impl Default for StreamBuffer {
    fn default() -> Self {
        Self::new()
    }
}
