//! Buffer capacity management
//!
//! Grows the capture buffer geometrically while a value is being captured
//! and releases the allocation once it exceeds the retain limit.

use bytes::BytesMut;

#[derive(Debug)]
pub struct CapacityManager {
    pub(super) initial_capacity: usize,
    pub(super) retain_limit: usize,
    growth_factor: usize,
    /// Capacity released by the last shrink
    pub(super) last_shrink_size: Option<usize>,
    /// Number of growth operations since last shrink
    pub(super) growth_operations: u32,
    pub(super) shrink_operations: u64,
    pub(super) peak_capacity: usize,
}

impl CapacityManager {
    pub(super) fn new(initial_capacity: usize, retain_limit: usize) -> Self {
        Self {
            initial_capacity,
            retain_limit: retain_limit.max(initial_capacity),
            growth_factor: 2,
            last_shrink_size: None,
            growth_operations: 0,
            shrink_operations: 0,
            peak_capacity: initial_capacity,
        }
    }

    pub(super) fn ensure_capacity(&mut self, buffer: &mut BytesMut, needed: usize) {
        let current_capacity = buffer.capacity();
        let required = buffer.len().saturating_add(needed);

        if required > current_capacity {
            let growth_target = current_capacity
                .max(self.initial_capacity)
                .saturating_mul(self.growth_factor);
            let new_capacity = required.max(growth_target);

            buffer.reserve(new_capacity - buffer.len());

            self.growth_operations = self.growth_operations.saturating_add(1);
            self.peak_capacity = self.peak_capacity.max(buffer.capacity());
        }
    }

    pub(super) fn maybe_shrink(&mut self, buffer: &mut BytesMut) {
        let capacity = buffer.capacity();
        if capacity <= self.retain_limit {
            return;
        }

        // Only called on an empty buffer, nothing to carry over
        *buffer = BytesMut::with_capacity(self.initial_capacity);

        self.last_shrink_size = Some(capacity);
        self.growth_operations = 0;
        self.shrink_operations += 1;

        tracing::debug!(
            target: "mrf_index::jsonpath::buffer",
            released = capacity,
            retained = self.initial_capacity,
            "Capture buffer shrunk"
        );
    }
}
