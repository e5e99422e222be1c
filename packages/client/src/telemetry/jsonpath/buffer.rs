//! Statistics types for the capture buffer

/// Capacity management statistics
#[derive(Debug, Clone, Copy)]
pub struct CapacityStats {
    /// Initial buffer capacity
    pub initial_capacity: usize,
    /// Capacity kept between matches
    pub retain_limit: usize,
    /// Current buffer capacity
    pub current_capacity: usize,
    /// Largest capacity reached, bounded by the largest matched value
    pub peak_capacity: usize,
    /// Number of growth operations since last shrink
    pub growth_operations: u32,
    /// Number of times an oversized buffer was released
    pub shrink_operations: u64,
    /// Capacity freed by the last shrink
    pub last_shrink_size: Option<usize>,
}
