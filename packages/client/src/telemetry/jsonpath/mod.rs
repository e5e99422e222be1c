//! Path matching telemetry
//!
//! Capture buffer statistics and per-stream counters.

pub mod buffer;
pub mod stream;

pub use buffer::*;
pub use stream::{StreamStats, StreamStatsSnapshot};
