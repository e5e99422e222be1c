//! Telemetry for the streaming pipeline
//!
//! Transfer counters feed progress reporting; path matching counters and
//! capture buffer statistics describe the parser side.

pub mod jsonpath;
pub mod transfer;

pub use jsonpath::*;
pub use transfer::{TransferSnapshot, TransferStats};
