//! Index extraction builder API
//!
//! Fluent configuration of a run over a payer index, ending in one of the
//! terminal methods that execute it.

pub mod core;
pub mod methods;

pub use self::core::*;
