//! Configuration Architecture
//!
//! Buffer budget, HTTP transport settings, and the per-run extraction config.
//! Values live in explicit structures with defaults and are validated before a
//! run starts.

pub mod buffers;
pub mod extract;
pub mod network;
pub mod plans;
pub mod validation;

pub use buffers::BufferConfig;
pub use extract::{ExtractConfig, NameMatching};
pub use network::HttpConfig;
pub use plans::NY_PPO_PLAN_NAMES;
pub use validation::{ConfigDefaults, ConfigResult, ConfigValidator, ConfigurationError, Validator};
