mod classification;
mod constructors;
mod helpers;
mod types;

pub use constructors::*;
pub use helpers::{ErrorChain, TimedOut};
pub use types::{Error, Kind, Result};
