//! JSONPath error handling module

mod types;

pub use types::{ErrorKind, JsonPathError, JsonPathResult};
