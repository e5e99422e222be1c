//! Streaming deserializer over path matches

mod iterator;

pub use iterator::JsonPathStream;
