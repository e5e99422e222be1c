//! Streaming path matching over JSON byte streams
//!
//! A path expression is compiled once into a selector chain. The
//! [`JsonPathStream`] iterator then reads the document in fixed-size chunks
//! and yields each value the expression selects, deserialized into the
//! caller's type, without ever holding more than the current value.
//!
//! # Examples
//!
//! ```rust
//! use std::io::Cursor;
//!
//! use mrf_index_client::config::BufferConfig;
//! use mrf_index_client::jsonpath::JsonPathStream;
//!
//! let doc = r#"{"data": [{"id": 1}, {"id": 2}]}"#;
//! let ids: Vec<serde_json::Value> =
//!     JsonPathStream::from_path(Cursor::new(doc), "$.data[*].id", &BufferConfig::default())
//!         .expect("valid path")
//!         .collect::<Result<_, _>>()
//!         .expect("valid document");
//! assert_eq!(ids, vec![serde_json::json!(1), serde_json::json!(2)]);
//! ```

pub mod ast;
pub mod buffer;
pub mod compiler;
pub mod deserializer;
pub mod error;
pub mod expression;
pub mod state_machine;

pub use self::{
    ast::JsonSelector,
    buffer::StreamBuffer,
    compiler::JsonPathParser,
    deserializer::JsonPathStream,
    error::{ErrorKind, JsonPathError, JsonPathResult},
    expression::JsonPathExpression,
    state_machine::{JsonStreamState, ObjectBoundary, StreamStateMachine},
};

/// Elements of the top-level `reporting_structure` list
pub const REPORTING_STRUCTURE_PATH: &str = "reporting_structure.item";

/// Every plan descriptor across all reporting structures
pub const REPORTING_PLANS_PATH: &str = "reporting_structure.item.reporting_plans.item";

/// Every file-reference descriptor across all reporting structures
pub const IN_NETWORK_FILES_PATH: &str = "reporting_structure.item.in_network_files.item";
