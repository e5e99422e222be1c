//! JSON streaming state machine with path matching
//!
//! Parses a JSON document incrementally from arbitrary chunks, tracking the
//! path to the current position with a frame stack. When a value starts at
//! a position selected by the compiled path expression its bytes are copied
//! into a capture buffer, and processing stops when the value closes so the
//! caller can deserialize it.
//!
//! # Architecture
//!
//! - `types`: Core data structures, enums, and type definitions
//! - `engine`: Chunk processing, capture handling, and end of input
//! - `processors`: Byte-level grammar for structure, strings, numbers, and literals
//! - `transitions`: Lifecycle transitions

mod engine;
mod processors;
mod transitions;
mod types;

pub use transitions::is_terminal_state;
pub use types::{FrameIdentifier, JsonStreamState, ObjectBoundary, ProcessResult, StreamStateMachine};
