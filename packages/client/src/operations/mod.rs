//! Index operations
//!
//! Each operation opens its source, runs the decoding pipeline, and consumes
//! the matched values. Everything is released when the operation returns.

pub mod extract;
pub mod pipeline;
pub mod plans;

pub use extract::{ExtractOperation, extract_in_network_files};
pub use pipeline::{DecodedStream, PipelineOptions, open_decoded, stream_values};
pub use plans::{PlansOperation, extract_reporting_plans};

/// Base trait for operations over an index file
pub trait IndexOperation {
    /// Value produced by a completed run
    type Output;

    /// Run the operation to completion
    ///
    /// # Errors
    ///
    /// Returns the first fatal error from the transport or any pipeline stage.
    fn execute(self) -> crate::Result<Self::Output>;

    /// Location of the index file this operation reads
    fn location(&self) -> &str;
}
