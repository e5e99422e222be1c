//! Byte-stream decoding stages
//!
//! Each stage is a plain [`std::io::Read`] adapter. Errors a stage raises are
//! tagged with their [`Kind`](crate::Kind) so they survive the trip through
//! later stages.

mod gzip;
mod utf8;

pub use gzip::GzipStage;
pub use utf8::Utf8Stage;
