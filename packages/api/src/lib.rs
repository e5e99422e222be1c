//! mrf-index Public API
//!
//! Fluent builder over the streaming index pipeline, writers for its results,
//! and verification against a published HTML listing.
//!
//! ```no_run
//! use mrf_index::{IndexExtractor, output};
//!
//! let extraction = IndexExtractor::from_location("https://example.com/2024-05-01_anthem_index.json.gz")
//!     .buffer_size(16 * 1024 * 1024)
//!     .in_network_files()?;
//! output::write_locations(&extraction.files, std::io::stdout().lock())?;
//! # Ok::<(), mrf_index::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod builder;
pub mod output;
pub mod progress;
pub mod verify;

pub use builder::{IndexExtractor, LocationNotSet, LocationSet};
pub use progress::BarObserver;
pub use verify::{LinkVerifier, VerifyReport};

// Re-export important types from the client package
pub use mrf_index_client::catalog::Catalog;
pub use mrf_index_client::config::{BufferConfig, ExtractConfig, HttpConfig, NameMatching};
pub use mrf_index_client::filter::{ExtractStats, Extraction, ResultSet};
pub use mrf_index_client::model::{FileReference, ReportingPlan};
pub use mrf_index_client::transport::{CloseHandle, ProgressObserver};
pub use mrf_index_client::{Error, Kind, Result};

/// Start a builder for the index at `location`
///
/// Shorthand for `IndexExtractor::from_location(location)`
#[must_use]
pub fn from_location(location: impl Into<String>) -> IndexExtractor<LocationSet> {
    IndexExtractor::from_location(location)
}
