//! # mrf_index_client
//!
//! Streaming extraction of in-network file references from payer index
//! files ("table of contents" files published under the price transparency
//! rules). These files are gzip-compressed JSON documents that routinely
//! decompress to tens of gigabytes, so nothing here ever materializes the
//! document.
//!
//! ## Pipeline
//!
//! ```text
//! Source (file | HTTP) -> BufReader -> ProgressReader -> GzipStage -> Utf8Stage
//!     -> JsonPathStream<ReportingStructure> -> filter -> ResultSet
//! ```
//!
//! Every stage is a blocking pull reader. Errors raised by a stage keep their
//! [`Kind`] as they travel through the later ones.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mrf_index_client::prelude::*;
//!
//! let config = ExtractConfig::default();
//! let extraction = extract_in_network_files("2024-01_anthem_index.json.gz", &config)?;
//! for file in extraction.files.into_sorted() {
//!     println!("{}", file.location);
//! }
//! # Ok::<(), mrf_index_client::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod catalog;
pub mod codec;
pub mod config;
pub mod error;
pub mod filter;
pub mod jsonpath;
pub mod model;
pub mod operations;
pub mod prelude;
pub mod telemetry;
pub mod transport;

pub use error::{Error, Kind, Result};
