//! Assembly of the decoding pipeline
//!
//! `Source -> BufReader -> ProgressReader -> GzipStage -> Utf8Stage`, with
//! the path-matching stream on top.

use std::io::BufReader;

use serde::de::DeserializeOwned;

use crate::codec::{GzipStage, Utf8Stage};
use crate::config::{BufferConfig, HttpConfig};
use crate::jsonpath::{JsonPathParser, JsonPathStream};
use crate::telemetry::transfer::TransferStats;
use crate::transport::{self, CloseHandle, ProgressObserver, ProgressReader, Source};

/// Decoded text stream of an index file
pub type DecodedStream = Utf8Stage<GzipStage<ProgressReader<BufReader<Source>>>>;

/// Optional collaborators for a run
#[derive(Default)]
pub struct PipelineOptions {
    pub observer: Option<Box<dyn ProgressObserver>>,
    pub close: Option<CloseHandle>,
}

impl PipelineOptions {
    #[must_use]
    pub fn with_observer(mut self, observer: Box<dyn ProgressObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    #[must_use]
    pub fn with_close_handle(mut self, close: CloseHandle) -> Self {
        self.close = Some(close);
        self
    }
}

impl std::fmt::Debug for PipelineOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineOptions")
            .field("observer", &self.observer.is_some())
            .field("close", &self.close)
            .finish()
    }
}

/// Open `location` and stack the decoding stages on top of it
///
/// # Errors
///
/// Fails if the transport cannot be opened; see [`transport::open`].
pub fn open_decoded(
    location: &str,
    buffers: &BufferConfig,
    http: &HttpConfig,
    options: PipelineOptions,
) -> crate::Result<(DecodedStream, TransferStats)> {
    let source = match options.close {
        Some(close) => transport::open_with_handle(location, http, close)?,
        None => transport::open(location, http)?,
    };
    let total_size = source.total_size();

    let mut progress = ProgressReader::new(
        BufReader::with_capacity(buffers.transport_buffer_size, source),
        total_size,
    );
    if let Some(observer) = options.observer {
        progress = progress.with_observer(observer);
    }
    let stats = progress.stats();

    let decoded = Utf8Stage::with_capacity(buffers.parse_chunk_size, GzipStage::new(progress));
    Ok((decoded, stats))
}

/// Stream the values selected by `path` from the index at `location`
///
/// # Errors
///
/// Fails if `path` does not compile or the transport cannot be opened.
pub fn stream_values<T: DeserializeOwned>(
    location: &str,
    path: &str,
    buffers: &BufferConfig,
    http: &HttpConfig,
    options: PipelineOptions,
) -> crate::Result<(JsonPathStream<DecodedStream, T>, TransferStats)> {
    let expression = JsonPathParser::compile(path)?;
    let (decoded, stats) = open_decoded(location, buffers, http, options)?;
    Ok((JsonPathStream::new(decoded, expression, buffers), stats))
}

pub(crate) fn log_transfer_summary(location: &str, stats: &TransferStats) {
    let snapshot = stats.snapshot();
    tracing::info!(
        target: "mrf_index::transport",
        location,
        bytes_read = snapshot.bytes_read,
        total_bytes = snapshot.total_bytes,
        elapsed_ms = u64::try_from(snapshot.elapsed.as_millis()).unwrap_or(u64::MAX),
        mib_per_sec = snapshot.bytes_per_sec / (1024.0 * 1024.0),
        "Transfer finished"
    );
}
