//! Terminal methods
//!
//! Each call opens the index, drives the pipeline to the end of the document,
//! and releases the transport before returning.

use mrf_index_client::catalog::Catalog;
use mrf_index_client::filter::{ExtractStats, Extraction, ResultSet};
use mrf_index_client::operations::{ExtractOperation, IndexOperation, PipelineOptions, PlansOperation};
use mrf_index_client::transport::{CloseHandle, ProgressObserver};

use crate::builder::core::{IndexExtractor, LocationSet};

impl IndexExtractor<LocationSet> {
    /// Location this builder will read
    #[must_use]
    pub fn location_str(&self) -> &str {
        &self.state.location
    }

    /// Collect the in-network file references of the configured plans
    ///
    /// # Errors
    ///
    /// Fails on invalid configuration, when the index cannot be opened, or on
    /// the first fatal decompression, decode, or parse error.
    pub fn in_network_files(self) -> mrf_index_client::Result<Extraction> {
        let (location, operation) = self.into_extract_operation();
        let extraction = operation.execute()?;
        tracing::debug!(
            target: "mrf_index::builder",
            location = %location,
            files = extraction.files.len(),
            "Extraction complete"
        );
        Ok(extraction)
    }

    /// Like [`in_network_files`](Self::in_network_files), keeping partial
    /// results in `files` when the run fails part-way
    ///
    /// # Errors
    ///
    /// See [`in_network_files`](Self::in_network_files).
    pub fn in_network_files_into(self, files: &mut ResultSet) -> mrf_index_client::Result<ExtractStats> {
        let (_, operation) = self.into_extract_operation();
        operation.execute_into(files)
    }

    /// List every distinct plan in the index, ignoring the plan-name filter
    ///
    /// # Errors
    ///
    /// Fails on invalid buffer or HTTP settings, when the index cannot be
    /// opened, or on the first fatal pipeline error.
    pub fn reporting_plans(self) -> mrf_index_client::Result<Catalog> {
        self.log_config("plans");
        let options = pipeline_options(self.observer, self.close);
        PlansOperation::new(self.state.location, self.config.buffers, self.config.http)
            .with_options(options)
            .execute()
    }

    fn into_extract_operation(self) -> (String, ExtractOperation) {
        self.log_config("files");
        let options = pipeline_options(self.observer, self.close);
        let location = self.state.location;
        let operation = ExtractOperation::new(location.clone(), self.config).with_options(options);
        (location, operation)
    }

    fn log_config(&self, mode: &str) {
        if self.debug_enabled {
            tracing::debug!(
                target: "mrf_index::builder",
                mode,
                location = %self.state.location,
                plan_names = self.config.plan_names.len(),
                name_matching = ?self.config.name_matching,
                transport_buffer_size = self.config.buffers.transport_buffer_size,
                parse_chunk_size = self.config.buffers.parse_chunk_size,
                max_redirects = self.config.http.max_redirects,
                "Starting index run"
            );
        }
    }
}

fn pipeline_options(observer: Option<Box<dyn ProgressObserver>>, close: Option<CloseHandle>) -> PipelineOptions {
    let mut options = PipelineOptions::default();
    if let Some(observer) = observer {
        options = options.with_observer(observer);
    }
    if let Some(close) = close {
        options = options.with_close_handle(close);
    }
    options
}
