//! In-network file extraction

use crate::config::{ExtractConfig, Validator};
use crate::filter::{self, ExtractStats, Extraction, PlanNameFilter, ResultSet};
use crate::jsonpath::REPORTING_STRUCTURE_PATH;
use crate::model::ReportingStructure;
use crate::operations::IndexOperation;
use crate::operations::pipeline::{self, PipelineOptions};

/// Extract the in-network file references of the configured plans
#[derive(Debug)]
pub struct ExtractOperation {
    location: String,
    config: ExtractConfig,
    options: PipelineOptions,
}

impl ExtractOperation {
    #[must_use]
    pub fn new(location: impl Into<String>, config: ExtractConfig) -> Self {
        Self {
            location: location.into(),
            config,
            options: PipelineOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    /// Run the extraction, inserting into a caller-owned set
    ///
    /// References inserted before a fatal error stay in `files`.
    ///
    /// # Errors
    ///
    /// Fails on invalid configuration, on transport failure, or on any fatal
    /// error from a pipeline stage.
    pub fn execute_into(self, files: &mut ResultSet) -> crate::Result<ExtractStats> {
        self.config.validate()?;
        let filter = PlanNameFilter::from_config(&self.config);

        let (structures, transfer) = pipeline::stream_values::<ReportingStructure>(
            &self.location,
            REPORTING_STRUCTURE_PATH,
            &self.config.buffers,
            &self.config.http,
            self.options,
        )?;

        let stats = filter::extract_into(structures, &filter, files)
            .map_err(|e| e.or_location(&self.location))?;
        pipeline::log_transfer_summary(&self.location, &transfer);
        Ok(stats)
    }
}

impl IndexOperation for ExtractOperation {
    type Output = Extraction;

    fn execute(self) -> crate::Result<Extraction> {
        let mut files = ResultSet::new();
        let stats = self.execute_into(&mut files)?;
        Ok(Extraction { files, stats })
    }

    fn location(&self) -> &str {
        &self.location
    }
}

/// Extract the in-network file references of `config.plan_names` from the index at `location`
///
/// # Errors
///
/// See [`ExtractOperation::execute_into`].
pub fn extract_in_network_files(location: &str, config: &ExtractConfig) -> crate::Result<Extraction> {
    ExtractOperation::new(location, config.clone()).execute()
}
