//! Plan enumeration over an index file

use crate::catalog::{self, Catalog};
use crate::config::{BufferConfig, HttpConfig, Validator};
use crate::jsonpath::REPORTING_PLANS_PATH;
use crate::model::PlanEntry;
use crate::operations::IndexOperation;
use crate::operations::pipeline::{self, PipelineOptions};

/// List the distinct plans published in an index
#[derive(Debug)]
pub struct PlansOperation {
    location: String,
    buffers: BufferConfig,
    http: HttpConfig,
    options: PipelineOptions,
}

impl PlansOperation {
    #[must_use]
    pub fn new(location: impl Into<String>, buffers: BufferConfig, http: HttpConfig) -> Self {
        Self {
            location: location.into(),
            buffers,
            http,
            options: PipelineOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }
}

impl IndexOperation for PlansOperation {
    type Output = Catalog;

    fn execute(self) -> crate::Result<Catalog> {
        self.buffers.validate()?;
        self.http.validate()?;

        let (plans, transfer) = pipeline::stream_values::<PlanEntry>(
            &self.location,
            REPORTING_PLANS_PATH,
            &self.buffers,
            &self.http,
            self.options,
        )?;

        let catalog = catalog::enumerate_plans(plans)
            .map_err(|e| e.or_location(&self.location))?;
        pipeline::log_transfer_summary(&self.location, &transfer);
        Ok(catalog)
    }

    fn location(&self) -> &str {
        &self.location
    }
}

/// List the distinct plans in the index at `location`
///
/// # Errors
///
/// Fails on invalid configuration, on transport failure, or on any fatal
/// error from a pipeline stage.
pub fn extract_reporting_plans(location: &str, buffers: &BufferConfig, http: &HttpConfig) -> crate::Result<Catalog> {
    PlansOperation::new(location, buffers.clone(), http.clone()).execute()
}
