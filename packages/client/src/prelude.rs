//! Common imports for running extractions

pub use crate::catalog::{Catalog, enumerate_plans};
pub use crate::config::{BufferConfig, ExtractConfig, HttpConfig, NameMatching, Validator};
pub use crate::error::{Error, Kind, Result};
pub use crate::filter::{ExtractStats, Extraction, PlanNameFilter, ResultSet, extract, extract_into};
pub use crate::jsonpath::{JsonPathStream, REPORTING_PLANS_PATH, REPORTING_STRUCTURE_PATH};
pub use crate::model::{FileReference, PlanEntry, ReportingPlan, ReportingStructure};
pub use crate::operations::{
    ExtractOperation, IndexOperation, PipelineOptions, PlansOperation, extract_in_network_files,
    extract_reporting_plans,
};
pub use crate::telemetry::{TransferSnapshot, TransferStats};
pub use crate::transport::{CloseHandle, ProgressObserver};
