//! Filter and projection of reporting structures

use crate::model::{FileReference, ReportingStructure};
use crate::error::ErrorChain;
use crate::{Error, Result};

use super::{PlanNameFilter, ResultSet};

/// Counters for one extraction run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    pub structures_seen: u64,
    pub structures_matched: u64,
    /// File entries inserted from matched structures, duplicates included
    pub files_inserted: u64,
    /// File entries of matched structures skipped for a missing or mistyped location
    pub malformed_files: u64,
    /// Plan entries that failed to decode; the rest of their structure is kept
    pub malformed_plans: u64,
    /// Structures skipped because their shape did not fit
    pub record_errors: u64,
}

/// Result of a completed extraction run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub files: ResultSet,
    pub stats: ExtractStats,
}

/// Collect the file references of every structure selected by `filter`
///
/// # Errors
///
/// Returns the first fatal error from `structures`. Recoverable errors are
/// logged, counted, and skipped.
pub fn extract<I, E>(structures: I, filter: &PlanNameFilter) -> Result<Extraction>
where
    I: IntoIterator<Item = std::result::Result<ReportingStructure, E>>,
    E: Into<Error>,
{
    let mut files = ResultSet::new();
    let stats = extract_into(structures, filter, &mut files)?;
    Ok(Extraction { files, stats })
}

/// Like [`extract`], inserting into a caller-owned set
///
/// References inserted before a fatal error stay in `files`.
///
/// # Errors
///
/// Returns the first fatal error from `structures`.
pub fn extract_into<I, E>(
    structures: I,
    filter: &PlanNameFilter,
    files: &mut ResultSet,
) -> Result<ExtractStats>
where
    I: IntoIterator<Item = std::result::Result<ReportingStructure, E>>,
    E: Into<Error>,
{
    let mut stats = ExtractStats::default();

    for item in structures {
        let item: Result<ReportingStructure> = item.map_err(Into::into);
        let structure = match item {
            Ok(structure) => structure,
            Err(err) if err.is_recoverable() => {
                stats.record_errors += 1;
                tracing::warn!(target: "mrf_index::filter", error = %ErrorChain(&err), "Skipping reporting structure");
                continue;
            }
            Err(err) => return Err(err),
        };
        stats.structures_seen += 1;

        for reason in structure.malformed_plans() {
            stats.malformed_plans += 1;
            tracing::warn!(target: "mrf_index::filter", error = reason, "Skipping reporting plan");
        }

        if !filter.matches(&structure) {
            continue;
        }
        stats.structures_matched += 1;

        for entry in structure.in_network_files.into_iter().flatten() {
            match entry.into_result().and_then(FileReference::try_from) {
                Ok(file) => {
                    files.insert(file);
                    stats.files_inserted += 1;
                }
                Err(err) => {
                    stats.malformed_files += 1;
                    tracing::warn!(target: "mrf_index::filter", error = %ErrorChain(&err), "Skipping in-network file");
                }
            }
        }
    }

    tracing::info!(
        target: "mrf_index::filter",
        distinct_files = files.len(),
        structures_seen = stats.structures_seen,
        structures_matched = stats.structures_matched,
        "Extraction complete"
    );
    Ok(stats)
}
