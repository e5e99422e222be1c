//! Plan enumeration
//!
//! Lists every distinct plan published in an index, keyed by `plan_id`.

use hashbrown::HashSet;

use crate::model::{PlanEntry, ReportingPlan};
use crate::error::ErrorChain;
use crate::{Error, Result};

/// Distinct plans in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub plans: Vec<ReportingPlan>,
    /// Plan entries without a `plan_id`
    pub malformed: u64,
    /// Plan entries whose `plan_id` was already listed
    pub duplicates: u64,
    /// Plan entries whose shape did not fit
    pub record_errors: u64,
}

impl Catalog {
    #[must_use]
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

/// Deduplicate plans by `plan_id`; the first occurrence wins
///
/// # Errors
///
/// Returns the first fatal error from `plans`. Malformed entries are logged
/// once each and skipped.
pub fn enumerate_plans<I, E>(plans: I) -> Result<Catalog>
where
    I: IntoIterator<Item = std::result::Result<PlanEntry, E>>,
    E: Into<Error>,
{
    let mut catalog = Catalog::default();
    let mut seen = HashSet::new();

    for item in plans {
        let item: Result<PlanEntry> = item.map_err(Into::into);
        let entry = match item {
            Ok(entry) => entry,
            Err(err) if err.is_recoverable() => {
                catalog.record_errors += 1;
                tracing::warn!(target: "mrf_index::catalog", error = %ErrorChain(&err), "Skipping reporting plan");
                continue;
            }
            Err(err) => return Err(err),
        };

        match ReportingPlan::try_from(entry) {
            Ok(plan) => {
                if seen.insert(plan.plan_id.clone()) {
                    catalog.plans.push(plan);
                } else {
                    catalog.duplicates += 1;
                }
            }
            Err(err) => {
                catalog.malformed += 1;
                tracing::warn!(target: "mrf_index::catalog", error = %ErrorChain(&err), "Malformed reporting plan");
            }
        }
    }

    tracing::info!(
        target: "mrf_index::catalog",
        distinct_plans = catalog.plans.len(),
        duplicates = catalog.duplicates,
        malformed = catalog.malformed,
        "Plan enumeration complete"
    );
    Ok(catalog)
}
