//! Index document records
//!
//! Wire forms (`PlanEntry`, `FileEntry`) accept whatever the publisher sent;
//! validated forms (`ReportingPlan`, `FileReference`) carry the fields the
//! pipeline relies on. Nested list elements decode one at a time, so a
//! malformed plan or file entry never costs its siblings.

mod file;
mod lenient;
mod plan;

use serde::Deserialize;

pub use file::{FileEntry, FileReference};
pub use lenient::ListEntry;
pub use plan::{PlanEntry, ReportingPlan};

/// One element of the top-level `reporting_structure` list
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReportingStructure {
    #[serde(default)]
    pub reporting_plans: Option<Vec<ListEntry<PlanEntry>>>,
    #[serde(default)]
    pub in_network_files: Option<Vec<ListEntry<FileEntry>>>,
}

impl ReportingStructure {
    /// Names of the decoded plans that carry one
    pub fn plan_names(&self) -> impl Iterator<Item = &str> {
        self.reporting_plans
            .iter()
            .flatten()
            .filter_map(ListEntry::decoded)
            .filter_map(|plan| plan.plan_name.as_deref())
    }

    /// Reasons for each plan entry that failed to decode
    pub fn malformed_plans(&self) -> impl Iterator<Item = &str> {
        self.reporting_plans.iter().flatten().filter_map(|plan| match plan {
            ListEntry::Malformed(reason) => Some(reason.as_str()),
            ListEntry::Decoded(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_identifiers_are_rendered_as_text() {
        let entry: PlanEntry = serde_json::from_str(
            r#"{"plan_name": 12, "plan_id": 1234567890, "plan_id_type": "EIN", "extra": true}"#,
        )
        .expect("valid plan");
        assert_eq!(entry.plan_name.as_deref(), Some("12"));
        assert_eq!(entry.plan_id.as_deref(), Some("1234567890"));
        assert_eq!(entry.plan_market_type, None);

        let entry: PlanEntry = serde_json::from_str(
            r#"{"plan_name": "A", "plan_id": "1", "plan_id_type": 1, "plan_market_type": false}"#,
        )
        .expect("valid plan");
        assert_eq!(entry.plan_id_type.as_deref(), Some("1"));
        assert_eq!(entry.plan_market_type.as_deref(), Some("false"));
    }

    #[test]
    fn null_identifiers_are_absent() {
        let entry: PlanEntry =
            serde_json::from_str(r#"{"plan_name": null, "plan_id": null}"#).expect("valid plan");
        assert_eq!(entry, PlanEntry::default());

        let err = ReportingPlan::try_from(entry).expect_err("no plan_id");
        assert!(err.is_recoverable());
    }

    #[test]
    fn missing_lists_and_location() {
        let structure: ReportingStructure =
            serde_json::from_str(r#"{"reporting_plans": [{"plan_id": "1"}, {"plan_name": "A"}]}"#)
                .expect("valid structure");
        assert!(structure.in_network_files.is_none());
        assert_eq!(structure.plan_names().collect::<Vec<_>>(), vec!["A"]);

        let err = FileReference::try_from(FileEntry {
            description: Some("d".into()),
            location: None,
        })
        .expect_err("no location");
        assert!(err.is_recoverable());
    }

    #[test]
    fn bad_list_elements_do_not_fail_the_structure() {
        let structure: ReportingStructure = serde_json::from_str(
            r#"{
                "reporting_plans": [{"plan_name": {"nested": 1}}, "B", {"plan_name": "A"}],
                "in_network_files": [
                    {"description": 7, "location": "http://x/seven"},
                    {"description": "d", "location": 5},
                    null,
                    {"description": "d", "location": "http://x/good"}
                ]
            }"#,
        )
        .expect("valid structure");

        assert_eq!(structure.plan_names().collect::<Vec<_>>(), vec!["A"]);
        assert_eq!(structure.malformed_plans().count(), 2);

        let files: Vec<crate::Result<FileEntry>> = structure
            .in_network_files
            .into_iter()
            .flatten()
            .map(ListEntry::into_result)
            .collect();
        assert_eq!(files.len(), 4);
        assert_eq!(
            files[0].as_ref().expect("numeric description").description.as_deref(),
            Some("7")
        );
        assert!(files[1].as_ref().is_err_and(crate::Error::is_recoverable));
        assert!(files[2].is_err());
        assert_eq!(
            files[3].as_ref().expect("good file").location.as_deref(),
            Some("http://x/good")
        );
    }

    #[test]
    fn references_order_by_location_then_description() {
        let mut refs = vec![
            FileReference::new(Some("b".into()), "http://x/2"),
            FileReference::new(Some("a".into()), "http://x/2"),
            FileReference::new(None, "http://x/1"),
        ];
        refs.sort();
        assert_eq!(refs[0].location, "http://x/1");
        assert_eq!(refs[1].description.as_deref(), Some("a"));
    }
}
