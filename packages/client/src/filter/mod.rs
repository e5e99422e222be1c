//! Plan-name filtering and file-reference deduplication

mod engine;
mod plan_filter;
mod result_set;

pub use engine::{ExtractStats, Extraction, extract, extract_into};
pub use plan_filter::PlanNameFilter;
pub use result_set::ResultSet;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NameMatching;
    use crate::model::{FileEntry, FileReference, ListEntry, PlanEntry, ReportingStructure};

    fn structure(plans: &[Option<&str>], files: Option<&[(&str, &str)]>) -> ReportingStructure {
        ReportingStructure {
            reporting_plans: Some(
                plans
                    .iter()
                    .map(|name| {
                        ListEntry::from(PlanEntry {
                            plan_name: name.map(str::to_string),
                            plan_id: Some("1".into()),
                            ..PlanEntry::default()
                        })
                    })
                    .collect(),
            ),
            in_network_files: files.map(|files| {
                files
                    .iter()
                    .map(|(description, location)| {
                        ListEntry::from(FileEntry {
                            description: Some((*description).to_string()),
                            location: Some((*location).to_string()),
                        })
                    })
                    .collect()
            }),
        }
    }

    fn ok(items: Vec<ReportingStructure>) -> Vec<crate::Result<ReportingStructure>> {
        items.into_iter().map(Ok).collect()
    }

    fn filter(names: &[&str]) -> PlanNameFilter {
        PlanNameFilter::new(names, NameMatching::Exact)
    }

    #[test]
    fn filter_uses_set_intersection() {
        let s = structure(&[Some("A"), Some("B")], None);
        assert!(filter(&["A"]).matches(&s));
        assert!(!filter(&["C"]).matches(&s));
        assert!(!filter(&[]).matches(&s));
        assert!(!filter(&["A"]).matches(&structure(&[None], None)));
    }

    #[test]
    fn normalized_matching_is_opt_in() {
        let s = structure(&[Some("  anthem  gold ppo ")], None);
        assert!(!filter(&["ANTHEM GOLD PPO"]).matches(&s));
        assert!(PlanNameFilter::new(["ANTHEM GOLD PPO"], NameMatching::Normalized).matches(&s));
    }

    #[test]
    fn duplicates_collapse_and_extraction_is_idempotent() {
        let input = || {
            ok(vec![
                structure(&[Some("A")], Some(&[("d1", "http://x/f1"), ("d1", "http://x/f1")])),
                structure(&[Some("A")], Some(&[("d1", "http://x/f1"), ("d2", "http://x/f1")])),
            ])
        };

        let first = extract(input(), &filter(&["A"])).expect("extract");
        let second = extract(input(), &filter(&["A"])).expect("extract");
        assert_eq!(first.files.len(), 2);
        assert_eq!(first.stats.files_inserted, 4);
        assert_eq!(first.files, second.files);
    }

    #[test]
    fn missing_lists_and_locations_contribute_nothing() {
        let mut malformed = structure(&[Some("A")], Some(&[("d1", "http://x/f1")]));
        if let Some(files) = malformed.in_network_files.as_mut() {
            files.push(ListEntry::from(FileEntry {
                description: Some("no location".into()),
                location: None,
            }));
            files.push(ListEntry::Malformed("invalid type: integer `5`, expected struct FileEntry".into()));
        }
        if let Some(plans) = malformed.reporting_plans.as_mut() {
            plans.push(ListEntry::Malformed("invalid type: string \"B\", expected struct PlanEntry".into()));
        }

        let extraction = extract(
            ok(vec![structure(&[Some("A")], None), malformed]),
            &filter(&["A"]),
        )
        .expect("extract");

        assert_eq!(
            extraction.files.into_sorted(),
            vec![FileReference::new(Some("d1".into()), "http://x/f1")]
        );
        assert_eq!(extraction.stats.malformed_files, 2);
        assert_eq!(extraction.stats.malformed_plans, 1);
        assert_eq!(extraction.stats.structures_matched, 2);
    }

    #[test]
    fn record_errors_are_skipped_and_fatal_errors_keep_partial_results() {
        let items: Vec<crate::Result<ReportingStructure>> = vec![
            Ok(structure(&[Some("A")], Some(&[("d1", "http://x/f1")]))),
            Err(crate::error::record("bad shape")),
            Ok(structure(&[Some("A")], Some(&[("d2", "http://x/f2")]))),
            Err(crate::error::parse("unexpected end of input")),
            Ok(structure(&[Some("A")], Some(&[("d3", "http://x/f3")]))),
        ];

        let mut files = ResultSet::new();
        let err = extract_into(items, &filter(&["A"]), &mut files).expect_err("fatal");
        assert!(err.is_parse());
        assert_eq!(files.len(), 2);
    }
}
