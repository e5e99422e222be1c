mod common;

#[cfg(test)]
mod tests {
    use mrf_index_client::config::{BufferConfig, ExtractConfig, HttpConfig};
    use mrf_index_client::filter::ResultSet;
    use mrf_index_client::model::FileReference;
    use mrf_index_client::operations::{
        ExtractOperation, IndexOperation, extract_in_network_files, extract_reporting_plans,
    };

    use crate::common::{gzip, gzip_file, path_of, raw_file};

    const TWO_STRUCTURES: &str = r#"{
        "reporting_entity_name": "Anthem",
        "reporting_structure": [
            {
                "reporting_plans": [{"plan_name": "A", "plan_id": "1", "plan_id_type": "EIN", "plan_market_type": "group"}],
                "in_network_files": [{"description": "d1", "location": "http://x/f1"}]
            },
            {
                "reporting_plans": [{"plan_name": "Z", "plan_id": "2"}],
                "in_network_files": [{"description": "d2", "location": "http://x/f2"}]
            }
        ]
    }"#;

    fn config(names: &[&str]) -> ExtractConfig {
        ExtractConfig::default()
            .with_plan_names(names.iter().copied())
            .with_buffers(BufferConfig::low_memory().with_parse_chunk_size(7))
    }

    #[test]
    fn two_structure_scenario_selects_only_matching_files() {
        let file = gzip_file(TWO_STRUCTURES);
        let extraction = extract_in_network_files(&path_of(&file), &config(&["A"])).expect("extract");

        assert_eq!(
            extraction.files.into_sorted(),
            vec![FileReference::new(Some("d1".into()), "http://x/f1")]
        );
        assert_eq!(extraction.stats.structures_seen, 2);
        assert_eq!(extraction.stats.structures_matched, 1);
    }

    #[test]
    fn repeated_runs_produce_the_same_set() {
        let file = gzip_file(TWO_STRUCTURES);
        let first = extract_in_network_files(&path_of(&file), &config(&["A", "Z"])).expect("first");
        let second = extract_in_network_files(&path_of(&file), &config(&["A", "Z"])).expect("second");
        assert_eq!(first.files.len(), 2);
        assert_eq!(first.files, second.files);
    }

    #[test]
    fn duplicate_files_across_structures_collapse() {
        let doc = r#"{"reporting_structure": [
            {"reporting_plans": [{"plan_name": "A", "plan_id": "1"}],
             "in_network_files": [{"description": "d", "location": "http://x/f"}]},
            {"reporting_plans": [{"plan_name": "B", "plan_id": "2"}],
             "in_network_files": [{"description": "d", "location": "http://x/f"},
                                  {"location": "http://x/g"}]},
            {"reporting_plans": [{"plan_name": "A", "plan_id": "3"}]}
        ]}"#;
        let file = gzip_file(doc);
        let extraction = extract_in_network_files(&path_of(&file), &config(&["A", "B"])).expect("extract");

        assert_eq!(
            extraction.files.into_sorted(),
            vec![
                FileReference::new(Some("d".into()), "http://x/f"),
                FileReference::new(None, "http://x/g"),
            ]
        );
        assert_eq!(extraction.stats.files_inserted, 3);
    }

    #[test]
    fn malformed_structures_are_skipped() {
        let doc = r#"{"reporting_structure": [
            {"reporting_plans": "not a list", "in_network_files": []},
            {"reporting_plans": [{"plan_name": "A"}],
             "in_network_files": [{"description": "no location"}, {"location": "http://x/ok"}]}
        ]}"#;
        let file = gzip_file(doc);
        let extraction = extract_in_network_files(&path_of(&file), &config(&["A"])).expect("extract");

        assert_eq!(extraction.files.len(), 1);
        assert_eq!(extraction.stats.record_errors, 1);
        assert_eq!(extraction.stats.malformed_files, 1);
    }

    #[test]
    fn off_type_plan_fields_keep_the_structure() {
        let doc = r#"{"reporting_structure": [
            {"reporting_plans": [{"plan_name": "A", "plan_id": "1", "plan_id_type": 1, "plan_market_type": 5}],
             "in_network_files": [{"description": "d", "location": "http://x/f"}]}
        ]}"#;
        let file = gzip_file(doc);
        let extraction = extract_in_network_files(&path_of(&file), &config(&["A"])).expect("extract");

        assert_eq!(
            extraction.files.into_sorted(),
            vec![FileReference::new(Some("d".into()), "http://x/f")]
        );
        assert_eq!(extraction.stats.record_errors, 0);
    }

    #[test]
    fn bad_entries_are_skipped_without_losing_their_siblings() {
        let doc = r#"{"reporting_structure": [
            {"reporting_plans": ["A", {"plan_name": {"x": 1}}, {"plan_name": "A", "plan_id": "1"}],
             "in_network_files": [
                {"description": 7, "location": "http://x/bad"},
                {"description": "d", "location": {"href": "http://x/nested"}},
                "http://x/bare",
                {"description": "d", "location": "http://x/good"}
             ]}
        ]}"#;
        let file = gzip_file(doc);
        let extraction = extract_in_network_files(&path_of(&file), &config(&["A"])).expect("extract");

        let locations: Vec<String> = extraction
            .files
            .into_sorted()
            .into_iter()
            .map(|file| file.location)
            .collect();
        assert_eq!(locations, ["http://x/bad", "http://x/good"]);
        assert_eq!(extraction.stats.structures_matched, 1);
        assert_eq!(extraction.stats.malformed_plans, 2);
        assert_eq!(extraction.stats.malformed_files, 2);
        assert_eq!(extraction.stats.record_errors, 0);
    }

    #[test]
    fn plan_catalog_keeps_plans_with_off_type_descriptors() {
        let doc = r#"{"reporting_structure": [
            {"reporting_plans": [{"plan_name": "A", "plan_id": "1", "plan_id_type": 2, "plan_market_type": 5}]}
        ]}"#;
        let file = gzip_file(doc);
        let catalog = extract_reporting_plans(
            &path_of(&file),
            &BufferConfig::low_memory(),
            &HttpConfig::default(),
        )
        .expect("catalog");

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.plans[0].plan_id_type.as_deref(), Some("2"));
        assert_eq!(catalog.plans[0].plan_market_type.as_deref(), Some("5"));
        assert_eq!(catalog.record_errors, 0);
    }

    #[test]
    fn plan_catalog_dedups_by_id_and_tolerates_missing_ids() {
        let doc = r#"{"reporting_structure": [
            {"reporting_plans": [{"plan_name": "A", "plan_id": 100}, {"plan_name": "no id"}]},
            {"reporting_plans": [{"plan_name": "A again", "plan_id": "100"}, {"plan_name": "B", "plan_id": "200"}]}
        ]}"#;
        let file = gzip_file(doc);
        let catalog = extract_reporting_plans(
            &path_of(&file),
            &BufferConfig::low_memory(),
            &HttpConfig::default(),
        )
        .expect("catalog");

        let ids: Vec<_> = catalog.plans.iter().map(|plan| plan.plan_id.as_str()).collect();
        assert_eq!(ids, vec!["100", "200"]);
        assert_eq!(catalog.plans[0].plan_name.as_deref(), Some("A"));
        assert_eq!(catalog.malformed, 1);
        assert_eq!(catalog.duplicates, 1);
    }

    #[test]
    fn corrupt_gzip_is_a_decompression_error() {
        let file = raw_file(b"this is not gzip at all");
        let err = extract_in_network_files(&path_of(&file), &config(&["A"])).expect_err("corrupt");
        assert!(err.is_decompression(), "{err:?}");
    }

    #[test]
    fn invalid_utf8_is_a_decode_error() {
        let file = raw_file(&gzip(b"{\"reporting_structure\": [\"\xC3\x28\"]}"));
        let err = extract_in_network_files(&path_of(&file), &config(&["A"])).expect_err("invalid");
        assert!(err.is_decode(), "{err:?}");
    }

    #[test]
    fn truncated_document_keeps_partial_results() {
        let doc = r#"{"reporting_structure": [
            {"reporting_plans": [{"plan_name": "A", "plan_id": "1"}],
             "in_network_files": [{"description": "d1", "location": "http://x/f1"}]},
            {"reporting_plans": [{"plan_name": "A", "plan_id": "2"}],
             "in_network_files": [{"description": "d2", "locat"#;
        let file = gzip_file(doc);

        let mut files = ResultSet::new();
        let err = ExtractOperation::new(path_of(&file), config(&["A"]))
            .execute_into(&mut files)
            .expect_err("truncated");
        assert!(err.is_parse(), "{err:?}");
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn missing_file_fails_before_parsing() {
        let op = ExtractOperation::new("/no/such/index.json.gz", config(&["A"]));
        assert_eq!(op.location(), "/no/such/index.json.gz");
        let err = op.execute().expect_err("missing");
        assert!(err.is_transport());
    }

    #[test]
    fn empty_filter_is_a_config_error() {
        let file = gzip_file(TWO_STRUCTURES);
        let err = extract_in_network_files(&path_of(&file), &config(&[])).expect_err("empty filter");
        assert_eq!(err.kind(), &mrf_index_client::Kind::Config);
    }
}
