mod common;

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use mrf_index::{CloseHandle, FileReference, IndexExtractor, Kind, NameMatching, ResultSet, output};

    use crate::common::{INDEX, gzip_file, path_of};

    #[test]
    fn default_filter_selects_ny_ppo_files() {
        let file = gzip_file(INDEX);
        let extraction = IndexExtractor::from_location(path_of(&file))
            .parse_chunk_size(13)
            .in_network_files()
            .expect("extract");

        assert_eq!(
            extraction.files.clone().into_sorted(),
            vec![
                FileReference::new(Some("ny ppo".into()), "https://mrf.example/ny.json.gz?sig=1"),
                FileReference::new(Some("ny ppo mirror".into()), "https://mrf.example/ny.json.gz?sig=1"),
                FileReference::new(Some("shared".into()), "https://mrf.example/shared.json.gz"),
            ]
        );
        assert_eq!(extraction.stats.structures_seen, 3);
        assert_eq!(extraction.stats.structures_matched, 2);

        let mut out = Vec::new();
        let written = output::write_locations(&extraction.files, &mut out).expect("write");
        assert_eq!(written, 2);
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "https://mrf.example/ny.json.gz?sig=1\nhttps://mrf.example/shared.json.gz\n"
        );
    }

    #[test]
    fn explicit_plan_names_replace_the_default_list() {
        let file = gzip_file(INDEX);
        let extraction = mrf_index::from_location(path_of(&file))
            .plan_names(["HMO CA - OTHER"])
            .in_network_files()
            .expect("extract");

        let locations: Vec<String> = extraction
            .files
            .into_sorted()
            .into_iter()
            .map(|file| file.location)
            .collect();
        assert_eq!(
            locations,
            ["https://mrf.example/ca.json.gz", "https://mrf.example/shared.json.gz"]
        );
    }

    #[test]
    fn normalized_matching_is_opt_in() {
        let file = gzip_file(INDEX);
        let loose = ["  ppo ny -  wonder - anthem"];

        let exact = IndexExtractor::from_location(path_of(&file))
            .plan_names(loose)
            .in_network_files()
            .expect("exact");
        assert!(exact.files.is_empty());

        let normalized = IndexExtractor::from_location(path_of(&file))
            .plan_names(loose)
            .name_matching(NameMatching::Normalized)
            .in_network_files()
            .expect("normalized");
        assert_eq!(normalized.files.len(), 3);
    }

    #[test]
    fn observer_sees_every_compressed_byte() {
        let file = gzip_file(INDEX);
        let size = std::fs::metadata(file.path()).expect("metadata").len();
        let updates = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&updates);

        IndexExtractor::from_location(path_of(&file))
            .observer(move |bytes_read: u64, total: Option<u64>| {
                sink.lock().expect("lock").push((bytes_read, total));
            })
            .in_network_files()
            .expect("extract");

        let updates = updates.lock().expect("lock");
        assert_eq!(updates.last(), Some(&(size, Some(size))));
        assert!(updates.windows(2).all(|pair| pair[0].0 <= pair[1].0));
    }

    #[test]
    fn reporting_plans_lists_each_plan_once() {
        let file = gzip_file(INDEX);
        let catalog = IndexExtractor::from_location(path_of(&file))
            .reporting_plans()
            .expect("plans");

        let ids: Vec<&str> = catalog.plans.iter().map(|plan| plan.plan_id.as_str()).collect();
        assert_eq!(ids, ["452320063", "1234"]);
        assert_eq!(catalog.duplicates, 2);
        assert_eq!(catalog.malformed, 0);
        assert_eq!(catalog.plans[1].plan_id_type.as_deref(), Some("HIOS"));
    }

    #[test]
    fn closed_handle_stops_before_reading() {
        let file = gzip_file(INDEX);
        let close = CloseHandle::new();
        close.close();

        let err = IndexExtractor::from_location(path_of(&file))
            .close_handle(close)
            .in_network_files()
            .expect_err("closed");
        assert!(err.is_closed(), "{err:?}");
    }

    #[test]
    fn invalid_buffer_size_is_a_config_error() {
        let file = gzip_file(INDEX);
        let err = IndexExtractor::from_location(path_of(&file))
            .buffer_size(0)
            .in_network_files()
            .expect_err("invalid");
        assert!(matches!(err.kind(), Kind::Config), "{err:?}");
    }

    #[test]
    fn missing_index_is_a_transport_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("absent.json.gz");

        let mut files = ResultSet::new();
        let err = IndexExtractor::new()
            .location(missing.to_string_lossy())
            .in_network_files_into(&mut files)
            .expect_err("missing");
        assert!(err.is_transport(), "{err:?}");
        assert!(files.is_empty());
    }
}
