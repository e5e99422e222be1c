//! Writers for extraction results
//!
//! The URL list holds one location per line in ascending order, the format
//! downstream tooling reads as `SOLUTION.txt`. The CSV writers keep the
//! column order of the published schema.

use std::io::{BufRead, Read, Write};

use mrf_index_client::catalog::Catalog;
use mrf_index_client::error;
use mrf_index_client::filter::ResultSet;
use mrf_index_client::model::FileReference;
use serde::Deserialize;

use crate::Result;

/// Column order of the in-network files CSV
pub const FILES_HEADER: [&str; 2] = ["description", "location"];

/// Column order of the reporting plans CSV
pub const PLANS_HEADER: [&str; 4] = ["plan_name", "plan_id_type", "plan_id", "plan_market_type"];

#[derive(Debug, Deserialize)]
struct LocationRow {
    location: Option<String>,
}

fn headerless_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new().has_headers(false).from_writer(writer)
}

/// Write every distinct location in ascending order, one per line
///
/// Returns the number of lines written.
///
/// # Errors
///
/// Fails with an `Output` error if `writer` fails.
pub fn write_locations<W: Write>(files: &ResultSet, mut writer: W) -> Result<usize> {
    let mut locations: Vec<&str> = files.iter().map(|file| file.location.as_str()).collect();
    locations.sort_unstable();
    locations.dedup();

    for location in &locations {
        writeln!(writer, "{location}").map_err(error::output)?;
    }
    writer.flush().map_err(error::output)?;
    Ok(locations.len())
}

/// Write `description,location` rows ordered by location, then description
///
/// A missing description is written as an empty field.
///
/// # Errors
///
/// Fails with an `Output` error if encoding or `writer` fails.
pub fn write_files_csv<W: Write>(files: &ResultSet, writer: W) -> Result<usize> {
    let mut rows: Vec<&FileReference> = files.iter().collect();
    rows.sort_unstable();

    let mut csv = headerless_writer(writer);
    csv.write_record(FILES_HEADER).map_err(error::output)?;
    for file in &rows {
        csv.serialize(file).map_err(error::output)?;
    }
    csv.flush().map_err(error::output)?;
    Ok(rows.len())
}

/// Write the four plan columns in catalog order
///
/// # Errors
///
/// Fails with an `Output` error if encoding or `writer` fails.
pub fn write_plans_csv<W: Write>(catalog: &Catalog, writer: W) -> Result<usize> {
    let mut csv = headerless_writer(writer);
    csv.write_record(PLANS_HEADER).map_err(error::output)?;
    for plan in &catalog.plans {
        csv.serialize(plan).map_err(error::output)?;
    }
    csv.flush().map_err(error::output)?;
    Ok(catalog.plans.len())
}

/// Write the catalog's plans as a pretty-printed JSON array
///
/// # Errors
///
/// Fails with an `Output` error if encoding or `writer` fails.
pub fn write_plans_json<W: Write>(catalog: &Catalog, mut writer: W) -> Result<usize> {
    serde_json::to_writer_pretty(&mut writer, &catalog.plans).map_err(error::output)?;
    writeln!(writer).map_err(error::output)?;
    writer.flush().map_err(error::output)?;
    Ok(catalog.plans.len())
}

/// Read a URL list as written by [`write_locations`]
///
/// Blank lines are skipped and surrounding whitespace is trimmed.
///
/// # Errors
///
/// Fails with an `Output` error if `reader` fails.
pub fn read_locations<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut locations = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(error::output)?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            locations.push(trimmed.to_string());
        }
    }
    Ok(locations)
}

/// Read the `location` column of a files CSV as written by [`write_files_csv`]
///
/// Rows with an empty location are skipped.
///
/// # Errors
///
/// Fails with an `Output` error if the CSV is malformed or has no
/// `location` column.
pub fn read_locations_csv<R: Read>(reader: R) -> Result<Vec<String>> {
    let mut csv = csv::Reader::from_reader(reader);
    let mut locations = Vec::new();
    for row in csv.deserialize::<LocationRow>() {
        let row = row.map_err(error::output)?;
        if let Some(location) = row.location.filter(|location| !location.is_empty()) {
            locations.push(location);
        }
    }
    Ok(locations)
}

#[cfg(test)]
mod tests {
    use mrf_index_client::model::ReportingPlan;

    use super::*;

    fn files() -> ResultSet {
        [
            FileReference::new(Some("d2".into()), "http://x/b"),
            FileReference::new(Some("d1".into()), "http://x/a"),
            FileReference::new(None, "http://x/a"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn locations_are_sorted_and_distinct() {
        let mut out = Vec::new();
        let written = write_locations(&files(), &mut out).unwrap();
        assert_eq!(written, 2);
        assert_eq!(String::from_utf8(out).unwrap(), "http://x/a\nhttp://x/b\n");
    }

    #[test]
    fn files_csv_keeps_every_pair() {
        let mut out = Vec::new();
        let written = write_files_csv(&files(), &mut out).unwrap();
        assert_eq!(written, 3);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "description,location\n,http://x/a\nd1,http://x/a\nd2,http://x/b\n"
        );
    }

    #[test]
    fn plans_csv_has_four_columns() {
        let catalog = Catalog {
            plans: vec![ReportingPlan {
                plan_name: Some("PPO NY - WONDER - ANTHEM".into()),
                plan_id_type: Some("EIN".into()),
                plan_id: "452320063".into(),
                plan_market_type: None,
            }],
            ..Catalog::default()
        };
        let mut out = Vec::new();
        write_plans_csv(&catalog, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "plan_name,plan_id_type,plan_id,plan_market_type\nPPO NY - WONDER - ANTHEM,EIN,452320063,\n"
        );
    }

    #[test]
    fn plans_json_is_an_array() {
        let catalog = Catalog::default();
        let mut out = Vec::new();
        write_plans_json(&catalog, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value, serde_json::json!([]));
    }

    #[test]
    fn written_lists_read_back() {
        let mut out = Vec::new();
        write_locations(&files(), &mut out).unwrap();
        assert_eq!(read_locations(out.as_slice()).unwrap(), ["http://x/a", "http://x/b"]);

        let mut csv = Vec::new();
        write_files_csv(&files(), &mut csv).unwrap();
        assert_eq!(
            read_locations_csv(csv.as_slice()).unwrap(),
            ["http://x/a", "http://x/a", "http://x/b"]
        );
    }

    #[test]
    fn failing_writer_is_an_output_error() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk full"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let err = write_locations(&files(), Broken).unwrap_err();
        assert!(matches!(err.kind(), mrf_index_client::Kind::Output));
    }
}
