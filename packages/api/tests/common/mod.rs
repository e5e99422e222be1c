#![allow(dead_code)]

use std::io::Write;

use flate2::{Compression, write::GzEncoder};
use tempfile::NamedTempFile;

pub const INDEX: &str = r#"{
    "reporting_entity_name": "Anthem",
    "reporting_structure": [
        {
            "reporting_plans": [
                {"plan_name": "PPO NY - WONDER - ANTHEM", "plan_id": "452320063", "plan_id_type": "EIN", "plan_market_type": "group"}
            ],
            "in_network_files": [
                {"description": "ny ppo", "location": "https://mrf.example/ny.json.gz?sig=1"},
                {"description": "ny ppo mirror", "location": "https://mrf.example/ny.json.gz?sig=1"}
            ]
        },
        {
            "reporting_plans": [
                {"plan_name": "HMO CA - OTHER", "plan_id": 1234, "plan_id_type": "HIOS"},
                {"plan_name": "PPO NY - WONDER - ANTHEM", "plan_id": "452320063", "plan_id_type": "EIN", "plan_market_type": "group"}
            ],
            "in_network_files": [
                {"description": "shared", "location": "https://mrf.example/shared.json.gz"}
            ]
        },
        {
            "reporting_plans": [{"plan_name": "HMO CA - OTHER", "plan_id": 1234}],
            "in_network_files": [{"description": "ca", "location": "https://mrf.example/ca.json.gz"}]
        }
    ]
}"#;

pub fn gzip_file(json: &str) -> NamedTempFile {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::fast());
    encoder.write_all(json.as_bytes()).expect("gzip write");
    let bytes = encoder.finish().expect("gzip finish");

    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(&bytes).expect("write fixture");
    file.flush().expect("flush fixture");
    file
}

pub fn path_of(file: &NamedTempFile) -> String {
    file.path().to_str().expect("utf8 path").to_string()
}
