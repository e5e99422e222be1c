use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::lenient::scalar_text;

/// File-reference descriptor as published in the index
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FileEntry {
    #[serde(default, deserialize_with = "scalar_text")]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// Reference to an in-network rate file
///
/// Identity is the `(description, location)` pair. Ordering is by location,
/// then description.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FileReference {
    pub description: Option<String>,
    pub location: String,
}

impl FileReference {
    #[must_use]
    pub fn new(description: Option<String>, location: impl Into<String>) -> Self {
        Self {
            description,
            location: location.into(),
        }
    }
}

impl Ord for FileReference {
    fn cmp(&self, other: &Self) -> Ordering {
        self.location
            .cmp(&other.location)
            .then_with(|| self.description.cmp(&other.description))
    }
}

impl PartialOrd for FileReference {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl TryFrom<FileEntry> for FileReference {
    type Error = crate::Error;

    fn try_from(entry: FileEntry) -> crate::Result<Self> {
        match entry.location {
            Some(location) => Ok(FileReference {
                description: entry.description,
                location,
            }),
            None => Err(crate::error::record(format!(
                "Malformed in-network file: missing location (description: {})",
                entry.description.as_deref().unwrap_or("<none>")
            ))),
        }
    }
}
