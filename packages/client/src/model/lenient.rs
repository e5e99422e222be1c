//! Lenient decoding for loosely typed publisher data

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

/// Decode an optional text field that may be published as any JSON scalar
///
/// Numbers and booleans are rendered to their JSON text; `null` is treated as
/// absent. Objects and arrays are rejected.
pub(crate) fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|value| match value {
        Scalar::Text(text) => text,
        Scalar::Number(number) => number.to_string(),
        Scalar::Bool(flag) => flag.to_string(),
    }))
}

/// One element of a nested list, decoded independently of its siblings
///
/// A decode failure is captured as [`ListEntry::Malformed`] so the enclosing
/// record still deserializes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEntry<T> {
    Decoded(T),
    Malformed(String),
}

impl<T> ListEntry<T> {
    /// Convert into a result
    ///
    /// # Errors
    ///
    /// A malformed element becomes a recoverable `Record` error.
    pub fn into_result(self) -> crate::Result<T> {
        match self {
            ListEntry::Decoded(value) => Ok(value),
            ListEntry::Malformed(reason) => Err(crate::error::record(reason)),
        }
    }

    #[must_use]
    pub fn decoded(&self) -> Option<&T> {
        match self {
            ListEntry::Decoded(value) => Some(value),
            ListEntry::Malformed(_) => None,
        }
    }
}

impl<T> From<T> for ListEntry<T> {
    fn from(value: T) -> Self {
        ListEntry::Decoded(value)
    }
}

impl<'de, T> Deserialize<'de> for ListEntry<T>
where
    T: DeserializeOwned,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match T::deserialize(value) {
            Ok(decoded) => ListEntry::Decoded(decoded),
            Err(err) => ListEntry::Malformed(err.to_string()),
        })
    }
}
