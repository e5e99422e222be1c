use hashbrown::HashSet;

use crate::config::{ExtractConfig, NameMatching};
use crate::model::ReportingStructure;

/// Set of plan names that select reporting structures
///
/// Names are normalized once on construction with the configured
/// [`NameMatching`] rule and candidates are normalized the same way on lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanNameFilter {
    names: HashSet<String>,
    matching: NameMatching,
}

impl PlanNameFilter {
    pub fn new<I, S>(names: I, matching: NameMatching) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|name| matching.normalize(name.as_ref()))
                .collect(),
            matching,
        }
    }

    #[must_use]
    pub fn from_config(config: &ExtractConfig) -> Self {
        Self::new(&config.plan_names, config.name_matching)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        match self.matching {
            NameMatching::Exact => self.names.contains(name),
            NameMatching::Normalized => self.names.contains(&self.matching.normalize(name)),
        }
    }

    /// Whether any named plan of `structure` is in the filter
    #[must_use]
    pub fn matches(&self, structure: &ReportingStructure) -> bool {
        structure.plan_names().any(|name| self.contains(name))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[must_use]
    pub fn matching(&self) -> NameMatching {
        self.matching
    }
}
