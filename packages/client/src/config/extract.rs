//! Extraction run configuration

use super::buffers::BufferConfig;
use super::network::HttpConfig;
use super::plans::NY_PPO_PLAN_NAMES;
use super::validation::{ConfigResult, ConfigurationError, Validator};

/// How plan names are compared against the filter set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameMatching {
    /// Byte-for-byte equality
    #[default]
    Exact,
    /// Trim, collapse inner whitespace runs to one space, and uppercase
    Normalized,
}

impl NameMatching {
    /// Normalize a plan name according to this rule
    #[must_use]
    pub fn normalize(self, name: &str) -> String {
        match self {
            NameMatching::Exact => name.to_string(),
            NameMatching::Normalized => name
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_uppercase(),
        }
    }
}

/// Configuration for a single extraction run
///
/// Every knob the pipeline reads is carried here and passed explicitly to the
/// entry points; there is no global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    pub buffers: BufferConfig,
    pub http: HttpConfig,
    /// Plan names selecting which reporting structures contribute files
    pub plan_names: Vec<String>,
    pub name_matching: NameMatching,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            buffers: BufferConfig::default(),
            http: HttpConfig::default(),
            plan_names: NY_PPO_PLAN_NAMES.iter().map(|name| (*name).to_string()).collect(),
            name_matching: NameMatching::Exact,
        }
    }
}

impl ExtractConfig {
    /// Replace the plan-name filter
    #[must_use]
    pub fn with_plan_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.plan_names = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_buffers(mut self, buffers: BufferConfig) -> Self {
        self.buffers = buffers;
        self
    }

    #[must_use]
    pub fn with_http(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    #[must_use]
    pub fn with_name_matching(mut self, matching: NameMatching) -> Self {
        self.name_matching = matching;
        self
    }
}

impl Validator for ExtractConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.buffers.validate()?;
        self.http.validate()?;

        if self.plan_names.is_empty() {
            return Err(ConfigurationError::InvalidParameter(
                "plan_names cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_ny_ppo_filter_and_100mb_buffer() {
        let config = ExtractConfig::default();
        assert_eq!(config.plan_names.len(), 43);
        assert_eq!(config.buffers.transport_buffer_size, 100 * 1024 * 1024);
        assert_eq!(config.name_matching, NameMatching::Exact);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_filter_is_rejected() {
        let config = ExtractConfig::default().with_plan_names(Vec::<String>::new());
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidParameter(_))
        ));
    }

    #[test]
    fn zero_chunk_size_is_rejected() {
        let config = ExtractConfig::default()
            .with_buffers(BufferConfig::default().with_parse_chunk_size(0));
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidBufferSize(_))
        ));
    }

    #[test]
    fn normalized_matching_folds_case_and_whitespace() {
        assert_eq!(
            NameMatching::Normalized.normalize("  ppo ny -  wonder - anthem "),
            "PPO NY - WONDER - ANTHEM"
        );
        assert_eq!(NameMatching::Exact.normalize(" a "), " a ");
    }
}
