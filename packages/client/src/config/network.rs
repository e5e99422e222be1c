//! Network Configuration Module
//!
//! Settings for the HTTP(S) transport source.

use std::time::Duration;

use super::validation::{ConfigDefaults, ConfigResult, ConfigValidator, Validator};

/// HTTP transport configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// Time allowed for TCP connect and TLS handshake, `None` for no limit
    pub connect_timeout: Option<Duration>,
    /// Redirect responses followed before giving up
    pub max_redirects: usize,
    /// Value of the `User-Agent` request header
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Some(ConfigDefaults::DEFAULT_CONNECT_TIMEOUT),
            max_redirects: ConfigDefaults::DEFAULT_MAX_REDIRECTS,
            user_agent: ConfigDefaults::DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Validator for HttpConfig {
    fn validate(&self) -> ConfigResult<()> {
        if let Some(timeout) = self.connect_timeout {
            ConfigValidator::validate_timeout(timeout, "connect_timeout")?;
        }
        ConfigValidator::validate_range(self.max_redirects, 0, 32, "max_redirects")?;
        Ok(())
    }
}
