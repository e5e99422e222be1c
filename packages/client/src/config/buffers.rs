//! Buffer Configuration Module
//!
//! Memory budget for the streaming pipeline: the transport read buffer, the
//! chunk size the parser pulls, and the capture buffer holding one match.

use super::validation::{ConfigDefaults, ConfigResult, ConfigValidator, ConfigurationError, Validator};

/// Runtime buffer configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferConfig {
    /// Capacity of the buffered reader sitting directly on the transport
    pub transport_buffer_size: usize,
    /// Bytes the parser requests from the decoded stream per pull
    pub parse_chunk_size: usize,
    /// Initial capacity of the buffer holding the value being matched
    pub capture_capacity: usize,
    /// Capture capacity kept between matches; larger buffers are released
    pub capture_retain_limit: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            transport_buffer_size: ConfigDefaults::DEFAULT_TRANSPORT_BUFFER_SIZE,
            parse_chunk_size: ConfigDefaults::DEFAULT_PARSE_CHUNK_SIZE,
            capture_capacity: ConfigDefaults::DEFAULT_CAPTURE_CAPACITY,
            capture_retain_limit: ConfigDefaults::DEFAULT_CAPTURE_RETAIN_LIMIT,
        }
    }
}

impl BufferConfig {
    /// Create memory-constrained buffer configuration
    #[must_use]
    pub fn low_memory() -> Self {
        Self {
            transport_buffer_size: 1024 * 1024,  // 1MB
            parse_chunk_size: 16_384,             // 16KB
            capture_capacity: 4096,               // 4KB
            capture_retain_limit: 262_144,        // 256KB
        }
    }

    /// Set the transport read buffer size in bytes
    #[must_use]
    pub fn with_transport_buffer_size(mut self, size: usize) -> Self {
        self.transport_buffer_size = size;
        self
    }

    /// Set the parser chunk size in bytes
    #[must_use]
    pub fn with_parse_chunk_size(mut self, size: usize) -> Self {
        self.parse_chunk_size = size;
        self
    }
}

impl Validator for BufferConfig {
    fn validate(&self) -> ConfigResult<()> {
        ConfigValidator::validate_buffer_size(self.transport_buffer_size, "transport_buffer_size")?;
        ConfigValidator::validate_buffer_size(self.parse_chunk_size, "parse_chunk_size")?;
        ConfigValidator::validate_buffer_size(self.capture_capacity, "capture_capacity")?;

        if self.capture_retain_limit < self.capture_capacity {
            return Err(ConfigurationError::Conflict(
                "capture_retain_limit must be >= capture_capacity".to_string(),
            ));
        }

        Ok(())
    }
}
