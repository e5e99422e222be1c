//! Core `IndexExtractor` structures and configuration methods
//!
//! Contains the builder struct, its state markers, and the setters shared by
//! every state.

use std::fmt;
use std::time::Duration;

use mrf_index_client::config::{BufferConfig, ExtractConfig, HttpConfig, NameMatching};
use mrf_index_client::transport::{CloseHandle, ProgressObserver};

/// State marker indicating no index location has been set
#[derive(Debug, Clone, Copy)]
pub struct LocationNotSet;

/// State marker carrying the index location
#[derive(Debug, Clone)]
pub struct LocationSet {
    /// Local path or HTTP(S) URL of the gzip index file
    pub location: String,
}

/// Fluent builder for runs over a payer index file
///
/// Type parameter `S` tracks whether a location has been chosen:
/// - `LocationNotSet`: configuration only
/// - `LocationSet`: terminal methods available
pub struct IndexExtractor<S = LocationNotSet> {
    pub(crate) config: ExtractConfig,
    pub(crate) observer: Option<Box<dyn ProgressObserver>>,
    pub(crate) close: Option<CloseHandle>,
    /// Type state, stores the location once set
    pub(crate) state: S,
    pub(crate) debug_enabled: bool,
}

impl IndexExtractor<LocationNotSet> {
    /// Start a builder with the default configuration
    ///
    /// Defaults select the New York PPO plans administered by Anthem and read
    /// through a 100 MiB transport buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ExtractConfig::default())
    }

    /// Start a builder from an existing configuration
    #[must_use]
    pub fn with_config(config: ExtractConfig) -> Self {
        Self {
            config,
            observer: None,
            close: None,
            state: LocationNotSet,
            debug_enabled: false,
        }
    }

    /// Shorthand for `IndexExtractor::new().location(location)`
    ///
    /// # Examples
    /// ```no_run
    /// use mrf_index::IndexExtractor;
    ///
    /// let extraction = IndexExtractor::from_location("2024-05-01_anthem_index.json.gz")
    ///     .plan_names(["PPO NY - WONDER - ANTHEM"])
    ///     .in_network_files()?;
    /// # Ok::<(), mrf_index::Error>(())
    /// ```
    #[must_use]
    pub fn from_location(location: impl Into<String>) -> IndexExtractor<LocationSet> {
        Self::new().location(location)
    }

    /// Set the index file to read, a local path or an HTTP(S) URL
    #[must_use]
    pub fn location(self, location: impl Into<String>) -> IndexExtractor<LocationSet> {
        IndexExtractor {
            config: self.config,
            observer: self.observer,
            close: self.close,
            state: LocationSet {
                location: location.into(),
            },
            debug_enabled: self.debug_enabled,
        }
    }
}

impl Default for IndexExtractor<LocationNotSet> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> IndexExtractor<S> {
    /// Log the effective configuration before the run starts
    #[must_use]
    pub fn debug(mut self) -> Self {
        self.debug_enabled = true;
        self
    }

    /// Replace the plan names that select reporting structures
    #[must_use]
    pub fn plan_names<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.config = self.config.with_plan_names(names);
        self
    }

    /// Choose how plan names are compared
    #[must_use]
    pub fn name_matching(mut self, matching: NameMatching) -> Self {
        self.config = self.config.with_name_matching(matching);
        self
    }

    /// Set the transport read buffer size in bytes
    #[must_use]
    pub fn buffer_size(mut self, bytes: usize) -> Self {
        self.config.buffers.transport_buffer_size = bytes;
        self
    }

    /// Set the number of decoded bytes the parser pulls at a time
    #[must_use]
    pub fn parse_chunk_size(mut self, bytes: usize) -> Self {
        self.config.buffers.parse_chunk_size = bytes;
        self
    }

    /// Replace the whole buffer budget
    #[must_use]
    pub fn buffers(mut self, buffers: BufferConfig) -> Self {
        self.config = self.config.with_buffers(buffers);
        self
    }

    /// Replace the HTTP transport settings
    #[must_use]
    pub fn http(mut self, http: HttpConfig) -> Self {
        self.config = self.config.with_http(http);
        self
    }

    /// Limit TCP connect plus TLS handshake time, `None` waits forever
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.http.connect_timeout = timeout;
        self
    }

    #[must_use]
    pub fn max_redirects(mut self, redirects: usize) -> Self {
        self.config.http.max_redirects = redirects;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.http.user_agent = user_agent.into();
        self
    }

    /// Receive `(bytes_read, total)` updates from the transport
    ///
    /// Closures `FnMut(u64, Option<u64>)` implement [`ProgressObserver`].
    #[must_use]
    pub fn observer(mut self, observer: impl ProgressObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Attach a handle that can abort the run from another thread
    #[must_use]
    pub fn close_handle(mut self, close: CloseHandle) -> Self {
        self.close = Some(close);
        self
    }

    /// Effective configuration
    #[must_use]
    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }
}

impl<S: fmt::Debug> fmt::Debug for IndexExtractor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexExtractor")
            .field("state", &self.state)
            .field("plan_names", &self.config.plan_names.len())
            .field("name_matching", &self.config.name_matching)
            .field("buffers", &self.config.buffers)
            .field("http", &self.config.http)
            .field("observer", &self.observer.is_some())
            .field("close", &self.close.is_some())
            .finish()
    }
}
