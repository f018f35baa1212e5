//! # Configuration Module
//!
//! Runtime settings shared by the CLI, the service layer and the MCP server.
//! Values are assembled with a builder so the binary can layer flags and
//! environment variables over the defaults.

use std::path::PathBuf;
use std::time::Duration;

use crate::website::{BULLDOGJOB_URL, DEFAULT_TIMEOUT_SECS};

/// Number of offers returned when a caller does not ask for a specific limit
pub const DEFAULT_LIMIT: usize = 50;

/// Configuration for jobscout
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Path of the libsql database holding saved postings
    pub database_path: String,

    /// Base URL of the bulldogjob board
    pub bulldogjob_url: String,

    /// Maximum number of offers returned by default
    pub default_limit: usize,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Directory receiving the server log file
    pub log_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: "jobscout.db".to_string(),
            bulldogjob_url: BULLDOGJOB_URL.to_string(),
            default_limit: DEFAULT_LIMIT,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_dir: PathBuf::from(".jobscout"),
        }
    }
}

impl Config {
    /// Start building a configuration from the defaults
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Request timeout as a [`Duration`]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Builder for Config
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Set the database path
    pub fn database_path(mut self, path: impl Into<String>) -> Self {
        self.config.database_path = path.into();
        self
    }

    /// Set the bulldogjob base URL
    pub fn bulldogjob_url(mut self, url: impl Into<String>) -> Self {
        self.config.bulldogjob_url = url.into();
        self
    }

    /// Set the default offer limit
    pub fn default_limit(mut self, limit: usize) -> Self {
        self.config.default_limit = limit;
        self
    }

    /// Set the request timeout in seconds
    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = secs;
        self
    }

    /// Set the log directory
    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.log_dir = dir.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> Config {
        self.config
    }
}
