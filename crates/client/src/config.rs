use std::{env, time::Duration};

use usersync_core::view::{PAGE_SIZE_OPTIONS, DEFAULT_PAGE_SIZE};

/// Base URL used when `USERSYNC_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Remote base URL (default: jsonplaceholder)
    pub base_url: String,
    /// Request timeout in seconds (default: 10)
    pub timeout_secs: u64,
    /// Initial table page size (default: 10)
    pub page_size: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `USERSYNC_URL` - Remote base URL (default: "https://jsonplaceholder.typicode.com")
    /// - `USERSYNC_TIMEOUT_SECS` - Request timeout in seconds (default: 10)
    /// - `USERSYNC_PAGE_SIZE` - Initial page size, one of 10/20/30/40/50 (default: 10)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let page_size = lookup("USERSYNC_PAGE_SIZE")
            .and_then(|v| v.parse().ok())
            .filter(|size| PAGE_SIZE_OPTIONS.contains(size));
        if page_size.is_none() && lookup("USERSYNC_PAGE_SIZE").is_some() {
            tracing::warn!("Ignoring unsupported USERSYNC_PAGE_SIZE");
        }

        Self {
            base_url: lookup("USERSYNC_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout_secs: lookup("USERSYNC_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            page_size: page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }

    /// Get the request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
