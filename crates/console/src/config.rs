//! Console configuration loaded from environment variables.

use std::time::Duration;

use gateway::HttpGateway;

use crate::error::{ConsoleError, Result};

const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Console settings with sensible defaults.
///
/// Reads from environment variables:
/// - `CONSOLE_API_URL`: backend base URL (default: `"http://localhost:3000"`)
/// - `CONSOLE_REFETCH_AFTER_COMMIT`: reload everything after each committed
///   mutation (default: `true`)
/// - `CONSOLE_REQUEST_TIMEOUT_SECS`: per-request timeout (default: none)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub api_url: String,
    pub refetch_after_commit: bool,
    pub request_timeout: Option<Duration>,
}

impl ConsoleConfig {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            api_url: lookup("CONSOLE_API_URL").unwrap_or(defaults.api_url),
            refetch_after_commit: lookup("CONSOLE_REFETCH_AFTER_COMMIT")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.refetch_after_commit),
            request_timeout: lookup("CONSOLE_REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }
    }

    /// Builds the HTTP gateway these settings describe.
    pub fn http_gateway(&self) -> Result<HttpGateway> {
        if self.api_url.trim().is_empty() {
            return Err(ConsoleError::Config("api_url is empty".to_string()));
        }
        Ok(HttpGateway::new(self.api_url.clone(), self.request_timeout)?)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            refetch_after_commit: true,
            request_timeout: None,
        }
    }
}
