//! Suite configuration.
//!
//! Everything two hand-written copies of the same suite tend to disagree on
//! lives here: lockout threshold, expected message patterns, cookie name,
//! credentials, timeouts. The config is passed into the runner and scoped to
//! one suite run; there is no module-level mutable test data.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Viewport dimensions for a scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in CSS pixels
    pub width: u32,
    /// Height in CSS pixels
    pub height: u32,
}

impl Viewport {
    /// Desktop 1080p profile
    pub const DESKTOP: Self = Self {
        width: 1920,
        height: 1080,
    };

    /// Small phone profile
    pub const MOBILE: Self = Self {
        width: 393,
        height: 852,
    };

    /// Create a viewport
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::DESKTOP
    }
}

/// A username/password pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Username or email
    pub username: String,
    /// Password
    pub password: String,
}

impl Credentials {
    /// Create a credential pair
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Configuration for one suite run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Base URL of the application under test
    pub base_url: String,
    /// Credentials the application accepts
    pub valid_credentials: Credentials,
    /// Consecutive failures before the account locks
    pub lockout_threshold: usize,
    /// Name of the session-establishing cookie
    pub session_cookie_name: String,
    /// Pattern the generic bad-credentials banner must match
    pub invalid_credentials_pattern: String,
    /// Pattern the lockout banner must match
    pub lockout_pattern: String,
    /// Pattern the network-failure banner must match
    pub network_error_pattern: String,
    /// Bound for a single action, in milliseconds
    pub action_timeout_ms: u64,
    /// Bound for an eventually-style check, in milliseconds
    pub check_timeout_ms: u64,
    /// Polling interval for eventually-style checks, in milliseconds
    pub poll_interval_ms: u64,
    /// Default viewport for scenarios that do not override it
    pub viewport: Viewport,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://app.test".to_string(),
            valid_credentials: Credentials::new("user@example.com", "correct horse battery"),
            lockout_threshold: 5,
            session_cookie_name: "session".to_string(),
            invalid_credentials_pattern: r"(?i)invalid (username|email) or password".to_string(),
            lockout_pattern: r"(?i)account locked".to_string(),
            network_error_pattern: r"(?i)unable to login|network".to_string(),
            action_timeout_ms: 10_000,
            check_timeout_ms: 5_000,
            poll_interval_ms: 25,
            viewport: Viewport::DESKTOP,
        }
    }
}

impl SuiteConfig {
    /// Create a config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the accepted credentials
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.valid_credentials = credentials;
        self
    }

    /// Set the lockout threshold
    #[must_use]
    pub const fn with_lockout_threshold(mut self, threshold: usize) -> Self {
        self.lockout_threshold = threshold;
        self
    }

    /// Set the check timeout
    #[must_use]
    pub const fn with_check_timeout(mut self, timeout: Duration) -> Self {
        self.check_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Set the default viewport
    #[must_use]
    pub const fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Full URL for a path on the application under test
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    /// Action timeout as a `Duration`
    #[must_use]
    pub const fn action_timeout(&self) -> Duration {
        Duration::from_millis(self.action_timeout_ms)
    }

    /// Check timeout as a `Duration`
    #[must_use]
    pub const fn check_timeout(&self) -> Duration {
        Duration::from_millis(self.check_timeout_ms)
    }

    /// Poll interval as a `Duration`
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SuiteConfig::default();
        assert_eq!(config.lockout_threshold, 5);
        assert_eq!(config.session_cookie_name, "session");
        assert_eq!(config.viewport, Viewport::DESKTOP);
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let config = SuiteConfig::new().with_base_url("http://app.test/");
        assert_eq!(config.url("/api/login"), "http://app.test/api/login");
    }

    #[test]
    fn test_builder() {
        let config = SuiteConfig::new()
            .with_lockout_threshold(3)
            .with_check_timeout(Duration::from_secs(2))
            .with_viewport(Viewport::MOBILE);
        assert_eq!(config.lockout_threshold, 3);
        assert_eq!(config.check_timeout(), Duration::from_secs(2));
        assert_eq!(config.viewport, Viewport::MOBILE);
    }

    #[test]
    fn test_default_patterns_compile_and_match() {
        let config = SuiteConfig::default();
        let banner = regex::Regex::new(&config.invalid_credentials_pattern).unwrap();
        assert!(banner.is_match("Invalid username or password"));
        let network = regex::Regex::new(&config.network_error_pattern).unwrap();
        assert!(network.is_match("Unable to login: network error"));
        let lockout = regex::Regex::new(&config.lockout_pattern).unwrap();
        assert!(lockout.is_match("Account locked. Try again later."));
    }
}
