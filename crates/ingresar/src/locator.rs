//! Locator abstraction for element selection.
//!
//! A [`Locator`] carries an ordered chain of candidate selectors instead of a
//! single `||`-joined CSS string: resolution tries candidates in declared
//! priority order and takes the first one the driver can find. The priority
//! order is the declaration order, highest first.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default timeout for element waits (5 seconds)
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Default polling interval for element waits (25ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 25;

/// Selector strategies for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selector {
    /// CSS selector (e.g., `input[name='username']`)
    Css(String),
    /// Test ID selector (`data-testid` attribute)
    TestId(String),
    /// Accessible label text
    Label(String),
    /// ARIA role, optionally narrowed by accessible name
    Role {
        /// ARIA role (e.g., "alert", "button")
        role: String,
        /// Accessible name filter
        name: Option<String>,
    },
    /// Visible text content
    Text(String),
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create a test ID selector
    #[must_use]
    pub fn test_id(id: impl Into<String>) -> Self {
        Self::TestId(id.into())
    }

    /// Create a label selector
    #[must_use]
    pub fn label(text: impl Into<String>) -> Self {
        Self::Label(text.into())
    }

    /// Create a role selector
    #[must_use]
    pub fn role(role: impl Into<String>) -> Self {
        Self::Role {
            role: role.into(),
            name: None,
        }
    }

    /// Create a text selector
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

impl std::fmt::Display for Selector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Css(s) => write!(f, "css={s}"),
            Self::TestId(s) => write!(f, "testid={s}"),
            Self::Label(s) => write!(f, "label={s}"),
            Self::Role { role, name: None } => write!(f, "role={role}"),
            Self::Role {
                role,
                name: Some(n),
            } => write!(f, "role={role}[name={n}]"),
            Self::Text(s) => write!(f, "text={s}"),
        }
    }
}

/// An element locator with an ordered candidate chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locator {
    candidates: Vec<Selector>,
    timeout_ms: u64,
}

impl Locator {
    /// Create a locator with a single primary selector
    #[must_use]
    pub fn new(primary: Selector) -> Self {
        Self {
            candidates: vec![primary],
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Append a fallback candidate, tried only when earlier candidates
    /// resolve to nothing
    #[must_use]
    pub fn or(mut self, fallback: Selector) -> Self {
        self.candidates.push(fallback);
        self
    }

    /// Set a custom timeout for waits on this locator
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Candidates in priority order
    #[must_use]
    pub fn candidates(&self) -> &[Selector] {
        &self.candidates
    }

    /// Timeout for waits on this locator
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined: Vec<String> = self.candidates.iter().map(ToString::to_string).collect();
        write!(f, "{}", joined.join(" | "))
    }
}

impl From<Selector> for Locator {
    fn from(selector: Selector) -> Self {
        Self::new(selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_chain_preserves_declaration_order() {
        let locator = Locator::new(Selector::test_id("username-input"))
            .or(Selector::css("input[name='username']"))
            .or(Selector::label("Username or email"));

        let candidates = locator.candidates();
        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0], Selector::test_id("username-input"));
        assert_eq!(candidates[2], Selector::label("Username or email"));
    }

    #[test]
    fn test_display_joins_candidates() {
        let locator =
            Locator::new(Selector::test_id("error-banner")).or(Selector::css(".error-banner"));
        assert_eq!(locator.to_string(), "testid=error-banner | css=.error-banner");
    }

    #[test]
    fn test_custom_timeout() {
        let locator =
            Locator::new(Selector::role("alert")).with_timeout(Duration::from_millis(250));
        assert_eq!(locator.timeout(), Duration::from_millis(250));
    }
}
