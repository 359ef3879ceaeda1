//! Request matching for network interception.
//!
//! A [`RequestMatcher`] pairs a URL pattern with an HTTP method and is
//! immutable once registered. Matching is pure and total: no request shape
//! can make it panic, and an invalid regex pattern simply never matches.

use serde::{Deserialize, Serialize};

/// HTTP methods for request matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    /// GET request
    Get,
    /// POST request
    Post,
    /// PUT request
    Put,
    /// DELETE request
    Delete,
    /// PATCH request
    Patch,
    /// HEAD request
    Head,
    /// OPTIONS request
    Options,
    /// Any method
    Any,
}

impl HttpMethod {
    /// Parse from string, case-insensitive
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "GET" => Self::Get,
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "DELETE" => Self::Delete,
            "PATCH" => Self::Patch,
            "HEAD" => Self::Head,
            "OPTIONS" => Self::Options,
            _ => Self::Any,
        }
    }

    /// Convert to string
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Any => "*",
        }
    }

    /// Check if this method matches another; `Any` matches everything
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        *self == Self::Any || *other == Self::Any || *self == *other
    }
}

/// Pattern for matching request URLs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UrlPattern {
    /// Exact URL match
    Exact(String),
    /// Prefix match
    Prefix(String),
    /// Contains substring
    Contains(String),
    /// Regex match
    Regex(String),
    /// Glob pattern (e.g., `**/api/login`)
    Glob(String),
    /// Match any URL
    Any,
}

impl UrlPattern {
    /// Check if a URL matches this pattern
    #[must_use]
    pub fn matches(&self, url: &str) -> bool {
        match self {
            Self::Exact(pattern) => url == pattern,
            Self::Prefix(pattern) => url.starts_with(pattern),
            Self::Contains(pattern) => url.contains(pattern),
            Self::Regex(pattern) => regex::Regex::new(pattern)
                .map(|re| re.is_match(url))
                .unwrap_or(false),
            Self::Glob(pattern) => Self::glob_matches(pattern, url),
            Self::Any => true,
        }
    }

    /// Simple glob matching for URLs
    fn glob_matches(pattern: &str, url: &str) -> bool {
        let parts: Vec<&str> = pattern.split('*').collect();
        if parts.is_empty() {
            return url.is_empty();
        }

        let mut pos = 0;
        for (i, part) in parts.iter().enumerate() {
            if part.is_empty() {
                continue;
            }
            if let Some(found) = url[pos..].find(part) {
                if i == 0 && found != 0 {
                    return false;
                }
                pos += found + part.len();
            } else {
                return false;
            }
        }

        // Trailing * consumes the rest; otherwise the URL must be fully matched
        pattern.ends_with('*') || pos == url.len()
    }
}

impl std::fmt::Display for UrlPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact(s)
            | Self::Prefix(s)
            | Self::Contains(s)
            | Self::Regex(s)
            | Self::Glob(s) => write!(f, "{s}"),
            Self::Any => write!(f, "*"),
        }
    }
}

/// Matches an outgoing request by URL pattern and method.
///
/// Immutable once registered: there are constructors and accessors but no
/// mutators, so a registry entry cannot change under a running scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestMatcher {
    pattern: UrlPattern,
    method: HttpMethod,
}

impl RequestMatcher {
    /// Create a matcher from a pattern and method
    #[must_use]
    pub const fn new(pattern: UrlPattern, method: HttpMethod) -> Self {
        Self { pattern, method }
    }

    /// Match POST requests whose URL satisfies a glob pattern
    #[must_use]
    pub fn post(glob: impl Into<String>) -> Self {
        Self::new(UrlPattern::Glob(glob.into()), HttpMethod::Post)
    }

    /// Match GET requests whose URL satisfies a glob pattern
    #[must_use]
    pub fn get(glob: impl Into<String>) -> Self {
        Self::new(UrlPattern::Glob(glob.into()), HttpMethod::Get)
    }

    /// Match any request whose URL contains the given substring
    #[must_use]
    pub fn containing(substring: impl Into<String>) -> Self {
        Self::new(UrlPattern::Contains(substring.into()), HttpMethod::Any)
    }

    /// Check if this matcher matches a request
    #[must_use]
    pub fn matches(&self, url: &str, method: &HttpMethod) -> bool {
        self.pattern.matches(url) && self.method.matches(method)
    }

    /// The URL pattern
    #[must_use]
    pub const fn pattern(&self) -> &UrlPattern {
        &self.pattern
    }

    /// The method constraint
    #[must_use]
    pub const fn method(&self) -> &HttpMethod {
        &self.method
    }
}

impl std::fmt::Display for RequestMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method.as_str(), self.pattern)
    }
}
