//! Interception registry: the per-context table of (matcher -> script).
//!
//! Insertion order defines priority; the first matching entry wins. Anything
//! unmatched resolves to `None`, meaning the request passes through
//! untouched, so unrelated traffic is never silently broken. Lifetime is one
//! browser context: each scenario builds a fresh registry and tears it down
//! with the context.

use crate::matcher::{HttpMethod, RequestMatcher, UrlPattern};
use crate::result::{IngresarError, IngresarResult};
use crate::script::{ResponseScript, ResponseStep};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// A request observed by the registry, kept for diagnostics and assertions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservedRequest {
    /// Request URL
    pub url: String,
    /// HTTP method
    pub method: HttpMethod,
    /// Submitted body, if the caller reported one
    pub body: Option<Vec<u8>>,
    /// Whether a script supplied the response (false = passed through)
    pub scripted: bool,
}

impl ObservedRequest {
    /// Get body as string
    #[must_use]
    pub fn body_string(&self) -> Option<String> {
        self.body
            .as_ref()
            .map(|b| String::from_utf8_lossy(b).to_string())
    }
}

struct InterceptionEntry {
    matcher: RequestMatcher,
    script: ResponseScript,
}

/// Process-wide-per-context table of (matcher -> script).
#[derive(Default)]
pub struct InterceptionRegistry {
    entries: Vec<InterceptionEntry>,
    observed: Mutex<Vec<ObservedRequest>>,
}

impl std::fmt::Debug for InterceptionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterceptionRegistry")
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl InterceptionRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a script for requests matching `matcher`.
    ///
    /// Registration order is priority order; the first matching entry wins.
    pub fn register(&mut self, matcher: RequestMatcher, script: ResponseScript) {
        tracing::debug!(matcher = %matcher, steps = script.len(), "registering interception");
        self.entries.push(InterceptionEntry { matcher, script });
    }

    /// Resolve a request against the registered scripts.
    ///
    /// Iterates entries in insertion order and returns the first match's
    /// `next()` step. `None` means no script claimed the request and it
    /// should pass through untouched. A matching script that is exhausted
    /// (non-repeating, past its end) also declines, and later entries get a
    /// chance.
    ///
    /// # Errors
    ///
    /// Propagates `InvariantViolation` from a reentered script.
    pub fn resolve(
        &self,
        url: &str,
        method: &HttpMethod,
        body: Option<Vec<u8>>,
    ) -> IngresarResult<Option<ResponseStep>> {
        for entry in &self.entries {
            if entry.matcher.matches(url, method) {
                if let Some(step) = entry.script.next()? {
                    tracing::debug!(url, method = method.as_str(), matcher = %entry.matcher, "request intercepted");
                    self.record(url, method, body, true);
                    return Ok(Some(step));
                }
            }
        }
        tracing::trace!(url, method = method.as_str(), "request passed through");
        self.record(url, method, body, false);
        Ok(None)
    }

    fn record(&self, url: &str, method: &HttpMethod, body: Option<Vec<u8>>, scripted: bool) {
        if let Ok(mut observed) = self.observed.lock() {
            observed.push(ObservedRequest {
                url: url.to_string(),
                method: *method,
                body,
                scripted,
            });
        }
    }

    /// Number of registered entries
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// All requests observed so far
    #[must_use]
    pub fn observed_requests(&self) -> Vec<ObservedRequest> {
        self.observed.lock().map(|o| o.clone()).unwrap_or_default()
    }

    /// Observed requests whose URL matches a pattern
    #[must_use]
    pub fn requests_matching(&self, pattern: &UrlPattern) -> Vec<ObservedRequest> {
        self.observed_requests()
            .into_iter()
            .filter(|r| pattern.matches(&r.url))
            .collect()
    }

    /// Assert a request matching the pattern was made exactly `times` times
    pub fn assert_requested_times(
        &self,
        pattern: &UrlPattern,
        times: usize,
    ) -> IngresarResult<()> {
        let seen = self.requests_matching(pattern).len();
        if seen != times {
            return Err(IngresarError::assertion(
                format!("requests matching {pattern}"),
                times.to_string(),
                seen.to_string(),
            ));
        }
        Ok(())
    }

    /// Assert no request matching the pattern was made
    pub fn assert_not_requested(&self, pattern: &UrlPattern) -> IngresarResult<()> {
        self.assert_requested_times(pattern, 0)
    }

    /// Remove all entries and observations. Idempotent; called when the
    /// owning browser context closes.
    pub fn teardown(&mut self) {
        self.entries.clear();
        if let Ok(mut observed) = self.observed.lock() {
            observed.clear();
        }
    }
}
