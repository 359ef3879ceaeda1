//! Scripted response sequences.
//!
//! A [`ResponseScript`] is an ordered, stateful sequence of canned responses
//! handed out for successive matching requests. The closing step is sticky by
//! default: once the cursor runs past the scripted prefix, the last step
//! repeats for every further request. This is what turns the ad hoc
//! counter-in-a-closure style of route handler into an inspectable value:
//! "fail four times, then lock" is four `Fulfill(401)` steps and a sticky
//! `Fulfill(423)` tail.

use crate::result::{IngresarError, IngresarResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Reasons for aborting a network request.
///
/// Kept distinct from a `Fulfill` with a 5xx status: real systems distinguish
/// connection failure from server error, and scenarios exercise both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbortReason {
    /// Request failed
    Failed,
    /// Request was aborted
    Aborted,
    /// Request timed out
    TimedOut,
    /// Connection was refused
    ConnectionRefused,
    /// Connection was reset
    ConnectionReset,
    /// Internet is disconnected
    InternetDisconnected,
    /// DNS name could not be resolved
    NameNotResolved,
}

impl AbortReason {
    /// Get the error message for this abort reason
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Failed => "net::ERR_FAILED",
            Self::Aborted => "net::ERR_ABORTED",
            Self::TimedOut => "net::ERR_TIMED_OUT",
            Self::ConnectionRefused => "net::ERR_CONNECTION_REFUSED",
            Self::ConnectionReset => "net::ERR_CONNECTION_RESET",
            Self::InternetDisconnected => "net::ERR_INTERNET_DISCONNECTED",
            Self::NameNotResolved => "net::ERR_NAME_NOT_RESOLVED",
        }
    }
}

/// A canned HTTP response body for a `Fulfill` step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fulfill {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HashMap<String, String>,
    /// Response body
    pub body: Vec<u8>,
    /// Content type
    pub content_type: String,
    /// Artificial delay before the response is delivered, in milliseconds
    pub delay_ms: u64,
}

impl Default for Fulfill {
    fn default() -> Self {
        Self {
            status: 200,
            headers: HashMap::new(),
            body: Vec::new(),
            content_type: "application/json".to_string(),
            delay_ms: 0,
        }
    }
}

impl Fulfill {
    /// Create a new fulfill payload with defaults (200, empty JSON body)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a JSON response
    pub fn json<T: Serialize>(status: u16, data: &T) -> IngresarResult<Self> {
        let body = serde_json::to_vec(data)?;
        Ok(Self {
            status,
            body,
            ..Self::default()
        })
    }

    /// Create an error response with a JSON `{"error": message}` body
    #[must_use]
    pub fn error(status: u16, message: &str) -> Self {
        let body = serde_json::json!({ "error": message }).to_string();
        Self {
            status,
            body: body.into_bytes(),
            ..Self::default()
        }
    }

    /// Set status code
    #[must_use]
    pub const fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Add a header
    #[must_use]
    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    /// Set delay
    #[must_use]
    pub const fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Get body as string
    #[must_use]
    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}

/// One step of a response script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseStep {
    /// Deliver a canned response, optionally after a delay
    Fulfill(Fulfill),
    /// Fail the request at the connection level
    Abort(AbortReason),
    /// Never resolve; the caller's wait bound turns this into a timeout
    Hang,
}

impl ResponseStep {
    /// A 200 response with an empty JSON object body
    #[must_use]
    pub fn ok() -> Self {
        Self::Fulfill(Fulfill::new().with_status(200))
    }

    /// An error response with a JSON error body
    #[must_use]
    pub fn status(status: u16, message: &str) -> Self {
        Self::Fulfill(Fulfill::error(status, message))
    }

    /// Whether this step is a fulfill with the given status
    #[must_use]
    pub fn is_status(&self, status: u16) -> bool {
        matches!(self, Self::Fulfill(f) if f.status == status)
    }
}

/// An ordered, stateful sequence of [`ResponseStep`]s.
///
/// The cursor advances by one on each call to [`next`](Self::next); once past
/// the end the last step repeats (sticky tail) unless the script was marked
/// non-repeating, in which case an exhausted script yields `None` and the
/// request passes through.
///
/// One browser context processes one request at a time per route handler, so
/// sequential calls are the expected use. The implementation does not assume
/// it: a reentrant call is refused with an `InvariantViolation` rather than
/// blocking.
#[derive(Debug)]
pub struct ResponseScript {
    steps: Vec<ResponseStep>,
    cursor: AtomicUsize,
    sticky_tail: bool,
    in_call: AtomicBool,
}

impl Clone for ResponseScript {
    fn clone(&self) -> Self {
        Self {
            steps: self.steps.clone(),
            cursor: AtomicUsize::new(self.cursor.load(Ordering::Acquire)),
            sticky_tail: self.sticky_tail,
            in_call: AtomicBool::new(false),
        }
    }
}

impl Default for ResponseScript {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseScript {
    /// Create an empty script
    #[must_use]
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            cursor: AtomicUsize::new(0),
            sticky_tail: true,
            in_call: AtomicBool::new(false),
        }
    }

    /// Create a script with a single step
    #[must_use]
    pub fn single(step: ResponseStep) -> Self {
        Self::new().then(step)
    }

    /// Append a step
    #[must_use]
    pub fn then(mut self, step: ResponseStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Append `n` copies of a step
    #[must_use]
    pub fn then_times(mut self, step: ResponseStep, n: usize) -> Self {
        for _ in 0..n {
            self.steps.push(step.clone());
        }
        self
    }

    /// Disable the sticky tail; an exhausted script passes requests through
    #[must_use]
    pub const fn non_repeating(mut self) -> Self {
        self.sticky_tail = false;
        self
    }

    /// Number of scripted steps
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the script has no steps
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Current cursor position (for diagnostics)
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor.load(Ordering::Acquire)
    }

    /// Reset the cursor to the start of the script
    pub fn reset(&self) {
        self.cursor.store(0, Ordering::Release);
    }

    /// Hand out the next step for a matching request.
    ///
    /// Returns `Ok(None)` when the script is empty, or exhausted and
    /// non-repeating: the request should pass through untouched.
    ///
    /// # Errors
    ///
    /// `InvariantViolation` if called reentrantly.
    pub fn next(&self) -> IngresarResult<Option<ResponseStep>> {
        if self.in_call.swap(true, Ordering::AcqRel) {
            return Err(IngresarError::invariant(
                "reentrant ResponseScript::next call",
            ));
        }

        let step = self.advance();
        self.in_call.store(false, Ordering::Release);
        Ok(step)
    }

    fn advance(&self) -> Option<ResponseStep> {
        if self.steps.is_empty() {
            return None;
        }

        let pos = self.cursor.load(Ordering::Acquire);
        if pos < self.steps.len() {
            self.cursor.store(pos + 1, Ordering::Release);
            return Some(self.steps[pos].clone());
        }

        if self.sticky_tail {
            // Cursor stays parked past the end; the tail repeats
            return self.steps.last().cloned();
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod fulfill_tests {
        use super::*;

        #[test]
        fn test_default() {
            let f = Fulfill::default();
            assert_eq!(f.status, 200);
            assert_eq!(f.content_type, "application/json");
            assert_eq!(f.delay_ms, 0);
        }

        #[test]
        fn test_error_body() {
            let f = Fulfill::error(401, "invalid credentials");
            assert_eq!(f.status, 401);
            assert!(f.body_string().contains("invalid credentials"));
        }

        #[test]
        fn test_json() {
            let f = Fulfill::json(200, &serde_json::json!({"token": "abc"})).unwrap();
            assert!(f.body_string().contains("token"));
        }

        #[test]
        fn test_builders() {
            let f = Fulfill::new()
                .with_status(423)
                .with_header("Retry-After", "300")
                .with_delay(1000);
            assert_eq!(f.status, 423);
            assert_eq!(f.headers.get("Retry-After"), Some(&"300".to_string()));
            assert_eq!(f.delay_ms, 1000);
        }
    }

    mod response_step_tests {
        use super::*;

        #[test]
        fn test_is_status() {
            assert!(ResponseStep::status(401, "nope").is_status(401));
            assert!(!ResponseStep::status(401, "nope").is_status(423));
            assert!(!ResponseStep::Hang.is_status(200));
            assert!(!ResponseStep::Abort(AbortReason::Failed).is_status(200));
        }

        #[test]
        fn test_abort_reason_messages_nonempty() {
            let reasons = [
                AbortReason::Failed,
                AbortReason::Aborted,
                AbortReason::TimedOut,
                AbortReason::ConnectionRefused,
                AbortReason::ConnectionReset,
                AbortReason::InternetDisconnected,
                AbortReason::NameNotResolved,
            ];
            for reason in reasons {
                assert!(reason.message().starts_with("net::ERR_"));
            }
        }
    }

    mod response_script_tests {
        use super::*;

        #[test]
        fn test_empty_script_passes_through() {
            let script = ResponseScript::new();
            assert_eq!(script.next().unwrap(), None);
            assert_eq!(script.next().unwrap(), None);
        }

        #[test]
        fn test_cursor_advances_in_order() {
            let script = ResponseScript::new()
                .then(ResponseStep::status(401, "a"))
                .then(ResponseStep::status(423, "b"));

            assert!(script.next().unwrap().unwrap().is_status(401));
            assert_eq!(script.cursor(), 1);
            assert!(script.next().unwrap().unwrap().is_status(423));
            assert_eq!(script.cursor(), 2);
        }

        #[test]
        fn test_sticky_tail_repeats_forever() {
            let script = ResponseScript::new()
                .then_times(ResponseStep::status(401, "invalid credentials"), 4)
                .then(ResponseStep::status(423, "account locked"));

            for _ in 0..4 {
                assert!(script.next().unwrap().unwrap().is_status(401));
            }
            // Every call at index >= 4 returns the locking tail
            for _ in 0..10 {
                assert!(script.next().unwrap().unwrap().is_status(423));
            }
        }

        #[test]
        fn test_non_repeating_exhausts_to_pass_through() {
            let script = ResponseScript::single(ResponseStep::status(500, "boom")).non_repeating();
            assert!(script.next().unwrap().unwrap().is_status(500));
            assert_eq!(script.next().unwrap(), None);
            assert_eq!(script.next().unwrap(), None);
        }

        #[test]
        fn test_reset_rewinds_cursor() {
            let script = ResponseScript::new()
                .then(ResponseStep::status(401, "a"))
                .then(ResponseStep::status(423, "b"));
            let _ = script.next().unwrap();
            let _ = script.next().unwrap();
            script.reset();
            assert!(script.next().unwrap().unwrap().is_status(401));
        }

        #[test]
        fn test_reentrant_call_is_invariant_violation() {
            let script = ResponseScript::single(ResponseStep::ok());
            // Simulate reentry by holding the guard manually
            script.in_call.store(true, Ordering::Release);
            let err = script.next().unwrap_err();
            assert!(matches!(
                err,
                IngresarError::InvariantViolation { .. }
            ));
        }

        #[test]
        fn test_clone_resets_guard_but_keeps_cursor() {
            let script = ResponseScript::new()
                .then(ResponseStep::status(401, "a"))
                .then(ResponseStep::ok());
            let _ = script.next().unwrap();

            let copy = script.clone();
            assert_eq!(copy.cursor(), 1);
            assert!(copy.next().unwrap().unwrap().is_status(200));
        }
    }
}
