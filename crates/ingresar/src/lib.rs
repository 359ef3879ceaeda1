//! Ingresar: Deterministic E2E Harness for Login Flows
//!
//! Ingresar (Spanish: "to sign in") turns a flaky browser login suite into
//! a deterministic one by scripting every network response the flow can
//! see. Scenarios declare what the backend will say; the runner drives the
//! page and checks what the user would observe.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                   INGRESAR Architecture                      │
//! ├──────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌──────────────┐    ┌────────────┐       │
//! │   │ Scenario   │    │ Scenario     │    │ PageDriver │       │
//! │   │ (scripts + │───►│ Runner       │───►│ (page +    │       │
//! │   │  checks)   │    │ (lifecycle)  │    │  network)  │       │
//! │   └────────────┘    └──────┬───────┘    └─────┬──────┘       │
//! │                            │                  │              │
//! │                     ┌──────▼──────────────────▼──────┐       │
//! │                     │     InterceptionRegistry       │       │
//! │                     │  (matchers → response scripts) │       │
//! │                     └────────────────────────────────┘       │
//! └──────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]
#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

mod config;
mod driver;
mod locator;
mod matcher;
mod page_object;
mod registry;
mod result;
mod runner;
mod scenario;
mod script;

/// Deterministic in-process model of the login application
#[allow(clippy::missing_errors_doc, clippy::must_use_candidate)]
mod simulated;

/// The twenty-scenario login catalogue
#[allow(clippy::missing_errors_doc, clippy::must_use_candidate)]
pub mod suite;

/// Log initialization for suite runs
pub mod tracing_support;

pub use config::{Credentials, SuiteConfig, Viewport};
pub use driver::{
    resolve_locator, wait_for_element, Cookie, ElementHandle, Key, PageDriver,
};
pub use locator::{Locator, Selector, DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_MS};
pub use matcher::{HttpMethod, RequestMatcher, UrlPattern};
pub use page_object::{DashboardPage, LoginPage, PageObject};
pub use registry::{InterceptionRegistry, ObservedRequest};
pub use result::{IngresarError, IngresarResult};
pub use runner::{
    Action, AssertionRecord, Check, CheckMode, Condition, FailureDetail, FailureKind,
    RunState, ScenarioReport, ScenarioRunner,
};
pub use scenario::{Scenario, ScenarioRegistry, SuiteReport};
pub use script::{AbortReason, Fulfill, ResponseScript, ResponseStep};
pub use simulated::SimulatedDriver;
pub use suite::{default_suite, run_suite};
