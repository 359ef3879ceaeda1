//! Scenario definitions and suite-level reporting.
//!
//! A [`Scenario`] is a declarative bundle: scripted network responses,
//! the actions to perform, and the checks that must hold afterwards.
//! Scenarios carry no driver state, so the same definition can run any
//! number of times; isolation comes from the runner building a fresh
//! registry and the caller supplying a fresh driver per run.

use crate::config::Viewport;
use crate::driver::Key;
use crate::locator::Locator;
use crate::matcher::RequestMatcher;
use crate::runner::{Action, Check, ScenarioReport};
use crate::script::ResponseScript;

/// One named test scenario
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Display name, used in reports and logs
    pub name: String,
    /// Path navigated to at the start of the run
    pub start_path: String,
    /// Viewport override; the config default applies when unset
    pub viewport: Option<Viewport>,
    /// Scripted responses installed before navigation
    pub scripts: Vec<(RequestMatcher, ResponseScript)>,
    /// Actions performed in order
    pub actions: Vec<Action>,
    /// Checks evaluated in order after the actions
    pub checks: Vec<Check>,
}

impl Scenario {
    /// Create an empty scenario starting at the login page
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start_path: "/login".to_string(),
            viewport: None,
            scripts: Vec::new(),
            actions: Vec::new(),
            checks: Vec::new(),
        }
    }

    /// Override the entry path
    #[must_use]
    pub fn starting_at(mut self, path: impl Into<String>) -> Self {
        self.start_path = path.into();
        self
    }

    /// Run under a specific viewport
    #[must_use]
    pub const fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = Some(viewport);
        self
    }

    /// Script responses for requests the matcher selects.
    ///
    /// Scripts registered earlier win when several match the same request.
    #[must_use]
    pub fn intercept(mut self, matcher: RequestMatcher, script: ResponseScript) -> Self {
        self.scripts.push((matcher, script));
        self
    }

    /// Append a raw action
    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Navigate to a path mid-scenario
    #[must_use]
    pub fn navigate(self, path: impl Into<String>) -> Self {
        self.action(Action::Navigate(path.into()))
    }

    /// Fill a form field
    #[must_use]
    pub fn fill(self, locator: Locator, text: impl Into<String>) -> Self {
        self.action(Action::Fill {
            locator,
            text: text.into(),
        })
    }

    /// Click an element
    #[must_use]
    pub fn click(self, locator: Locator) -> Self {
        self.action(Action::Click(locator))
    }

    /// Set a checkbox state
    #[must_use]
    pub fn set_checked(self, locator: Locator, checked: bool) -> Self {
        self.action(Action::SetChecked { locator, checked })
    }

    /// Inject a keystroke
    #[must_use]
    pub fn press(self, key: Key) -> Self {
        self.action(Action::Press(key))
    }

    /// Append a check
    #[must_use]
    pub fn check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }
}

/// Ordered collection of scenarios
#[derive(Debug, Clone, Default)]
pub struct ScenarioRegistry {
    scenarios: Vec<Scenario>,
}

impl ScenarioRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scenario, keeping registration order
    pub fn add(&mut self, scenario: Scenario) {
        self.scenarios.push(scenario);
    }

    /// All scenarios, in registration order
    #[must_use]
    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// Look a scenario up by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.name == name)
    }

    /// Number of registered scenarios
    #[must_use]
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Whether the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

/// Aggregated outcome of a suite run
#[derive(Debug, Clone, Default)]
pub struct SuiteReport {
    reports: Vec<ScenarioReport>,
}

impl SuiteReport {
    /// Create an empty report
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one scenario's outcome
    pub fn record(&mut self, report: ScenarioReport) {
        self.reports.push(report);
    }

    /// All per-scenario reports, in run order
    #[must_use]
    pub fn reports(&self) -> &[ScenarioReport] {
        &self.reports
    }

    /// Whether every scenario passed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.reports.iter().all(ScenarioReport::passed)
    }

    /// Number of passed scenarios
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.reports.iter().filter(|r| r.passed()).count()
    }

    /// Number of failed scenarios
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.reports.len() - self.passed_count()
    }

    /// Reports for the scenarios that failed
    #[must_use]
    pub fn failures(&self) -> Vec<&ScenarioReport> {
        self.reports.iter().filter(|r| !r.passed()).collect()
    }
}
