//! Scenario execution engine.
//!
//! [`ScenarioRunner`] drives one [`Scenario`](crate::scenario::Scenario)
//! through its lifecycle: Idle, Navigating, Acting, Asserting, then Passed
//! or Failed. Every run gets a fresh [`InterceptionRegistry`] so scripted
//! responses never leak between scenarios, every action is bounded by the
//! configured action timeout, and the first fatal failure stops the run.
//! Checks marked optional are recorded but never fail a scenario.

use crate::config::{SuiteConfig, Viewport};
use crate::driver::{resolve_locator, wait_for_element, Key, PageDriver};
use crate::locator::Locator;
use crate::matcher::UrlPattern;
use crate::registry::InterceptionRegistry;
use crate::result::{IngresarError, IngresarResult};
use crate::scenario::Scenario;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// A single step a scenario performs against the page
#[derive(Debug, Clone)]
pub enum Action {
    /// Navigate to a path under the configured base URL
    Navigate(String),
    /// Fill a form field with text
    Fill {
        /// Field to fill
        locator: Locator,
        /// Text to type
        text: String,
    },
    /// Click an element
    Click(Locator),
    /// Set a checkbox to a definite state
    SetChecked {
        /// Checkbox to set
        locator: Locator,
        /// Desired checked state
        checked: bool,
    },
    /// Inject a keystroke; Tab presses extend the recorded focus trail
    Press(Key),
    /// Resize the viewport mid-scenario
    SetViewport(Viewport),
    /// Let scripted delays elapse
    WaitMs(u64),
}

/// A predicate over the page, the cookie jar, or the request log
#[derive(Debug, Clone)]
pub enum Condition {
    /// Current URL equals base URL joined with this path
    UrlIs(String),
    /// Locator resolves to a visible element
    Visible(Locator),
    /// Locator resolves to nothing, or to a hidden element
    NotVisible(Locator),
    /// Element text matches a regex
    TextMatches {
        /// Element whose text is inspected
        locator: Locator,
        /// Regex the text must match
        pattern: String,
    },
    /// Form field holds exactly this value
    ValueIs {
        /// Field whose value is inspected
        locator: Locator,
        /// Expected value
        value: String,
    },
    /// Element enabled state equals the flag
    Enabled {
        /// Element whose state is inspected
        locator: Locator,
        /// Expected enabled state
        enabled: bool,
    },
    /// Input `type` attribute equals this value
    InputTypeIs {
        /// Input whose type attribute is inspected
        locator: Locator,
        /// Expected `type` attribute
        input_type: String,
    },
    /// A cookie with this name exists; when `persistent` is set, its
    /// persistence must match too
    CookiePresent {
        /// Cookie name
        name: String,
        /// Required persistence, if any
        persistent: Option<bool>,
    },
    /// No cookie with this name exists
    CookieAbsent(String),
    /// Exactly this many observed requests match the pattern
    RequestCount {
        /// Pattern selecting requests from the run's log
        pattern: UrlPattern,
        /// Expected number of matches
        expected: usize,
    },
    /// The focus trail recorded from Tab presses equals this sequence
    FocusTrail(Vec<String>),
}

/// How a check is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckMode {
    /// Poll until the condition holds or the check timeout elapses
    Eventually,
    /// Evaluate once, immediately
    Now,
}

/// A named assertion within a scenario
#[derive(Debug, Clone)]
pub struct Check {
    /// Human-readable description, used in reports
    pub description: String,
    /// The predicate to evaluate
    pub condition: Condition,
    /// Polling behavior
    pub mode: CheckMode,
    /// Optional checks are recorded but never fail the scenario
    pub optional: bool,
}

impl Check {
    /// An eventually-style check (the default for UI conditions)
    #[must_use]
    pub fn eventually(description: impl Into<String>, condition: Condition) -> Self {
        Self {
            description: description.into(),
            condition,
            mode: CheckMode::Eventually,
            optional: false,
        }
    }

    /// An immediate check, evaluated exactly once
    #[must_use]
    pub fn now(description: impl Into<String>, condition: Condition) -> Self {
        Self {
            description: description.into(),
            condition,
            mode: CheckMode::Now,
            optional: false,
        }
    }

    /// Mark the check as optional
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// Lifecycle states of a scenario run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// Not yet started
    Idle,
    /// Loading the entry page
    Navigating,
    /// Performing actions
    Acting,
    /// Evaluating checks
    Asserting,
    /// All fatal checks held
    Passed,
    /// A fatal failure occurred
    Failed,
}

/// Classification of a scenario failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// An immediate check did not hold
    Assertion,
    /// An action or eventually-check exceeded its bound
    Timeout,
    /// A harness invariant was violated
    Invariant,
    /// The driver failed; infrastructure, not product behavior
    Driver,
}

impl FailureKind {
    fn of(error: &IngresarError) -> Self {
        match error {
            IngresarError::AssertionFailure { .. } => Self::Assertion,
            IngresarError::TimeoutExceeded { .. } => Self::Timeout,
            IngresarError::InvariantViolation { .. } => Self::Invariant,
            IngresarError::DriverError { .. } | IngresarError::Json(_) => Self::Driver,
        }
    }
}

/// What went wrong, when a run failed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureDetail {
    /// Failure classification
    pub kind: FailureKind,
    /// Full failure message
    pub message: String,
}

/// Outcome of one evaluated check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssertionRecord {
    /// The check's description
    pub description: String,
    /// Whether the condition held
    pub passed: bool,
    /// Whether the check was optional
    pub optional: bool,
    /// Failure detail, when the condition did not hold
    pub detail: Option<String>,
}

/// Report for one scenario run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// Unique id for this run
    pub run_id: Uuid,
    /// Scenario name
    pub name: String,
    /// Terminal state, Passed or Failed
    pub state: RunState,
    /// Present iff the run failed
    pub failure: Option<FailureDetail>,
    /// Every check that was evaluated, in order
    pub assertions: Vec<AssertionRecord>,
    /// Wall-clock duration of the run
    pub duration_ms: u64,
}

impl ScenarioReport {
    /// Whether the scenario passed
    #[must_use]
    pub fn passed(&self) -> bool {
        self.state == RunState::Passed
    }
}

/// Result of evaluating a condition once
enum Eval {
    Holds,
    Mismatch { expected: String, actual: String },
}

/// Executes scenarios against a driver
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    config: SuiteConfig,
}

impl ScenarioRunner {
    /// Create a runner over the given configuration
    #[must_use]
    pub fn new(config: SuiteConfig) -> Self {
        Self { config }
    }

    /// The runner's configuration
    #[must_use]
    pub const fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Run one scenario to completion.
    ///
    /// The driver is closed before this returns, pass or fail. A fresh
    /// registry is built from the scenario's scripts, so nothing carries
    /// over from earlier runs.
    pub async fn run(
        &self,
        scenario: &Scenario,
        driver: &mut dyn PageDriver,
    ) -> ScenarioReport {
        let run_id = Uuid::new_v4();
        let started = std::time::Instant::now();
        tracing::info!(%run_id, scenario = %scenario.name, "scenario started");

        let mut registry = InterceptionRegistry::new();
        for (matcher, script) in &scenario.scripts {
            registry.register(matcher.clone(), script.clone());
        }
        let registry = Arc::new(registry);

        let mut state = RunState::Idle;
        let mut assertions = Vec::new();
        let failure = self
            .drive(scenario, driver, &registry, &mut state, &mut assertions)
            .await
            .err();

        if driver.close().await.is_err() {
            tracing::warn!(%run_id, "driver close failed during teardown");
        }

        let state = if failure.is_some() {
            RunState::Failed
        } else {
            debug_assert_eq!(state, RunState::Asserting);
            RunState::Passed
        };
        let failure = failure.map(|error| FailureDetail {
            kind: FailureKind::of(&error),
            message: error.to_string(),
        });

        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        tracing::info!(%run_id, scenario = %scenario.name, ?state, duration_ms, "scenario finished");
        ScenarioReport {
            run_id,
            name: scenario.name.clone(),
            state,
            failure,
            assertions,
            duration_ms,
        }
    }

    async fn drive(
        &self,
        scenario: &Scenario,
        driver: &mut dyn PageDriver,
        registry: &Arc<InterceptionRegistry>,
        state: &mut RunState,
        assertions: &mut Vec<AssertionRecord>,
    ) -> IngresarResult<()> {
        driver.install_interceptions(Arc::clone(registry)).await?;
        if let Some(viewport) = scenario.viewport {
            driver.set_viewport(viewport).await?;
        }

        *state = RunState::Navigating;
        let entry = self.config.url(&scenario.start_path);
        self.bounded("navigate", driver.navigate(&entry)).await?;

        *state = RunState::Acting;
        let mut focus_trail = Vec::new();
        for action in &scenario.actions {
            self.perform(action, driver, &mut focus_trail).await?;
        }

        *state = RunState::Asserting;
        for check in &scenario.checks {
            let outcome = self.evaluate(check, driver, registry, &focus_trail).await;
            match outcome {
                Ok(()) => assertions.push(AssertionRecord {
                    description: check.description.clone(),
                    passed: true,
                    optional: check.optional,
                    detail: None,
                }),
                Err(error) => {
                    assertions.push(AssertionRecord {
                        description: check.description.clone(),
                        passed: false,
                        optional: check.optional,
                        detail: Some(error.to_string()),
                    });
                    if check.optional {
                        tracing::warn!(check = %check.description, %error, "optional check failed");
                    } else {
                        return Err(error);
                    }
                }
            }
        }
        Ok(())
    }

    async fn perform(
        &self,
        action: &Action,
        driver: &mut dyn PageDriver,
        focus_trail: &mut Vec<String>,
    ) -> IngresarResult<()> {
        match action {
            Action::Navigate(path) => {
                let url = self.config.url(path);
                self.bounded("navigate", driver.navigate(&url)).await
            }
            Action::Fill { locator, text } => {
                let selector = self.settle(driver, locator).await?;
                self.bounded("fill", driver.fill(&selector, text)).await
            }
            Action::Click(locator) => {
                let selector = self.settle(driver, locator).await?;
                self.bounded("click", driver.click(&selector)).await
            }
            Action::SetChecked { locator, checked } => {
                let selector = self.settle(driver, locator).await?;
                self.bounded("set_checked", driver.set_checked(&selector, *checked))
                    .await
            }
            Action::Press(key) => {
                self.bounded("press", driver.press(*key)).await?;
                if *key == Key::Tab {
                    if let Some(id) = driver.active_element().await? {
                        focus_trail.push(id);
                    }
                }
                Ok(())
            }
            Action::SetViewport(viewport) => {
                self.bounded("set_viewport", driver.set_viewport(*viewport))
                    .await
            }
            Action::WaitMs(ms) => {
                tokio::time::sleep(Duration::from_millis(*ms)).await;
                Ok(())
            }
        }
    }

    /// Wait for a locator to resolve, then address the element by its
    /// stable id. The wait honors the locator's own timeout, capped by the
    /// config-wide action bound.
    async fn settle(
        &self,
        driver: &dyn PageDriver,
        locator: &Locator,
    ) -> IngresarResult<crate::locator::Selector> {
        let bound = locator.timeout().min(self.config.action_timeout());
        let handle =
            wait_for_element(driver, locator, bound, self.config.poll_interval()).await?;
        Ok(crate::locator::Selector::test_id(handle.id))
    }

    async fn bounded<F>(&self, operation: &str, fut: F) -> IngresarResult<()>
    where
        F: std::future::Future<Output = IngresarResult<()>>,
    {
        match tokio::time::timeout(self.config.action_timeout(), fut).await {
            Ok(result) => result,
            Err(_) => Err(IngresarError::timeout(
                operation,
                self.config.action_timeout_ms,
            )),
        }
    }

    async fn evaluate(
        &self,
        check: &Check,
        driver: &dyn PageDriver,
        registry: &Arc<InterceptionRegistry>,
        focus_trail: &[String],
    ) -> IngresarResult<()> {
        match check.mode {
            CheckMode::Now => match self
                .eval_once(&check.condition, driver, registry, focus_trail)
                .await?
            {
                Eval::Holds => Ok(()),
                Eval::Mismatch { expected, actual } => Err(IngresarError::assertion(
                    check.description.clone(),
                    expected,
                    actual,
                )),
            },
            CheckMode::Eventually => {
                let deadline = tokio::time::Instant::now() + self.config.check_timeout();
                loop {
                    match self
                        .eval_once(&check.condition, driver, registry, focus_trail)
                        .await?
                    {
                        Eval::Holds => return Ok(()),
                        Eval::Mismatch { .. } if tokio::time::Instant::now() >= deadline => {
                            return Err(IngresarError::timeout(
                                check.description.clone(),
                                self.config.check_timeout_ms,
                            ));
                        }
                        Eval::Mismatch { .. } => {
                            tokio::time::sleep(self.config.poll_interval()).await;
                        }
                    }
                }
            }
        }
    }

    async fn eval_once(
        &self,
        condition: &Condition,
        driver: &dyn PageDriver,
        registry: &Arc<InterceptionRegistry>,
        focus_trail: &[String],
    ) -> IngresarResult<Eval> {
        let eval = match condition {
            Condition::UrlIs(path) => {
                let expected = self.config.url(path);
                let actual = driver.current_url().await?;
                if actual == expected {
                    Eval::Holds
                } else {
                    Eval::Mismatch {
                        expected,
                        actual,
                    }
                }
            }
            Condition::Visible(locator) => match resolve_locator(driver, locator).await? {
                Some(handle) if handle.visible => Eval::Holds,
                Some(_) => Eval::Mismatch {
                    expected: format!("{locator} visible"),
                    actual: "element present but hidden".to_string(),
                },
                None => Eval::Mismatch {
                    expected: format!("{locator} visible"),
                    actual: "no matching element".to_string(),
                },
            },
            Condition::NotVisible(locator) => match resolve_locator(driver, locator).await? {
                Some(handle) if handle.visible => Eval::Mismatch {
                    expected: format!("{locator} absent or hidden"),
                    actual: "element visible".to_string(),
                },
                _ => Eval::Holds,
            },
            Condition::TextMatches { locator, pattern } => {
                let regex = regex::Regex::new(pattern).map_err(|e| {
                    IngresarError::invariant(format!("bad check pattern {pattern:?}: {e}"))
                })?;
                match resolve_locator(driver, locator).await? {
                    Some(handle) => {
                        let text = handle.text_content.unwrap_or_default();
                        if regex.is_match(&text) {
                            Eval::Holds
                        } else {
                            Eval::Mismatch {
                                expected: format!("text matching /{pattern}/"),
                                actual: text,
                            }
                        }
                    }
                    None => Eval::Mismatch {
                        expected: format!("text matching /{pattern}/"),
                        actual: "no matching element".to_string(),
                    },
                }
            }
            Condition::ValueIs { locator, value } => {
                match resolve_locator(driver, locator).await? {
                    Some(handle) => {
                        let actual = handle.value.unwrap_or_default();
                        if &actual == value {
                            Eval::Holds
                        } else {
                            Eval::Mismatch {
                                expected: value.clone(),
                                actual,
                            }
                        }
                    }
                    None => Eval::Mismatch {
                        expected: value.clone(),
                        actual: "no matching element".to_string(),
                    },
                }
            }
            Condition::Enabled { locator, enabled } => {
                match resolve_locator(driver, locator).await? {
                    Some(handle) if handle.enabled == *enabled => Eval::Holds,
                    Some(handle) => Eval::Mismatch {
                        expected: format!("enabled = {enabled}"),
                        actual: format!("enabled = {}", handle.enabled),
                    },
                    None => Eval::Mismatch {
                        expected: format!("enabled = {enabled}"),
                        actual: "no matching element".to_string(),
                    },
                }
            }
            Condition::InputTypeIs { locator, input_type } => {
                match resolve_locator(driver, locator).await? {
                    Some(handle) => {
                        let actual = handle.input_type.unwrap_or_default();
                        if &actual == input_type {
                            Eval::Holds
                        } else {
                            Eval::Mismatch {
                                expected: format!("type = {input_type}"),
                                actual: format!("type = {actual}"),
                            }
                        }
                    }
                    None => Eval::Mismatch {
                        expected: format!("type = {input_type}"),
                        actual: "no matching element".to_string(),
                    },
                }
            }
            Condition::CookiePresent { name, persistent } => {
                let cookies = driver.cookies().await?;
                let found = cookies.iter().find(|c| &c.name == name);
                match (found, persistent) {
                    (Some(_), None) => Eval::Holds,
                    (Some(cookie), Some(want)) if cookie.persistent == *want => Eval::Holds,
                    (Some(cookie), Some(want)) => Eval::Mismatch {
                        expected: format!("cookie {name} persistent = {want}"),
                        actual: format!("persistent = {}", cookie.persistent),
                    },
                    (None, _) => Eval::Mismatch {
                        expected: format!("cookie {name} present"),
                        actual: "cookie absent".to_string(),
                    },
                }
            }
            Condition::CookieAbsent(name) => {
                let cookies = driver.cookies().await?;
                if cookies.iter().any(|c| &c.name == name) {
                    Eval::Mismatch {
                        expected: format!("cookie {name} absent"),
                        actual: "cookie present".to_string(),
                    }
                } else {
                    Eval::Holds
                }
            }
            Condition::RequestCount { pattern, expected } => {
                let actual = registry.requests_matching(pattern).len();
                if actual == *expected {
                    Eval::Holds
                } else {
                    Eval::Mismatch {
                        expected: format!("{expected} requests matching {pattern:?}"),
                        actual: format!("{actual} requests"),
                    }
                }
            }
            Condition::FocusTrail(expected) => {
                if focus_trail == expected.as_slice() {
                    Eval::Holds
                } else {
                    Eval::Mismatch {
                        expected: format!("{expected:?}"),
                        actual: format!("{focus_trail:?}"),
                    }
                }
            }
        };
        Ok(eval)
    }
}
