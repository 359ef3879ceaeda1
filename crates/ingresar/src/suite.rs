//! The login scenario catalogue.
//!
//! Twenty scenarios cover the login flow end to end: the happy path,
//! credential rejection, client-side validation, lockout, session
//! persistence, keyboard ergonomics, hostile input, responsive layout,
//! and network failure. Each builder returns a self-contained
//! [`Scenario`]; `default_suite` registers them in catalogue order.

use crate::config::{SuiteConfig, Viewport};
use crate::driver::Key;
use crate::matcher::{RequestMatcher, UrlPattern};
use crate::page_object::{DashboardPage, LoginPage, PageObject};
use crate::runner::{Check, Condition, ScenarioRunner};
use crate::scenario::{Scenario, ScenarioRegistry, SuiteReport};
use crate::script::{AbortReason, Fulfill, ResponseScript, ResponseStep};
use crate::simulated::SimulatedDriver;

const LOGIN_API: &str = "**/api/login";

fn login_page() -> LoginPage {
    LoginPage::new()
}

fn submit_credentials(scenario: Scenario, username: &str, password: &str) -> Scenario {
    let page = login_page();
    scenario
        .fill(page.username().clone(), username)
        .fill(page.password().clone(), password)
        .click(page.submit().clone())
}

fn check_banner(description: &str, pattern: &str) -> Check {
    Check::eventually(
        description,
        Condition::TextMatches {
            locator: login_page().error_banner().clone(),
            pattern: pattern.to_string(),
        },
    )
}

fn check_on_login() -> Check {
    Check::now(
        "stays on login page",
        Condition::UrlIs(login_page().url_pattern().to_string()),
    )
}

fn check_on_dashboard() -> Check {
    Check::eventually(
        "lands on dashboard",
        Condition::UrlIs(DashboardPage::new().url_pattern().to_string()),
    )
}

fn check_no_request_sent() -> Check {
    Check::now(
        "no login request sent",
        Condition::RequestCount {
            pattern: UrlPattern::Glob(LOGIN_API.to_string()),
            expected: 0,
        },
    )
}

/// TC001: correct credentials land on the dashboard with a session cookie
#[must_use]
pub fn tc001_valid_login(config: &SuiteConfig) -> Scenario {
    submit_credentials(
        Scenario::new("TC001: valid login"),
        &config.valid_credentials.username,
        &config.valid_credentials.password,
    )
    .check(check_on_dashboard())
    .check(Check::eventually(
        "session cookie set",
        Condition::CookiePresent {
            name: config.session_cookie_name.clone(),
            persistent: None,
        },
    ))
    .check(Check::eventually(
        "greeting visible",
        Condition::Visible(DashboardPage::new().greeting().clone()),
    ))
}

/// TC002: a wrong password shows the generic banner and stays on /login
#[must_use]
pub fn tc002_invalid_password(config: &SuiteConfig) -> Scenario {
    submit_credentials(
        Scenario::new("TC002: invalid password"),
        &config.valid_credentials.username,
        "definitely-wrong",
    )
    .check(check_banner(
        "generic credentials banner",
        &config.invalid_credentials_pattern,
    ))
    .check(check_on_login())
}

/// TC003: an unknown user gets the same banner; no user enumeration
#[must_use]
pub fn tc003_unknown_user(config: &SuiteConfig) -> Scenario {
    submit_credentials(
        Scenario::new("TC003: unknown user"),
        "nobody@example.com",
        "whatever",
    )
    .check(check_banner(
        "same generic banner as wrong password",
        &config.invalid_credentials_pattern,
    ))
    .check(check_on_login())
}

/// TC004: an empty username fails client-side, no request reaches the network
#[must_use]
pub fn tc004_empty_username(_config: &SuiteConfig) -> Scenario {
    let page = login_page();
    Scenario::new("TC004: empty username")
        .fill(page.password().clone(), "some password")
        .click(page.submit().clone())
        .check(Check::eventually(
            "inline username error",
            Condition::Visible(page.username_error().clone()),
        ))
        .check(check_no_request_sent())
        .check(check_on_login())
}

/// TC005: an empty password fails client-side, no request reaches the network
#[must_use]
pub fn tc005_empty_password(config: &SuiteConfig) -> Scenario {
    let page = login_page();
    Scenario::new("TC005: empty password")
        .fill(page.username().clone(), &config.valid_credentials.username)
        .click(page.submit().clone())
        .check(Check::eventually(
            "inline password error",
            Condition::Visible(page.password_error().clone()),
        ))
        .check(check_no_request_sent())
        .check(check_on_login())
}

/// TC006: a malformed email fails format validation before any request
#[must_use]
pub fn tc006_malformed_email(_config: &SuiteConfig) -> Scenario {
    submit_credentials(
        Scenario::new("TC006: malformed email"),
        "user@invalid",
        "some password",
    )
    .check(Check::eventually(
        "inline format error",
        Condition::TextMatches {
            locator: login_page().username_error().clone(),
            pattern: "(?i)valid email".to_string(),
        },
    ))
    .check(check_no_request_sent())
    .check(check_on_login())
}

/// TC007: after the lockout threshold the account stays locked, even for
/// correct credentials
#[must_use]
pub fn tc007_lockout(config: &SuiteConfig) -> Scenario {
    let mut scenario = Scenario::new("TC007: lockout after repeated failures").intercept(
        RequestMatcher::post(LOGIN_API),
        ResponseScript::new()
            .then_times(
                ResponseStep::status(401, "invalid credentials"),
                config.lockout_threshold,
            )
            .then(ResponseStep::status(423, "account locked")),
    );
    for _ in 0..config.lockout_threshold {
        scenario = submit_credentials(
            scenario,
            &config.valid_credentials.username,
            "wrong password",
        );
    }
    // The tail is sticky: the real password no longer helps
    submit_credentials(
        scenario,
        &config.valid_credentials.username,
        &config.valid_credentials.password,
    )
    .check(check_banner("lockout banner", &config.lockout_pattern))
    .check(check_on_login())
}

/// TC008: remember-me produces a persistent session cookie
#[must_use]
pub fn tc008_remember_me(config: &SuiteConfig) -> Scenario {
    let page = login_page();
    submit_credentials(
        Scenario::new("TC008: remember-me persistence")
            .set_checked(page.remember_me().clone(), true),
        &config.valid_credentials.username,
        &config.valid_credentials.password,
    )
    .check(check_on_dashboard())
    .check(Check::eventually(
        "persistent session cookie",
        Condition::CookiePresent {
            name: config.session_cookie_name.clone(),
            persistent: Some(true),
        },
    ))
}

/// TC009: logout returns to /login and clears the session cookie
#[must_use]
pub fn tc009_logout(config: &SuiteConfig) -> Scenario {
    submit_credentials(
        Scenario::new("TC009: logout"),
        &config.valid_credentials.username,
        &config.valid_credentials.password,
    )
    .click(DashboardPage::new().logout().clone())
    .check(Check::eventually(
        "back on login page",
        Condition::UrlIs("/login".to_string()),
    ))
    .check(Check::eventually(
        "session cookie cleared",
        Condition::CookieAbsent(config.session_cookie_name.clone()),
    ))
}

/// TC010: the visibility toggle flips the password input from masked to
/// plain text without losing the typed value.
///
/// Checks always run after every action, so this scenario asserts only
/// post-toggle state; the default-masked state is covered by
/// `tc010a_password_masked_by_default`.
#[must_use]
pub fn tc010_password_visibility(_config: &SuiteConfig) -> Scenario {
    let page = login_page();
    Scenario::new("TC010: password visibility toggle")
        .fill(page.password().clone(), "hunter2")
        .click(page.visibility_toggle().clone())
        .check(Check::eventually(
            "revealed after toggle",
            Condition::InputTypeIs {
                locator: page.password().clone(),
                input_type: "text".to_string(),
            },
        ))
        .check(Check::now(
            "value survives the toggle",
            Condition::ValueIs {
                locator: page.password().clone(),
                value: "hunter2".to_string(),
            },
        ))
}

/// TC010a: without a toggle click the password input stays masked
#[must_use]
pub fn tc010a_password_masked_by_default(_config: &SuiteConfig) -> Scenario {
    let page = login_page();
    Scenario::new("TC010a: password masked by default")
        .fill(page.password().clone(), "hunter2")
        .check(Check::now(
            "masked until toggled",
            Condition::InputTypeIs {
                locator: page.password().clone(),
                input_type: "password".to_string(),
            },
        ))
}

/// TC011: the forgot-password link navigates away from the form
#[must_use]
pub fn tc011_forgot_password(_config: &SuiteConfig) -> Scenario {
    Scenario::new("TC011: forgot-password navigation")
        .click(login_page().forgot_password_link().clone())
        .check(Check::eventually(
            "on forgot-password page",
            Condition::UrlIs("/forgot-password".to_string()),
        ))
}

/// TC012: a slow 200 keeps the submit control busy for the whole delay,
/// then completes the login
#[must_use]
pub fn tc012_slow_login_busy_state(config: &SuiteConfig) -> Scenario {
    let page = login_page();
    submit_credentials(
        Scenario::new("TC012: busy state during slow login").intercept(
            RequestMatcher::post(LOGIN_API),
            ResponseScript::single(ResponseStep::Fulfill(
                Fulfill::new().with_status(200).with_delay(1_500),
            )),
        ),
        &config.valid_credentials.username,
        &config.valid_credentials.password,
    )
    .check(Check::now(
        "submit disabled while in flight",
        Condition::Enabled {
            locator: page.submit().clone(),
            enabled: false,
        },
    ))
    .check(check_on_dashboard())
}

/// TC013: the signup link navigates to registration
#[must_use]
pub fn tc013_signup_navigation(_config: &SuiteConfig) -> Scenario {
    Scenario::new("TC013: signup navigation")
        .click(login_page().signup_link().clone())
        .check(Check::eventually(
            "on signup page",
            Condition::UrlIs("/signup".to_string()),
        ))
}

/// TC014: Enter in the password field submits the form
#[must_use]
pub fn tc014_enter_submits(config: &SuiteConfig) -> Scenario {
    let page = login_page();
    Scenario::new("TC014: enter-key submits")
        .fill(page.username().clone(), &config.valid_credentials.username)
        .fill(page.password().clone(), &config.valid_credentials.password)
        .press(Key::Tab)
        .press(Key::Tab)
        .press(Key::Enter)
        .check(check_on_dashboard())
}

/// TC015: surrounding whitespace in the username is trimmed before
/// submission
#[must_use]
pub fn tc015_whitespace_trimming(config: &SuiteConfig) -> Scenario {
    submit_credentials(
        Scenario::new("TC015: whitespace trimming"),
        &format!("   {}   ", config.valid_credentials.username),
        &config.valid_credentials.password,
    )
    .check(check_on_dashboard())
}

/// TC016: SQL-flavored input takes the ordinary rejection path, no bypass
#[must_use]
pub fn tc016_sql_injection_input(config: &SuiteConfig) -> Scenario {
    submit_credentials(
        Scenario::new("TC016: SQL-injection input").intercept(
            RequestMatcher::post(LOGIN_API),
            ResponseScript::single(ResponseStep::status(401, "invalid credentials")),
        ),
        "' OR '1'='1' --",
        "' OR '1'='1' --",
    )
    .check(check_banner(
        "rejected like any bad credential",
        &config.invalid_credentials_pattern,
    ))
    .check(check_on_login())
    .check(Check::now(
        "session cookie never set",
        Condition::CookieAbsent(config.session_cookie_name.clone()),
    ))
}

/// TC017: a script tag in the username stays inert text; the banner keeps
/// its fixed generic wording
#[must_use]
pub fn tc017_xss_input(config: &SuiteConfig) -> Scenario {
    let hostile = "<script>alert('xss')</script>";
    let page = login_page();
    submit_credentials(
        Scenario::new("TC017: XSS input escaping").intercept(
            RequestMatcher::post(LOGIN_API),
            ResponseScript::single(ResponseStep::status(401, "invalid credentials")),
        ),
        hostile,
        "irrelevant",
    )
    .check(check_banner(
        "banner keeps its fixed wording",
        &config.invalid_credentials_pattern,
    ))
    .check(Check::now(
        "hostile value held inert in the field",
        Condition::ValueIs {
            locator: page.username().clone(),
            value: hostile.to_string(),
        },
    ))
    .check(check_on_login())
}

/// TC018: Tab visits every control exactly once, top to bottom
#[must_use]
pub fn tc018_tab_order(_config: &SuiteConfig) -> Scenario {
    let expected = [
        "username-input",
        "password-input",
        "remember-checkbox",
        "login-submit",
        "forgot-password-link",
        "signup-link",
    ];
    let mut scenario = Scenario::new("TC018: tab order");
    for _ in 0..expected.len() {
        scenario = scenario.press(Key::Tab);
    }
    scenario.check(Check::now(
        "each control focused exactly once, in order",
        Condition::FocusTrail(expected.iter().map(ToString::to_string).collect()),
    ))
}

/// TC019: the form stays visible and usable on a mobile viewport
#[must_use]
pub fn tc019_responsive_layout(config: &SuiteConfig) -> Scenario {
    let page = login_page();
    submit_credentials(
        Scenario::new("TC019: responsive layout").with_viewport(Viewport::MOBILE),
        &config.valid_credentials.username,
        &config.valid_credentials.password,
    )
    .check(check_on_dashboard())
    .check(Check::now(
        "form was reachable on mobile",
        Condition::NotVisible(page.error_banner().clone()),
    ))
}

/// TC020: a connection abort renders the network banner within the check
/// timeout
#[must_use]
pub fn tc020_network_failure(config: &SuiteConfig) -> Scenario {
    submit_credentials(
        Scenario::new("TC020: network failure").intercept(
            RequestMatcher::post(LOGIN_API),
            ResponseScript::single(ResponseStep::Abort(AbortReason::InternetDisconnected)),
        ),
        &config.valid_credentials.username,
        &config.valid_credentials.password,
    )
    .check(check_banner("network banner", &config.network_error_pattern))
    .check(check_on_login())
    .check(Check::now(
        "no session established",
        Condition::CookieAbsent(config.session_cookie_name.clone()),
    ))
}

/// All twenty scenarios, in catalogue order
#[must_use]
pub fn default_suite(config: &SuiteConfig) -> ScenarioRegistry {
    let builders: [fn(&SuiteConfig) -> Scenario; 20] = [
        tc001_valid_login,
        tc002_invalid_password,
        tc003_unknown_user,
        tc004_empty_username,
        tc005_empty_password,
        tc006_malformed_email,
        tc007_lockout,
        tc008_remember_me,
        tc009_logout,
        tc010_password_visibility,
        tc011_forgot_password,
        tc012_slow_login_busy_state,
        tc013_signup_navigation,
        tc014_enter_submits,
        tc015_whitespace_trimming,
        tc016_sql_injection_input,
        tc017_xss_input,
        tc018_tab_order,
        tc019_responsive_layout,
        tc020_network_failure,
    ];
    let mut registry = ScenarioRegistry::new();
    for build in builders {
        registry.add(build(config));
    }
    registry
}

/// Run every scenario in the registry, each against a fresh simulated
/// driver, and aggregate the outcomes.
pub async fn run_suite(config: &SuiteConfig, registry: &ScenarioRegistry) -> SuiteReport {
    let runner = ScenarioRunner::new(config.clone());
    let mut report = SuiteReport::new();
    for scenario in registry.scenarios() {
        let mut driver = SimulatedDriver::new(config);
        report.record(runner.run(scenario, &mut driver).await);
    }
    report
}
