//! End-to-end runs of the login scenario catalogue.
//!
//! Every scenario executes against a fresh `SimulatedDriver` under a paused
//! tokio clock, so scripted delays elapse instantly and the suite stays
//! deterministic wall-clock-free.

use ingresar::{
    default_suite, run_suite, FailureKind, RunState, Scenario, ScenarioReport, ScenarioRunner,
    SimulatedDriver, SuiteConfig,
};

async fn run_one(build: fn(&SuiteConfig) -> Scenario) -> ScenarioReport {
    let config = SuiteConfig::default();
    let scenario = build(&config);
    let runner = ScenarioRunner::new(config.clone());
    let mut driver = SimulatedDriver::new(&config);
    runner.run(&scenario, &mut driver).await
}

async fn assert_passes(build: fn(&SuiteConfig) -> Scenario) {
    let report = run_one(build).await;
    assert_eq!(
        report.state,
        RunState::Passed,
        "{} failed: {:?}",
        report.name,
        report.failure
    );
}

#[tokio::test(start_paused = true)]
async fn test_tc001_valid_login() {
    assert_passes(ingresar::suite::tc001_valid_login).await;
}

#[tokio::test(start_paused = true)]
async fn test_tc002_invalid_password() {
    assert_passes(ingresar::suite::tc002_invalid_password).await;
}

#[tokio::test(start_paused = true)]
async fn test_tc003_unknown_user() {
    assert_passes(ingresar::suite::tc003_unknown_user).await;
}

#[tokio::test(start_paused = true)]
async fn test_tc004_empty_username() {
    assert_passes(ingresar::suite::tc004_empty_username).await;
}

#[tokio::test(start_paused = true)]
async fn test_tc005_empty_password() {
    assert_passes(ingresar::suite::tc005_empty_password).await;
}

#[tokio::test(start_paused = true)]
async fn test_tc006_malformed_email() {
    assert_passes(ingresar::suite::tc006_malformed_email).await;
}

#[tokio::test(start_paused = true)]
async fn test_tc007_lockout() {
    assert_passes(ingresar::suite::tc007_lockout).await;
}

#[tokio::test(start_paused = true)]
async fn test_tc008_remember_me() {
    assert_passes(ingresar::suite::tc008_remember_me).await;
}

#[tokio::test(start_paused = true)]
async fn test_tc009_logout() {
    assert_passes(ingresar::suite::tc009_logout).await;
}

#[tokio::test(start_paused = true)]
async fn test_tc010_password_visibility() {
    assert_passes(ingresar::suite::tc010_password_visibility).await;
}

#[tokio::test(start_paused = true)]
async fn test_tc010a_password_masked_by_default() {
    assert_passes(ingresar::suite::tc010a_password_masked_by_default).await;
}

#[tokio::test(start_paused = true)]
async fn test_tc011_forgot_password() {
    assert_passes(ingresar::suite::tc011_forgot_password).await;
}

#[tokio::test(start_paused = true)]
async fn test_tc012_slow_login_busy_state() {
    assert_passes(ingresar::suite::tc012_slow_login_busy_state).await;
}

#[tokio::test(start_paused = true)]
async fn test_tc013_signup_navigation() {
    assert_passes(ingresar::suite::tc013_signup_navigation).await;
}

#[tokio::test(start_paused = true)]
async fn test_tc014_enter_submits() {
    assert_passes(ingresar::suite::tc014_enter_submits).await;
}

#[tokio::test(start_paused = true)]
async fn test_tc015_whitespace_trimming() {
    assert_passes(ingresar::suite::tc015_whitespace_trimming).await;
}

#[tokio::test(start_paused = true)]
async fn test_tc016_sql_injection_input() {
    assert_passes(ingresar::suite::tc016_sql_injection_input).await;
}

#[tokio::test(start_paused = true)]
async fn test_tc017_xss_input() {
    assert_passes(ingresar::suite::tc017_xss_input).await;
}

#[tokio::test(start_paused = true)]
async fn test_tc018_tab_order() {
    assert_passes(ingresar::suite::tc018_tab_order).await;
}

#[tokio::test(start_paused = true)]
async fn test_tc019_responsive_layout() {
    assert_passes(ingresar::suite::tc019_responsive_layout).await;
}

#[tokio::test(start_paused = true)]
async fn test_tc020_network_failure() {
    assert_passes(ingresar::suite::tc020_network_failure).await;
}

#[tokio::test(start_paused = true)]
async fn test_whole_catalogue_passes() {
    let config = SuiteConfig::default();
    let suite = default_suite(&config);
    let report = run_suite(&config, &suite).await;
    assert!(
        report.all_passed(),
        "failures: {:?}",
        report
            .failures()
            .iter()
            .map(|r| (&r.name, &r.failure))
            .collect::<Vec<_>>()
    );
    assert_eq!(report.passed_count(), 20);
}

#[tokio::test(start_paused = true)]
async fn test_reports_carry_run_metadata() {
    let report = run_one(ingresar::suite::tc001_valid_login).await;
    assert!(report.name.starts_with("TC001"));
    assert!(!report.assertions.is_empty());
    assert!(report.assertions.iter().all(|a| a.passed));
}

#[tokio::test(start_paused = true)]
async fn test_hung_request_surfaces_as_timeout() {
    use ingresar::{
        Check, Condition, LoginPage, RequestMatcher, ResponseScript, ResponseStep,
    };

    let config = SuiteConfig::default();
    let page = LoginPage::new();
    let scenario = Scenario::new("hung login request")
        .intercept(
            RequestMatcher::post("**/api/login"),
            ResponseScript::single(ResponseStep::Hang),
        )
        .fill(page.username().clone(), &config.valid_credentials.username)
        .fill(page.password().clone(), &config.valid_credentials.password)
        .click(page.submit().clone())
        .check(Check::eventually(
            "never reaches dashboard",
            Condition::UrlIs("/dashboard".to_string()),
        ));

    let runner = ScenarioRunner::new(config.clone());
    let mut driver = SimulatedDriver::new(&config);
    let report = runner.run(&scenario, &mut driver).await;

    assert_eq!(report.state, RunState::Failed);
    let failure = report.failure.expect("hung request must fail the run");
    assert_eq!(failure.kind, FailureKind::Timeout);
}
