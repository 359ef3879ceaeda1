//! Deterministic in-process model of the login application.
//!
//! [`SimulatedDriver`] implements [`PageDriver`] against a small state
//! machine of the login flow instead of a browser. Form submission builds a
//! `POST /api/login` request, offers it to the installed
//! [`InterceptionRegistry`], and renders the outcome the way the real
//! application would: navigation plus session cookie on 200, a generic
//! banner on 401, a lockout banner on 423, a network banner on 5xx or a
//! connection abort, and a busy submit control while a delayed response is
//! in flight. Unscripted requests fall through to a built-in backend that
//! checks the configured credentials, so pass-through behaves like the real
//! service.
//!
//! All observable behavior is defined by the HTTP contract and the page
//! structure; scenarios interact with it only through the driver trait.

use crate::config::{SuiteConfig, Viewport};
use crate::driver::{Cookie, ElementHandle, Key, PageDriver};
use crate::locator::Selector;
use crate::matcher::HttpMethod;
use crate::registry::InterceptionRegistry;
use crate::result::{IngresarError, IngresarResult};
use crate::script::{Fulfill, ResponseStep};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

const LOGIN_PATH: &str = "/login";
const DASHBOARD_PATH: &str = "/dashboard";
const LOGIN_API_PATH: &str = "/api/login";

/// Tab order of the login form, top to bottom
const LOGIN_TAB_ORDER: [&str; 6] = [
    "username-input",
    "password-input",
    "remember-checkbox",
    "login-submit",
    "forgot-password-link",
    "signup-link",
];

/// Static description of an element in the simulated DOM
struct ElementDesc {
    id: &'static str,
    tag: &'static str,
    css: &'static [&'static str],
    label: Option<&'static str>,
    role: Option<&'static str>,
    text: Option<&'static str>,
}

const LOGIN_ELEMENTS: &[ElementDesc] = &[
    ElementDesc {
        id: "username-input",
        tag: "input",
        css: &["input[name='username']", "#username"],
        label: Some("Username or email"),
        role: Some("textbox"),
        text: None,
    },
    ElementDesc {
        id: "password-input",
        tag: "input",
        css: &["input[name='password']", "#password"],
        label: Some("Password"),
        role: Some("textbox"),
        text: None,
    },
    ElementDesc {
        id: "remember-checkbox",
        tag: "input",
        css: &["input[name='remember']"],
        label: Some("Remember me"),
        role: Some("checkbox"),
        text: None,
    },
    ElementDesc {
        id: "login-submit",
        tag: "button",
        css: &["button[type='submit']"],
        label: None,
        role: Some("button"),
        text: Some("Sign in"),
    },
    ElementDesc {
        id: "forgot-password-link",
        tag: "a",
        css: &[],
        label: None,
        role: Some("link"),
        text: Some("Forgot password?"),
    },
    ElementDesc {
        id: "signup-link",
        tag: "a",
        css: &[],
        label: None,
        role: Some("link"),
        text: Some("Sign up"),
    },
    ElementDesc {
        id: "toggle-password-visibility",
        tag: "button",
        css: &[],
        label: Some("Show password"),
        role: Some("button"),
        text: None,
    },
    ElementDesc {
        id: "error-banner",
        tag: "div",
        css: &[".error-banner"],
        label: None,
        role: Some("alert"),
        text: None,
    },
    ElementDesc {
        id: "username-error",
        tag: "span",
        css: &["#username-error"],
        label: None,
        role: None,
        text: None,
    },
    ElementDesc {
        id: "password-error",
        tag: "span",
        css: &["#password-error"],
        label: None,
        role: None,
        text: None,
    },
];

const DASHBOARD_ELEMENTS: &[ElementDesc] = &[
    ElementDesc {
        id: "dashboard-greeting",
        tag: "div",
        css: &[".greeting"],
        label: None,
        role: None,
        text: Some("Welcome back"),
    },
    ElementDesc {
        id: "logout-button",
        tag: "button",
        css: &[],
        label: None,
        role: Some("button"),
        text: Some("Log out"),
    },
];

fn selector_hits(desc: &ElementDesc, selector: &Selector) -> bool {
    match selector {
        Selector::TestId(id) => desc.id == id,
        Selector::Css(s) => desc.css.contains(&s.as_str()),
        Selector::Label(l) => desc.label == Some(l.as_str()),
        Selector::Role { role, name } => {
            desc.role == Some(role.as_str())
                && name
                    .as_ref()
                    .map_or(true, |n| desc.text.is_some_and(|t| t.contains(n.as_str())))
        }
        Selector::Text(t) => desc.text.is_some_and(|tx| tx.contains(t.as_str())),
    }
}

fn elements_for(path: &str) -> &'static [ElementDesc] {
    match path {
        LOGIN_PATH => LOGIN_ELEMENTS,
        DASHBOARD_PATH => DASHBOARD_ELEMENTS,
        _ => &[],
    }
}

#[derive(Debug)]
struct PageState {
    path: String,
    username: String,
    password: String,
    remember: bool,
    password_visible: bool,
    banner: Option<String>,
    username_error: Option<String>,
    password_error: Option<String>,
    submit_enabled: bool,
    cookies: Vec<Cookie>,
    viewport: Viewport,
    focus: Option<usize>,
}

impl PageState {
    fn fresh(viewport: Viewport) -> Self {
        Self {
            path: LOGIN_PATH.to_string(),
            username: String::new(),
            password: String::new(),
            remember: false,
            password_visible: false,
            banner: None,
            username_error: None,
            password_error: None,
            submit_enabled: true,
            cookies: Vec::new(),
            viewport,
            focus: None,
        }
    }

    fn reset_form(&mut self) {
        self.username.clear();
        self.password.clear();
        self.remember = false;
        self.password_visible = false;
        self.banner = None;
        self.username_error = None;
        self.password_error = None;
        self.submit_enabled = true;
        self.focus = None;
    }
}

/// Deterministic driver over the simulated login application
pub struct SimulatedDriver {
    base_url: String,
    valid_username: String,
    valid_password: String,
    session_cookie: String,
    registry: Option<Arc<InterceptionRegistry>>,
    state: Arc<Mutex<PageState>>,
}

impl std::fmt::Debug for SimulatedDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedDriver")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl SimulatedDriver {
    /// Create a driver modeling the application described by `config`
    #[must_use]
    pub fn new(config: &SuiteConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            valid_username: config.valid_credentials.username.clone(),
            valid_password: config.valid_credentials.password.clone(),
            session_cookie: config.session_cookie_name.clone(),
            registry: None,
            state: Arc::new(Mutex::new(PageState::fresh(config.viewport))),
        }
    }

    fn lock(&self) -> IngresarResult<std::sync::MutexGuard<'_, PageState>> {
        self.state
            .lock()
            .map_err(|_| IngresarError::driver("simulated page state poisoned"))
    }

    fn path_of(&self, url: &str) -> String {
        url.strip_prefix(&self.base_url)
            .map_or_else(|| url.to_string(), |rest| {
                if rest.is_empty() {
                    "/".to_string()
                } else {
                    rest.to_string()
                }
            })
    }

    fn resolve_element(&self, selector: &Selector) -> IngresarResult<Option<&'static ElementDesc>> {
        let state = self.lock()?;
        Ok(elements_for(&state.path)
            .iter()
            .find(|desc| selector_hits(desc, selector)))
    }

    fn handle_for(&self, desc: &ElementDesc) -> IngresarResult<ElementHandle> {
        let state = self.lock()?;
        let mut handle = ElementHandle::new(desc.id, desc.tag);
        handle.text_content = desc.text.map(ToString::to_string);
        match desc.id {
            "username-input" => {
                handle.value = Some(state.username.clone());
                handle.input_type = Some("text".to_string());
            }
            "password-input" => {
                handle.value = Some(state.password.clone());
                handle.input_type = Some(
                    if state.password_visible { "text" } else { "password" }.to_string(),
                );
            }
            "remember-checkbox" => {
                handle.input_type = Some("checkbox".to_string());
                handle.checked = Some(state.remember);
            }
            "login-submit" => {
                handle.enabled = state.submit_enabled;
            }
            "error-banner" => {
                handle.visible = state.banner.is_some();
                handle.text_content = Some(state.banner.clone().unwrap_or_default());
            }
            "username-error" => {
                handle.visible = state.username_error.is_some();
                handle.text_content = Some(state.username_error.clone().unwrap_or_default());
            }
            "password-error" => {
                handle.visible = state.password_error.is_some();
                handle.text_content = Some(state.password_error.clone().unwrap_or_default());
            }
            "dashboard-greeting" => {
                handle.text_content = Some("Welcome back".to_string());
            }
            _ => {}
        }
        Ok(handle)
    }

    /// Client-side validation; returns false when the submit must not reach
    /// the network.
    fn validate(state: &mut PageState) -> bool {
        let username = state.username.trim();
        if username.is_empty() {
            state.username_error = Some("Username is required".to_string());
            return false;
        }
        if state.password.is_empty() {
            state.password_error = Some("Password is required".to_string());
            return false;
        }
        if username.contains('@') && !is_plausible_email(username) {
            state.username_error = Some("Enter a valid email address".to_string());
            return false;
        }
        true
    }

    fn submit(&self) -> IngresarResult<()> {
        let (username, password, remember) = {
            let mut state = self.lock()?;
            state.username_error = None;
            state.password_error = None;
            if !Self::validate(&mut state) {
                return Ok(());
            }
            state.banner = None;
            state.submit_enabled = false;
            (
                state.username.trim().to_string(),
                state.password.clone(),
                state.remember,
            )
        };

        let url = format!("{}{LOGIN_API_PATH}", self.base_url);
        let body = serde_json::to_vec(&serde_json::json!({
            "username": username,
            "password": password,
            "remember": remember,
        }))?;

        let step = match &self.registry {
            Some(registry) => registry.resolve(&url, &HttpMethod::Post, Some(body))?,
            None => None,
        };

        match step {
            None => {
                // Pass through to the built-in backend
                let status =
                    if username == self.valid_username && password == self.valid_password {
                        200
                    } else {
                        401
                    };
                self.apply_response(status, remember)?;
            }
            Some(ResponseStep::Fulfill(Fulfill { status, delay_ms: 0, .. })) => {
                self.apply_response(status, remember)?;
            }
            Some(ResponseStep::Fulfill(Fulfill { status, delay_ms, .. })) => {
                self.spawn_delayed(status, delay_ms, remember);
            }
            Some(ResponseStep::Abort(reason)) => {
                let mut state = self.lock()?;
                state.banner = Some(format!(
                    "Unable to login: network error ({})",
                    reason.message()
                ));
                state.submit_enabled = true;
            }
            Some(ResponseStep::Hang) => {
                // Nothing ever resolves; the submit control stays busy and
                // the scenario's wait bound reports the timeout.
                tracing::debug!(url, "login request hung by script");
            }
        }
        Ok(())
    }

    fn spawn_delayed(&self, status: u16, delay_ms: u64, remember: bool) {
        let state = Arc::clone(&self.state);
        let session_cookie = self.session_cookie.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
            if let Ok(mut state) = state.lock() {
                Self::render_response(&mut state, status, remember, &session_cookie);
            }
        });
    }

    fn apply_response(&self, status: u16, remember: bool) -> IngresarResult<()> {
        let mut state = self.lock()?;
        Self::render_response(&mut state, status, remember, &self.session_cookie);
        Ok(())
    }

    /// Render an HTTP outcome the way the application renders it
    fn render_response(state: &mut PageState, status: u16, remember: bool, cookie_name: &str) {
        match status {
            200 => {
                state.cookies.push(Cookie {
                    name: cookie_name.to_string(),
                    value: format!("sess-{status}"),
                    persistent: remember,
                });
                state.path = DASHBOARD_PATH.to_string();
                state.reset_form();
            }
            401 => {
                state.banner = Some("Invalid username or password".to_string());
                state.submit_enabled = true;
            }
            423 => {
                state.banner = Some("Account locked. Try again later.".to_string());
                state.submit_enabled = true;
            }
            _ => {
                state.banner = Some("Unable to login. Please try again.".to_string());
                state.submit_enabled = true;
            }
        }
    }

    fn logout(&self) -> IngresarResult<()> {
        let mut state = self.lock()?;
        let cookie_name = self.session_cookie.clone();
        state.cookies.retain(|c| c.name != cookie_name);
        state.path = LOGIN_PATH.to_string();
        state.reset_form();
        Ok(())
    }
}

fn is_plausible_email(candidate: &str) -> bool {
    let mut parts = candidate.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains('@')
}

#[async_trait]
impl PageDriver for SimulatedDriver {
    async fn install_interceptions(
        &mut self,
        registry: Arc<InterceptionRegistry>,
    ) -> IngresarResult<()> {
        self.registry = Some(registry);
        Ok(())
    }

    async fn navigate(&mut self, url: &str) -> IngresarResult<()> {
        let path = self.path_of(url);
        let mut state = self.lock()?;
        state.path = path;
        state.focus = None;
        if state.path == LOGIN_PATH {
            let cookies = std::mem::take(&mut state.cookies);
            let viewport = state.viewport;
            *state = PageState::fresh(viewport);
            state.cookies = cookies;
        }
        Ok(())
    }

    async fn current_url(&self) -> IngresarResult<String> {
        let state = self.lock()?;
        Ok(format!("{}{}", self.base_url, state.path))
    }

    async fn query(&self, selector: &Selector) -> IngresarResult<Option<ElementHandle>> {
        match self.resolve_element(selector)? {
            Some(desc) => Ok(Some(self.handle_for(desc)?)),
            None => Ok(None),
        }
    }

    async fn fill(&mut self, selector: &Selector, text: &str) -> IngresarResult<()> {
        let desc = self.resolve_element(selector)?.ok_or_else(|| {
            IngresarError::driver(format!("no fillable element matching {selector}"))
        })?;
        let mut state = self.lock()?;
        match desc.id {
            "username-input" => {
                state.username = text.to_string();
                state.username_error = None;
            }
            "password-input" => {
                state.password = text.to_string();
                state.password_error = None;
            }
            other => {
                return Err(IngresarError::driver(format!("element {other} is not fillable")));
            }
        }
        Ok(())
    }

    async fn click(&mut self, selector: &Selector) -> IngresarResult<()> {
        let desc = self.resolve_element(selector)?.ok_or_else(|| {
            IngresarError::driver(format!("no clickable element matching {selector}"))
        })?;
        match desc.id {
            "login-submit" => self.submit(),
            "toggle-password-visibility" => {
                let mut state = self.lock()?;
                state.password_visible = !state.password_visible;
                Ok(())
            }
            "remember-checkbox" => {
                let mut state = self.lock()?;
                state.remember = !state.remember;
                Ok(())
            }
            "forgot-password-link" => {
                let mut state = self.lock()?;
                state.path = "/forgot-password".to_string();
                state.focus = None;
                Ok(())
            }
            "signup-link" => {
                let mut state = self.lock()?;
                state.path = "/signup".to_string();
                state.focus = None;
                Ok(())
            }
            "logout-button" => self.logout(),
            other => Err(IngresarError::driver(format!(
                "element {other} is not clickable"
            ))),
        }
    }

    async fn set_checked(&mut self, selector: &Selector, checked: bool) -> IngresarResult<()> {
        let desc = self.resolve_element(selector)?.ok_or_else(|| {
            IngresarError::driver(format!("no checkbox matching {selector}"))
        })?;
        if desc.id != "remember-checkbox" {
            return Err(IngresarError::driver(format!(
                "element {} is not a checkbox",
                desc.id
            )));
        }
        let mut state = self.lock()?;
        state.remember = checked;
        Ok(())
    }

    async fn press(&mut self, key: Key) -> IngresarResult<()> {
        match key {
            Key::Tab => {
                let mut state = self.lock()?;
                if state.path != LOGIN_PATH {
                    return Ok(());
                }
                let next = state.focus.map_or(0, |i| (i + 1) % LOGIN_TAB_ORDER.len());
                state.focus = Some(next);
                Ok(())
            }
            Key::Enter => {
                let submits = {
                    let state = self.lock()?;
                    state.path == LOGIN_PATH
                        && state.focus.is_some_and(|i| {
                            matches!(
                                LOGIN_TAB_ORDER[i],
                                "username-input" | "password-input" | "login-submit"
                            )
                        })
                };
                if submits {
                    self.submit()?;
                }
                Ok(())
            }
        }
    }

    async fn set_viewport(&mut self, viewport: Viewport) -> IngresarResult<()> {
        let mut state = self.lock()?;
        state.viewport = viewport;
        Ok(())
    }

    async fn cookies(&self) -> IngresarResult<Vec<Cookie>> {
        let state = self.lock()?;
        Ok(state.cookies.clone())
    }

    async fn active_element(&self) -> IngresarResult<Option<String>> {
        let state = self.lock()?;
        if state.path != LOGIN_PATH {
            return Ok(None);
        }
        Ok(state.focus.map(|i| LOGIN_TAB_ORDER[i].to_string()))
    }

    async fn close(&mut self) -> IngresarResult<()> {
        self.registry = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::RequestMatcher;
    use crate::script::ResponseScript;

    fn driver() -> SimulatedDriver {
        SimulatedDriver::new(&SuiteConfig::default())
    }

    async fn type_credentials(driver: &mut SimulatedDriver, username: &str, password: &str) {
        driver
            .fill(&Selector::test_id("username-input"), username)
            .await
            .unwrap();
        driver
            .fill(&Selector::test_id("password-input"), password)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_pass_through_valid_login_navigates() {
        let mut driver = driver();
        type_credentials(&mut driver, "user@example.com", "correct horse battery").await;
        driver
            .click(&Selector::test_id("login-submit"))
            .await
            .unwrap();

        let url = driver.current_url().await.unwrap();
        assert!(url.ends_with("/dashboard"));
        let cookies = driver.cookies().await.unwrap();
        assert!(cookies.iter().any(|c| c.name == "session"));
    }

    #[tokio::test]
    async fn test_pass_through_bad_credentials_shows_banner() {
        let mut driver = driver();
        type_credentials(&mut driver, "user@example.com", "wrong").await;
        driver
            .click(&Selector::test_id("login-submit"))
            .await
            .unwrap();

        let banner = driver
            .query(&Selector::role("alert"))
            .await
            .unwrap()
            .unwrap();
        assert!(banner.visible);
        assert!(banner
            .text_content
            .unwrap()
            .contains("Invalid username or password"));
    }

    #[tokio::test]
    async fn test_username_trimmed_before_submission() {
        let mut driver = driver();
        type_credentials(&mut driver, "  user@example.com  ", "correct horse battery").await;
        driver
            .click(&Selector::test_id("login-submit"))
            .await
            .unwrap();
        assert!(driver.current_url().await.unwrap().ends_with("/dashboard"));
    }

    #[tokio::test]
    async fn test_empty_username_blocks_request() {
        let mut registry = InterceptionRegistry::new();
        registry.register(
            RequestMatcher::post("**/api/login"),
            ResponseScript::single(ResponseStep::ok()),
        );
        let registry = Arc::new(registry);

        let mut driver = driver();
        driver
            .install_interceptions(Arc::clone(&registry))
            .await
            .unwrap();
        driver
            .fill(&Selector::test_id("password-input"), "secret")
            .await
            .unwrap();
        driver
            .click(&Selector::test_id("login-submit"))
            .await
            .unwrap();

        let inline = driver
            .query(&Selector::test_id("username-error"))
            .await
            .unwrap()
            .unwrap();
        assert!(inline.visible);
        assert!(registry.observed_requests().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_email_blocks_request() {
        let mut driver = driver();
        type_credentials(&mut driver, "not-an-email@", "secret").await;
        driver
            .click(&Selector::test_id("login-submit"))
            .await
            .unwrap();
        let inline = driver
            .query(&Selector::test_id("username-error"))
            .await
            .unwrap()
            .unwrap();
        assert!(inline.visible);
        assert!(inline.text_content.unwrap().contains("valid email"));
    }

    #[tokio::test]
    async fn test_scripted_lockout_sticks() {
        let mut registry = InterceptionRegistry::new();
        registry.register(
            RequestMatcher::post("**/api/login"),
            ResponseScript::new()
                .then_times(ResponseStep::status(401, "invalid credentials"), 2)
                .then(ResponseStep::status(423, "account locked")),
        );
        let mut driver = driver();
        driver
            .install_interceptions(Arc::new(registry))
            .await
            .unwrap();

        for _ in 0..2 {
            type_credentials(&mut driver, "user@example.com", "wrong").await;
            driver
                .click(&Selector::test_id("login-submit"))
                .await
                .unwrap();
        }
        // Correct credentials after the threshold still hit the locked tail
        type_credentials(&mut driver, "user@example.com", "correct horse battery").await;
        driver
            .click(&Selector::test_id("login-submit"))
            .await
            .unwrap();

        let banner = driver
            .query(&Selector::role("alert"))
            .await
            .unwrap()
            .unwrap();
        assert!(banner.text_content.unwrap().contains("Account locked"));
        assert!(driver.current_url().await.unwrap().ends_with("/login"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delayed_response_keeps_submit_busy() {
        let mut registry = InterceptionRegistry::new();
        registry.register(
            RequestMatcher::post("**/api/login"),
            ResponseScript::single(ResponseStep::Fulfill(
                Fulfill::new().with_status(200).with_delay(1000),
            )),
        );
        let mut driver = driver();
        driver
            .install_interceptions(Arc::new(registry))
            .await
            .unwrap();

        type_credentials(&mut driver, "user@example.com", "correct horse battery").await;
        driver
            .click(&Selector::test_id("login-submit"))
            .await
            .unwrap();

        let submit = driver
            .query(&Selector::test_id("login-submit"))
            .await
            .unwrap()
            .unwrap();
        assert!(!submit.enabled);

        tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
        assert!(driver.current_url().await.unwrap().ends_with("/dashboard"));
    }

    #[tokio::test]
    async fn test_abort_renders_network_banner() {
        use crate::script::AbortReason;

        let mut registry = InterceptionRegistry::new();
        registry.register(
            RequestMatcher::post("**/api/login"),
            ResponseScript::single(ResponseStep::Abort(AbortReason::ConnectionRefused)),
        );
        let mut driver = driver();
        driver
            .install_interceptions(Arc::new(registry))
            .await
            .unwrap();

        type_credentials(&mut driver, "user@example.com", "pw").await;
        driver
            .click(&Selector::test_id("login-submit"))
            .await
            .unwrap();

        let banner = driver
            .query(&Selector::role("alert"))
            .await
            .unwrap()
            .unwrap();
        assert!(banner.text_content.unwrap().contains("Unable to login"));
    }

    #[tokio::test]
    async fn test_tab_order_visits_each_once() {
        let mut driver = driver();
        let mut trail = Vec::new();
        for _ in 0..LOGIN_TAB_ORDER.len() {
            driver.press(Key::Tab).await.unwrap();
            trail.push(driver.active_element().await.unwrap().unwrap());
        }
        assert_eq!(trail, LOGIN_TAB_ORDER.map(String::from).to_vec());
    }

    #[tokio::test]
    async fn test_enter_in_password_field_submits() {
        let mut driver = driver();
        type_credentials(&mut driver, "user@example.com", "correct horse battery").await;
        driver.press(Key::Tab).await.unwrap(); // username
        driver.press(Key::Tab).await.unwrap(); // password
        driver.press(Key::Enter).await.unwrap();
        assert!(driver.current_url().await.unwrap().ends_with("/dashboard"));
    }

    #[tokio::test]
    async fn test_visibility_toggle_flips_input_type() {
        let mut driver = driver();
        let before = driver
            .query(&Selector::test_id("password-input"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(before.input_type.as_deref(), Some("password"));

        driver
            .click(&Selector::test_id("toggle-password-visibility"))
            .await
            .unwrap();
        let after = driver
            .query(&Selector::test_id("password-input"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after.input_type.as_deref(), Some("text"));
    }

    #[tokio::test]
    async fn test_logout_clears_session_cookie() {
        let mut driver = driver();
        type_credentials(&mut driver, "user@example.com", "correct horse battery").await;
        driver
            .click(&Selector::test_id("login-submit"))
            .await
            .unwrap();
        assert!(!driver.cookies().await.unwrap().is_empty());

        driver
            .click(&Selector::test_id("logout-button"))
            .await
            .unwrap();
        assert!(driver.current_url().await.unwrap().ends_with("/login"));
        assert!(driver.cookies().await.unwrap().is_empty());
    }

    #[test]
    fn test_email_plausibility() {
        assert!(is_plausible_email("user@example.com"));
        assert!(!is_plausible_email("user@"));
        assert!(!is_plausible_email("@example.com"));
        assert!(!is_plausible_email("user@example"));
        assert!(!is_plausible_email("user@.com"));
    }
}
