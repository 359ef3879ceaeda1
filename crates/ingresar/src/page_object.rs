//! Page objects for the login flow under test.
//!
//! Page objects own the named locators and URL patterns for a page; the
//! runner and scenarios refer to elements only through these.

use crate::locator::{Locator, Selector};

/// Trait for page objects representing a page in the UI
pub trait PageObject {
    /// URL path that identifies this page (e.g., "/login")
    fn url_pattern(&self) -> &str;
}

/// The login page and its elements
#[derive(Debug, Clone)]
pub struct LoginPage {
    username: Locator,
    password: Locator,
    remember_me: Locator,
    submit: Locator,
    forgot_password_link: Locator,
    signup_link: Locator,
    visibility_toggle: Locator,
    error_banner: Locator,
    username_error: Locator,
    password_error: Locator,
}

impl Default for LoginPage {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginPage {
    /// Build the login page with its default locator chains
    #[must_use]
    pub fn new() -> Self {
        Self {
            username: Locator::new(Selector::test_id("username-input"))
                .or(Selector::css("input[name='username']"))
                .or(Selector::label("Username or email")),
            password: Locator::new(Selector::test_id("password-input"))
                .or(Selector::css("input[name='password']"))
                .or(Selector::label("Password")),
            remember_me: Locator::new(Selector::test_id("remember-checkbox"))
                .or(Selector::label("Remember me")),
            submit: Locator::new(Selector::test_id("login-submit"))
                .or(Selector::css("button[type='submit']"))
                .or(Selector::text("Sign in")),
            forgot_password_link: Locator::new(Selector::test_id("forgot-password-link"))
                .or(Selector::text("Forgot password?")),
            signup_link: Locator::new(Selector::test_id("signup-link"))
                .or(Selector::text("Sign up")),
            visibility_toggle: Locator::new(Selector::test_id("toggle-password-visibility"))
                .or(Selector::label("Show password")),
            error_banner: Locator::new(Selector::role("alert"))
                .or(Selector::test_id("error-banner"))
                .or(Selector::css(".error-banner")),
            username_error: Locator::new(Selector::test_id("username-error"))
                .or(Selector::css("#username-error")),
            password_error: Locator::new(Selector::test_id("password-error"))
                .or(Selector::css("#password-error")),
        }
    }

    /// Username (or email) input
    #[must_use]
    pub const fn username(&self) -> &Locator {
        &self.username
    }

    /// Password input
    #[must_use]
    pub const fn password(&self) -> &Locator {
        &self.password
    }

    /// Remember-me checkbox
    #[must_use]
    pub const fn remember_me(&self) -> &Locator {
        &self.remember_me
    }

    /// Submit button
    #[must_use]
    pub const fn submit(&self) -> &Locator {
        &self.submit
    }

    /// Forgot-password link
    #[must_use]
    pub const fn forgot_password_link(&self) -> &Locator {
        &self.forgot_password_link
    }

    /// Signup link
    #[must_use]
    pub const fn signup_link(&self) -> &Locator {
        &self.signup_link
    }

    /// Password visibility toggle
    #[must_use]
    pub const fn visibility_toggle(&self) -> &Locator {
        &self.visibility_toggle
    }

    /// Global error banner (`role=alert` live region)
    #[must_use]
    pub const fn error_banner(&self) -> &Locator {
        &self.error_banner
    }

    /// Inline error region for the username field
    #[must_use]
    pub const fn username_error(&self) -> &Locator {
        &self.username_error
    }

    /// Inline error region for the password field
    #[must_use]
    pub const fn password_error(&self) -> &Locator {
        &self.password_error
    }
}

impl PageObject for LoginPage {
    fn url_pattern(&self) -> &str {
        "/login"
    }
}

/// The post-login dashboard page
#[derive(Debug, Clone)]
pub struct DashboardPage {
    greeting: Locator,
    logout: Locator,
}

impl Default for DashboardPage {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardPage {
    /// Build the dashboard page with its default locator chains
    #[must_use]
    pub fn new() -> Self {
        Self {
            greeting: Locator::new(Selector::test_id("dashboard-greeting"))
                .or(Selector::text("Welcome")),
            logout: Locator::new(Selector::test_id("logout-button"))
                .or(Selector::text("Log out")),
        }
    }

    /// Greeting element shown after a successful login
    #[must_use]
    pub const fn greeting(&self) -> &Locator {
        &self.greeting
    }

    /// Logout button
    #[must_use]
    pub const fn logout(&self) -> &Locator {
        &self.logout
    }
}

impl PageObject for DashboardPage {
    fn url_pattern(&self) -> &str {
        "/dashboard"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_page_url_pattern() {
        let page = LoginPage::new();
        assert_eq!(page.url_pattern(), "/login");
    }

    #[test]
    fn test_login_page_locators_prefer_test_ids() {
        let page = LoginPage::new();
        assert_eq!(
            page.username().candidates()[0],
            Selector::test_id("username-input")
        );
        assert_eq!(page.error_banner().candidates()[0], Selector::role("alert"));
    }

    #[test]
    fn test_dashboard_page() {
        let page = DashboardPage::new();
        assert_eq!(page.url_pattern(), "/dashboard");
        assert_eq!(
            page.logout().candidates()[0],
            Selector::test_id("logout-button")
        );
    }
}
