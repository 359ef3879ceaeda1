//! Abstract browser-automation capability trait.
//!
//! The harness consumes the automation driver through [`PageDriver`] rather
//! than binding to any concrete browser stack. An implementation drives a
//! real browser context, or a deterministic in-process model of the
//! application like [`SimulatedDriver`](crate::simulated::SimulatedDriver).

use crate::config::Viewport;
use crate::locator::{Locator, Selector};
use crate::registry::InterceptionRegistry;
use crate::result::{IngresarError, IngresarResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Keyboard keys the scenarios inject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    /// Tab, advances focus
    Tab,
    /// Enter, submits the focused form
    Enter,
}

/// A cookie visible to the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
    /// Whether the cookie outlives the session (has an expiry)
    pub persistent: bool,
}

/// Snapshot of an element's observable state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Stable element identifier
    pub id: String,
    /// Element tag name
    pub tag_name: String,
    /// Text content, if any
    pub text_content: Option<String>,
    /// Current input value, for form fields
    pub value: Option<String>,
    /// Input type attribute, for inputs ("password", "text", ...)
    pub input_type: Option<String>,
    /// Whether the element is currently rendered visible
    pub visible: bool,
    /// Whether the element accepts interaction
    pub enabled: bool,
    /// Checked state, for checkboxes
    pub checked: Option<bool>,
}

impl ElementHandle {
    /// Create a handle with defaults (visible, enabled, no text)
    #[must_use]
    pub fn new(id: impl Into<String>, tag_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag_name: tag_name.into(),
            text_content: None,
            value: None,
            input_type: None,
            visible: true,
            enabled: true,
            checked: None,
        }
    }
}

/// Capability interface over a browser page.
///
/// One driver instance backs exactly one scenario; drivers are never shared.
#[async_trait]
pub trait PageDriver: Send {
    /// Install the interception registry into the context. Must happen
    /// before navigation so the first request is already covered.
    async fn install_interceptions(
        &mut self,
        registry: Arc<InterceptionRegistry>,
    ) -> IngresarResult<()>;

    /// Navigate to an absolute URL
    async fn navigate(&mut self, url: &str) -> IngresarResult<()>;

    /// Current page URL
    async fn current_url(&self) -> IngresarResult<String>;

    /// Query a single selector; `None` when nothing matches
    async fn query(&self, selector: &Selector) -> IngresarResult<Option<ElementHandle>>;

    /// Fill a form field
    async fn fill(&mut self, selector: &Selector, text: &str) -> IngresarResult<()>;

    /// Click an element
    async fn click(&mut self, selector: &Selector) -> IngresarResult<()>;

    /// Set a checkbox state
    async fn set_checked(&mut self, selector: &Selector, checked: bool) -> IngresarResult<()>;

    /// Inject a keyboard event
    async fn press(&mut self, key: Key) -> IngresarResult<()>;

    /// Resize the viewport
    async fn set_viewport(&mut self, viewport: Viewport) -> IngresarResult<()>;

    /// Cookies currently visible to the page
    async fn cookies(&self) -> IngresarResult<Vec<Cookie>>;

    /// Identifier of the element holding keyboard focus
    async fn active_element(&self) -> IngresarResult<Option<String>>;

    /// Tear down the context, releasing routes and listeners
    async fn close(&mut self) -> IngresarResult<()>;
}

/// Resolve a locator's candidate chain against a driver.
///
/// Candidates are tried in declaration order; the first that resolves wins.
pub async fn resolve_locator(
    driver: &dyn PageDriver,
    locator: &Locator,
) -> IngresarResult<Option<ElementHandle>> {
    for candidate in locator.candidates() {
        if let Some(handle) = driver.query(candidate).await? {
            return Ok(Some(handle));
        }
    }
    Ok(None)
}

/// Wait until a locator resolves, bounded by `timeout`.
///
/// # Errors
///
/// `TimeoutExceeded` if the element never appears within the bound.
pub async fn wait_for_element(
    driver: &dyn PageDriver,
    locator: &Locator,
    timeout: Duration,
    poll_interval: Duration,
) -> IngresarResult<ElementHandle> {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if let Some(handle) = resolve_locator(driver, locator).await? {
            return Ok(handle);
        }
        if tokio::time::Instant::now() >= deadline {
            return Err(IngresarError::timeout(
                format!("wait for element {locator}"),
                timeout.as_millis() as u64,
            ));
        }
        tokio::time::sleep(poll_interval).await;
    }
}
