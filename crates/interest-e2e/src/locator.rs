//! Locator abstraction for element selection and interaction.
//!
//! Locators are strict about what they target and auto-wait: every
//! interaction polls until the element is actionable or a bounded timeout
//! elapses. Queries and actions are executed in the page as JavaScript
//! expressions that always return a sentinel object, never a bare null.

use serde::Deserialize;

use crate::browser::Page;
use crate::result::{SuiteError, SuiteResult};
use crate::wait::{poll_pause, Deadline, WaitOptions, DEFAULT_TIMEOUT_MS};

/// Selector for locating a single element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// CSS selector (e.g. `#UserName`)
    Css(String),
    /// ARIA-role selector with an optional accessible-name filter
    Role {
        /// Role name (button, heading, alert, ...)
        role: String,
        /// Accessible name the element must contain (case-insensitive)
        name: Option<String>,
    },
    /// Form control bound to a `<label>` with this exact text
    Label(String),
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create a named role selector
    #[must_use]
    pub fn role(role: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Role {
            role: role.into(),
            name: Some(name.into()),
        }
    }

    /// Create an unnamed role selector
    #[must_use]
    pub fn role_any(role: impl Into<String>) -> Self {
        Self::Role {
            role: role.into(),
            name: None,
        }
    }

    /// Create a label selector
    #[must_use]
    pub fn label(text: impl Into<String>) -> Self {
        Self::Label(text.into())
    }

    /// CSS candidates for a role, covering implicit role mappings
    fn role_css(role: &str) -> String {
        match role {
            "button" => {
                "button, [role=\"button\"], input[type=\"submit\"], input[type=\"button\"]"
                    .to_string()
            }
            "heading" => "h1, h2, h3, h4, h5, h6, [role=\"heading\"]".to_string(),
            other => format!("[role=\"{other}\"]"),
        }
    }

    /// JavaScript expression evaluating to the element or null
    #[must_use]
    pub fn to_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelector({s:?})"),
            Self::Role { role, name } => {
                let css = Self::role_css(role);
                match name {
                    Some(name) => {
                        let needle = name.to_lowercase();
                        format!(
                            "(Array.from(document.querySelectorAll({css:?}))\
                             .find(el => ((el.textContent || '') + ' ' + (el.value || ''))\
                             .toLowerCase().includes({needle:?})) || null)"
                        )
                    }
                    None => format!("document.querySelector({css:?})"),
                }
            }
            Self::Label(text) => format!(
                "(() => {{ const label = Array.from(document.querySelectorAll('label'))\
                 .find(l => l.textContent.trim() === {text:?}); if (!label) return null; \
                 return label.htmlFor ? document.getElementById(label.htmlFor) : \
                 label.querySelector('input, select, textarea'); }})()"
            ),
        }
    }

    /// Human-readable form for timeout and assertion messages
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Css(s) => format!("css '{s}'"),
            Self::Role {
                role,
                name: Some(name),
            } => format!("role '{role}' named '{name}'"),
            Self::Role { role, name: None } => format!("role '{role}'"),
            Self::Label(text) => format!("label '{text}'"),
        }
    }
}

/// Options for locator auto-waiting
#[derive(Debug, Clone)]
pub struct LocatorOptions {
    /// Timeout for auto-waiting, in milliseconds
    pub timeout_ms: u64,
    /// Polling interval, in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for LocatorOptions {
    fn default() -> Self {
        let defaults = WaitOptions::default();
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            poll_interval_ms: defaults.poll_interval_ms,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Probe {
    found: bool,
    visible: bool,
}

#[derive(Debug, Deserialize)]
struct ActionOutcome {
    found: bool,
}

#[derive(Debug, Deserialize)]
struct TextOutcome {
    found: bool,
    text: String,
}

#[derive(Debug, Deserialize)]
struct AttrOutcome {
    found: bool,
    has: bool,
    value: String,
}

#[derive(Debug, Deserialize)]
struct CheckOutcome {
    found: bool,
    checked: bool,
}

fn wrap(finder: &str, body: &str) -> String {
    format!("(() => {{ const el = {finder}; {body} }})()")
}

/// A locator for finding and interacting with one element
#[derive(Debug, Clone)]
pub struct Locator {
    selector: Selector,
    options: LocatorOptions,
}

impl Locator {
    /// Create a locator from a selector
    #[must_use]
    pub fn new(selector: Selector) -> Self {
        Self {
            selector,
            options: LocatorOptions::default(),
        }
    }

    /// CSS shorthand
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::new(Selector::css(selector))
    }

    /// Named-role shorthand
    #[must_use]
    pub fn role(role: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(Selector::role(role, name))
    }

    /// Unnamed-role shorthand
    #[must_use]
    pub fn role_any(role: impl Into<String>) -> Self {
        Self::new(Selector::role_any(role))
    }

    /// Label shorthand
    #[must_use]
    pub fn label(text: impl Into<String>) -> Self {
        Self::new(Selector::label(text))
    }

    /// Set a custom auto-wait timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.options.timeout_ms = timeout_ms;
        self
    }

    /// Get the selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Human-readable form for messages
    #[must_use]
    pub fn describe(&self) -> String {
        self.selector.describe()
    }

    fn probe_js(&self) -> String {
        wrap(
            &self.selector.to_query(),
            "if (!el) return { found: false, visible: false }; \
             return { found: true, visible: el.getClientRects().length > 0 };",
        )
    }

    async fn probe(&self, page: &Page) -> SuiteResult<Probe> {
        page.eval(&self.probe_js()).await
    }

    async fn wait_until(
        &self,
        page: &Page,
        require_visible: bool,
        waiting_for: &str,
    ) -> SuiteResult<()> {
        let wait = WaitOptions::new()
            .with_timeout(self.options.timeout_ms)
            .with_poll_interval(self.options.poll_interval_ms);
        let deadline = Deadline::start(self.options.timeout_ms);
        loop {
            let probe = self.probe(page).await?;
            if probe.found && (!require_visible || probe.visible) {
                return Ok(());
            }
            if deadline.expired() {
                return Err(SuiteError::Timeout {
                    waiting_for: format!("{} {waiting_for}", self.describe()),
                    ms: self.options.timeout_ms,
                });
            }
            poll_pause(&wait).await;
        }
    }

    async fn act(&self, page: &Page, body: &str, action: &str) -> SuiteResult<ActionOutcome> {
        let outcome: ActionOutcome = page.eval(&wrap(&self.selector.to_query(), body)).await?;
        if outcome.found {
            Ok(outcome)
        } else {
            Err(SuiteError::Page {
                message: format!("{} vanished before {action}", self.describe()),
            })
        }
    }

    /// Wait for the element to be visible.
    pub async fn expect_visible(&self, page: &Page) -> SuiteResult<()> {
        self.wait_until(page, true, "to be visible").await
    }

    /// Wait for the element to be absent or hidden.
    pub async fn expect_hidden(&self, page: &Page) -> SuiteResult<()> {
        let wait = WaitOptions::new()
            .with_timeout(self.options.timeout_ms)
            .with_poll_interval(self.options.poll_interval_ms);
        let deadline = Deadline::start(self.options.timeout_ms);
        loop {
            let probe = self.probe(page).await?;
            if !probe.found || !probe.visible {
                return Ok(());
            }
            if deadline.expired() {
                return Err(SuiteError::Timeout {
                    waiting_for: format!("{} to be hidden", self.describe()),
                    ms: self.options.timeout_ms,
                });
            }
            poll_pause(&wait).await;
        }
    }

    /// Whether the element is visible right now, without waiting.
    pub async fn is_visible_now(&self, page: &Page) -> SuiteResult<bool> {
        let probe = self.probe(page).await?;
        Ok(probe.found && probe.visible)
    }

    /// Click the element once it is visible.
    pub async fn click(&self, page: &Page) -> SuiteResult<()> {
        self.wait_until(page, true, "to be clickable").await?;
        self.act(
            page,
            "if (!el) return { found: false }; el.click(); return { found: true };",
            "click",
        )
        .await?;
        Ok(())
    }

    /// Fill the element with text once it is visible.
    pub async fn fill(&self, page: &Page, text: &str) -> SuiteResult<()> {
        self.wait_until(page, true, "to be fillable").await?;
        let body = format!(
            "if (!el) return {{ found: false }}; el.value = {text:?}; \
             el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
             el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
             return {{ found: true }};"
        );
        self.act(page, &body, "fill").await?;
        Ok(())
    }

    /// Check the element (checkbox/radio) once it is visible; no-op when
    /// already checked.
    pub async fn check(&self, page: &Page) -> SuiteResult<()> {
        self.wait_until(page, true, "to be checkable").await?;
        let outcome: CheckOutcome = page
            .eval(&wrap(
                &self.selector.to_query(),
                "if (!el) return { found: false, checked: false }; \
                 if (!el.checked) { el.click(); } \
                 return { found: true, checked: !!el.checked };",
            ))
            .await?;
        if !outcome.found {
            return Err(SuiteError::Page {
                message: format!("{} vanished before check", self.describe()),
            });
        }
        if !outcome.checked {
            return Err(SuiteError::Page {
                message: format!("{} did not become checked", self.describe()),
            });
        }
        Ok(())
    }

    /// Text content of the element, once present. `None` when the element
    /// never appears within the timeout is reported as a timeout instead;
    /// an empty string is a present-but-empty element.
    pub async fn text_content(&self, page: &Page) -> SuiteResult<String> {
        self.wait_until(page, false, "to be present").await?;
        let outcome: TextOutcome = page
            .eval(&wrap(
                &self.selector.to_query(),
                "if (!el) return { found: false, text: '' }; \
                 return { found: true, text: el.textContent === null ? '' : el.textContent };",
            ))
            .await?;
        if outcome.found {
            Ok(outcome.text)
        } else {
            Err(SuiteError::Page {
                message: format!("{} vanished before read", self.describe()),
            })
        }
    }

    /// An attribute value, once the element is present. `Ok(None)` means
    /// the element carries no such attribute.
    pub async fn attribute(&self, page: &Page, name: &str) -> SuiteResult<Option<String>> {
        self.wait_until(page, false, "to be present").await?;
        let body = format!(
            "if (!el) return {{ found: false, has: false, value: '' }}; \
             const v = el.getAttribute({name:?}); \
             return {{ found: true, has: v !== null, value: v === null ? '' : v }};"
        );
        let outcome: AttrOutcome = page.eval(&wrap(&self.selector.to_query(), &body)).await?;
        if !outcome.found {
            return Err(SuiteError::Page {
                message: format!("{} vanished before read", self.describe()),
            });
        }
        Ok(outcome.has.then_some(outcome.value))
    }
}
