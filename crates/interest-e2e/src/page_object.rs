//! Page Object Model support.
//!
//! Pages share one capability contract: they can be visited and they can
//! assert themselves loaded. Concrete page types implement [`PageModel`]
//! independently; there is no base-page hierarchy. A page object binds
//! locators and user actions for one logical page and borrows the browser
//! session, it never owns it.

use async_trait::async_trait;
use tracing::debug;

use crate::browser::Page;
use crate::locator::Locator;
use crate::result::{SuiteError, SuiteResult};
use crate::wait::DEFAULT_LOAD_TIMEOUT_MS;

/// Matcher for "the current location is on this page".
///
/// Pages are identified by a literal path fragment; the root path matches
/// any location on the same site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatcher {
    fragment: String,
}

impl PathMatcher {
    /// Create a matcher for a path fragment.
    #[must_use]
    pub fn new(fragment: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
        }
    }

    /// Whether a URL is on this page.
    #[must_use]
    pub fn matches(&self, url: &str) -> bool {
        self.fragment == "/" || url.contains(&self.fragment)
    }

    /// The path fragment
    #[must_use]
    pub fn fragment(&self) -> &str {
        &self.fragment
    }
}

/// Shared capability contract for pages of the target application.
#[async_trait]
pub trait PageModel: Send + Sync {
    /// Path fragment this page lives under (e.g. `/Account/Login`)
    fn path(&self) -> &str;

    /// Page name for logging
    fn page_name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Bound on the loaded-state wait, in milliseconds
    fn load_timeout_ms(&self) -> u64 {
        DEFAULT_LOAD_TIMEOUT_MS
    }

    /// Locators that must be visible for the page to count as loaded
    fn loaded_markers(&self) -> Vec<Locator> {
        Vec::new()
    }

    /// Extra page-specific loaded checks, run after the markers
    async fn loaded_checks(&self, _page: &Page) -> SuiteResult<()> {
        Ok(())
    }

    /// Navigate to this page.
    async fn visit(&self, page: &mut Page) -> SuiteResult<()> {
        debug!(page = self.page_name(), path = self.path(), "visit");
        page.goto(self.path()).await
    }

    /// Assert the current location is this page, wait (bounded) for the
    /// page to quiesce, then check the page's loaded markers.
    async fn should_be_loaded(&self, page: &Page) -> SuiteResult<()> {
        let timeout_ms = self.load_timeout_ms();
        let current = page.current_url().await?;
        let matcher = PathMatcher::new(self.path());
        if !matcher.matches(&current) {
            return Err(SuiteError::NavigationTimeout {
                expected: self.path().to_string(),
                actual: current,
                timeout_ms,
            });
        }
        page.wait_until_quiescent(timeout_ms).await?;
        for marker in self.loaded_markers() {
            marker.expect_visible(page).await?;
        }
        self.loaded_checks(page).await
    }
}

/// Assert that `actual` contains `expected`, with a named context.
pub(crate) fn expect_contains(context: &str, actual: &str, expected: &str) -> SuiteResult<()> {
    if actual.contains(expected) {
        Ok(())
    } else {
        Err(SuiteError::assertion(
            context,
            format!("text containing '{expected}'"),
            format!("'{}'", actual.trim()),
        ))
    }
}
