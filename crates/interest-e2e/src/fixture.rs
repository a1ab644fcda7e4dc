//! Per-scenario fixture wiring.
//!
//! Every scenario gets its own [`TestContext`]: an isolated browser and
//! page plus constructed page objects. Scenarios share no mutable state;
//! the only cross-scenario resource is the persisted auth-state file,
//! written once by the setup flow and read-only afterwards.

use std::sync::Once;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::browser::{Browser, BrowserConfig, Page};
use crate::config::{resolved, Config};
use crate::page_object::PageModel;
use crate::pages::{InterestCalculatorPage, LoginPage};
use crate::result::SuiteResult;
use crate::session::{StorageState, AUTH_STATE_PATH};

/// Initialize tracing once for the whole process.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Execution context owning one isolated browser session.
#[derive(Debug)]
pub struct TestContext {
    config: Config,
    browser: Browser,
    page: Page,
}

impl TestContext {
    /// Launch a context against the resolved environment.
    pub async fn launch() -> SuiteResult<Self> {
        Self::launch_with(BrowserConfig::default()).await
    }

    /// Launch a context with a custom browser configuration. The resolved
    /// environment's base URL applies unless the configuration already
    /// set one.
    pub async fn launch_with(mut browser_config: BrowserConfig) -> SuiteResult<Self> {
        init_tracing();
        let config = resolved().clone();
        if browser_config.base_url.is_empty() {
            browser_config.base_url = config.base_url.clone();
        }
        info!(environment = %config.name, base_url = %browser_config.base_url, "launching scenario context");

        let browser = Browser::launch(browser_config).await?;
        let page = browser.new_page().await?;
        Ok(Self {
            config,
            browser,
            page,
        })
    }

    /// The resolved environment record
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The scenario's page
    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// The scenario's page, mutably (navigation)
    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    /// Login page object
    #[must_use]
    pub fn login_page(&self) -> LoginPage {
        LoginPage::new()
    }

    /// Calculator page object
    #[must_use]
    pub fn calculator_page(&self) -> InterestCalculatorPage {
        InterestCalculatorPage::new()
    }

    /// Make sure this context carries an authenticated session.
    ///
    /// Restores the persisted auth state when it exists; otherwise runs
    /// the login flow once and persists it (the write-once setup phase).
    pub async fn ensure_authenticated(&mut self) -> SuiteResult<()> {
        let login = self.login_page();
        if StorageState::exists(AUTH_STATE_PATH) {
            info!(path = AUTH_STATE_PATH, "restoring persisted session");
            let state = StorageState::load(AUTH_STATE_PATH)?;
            self.page.goto("/").await?;
            state.restore(&self.page).await?;
            self.page.goto("/").await?;
            return Ok(());
        }

        login.visit(&mut self.page).await?;
        login.should_be_loaded(&self.page).await?;
        login.login_with_test_account(&self.page).await?;
        login.should_be_logged_in(&self.page).await?;
        login.save_storage_state(&self.page).await
    }

    /// Tear the context down, closing the browser.
    pub async fn close(self) -> SuiteResult<()> {
        self.browser.close().await
    }
}
