//! Browser control over the Chrome DevTools Protocol.
//!
//! When compiled with the `browser` feature this drives a real chromium
//! via chromiumoxide. Without the feature a mock implementation with the
//! same surface is provided so the page-object layer stays compilable and
//! unit-testable; driver calls that need a live DOM report a page error.

use crate::result::{SuiteError, SuiteResult};

/// Browser configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
    /// Base URL that relative navigations resolve against
    pub base_url: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
            chromium_path: None,
            sandbox: true,
            base_url: String::new(),
        }
    }
}

impl BrowserConfig {
    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }

    /// Set the base URL relative navigations resolve against
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Resolve a navigation target against a base URL.
///
/// Absolute `http(s)` targets pass through untouched.
fn join_url(base_url: &str, target: &str) -> String {
    if target.starts_with("http://") || target.starts_with("https://") {
        return target.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        target.trim_start_matches('/')
    )
}

// ============================================================================
// Real CDP Implementation (when `browser` feature is enabled)
// ============================================================================

#[cfg(feature = "browser")]
mod cdp {
    use std::sync::Arc;
    use std::time::Instant;

    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use tokio::sync::Mutex;
    use tracing::debug;

    use super::{join_url, BrowserConfig, SuiteError, SuiteResult};
    use crate::wait::{poll_pause, Deadline, LoadState, WaitOptions, NETWORK_IDLE_THRESHOLD_MS};

    /// Browser instance with a live CDP connection
    #[derive(Debug)]
    pub struct Browser {
        config: BrowserConfig,
        inner: Arc<Mutex<CdpBrowser>>,
        #[allow(dead_code)]
        handle: tokio::task::JoinHandle<()>,
    }

    impl Browser {
        /// Launch a new browser instance.
        pub async fn launch(config: BrowserConfig) -> SuiteResult<Self> {
            let mut builder = CdpConfig::builder()
                .window_size(config.viewport_width, config.viewport_height);

            if !config.headless {
                builder = builder.with_head();
            }

            if !config.sandbox {
                builder = builder.no_sandbox();
            }

            if let Some(ref path) = config.chromium_path {
                builder = builder.chrome_executable(path);
            }

            let cdp_config = builder.build().map_err(|e| SuiteError::BrowserLaunch {
                message: e.to_string(),
            })?;

            let (browser, mut handler) =
                CdpBrowser::launch(cdp_config)
                    .await
                    .map_err(|e| SuiteError::BrowserLaunch {
                        message: e.to_string(),
                    })?;

            let handle = tokio::spawn(async move {
                while let Some(h) = handler.next().await {
                    if h.is_err() {
                        break;
                    }
                }
            });

            Ok(Self {
                config,
                inner: Arc::new(Mutex::new(browser)),
                handle,
            })
        }

        /// Open a fresh page in this browser.
        pub async fn new_page(&self) -> SuiteResult<Page> {
            let browser = self.inner.lock().await;
            let cdp_page =
                browser
                    .new_page("about:blank")
                    .await
                    .map_err(|e| SuiteError::Page {
                        message: e.to_string(),
                    })?;

            Ok(Page {
                base_url: self.config.base_url.clone(),
                url: String::from("about:blank"),
                inner: Arc::new(Mutex::new(cdp_page)),
            })
        }

        /// Get the browser configuration
        #[must_use]
        pub const fn config(&self) -> &BrowserConfig {
            &self.config
        }

        /// Close the browser
        pub async fn close(self) -> SuiteResult<()> {
            let mut browser = self.inner.lock().await;
            browser
                .close()
                .await
                .map_err(|e| SuiteError::BrowserLaunch {
                    message: e.to_string(),
                })?;
            Ok(())
        }
    }

    /// A browser page with a live CDP connection
    #[derive(Debug)]
    pub struct Page {
        base_url: String,
        url: String,
        inner: Arc<Mutex<CdpPage>>,
    }

    impl Page {
        /// Navigate to a path or absolute URL.
        pub async fn goto(&mut self, target: &str) -> SuiteResult<()> {
            let url = join_url(&self.base_url, target);
            debug!(url = %url, "navigating");
            {
                let page = self.inner.lock().await;
                page.goto(url.as_str())
                    .await
                    .map_err(|e| SuiteError::Navigation {
                        url: url.clone(),
                        message: e.to_string(),
                    })?;
            }
            self.url = url;
            Ok(())
        }

        /// The page's current location.
        pub async fn current_url(&self) -> SuiteResult<String> {
            self.eval("window.location.href").await
        }

        /// Evaluate a JavaScript expression and deserialize its value.
        pub async fn eval<T: serde::de::DeserializeOwned>(&self, expr: &str) -> SuiteResult<T> {
            let page = self.inner.lock().await;
            let result = page.evaluate(expr).await.map_err(|e| SuiteError::Page {
                message: e.to_string(),
            })?;
            result.into_value().map_err(|e| SuiteError::Page {
                message: e.to_string(),
            })
        }

        /// Block until the page reaches a load state, within `timeout_ms`.
        pub async fn wait_for_load_state(
            &self,
            state: LoadState,
            timeout_ms: u64,
        ) -> SuiteResult<()> {
            let options = WaitOptions::new().with_timeout(timeout_ms);
            let deadline = Deadline::start(timeout_ms);

            loop {
                let ready: String = self.eval("document.readyState").await?;
                let reached = match state {
                    LoadState::DomContentLoaded => ready == "interactive" || ready == "complete",
                    LoadState::Load | LoadState::NetworkIdle => ready == "complete",
                };
                if reached {
                    break;
                }
                if deadline.expired() {
                    return Err(SuiteError::Timeout {
                        waiting_for: format!("load state '{state}'"),
                        ms: timeout_ms,
                    });
                }
                poll_pause(&options).await;
            }

            if state != LoadState::NetworkIdle {
                return Ok(());
            }

            const RESOURCE_COUNT: &str = "performance.getEntriesByType('resource').length";
            let mut last_count: u64 = self.eval(RESOURCE_COUNT).await?;
            let mut stable_since = Instant::now();
            loop {
                if stable_since.elapsed().as_millis() as u64 >= NETWORK_IDLE_THRESHOLD_MS {
                    return Ok(());
                }
                if deadline.expired() {
                    return Err(SuiteError::Timeout {
                        waiting_for: "network idle".to_string(),
                        ms: timeout_ms,
                    });
                }
                poll_pause(&options).await;
                let count: u64 = self.eval(RESOURCE_COUNT).await?;
                if count != last_count {
                    last_count = count;
                    stable_since = Instant::now();
                }
            }
        }

        /// Block until the document has loaded and network activity has
        /// quiesced, within `timeout_ms`.
        pub async fn wait_until_quiescent(&self, timeout_ms: u64) -> SuiteResult<()> {
            self.wait_for_load_state(LoadState::NetworkIdle, timeout_ms)
                .await
        }

        /// The base URL relative navigations resolve against.
        #[must_use]
        pub fn base_url(&self) -> &str {
            &self.base_url
        }
    }
}

// ============================================================================
// Mock Implementation (when `browser` feature is NOT enabled)
// ============================================================================

#[cfg(not(feature = "browser"))]
mod mock {
    use super::{join_url, BrowserConfig, SuiteError, SuiteResult};
    use crate::wait::LoadState;

    /// Browser instance (mock when `browser` feature disabled)
    #[derive(Debug)]
    pub struct Browser {
        config: BrowserConfig,
    }

    impl Browser {
        /// Launch a new browser instance (mock).
        pub async fn launch(config: BrowserConfig) -> SuiteResult<Self> {
            Ok(Self { config })
        }

        /// Open a fresh page (mock).
        pub async fn new_page(&self) -> SuiteResult<Page> {
            Ok(Page {
                base_url: self.config.base_url.clone(),
                url: String::from("about:blank"),
            })
        }

        /// Get the browser configuration
        #[must_use]
        pub const fn config(&self) -> &BrowserConfig {
            &self.config
        }

        /// Close the browser (mock)
        pub async fn close(self) -> SuiteResult<()> {
            Ok(())
        }
    }

    /// A browser page (mock when `browser` feature disabled)
    #[derive(Debug)]
    pub struct Page {
        base_url: String,
        url: String,
    }

    impl Page {
        /// Navigate to a path or absolute URL (mock records the location).
        pub async fn goto(&mut self, target: &str) -> SuiteResult<()> {
            self.url = join_url(&self.base_url, target);
            Ok(())
        }

        /// The page's current location.
        pub async fn current_url(&self) -> SuiteResult<String> {
            Ok(self.url.clone())
        }

        /// Evaluate a JavaScript expression (mock always errors).
        pub async fn eval<T: serde::de::DeserializeOwned>(&self, _expr: &str) -> SuiteResult<T> {
            Err(SuiteError::Page {
                message: "browser feature not enabled; enable 'browser' for live CDP support"
                    .to_string(),
            })
        }

        /// Wait for a load state (mock pages are immediately settled).
        pub async fn wait_for_load_state(
            &self,
            _state: LoadState,
            _timeout_ms: u64,
        ) -> SuiteResult<()> {
            Ok(())
        }

        /// Wait for load/network quiescence (mock is immediately quiet).
        pub async fn wait_until_quiescent(&self, _timeout_ms: u64) -> SuiteResult<()> {
            Ok(())
        }

        /// The base URL relative navigations resolve against.
        #[must_use]
        pub fn base_url(&self) -> &str {
            &self.base_url
        }
    }
}

// Re-export based on feature
#[cfg(feature = "browser")]
pub use cdp::{Browser, Page};

#[cfg(not(feature = "browser"))]
pub use mock::{Browser, Page};
