//! Shared scenario helpers.

use interest_e2e::{BrowserConfig, SuiteResult, TestContext};

/// Opt-in switch for scenarios that need a live chromium and a reachable
/// target application.
pub const E2E_ENABLE_VAR: &str = "E2E_BROWSER";

/// Switch for disabling the chromium sandbox (containerized CI).
pub const E2E_NO_SANDBOX_VAR: &str = "E2E_NO_SANDBOX";

/// Launch a scenario context, or `None` when browser scenarios are not
/// opted in for this run.
pub async fn launch() -> SuiteResult<Option<TestContext>> {
    if std::env::var(E2E_ENABLE_VAR).is_err() {
        eprintln!("skipping browser scenario: set {E2E_ENABLE_VAR}=1 to run");
        return Ok(None);
    }
    let mut config = BrowserConfig::default();
    if std::env::var(E2E_NO_SANDBOX_VAR).is_ok() {
        config = config.with_no_sandbox();
    }
    TestContext::launch_with(config).await.map(Some)
}
