//! End-to-end browser suite for the Ten10 interest-calculator application.
//!
//! A Rust-native rendition of the page-object model over the Chrome
//! DevTools Protocol:
//!
//! ```text
//! ┌──────────────┐    ┌───────────────┐    ┌────────────┐
//! │ Scenarios    │    │ Page objects  │    │ Headless   │
//! │ (tests/)     │───►│ + oracle      │───►│ Browser    │
//! │              │    │ + fixtures    │    │ (chromium) │
//! └──────────────┘    └───────────────┘    └────────────┘
//! ```
//!
//! The `browser` feature enables live CDP control via chromiumoxide; the
//! default build uses a mock driver so the whole layer stays compilable
//! and unit-testable without a chromium install. Scenarios cross-check
//! every rendered amount against the independent [`oracle`].

#![warn(missing_docs)]

/// Browser and page driver (CDP behind the `browser` feature)
pub mod browser;

/// Environment configuration and credentials
pub mod config;

/// Native dialog interception (arm-then-await protocol)
pub mod dialog;

/// Per-scenario fixture wiring
pub mod fixture;

/// Element locators with auto-waiting
pub mod locator;

/// Interest calculation oracle
pub mod oracle;

/// Page Object Model support
pub mod page_object;

/// Concrete page models
pub mod pages;

/// Result and error types
pub mod result;

/// Session persistence (storage state)
pub mod session;

/// Wait mechanisms
pub mod wait;

pub use browser::{Browser, BrowserConfig, Page};
pub use config::{Config, Credentials};
pub use dialog::{CaptureState, CapturedDialog, DialogCapture, DialogType};
pub use fixture::TestContext;
pub use locator::{Locator, Selector};
pub use oracle::{compute_interest, compute_total, Duration, RatePercent};
pub use page_object::{PageModel, PathMatcher};
pub use pages::{InterestCalculatorPage, LoginPage};
pub use result::{SuiteError, SuiteResult};
pub use session::StorageState;
