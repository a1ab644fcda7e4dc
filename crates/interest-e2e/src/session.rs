//! Session persistence (storage state).
//!
//! After a successful login the browser's session is captured to a JSON
//! file so later runs can skip the login flow. The file is write-once by
//! the setup phase and read-only for every dependent scenario; deleting
//! it (or changing credentials) invalidates the session.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::browser::Page;
use crate::result::SuiteResult;

/// Default location of the persisted session
pub const AUTH_STATE_PATH: &str = ".auth/user.json";

/// One cookie as the page sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
}

/// One stored key/value pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageItem {
    /// Key
    pub name: String,
    /// Value
    pub value: String,
}

/// Per-origin storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginState {
    /// Origin the entries belong to
    pub origin: String,
    /// localStorage entries
    #[serde(rename = "localStorage")]
    pub local_storage: Vec<StorageItem>,
}

/// Serialized browser session: cookies plus origin-scoped storage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageState {
    /// Cookies visible to the page
    pub cookies: Vec<Cookie>,
    /// Origin-scoped storage
    pub origins: Vec<OriginState>,
}

#[derive(Debug, Deserialize)]
struct PageSession {
    origin: String,
    cookies: Vec<Cookie>,
    #[serde(rename = "localStorage")]
    local_storage: Vec<StorageItem>,
}

const CAPTURE_SCRIPT: &str = "(() => { \
    const cookies = document.cookie \
        ? document.cookie.split('; ').map(c => { \
            const i = c.indexOf('='); \
            return { name: c.slice(0, i), value: c.slice(i + 1) }; \
          }) \
        : []; \
    const localStorageItems = []; \
    for (let i = 0; i < localStorage.length; i++) { \
        const key = localStorage.key(i); \
        localStorageItems.push({ name: key, value: localStorage.getItem(key) }); \
    } \
    return { origin: window.location.origin, cookies, localStorage: localStorageItems }; \
})()";

impl StorageState {
    /// Whether a persisted session exists at `path`.
    #[must_use]
    pub fn exists(path: impl AsRef<Path>) -> bool {
        path.as_ref().is_file()
    }

    /// Read a persisted session.
    pub fn load(path: impl AsRef<Path>) -> SuiteResult<Self> {
        let bytes = fs::read(path.as_ref())?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Persist this session, creating the parent directory when needed.
    pub fn save(&self, path: impl AsRef<Path>) -> SuiteResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_vec_pretty(self)?)?;
        info!(path = %path.display(), "storage state saved");
        Ok(())
    }

    /// Capture the current session from the page.
    pub async fn capture(page: &Page) -> SuiteResult<Self> {
        let session: PageSession = page.eval(CAPTURE_SCRIPT).await?;
        Ok(Self {
            cookies: session.cookies,
            origins: vec![OriginState {
                origin: session.origin,
                local_storage: session.local_storage,
            }],
        })
    }

    /// Restore this session into the page. The page must already be on an
    /// origin the state belongs to.
    pub async fn restore(&self, page: &Page) -> SuiteResult<()> {
        let mut script = String::from("(() => { ");
        for cookie in &self.cookies {
            let pair = format!("{}={}; path=/", cookie.name, cookie.value);
            script.push_str(&format!("document.cookie = {pair:?}; "));
        }
        for origin in &self.origins {
            for item in &origin.local_storage {
                script.push_str(&format!(
                    "localStorage.setItem({:?}, {:?}); ",
                    item.name, item.value
                ));
            }
        }
        script.push_str("return true; })()");
        let _: bool = page.eval(&script).await?;
        Ok(())
    }
}
