//! Environment configuration and test-account credentials.
//!
//! `ENVIRONMENT` selects a named configuration record; unknown names fall
//! back to the `demo` record with a single warning. The resolved record is
//! process-wide state, initialized once and never mutated afterwards.

use std::env;
use std::sync::OnceLock;

use tracing::warn;

use crate::result::{SuiteError, SuiteResult};

/// Environment variable naming the configuration record
pub const ENVIRONMENT_VAR: &str = "ENVIRONMENT";

/// Environment variable overriding the record's base URL
pub const BASE_URL_VAR: &str = "BASE_URL";

/// Environment variable carrying the test account's username
pub const EMAIL_VAR: &str = "EMAIL";

/// Environment variable carrying the test account's password
pub const PASSWORD_VAR: &str = "PASSWORD";

/// Name of the fallback environment
pub const DEFAULT_ENVIRONMENT: &str = "demo";

const DEMO_BASE_URL: &str = "http://3.8.242.61";

/// A named environment record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Environment name
    pub name: String,
    /// Base URL of the target application
    pub base_url: String,
}

impl Config {
    fn demo() -> Self {
        Self {
            name: DEFAULT_ENVIRONMENT.to_string(),
            base_url: DEMO_BASE_URL.to_string(),
        }
    }
}

fn builtin(name: &str) -> Option<Config> {
    match name {
        DEFAULT_ENVIRONMENT => Some(Config::demo()),
        _ => None,
    }
}

/// Resolve an environment name to its record, falling back to `demo`.
///
/// The fallback logs one warning; resolution itself never fails.
#[must_use]
pub fn resolve(name: &str) -> Config {
    builtin(name).unwrap_or_else(|| {
        warn!(
            environment = name,
            "configuration for environment not found, using demo configuration"
        );
        Config::demo()
    })
}

/// The process-wide resolved configuration.
///
/// Loads `.env` on first use, resolves `ENVIRONMENT` (default `demo`) and
/// applies the `BASE_URL` override when present.
pub fn resolved() -> &'static Config {
    static CONFIG: OnceLock<Config> = OnceLock::new();
    CONFIG.get_or_init(|| {
        dotenvy::dotenv().ok();
        let name = env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string());
        let mut config = resolve(&name);
        if let Ok(base_url) = env::var(BASE_URL_VAR) {
            config.base_url = base_url;
        }
        config
    })
}

/// Test-account credentials sourced from the environment.
///
/// Their absence is a hard failure for any authenticated flow, raised
/// before any UI interaction.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Account username (email)
    pub username: String,
    /// Account password
    pub password: String,
}

impl Credentials {
    /// Read `EMAIL` / `PASSWORD` from the process environment.
    pub fn from_env() -> SuiteResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read credentials through an arbitrary lookup.
    pub fn from_lookup<F>(lookup: F) -> SuiteResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |variable: &str| {
            lookup(variable)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| SuiteError::MissingCredentials {
                    variable: variable.to_string(),
                })
        };
        Ok(Self {
            username: get(EMAIL_VAR)?,
            password: get(PASSWORD_VAR)?,
        })
    }
}
