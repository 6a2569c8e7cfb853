//! Startup configuration for the character browser.

use std::path::{Path, PathBuf};
use std::time::Duration;

use charpage_query::DEFAULT_ENDPOINT;
use thiserror::Error;

pub const ENDPOINT_VAR: &str = "CHARPAGE_ENDPOINT";
pub const USER_AGENT_VAR: &str = "CHARPAGE_USER_AGENT";
pub const TIMEOUT_VAR: &str = "CHARPAGE_TIMEOUT_SECS";
pub const STATE_FILE_VAR: &str = "CHARPAGE_STATE_FILE";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    #[error("{var} must be a whole number of seconds greater than zero, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },
}

/// Configuration for one browsing session.
#[derive(Clone, Debug, PartialEq)]
pub struct AppOptions {
    /// GraphQL endpoint the `Characters` query is posted to
    pub endpoint: String,
    /// Overrides the transport's default `User-Agent`
    pub user_agent: Option<String>,
    pub timeout: Duration,
    /// Where the current page is saved; persistence is off when unset
    pub state_file: Option<PathBuf>,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            user_agent: None,
            timeout: DEFAULT_TIMEOUT,
            state_file: None,
        }
    }
}

impl AppOptions {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_state_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_file = Some(path.into());
        self
    }

    pub fn state_file(&self) -> Option<&Path> {
        self.state_file.as_deref()
    }

    /// Defaults overridden by the `CHARPAGE_*` environment variables.
    pub fn from_env() -> Result<Self, OptionsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    /// Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, OptionsError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let mut options = Self::default();
        if let Some(endpoint) = var(ENDPOINT_VAR) {
            options = options.with_endpoint(endpoint.trim());
        }
        if let Some(user_agent) = var(USER_AGENT_VAR) {
            options = options.with_user_agent(user_agent);
        }
        if let Some(value) = var(TIMEOUT_VAR) {
            let secs = value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(OptionsError::InvalidTimeout {
                    var: TIMEOUT_VAR,
                    value: value.clone(),
                })?;
            options = options.with_timeout(Duration::from_secs(secs));
        }
        if let Some(path) = var(STATE_FILE_VAR) {
            options = options.with_state_file(path);
        }
        Ok(options)
    }
}
