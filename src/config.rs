use crate::error::{Result, SatimError};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Client configuration.
///
/// Deserializable from any serde source, or assembled from `SATIM_*`
/// environment variables with [`SatimConfig::from_env`].
#[derive(Clone, Deserialize)]
pub struct SatimConfig {
    pub username: String,
    pub password: String,
    pub terminal_id: String,

    /// Selects the test gateway instead of the live one.
    #[serde(default = "default_test_mode")]
    pub test_mode: bool,

    /// Upper bound for a whole gateway call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Overrides the endpoint picked by `test_mode`.
    #[serde(default)]
    pub endpoint: Option<String>,
}

fn default_test_mode() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl SatimConfig {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        terminal_id: impl Into<String>,
        test_mode: bool,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            terminal_id: terminal_id.into(),
            test_mode,
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            endpoint: None,
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// `SATIM_USERNAME`, `SATIM_PASSWORD` and `SATIM_TERMINAL_ID` are
    /// required. `SATIM_TEST_MODE`, `SATIM_TIMEOUT_SECS`,
    /// `SATIM_CONNECT_TIMEOUT_SECS` and `SATIM_ENDPOINT` are optional.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| SatimError::Config(format!("{key} is not set")))
        };

        let mut config = Self::new(
            required("SATIM_USERNAME")?,
            required("SATIM_PASSWORD")?,
            required("SATIM_TERMINAL_ID")?,
            default_test_mode(),
        );

        if let Some(raw) = lookup("SATIM_TEST_MODE") {
            config.test_mode = parse_bool(&raw).ok_or_else(|| {
                SatimError::Config(format!("SATIM_TEST_MODE must be a boolean, got {raw:?}"))
            })?;
        }
        if let Some(raw) = lookup("SATIM_TIMEOUT_SECS") {
            config.timeout_secs = parse_secs("SATIM_TIMEOUT_SECS", &raw)?;
        }
        if let Some(raw) = lookup("SATIM_CONNECT_TIMEOUT_SECS") {
            config.connect_timeout_secs = parse_secs("SATIM_CONNECT_TIMEOUT_SECS", &raw)?;
        }
        config.endpoint = lookup("SATIM_ENDPOINT").filter(|endpoint| !endpoint.is_empty());

        config.validate()?;
        Ok(config)
    }

    /// Rejects empty credentials and zero timeouts.
    pub fn validate(&self) -> Result<()> {
        if self.username.is_empty() {
            return Err(SatimError::Config("username must not be empty".to_string()));
        }
        if self.password.is_empty() {
            return Err(SatimError::Config("password must not be empty".to_string()));
        }
        if self.terminal_id.is_empty() {
            return Err(SatimError::Config(
                "terminal_id must not be empty".to_string(),
            ));
        }
        if self.timeout_secs == 0 || self.connect_timeout_secs == 0 {
            return Err(SatimError::Config(
                "timeouts must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl fmt::Debug for SatimConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SatimConfig")
            .field("username", &self.username)
            .field("password", &"***")
            .field("terminal_id", &self.terminal_id)
            .field("test_mode", &self.test_mode)
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_secs(key: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse()
        .map_err(|_| SatimError::Config(format!("{key} must be a number of seconds, got {raw:?}")))
}
