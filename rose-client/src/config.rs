//! Client connection settings.

use serde::{Deserialize, Serialize};

use crate::error::{TransportError, TransportResult};

/// Environment variable overriding [`ClientConfig::base_url`].
pub const BASE_URL_VAR: &str = "ROSE_BASE_URL";
/// Environment variable overriding [`ClientConfig::timeout_secs`].
pub const TIMEOUT_VAR: &str = "ROSE_TIMEOUT_SECS";

/// Connection settings for [`HttpTransport`](crate::HttpTransport).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Server root including any API prefix (e.g. `http://host:4053/rose`).
    pub base_url: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4053".to_string(),
            timeout_secs: 30,
            user_agent: concat!("rose-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by `ROSE_BASE_URL` and `ROSE_TIMEOUT_SECS`.
    pub fn from_env() -> TransportResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> TransportResult<Self> {
        let mut config = Self::default();
        if let Some(url) = lookup(BASE_URL_VAR) {
            config.base_url = url;
        }
        if let Some(secs) = lookup(TIMEOUT_VAR) {
            config.timeout_secs = secs
                .trim()
                .parse()
                .map_err(|_| TransportError::Config(format!("{TIMEOUT_VAR}={secs}")))?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> TransportResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(TransportError::Config(format!(
                "base_url must be an http(s) URL: {}",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(TransportError::Config("timeout_secs must be positive".into()));
        }
        Ok(())
    }
}
