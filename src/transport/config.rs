//! Transport configuration.

use serde::{Deserialize, Serialize};
use url::Url;

use super::Service;
use crate::error::ConfigError;
use crate::user_agent;

const DEFAULT_API_BASE_URL: &str = "https://openlibrary.org";
const DEFAULT_COVERS_BASE_URL: &str = "https://covers.openlibrary.org";
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 4;
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const MIN_TIMEOUT_SECS: u64 = 1;
const MAX_TIMEOUT_SECS: u64 = 3600;

/// Settings for [`ReqwestTransport`](super::ReqwestTransport).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub covers_base_url: String,
    pub connect_timeout_secs: u64,
    /// Whole-request timeout
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            covers_base_url: DEFAULT_COVERS_BASE_URL.to_string(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: user_agent::default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// Base URL serving `service`.
    #[must_use]
    pub fn base_url(&self, service: Service) -> &str {
        match service {
            Service::Api => &self.api_base_url,
            Service::Covers => &self.covers_base_url,
        }
    }

    /// Checks URLs and timeout ranges.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_base_url("api_base_url", &self.api_base_url)?;
        validate_base_url("covers_base_url", &self.covers_base_url)?;
        validate_timeout("connect_timeout_secs", self.connect_timeout_secs)?;
        validate_timeout("timeout_secs", self.timeout_secs)?;
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::EmptyUserAgent);
        }
        Ok(())
    }
}

fn validate_base_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    let parsed = Url::parse(value).map_err(|e| ConfigError::InvalidUrl {
        field,
        value: value.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl {
            field,
            value: value.to_string(),
            reason: "scheme must be http or https".to_string(),
        });
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(ConfigError::InvalidUrl {
            field,
            value: value.to_string(),
            reason: "base URL must not carry a query or fragment".to_string(),
        });
    }
    Ok(())
}

fn validate_timeout(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if (MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidTimeout {
            field,
            value,
            min: MIN_TIMEOUT_SECS,
            max: MAX_TIMEOUT_SECS,
        })
    }
}
