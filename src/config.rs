//! Client configuration
//!
//! A [`ClientConfig`] can be loaded from YAML:
//!
//! ```yaml
//! public_key: "..."
//! private_key: "..."
//! environment: test
//! timeout_secs: 30
//! max_retries: 3
//! requests_per_second: 5
//! retry_backoff:
//!   type: exponential
//!   initial_ms: 200
//! ```
//!
//! or from `PLAZA_*` environment variables, see [`ClientConfig::from_env`].

use crate::auth::Credentials;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const ENV_PUBLIC_KEY: &str = "PLAZA_PUBLIC_KEY";
pub const ENV_PRIVATE_KEY: &str = "PLAZA_PRIVATE_KEY";
pub const ENV_TEST: &str = "PLAZA_TEST";
pub const ENV_BASE_URL: &str = "PLAZA_BASE_URL";

// ============================================================================
// Environment
// ============================================================================

/// Which Plaza deployment to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    #[default]
    Production,
    Test,
}

impl Environment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Production => "https://plazaapi.bol.com",
            Environment::Test => "https://test-plazaapi.bol.com",
        }
    }
}

// ============================================================================
// Client Config
// ============================================================================

/// Everything needed to build a [`crate::api::PlazaApi`]
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub public_key: String,

    #[serde(skip_serializing)]
    pub private_key: String,

    #[serde(default)]
    pub environment: Environment,

    /// Overrides the environment's URL (mock servers, proxies)
    #[serde(default)]
    pub base_url: Option<String>,

    /// Version segment of resource URIs
    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default)]
    pub retry_backoff: BackoffConfig,

    /// Client-side rate limit; unlimited when absent
    #[serde(default)]
    pub requests_per_second: Option<u32>,

    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_api_version() -> String {
    "v2".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

/// Backoff configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Type of backoff
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Exponential,
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

fn default_initial_ms() -> u64 {
    100
}

fn default_max_ms() -> u64 {
    60000
}

impl ClientConfig {
    /// Production config with defaults for everything but the keys
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into(),
            environment: Environment::default(),
            base_url: None,
            api_version: default_api_version(),
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            retry_backoff: BackoffConfig::default(),
            requests_per_second: None,
            user_agent: None,
        }
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: ClientConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read the configuration from `PLAZA_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from any variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let public_key =
            lookup(ENV_PUBLIC_KEY).ok_or_else(|| Error::missing_field(ENV_PUBLIC_KEY))?;
        let private_key =
            lookup(ENV_PRIVATE_KEY).ok_or_else(|| Error::missing_field(ENV_PRIVATE_KEY))?;

        let mut config = Self::new(public_key, private_key);
        if let Some(flag) = lookup(ENV_TEST) {
            if parse_flag(ENV_TEST, &flag)? {
                config.environment = Environment::Test;
            }
        }
        config.base_url = lookup(ENV_BASE_URL).filter(|url| !url.is_empty());

        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Check that the configuration can be used to sign requests
    pub fn validate(&self) -> Result<()> {
        if self.public_key.trim().is_empty() {
            return Err(Error::InvalidConfigValue {
                field: "public_key".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.private_key.trim().is_empty() {
            return Err(Error::InvalidConfigValue {
                field: "private_key".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.api_version.trim().is_empty() {
            return Err(Error::InvalidConfigValue {
                field: "api_version".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if let Some(url) = &self.base_url {
            url::Url::parse(url).map_err(|e| Error::InvalidConfigValue {
                field: "base_url".to_string(),
                message: e.to_string(),
            })?;
        }
        Ok(())
    }

    /// Base URL requests are sent to
    pub fn resolved_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.environment.base_url())
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.public_key, &self.private_key)
    }

    /// Transport settings derived from this configuration
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(self.resolved_base_url())
            .timeout(Duration::from_secs(self.timeout_secs))
            .max_retries(self.max_retries)
            .backoff(
                self.retry_backoff.backoff_type,
                Duration::from_millis(self.retry_backoff.initial_ms),
                Duration::from_millis(self.retry_backoff.max_ms),
            );

        builder = match self.requests_per_second {
            Some(rps) => builder.rate_limit(RateLimiterConfig::per_second(rps)),
            None => builder.no_rate_limit(),
        };
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        builder.build()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("requests_per_second", &self.requests_per_second)
            .finish_non_exhaustive()
    }
}

/// Load a configuration file
pub fn load_config(path: impl AsRef<Path>) -> Result<ClientConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;
    ClientConfig::from_yaml_str(&content)
}

fn parse_flag(field: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::InvalidConfigValue {
            field: field.to_string(),
            message: format!("expected a boolean, got '{other}'"),
        }),
    }
}
