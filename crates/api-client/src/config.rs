//! Configuration for the watermark API client
//!
//! Precedence: environment variables, then the config file's `[api]` table,
//! then per-environment defaults.

use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use watermark_core::config::ApiConfig;

/// Base URL used for local development (the backend's default dev server)
const DEFAULT_DEV_URL: &str = "http://localhost:8000";

/// Environment variable holding the base API URL
pub const API_URL_VAR: &str = "WATERMARK_API_URL";

/// Environment variable holding the request timeout in seconds
pub const TIMEOUT_VAR: &str = "WATERMARK_TIMEOUT_SECS";

/// Environment variable selecting the environment
pub const ENV_VAR: &str = "WATERMARK_ENV";

/// Environment types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local backend
    #[default]
    Development,
    /// Deployed backend; the URL must be configured
    Production,
}

impl Environment {
    /// Parse from environment variable
    pub fn from_env() -> Self {
        match env::var(ENV_VAR)
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the watermark backend
    pub base_url: String,
    /// Request timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// Current environment
    pub environment: Environment,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::development()
    }
}

impl ClientConfig {
    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `WATERMARK_API_URL`: base URL of the backend
    /// - `WATERMARK_TIMEOUT_SECS`: request timeout in seconds
    /// - `WATERMARK_ENV`: environment (development/production)
    pub fn from_env() -> ApiResult<Self> {
        Self::from_sources(&ApiConfig::default())
    }

    /// Layer environment variables over file settings over defaults
    pub fn from_sources(file: &ApiConfig) -> ApiResult<Self> {
        Self::from_sources_with(file, None)
    }

    /// Like [`from_sources`](Self::from_sources), with a base URL that wins
    /// over every other source (a command-line flag).
    pub fn from_sources_with(file: &ApiConfig, url_override: Option<&str>) -> ApiResult<Self> {
        let env_timeout = env::var(TIMEOUT_VAR).ok().and_then(|s| s.parse().ok());
        Self::layered(
            Environment::from_env(),
            url_override
                .map(str::to_owned)
                .or_else(|| env::var(API_URL_VAR).ok()),
            env_timeout,
            file,
        )
    }

    /// Resolve already-read sources: `url` and `timeout_secs` beat the file.
    fn layered(
        environment: Environment,
        url: Option<String>,
        timeout_secs: Option<u64>,
        file: &ApiConfig,
    ) -> ApiResult<Self> {
        let base_url = match (url.or_else(|| file.url.clone()), environment) {
            (Some(url), _) => url,
            (None, Environment::Development) => DEFAULT_DEV_URL.to_string(),
            (None, Environment::Production) => return Err(ApiError::missing_env(API_URL_VAR)),
        };

        let timeout = timeout_secs
            .or(file.timeout_secs)
            .map_or(Duration::from_secs(30), Duration::from_secs);

        let config = Self {
            base_url,
            timeout,
            environment,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create development configuration (local backend)
    #[must_use]
    pub fn development() -> Self {
        Self {
            base_url: DEFAULT_DEV_URL.to_string(),
            timeout: Duration::from_secs(30),
            environment: Environment::Development,
        }
    }

    /// Create production configuration for a deployed backend
    #[must_use]
    pub fn production(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(60),
            environment: Environment::Production,
        }
    }

    /// Builder-style method to set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Absolute URL for an endpoint path
    #[must_use]
    pub fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.base_url.is_empty() {
            return Err(ApiError::config("base_url cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ApiError::InvalidUrl(format!(
                "{} (must start with http:// or https://)",
                self.base_url
            )));
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        Ok(())
    }
}
