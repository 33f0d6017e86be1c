//! Service configuration
//!
//! A [`ServiceConfig`] describes how to reach one IBM Cloud service: its
//! endpoint, credentials, and transport tuning. It can be loaded from YAML
//! or from environment variables following the IBM SDK naming scheme:
//!
//! ```text
//! TRANSIT_GATEWAY_APIS_URL=https://transit.cloud.ibm.com/v1
//! TRANSIT_GATEWAY_APIS_AUTH_TYPE=iam
//! TRANSIT_GATEWAY_APIS_APIKEY=...
//! ```

use crate::auth::{AuthConfig, DEFAULT_IAM_URL};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RateLimiterConfig};
use crate::types::{AuthType, BackoffType, OptionStringExt, StringMap};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

// ============================================================================
// Top-Level Service Config
// ============================================================================

/// Configuration for one service client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Endpoint override; each service has its own default
    #[serde(default)]
    pub service_url: Option<String>,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfigDef,

    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpConfig,

    /// Optional client-side rate limit
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,

    /// Headers sent with every request
    #[serde(default)]
    pub headers: StringMap,
}

impl ServiceConfig {
    /// Config with no authentication against `service_url` (mock servers, tests)
    pub fn unauthenticated(service_url: impl Into<String>) -> Self {
        Self {
            service_url: Some(service_url.into()),
            auth: AuthConfigDef {
                auth_type: AuthType::NoAuth,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Load from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.auth.to_auth_config()?;
        Ok(config)
    }

    /// Load from the process environment for `service_name`
    pub fn from_env(service_name: &str) -> Result<Self> {
        Self::from_lookup(service_name, |key| std::env::var(key).ok())
    }

    /// Load from an arbitrary variable source, using the environment naming
    /// scheme (`{SERVICE}_URL`, `{SERVICE}_AUTH_TYPE`, `{SERVICE}_APIKEY`, ...)
    pub fn from_lookup<F>(service_name: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let prefix = env_prefix(service_name);
        let var = |suffix: &str| lookup(&format!("{prefix}_{suffix}")).none_if_empty();

        let apikey = var("APIKEY");
        let bearer_token = var("BEARER_TOKEN");
        let username = var("USERNAME");

        let auth_type = match var("AUTH_TYPE") {
            Some(value) => value.parse()?,
            None if apikey.is_some() => AuthType::Iam,
            None if bearer_token.is_some() => AuthType::BearerToken,
            None if username.is_some() => AuthType::Basic,
            None => return Err(Error::missing_field(format!("{prefix}_AUTH_TYPE"))),
        };
        debug!("Loaded {} configuration from environment ({:?})", prefix, auth_type);

        let config = Self {
            service_url: var("URL"),
            auth: AuthConfigDef {
                auth_type,
                apikey,
                url: var("AUTH_URL"),
                client_id: var("CLIENT_ID"),
                client_secret: var("CLIENT_SECRET"),
                scope: var("SCOPE"),
                bearer_token,
                username,
                password: var("PASSWORD"),
            },
            ..Default::default()
        };
        config.auth.to_auth_config()?;
        Ok(config)
    }

    /// The configured endpoint, or `default` when none is set
    pub fn service_url_or(&self, default: &str) -> String {
        self.service_url
            .clone()
            .unwrap_or_else(|| default.to_string())
    }

    /// Transport settings for [`HttpClient`]
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.http.timeout_secs))
            .max_retries(self.http.max_retries)
            .backoff(
                self.http.backoff,
                Duration::from_millis(self.http.initial_backoff_ms),
                Duration::from_millis(self.http.max_backoff_ms),
            );
        if let Some(rate_limit) = &self.rate_limit {
            builder = builder.rate_limit(rate_limit.clone());
        }
        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }
        builder.build()
    }

    /// Build an authenticated HTTP client
    pub fn build_client(&self) -> Result<HttpClient> {
        HttpClient::with_auth(self.http_client_config(), self.auth.to_auth_config()?)
    }
}

/// `transit-gateway-apis` -> `TRANSIT_GATEWAY_APIS`
fn env_prefix(service_name: &str) -> String {
    service_name.to_ascii_uppercase().replace(['-', '.', ' '], "_")
}

// ============================================================================
// Auth Config
// ============================================================================

/// Authentication section of a service config
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthConfigDef {
    /// Authentication scheme
    #[serde(rename = "type", default)]
    pub auth_type: AuthType,

    /// IAM API key
    #[serde(default)]
    pub apikey: Option<String>,

    /// IAM endpoint override
    #[serde(default)]
    pub url: Option<String>,

    /// IAM client id
    #[serde(default)]
    pub client_id: Option<String>,

    /// IAM client secret
    #[serde(default)]
    pub client_secret: Option<String>,

    /// IAM scope
    #[serde(default)]
    pub scope: Option<String>,

    /// Token for `bearer_token` auth
    #[serde(default)]
    pub bearer_token: Option<String>,

    /// Username for `basic` auth
    #[serde(default)]
    pub username: Option<String>,

    /// Password for `basic` auth
    #[serde(default)]
    pub password: Option<String>,
}

impl AuthConfigDef {
    /// Resolve into the runtime auth configuration
    pub fn to_auth_config(&self) -> Result<AuthConfig> {
        match self.auth_type {
            AuthType::NoAuth => Ok(AuthConfig::None),
            AuthType::BearerToken => Ok(AuthConfig::Bearer {
                token: required(&self.bearer_token, "bearer_token")?,
            }),
            AuthType::Basic => Ok(AuthConfig::Basic {
                username: required(&self.username, "username")?,
                password: required(&self.password, "password")?,
            }),
            AuthType::Iam => Ok(AuthConfig::Iam {
                apikey: required(&self.apikey, "apikey")?,
                url: self
                    .url
                    .clone()
                    .unwrap_or_else(|| DEFAULT_IAM_URL.to_string()),
                client_id: self.client_id.clone(),
                client_secret: self.client_secret.clone(),
                scope: self.scope.clone(),
            }),
        }
    }
}

fn required(value: &Option<String>, field: &str) -> Result<String> {
    value
        .clone()
        .none_if_empty()
        .ok_or_else(|| Error::missing_field(field))
}

// ============================================================================
// HTTP Config
// ============================================================================

/// Transport tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum retries for retryable failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// First retry delay in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Upper bound on retry delay in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,

    /// Backoff growth
    #[serde(default)]
    pub backoff: BackoffType,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            backoff: BackoffType::default(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    4
}

fn default_initial_backoff_ms() -> u64 {
    1000
}

fn default_max_backoff_ms() -> u64 {
    30_000
}
