//! Auth configuration types
//!
//! These types represent the runtime auth configuration after it has been
//! resolved from a config file or the environment.

use chrono::{DateTime, Utc};

/// Default IBM Cloud IAM endpoint
pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com";

/// Grant type used to exchange an API key for an IAM access token
pub const IAM_APIKEY_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Authentication configuration
#[derive(Debug, Clone, Default)]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// Bearer token authentication with a caller-managed token
    Bearer {
        /// The bearer token
        token: String,
    },

    /// HTTP Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },

    /// IBM Cloud IAM: API key exchanged for a short-lived access token
    Iam {
        /// IBM Cloud API key
        apikey: String,
        /// IAM base URL (token endpoint is `{url}/identity/token`)
        url: String,
        /// Optional IAM client id (sent as basic auth on the token request)
        client_id: Option<String>,
        /// Optional IAM client secret
        client_secret: Option<String>,
        /// Optional space separated scope
        scope: Option<String>,
    },
}

impl AuthConfig {
    /// IAM config against the public IAM endpoint
    pub fn iam(apikey: impl Into<String>) -> Self {
        Self::Iam {
            apikey: apikey.into(),
            url: DEFAULT_IAM_URL.to_string(),
            client_id: None,
            client_secret: None,
            scope: None,
        }
    }

    /// Bearer token config
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Short name of the auth scheme, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::None => "noauth",
            Self::Bearer { .. } => "bearer_token",
            Self::Basic { .. } => "basic",
            Self::Iam { .. } => "iam",
        }
    }
}

/// Cached token with expiration
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// The access token
    pub token: String,
    /// When the token expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    /// Create a new cached token
    pub fn new(token: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self { token, expires_at }
    }

    /// Create a token that expires in N seconds from now
    pub fn expires_in(token: String, seconds: i64) -> Self {
        let expires_at = Utc::now() + chrono::Duration::seconds(seconds);
        Self {
            token,
            expires_at: Some(expires_at),
        }
    }

    /// Check if the token is expired (with 30 second buffer)
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let buffer = chrono::Duration::seconds(30);
                Utc::now() + buffer >= expires_at
            }
            None => false, // No expiration = never expires
        }
    }
}
