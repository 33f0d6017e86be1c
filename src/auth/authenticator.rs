//! Authenticator implementation
//!
//! Handles applying authentication to requests and managing IAM token refresh.

use super::types::{AuthConfig, CachedToken, IAM_APIKEY_GRANT_TYPE};
use crate::error::{Error, Result};
use base64::Engine as _;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Authenticator handles applying authentication to HTTP requests
pub struct Authenticator {
    /// Auth configuration
    config: AuthConfig,
    /// Cached IAM access token
    cached_token: Arc<RwLock<Option<CachedToken>>>,
    /// HTTP client for token requests
    http_client: Client,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config,
            cached_token: Arc::new(RwLock::new(None)),
            http_client: Client::new(),
        }
    }

    /// Create an authenticator with a custom HTTP client
    pub fn with_client(config: AuthConfig, http_client: Client) -> Self {
        Self {
            config,
            cached_token: Arc::new(RwLock::new(None)),
            http_client,
        }
    }

    /// Check the configuration before any request is made
    pub fn validate(&self) -> Result<()> {
        match &self.config {
            AuthConfig::None => Ok(()),
            AuthConfig::Bearer { token } if token.is_empty() => {
                Err(Error::missing_field("bearer_token"))
            }
            AuthConfig::Basic { username, .. } if username.is_empty() => {
                Err(Error::missing_field("username"))
            }
            AuthConfig::Iam { apikey, .. } if apikey.is_empty() => {
                Err(Error::missing_field("apikey"))
            }
            AuthConfig::Iam {
                client_id,
                client_secret,
                ..
            } if client_id.is_some() != client_secret.is_some() => Err(Error::config(
                "IAM client_id and client_secret must be configured together",
            )),
            _ => Ok(()),
        }
    }

    /// Apply authentication to a request builder
    pub async fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        match &self.config {
            AuthConfig::None => Ok(req),

            AuthConfig::Bearer { token } => Ok(req.bearer_auth(token)),

            AuthConfig::Basic { username, password } => {
                Ok(req.basic_auth(username, Some(password)))
            }

            AuthConfig::Iam { .. } => {
                let token = self.get_or_refresh_token().await?;
                Ok(req.bearer_auth(token))
            }
        }
    }

    /// Get a valid token, refreshing if necessary
    async fn get_or_refresh_token(&self) -> Result<String> {
        // Check if we have a valid cached token
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                if !token.is_expired() {
                    return Ok(token.token.clone());
                }
            }
        }

        // Need to refresh - acquire write lock
        let mut cached = self.cached_token.write().await;

        // Double-check after acquiring write lock (another task might have refreshed)
        if let Some(token) = cached.as_ref() {
            if !token.is_expired() {
                return Ok(token.token.clone());
            }
        }

        let new_token = self.fetch_new_token().await?;
        let token_str = new_token.token.clone();
        *cached = Some(new_token);

        Ok(token_str)
    }

    /// Fetch a new token based on auth type
    async fn fetch_new_token(&self) -> Result<CachedToken> {
        match &self.config {
            AuthConfig::Iam {
                apikey,
                url,
                client_id,
                client_secret,
                scope,
            } => {
                self.fetch_iam_token(
                    apikey,
                    url,
                    client_id.as_deref().zip(client_secret.as_deref()),
                    scope.as_deref(),
                )
                .await
            }
            _ => Err(Error::auth(
                "Token refresh not supported for this auth type",
            )),
        }
    }

    /// Exchange an API key for an IAM access token
    async fn fetch_iam_token(
        &self,
        apikey: &str,
        url: &str,
        client: Option<(&str, &str)>,
        scope: Option<&str>,
    ) -> Result<CachedToken> {
        let token_url = format!("{}/identity/token", url.trim_end_matches('/'));

        let mut form = vec![
            ("grant_type", IAM_APIKEY_GRANT_TYPE),
            ("apikey", apikey),
            ("response_type", "cloud_iam"),
        ];
        if let Some(scope) = scope {
            form.push(("scope", scope));
        }

        let mut req = self
            .http_client
            .post(&token_url)
            .header("Accept", "application/json")
            .form(&form);
        if let Some((id, secret)) = client {
            req = req.basic_auth(id, Some(secret));
        }

        debug!("Requesting IAM access token from {}", token_url);
        let response = req.send().await.map_err(Error::Http)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::TokenRefresh {
                message: format!("IAM token request failed with status {status}: {body}"),
            });
        }

        let token_response: IamTokenResponse = response.json().await.map_err(Error::Http)?;
        let token = token_response.into_cached_token();
        info!(
            "Obtained IAM access token (expires at {})",
            token
                .expires_at
                .map_or_else(|| "unknown".to_string(), |t| t.to_rfc3339())
        );
        Ok(token)
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("kind", &self.config.kind())
            .finish_non_exhaustive()
    }
}

/// IAM token endpoint response
#[derive(Debug, Deserialize)]
struct IamTokenResponse {
    access_token: String,
    /// Lifetime in seconds
    #[serde(default)]
    expires_in: Option<i64>,
    /// Absolute expiry, epoch seconds
    #[serde(default)]
    expiration: Option<i64>,
}

impl IamTokenResponse {
    fn into_cached_token(self) -> CachedToken {
        if let Some(secs) = self.expires_in {
            return CachedToken::expires_in(self.access_token, secs);
        }
        let expires_at = self
            .expiration
            .and_then(|epoch| DateTime::<Utc>::from_timestamp(epoch, 0))
            .or_else(|| jwt_expiry(&self.access_token));
        CachedToken::new(self.access_token, expires_at)
    }
}

#[derive(Debug, Deserialize)]
struct JwtClaims {
    exp: Option<i64>,
}

/// Read the `exp` claim of a JWT without verifying it
pub(crate) fn jwt_expiry(token: &str) -> Option<DateTime<Utc>> {
    let payload = token.split('.').nth(1)?;
    let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    let claims: JwtClaims = serde_json::from_slice(&bytes).ok()?;
    DateTime::<Utc>::from_timestamp(claims.exp?, 0)
}
