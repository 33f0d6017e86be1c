//! CIS zone settings
//!
//! Read and change per-zone settings (`min_tls_version`, `ssl`, `always_use_https`, ...)
//! of a Cloud Internet Services instance. Responses come wrapped in the CIS
//! envelope `{ success, errors, messages, result }`.

use crate::config::ServiceConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::services::common::{endpoint, require, sdk_request};
use crate::types::JsonValue;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

/// Public CIS endpoint
pub const DEFAULT_SERVICE_URL: &str = "https://api.cis.cloud.ibm.com";

/// Name used for configuration lookup and SDK analytics
pub const SERVICE_NAME: &str = "zones_settings";

/// Current value of one zone setting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneSetting {
    pub id: String,
    pub value: JsonValue,
    #[serde(default)]
    pub editable: Option<bool>,
    #[serde(default)]
    pub modified_on: Option<String>,
}

/// Error or message entry of the CIS envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub code: Option<i64>,
    pub message: String,
}

/// CIS response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<ApiMessage>,
    #[serde(default)]
    pub messages: Vec<ApiMessage>,
    pub result: Option<T>,
}

impl<T> Envelope<T> {
    /// Unwrap `result`. `status` is the HTTP status the envelope arrived with
    /// and is kept on [`Error::Unsuccessful`] when `success` is false.
    pub fn into_result(self, status: u16) -> Result<T> {
        if !self.success {
            let message = self
                .errors
                .iter()
                .map(|e| match e.code {
                    Some(code) => format!("{code}: {}", e.message),
                    None => e.message.clone(),
                })
                .collect::<Vec<_>>()
                .join("; ");
            return Err(Error::Unsuccessful { status, message });
        }
        self.result
            .ok_or_else(|| Error::decode("CIS response has no result"))
    }
}

/// Client for the settings of one CIS zone
#[derive(Debug)]
pub struct ZonesSettings {
    client: HttpClient,
    service_url: String,
    crn: String,
    zone_identifier: String,
}

impl ZonesSettings {
    /// Client for zone `zone_identifier` of the CIS instance `crn`
    pub fn new(
        client: HttpClient,
        service_url: impl Into<String>,
        crn: impl Into<String>,
        zone_identifier: impl Into<String>,
    ) -> Result<Self> {
        let crn = crn.into();
        let zone_identifier = zone_identifier.into();
        require("crn", &crn)?;
        require("zone_identifier", &zone_identifier)?;
        Ok(Self {
            client,
            service_url: service_url.into(),
            crn,
            zone_identifier,
        })
    }

    /// Create a client from a service configuration, defaulting the endpoint
    /// to [`DEFAULT_SERVICE_URL`]
    pub fn from_config(
        config: &ServiceConfig,
        crn: impl Into<String>,
        zone_identifier: impl Into<String>,
    ) -> Result<Self> {
        Self::new(
            config.build_client()?,
            config.service_url_or(DEFAULT_SERVICE_URL),
            crn,
            zone_identifier,
        )
    }

    /// Create a client from `ZONES_SETTINGS_*` environment variables
    pub fn from_env(crn: impl Into<String>, zone_identifier: impl Into<String>) -> Result<Self> {
        Self::from_config(&ServiceConfig::from_env(SERVICE_NAME)?, crn, zone_identifier)
    }

    /// Endpoint this client sends requests to
    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    fn setting_url(&self, setting_id: &str) -> Result<String> {
        endpoint(
            &self.service_url,
            &[
                "v1",
                &self.crn,
                "zones",
                &self.zone_identifier,
                "settings",
                require("setting_id", setting_id)?,
            ],
        )
    }

    async fn send(&self, method: Method, url: &str, config: RequestConfig) -> Result<ZoneSetting> {
        let response = self.client.request(method, url, config).await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(Error::Http)?;
        let envelope: Envelope<ZoneSetting> =
            serde_json::from_slice(&bytes).map_err(|e| Error::decode(e.to_string()))?;
        envelope.into_result(status)
    }

    /// Read one setting
    pub async fn get_zone_setting(&self, setting_id: &str) -> Result<ZoneSetting> {
        let url = self.setting_url(setting_id)?;
        debug!(setting_id, "reading zone setting");
        self.send(Method::GET, &url, sdk_request(SERVICE_NAME, "getZoneSetting"))
            .await
    }

    /// Change one setting to `value`
    pub async fn update_zone_setting(
        &self,
        setting_id: &str,
        value: impl Into<JsonValue>,
    ) -> Result<ZoneSetting> {
        let url = self.setting_url(setting_id)?;
        let config =
            sdk_request(SERVICE_NAME, "updateZoneSetting").json(json!({ "value": value.into() }));
        self.send(Method::PATCH, &url, config).await
    }
}
