//! DNS Services API client

use super::types::{
    CreateDnszoneParams, CreateResourceRecordParams, Dnszone, ListDnszones, ListDnszonesParams,
    ListResourceRecords, ListResourceRecordsParams, ResourceRecord,
};
use crate::config::ServiceConfig;
use crate::error::Result;
use crate::http::HttpClient;
use crate::services::common::{endpoint, require, sdk_request};
use reqwest::Method;
use tracing::debug;

/// Public DNS Services endpoint
pub const DEFAULT_SERVICE_URL: &str = "https://api.dns-svcs.cloud.ibm.com/v1";

/// Name used for configuration lookup and SDK analytics
pub const SERVICE_NAME: &str = "dns_svcs";

/// Client for DNS Services
#[derive(Debug)]
pub struct DnsSvcs {
    client: HttpClient,
    service_url: String,
}

impl DnsSvcs {
    pub fn new(client: HttpClient, service_url: impl Into<String>) -> Self {
        Self {
            client,
            service_url: service_url.into(),
        }
    }

    /// Create a client from a service configuration
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        Ok(Self::new(
            config.build_client()?,
            config.service_url_or(DEFAULT_SERVICE_URL),
        ))
    }

    /// Create a client from `DNS_SVCS_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_config(&ServiceConfig::from_env(SERVICE_NAME)?)
    }

    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    fn url(&self, segments: &[&str]) -> Result<String> {
        endpoint(&self.service_url, segments)
    }

    // ========================================================================
    // Zones
    // ========================================================================

    /// List the zones of a DNS Services instance, one page per call
    pub async fn list_dnszones(&self, params: &ListDnszonesParams) -> Result<ListDnszones> {
        let instance_id = require("instance_id", &params.instance_id)?;
        let config = sdk_request(SERVICE_NAME, "listDnszones")
            .query_opt("offset", params.offset.as_deref())
            .query_opt("limit", params.limit)
            .query_opt("vpc_id", params.vpc_id.as_deref());
        debug!(instance_id, offset = ?params.offset, "listing DNS zones");
        self.client
            .request_json(
                Method::GET,
                &self.url(&["instances", instance_id, "dnszones"])?,
                config,
            )
            .await
    }

    pub async fn get_dnszone(&self, instance_id: &str, dnszone_id: &str) -> Result<Dnszone> {
        let instance_id = require("instance_id", instance_id)?;
        let dnszone_id = require("dnszone_id", dnszone_id)?;
        self.client
            .request_json(
                Method::GET,
                &self.url(&["instances", instance_id, "dnszones", dnszone_id])?,
                sdk_request(SERVICE_NAME, "getDnszone"),
            )
            .await
    }

    pub async fn create_dnszone(
        &self,
        instance_id: &str,
        params: &CreateDnszoneParams,
    ) -> Result<Dnszone> {
        let instance_id = require("instance_id", instance_id)?;
        require("name", &params.name)?;
        let config = sdk_request(SERVICE_NAME, "createDnszone").json(serde_json::to_value(params)?);
        self.client
            .request_json(
                Method::POST,
                &self.url(&["instances", instance_id, "dnszones"])?,
                config,
            )
            .await
    }

    pub async fn delete_dnszone(&self, instance_id: &str, dnszone_id: &str) -> Result<()> {
        let instance_id = require("instance_id", instance_id)?;
        let dnszone_id = require("dnszone_id", dnszone_id)?;
        self.client
            .request_empty(
                Method::DELETE,
                &self.url(&["instances", instance_id, "dnszones", dnszone_id])?,
                sdk_request(SERVICE_NAME, "deleteDnszone"),
            )
            .await
    }

    // ========================================================================
    // Resource records
    // ========================================================================

    /// List the records of a zone, one page per call
    pub async fn list_resource_records(
        &self,
        params: &ListResourceRecordsParams,
    ) -> Result<ListResourceRecords> {
        let instance_id = require("instance_id", &params.instance_id)?;
        let dnszone_id = require("dnszone_id", &params.dnszone_id)?;
        let config = sdk_request(SERVICE_NAME, "listResourceRecords")
            .query_opt("offset", params.offset.as_deref())
            .query_opt("limit", params.limit)
            .query_opt("type", params.type_.as_deref())
            .query_opt("name", params.name.as_deref());
        debug!(instance_id, dnszone_id, offset = ?params.offset, "listing resource records");
        self.client
            .request_json(
                Method::GET,
                &self.url(&[
                    "instances",
                    instance_id,
                    "dnszones",
                    dnszone_id,
                    "resource_records",
                ])?,
                config,
            )
            .await
    }

    pub async fn get_resource_record(
        &self,
        instance_id: &str,
        dnszone_id: &str,
        record_id: &str,
    ) -> Result<ResourceRecord> {
        let url = self.record_url(instance_id, dnszone_id, record_id)?;
        self.client
            .request_json(
                Method::GET,
                &url,
                sdk_request(SERVICE_NAME, "getResourceRecord"),
            )
            .await
    }

    pub async fn create_resource_record(
        &self,
        instance_id: &str,
        dnszone_id: &str,
        params: &CreateResourceRecordParams,
    ) -> Result<ResourceRecord> {
        let instance_id = require("instance_id", instance_id)?;
        let dnszone_id = require("dnszone_id", dnszone_id)?;
        require("name", &params.name)?;
        require("type", &params.record_type)?;
        let config = sdk_request(SERVICE_NAME, "createResourceRecord")
            .json(serde_json::to_value(params)?);
        self.client
            .request_json(
                Method::POST,
                &self.url(&[
                    "instances",
                    instance_id,
                    "dnszones",
                    dnszone_id,
                    "resource_records",
                ])?,
                config,
            )
            .await
    }

    pub async fn delete_resource_record(
        &self,
        instance_id: &str,
        dnszone_id: &str,
        record_id: &str,
    ) -> Result<()> {
        let url = self.record_url(instance_id, dnszone_id, record_id)?;
        self.client
            .request_empty(
                Method::DELETE,
                &url,
                sdk_request(SERVICE_NAME, "deleteResourceRecord"),
            )
            .await
    }

    fn record_url(&self, instance_id: &str, dnszone_id: &str, record_id: &str) -> Result<String> {
        self.url(&[
            "instances",
            require("instance_id", instance_id)?,
            "dnszones",
            require("dnszone_id", dnszone_id)?,
            "resource_records",
            require("record_id", record_id)?,
        ])
    }
}
