//! Transit Gateway API client

use super::types::{
    CreateTransitGatewayConnectionParams, CreateTransitGatewayParams, GatewayLocationCollection,
    ListConnectionsParams, ListTransitGatewayConnectionsParams, ListTransitGatewaysParams,
    TransitConnectionCollection, TransitGateway, TransitGatewayConnection,
    TransitGatewayConnectionCollection, TransitGatewayCollection, UpdateTransitGatewayParams,
};
use crate::config::ServiceConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::services::common::{endpoint, require, sdk_request};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Method;
use tracing::debug;

/// Public Transit Gateway endpoint
pub const DEFAULT_SERVICE_URL: &str = "https://transit.cloud.ibm.com/v1";

/// Name used for configuration lookup and SDK analytics
pub const SERVICE_NAME: &str = "transit_gateway_apis";

/// API version date sent when none is chosen
pub const DEFAULT_VERSION: &str = "2021-05-01";

static VERSION_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid version regex"));

/// Client for the Transit Gateway API
#[derive(Debug)]
pub struct TransitGatewayApis {
    client: HttpClient,
    service_url: String,
    version: String,
}

impl TransitGatewayApis {
    /// Create a client. `version` is the API version date (`YYYY-MM-DD`).
    pub fn new(
        client: HttpClient,
        service_url: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self> {
        let version = version.into();
        if !VERSION_DATE.is_match(&version) {
            return Err(Error::invalid_param(
                "version",
                format!("expected a YYYY-MM-DD date, got '{version}'"),
            ));
        }
        Ok(Self {
            client,
            service_url: service_url.into(),
            version,
        })
    }

    /// Create a client from a service configuration
    pub fn from_config(config: &ServiceConfig, version: impl Into<String>) -> Result<Self> {
        Self::new(
            config.build_client()?,
            config.service_url_or(DEFAULT_SERVICE_URL),
            version,
        )
    }

    /// Create a client from `TRANSIT_GATEWAY_APIS_*` environment variables
    pub fn from_env(version: impl Into<String>) -> Result<Self> {
        Self::from_config(&ServiceConfig::from_env(SERVICE_NAME)?, version)
    }

    /// Endpoint this client talks to
    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    /// API version date
    pub fn version(&self) -> &str {
        &self.version
    }

    fn request(&self, operation_id: &str) -> RequestConfig {
        sdk_request(SERVICE_NAME, operation_id).query("version", self.version.as_str())
    }

    fn url(&self, segments: &[&str]) -> Result<String> {
        endpoint(&self.service_url, segments)
    }

    // ========================================================================
    // Transit gateways
    // ========================================================================

    /// List transit gateways in the account, one page per call
    pub async fn list_transit_gateways(
        &self,
        params: &ListTransitGatewaysParams,
    ) -> Result<TransitGatewayCollection> {
        let config = self
            .request("listTransitGateways")
            .query_opt("limit", params.limit)
            .query_opt("start", params.start.as_deref());
        debug!(start = ?params.start, "listing transit gateways");
        self.client
            .request_json(Method::GET, &self.url(&["transit_gateways"])?, config)
            .await
    }

    /// Retrieve one transit gateway
    pub async fn get_transit_gateway(&self, id: &str) -> Result<TransitGateway> {
        let id = require("id", id)?;
        self.client
            .request_json(
                Method::GET,
                &self.url(&["transit_gateways", id])?,
                self.request("getTransitGateway"),
            )
            .await
    }

    /// Create a transit gateway
    pub async fn create_transit_gateway(
        &self,
        params: &CreateTransitGatewayParams,
    ) -> Result<TransitGateway> {
        require("location", &params.location)?;
        require("name", &params.name)?;
        let config = self
            .request("createTransitGateway")
            .json(serde_json::to_value(params)?);
        self.client
            .request_json(Method::POST, &self.url(&["transit_gateways"])?, config)
            .await
    }

    /// Rename a gateway or change its routing scope
    pub async fn update_transit_gateway(
        &self,
        id: &str,
        params: &UpdateTransitGatewayParams,
    ) -> Result<TransitGateway> {
        let id = require("id", id)?;
        let config = self
            .request("updateTransitGateway")
            .json(serde_json::to_value(params)?);
        self.client
            .request_json(Method::PATCH, &self.url(&["transit_gateways", id])?, config)
            .await
    }

    /// Delete a transit gateway
    pub async fn delete_transit_gateway(&self, id: &str) -> Result<()> {
        let id = require("id", id)?;
        self.client
            .request_empty(
                Method::DELETE,
                &self.url(&["transit_gateways", id])?,
                self.request("deleteTransitGateway"),
            )
            .await
    }

    // ========================================================================
    // Connections
    // ========================================================================

    /// List connections across every gateway in the account
    pub async fn list_connections(
        &self,
        params: &ListConnectionsParams,
    ) -> Result<TransitConnectionCollection> {
        let config = self
            .request("listConnections")
            .query_opt("limit", params.limit)
            .query_opt("start", params.start.as_deref())
            .query_opt("network_id", params.network_id.as_deref());
        debug!(start = ?params.start, "listing connections");
        self.client
            .request_json(Method::GET, &self.url(&["connections"])?, config)
            .await
    }

    /// List the connections of one gateway
    pub async fn list_transit_gateway_connections(
        &self,
        params: &ListTransitGatewayConnectionsParams,
    ) -> Result<TransitGatewayConnectionCollection> {
        let gateway_id = require("transit_gateway_id", &params.transit_gateway_id)?;
        let config = self
            .request("listTransitGatewayConnections")
            .query_opt("limit", params.limit)
            .query_opt("start", params.start.as_deref())
            .query_opt("name", params.name.as_deref());
        debug!(gateway_id, start = ?params.start, "listing gateway connections");
        self.client
            .request_json(
                Method::GET,
                &self.url(&["transit_gateways", gateway_id, "connections"])?,
                config,
            )
            .await
    }

    /// Retrieve one connection of a gateway
    pub async fn get_transit_gateway_connection(
        &self,
        transit_gateway_id: &str,
        id: &str,
    ) -> Result<TransitGatewayConnection> {
        let gateway_id = require("transit_gateway_id", transit_gateway_id)?;
        let id = require("id", id)?;
        self.client
            .request_json(
                Method::GET,
                &self.url(&["transit_gateways", gateway_id, "connections", id])?,
                self.request("getTransitGatewayConnection"),
            )
            .await
    }

    /// Attach a network to a gateway
    pub async fn create_transit_gateway_connection(
        &self,
        transit_gateway_id: &str,
        params: &CreateTransitGatewayConnectionParams,
    ) -> Result<TransitGatewayConnection> {
        let gateway_id = require("transit_gateway_id", transit_gateway_id)?;
        require("network_type", &params.network_type)?;
        let config = self
            .request("createTransitGatewayConnection")
            .json(serde_json::to_value(params)?);
        self.client
            .request_json(
                Method::POST,
                &self.url(&["transit_gateways", gateway_id, "connections"])?,
                config,
            )
            .await
    }

    /// Detach a connection from a gateway
    pub async fn delete_transit_gateway_connection(
        &self,
        transit_gateway_id: &str,
        id: &str,
    ) -> Result<()> {
        let gateway_id = require("transit_gateway_id", transit_gateway_id)?;
        let id = require("id", id)?;
        self.client
            .request_empty(
                Method::DELETE,
                &self.url(&["transit_gateways", gateway_id, "connections", id])?,
                self.request("deleteTransitGatewayConnection"),
            )
            .await
    }

    // ========================================================================
    // Locations
    // ========================================================================

    /// List locations where gateways can be created
    pub async fn list_gateway_locations(&self) -> Result<GatewayLocationCollection> {
        self.client
            .request_json(
                Method::GET,
                &self.url(&["locations"])?,
                self.request("listGatewayLocations"),
            )
            .await
    }
}
