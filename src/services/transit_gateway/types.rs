//! Transit Gateway request and response models

use crate::pagination::{Page, PageRequest};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Shared references
// ============================================================================

/// Link to the first page of a collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationFirst {
    pub href: String,
}

/// Link to the next page of a collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationNext {
    #[serde(default)]
    pub href: Option<String>,
    /// Cursor to pass as `start` on the next request
    #[serde(default)]
    pub start: Option<String>,
}

/// Resource group a gateway belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceGroupReference {
    pub id: String,
    #[serde(default)]
    pub href: Option<String>,
}

/// Resource group selector on create
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceGroupIdentity {
    pub id: String,
}

/// Gateway a connection is attached to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitGatewayReference {
    pub id: String,
    pub crn: String,
    pub name: String,
}

/// Availability zone of a GRE tunnel connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneReference {
    pub name: String,
}

fn page_from<T>(
    items: Vec<T>,
    limit: u64,
    total_count: Option<u64>,
    next: Option<PaginationNext>,
) -> Page<T> {
    let mut page = Page::last(items).limit(limit);
    page.total_count = total_count;
    page.next_cursor = next.and_then(|n| n.start).filter(|s| !s.is_empty());
    page
}

// ============================================================================
// Transit gateways
// ============================================================================

/// A transit gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitGateway {
    pub id: String,
    pub crn: String,
    pub name: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
    /// Whether the gateway routes across regions
    pub global: bool,
    #[serde(default)]
    pub resource_group: Option<ResourceGroupReference>,
    pub status: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One page of `GET /transit_gateways`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitGatewayCollection {
    #[serde(default)]
    pub first: Option<PaginationFirst>,
    pub limit: u64,
    #[serde(default)]
    pub next: Option<PaginationNext>,
    /// Informational; paging ends only when `next` is absent
    #[serde(default)]
    pub total_count: Option<u64>,
    pub transit_gateways: Vec<TransitGateway>,
}

impl TransitGatewayCollection {
    /// Pagination view of this response
    pub fn into_page(self) -> Page<TransitGateway> {
        page_from(self.transit_gateways, self.limit, self.total_count, self.next)
    }
}

/// Parameters of `list_transit_gateways`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTransitGatewaysParams {
    /// Page size (1-50)
    pub limit: Option<u32>,
    /// Cursor from a previous page
    pub start: Option<String>,
}

impl PageRequest for ListTransitGatewaysParams {
    fn cursor_field(&self) -> &str {
        "start"
    }

    fn set_cursor(&mut self, cursor: String) {
        self.start = Some(cursor);
    }
}

/// Body of `create_transit_gateway`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTransitGatewayParams {
    pub location: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<ResourceGroupIdentity>,
}

impl CreateTransitGatewayParams {
    /// Local gateway in `location`
    pub fn new(location: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            name: name.into(),
            global: None,
            resource_group: None,
        }
    }
}

/// Body of `update_transit_gateway`; unset fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTransitGatewayParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global: Option<bool>,
}

// ============================================================================
// Account-wide connections
// ============================================================================

/// A connection as seen from `GET /connections`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitConnection {
    pub id: String,
    pub name: String,
    pub network_type: String,
    #[serde(default)]
    pub network_id: Option<String>,
    #[serde(default)]
    pub network_account_id: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    pub transit_gateway: TransitGatewayReference,
}

/// One page of `GET /connections`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitConnectionCollection {
    pub connections: Vec<TransitConnection>,
    #[serde(default)]
    pub first: Option<PaginationFirst>,
    pub limit: u64,
    #[serde(default)]
    pub next: Option<PaginationNext>,
    /// Informational; paging ends only when `next` is absent
    #[serde(default)]
    pub total_count: Option<u64>,
}

impl TransitConnectionCollection {
    /// Pagination view of this response
    pub fn into_page(self) -> Page<TransitConnection> {
        page_from(self.connections, self.limit, self.total_count, self.next)
    }
}

/// Parameters of `list_connections`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListConnectionsParams {
    pub limit: Option<u32>,
    pub start: Option<String>,
    /// Only connections to this network (VPC CRN, classic account, ...)
    pub network_id: Option<String>,
}

impl PageRequest for ListConnectionsParams {
    fn cursor_field(&self) -> &str {
        "start"
    }

    fn set_cursor(&mut self, cursor: String) {
        self.start = Some(cursor);
    }
}

// ============================================================================
// Connections of one gateway
// ============================================================================

/// A connection attached to a transit gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitGatewayConnection {
    pub id: String,
    pub name: String,
    pub network_type: String,
    #[serde(default)]
    pub network_id: Option<String>,
    #[serde(default)]
    pub network_account_id: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub zone: Option<ZoneReference>,
    #[serde(default)]
    pub prefix_filters_default: Option<String>,
}

/// One page of `GET /transit_gateways/{id}/connections`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitGatewayConnectionCollection {
    pub connections: Vec<TransitGatewayConnection>,
    #[serde(default)]
    pub first: Option<PaginationFirst>,
    pub limit: u64,
    #[serde(default)]
    pub next: Option<PaginationNext>,
    /// Informational; paging ends only when `next` is absent
    #[serde(default)]
    pub total_count: Option<u64>,
}

impl TransitGatewayConnectionCollection {
    /// Pagination view of this response
    pub fn into_page(self) -> Page<TransitGatewayConnection> {
        page_from(self.connections, self.limit, self.total_count, self.next)
    }
}

/// Parameters of `list_transit_gateway_connections`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTransitGatewayConnectionsParams {
    pub transit_gateway_id: String,
    pub limit: Option<u32>,
    pub start: Option<String>,
    /// Only connections with this name
    pub name: Option<String>,
}

impl ListTransitGatewayConnectionsParams {
    /// Parameters for listing the connections of one gateway
    pub fn new(transit_gateway_id: impl Into<String>) -> Self {
        Self {
            transit_gateway_id: transit_gateway_id.into(),
            ..Default::default()
        }
    }
}

impl PageRequest for ListTransitGatewayConnectionsParams {
    fn cursor_field(&self) -> &str {
        "start"
    }

    fn set_cursor(&mut self, cursor: String) {
        self.start = Some(cursor);
    }
}

/// Body of `create_transit_gateway_connection`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTransitGatewayConnectionParams {
    /// `vpc`, `classic`, `directlink`, `gre_tunnel`, ...
    pub network_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_account_id: Option<String>,
}

// ============================================================================
// Locations
// ============================================================================

/// A location where gateways can be created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayLocation {
    pub name: String,
    pub billing_location: String,
    #[serde(rename = "type")]
    pub location_type: String,
}

/// Response of `GET /locations`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayLocationCollection {
    pub locations: Vec<GatewayLocation>,
}
