//! DNS Services request and response models

use crate::pagination::{cursor_from_href, Page, PageRequest};
use crate::types::JsonValue;
use serde::{Deserialize, Serialize};

/// Link to a page of a collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationRef {
    pub href: String,
}

fn page_from<T>(
    items: Vec<T>,
    limit: u64,
    total_count: u64,
    next: Option<PaginationRef>,
) -> Page<T> {
    let mut page = Page::last(items).limit(limit).total_count(total_count);
    page.next_cursor = next
        .and_then(|n| cursor_from_href(&n.href, "offset"))
        .filter(|s| !s.is_empty());
    page
}

// ============================================================================
// Zones
// ============================================================================

/// A private DNS zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dnszone {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub instance_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// `pending_network_add`, `active`, `deleted`, ...
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub created_on: Option<String>,
    #[serde(default)]
    pub modified_on: Option<String>,
}

/// One page of `GET /instances/{instance_id}/dnszones`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListDnszones {
    pub dnszones: Vec<Dnszone>,
    pub offset: u64,
    pub limit: u64,
    #[serde(default)]
    pub count: u64,
    pub total_count: u64,
    #[serde(default)]
    pub first: Option<PaginationRef>,
    #[serde(default)]
    pub next: Option<PaginationRef>,
}

impl ListDnszones {
    /// Pagination view of this response
    pub fn into_page(self) -> Page<Dnszone> {
        page_from(self.dnszones, self.limit, self.total_count, self.next)
    }
}

/// Parameters of `list_dnszones`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListDnszonesParams {
    pub instance_id: String,
    /// Cursor: index of the first zone to return
    pub offset: Option<String>,
    pub limit: Option<u32>,
    /// Only zones bound to this VPC
    pub vpc_id: Option<String>,
}

impl ListDnszonesParams {
    /// Parameters for listing the zones of one instance
    pub fn new(instance_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            ..Default::default()
        }
    }
}

impl PageRequest for ListDnszonesParams {
    fn cursor_field(&self) -> &str {
        "offset"
    }

    fn set_cursor(&mut self, cursor: String) {
        self.offset = Some(cursor);
    }
}

/// Body of `create_dnszone`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDnszoneParams {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

// ============================================================================
// Resource records
// ============================================================================

/// A record inside a DNS zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub id: String,
    pub name: String,
    /// `A`, `AAAA`, `CNAME`, `MX`, `PTR`, `SRV`, `TXT`
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(default)]
    pub ttl: Option<u32>,
    /// Type-specific payload, e.g. `{"ip": "10.0.0.1"}` for `A`
    #[serde(default)]
    pub rdata: JsonValue,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default)]
    pub created_on: Option<String>,
    #[serde(default)]
    pub modified_on: Option<String>,
}

/// One page of `GET /instances/{instance_id}/dnszones/{dnszone_id}/resource_records`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResourceRecords {
    pub resource_records: Vec<ResourceRecord>,
    pub offset: u64,
    pub limit: u64,
    #[serde(default)]
    pub count: u64,
    pub total_count: u64,
    #[serde(default)]
    pub first: Option<PaginationRef>,
    #[serde(default)]
    pub next: Option<PaginationRef>,
}

impl ListResourceRecords {
    /// Pagination view of this response
    pub fn into_page(self) -> Page<ResourceRecord> {
        page_from(self.resource_records, self.limit, self.total_count, self.next)
    }
}

/// Parameters of `list_resource_records`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListResourceRecordsParams {
    pub instance_id: String,
    pub dnszone_id: String,
    pub offset: Option<String>,
    pub limit: Option<u32>,
    /// Only records of this type
    pub type_: Option<String>,
    /// Only records with this name
    pub name: Option<String>,
}

impl ListResourceRecordsParams {
    /// Parameters for listing the records of one zone
    pub fn new(instance_id: impl Into<String>, dnszone_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            dnszone_id: dnszone_id.into(),
            ..Default::default()
        }
    }
}

impl PageRequest for ListResourceRecordsParams {
    fn cursor_field(&self) -> &str {
        "offset"
    }

    fn set_cursor(&mut self, cursor: String) {
        self.offset = Some(cursor);
    }
}

/// Body of `create_resource_record`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateResourceRecordParams {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub rdata: JsonValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

impl CreateResourceRecordParams {
    /// Record of `record_type` named `name` with the given payload
    pub fn new(
        name: impl Into<String>,
        record_type: impl Into<String>,
        rdata: JsonValue,
    ) -> Self {
        Self {
            name: name.into(),
            record_type: record_type.into(),
            rdata,
            ttl: None,
            service: None,
            protocol: None,
        }
    }
}
