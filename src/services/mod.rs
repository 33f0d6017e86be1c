//! IBM Cloud networking services
//!
//! One client per service, one async method per REST operation. Every
//! method validates its required parameters, builds the URL and query, and
//! delegates to the shared [`HttpClient`](crate::http::HttpClient).
//! List operations additionally expose a [`Pager`](crate::pagination::Pager).

mod common;

/// DNS Services (private DNS zones and resource records)
pub mod dns_svcs;

/// Transit Gateway
pub mod transit_gateway;

/// CIS zone settings
pub mod zones_settings;

pub use common::{endpoint, require, sdk_request, ANALYTICS_HEADER};
pub use dns_svcs::DnsSvcs;
pub use transit_gateway::TransitGatewayApis;
pub use zones_settings::ZonesSettings;
