//! Transit Gateway
//!
//! Gateways, their connections and the locations they can live in. List
//! operations page with a `start` cursor taken from `next.start`.

mod pagers;
mod service;
mod types;

pub use pagers::{
    ConnectionsList, ConnectionsPager, TransitGatewayConnectionsList,
    TransitGatewayConnectionsPager, TransitGatewaysList, TransitGatewaysPager,
};
pub use service::{TransitGatewayApis, DEFAULT_SERVICE_URL, DEFAULT_VERSION, SERVICE_NAME};
pub use types::*;
