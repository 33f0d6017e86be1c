//! Pagers over the Transit Gateway list operations

use super::service::TransitGatewayApis;
use super::types::{
    ListConnectionsParams, ListTransitGatewayConnectionsParams, ListTransitGatewaysParams,
    TransitConnection, TransitGateway, TransitGatewayConnection,
};
use crate::error::Result;
use crate::pagination::{ListOperation, Page, Pager};
use crate::services::common::require;
use async_trait::async_trait;

/// `list_transit_gateways` as a [`ListOperation`]
#[derive(Debug, Clone, Copy)]
pub struct TransitGatewaysList<'a> {
    service: &'a TransitGatewayApis,
}

#[async_trait]
impl ListOperation for TransitGatewaysList<'_> {
    type Params = ListTransitGatewaysParams;
    type Item = TransitGateway;

    async fn fetch_page(&self, params: Self::Params) -> Result<Page<TransitGateway>> {
        Ok(self.service.list_transit_gateways(&params).await?.into_page())
    }
}

/// `list_connections` as a [`ListOperation`]
#[derive(Debug, Clone, Copy)]
pub struct ConnectionsList<'a> {
    service: &'a TransitGatewayApis,
}

#[async_trait]
impl ListOperation for ConnectionsList<'_> {
    type Params = ListConnectionsParams;
    type Item = TransitConnection;

    async fn fetch_page(&self, params: Self::Params) -> Result<Page<TransitConnection>> {
        Ok(self.service.list_connections(&params).await?.into_page())
    }
}

/// `list_transit_gateway_connections` as a [`ListOperation`]
#[derive(Debug, Clone, Copy)]
pub struct TransitGatewayConnectionsList<'a> {
    service: &'a TransitGatewayApis,
}

#[async_trait]
impl ListOperation for TransitGatewayConnectionsList<'_> {
    type Params = ListTransitGatewayConnectionsParams;
    type Item = TransitGatewayConnection;

    async fn fetch_page(&self, params: Self::Params) -> Result<Page<TransitGatewayConnection>> {
        Ok(self
            .service
            .list_transit_gateway_connections(&params)
            .await?
            .into_page())
    }
}

pub type TransitGatewaysPager<'a> = Pager<TransitGatewaysList<'a>>;
pub type ConnectionsPager<'a> = Pager<ConnectionsList<'a>>;
pub type TransitGatewayConnectionsPager<'a> = Pager<TransitGatewayConnectionsList<'a>>;

impl TransitGatewayApis {
    /// Pager over every transit gateway in the account
    pub fn transit_gateways_pager(
        &self,
        params: ListTransitGatewaysParams,
    ) -> TransitGatewaysPager<'_> {
        Pager::new(TransitGatewaysList { service: self }, params)
    }

    /// Pager over account-wide connections
    pub fn connections_pager(&self, params: ListConnectionsParams) -> ConnectionsPager<'_> {
        Pager::new(ConnectionsList { service: self }, params)
    }

    /// Pager over the connections of one gateway.
    ///
    /// Fails without issuing a request if `transit_gateway_id` is empty.
    pub fn transit_gateway_connections_pager(
        &self,
        params: ListTransitGatewayConnectionsParams,
    ) -> Result<TransitGatewayConnectionsPager<'_>> {
        require("transit_gateway_id", &params.transit_gateway_id)?;
        Ok(Pager::new(
            TransitGatewayConnectionsList { service: self },
            params,
        ))
    }
}
