//! Pagers over the DNS Services list operations

use super::service::DnsSvcs;
use super::types::{Dnszone, ListDnszonesParams, ListResourceRecordsParams, ResourceRecord};
use crate::error::Result;
use crate::pagination::{ListOperation, Page, Pager};
use crate::services::common::require;
use async_trait::async_trait;

/// `list_dnszones` as a [`ListOperation`]
#[derive(Debug, Clone, Copy)]
pub struct DnszonesList<'a> {
    service: &'a DnsSvcs,
}

#[async_trait]
impl ListOperation for DnszonesList<'_> {
    type Params = ListDnszonesParams;
    type Item = Dnszone;

    async fn fetch_page(&self, params: Self::Params) -> Result<Page<Dnszone>> {
        Ok(self.service.list_dnszones(&params).await?.into_page())
    }
}

/// `list_resource_records` as a [`ListOperation`]
#[derive(Debug, Clone, Copy)]
pub struct ResourceRecordsList<'a> {
    service: &'a DnsSvcs,
}

#[async_trait]
impl ListOperation for ResourceRecordsList<'_> {
    type Params = ListResourceRecordsParams;
    type Item = ResourceRecord;

    async fn fetch_page(&self, params: Self::Params) -> Result<Page<ResourceRecord>> {
        Ok(self.service.list_resource_records(&params).await?.into_page())
    }
}

pub type DnszonesPager<'a> = Pager<DnszonesList<'a>>;
pub type ResourceRecordsPager<'a> = Pager<ResourceRecordsList<'a>>;

impl DnsSvcs {
    /// Pager over the zones of an instance.
    ///
    /// The `offset` cursor is read from the `next.href` link of each page.
    pub fn dnszones_pager(&self, params: ListDnszonesParams) -> Result<DnszonesPager<'_>> {
        require("instance_id", &params.instance_id)?;
        Ok(Pager::new(DnszonesList { service: self }, params))
    }

    /// Pager over the records of a zone
    pub fn resource_records_pager(
        &self,
        params: ListResourceRecordsParams,
    ) -> Result<ResourceRecordsPager<'_>> {
        require("instance_id", &params.instance_id)?;
        require("dnszone_id", &params.dnszone_id)?;
        Ok(Pager::new(ResourceRecordsList { service: self }, params))
    }
}
