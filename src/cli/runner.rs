//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::ServiceConfig;
use crate::error::Result;
use crate::pagination::{ListOperation, Pager};
use crate::services::dns_svcs::{self, DnsSvcs, ListDnszonesParams, ListResourceRecordsParams};
use crate::services::transit_gateway::{
    self, ListConnectionsParams, ListTransitGatewayConnectionsParams, ListTransitGatewaysParams,
    TransitGatewayApis,
};
use crate::services::zones_settings::{self, ZonesSettings};
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Instant;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::TransitGateways { limit, all } => {
                let service = self.transit_gateway()?;
                let params = ListTransitGatewaysParams {
                    limit: *limit,
                    start: None,
                };
                self.list("transit_gateways", service.transit_gateways_pager(params), *all)
                    .await
            }
            Commands::Connections {
                network_id,
                limit,
                all,
            } => {
                let service = self.transit_gateway()?;
                let params = ListConnectionsParams {
                    limit: *limit,
                    start: None,
                    network_id: network_id.clone(),
                };
                self.list("connections", service.connections_pager(params), *all)
                    .await
            }
            Commands::GatewayConnections {
                gateway,
                name,
                limit,
                all,
            } => {
                let service = self.transit_gateway()?;
                let mut params = ListTransitGatewayConnectionsParams::new(gateway.as_str());
                params.name = name.clone();
                params.limit = *limit;
                let pager = service.transit_gateway_connections_pager(params)?;
                self.list("connections", pager, *all).await
            }
            Commands::DnsZones {
                instance,
                vpc_id,
                limit,
                all,
            } => {
                let service = DnsSvcs::from_config(&self.load_config(dns_svcs::SERVICE_NAME)?)?;
                let mut params = ListDnszonesParams::new(instance.as_str());
                params.vpc_id = vpc_id.clone();
                params.limit = *limit;
                self.list("dnszones", service.dnszones_pager(params)?, *all)
                    .await
            }
            Commands::DnsRecords {
                instance,
                zone,
                record_type,
                name,
                limit,
                all,
            } => {
                let service = DnsSvcs::from_config(&self.load_config(dns_svcs::SERVICE_NAME)?)?;
                let mut params = ListResourceRecordsParams::new(instance.as_str(), zone.as_str());
                params.type_ = record_type.clone();
                params.name = name.clone();
                params.limit = *limit;
                self.list("resource_records", service.resource_records_pager(params)?, *all)
                    .await
            }
            Commands::ZoneSetting { crn, zone, setting } => {
                let config = self.load_config(zones_settings::SERVICE_NAME)?;
                let service = ZonesSettings::from_config(&config, crn.as_str(), zone.as_str())?;
                let result = service.get_zone_setting(setting).await?;
                self.output_message(&json!({
                    "type": "ZONE_SETTING",
                    "setting": serde_json::to_value(result)?
                }));
                Ok(())
            }
        }
    }

    /// Load configuration for `service_name`: the `--config` file when given,
    /// otherwise the environment
    fn load_config(&self, service_name: &str) -> Result<ServiceConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ServiceConfig::from_file(path)?,
            None => ServiceConfig::from_env(service_name)?,
        };
        if let Some(url) = &self.cli.service_url {
            config.service_url = Some(url.clone());
        }
        debug!(service_name, url = ?config.service_url, "loaded service configuration");
        Ok(config)
    }

    fn transit_gateway(&self) -> Result<TransitGatewayApis> {
        let config = self.load_config(transit_gateway::SERVICE_NAME)?;
        TransitGatewayApis::from_config(&config, self.cli.api_version.as_str())
    }

    /// Print the first page, or every page with `all`
    async fn list<Op>(&self, resource: &str, mut pager: Pager<Op>, all: bool) -> Result<()>
    where
        Op: ListOperation,
        Op::Item: Serialize,
    {
        let start = Instant::now();
        let items = if all {
            pager.get_all().await?
        } else {
            pager.get_next().await?
        };
        info!(
            resource,
            count = items.len(),
            pages = pager.pages_fetched(),
            duration_ms = start.elapsed().as_millis() as u64,
            "listing complete"
        );

        self.output_message(&json!({
            "type": "ITEMS",
            "resource": resource,
            "count": items.len(),
            "has_next": pager.has_next(),
            "items": serde_json::to_value(items)?
        }));
        Ok(())
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}
