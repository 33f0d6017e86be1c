//! CLI commands and argument parsing

use crate::services::transit_gateway::DEFAULT_VERSION;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// IBM Cloud networking CLI
#[derive(Parser, Debug)]
#[command(name = "ibm-networking")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Service configuration file (YAML). Without it, `{SERVICE}_*`
    /// environment variables are used.
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the service endpoint
    #[arg(long, global = true)]
    pub service_url: Option<String>,

    /// Transit Gateway API version date
    #[arg(long, global = true, default_value = DEFAULT_VERSION)]
    pub api_version: String,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List transit gateways
    TransitGateways {
        /// Page size
        #[arg(long)]
        limit: Option<u32>,

        /// Follow pagination to the end
        #[arg(long)]
        all: bool,
    },

    /// List connections across all gateways
    Connections {
        /// Only connections to this network
        #[arg(long)]
        network_id: Option<String>,

        #[arg(long)]
        limit: Option<u32>,

        #[arg(long)]
        all: bool,
    },

    /// List the connections of one transit gateway
    GatewayConnections {
        /// Transit gateway ID
        #[arg(long)]
        gateway: String,

        /// Only connections with this name
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        limit: Option<u32>,

        #[arg(long)]
        all: bool,
    },

    /// List the zones of a DNS Services instance
    DnsZones {
        /// DNS Services instance ID
        #[arg(long)]
        instance: String,

        /// Only zones bound to this VPC
        #[arg(long)]
        vpc_id: Option<String>,

        #[arg(long)]
        limit: Option<u32>,

        #[arg(long)]
        all: bool,
    },

    /// List the resource records of a DNS zone
    DnsRecords {
        /// DNS Services instance ID
        #[arg(long)]
        instance: String,

        /// Zone ID
        #[arg(long)]
        zone: String,

        /// Only records of this type (A, CNAME, ...)
        #[arg(long = "type")]
        record_type: Option<String>,

        /// Only records with this name
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        limit: Option<u32>,

        #[arg(long)]
        all: bool,
    },

    /// Show one CIS zone setting
    ZoneSetting {
        /// CIS instance CRN
        #[arg(long)]
        crn: String,

        /// Zone identifier
        #[arg(long)]
        zone: String,

        /// Setting name, e.g. `min_tls_version`
        #[arg(long)]
        setting: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}
