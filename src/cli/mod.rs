//! CLI module
//!
//! Command-line interface over the service clients.
//!
//! # Commands
//!
//! - `transit-gateways` - List transit gateways
//! - `connections` - List connections across gateways
//! - `gateway-connections` - List the connections of one gateway
//! - `dns-zones` - List DNS zones of an instance
//! - `dns-records` - List resource records of a zone
//! - `zone-setting` - Show a CIS zone setting

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
