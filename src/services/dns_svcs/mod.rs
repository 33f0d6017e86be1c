//! DNS Services
//!
//! Private DNS zones and their resource records. List operations page by
//! `offset`; the next offset is carried in the `next.href` link.

mod pagers;
mod service;
mod types;

pub use pagers::{DnszonesList, DnszonesPager, ResourceRecordsList, ResourceRecordsPager};
pub use service::{DnsSvcs, DEFAULT_SERVICE_URL, SERVICE_NAME};
pub use types::*;
