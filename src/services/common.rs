//! Helpers shared by the generated-style service methods

use crate::error::{Error, Result};
use crate::http::RequestConfig;
use url::Url;

/// Header identifying the SDK operation to IBM Cloud
pub const ANALYTICS_HEADER: &str = "X-IBMCloud-SDK-Analytics";

/// Base request carrying the headers every operation sends
pub fn sdk_request(service_name: &str, operation_id: &str) -> RequestConfig {
    RequestConfig::new()
        .header("Accept", "application/json")
        .header(
            ANALYTICS_HEADER,
            format!("service_name={service_name};service_version=V1;operation_id={operation_id}"),
        )
}

/// Join `segments` onto `base_url`, percent-encoding each one (`/` included)
pub fn endpoint(base_url: &str, segments: &[&str]) -> Result<String> {
    let mut url = Url::parse(base_url)?;
    url.path_segments_mut()
        .map_err(|()| Error::config(format!("service URL '{base_url}' cannot be a base")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url.to_string())
}

/// Reject an empty required parameter before any request is made
pub fn require<'a>(name: &str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(Error::missing_param(name));
    }
    Ok(value)
}
