//! Authentication module
//!
//! Supports: No auth, Bearer token, Basic, IBM Cloud IAM (API key)
//!
//! The `Authenticator` handles all auth types and manages token caching
//! for IAM, whose access tokens expire and must be refreshed.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, CachedToken, DEFAULT_IAM_URL, IAM_APIKEY_GRANT_TYPE};
