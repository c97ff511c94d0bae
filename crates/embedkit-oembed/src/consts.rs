//! Internal constants for discovery lookups.

use std::time::Duration;

/// Default HTTP timeout for discovery requests (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default `User-Agent` header sent with discovery requests.
pub const DEFAULT_USER_AGENT: &str = concat!("embedkit/", env!("CARGO_PKG_VERSION"));

/// Response format requested from every discovery endpoint.
pub const RESPONSE_FORMAT: &str = "json";
