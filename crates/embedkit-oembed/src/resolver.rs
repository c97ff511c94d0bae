//! Fail-soft metadata resolution.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cache::{MetadataCache, NoCache};
use crate::error::TransportError;
use crate::metadata::EmbedMetadata;
use crate::transport::{Transport, UreqTransport};

/// Resolves discovery URLs into [`EmbedMetadata`].
///
/// Resolution never fails: transport errors, HTTP error statuses and bodies
/// that are not JSON objects are logged and reported as `None`. Exactly one
/// request is made per uncached lookup, with no retry.
///
/// The resolver is cheap to clone; clones share the transport and cache.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use embedkit_oembed::{MetadataResolver, Transport, TransportError};
/// use serde_json::{Value, json};
///
/// struct Fixed;
///
/// impl Transport for Fixed {
///     fn get_json(&self, url: &str) -> Result<Value, TransportError> {
///         match url {
///             "https://d/oembed" => Ok(json!({ "embed": "<div>player</div>" })),
///             _ => Err(TransportError::HttpResponse { status: 404, body: String::new() }),
///         }
///     }
/// }
///
/// let resolver = MetadataResolver::new(Arc::new(Fixed));
///
/// let meta = resolver.resolve("https://d/oembed").unwrap();
/// assert_eq!(meta.embed.as_deref(), Some("<div>player</div>"));
/// assert!(resolver.resolve("https://d/missing").is_none());
/// ```
#[derive(Clone)]
pub struct MetadataResolver {
    transport: Arc<dyn Transport>,
    cache: Arc<dyn MetadataCache>,
}

impl MetadataResolver {
    /// Create a resolver over `transport` with caching disabled.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            cache: Arc::new(NoCache),
        }
    }

    /// Cache successful lookups in `cache`.
    ///
    /// Failed lookups are never cached.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn MetadataCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Look up embed metadata, or `None` when it cannot be retrieved.
    pub fn resolve(&self, discovery_url: &str) -> Option<EmbedMetadata> {
        if let Some(hit) = self.cache.get(discovery_url) {
            debug!(url = %discovery_url, "oEmbed cache hit");
            return Some(hit);
        }

        info!(url = %discovery_url, "Fetching oEmbed resource");
        match self.fetch(discovery_url) {
            Ok(metadata) => {
                self.cache.set(discovery_url, &metadata);
                Some(metadata)
            }
            Err(e) => {
                warn!(url = %discovery_url, error = %e, "Failed to retrieve oEmbed resource");
                None
            }
        }
    }

    fn fetch(&self, discovery_url: &str) -> Result<EmbedMetadata, TransportError> {
        let value = self.transport.get_json(discovery_url)?;
        if !value.is_object() {
            return Err(TransportError::NotAnObject(json_kind(&value)));
        }
        Ok(serde_json::from_value(value)?)
    }
}

impl Default for MetadataResolver {
    fn default() -> Self {
        Self::new(Arc::new(UreqTransport::default()))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
