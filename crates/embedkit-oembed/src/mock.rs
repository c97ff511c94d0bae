//! Mock transport for testing.
//!
//! Provides [`MockTransport`] for exercising resolvers and renderers without
//! network access.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

use crate::error::TransportError;
use crate::transport::Transport;

#[derive(Debug, Clone)]
enum MockResponse {
    Body(String),
    Status(u16),
}

/// Mock transport with canned responses keyed by URL.
///
/// Every request is recorded, including requests for URLs with no canned
/// response (those fail with HTTP 404).
///
/// # Example
///
/// ```
/// use embedkit_oembed::Transport;
/// use embedkit_oembed::MockTransport;
/// use serde_json::json;
///
/// let transport = MockTransport::new()
///     .with_json("https://d/oembed", json!({ "embed": "<div/>" }))
///     .with_status("https://d/broken", 503);
///
/// assert!(transport.get_json("https://d/oembed").is_ok());
/// assert!(transport.get_json("https://d/broken").is_err());
/// assert_eq!(transport.request_count(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: HashMap<String, MockResponse>,
    requests: RwLock<Vec<String>>,
}

impl MockTransport {
    /// Create a mock with no canned responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to `url` with a JSON document.
    #[must_use]
    pub fn with_json(self, url: impl Into<String>, value: Value) -> Self {
        self.with_body(url, value.to_string())
    }

    /// Respond to `url` with a raw body (parsed as JSON on request).
    #[must_use]
    pub fn with_body(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.responses
            .insert(url.into(), MockResponse::Body(body.into()));
        self
    }

    /// Respond to `url` with an HTTP error status.
    #[must_use]
    pub fn with_status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.responses.insert(url.into(), MockResponse::Status(status));
        self
    }

    /// URLs requested so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn requests(&self) -> Vec<String> {
        self.requests.read().unwrap().clone()
    }

    /// Number of requests made so far.
    pub fn request_count(&self) -> usize {
        self.requests().len()
    }
}

impl Transport for MockTransport {
    fn get_json(&self, url: &str) -> Result<Value, TransportError> {
        self.requests.write().unwrap().push(url.to_owned());

        match self.responses.get(url) {
            Some(MockResponse::Body(body)) => Ok(serde_json::from_str(body)?),
            Some(MockResponse::Status(status)) => Err(TransportError::HttpResponse {
                status: *status,
                body: String::new(),
            }),
            None => Err(TransportError::HttpResponse {
                status: 404,
                body: format!("no mock response for {url}"),
            }),
        }
    }
}
