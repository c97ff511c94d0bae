//! HTTP transport for discovery lookups.
//!
//! The [`Transport`] trait is the seam between the resolver and the network.
//! [`UreqTransport`] is the production implementation; tests use
//! [`MockTransport`](crate::mock::MockTransport).

use std::time::Duration;

use serde_json::Value;
use ureq::Agent;

use crate::consts::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use crate::error::TransportError;

/// Fetches a JSON document over HTTP.
pub trait Transport: Send + Sync {
    /// Issue a single GET request and parse the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] on network failure, HTTP error status or a
    /// body that is not valid JSON.
    fn get_json(&self, url: &str) -> Result<Value, TransportError>;
}

/// Create HTTP agent with the specified timeout.
///
/// HTTP error statuses are returned as responses so the body can be read
/// for error details.
pub fn create_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}

/// [`Transport`] backed by a blocking `ureq` agent.
///
/// The agent is reused across calls for connection pooling.
pub struct UreqTransport {
    agent: Agent,
    user_agent: String,
}

impl UreqTransport {
    /// Create a transport with the given request timeout.
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            agent: create_agent(timeout),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Create a transport around an existing agent.
    #[must_use]
    pub fn with_agent(agent: Agent) -> Self {
        Self {
            agent,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Set the `User-Agent` header sent with every request.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl Transport for UreqTransport {
    fn get_json(&self, url: &str) -> Result<Value, TransportError> {
        let response = self
            .agent
            .get(url)
            .header("Accept", "application/json")
            .header("User-Agent", &self.user_agent)
            .call()?;

        let status = response.status().as_u16();
        let mut body = response.into_body();

        if status >= 400 {
            let error_body = body
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(TransportError::HttpResponse {
                status,
                body: error_body,
            });
        }

        let text = body.read_to_string()?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    use serde_json::json;

    use super::*;

    /// Serve one canned HTTP response on a loopback port.
    ///
    /// Returns the base URL and a handle yielding the raw request text.
    fn serve_once(status_line: &str, body: &str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });

        (format!("http://127.0.0.1:{port}"), handle)
    }

    /// Transport that never routes loopback requests through an env proxy.
    fn local_transport() -> UreqTransport {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(5)))
            .http_status_as_error(false)
            .proxy(None)
            .build()
            .into();
        UreqTransport::with_agent(agent)
    }

    #[test]
    fn test_get_json_success() {
        let (base, handle) = serve_once("200 OK", r#"{"embed":"<div>player</div>"}"#);
        let transport = local_transport().user_agent("embedkit-test");

        let value = transport.get_json(&format!("{base}/oembed")).unwrap();
        let request = handle.join().unwrap();

        assert_eq!(value, json!({ "embed": "<div>player</div>" }));
        assert!(request.starts_with("GET /oembed HTTP/1.1"));
        assert!(request.to_lowercase().contains("user-agent: embedkit-test"));
        assert!(request.to_lowercase().contains("accept: application/json"));
    }

    #[test]
    fn test_get_json_http_error_status() {
        let (base, handle) = serve_once("404 Not Found", r#"{"error":"missing"}"#);
        let transport = local_transport();

        let err = transport.get_json(&base).unwrap_err();
        handle.join().unwrap();

        match err {
            TransportError::HttpResponse { status, body } => {
                assert_eq!(status, 404);
                assert!(body.contains("missing"));
            }
            other => panic!("Expected HttpResponse, got {other:?}"),
        }
    }

    #[test]
    fn test_get_json_invalid_body() {
        let (base, handle) = serve_once("200 OK", "<html>not json</html>");
        let transport = local_transport();

        let err = transport.get_json(&base).unwrap_err();
        handle.join().unwrap();

        assert!(matches!(err, TransportError::Json(_)), "got {err:?}");
    }

    #[test]
    fn test_get_json_connection_refused() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let transport = local_transport();

        let err = transport
            .get_json(&format!("http://127.0.0.1:{port}/oembed"))
            .unwrap_err();

        assert!(matches!(err, TransportError::HttpRequest(_)), "got {err:?}");
    }
}
