//! HTTP transport for the itch.io API.
//!
//! The client talks to itch.io through the [`HttpTransport`] trait so tests and
//! embedders can swap the network layer. [`ReqwestTransport`] is the default.

use crate::ItchError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,

    /// Raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Create a response from a status and body.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Asynchronous GET transport.
///
/// Implementations return [`ItchError::TransportError`] when no response was
/// received at all (connection failure, timeout). Any received status,
/// including errors, is a successful exchange.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue a GET request with the given headers.
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, ItchError>;
}

/// Reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Create a transport whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, ItchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ItchError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, timeout })
    }

    /// Configured request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, ItchError> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ItchError::TransportError(format!("timed out after {:?}", self.timeout))
            } else {
                ItchError::TransportError(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ItchError::TransportError(format!("Failed to read body: {}", e)))?
            .to_vec();

        Ok(HttpResponse { status, body })
    }
}

/// A request seen by [`MockTransport`].
#[cfg(any(test, feature = "test-seams"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// Requested URL.
    pub url: String,
    /// Headers as sent.
    pub headers: Vec<(String, String)>,
}

/// Scripted transport for tests. Clones share the script and the log.
#[cfg(any(test, feature = "test-seams"))]
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    responses: std::sync::Arc<std::sync::Mutex<std::collections::VecDeque<Result<HttpResponse, String>>>>,
    requests: std::sync::Arc<std::sync::Mutex<Vec<RecordedRequest>>>,
}

#[cfg(any(test, feature = "test-seams"))]
impl MockTransport {
    /// Create a transport with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response.
    pub fn push_response(&self, status: u16, body: &str) {
        self.responses
            .lock()
            .expect("mock lock")
            .push_back(Ok(HttpResponse::new(status, body)));
    }

    /// Queue a transport failure.
    pub fn push_failure(&self, reason: &str) {
        self.responses
            .lock()
            .expect("mock lock")
            .push_back(Err(reason.to_string()));
    }

    /// Requests issued so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("mock lock").clone()
    }
}

#[cfg(any(test, feature = "test-seams"))]
#[async_trait]
impl HttpTransport for MockTransport {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, ItchError> {
        self.requests.lock().expect("mock lock").push(RecordedRequest {
            url: url.to_string(),
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });

        let next = self.responses.lock().expect("mock lock").pop_front();
        match next {
            Some(Ok(response)) => Ok(response),
            Some(Err(reason)) => Err(ItchError::TransportError(reason)),
            None => Err(ItchError::TransportError("no scripted response".to_string())),
        }
    }
}
