//! HTTP transport for fetching raw Oracle of Bacon payloads.
//!
//! The trait abstraction enables:
//!
//! - Easy mocking in unit tests (see [`mock::MockTransport`])
//! - HTTP-level testing with `wiremock` in integration tests
//! - Swapping the HTTP stack without touching classification
//!
//! Every failure below the payload level (connection refused or reset,
//! timeouts, malformed HTTP, truncated bodies, non-2xx statuses) comes back
//! as the same [`TransportError`], carrying the underlying message.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::HttpConfig;

/// A network or protocol failure while fetching a payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key
        Self::new(describe(&err.without_url()))
    }
}

/// Render an error and its chain of sources as `outer: inner: ...`.
fn describe(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Fetches the body at a URL.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url` and return the full response body.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, TransportError>;
}

/// [`Transport`] backed by a `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured `reqwest::Client` (custom timeouts, proxies, ...).
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build a client with the configured timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the TLS backend cannot be initialised or
    /// the user agent is not a valid header value.
    pub fn from_config(config: &HttpConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self::with_client(client))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::new(format!(
                "HTTP status {status} from {}",
                response.url().host_str().unwrap_or("server")
            )));
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::missing_const_for_fn,
    clippy::must_use_candidate
)]
pub mod mock {
    //! Mock implementation for unit testing.

    use super::{Transport, TransportError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Mock implementation of [`Transport`] for unit tests.
    ///
    /// Configure the next result with `set_result` (or the `respond_with_*`
    /// shortcuts) and inspect requested URLs with `calls()`.
    pub struct MockTransport {
        result: Mutex<Option<Result<Vec<u8>, TransportError>>>,
        calls: Mutex<Vec<String>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self {
                result: Mutex::new(None),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Set the result for the next `fetch` call.
        pub fn set_result(&self, result: Result<Vec<u8>, TransportError>) {
            *self.result.lock().unwrap() = Some(result);
        }

        pub fn respond_with_body(self, body: impl Into<Vec<u8>>) -> Self {
            self.set_result(Ok(body.into()));
            self
        }

        pub fn respond_with_error(self, message: &str) -> Self {
            self.set_result(Err(TransportError::new(message)));
            self
        }

        /// Get all URLs passed to `fetch`.
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Default for MockTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>, TransportError> {
            self.calls.lock().unwrap().push(url.to_string());

            self.result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(TransportError::new("no response scripted")))
        }
    }
}
