//! HTTP mock server helpers for testing outbound HTTP calls.
//!
//! This module provides a thin wrapper around `wiremock` for declarative
//! HTTP stubbing of the oracle endpoint, plus a raw TCP server for
//! failures `wiremock` cannot produce (truncated bodies, garbage responses).
//!
//! # Patterns
//!
//! - **Success response**: `.respond_with_xml(body)`
//! - **Error response**: `.respond_with_status(500)`
//! - **Timeout simulation**: `.respond_with_delay(Duration::from_secs(30))`
//! - **Request verification**: `.expect_times(1)` to assert call count

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path the stubbed oracle is served under.
pub const ORACLE_PATH: &str = "/cgi-bin/xml";

pub struct MockHttpServer {
    server: MockServer,
}

impl MockHttpServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL of the stubbed oracle endpoint.
    pub fn url(&self) -> String {
        format!("{}{ORACLE_PATH}", self.server.uri())
    }

    pub const fn inner(&self) -> &MockServer {
        &self.server
    }

    /// Begin stubbing `GET {ORACLE_PATH}`.
    pub fn expect_oracle_get(&self) -> StubBuilder<'_> {
        StubBuilder {
            server: &self.server,
            query: Vec::new(),
            status: 200,
            body: String::new(),
            delay: None,
            times: None,
        }
    }

    /// Assert every mounted stub saw its expected call count.
    pub async fn verify(&self) {
        self.server.verify().await;
    }

    /// Raw query strings of every request received so far.
    pub async fn received_queries(&self) -> Vec<Option<String>> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|request| request.url.query().map(String::from))
            .collect()
    }
}

pub struct StubBuilder<'a> {
    server: &'a MockServer,
    query: Vec<(String, String)>,
    status: u16,
    body: String,
    delay: Option<Duration>,
    times: Option<u64>,
}

impl StubBuilder<'_> {
    /// Require a decoded query parameter.
    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn respond_with_xml(mut self, body: &str) -> Self {
        self.body = body.to_string();
        self
    }

    pub fn respond_with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn respond_with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn expect_times(mut self, times: u64) -> Self {
        self.times = Some(times);
        self
    }

    pub async fn mount(self) {
        let mut template = ResponseTemplate::new(self.status)
            .set_body_raw(self.body.into_bytes(), "text/xml");
        if let Some(delay) = self.delay {
            template = template.set_delay(delay);
        }

        let mut mock = Mock::given(method("GET")).and(path(ORACLE_PATH));
        for (key, value) in self.query {
            mock = mock.and(query_param(key, value));
        }

        let mut mock = mock.respond_with(template);
        if let Some(times) = self.times {
            mock = mock.expect(times);
        }
        mock.mount(self.server).await;
    }
}

/// Serve exactly one connection with `raw` bytes, then hang up.
///
/// Returns the base URL to point a client at.
pub async fn serve_raw_once(raw: &'static [u8]) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind raw listener");
    let addr = listener.local_addr().expect("listener address");

    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let _ = socket.write_all(raw).await;
            let _ = socket.shutdown().await;
        }
    });

    format!("http://{addr}{ORACLE_PATH}")
}

/// A URL on a port nothing is listening on.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("listener address");
    drop(listener);
    format!("http://{addr}{ORACLE_PATH}")
}
