//! Common test utilities for integration tests.
//!
//! - [`http_mock::MockHttpServer`] - wiremock-backed stand-in for the oracle
//! - [`http_mock::serve_raw_once`] - raw TCP responder for broken HTTP

#![allow(dead_code, clippy::expect_used, clippy::unwrap_used)]

pub mod http_mock;

use oracle_of_bacon::{HttpTransport, OracleClient, Query};

pub const TEST_API_KEY: &str = "test-api-key";

/// Client querying Kevin Bacon -> `to` against `base_url`.
pub fn client_for(base_url: impl Into<String>, to: &str) -> OracleClient<HttpTransport> {
    let query = Query::new(TEST_API_KEY).with_to(to);
    OracleClient::new(query, base_url, HttpTransport::new())
}
