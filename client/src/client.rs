//! The [`OracleClient`] facade.
//!
//! One call to [`OracleClient::find_connections`] runs three stages, each of
//! which stops the call on failure:
//!
//! 1. validate the held [`Query`] (no network on failure)
//! 2. fetch the payload through the [`Transport`] (exactly one request)
//! 3. classify the payload into a [`Response`]
//!
//! Callers only ever see [`OracleError`]; transport-specific error types
//! never leak through.

use thiserror::Error;

use crate::classify::{classify, ParseError};
use crate::config::{Config, ConfigError};
use crate::query::{Query, ValidationError};
use crate::response::Response;
use crate::transport::{HttpTransport, Transport, TransportError};

/// Errors that end a [`OracleClient::find_connections`] call.
///
/// An unauthorized API key is not an error here: the service reports it
/// as a well-formed payload, classified as [`Response::Error`].
#[derive(Debug, Error)]
pub enum OracleError {
    /// The query failed structural checks and was never sent.
    #[error("invalid query: {0}")]
    Validation(#[from] ValidationError),

    /// The request failed below the payload level.
    #[error("network error: {0}")]
    Network(String),

    /// The payload was not well-formed XML.
    #[error("unreadable response: {0}")]
    Parse(#[from] ParseError),
}

impl From<TransportError> for OracleError {
    fn from(err: TransportError) -> Self {
        Self::Network(err.message().to_string())
    }
}

/// Looks up connections between two actors.
pub struct OracleClient<T = HttpTransport> {
    query: Query,
    base_url: String,
    transport: T,
}

impl OracleClient<HttpTransport> {
    /// Build a client backed by HTTP using the configured endpoint, key and
    /// timeouts. Endpoints start at their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClient`] if the HTTP settings cannot be
    /// turned into a client. No request has been made at that point.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let transport = HttpTransport::from_config(&config.http)
            .map_err(|e| ConfigError::HttpClient(e.message().to_string()))?;
        Ok(Self::new(
            Query::new(config.oracle.api_key.clone()),
            config.oracle.base_url.clone(),
            transport,
        ))
    }
}

impl<T: Transport> OracleClient<T> {
    pub fn new(query: Query, base_url: impl Into<String>, transport: T) -> Self {
        Self {
            query,
            base_url: base_url.into(),
            transport,
        }
    }

    #[must_use]
    pub const fn query(&self) -> &Query {
        &self.query
    }

    /// Change the endpoints or key before the next lookup.
    pub fn query_mut(&mut self) -> &mut Query {
        &mut self.query
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// The URL the next lookup would request.
    #[must_use]
    pub fn request_url(&self) -> String {
        self.query.build_request_url(&self.base_url)
    }

    /// Validate the query, fetch the payload and classify it.
    ///
    /// # Errors
    ///
    /// - [`OracleError::Validation`] if the query is incomplete or its
    ///   endpoints are equal; no request is made.
    /// - [`OracleError::Network`] if the request fails for any reason.
    /// - [`OracleError::Parse`] if the payload is not well-formed XML.
    #[tracing::instrument(
        name = "find_connections",
        skip(self),
        fields(from = %self.query.from(), to = %self.query.to())
    )]
    pub async fn find_connections(&self) -> Result<Response, OracleError> {
        if let Err(e) = self.query.validate() {
            tracing::warn!("Rejected query: {e}");
            return Err(e.into());
        }

        let url = self.request_url();
        tracing::debug!("Requesting connection from the oracle");

        let body = match self.transport.fetch(&url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Oracle request failed: {e}");
                return Err(e.into());
            }
        };

        match classify(&body) {
            Ok(response) => {
                tracing::debug!(
                    response_type = %response.response_type(),
                    bytes = body.len(),
                    "Classified oracle response"
                );
                Ok(response)
            }
            Err(e) => {
                tracing::warn!(bytes = body.len(), "Unparseable oracle response: {e}");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Violation;
    use crate::transport::mock::MockTransport;

    const BASE_URL: &str = "http://oracle.test/cgi-bin/xml";

    fn client_with(transport: MockTransport) -> OracleClient<MockTransport> {
        let query = Query::new("test-key").with_to("Tom Hanks");
        OracleClient::new(query, BASE_URL, transport)
    }

    #[tokio::test]
    async fn test_returns_classified_graph() {
        let client = client_with(MockTransport::new().respond_with_body(
            "<link><actor>Kevin Bacon</actor><movie>Apollo 13</movie>\
             <actor>Tom Hanks</actor></link>",
        ));

        let response = client.find_connections().await.unwrap();

        assert_eq!(
            response,
            Response::Graph(vec!["Kevin Bacon".into(), "Apollo 13".into(), "Tom Hanks".into()])
        );
        assert_eq!(
            client.transport().calls(),
            vec!["http://oracle.test/cgi-bin/xml?p=test-key&a=Kevin%20Bacon&b=Tom%20Hanks"]
        );
    }

    #[tokio::test]
    async fn test_unauthorized_is_a_response_not_an_error() {
        let client = client_with(MockTransport::new().respond_with_body("<error>bad key</error>"));
        let response = client.find_connections().await.unwrap();
        assert_eq!(response, Response::unauthorized());
    }

    #[tokio::test]
    async fn test_invalid_query_never_reaches_transport() {
        let transport = MockTransport::new().respond_with_body("<foo/>");
        let client = OracleClient::new(Query::new("test-key"), BASE_URL, transport);

        let result = client.find_connections().await;

        assert!(matches!(
            result,
            Err(OracleError::Validation(ref e)) if e.violations() == [Violation::SameEndpoints]
        ));
        assert!(client.transport().calls().is_empty());
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_network_error() {
        let client = client_with(MockTransport::new().respond_with_error("operation timed out"));

        let result = client.find_connections().await;

        assert!(matches!(result, Err(OracleError::Network(ref msg)) if msg == "operation timed out"));
        assert_eq!(client.transport().calls().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_payload_is_parse_error() {
        let client = client_with(MockTransport::new().respond_with_body("<link><actor>"));
        let result = client.find_connections().await;
        assert!(matches!(result, Err(OracleError::Parse(_))));
    }

    #[tokio::test]
    async fn test_query_mut_changes_next_request() {
        let mut client = client_with(MockTransport::new().respond_with_body("<foo/>"));
        client.query_mut().set_from("Meg Ryan");

        assert_eq!(
            client.request_url(),
            "http://oracle.test/cgi-bin/xml?p=test-key&a=Meg%20Ryan&b=Tom%20Hanks"
        );
        assert_eq!(client.find_connections().await.unwrap(), Response::unknown());
        assert_eq!(client.query().from(), "Meg Ryan");
    }

    #[test]
    fn test_from_config_uses_configured_key_and_endpoint() {
        let mut config = Config::default();
        config.oracle.api_key = "configured".into();
        config.oracle.base_url = "https://mirror.test/xml".into();

        let client = OracleClient::from_config(&config).unwrap();

        assert_eq!(client.query().api_key(), "configured");
        assert_eq!(client.base_url(), "https://mirror.test/xml");
        assert_eq!(
            client.request_url(),
            "https://mirror.test/xml?p=configured&a=Kevin%20Bacon&b=Kevin%20Bacon"
        );
    }

    #[test]
    fn test_from_config_reports_unbuildable_client_as_config_error() {
        let mut config = Config::default();
        config.http.user_agent = "oracle-of-bacon\n".into();

        let result = OracleClient::from_config(&config);

        assert!(matches!(result, Err(ConfigError::HttpClient(ref msg)) if !msg.is_empty()));
        let message = result.err().unwrap().to_string();
        assert!(message.starts_with("HTTP client could not be built"), "{message}");
    }
}
