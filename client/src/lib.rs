#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

//! Client for the Oracle of Bacon, a service that links two actors through
//! the movies they appeared in.
//!
//! # Architecture
//!
//! - [`query::Query`] - endpoint names + API key, validated before sending
//! - [`transport::Transport`] - trait for fetching the raw payload
//! - [`classify::classify`] - turns the XML payload into a [`response::Response`]
//! - [`client::OracleClient`] - facade tying the three together
//!
//! # Example
//!
//! ```ignore
//! use oracle_of_bacon::{HttpTransport, OracleClient, Query, DEFAULT_BASE_URL};
//!
//! let query = Query::new("my-api-key").with_from("Tom Hanks");
//! let client = OracleClient::new(query, DEFAULT_BASE_URL, HttpTransport::new());
//! let response = client.find_connections().await?;
//! ```

pub mod classify;
pub mod client;
pub mod config;
pub mod query;
pub mod render;
pub mod response;
pub mod transport;

pub use classify::{classify, ParseError};
pub use client::{OracleClient, OracleError};
pub use config::{Config, ConfigError, DEFAULT_BASE_URL};
pub use query::{Query, ValidationError, Violation, DEFAULT_ACTOR};
pub use response::{Response, ResponseType};
pub use transport::{HttpTransport, Transport, TransportError};
