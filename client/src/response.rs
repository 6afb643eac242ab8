//! Classified responses from the Oracle of Bacon.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Data carried by every [`Response::Error`].
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized access";

/// Data carried by every [`Response::Unknown`].
pub const UNKNOWN_MESSAGE: &str = "Unknown response type";

/// The outcome of a successful round trip to the service.
///
/// Serializes as `{"type": "graph", "data": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Response {
    /// The service rejected the API key.
    Error(String),
    /// Actor and movie names alternating along the connecting path.
    Graph(Vec<String>),
    /// Suggested spellings for a name the service did not recognize.
    Spellcheck(Vec<String>),
    /// Well-formed XML in a shape the client does not recognize.
    Unknown(String),
}

impl Response {
    #[must_use]
    pub fn unauthorized() -> Self {
        Self::Error(UNAUTHORIZED_MESSAGE.to_string())
    }

    #[must_use]
    pub fn unknown() -> Self {
        Self::Unknown(UNKNOWN_MESSAGE.to_string())
    }

    #[must_use]
    pub const fn response_type(&self) -> ResponseType {
        match self {
            Self::Error(_) => ResponseType::Error,
            Self::Graph(_) => ResponseType::Graph,
            Self::Spellcheck(_) => ResponseType::Spellcheck,
            Self::Unknown(_) => ResponseType::Unknown,
        }
    }

    /// Names carried by a graph or spellcheck response.
    #[must_use]
    pub fn names(&self) -> Option<&[String]> {
        match self {
            Self::Graph(names) | Self::Spellcheck(names) => Some(names.as_slice()),
            Self::Error(_) | Self::Unknown(_) => None,
        }
    }

    /// Fixed message carried by an error or unknown response.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Error(message) | Self::Unknown(message) => Some(message.as_str()),
            Self::Graph(_) | Self::Spellcheck(_) => None,
        }
    }
}

/// The discriminant of a [`Response`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    Error,
    Graph,
    Spellcheck,
    Unknown,
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
            Self::Graph => f.write_str("graph"),
            Self::Spellcheck => f.write_str("spellcheck"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}
