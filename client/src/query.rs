//! Query parameters for a connection lookup.
//!
//! A [`Query`] is checked against an ordered rule table before it is ever
//! turned into a request URL. Every violated rule is reported, in table
//! order, so callers can surface all problems at once.

use std::fmt;

/// Endpoint used for both `from` and `to` on a fresh query.
pub const DEFAULT_ACTOR: &str = "Kevin Bacon";

/// The two actors to connect and the key to authenticate with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    from: String,
    to: String,
    api_key: String,
}

impl Query {
    /// Create a query with both endpoints set to [`DEFAULT_ACTOR`].
    ///
    /// The defaults are equal, so the query fails validation until at least
    /// one endpoint is changed.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            from: DEFAULT_ACTOR.to_string(),
            to: DEFAULT_ACTOR.to_string(),
            api_key: api_key.into(),
        }
    }

    #[must_use]
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = from.into();
        self
    }

    #[must_use]
    pub fn with_to(mut self, to: impl Into<String>) -> Self {
        self.to = to.into();
        self
    }

    pub fn set_from(&mut self, from: impl Into<String>) {
        self.from = from.into();
    }

    pub fn set_to(&mut self, to: impl Into<String>) {
        self.to = to.into();
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = api_key.into();
    }

    #[must_use]
    pub fn from(&self) -> &str {
        &self.from
    }

    #[must_use]
    pub fn to(&self) -> &str {
        &self.to
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Check the query against every rule in [`RULES`].
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing each violated rule in priority
    /// order: empty `from`, empty `to`, empty API key, `from == to`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let violations: Vec<Violation> = RULES
            .iter()
            .filter(|(_, is_violated)| is_violated(self))
            .map(|(violation, _)| *violation)
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { violations })
        }
    }

    /// Assemble `{base_url}?p={api_key}&a={from}&b={to}` with each value
    /// percent-encoded. The parameter order is fixed.
    #[must_use]
    pub fn build_request_url(&self, base_url: &str) -> String {
        format!(
            "{base_url}?p={}&a={}&b={}",
            urlencoding::encode(&self.api_key),
            urlencoding::encode(&self.from),
            urlencoding::encode(&self.to)
        )
    }
}

impl Default for Query {
    fn default() -> Self {
        Self::new("")
    }
}

/// A single structural problem with a [`Query`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    EmptyFrom,
    EmptyTo,
    EmptyApiKey,
    SameEndpoints,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFrom => f.write_str("From can't be blank"),
            Self::EmptyTo => f.write_str("To can't be blank"),
            Self::EmptyApiKey => f.write_str("Api key can't be blank"),
            Self::SameEndpoints => f.write_str("From cannot be the same as To"),
        }
    }
}

type Rule = (Violation, fn(&Query) -> bool);

/// Validation rules in reporting order. The predicate returns `true` when
/// the rule is violated.
const RULES: &[Rule] = &[
    (Violation::EmptyFrom, |q| q.from.is_empty()),
    (Violation::EmptyTo, |q| q.to.is_empty()),
    (Violation::EmptyApiKey, |q| q.api_key.is_empty()),
    (Violation::SameEndpoints, |q| q.from == q.to),
];

/// One or more rules violated by a [`Query`]. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", join_messages(.violations))]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    /// All violated rules, in priority order.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// The highest-priority violation.
    #[must_use]
    pub fn first(&self) -> Option<Violation> {
        self.violations.first().copied()
    }

    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }
}

fn join_messages(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
