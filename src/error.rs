//! Error types shared across the client.
//!
//! Validation, decoding and transport failures are kept in separate enums so
//! callers can tell a bad identifier from a changed API contract from a
//! network problem without matching on message text. [`ClientError`] wraps all
//! three for the resource accessors.

use thiserror::Error;

/// Construction or compilation failed a format or business rule.
///
/// Always raised when a value is built or a query is compiled, never later.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Identifier does not match its format after normalization
    #[error("invalid {kind} '{value}': {reason}\n  Suggestion: {suggestion}")]
    InvalidIdentifier {
        /// Identifier family (e.g. "OLID", "ISBN")
        kind: &'static str,
        /// The raw input as given by the caller
        value: String,
        /// Why the input was rejected
        reason: String,
        /// How to fix the input
        suggestion: &'static str,
    },

    /// A search query has no field that renders to a clause
    #[error("empty query: at least one search field must be set")]
    EmptyQuery,

    /// Sort token is not part of the service vocabulary
    #[error("unknown sort value '{value}'")]
    UnknownSort {
        /// The rejected token
        value: String,
    },

    /// A query field holds a value it cannot carry
    #[error("invalid value '{value}' for query field '{field}': {reason}")]
    InvalidField {
        /// Query field name as rendered in the query string
        field: &'static str,
        /// The offending value
        value: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Language is not a two-letter code
    #[error("invalid language code '{value}': expected two ASCII letters (e.g. 'en')")]
    InvalidLanguage {
        /// The rejected code
        value: String,
    },

    /// Identifier is valid but of the wrong kind for the operation
    #[error("identifier '{id}' is not {expected} identifier")]
    KindMismatch {
        /// Canonical form of the identifier
        id: String,
        /// Expected kind, with article (e.g. "a work")
        expected: &'static str,
    },
}

impl ValidationError {
    /// Creates an `InvalidIdentifier` error.
    #[must_use]
    pub fn invalid_identifier(
        kind: &'static str,
        value: &str,
        reason: impl Into<String>,
        suggestion: &'static str,
    ) -> Self {
        Self::InvalidIdentifier {
            kind,
            value: value.to_string(),
            reason: reason.into(),
            suggestion,
        }
    }

    /// Creates an `InvalidField` error.
    #[must_use]
    pub fn invalid_field(field: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// A response did not match the shape declared for it.
///
/// Indicates the service changed its contract; not retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Body is not JSON at all
    #[error("response body is not valid JSON: {message}")]
    InvalidJson {
        /// Parser message
        message: String,
    },

    /// Field holds a JSON kind the declared shape does not accept
    #[error("field '{field}': expected {expected}, found {found}")]
    UnexpectedShape {
        /// Field being decoded
        field: String,
        /// What the shape requires
        expected: &'static str,
        /// What the response contained
        found: String,
    },

    /// Envelope object lacks the key its shape unwraps
    #[error("field '{field}': envelope has no '{key}' member")]
    MissingKey {
        /// Field being decoded
        field: String,
        /// The missing envelope key (`value`, `key`, ...)
        key: String,
    },

    /// Normalized document does not deserialize into the entity
    #[error("cannot decode {target}: {message}")]
    Schema {
        /// Entity name
        target: &'static str,
        /// Deserializer message, including the failing field
        message: String,
    },
}

/// Failure reported by the transport collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection-level failure (DNS, refused, TLS, reset)
    #[error("network error requesting {url}: {message}")]
    Network {
        /// Full request URL
        url: String,
        /// Underlying error text
        message: String,
    },

    /// Request did not complete within the configured timeout
    #[error("timeout requesting {url}")]
    Timeout {
        /// Full request URL
        url: String,
    },

    /// Service answered with a non-2xx status
    #[error("HTTP {status} for '{path}'")]
    HttpStatus {
        /// Request path
        path: String,
        /// Status code
        status: u16,
    },

    /// Base URL and path do not form a valid URL
    #[error("invalid request URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL that failed to parse
        url: String,
        /// Parser message
        reason: String,
    },

    /// Transport could not be constructed
    #[error("transport setup failed: {reason}")]
    Setup {
        /// Why construction failed
        reason: String,
    },
}

impl TransportError {
    /// Returns true if the service reported the resource as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::HttpStatus { status: 404, .. })
    }
}

/// Any failure of a resource accessor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Input rejected before any request was made
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Response did not match its declared shape
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Request failed in the transport
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// A [`ClientConfig`](crate::transport::ClientConfig) value is out of range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Base URL does not parse or is not http(s)
    #[error("invalid {field} '{value}': {reason}\n  Suggestion: Use an absolute http(s) URL such as https://openlibrary.org")]
    InvalidUrl {
        /// Config key
        field: &'static str,
        /// The rejected value
        value: String,
        /// Why it was rejected
        reason: String,
    },

    /// Timeout outside the accepted range
    #[error("invalid {field} {value}: must be between {min} and {max} seconds")]
    InvalidTimeout {
        /// Config key
        field: &'static str,
        /// The rejected value
        value: u64,
        /// Smallest accepted value
        min: u64,
        /// Largest accepted value
        max: u64,
    },

    /// User agent is blank
    #[error("user_agent must not be empty")]
    EmptyUserAgent,
}
