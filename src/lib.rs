//! Open Library Client Library
//!
//! Typed access to the Open Library web service (works, editions, authors,
//! ratings, search) built around three pure cores:
//!
//! - [`ident`] - self-validating identifiers (OLID, ISBN, LCCN, Dewey, cover size)
//! - [`query`] - structured search queries and their compiler
//! - [`normalize`] - shape-driven unwrapping of the API's response envelopes
//!
//! Around them:
//! - [`model`] - the decoded entities
//! - [`requests`] - pure request builders, one per accessor
//! - [`transport`] - the HTTP boundary and its `reqwest` implementation
//! - [`client`] - [`OpenLibrary`], which ties the above together
//! - [`error`] - error types

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod error;
pub mod ident;
pub mod model;
pub mod normalize;
pub mod query;
pub mod requests;
pub mod transport;
mod user_agent;

// Re-export commonly used types
pub use client::OpenLibrary;
pub use error::{ClientError, ConfigError, DecodeError, TransportError, ValidationError};
pub use ident::{BookId, CoverSize, DeweyDecimal, Isbn13, Lccn, LccnEra, Olid, OlidKind};
pub use model::{Author, AuthorSearchResults, Book, Edition, Page, Ratings, SearchResults};
pub use query::{Language, Query, QueryField, QueryValue, Range, SearchRequest, SortKey};
pub use requests::Paging;
pub use transport::{ApiRequest, ApiResponse, ClientConfig, ReqwestTransport, Service, Transport};
