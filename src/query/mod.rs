//! Search query model and compiler.
//!
//! A [`Query`] maps [`QueryField`]s to values; [`Query::compile`] renders it
//! into the service's boolean/range query-string syntax. [`SearchRequest`]
//! wraps a query with output fields, [`SortKey`], [`Language`] and paging.

mod compile;
mod field;
mod search;
mod sort;

pub use compile::Query;
pub use field::{QueryField, QueryValue, Range};
pub use search::{Language, SearchRequest};
pub use sort::SortKey;
