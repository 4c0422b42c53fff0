//! Typed entities returned by the resource accessors.
//!
//! Each entity implements [`Entity`](crate::normalize::Entity) with the shape
//! table of its wrapped fields; identifiers inside responses are decoded
//! straight into the validated value types.

mod author;
mod book;
mod edition;
mod page;
mod ratings;
mod search;

pub use author::{Author, Link};
pub use book::Book;
pub use edition::Edition;
pub use page::{Page, PageLinks};
pub use ratings::Ratings;
pub use search::{AuthorDoc, AuthorSearchResults, SearchDoc, SearchResults};

use serde::{Deserialize, Serialize};

/// Revision bookkeeping carried by every stored record.
///
/// `created` and `last_modified` arrive as versioned datetime values and are
/// kept as the service's ISO-8601 text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revision {
    pub revision: Option<u64>,
    pub latest_revision: Option<u64>,
    pub created: Option<String>,
    pub last_modified: Option<String>,
}
