//! Self-validating identifier value types.
//!
//! Every type here normalizes its input once, at construction, and is
//! immutable afterwards. Two values with the same canonical text are equal.
//!
//! - [`Olid`] - Open Library work/author/edition codes (`OL45804W`)
//! - [`Isbn13`] - ISBN-10 or ISBN-13 input, stored as checksum-valid ISBN-13
//! - [`Lccn`] - Library of Congress Control Numbers, with era detection
//! - [`DeweyDecimal`] - Dewey decimal classification numbers
//! - [`CoverSize`] - cover image size (`S`/`M`/`L`)
//! - [`BookId`] - an OLID or an ISBN, for lookups that accept either
//!
//! # Example
//!
//! ```
//! use openlib_core::ident::{Isbn13, Olid};
//!
//! let work = Olid::parse("ol-45804 w").unwrap();
//! assert_eq!(work.as_str(), "OL45804W");
//! assert!(work.is_work());
//!
//! let isbn = Isbn13::parse("0-306-40615-2").unwrap();
//! assert_eq!(isbn.as_str(), "9780306406157");
//! ```

mod cover;
mod dewey;
mod isbn;
mod lccn;
mod olid;

pub use cover::CoverSize;
pub use dewey::DeweyDecimal;
pub use isbn::Isbn13;
pub use lccn::{Lccn, LccnEra};
pub use olid::{Olid, OlidKind};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Removes whitespace and hyphens, the separators every identifier family tolerates.
pub(crate) fn strip_separators(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}

/// Identifier accepted by edition lookups: an Open Library code or an ISBN.
///
/// Callers match on the variant instead of probing the runtime type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BookId {
    /// Open Library identifier
    Olid(Olid),
    /// ISBN, normalized to 13 digits
    Isbn(Isbn13),
}

impl BookId {
    /// Parses an OLID if the input looks like one, otherwise an ISBN.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidIdentifier`] when the input is
    /// neither a valid OLID nor a valid ISBN.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if let Ok(olid) = Olid::parse(raw) {
            return Ok(Self::Olid(olid));
        }
        Isbn13::parse(raw).map(Self::Isbn).map_err(|_| {
            ValidationError::invalid_identifier(
                "book identifier",
                raw,
                "neither an Open Library ID nor an ISBN",
                "Use an edition code like OL7353617M or an ISBN-10/13",
            )
        })
    }

    /// Canonical text of the wrapped identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Olid(olid) => olid.as_str(),
            Self::Isbn(isbn) => isbn.as_str(),
        }
    }
}

impl From<Olid> for BookId {
    fn from(olid: Olid) -> Self {
        Self::Olid(olid)
    }
}

impl From<Isbn13> for BookId {
    fn from(isbn: Isbn13) -> Self {
        Self::Isbn(isbn)
    }
}

impl FromStr for BookId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for BookId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<BookId> for String {
    fn from(id: BookId) -> Self {
        id.as_str().to_string()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
