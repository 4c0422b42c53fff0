//! Open Library identifiers (`OL<digits><W|A|M>`).

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::strip_separators;
use crate::error::ValidationError;

/// Canonical OLID: `OL`, digits, kind suffix.
#[allow(clippy::expect_used)]
static OLID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^OL[0-9]+([WAM])$").expect("OLID regex is valid") // Static pattern, safe to panic
});

/// What an [`Olid`] refers to, decided by its trailing letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OlidKind {
    /// `W` - a creative work
    Work,
    /// `A` - a person
    Author,
    /// `M` - a specific published edition
    Edition,
}

impl OlidKind {
    /// Kind name with an article, for messages ("a work").
    #[must_use]
    pub fn with_article(self) -> &'static str {
        match self {
            Self::Work => "a work",
            Self::Author => "an author",
            Self::Edition => "an edition",
        }
    }
}

impl fmt::Display for OlidKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Work => write!(f, "work"),
            Self::Author => write!(f, "author"),
            Self::Edition => write!(f, "edition"),
        }
    }
}

/// An Open Library identifier.
///
/// Input is normalized by removing whitespace and hyphens and uppercasing, so
/// `ol-45804 w` and `OL45804W` are the same identifier. The kind is fixed at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Olid {
    code: String,
    kind: OlidKind,
}

impl Olid {
    /// Parses and normalizes an Open Library identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidIdentifier`] if the normalized input
    /// does not match `OL<digits><W|A|M>`.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let code = strip_separators(raw).to_ascii_uppercase();
        let kind = OLID_PATTERN
            .captures(&code)
            .and_then(|caps| caps.get(1))
            .and_then(|suffix| match suffix.as_str() {
                "W" => Some(OlidKind::Work),
                "A" => Some(OlidKind::Author),
                "M" => Some(OlidKind::Edition),
                _ => None,
            })
            .ok_or_else(|| {
                ValidationError::invalid_identifier(
                    "Open Library ID",
                    raw,
                    "expected OL<digits> followed by W, A or M",
                    "Use a code like OL45804W (work), OL23919A (author) or OL7353617M (edition)",
                )
            })?;
        Ok(Self { code, kind })
    }

    /// Returns true if `raw` parses as an OLID.
    #[must_use]
    pub fn is_olid(raw: &str) -> bool {
        Self::parse(raw).is_ok()
    }

    /// Canonical uppercase text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn kind(&self) -> OlidKind {
        self.kind
    }

    #[must_use]
    pub fn is_work(&self) -> bool {
        self.kind == OlidKind::Work
    }

    #[must_use]
    pub fn is_author(&self) -> bool {
        self.kind == OlidKind::Author
    }

    #[must_use]
    pub fn is_edition(&self) -> bool {
        self.kind == OlidKind::Edition
    }

    /// Checks that this identifier is of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::KindMismatch`] otherwise.
    pub fn require(&self, kind: OlidKind) -> Result<&Self, ValidationError> {
        if self.kind == kind {
            Ok(self)
        } else {
            Err(ValidationError::KindMismatch {
                id: self.code.clone(),
                expected: kind.with_article(),
            })
        }
    }
}

impl FromStr for Olid {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Olid {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for Olid {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Olid> for String {
    fn from(olid: Olid) -> Self {
        olid.code
    }
}

impl fmt::Display for Olid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}
