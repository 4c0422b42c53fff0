//! Search fields and the values they can hold.

use std::fmt;

/// A searchable field.
///
/// Declaration order is render order: compiled clauses always follow this
/// order no matter how the query was built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QueryField {
    Title,
    Subtitle,
    Authors,
    Subject,
    Place,
    Person,
    Publisher,
    Isbn,
    /// Dewey decimal classification
    Ddc,
    /// Library of Congress classification
    Lcc,
    FirstPublishYear,
}

impl QueryField {
    /// All fields in render order.
    pub const ALL: [Self; 11] = [
        Self::Title,
        Self::Subtitle,
        Self::Authors,
        Self::Subject,
        Self::Place,
        Self::Person,
        Self::Publisher,
        Self::Isbn,
        Self::Ddc,
        Self::Lcc,
        Self::FirstPublishYear,
    ];

    /// Field name as written in the query string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Subtitle => "subtitle",
            Self::Authors => "authors",
            Self::Subject => "subject",
            Self::Place => "place",
            Self::Person => "person",
            Self::Publisher => "publisher",
            Self::Isbn => "isbn",
            Self::Ddc => "ddc",
            Self::Lcc => "lcc",
            Self::FirstPublishYear => "first_publish_year",
        }
    }

    /// Looks a field up by its query-string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }

    /// Whether the field takes `[start TO end]` ranges.
    #[must_use]
    pub fn supports_range(self) -> bool {
        matches!(self, Self::Ddc | Self::FirstPublishYear)
    }

    /// Whether the field takes a set of alternatives.
    #[must_use]
    pub fn supports_collection(self) -> bool {
        !matches!(self, Self::FirstPublishYear)
    }
}

impl fmt::Display for QueryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bounds of a range clause. Either bound may be open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Range {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl Range {
    /// Range with both bounds.
    #[must_use]
    pub fn between(start: impl fmt::Display, end: impl fmt::Display) -> Self {
        Self {
            start: Some(start.to_string()),
            end: Some(end.to_string()),
        }
    }

    /// Range open at the end.
    #[must_use]
    pub fn starting(start: impl fmt::Display) -> Self {
        Self {
            start: Some(start.to_string()),
            end: None,
        }
    }

    /// Range open at the start.
    #[must_use]
    pub fn ending(end: impl fmt::Display) -> Self {
        Self {
            start: None,
            end: Some(end.to_string()),
        }
    }

    /// True when neither bound is set; such a range renders nothing.
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// Value held by a query field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    /// Single value, rendered `field:"value"`
    Term(String),
    /// Alternatives, rendered `(field:"a" OR field:"b")`
    AnyOf(Vec<String>),
    /// Bounds, rendered `field:[start TO end]`
    Range(Range),
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Term(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Term(value)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        Self::AnyOf(values)
    }
}

impl From<Vec<&str>> for QueryValue {
    fn from(values: Vec<&str>) -> Self {
        Self::AnyOf(values.into_iter().map(str::to_string).collect())
    }
}

impl From<Range> for QueryValue {
    fn from(range: Range) -> Self {
        Self::Range(range)
    }
}
