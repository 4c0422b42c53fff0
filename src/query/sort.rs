//! Sort vocabulary accepted by the search endpoint.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A sort order understood by the search service.
///
/// Parsing is a membership check against the fixed vocabulary; unknown tokens
/// are rejected, never passed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SortKey {
    Editions,
    Old,
    New,
    Rating,
    RatingAsc,
    RatingDesc,
    ReadingLog,
    WantToRead,
    CurrentlyReading,
    AlreadyRead,
    Title,
    Scans,
    LccSort,
    LccSortAsc,
    LccSortDesc,
    DdcSort,
    DdcSortAsc,
    DdcSortDesc,
    EbookAccess,
    EbookAccessAsc,
    EbookAccessDesc,
    Key,
    KeyAsc,
    KeyDesc,
    Random,
    RandomAsc,
    RandomDesc,
    RandomHourly,
    RandomDaily,
}

impl SortKey {
    /// The full vocabulary.
    pub const ALL: [Self; 29] = [
        Self::Editions,
        Self::Old,
        Self::New,
        Self::Rating,
        Self::RatingAsc,
        Self::RatingDesc,
        Self::ReadingLog,
        Self::WantToRead,
        Self::CurrentlyReading,
        Self::AlreadyRead,
        Self::Title,
        Self::Scans,
        Self::LccSort,
        Self::LccSortAsc,
        Self::LccSortDesc,
        Self::DdcSort,
        Self::DdcSortAsc,
        Self::DdcSortDesc,
        Self::EbookAccess,
        Self::EbookAccessAsc,
        Self::EbookAccessDesc,
        Self::Key,
        Self::KeyAsc,
        Self::KeyDesc,
        Self::Random,
        Self::RandomAsc,
        Self::RandomDesc,
        Self::RandomHourly,
        Self::RandomDaily,
    ];

    /// Token sent as the `sort` parameter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Editions => "editions",
            Self::Old => "old",
            Self::New => "new",
            Self::Rating => "rating",
            Self::RatingAsc => "rating asc",
            Self::RatingDesc => "rating desc",
            Self::ReadingLog => "readinglog",
            Self::WantToRead => "want_to_read",
            Self::CurrentlyReading => "currently_reading",
            Self::AlreadyRead => "already_read",
            Self::Title => "title",
            Self::Scans => "scans",
            Self::LccSort => "lcc_sort",
            Self::LccSortAsc => "lcc_sort asc",
            Self::LccSortDesc => "lcc_sort desc",
            Self::DdcSort => "ddc_sort",
            Self::DdcSortAsc => "ddc_sort asc",
            Self::DdcSortDesc => "ddc_sort desc",
            Self::EbookAccess => "ebook_access",
            Self::EbookAccessAsc => "ebook_access asc",
            Self::EbookAccessDesc => "ebook_access desc",
            Self::Key => "key",
            Self::KeyAsc => "key asc",
            Self::KeyDesc => "key desc",
            Self::Random => "random",
            Self::RandomAsc => "random asc",
            Self::RandomDesc => "random desc",
            Self::RandomHourly => "random.hourly",
            Self::RandomDaily => "random.daily",
        }
    }

    /// Looks a token up in the vocabulary.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownSort`] if the token is not listed.
    pub fn parse(token: &str) -> Result<Self, ValidationError> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == token)
            .ok_or_else(|| ValidationError::UnknownSort {
                value: token.to_string(),
            })
    }
}

impl FromStr for SortKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SortKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SortKey> for String {
    fn from(key: SortKey) -> Self {
        key.as_str().to_string()
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
