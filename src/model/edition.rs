use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Revision;
use crate::error::ValidationError;
use crate::ident::{DeweyDecimal, Isbn13, Lccn, Olid};
use crate::normalize::{Entity, Schema, Shape};

/// A concrete published edition of a work.
///
/// Identifier lists are kept as the service sends them; [`Edition::isbn13`],
/// [`Edition::lccns`] and [`Edition::dewey_numbers`] parse them into value
/// types on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edition {
    pub key: Olid,
    pub title: String,
    pub subtitle: Option<String>,
    pub full_title: Option<String>,
    #[serde(default)]
    pub authors: Vec<Olid>,
    #[serde(default)]
    pub works: Vec<Olid>,
    #[serde(default)]
    pub publishers: Vec<String>,
    pub publish_date: Option<String>,
    #[serde(default)]
    pub publish_places: Vec<String>,
    pub number_of_pages: Option<u32>,
    pub description: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub isbn_10: Vec<String>,
    #[serde(default)]
    pub isbn_13: Vec<String>,
    #[serde(default)]
    pub lccn: Vec<String>,
    #[serde(default)]
    pub dewey_decimal_class: Vec<String>,
    #[serde(default)]
    pub lc_classifications: Vec<String>,
    #[serde(default)]
    pub covers: Vec<i64>,
    /// Language codes such as `eng`
    #[serde(default)]
    pub languages: Vec<String>,
    pub physical_format: Option<String>,
    pub weight: Option<String>,
    /// Third-party identifiers keyed by source (goodreads, librarything, ...)
    #[serde(default)]
    pub identifiers: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub subjects: Vec<String>,
    pub local_id: Option<String>,
    pub ocaid: Option<String>,
    pub edition_name: Option<String>,
    #[serde(default)]
    pub source_records: Vec<String>,
    #[serde(rename = "type")]
    pub record_type: Option<String>,
    #[serde(flatten)]
    pub revision: Revision,
}

impl Edition {
    /// The edition's ISBN as ISBN-13, preferring `isbn_13` over `isbn_10`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidIdentifier`] if the first listed ISBN
    /// does not validate.
    pub fn isbn13(&self) -> Result<Option<Isbn13>, ValidationError> {
        self.isbn_13
            .first()
            .or_else(|| self.isbn_10.first())
            .map(|raw| Isbn13::parse(raw))
            .transpose()
    }

    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidIdentifier`] for the first entry that
    /// is not a valid LCCN.
    pub fn lccns(&self) -> Result<Vec<Lccn>, ValidationError> {
        self.lccn.iter().map(|raw| Lccn::parse(raw)).collect()
    }

    /// Dewey numbers with segmentation marks (`/` and `'`) removed, so
    /// `813/.54` reads as `813.54`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidIdentifier`] for the first entry that
    /// is not a valid Dewey number.
    pub fn dewey_numbers(&self) -> Result<Vec<DeweyDecimal>, ValidationError> {
        self.dewey_decimal_class
            .iter()
            .map(|raw| {
                let cleaned: String = raw.chars().filter(|c| !matches!(c, '/' | '\'')).collect();
                DeweyDecimal::parse(&cleaned)
            })
            .collect()
    }
}

impl Entity for Edition {
    const NAME: &'static str = "edition";
    const SCHEMA: Schema = &[
        ("key", Shape::Path),
        ("authors", Shape::ListOf(&Shape::KeyRef)),
        ("works", Shape::ListOf(&Shape::KeyRef)),
        ("languages", Shape::ListOf(&Shape::KeyRef)),
        ("description", Shape::Versioned),
        ("notes", Shape::Versioned),
        ("local_id", Shape::Singleton(&Shape::Plain)),
        ("type", Shape::KeyRef),
        ("created", Shape::Versioned),
        ("last_modified", Shape::Versioned),
    ];
}
