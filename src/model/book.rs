use serde::{Deserialize, Serialize};

use super::Revision;
use crate::ident::Olid;
use crate::normalize::{Entity, Schema, Shape};

/// A work: the abstract book shared by all of its editions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub key: Olid,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    /// Author codes, in credit order
    #[serde(default)]
    pub authors: Vec<Olid>,
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub subject_places: Vec<String>,
    #[serde(default)]
    pub subject_people: Vec<String>,
    #[serde(default)]
    pub subject_times: Vec<String>,
    /// Cover ids on the covers service
    #[serde(default)]
    pub covers: Vec<i64>,
    pub first_publish_date: Option<String>,
    #[serde(rename = "type")]
    pub record_type: Option<String>,
    #[serde(flatten)]
    pub revision: Revision,
}

impl Entity for Book {
    const NAME: &'static str = "book";
    const SCHEMA: Schema = &[
        ("key", Shape::Path),
        ("description", Shape::Versioned),
        ("authors", Shape::ListOf(&Shape::Member("author", &Shape::KeyRef))),
        ("type", Shape::KeyRef),
        ("created", Shape::Versioned),
        ("last_modified", Shape::Versioned),
    ];
}
