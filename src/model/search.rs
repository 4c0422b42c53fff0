use serde::{Deserialize, Serialize};

use crate::ident::Olid;
use crate::normalize::{Entity, Schema, Shape};

/// Result of a work search.
///
/// Document fields depend on the requested output fields, so every one of
/// them is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    pub num_found: u64,
    #[serde(default)]
    pub start: u64,
    #[serde(default)]
    pub docs: Vec<SearchDoc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDoc {
    pub key: Option<Olid>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    #[serde(default)]
    pub author_name: Vec<String>,
    #[serde(default)]
    pub author_key: Vec<Olid>,
    pub first_publish_year: Option<i32>,
    pub edition_count: Option<u32>,
    #[serde(default)]
    pub isbn: Vec<String>,
    /// Cover id on the covers service
    pub cover_i: Option<i64>,
    #[serde(default)]
    pub language: Vec<String>,
    #[serde(default)]
    pub publisher: Vec<String>,
    #[serde(default)]
    pub subject: Vec<String>,
}

const SEARCH_DOC_SCHEMA: Schema = &[("key", Shape::Path)];

impl Entity for SearchResults {
    const NAME: &'static str = "search results";
    const SCHEMA: Schema = &[("docs", Shape::ListOf(&Shape::Record(SEARCH_DOC_SCHEMA)))];
}

/// Result of an author search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSearchResults {
    pub num_found: u64,
    #[serde(default)]
    pub start: u64,
    #[serde(default)]
    pub docs: Vec<AuthorDoc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorDoc {
    pub key: Option<Olid>,
    pub name: Option<String>,
    #[serde(default)]
    pub alternate_names: Vec<String>,
    pub birth_date: Option<String>,
    pub death_date: Option<String>,
    pub top_work: Option<String>,
    pub work_count: Option<u32>,
    #[serde(default)]
    pub top_subjects: Vec<String>,
}

impl Entity for AuthorSearchResults {
    const NAME: &'static str = "author search results";
    const SCHEMA: Schema = &[("docs", Shape::ListOf(&Shape::Record(SEARCH_DOC_SCHEMA)))];
}
