use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Revision;
use crate::ident::Olid;
use crate::normalize::{Entity, Schema, Shape};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub key: Olid,
    pub name: String,
    pub personal_name: Option<String>,
    #[serde(default)]
    pub alternate_names: Vec<String>,
    pub birth_date: Option<String>,
    pub death_date: Option<String>,
    pub bio: Option<String>,
    /// Photo ids on the covers service
    #[serde(default)]
    pub photos: Vec<i64>,
    #[serde(default)]
    pub links: Vec<Link>,
    /// Ids on other services (wikidata, viaf, isni, ...)
    #[serde(default)]
    pub remote_ids: BTreeMap<String, String>,
    #[serde(default)]
    pub source_records: Vec<String>,
    #[serde(rename = "type")]
    pub record_type: Option<String>,
    #[serde(flatten)]
    pub revision: Revision,
}

/// External link attached to an author record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub title: String,
    pub url: String,
    #[serde(rename = "type")]
    pub link_type: Option<String>,
}

const LINK_SCHEMA: Schema = &[("type", Shape::KeyRef)];

impl Entity for Author {
    const NAME: &'static str = "author";
    const SCHEMA: Schema = &[
        ("key", Shape::Path),
        ("bio", Shape::Versioned),
        ("links", Shape::ListOf(&Shape::Record(LINK_SCHEMA))),
        ("type", Shape::KeyRef),
        ("created", Shape::Versioned),
        ("last_modified", Shape::Versioned),
    ];
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::normalize::decode;

    #[test]
    fn test_decode_author() {
        let body = json!({
            "key": "/authors/OL23919A",
            "name": "J. K. Rowling",
            "personal_name": "J. K. Rowling",
            "alternate_names": ["Joanne Rowling", "Robert Galbraith"],
            "birth_date": "31 July 1965",
            "bio": {"type": "/type/text", "value": "British author."},
            "photos": [5543033],
            "links": [
                {"title": "Official Site", "url": "https://www.jkrowling.com", "type": {"key": "/type/link"}}
            ],
            "remote_ids": {"viaf": "116796842", "wikidata": "Q34660"},
            "type": {"key": "/type/author"},
            "last_modified": {"type": "/type/datetime", "value": "2024-01-01T00:00:00.000000"}
        });
        let author: Author = decode(body.to_string().as_bytes()).unwrap();
        assert!(author.key.is_author());
        assert_eq!(author.bio.as_deref(), Some("British author."));
        assert_eq!(author.links[0].link_type.as_deref(), Some("link"));
        assert_eq!(author.remote_ids["wikidata"], "Q34660");
        assert!(author.death_date.is_none());
        assert_eq!(
            author.revision.last_modified.as_deref(),
            Some("2024-01-01T00:00:00.000000")
        );
    }

    #[test]
    fn test_decode_author_with_bare_bio() {
        let body = json!({"key": "/authors/OL1A", "name": "Anon", "bio": "Short."});
        let author: Author = decode(body.to_string().as_bytes()).unwrap();
        assert_eq!(author.bio.as_deref(), Some("Short."));
        assert!(author.links.is_empty());
    }
}
