use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DecodeError;
use crate::normalize::{Entity, Shape, describe, normalize, parse_object};

/// One page of a listing endpoint (`works/{id}/editions.json`,
/// `authors/{id}/works.json`).
///
/// Entries are decoded with the schema of `T`. Fetching further pages is up
/// to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// Total number of entries across all pages
    pub size: Option<u64>,
    pub entries: Vec<T>,
    pub links: PageLinks,
}

/// Relative links to neighbouring pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    #[serde(rename = "self")]
    pub current: Option<String>,
    pub next: Option<String>,
    pub prev: Option<String>,
}

#[derive(Deserialize)]
struct PageMeta {
    size: Option<u64>,
    #[serde(default)]
    links: PageLinks,
}

impl<T: Entity> Page<T> {
    /// Decodes a listing body, applying `T`'s schema to every entry.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] naming `entries[i]` for the first entry that
    /// fails, or the page itself if the envelope is malformed.
    pub fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        let mut object = parse_object(body, "page")?;
        let raw_entries = object.remove("entries");

        let meta: PageMeta =
            serde_json::from_value(Value::Object(object)).map_err(|e| DecodeError::Schema {
                target: "page",
                message: e.to_string(),
            })?;

        let entry_shape = Shape::Record(T::SCHEMA);
        let items = match raw_entries {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(DecodeError::UnexpectedShape {
                    field: "entries".to_string(),
                    expected: "list",
                    found: describe(&other),
                });
            }
        };

        let mut entries = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let field = format!("entries[{index}]");
            let found = describe(&item);
            let Some(normalized) = normalize(&field, item, &entry_shape)? else {
                return Err(DecodeError::UnexpectedShape {
                    field,
                    expected: "object",
                    found,
                });
            };
            let entry = serde_json::from_value(normalized).map_err(|e| DecodeError::Schema {
                target: T::NAME,
                message: format!("entries[{index}]: {e}"),
            })?;
            entries.push(entry);
        }

        Ok(Self {
            size: meta.size,
            entries,
            links: meta.links,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::{Book, Edition};

    #[test]
    fn test_decode_editions_page() {
        let body = json!({
            "links": {
                "self": "/works/OL45804W/editions.json",
                "work": "/works/OL45804W",
                "next": "/works/OL45804W/editions.json?offset=2"
            },
            "size": 73,
            "entries": [
                {"key": "/books/OL1M", "title": "First", "works": [{"key": "/works/OL45804W"}]},
                {"key": "/books/OL2M", "title": "Second", "local_id": []}
            ]
        });
        let page: Page<Edition> = Page::decode(body.to_string().as_bytes()).unwrap();
        assert_eq!(page.size, Some(73));
        assert_eq!(page.entries.len(), 2);
        assert_eq!(page.entries[0].works[0].as_str(), "OL45804W");
        assert!(page.entries[1].local_id.is_none());
        assert_eq!(
            page.links.next.as_deref(),
            Some("/works/OL45804W/editions.json?offset=2")
        );
        assert!(page.links.prev.is_none());
    }

    #[test]
    fn test_decode_author_works_page() {
        let body = json!({
            "links": {"self": "/authors/OL34184A/works.json", "author": "/authors/OL34184A"},
            "size": 1,
            "entries": [{
                "key": "/works/OL45804W",
                "title": "Fantastic Mr Fox",
                "authors": [{"author": {"key": "/authors/OL34184A"}, "type": {"key": "/type/author_role"}}]
            }]
        });
        let page: Page<Book> = Page::decode(body.to_string().as_bytes()).unwrap();
        assert_eq!(page.entries[0].authors[0].as_str(), "OL34184A");
    }

    #[test]
    fn test_bad_entry_is_named() {
        let body = br#"{"size": 1, "entries": [{"key": "/books/OL1M", "title": "x", "works": ["OL1W"]}]}"#;
        let err = Page::<Edition>::decode(body).unwrap_err();
        assert!(
            matches!(err, DecodeError::UnexpectedShape { ref field, .. } if field == "entries[0].works[0]")
        );
    }

    #[test]
    fn test_null_entry_rejected() {
        let body = br#"{"size": 2, "entries": [{"key": "/works/OL1W", "title": "T"}, null]}"#;
        let err = Page::<Book>::decode(body).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnexpectedShape {
                field: "entries[1]".to_string(),
                expected: "object",
                found: "null".to_string()
            }
        );
    }

    #[test]
    fn test_entries_must_be_a_list() {
        let err = Page::<Edition>::decode(br#"{"entries": {}}"#).unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedShape { ref field, .. } if field == "entries"));
    }
}
