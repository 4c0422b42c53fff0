//! Integration tests for the accessors over the reqwest transport, served by wiremock.

mod support;
use support::socket_guard::start_mock_server_or_skip;

use openlib_core::{
    BookId, ClientConfig, ClientError, CoverSize, DecodeError, Isbn13, Olid, OpenLibrary, Paging,
    Query, Range, SearchRequest, SortKey, TransportError,
};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> OpenLibrary {
    let config = ClientConfig {
        api_base_url: server.uri(),
        covers_base_url: server.uri(),
        user_agent: "openlib-tests/1.0".to_string(),
        ..ClientConfig::default()
    };
    OpenLibrary::with_config(config).unwrap()
}

fn olid(raw: &str) -> Olid {
    Olid::parse(raw).unwrap()
}

// ==================== Entities ====================

#[tokio::test]
async fn test_book_unwraps_versioned_and_reference_fields() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("GET"))
        .and(path("/works/OL45804W.json"))
        .and(header("user-agent", "openlib-tests/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "key": "/works/OL45804W",
            "title": "Fantastic Mr Fox",
            "description": {"type": "/type/text", "value": "A clever fox."},
            "authors": [{"author": {"key": "/authors/OL34184A"}, "type": {"key": "/type/author_role"}}],
            "type": {"key": "/type/work"},
            "revision": 3,
            "created": {"type": "/type/datetime", "value": "2009-10-15T11:34:21.437031"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let book = client_for(&server).book(&olid("OL45804W")).await.unwrap();
    assert_eq!(book.key, olid("OL45804W"));
    assert_eq!(book.description.as_deref(), Some("A clever fox."));
    assert_eq!(book.authors, vec![olid("OL34184A")]);
    assert_eq!(book.record_type.as_deref(), Some("work"));
    assert_eq!(
        book.revision.created.as_deref(),
        Some("2009-10-15T11:34:21.437031")
    );
}

#[tokio::test]
async fn test_edition_by_isbn_uses_canonical_isbn13_path() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("GET"))
        .and(path("/isbn/9780140328721.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "key": "/books/OL7353617M",
            "title": "Fantastic Mr. Fox",
            "works": [{"key": "/works/OL45804W"}],
            "isbn_10": ["0140328726"],
            "local_id": ["urn:trent:0116301499939"],
            "notes": {"type": "/type/text", "value": "Puffin edition"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let id = BookId::parse("0-14-032872-6").unwrap();
    let edition = client_for(&server).edition(&id).await.unwrap();
    assert_eq!(edition.key, olid("OL7353617M"));
    assert_eq!(edition.works, vec![olid("OL45804W")]);
    assert_eq!(edition.local_id.as_deref(), Some("urn:trent:0116301499939"));
    assert_eq!(edition.notes.as_deref(), Some("Puffin edition"));
    assert_eq!(
        edition.isbn13().unwrap(),
        Some(Isbn13::parse("9780140328721").unwrap())
    );
}

#[tokio::test]
async fn test_author_links_have_type_unwrapped() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("GET"))
        .and(path("/authors/OL23919A.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "key": "/authors/OL23919A",
            "name": "J. K. Rowling",
            "bio": "British author.",
            "links": [{"title": "Official Site", "url": "https://www.jkrowling.com", "type": {"key": "/type/link"}}]
        })))
        .mount(&server)
        .await;

    let author = client_for(&server).author(&olid("OL23919A")).await.unwrap();
    assert_eq!(author.name, "J. K. Rowling");
    assert_eq!(author.bio.as_deref(), Some("British author."));
    assert_eq!(author.links[0].link_type.as_deref(), Some("link"));
}

#[tokio::test]
async fn test_ratings_are_flattened() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("GET"))
        .and(path("/works/OL45804W/ratings.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "summary": {"average": 4.0, "count": 3, "sortable": 3.1},
            "counts": {"1": 0, "2": 0, "3": 1, "4": 1, "5": 1}
        })))
        .mount(&server)
        .await;

    let ratings = client_for(&server).ratings(&olid("OL45804W")).await.unwrap();
    assert_eq!(ratings.count, 3);
    assert_eq!(ratings.average, Some(4.0));
    assert_eq!(ratings.star_counts.get(&5), Some(&1));
}

// ==================== Listings ====================

#[tokio::test]
async fn test_editions_page_sends_paging_and_normalizes_entries() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("GET"))
        .and(path("/works/OL45804W/editions.json"))
        .and(query_param("offset", "50"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "links": {
                "self": "/works/OL45804W/editions.json?offset=50&limit=2",
                "work": "/works/OL45804W",
                "next": "/works/OL45804W/editions.json?offset=52&limit=2"
            },
            "size": 60,
            "entries": [
                {"key": "/books/OL1M", "title": "One", "works": [{"key": "/works/OL45804W"}]},
                {"key": "/books/OL2M", "title": "Two"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server)
        .editions(&olid("OL45804W"), Paging::new(50, 2))
        .await
        .unwrap();
    assert_eq!(page.size, Some(60));
    assert_eq!(page.entries.len(), 2);
    assert_eq!(page.entries[0].key, olid("OL1M"));
    assert_eq!(page.entries[0].works, vec![olid("OL45804W")]);
    assert!(page.links.next.is_some());
}

#[tokio::test]
async fn test_entry_decode_error_reports_indexed_field() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("GET"))
        .and(path("/authors/OL23919A/works.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "size": 1,
            "entries": [{"key": "/works/OL1W", "title": "T", "type": ["/type/work"]}]
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .author_works(&olid("OL23919A"), Paging::default())
        .await
        .unwrap_err();
    match err {
        ClientError::Decode(DecodeError::UnexpectedShape { field, .. }) => {
            assert_eq!(field, "entries[0].type");
        }
        other => panic!("expected shape error, got {other:?}"),
    }
}

// ==================== Search ====================

#[tokio::test]
async fn test_search_sends_compiled_query_and_params() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param(
            "q",
            r#"title:"dune" AND first_publish_year:[1960 TO 1970]"#,
        ))
        .and(query_param("sort", "new"))
        .and(query_param("lang", "en"))
        .and(query_param("fields", "key,title"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "numFound": 1,
            "num_found": 1,
            "start": 0,
            "docs": [{"key": "/works/OL893415W", "title": "Dune"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = SearchRequest::new(
        Query::new()
            .title("dune")
            .first_publish_year(Range::between("1960", "1970")),
    )
    .sort(SortKey::New)
    .fields(["title", "key"])
    .limit(5);
    let results = client_for(&server).search(&request).await.unwrap();
    assert_eq!(results.num_found, 1);
    assert_eq!(results.docs[0].key, Some(olid("OL893415W")));
}

#[tokio::test]
async fn test_search_authors_sends_name() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("GET"))
        .and(path("/search/authors.json"))
        .and(query_param("q", "tolkien"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "numFound": 0,
            "num_found": 0,
            "start": 0,
            "docs": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let results = client_for(&server)
        .search_authors("tolkien", Paging::default())
        .await
        .unwrap();
    assert_eq!(results.num_found, 0);
}

// ==================== Covers And Errors ====================

#[tokio::test]
async fn test_cover_bytes_returned_verbatim() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("GET"))
        .and(path("/b/isbn/9780140328721-S.jpg"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"\xff\xd8\xff\xe0JFIF".to_vec())
                .insert_header("Content-Type", "image/jpeg"),
        )
        .mount(&server)
        .await;

    let isbn = Isbn13::parse("9780140328721").unwrap();
    let bytes = client_for(&server)
        .cover(&isbn, CoverSize::Small)
        .await
        .unwrap();
    assert_eq!(bytes, b"\xff\xd8\xff\xe0JFIF");
}

#[tokio::test]
async fn test_not_found_maps_to_http_status() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("GET"))
        .and(path("/works/OL999W.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client_for(&server).book(&olid("OL999W")).await.unwrap_err();
    match err {
        ClientError::Transport(transport) => {
            assert!(transport.is_not_found());
            assert!(matches!(transport, TransportError::HttpStatus { status: 404, .. }));
        }
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_html_body_is_decode_error() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("GET"))
        .and(path("/works/OL1W.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).book(&olid("OL1W")).await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(DecodeError::InvalidJson { .. })));
}

#[tokio::test]
async fn test_kind_mismatch_never_reaches_server() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server).author(&olid("OL45804W")).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
}
