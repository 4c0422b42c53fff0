//! Pure request builders, one per resource accessor.
//!
//! Each builder checks the identifier kind and returns the [`ApiRequest`] to
//! send. Nothing here performs I/O, so the exact path and parameters of every
//! accessor can be checked without a transport.

use crate::error::ValidationError;
use crate::ident::{BookId, CoverSize, Isbn13, Olid, OlidKind};
use crate::query::SearchRequest;
use crate::transport::ApiRequest;

const DEFAULT_LIMIT: u32 = 50;

/// Offset and limit passed through to listing endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub offset: u32,
    pub limit: u32,
}

impl Paging {
    #[must_use]
    pub fn new(offset: u32, limit: u32) -> Self {
        Self { offset, limit }
    }

    fn apply(self, request: ApiRequest) -> ApiRequest {
        request.param("offset", self.offset).param("limit", self.limit)
    }
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// `works/{id}.json`
///
/// # Errors
///
/// Returns [`ValidationError::KindMismatch`] unless `work` is a work id.
pub fn book(work: &Olid) -> Result<ApiRequest, ValidationError> {
    work.require(OlidKind::Work)?;
    Ok(ApiRequest::api(format!("works/{work}.json")))
}

/// `books/{id}.json` for an edition id, `isbn/{isbn}.json` for an ISBN.
///
/// # Errors
///
/// Returns [`ValidationError::KindMismatch`] for an OLID that is not an edition.
pub fn edition(id: &BookId) -> Result<ApiRequest, ValidationError> {
    match id {
        BookId::Olid(olid) => {
            olid.require(OlidKind::Edition)?;
            Ok(ApiRequest::api(format!("books/{olid}.json")))
        }
        BookId::Isbn(isbn) => Ok(ApiRequest::api(format!("isbn/{isbn}.json"))),
    }
}

/// `works/{id}/editions.json?offset=..&limit=..`
///
/// # Errors
///
/// Returns [`ValidationError::KindMismatch`] unless `work` is a work id.
pub fn editions(work: &Olid, paging: Paging) -> Result<ApiRequest, ValidationError> {
    work.require(OlidKind::Work)?;
    Ok(paging.apply(ApiRequest::api(format!("works/{work}/editions.json"))))
}

/// `authors/{id}.json`
///
/// # Errors
///
/// Returns [`ValidationError::KindMismatch`] unless `author` is an author id.
pub fn author(author: &Olid) -> Result<ApiRequest, ValidationError> {
    author.require(OlidKind::Author)?;
    Ok(ApiRequest::api(format!("authors/{author}.json")))
}

/// `authors/{id}/works.json?offset=..&limit=..`
///
/// # Errors
///
/// Returns [`ValidationError::KindMismatch`] unless `author` is an author id.
pub fn author_works(author: &Olid, paging: Paging) -> Result<ApiRequest, ValidationError> {
    author.require(OlidKind::Author)?;
    Ok(paging.apply(ApiRequest::api(format!("authors/{author}/works.json"))))
}

/// `works/{id}/ratings.json`
///
/// # Errors
///
/// Returns [`ValidationError::KindMismatch`] unless `work` is a work id.
pub fn ratings(work: &Olid) -> Result<ApiRequest, ValidationError> {
    work.require(OlidKind::Work)?;
    Ok(ApiRequest::api(format!("works/{work}/ratings.json")))
}

/// `search.json` with the compiled query and result-shaping parameters.
///
/// # Errors
///
/// Propagates query compilation errors.
pub fn search(request: &SearchRequest) -> Result<ApiRequest, ValidationError> {
    Ok(ApiRequest::api("search.json").params(request.to_params()?))
}

/// `search/authors.json?q=..&offset=..&limit=..`
///
/// # Errors
///
/// Returns [`ValidationError::EmptyQuery`] for a blank name.
pub fn search_authors(name: &str, paging: Paging) -> Result<ApiRequest, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyQuery);
    }
    Ok(paging.apply(ApiRequest::api("search/authors.json").param("q", name)))
}

/// `b/isbn/{isbn}-{S|M|L}.jpg` on the covers service.
#[must_use]
pub fn cover(isbn: &Isbn13, size: CoverSize) -> ApiRequest {
    ApiRequest::covers(format!("b/isbn/{isbn}-{size}.jpg"))
}
