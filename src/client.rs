//! Resource accessors.
//!
//! [`OpenLibrary`] validates input, builds the request with [`crate::requests`],
//! performs exactly one fetch, turns non-2xx statuses into
//! [`TransportError::HttpStatus`] and decodes the body with the entity's
//! shape table. There is no retry and no caching.
//!
//! # Example
//!
//! ```no_run
//! use openlib_core::ident::Olid;
//! use openlib_core::OpenLibrary;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenLibrary::new()?;
//! let book = client.book(&Olid::parse("OL45804W")?).await?;
//! println!("{}", book.title);
//! # Ok(())
//! # }
//! ```

use tracing::{debug, warn};

use crate::error::{ClientError, TransportError};
use crate::ident::{BookId, CoverSize, Isbn13, Olid};
use crate::model::{Author, AuthorSearchResults, Book, Edition, Page, Ratings, SearchResults};
use crate::normalize::{Entity, decode};
use crate::query::SearchRequest;
use crate::requests::{self, Paging};
use crate::transport::{ApiRequest, ApiResponse, ClientConfig, ReqwestTransport, Transport};

/// Typed client over a [`Transport`].
#[derive(Debug, Clone)]
pub struct OpenLibrary<T = ReqwestTransport> {
    transport: T,
}

impl OpenLibrary<ReqwestTransport> {
    /// Client with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Setup`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_config(ClientConfig::default())
    }

    /// # Errors
    ///
    /// Returns [`TransportError::Setup`] if `config` is invalid or the HTTP
    /// client cannot be built.
    pub fn with_config(config: ClientConfig) -> Result<Self, TransportError> {
        Ok(Self::with_transport(ReqwestTransport::new(config)?))
    }
}

impl<T: Transport> OpenLibrary<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches a work.
    ///
    /// # Errors
    ///
    /// [`ClientError::Validation`] if `work` is not a work id, otherwise any
    /// transport or decode failure.
    #[tracing::instrument(skip_all, fields(work = %work))]
    pub async fn book(&self, work: &Olid) -> Result<Book, ClientError> {
        let request = requests::book(work)?;
        self.get_entity(&request).await
    }

    /// Fetches an edition by edition id or ISBN.
    ///
    /// # Errors
    ///
    /// [`ClientError::Validation`] for an OLID that is not an edition,
    /// otherwise any transport or decode failure.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn edition(&self, id: &BookId) -> Result<Edition, ClientError> {
        let request = requests::edition(id)?;
        self.get_entity(&request).await
    }

    /// Fetches one page of a work's editions.
    ///
    /// # Errors
    ///
    /// [`ClientError::Validation`] if `work` is not a work id, otherwise any
    /// transport or decode failure.
    #[tracing::instrument(skip_all, fields(work = %work, offset = paging.offset, limit = paging.limit))]
    pub async fn editions(&self, work: &Olid, paging: Paging) -> Result<Page<Edition>, ClientError> {
        let request = requests::editions(work, paging)?;
        self.get_page(&request).await
    }

    /// Fetches an author.
    ///
    /// # Errors
    ///
    /// [`ClientError::Validation`] if `author` is not an author id, otherwise
    /// any transport or decode failure.
    #[tracing::instrument(skip_all, fields(author = %author))]
    pub async fn author(&self, author: &Olid) -> Result<Author, ClientError> {
        let request = requests::author(author)?;
        self.get_entity(&request).await
    }

    /// Fetches one page of an author's works.
    ///
    /// # Errors
    ///
    /// [`ClientError::Validation`] if `author` is not an author id, otherwise
    /// any transport or decode failure.
    #[tracing::instrument(skip_all, fields(author = %author, offset = paging.offset, limit = paging.limit))]
    pub async fn author_works(&self, author: &Olid, paging: Paging) -> Result<Page<Book>, ClientError> {
        let request = requests::author_works(author, paging)?;
        self.get_page(&request).await
    }

    /// Fetches a work's reader ratings.
    ///
    /// # Errors
    ///
    /// [`ClientError::Validation`] if `work` is not a work id, otherwise any
    /// transport or decode failure.
    #[tracing::instrument(skip_all, fields(work = %work))]
    pub async fn ratings(&self, work: &Olid) -> Result<Ratings, ClientError> {
        let request = requests::ratings(work)?;
        self.get_entity(&request).await
    }

    /// Runs a work search.
    ///
    /// # Errors
    ///
    /// [`ClientError::Validation`] if the query does not compile, otherwise
    /// any transport or decode failure.
    #[tracing::instrument(skip_all)]
    pub async fn search(&self, search: &SearchRequest) -> Result<SearchResults, ClientError> {
        let request = requests::search(search)?;
        self.get_entity(&request).await
    }

    /// Searches authors by name.
    ///
    /// # Errors
    ///
    /// [`ClientError::Validation`] for a blank name, otherwise any transport or
    /// decode failure.
    #[tracing::instrument(skip_all, fields(name = %name))]
    pub async fn search_authors(&self, name: &str, paging: Paging) -> Result<AuthorSearchResults, ClientError> {
        let request = requests::search_authors(name, paging)?;
        self.get_entity(&request).await
    }

    /// Downloads a cover image. The body is returned as-is.
    ///
    /// # Errors
    ///
    /// Any transport failure, including a non-2xx status.
    #[tracing::instrument(skip_all, fields(isbn = %isbn, size = %size))]
    pub async fn cover(&self, isbn: &Isbn13, size: CoverSize) -> Result<Vec<u8>, ClientError> {
        let response = self.send(&requests::cover(isbn, size)).await?;
        Ok(response.body)
    }

    async fn get_entity<E: Entity>(&self, request: &ApiRequest) -> Result<E, ClientError> {
        let response = self.send(request).await?;
        Ok(decode(&response.body)?)
    }

    async fn get_page<E: Entity>(&self, request: &ApiRequest) -> Result<Page<E>, ClientError> {
        let response = self.send(request).await?;
        Ok(Page::decode(&response.body)?)
    }

    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ClientError> {
        debug!(path = %request.path, params = request.params.len(), "Sending request");
        let response = self.transport.fetch(request).await?;
        if !response.is_success() {
            warn!(path = %request.path, status = response.status, "Open Library returned an error status");
            return Err(TransportError::HttpStatus {
                path: request.path.clone(),
                status: response.status,
            }
            .into());
        }
        debug!(status = response.status, bytes = response.body.len(), "Request succeeded");
        Ok(response)
    }
}
