//! Boundary to the HTTP transport.
//!
//! The accessors never build host names or full URLs. They hand an
//! [`ApiRequest`] (service, relative path, query parameters) to a
//! [`Transport`] and get back the raw status and body. [`ReqwestTransport`]
//! is the default implementation; tests and embedders can supply their own.

mod config;
mod http;

pub use config::ClientConfig;
pub use http::ReqwestTransport;

use async_trait::async_trait;

use crate::error::TransportError;

/// Which host a request goes to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Service {
    /// JSON API (`openlibrary.org`)
    #[default]
    Api,
    /// Cover images (`covers.openlibrary.org`)
    Covers,
}

/// One outbound request, as plain data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiRequest {
    pub service: Service,
    /// Path relative to the service base URL, without a leading slash
    pub path: String,
    /// Query parameters in send order
    pub params: Vec<(String, String)>,
}

impl ApiRequest {
    /// Request to the JSON API.
    #[must_use]
    pub fn api(path: impl Into<String>) -> Self {
        Self {
            service: Service::Api,
            path: path.into(),
            params: Vec::new(),
        }
    }

    /// Request to the covers service.
    #[must_use]
    pub fn covers(path: impl Into<String>) -> Self {
        Self {
            service: Service::Covers,
            path: path.into(),
            params: Vec::new(),
        }
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((name.into(), value.to_string()));
        self
    }

    /// Appends query parameters, keeping their order.
    #[must_use]
    pub fn params(mut self, params: impl IntoIterator<Item = (String, String)>) -> Self {
        self.params.extend(params);
        self
    }

    /// Value of the first parameter named `name`.
    #[must_use]
    pub fn param_value(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Raw answer from the transport. Any status is a successful fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs one HTTP GET for an [`ApiRequest`].
///
/// Implementations report non-2xx statuses through [`ApiResponse::status`]
/// and reserve [`TransportError`] for requests that produced no response.
/// This trait uses `async_trait` so clients can hold `Box<dyn Transport>`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// # Errors
    ///
    /// Returns [`TransportError`] if no response was received.
    async fn fetch(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn fetch(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        (**self).fetch(request).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn fetch(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        (**self).fetch(request).await
    }
}
