//! Default transport backed by `reqwest`.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Proxy};
use tracing::{debug, warn};
use url::Url;

use super::{ApiRequest, ApiResponse, ClientConfig, Transport};
use crate::error::TransportError;

/// [`Transport`] that performs real HTTP requests.
///
/// Holds one connection-pooled client; cloning shares the pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    config: ClientConfig,
}

impl ReqwestTransport {
    /// Builds a transport from validated settings.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Setup`] if the configuration is invalid or the
    /// HTTP client cannot be constructed.
    pub fn new(config: ClientConfig) -> Result<Self, TransportError> {
        config.validate().map_err(|e| TransportError::Setup {
            reason: e.to_string(),
        })?;
        let client = build_http_client(&config)?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Full URL for `request`: service base URL, path, then query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidUrl`] if the result does not parse.
    pub fn request_url(&self, request: &ApiRequest) -> Result<Url, TransportError> {
        let base = self.config.base_url(request.service).trim_end_matches('/');
        let raw = format!("{base}/{}", request.path.trim_start_matches('/'));
        let mut url = Url::parse(&raw).map_err(|e| TransportError::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;
        if !request.params.is_empty() {
            url.query_pairs_mut().extend_pairs(request.params.iter());
        }
        Ok(url)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[tracing::instrument(skip(self, request), fields(service = ?request.service, path = %request.path))]
    async fn fetch(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.request_url(request)?;
        debug!(url = %url, "Requesting Open Library resource");

        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Open Library request failed");
                return Err(classify(&url, &e));
            }
        };

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| classify(&url, &e))?
            .to_vec();
        debug!(status, bytes = body.len(), "Received Open Library response");
        Ok(ApiResponse { status, body })
    }
}

fn classify(url: &Url, error: &reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout {
            url: url.to_string(),
        }
    } else {
        TransportError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}

fn build_http_client(config: &ClientConfig) -> Result<Client, TransportError> {
    match try_build_client(config, false) {
        Ok(client) => Ok(client),
        Err(BuildClientFailure::Panic) => {
            // Some sandboxed environments panic when querying system proxy
            // settings; retry with environment proxies only.
            warn!("HTTP client hit system proxy panic; using env-proxy fallback builder");
            match try_build_client(config, true) {
                Ok(client) => Ok(client),
                Err(BuildClientFailure::Panic) => Err(TransportError::Setup {
                    reason: "HTTP client construction panicked".to_string(),
                }),
                Err(BuildClientFailure::Build(error)) => Err(TransportError::Setup {
                    reason: format!("HTTP client construction failed: {error}"),
                }),
            }
        }
        Err(BuildClientFailure::Build(error)) => Err(TransportError::Setup {
            reason: format!("HTTP client construction failed: {error}"),
        }),
    }
}

enum BuildClientFailure {
    Panic,
    Build(reqwest::Error),
}

fn try_build_client(
    config: &ClientConfig,
    disable_system_proxy_lookup: bool,
) -> Result<Client, BuildClientFailure> {
    catch_unwind(AssertUnwindSafe(|| {
        let mut builder = base_builder(config);
        if disable_system_proxy_lookup {
            builder = apply_env_proxy_fallback(builder.no_proxy());
        }
        builder.build().map_err(BuildClientFailure::Build)
    }))
    .map_err(|_| BuildClientFailure::Panic)?
}

fn base_builder(config: &ClientConfig) -> ClientBuilder {
    Client::builder()
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(config.user_agent.clone())
        .gzip(true)
}

fn apply_env_proxy_fallback(mut builder: ClientBuilder) -> ClientBuilder {
    if let Some(proxy) = env_proxy_for_scheme("https")
        && let Ok(resolved) = Proxy::https(&proxy)
    {
        builder = builder.proxy(resolved);
    }
    if let Some(proxy) = env_proxy_for_scheme("http")
        && let Ok(resolved) = Proxy::http(&proxy)
    {
        builder = builder.proxy(resolved);
    }
    builder
}

fn env_proxy_for_scheme(scheme: &str) -> Option<String> {
    let names: &[&str] = match scheme {
        "https" => &["HTTPS_PROXY", "https_proxy", "ALL_PROXY", "all_proxy"],
        "http" => &["HTTP_PROXY", "http_proxy", "ALL_PROXY", "all_proxy"],
        _ => return None,
    };
    names.iter().find_map(|name| {
        std::env::var(name)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    })
}
