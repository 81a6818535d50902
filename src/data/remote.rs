//! Remote content API client
//!
//! `RemoteContentLoader` fetches a single URL through an `HttpClient` and
//! hands the response to the mapper. The HTTP layer is a trait so the
//! loader can be exercised without a network.

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;
use url::Url;

use super::{mapper, ContentItem, ContentLoader};
use crate::error::LoadError;

/// Errors raised by the HTTP transport
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The transport produced neither a response nor an error
    #[error("Unexpected transport failure: {0}")]
    Unexpected(String),
}

/// Raw response handed from the transport to the mapper
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: Vec<u8>,
}

/// Minimal HTTP GET abstraction
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &Url) -> Result<HttpResponse, TransportError>;
}

/// `HttpClient` backed by reqwest
#[derive(Debug, Clone, Default)]
pub struct ReqwestHttpClient {
    http_client: Client,
}

impl ReqwestHttpClient {
    /// Creates a client with reqwest's default settings
    pub fn new() -> Self {
        Self {
            http_client: Client::new(),
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &Url) -> Result<HttpResponse, TransportError> {
        let response = self.http_client.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse { status, body })
    }
}

/// Loads content items from the remote source
#[derive(Debug, Clone)]
pub struct RemoteContentLoader<C> {
    url: Url,
    client: C,
}

impl<C: HttpClient> RemoteContentLoader<C> {
    /// Creates a loader that fetches `url` through `client`
    pub fn new(url: Url, client: C) -> Self {
        Self { url, client }
    }
}

impl RemoteContentLoader<ReqwestHttpClient> {
    /// Creates a loader using a default reqwest client
    pub fn with_default_client(url: Url) -> Self {
        Self::new(url, ReqwestHttpClient::new())
    }
}

#[async_trait]
impl<C: HttpClient> ContentLoader for RemoteContentLoader<C> {
    /// Fetches and decodes the item list
    ///
    /// # Returns
    /// * `Err(LoadError::Connectivity)` if the request could not be completed
    /// * `Err(LoadError::InvalidData)` if the response is not a valid item list
    async fn load(&self) -> Result<Vec<ContentItem>, LoadError> {
        debug!("Fetching content from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .await
            .map_err(LoadError::Connectivity)?;

        debug!(
            "Received status {} with {} bytes",
            response.status,
            response.body.len()
        );
        mapper::map(&response.body, response.status)
    }
}
