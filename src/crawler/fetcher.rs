//! Page fetching
//!
//! The pipeline only depends on the [`Fetcher`] trait. Two implementations
//! ship with the crate:
//! - [`HttpFetcher`] performs real GET requests through `reqwest`
//! - [`StaticFetcher`] serves canned pages keyed by URL, for tests and
//!   offline runs

use crate::config::{HttpConfig, UserAgentConfig};
use crate::ScrapeError;
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// A fetched response body together with its reported length
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Response body
    pub body: Vec<u8>,

    /// Content length reported by the transport, `-1` when unknown
    pub content_length: i64,
}

/// Capability for retrieving a page by URL
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches the page at `url`
    async fn fetch(&self, url: &str) -> Result<FetchedPage, ScrapeError>;
}

/// Builds an HTTP client with the configured user agent and timeouts
///
/// A timeout of zero leaves the corresponding limit unset.
///
/// # Example
///
/// ```no_run
/// use product_scraper::config::{HttpConfig, UserAgentConfig};
/// use product_scraper::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    http: &HttpConfig,
) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(user_agent.header_value())
        .gzip(true)
        .brotli(true);

    if http.timeout_secs > 0 {
        builder = builder.timeout(Duration::from_secs(http.timeout_secs));
    }
    if http.connect_timeout_secs > 0 {
        builder = builder.connect_timeout(Duration::from_secs(http.connect_timeout_secs));
    }

    builder.build()
}

/// Fetcher backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a fetcher from the user agent and HTTP configuration
    pub fn from_config(
        user_agent: &UserAgentConfig,
        http: &HttpConfig,
    ) -> Result<Self, ScrapeError> {
        Ok(Self::new(build_http_client(user_agent, http)?))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, ScrapeError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ScrapeError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_length = response
            .content_length()
            .and_then(|len| i64::try_from(len).ok())
            .unwrap_or(-1);

        // Decodes using the Content-Type charset, so the body is always UTF-8
        let body = response.text().await.map_err(|source| ScrapeError::Http {
            url: url.to_string(),
            source,
        })?;

        Ok(FetchedPage {
            body: body.into_bytes(),
            content_length,
        })
    }
}

#[derive(Debug, Clone)]
enum Resource {
    Inline { body: Vec<u8>, content_length: i64 },
    File(PathBuf),
}

/// Fetcher serving canned content keyed by URL
///
/// Inline pages report their body length; file-backed pages are read on
/// every fetch and report the file size. Any other URL fails with
/// [`ScrapeError::NotFound`].
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, Resource>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `body` for `url`
    pub fn with_page(self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        let body = body.into();
        let content_length = i64::try_from(body.len()).unwrap_or(i64::MAX);
        self.with_page_length(url, body, content_length)
    }

    /// Serves `body` for `url`, reporting an explicit content length
    pub fn with_page_length(
        mut self,
        url: impl Into<String>,
        body: impl Into<Vec<u8>>,
        content_length: i64,
    ) -> Self {
        self.pages.insert(
            url.into(),
            Resource::Inline {
                body: body.into(),
                content_length,
            },
        );
        self
    }

    /// Serves the file at `path` for `url`
    pub fn with_file(mut self, url: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.pages.insert(url.into(), Resource::File(path.into()));
        self
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, ScrapeError> {
        match self.pages.get(url) {
            None => Err(ScrapeError::NotFound {
                url: url.to_string(),
            }),
            Some(Resource::Inline {
                body,
                content_length,
            }) => Ok(FetchedPage {
                body: body.clone(),
                content_length: *content_length,
            }),
            Some(Resource::File(path)) => {
                let io_error = |source| ScrapeError::Io {
                    url: url.to_string(),
                    source,
                };
                let metadata = tokio::fs::metadata(path).await.map_err(io_error)?;
                let body = tokio::fs::read(path).await.map_err(io_error)?;
                Ok(FetchedPage {
                    body,
                    content_length: i64::try_from(metadata.len()).unwrap_or(-1),
                })
            }
        }
    }
}
