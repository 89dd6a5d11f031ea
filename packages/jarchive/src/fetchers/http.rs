//! HTTP fetcher for the live archive.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::error::{FetchError, FetchResult};
use crate::traits::fetcher::{DocumentRef, Fetcher};

pub const DEFAULT_BASE_URL: &str = "http://j-archive.com/";
pub const DEFAULT_USER_AGENT: &str = "jarchive-sampler/0.1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetcher that resolves documents against the archive's base URL.
///
/// # Example
///
/// ```rust,ignore
/// use jarchive::fetchers::HttpFetcher;
///
/// let fetcher = HttpFetcher::new(DEFAULT_BASE_URL)?
///     .with_user_agent("my-bot/1.0")
///     .with_timeout(Duration::from_secs(10))?;
/// ```
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: Url,
    user_agent: String,
}

impl HttpFetcher {
    /// Create a fetcher for the archive rooted at `base_url`.
    pub fn new(base_url: &str) -> FetchResult<Self> {
        let base_url = Url::parse(base_url).map_err(|_| FetchError::InvalidUrl {
            url: base_url.to_string(),
        })?;

        Ok(Self {
            client: build_client(DEFAULT_TIMEOUT)?,
            base_url,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        })
    }

    /// Set a custom user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> FetchResult<Self> {
        self.client = build_client(timeout)?;
        Ok(self)
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// URL of a document: the base URL itself for the index,
    /// `showgame.php?game_id=<id>` for a game.
    pub fn document_url(&self, document: &DocumentRef) -> FetchResult<Url> {
        match document {
            DocumentRef::Index => Ok(self.base_url.clone()),
            DocumentRef::Game(id) => {
                let mut url =
                    self.base_url
                        .join("showgame.php")
                        .map_err(|_| FetchError::InvalidUrl {
                            url: format!("{}showgame.php", self.base_url),
                        })?;
                url.query_pairs_mut()
                    .append_pair("game_id", &id.to_string());
                Ok(url)
            }
        }
    }
}

fn build_client(timeout: Duration) -> FetchResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| FetchError::Http(Box::new(e)))
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, document: &DocumentRef) -> FetchResult<String> {
        let url = self.document_url(document)?;
        debug!(url = %url, document = %document, "HTTP fetch starting");

        let response = self
            .client
            .get(url.clone())
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "HTTP request failed");
                FetchError::Http(Box::new(e))
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "HTTP request rejected");
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Http(Box::new(e)))?;

        debug!(url = %url, content_length = body.len(), "HTTP fetch completed");
        Ok(body)
    }

    fn name(&self) -> &str {
        "http"
    }
}
