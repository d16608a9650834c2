//! Algolia Hacker News search API client.
//!
//! Endpoints used:
//!
//! - `GET {base}/search?query=<q>&tags=story`: keyword and category listings
//! - `GET {base}/search?tags=front_page`: trending stories
//! - `GET {base}/items/<id>`: one story with its comment tree

use super::{FetchError, SearchProvider};
use crate::domain::{HnSearchError, Item, Result, SearchResponse, StoryHit};
use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;
use tracing::Instrument;

/// Default public endpoint.
pub const DEFAULT_BASE_URL: &str = "https://hn.algolia.com/api/v1";

/// HTTP client for the HN search API.
#[derive(Debug, Clone)]
pub struct HnClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HnClient {
    /// Creates a client for `base_url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`HnSearchError::Config`] if `base_url` is not an absolute
    /// `http(s)` URL, and [`HnSearchError::Http`] if the TLS backend cannot be
    /// initialised.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let raw = base_url.into();
        let base_url = Url::parse(raw.trim_end_matches('/'))
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https") && !url.cannot_be_a_base())
            .ok_or_else(|| HnSearchError::Config(format!("invalid api_base_url: {raw}")))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("hnsearch/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// `base_url` with `segments` appended, each percent-encoded on its own.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Stories matching `query`, in Algolia rank order.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] on transport, status or decode failure.
    pub async fn search_stories(&self, query: &str) -> std::result::Result<Vec<StoryHit>, FetchError> {
        self.fetch_hits(&[("query", query), ("tags", "story")]).await
    }

    /// Current front page stories.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] on transport, status or decode failure.
    pub async fn front_page(&self) -> std::result::Result<Vec<StoryHit>, FetchError> {
        self.fetch_hits(&[("tags", "front_page")]).await
    }

    /// Stories for a category page such as `ask`, `show` or `jobs`.
    ///
    /// Categories are plain keyword searches; the name is lowercased the same way
    /// category routes are.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] on transport, status or decode failure.
    pub async fn category(&self, name: &str) -> std::result::Result<Vec<StoryHit>, FetchError> {
        self.search_stories(&name.to_lowercase()).await
    }

    /// One item with its full comment tree.
    ///
    /// # Errors
    ///
    /// Returns [`HnSearchError::Fetch`] on transport, status or decode failure.
    pub async fn item(&self, id: &str) -> Result<Item> {
        let url = self.endpoint(&["items", id.trim()]);

        let fetch = async {
            let response = self.client.get(url).send().await?;
            let response = check_status(response)?;
            let item = response.json::<Item>().await?;
            tracing::debug!(comments = item.comment_count(), "item loaded");
            Ok::<_, FetchError>(item)
        };

        Ok(fetch
            .instrument(tracing::debug_span!("fetch_item", item_id = %id))
            .await?)
    }

    async fn fetch_hits(&self, params: &[(&str, &str)]) -> std::result::Result<Vec<StoryHit>, FetchError> {
        let url = self.endpoint(&["search"]);
        tracing::debug!(url = %url, params = ?params, "fetching hits");

        let response = self.client.get(url).query(params).send().await?;
        let response = check_status(response)?;
        let body = response.json::<SearchResponse>().await?;

        tracing::debug!(hits = body.hits.len(), "hits received");
        Ok(body.hits)
    }
}

fn check_status(response: reqwest::Response) -> std::result::Result<reqwest::Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        tracing::warn!(status = status.as_u16(), "search API returned an error status");
        Err(FetchError::Status(status.as_u16()))
    }
}

#[async_trait]
impl SearchProvider for HnClient {
    async fn search(&self, query: &str) -> std::result::Result<Vec<StoryHit>, FetchError> {
        self.search_stories(query)
            .instrument(tracing::debug_span!("fetch", query = %query))
            .await
    }
}
