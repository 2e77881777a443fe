//! HTTP client for the mock content providers.
//!
//! Requests retry with linear backoff and successful bodies are cached per
//! URL, so repeated page loads inside the TTL never touch the network.

pub mod cache;
pub mod error;
pub mod retry;

pub use cache::ResponseCache;
pub use error::{ClientError, Result};
pub use retry::RetryPolicy;

use feedboard_common::{Config, ContentPage, FeedSource, SearchPage, TypeFilter};
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

pub const NEWS_LIMIT: u32 = 10;
pub const RECOMMENDATIONS_LIMIT: u32 = 8;
pub const SOCIAL_LIMIT: u32 = 12;
pub const SEARCH_LIMIT: u32 = 20;

pub struct SourceClient {
    client: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
    cache: ResponseCache,
}

impl SourceClient {
    /// `base_url` is the API root, e.g. `http://localhost:3000/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            retry: RetryPolicy::default(),
            cache: ResponseCache::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_url.clone())
            .with_retry(RetryPolicy::from_config(config))
            .with_cache(ResponseCache::new(config.cache_ttl))
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_cache(mut self, cache: ResponseCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub async fn fetch_news(&self, categories: &[String], page: u32) -> Result<ContentPage> {
        self.fetch_feed(FeedSource::News, categories, page).await
    }

    pub async fn fetch_recommendations(
        &self,
        categories: &[String],
        page: u32,
    ) -> Result<ContentPage> {
        self.fetch_feed(FeedSource::Recommendations, categories, page)
            .await
    }

    pub async fn fetch_social(&self, hashtags: &[String], page: u32) -> Result<ContentPage> {
        self.fetch_feed(FeedSource::Social, hashtags, page).await
    }

    /// One page of a feed source at its default page size. `topics` are
    /// categories, or hashtags for social.
    pub async fn fetch_feed(
        &self,
        source: FeedSource,
        topics: &[String],
        page: u32,
    ) -> Result<ContentPage> {
        let (path, topic_param, limit) = match source {
            FeedSource::News => ("news", "categories", NEWS_LIMIT),
            FeedSource::Recommendations => ("recommendations", "categories", RECOMMENDATIONS_LIMIT),
            FeedSource::Social => ("social", "hashtags", SOCIAL_LIMIT),
            FeedSource::Search => {
                return Err(ClientError::InvalidUrl("search is not a feed".into()))
            }
        };
        let url = self.url(
            path,
            &[
                (topic_param, topics.join(",")),
                ("page", page.to_string()),
                ("limit", limit.to_string()),
            ],
        )?;
        self.get_json(url).await
    }

    pub async fn search(
        &self,
        query: &str,
        content_type: TypeFilter,
        page: u32,
    ) -> Result<SearchPage> {
        let url = self.url(
            "search",
            &[
                ("q", query.to_string()),
                ("type", content_type.to_string()),
                ("page", page.to_string()),
                ("limit", SEARCH_LIMIT.to_string()),
            ],
        )?;
        self.get_json(url).await
    }

    fn url(&self, path: &str, params: &[(&str, String)]) -> Result<Url> {
        let raw = format!("{}/{}", self.base_url, path);
        let mut url = Url::parse(&raw).map_err(|e| ClientError::InvalidUrl(format!("{raw}: {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let key = url.to_string();
        if let Some(body) = self.cache.get(&key) {
            debug!(url = %key, "Cache hit");
            return Ok(serde_json::from_str(&body)?);
        }

        let attempts = self.retry.max_attempts();
        let mut last = None;
        for attempt in 0..attempts {
            match self.get_once::<T>(&url).await {
                Ok((value, body)) => {
                    self.cache.insert(key, body);
                    return Ok(value);
                }
                Err(e) => {
                    if attempt + 1 < attempts {
                        let wait = self.retry.delay(attempt);
                        warn!(
                            url = %key,
                            attempt = attempt + 1,
                            wait_ms = wait.as_millis() as u64,
                            error = %e,
                            "Request failed, retrying"
                        );
                        tokio::time::sleep(wait).await;
                    }
                    last = Some(e);
                }
            }
        }

        let last = last.unwrap_or_else(|| ClientError::Network("no attempt made".to_string()));
        warn!(url = %key, attempts, error = %last, "Request failed, giving up");
        Err(ClientError::RetriesExhausted {
            attempts,
            last: Box::new(last),
        })
    }

    async fn get_once<T: DeserializeOwned>(&self, url: &Url) -> Result<(T, String)> {
        let resp = self.client.get(url.clone()).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await?;
        let value = serde_json::from_str(&body)?;
        Ok((value, body))
    }
}
