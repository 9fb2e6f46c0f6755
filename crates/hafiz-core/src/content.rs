//! Catalog and segment content.
//!
//! Static reference data (chapter names and verse counts) and the verse text
//! behind a segment's page range. The chapter list changes essentially never,
//! so it sits behind a time-boxed cache: a stored value plus fetch timestamp
//! and a staleness predicate. A refresh failure with a warm cache serves the
//! stale value instead of an error.

use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use url::Url;

use crate::error::{ConfigError, ServiceError};
use crate::model::{Chapter, Verse};

/// Read-only content operations.
#[async_trait]
pub trait ContentService: Send + Sync {
    async fn fetch_chapters(&self) -> Result<Vec<Chapter>, ServiceError>;

    /// Verses on the inclusive page range, in reading order.
    async fn fetch_page_verses(
        &self,
        page_from: u32,
        page_to: u32,
    ) -> Result<Vec<Verse>, ServiceError>;
}

/// HTTP implementation of the content service.
#[derive(Debug, Clone)]
pub struct HttpContent {
    base: String,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl HttpContent {
    pub fn new(base_url: &str, timeout: StdDuration) -> Result<Self, ConfigError> {
        let base = base_url.trim_end_matches('/').to_string();
        Url::parse(&base).map_err(|e| ConfigError::InvalidValue {
            key: "api.base_url".into(),
            message: e.to_string(),
        })?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                key: "api.timeout_secs".into(),
                message: e.to_string(),
            })?;
        Ok(Self { base, http })
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ServiceError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = match resp.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };
        Err(ServiceError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ContentService for HttpContent {
    async fn fetch_chapters(&self) -> Result<Vec<Chapter>, ServiceError> {
        let resp = self
            .http
            .get(format!("{}/chapters", self.base))
            .send()
            .await?;
        let chapters = Self::check(resp).await?.json::<Vec<Chapter>>().await?;
        Ok(chapters)
    }

    async fn fetch_page_verses(
        &self,
        page_from: u32,
        page_to: u32,
    ) -> Result<Vec<Verse>, ServiceError> {
        let resp = self
            .http
            .get(format!("{}/verses", self.base))
            .query(&[
                ("page_from", page_from.to_string()),
                ("page_to", page_to.to_string()),
            ])
            .send()
            .await?;
        let verses = Self::check(resp).await?.json::<Vec<Verse>>().await?;
        Ok(verses)
    }
}

/// Default chapter-cache lifetime.
pub const CHAPTER_CACHE_TTL_HOURS: i64 = 24;

struct CachedChapters {
    chapters: Vec<Chapter>,
    fetched_at: DateTime<Utc>,
}

/// Chapter list behind a TTL cache.
pub struct ChapterCatalog<S: ContentService> {
    service: S,
    ttl: Duration,
    cache: Option<CachedChapters>,
}

impl<S: ContentService> ChapterCatalog<S> {
    pub fn new(service: S) -> Self {
        Self::with_ttl(service, Duration::hours(CHAPTER_CACHE_TTL_HOURS))
    }

    pub fn with_ttl(service: S, ttl: Duration) -> Self {
        Self {
            service,
            ttl,
            cache: None,
        }
    }

    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.cache
            .as_ref()
            .is_some_and(|c| now - c.fetched_at <= self.ttl)
    }

    /// The chapter list, from cache when fresh.
    ///
    /// Stale or cold cache refetches; a refetch failure with any cached value
    /// (fresh or stale) logs and serves the cached copy.
    pub async fn chapters(&mut self, now: DateTime<Utc>) -> Result<Vec<Chapter>, ServiceError> {
        if self.is_fresh(now) {
            return Ok(self.cache.as_ref().map(|c| c.chapters.clone()).unwrap_or_default());
        }
        match self.service.fetch_chapters().await {
            Ok(chapters) => {
                self.cache = Some(CachedChapters {
                    chapters: chapters.clone(),
                    fetched_at: now,
                });
                Ok(chapters)
            }
            Err(err) => match &self.cache {
                Some(stale) => {
                    log::warn!("chapter refresh failed, serving stale cache: {err}");
                    Ok(stale.chapters.clone())
                }
                None => Err(err),
            },
        }
    }
}
