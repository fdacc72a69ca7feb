use std::time::Duration;

use engine_logging::{engine_debug, engine_warn};
use futures_util::StreamExt;
use jobboard_core::Job;
use serde_json::Value;
use url::Url;

use crate::{FailureKind, FeedPage, FetchError};

pub const DEFAULT_FEED_URL: &str = "https://testapi.getlokalapp.com/common/jobs";

#[derive(Debug, Clone)]
pub struct FeedSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_FEED_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Source of feed pages, numbered from 1.
#[async_trait::async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_page(&self, page: u32) -> Result<FeedPage, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFeedSource {
    settings: FeedSettings,
    client: reqwest::Client,
}

impl ReqwestFeedSource {
    pub fn new(settings: FeedSettings) -> Result<Self, FetchError> {
        // Fail early on a bad base url rather than on the first page.
        Url::parse(&settings.base_url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    /// `base_url` with `page=<n>`; other query pairs on the base url are kept.
    pub fn page_url(&self, page: u32) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.settings.base_url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != "page")
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        url.query_pairs_mut()
            .clear()
            .extend_pairs(kept)
            .append_pair("page", &page.to_string());
        Ok(url)
    }
}

#[async_trait::async_trait]
impl FeedSource for ReqwestFeedSource {
    async fn fetch_page(&self, page: u32) -> Result<FeedPage, FetchError> {
        let url = self.page_url(page)?;
        engine_debug!("GET feed page {} url={}", page, url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }

        decode_feed_page(page, &bytes)
    }
}

/// Decodes a feed body of the form `{ "results": [job, ...] }`.
///
/// A body that is not JSON is an error. A missing or non-array `results`
/// reads as an empty page. Entries that are not valid jobs are skipped and
/// counted.
pub fn decode_feed_page(page: u32, bytes: &[u8]) -> Result<FeedPage, FetchError> {
    let body: Value = serde_json::from_slice(bytes)
        .map_err(|err| FetchError::new(FailureKind::Parse, err.to_string()))?;

    let items = match body {
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(items)) => items,
            _ => {
                engine_warn!("Feed page {} has no results array; treating as empty", page);
                return Ok(FeedPage::empty(page));
            }
        },
        _ => {
            engine_warn!("Feed page {} body is not an object; treating as empty", page);
            return Ok(FeedPage::empty(page));
        }
    };

    let mut decoded = FeedPage::empty(page);
    for item in items {
        match serde_json::from_value::<Job>(item) {
            Ok(job) => decoded.jobs.push(job),
            Err(err) => {
                engine_debug!("Skipping feed entry on page {}: {}", page, err);
                decoded.skipped += 1;
            }
        }
    }
    if decoded.skipped > 0 {
        engine_warn!(
            "Feed page {}: kept {} jobs, skipped {} entries",
            page,
            decoded.jobs.len(),
            decoded.skipped
        );
    }
    Ok(decoded)
}

fn too_large(max_bytes: u64, actual: u64) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return FetchError::new(FailureKind::Parse, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
