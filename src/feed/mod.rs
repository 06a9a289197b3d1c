// src/feed/mod.rs
pub mod parser;

use anyhow::{Context, Result};
use async_trait::async_trait;

/// Listings per feed page; the `s` offset parameter advances in these steps.
pub const PAGE_SIZE: u32 = 25;

/// Build the feed-retrieval address for one page of results.
///
/// Appends the output format, payment filter, pagination offset, and
/// "posted today" parameters to the configured search endpoint. The base
/// endpoint is taken as-is; a malformed one yields a malformed address.
///
///   offset=0  => posts 1-25
///   offset=25 => posts 26-50
pub fn page_url(base_url: &str, offset: u32) -> String {
    format!("{base_url}&format=rss&is_paid=all&s={offset}&postedToday=1")
}

/// Source of raw feed documents. The HTTP implementation is the production
/// path; tests substitute fixture-backed mocks.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

pub struct HttpFeedSource {
    client: reqwest::Client,
}

impl HttpFeedSource {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpFeedSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    // No retry, timeout, or status inspection; a transport error aborts the run.
    async fn fetch(&self, url: &str) -> Result<String> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("fetching feed page {url}"))?;
        resp.text().await.context("reading feed body")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://city.example.org/search/cpg?searchNearby=2";

    #[test]
    fn page_url_appends_all_query_parameters() {
        let url = page_url(BASE, 0);
        assert!(url.starts_with(BASE));
        assert!(url.contains("&format=rss"));
        assert!(url.contains("&is_paid=all"));
        assert!(url.contains("&s=0"));
        assert!(url.contains("&postedToday=1"));
    }

    #[test]
    fn page_urls_differ_only_in_offset() {
        let a = page_url(BASE, 0);
        let b = page_url(BASE, 25);
        assert_ne!(a, b);
        assert_eq!(a.replace("&s=0", "&s=25"), b);
    }
}
