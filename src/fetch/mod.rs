// src/fetch/mod.rs
//! Job posting download with an optional on-disk cache in front.

mod cache;

pub use cache::HtmlCache;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error: {0}")]
    Status(StatusCode),

    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}

pub struct JobFetcher {
    client: Client,
    cache: Option<HtmlCache>,
}

impl JobFetcher {
    pub fn new(user_agent: &str, timeout: Duration, cache: Option<HtmlCache>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, cache })
    }

    /// Raw HTML of `url`, or `None` when it cannot be obtained.
    pub async fn fetch_html(&self, url: &str) -> Option<String> {
        if let Some(cache) = &self.cache {
            if let Some(html) = cache.get(url).await {
                info!("Serving job post from cache: {}", url);
                return Some(html);
            }
        }

        info!("Fetching job post: {}", url);
        match self.download(url).await {
            Ok(html) => {
                if let Some(cache) = &self.cache {
                    cache.put(url, &html).await;
                }
                Some(html)
            }
            Err(e) => {
                error!("Failed to fetch {}: {}", url, e);
                None
            }
        }
    }

    async fn download(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status));
        }

        response.text().await.map_err(FetchError::Body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use tempfile::TempDir;

    fn fetcher(cache: Option<HtmlCache>) -> JobFetcher {
        JobFetcher::new(DEFAULT_USER_AGENT, Duration::from_secs(5), cache).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/jobs/42")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<h1>Rust Engineer</h1>")
            .expect(1)
            .create_async()
            .await;

        let html = fetcher(None)
            .fetch_html(&format!("{}/jobs/42", server.url()))
            .await;

        m.assert_async().await;
        assert_eq!(html.as_deref(), Some("<h1>Rust Engineer</h1>"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_absent() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/gone")
            .with_status(404)
            .with_body("<h1>Not Found</h1>")
            .create_async()
            .await;

        let html = fetcher(None)
            .fetch_html(&format!("{}/gone", server.url()))
            .await;

        m.assert_async().await;
        assert_eq!(html, None);
    }

    #[tokio::test]
    async fn test_transport_failure_is_absent() {
        let html = fetcher(None).fetch_html("http://127.0.0.1:1/job").await;
        assert_eq!(html, None);
    }

    #[tokio::test]
    async fn test_cache_serves_second_request() {
        let temp = TempDir::new().unwrap();
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/cached")
            .with_status(200)
            .with_body("<p>cached body</p>")
            .expect(1)
            .create_async()
            .await;

        let url = format!("{}/cached", server.url());
        let fetcher = fetcher(Some(HtmlCache::new(
            temp.path(),
            Duration::from_secs(3600),
        )));

        assert_eq!(fetcher.fetch_html(&url).await.as_deref(), Some("<p>cached body</p>"));
        assert_eq!(fetcher.fetch_html(&url).await.as_deref(), Some("<p>cached body</p>"));
        m.assert_async().await;
    }
}
