// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::CrawlerConfig;

/// A source of raw HTML pages.
///
/// One call is one attempt: implementations neither retry nor inspect the
/// response status.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the body of the page at `url`.
    async fn fetch_text(&self, url: &str) -> Result<String>;
}

/// Create a configured asynchronous HTTP client.
pub fn create_client(config: &CrawlerConfig) -> Result<Client> {
    let mut builder = Client::builder().user_agent(&config.user_agent);
    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

/// Page source backed by a live HTTP client.
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build the client from crawler settings.
    pub fn from_config(config: &CrawlerConfig) -> Result<Self> {
        Ok(Self::new(create_client(config)?))
    }
}

#[async_trait]
impl PageSource for HttpSource {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        log::debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::fetch(url, e))?;
        response.text().await.map_err(|e| AppError::fetch(url, e))
    }
}

#[cfg(test)]
pub(crate) use memory::MemorySource;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client_without_timeout() {
        let config = CrawlerConfig::default();
        assert!(create_client(&config).is_ok());
    }

    #[tokio::test]
    async fn test_http_failure_names_the_url() {
        let source = HttpSource::from_config(&CrawlerConfig::default()).unwrap();
        match source.fetch_text("not a url").await {
            Err(AppError::Fetch { url, .. }) => assert_eq!(url, "not a url"),
            other => panic!("expected fetch error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_memory_source_missing_page_is_error() {
        let source = MemorySource::new().with_page("https://a.test/", "<html></html>");
        assert!(source.fetch_text("https://a.test/").await.is_ok());
        assert!(source.fetch_text("https://b.test/").await.is_err());
        assert_eq!(source.hits("https://b.test/"), 1);
    }
}
