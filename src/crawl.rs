//! Web page fetching for the agent's crawl tool.

use crate::error::{NotegenError, Result};
use crate::html;
use tracing::debug;
use url::Url;

/// The same browser-like agent the search backend sends; some sites refuse
/// requests without one.
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Fetches pages and reduces them to readable text.
pub struct PageCrawler {
    client: reqwest::Client,
    max_length: Option<usize>,
}

impl PageCrawler {
    /// Create a crawler. `max_length` truncates extracted text to that many
    /// characters; `None` returns the full page text.
    pub fn new(max_length: Option<usize>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");

        Self { client, max_length }
    }

    /// Fetch a page and return its readable text content.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        let parsed = Url::parse(url)
            .map_err(|e| NotegenError::Crawl(format!("Invalid URL '{}': {}", url, e)))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(NotegenError::Crawl(format!(
                "Unsupported URL scheme '{}'",
                parsed.scheme()
            )));
        }

        debug!("Crawling {}", url);

        let response = self.client.get(parsed).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NotegenError::Crawl(format!(
                "Request to {} failed with status {}",
                url, status
            )));
        }

        let body = response.text().await?;
        let text = html::html_to_text(&body);

        Ok(match self.max_length {
            Some(max) => text.chars().take(max).collect(),
            None => text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_rejects_invalid_url() {
        let crawler = PageCrawler::new(None);
        let err = crawler.fetch("not a url").await.unwrap_err();
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[tokio::test]
    async fn test_fetch_rejects_non_http_scheme() {
        let crawler = PageCrawler::new(None);
        let err = crawler.fetch("ftp://example.com/file").await.unwrap_err();
        assert!(err.to_string().contains("Unsupported URL scheme"));
    }
}
