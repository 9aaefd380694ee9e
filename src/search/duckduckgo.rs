//! DuckDuckGo web search implementation.
//!
//! Uses the HTML endpoint rather than an API key. Result links come back as
//! redirect URLs with the real target in the `uddg` query parameter.

use super::{SearchResult, WebSearcher};
use crate::error::{NotegenError, Result};
use crate::html;
use async_trait::async_trait;
use regex::Regex;
use tracing::debug;
use url::Url;

const SEARCH_ENDPOINT: &str = "https://html.duckduckgo.com/html/";

/// The HTML endpoint rejects requests without a browser-like user agent.
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// DuckDuckGo-backed web searcher with a fixed result cap.
pub struct DuckDuckGoSearcher {
    client: reqwest::Client,
    max_results: usize,
}

impl DuckDuckGoSearcher {
    /// Create a searcher that returns at most `max_results` hits per query.
    pub fn new(max_results: usize) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            max_results,
        }
    }
}

#[async_trait]
impl WebSearcher for DuckDuckGoSearcher {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        debug!("Searching DuckDuckGo for: {}", query);

        let response = self
            .client
            .get(SEARCH_ENDPOINT)
            .query(&[("q", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotegenError::Search(format!(
                "DuckDuckGo returned status {}",
                status
            )));
        }

        let body = response.text().await?;
        let results = parse_results(&body, self.max_results);

        debug!("DuckDuckGo returned {} results", results.len());
        Ok(results)
    }
}

/// Parse result anchors and snippets out of the DuckDuckGo HTML page.
///
/// Links and snippets are matched independently and zipped by position; the
/// page interleaves them one-to-one per result block.
fn parse_results(body: &str, max_results: usize) -> Vec<SearchResult> {
    let link_re = Regex::new(r#"(?s)<a[^>]*class="result__a"[^>]*href="([^"]+)"[^>]*>(.*?)</a>"#)
        .expect("valid regex");
    let snippet_re =
        Regex::new(r#"(?s)class="result__snippet"[^>]*>(.*?)</a>"#).expect("valid regex");

    let snippets: Vec<String> = snippet_re
        .captures_iter(body)
        .map(|c| html::strip_tags(&c[1]))
        .collect();

    link_re
        .captures_iter(body)
        .enumerate()
        .map(|(i, c)| SearchResult {
            title: html::strip_tags(&c[2]),
            url: resolve_redirect(&html::decode_entities(&c[1])),
            snippet: snippets.get(i).cloned().unwrap_or_default(),
        })
        .filter(|r| !r.url.is_empty())
        .take(max_results)
        .collect()
}

/// Unwrap the DuckDuckGo redirect wrapper around result URLs.
///
/// `//duckduckgo.com/l/?uddg=<encoded>&rut=...` becomes the decoded target;
/// anything that is not a redirect link passes through unchanged.
fn resolve_redirect(href: &str) -> String {
    let absolute = if let Some(rest) = href.strip_prefix("//") {
        format!("https://{}", rest)
    } else if href.starts_with('/') {
        format!("https://duckduckgo.com{}", href)
    } else {
        href.to_string()
    };

    if let Ok(parsed) = Url::parse(&absolute) {
        if parsed.domain() == Some("duckduckgo.com") {
            if let Some((_, target)) = parsed.query_pairs().find(|(key, _)| key == "uddg") {
                return target.into_owned();
            }
        }
    }

    absolute
}
