//! Google Custom Search image lookup.
//!
//! A stateless pass-through to the Custom Search REST API: one GET per
//! query, a single status check, and the `link` field of each result. No
//! retry, no caching.

use crate::error::{NotegenError, Result};
use serde_json::Value;
use tracing::debug;

const SEARCH_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// Image search adapter over the Google Custom Search API.
///
/// Credentials are not validated at construction; a missing key or CSE id
/// simply makes the API reject the request when a search is attempted.
pub struct GoogleImageSearch {
    client: reqwest::Client,
    api_key: String,
    cse_id: String,
    result_count: u8,
}

impl GoogleImageSearch {
    /// Create an adapter requesting at most `result_count` images per query.
    pub fn new(api_key: String, cse_id: String, result_count: u8) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            cse_id,
            result_count,
        }
    }

    /// Search for images and return their URLs in API order.
    pub async fn search_images(&self, query: &str) -> Result<Vec<String>> {
        debug!("Searching images for: {}", query);

        let num = self.result_count.to_string();
        let response = self
            .client
            .get(SEARCH_ENDPOINT)
            .query(&[
                ("q", query),
                ("key", self.api_key.as_str()),
                ("cx", self.cse_id.as_str()),
                ("searchType", "image"),
                ("num", num.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotegenError::ImageSearch(format!(
                "Google API error: {} - {}",
                status.as_u16(),
                body
            )));
        }

        let results: Value = response.json().await?;
        extract_links(&results)
    }
}

/// Pull the `link` field out of each `items` entry, preserving API order.
/// A response without `items` (no matches) yields an empty list; an item
/// without a `link` is malformed and an error.
fn extract_links(results: &Value) -> Result<Vec<String>> {
    let Some(items) = results.get("items").and_then(Value::as_array) else {
        return Ok(Vec::new());
    };

    items
        .iter()
        .map(|item| {
            item.get("link")
                .and_then(Value::as_str)
                .map(String::from)
                .ok_or_else(|| {
                    NotegenError::ImageSearch("Result item has no 'link' field".to_string())
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_links_preserves_order() {
        let results = json!({
            "items": [
                {"link": "https://example.com/a.png", "title": "A"},
                {"link": "https://example.com/b.png", "title": "B"},
                {"link": "https://example.com/c.png"}
            ]
        });
        assert_eq!(
            extract_links(&results).unwrap(),
            vec![
                "https://example.com/a.png",
                "https://example.com/b.png",
                "https://example.com/c.png"
            ]
        );
    }

    #[test]
    fn test_extract_links_no_items() {
        let results = json!({"searchInformation": {"totalResults": "0"}});
        assert!(extract_links(&results).unwrap().is_empty());
    }

    #[test]
    fn test_extract_links_rejects_item_without_link() {
        let results = json!({"items": [{"title": "no link"}]});
        assert!(extract_links(&results).is_err());
    }
}
