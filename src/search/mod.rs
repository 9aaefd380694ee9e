//! Web search backends for the agent's research tool.

mod duckduckgo;

pub use duckduckgo::DuckDuckGoSearcher;

use crate::error::Result;
use async_trait::async_trait;

/// A single web search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// Trait for web search providers.
#[async_trait]
pub trait WebSearcher: Send + Sync {
    /// Search the web for the given query.
    ///
    /// Implementations return at most their configured number of results,
    /// in the order the provider ranked them.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>>;
}
