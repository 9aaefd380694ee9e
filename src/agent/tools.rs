//! Tool definitions and implementations for the notes agent.

use crate::crawl::PageCrawler;
use crate::error::{NotegenError, Result};
use crate::image_search::GoogleImageSearch;
use crate::search::WebSearcher;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Available tools for the agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum ToolCall {
    /// Search the web for information on a topic.
    WebSearch { query: String },

    /// Fetch a web page and read its text content.
    CrawlPage { url: String },

    /// Find image URLs to illustrate a topic.
    ImageSearch { query: String },
}

/// Tool execution context with access to the search, crawl, and image
/// backends.
pub struct ToolContext {
    pub searcher: Arc<dyn WebSearcher>,
    pub crawler: Arc<PageCrawler>,
    pub images: Arc<GoogleImageSearch>,
}

impl ToolContext {
    /// Create a new tool context.
    pub fn new(
        searcher: Arc<dyn WebSearcher>,
        crawler: Arc<PageCrawler>,
        images: Arc<GoogleImageSearch>,
    ) -> Self {
        Self {
            searcher,
            crawler,
            images,
        }
    }

    /// Execute a tool call and return the result as a string.
    ///
    /// Backend failures propagate; the caller decides what a failed tool
    /// means for the run.
    pub async fn execute(&self, tool: &ToolCall) -> Result<String> {
        match tool {
            ToolCall::WebSearch { query } => self.execute_web_search(query).await,
            ToolCall::CrawlPage { url } => self.crawler.fetch(url).await,
            ToolCall::ImageSearch { query } => self.execute_image_search(query).await,
        }
    }

    async fn execute_web_search(&self, query: &str) -> Result<String> {
        let results = self.searcher.search(query).await?;

        if results.is_empty() {
            return Ok(format!("No results found for '{}'.", query));
        }

        let formatted = results
            .iter()
            .enumerate()
            .map(|(i, r)| format!("{}. {}\n   {}\n   {}", i + 1, r.title, r.url, r.snippet))
            .collect::<Vec<_>>()
            .join("\n\n");

        Ok(format!("Found {} results:\n\n{}", results.len(), formatted))
    }

    async fn execute_image_search(&self, query: &str) -> Result<String> {
        let urls = self.images.search_images(query).await?;

        if urls.is_empty() {
            return Ok(format!("No images found for '{}'.", query));
        }

        // A JSON array, so transcripts can expose it as a structured value.
        Ok(serde_json::to_string(&urls)?)
    }
}

/// Get OpenAI function/tool definitions for the agent.
pub fn tool_definitions() -> Vec<async_openai::types::ChatCompletionTool> {
    use async_openai::types::{ChatCompletionTool, ChatCompletionToolType, FunctionObject};

    vec![
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "web_search".to_string(),
                description: Some(
                    "Search the web for accurate, up-to-date information on a topic. \
                    Returns titles, URLs, and snippets."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "The search query"
                        }
                    },
                    "required": ["query"]
                })),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "crawl_page".to_string(),
                description: Some(
                    "Fetch a web page and return its readable text. Use this when a \
                    search snippet is not enough and you need the full content."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "url": {
                            "type": "string",
                            "description": "The page URL to fetch"
                        }
                    },
                    "required": ["url"]
                })),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "image_search".to_string(),
                description: Some(
                    "Search for images illustrating a topic. Returns a JSON array of \
                    image URLs to embed in the notes."
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "query": {
                            "type": "string",
                            "description": "The image search term"
                        }
                    },
                    "required": ["query"]
                })),
                strict: None,
            },
        },
    ]
}

/// Parse a tool call from the OpenAI response format.
pub fn parse_tool_call(name: &str, arguments: &str) -> Result<ToolCall> {
    let args: serde_json::Value = serde_json::from_str(arguments)
        .map_err(|e| NotegenError::Agent(format!("Invalid tool arguments: {}", e)))?;

    match name {
        "web_search" => {
            let query = args["query"]
                .as_str()
                .ok_or_else(|| NotegenError::Agent("Missing 'query' argument".to_string()))?
                .to_string();
            Ok(ToolCall::WebSearch { query })
        }
        "crawl_page" => {
            let url = args["url"]
                .as_str()
                .ok_or_else(|| NotegenError::Agent("Missing 'url' argument".to_string()))?
                .to_string();
            Ok(ToolCall::CrawlPage { url })
        }
        "image_search" => {
            let query = args["query"]
                .as_str()
                .ok_or_else(|| NotegenError::Agent("Missing 'query' argument".to_string()))?
                .to_string();
            Ok(ToolCall::ImageSearch { query })
        }
        _ => Err(NotegenError::Agent(format!("Unknown tool: {}", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_web_search_tool() {
        let tool = parse_tool_call("web_search", r#"{"query": "binary search trees"}"#).unwrap();
        match tool {
            ToolCall::WebSearch { query } => assert_eq!(query, "binary search trees"),
            _ => panic!("Expected WebSearch tool"),
        }
    }

    #[test]
    fn test_parse_crawl_page_tool() {
        let tool =
            parse_tool_call("crawl_page", r#"{"url": "https://example.com/page"}"#).unwrap();
        match tool {
            ToolCall::CrawlPage { url } => assert_eq!(url, "https://example.com/page"),
            _ => panic!("Expected CrawlPage tool"),
        }
    }

    #[test]
    fn test_parse_image_search_tool() {
        let tool = parse_tool_call("image_search", r#"{"query": "b-tree diagram"}"#).unwrap();
        match tool {
            ToolCall::ImageSearch { query } => assert_eq!(query, "b-tree diagram"),
            _ => panic!("Expected ImageSearch tool"),
        }
    }

    #[test]
    fn test_parse_unknown_tool() {
        assert!(parse_tool_call("teleport", "{}").is_err());
    }

    #[test]
    fn test_parse_missing_argument() {
        assert!(parse_tool_call("web_search", "{}").is_err());
        assert!(parse_tool_call("crawl_page", r#"{"query": "wrong key"}"#).is_err());
    }

    #[test]
    fn test_parse_invalid_arguments_json() {
        assert!(parse_tool_call("web_search", "not json").is_err());
    }
}
