//! Notegen - research-backed study notes generation
//!
//! Generates comprehensive study notes from syllabus topics or exam
//! questions. An LLM agent researches each topic with web search, page
//! crawling, and Google image search, then produces a standalone HTML page,
//! served over a small JSON API or printed from the CLI.
//!
//! # Overview
//!
//! Notegen allows you to:
//! - Submit syllabus topics or questions and get back HTML study notes
//! - Inspect the full agent conversation transcript per request
//! - Serve the generator behind `POST /generate` for frontend integration
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration and prompt templates
//! - `agent` - The research-and-write tool-calling agent
//! - `search` - Web search backends (DuckDuckGo)
//! - `crawl` - Page fetching and text extraction
//! - `image_search` - Google Custom Search image lookup
//! - `html` - HTML-to-text reduction helpers
//! - `cli` - Command-line interface and the HTTP server
//!
//! # Example
//!
//! ```rust,no_run
//! use notegen::agent::Agent;
//! use notegen::config::Settings;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let agent = Agent::from_settings(&settings)?;
//!
//!     let response = agent.run("Binary search trees; B-trees").await?;
//!     println!("{}", response.content);
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod crawl;
pub mod error;
pub mod html;
pub mod image_search;
pub mod openai;
pub mod search;

pub use error::{NotegenError, Result};
