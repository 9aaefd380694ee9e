//! Research-and-write agent for study notes generation.
//!
//! Provides an LLM agent that researches syllabus topics with web search,
//! page crawling, and image search tools, and produces notes as a
//! standalone HTML page together with the full conversation transcript.

mod runner;
mod tools;
mod transcript;

pub use runner::{Agent, AgentResponse, NotesGenerator, ToolCallRecord};
pub use tools::{parse_tool_call, tool_definitions, ToolCall, ToolContext};
pub use transcript::{MessageContent, TranscriptMessage};
