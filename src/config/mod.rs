//! Configuration module for notegen.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{NotesPrompts, Prompts};
pub use settings::{
    AgentSettings, CrawlSettings, GeneralSettings, ImageSearchSettings, PromptSettings,
    SearchSettings, ServerSettings, Settings,
};
