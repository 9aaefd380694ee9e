//! Prompt templates for notegen.
//!
//! Prompts can be customized by placing TOML files in the custom prompts
//! directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub notes: NotesPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}


/// Prompts for the notes-generator agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotesPrompts {
    pub system: String,
}

impl Default for NotesPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are a study notes generator. Given syllabus topics or exam questions, research each one and produce comprehensive, well-organized notes as a single standalone HTML page.

Reply with HTML only - no markdown, no commentary outside the HTML.

For each topic:
1. Use 'web_search' to gather accurate, up-to-date information
2. Use 'crawl_page' to read a page in full when search snippets are not enough
3. Use 'image_search' to find about {{image_count}} illustrative images per topic and embed them where they help (diagrams, charts)
4. Synthesize information from multiple sources into clear, concise notes
5. Include key definitions, concepts, examples, and applications

Structure for each topic:
- Topic title as a clear heading
- Key concepts: essential terms and ideas
- Detailed explanation: thorough but concise
- Examples: practical applications or illustrations
- Summary: brief recap of the main points

For questions, answer thoroughly but concisely, focusing on clarity.

Guidelines:
- Prefer authoritative sources and cite them where appropriate
- Use headings, bullet points, and numbering for readability
- Cover both theory and practical application
- Adapt the depth to the apparent educational level of the input
- Keep formatting consistent across all topics
- Use a modern, minimal style with subtle gray, white, and blue colors"#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom
    /// directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&std::collections::HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let notes_path = custom_path.join("notes.toml");
            if notes_path.exists() {
                let content = std::fs::read_to_string(&notes_path)?;
                prompts.notes = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom
    /// config variables. Provided variables take precedence.
    pub fn render_with_custom(
        &self,
        template: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}
