//! Generate command implementation.

use crate::agent::Agent;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::NotegenError;
use anyhow::Result;

/// Run the generate command: one-shot notes generation from the terminal.
pub async fn run_generate(
    content: &str,
    model: Option<String>,
    output: Option<String>,
    settings: Settings,
) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Generate) {
        Output::error(&format!("{}", e));
        Output::info("Run 'notegen doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    if content.trim().is_empty() {
        return Err(NotegenError::InvalidInput(
            "Content must not be empty".to_string(),
        )
        .into());
    }

    let mut settings = settings;
    if let Some(model) = model {
        settings.agent.model = model;
    }

    let agent = Agent::from_settings(&settings)?;

    let spinner = Output::spinner("Researching and writing notes...");

    match agent.run(content).await {
        Ok(response) => {
            spinner.finish_and_clear();

            match &output {
                Some(path) => {
                    std::fs::write(path, &response.content)?;
                    Output::success(&format!("Notes written to {}", path));
                }
                None => println!("{}", response.content),
            }

            if !response.tool_calls.is_empty() {
                Output::header(&format!("Tool calls ({})", response.tool_calls.len()));
                for call in &response.tool_calls {
                    Output::info(&format!("  {} {}", call.name, truncate(&call.arguments, 60)));
                }
                println!();
            }

            Output::info(&format!(
                "Completed in {} iteration(s)",
                response.iterations
            ));
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Generation failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("0123456789abcdef", 10), "0123456...");
    }
}
