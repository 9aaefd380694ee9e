//! Agent runner with tool calling loop.

use super::tools::{parse_tool_call, tool_definitions, ToolContext};
use super::transcript::{MessageContent, TranscriptMessage};
use crate::config::{Prompts, Settings};
use crate::crawl::PageCrawler;
use crate::error::{NotegenError, Result};
use crate::image_search::GoogleImageSearch;
use crate::openai::create_client;
use crate::search::DuckDuckGoSearcher;
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Anything that can turn syllabus content into generated notes.
///
/// The HTTP gateway depends on this seam rather than on [`Agent`] directly,
/// so handlers can be exercised with a stub.
#[async_trait]
pub trait NotesGenerator: Send + Sync {
    /// Generate notes for the given syllabus content or question text.
    async fn generate(&self, content: &str) -> Result<AgentResponse>;
}

/// Research-and-write agent that produces study notes as HTML.
pub struct Agent {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    tools: ToolContext,
    max_iterations: usize,
    system_prompt: String,
}

impl Agent {
    /// Create a new agent with the given tool context and model.
    pub fn new(tools: ToolContext, model: &str) -> Self {
        Self {
            client: create_client(),
            model: model.to_string(),
            tools,
            max_iterations: 15,
            system_prompt: String::new(),
        }
    }

    /// Assemble an agent from settings: prompt, model, and all three tool
    /// backends.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let mut vars = HashMap::new();
        vars.insert(
            "image_count".to_string(),
            settings.image_search.result_count.to_string(),
        );
        let system_prompt = prompts.render_with_custom(&prompts.notes.system, &vars);

        let searcher = Arc::new(DuckDuckGoSearcher::new(settings.search.max_results));
        let crawler = Arc::new(PageCrawler::new(settings.crawl.max_length));
        let images = Arc::new(GoogleImageSearch::new(
            settings.image_search.resolved_api_key(),
            settings.image_search.resolved_cse_id(),
            settings.image_search.result_count,
        ));

        Ok(Agent::new(
            ToolContext::new(searcher, crawler, images),
            &settings.agent.model,
        )
        .with_system_prompt(&system_prompt)
        .with_max_iterations(settings.agent.max_iterations))
    }

    /// Set a custom system prompt.
    pub fn with_system_prompt(mut self, prompt: &str) -> Self {
        self.system_prompt = prompt.to_string();
        self
    }

    /// Set maximum iterations for the agent loop.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    /// Run the agent on the given task and return the generated notes plus
    /// the full conversation transcript.
    pub async fn run(&self, task: &str) -> Result<AgentResponse> {
        let mut messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.system_prompt.clone())
                .build()
                .map_err(|e| NotegenError::Agent(e.to_string()))?
                .into(),
        ];

        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(task.to_string())
                .build()
                .map_err(|e| NotegenError::Agent(e.to_string()))?
                .into(),
        );

        let mut transcript = vec![
            TranscriptMessage::text("system", &self.system_prompt),
            TranscriptMessage::text("user", task),
        ];

        let mut iterations = 0;
        let mut tool_calls_made = Vec::new();

        loop {
            iterations += 1;
            if iterations > self.max_iterations {
                return Err(NotegenError::Agent(format!(
                    "Agent exceeded maximum iterations ({})",
                    self.max_iterations
                )));
            }

            debug!("Agent iteration {}", iterations);

            let request = CreateChatCompletionRequestArgs::default()
                .model(&self.model)
                .messages(messages.clone())
                .tools(tool_definitions())
                .build()
                .map_err(|e| NotegenError::Agent(e.to_string()))?;

            let response = self
                .client
                .chat()
                .create(request)
                .await
                .map_err(|e| NotegenError::OpenAI(format!("Agent API error: {}", e)))?;

            let choice = response
                .choices
                .first()
                .ok_or_else(|| NotegenError::Agent("No response from model".to_string()))?;

            match &choice.message.tool_calls {
                Some(tool_calls) if !tool_calls.is_empty() => {
                    // The tool-call turn usually carries no text content;
                    // record it as-is and let consumers filter.
                    transcript.push(TranscriptMessage {
                        role: "assistant".to_string(),
                        content: choice.message.content.clone().map(MessageContent::Text),
                    });

                    let assistant_msg = ChatCompletionRequestAssistantMessageArgs::default()
                        .tool_calls(tool_calls.clone())
                        .build()
                        .map_err(|e| NotegenError::Agent(e.to_string()))?;
                    messages.push(assistant_msg.into());

                    for tool_call in tool_calls {
                        let record = self.execute_tool_call(tool_call).await?;

                        let tool_msg = ChatCompletionRequestToolMessageArgs::default()
                            .tool_call_id(&tool_call.id)
                            .content(record.result.clone())
                            .build()
                            .map_err(|e| NotegenError::Agent(e.to_string()))?;
                        messages.push(tool_msg.into());

                        transcript.push(TranscriptMessage {
                            role: "tool".to_string(),
                            content: Some(MessageContent::from_result(&record.result)),
                        });
                        tool_calls_made.push(record);
                    }
                }
                _ => {
                    return self.build_response(
                        &choice.message.content,
                        transcript,
                        tool_calls_made,
                        iterations,
                    );
                }
            }
        }
    }

    /// Execute a single tool call. Backend failures abort the run; there is
    /// no retry and no feeding errors back to the model.
    async fn execute_tool_call(
        &self,
        tool_call: &ChatCompletionMessageToolCall,
    ) -> Result<ToolCallRecord> {
        let name = &tool_call.function.name;
        let arguments = &tool_call.function.arguments;

        info!("Agent calling tool: {} with args: {}", name, arguments);

        let tool = parse_tool_call(name, arguments)?;
        let result = self.tools.execute(&tool).await?;

        Ok(ToolCallRecord {
            name: name.clone(),
            arguments: arguments.clone(),
            result,
        })
    }

    /// Build the final agent response.
    fn build_response(
        &self,
        content: &Option<String>,
        mut transcript: Vec<TranscriptMessage>,
        tool_calls: Vec<ToolCallRecord>,
        iterations: usize,
    ) -> Result<AgentResponse> {
        let content = content.clone().unwrap_or_default();
        transcript.push(TranscriptMessage::text("assistant", &content));

        Ok(AgentResponse {
            content,
            transcript,
            tool_calls,
            iterations,
        })
    }
}

#[async_trait]
impl NotesGenerator for Agent {
    async fn generate(&self, content: &str) -> Result<AgentResponse> {
        self.run(content).await
    }
}

/// Response from an agent run.
#[derive(Debug)]
pub struct AgentResponse {
    /// The final output from the agent, expected to be an HTML document.
    pub content: String,
    /// Every conversation message in order, including tool-call turns.
    pub transcript: Vec<TranscriptMessage>,
    /// Record of all tool calls made during execution.
    pub tool_calls: Vec<ToolCallRecord>,
    /// Number of iterations (LLM calls) used.
    pub iterations: usize,
}

/// Record of a tool call made by the agent.
#[derive(Debug, Clone)]
pub struct ToolCallRecord {
    /// Name of the tool called.
    pub name: String,
    /// JSON arguments passed to the tool.
    pub arguments: String,
    /// Result returned by the tool.
    pub result: String,
}

impl std::fmt::Display for ToolCallRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_call_record_display() {
        let record = ToolCallRecord {
            name: "web_search".to_string(),
            arguments: r#"{"query": "test"}"#.to_string(),
            result: "Found results".to_string(),
        };
        assert_eq!(format!("{}", record), r#"web_search({"query": "test"})"#);
    }

    #[test]
    fn test_build_response_appends_final_assistant_message() {
        let settings = Settings::default();
        let agent = Agent::from_settings(&settings).unwrap();

        let transcript = vec![
            TranscriptMessage::text("system", "prompt"),
            TranscriptMessage::text("user", "task"),
        ];
        let response = agent
            .build_response(
                &Some("<html></html>".to_string()),
                transcript,
                Vec::new(),
                1,
            )
            .unwrap();

        assert_eq!(response.content, "<html></html>");
        assert_eq!(response.transcript.len(), 3);
        assert_eq!(response.transcript[2].role, "assistant");
        assert_eq!(response.iterations, 1);
    }
}
