//! Conversation transcript types.
//!
//! One agent run produces an ordered list of messages. Content is a closed
//! variant rather than an open dynamic type: plain text, or a structured
//! JSON value for tool results that are JSON documents.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Content of a transcript message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Value(Value),
}

impl MessageContent {
    /// Classify a tool result string: JSON arrays and objects become
    /// structured values, everything else stays text.
    pub fn from_result(result: &str) -> Self {
        match serde_json::from_str::<Value>(result) {
            Ok(value) if value.is_array() || value.is_object() => MessageContent::Value(value),
            _ => MessageContent::Text(result.to_string()),
        }
    }
}

/// A single message in an agent run's conversation.
///
/// Assistant turns that only carry tool calls have no content; consumers
/// that serialize transcripts drop those.
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptMessage {
    pub role: String,
    pub content: Option<MessageContent>,
}

impl TranscriptMessage {
    /// A message with plain text content.
    pub fn text(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: Some(MessageContent::Text(content.into())),
        }
    }

    /// A message with no content (e.g. an assistant tool-call turn).
    pub fn empty(role: &str) -> Self {
        Self {
            role: role.to_string(),
            content: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_result_classifies_json() {
        assert_eq!(
            MessageContent::from_result(r#"["https://a.png","https://b.png"]"#),
            MessageContent::Value(json!(["https://a.png", "https://b.png"]))
        );
        assert_eq!(
            MessageContent::from_result("Found 3 results"),
            MessageContent::Text("Found 3 results".to_string())
        );
        // Bare scalars that happen to parse as JSON stay text.
        assert_eq!(
            MessageContent::from_result("42"),
            MessageContent::Text("42".to_string())
        );
    }

    #[test]
    fn test_untagged_serialization() {
        let text = serde_json::to_value(MessageContent::Text("hi".into())).unwrap();
        assert_eq!(text, json!("hi"));

        let value = serde_json::to_value(MessageContent::Value(json!({"k": 1}))).unwrap();
        assert_eq!(value, json!({"k": 1}));
    }

    #[test]
    fn test_transcript_message_constructors() {
        let msg = TranscriptMessage::text("user", "hello");
        assert_eq!(msg.role, "user");
        assert_eq!(msg.content, Some(MessageContent::Text("hello".into())));

        let empty = TranscriptMessage::empty("assistant");
        assert!(empty.content.is_none());
    }
}
