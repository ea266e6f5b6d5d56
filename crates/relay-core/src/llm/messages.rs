//! Generation request and result types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Role of a message in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System message (instructions)
    System,
    /// User message (human input)
    User,
    /// Assistant message (AI response)
    Assistant,
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// A message in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: MessageRole,
    /// Content of the message
    pub content: String,
}

impl Message {
    /// Create a new system message
    pub fn system<S: Into<String>>(content: S) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Create a new user message
    pub fn user<S: Into<String>>(content: S) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create a new assistant message
    pub fn assistant<S: Into<String>>(content: S) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Input to one generation.
///
/// Immutable once built: clients borrow it and every attempt sees the same
/// request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationRequest {
    /// A single prompt, sent as one user message
    Prompt(String),
    /// An explicit conversation
    Messages(Vec<Message>),
}

impl GenerationRequest {
    /// Build a prompt request
    pub fn prompt(text: impl Into<String>) -> Self {
        Self::Prompt(text.into())
    }

    /// Build a conversation request
    pub fn messages(messages: Vec<Message>) -> Self {
        Self::Messages(messages)
    }

    /// The request as a message list
    pub fn to_messages(&self) -> Vec<Message> {
        match self {
            Self::Prompt(text) => vec![Message::user(text.clone())],
            Self::Messages(messages) => messages.clone(),
        }
    }

    /// Whether there is nothing to send
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Prompt(_) => false,
            Self::Messages(messages) => messages.is_empty(),
        }
    }
}

impl From<&str> for GenerationRequest {
    fn from(text: &str) -> Self {
        Self::prompt(text)
    }
}

impl From<String> for GenerationRequest {
    fn from(text: String) -> Self {
        Self::Prompt(text)
    }
}

impl From<Vec<Message>> for GenerationRequest {
    fn from(messages: Vec<Message>) -> Self {
        Self::Messages(messages)
    }
}

/// Token usage keyed by counter name (e.g. `prompt_tokens`)
pub type Usage = BTreeMap<String, u64>;

/// `provider/model` pair used in diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecLabel {
    /// Provider id
    pub provider: String,
    /// Model name
    pub model: String,
}

impl SpecLabel {
    /// Create a label
    pub fn new(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
        }
    }
}

impl std::fmt::Display for SpecLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.provider, self.model)
    }
}

/// Metadata describing how a result was produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMetadata {
    /// Provider whose client produced the text
    pub provider: String,
    /// Model that produced the text
    pub model: String,
    /// Finish reason reported by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    /// Token usage reported by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    /// Backend calls made against `provider`
    pub attempts: u32,
    /// Primary spec, when the result came from a fallback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_from: Option<SpecLabel>,
}

/// Successful generation output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Generated text
    pub text: String,
    /// How the text was produced
    pub metadata: ResponseMetadata,
}

impl GenerationResult {
    /// Create a result from a single backend call
    pub fn new(
        text: impl Into<String>,
        provider: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            metadata: ResponseMetadata {
                provider: provider.into(),
                model: model.into(),
                finish_reason: None,
                usage: None,
                attempts: 1,
                fallback_from: None,
            },
        }
    }

    /// Add finish reason
    pub fn with_finish_reason(mut self, reason: Option<String>) -> Self {
        self.metadata.finish_reason = reason;
        self
    }

    /// Add usage information
    pub fn with_usage(mut self, usage: Option<Usage>) -> Self {
        self.metadata.usage = usage.filter(|u| !u.is_empty());
        self
    }

    /// Set the attempt count
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.metadata.attempts = attempts;
        self
    }

    /// Mark the result as produced by a fallback for `primary`
    pub fn with_fallback_from(mut self, primary: SpecLabel) -> Self {
        self.metadata.fallback_from = Some(primary);
        self
    }

    /// Whether the result came from a fallback spec
    pub fn is_fallback(&self) -> bool {
        self.metadata.fallback_from.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_is_one_user_message() {
        let request = GenerationRequest::prompt("hello");
        assert_eq!(request.to_messages(), vec![Message::user("hello")]);
        assert!(!request.is_empty());
    }

    #[test]
    fn test_empty_messages() {
        assert!(GenerationRequest::messages(Vec::new()).is_empty());
        assert!(!GenerationRequest::Prompt(String::new()).is_empty());
    }

    #[test]
    fn test_result_builders() {
        let mut usage = Usage::new();
        usage.insert("prompt_tokens".to_string(), 3);
        let result = GenerationResult::new("hi", "openai", "m1")
            .with_usage(Some(usage.clone()))
            .with_attempts(3)
            .with_fallback_from(SpecLabel::new("anthropic", "claude"));

        assert_eq!(result.metadata.usage, Some(usage));
        assert_eq!(result.metadata.attempts, 3);
        assert!(result.is_fallback());
        assert_eq!(
            result.metadata.fallback_from.as_ref().map(|l| l.to_string()),
            Some("anthropic/claude".to_string())
        );
    }

    #[test]
    fn test_empty_usage_is_dropped() {
        let result = GenerationResult::new("hi", "openai", "m1").with_usage(Some(Usage::new()));
        assert!(result.metadata.usage.is_none());
    }

    #[test]
    fn test_role_serde() {
        let json = serde_json::to_string(&Message::system("s")).unwrap();
        assert_eq!(json, r#"{"role":"system","content":"s"}"#);
    }
}
