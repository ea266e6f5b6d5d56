//! Message format conversion for different providers

use crate::llm::messages::{Message, MessageRole};
use serde_json::{Value, json};

/// Message format converter
pub struct MessageConverter;

impl MessageConverter {
    /// Convert messages for the OpenAI chat completions format
    pub fn to_openai(messages: &[Message]) -> Vec<Value> {
        messages
            .iter()
            .map(|message| {
                json!({
                    "role": message.role.to_string(),
                    "content": message.content
                })
            })
            .collect()
    }

    /// Convert messages for the Anthropic messages format.
    ///
    /// System messages are lifted out into the returned system prompt; the
    /// rest keep their order.
    pub fn to_anthropic(messages: &[Message]) -> (Option<String>, Vec<Value>) {
        let (system, others) = Self::extract_system_message(messages);
        let converted = others
            .iter()
            .map(|message| {
                json!({
                    "role": message.role.to_string(),
                    "content": message.content
                })
            })
            .collect();
        (system, converted)
    }

    /// Convert messages for the Google `generateContent` format.
    ///
    /// Returns the `systemInstruction` object (if any system text exists) and
    /// the `contents` array. Assistant turns use the `model` role.
    pub fn to_google(messages: &[Message]) -> (Option<Value>, Vec<Value>) {
        tracing::debug!(count = messages.len(), "converting messages for Google");

        let (system, others) = Self::extract_system_message(messages);
        let mut contents: Vec<Value> = others
            .iter()
            .map(|message| {
                let role = match message.role {
                    MessageRole::Assistant => "model",
                    _ => "user",
                };
                json!({
                    "role": role,
                    "parts": [{"text": message.content}]
                })
            })
            .collect();

        // A system-only conversation still needs one user turn
        if contents.is_empty() {
            if let Some(text) = &system {
                contents.push(json!({
                    "role": "user",
                    "parts": [{"text": text}]
                }));
                return (None, contents);
            }
        }

        let instruction = system.map(|text| json!({"parts": [{"text": text}]}));
        (instruction, contents)
    }

    /// Split system messages from the rest.
    ///
    /// Multiple system messages are joined with a blank line.
    pub fn extract_system_message(messages: &[Message]) -> (Option<String>, Vec<Message>) {
        let mut system_parts = Vec::new();
        let mut other_messages = Vec::new();

        for message in messages {
            if message.role == MessageRole::System {
                system_parts.push(message.content.as_str());
            } else {
                other_messages.push(message.clone());
            }
        }

        let system = (!system_parts.is_empty()).then(|| system_parts.join("\n\n"));
        (system, other_messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conversation() -> Vec<Message> {
        vec![
            Message::system("be brief"),
            Message::user("hi"),
            Message::assistant("hello"),
            Message::user("again"),
        ]
    }

    #[test]
    fn test_to_openai_keeps_system_inline() {
        let converted = MessageConverter::to_openai(&conversation());
        assert_eq!(converted.len(), 4);
        assert_eq!(converted[0]["role"], "system");
        assert_eq!(converted[2]["role"], "assistant");
    }

    #[test]
    fn test_to_anthropic_lifts_system() {
        let (system, converted) = MessageConverter::to_anthropic(&conversation());
        assert_eq!(system.as_deref(), Some("be brief"));
        assert_eq!(converted.len(), 3);
        assert_eq!(converted[0]["role"], "user");
    }

    #[test]
    fn test_to_google_uses_model_role() {
        let (instruction, contents) = MessageConverter::to_google(&conversation());
        assert_eq!(
            instruction.unwrap()["parts"][0]["text"],
            "be brief"
        );
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(contents[1]["parts"][0]["text"], "hello");
    }

    #[test]
    fn test_to_google_system_only() {
        let (instruction, contents) = MessageConverter::to_google(&[Message::system("only")]);
        assert!(instruction.is_none());
        assert_eq!(contents.len(), 1);
        assert_eq!(contents[0]["role"], "user");
    }

    #[test]
    fn test_extract_joins_multiple_system_messages() {
        let messages = vec![Message::system("a"), Message::system("b"), Message::user("u")];
        let (system, rest) = MessageConverter::extract_system_message(&messages);
        assert_eq!(system.as_deref(), Some("a\n\nb"));
        assert_eq!(rest, vec![Message::user("u")]);
    }
}
