//! Response parsing for different providers

use crate::llm::messages::Usage;
use serde_json::{Map, Value};
use thiserror::Error;

/// A response body that did not have the expected shape
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ParseError(pub String);

impl ParseError {
    fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Text, finish reason and usage extracted from a vendor response
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedResponse {
    /// Generated text
    pub text: String,
    /// Vendor finish reason
    pub finish_reason: Option<String>,
    /// Token counters
    pub usage: Option<Usage>,
}

/// Response parser for various providers
pub struct ResponseParser;

impl ResponseParser {
    /// Parse an OpenAI-compatible chat completion
    pub fn parse_openai(response: &Value) -> Result<ParsedResponse, ParseError> {
        let choice = response["choices"]
            .as_array()
            .and_then(|choices| choices.first())
            .ok_or_else(|| ParseError::new("no choices in response"))?;

        let text = choice["message"]["content"]
            .as_str()
            .ok_or_else(|| ParseError::new("no message content in first choice"))?
            .to_string();

        Ok(ParsedResponse {
            text,
            finish_reason: choice["finish_reason"].as_str().map(str::to_string),
            usage: response["usage"].as_object().map(numeric_fields),
        })
    }

    /// Parse an Anthropic messages response
    ///
    /// Text blocks are joined with newlines; other block types are skipped.
    pub fn parse_anthropic(response: &Value) -> Result<ParsedResponse, ParseError> {
        let blocks = response["content"]
            .as_array()
            .ok_or_else(|| ParseError::new("no content array in response"))?;

        let texts: Vec<&str> = blocks
            .iter()
            .filter(|block| block["type"] == "text")
            .filter_map(|block| block["text"].as_str())
            .collect();
        if texts.is_empty() {
            return Err(ParseError::new("no text blocks in response content"));
        }

        Ok(ParsedResponse {
            text: texts.join("\n"),
            finish_reason: response["stop_reason"].as_str().map(str::to_string),
            usage: response["usage"].as_object().map(numeric_fields),
        })
    }

    /// Parse a Google `generateContent` response
    pub fn parse_google(response: &Value) -> Result<ParsedResponse, ParseError> {
        let candidate = response["candidates"]
            .as_array()
            .ok_or_else(|| ParseError::new("no candidates in response"))?
            .first()
            .ok_or_else(|| ParseError::new("empty candidates array in response"))?;

        let parts = candidate["content"]["parts"]
            .as_array()
            .ok_or_else(|| ParseError::new("no content parts in first candidate"))?;

        let text: String = parts.iter().filter_map(|part| part["text"].as_str()).collect();

        let usage = response["usageMetadata"].as_object().map(|meta| {
            let count = |key: &str| meta.get(key).and_then(Value::as_u64);
            let mut usage = Usage::new();
            let prompt = count("promptTokenCount").unwrap_or(0);
            let completion = count("candidatesTokenCount").unwrap_or(0);
            usage.insert("prompt_tokens".to_string(), prompt);
            usage.insert("completion_tokens".to_string(), completion);
            usage.insert(
                "total_tokens".to_string(),
                count("totalTokenCount")
                    .unwrap_or_else(|| prompt.saturating_add(completion)),
            );
            usage
        });

        Ok(ParsedResponse {
            text,
            finish_reason: candidate["finishReason"].as_str().map(str::to_string),
            usage,
        })
    }
}

/// Collect the unsigned integer counters of a usage object
fn numeric_fields(object: &Map<String, Value>) -> Usage {
    object
        .iter()
        .filter_map(|(key, value)| value.as_u64().map(|n| (key.clone(), n)))
        .collect()
}
