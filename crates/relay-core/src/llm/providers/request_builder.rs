//! Shared request helpers for the backend clients

use super::provider_trait::BackendConfig;
use crate::error::RelayResult;
use crate::llm::converters::MessageConverter;
use crate::llm::messages::Message;
use crate::llm::normalizer::ErrorNormalizer;
use serde_json::{Value, json};

/// Build an OpenAI-compatible chat completion request body.
///
/// Shared by OpenAI, OpenRouter and local servers.
pub fn build_openai_request_body(config: &BackendConfig, messages: &[Message]) -> Value {
    let mut body = json!({
        "model": config.model,
        "messages": MessageConverter::to_openai(messages),
        "temperature": config.temperature,
    });

    if let Some(max_tokens) = config.max_tokens {
        body["max_tokens"] = json!(max_tokens);
    }

    body
}

/// Send a request and decode a successful JSON body.
///
/// Transport failures, non-2xx statuses and undecodable bodies all come back
/// normalized.
pub async fn send_json(
    request: reqwest::RequestBuilder,
    normalizer: &ErrorNormalizer,
) -> RelayResult<Value> {
    let response = request
        .send()
        .await
        .map_err(|e| normalizer.from_transport(e))?;

    if !response.status().is_success() {
        return Err(normalizer.from_response(response).await);
    }

    let text = response
        .text()
        .await
        .map_err(|e| normalizer.from_transport(e))?;

    serde_json::from_str(&text).map_err(|e| normalizer.from_parse(e))
}
