//! Anthropic messages API client

use super::provider_trait::BackendConfig;
use super::request_builder::send_json;
use crate::error::RelayResult;
use crate::llm::converters::MessageConverter;
use crate::llm::messages::{GenerationRequest, GenerationResult};
use crate::llm::parsers::ResponseParser;
use reqwest::Client;
use serde_json::json;
use tracing::instrument;

/// API version sent in the `anthropic-version` header
pub const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// The messages API requires `max_tokens`; used when the spec leaves it unset
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Anthropic provider handler
#[derive(Debug)]
pub struct AnthropicProvider {
    config: BackendConfig,
    http_client: Client,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider
    pub fn new(config: BackendConfig, http_client: Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Resolved configuration
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Anthropic chat completion
    #[instrument(
        skip(self, request),
        level = "debug",
        fields(provider = %self.config.provider, model = %self.config.model)
    )]
    pub async fn generate(&self, request: &GenerationRequest) -> RelayResult<GenerationResult> {
        let normalizer = self.config.normalizer();
        let url = format!("{}/v1/messages", self.config.base_url);

        let (system, messages) = MessageConverter::to_anthropic(&request.to_messages());
        let mut body = json!({
            "model": self.config.model,
            "messages": messages,
            "max_tokens": self.config.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            "temperature": self.config.temperature,
        });
        if let Some(system) = system {
            body["system"] = json!(system);
        }

        let mut http_request = self
            .http_client
            .post(&url)
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .json(&body);
        if let Some(api_key) = &self.config.api_key {
            http_request = http_request.header("x-api-key", api_key.expose());
        }

        let json = send_json(http_request, &normalizer).await?;
        let parsed =
            ResponseParser::parse_anthropic(&json).map_err(|e| normalizer.from_parse(e))?;
        Ok(self.config.result(parsed))
    }
}
