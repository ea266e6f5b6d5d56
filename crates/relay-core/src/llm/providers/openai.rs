//! OpenAI-compatible chat completions client (OpenAI and OpenRouter)

use super::provider_trait::BackendConfig;
use super::request_builder::{build_openai_request_body, send_json};
use crate::error::RelayResult;
use crate::llm::messages::{GenerationRequest, GenerationResult};
use crate::llm::parsers::ResponseParser;
use crate::llm::provider_types::LlmProvider;
use reqwest::Client;
use tracing::instrument;

const OPENROUTER_REFERER: &str = "https://github.com/relay-team/relay";
const OPENROUTER_TITLE: &str = "Relay";

/// OpenAI chat completions handler
#[derive(Debug)]
pub struct OpenAiProvider {
    config: BackendConfig,
    http_client: Client,
}

impl OpenAiProvider {
    /// Create a new OpenAI-compatible provider
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

    /// Chat completion
    #[instrument(
        skip(self, request),
        level = "debug",
        fields(provider = %self.config.provider, model = %self.config.model)
    )]
    pub async fn generate(&self, request: &GenerationRequest) -> RelayResult<GenerationResult> {
        let normalizer = self.config.normalizer();
        let url = format!("{}/chat/completions", self.config.base_url);
        let body = build_openai_request_body(&self.config, &request.to_messages());

        let mut http_request = self.http_client.post(&url).json(&body);
        if let Some(api_key) = &self.config.api_key {
            http_request = http_request.bearer_auth(api_key.expose());
        }
        if self.config.provider == LlmProvider::OpenRouter {
            http_request = http_request
                .header("HTTP-Referer", OPENROUTER_REFERER)
                .header("X-Title", OPENROUTER_TITLE);
        }

        let json = send_json(http_request, &normalizer).await?;
        let parsed = ResponseParser::parse_openai(&json).map_err(|e| normalizer.from_parse(e))?;
        Ok(self.config.result(parsed))
    }
}
