//! Local OpenAI-compatible inference server (Ollama, LM Studio, vLLM)

use super::provider_trait::BackendConfig;
use super::request_builder::{build_openai_request_body, send_json};
use crate::error::RelayResult;
use crate::llm::messages::{GenerationRequest, GenerationResult};
use crate::llm::parsers::ResponseParser;
use reqwest::Client;
use tracing::instrument;

/// Local server handler
#[derive(Debug)]
pub struct LocalProvider {
    config: BackendConfig,
    http_client: Client,
}

impl LocalProvider {
    /// Create a new local provider
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

    /// Chat completion against the local server.
    ///
    /// No credential is required; one is sent as a bearer token when present.
    #[instrument(
        skip(self, request),
        level = "debug",
        fields(provider = %self.config.provider, model = %self.config.model)
    )]
    pub async fn generate(&self, request: &GenerationRequest) -> RelayResult<GenerationResult> {
        let normalizer = self.config.normalizer();
        let url = format!("{}/chat/completions", self.config.base_url);
        let body = build_openai_request_body(&self.config, &request.to_messages());

        tracing::debug!(url = %url, "local request");

        let mut http_request = self.http_client.post(&url).json(&body);
        if let Some(api_key) = self.config.api_key.as_ref().filter(|k| !k.is_blank()) {
            http_request = http_request.bearer_auth(api_key.expose());
        }

        let json = send_json(http_request, &normalizer).await?;
        let parsed = ResponseParser::parse_openai(&json).map_err(|e| normalizer.from_parse(e))?;
        Ok(self.config.result(parsed))
    }
}
