//! Google (Gemini) provider implementation

use super::provider_trait::BackendConfig;
use super::request_builder::send_json;
use crate::error::{NormalizedError, RelayResult};
use crate::llm::converters::MessageConverter;
use crate::llm::messages::{GenerationRequest, GenerationResult};
use crate::llm::parsers::ResponseParser;
use reqwest::{Client, Url};
use serde_json::json;
use tracing::instrument;

/// Google (Gemini) provider handler
#[derive(Debug)]
pub struct GoogleProvider {
    config: BackendConfig,
    http_client: Client,
}

impl GoogleProvider {
    /// Create a new Google provider
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

    /// `{base}/v1beta/models/{model}:generateContent` with the model as one encoded segment
    fn endpoint(&self) -> RelayResult<Url> {
        let invalid = |detail: String| {
            NormalizedError::invalid_request(
                self.config.provider.name(),
                &self.config.model,
                format!("invalid base URL '{}': {}", self.config.base_url, detail),
            )
        };

        let mut url = Url::parse(&self.config.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("cannot be a base".to_string()))?
            .pop_if_empty()
            .extend([
                "v1beta",
                "models",
                format!("{}:generateContent", self.config.model).as_str(),
            ]);
        Ok(url)
    }

    /// Google (Gemini) chat completion
    ///
    /// The key goes in the `x-goog-api-key` header, never the query string.
    #[instrument(
        skip(self, request),
        level = "debug",
        fields(provider = %self.config.provider, model = %self.config.model)
    )]
    pub async fn generate(&self, request: &GenerationRequest) -> RelayResult<GenerationResult> {
        let normalizer = self.config.normalizer();
        let url = self.endpoint()?;

        let (system_instruction, contents) = MessageConverter::to_google(&request.to_messages());
        let mut generation_config = json!({ "temperature": self.config.temperature });
        if let Some(max_tokens) = self.config.max_tokens {
            generation_config["maxOutputTokens"] = json!(max_tokens);
        }

        let mut body = json!({
            "contents": contents,
            "generationConfig": generation_config,
        });
        if let Some(instruction) = system_instruction {
            body["systemInstruction"] = instruction;
        }

        let mut http_request = self.http_client.post(url).json(&body);
        if let Some(api_key) = &self.config.api_key {
            http_request = http_request.header("x-goog-api-key", api_key.expose());
        }

        let json = send_json(http_request, &normalizer).await?;
        let parsed = ResponseParser::parse_google(&json).map_err(|e| normalizer.from_parse(e))?;
        Ok(self.config.result(parsed))
    }
}
