//! Backend client trait and unified enum

use crate::config::{Credential, ResolvedSpec};
use crate::error::{NormalizedError, RelayResult};
use crate::llm::messages::{GenerationRequest, GenerationResult};
use crate::llm::normalizer::ErrorNormalizer;
use crate::llm::parsers::ParsedResponse;
use crate::llm::provider_types::{LlmProvider, TimeoutConfig};
use async_trait::async_trait;

/// Fully resolved configuration for one backend client
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    /// Provider the client talks to
    pub provider: LlmProvider,
    /// Model name (never empty)
    pub model: String,
    /// Endpoint without trailing slash
    pub base_url: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Connection and request timeouts
    pub timeouts: TimeoutConfig,
    /// API key, when the provider uses one
    pub api_key: Option<Credential>,
}

impl BackendConfig {
    /// Build from a resolved spec and an optional credential
    pub fn from_resolved(resolved: &ResolvedSpec, api_key: Option<Credential>) -> Self {
        Self {
            provider: resolved.provider,
            model: resolved.spec.model.clone(),
            base_url: resolved.base_url.clone(),
            temperature: resolved.spec.temperature,
            max_tokens: resolved.spec.max_tokens,
            timeouts: resolved.spec.timeouts(),
            api_key,
        }
    }

    /// Normalizer tagging errors with this provider and model
    pub fn normalizer(&self) -> ErrorNormalizer {
        ErrorNormalizer::new(self.provider.name(), &self.model)
    }

    /// Wrap parsed vendor output into a single-attempt result
    pub(crate) fn result(&self, parsed: ParsedResponse) -> GenerationResult {
        GenerationResult::new(parsed.text, self.provider.name(), &self.model)
            .with_finish_reason(parsed.finish_reason)
            .with_usage(parsed.usage)
    }
}

/// One generation call against one backend.
///
/// Implementations return only [`NormalizedError`]s; vendor error types never
/// escape.
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// Canonical provider id
    fn provider(&self) -> &str;

    /// Model name
    fn model(&self) -> &str;

    /// Perform one generation
    async fn generate(&self, request: &GenerationRequest) -> RelayResult<GenerationResult>;
}

/// Unified provider enum that wraps all provider implementations
#[derive(Debug)]
pub enum ProviderInstance {
    OpenAi(super::OpenAiProvider),
    Anthropic(super::AnthropicProvider),
    Google(super::GoogleProvider),
    OpenRouter(super::OpenAiProvider),
    Local(super::LocalProvider),
}

impl ProviderInstance {
    /// Configuration the wrapped client was built with
    pub fn config(&self) -> &BackendConfig {
        match self {
            Self::OpenAi(p) | Self::OpenRouter(p) => p.config(),
            Self::Anthropic(p) => p.config(),
            Self::Google(p) => p.config(),
            Self::Local(p) => p.config(),
        }
    }
}

#[async_trait]
impl BackendClient for ProviderInstance {
    fn provider(&self) -> &str {
        self.config().provider.name()
    }

    fn model(&self) -> &str {
        &self.config().model
    }

    async fn generate(&self, request: &GenerationRequest) -> RelayResult<GenerationResult> {
        let config = self.config();
        if request.is_empty() {
            return Err(NormalizedError::invalid_request(
                config.provider.name(),
                &config.model,
                "request contains no messages",
            ));
        }

        let call = async {
            match self {
                Self::OpenAi(p) | Self::OpenRouter(p) => p.generate(request).await,
                Self::Anthropic(p) => p.generate(request).await,
                Self::Google(p) => p.generate(request).await,
                Self::Local(p) => p.generate(request).await,
            }
        };

        // Bounds the whole call, body read included
        let limit = config.timeouts.request_timeout;
        match tokio::time::timeout(limit, call).await {
            Ok(result) => result,
            Err(_) => Err(config.normalizer().timeout(limit)),
        }
    }
}
