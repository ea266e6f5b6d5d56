//! Client factory
//!
//! Turns a [`ProviderSpec`] plus an optional credential into a ready backend
//! client. Provider and credential checks are local and happen before any
//! client exists, so they never consume a retry budget.

use reqwest::Client;
use std::net::IpAddr;
use tracing::debug;

use crate::config::{
    Credential, ProviderRegistry, ProviderSpec, ResolvedSpec, credential_env_vars,
};
use crate::error::{NormalizedError, RelayResult};
use crate::llm::provider_types::LlmProvider;
use crate::llm::providers::{
    AnthropicProvider, BackendClient, BackendConfig, GoogleProvider, LocalProvider,
    OpenAiProvider, ProviderInstance,
};

/// Builds concrete clients from validated configuration
pub trait BackendBuilder: Send + Sync {
    /// Client type produced
    type Client: BackendClient;

    /// Build a client; `config` has already passed registry and credential checks
    fn build(&self, config: BackendConfig) -> RelayResult<Self::Client>;
}

/// Builds reqwest-backed [`ProviderInstance`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpBackends;

impl BackendBuilder for HttpBackends {
    type Client = ProviderInstance;

    fn build(&self, config: BackendConfig) -> RelayResult<ProviderInstance> {
        let provider = config.provider.name();
        config.timeouts.validate().map_err(|e| {
            NormalizedError::invalid_request(
                provider,
                &config.model,
                format!("invalid timeout configuration: {}", e),
            )
        })?;

        let mut client_builder = Client::builder()
            .connect_timeout(config.timeouts.connection_timeout)
            .timeout(config.timeouts.request_timeout);
        if is_loopback(&config.base_url) {
            client_builder = client_builder.no_proxy();
        }

        let http_client = client_builder.build().map_err(|e| {
            NormalizedError::invalid_request(
                provider,
                &config.model,
                format!("failed to create HTTP client: {}", e),
            )
        })?;

        debug!(
            provider,
            model = %config.model,
            base_url = %config.base_url,
            connect_timeout_ms = config.timeouts.connection_timeout.as_millis() as u64,
            request_timeout_ms = config.timeouts.request_timeout.as_millis() as u64,
            "created backend client"
        );

        let instance = match config.provider {
            LlmProvider::OpenAi => {
                ProviderInstance::OpenAi(OpenAiProvider::new(config, http_client))
            }
            LlmProvider::Anthropic => {
                ProviderInstance::Anthropic(AnthropicProvider::new(config, http_client))
            }
            LlmProvider::Google => {
                ProviderInstance::Google(GoogleProvider::new(config, http_client))
            }
            LlmProvider::OpenRouter => {
                ProviderInstance::OpenRouter(OpenAiProvider::new(config, http_client))
            }
            LlmProvider::Local => ProviderInstance::Local(LocalProvider::new(config, http_client)),
        };
        Ok(instance)
    }
}

/// Validates specs against the registry and builds clients
#[derive(Debug, Clone, Default)]
pub struct ClientFactory<B = HttpBackends> {
    registry: ProviderRegistry,
    builder: B,
}

impl ClientFactory<HttpBackends> {
    /// Factory producing HTTP clients
    pub fn new() -> Self {
        Self::with_builder(HttpBackends)
    }
}

impl<B: BackendBuilder> ClientFactory<B> {
    /// Factory using a custom builder
    pub fn with_builder(builder: B) -> Self {
        Self {
            registry: ProviderRegistry::new(),
            builder,
        }
    }

    /// Registry used for validation
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Underlying builder
    pub fn builder(&self) -> &B {
        &self.builder
    }

    /// Create a client for `spec`.
    ///
    /// Fails with `UnsupportedProvider` for unknown providers and with
    /// `MissingCredential` when the provider needs a key and none was given.
    pub fn create(
        &self,
        spec: &ProviderSpec,
        credential: Option<Credential>,
    ) -> RelayResult<B::Client> {
        let resolved = self.registry.resolve(spec)?;
        self.create_resolved(&resolved, credential)
    }

    /// Create a client for an already resolved spec
    pub fn create_resolved(
        &self,
        resolved: &ResolvedSpec,
        credential: Option<Credential>,
    ) -> RelayResult<B::Client> {
        let credential = credential.filter(|c| !c.is_blank());
        if resolved.requires_api_key && credential.is_none() {
            let hint = credential_env_vars(resolved.provider).join(" or ");
            return Err(NormalizedError::missing_credential(
                resolved.provider.name(),
                resolved.model(),
                Some(&hint),
            ));
        }

        self.builder
            .build(BackendConfig::from_resolved(resolved, credential))
    }
}

fn is_loopback(base_url: &str) -> bool {
    reqwest::Url::parse(base_url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .is_some_and(|host| {
            host.eq_ignore_ascii_case("localhost")
                || host
                    .trim_matches(|c| c == '[' || c == ']')
                    .parse::<IpAddr>()
                    .is_ok_and(|ip| ip.is_loopback())
        })
}
