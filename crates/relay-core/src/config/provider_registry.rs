//! Static provider registry
//!
//! The registry is the single authority on which provider ids exist, which
//! model each one defaults to, where its API lives and whether it needs a
//! credential. It is pure: built once from the embedded table, no I/O and no
//! mutation afterwards.

use super::embedded_providers::EMBEDDED_PROVIDERS;
use super::provider_spec::ProviderSpec;
use crate::error::{NormalizedError, RelayResult};
use crate::llm::provider_types::LlmProvider;

/// Information about one supported provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderInfo {
    /// Typed provider id
    pub provider: LlmProvider,
    /// Display name (e.g., "Anthropic")
    pub display_name: &'static str,
    /// Model used when a spec leaves the model empty
    pub default_model: &'static str,
    /// API base URL
    pub api_base_url: &'static str,
    /// Standard environment variables holding the API key, in lookup order
    pub env_vars: &'static [&'static str],
    /// Help URL for getting API keys
    pub help_url: Option<&'static str>,
    /// Whether this provider requires an API key
    pub requires_api_key: bool,
}

impl ProviderInfo {
    /// Canonical provider id
    pub fn id(&self) -> &'static str {
        self.provider.name()
    }
}

/// A spec whose provider has been validated and whose omitted fields are filled
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSpec {
    /// Typed provider
    pub provider: LlmProvider,
    /// Input spec with canonical provider id and a non-empty model
    pub spec: ProviderSpec,
    /// Effective endpoint (spec override or registry default)
    pub base_url: String,
    /// Whether the provider mandates a credential
    pub requires_api_key: bool,
}

impl ResolvedSpec {
    /// Model name
    pub fn model(&self) -> &str {
        &self.spec.model
    }
}

/// Provider registry over the built-in provider table
#[derive(Debug, Clone, Copy)]
pub struct ProviderRegistry {
    providers: &'static [ProviderInfo],
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderRegistry {
    /// Create a registry over the embedded providers
    pub fn new() -> Self {
        Self {
            providers: EMBEDDED_PROVIDERS,
        }
    }

    /// Provider ids in stable registry order
    pub fn list_providers(&self) -> Vec<&'static str> {
        self.providers.iter().map(ProviderInfo::id).collect()
    }

    /// Whether `provider` names a registered provider (aliases accepted)
    pub fn is_known(&self, provider: &str) -> bool {
        self.find(provider).is_some()
    }

    /// Look up a provider by id
    pub fn lookup(&self, provider: &str) -> RelayResult<&ProviderInfo> {
        self.find(provider)
            .ok_or_else(|| NormalizedError::unsupported_provider(provider, ""))
    }

    /// Registry entry for a typed provider
    pub fn info(&self, provider: LlmProvider) -> Option<&ProviderInfo> {
        self.providers.iter().find(|info| info.provider == provider)
    }

    /// Default model for a provider id
    pub fn default_model(&self, provider: &str) -> RelayResult<&'static str> {
        self.lookup(provider).map(|info| info.default_model)
    }

    /// Validate a spec and fill the fields it left empty.
    ///
    /// Fails with `UnsupportedProvider` if the provider is not registered.
    pub fn resolve(&self, spec: &ProviderSpec) -> RelayResult<ResolvedSpec> {
        let info = self
            .find(&spec.provider)
            .ok_or_else(|| NormalizedError::unsupported_provider(&spec.provider, &spec.model))?;

        let mut resolved = spec.clone();
        resolved.provider = info.id().to_string();
        if resolved.model.trim().is_empty() {
            resolved.model = info.default_model.to_string();
        }

        let base_url = spec
            .base_url
            .as_deref()
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| info.api_base_url.to_string());

        Ok(ResolvedSpec {
            provider: info.provider,
            spec: resolved,
            base_url,
            requires_api_key: info.requires_api_key,
        })
    }

    fn find(&self, provider: &str) -> Option<&ProviderInfo> {
        let parsed: LlmProvider = provider.parse().ok()?;
        self.info(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_providers_is_stable() {
        let registry = ProviderRegistry::new();
        let first = registry.list_providers();
        let second = registry.list_providers();
        assert_eq!(first, second);
        assert_eq!(
            first,
            vec!["openai", "anthropic", "google", "openrouter", "local"]
        );
    }

    #[test]
    fn test_every_variant_is_registered() {
        let registry = ProviderRegistry::new();
        for provider in LlmProvider::ALL {
            assert!(registry.info(provider).is_some(), "{} missing", provider);
        }
    }

    #[test]
    fn test_default_model() {
        let registry = ProviderRegistry::new();
        assert_eq!(registry.default_model("openai").unwrap(), "gpt-4o");
        assert_eq!(registry.default_model("ollama").unwrap(), "llama3.1");

        let err = registry.default_model("unknown-x").unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::UnsupportedProvider);
        assert_eq!(err.provider, "unknown-x");
    }

    #[test]
    fn test_is_known() {
        let registry = ProviderRegistry::new();
        assert!(registry.is_known("openai"));
        assert!(registry.is_known("Anthropic"));
        assert!(!registry.is_known("unknown-x"));
    }

    #[test]
    fn test_resolve_fills_model_and_endpoint() {
        let registry = ProviderRegistry::new();
        let spec = ProviderSpec::new("ollama", "");
        let resolved = registry.resolve(&spec).unwrap();

        assert_eq!(resolved.provider, LlmProvider::Local);
        assert_eq!(resolved.spec.provider, "local");
        assert_eq!(resolved.model(), "llama3.1");
        assert_eq!(resolved.base_url, "http://localhost:11434/v1");
        assert!(!resolved.requires_api_key);
    }

    #[test]
    fn test_resolve_keeps_explicit_fields() {
        let registry = ProviderRegistry::new();
        let spec = ProviderSpec::new("openai", "m1").with_base_url("http://127.0.0.1:9000/");
        let resolved = registry.resolve(&spec).unwrap();

        assert_eq!(resolved.model(), "m1");
        assert_eq!(resolved.base_url, "http://127.0.0.1:9000");
        assert!(resolved.requires_api_key);
    }

    #[test]
    fn test_resolve_rejects_unknown_provider() {
        let registry = ProviderRegistry::new();
        let err = registry
            .resolve(&ProviderSpec::new("unknown-x", "m"))
            .unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::UnsupportedProvider);
        assert_eq!(err.model, "m");
        assert_eq!(err.attempts, 0);
    }
}
