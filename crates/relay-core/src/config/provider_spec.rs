//! Provider spec: the (provider, model, generation options) tuple

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::llm::provider_types::TimeoutConfig;

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default retry budget (additional attempts beyond the first)
pub const DEFAULT_RETRY_COUNT: u32 = 3;

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_retry_count() -> u32 {
    DEFAULT_RETRY_COUNT
}

/// Request-scoped description of which backend to call and how.
///
/// `model` may be left empty; the registry fills in the provider's default
/// model before a client is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSpec {
    /// Provider id (e.g. "openai", "anthropic", "local")
    pub provider: String,
    /// Model name; empty means "registry default"
    #[serde(default)]
    pub model: String,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// End-to-end timeout for one backend call
    #[serde(
        default,
        with = "humantime_serde",
        skip_serializing_if = "Option::is_none"
    )]
    pub timeout: Option<Duration>,
    /// Retry budget; the backend is called at most `retry_count + 1` times
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
    /// Endpoint override; absent means the registry default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl ProviderSpec {
    /// Create a spec with default generation options
    pub fn new(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: None,
            timeout: None,
            retry_count: DEFAULT_RETRY_COUNT,
            base_url: None,
        }
    }

    /// Set temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set max tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the per-call timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the retry budget
    pub fn with_retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }

    /// Override the endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// `provider/model` label
    pub fn label(&self) -> String {
        format!("{}/{}", self.provider, self.model)
    }

    /// Total number of backend calls this spec permits
    pub fn max_attempts(&self) -> u32 {
        self.retry_count.saturating_add(1)
    }

    /// Connection and request timeouts derived from `timeout`
    pub fn timeouts(&self) -> TimeoutConfig {
        TimeoutConfig::for_request(self.timeout)
    }

    /// Whether this spec names the same provider as `other` (aliases ignored)
    pub fn same_provider(&self, other: &ProviderSpec) -> bool {
        self.provider.trim().eq_ignore_ascii_case(other.provider.trim())
    }
}
