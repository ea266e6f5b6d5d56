//! LLM provider identifiers and timeout configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timeout configuration for backend requests
///
/// Provides control over two timeout stages:
/// - **Connection timeout**: Time allowed to establish a connection
/// - **Request timeout**: Time allowed for the complete request/response cycle
///
/// # Examples
///
/// ```rust
/// use relay_core::llm::TimeoutConfig;
/// use std::time::Duration;
///
/// // Use default timeouts (10s connection, 60s request)
/// let config = TimeoutConfig::default();
///
/// // Derive from a spec-level request timeout
/// let config = TimeoutConfig::for_request(Some(Duration::from_secs(5)));
/// assert_eq!(config.connection_timeout, Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Maximum time allowed to establish a TCP connection
    #[serde(with = "humantime_serde")]
    pub connection_timeout: Duration,

    /// End-to-end limit for one backend call
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl TimeoutConfig {
    /// Default connection timeout
    pub const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(10);

    /// Default request timeout
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

    /// Create a new timeout configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the timeouts for a spec whose request timeout may be absent.
    ///
    /// The connection timeout never exceeds the request timeout.
    pub fn for_request(request_timeout: Option<Duration>) -> Self {
        let request_timeout = request_timeout.unwrap_or(Self::DEFAULT_REQUEST_TIMEOUT);
        Self {
            connection_timeout: Self::DEFAULT_CONNECTION_TIMEOUT.min(request_timeout),
            request_timeout,
        }
    }

    /// Set connection timeout
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Set request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Validate timeout configuration
    ///
    /// Returns an error if:
    /// - Any timeout is zero
    /// - Request timeout is less than connection timeout
    pub fn validate(&self) -> Result<(), String> {
        if self.connection_timeout.is_zero() {
            return Err("Connection timeout must be greater than 0".to_string());
        }
        if self.request_timeout.is_zero() {
            return Err("Request timeout must be greater than 0".to_string());
        }
        if self.request_timeout < self.connection_timeout {
            return Err(
                "Request timeout must be greater than or equal to connection timeout".to_string(),
            );
        }
        Ok(())
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connection_timeout: Self::DEFAULT_CONNECTION_TIMEOUT,
            request_timeout: Self::DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Supported LLM providers
///
/// The set is closed: an id that does not parse into one of these variants
/// is rejected before any client is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// OpenAI (GPT models)
    OpenAi,
    /// Anthropic (Claude models)
    Anthropic,
    /// Google (Gemini models)
    Google,
    /// OpenRouter (OpenAI-compatible gateway)
    OpenRouter,
    /// Local OpenAI-compatible inference server (Ollama, LM Studio, vLLM)
    Local,
}

impl LlmProvider {
    /// Every provider, in registry order
    pub const ALL: [LlmProvider; 5] = [
        LlmProvider::OpenAi,
        LlmProvider::Anthropic,
        LlmProvider::Google,
        LlmProvider::OpenRouter,
        LlmProvider::Local,
    ];

    /// Get the provider name as a string
    pub fn name(&self) -> &'static str {
        match self {
            LlmProvider::OpenAi => "openai",
            LlmProvider::Anthropic => "anthropic",
            LlmProvider::Google => "google",
            LlmProvider::OpenRouter => "openrouter",
            LlmProvider::Local => "local",
        }
    }
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for LlmProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(LlmProvider::OpenAi),
            "anthropic" | "claude" => Ok(LlmProvider::Anthropic),
            "google" | "gemini" => Ok(LlmProvider::Google),
            "openrouter" => Ok(LlmProvider::OpenRouter),
            "local" | "ollama" => Ok(LlmProvider::Local),
            _ => Err(format!("unknown provider '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_round_trips_through_name() {
        for provider in LlmProvider::ALL {
            assert_eq!(provider.name().parse::<LlmProvider>(), Ok(provider));
        }
    }

    #[test]
    fn test_provider_aliases() {
        assert_eq!("Ollama".parse::<LlmProvider>(), Ok(LlmProvider::Local));
        assert_eq!("gemini".parse::<LlmProvider>(), Ok(LlmProvider::Google));
        assert!("unknown-x".parse::<LlmProvider>().is_err());
        assert!("".parse::<LlmProvider>().is_err());
    }

    #[test]
    fn test_provider_serde_lowercase() {
        let json = serde_json::to_string(&LlmProvider::OpenRouter).unwrap();
        assert_eq!(json, "\"openrouter\"");
        let back: LlmProvider = serde_json::from_str("\"openai\"").unwrap();
        assert_eq!(back, LlmProvider::OpenAi);
    }

    #[test]
    fn test_timeouts_for_short_request() {
        let config = TimeoutConfig::for_request(Some(Duration::from_millis(250)));
        assert_eq!(config.connection_timeout, Duration::from_millis(250));
        assert_eq!(config.request_timeout, Duration::from_millis(250));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_timeout_validation() {
        let config = TimeoutConfig::default().with_request_timeout(Duration::from_secs(1));
        assert!(config.validate().is_err());
        let config = TimeoutConfig::default().with_connection_timeout(Duration::ZERO);
        assert!(config.validate().is_err());
        assert!(TimeoutConfig::default().validate().is_ok());
    }
}
