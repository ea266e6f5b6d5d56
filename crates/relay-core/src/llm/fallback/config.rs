//! Resolver configuration

use serde::{Deserialize, Serialize};

use crate::llm::retry::{BackoffConfig, RetryExecutor, RetryMode};

/// Retry behaviour shared by every call a resolver makes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Which failures consume the retry budget
    pub retry_mode: RetryMode,
    /// Delay between attempts; absent means retry immediately
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backoff: Option<BackoffConfig>,
}

impl ResolverConfig {
    /// Set the retry mode
    pub fn with_retry_mode(mut self, retry_mode: RetryMode) -> Self {
        self.retry_mode = retry_mode;
        self
    }

    /// Enable backoff
    pub fn with_backoff(mut self, backoff: BackoffConfig) -> Self {
        self.backoff = Some(backoff);
        self
    }

    /// Executor built from this configuration
    pub fn executor(&self) -> RetryExecutor {
        RetryExecutor::new()
            .with_mode(self.retry_mode)
            .with_optional_backoff(self.backoff.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_defaults() {
        let config: ResolverConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ResolverConfig::default());
        assert_eq!(config.retry_mode, RetryMode::Classified);
        assert!(config.backoff.is_none());
    }

    #[test]
    fn test_deserialize_full() {
        let json = r#"{
            "retry_mode": "uniform",
            "backoff": { "initial_delay": "250ms", "max_delay": "5s", "multiplier": 3.0 }
        }"#;
        let config: ResolverConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.retry_mode, RetryMode::Uniform);
        let backoff = config.backoff.unwrap();
        assert_eq!(backoff.initial_delay, Duration::from_millis(250));
        assert_eq!(backoff.max_delay, Duration::from_secs(5));
        assert!(!backoff.jitter);
    }

    #[test]
    fn test_executor_carries_mode() {
        let config = ResolverConfig::default().with_retry_mode(RetryMode::Uniform);
        assert_eq!(config.executor().mode(), RetryMode::Uniform);
    }
}
