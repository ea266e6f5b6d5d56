//! Credentials and where they come from
//!
//! The factory never reads the environment itself; it is handed a
//! [`Credential`] obtained from a [`CredentialSource`].

use std::collections::HashMap;
use std::fmt;

use super::provider_registry::ProviderRegistry;
use crate::llm::provider_types::LlmProvider;

/// API key for one provider. `Debug` output is masked.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key, for building request headers
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the key is empty or whitespace
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Display-safe form of the key
    pub fn masked(&self) -> String {
        mask_api_key(&self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&self.masked()).finish()
    }
}

impl From<&str> for Credential {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for Credential {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

/// Mask an API key for safe display
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let len = chars.len();
    if len <= 12 {
        return "*".repeat(len);
    }

    let prefix: String = chars[..8].iter().collect();
    let suffix: String = chars[len - 4..].iter().collect();
    let mask_len = len - 12;

    format!("{}{}...{}", prefix, "*".repeat(mask_len.min(8)), suffix)
}

/// Supplies credentials per provider
#[cfg_attr(test, mockall::automock)]
pub trait CredentialSource: Send + Sync {
    /// Credential for `provider`, if one is configured
    fn credential(&self, provider: LlmProvider) -> Option<Credential>;
}

/// Environment variable names checked for a provider, in order.
///
/// `RELAY_<PROVIDER>_API_KEY` wins over the vendor's standard variables.
pub fn credential_env_vars(provider: LlmProvider) -> Vec<String> {
    let mut vars = vec![format!(
        "RELAY_{}_API_KEY",
        provider.name().to_uppercase()
    )];
    if let Some(info) = ProviderRegistry::new().info(provider) {
        vars.extend(info.env_vars.iter().map(|v| v.to_string()));
    }
    vars
}

type Lookup = dyn Fn(&str) -> Option<String> + Send + Sync;

/// Reads credentials from environment variables
pub struct EnvCredentials {
    lookup: Box<Lookup>,
}

impl EnvCredentials {
    /// Read from the process environment
    pub fn new() -> Self {
        Self::with_lookup(|name| std::env::var(name).ok())
    }

    /// Read through a custom variable lookup
    pub fn with_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            lookup: Box::new(lookup),
        }
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EnvCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvCredentials").finish_non_exhaustive()
    }
}

impl CredentialSource for EnvCredentials {
    fn credential(&self, provider: LlmProvider) -> Option<Credential> {
        credential_env_vars(provider)
            .iter()
            .filter_map(|name| (self.lookup)(name))
            .map(Credential::new)
            .find(|c| !c.is_blank())
    }
}

/// Fixed map of credentials
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    keys: HashMap<LlmProvider, Credential>,
}

impl StaticCredentials {
    /// Empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key for a provider
    pub fn with(mut self, provider: LlmProvider, key: impl Into<Credential>) -> Self {
        self.keys.insert(provider, key.into());
        self
    }
}

impl CredentialSource for StaticCredentials {
    fn credential(&self, provider: LlmProvider) -> Option<Credential> {
        self.keys.get(&provider).cloned()
    }
}

/// Source that never has a credential
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

impl CredentialSource for NoCredentials {
    fn credential(&self, _provider: LlmProvider) -> Option<Credential> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_api_key() {
        assert_eq!(
            mask_api_key("sk-ant-api03-abc123xyz789"),
            "sk-ant-a********...z789"
        );
        assert_eq!(mask_api_key("short"), "*****");
        assert_eq!(mask_api_key("exactly12ch"), "***********");
    }

    #[test]
    fn test_debug_is_masked() {
        let cred = Credential::new("sk-proj-0123456789abcdef");
        let debug = format!("{:?}", cred);
        assert!(!debug.contains("0123456789abcdef"));
        assert!(debug.contains("cdef"));
    }

    #[test]
    fn test_env_prefers_relay_variable() {
        let source = EnvCredentials::with_lookup(|name| match name {
            "RELAY_OPENAI_API_KEY" => Some("relay-key".to_string()),
            "OPENAI_API_KEY" => Some("vendor-key".to_string()),
            _ => None,
        });
        let cred = source.credential(LlmProvider::OpenAi).unwrap();
        assert_eq!(cred.expose(), "relay-key");
    }

    #[test]
    fn test_env_falls_back_to_vendor_variable_and_skips_blank() {
        let source = EnvCredentials::with_lookup(|name| match name {
            "RELAY_ANTHROPIC_API_KEY" => Some("  ".to_string()),
            "CLAUDE_API_KEY" => Some("claude-key".to_string()),
            _ => None,
        });
        let cred = source.credential(LlmProvider::Anthropic).unwrap();
        assert_eq!(cred.expose(), "claude-key");
        assert!(source.credential(LlmProvider::Google).is_none());
    }

    #[test]
    fn test_static_credentials() {
        let source = StaticCredentials::new().with(LlmProvider::OpenRouter, "or-key");
        assert_eq!(
            source.credential(LlmProvider::OpenRouter).map(|c| c.expose().to_string()),
            Some("or-key".to_string())
        );
        assert!(source.credential(LlmProvider::OpenAi).is_none());
        assert!(NoCredentials.credential(LlmProvider::OpenAi).is_none());
    }

    #[test]
    fn test_env_var_order() {
        let vars = credential_env_vars(LlmProvider::Google);
        assert_eq!(vars[0], "RELAY_GOOGLE_API_KEY");
        assert_eq!(&vars[1..], &["GOOGLE_API_KEY", "GEMINI_API_KEY"]);
    }
}
