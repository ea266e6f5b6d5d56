//! Built-in provider definitions
//!
//! Contains the closed set of LLM providers that ship with Relay.

use super::provider_registry::ProviderInfo;
use crate::llm::provider_types::LlmProvider;

/// Built-in provider table, in registry order
pub(super) const EMBEDDED_PROVIDERS: &[ProviderInfo] = &[
    ProviderInfo {
        provider: LlmProvider::OpenAi,
        display_name: "OpenAI",
        default_model: "gpt-4o",
        api_base_url: "https://api.openai.com/v1",
        env_vars: &["OPENAI_API_KEY"],
        help_url: Some("https://platform.openai.com/api-keys"),
        requires_api_key: true,
    },
    ProviderInfo {
        provider: LlmProvider::Anthropic,
        display_name: "Anthropic",
        default_model: "claude-sonnet-4-20250514",
        api_base_url: "https://api.anthropic.com",
        env_vars: &["ANTHROPIC_API_KEY", "CLAUDE_API_KEY"],
        help_url: Some("https://console.anthropic.com/settings/keys"),
        requires_api_key: true,
    },
    ProviderInfo {
        provider: LlmProvider::Google,
        display_name: "Google Gemini",
        default_model: "gemini-1.5-pro",
        api_base_url: "https://generativelanguage.googleapis.com",
        env_vars: &["GOOGLE_API_KEY", "GEMINI_API_KEY"],
        help_url: Some("https://aistudio.google.com/app/apikey"),
        requires_api_key: true,
    },
    ProviderInfo {
        provider: LlmProvider::OpenRouter,
        display_name: "OpenRouter",
        default_model: "anthropic/claude-3.5-sonnet",
        api_base_url: "https://openrouter.ai/api/v1",
        env_vars: &["OPENROUTER_API_KEY"],
        help_url: Some("https://openrouter.ai/keys"),
        requires_api_key: true,
    },
    ProviderInfo {
        provider: LlmProvider::Local,
        display_name: "Local (OpenAI-compatible)",
        default_model: "llama3.1",
        api_base_url: "http://localhost:11434/v1",
        env_vars: &["LOCAL_API_KEY", "OLLAMA_API_KEY"],
        help_url: None,
        requires_api_key: false,
    },
];
