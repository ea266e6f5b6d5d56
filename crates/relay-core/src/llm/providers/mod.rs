//! Provider-specific backend clients

pub mod anthropic;
pub mod google;
pub mod local;
pub mod openai;
pub mod provider_trait;
pub mod request_builder;

#[cfg(test)]
mod openai_tests;

pub use anthropic::AnthropicProvider;
pub use google::GoogleProvider;
pub use local::LocalProvider;
pub use openai::OpenAiProvider;
pub use provider_trait::{BackendClient, BackendConfig, ProviderInstance};
