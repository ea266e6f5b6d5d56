//! Relay Core Library
//!
//! Provider resolution and resilience for chat/completion backends: a
//! registry of supported providers, a factory building one client per
//! (provider, model) spec, bounded retries, a single fallback hop, and one
//! normalized error taxonomy for every backend failure.
//!
//! ```no_run
//! use relay_core::{FallbackResolver, GenerationRequest, ProviderSpec};
//!
//! # async fn run() -> relay_core::RelayResult<()> {
//! let resolver = FallbackResolver::from_env();
//! let primary = ProviderSpec::new("openai", "gpt-4o").with_retry_count(2);
//! let fallback = ProviderSpec::new("local", "llama3.1");
//! let result = resolver
//!     .resolve_and_generate(&primary, Some(&fallback), &GenerationRequest::prompt("hi"))
//!     .await?;
//! println!("{} via {}", result.text, result.metadata.provider);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod llm;

pub use config::{
    Credential, CredentialSource, EnvCredentials, NoCredentials, ProviderRegistry, ProviderSpec,
    ResolvedSpec, StaticCredentials,
};
pub use error::{ErrorKind, NormalizedError, RelayResult};
pub use llm::{
    BackendClient, BackoffConfig, CancelScope, ClientFactory, FallbackResolver,
    GenerationRequest, GenerationResult, LlmProvider, Message, ResolverConfig, RetryExecutor,
    RetryMode,
};
