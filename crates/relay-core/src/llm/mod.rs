//! Backend clients, retries and fallback resolution

pub mod converters;
pub mod factory;
pub mod fallback;
pub mod messages;
pub mod normalizer;
pub mod parsers;
pub mod provider_types;
pub mod providers;
pub mod retry;

#[cfg(test)]
pub(crate) mod test_support;

pub use factory::{BackendBuilder, ClientFactory, HttpBackends};
pub use fallback::{FallbackResolver, ResolverConfig};
pub use messages::{
    GenerationRequest, GenerationResult, Message, MessageRole, ResponseMetadata, SpecLabel, Usage,
};
pub use normalizer::ErrorNormalizer;
pub use provider_types::{LlmProvider, TimeoutConfig};
pub use providers::{BackendClient, BackendConfig, ProviderInstance};
pub use retry::{BackoffConfig, CancelScope, RetryExecutor, RetryMode};
