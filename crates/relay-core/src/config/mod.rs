//! Provider configuration: specs, the registry and credentials

mod embedded_providers;

pub mod credential;
pub mod provider_registry;
pub mod provider_spec;

pub use credential::{
    Credential, CredentialSource, EnvCredentials, NoCredentials, StaticCredentials,
    credential_env_vars, mask_api_key,
};
#[cfg(test)]
pub use credential::MockCredentialSource;
pub use provider_registry::{ProviderInfo, ProviderRegistry, ResolvedSpec};
pub use provider_spec::{DEFAULT_RETRY_COUNT, DEFAULT_TEMPERATURE, ProviderSpec};
