//! Fallback resolver

use std::fmt;
use std::sync::Arc;

use tracing::{instrument, warn};

use super::config::ResolverConfig;
use crate::config::{CredentialSource, EnvCredentials, ProviderSpec, ResolvedSpec};
use crate::error::{ErrorKind, NormalizedError, RelayResult};
use crate::llm::factory::{BackendBuilder, ClientFactory, HttpBackends};
use crate::llm::messages::{GenerationRequest, GenerationResult, SpecLabel};
use crate::llm::provider_types::LlmProvider;
use crate::llm::retry::{CancelScope, RetryExecutor};

/// Resolves a primary spec, retries it, and falls back at most once.
///
/// Holds no per-call state: one resolver can serve many concurrent calls.
pub struct FallbackResolver<B = HttpBackends> {
    factory: ClientFactory<B>,
    credentials: Arc<dyn CredentialSource>,
    retry: RetryExecutor,
}

impl FallbackResolver<HttpBackends> {
    /// Resolver producing HTTP clients, with credentials from `credentials`
    pub fn new(credentials: impl CredentialSource + 'static) -> Self {
        Self::with_factory(ClientFactory::new(), credentials)
    }

    /// Resolver reading credentials from the process environment
    pub fn from_env() -> Self {
        Self::new(EnvCredentials::new())
    }
}

impl<B: BackendBuilder> FallbackResolver<B> {
    /// Resolver over a custom factory
    pub fn with_factory(
        factory: ClientFactory<B>,
        credentials: impl CredentialSource + 'static,
    ) -> Self {
        Self {
            factory,
            credentials: Arc::new(credentials),
            retry: RetryExecutor::new(),
        }
    }

    /// Apply retry configuration
    pub fn with_config(self, config: &ResolverConfig) -> Self {
        self.with_retry(config.executor())
    }

    /// Replace the retry executor
    pub fn with_retry(mut self, retry: RetryExecutor) -> Self {
        self.retry = retry;
        self
    }

    /// Factory used to build clients
    pub fn factory(&self) -> &ClientFactory<B> {
        &self.factory
    }

    /// Fill registry defaults for `spec`
    pub fn resolve_defaults(&self, spec: &ProviderSpec) -> RelayResult<ResolvedSpec> {
        self.factory.registry().resolve(spec)
    }

    /// Generate with `primary`, falling back to `fallback` once if allowed
    pub async fn resolve_and_generate(
        &self,
        primary: &ProviderSpec,
        fallback: Option<&ProviderSpec>,
        request: &GenerationRequest,
    ) -> RelayResult<GenerationResult> {
        self.resolve_and_generate_with(primary, fallback, request, &CancelScope::new())
            .await
    }

    /// Like [`resolve_and_generate`](Self::resolve_and_generate), bounded by `scope`.
    ///
    /// An empty request is rejected before any client is built. A cancelled
    /// call is returned as is and never triggers the fallback.
    #[instrument(
        skip_all,
        fields(primary = %primary.label(), fallback = ?fallback.map(|f| f.label()))
    )]
    pub async fn resolve_and_generate_with(
        &self,
        primary: &ProviderSpec,
        fallback: Option<&ProviderSpec>,
        request: &GenerationRequest,
        scope: &CancelScope,
    ) -> RelayResult<GenerationResult> {
        if request.is_empty() {
            return Err(NormalizedError::invalid_request(
                &primary.provider,
                &primary.model,
                "request contains no messages",
            ));
        }

        let mut active = primary;
        // Set once the hop has been taken; a second failure ends the call
        let mut primary_failure: Option<NormalizedError> = None;

        loop {
            let error = match self.run_spec(active, request, scope).await {
                Ok(result) => {
                    return Ok(match &primary_failure {
                        Some(failed) => result
                            .with_fallback_from(SpecLabel::new(&failed.provider, &failed.model)),
                        None => result,
                    });
                }
                Err(error) => error,
            };

            if let Some(failed) = primary_failure {
                if error.kind == ErrorKind::Cancelled {
                    return Err(error);
                }
                warn!(
                    provider = %error.provider,
                    model = %error.model,
                    attempts = error.attempts,
                    "fallback failed"
                );
                return Err(NormalizedError::fallback_exhausted(error, failed));
            }

            if !error.kind.permits_fallback() {
                return Err(error);
            }
            let Some(next) = fallback else {
                return Err(error);
            };

            if same_provider(active, next) {
                warn!(
                    provider = %active.provider,
                    fallback = %next.label(),
                    "fallback names the failed provider; not attempted"
                );
                return Err(error);
            }

            if error.kind == ErrorKind::UnsupportedProvider {
                if !self.factory.registry().is_known(&next.provider) {
                    return Err(error);
                }
                warn!(
                    requested = %active.provider,
                    substitute = %next.provider,
                    "provider substituted"
                );
            } else {
                warn!(
                    provider = %error.provider,
                    model = %error.model,
                    kind = %error.kind,
                    attempts = error.attempts,
                    fallback = %next.label(),
                    "trying fallback"
                );
            }

            primary_failure = Some(error);
            active = next;
        }
    }

    async fn run_spec(
        &self,
        spec: &ProviderSpec,
        request: &GenerationRequest,
        scope: &CancelScope,
    ) -> RelayResult<GenerationResult> {
        let resolved = self.resolve_defaults(spec)?;
        let credential = self.credentials.credential(resolved.provider);
        let client = self.factory.create_resolved(&resolved, credential)?;
        self.retry
            .execute_with(&client, request, resolved.spec.retry_count, scope)
            .await
    }
}

impl<B: fmt::Debug> fmt::Debug for FallbackResolver<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FallbackResolver")
            .field("factory", &self.factory)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

/// Provider equality, alias-aware for known ids
fn same_provider(a: &ProviderSpec, b: &ProviderSpec) -> bool {
    match (
        a.provider.parse::<LlmProvider>(),
        b.provider.parse::<LlmProvider>(),
    ) {
        (Ok(a), Ok(b)) => a == b,
        _ => a.same_provider(b),
    }
}
