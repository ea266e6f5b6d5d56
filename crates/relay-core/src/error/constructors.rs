//! Constructor methods for NormalizedError

use super::types::{ErrorKind, NormalizedError};

impl NormalizedError {
    fn new(
        kind: ErrorKind,
        provider: impl Into<String>,
        model: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            provider: provider.into(),
            model: model.into(),
            message: message.into(),
            attempts: 0,
            retryable: false,
            status: None,
            primary: None,
        }
    }

    /// Create an unsupported provider error
    pub fn unsupported_provider(provider: impl Into<String>, model: impl Into<String>) -> Self {
        let provider = provider.into();
        let message = format!("provider '{}' is not supported", provider);
        Self::new(ErrorKind::UnsupportedProvider, provider, model, message)
    }

    /// Create a missing credential error
    ///
    /// `hint` names where the credential is normally supplied (e.g. an
    /// environment variable).
    pub fn missing_credential(
        provider: impl Into<String>,
        model: impl Into<String>,
        hint: Option<&str>,
    ) -> Self {
        let provider = provider.into();
        let message = match hint {
            Some(hint) => format!("API key required for '{}'; set {}", provider, hint),
            None => format!("API key required for '{}'", provider),
        };
        Self::new(ErrorKind::MissingCredential, provider, model, message)
    }

    /// Create a retryable single-attempt backend failure
    pub fn transient(
        provider: impl Into<String>,
        model: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::TransientBackendError, provider, model, message).with_retryable(true)
    }

    /// Create a single-attempt backend failure that repeating will not fix
    pub fn non_retryable(
        provider: impl Into<String>,
        model: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::TransientBackendError, provider, model, message)
    }

    /// Create a terminal backend error directly
    pub fn terminal(
        provider: impl Into<String>,
        model: impl Into<String>,
        message: impl Into<String>,
        attempts: u32,
    ) -> Self {
        Self::new(ErrorKind::TerminalBackendError, provider, model, message).with_attempts(attempts)
    }

    /// Promote the last attempt-level failure into a terminal error.
    ///
    /// Provider, model, message, status and the retryable flag are kept.
    pub fn into_terminal(mut self, attempts: u32) -> Self {
        self.kind = ErrorKind::TerminalBackendError;
        self.attempts = attempts;
        self
    }

    /// Create a cancellation error
    pub fn cancelled(
        provider: impl Into<String>,
        model: impl Into<String>,
        message: impl Into<String>,
        attempts: u32,
    ) -> Self {
        Self::new(ErrorKind::Cancelled, provider, model, message).with_attempts(attempts)
    }

    /// Create an invalid request error (rejected before any backend call)
    pub fn invalid_request(
        provider: impl Into<String>,
        model: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::TerminalBackendError, provider, model, message)
    }

    /// Wrap a failed fallback together with the primary failure that caused it.
    ///
    /// Provider, model and attempts describe the fallback; the primary error
    /// is kept as the source.
    pub fn fallback_exhausted(fallback: NormalizedError, primary: NormalizedError) -> Self {
        let message = format!(
            "fallback {} failed: {} (primary {}: {})",
            fallback.label(),
            fallback.message,
            primary.label(),
            primary.kind
        );
        Self {
            kind: ErrorKind::FallbackExhausted,
            provider: fallback.provider,
            model: fallback.model,
            message,
            attempts: fallback.attempts,
            retryable: false,
            status: fallback.status,
            primary: Some(Box::new(primary)),
        }
    }
}
