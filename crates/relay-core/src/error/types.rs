//! Core error types for the Relay resilience layer

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for Relay operations
pub type RelayResult<T> = Result<T, NormalizedError>;

/// Closed taxonomy of failures surfaced by the resilience layer.
///
/// Every backend-specific failure is mapped onto one of these kinds before
/// it leaves a backend client, so callers above the client boundary only
/// ever match on this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Provider id is not in the registry and no usable fallback exists
    UnsupportedProvider,
    /// Provider requires a credential that was not supplied
    MissingCredential,
    /// A single backend attempt failed
    TransientBackendError,
    /// The retry budget for a spec was exhausted (or a non-retryable failure ended it)
    TerminalBackendError,
    /// Primary failed and the one permitted fallback failed too
    FallbackExhausted,
    /// The caller cancelled the call or its deadline passed
    Cancelled,
}

impl ErrorKind {
    /// Stable error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedProvider => "RELAY_UNSUPPORTED_PROVIDER",
            Self::MissingCredential => "RELAY_MISSING_CREDENTIAL",
            Self::TransientBackendError => "RELAY_TRANSIENT_BACKEND",
            Self::TerminalBackendError => "RELAY_TERMINAL_BACKEND",
            Self::FallbackExhausted => "RELAY_FALLBACK_EXHAUSTED",
            Self::Cancelled => "RELAY_CANCELLED",
        }
    }

    /// Whether this kind is detected locally, before any network call
    pub fn is_pre_network(&self) -> bool {
        matches!(self, Self::UnsupportedProvider | Self::MissingCredential)
    }

    /// Whether a failure of this kind may be handed to the fallback spec
    pub fn permits_fallback(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedProvider | Self::MissingCredential | Self::TerminalBackendError
        )
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::UnsupportedProvider => "unsupported provider",
            Self::MissingCredential => "missing credential",
            Self::TransientBackendError => "backend error",
            Self::TerminalBackendError => "backend failed",
            Self::FallbackExhausted => "fallback exhausted",
            Self::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// Backend-agnostic failure record.
///
/// Carries the provider and model that produced the failure, the number of
/// backend calls made against that provider, and (for
/// [`ErrorKind::FallbackExhausted`]) the original primary failure.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind} [{provider}/{model}] after {attempts} attempt(s): {message}")]
pub struct NormalizedError {
    /// Failure kind
    pub kind: ErrorKind,
    /// Provider id the failure belongs to
    pub provider: String,
    /// Model name the failure belongs to
    pub model: String,
    /// Sanitized, human-readable message
    pub message: String,
    /// Backend calls made against `provider` before this error surfaced
    pub attempts: u32,
    /// Whether repeating the same call could plausibly succeed
    pub retryable: bool,
    /// HTTP status of the last backend response, when there was one
    pub status: Option<u16>,
    /// Primary failure that preceded a failed fallback
    #[source]
    pub primary: Option<Box<NormalizedError>>,
}

impl NormalizedError {
    /// Get the error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        self.kind.error_code()
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        self.retryable
    }

    /// `provider/model` label used in diagnostics
    pub fn label(&self) -> String {
        format!("{}/{}", self.provider, self.model)
    }

    /// Set the attempt count
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts;
        self
    }

    /// Set the HTTP status
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Override the retryable flag
    pub fn with_retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }
}
