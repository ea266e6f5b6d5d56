//! Bounded retry loop around one backend client

use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

use super::backoff::BackoffConfig;
use super::cancel::CancelScope;
use crate::error::{ErrorKind, NormalizedError, RelayResult};
use crate::llm::messages::{GenerationRequest, GenerationResult};
use crate::llm::providers::BackendClient;

/// Which failures consume the retry budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetryMode {
    /// Retry only failures marked retryable; anything else ends the loop
    #[default]
    Classified,
    /// Retry every failure until the budget is spent
    Uniform,
}

/// Runs one client up to `retry_count + 1` times.
///
/// Success on attempt `i` (0-indexed) returns at once with
/// `metadata.attempts == i + 1`. Exhaustion returns `TerminalBackendError`
/// carrying the last failure's message. Cancellation is never retried.
#[derive(Debug, Clone, Default)]
pub struct RetryExecutor {
    mode: RetryMode,
    backoff: Option<BackoffConfig>,
}

impl RetryExecutor {
    /// Classified retries with no delay between attempts
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the retry mode
    pub fn with_mode(mut self, mode: RetryMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sleep between attempts
    pub fn with_backoff(mut self, backoff: BackoffConfig) -> Self {
        self.backoff = Some(backoff);
        self
    }

    /// Replace the backoff setting
    pub fn with_optional_backoff(mut self, backoff: Option<BackoffConfig>) -> Self {
        self.backoff = backoff;
        self
    }

    /// Current mode
    pub fn mode(&self) -> RetryMode {
        self.mode
    }

    /// Run without a cancellation scope
    pub async fn execute<C>(
        &self,
        client: &C,
        request: &GenerationRequest,
        retry_count: u32,
    ) -> RelayResult<GenerationResult>
    where
        C: BackendClient + ?Sized,
    {
        self.execute_with(client, request, retry_count, &CancelScope::new())
            .await
    }

    /// Run, aborting promptly when `scope` is cancelled or its deadline passes
    #[instrument(
        skip_all,
        fields(
            provider = %client.provider(),
            model = %client.model(),
            max_attempts = retry_count.saturating_add(1),
        )
    )]
    pub async fn execute_with<C>(
        &self,
        client: &C,
        request: &GenerationRequest,
        retry_count: u32,
        scope: &CancelScope,
    ) -> RelayResult<GenerationResult>
    where
        C: BackendClient + ?Sized,
    {
        let provider = client.provider();
        let model = client.model();
        let max_attempts = retry_count.saturating_add(1);

        if request.is_empty() {
            return Err(NormalizedError::invalid_request(
                provider,
                model,
                "request contains no messages",
            ));
        }

        let mut attempt: u32 = 0;
        loop {
            if let Some(reason) = scope.cancelled_reason() {
                warn!(attempts = attempt, reason, "call cancelled before attempt");
                return Err(NormalizedError::cancelled(provider, model, reason, attempt));
            }

            let outcome = tokio::select! {
                biased;
                reason = scope.cancelled() => {
                    warn!(attempt = attempt + 1, reason, "call cancelled in flight");
                    return Err(NormalizedError::cancelled(provider, model, reason, attempt + 1));
                }
                outcome = client.generate(request) => outcome,
            };
            attempt += 1;

            let failure = match outcome {
                Ok(result) => {
                    if attempt > 1 {
                        info!(attempt, "request succeeded after retry");
                    }
                    if let Some(usage) = &result.metadata.usage {
                        info!(?usage, "llm request completed");
                    }
                    return Ok(result.with_attempts(attempt));
                }
                Err(failure) => failure,
            };

            if failure.kind == ErrorKind::Cancelled {
                return Err(failure.with_attempts(attempt));
            }

            if self.mode == RetryMode::Classified && !failure.retryable {
                warn!(attempt, error = %failure.message, "non-retryable error");
                return Err(failure.into_terminal(attempt));
            }

            if attempt >= max_attempts {
                error!(attempts = attempt, error = %failure.message, "all retry attempts exhausted");
                return Err(failure.into_terminal(attempt));
            }

            match &self.backoff {
                Some(backoff) => {
                    let delay = backoff.delay_for_retry(attempt - 1);
                    warn!(
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %failure.message,
                        "retrying after failure"
                    );
                    tokio::select! {
                        biased;
                        reason = scope.cancelled() => {
                            warn!(attempts = attempt, reason, "call cancelled during backoff");
                            return Err(NormalizedError::cancelled(provider, model, reason, attempt));
                        }
                        _ = tokio::time::sleep(delay) => {}
                    }
                }
                None => {
                    warn!(attempt, max_attempts, error = %failure.message, "retrying after failure");
                }
            }
        }
    }
}
