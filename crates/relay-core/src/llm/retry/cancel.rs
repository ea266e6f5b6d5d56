//! Caller cancellation and deadlines

use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Reason reported when the token fires
pub const CANCELLED_BY_CALLER: &str = "cancelled by caller";

/// Reason reported when the deadline passes
pub const DEADLINE_EXCEEDED: &str = "deadline exceeded";

/// Cancellation token plus an optional deadline for one top-level call
#[derive(Debug, Clone)]
pub struct CancelScope {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Default for CancelScope {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelScope {
    /// Scope that only ends when cancelled explicitly
    pub fn new() -> Self {
        Self::with_token(CancellationToken::new())
    }

    /// Scope driven by an existing token
    pub fn with_token(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Set an absolute deadline
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set a deadline relative to now
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// The underlying token
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Cancel the scope
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Why the scope has ended, if it has
    pub fn cancelled_reason(&self) -> Option<&'static str> {
        if self.token.is_cancelled() {
            Some(CANCELLED_BY_CALLER)
        } else if self.deadline.is_some_and(|d| Instant::now() >= d) {
            Some(DEADLINE_EXCEEDED)
        } else {
            None
        }
    }

    /// Resolves once the scope ends, with the reason
    pub async fn cancelled(&self) -> &'static str {
        match self.deadline {
            Some(deadline) => tokio::select! {
                _ = self.token.cancelled() => CANCELLED_BY_CALLER,
                _ = tokio::time::sleep_until(deadline) => DEADLINE_EXCEEDED,
            },
            None => {
                self.token.cancelled().await;
                CANCELLED_BY_CALLER
            }
        }
    }
}
