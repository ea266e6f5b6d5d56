//! Retry execution
//!
//! Bounded retries around a single backend client, with optional backoff
//! and caller cancellation.

mod backoff;
mod cancel;
mod executor;


pub use backoff::BackoffConfig;
pub use cancel::{CANCELLED_BY_CALLER, CancelScope, DEADLINE_EXCEEDED};
pub use executor::{RetryExecutor, RetryMode};
