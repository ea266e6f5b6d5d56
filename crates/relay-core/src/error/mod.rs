//! Error types for the Relay resilience layer
//!
//! Every failure that crosses a backend client boundary is a
//! [`NormalizedError`]. The error carries:
//! - kind: one variant of the closed [`ErrorKind`] taxonomy
//! - provider/model: which backend produced it
//! - attempts: how many backend calls were made before it surfaced
//! - message: sanitized text, safe to show to a user

mod classifiers;
mod constructors;
mod types;
mod user_messages;

pub use types::{ErrorKind, NormalizedError, RelayResult};
pub use user_messages::{ErrorCategory, UserFriendlyError};
