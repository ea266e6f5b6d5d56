//! User-friendly error messages and classification
//!
//! Provides human-readable titles and suggestions for normalized errors so
//! CLI and UI layers never have to look at vendor-specific details.

use super::classifiers::classify_error;
use super::types::{ErrorKind, NormalizedError};

/// Error category for user-facing messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Configuration issues
    Configuration,
    /// Authentication/authorization failures
    Authentication,
    /// Rate limiting / quota exceeded
    RateLimit,
    /// Network connectivity issues
    Network,
    /// Backend rejected the request itself
    InvalidRequest,
    /// Backend temporarily unavailable
    ResourceUnavailable,
    /// User-initiated cancellation
    Cancellation,
    /// Internal system errors
    Internal,
}

impl ErrorCategory {
    /// Get a user-friendly category name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Configuration => "Configuration Error",
            Self::Authentication => "Authentication Error",
            Self::RateLimit => "Rate Limit Exceeded",
            Self::Network => "Network Error",
            Self::InvalidRequest => "Invalid Request",
            Self::ResourceUnavailable => "Service Unavailable",
            Self::Cancellation => "Cancelled",
            Self::Internal => "Internal Error",
        }
    }
}

/// User-friendly error information
#[derive(Debug, Clone)]
pub struct UserFriendlyError {
    /// The error category
    pub category: ErrorCategory,
    /// User-friendly title/summary
    pub title: String,
    /// Detailed user-friendly message
    pub message: String,
    /// Suggested actions to resolve the error
    pub suggestions: Vec<String>,
    /// Whether this error is recoverable by the user
    pub is_recoverable: bool,
    /// Original technical error code
    pub error_code: String,
}

impl UserFriendlyError {
    /// Create a new user-friendly error
    pub fn new(
        category: ErrorCategory,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            title: title.into(),
            message: message.into(),
            suggestions: Vec::new(),
            is_recoverable: true,
            error_code: String::new(),
        }
    }

    /// Add multiple suggestions
    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions.extend(suggestions);
        self
    }

    /// Set whether the error is recoverable
    pub fn recoverable(mut self, is_recoverable: bool) -> Self {
        self.is_recoverable = is_recoverable;
        self
    }

    /// Set the technical error code
    pub fn with_error_code(mut self, code: impl Into<String>) -> Self {
        self.error_code = code.into();
        self
    }

    /// Format the error for display
    pub fn format_display(&self) -> String {
        let mut output = format!(
            "{}: {}\n\n{}",
            self.category.display_name(),
            self.title,
            self.message
        );

        if !self.suggestions.is_empty() {
            output.push_str("\n\nSuggested actions:");
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                output.push_str(&format!("\n  {}. {}", i + 1, suggestion));
            }
        }

        output
    }
}

impl From<&NormalizedError> for UserFriendlyError {
    fn from(error: &NormalizedError) -> Self {
        let (category, title, suggestions) = classify_error(error);
        let recoverable = !matches!(error.kind, ErrorKind::Cancelled);
        UserFriendlyError::new(category, title, error.message.clone())
            .with_suggestions(suggestions)
            .recoverable(recoverable)
            .with_error_code(error.error_code())
    }
}

impl NormalizedError {
    /// Convert to a user-friendly error
    pub fn to_user_friendly(&self) -> UserFriendlyError {
        UserFriendlyError::from(self)
    }

    /// Message suitable for direct display in a CLI or UI
    pub fn user_message(&self) -> String {
        self.to_user_friendly().format_display()
    }
}
