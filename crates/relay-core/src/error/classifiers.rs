//! Error classification functions for user-friendly messages

use super::types::{ErrorKind, NormalizedError};
use super::user_messages::ErrorCategory;

/// Classify a backend failure by status code first, then by message text
pub(super) fn classify_backend_error(error: &NormalizedError) -> (ErrorCategory, String, Vec<String>) {
    let provider_name = error.provider.as_str();

    match error.status {
        Some(401) | Some(403) => {
            return (
                ErrorCategory::Authentication,
                format!("{} authentication failed", provider_name),
                vec![
                    "Check that your API key is correct".to_string(),
                    "Ensure the API key has not expired".to_string(),
                    format!("Verify the API key is for {}", provider_name),
                ],
            );
        }
        Some(429) => {
            return (
                ErrorCategory::RateLimit,
                format!("{} rate limit exceeded", provider_name),
                vec![
                    "Wait a moment and try again".to_string(),
                    "Configure a fallback provider".to_string(),
                ],
            );
        }
        Some(400) | Some(404) | Some(413) | Some(422) => {
            return (
                ErrorCategory::InvalidRequest,
                format!("{} rejected the request", provider_name),
                vec![
                    format!("Check that model '{}' exists for {}", error.model, provider_name),
                    "Reduce the size of the conversation".to_string(),
                ],
            );
        }
        Some(500..=599) => {
            return (
                ErrorCategory::ResourceUnavailable,
                format!("{} is temporarily unavailable", provider_name),
                vec![
                    "Wait a few seconds and try again".to_string(),
                    "Configure a fallback provider".to_string(),
                ],
            );
        }
        _ => {}
    }

    let message_lower = error.message.to_lowercase();
    if message_lower.contains("timeout") || message_lower.contains("timed out") {
        (
            ErrorCategory::Network,
            format!("{} request timed out", provider_name),
            vec![
                "Check your internet connection".to_string(),
                "Increase the request timeout".to_string(),
            ],
        )
    } else if message_lower.contains("connection") || message_lower.contains("network") {
        (
            ErrorCategory::Network,
            format!("Cannot connect to {}", provider_name),
            vec![
                "Check your internet connection".to_string(),
                "Verify the endpoint URL and that the server is running".to_string(),
            ],
        )
    } else if message_lower.contains("parse") || message_lower.contains("malformed") {
        (
            ErrorCategory::Internal,
            format!("{} returned an unexpected response", provider_name),
            vec!["Verify the endpoint speaks the expected API".to_string()],
        )
    } else {
        (
            ErrorCategory::Internal,
            format!("{} error", provider_name),
            vec!["Try again or contact support if the issue persists".to_string()],
        )
    }
}

/// Classify any normalized error
pub(super) fn classify_error(error: &NormalizedError) -> (ErrorCategory, String, Vec<String>) {
    match error.kind {
        ErrorKind::UnsupportedProvider => (
            ErrorCategory::Configuration,
            format!("Unknown provider '{}'", error.provider),
            vec![
                "Use one of: openai, anthropic, google, openrouter, local".to_string(),
                "Or configure a supported fallback provider".to_string(),
            ],
        ),
        ErrorKind::MissingCredential => (
            ErrorCategory::Authentication,
            format!("{} API key missing", error.provider),
            vec![
                format!(
                    "Set RELAY_{}_API_KEY in the environment",
                    error.provider.to_uppercase()
                ),
                "Or pass the key explicitly".to_string(),
            ],
        ),
        ErrorKind::Cancelled => (
            ErrorCategory::Cancellation,
            "Request cancelled".to_string(),
            Vec::new(),
        ),
        ErrorKind::FallbackExhausted => {
            let (category, title, mut suggestions) = classify_backend_error(error);
            if let Some(primary) = &error.primary {
                suggestions.push(format!(
                    "Primary {} also failed: {}",
                    primary.label(),
                    primary.message
                ));
            }
            (category, title, suggestions)
        }
        ErrorKind::TransientBackendError | ErrorKind::TerminalBackendError => {
            classify_backend_error(error)
        }
    }
}
