//! Backend failure normalization
//!
//! Every backend client funnels its failures through an [`ErrorNormalizer`]
//! so nothing vendor-specific (reqwest errors, raw response bodies, secrets
//! echoed back by a gateway) crosses the client boundary.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::time::Duration;

use crate::error::NormalizedError;

const MAX_ERROR_TEXT_CHARS: usize = 1_024;
const REDACTED: &str = "[REDACTED]";

static BEARER_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bBearer\s+[A-Za-z0-9._\-+/=]{8,}").expect("valid bearer token regex")
});

static KEY_VALUE_SECRET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)\b(api[_-]?key|key|access[_-]?token|refresh[_-]?token|token|secret|password|authorization|x-api-key|x-goog-api-key)\b\s*[:=]\s*["']?[^"',\s}&]+"#,
    )
    .expect("valid key/value secret regex")
});

/// Vendor key prefixes (OpenAI/Anthropic/OpenRouter `sk-`, Google `AIza`) echoed back in prose
static VENDOR_KEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:sk-[A-Za-z0-9_\-*]{3,}|AIza[0-9A-Za-z_\-]{8,})")
        .expect("valid vendor key regex")
});

/// Whether an HTTP status is worth retrying
pub fn is_retryable_status(status: u16) -> bool {
    matches!(status, 408 | 409 | 425 | 429 | 500..=599)
}

/// Converts backend failures for one provider/model into [`NormalizedError`]s
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNormalizer {
    provider: String,
    model: String,
}

impl ErrorNormalizer {
    /// Create a normalizer for a provider/model pair
    pub fn new(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
        }
    }

    /// Provider id this normalizer tags errors with
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Model name this normalizer tags errors with
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Failure from a non-success HTTP status and its body
    pub fn from_status(&self, status: u16, body: &str) -> NormalizedError {
        let message = format!(
            "{} API error (status {}): {}",
            self.provider,
            status,
            sanitize_provider_error_text(body)
        );
        self.attempt_error(message, is_retryable_status(status))
            .with_status(status)
    }

    /// Failure from a non-success HTTP response
    pub async fn from_response(&self, response: reqwest::Response) -> NormalizedError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        self.from_status(status, &body)
    }

    /// Failure raised by the HTTP transport
    pub fn from_transport(&self, err: reqwest::Error) -> NormalizedError {
        if let Some(status) = err.status() {
            return self.from_status(status.as_u16(), "");
        }

        let is_timeout = err.is_timeout();
        let is_connect = err.is_connect();
        let is_decode = err.is_decode();
        let detail = redact_inline_secrets(&err.without_url().to_string());

        if is_timeout {
            self.attempt_error(format!("{} request timed out: {}", self.provider, detail), true)
        } else if is_connect {
            self.attempt_error(
                format!("{} connection failed: {}", self.provider, detail),
                true,
            )
        } else if is_decode {
            self.from_parse(detail)
        } else {
            self.attempt_error(format!("{} network error: {}", self.provider, detail), true)
        }
    }

    /// Body could not be decoded or lacked the expected fields
    pub fn from_parse(&self, detail: impl std::fmt::Display) -> NormalizedError {
        let detail = sanitize_provider_error_text(&detail.to_string());
        self.attempt_error(
            format!("Failed to parse {} response: {}", self.provider, detail),
            false,
        )
    }

    /// The per-call deadline elapsed
    pub fn timeout(&self, after: Duration) -> NormalizedError {
        self.attempt_error(
            format!("{} request timed out after {:?}", self.provider, after),
            true,
        )
    }

    /// The caller cancelled after `attempts` backend calls
    pub fn cancelled(&self, reason: &str, attempts: u32) -> NormalizedError {
        NormalizedError::cancelled(&self.provider, &self.model, reason, attempts)
    }

    fn attempt_error(&self, message: String, retryable: bool) -> NormalizedError {
        if retryable {
            NormalizedError::transient(&self.provider, &self.model, message)
        } else {
            NormalizedError::non_retryable(&self.provider, &self.model, message)
        }
    }
}

/// Sanitize provider error text by redacting secrets and truncating large payloads.
pub fn sanitize_provider_error_text(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "<empty error response body>".to_string();
    }

    if let Ok(mut json) = serde_json::from_str::<Value>(trimmed) {
        if json.is_object() || json.is_array() {
            redact_json_value(&mut json);
            let serialized = serde_json::to_string(&json)
                .unwrap_or_else(|_| "<unserializable error>".to_string());
            return truncate_with_suffix(serialized);
        }
    }

    truncate_with_suffix(redact_inline_secrets(trimmed))
}

fn redact_json_value(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, val) in map.iter_mut() {
                if is_sensitive_key(key) {
                    *val = Value::String(REDACTED.to_string());
                } else {
                    redact_json_value(val);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(redact_json_value),
        Value::String(s) => *s = redact_inline_secrets(s),
        _ => {}
    }
}

fn is_sensitive_key(key: &str) -> bool {
    let normalized = key.to_ascii_lowercase().replace(['-', ' '], "_");
    [
        "api_key",
        "token",
        "secret",
        "password",
        "authorization",
        "cookie",
        "private_key",
    ]
    .iter()
    .any(|needle| normalized.contains(needle))
}

fn redact_inline_secrets(input: &str) -> String {
    let redacted_bearer = BEARER_TOKEN_RE.replace_all(input, "Bearer [REDACTED]");
    let redacted_pairs = KEY_VALUE_SECRET_RE.replace_all(&redacted_bearer, "$1=[REDACTED]");
    VENDOR_KEY_RE
        .replace_all(&redacted_pairs, REDACTED)
        .into_owned()
}

fn truncate_with_suffix(input: String) -> String {
    let char_count = input.chars().count();
    if char_count <= MAX_ERROR_TEXT_CHARS {
        return input;
    }

    let truncated: String = input.chars().take(MAX_ERROR_TEXT_CHARS).collect();
    format!(
        "{}... [truncated {} chars]",
        truncated,
        char_count - MAX_ERROR_TEXT_CHARS
    )
}
