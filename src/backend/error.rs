use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Failure talking to the booking backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend rejected the session: {0}")]
    Unauthorized(String),

    #[error("access denied by backend: {0}")]
    Forbidden(String),

    #[error("backend returned {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("unexpected backend response: {0}")]
    Decode(String),
}

impl BackendError {
    pub(crate) fn from_status(status: StatusCode, body: &str) -> Self {
        let message = extract_message(status, body);
        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized(message),
            StatusCode::FORBIDDEN => Self::Forbidden(message),
            _ => Self::Status { status, message },
        }
    }

    /// True for 401/403, which end the caller's session.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized(_) | Self::Forbidden(_))
    }
}

/// Pull a human readable message out of an error body.
///
/// The backend answers `{ "message": "..." }` or, for validation failures,
/// `{ "message": ["a", "b"] }`. Older endpoints use `error` instead.
pub fn extract_message(status: StatusCode, body: &str) -> String {
    let fallback = || {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    };

    match serde_json::from_str::<Value>(body) {
        Ok(value) => value
            .get("message")
            .and_then(message_text)
            .or_else(|| value.get("error").and_then(message_text))
            .unwrap_or_else(fallback),
        Err(_) => {
            let text = body.trim();
            if text.is_empty() {
                fallback()
            } else {
                text.to_string()
            }
        }
    }
}

fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Null => None,
                    other => Some(other.to_string()),
                })
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        _ => None,
    }
}
