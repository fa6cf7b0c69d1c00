//! Portal error type and JSON response envelope.
//!
//! | Variant | Status |
//! |---|---|
//! | `Session` | 303 to `/login`, cookie cleared |
//! | `Validation` | 400 |
//! | `ConfirmationRequired` | 428 |
//! | `Upstream` | backend 4xx status, 5xx becomes 502 |
//! | `Unavailable` | 502 |
//! | `Internal` | 500 |

use axum::extract::multipart::MultipartError;
use axum::http::header::{LOCATION, SET_COOKIE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::backend::BackendError;
use crate::model::Meta;
use crate::session::{clear_session_cookie, SessionError};

pub const LOGIN_PATH: &str = "/login";

/// Body of every successful JSON response.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: None,
            data,
            meta: None,
        })
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: Some(message.into()),
            data,
            meta: None,
        })
    }

    pub fn paged(data: T, meta: Meta) -> Json<Self> {
        Json(Self {
            success: true,
            message: None,
            data,
            meta: Some(meta),
        })
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    success: bool,
    message: &'a str,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("session: {0}")]
    Session(#[from] SessionError),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("confirmation required: {0}")]
    ConfirmationRequired(String),

    #[error("backend error {status}: {message}")]
    Upstream { status: StatusCode, message: String },

    /// Static message shown instead of the backend's own
    #[error("unavailable: {0}")]
    Unavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Like `From<BackendError>`, except that failures other than a rejected
    /// session show `message` instead of what the backend said.
    pub fn unavailable(err: BackendError, message: &str) -> Self {
        if err.is_auth_failure() {
            return err.into();
        }
        tracing::error!(error = %err, "{message}");
        Self::Unavailable(message.to_string())
    }
}

impl From<BackendError> for AppError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Unauthorized(msg) | BackendError::Forbidden(msg) => {
                Self::Session(SessionError::Rejected(msg))
            }
            BackendError::Status { status, message } => Self::Upstream { status, message },
            BackendError::Transport(e) => {
                tracing::error!(error = %e, "backend unreachable");
                Self::Unavailable("Server sedang tidak dapat dihubungi".to_string())
            }
            BackendError::Decode(msg) => Self::Internal(msg),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{field} tidak valid"),
                })
            })
            .collect();
        if messages.is_empty() {
            // nested (list) errors only
            return Self::Validation(errors.to_string());
        }
        messages.sort();
        Self::Validation(messages.join(", "))
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        Self::Validation(format!("Form upload tidak valid: {e}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Session(_) => {
                return (
                    StatusCode::SEE_OTHER,
                    [(LOCATION, LOGIN_PATH.to_string()), (SET_COOKIE, clear_session_cookie())],
                )
                    .into_response();
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            AppError::ConfirmationRequired(msg) => (StatusCode::PRECONDITION_REQUIRED, msg.as_str()),
            AppError::Upstream { status, message } => {
                if status.is_client_error() {
                    (*status, message.as_str())
                } else {
                    (StatusCode::BAD_GATEWAY, message.as_str())
                }
            }
            AppError::Unavailable(msg) => (StatusCode::BAD_GATEWAY, msg.as_str()),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Terjadi kesalahan pada server")
            }
        };

        let body = Json(ErrorBody {
            success: false,
            message,
        });
        (status, body).into_response()
    }
}
