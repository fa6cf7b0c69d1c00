use axum::{
    extract::{Extension, Json},
    http::{header::SET_COOKIE, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use validator::Validate;

use crate::backend::BackendError;
use crate::error::{ApiResponse, AppError};
use crate::model::user::{LoginRequest, LoginResponse, RegisterRequest, User};
use crate::session::{clear_session_cookie, require_session, session_cookie, Session};
use crate::state::AppState;

// Response login ke frontend
#[derive(Debug, Serialize)]
pub struct LoginResult {
    pub token: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

pub fn auth_router() -> Router {
    let guarded = Router::new()
        .route("/profile", get(profile))
        .route_layer(axum::middleware::from_fn(require_session));

    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/logout", post(logout))
        .merge(guarded)
}

// backend lama: { token, user }, baru: { data: { token, user } }
fn parse_login(raw: Value) -> Result<LoginResponse, AppError> {
    let payload = match raw.get("data") {
        Some(data) if data.is_object() => data.clone(),
        _ => raw,
    };
    serde_json::from_value(payload).map_err(|e| AppError::internal(format!("login payload: {e}")))
}

pub async fn login(
    Extension(state): Extension<AppState>,
    Json(form): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    form.validate()?;

    let raw: Value = state
        .backend
        .post("/auth/login", &form)
        .await
        .map_err(|e| match e {
            // wrong credentials: stay on the login page
            BackendError::Unauthorized(message) => AppError::Upstream {
                status: StatusCode::UNAUTHORIZED,
                message,
            },
            other => other.into(),
        })?;
    let login = parse_login(raw)?;

    let session = Session::check(Some(&login.token), Utc::now().timestamp())?;
    tracing::info!(email = %form.email, role = %session.claims.role, "login");

    let cookie = session_cookie(&session.token, session.remaining(Utc::now().timestamp()));
    let body = ApiResponse::with_message(
        "Login berhasil",
        LoginResult {
            token: session.token,
            role: session.claims.role,
            user: login.user,
        },
    );
    Ok(([(SET_COOKIE, cookie)], body))
}

pub async fn register(
    Extension(state): Extension<AppState>,
    Json(form): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Value>>), AppError> {
    form.validate()?;

    let created: Value = state.backend.post("/auth/register", &form).await?;
    tracing::info!(email = %form.email, "registered");
    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message("Registrasi berhasil, silakan login", created),
    ))
}

pub async fn profile(
    Extension(state): Extension<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    let profile: Value = state.backend_for(&session).get("/auth/profile").await?;
    let profile = match profile {
        Value::Object(mut map) if map.contains_key("data") => map.remove("data").unwrap_or_default(),
        other => other,
    };
    Ok(ApiResponse::ok(profile))
}

pub async fn logout() -> impl IntoResponse {
    (
        [(SET_COOKIE, clear_session_cookie())],
        ApiResponse::with_message("Logout berhasil", Value::Null),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn login_payload_with_or_without_envelope() {
        let flat = parse_login(json!({"token": "a.b.c"})).unwrap();
        assert_eq!(flat.token, "a.b.c");

        let wrapped = parse_login(json!({"data": {"access_token": "a.b.c", "user": null}})).unwrap();
        assert_eq!(wrapped.token, "a.b.c");
    }

    #[test]
    fn login_payload_without_token_is_an_error() {
        assert!(parse_login(json!({"message": "ok"})).is_err());
    }
}
