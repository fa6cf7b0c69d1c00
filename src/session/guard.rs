use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;

use super::{token_from_headers, Session, SessionError};
use crate::error::AppError;

/// Rejects the request with a redirect to `/login` unless it carries an
/// unexpired token. The decoded [`Session`] lands in the request extensions.
pub async fn require_session(mut req: Request, next: Next) -> Result<Response, AppError> {
    let session = open_session(&req)?;
    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}

/// [`require_session`] plus `role == admin`.
pub async fn require_admin(mut req: Request, next: Next) -> Result<Response, AppError> {
    let session = open_session(&req)?;
    if !session.claims.is_admin() {
        tracing::warn!(role = %session.claims.role, uri = %req.uri(), "non-admin session on admin route");
        return Err(SessionError::NotAdmin(session.claims.role).into());
    }
    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}

fn open_session(req: &Request) -> Result<Session, AppError> {
    let token = token_from_headers(req.headers());
    Session::check(token.as_deref(), Utc::now().timestamp()).map_err(|e| {
        tracing::info!(uri = %req.uri(), reason = %e, "session check failed");
        AppError::Session(e)
    })
}
