//! Web portal for the wisata booking platform: public catalogue, customer
//! reservations and the admin area, all backed by the booking REST API.

use axum::body::Body;
use axum::extract::{DefaultBodyLimit, Extension};
use axum::http::Request;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub mod backend;
pub mod config;
pub mod error;
pub mod logger;
pub mod model;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;

use routes::auth::auth_router;
use routes::public::public_router;
use routes::{admin_router, customer_router};
use services::images::MAX_FILES_PER_UPLOAD;
use state::AppState;

pub fn app(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();
    let serve_dir = ServeDir::new(&static_dir)
        .not_found_service(ServeFile::new(format!("{static_dir}/index.html")));

    // room for a full gallery upload plus the multipart framing
    let body_limit = state
        .config
        .max_upload_bytes
        .saturating_mul(MAX_FILES_PER_UPLOAD + 1);

    Router::new()
        .nest("/api/admin", admin_router())
        .nest("/api/reservasi", customer_router())
        .nest("/api/auth", auth_router())
        .nest("/api", public_router())
        // SPA build handles every other path
        .fallback_service(serve_dir)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    id = %Uuid::new_v4(),
                    method = %req.method(),
                    uri = %req.uri(),
                )
            }),
        )
        .layer(Extension(state))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
}
