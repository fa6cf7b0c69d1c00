use axum::middleware;
use axum::Router;

use crate::session::{require_admin, require_session};

pub mod armada;
pub mod auth;
pub mod booking;
pub mod crud;
pub mod fasilitas;
pub mod paket_wisata;
pub mod public;
pub mod reports;
pub mod reservation;
pub mod supir;
pub mod users;

/// Everything under `/api/admin`; admin role required.
pub fn admin_router() -> Router {
    Router::new()
        .nest("/armada", armada::armada_router())
        .nest("/supir", supir::supir_router())
        .nest("/fasilitas", fasilitas::fasilitas_router())
        .nest("/paket-wisata", paket_wisata::paket_wisata_router())
        .nest("/paket-luar-kota", paket_wisata::paket_luar_kota_router())
        .nest("/booking", booking::booking_router())
        .nest("/reschedule", booking::reschedule_router())
        .nest("/users", users::users_router())
        .nest("/laporan", reports::reports_router())
        .route_layer(middleware::from_fn(require_admin))
}

/// Customer reservation flow; any logged-in user.
pub fn customer_router() -> Router {
    reservation::reservation_router().route_layer(middleware::from_fn(require_session))
}
