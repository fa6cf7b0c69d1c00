//! Booking page endpoints for signed-in customers.

use std::collections::HashMap;

use axum::extract::{Extension, Json, Path, Query};
use axum::routing::{get, post};
use axum::Router;
use serde_json::Value;
use validator::Validate;

use crate::error::{ApiResponse, AppError};
use crate::model::booking::{Booking, RescheduleRequest};
use crate::model::{Envelope, ListParams, Page};
use crate::services::reservation::{self, DraftQuery, ReservationDraft, SubmitReservation};
use crate::session::Session;
use crate::state::AppState;

pub fn reservation_router() -> Router {
    Router::new()
        .route("/", post(submit_reservation))
        .route("/draft", get(reservation_draft))
        .route("/saya", get(my_bookings))
        .route("/:id/reschedule", post(request_reschedule))
}

async fn reservation_draft(
    Extension(state): Extension<AppState>,
    Extension(session): Extension<Session>,
    Query(query): Query<DraftQuery>,
) -> Result<Json<ApiResponse<ReservationDraft>>, AppError> {
    let product = query
        .product_ids()?
        .resolve()
        .ok_or_else(|| AppError::validation(reservation::INCOMPLETE_PARAMS))?;
    let dates = query.dates()?;

    let draft = reservation::build_draft(&state.backend_for(&session), product, dates).await?;
    Ok(ApiResponse::ok(draft))
}

async fn submit_reservation(
    Extension(state): Extension<AppState>,
    Extension(session): Extension<Session>,
    Json(form): Json<SubmitReservation>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    let created = reservation::submit(&state.backend_for(&session), &form).await?;
    Ok(ApiResponse::with_message("Booking berhasil dibuat", created))
}

async fn my_bookings(
    Extension(state): Extension<AppState>,
    Extension(session): Extension<Session>,
    Query(raw): Query<HashMap<String, String>>,
) -> Result<Json<ApiResponse<Vec<Booking>>>, AppError> {
    let params = ListParams::from_query(&raw, &["status"]);
    let envelope: Envelope<Vec<Booking>> = state
        .backend_for(&session)
        .get_query("/booking/me", &params.to_query())
        .await?;
    let page = Page::from_envelope(envelope, &params);
    Ok(ApiResponse::paged(page.items, page.meta))
}

async fn request_reschedule(
    Extension(state): Extension<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
    Json(form): Json<RescheduleRequest>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    form.validate()?;
    if form.tanggal_baru < chrono::Utc::now().date_naive() {
        return Err(AppError::validation("Tanggal baru tidak boleh di masa lalu"));
    }

    let backend = state.backend_for(&session);
    let booking: Envelope<Booking> = backend.get(&format!("/booking/{id}")).await?;
    if booking.data.pending_reschedule().is_some() {
        return Err(AppError::validation(
            "Booking ini masih memiliki permintaan reschedule yang menunggu",
        ));
    }

    let created: Envelope<Value> = backend
        .post(&format!("/booking/{id}/reschedule"), &form)
        .await?;
    tracing::info!(booking_id = id, tanggal_baru = %form.tanggal_baru, "reschedule requested");
    Ok(ApiResponse::with_message(
        "Permintaan reschedule berhasil dikirim",
        created.data,
    ))
}
