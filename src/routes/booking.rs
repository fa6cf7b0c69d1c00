use std::collections::HashMap;

use axum::extract::{Extension, Json, Path, Query};
use axum::routing::{get, patch};
use axum::Router;
use serde_json::Value;

use super::crud::{self, CrudResource, Form};
use crate::error::{ApiResponse, AppError};
use crate::model::booking::{
    Booking, BookingStatusUpdate, Reschedule, RescheduleDecision, RescheduleStatus,
    UpdateBookingRequest,
};
use crate::model::{Envelope, ListParams, Page};
use crate::session::Session;
use crate::state::AppState;

pub struct BookingResource;

impl CrudResource for BookingResource {
    const LABEL: &'static str = "Booking";
    const PATH: &'static str = "/booking";
    const FILTERS: &'static [&'static str] = &["search", "status", "startDate", "endDate"];

    type Item = Booking;
    type Update = UpdateBookingRequest;
}

impl Form for UpdateBookingRequest {
    fn check(&self) -> Result<(), AppError> {
        if let (Some(start), Some(end)) = (self.tanggal_mulai_wisata, self.tanggal_selesai_wisata) {
            if start > end {
                return Err(AppError::validation(
                    "Tanggal selesai tidak boleh sebelum tanggal mulai",
                ));
            }
        }
        Ok(())
    }
}

pub fn booking_router() -> Router {
    tracing::debug!("registering booking routes");
    crud::routes::<BookingResource>().route("/:id/status", patch(update_status))
}

pub fn reschedule_router() -> Router {
    tracing::debug!("registering reschedule routes");
    Router::new()
        .route("/", get(list_reschedules))
        .route("/:id", patch(decide_reschedule))
}

// Admin: confirm, cancel or complete a booking
async fn update_status(
    Extension(state): Extension<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
    Json(payload): Json<BookingStatusUpdate>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    let updated: Envelope<Value> = state
        .backend_for(&session)
        .patch(&format!("/booking/{id}/status"), &payload)
        .await?;
    tracing::info!(id, status = ?payload.status, "booking status changed");
    Ok(ApiResponse::with_message(
        "Status booking berhasil diperbarui",
        updated.data,
    ))
}

async fn list_reschedules(
    Extension(state): Extension<AppState>,
    Extension(session): Extension<Session>,
    Query(raw): Query<HashMap<String, String>>,
) -> Result<Json<ApiResponse<Vec<Reschedule>>>, AppError> {
    let params = ListParams::from_query(&raw, &["status", "bookingId"]);
    let envelope: Envelope<Vec<Reschedule>> = state
        .backend_for(&session)
        .get_query("/reschedule", &params.to_query())
        .await?;
    let page = Page::from_envelope(envelope, &params);
    Ok(ApiResponse::paged(page.items, page.meta))
}

async fn decide_reschedule(
    Extension(state): Extension<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
    Json(payload): Json<RescheduleDecision>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    let verb = match payload.status {
        RescheduleStatus::Approved => "disetujui",
        RescheduleStatus::Rejected => "ditolak",
        RescheduleStatus::Pending => {
            return Err(AppError::validation(
                "Keputusan reschedule harus approved atau rejected",
            ))
        }
    };

    let updated: Envelope<Value> = state
        .backend_for(&session)
        .patch(&format!("/reschedule/{id}"), &payload)
        .await?;
    tracing::info!(id, decision = verb, "reschedule decided");
    Ok(ApiResponse::with_message(
        format!("Reschedule berhasil {verb}"),
        updated.data,
    ))
}
