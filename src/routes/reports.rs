use axum::extract::{Extension, Json, Path, Query};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::error::{ApiResponse, AppError};
use crate::model::report::{Report, ReportFilter, ReportKind};
use crate::services::reports;
use crate::session::Session;
use crate::state::AppState;

const PDF: &str = "application/pdf";

pub fn reports_router() -> Router {
    Router::new()
        .route("/:jenis", get(show_report))
        .route("/:jenis/pdf", get(download_report))
}

fn report_kind(raw: &str) -> Result<ReportKind, AppError> {
    raw.parse().map_err(AppError::Validation)
}

async fn show_report(
    Extension(state): Extension<AppState>,
    Extension(session): Extension<Session>,
    Path(jenis): Path<String>,
    Query(filter): Query<ReportFilter>,
) -> Result<Json<ApiResponse<Report>>, AppError> {
    let kind = report_kind(&jenis)?;
    let report = reports::fetch_report(&state.backend_for(&session), kind, &filter).await?;
    Ok(ApiResponse::ok(report))
}

async fn download_report(
    Extension(state): Extension<AppState>,
    Extension(session): Extension<Session>,
    Path(jenis): Path<String>,
    Query(filter): Query<ReportFilter>,
) -> Result<Response, AppError> {
    let kind = report_kind(&jenis)?;
    let download = reports::download_pdf(&state.backend_for(&session), kind, &filter).await?;
    if download.content_type.as_deref() != Some(PDF) {
        tracing::debug!(%kind, content_type = ?download.content_type, "serving report as pdf");
    }
    let disposition = format!(
        "attachment; filename=\"{}\"",
        reports::pdf_file_name(kind, &filter)
    );

    Ok((
        [(CONTENT_TYPE, PDF.to_string()), (CONTENT_DISPOSITION, disposition)],
        download.bytes,
    )
        .into_response())
}
