use serde_json::Value;

use crate::backend::{BackendClient, Download};
use crate::error::AppError;
use crate::model::report::{Report, ReportFilter, ReportKind};
use crate::model::Envelope;

/// Query pairs in a fixed order: `startDate`, `endDate`, `status`.
pub fn report_query(filter: &ReportFilter) -> Result<Vec<(&'static str, String)>, AppError> {
    if let (Some(start), Some(end)) = (filter.start_date, filter.end_date) {
        if start > end {
            return Err(AppError::validation(
                "Tanggal mulai tidak boleh melewati tanggal selesai",
            ));
        }
    }

    let mut query = Vec::new();
    if let Some(start) = filter.start_date {
        query.push(("startDate", start.format("%Y-%m-%d").to_string()));
    }
    if let Some(end) = filter.end_date {
        query.push(("endDate", end.format("%Y-%m-%d").to_string()));
    }
    if let Some(status) = filter.status.as_deref().map(str::trim) {
        if !status.is_empty() && status != "semua" {
            query.push(("status", status.to_string()));
        }
    }
    Ok(query)
}

pub fn pdf_file_name(kind: ReportKind, filter: &ReportFilter) -> String {
    let part = |d: Option<chrono::NaiveDate>| {
        d.map(|d| d.format("%Y%m%d").to_string())
            .unwrap_or_else(|| "semua".to_string())
    };
    format!(
        "laporan-{kind}-{}-{}.pdf",
        part(filter.start_date),
        part(filter.end_date)
    )
}

pub async fn fetch_report(
    backend: &BackendClient,
    kind: ReportKind,
    filter: &ReportFilter,
) -> Result<Report, AppError> {
    let query = report_query(filter)?;
    let envelope: Envelope<Value> = backend
        .get_query(&format!("/reports/{kind}"), &query)
        .await?;
    serde_json::from_value(envelope.data)
        .map_err(|e| AppError::internal(format!("report payload: {e}")))
}

pub async fn download_pdf(
    backend: &BackendClient,
    kind: ReportKind,
    filter: &ReportFilter,
) -> Result<Download, AppError> {
    let query = report_query(filter)?;
    let download = backend
        .get_bytes(&format!("/reports/{kind}.pdf"), &query)
        .await?;
    tracing::info!(%kind, bytes = download.bytes.len(), "report pdf fetched");
    Ok(download)
}
