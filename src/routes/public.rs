//! Data behind the public pages. No session needed.

use std::collections::HashMap;

use axum::extract::{Extension, Json, Path, Query};
use axum::response::Json as RespJson;
use axum::routing::get;
use axum::Router;
use serde::Serialize;

use super::crud::{fetch_page, CrudResource};
use super::fasilitas::FasilitasResource;
use super::paket_wisata::{PaketLuarKotaResource, PaketWisataResource};
use crate::error::{ApiResponse, AppError};
use crate::model::fasilitas::{Fasilitas, JenisFasilitas};
use crate::model::paket::{PaketWisata, PaketWisataLuarKota};
use crate::model::{Envelope, ListParams};
use crate::state::AppState;

const HOME_LIMIT: u32 = 6;

pub fn public_router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/beranda", get(beranda))
        .route("/paket-wisata", get(list_paket_wisata))
        .route("/paket-wisata/:id", get(detail::<PaketWisataResource>))
        .route("/paket-luar-kota", get(list_paket_luar_kota))
        .route("/paket-luar-kota/:id", get(detail_paket_luar_kota))
        .route("/fasilitas", get(list_fasilitas))
        .route("/fasilitas/:id", get(detail::<FasilitasResource>))
}

async fn health() -> RespJson<serde_json::Value> {
    RespJson(serde_json::json!({
        "status": "ok",
        "message": "Wisata portal is running",
        "timestamp": chrono::Utc::now()
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Beranda {
    pub paket_wisata: Vec<PaketWisata>,
    pub paket_luar_kota: Vec<PaketWisataLuarKota>,
    pub dropoff: Vec<Fasilitas>,
    pub custom_rute: Vec<Fasilitas>,
}

fn active_only(mut params: ListParams) -> ListParams {
    params.filters.retain(|(k, _)| k != "status");
    params.filters.push(("status".to_string(), "aktif".to_string()));
    params
}

fn fasilitas_of(jenis: JenisFasilitas, limit: u32) -> ListParams {
    ListParams {
        page: 1,
        limit,
        filters: vec![("jenisFasilitas".to_string(), jenis.as_str().to_string())],
    }
}

// Home page: the four sections load together; any failure fails the page
async fn beranda(
    Extension(state): Extension<AppState>,
) -> Result<Json<ApiResponse<Beranda>>, AppError> {
    let backend = &state.backend;
    let home = active_only(ListParams {
        limit: HOME_LIMIT,
        ..Default::default()
    });
    let dropoff = fasilitas_of(JenisFasilitas::Dropoff, HOME_LIMIT);
    let custom = fasilitas_of(JenisFasilitas::Custom, HOME_LIMIT);

    let (paket_wisata, paket_luar_kota, dropoff, custom_rute) = tokio::try_join!(
        fetch_page::<PaketWisataResource>(backend, &home),
        fetch_page::<PaketLuarKotaResource>(backend, &home),
        fetch_page::<FasilitasResource>(backend, &dropoff),
        fetch_page::<FasilitasResource>(backend, &custom),
    )?;

    Ok(ApiResponse::ok(Beranda {
        paket_wisata: paket_wisata.items,
        paket_luar_kota: paket_luar_kota.items,
        dropoff: dropoff.items,
        custom_rute: custom_rute.items,
    }))
}

async fn list_paket_wisata(
    Extension(state): Extension<AppState>,
    Query(raw): Query<HashMap<String, String>>,
) -> Result<Json<ApiResponse<Vec<PaketWisata>>>, AppError> {
    let params = active_only(ListParams::from_query(&raw, &["search", "lokasi", "kategori"]));
    let page = fetch_page::<PaketWisataResource>(&state.backend, &params).await?;
    Ok(ApiResponse::paged(page.items, page.meta))
}

async fn list_paket_luar_kota(
    Extension(state): Extension<AppState>,
    Query(raw): Query<HashMap<String, String>>,
) -> Result<Json<ApiResponse<Vec<PaketWisataLuarKota>>>, AppError> {
    let params = active_only(ListParams::from_query(&raw, &["search", "tujuanUtama"]));
    let page = fetch_page::<PaketLuarKotaResource>(&state.backend, &params).await?;
    Ok(ApiResponse::paged(page.items, page.meta))
}

async fn list_fasilitas(
    Extension(state): Extension<AppState>,
    Query(mut raw): Query<HashMap<String, String>>,
) -> Result<Json<ApiResponse<Vec<Fasilitas>>>, AppError> {
    // the public page filters with `jenis`
    if let Some(jenis) = raw.remove("jenis") {
        raw.insert("jenisFasilitas".to_string(), jenis);
    }
    let params = ListParams::from_query(&raw, &["search", "jenisFasilitas"]);
    let page = fetch_page::<FasilitasResource>(&state.backend, &params).await?;
    Ok(ApiResponse::paged(page.items, page.meta))
}

async fn detail<R: CrudResource>(
    Extension(state): Extension<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<R::Item>>, AppError> {
    let envelope: Envelope<R::Item> = state.backend.get(&format!("{}/{id}", R::PATH)).await?;
    Ok(ApiResponse::ok(envelope.data))
}

async fn detail_paket_luar_kota(
    Extension(state): Extension<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<PaketWisataLuarKota>>, AppError> {
    let path = format!("{}/{id}", PaketLuarKotaResource::PATH);
    let mut paket = state.backend.get::<Envelope<PaketWisataLuarKota>>(&path).await?.data;
    paket.sort_legs();
    Ok(ApiResponse::ok(paket))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_lists_force_active_status() {
        let params = active_only(ListParams {
            filters: vec![
                ("status".to_string(), "non_aktif".to_string()),
                ("lokasi".to_string(), "Yogyakarta".to_string()),
            ],
            ..Default::default()
        });
        assert_eq!(
            params.filters,
            vec![
                ("lokasi".to_string(), "Yogyakarta".to_string()),
                ("status".to_string(), "aktif".to_string()),
            ]
        );
    }
}
