//! Shared list/detail/create/update/delete handlers for the admin tables.
//!
//! Every admin resource behaves the same way: a paginated, filterable list;
//! a modal form for create and edit; delete behind a confirmation. After a
//! successful mutation the current list page is fetched again and returned
//! together with the changed item.

use std::collections::HashMap;

use axum::extract::{Extension, Json, Multipart, Path, Query};
use axum::routing::{get, post};
use axum::Router;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::backend::BackendClient;
use crate::error::{ApiResponse, AppError};
use crate::model::{Envelope, ListParams, Page};
use crate::services::images::{self, ImageTarget};
use crate::session::Session;
use crate::state::AppState;

/// A form body the portal checks before forwarding.
pub trait Form: Validate + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Cross-field checks that `validator` cannot express.
    fn check(&self) -> Result<(), AppError> {
        Ok(())
    }
}

pub trait CrudResource: Send + Sync + 'static {
    /// Shown in messages, e.g. "Armada berhasil dihapus"
    const LABEL: &'static str;
    /// Backend collection path, e.g. `/armada`
    const PATH: &'static str;
    /// Query keys forwarded to the backend list endpoint
    const FILTERS: &'static [&'static str];

    type Item: Serialize + DeserializeOwned + Send + Sync + 'static;
    type Update: Form;
}

pub trait Creatable: CrudResource {
    type Create: Form;
}

pub trait HasImages: CrudResource {
    const IMAGES: ImageTarget;
}

#[derive(Debug, Serialize)]
pub struct Mutation<T, L> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<T>,
    pub list: Page<L>,
}

fn item_path<R: CrudResource>(id: i64) -> String {
    format!("{}/{id}", R::PATH)
}

pub async fn fetch_page<R: CrudResource>(
    backend: &BackendClient,
    params: &ListParams,
) -> Result<Page<R::Item>, AppError> {
    let envelope: Envelope<Vec<R::Item>> = backend.get_query(R::PATH, &params.to_query()).await?;
    Ok(Page::from_envelope(envelope, params))
}

/// `GET /`, `GET /:id`, `PUT /:id`, `DELETE /:id`.
pub fn routes<R: CrudResource>() -> Router {
    Router::new()
        .route("/", get(list::<R>))
        .route("/:id", get(detail::<R>).put(update::<R>).delete(remove::<R>))
}

/// `POST /:id/images` and `DELETE /:id/images?imageName=`.
pub fn image_routes<R: HasImages>() -> Router {
    Router::new().route(
        "/:id/images",
        post(upload_images::<R>).delete(delete_image::<R>),
    )
}

pub async fn list<R: CrudResource>(
    Extension(state): Extension<AppState>,
    Extension(session): Extension<Session>,
    Query(raw): Query<HashMap<String, String>>,
) -> Result<Json<ApiResponse<Vec<R::Item>>>, AppError> {
    let params = ListParams::from_query(&raw, R::FILTERS);
    tracing::debug!(resource = R::LABEL, ?params, "listing");
    let page = fetch_page::<R>(&state.backend_for(&session), &params).await?;
    Ok(ApiResponse::paged(page.items, page.meta))
}

pub async fn detail<R: CrudResource>(
    Extension(state): Extension<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<R::Item>>, AppError> {
    let envelope: Envelope<R::Item> = state
        .backend_for(&session)
        .get(&item_path::<R>(id))
        .await?;
    Ok(ApiResponse::ok(envelope.data))
}

pub async fn create<R: Creatable>(
    Extension(state): Extension<AppState>,
    Extension(session): Extension<Session>,
    Query(raw): Query<HashMap<String, String>>,
    Json(form): Json<R::Create>,
) -> Result<Json<ApiResponse<Mutation<Value, R::Item>>>, AppError> {
    form.validate()?;
    form.check()?;

    let backend = state.backend_for(&session);
    let created: Envelope<Value> = backend.post(R::PATH, &form).await?;
    tracing::info!(resource = R::LABEL, "created");

    let list = fetch_page::<R>(&backend, &ListParams::from_query(&raw, R::FILTERS)).await?;
    Ok(ApiResponse::with_message(
        format!("{} berhasil ditambahkan", R::LABEL),
        Mutation {
            item: Some(created.data),
            list,
        },
    ))
}

pub async fn update<R: CrudResource>(
    Extension(state): Extension<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
    Query(raw): Query<HashMap<String, String>>,
    Json(form): Json<R::Update>,
) -> Result<Json<ApiResponse<Mutation<Value, R::Item>>>, AppError> {
    form.validate()?;
    form.check()?;

    let backend = state.backend_for(&session);
    let updated: Envelope<Value> = backend.put(&item_path::<R>(id), &form).await?;
    tracing::info!(resource = R::LABEL, id, "updated");

    let list = fetch_page::<R>(&backend, &ListParams::from_query(&raw, R::FILTERS)).await?;
    Ok(ApiResponse::with_message(
        format!("{} berhasil diperbarui", R::LABEL),
        Mutation {
            item: Some(updated.data),
            list,
        },
    ))
}

/// Without `confirm=true` nothing is sent and the caller gets the prompt.
pub fn require_confirmation(
    raw: &HashMap<String, String>,
    label: &str,
    id: i64,
) -> Result<(), AppError> {
    let confirmed = raw
        .get("confirm")
        .is_some_and(|v| v.eq_ignore_ascii_case("true") || v == "1");
    if confirmed {
        Ok(())
    } else {
        Err(AppError::ConfirmationRequired(format!(
            "Yakin ingin menghapus {label} #{id}?"
        )))
    }
}

pub async fn remove<R: CrudResource>(
    Extension(state): Extension<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
    Query(raw): Query<HashMap<String, String>>,
) -> Result<Json<ApiResponse<Mutation<Value, R::Item>>>, AppError> {
    require_confirmation(&raw, R::LABEL, id)?;

    let backend = state.backend_for(&session);
    let _: Value = backend.delete(&item_path::<R>(id)).await?;
    tracing::info!(resource = R::LABEL, id, "deleted");

    let list = fetch_page::<R>(&backend, &ListParams::from_query(&raw, R::FILTERS)).await?;
    Ok(ApiResponse::with_message(
        format!("{} berhasil dihapus", R::LABEL),
        Mutation { item: None, list },
    ))
}

pub async fn upload_images<R: HasImages>(
    Extension(state): Extension<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    let files = images::read_images(&mut multipart, R::IMAGES, state.config.max_upload_bytes).await?;
    let uploaded = images::upload(&state.backend_for(&session), R::IMAGES, id, files).await?;
    Ok(ApiResponse::with_message("Gambar berhasil diunggah", uploaded))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageNameParam {
    #[serde(default)]
    pub image_name: String,
}

pub async fn delete_image<R: HasImages>(
    Extension(state): Extension<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
    Query(param): Query<ImageNameParam>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    let deleted =
        images::delete_image(&state.backend_for(&session), R::IMAGES, id, &param.image_name)
            .await?;
    Ok(ApiResponse::with_message("Gambar berhasil dihapus", deleted))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_needs_explicit_confirmation() {
        let mut raw = HashMap::new();
        assert!(matches!(
            require_confirmation(&raw, "Supir", 7),
            Err(AppError::ConfirmationRequired(ref m)) if m == "Yakin ingin menghapus Supir #7?"
        ));
        raw.insert("confirm".to_string(), "false".to_string());
        assert!(require_confirmation(&raw, "Supir", 7).is_err());
        raw.insert("confirm".to_string(), "true".to_string());
        assert!(require_confirmation(&raw, "Supir", 7).is_ok());
    }
}
