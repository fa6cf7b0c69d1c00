use axum::routing::post;
use axum::Router;

use super::crud::{self, Creatable, CrudResource, Form, HasImages};
use crate::model::supir::{CreateSupirRequest, Supir, UpdateSupirRequest};
use crate::services::images::ImageTarget;

pub struct SupirResource;

impl CrudResource for SupirResource {
    const LABEL: &'static str = "Supir";
    const PATH: &'static str = "/supir";
    const FILTERS: &'static [&'static str] = &["search", "status"];

    type Item = Supir;
    type Update = UpdateSupirRequest;
}

impl Creatable for SupirResource {
    type Create = CreateSupirRequest;
}

impl HasImages for SupirResource {
    const IMAGES: ImageTarget = ImageTarget::Supir;
}

impl Form for CreateSupirRequest {}
impl Form for UpdateSupirRequest {}

pub fn supir_router() -> Router {
    tracing::debug!("registering supir routes");
    crud::routes::<SupirResource>()
        .route("/", post(crud::create::<SupirResource>))
        .merge(crud::image_routes::<SupirResource>())
}
