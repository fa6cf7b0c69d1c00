use axum::routing::post;
use axum::Router;

use super::crud::{self, Creatable, CrudResource, Form, HasImages};
use crate::model::armada::{Armada, CreateArmadaRequest, UpdateArmadaRequest};
use crate::services::images::ImageTarget;

pub struct ArmadaResource;

impl CrudResource for ArmadaResource {
    const LABEL: &'static str = "Armada";
    const PATH: &'static str = "/armada";
    const FILTERS: &'static [&'static str] = &["search", "status", "jenisMobil", "kapasitas"];

    type Item = Armada;
    type Update = UpdateArmadaRequest;
}

impl Creatable for ArmadaResource {
    type Create = CreateArmadaRequest;
}

impl HasImages for ArmadaResource {
    const IMAGES: ImageTarget = ImageTarget::Armada;
}

impl Form for CreateArmadaRequest {}
impl Form for UpdateArmadaRequest {}

pub fn armada_router() -> Router {
    tracing::debug!("registering armada routes");
    crud::routes::<ArmadaResource>()
        .route("/", post(crud::create::<ArmadaResource>))
        .merge(crud::image_routes::<ArmadaResource>())
}
