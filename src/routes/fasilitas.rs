use axum::routing::post;
use axum::Router;

use super::crud::{self, Creatable, CrudResource, Form};
use crate::error::AppError;
use crate::model::fasilitas::{Fasilitas, FasilitasForm};

pub struct FasilitasResource;

impl CrudResource for FasilitasResource {
    const LABEL: &'static str = "Fasilitas";
    const PATH: &'static str = "/fasilitas";
    const FILTERS: &'static [&'static str] = &["search", "jenisFasilitas"];

    type Item = Fasilitas;
    type Update = FasilitasForm;
}

impl Creatable for FasilitasResource {
    type Create = FasilitasForm;
}

impl Form for FasilitasForm {
    fn check(&self) -> Result<(), AppError> {
        self.check_link()
    }
}

pub fn fasilitas_router() -> Router {
    tracing::debug!("registering fasilitas routes");
    crud::routes::<FasilitasResource>().route("/", post(crud::create::<FasilitasResource>))
}
