use axum::routing::post;
use axum::Router;

use super::crud::{self, Creatable, CrudResource, Form};
use crate::model::user::{RegisterRequest, UpdateUserRequest, User};

pub struct UserResource;

impl CrudResource for UserResource {
    const LABEL: &'static str = "User";
    const PATH: &'static str = "/users";
    const FILTERS: &'static [&'static str] = &["search", "role"];

    type Item = User;
    type Update = UpdateUserRequest;
}

impl Creatable for UserResource {
    type Create = RegisterRequest;
}

impl Form for RegisterRequest {}
impl Form for UpdateUserRequest {}

// Router users admin
pub fn users_router() -> Router {
    crud::routes::<UserResource>().route("/", post(crud::create::<UserResource>))
}
