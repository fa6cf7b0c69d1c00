use axum::routing::post;
use axum::Router;

use super::crud::{self, Creatable, CrudResource, Form, HasImages};
use crate::error::AppError;
use crate::model::paket::{check_harga, PaketLuarKotaForm, PaketWisata, PaketWisataForm, PaketWisataLuarKota};
use crate::services::images::ImageTarget;

pub struct PaketWisataResource;

impl CrudResource for PaketWisataResource {
    const LABEL: &'static str = "Paket wisata";
    const PATH: &'static str = "/paket-wisata";
    const FILTERS: &'static [&'static str] = &["search", "status", "lokasi", "kategori"];

    type Item = PaketWisata;
    type Update = PaketWisataForm;
}

impl Creatable for PaketWisataResource {
    type Create = PaketWisataForm;
}

impl HasImages for PaketWisataResource {
    const IMAGES: ImageTarget = ImageTarget::PaketWisata;
}

impl Form for PaketWisataForm {
    fn check(&self) -> Result<(), AppError> {
        check_harga(&self.harga)
    }
}

pub struct PaketLuarKotaResource;

impl CrudResource for PaketLuarKotaResource {
    const LABEL: &'static str = "Paket luar kota";
    const PATH: &'static str = "/paket-wisata-luar-kota";
    const FILTERS: &'static [&'static str] = &["search", "status", "tujuanUtama"];

    type Item = PaketWisataLuarKota;
    type Update = PaketLuarKotaForm;
}

impl Creatable for PaketLuarKotaResource {
    type Create = PaketLuarKotaForm;
}

impl HasImages for PaketLuarKotaResource {
    const IMAGES: ImageTarget = ImageTarget::PaketLuarKota;
}

impl Form for PaketLuarKotaForm {
    fn check(&self) -> Result<(), AppError> {
        check_harga(&self.harga)?;
        let mut urutan: Vec<i32> = self.detail_rute.iter().map(|r| r.urutan_ke).collect();
        urutan.sort_unstable();
        if urutan.windows(2).any(|w| w[0] == w[1]) {
            return Err(AppError::validation("Urutan rute tidak boleh sama"));
        }
        Ok(())
    }
}

pub fn paket_wisata_router() -> Router {
    tracing::debug!("registering paket wisata routes");
    crud::routes::<PaketWisataResource>()
        .route("/", post(crud::create::<PaketWisataResource>))
        .merge(crud::image_routes::<PaketWisataResource>())
}

pub fn paket_luar_kota_router() -> Router {
    tracing::debug!("registering paket luar kota routes");
    crud::routes::<PaketLuarKotaResource>()
        .route("/", post(crud::create::<PaketLuarKotaResource>))
        .merge(crud::image_routes::<PaketLuarKotaResource>())
}
