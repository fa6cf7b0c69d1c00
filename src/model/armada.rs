use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmadaStatus {
    Tersedia,
    Digunakan,
    Maintenance,
}

/// Fleet vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Armada {
    pub id: i64,
    pub jenis_mobil: String,
    pub merk_mobil: String,
    pub plat_nomor: String,
    pub kapasitas: i32,
    pub tahun_kendaraan: i32,
    pub status: ArmadaStatus,
    #[serde(default)]
    pub foto_armada: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateArmadaRequest {
    #[validate(length(min = 1, message = "Jenis mobil wajib diisi"))]
    pub jenis_mobil: String,
    #[validate(length(min = 1, message = "Merk mobil wajib diisi"))]
    pub merk_mobil: String,
    #[validate(length(min = 1, max = 12, message = "Plat nomor wajib diisi (maks. 12 karakter)"))]
    pub plat_nomor: String,
    #[validate(range(min = 1, max = 100, message = "Kapasitas harus antara 1 dan 100"))]
    pub kapasitas: i32,
    #[validate(range(min = 1980, max = 2100, message = "Tahun kendaraan tidak valid"))]
    pub tahun_kendaraan: i32,
    #[serde(default = "default_status")]
    pub status: ArmadaStatus,
}

fn default_status() -> ArmadaStatus {
    ArmadaStatus::Tersedia
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArmadaRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Jenis mobil wajib diisi"))]
    pub jenis_mobil: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Merk mobil wajib diisi"))]
    pub merk_mobil: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 12, message = "Plat nomor wajib diisi (maks. 12 karakter)"))]
    pub plat_nomor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 100, message = "Kapasitas harus antara 1 dan 100"))]
    pub kapasitas: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1980, max = 2100, message = "Tahun kendaraan tidak valid"))]
    pub tahun_kendaraan: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ArmadaStatus>,
}
