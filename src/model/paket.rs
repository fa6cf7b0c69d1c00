use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaketStatus {
    Aktif,
    NonAktif,
}

/// In-town tour package.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaketWisata {
    pub id: i64,
    pub nama_paket: String,
    pub lokasi: String,
    #[serde(default)]
    pub deskripsi: String,
    #[serde(default)]
    pub itinerary: String,
    pub harga: Decimal,
    pub durasi_hari: i32,
    #[serde(default)]
    pub images: Vec<String>,
    pub status: PaketStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kategori: Option<String>,
}

/// One leg of an out-of-town route.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailRute {
    #[serde(default)]
    pub id: Option<i64>,
    pub urutan_ke: i32,
    pub nama_destinasi: String,
    #[serde(default)]
    pub alamat_destinasi: Option<String>,
    #[serde(default)]
    pub jarak_dari_sebelumnya_km: Option<Decimal>,
    #[serde(default)]
    pub estimasi_waktu_tempuh: Option<i32>,
    #[serde(default)]
    pub waktu_kunjungan_menit: Option<i32>,
    #[serde(default)]
    pub deskripsi_singkat: Option<String>,
}

/// Out-of-town tour package, optionally with its route legs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaketWisataLuarKota {
    pub id: i64,
    pub nama_paket: String,
    pub tujuan_utama: String,
    #[serde(default)]
    pub deskripsi: String,
    #[serde(default)]
    pub itinerary: Option<String>,
    pub harga: Decimal,
    #[serde(default)]
    pub estimasi_durasi: i32,
    #[serde(default)]
    pub images: Vec<String>,
    pub status: PaketStatus,
    #[serde(default)]
    pub detail_rute: Vec<DetailRute>,
}

impl PaketWisataLuarKota {
    /// Put the route legs in travel order.
    pub fn sort_legs(&mut self) {
        self.detail_rute.sort_by_key(|leg| leg.urutan_ke);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaketWisataForm {
    #[validate(length(min = 1, message = "Nama paket wajib diisi"))]
    pub nama_paket: String,
    #[validate(length(min = 1, message = "Lokasi wajib diisi"))]
    pub lokasi: String,
    #[validate(length(min = 1, message = "Deskripsi wajib diisi"))]
    pub deskripsi: String,
    #[validate(length(min = 1, message = "Itinerary wajib diisi"))]
    pub itinerary: String,
    pub harga: Decimal,
    #[validate(range(min = 1, max = 30, message = "Durasi harus antara 1 dan 30 hari"))]
    pub durasi_hari: i32,
    #[serde(default = "default_status")]
    pub status: PaketStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kategori: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaketLuarKotaForm {
    #[validate(length(min = 1, message = "Nama paket wajib diisi"))]
    pub nama_paket: String,
    #[validate(length(min = 1, message = "Tujuan utama wajib diisi"))]
    pub tujuan_utama: String,
    #[validate(length(min = 1, message = "Deskripsi wajib diisi"))]
    pub deskripsi: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub itinerary: Option<String>,
    pub harga: Decimal,
    #[validate(range(min = 1, max = 30, message = "Estimasi durasi harus antara 1 dan 30 hari"))]
    pub estimasi_durasi: i32,
    #[serde(default = "default_status")]
    pub status: PaketStatus,
    #[serde(default)]
    #[validate(nested)]
    pub detail_rute: Vec<DetailRuteForm>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DetailRuteForm {
    #[validate(range(min = 1, message = "Urutan rute dimulai dari 1"))]
    pub urutan_ke: i32,
    #[validate(length(min = 1, message = "Nama destinasi wajib diisi"))]
    pub nama_destinasi: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alamat_destinasi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jarak_dari_sebelumnya_km: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimasi_waktu_tempuh: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waktu_kunjungan_menit: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deskripsi_singkat: Option<String>,
}

fn default_status() -> PaketStatus {
    PaketStatus::Aktif
}

/// Harga must be positive; validator has no range check for `Decimal`.
pub fn check_harga(harga: &Decimal) -> Result<(), crate::error::AppError> {
    if harga.is_sign_negative() || harga.is_zero() {
        return Err(crate::error::AppError::validation("Harga harus lebih dari 0"));
    }
    Ok(())
}
