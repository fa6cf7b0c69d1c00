use serde::{Deserialize, Serialize};
use validator::Validate;

use super::paket::PaketWisataLuarKota;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JenisFasilitas {
    PaketLuarKota,
    Custom,
    Dropoff,
}

impl JenisFasilitas {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PaketLuarKota => "paket_luar_kota",
            Self::Custom => "custom",
            Self::Dropoff => "dropoff",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fasilitas {
    pub id: i64,
    pub jenis_fasilitas: JenisFasilitas,
    pub nama_fasilitas: String,
    #[serde(default)]
    pub deskripsi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paket_luar_kota: Option<PaketWisataLuarKota>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FasilitasForm {
    pub jenis_fasilitas: JenisFasilitas,
    #[validate(length(min = 1, message = "Nama fasilitas wajib diisi"))]
    pub nama_fasilitas: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deskripsi: Option<String>,
    /// Required when `jenis_fasilitas` is `paket_luar_kota`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paket_luar_kota_id: Option<i64>,
}

impl FasilitasForm {
    pub fn check_link(&self) -> Result<(), crate::error::AppError> {
        if self.jenis_fasilitas == JenisFasilitas::PaketLuarKota && self.paket_luar_kota_id.is_none() {
            return Err(crate::error::AppError::validation(
                "Fasilitas paket luar kota harus memilih paket",
            ));
        }
        Ok(())
    }
}
