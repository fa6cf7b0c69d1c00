use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupirStatus {
    Tersedia,
    Bertugas,
    Off,
}

/// Driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supir {
    pub id: i64,
    pub nama: String,
    pub alamat: String,
    pub nomor_hp: String,
    pub nomor_sim: String,
    #[serde(default)]
    pub foto_supir: Option<String>,
    #[serde(default)]
    pub pengalaman_tahun: i32,
    #[serde(default)]
    pub rating_rata: Option<Decimal>,
    pub status: SupirStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSupirRequest {
    #[validate(length(min = 1, message = "Nama supir wajib diisi"))]
    pub nama: String,
    #[validate(length(min = 1, message = "Alamat wajib diisi"))]
    pub alamat: String,
    #[validate(length(min = 8, max = 15, message = "Nomor HP tidak valid"))]
    pub nomor_hp: String,
    #[validate(length(min = 1, message = "Nomor SIM wajib diisi"))]
    pub nomor_sim: String,
    #[serde(default)]
    #[validate(range(min = 0, max = 60, message = "Pengalaman tidak valid"))]
    pub pengalaman_tahun: i32,
    #[serde(default = "default_status")]
    pub status: SupirStatus,
}

fn default_status() -> SupirStatus {
    SupirStatus::Tersedia
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSupirRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Nama supir wajib diisi"))]
    pub nama: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Alamat wajib diisi"))]
    pub alamat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 8, max = 15, message = "Nomor HP tidak valid"))]
    pub nomor_hp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Nomor SIM wajib diisi"))]
    pub nomor_sim: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, max = 60, message = "Pengalaman tidak valid"))]
    pub pengalaman_tahun: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SupirStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rating_accepts_string_or_number() {
        let from_string: Supir = serde_json::from_value(json!({
            "id": 7, "nama": "Budi", "alamat": "Sleman", "nomorHp": "08123456789",
            "nomorSim": "SIM-1", "ratingRata": "4.75", "status": "bertugas"
        }))
        .unwrap();
        assert_eq!(from_string.rating_rata, Some(Decimal::new(475, 2)));
        assert_eq!(from_string.status, SupirStatus::Bertugas);

        let from_number: Supir = serde_json::from_value(json!({
            "id": 8, "nama": "Sari", "alamat": "Bantul", "nomorHp": "08123456780",
            "nomorSim": "SIM-2", "ratingRata": 5, "status": "off"
        }))
        .unwrap();
        assert_eq!(from_number.rating_rata, Some(Decimal::from(5)));
    }

    #[test]
    fn required_fields_are_checked() {
        let form = CreateSupirRequest {
            nama: String::new(),
            alamat: "Sleman".into(),
            nomor_hp: "0812".into(),
            nomor_sim: "SIM-1".into(),
            pengalaman_tahun: 3,
            status: SupirStatus::Tersedia,
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("nama"));
        assert!(errors.field_errors().contains_key("nomor_hp"));
    }
}
