use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    PendingPayment,
    WaitingApproval,
    Confirmed,
    Cancelled,
    Expired,
    Refunded,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RescheduleStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reschedule {
    pub id: i64,
    pub booking_id: i64,
    pub tanggal_baru: DateTime<Utc>,
    pub alasan: String,
    pub status: RescheduleStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    #[serde(default)]
    pub kode_booking: Option<String>,
    pub user_id: i64,
    #[serde(default)]
    pub paket_id: Option<i64>,
    #[serde(default)]
    pub fasilitas_id: Option<i64>,
    #[serde(default)]
    pub paket_luar_kota_id: Option<i64>,
    #[serde(default)]
    pub custom_rute_id: Option<i64>,
    #[serde(default)]
    pub dropoff_id: Option<i64>,
    #[serde(default)]
    pub supir_id: Option<i64>,
    #[serde(default)]
    pub armada_id: Option<i64>,
    pub tanggal_mulai_wisata: DateTime<Utc>,
    pub tanggal_selesai_wisata: DateTime<Utc>,
    pub jumlah_peserta: u32,
    #[serde(default)]
    pub estimasi_harga: Option<Decimal>,
    #[serde(default)]
    pub catatan: Option<String>,
    pub status: BookingStatus,
    #[serde(default)]
    pub reschedules: Vec<Reschedule>,
}

impl Booking {
    pub fn pending_reschedule(&self) -> Option<&Reschedule> {
        self.reschedules
            .iter()
            .find(|r| r.status == RescheduleStatus::Pending)
    }
}

/// Body of `POST /booking`. Exactly one product id is set; the rest are
/// left out of the JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_rute_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropoff_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paket_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fasilitas_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paket_luar_kota_id: Option<i64>,
    pub armada_id: i64,
    pub supir_id: i64,
    pub jumlah_peserta: u32,
    pub tanggal_mulai_wisata: String,
    pub tanggal_selesai_wisata: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catatan: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub armada_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supir_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 60, message = "Jumlah peserta harus antara 1 dan 60"))]
    pub jumlah_peserta: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tanggal_mulai_wisata: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tanggal_selesai_wisata: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500, message = "Catatan maksimal 500 karakter"))]
    pub catatan: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingStatusUpdate {
    pub status: BookingStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleDecision {
    pub status: RescheduleStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleRequest {
    pub tanggal_baru: NaiveDate,
    #[validate(length(min = 5, max = 500, message = "Alasan reschedule minimal 5 karakter"))]
    pub alasan: String,
}
