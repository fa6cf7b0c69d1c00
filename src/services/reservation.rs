//! Booking assembler.
//!
//! A reservation is made against exactly one product: a custom route, a
//! dropoff, a package, a facility or an out-of-town package. Custom routes and
//! dropoffs come back from the backend with their own vehicle and driver
//! lists and fixed dates; the other products need a second availability
//! lookup for the chosen date range.

use chrono::{DateTime, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::backend::{BackendClient, BackendError};
use crate::error::AppError;
use crate::model::armada::Armada;
use crate::model::booking::CreateBookingRequest;
use crate::model::supir::Supir;
use crate::model::Envelope;

pub const LOAD_FAILED: &str = "Gagal memuat data pemesanan";
pub const INCOMPLETE_PARAMS: &str = "Parameter tidak lengkap";
pub const SELECT_ARMADA_SUPIR: &str = "Silakan pilih armada dan supir terlebih dahulu";

const START_KEYS: &[&str] = &["tanggalMulaiWisata", "tanggalMulai", "tanggal"];
const END_KEYS: &[&str] = &["tanggalSelesaiWisata", "tanggalSelesai"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ProductKind {
    CustomRute,
    Dropoff,
    Paket,
    Fasilitas,
    PaketLuarKota,
}

impl ProductKind {
    /// Highest priority first.
    pub const PRIORITY: [ProductKind; 5] = [
        ProductKind::CustomRute,
        ProductKind::Dropoff,
        ProductKind::Paket,
        ProductKind::Fasilitas,
        ProductKind::PaketLuarKota,
    ];

    pub fn detail_path(self, id: i64) -> String {
        match self {
            Self::CustomRute => format!("/fasilitas/custom-rute/{id}"),
            Self::Dropoff => format!("/fasilitas/dropoff/{id}"),
            Self::Paket => format!("/paket-wisata/{id}"),
            Self::Fasilitas => format!("/fasilitas/{id}"),
            Self::PaketLuarKota => format!("/paket-wisata-luar-kota/{id}"),
        }
    }

    /// Dropoff and custom route details carry their own `armadas`/`supirs`,
    /// and their dates and participant count are fixed.
    pub fn bundles_availability(self) -> bool {
        matches!(self, Self::CustomRute | Self::Dropoff)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductRef {
    pub kind: ProductKind,
    pub id: i64,
}

/// The five mutually exclusive product ids.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductIds {
    #[serde(default)]
    pub custom_rute_id: Option<i64>,
    #[serde(default)]
    pub dropoff_id: Option<i64>,
    #[serde(default)]
    pub paket_id: Option<i64>,
    #[serde(default)]
    pub fasilitas_id: Option<i64>,
    #[serde(default)]
    pub paket_luar_kota_id: Option<i64>,
}

impl ProductIds {
    fn get(&self, kind: ProductKind) -> Option<i64> {
        match kind {
            ProductKind::CustomRute => self.custom_rute_id,
            ProductKind::Dropoff => self.dropoff_id,
            ProductKind::Paket => self.paket_id,
            ProductKind::Fasilitas => self.fasilitas_id,
            ProductKind::PaketLuarKota => self.paket_luar_kota_id,
        }
    }

    /// First id present in priority order.
    pub fn resolve(&self) -> Option<ProductRef> {
        ProductKind::PRIORITY
            .iter()
            .find_map(|&kind| self.get(kind).map(|id| ProductRef { kind, id }))
    }
}

/// Query string of the booking page. Values stay strings so that leftovers
/// such as `paketId=` or `paketId=undefined` count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftQuery {
    pub custom_rute_id: Option<String>,
    pub dropoff_id: Option<String>,
    pub paket_id: Option<String>,
    pub fasilitas_id: Option<String>,
    pub paket_luar_kota_id: Option<String>,
    pub tanggal_mulai_wisata: Option<String>,
    pub tanggal_selesai_wisata: Option<String>,
}

impl DraftQuery {
    pub fn product_ids(&self) -> Result<ProductIds, AppError> {
        Ok(ProductIds {
            custom_rute_id: parse_id(self.custom_rute_id.as_deref())?,
            dropoff_id: parse_id(self.dropoff_id.as_deref())?,
            paket_id: parse_id(self.paket_id.as_deref())?,
            fasilitas_id: parse_id(self.fasilitas_id.as_deref())?,
            paket_luar_kota_id: parse_id(self.paket_luar_kota_id.as_deref())?,
        })
    }

    pub fn dates(&self) -> Result<(Option<NaiveDate>, Option<NaiveDate>), AppError> {
        Ok((
            parse_optional_date(self.tanggal_mulai_wisata.as_deref())?,
            parse_optional_date(self.tanggal_selesai_wisata.as_deref())?,
        ))
    }
}

fn is_blank(raw: &str) -> bool {
    let raw = raw.trim();
    raw.is_empty() || raw == "undefined" || raw == "null"
}

fn parse_id(raw: Option<&str>) -> Result<Option<i64>, AppError> {
    match raw {
        Some(value) if !is_blank(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| AppError::validation(format!("Parameter id tidak valid: {value}"))),
        _ => Ok(None),
    }
}

/// Accepts `2024-01-10` as well as full timestamps such as
/// `2024-01-10T00:00:00.000Z`.
pub fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .map_err(|_| AppError::validation(format!("Format tanggal tidak valid: {raw}")))
}

fn parse_optional_date(raw: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match raw {
        Some(value) if !is_blank(value) => parse_date(value).map(Some),
        _ => Ok(None),
    }
}

// midnight UTC with milliseconds, as the backend stores dates
pub fn format_booking_date(date: NaiveDate) -> String {
    format!("{}T00:00:00.000Z", date.format("%Y-%m-%d"))
}

/// Date range used for the availability lookup. When `start >= end` the end
/// moves to the day after `start`.
pub fn availability_window(start: NaiveDate, end: NaiveDate) -> (NaiveDate, NaiveDate) {
    if start >= end {
        (start, start + Duration::days(1))
    } else {
        (start, end)
    }
}

/// Everything the booking page needs to render its form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDraft {
    pub product: ProductKind,
    pub product_id: i64,
    pub detail: Map<String, Value>,
    pub armadas: Vec<Armada>,
    pub supirs: Vec<Supir>,
    /// False for dropoff/custom route: dates and participants are read-only
    pub editable: bool,
    pub availability_checked: bool,
    pub tanggal_mulai_wisata: Option<String>,
    pub tanggal_selesai_wisata: Option<String>,
    pub jumlah_peserta: Option<u32>,
}

fn first_date(detail: &Map<String, Value>, keys: &[&str]) -> Option<NaiveDate> {
    keys.iter()
        .filter_map(|key| detail.get(*key).and_then(Value::as_str))
        .find_map(|raw| parse_date(raw).ok())
}

fn take_list<T: serde::de::DeserializeOwned>(
    detail: &mut Map<String, Value>,
    key: &str,
) -> Result<Vec<T>, AppError> {
    match detail.remove(key) {
        Some(Value::Null) | None => Ok(Vec::new()),
        Some(value) => serde_json::from_value(value)
            .map_err(|e| AppError::unavailable(BackendError::Decode(e.to_string()), LOAD_FAILED)),
    }
}

#[derive(Serialize)]
struct WindowQuery {
    start: String,
    end: String,
}

pub async fn fetch_availability(
    backend: &BackendClient,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<(Vec<Armada>, Vec<Supir>), AppError> {
    let (start, end) = availability_window(start, end);
    let query = WindowQuery {
        start: format_booking_date(start),
        end: format_booking_date(end),
    };

    let (armadas, supirs) = tokio::try_join!(
        backend.get_query::<Envelope<Vec<Armada>>, _>("/armada/available-armada", &query),
        backend.get_query::<Envelope<Vec<Supir>>, _>("/supir/available-supir", &query),
    )
    .map_err(|e| AppError::unavailable(e, LOAD_FAILED))?;

    Ok((armadas.data, supirs.data))
}

async fn fetch_detail(
    backend: &BackendClient,
    product: ProductRef,
) -> Result<Map<String, Value>, AppError> {
    let path = product.kind.detail_path(product.id);
    tracing::debug!(kind = ?product.kind, id = product.id, %path, "loading reservation product");

    backend
        .get::<Envelope<Map<String, Value>>>(&path)
        .await
        .map(|envelope| envelope.data)
        .map_err(|e| AppError::unavailable(e, LOAD_FAILED))
}

fn peserta_of(detail: &Map<String, Value>) -> Option<u32> {
    detail
        .get("jumlahPeserta")
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
}

/// Load the product detail and, where needed, the availability for the date
/// range. `requested` are the dates from the query string.
pub async fn build_draft(
    backend: &BackendClient,
    product: ProductRef,
    requested: (Option<NaiveDate>, Option<NaiveDate>),
) -> Result<ReservationDraft, AppError> {
    let mut detail = fetch_detail(backend, product).await?;
    let jumlah_peserta = peserta_of(&detail);

    if product.kind.bundles_availability() {
        let armadas = take_list(&mut detail, "armadas")?;
        let supirs = take_list(&mut detail, "supirs")?;
        let start = first_date(&detail, START_KEYS);
        // one-way services often carry a single date
        let end = first_date(&detail, END_KEYS).or(start);

        return Ok(ReservationDraft {
            product: product.kind,
            product_id: product.id,
            detail,
            armadas,
            supirs,
            editable: false,
            availability_checked: true,
            tanggal_mulai_wisata: start.map(format_booking_date),
            tanggal_selesai_wisata: end.map(format_booking_date),
            jumlah_peserta,
        });
    }

    let start = requested.0.or_else(|| first_date(&detail, START_KEYS));
    let end = requested.1.or_else(|| first_date(&detail, END_KEYS));

    let (armadas, supirs, checked) = match (start, end) {
        (Some(start), Some(end)) => {
            let (armadas, supirs) = fetch_availability(backend, start, end).await?;
            (armadas, supirs, true)
        }
        _ => (Vec::new(), Vec::new(), false),
    };

    Ok(ReservationDraft {
        product: product.kind,
        product_id: product.id,
        detail,
        armadas,
        supirs,
        editable: true,
        availability_checked: checked,
        tanggal_mulai_wisata: start.map(format_booking_date),
        tanggal_selesai_wisata: end.map(format_booking_date),
        jumlah_peserta,
    })
}

/// Body of the booking form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReservation {
    #[serde(default)]
    pub custom_rute_id: Option<i64>,
    #[serde(default)]
    pub dropoff_id: Option<i64>,
    #[serde(default)]
    pub paket_id: Option<i64>,
    #[serde(default)]
    pub fasilitas_id: Option<i64>,
    #[serde(default)]
    pub paket_luar_kota_id: Option<i64>,
    #[serde(default)]
    pub armada_id: Option<i64>,
    /// `Some(0)` is a valid selection
    #[serde(default)]
    pub supir_id: Option<i64>,
    #[serde(default)]
    pub jumlah_peserta: Option<u32>,
    #[serde(default)]
    pub tanggal_mulai_wisata: Option<String>,
    #[serde(default)]
    pub tanggal_selesai_wisata: Option<String>,
    #[serde(default)]
    pub catatan: Option<String>,
}

impl SubmitReservation {
    pub fn product_ids(&self) -> ProductIds {
        ProductIds {
            custom_rute_id: self.custom_rute_id,
            dropoff_id: self.dropoff_id,
            paket_id: self.paket_id,
            fasilitas_id: self.fasilitas_id,
            paket_luar_kota_id: self.paket_luar_kota_id,
        }
    }
}

fn require_selection(form: &SubmitReservation) -> Result<(ProductRef, i64, i64), AppError> {
    let product = form
        .product_ids()
        .resolve()
        .ok_or_else(|| AppError::validation(INCOMPLETE_PARAMS))?;

    let (Some(armada_id), Some(supir_id)) = (form.armada_id, form.supir_id) else {
        return Err(AppError::validation(SELECT_ARMADA_SUPIR));
    };
    Ok((product, armada_id, supir_id))
}

impl SubmitReservation {
    // tanggal dan jumlah peserta dropoff/custom rute ikut produk
    fn apply_fixed_terms(&mut self, detail: &Map<String, Value>) {
        let start = first_date(detail, START_KEYS);
        let end = first_date(detail, END_KEYS).or(start);
        if let Some(start) = start {
            self.tanggal_mulai_wisata = Some(format_booking_date(start));
        }
        if let Some(end) = end {
            self.tanggal_selesai_wisata = Some(format_booking_date(end));
        }
        if let Some(peserta) = peserta_of(detail) {
            self.jumlah_peserta = Some(peserta);
        }
    }
}

/// Turn the form into the backend request. Fails without a product, without
/// a vehicle or driver, or without dates.
pub fn build_booking_request(form: &SubmitReservation) -> Result<CreateBookingRequest, AppError> {
    let (product, armada_id, supir_id) = require_selection(form)?;

    let start = parse_optional_date(form.tanggal_mulai_wisata.as_deref())?;
    let end = parse_optional_date(form.tanggal_selesai_wisata.as_deref())?;
    let (Some(start), Some(end)) = (start, end) else {
        return Err(AppError::validation("Tanggal wisata wajib diisi"));
    };

    let jumlah_peserta = form.jumlah_peserta.unwrap_or(1);
    if jumlah_peserta == 0 {
        return Err(AppError::validation("Jumlah peserta minimal 1"));
    }

    let only = |kind: ProductKind| (product.kind == kind).then_some(product.id);

    Ok(CreateBookingRequest {
        custom_rute_id: only(ProductKind::CustomRute),
        dropoff_id: only(ProductKind::Dropoff),
        paket_id: only(ProductKind::Paket),
        fasilitas_id: only(ProductKind::Fasilitas),
        paket_luar_kota_id: only(ProductKind::PaketLuarKota),
        armada_id,
        supir_id,
        jumlah_peserta,
        tanggal_mulai_wisata: format_booking_date(start),
        tanggal_selesai_wisata: format_booking_date(end),
        catatan: form
            .catatan
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string),
    })
}

pub async fn submit(backend: &BackendClient, form: &SubmitReservation) -> Result<Value, AppError> {
    let (product, _, _) = require_selection(form)?;

    let mut form = form.clone();
    if product.kind.bundles_availability() {
        let detail = fetch_detail(backend, product).await?;
        form.apply_fixed_terms(&detail);
    }

    let request = build_booking_request(&form)?;
    tracing::info!(
        armada_id = request.armada_id,
        supir_id = request.supir_id,
        start = %request.tanggal_mulai_wisata,
        "submitting booking"
    );
    let created: Envelope<Value> = backend.post("/booking", &request).await?;
    Ok(created.data)
}
