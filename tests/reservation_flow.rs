mod common;

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use common::{body_json, call, get, send_json, token, MockBackend};

fn armada(id: i64) -> Value {
    json!({
        "id": id,
        "jenisMobil": "Hiace",
        "merkMobil": "Toyota",
        "platNomor": "AB 1234 CD",
        "kapasitas": 14,
        "tahunKendaraan": 2021,
        "status": "tersedia"
    })
}

fn supir(id: i64) -> Value {
    json!({
        "id": id,
        "nama": "Pak Budi",
        "alamat": "Sleman",
        "nomorHp": "081234567890",
        "nomorSim": "SIM-001",
        "status": "tersedia"
    })
}

#[tokio::test]
async fn package_draft_loads_detail_then_availability() {
    let backend = MockBackend::new()
        .json(
            "GET /paket-wisata/5",
            json!({"data": {"id": 5, "namaPaket": "Jogja Heritage", "harga": "750000"}}),
        )
        .json("GET /armada/available-armada", json!({"data": [armada(3)]}))
        .json("GET /supir/available-supir", json!({"data": [supir(0)]}))
        .start()
        .await;

    let response = call(
        backend.portal(),
        get(
            "/api/reservasi/draft?paketId=5&tanggalMulaiWisata=2024-01-10&tanggalSelesaiWisata=2024-01-12",
            Some(&token("user")),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["product"], "paket");
    assert_eq!(body["data"]["editable"], true);
    assert_eq!(body["data"]["armadas"][0]["id"], 3);
    assert_eq!(body["data"]["supirs"][0]["id"], 0);
    assert_eq!(body["data"]["tanggalMulaiWisata"], "2024-01-10T00:00:00.000Z");

    let armada_calls = backend.calls_to(Method::GET, "/armada/available-armada");
    assert_eq!(armada_calls.len(), 1);
    let query = armada_calls[0].query.clone().unwrap_or_default();
    assert!(query.contains("start=2024-01-10T00%3A00%3A00.000Z"), "{query}");
    assert!(query.contains("end=2024-01-12T00%3A00%3A00.000Z"), "{query}");
    assert_eq!(backend.calls_to(Method::GET, "/supir/available-supir").len(), 1);
}

#[tokio::test]
async fn same_day_window_is_widened_for_lookup() {
    let backend = MockBackend::new()
        .json("GET /paket-wisata/5", json!({"data": {"id": 5}}))
        .json("GET /armada/available-armada", json!({"data": []}))
        .json("GET /supir/available-supir", json!({"data": []}))
        .start()
        .await;

    let response = call(
        backend.portal(),
        get(
            "/api/reservasi/draft?paketId=5&tanggalMulaiWisata=2024-01-10&tanggalSelesaiWisata=2024-01-10",
            Some(&token("user")),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    // what the user picked is kept as is
    assert_eq!(body["data"]["tanggalSelesaiWisata"], "2024-01-10T00:00:00.000Z");
    let query = backend.calls_to(Method::GET, "/supir/available-supir")[0]
        .query
        .clone()
        .unwrap_or_default();
    assert!(query.contains("end=2024-01-11T00%3A00%3A00.000Z"), "{query}");
}

#[tokio::test]
async fn draft_without_product_is_rejected_locally() {
    let backend = MockBackend::new().start().await;

    let response = call(
        backend.portal(),
        get("/api/reservasi/draft?paketId=undefined", Some(&token("user"))),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Parameter tidak lengkap");
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn custom_route_wins_over_package() {
    let backend = MockBackend::new()
        .json(
            "GET /fasilitas/custom-rute/9",
            json!({"data": {"id": 9, "tanggalMulai": "2024-02-01", "armadas": [armada(1)], "supirs": [supir(2)]}}),
        )
        .start()
        .await;

    let response = call(
        backend.portal(),
        get("/api/reservasi/draft?paketId=5&customRuteId=9", Some(&token("user"))),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["product"], "customRute");
    assert!(backend.calls_to(Method::GET, "/paket-wisata/5").is_empty());
}

#[tokio::test]
async fn dropoff_draft_is_read_only_and_skips_availability() {
    let backend = MockBackend::new()
        .json(
            "GET /fasilitas/dropoff/2",
            json!({"data": {
                "id": 2,
                "tanggalMulai": "2024-03-01",
                "jumlahPeserta": 4,
                "armadas": [armada(7)],
                "supirs": [supir(8)]
            }}),
        )
        .start()
        .await;

    let response = call(
        backend.portal(),
        get("/api/reservasi/draft?dropoffId=2", Some(&token("user"))),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["editable"], false);
    assert_eq!(body["data"]["jumlahPeserta"], 4);
    assert_eq!(body["data"]["armadas"][0]["id"], 7);
    assert_eq!(body["data"]["tanggalSelesaiWisata"], "2024-03-01T00:00:00.000Z");
    assert!(backend.calls_to(Method::GET, "/armada/available-armada").is_empty());
    assert_eq!(backend.calls().len(), 1);
}

#[tokio::test]
async fn failed_detail_load_shows_generic_message() {
    let backend = MockBackend::new()
        .status(
            "GET /paket-wisata/5",
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"message": "db down"}),
        )
        .start()
        .await;

    let response = call(
        backend.portal(),
        get("/api/reservasi/draft?paketId=5", Some(&token("user"))),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Gagal memuat data pemesanan");
}

#[tokio::test]
async fn submit_sends_only_the_chosen_product() {
    let backend = MockBackend::new()
        .json("POST /booking", json!({"data": {"id": 101, "status": "pending"}}))
        .start()
        .await;

    let response = call(
        backend.portal(),
        send_json(
            Method::POST,
            "/api/reservasi",
            Some(&token("user")),
            json!({
                "paketId": 5,
                "armadaId": 3,
                "supirId": 0,
                "jumlahPeserta": 2,
                "tanggalMulaiWisata": "2024-01-10",
                "tanggalSelesaiWisata": "2024-01-12",
                "catatan": "  "
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let posted = backend.calls_to(Method::POST, "/booking");
    assert_eq!(posted.len(), 1);
    let sent = &posted[0].body;
    assert_eq!(sent["paketId"], 5);
    assert_eq!(sent["armadaId"], 3);
    assert_eq!(sent["supirId"], 0);
    assert_eq!(sent["jumlahPeserta"], 2);
    assert_eq!(sent["tanggalMulaiWisata"], "2024-01-10T00:00:00.000Z");
    assert_eq!(sent["tanggalSelesaiWisata"], "2024-01-12T00:00:00.000Z");
    assert!(sent.get("dropoffId").is_none());
    assert!(sent.get("fasilitasId").is_none());
    assert!(sent.get("catatan").is_none());
}

#[tokio::test]
async fn submit_without_driver_never_reaches_backend() {
    let backend = MockBackend::new().start().await;

    let response = call(
        backend.portal(),
        send_json(
            Method::POST,
            "/api/reservasi",
            Some(&token("user")),
            json!({
                "paketId": 5,
                "armadaId": 3,
                "tanggalMulaiWisata": "2024-01-10",
                "tanggalSelesaiWisata": "2024-01-12"
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Silakan pilih armada dan supir terlebih dahulu");
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn second_reschedule_request_is_refused() {
    let backend = MockBackend::new()
        .json(
            "GET /booking/31",
            json!({"data": {
                "id": 31,
                "userId": 1,
                "tanggalMulaiWisata": "2030-01-10T00:00:00.000Z",
                "tanggalSelesaiWisata": "2030-01-12T00:00:00.000Z",
                "jumlahPeserta": 2,
                "status": "confirmed",
                "reschedules": [{
                    "id": 2,
                    "bookingId": 31,
                    "tanggalBaru": "2030-01-20T00:00:00.000Z",
                    "alasan": "Keluarga sakit",
                    "status": "pending"
                }]
            }}),
        )
        .start()
        .await;

    let response = call(
        backend.portal(),
        send_json(
            Method::POST,
            "/api/reservasi/31/reschedule",
            Some(&token("user")),
            json!({"tanggalBaru": "2030-02-01", "alasan": "Pindah jadwal cuti"}),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(backend.calls_to(Method::POST, "/booking/31/reschedule").is_empty());
}

#[tokio::test]
async fn dropoff_submit_keeps_the_product_terms() {
    let backend = MockBackend::new()
        .json(
            "GET /fasilitas/dropoff/2",
            json!({"data": {
                "id": 2,
                "tanggalMulai": "2024-03-01",
                "jumlahPeserta": 4,
                "armadas": [armada(3)],
                "supirs": [supir(7)]
            }}),
        )
        .json("POST /booking", json!({"data": {"id": 55, "status": "pending_payment"}}))
        .start()
        .await;

    let response = call(
        backend.portal(),
        send_json(
            Method::POST,
            "/api/reservasi",
            Some(&token("user")),
            json!({
                "dropoffId": 2,
                "armadaId": 3,
                "supirId": 7,
                "jumlahPeserta": 40,
                "tanggalMulaiWisata": "2025-12-24",
                "tanggalSelesaiWisata": "2025-12-26"
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(backend.calls_to(Method::GET, "/fasilitas/dropoff/2").len(), 1);
    let posted = backend.calls_to(Method::POST, "/booking");
    assert_eq!(posted.len(), 1);
    let sent = &posted[0].body;
    assert_eq!(sent["dropoffId"], 2);
    assert_eq!(sent["jumlahPeserta"], 4);
    assert_eq!(sent["tanggalMulaiWisata"], "2024-03-01T00:00:00.000Z");
    assert_eq!(sent["tanggalSelesaiWisata"], "2024-03-01T00:00:00.000Z");
}
