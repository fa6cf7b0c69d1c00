#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::{to_bytes, Body, Bytes};
use axum::extract::State;
use axum::http::{Method, Request, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;

use portal::config::AppConfig;
use portal::state::AppState;

/// One request as seen by the fake backend.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

#[derive(Clone, Default)]
struct Shared {
    calls: Arc<Mutex<Vec<Recorded>>>,
    replies: Arc<HashMap<String, (StatusCode, Reply)>>,
}

#[derive(Clone)]
enum Reply {
    Json(Value),
    Bytes(&'static str, Vec<u8>),
}

/// Canned answers keyed by `"METHOD /path"`; anything else gets a 404.
#[derive(Default)]
pub struct MockBackend {
    replies: HashMap<String, (StatusCode, Reply)>,
}

pub struct RunningBackend {
    pub url: String,
    calls: Arc<Mutex<Vec<Recorded>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(mut self, route: &str, body: Value) -> Self {
        self.replies
            .insert(route.to_string(), (StatusCode::OK, Reply::Json(body)));
        self
    }

    pub fn status(mut self, route: &str, status: StatusCode, body: Value) -> Self {
        self.replies
            .insert(route.to_string(), (status, Reply::Json(body)));
        self
    }

    pub fn bytes(mut self, route: &str, content_type: &'static str, bytes: &[u8]) -> Self {
        self.replies.insert(
            route.to_string(),
            (StatusCode::OK, Reply::Bytes(content_type, bytes.to_vec())),
        );
        self
    }

    pub async fn start(self) -> RunningBackend {
        let shared = Shared {
            calls: Arc::default(),
            replies: Arc::new(self.replies),
        };
        let calls = shared.calls.clone();
        let app = Router::new().fallback(handle).with_state(shared);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        RunningBackend {
            url: format!("http://{addr}"),
            calls,
        }
    }
}

async fn handle(
    State(shared): State<Shared>,
    method: Method,
    uri: Uri,
    headers: axum::http::HeaderMap,
    body: Bytes,
) -> Response {
    let header = |name: axum::http::header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let recorded = Recorded {
        method: method.clone(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: header(axum::http::header::AUTHORIZATION),
        content_type: header(axum::http::header::CONTENT_TYPE),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    };
    shared.calls.lock().unwrap().push(recorded);

    let key = format!("{method} {}", uri.path());
    match shared.replies.get(&key) {
        Some((status, Reply::Json(body))) => (*status, axum::Json(body.clone())).into_response(),
        Some((status, Reply::Bytes(content_type, bytes))) => (
            *status,
            [(axum::http::header::CONTENT_TYPE, *content_type)],
            bytes.clone(),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            axum::Json(json!({"message": format!("no route {key}")})),
        )
            .into_response(),
    }
}

impl RunningBackend {
    pub fn calls(&self) -> Vec<Recorded> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, method: Method, path: &str) -> Vec<Recorded> {
        self.calls()
            .into_iter()
            .filter(|c| c.method == method && c.path == path)
            .collect()
    }

    /// The portal wired to this backend.
    pub fn portal(&self) -> Router {
        let url = self.url.clone();
        let config = AppConfig::from_lookup(move |key| match key {
            "BACKEND_API_URL" => Some(url.clone()),
            "STATIC_DIR" => Some("tests/no-static".to_string()),
            _ => None,
        })
        .unwrap();
        portal::app(AppState::new(config).unwrap())
    }
}

fn sign(claims: Value) -> String {
    encode(&Header::default(), &claims, &EncodingKey::from_secret(b"backend-secret")).unwrap()
}

/// Backend-issued JWT with the given role, valid for an hour.
pub fn token(role: &str) -> String {
    let exp = chrono::Utc::now().timestamp() + 3600;
    sign(json!({"sub": 1, "email": "tester@wisata.id", "role": role, "exp": exp}))
}

pub fn expired_token() -> String {
    sign(json!({"sub": 1, "role": "admin", "exp": 1}))
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    request(Method::GET, uri, token, Body::empty(), None)
}

pub fn send_json(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    request(
        method,
        uri,
        token,
        Body::from(body.to_string()),
        Some("application/json"),
    )
}

pub fn request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Body,
    content_type: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    builder.body(body).unwrap()
}

pub async fn call(app: Router, req: Request<Body>) -> Response {
    app.oneshot(req).await.unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
}
