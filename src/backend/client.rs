use std::time::Duration;

use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::BackendError;

pub type BackendResult<T> = Result<T, BackendError>;

/// HTTP client for the booking backend.
///
/// Cloning is cheap; `bearer` hands out a copy that sends the caller's token.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

/// Raw body plus its content type, used for file downloads.
#[derive(Debug)]
pub struct Download {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> BackendResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Copy of this client that authenticates as `token`.
    pub fn bearer(&self, token: &str) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: Some(token.to_string()),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut req = self.client.request(method, url);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        req
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> BackendResult<T> {
        let response = send(self.request(Method::GET, path)).await?;
        decode(response).await
    }

    pub async fn get_query<T, Q>(&self, path: &str, query: &Q) -> BackendResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = send(self.request(Method::GET, path).query(query)).await?;
        decode(response).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> BackendResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = send(self.request(Method::POST, path).json(body)).await?;
        decode(response).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> BackendResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = send(self.request(Method::PUT, path).json(body)).await?;
        decode(response).await
    }

    pub async fn patch<T, B>(&self, path: &str, body: &B) -> BackendResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = send(self.request(Method::PATCH, path).json(body)).await?;
        decode(response).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> BackendResult<T> {
        let response = send(self.request(Method::DELETE, path)).await?;
        decode(response).await
    }

    pub async fn delete_query<T, Q>(&self, path: &str, query: &Q) -> BackendResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = send(self.request(Method::DELETE, path).query(query)).await?;
        decode(response).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> BackendResult<T> {
        let response = send(self.request(Method::POST, path).multipart(form)).await?;
        decode(response).await
    }

    pub async fn get_bytes<Q>(&self, path: &str, query: &Q) -> BackendResult<Download>
    where
        Q: Serialize + ?Sized,
    {
        let response = send(self.request(Method::GET, path).query(query)).await?;
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?.to_vec();
        Ok(Download { content_type, bytes })
    }
}

async fn send(request: RequestBuilder) -> BackendResult<Response> {
    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().path().to_string();
    let body = response.text().await.unwrap_or_default();
    let err = BackendError::from_status(status, &body);
    tracing::warn!(%status, path = %url, error = %err, "backend request failed");
    Err(err)
}

// body kosong (204, DELETE) dibaca sebagai null
async fn decode<T: DeserializeOwned>(response: Response) -> BackendResult<T> {
    let bytes = response.bytes().await?;
    let slice: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        &bytes
    };
    serde_json::from_slice(slice).map_err(|e| BackendError::Decode(e.to_string()))
}
