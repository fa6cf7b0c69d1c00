use std::sync::Arc;

use crate::backend::{BackendClient, BackendError};
use crate::config::AppConfig;
use crate::session::Session;

/// Shared by every handler through an `Extension` layer.
#[derive(Debug, Clone)]
pub struct AppState {
    pub backend: BackendClient,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, BackendError> {
        let backend = BackendClient::new(&config.backend_url, config.request_timeout)?;
        Ok(Self {
            backend,
            config: Arc::new(config),
        })
    }

    /// Backend client acting on behalf of the session's user.
    pub fn backend_for(&self, session: &Session) -> BackendClient {
        self.backend.bearer(&session.token)
    }
}
