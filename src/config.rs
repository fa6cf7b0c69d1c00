//! Portal configuration, read once from the environment at start-up.

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

use crate::services::images::MAX_FILES_PER_UPLOAD;

const DEFAULT_BACKEND_URL: &str = "http://localhost:3001";
const DEFAULT_ADDR: &str = "127.0.0.1:8000";
const DEFAULT_STATIC_DIR: &str = "../fe/dist";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} is not a valid number: {value}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("PORTAL_ADDR is not a valid socket address: {0}")]
    InvalidAddr(String),

    #[error("backend URL must start with http:// or https://: {0}")]
    InvalidBackendUrl(String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the booking backend, without trailing slash
    pub backend_url: String,
    pub addr: SocketAddr,
    pub static_dir: String,
    pub request_timeout: Duration,
    /// Per-image size ceiling in bytes
    pub max_upload_bytes: usize,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // NEXT_PUBLIC_API_URL is what the old front-end used, keep honouring it
        let backend_url = lookup("BACKEND_API_URL")
            .or_else(|| lookup("NEXT_PUBLIC_API_URL"))
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        let backend_url = backend_url.trim().trim_end_matches('/').to_string();
        if !backend_url.starts_with("http://") && !backend_url.starts_with("https://") {
            return Err(ConfigError::InvalidBackendUrl(backend_url));
        }

        let addr_raw = lookup("PORTAL_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_raw
            .parse()
            .map_err(|_| ConfigError::InvalidAddr(addr_raw.clone()))?;

        let timeout_secs = parse_number(&lookup, "REQUEST_TIMEOUT_SECS", 30)?;
        let max_upload_mb = parse_number(&lookup, "MAX_UPLOAD_MB", 5)?;
        let max_upload_bytes = upload_bytes(max_upload_mb).ok_or_else(|| {
            ConfigError::InvalidNumber {
                name: "MAX_UPLOAD_MB",
                value: max_upload_mb.to_string(),
            }
        })?;

        Ok(Self {
            backend_url,
            addr,
            static_dir: lookup("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
            request_timeout: Duration::from_secs(timeout_secs),
            max_upload_bytes,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_dir: lookup("LOG_DIR").filter(|v| !v.is_empty()),
        })
    }
}

// a full gallery upload must still fit in usize
fn upload_bytes(mb: u64) -> Option<usize> {
    let bytes = usize::try_from(mb).ok()?.checked_mul(1024 * 1024)?;
    bytes.checked_mul(MAX_FILES_PER_UPLOAD + 1)?;
    Some(bytes)
}

fn parse_number<F>(lookup: &F, name: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.backend_url, "http://localhost:3001");
        assert_eq!(config.addr.to_string(), "127.0.0.1:8000");
        assert_eq!(config.max_upload_bytes, 5 * 1024 * 1024);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn backend_url_prefers_new_name_and_trims_slash() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("BACKEND_API_URL", "https://api.example.id/"),
            ("NEXT_PUBLIC_API_URL", "http://old:3001"),
        ]))
        .unwrap();
        assert_eq!(config.backend_url, "https://api.example.id");

        let legacy =
            AppConfig::from_lookup(lookup_from(&[("NEXT_PUBLIC_API_URL", "http://old:3001")]))
                .unwrap();
        assert_eq!(legacy.backend_url, "http://old:3001");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            AppConfig::from_lookup(lookup_from(&[("MAX_UPLOAD_MB", "lima")])),
            Err(ConfigError::InvalidNumber { name: "MAX_UPLOAD_MB", .. })
        ));
        assert!(matches!(
            AppConfig::from_lookup(lookup_from(&[("MAX_UPLOAD_MB", "18446744073709551615")])),
            Err(ConfigError::InvalidNumber { name: "MAX_UPLOAD_MB", .. })
        ));
        assert!(matches!(
            AppConfig::from_lookup(lookup_from(&[("PORTAL_ADDR", "localhost")])),
            Err(ConfigError::InvalidAddr(_))
        ));
        assert!(matches!(
            AppConfig::from_lookup(lookup_from(&[("BACKEND_API_URL", "localhost:3001")])),
            Err(ConfigError::InvalidBackendUrl(_))
        ));
    }
}
