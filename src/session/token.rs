use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no session token")]
    Missing,

    #[error("malformed session token: {0}")]
    Malformed(String),

    #[error("session token expired")]
    Expired,

    #[error("role {0} may not open the admin area")]
    NotAdmin(String),

    #[error("backend rejected the session: {0}")]
    Rejected(String),
}

/// Payload of the backend-issued JWT. Only the fields the portal reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id; numeric or string depending on the backend version
    #[serde(default)]
    pub sub: Option<Value>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default = "default_role")]
    pub role: String,
    /// Expiry, seconds since the epoch
    pub exp: i64,
}

fn default_role() -> String {
    "user".to_string()
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role.eq_ignore_ascii_case("admin")
    }
}

/// Decode the JWT payload without verifying the signature. The backend
/// verifies the signature on every call; the portal only needs role and expiry.
pub fn decode_claims(token: &str) -> Result<Claims, SessionError> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = true;
    validation.leeway = 0;

    decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => SessionError::Expired,
            _ => SessionError::Malformed(e.to_string()),
        })
}

/// A decoded, unexpired session.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub claims: Claims,
}

impl Session {
    pub fn check(token: Option<&str>, now: i64) -> Result<Self, SessionError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(SessionError::Missing)?;
        let claims = decode_claims(token)?;
        // exp == now counts as expired
        if claims.exp <= now {
            return Err(SessionError::Expired);
        }
        Ok(Self {
            token: token.to_string(),
            claims,
        })
    }

    /// Seconds left before the token expires.
    pub fn remaining(&self, now: i64) -> i64 {
        (self.claims.exp - now).max(0)
    }
}
