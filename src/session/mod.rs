//! Session handling shared by every guarded route: the bearer token is
//! decoded locally for role and expiry; a failed check sends the caller to
//! `/login`.

mod cookie;
mod guard;
mod token;

pub use cookie::{clear_session_cookie, session_cookie, token_from_headers, TOKEN_COOKIE};
pub use guard::{require_admin, require_session};
pub use token::{decode_claims, Claims, Session, SessionError};
