pub mod passwords;
pub mod sessions;

pub use sessions::AuthUser;

use astra::Request;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::db::Database;
use crate::errors::ServerError;

pub fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// Trim + lowercase, minimal sanity check.
pub fn normalize_email(email: &str) -> Result<String, ServerError> {
    let e = email.trim().to_lowercase();
    if e.is_empty() || !e.contains('@') || e.starts_with('@') || e.ends_with('@') {
        return Err(ServerError::BadRequest("Invalid email address.".into()));
    }
    Ok(e)
}

pub fn bearer_token(req: &Request) -> Option<&str> {
    let header = req.headers().get("Authorization")?.to_str().ok()?;
    header.strip_prefix("Bearer ").map(str::trim)
}

/// Resolve the Authorization header to a live session, or fail with 401.
pub fn require_user(req: &Request, db: &Database) -> Result<AuthUser, ServerError> {
    let token = bearer_token(req)
        .ok_or_else(|| ServerError::Unauthorized("Missing bearer token".into()))?;

    let now = now_unix();
    db.with_conn(|conn| sessions::load_user_from_session(conn, token, now))?
        .ok_or_else(|| ServerError::Unauthorized("Invalid or expired token".into()))
}
