use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use rusqlite::{params, Connection, OptionalExtension};
use sha2::{Digest, Sha256};

use crate::errors::ServerError;

/// 7 days, matching the original's token lifetime.
const SESSION_TTL_SECS: i64 = 60 * 60 * 24 * 7;

/// The authenticated caller, loaded from a valid bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
    pub username: String,
}

/// Issue a new session and return the raw bearer token. Only the
/// SHA-256 of the token is stored.
pub fn create_session(conn: &Connection, user_id: i64, now: i64) -> Result<String, ServerError> {
    let mut raw = [0u8; 32];
    OsRng.fill_bytes(&mut raw);

    let raw_token = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(raw);
    let hash = Sha256::digest(raw_token.as_bytes());
    let expires_at = now + SESSION_TTL_SECS;

    conn.execute(
        r#"
        insert into sessions (user_id, token_hash, created_at, expires_at)
        values (?, ?, ?, ?)
        "#,
        params![user_id, hash.as_slice(), now, expires_at],
    )
    .map_err(|e| ServerError::DbError(format!("create session failed: {e}")))?;

    Ok(raw_token)
}

pub fn load_user_from_session(
    conn: &Connection,
    raw_token: &str,
    now: i64,
) -> Result<Option<AuthUser>, ServerError> {
    let hash = Sha256::digest(raw_token.as_bytes());

    conn.query_row(
        r#"
        select u.id, u.email, u.username
        from sessions s
        join users u on u.id = s.user_id
        where s.token_hash = ?
          and s.expires_at > ?
          and s.revoked_at is null
        "#,
        params![hash.as_slice(), now],
        |row| {
            Ok(AuthUser {
                id: row.get(0)?,
                email: row.get(1)?,
                username: row.get(2)?,
            })
        },
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("session lookup failed: {e}")))
}

/// Returns false when the token matched no live session.
pub fn revoke_session(conn: &Connection, raw_token: &str, now: i64) -> Result<bool, ServerError> {
    let hash = Sha256::digest(raw_token.as_bytes());

    let revoked = conn
        .execute(
            "update sessions set revoked_at = ? where token_hash = ? and revoked_at is null",
            params![now, hash.as_slice()],
        )
        .map_err(|e| ServerError::DbError(format!("revoke session failed: {e}")))?;

    Ok(revoked == 1)
}
