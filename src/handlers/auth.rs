use serde::Deserialize;
use serde_json::json;

use crate::auth::{self, passwords, sessions};
use crate::db::{users, Database};
use crate::errors::ServerError;
use crate::responses::{created_response, json_response, ResultResp};

const MIN_USERNAME_CHARS: usize = 3;
const MIN_PASSWORD_CHARS: usize = 8;

#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /api/v1/auth/register
pub fn register(db: &Database, body: &RegisterBody) -> ResultResp {
    let email = auth::normalize_email(&body.email)?;

    let username = body.username.trim();
    if username.chars().count() < MIN_USERNAME_CHARS {
        return Err(ServerError::BadRequest(format!(
            "Username must be at least {MIN_USERNAME_CHARS} characters."
        )));
    }
    if body.password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(ServerError::BadRequest(format!(
            "Password must be at least {MIN_PASSWORD_CHARS} characters."
        )));
    }

    let (salt, hash) = passwords::hash_password(&body.password);
    let now = auth::now_unix();

    let user = db.with_conn(|conn| {
        if users::email_or_username_taken(conn, &email, username)? {
            return Err(ServerError::BadRequest(
                "Email or username already registered.".into(),
            ));
        }
        users::create_user(conn, &email, username, &hash, &salt, now)
    })?;

    created_response(&json!({ "user": user }))
}

/// POST /api/v1/auth/login
pub fn login(db: &Database, body: &LoginBody) -> ResultResp {
    let email = auth::normalize_email(&body.email)
        .map_err(|_| ServerError::Unauthorized("Invalid email or password.".into()))?;
    let now = auth::now_unix();

    let (token, user) = db.with_conn(|conn| {
        let Some(row) = users::find_auth_by_email(conn, &email)? else {
            return Err(ServerError::Unauthorized("Invalid email or password.".into()));
        };
        if !passwords::verify_password(&body.password, &row.password_salt, &row.password_hash) {
            return Err(ServerError::Unauthorized("Invalid email or password.".into()));
        }

        let token = sessions::create_session(conn, row.user.id, now)?;
        Ok((token, row.user))
    })?;

    json_response(&json!({ "token": token, "user": user }))
}

/// POST /api/v1/auth/logout — the router has already authenticated the
/// token; revoking it ends the session.
pub fn logout(db: &Database, raw_token: &str) -> ResultResp {
    let now = auth::now_unix();
    db.with_conn(|conn| sessions::revoke_session(conn, raw_token, now))?;
    json_response(&json!({ "message": "Logged out" }))
}
