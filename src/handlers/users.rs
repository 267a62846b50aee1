use serde_json::json;

use crate::auth::AuthUser;
use crate::db::{users, Database};
use crate::errors::ServerError;
use crate::responses::{json_response, ResultResp};

/// GET /api/v1/users/me
pub fn me(db: &Database, user: &AuthUser) -> ResultResp {
    let profile = db
        .with_conn(|conn| users::get_user(conn, user.id))?
        .ok_or(ServerError::InternalError)?;
    json_response(&json!({ "user": profile }))
}
