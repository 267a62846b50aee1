use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::domain::user::User;
use crate::errors::ServerError;

/// Credential row used by the login flow. Hash material stays in this
/// module and `auth::passwords`; it is never serialized.
#[derive(Debug)]
pub struct UserAuthRow {
    pub user: User,
    pub password_hash: Vec<u8>,
    pub password_salt: Vec<u8>,
}

fn user_from_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        username: row.get(2)?,
        created_at: row.get(3)?,
    })
}

pub fn create_user(
    conn: &Connection,
    email: &str,
    username: &str,
    password_hash: &[u8],
    password_salt: &[u8],
    now: i64,
) -> Result<User, ServerError> {
    conn.execute(
        r#"
        insert into users (email, username, password_hash, password_salt, created_at)
        values (?, ?, ?, ?, ?)
        "#,
        params![email, username, password_hash, password_salt, now],
    )
    .map_err(|e| ServerError::DbError(format!("insert user failed: {e}")))?;

    get_user(conn, conn.last_insert_rowid())?.ok_or(ServerError::InternalError)
}

pub fn get_user(conn: &Connection, id: i64) -> Result<Option<User>, ServerError> {
    conn.query_row(
        "select id, email, username, created_at from users where id = ?",
        params![id],
        user_from_row,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select user failed: {e}")))
}

pub fn email_or_username_taken(
    conn: &Connection,
    email: &str,
    username: &str,
) -> Result<bool, ServerError> {
    let count: i64 = conn
        .query_row(
            "select count(*) from users where email = ? or username = ?",
            params![email, username],
            |r| r.get(0),
        )
        .map_err(|e| ServerError::DbError(format!("check user uniqueness failed: {e}")))?;
    Ok(count > 0)
}

pub fn find_auth_by_email(
    conn: &Connection,
    email: &str,
) -> Result<Option<UserAuthRow>, ServerError> {
    conn.query_row(
        r#"
        select id, email, username, created_at, password_hash, password_salt
        from users where email = ?
        "#,
        params![email],
        |row| {
            Ok(UserAuthRow {
                user: user_from_row(row)?,
                password_hash: row.get(4)?,
                password_salt: row.get(5)?,
            })
        },
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select user credentials failed: {e}")))
}

pub fn count_users(conn: &Connection) -> Result<i64, ServerError> {
    conn.query_row("select count(*) from users", [], |r| r.get(0))
        .map_err(|e| ServerError::DbError(format!("count users failed: {e}")))
}
