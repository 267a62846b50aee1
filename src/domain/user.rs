use serde::Serialize;

/// Public view of a user account. Never carries password material.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub created_at: i64,
}
